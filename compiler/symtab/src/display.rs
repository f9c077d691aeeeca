//! Human-readable rendering of the table, mainly for debugging and tests.

use std::fmt;

use crate::ids::{ObjectId, ScopeId};
use crate::object::{ObjectAttrs, ParamMode};
use crate::table::SymbolTable;

const INDENT: usize = 4;

impl fmt::Display for ParamMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamMode::ByValue => write!(f, "value"),
            ParamMode::ByReference => write!(f, "VAR"),
        }
    }
}

impl SymbolTable {
    /// Render the program tree followed by the built-ins, one object per
    /// line, nested bodies indented.
    pub fn dump(&self) -> String {
        let mut lines = Vec::new();
        if let Some(program) = self.program {
            self.dump_object(program, 0, &mut lines);
        }
        lines.push("Built-ins".to_string());
        for &id in &self.globals {
            self.dump_object(id, 1, &mut lines);
        }
        lines.join("\n")
    }

    /// One-line description of an object, without its nested declarations.
    pub fn describe(&self, id: ObjectId) -> String {
        let Some(obj) = self.object(id) else {
            return format!("<unknown {id:?}>");
        };
        let ty = obj.ty().map_or_else(|| "?".to_string(), ToString::to_string);
        let name = obj.name();
        match obj.attrs() {
            ObjectAttrs::Program(_) => format!("Program {name}"),
            ObjectAttrs::Variable(_) => format!("Var {name} : {ty}"),
            ObjectAttrs::Constant(c) => match &c.value {
                Some(value) => format!("Const {name} = {value}"),
                None => format!("Const {name} = ?"),
            },
            ObjectAttrs::NamedType(_) => format!("Type {name} = {ty}"),
            ObjectAttrs::Function(_) => format!("Function {name} : {ty}"),
            ObjectAttrs::Procedure(_) => format!("Procedure {name}"),
            ObjectAttrs::Parameter(p) => match p.mode {
                ParamMode::ByValue => format!("Param {name} : {ty}"),
                ParamMode::ByReference => format!("Param {} {name} : {ty}", p.mode),
            },
        }
    }

    fn dump_object(&self, id: ObjectId, depth: usize, lines: &mut Vec<String>) {
        lines.push(format!("{:width$}{}", "", self.describe(id), width = depth * INDENT));
        let Some(obj) = self.object(id) else {
            return;
        };
        for &param in obj.params() {
            self.dump_object(param, depth + 1, lines);
        }
        if let Some(scope) = obj.owned_scope() {
            self.dump_scope(scope, depth + 1, lines);
        }
    }

    fn dump_scope(&self, id: ScopeId, depth: usize, lines: &mut Vec<String>) {
        if let Some(scope) = self.scope(id) {
            for &obj in scope.objects() {
                self.dump_object(obj, depth, lines);
            }
        }
    }
}
