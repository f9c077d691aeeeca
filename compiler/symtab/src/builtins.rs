//! Pre-declared routines.
//!
//! This table is the single source of truth for what a fresh
//! [`SymbolTable`] registers before any source is processed.

use kpl_common::error::SymtabError;
use kpl_common::types::Type;
use log::debug;

use crate::ids::ObjectId;
use crate::object::{ObjectAttrs, ParamMode};
use crate::table::SymbolTable;

/// Primitive used in a built-in signature; mapped to the table's canonical
/// types at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinType {
    Int,
    Char,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinSignature {
    Function { returns: BuiltinType },
    /// At most one by-value parameter: `(name, type)`.
    Procedure { param: Option<(&'static str, BuiltinType)> },
}

/// A built-in routine definition.
pub struct BuiltinDef {
    pub name: &'static str,
    pub signature: BuiltinSignature,
    /// Human-readable description
    pub description: &'static str,
}

pub static BUILTINS: &[BuiltinDef] = &[
    BuiltinDef {
        name: "READC",
        signature: BuiltinSignature::Function {
            returns: BuiltinType::Char,
        },
        description: "Read one character from input",
    },
    BuiltinDef {
        name: "READI",
        signature: BuiltinSignature::Function {
            returns: BuiltinType::Int,
        },
        description: "Read an integer from input",
    },
    BuiltinDef {
        name: "WRITEI",
        signature: BuiltinSignature::Procedure {
            param: Some(("i", BuiltinType::Int)),
        },
        description: "Write an integer",
    },
    BuiltinDef {
        name: "WRITEC",
        signature: BuiltinSignature::Procedure {
            param: Some(("ch", BuiltinType::Char)),
        },
        description: "Write one character",
    },
    BuiltinDef {
        name: "WRITELN",
        signature: BuiltinSignature::Procedure { param: None },
        description: "Write a line break",
    },
];

impl SymbolTable {
    fn builtin_type(&self, ty: BuiltinType) -> Type {
        match ty {
            BuiltinType::Int => self.int_type().clone(),
            BuiltinType::Char => self.char_type().clone(),
        }
    }

    /// Names in [`BUILTINS`] are fixed, so they skip identifier validation.
    pub(crate) fn register_builtins(&mut self) -> Result<(), SymtabError> {
        for def in BUILTINS {
            let id = match def.signature {
                BuiltinSignature::Function { returns } => {
                    let id = self.alloc_function(def.name);
                    let ty = self.builtin_type(returns);
                    let entry = self.entry_mut(id)?;
                    let ObjectAttrs::Function(f) = entry.object.attrs_mut() else {
                        return Err(SymtabError::NotARoutine {
                            name: def.name.to_string(),
                        });
                    };
                    f.return_type = Some(ty);
                    id
                }
                BuiltinSignature::Procedure { param } => {
                    let id = self.alloc_procedure(def.name);
                    if let Some((name, ty)) = param {
                        let ty = self.builtin_type(ty);
                        let param = self.alloc_parameter(name, ParamMode::ByValue, id, Some(ty));
                        self.attach_builtin_param(id, param)?;
                    }
                    id
                }
            };
            self.entry_mut(id)?.attached = true;
            self.globals.push(id);
        }
        debug!("registered {} built-ins", BUILTINS.len());
        Ok(())
    }

    fn attach_builtin_param(&mut self, routine: ObjectId, param: ObjectId) -> Result<(), SymtabError> {
        let entry = self.entry_mut(routine)?;
        let name = entry.object.name().to_string();
        entry
            .object
            .params_mut()
            .ok_or(SymtabError::NotARoutine { name })?
            .push(param);
        self.entry_mut(param)?.attached = true;
        Ok(())
    }
}
