//! Symbol table for the KPL front end.
//!
//! The parser drives a [`SymbolTable`] while walking nested blocks: it
//! creates objects, describes them, declares them into the current scope and
//! moves the scope cursor with [`SymbolTable::enter_block`] and
//! [`SymbolTable::exit_block`].

mod builtins;
mod display;
mod ids;
mod object;
mod scope;
mod table;
mod teardown;

pub use builtins::{BUILTINS, BuiltinDef, BuiltinSignature, BuiltinType};
pub use ids::{ObjectId, ScopeId};
pub use object::{
    ConstantAttrs, FunctionAttrs, Object, ObjectAttrs, ObjectKind, ParamMode, ParameterAttrs,
    ProcedureAttrs, ProgramAttrs, TypeAttrs, VariableAttrs,
};
pub use scope::{OuterChain, Scope};
pub use table::SymbolTable;
pub use teardown::TeardownReport;
