//! Declared objects: one record per named entity, with kind-specific
//! attributes held in a closed sum type.

use kpl_common::constant::ConstantValue;
use kpl_common::error::SymtabError;
use kpl_common::types::Type;

use crate::ids::{ObjectId, ScopeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Program,
    Variable,
    Constant,
    NamedType,
    Function,
    Procedure,
    Parameter,
}

impl ObjectKind {
    /// Human-readable description used in diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            ObjectKind::Program => "program",
            ObjectKind::Variable => "variable",
            ObjectKind::Constant => "constant",
            ObjectKind::NamedType => "type",
            ObjectKind::Function => "function",
            ObjectKind::Procedure => "procedure",
            ObjectKind::Parameter => "parameter",
        }
    }

    pub fn is_routine(self) -> bool {
        matches!(self, ObjectKind::Function | ObjectKind::Procedure)
    }
}

/// How an argument is passed to a routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamMode {
    ByValue,
    ByReference,
}

#[derive(Debug, Clone)]
pub struct ProgramAttrs {
    pub(crate) scope: ScopeId,
}

#[derive(Debug, Clone, Default)]
pub struct VariableAttrs {
    pub ty: Option<Type>,
    /// Scope that was current when the variable was created.
    pub(crate) scope: Option<ScopeId>,
}

#[derive(Debug, Clone, Default)]
pub struct ConstantAttrs {
    pub value: Option<ConstantValue>,
}

#[derive(Debug, Clone, Default)]
pub struct TypeAttrs {
    pub actual_type: Option<Type>,
}

#[derive(Debug, Clone)]
pub struct FunctionAttrs {
    pub(crate) params: Vec<ObjectId>,
    pub return_type: Option<Type>,
    pub(crate) scope: ScopeId,
}

#[derive(Debug, Clone)]
pub struct ProcedureAttrs {
    pub(crate) params: Vec<ObjectId>,
    pub(crate) scope: ScopeId,
}

#[derive(Debug, Clone)]
pub struct ParameterAttrs {
    pub mode: ParamMode,
    pub ty: Option<Type>,
    pub(crate) routine: ObjectId,
}

#[derive(Debug, Clone)]
pub enum ObjectAttrs {
    Program(ProgramAttrs),
    Variable(VariableAttrs),
    Constant(ConstantAttrs),
    NamedType(TypeAttrs),
    Function(FunctionAttrs),
    Procedure(ProcedureAttrs),
    Parameter(ParameterAttrs),
}

/// A declared entity. Names are unique only within the list the object is
/// declared into.
///
/// The kind is fixed at construction. Outside this crate attributes change
/// only through the typed setters:
///
/// ```compile_fail
/// use kpl_symtab::{Object, ObjectAttrs, VariableAttrs};
///
/// fn retag(obj: &mut Object) {
///     *obj.attrs_mut() = ObjectAttrs::Variable(VariableAttrs::default());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Object {
    name: String,
    attrs: ObjectAttrs,
}

impl Object {
    pub(crate) fn new(name: impl Into<String>, attrs: ObjectAttrs) -> Self {
        Self {
            name: name.into(),
            attrs,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ObjectKind {
        match &self.attrs {
            ObjectAttrs::Program(_) => ObjectKind::Program,
            ObjectAttrs::Variable(_) => ObjectKind::Variable,
            ObjectAttrs::Constant(_) => ObjectKind::Constant,
            ObjectAttrs::NamedType(_) => ObjectKind::NamedType,
            ObjectAttrs::Function(_) => ObjectKind::Function,
            ObjectAttrs::Procedure(_) => ObjectKind::Procedure,
            ObjectAttrs::Parameter(_) => ObjectKind::Parameter,
        }
    }

    pub fn attrs(&self) -> &ObjectAttrs {
        &self.attrs
    }

    pub(crate) fn attrs_mut(&mut self) -> &mut ObjectAttrs {
        &mut self.attrs
    }

    pub(crate) fn into_attrs(self) -> ObjectAttrs {
        self.attrs
    }

    /// The body scope of a program, function or procedure.
    pub fn owned_scope(&self) -> Option<ScopeId> {
        match &self.attrs {
            ObjectAttrs::Program(p) => Some(p.scope),
            ObjectAttrs::Function(f) => Some(f.scope),
            ObjectAttrs::Procedure(p) => Some(p.scope),
            _ => None,
        }
    }

    /// Formal parameters in declaration order; empty for non-routines.
    pub fn params(&self) -> &[ObjectId] {
        match &self.attrs {
            ObjectAttrs::Function(f) => &f.params,
            ObjectAttrs::Procedure(p) => &p.params,
            _ => &[],
        }
    }

    pub(crate) fn params_mut(&mut self) -> Option<&mut Vec<ObjectId>> {
        match &mut self.attrs {
            ObjectAttrs::Function(f) => Some(&mut f.params),
            ObjectAttrs::Procedure(p) => Some(&mut p.params),
            _ => None,
        }
    }

    /// The type slot of this object: a variable's or parameter's type, a
    /// named type's underlying type, a function's return type.
    pub fn ty(&self) -> Option<&Type> {
        match &self.attrs {
            ObjectAttrs::Variable(v) => v.ty.as_ref(),
            ObjectAttrs::NamedType(t) => t.actual_type.as_ref(),
            ObjectAttrs::Function(f) => f.return_type.as_ref(),
            ObjectAttrs::Parameter(p) => p.ty.as_ref(),
            _ => None,
        }
    }

    /// Fill the type slot described in [`Object::ty`], replacing any earlier
    /// value.
    pub fn set_type(&mut self, ty: Type) -> Result<(), SymtabError> {
        let slot = match &mut self.attrs {
            ObjectAttrs::Variable(v) => &mut v.ty,
            ObjectAttrs::NamedType(t) => &mut t.actual_type,
            ObjectAttrs::Function(f) => &mut f.return_type,
            ObjectAttrs::Parameter(p) => &mut p.ty,
            _ => return Err(self.mismatch("type")),
        };
        *slot = Some(ty);
        Ok(())
    }

    pub fn constant_value(&self) -> Option<&ConstantValue> {
        match &self.attrs {
            ObjectAttrs::Constant(c) => c.value.as_ref(),
            _ => None,
        }
    }

    pub fn set_constant_value(&mut self, value: ConstantValue) -> Result<(), SymtabError> {
        match &mut self.attrs {
            ObjectAttrs::Constant(c) => {
                c.value = Some(value);
                Ok(())
            }
            _ => Err(self.mismatch("constant value")),
        }
    }

    pub fn param_mode(&self) -> Option<ParamMode> {
        match &self.attrs {
            ObjectAttrs::Parameter(p) => Some(p.mode),
            _ => None,
        }
    }

    /// The function or procedure a parameter belongs to.
    pub fn routine(&self) -> Option<ObjectId> {
        match &self.attrs {
            ObjectAttrs::Parameter(p) => Some(p.routine),
            _ => None,
        }
    }

    /// The scope a variable was created in.
    pub fn home_scope(&self) -> Option<ScopeId> {
        match &self.attrs {
            ObjectAttrs::Variable(v) => v.scope,
            _ => None,
        }
    }

    fn mismatch(&self, attribute: &'static str) -> SymtabError {
        SymtabError::AttributeMismatch {
            name: self.name.clone(),
            kind: self.kind().as_str(),
            attribute,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kpl_common::constant::make_int_constant;
    use kpl_common::types::{make_array_type, make_char_type, make_int_type};

    fn constant(name: &str) -> Object {
        Object::new(name, ObjectAttrs::Constant(ConstantAttrs::default()))
    }

    #[test]
    fn kind_follows_attrs() {
        let var = Object::new("X", ObjectAttrs::Variable(VariableAttrs::default()));
        assert_eq!(var.kind(), ObjectKind::Variable);
        assert_eq!(var.name(), "X");
        assert!(var.ty().is_none());
        assert!(var.params().is_empty());
        assert!(var.owned_scope().is_none());
    }

    #[test]
    fn set_type_on_each_slot() {
        let mut ty = Object::new("T", ObjectAttrs::NamedType(TypeAttrs::default()));
        let arr = make_array_type(10, Some(make_int_type())).unwrap();
        ty.set_type(arr.clone()).unwrap();
        assert_eq!(ty.ty(), Some(&arr));

        let mut param = Object::new(
            "p",
            ObjectAttrs::Parameter(ParameterAttrs {
                mode: ParamMode::ByReference,
                ty: None,
                routine: ObjectId::from_index(0),
            }),
        );
        param.set_type(make_char_type()).unwrap();
        assert_eq!(param.ty(), Some(&Type::Char));
        assert_eq!(param.param_mode(), Some(ParamMode::ByReference));
        assert_eq!(param.routine(), Some(ObjectId::from_index(0)));
    }

    #[test]
    fn set_type_on_constant_fails() {
        let mut c = constant("C");
        let err = c.set_type(make_int_type()).unwrap_err();
        assert_eq!(err.to_string(), "constant `C` has no type");
    }

    #[test]
    fn constant_value_slot() {
        let mut c = constant("C");
        assert!(c.constant_value().is_none());
        c.set_constant_value(make_int_constant(3)).unwrap();
        assert_eq!(c.constant_value(), Some(&ConstantValue::Int(3)));

        let mut v = Object::new("V", ObjectAttrs::Variable(VariableAttrs::default()));
        assert!(v.set_constant_value(make_int_constant(3)).is_err());
    }

    #[test]
    fn setters_keep_kind() {
        let mut func = Object::new(
            "F",
            ObjectAttrs::Function(FunctionAttrs {
                params: Vec::new(),
                return_type: None,
                scope: ScopeId::from_index(0),
            }),
        );
        func.set_type(make_int_type()).unwrap();
        assert_eq!(func.kind(), ObjectKind::Function);
        assert_eq!(func.owned_scope(), Some(ScopeId::from_index(0)));
        assert!(func.set_constant_value(make_int_constant(1)).is_err());
        assert_eq!(func.kind(), ObjectKind::Function);
    }

    #[test]
    fn routine_kinds() {
        assert!(ObjectKind::Function.is_routine());
        assert!(ObjectKind::Procedure.is_routine());
        assert!(!ObjectKind::Program.is_routine());
        assert!(!ObjectKind::Parameter.is_routine());
    }
}
