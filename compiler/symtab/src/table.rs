use kpl_common::error::SymtabError;
use kpl_common::limits::Limits;
use kpl_common::types::{Type, make_char_type, make_int_type};
use log::{debug, error, trace};

use crate::ids::{ObjectId, ScopeId};
use crate::object::{
    ConstantAttrs, FunctionAttrs, Object, ObjectAttrs, ObjectKind, ParamMode, ParameterAttrs,
    ProcedureAttrs, ProgramAttrs, TypeAttrs, VariableAttrs,
};
use crate::scope::{OuterChain, Scope};

#[derive(Debug)]
pub(crate) struct ObjectEntry {
    pub(crate) object: Object,
    /// Set once the object has an owner: a scope, a parameter list, the
    /// built-in list or the table's program slot.
    pub(crate) attached: bool,
}

/// The symbol table for one compilation.
///
/// Objects and scopes live in arenas owned by the table and refer to each
/// other by id. Ownership is the tree program -> scope -> objects (and
/// routine -> parameters, routine -> scope); every other link is a plain id
/// that is only meaningful until [`SymbolTable::teardown`].
///
/// The table is not synchronized. One traversal drives it from construction
/// to teardown.
#[derive(Debug)]
pub struct SymbolTable {
    pub(crate) objects: Vec<Option<ObjectEntry>>,
    pub(crate) scopes: Vec<Option<Scope>>,
    pub(crate) program: Option<ObjectId>,
    pub(crate) current_scope: Option<ScopeId>,
    pub(crate) globals: Vec<ObjectId>,
    int_type: Type,
    char_type: Type,
    limits: Limits,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::with_limits(Limits::default())
    }

    /// Create an empty table and register the built-in routines.
    pub fn with_limits(limits: Limits) -> Self {
        let mut table = Self {
            objects: Vec::new(),
            scopes: Vec::new(),
            program: None,
            current_scope: None,
            globals: Vec::new(),
            int_type: make_int_type(),
            char_type: make_char_type(),
            limits,
        };
        if let Err(err) = table.register_builtins() {
            error!("failed to register built-ins: {err}");
            debug_assert!(false, "failed to register built-ins: {err}");
        }
        table
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    /// Canonical `Int`, shared by the built-in signatures.
    pub fn int_type(&self) -> &Type {
        &self.int_type
    }

    /// Canonical `Char`, shared by the built-in signatures.
    pub fn char_type(&self) -> &Type {
        &self.char_type
    }

    pub fn program(&self) -> Option<ObjectId> {
        self.program
    }

    pub fn current_scope(&self) -> Option<ScopeId> {
        self.current_scope
    }

    /// Built-in functions and procedures, in registration order.
    pub fn global_objects(&self) -> &[ObjectId] {
        &self.globals
    }

    pub fn object(&self, id: ObjectId) -> Option<&Object> {
        self.objects
            .get(id.index())
            .and_then(Option::as_ref)
            .map(|entry| &entry.object)
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut Object> {
        self.objects
            .get_mut(id.index())
            .and_then(Option::as_mut)
            .map(|entry| &mut entry.object)
    }

    pub fn scope(&self, id: ScopeId) -> Option<&Scope> {
        self.scopes.get(id.index()).and_then(Option::as_ref)
    }

    /// `scope` followed by each enclosing scope up to its root.
    pub fn outer_chain(&self, scope: ScopeId) -> OuterChain<'_> {
        OuterChain::new(self, Some(scope))
    }

    pub(crate) fn entry_mut(&mut self, id: ObjectId) -> Result<&mut ObjectEntry, SymtabError> {
        self.objects
            .get_mut(id.index())
            .and_then(Option::as_mut)
            .ok_or(SymtabError::UnknownObject { index: id.to_raw() })
    }

    fn scope_mut(&mut self, id: ScopeId) -> Result<&mut Scope, SymtabError> {
        self.scopes
            .get_mut(id.index())
            .and_then(Option::as_mut)
            .ok_or(SymtabError::UnknownScope { index: id.to_raw() })
    }

    fn next_object_id(&self) -> ObjectId {
        ObjectId::from_index(self.objects.len())
    }

    pub(crate) fn alloc_object(&mut self, object: Object) -> ObjectId {
        let id = self.next_object_id();
        debug!("created {} `{}` as {id:?}", object.kind().as_str(), object.name());
        self.objects.push(Some(ObjectEntry {
            object,
            attached: false,
        }));
        id
    }

    fn alloc_scope(&mut self, owner: ObjectId, outer: Option<ScopeId>) -> ScopeId {
        let id = ScopeId::from_index(self.scopes.len());
        self.scopes.push(Some(Scope::new(owner, outer)));
        id
    }

    // ---- scopes --------------------------------------------------------

    /// Create an empty scope tagged with `owner` and nested in `outer`.
    ///
    /// Neither link is ownership: the scope is released with whichever
    /// object's attributes hold it, and one created here that no object
    /// holds is reported as an orphan at teardown.
    pub fn create_scope(
        &mut self,
        owner: ObjectId,
        outer: Option<ScopeId>,
    ) -> Result<ScopeId, SymtabError> {
        if self.object(owner).is_none() {
            return Err(SymtabError::UnknownObject {
                index: owner.to_raw(),
            });
        }
        if let Some(outer) = outer {
            if self.scope(outer).is_none() {
                return Err(SymtabError::UnknownScope {
                    index: outer.to_raw(),
                });
            }
        }
        Ok(self.alloc_scope(owner, outer))
    }

    /// Move the cursor to `scope`. `None` leaves the cursor where it is.
    pub fn enter_block(&mut self, scope: impl Into<Option<ScopeId>>) -> Result<(), SymtabError> {
        let Some(scope) = scope.into() else {
            return Ok(());
        };
        if self.scope(scope).is_none() {
            return Err(SymtabError::UnknownScope {
                index: scope.to_raw(),
            });
        }
        trace!("enter {scope:?}");
        self.current_scope = Some(scope);
        Ok(())
    }

    /// Move the cursor to the enclosing scope. At a root scope (or before
    /// any block was entered) this does nothing.
    pub fn exit_block(&mut self) {
        let outer = self
            .current_scope
            .and_then(|id| self.scope(id))
            .and_then(Scope::outer);
        if let Some(outer) = outer {
            trace!("exit {:?} -> {outer:?}", self.current_scope);
            self.current_scope = Some(outer);
        }
    }

    // ---- object constructors -------------------------------------------

    /// Create the program object, its root scope, and register it as the
    /// table's program. The cursor does not move.
    pub fn create_program_object(&mut self, name: &str) -> Result<ObjectId, SymtabError> {
        self.limits.validate_name(name)?;
        if let Some(existing) = self.program.and_then(|id| self.object(id)) {
            return Err(SymtabError::ProgramAlreadyDefined {
                name: existing.name().to_string(),
            });
        }
        let id = self.next_object_id();
        let scope = self.alloc_scope(id, None);
        let id = self.alloc_object(Object::new(
            name,
            ObjectAttrs::Program(ProgramAttrs { scope }),
        ));
        self.entry_mut(id)?.attached = true;
        self.program = Some(id);
        Ok(id)
    }

    pub fn create_variable_object(&mut self, name: &str) -> Result<ObjectId, SymtabError> {
        self.limits.validate_name(name)?;
        let attrs = VariableAttrs {
            ty: None,
            scope: self.current_scope,
        };
        Ok(self.alloc_object(Object::new(name, ObjectAttrs::Variable(attrs))))
    }

    pub fn create_constant_object(&mut self, name: &str) -> Result<ObjectId, SymtabError> {
        self.limits.validate_name(name)?;
        Ok(self.alloc_object(Object::new(
            name,
            ObjectAttrs::Constant(ConstantAttrs::default()),
        )))
    }

    pub fn create_type_object(&mut self, name: &str) -> Result<ObjectId, SymtabError> {
        self.limits.validate_name(name)?;
        Ok(self.alloc_object(Object::new(
            name,
            ObjectAttrs::NamedType(TypeAttrs::default()),
        )))
    }

    /// Create a function whose body scope is nested in the current scope.
    /// The cursor does not move; enter the body with
    /// [`SymbolTable::enter_block`] once the signature is described.
    pub fn create_function_object(&mut self, name: &str) -> Result<ObjectId, SymtabError> {
        self.limits.validate_name(name)?;
        Ok(self.alloc_function(name))
    }

    /// Procedure counterpart of [`SymbolTable::create_function_object`].
    pub fn create_procedure_object(&mut self, name: &str) -> Result<ObjectId, SymtabError> {
        self.limits.validate_name(name)?;
        Ok(self.alloc_procedure(name))
    }

    /// Create a parameter of `routine`, which must be a function or
    /// procedure. Declaring it is a separate step.
    pub fn create_parameter_object(
        &mut self,
        name: &str,
        mode: ParamMode,
        routine: ObjectId,
    ) -> Result<ObjectId, SymtabError> {
        self.limits.validate_name(name)?;
        let owner = self.object(routine).ok_or(SymtabError::UnknownObject {
            index: routine.to_raw(),
        })?;
        if !owner.kind().is_routine() {
            return Err(SymtabError::NotARoutine {
                name: owner.name().to_string(),
            });
        }
        Ok(self.alloc_parameter(name, mode, routine, None))
    }

    pub(crate) fn alloc_function(&mut self, name: &str) -> ObjectId {
        let id = self.next_object_id();
        let scope = self.alloc_scope(id, self.current_scope);
        self.alloc_object(Object::new(
            name,
            ObjectAttrs::Function(FunctionAttrs {
                params: Vec::new(),
                return_type: None,
                scope,
            }),
        ))
    }

    pub(crate) fn alloc_procedure(&mut self, name: &str) -> ObjectId {
        let id = self.next_object_id();
        let scope = self.alloc_scope(id, self.current_scope);
        self.alloc_object(Object::new(
            name,
            ObjectAttrs::Procedure(ProcedureAttrs {
                params: Vec::new(),
                scope,
            }),
        ))
    }

    pub(crate) fn alloc_parameter(
        &mut self,
        name: &str,
        mode: ParamMode,
        routine: ObjectId,
        ty: Option<Type>,
    ) -> ObjectId {
        self.alloc_object(Object::new(
            name,
            ObjectAttrs::Parameter(ParameterAttrs { mode, ty, routine }),
        ))
    }

    // ---- declaration & lookup ------------------------------------------

    /// Attach `obj` to the current scope.
    ///
    /// Parameters go to the parameter list of the routine that owns the
    /// current scope instead of the scope's own declarations.
    pub fn declare_object(&mut self, obj: ObjectId) -> Result<(), SymtabError> {
        let entry = self.entry_mut(obj)?;
        let name = entry.object.name().to_string();
        if entry.attached {
            return Err(SymtabError::AlreadyDeclared { name });
        }
        let is_param = entry.object.kind() == ObjectKind::Parameter;
        let Some(scope_id) = self.current_scope else {
            return Err(SymtabError::NoCurrentScope { name });
        };

        if is_param {
            let owner = self.scope_mut(scope_id)?.owner;
            let routine = self.entry_mut(owner)?;
            let routine_name = routine.object.name().to_string();
            let params = routine
                .object
                .params_mut()
                .ok_or(SymtabError::NotARoutine { name: routine_name.clone() })?;
            params.push(obj);
            debug!("declared parameter `{name}` of `{routine_name}`");
        } else {
            self.scope_mut(scope_id)?.objects.push(obj);
            debug!("declared `{name}` in {scope_id:?}");
        }
        self.entry_mut(obj)?.attached = true;
        Ok(())
    }

    /// First object in `list` named exactly `name`.
    ///
    /// Only `list` is searched; walking enclosing scopes is up to the
    /// caller.
    pub fn find_object(&self, list: &[ObjectId], name: &str) -> Option<ObjectId> {
        list.iter()
            .copied()
            .find(|&id| self.object(id).is_some_and(|obj| obj.name() == name))
    }
}
