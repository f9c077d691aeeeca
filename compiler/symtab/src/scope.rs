//! Lexical scopes.

use crate::ids::{ObjectId, ScopeId};
use crate::table::SymbolTable;

/// One lexical block: its local declarations in insertion order, the
/// program or routine whose body it is, and the enclosing block.
#[derive(Debug, Clone)]
pub struct Scope {
    pub(crate) objects: Vec<ObjectId>,
    pub(crate) owner: ObjectId,
    pub(crate) outer: Option<ScopeId>,
}

impl Scope {
    pub(crate) fn new(owner: ObjectId, outer: Option<ScopeId>) -> Self {
        Self {
            objects: Vec::new(),
            owner,
            outer,
        }
    }

    /// Locally declared objects. Parameters are never listed here.
    pub fn objects(&self) -> &[ObjectId] {
        &self.objects
    }

    pub fn owner(&self) -> ObjectId {
        self.owner
    }

    /// The lexically enclosing scope; `None` for a root scope.
    pub fn outer(&self) -> Option<ScopeId> {
        self.outer
    }
}

/// Walks from a scope outwards along `outer` links, starting with the scope
/// itself.
pub struct OuterChain<'a> {
    table: &'a SymbolTable,
    next: Option<ScopeId>,
}

impl<'a> OuterChain<'a> {
    pub(crate) fn new(table: &'a SymbolTable, start: Option<ScopeId>) -> Self {
        Self { table, next: start }
    }
}

impl<'a> Iterator for OuterChain<'a> {
    type Item = (ScopeId, &'a Scope);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        let scope = self.table.scope(id)?;
        self.next = scope.outer;
        Some((id, scope))
    }
}
