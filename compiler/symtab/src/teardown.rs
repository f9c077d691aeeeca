//! End-of-life for a [`SymbolTable`].
//!
//! Teardown releases the ownership tree top-down: the program (and through
//! its scope everything declared in it), then the built-ins. Back-links are
//! never followed during the walk, so nothing is read after its owner has
//! been released.

use log::{error, info, warn};

use crate::ids::{ObjectId, ScopeId};
use crate::object::ObjectAttrs;
use crate::table::SymbolTable;

/// What [`SymbolTable::teardown`] released.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TeardownReport {
    /// Objects released, orphans and their subtrees included.
    pub objects: usize,
    /// Scopes released, orphans and their subtrees included.
    pub scopes: usize,
    /// Objects created but never attached to an owner.
    pub orphaned_objects: usize,
    /// Scopes created but never held by a program or routine.
    pub orphaned_scopes: usize,
}

impl SymbolTable {
    /// Release every object and scope exactly once and consume the table.
    pub fn teardown(mut self) -> TeardownReport {
        let mut report = TeardownReport::default();

        if let Some(program) = self.program.take() {
            self.release_object(program, &mut report);
        }
        for id in std::mem::take(&mut self.globals) {
            self.release_object(id, &mut report);
        }
        self.current_scope = None;

        // Unattached objects first; each takes its scope and parameters
        // with it.
        for index in 0..self.objects.len() {
            let unattached = self.objects[index]
                .as_ref()
                .is_some_and(|entry| !entry.attached);
            if unattached {
                let id = ObjectId::from_index(index);
                if let Some(obj) = self.object(id) {
                    warn!("{} `{}` was never declared", obj.kind().as_str(), obj.name());
                }
                report.orphaned_objects += 1;
                self.release_object(id, &mut report);
            }
        }
        // Scopes no object holds, with everything declared into them.
        for index in 0..self.scopes.len() {
            if self.scopes[index].is_some() {
                warn!("scope #{index} has no owner");
                report.orphaned_scopes += 1;
                self.release_scope(ScopeId::from_index(index), &mut report);
            }
        }
        for index in 0..self.objects.len() {
            if self.objects[index].take().is_some() {
                error!("{:?} was attached but unreachable", ObjectId::from_index(index));
                report.objects += 1;
            }
        }

        info!(
            "symbol table released: {} objects, {} scopes",
            report.objects, report.scopes
        );
        report
    }

    fn release_object(&mut self, id: ObjectId, report: &mut TeardownReport) {
        let Some(entry) = self.objects.get_mut(id.index()).and_then(Option::take) else {
            error!("{id:?} released twice");
            return;
        };
        report.objects += 1;

        match entry.object.into_attrs() {
            ObjectAttrs::Program(p) => self.release_scope(p.scope, report),
            ObjectAttrs::Function(f) => {
                for param in f.params {
                    self.release_object(param, report);
                }
                self.release_scope(f.scope, report);
            }
            ObjectAttrs::Procedure(p) => {
                for param in p.params {
                    self.release_object(param, report);
                }
                self.release_scope(p.scope, report);
            }
            ObjectAttrs::Variable(_)
            | ObjectAttrs::Constant(_)
            | ObjectAttrs::NamedType(_)
            | ObjectAttrs::Parameter(_) => {}
        }
    }

    fn release_scope(&mut self, id: ScopeId, report: &mut TeardownReport) {
        let Some(scope) = self.scopes.get_mut(id.index()).and_then(Option::take) else {
            error!("{id:?} released twice");
            return;
        };
        report.scopes += 1;
        for obj in scope.objects {
            self.release_object(obj, report);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::ParamMode;

    #[test]
    fn fresh_table() {
        let report = SymbolTable::new().teardown();
        // 5 built-ins + 2 parameters, one scope per built-in
        assert_eq!(
            report,
            TeardownReport {
                objects: 7,
                scopes: 5,
                orphaned_objects: 0,
                orphaned_scopes: 0,
            }
        );
    }

    #[test]
    fn undeclared_objects_are_orphans() {
        let mut table = SymbolTable::new();
        let prog = table.create_program_object("P").unwrap();
        let root = table.object(prog).unwrap().owned_scope().unwrap();
        table.enter_block(root).unwrap();
        table.create_variable_object("LOST").unwrap();
        let func = table.create_function_object("F").unwrap();
        table
            .create_parameter_object("a", ParamMode::ByValue, func)
            .unwrap();

        let report = table.teardown();
        // LOST, F and its undeclared parameter `a`
        assert_eq!(report.orphaned_objects, 3);
        assert_eq!(report.orphaned_scopes, 0);
        assert_eq!(report.objects, 7 + 1 + 3);
        assert_eq!(report.scopes, 5 + 1 + 1);
    }

    #[test]
    fn declarations_in_free_standing_scope_are_not_orphans() {
        let mut table = SymbolTable::new();
        let prog = table.create_program_object("P").unwrap();
        let root = table.object(prog).unwrap().owned_scope().unwrap();
        let extra = table.create_scope(prog, Some(root)).unwrap();
        table.enter_block(extra).unwrap();
        let v = table.create_variable_object("V").unwrap();
        table.declare_object(v).unwrap();

        let report = table.teardown();
        assert_eq!(
            report,
            TeardownReport {
                objects: 7 + 2,
                scopes: 5 + 2,
                orphaned_objects: 0,
                orphaned_scopes: 1,
            }
        );
    }

    #[test]
    fn free_standing_scope_is_orphan() {
        let mut table = SymbolTable::new();
        let prog = table.create_program_object("P").unwrap();
        table.create_scope(prog, None).unwrap();
        let report = table.teardown();
        assert_eq!(report.orphaned_scopes, 1);
        assert_eq!(report.scopes, 5 + 2);
    }
}
