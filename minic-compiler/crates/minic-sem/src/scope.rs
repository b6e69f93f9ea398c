//! Arena-indexed scope tree. Scopes never own their children by pointer —
//! every scope after the root stores its parent as a [`ScopeId`], so the
//! whole tree drops as one `IndexVec` at the end of analysis.

use minic_util::{define_idx, IndexVec};
use std::collections::HashMap;

use crate::symbol::Symbol;

define_idx!(ScopeId);

#[derive(Debug)]
pub struct Scope {
    pub name: String,
    pub level: u32,
    pub parent: Option<ScopeId>,
    pub entries: HashMap<String, Symbol>,
}

/// Tracks every scope created during one analysis pass plus which one is
/// current. `GLOBAL_SCOPE` is scope zero and always exists.
pub struct ScopeTree {
    scopes: IndexVec<ScopeId, Scope>,
    current: ScopeId,
}

impl ScopeTree {
    pub fn new() -> Self {
        let mut scopes = IndexVec::new();
        let root = scopes.push(Scope {
            name: "GLOBAL_SCOPE".to_string(),
            level: 0,
            parent: None,
            entries: HashMap::new(),
        });
        Self {
            scopes,
            current: root,
        }
    }

    pub fn current(&self) -> ScopeId {
        self.current
    }

    /// Defines a `NestedScope` marker named `name` in the current scope,
    /// then pushes and enters a fresh child scope under that name.
    pub fn enter_scope(&mut self, name: String) -> ScopeId {
        self.scopes[self.current].entries.insert(
            name.clone(),
            Symbol::NestedScope { name: name.clone() },
        );
        let level = self.scopes[self.current].level + 1;
        let parent = self.current;
        let child = self.scopes.push(Scope {
            name,
            level,
            parent: Some(parent),
            entries: HashMap::new(),
        });
        self.current = child;
        child
    }

    /// Leaves the current scope, returning to its parent. A no-op at the
    /// root (the global scope is never exited).
    pub fn exit_scope(&mut self) {
        if let Some(parent) = self.scopes[self.current].parent {
            self.current = parent;
        }
    }

    /// Binds `symbol` in the current scope. Fails if the current scope
    /// (not any ancestor) already has an entry for that name.
    pub fn define(&mut self, symbol: Symbol) -> Result<(), ()> {
        let scope = &mut self.scopes[self.current];
        if scope.entries.contains_key(symbol.name()) {
            return Err(());
        }
        scope.entries.insert(symbol.name().to_string(), symbol);
        Ok(())
    }

    /// Looks up `name` starting at the current scope and walking up the
    /// parent chain to the root.
    pub fn resolve(&self, name: &str) -> Option<&Symbol> {
        let mut scope_id = self.current;
        loop {
            let scope = &self.scopes[scope_id];
            if let Some(symbol) = scope.entries.get(name) {
                return Some(symbol);
            }
            match scope.parent {
                Some(parent) => scope_id = parent,
                None => return None,
            }
        }
    }
}

impl Default for ScopeTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_through_parent_chain() {
        let mut tree = ScopeTree::new();
        tree.define(Symbol::BuiltInType {
            name: "int".to_string(),
        })
        .unwrap();
        tree.enter_scope("BLOCK_1".to_string());
        assert!(tree.resolve("int").is_some());
    }

    #[test]
    fn redefinition_in_same_scope_fails() {
        let mut tree = ScopeTree::new();
        tree.define(Symbol::Variable {
            name: "a".to_string(),
            type_name: "int".to_string(),
            offset: -4,
        })
        .unwrap();
        let result = tree.define(Symbol::Variable {
            name: "a".to_string(),
            type_name: "int".to_string(),
            offset: -8,
        });
        assert!(result.is_err());
    }

    #[test]
    fn shadowing_across_scopes_is_permitted() {
        let mut tree = ScopeTree::new();
        tree.define(Symbol::Variable {
            name: "a".to_string(),
            type_name: "int".to_string(),
            offset: -4,
        })
        .unwrap();
        tree.enter_scope("BLOCK_1".to_string());
        let result = tree.define(Symbol::Variable {
            name: "a".to_string(),
            type_name: "int".to_string(),
            offset: -4,
        });
        assert!(result.is_ok());
    }

    #[test]
    fn exit_scope_restores_parent_bindings() {
        let mut tree = ScopeTree::new();
        tree.enter_scope("BLOCK_1".to_string());
        tree.define(Symbol::Variable {
            name: "inner".to_string(),
            type_name: "int".to_string(),
            offset: -4,
        })
        .unwrap();
        tree.exit_scope();
        assert!(tree.resolve("inner").is_none());
    }
}
