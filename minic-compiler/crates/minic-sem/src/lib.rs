//! Semantic analysis: a single pre-order AST walk that builds a nested
//! scope tree, resolves every identifier, and writes stack offsets back
//! into the tree for the IR generator to consume.

pub mod analysis;
pub mod error;
pub mod scope;
pub mod symbol;

pub use analysis::SemanticAnalyzer;
pub use error::SemanticError;
pub use scope::{Scope, ScopeId, ScopeTree};
pub use symbol::Symbol;
