use thiserror::Error;

#[derive(Debug, Error)]
pub enum SemanticError {
    #[error("use of undeclared identifier '{name}'")]
    SymbolNotFound { name: String },

    #[error("redefinition of '{name}' in the same scope")]
    SymbolRedefinition { name: String },
}
