//! Lexer module.
//!
//! - `core` - main scan loop, lexeme classification cache, `Lexer`
//! - `operator` - delimiter set and compound-operator lookahead table

mod core;
mod operator;

pub use core::Lexer;
