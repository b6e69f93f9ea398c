//! Turns source text into a flat token stream.
//!
//! The lexer scans left to right, stopping at the first character from a
//! fixed delimiter set (whitespace, the arithmetic/comparison/logical
//! operator characters, and bracket/brace/semicolon punctuation). Whatever
//! it skipped over is classified against a seeded keyword/operator table
//! and emitted as one [`Token`]; anything that doesn't match a keyword,
//! operator, identifier, or integer-literal shape still comes out as a
//! token, just one with [`token::TokenKind::Unknown`] — the lexer never
//! errors, it only classifies. The stream always ends with the `FileEnd`
//! sentinel.

pub mod cursor;
pub mod lexer;
pub mod token;

pub use lexer::Lexer;
pub use token::{Token, TokenKind};
