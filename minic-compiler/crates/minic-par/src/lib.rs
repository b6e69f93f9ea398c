//! Recursive-descent parser: turns a token stream into a single AST root.
//!
//! The grammar is a fixed layered-precedence ladder (highest to lowest:
//! unary, `* / %`, `+ -`, relational, equality, `&&`, `||`), each layer its
//! own function, left-associativity implemented by a loop that folds the
//! growing left subtree rather than by recursion. There is no left
//! recursion and no backtracking: one token of lookahead is always enough
//! to decide which production applies.
//!
//! The parser never recovers from a syntax error: the first unexpected
//! token is fatal, the partial tree is discarded, and `parse` returns
//! `Err`.

pub mod ast;
mod parser;

pub use ast::{
    BinaryOperator, ConditionOperator, Declare, Expr, Ident, IfBranch, NodeId, Stmt,
    UnaryOperator,
};
pub use parser::{parse, ParseError, Parser};
