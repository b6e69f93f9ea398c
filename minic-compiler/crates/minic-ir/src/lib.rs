//! Three-address intermediate representation: a flat, ordered list of
//! [`Quadruple`]s produced by walking the analysed AST once. No basic
//! blocks, no control-flow graph, no optimization passes — control flow is
//! a sequence of labels and conditional/unconditional jumps, matching the
//! grammar's own `if`/`while`/`do while` shape rather than a lowered CFG.

pub mod gen;
pub mod operand;
pub mod quadruple;

pub use gen::IrGen;
pub use operand::{Operand, OperandKind};
pub use quadruple::Quadruple;
