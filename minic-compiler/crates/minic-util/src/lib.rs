//! Foundation types shared by every compiler phase: source locations,
//! diagnostics, and the typed-index arena used by the scope tree.
//!
//! Nothing in this crate is specific to lexing, parsing, or code
//! generation — it exists so those crates don't each reinvent a `Span`,
//! an error-collecting `Handler`, or an indexed vector.

pub mod diagnostic;
pub mod index_vec;
pub mod span;

pub use diagnostic::{Diagnostic, DiagnosticBuilder, Handler, Level};
pub use index_vec::{Idx, IndexVec};
pub use span::{FileId, SourceMap, Span};
