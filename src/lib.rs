//! Front-end core for a SystemVerilog compiler.
//!
//! `svfront` bundles the three crates that make up the core: a
//! token/trivia-preserving parser substrate ([`syntax`]) and the
//! hierarchical symbol/scope/elaboration model built on top of it
//! ([`hir`]), plus the diagnostic types both of them report through
//! ([`diagnostics`]). A concrete SystemVerilog grammar and a constant
//! expression evaluator are external collaborators, supplied by whatever
//! sits on top of this crate.

#![warn(missing_docs)]

#[doc(inline)]
pub use sv_diagnostics as diagnostics;
#[doc(inline)]
pub use sv_hir as hir;
#[doc(inline)]
pub use sv_syntax as syntax;
