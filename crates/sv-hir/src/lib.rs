//! The symbol, scope, and elaboration model for a SystemVerilog compilation.
//!
//! This crate is the hierarchy half of the front-end core: given a syntax
//! tree built by `sv-syntax` and a `Binder` supplying constant evaluation,
//! parameter-override resolution, and definition lookup, it materializes
//! compilation units, packages, instances, procedural/sequential blocks,
//! and generate constructs into a navigable, name-resolvable `Scope` tree
//! rooted at `$root`.
//!
//! What is deliberately **not** here: the concrete grammar (elaboration
//! reads from the minimal typed syntax views in [`syntax`], not a real
//! `SyntaxKind` enum), expression type-checking, and constant folding
//! itself — those live behind the [`binder::Binder`] trait, supplied by an
//! embedder.

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(rust_2021_compatibility)]
#![warn(missing_debug_implementations)]

pub mod binder;
pub mod compilation;
pub mod config;
pub mod definition;
pub mod elaborate;
pub mod error;
pub mod scope;
pub mod symbol;
pub mod syntax;

pub use binder::{Binder, BinderOutcome};
pub use compilation::{Compilation, RootSymbol};
pub use config::{ElaborationConfig, TopInstanceHeuristic};
pub use definition::{Definition, ParameterMetadata};
pub use elaborate::{
    CompilationUnitSymbol, ElaborationOutcome, GenerateBlockArraySymbol, GenerateBlockSymbol,
    InstanceSymbol, PackageSymbol, ProceduralBlockSymbol, SequentialBlockSymbol,
};
pub use error::InternalError;
pub use scope::{LookupLocation, Scope};
pub use symbol::{ProcedureKind, Symbol, SymbolKind};
