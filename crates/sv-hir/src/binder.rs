//! The constant-evaluation/binding/definition-lookup collaborator.
//!
//! §1 scopes type checking, constant evaluation, and expression binding out
//! of this core entirely; §6 describes the three operations elaboration
//! needs from that external layer as "opaque services". `Binder` is that
//! contract, always passed in by the caller as `&dyn Binder` — this crate
//! never implements one itself.
use sv_syntax::{Kind, SyntaxNode};

use crate::definition::Definition;

/// The result of one `Binder` operation: a value, a cooperative abort (§5
/// "the binder callback may return a sentinel aborted result"), or a hard
/// evaluation error local to the subtree being elaborated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BinderOutcome<T> {
    /// The operation succeeded.
    Value(T),
    /// The binder signaled cancellation; elaboration of the affected
    /// subtree halts without publishing a partial symbol.
    Aborted,
    /// The operation failed for a reason local to this subtree (e.g. a
    /// constant expression that does not fold); elaboration of the subtree
    /// aborts, but siblings continue (§7 Constant-evaluation-failure).
    Error,
}

impl<T> BinderOutcome<T> {
    /// Returns the contained value, if any.
    pub fn value(self) -> Option<T> {
        match self {
            Self::Value(value) => Some(value),
            Self::Aborted | Self::Error => None,
        }
    }
}

/// Three opaque operations elaboration consumes but never implements:
/// constant evaluation, parameter-override resolution, and definition
/// lookup by name (§6 "Binder / evaluator").
pub trait Binder<'a, K: Kind> {
    /// Evaluates `expr` as a constant, in the context of `location`.
    /// Returns the folded value as an `i64` — sufficient for genvar and
    /// generate-guard evaluation, the only constant values this core's
    /// contracts require.
    fn evaluate_constant(
        &self,
        expr: &'a SyntaxNode<'a, K>,
        location: &'a crate::scope::Scope<'a, K>,
    ) -> BinderOutcome<i64>;

    /// Resolves a parameter-override list syntax node against `definition`,
    /// producing the final `(name, value)` pairs an instance should bind.
    fn resolve_overrides(
        &self,
        overrides: Option<&'a SyntaxNode<'a, K>>,
        definition: &Definition<'a, K>,
    ) -> BinderOutcome<Vec<(&'a str, i64)>>;

    /// Looks up a `Definition` by name, visible from `location`.
    fn lookup_definition(
        &self,
        name: &str,
        location: &'a crate::scope::Scope<'a, K>,
    ) -> BinderOutcome<Definition<'a, K>>;
}
