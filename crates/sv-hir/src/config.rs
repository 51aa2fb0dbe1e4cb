//! Configuration for elaboration.
use std::fmt;
use std::sync::Arc;

use crate::error::InternalError;

/// The implementation-defined floor for [`ElaborationConfig::iteration_cap`];
/// §4.F requires the cap be configurable but never lower than this.
pub const MINIMUM_ITERATION_CAP: u32 = 1 << 16;

/// The default iteration cap, used when a caller does not override it.
pub const DEFAULT_ITERATION_CAP: u32 = 1 << 20;

/// Selects which module/interface/program `Definition`s populate
/// [`crate::compilation::RootSymbol::top_instances`].
///
/// The spec leaves this heuristic as an open question (§9); see `DESIGN.md`
/// for the resolution. `NoInstantiations` is the sensible default for a
/// compilation with no external driver telling it which modules are tops;
/// `Explicit` lets an embedder that already knows its top module names skip
/// the heuristic entirely.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub enum TopInstanceHeuristic {
    /// A definition is a top-instance candidate iff no
    /// `HierarchyInstantiationSyntax` anywhere in the compilation references
    /// it by name.
    NoInstantiations,
    /// Only the named definitions are considered top instances, regardless
    /// of whether they are instantiated elsewhere.
    Explicit(Vec<String>),
}

impl Default for TopInstanceHeuristic {
    fn default() -> Self {
        Self::NoInstantiations
    }
}

/// Configuration for a [`Compilation`](crate::compilation::Compilation)'s
/// elaboration pass.
///
/// A thin wrapper around an `Arc`, so it is cheap to clone and to pass down
/// into every `fromSyntax` entry point alongside the `Binder`.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct ElaborationConfig {
    /// The actual fields, arced up for cheap cloning.
    inner: Arc<ConfigInner>,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
struct ConfigInner {
    iteration_cap: u32,
    top_instance_heuristic: TopInstanceHeuristic,
}

impl fmt::Debug for ElaborationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElaborationConfig")
            .field("iteration_cap", &self.inner.iteration_cap)
            .field("top_instance_heuristic", &self.inner.top_instance_heuristic)
            .finish()
    }
}

impl Default for ElaborationConfig {
    fn default() -> Self {
        Self {
            inner: Arc::new(ConfigInner {
                iteration_cap: DEFAULT_ITERATION_CAP,
                top_instance_heuristic: TopInstanceHeuristic::default(),
            }),
        }
    }
}

impl ElaborationConfig {
    /// The maximum number of iterations a loop-generate block may expand to
    /// before elaboration of that array is treated as a fatal error for the
    /// subtree (§4.F, §7 Iteration-cap-exceeded).
    pub fn iteration_cap(&self) -> u32 {
        self.inner.iteration_cap
    }

    /// The configured top-instance selection heuristic.
    pub fn top_instance_heuristic(&self) -> &TopInstanceHeuristic {
        &self.inner.top_instance_heuristic
    }

    /// Returns a copy of this configuration with the iteration cap replaced.
    ///
    /// Rejects caps below [`MINIMUM_ITERATION_CAP`].
    pub fn with_iteration_cap(&self, cap: u32) -> Result<Self, InternalError> {
        if cap < MINIMUM_ITERATION_CAP {
            return Err(InternalError::IterationCapTooLow(cap));
        }
        let mut inner = (*self.inner).clone();
        inner.iteration_cap = cap;
        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// Returns a copy of this configuration with the top-instance heuristic
    /// replaced.
    pub fn with_top_instance_heuristic(&self, heuristic: TopInstanceHeuristic) -> Self {
        let mut inner = (*self.inner).clone();
        inner.top_instance_heuristic = heuristic;
        Self {
            inner: Arc::new(inner),
        }
    }
}
