//! The `Compilation` container and `RootSymbol`.
use std::cell::{Cell, RefCell};
use std::collections::HashSet;

use sv_diagnostics::{Diagnostic, DiagnosticSink};
use sv_syntax::{Arena, Kind};
use tracing::debug;

use crate::config::{ElaborationConfig, TopInstanceHeuristic};
use crate::error::InternalError;
use crate::scope::Scope;
use crate::symbol::{Symbol, SymbolKind};

/// `$root`'s symbol, plus the two ordered lists it is responsible for (§3,
/// §4.G).
#[derive(Debug)]
pub struct RootSymbol<'a, K: Kind> {
    symbol: &'a Symbol<'a, K>,
    top_instances: Vec<&'a Symbol<'a, K>>,
    compilation_units: Vec<&'a Symbol<'a, K>>,
}

impl<'a, K: Kind> RootSymbol<'a, K> {
    /// The `$root` symbol itself.
    pub fn symbol(&self) -> &'a Symbol<'a, K> {
        self.symbol
    }

    /// Module/interface/program instances with no textual parent, selected
    /// by the configured [`TopInstanceHeuristic`] (§4.G, §9 Open Question).
    pub fn top_instances(&self) -> &[&'a Symbol<'a, K>] {
        &self.top_instances
    }

    /// Compilation units, in the order they were added.
    pub fn compilation_units(&self) -> &[&'a Symbol<'a, K>] {
        &self.compilation_units
    }
}

/// The process-wide container: `create → add compilation units → elaborate
/// → query → destroy` (§3 "Compilation").
///
/// Owns nothing but a view into the caller-provided arena and config; the
/// caller constructs the [`Arena`] (so its lifetime does not have to equal
/// `Compilation`'s own, sidestepping a self-referential struct) and passes
/// it in. `Compilation` is `!Sync` by convention — nothing here adds
/// internal locking, matching §5's single-threaded-cooperative model.
pub struct Compilation<'a, K: Kind> {
    arena: &'a Arena,
    config: ElaborationConfig,
    root_scope: &'a Scope<'a, K>,
    root_symbol: &'a Symbol<'a, K>,
    compilation_units: RefCell<Vec<&'a Symbol<'a, K>>>,
    diagnostics: RefCell<Vec<Diagnostic>>,
    /// Names referenced by some `HierarchyInstantiationSyntax` seen so far,
    /// consulted by the `NoInstantiations` top-instance heuristic at
    /// `finalize_root` time.
    referenced_definitions: RefCell<HashSet<String>>,
    /// Set by `finalize_root`; a second call is a caller bug, not a
    /// recoverable elaboration outcome.
    root_finalized: Cell<bool>,
}

impl<'a, K: Kind> Compilation<'a, K> {
    /// Creates a new, empty compilation over `arena`.
    ///
    /// Fails only if binding `$root`'s owner symbol did not actually take —
    /// an internal invariant violation, not something a caller can trigger.
    pub fn create(arena: &'a Arena, config: ElaborationConfig) -> anyhow::Result<Self> {
        let root_scope: &'a Scope<'a, K> = arena.alloc(Scope::new());
        let root_symbol: &'a Symbol<'a, K> =
            arena.alloc(Symbol::new(SymbolKind::Root, "$root", sv_diagnostics::Span::empty(0), None, Some(root_scope)));
        root_scope.bind_owner(root_symbol);
        let root_symbol = root_scope.owner().ok_or(InternalError::UnboundScopeOwner)?;

        debug!("created compilation");
        Ok(Self {
            arena,
            config,
            root_scope,
            root_symbol,
            compilation_units: RefCell::new(Vec::new()),
            diagnostics: RefCell::new(Vec::new()),
            referenced_definitions: RefCell::new(HashSet::new()),
            root_finalized: Cell::new(false),
        })
    }

    /// The arena backing this compilation's syntax tree and symbol graph.
    pub fn arena(&self) -> &'a Arena {
        self.arena
    }

    /// This compilation's elaboration configuration.
    pub fn config(&self) -> &ElaborationConfig {
        &self.config
    }

    /// `$root`'s scope, the terminal parent of every lookup ascension.
    pub fn root_scope(&self) -> &'a Scope<'a, K> {
        self.root_scope
    }

    /// Registers a compilation unit symbol, appending it to `$root`'s scope
    /// and to the ordered unit list `RootSymbol` exposes.
    pub fn add_compilation_unit(&self, unit: &'a Symbol<'a, K>) {
        self.root_scope.add_member(&mut *self.diagnostics.borrow_mut(), unit);
        self.compilation_units.borrow_mut().push(unit);
    }

    /// Records that `name` was referenced by a `HierarchyInstantiationSyntax`
    /// somewhere in this compilation. Consulted by the `NoInstantiations`
    /// top-instance heuristic.
    pub fn record_instantiation(&self, name: &str) {
        self.referenced_definitions.borrow_mut().insert(name.to_string());
    }

    /// Every diagnostic reported anywhere in this compilation, in the order
    /// reported.
    pub fn diagnostics(&self) -> std::cell::Ref<'_, Vec<Diagnostic>> {
        self.diagnostics.borrow()
    }

    /// Borrow this compilation's diagnostic sink.
    pub fn sink(&self) -> std::cell::RefMut<'_, Vec<Diagnostic>> {
        self.diagnostics.borrow_mut()
    }

    /// Finalizes `$root`: computes `top_instances` from `candidates` using
    /// the configured heuristic, and snapshots the compilation-unit list
    /// (§4.G). Called once, after all elaboration is complete.
    ///
    /// Fails with [`InternalError::RootAlreadyFinalized`] on a second call.
    pub fn finalize_root(&self, candidates: &[&'a Symbol<'a, K>]) -> anyhow::Result<RootSymbol<'a, K>> {
        if self.root_finalized.replace(true) {
            return Err(InternalError::RootAlreadyFinalized.into());
        }

        let top_instances: Vec<&'a Symbol<'a, K>> = match self.config.top_instance_heuristic() {
            TopInstanceHeuristic::NoInstantiations => {
                let referenced = self.referenced_definitions.borrow();
                candidates
                    .iter()
                    .copied()
                    .filter(|candidate| !referenced.contains(candidate.name()))
                    .collect()
            }
            TopInstanceHeuristic::Explicit(names) => candidates
                .iter()
                .copied()
                .filter(|candidate| names.iter().any(|name| name == candidate.name()))
                .collect(),
        };

        debug!(count = top_instances.len(), "finalized root symbol");
        Ok(RootSymbol {
            symbol: self.root_symbol,
            top_instances,
            compilation_units: self.compilation_units.borrow().clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use sv_syntax::DemoKind;

    use super::*;

    #[test]
    fn create_allocates_root_with_bound_owner() {
        let arena = Arena::new();
        let compilation: Compilation<'_, DemoKind> =
            Compilation::create(&arena, ElaborationConfig::default()).expect("create succeeds");
        assert_eq!(compilation.root_scope().owner().unwrap().name(), "$root");
    }

    #[test]
    fn no_instantiations_heuristic_excludes_referenced_definitions() {
        let arena = Arena::new();
        let compilation: Compilation<'_, DemoKind> =
            Compilation::create(&arena, ElaborationConfig::default()).expect("create succeeds");
        compilation.record_instantiation("leaf");

        let top = arena.alloc(Symbol::new(
            SymbolKind::ModuleInstance,
            "top",
            sv_diagnostics::Span::new(0, 1),
            None,
            None,
        ));
        let leaf = arena.alloc(Symbol::new(
            SymbolKind::ModuleInstance,
            "leaf",
            sv_diagnostics::Span::new(1, 1),
            None,
            None,
        ));

        let root = compilation.finalize_root(&[top, leaf]).expect("first finalize succeeds");
        assert_eq!(root.top_instances().len(), 1);
        assert_eq!(root.top_instances()[0].name(), "top");
    }

    #[test]
    fn finalizing_twice_is_an_error() {
        let arena = Arena::new();
        let compilation: Compilation<'_, DemoKind> =
            Compilation::create(&arena, ElaborationConfig::default()).expect("create succeeds");

        compilation.finalize_root(&[]).expect("first finalize succeeds");
        let err = compilation.finalize_root(&[]).expect_err("second finalize must fail");
        assert!(err.downcast_ref::<InternalError>().is_some_and(|inner| matches!(
            inner,
            InternalError::RootAlreadyFinalized
        )));
    }
}
