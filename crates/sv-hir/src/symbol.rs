//! Named entities in the symbol/scope graph.
use sv_diagnostics::Span;
use sv_syntax::Kind;

use crate::scope::Scope;

/// The procedural block flavors named in §4.F.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum ProcedureKind {
    /// `initial`.
    Initial,
    /// `always`.
    Always,
    /// `always_comb`.
    AlwaysComb,
    /// `always_latch`.
    AlwaysLatch,
    /// `always_ff`.
    AlwaysFF,
    /// `final`.
    Final,
}

/// The discriminator enumerated by §3: "Subkinds enumerated".
///
/// `Parameter` is one addition beyond the literal list: §4.F requires a
/// loop-generate child to "expose an implicit parameter symbol named after
/// the loop's genvar", which needs some `SymbolKind` to carry it; see
/// `DESIGN.md`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum SymbolKind {
    /// A single compilation unit.
    CompilationUnit,
    /// A `package`.
    Package,
    /// An elaborated `module` instance.
    ModuleInstance,
    /// An elaborated `interface` instance.
    InterfaceInstance,
    /// An elaborated `program` instance.
    ProgramInstance,
    /// A labeled `begin ... end` block.
    SequentialBlock,
    /// An `initial`/`always*`/`final` block.
    ProceduralBlock(ProcedureKind),
    /// A single expanded generate block (one arm of an if-generate, or one
    /// iteration of a loop-generate).
    GenerateBlock,
    /// The array of blocks produced by a loop-generate.
    GenerateBlockArray,
    /// `$root`.
    Root,
    /// An implicit genvar-bound parameter inside a generate block.
    Parameter,
}

/// A named entity in the hierarchy: a `kind`, a possibly-empty `name`, a
/// source location, and a back-reference to the scope that contains it.
///
/// Symbols are arena-owned; their lifetime is the lifetime of the owning
/// `Compilation`'s arena. A symbol's `order_index` is the position it was
/// inserted at within its *own* containing scope — the same field doubles as
/// the position used when `Scope::lookup` ascends past a child scope into
/// its parent (see `scope.rs`).
#[derive(Debug)]
pub struct Symbol<'a, K: Kind> {
    kind: SymbolKind,
    name: &'a str,
    source_location: Span,
    parent_scope: Option<&'a Scope<'a, K>>,
    /// This symbol's own scope, if it has one. Not every subkind does —
    /// `Parameter` symbols (genvar bindings) do not.
    own_scope: Option<&'a Scope<'a, K>>,
    order_index: std::cell::Cell<usize>,
    /// The bound constant value, for `SymbolKind::Parameter` symbols only
    /// (a genvar's current iteration value, or a module parameter's
    /// resolved value). `None` for every other kind.
    constant_value: std::cell::Cell<Option<i64>>,
}

impl<'a, K: Kind> Symbol<'a, K> {
    /// Constructs a new symbol. `order_index` is left unassigned
    /// (`usize::MAX`) until `Scope::add_member` inserts it somewhere.
    pub fn new(
        kind: SymbolKind,
        name: &'a str,
        source_location: Span,
        parent_scope: Option<&'a Scope<'a, K>>,
        own_scope: Option<&'a Scope<'a, K>>,
    ) -> Self {
        Self {
            kind,
            name,
            source_location,
            parent_scope,
            own_scope,
            order_index: std::cell::Cell::new(usize::MAX),
            constant_value: std::cell::Cell::new(None),
        }
    }

    /// Constructs a `SymbolKind::Parameter` symbol bound to `value` (a
    /// genvar's current iteration value, or a resolved module parameter).
    pub fn new_parameter(
        name: &'a str,
        source_location: Span,
        parent_scope: Option<&'a Scope<'a, K>>,
        value: i64,
    ) -> Self {
        let symbol = Self::new(SymbolKind::Parameter, name, source_location, parent_scope, None);
        symbol.constant_value.set(Some(value));
        symbol
    }

    /// The bound constant value, for a `SymbolKind::Parameter` symbol.
    pub fn constant_value(&self) -> Option<i64> {
        self.constant_value.get()
    }

    /// The symbol's kind.
    pub fn kind(&self) -> &SymbolKind {
        &self.kind
    }

    /// Discriminator check: "each concrete symbol class implements
    /// `isKind(k)`" (§4.E), realized here as a same-variant comparison
    /// (ignoring any payload the variant carries, e.g. `ProceduralBlock`'s
    /// `ProcedureKind`).
    pub fn is_kind(&self, kind: &SymbolKind) -> bool {
        std::mem::discriminant(&self.kind) == std::mem::discriminant(kind)
    }

    /// The symbol's name, empty for anonymous symbols (e.g. an unlabeled
    /// generate block).
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// The source location this symbol was elaborated from.
    pub fn source_location(&self) -> Span {
        self.source_location
    }

    /// The scope containing this symbol, `None` only for `$root`.
    pub fn parent_scope(&self) -> Option<&'a Scope<'a, K>> {
        self.parent_scope
    }

    /// This symbol's own scope, if it has one.
    pub fn own_scope(&self) -> Option<&'a Scope<'a, K>> {
        self.own_scope
    }

    /// This symbol's position within its own containing scope, assigned by
    /// `Scope::add_member`. `usize::MAX` if the symbol has not been added to
    /// a scope yet (true only for `$root`, which has no containing scope).
    pub fn order_index(&self) -> usize {
        self.order_index.get()
    }

    pub(crate) fn set_order_index(&self, index: usize) {
        self.order_index.set(index);
    }
}
