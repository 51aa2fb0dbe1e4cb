//! The scope tree: ordered membership plus name lookup with forward-visibility.
use std::cell::{Cell, RefCell};

use indexmap::IndexMap;
use sv_diagnostics::{Diagnostic, DiagnosticSink};
use sv_syntax::{Kind, SyntaxNode};

use crate::symbol::Symbol;

/// A textual position within a scope, used to enforce forward-visibility
/// during [`Scope::lookup`] (§4.E, glossary "LookupLocation").
#[derive(Debug, Clone, Copy)]
pub struct LookupLocation<'a, K: Kind> {
    scope: &'a Scope<'a, K>,
    order_index: usize,
}

impl<'a, K: Kind> PartialEq for LookupLocation<'a, K> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.scope, other.scope) && self.order_index == other.order_index
    }
}

impl<'a, K: Kind> Eq for LookupLocation<'a, K> {}

impl<'a, K: Kind> LookupLocation<'a, K> {
    /// Constructs a lookup location at the given order index within `scope`.
    pub fn new(scope: &'a Scope<'a, K>, order_index: usize) -> Self {
        Self { scope, order_index }
    }

    /// The location immediately after the last member currently in `scope`
    /// — "as if querying from right here", the common case when elaborating
    /// a reference inside a scope that is still being populated.
    pub fn end_of(scope: &'a Scope<'a, K>) -> Self {
        Self {
            scope,
            order_index: scope.members.borrow().len(),
        }
    }

    /// The scope this location is within.
    pub fn scope(&self) -> &'a Scope<'a, K> {
        self.scope
    }

    /// The order index this location denotes.
    pub fn order_index(&self) -> usize {
        self.order_index
    }
}

/// An ordered member list plus a name index, owned by exactly one symbol
/// (§3 "Scope"). Scopes form a tree rooted at `$root`; `owner` closes the
/// cycle back to the [`Symbol`] this scope belongs to.
///
/// `statement_body`, when set, makes this scope a `StatementBodiedScope`
/// (§3): a scope that additionally owns a single statement tree. Ordinary
/// scopes simply leave it `None` — modeled as a field rather than a separate
/// type, since every operation on `Scope` applies unchanged either way.
#[derive(Debug)]
pub struct Scope<'a, K: Kind> {
    owner: Cell<Option<&'a Symbol<'a, K>>>,
    members: RefCell<Vec<&'a Symbol<'a, K>>>,
    names: RefCell<IndexMap<&'a str, &'a Symbol<'a, K>>>,
    statement_body: Cell<Option<&'a SyntaxNode<'a, K>>>,
}

impl<'a, K: Kind> Default for Scope<'a, K> {
    fn default() -> Self {
        Self {
            owner: Cell::new(None),
            members: RefCell::new(Vec::new()),
            names: RefCell::new(IndexMap::new()),
            statement_body: Cell::new(None),
        }
    }
}

impl<'a, K: Kind> Scope<'a, K> {
    /// Constructs a new, empty scope with no owner yet assigned.
    ///
    /// Scopes and the symbol that owns them are mutually referential, so
    /// construction is two-phase: allocate the (ownerless) scope, allocate
    /// the symbol pointing back at it, then call
    /// [`Scope::bind_owner`] to close the cycle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Constructs a new statement-bodied scope wrapping `body`.
    pub fn with_statement_body(body: &'a SyntaxNode<'a, K>) -> Self {
        Self {
            statement_body: Cell::new(Some(body)),
            ..Self::default()
        }
    }

    /// Assigns this scope's owner symbol. Called exactly once, immediately
    /// after the owning symbol is constructed.
    pub fn bind_owner(&self, owner: &'a Symbol<'a, K>) {
        self.owner.set(Some(owner));
    }

    /// The symbol that owns this scope, if bound yet.
    pub fn owner(&self) -> Option<&'a Symbol<'a, K>> {
        self.owner.get()
    }

    /// The statement tree this scope owns, if it is a `StatementBodiedScope`.
    pub fn statement_body(&self) -> Option<&'a SyntaxNode<'a, K>> {
        self.statement_body.get()
    }

    /// Appends `symbol` to the member list and, if named, to the name
    /// index.
    ///
    /// Assigns `symbol`'s `order_index` to its position in the member list.
    /// A duplicate name does not overwrite the existing name-index entry —
    /// `find` keeps returning the first declaration — but the new symbol is
    /// still appended to the member list in source order, and one
    /// redeclaration diagnostic is reported (§4.E, §7 Duplicate-declaration,
    /// §8 scenario 6).
    pub fn add_member(&self, sink: &mut dyn DiagnosticSink, symbol: &'a Symbol<'a, K>) {
        let index = self.members.borrow().len();
        symbol.set_order_index(index);
        self.members.borrow_mut().push(symbol);

        if symbol.name().is_empty() {
            return;
        }

        let mut names = self.names.borrow_mut();
        if let Some(existing) = names.get(symbol.name()) {
            sink.report(
                Diagnostic::error(format!("redeclaration of `{}`", symbol.name()))
                    .with_code("redeclaration")
                    .with_label("redeclared here", symbol.source_location())
                    .with_label("first declared here", existing.source_location()),
            );
        } else {
            names.insert(symbol.name(), symbol);
        }
    }

    /// Exact-name lookup restricted to this scope, ignoring forward
    /// visibility (§4.E `find`).
    pub fn find(&self, name: &str) -> Option<&'a Symbol<'a, K>> {
        self.names.borrow().get(name).copied()
    }

    /// This scope's members, in source (insertion) order (§8 Ordering).
    pub fn members(&self) -> Vec<&'a Symbol<'a, K>> {
        self.members.borrow().clone()
    }

    /// Name lookup that respects `location`'s forward-visibility rule: only
    /// members declared at strictly smaller order indices in the same scope
    /// are visible; the search then ascends to the parent scope, using the
    /// ascended-past scope's own owner as the new location, terminating at
    /// `$root` (§4.E `lookup`, §8 Lookup visibility property).
    ///
    /// If `name` exists in a scope at all — even at an order index that
    /// makes it not yet visible — the search stops there rather than
    /// continuing to an outer scope: ordinary lexical shadowing, a local
    /// declaration reserves the name even before its own point of
    /// visibility.
    pub fn lookup(name: &str, location: LookupLocation<'a, K>) -> Option<&'a Symbol<'a, K>> {
        let mut scope = location.scope;
        let mut index = location.order_index;

        loop {
            if let Some(found) = scope.find(name) {
                return if found.order_index() < index {
                    Some(found)
                } else {
                    None
                };
            }

            let owner = scope.owner()?;
            let parent = owner.parent_scope()?;
            index = owner.order_index();
            scope = parent;
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use sv_diagnostics::Span;
    use sv_syntax::DemoKind;

    use super::*;
    use crate::symbol::SymbolKind;

    fn sym<'a>(name: &'a str, start: usize) -> Symbol<'a, DemoKind> {
        Symbol::new(
            SymbolKind::SequentialBlock,
            name,
            Span::new(start, 1),
            None,
            None,
        )
    }

    #[test]
    fn members_are_ordered_by_insertion() {
        let scope: Scope<'_, DemoKind> = Scope::new();
        let mut sink: Vec<Diagnostic> = Vec::new();
        let a = sym("a", 0);
        let b = sym("b", 1);
        scope.add_member(&mut sink, &a);
        scope.add_member(&mut sink, &b);

        let members = scope.members();
        assert_eq!(members.len(), 2);
        assert_eq!(members[0].name(), "a");
        assert_eq!(members[1].name(), "b");
        assert_eq!(a.order_index(), 0);
        assert_eq!(b.order_index(), 1);
    }

    /// Scenario 6: duplicate declaration.
    #[test]
    fn duplicate_name_keeps_first_but_appends_both() {
        let scope: Scope<'_, DemoKind> = Scope::new();
        let mut sink: Vec<Diagnostic> = Vec::new();
        let first = sym("x", 0);
        let second = sym("x", 5);
        scope.add_member(&mut sink, &first);
        scope.add_member(&mut sink, &second);

        assert_eq!(scope.members().len(), 2);
        assert_eq!(sink.len(), 1);
        assert_eq!(sink[0].code(), Some("redeclaration"));
        let found = scope.find("x").expect("present");
        assert_eq!(found.source_location(), Span::new(0, 1));
    }

    #[test]
    fn lookup_respects_forward_visibility() {
        let scope: Scope<'_, DemoKind> = Scope::new();
        let mut sink: Vec<Diagnostic> = Vec::new();
        let a = sym("a", 0);
        let b = sym("b", 1);
        scope.add_member(&mut sink, &a);
        scope.add_member(&mut sink, &b);

        // At order index 1 (just after `a`), `b` (order index 1) is not yet visible.
        let location = LookupLocation::new(&scope, 1);
        assert!(Scope::lookup("b", location).is_none());
        assert_eq!(Scope::lookup("a", location).map(Symbol::name), Some("a"));
    }

    #[test]
    fn lookup_ascends_to_parent_scope() {
        let outer: Scope<'_, DemoKind> = Scope::new();
        let mut sink: Vec<Diagnostic> = Vec::new();
        let outer_decl = sym("outer_name", 0);
        outer.add_member(&mut sink, &outer_decl);

        let outer_owner = Symbol::new(
            SymbolKind::SequentialBlock,
            "block",
            Span::new(1, 1),
            Some(&outer),
            None,
        );
        outer.add_member(&mut sink, &outer_owner);

        let inner: Scope<'_, DemoKind> = Scope::new();
        inner.bind_owner(&outer_owner);

        let location = LookupLocation::end_of(&inner);
        assert_eq!(
            Scope::lookup("outer_name", location).map(Symbol::name),
            Some("outer_name")
        );
    }
}
