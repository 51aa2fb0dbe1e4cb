//! End-to-end elaboration: a compilation unit containing two instances of
//! the same definition with different parameter overrides, queried through
//! `RootSymbol` once elaboration completes.
//!
//! There is no concrete grammar to parse real SystemVerilog source against
//! (out of scope, see `SPEC_FULL.md` §1), so the "syntax" here is built
//! directly as the minimal typed views `sv_hir::syntax` defines.

use pretty_assertions::assert_eq;
use sv_diagnostics::Span;
use sv_hir::{
    Binder, BinderOutcome, Compilation, Definition, ElaborationConfig, InstanceSymbol,
    ParameterMetadata, Scope, SymbolKind,
};
use sv_hir::syntax::HierarchyInstantiationSyntax;
use sv_syntax::{Arena, DemoKind, SyntaxNode, Token};

/// A binder backed by a single hard-coded `module leaf #(parameter WIDTH =
/// 8) ();` definition, with overrides resolved from a fixed table keyed by
/// the override syntax node's identity.
struct FixtureBinder<'a> {
    leaf_syntax: &'a SyntaxNode<'a, DemoKind>,
    leaf_body: &'a SyntaxNode<'a, DemoKind>,
    leaf_parameters: &'a [ParameterMetadata<'a, DemoKind>],
    wide_overrides: &'a SyntaxNode<'a, DemoKind>,
}

impl<'a> Binder<'a, DemoKind> for FixtureBinder<'a> {
    fn evaluate_constant(
        &self,
        _expr: &'a SyntaxNode<'a, DemoKind>,
        _location: &'a Scope<'a, DemoKind>,
    ) -> BinderOutcome<i64> {
        unimplemented!("not exercised by this pipeline")
    }

    fn resolve_overrides(
        &self,
        overrides: Option<&'a SyntaxNode<'a, DemoKind>>,
        _definition: &Definition<'a, DemoKind>,
    ) -> BinderOutcome<Vec<(&'a str, i64)>> {
        match overrides {
            Some(node) if std::ptr::eq(node, self.wide_overrides) => {
                BinderOutcome::Value(vec![("WIDTH", 32)])
            }
            Some(_) => BinderOutcome::Error,
            None => BinderOutcome::Value(Vec::new()),
        }
    }

    fn lookup_definition(
        &self,
        name: &str,
        _location: &'a Scope<'a, DemoKind>,
    ) -> BinderOutcome<Definition<'a, DemoKind>> {
        if name != "leaf" {
            return BinderOutcome::Error;
        }
        BinderOutcome::Value(Definition {
            name: Token::new(DemoKind::Ident, Span::new(0, 4), "leaf", &[]),
            syntax: self.leaf_syntax,
            parameters: self.leaf_parameters,
            body: self.leaf_body,
        })
    }
}

fn leaf_node<'a>(arena: &'a Arena) -> &'a SyntaxNode<'a, DemoKind> {
    SyntaxNode::build(arena, DemoKind::Unknown, &[])
}

#[test]
fn two_instances_of_one_definition_keep_independent_overrides() {
    let arena = Arena::new();
    let compilation: Compilation<'_, DemoKind> =
        Compilation::create(&arena, ElaborationConfig::default()).expect("create succeeds");
    let parent_scope = compilation.root_scope();

    let leaf_parameters = arena.alloc_slice_copy(&[ParameterMetadata {
        decl: leaf_node(&arena),
        resolved_type: leaf_node(&arena),
        constant_value: 8,
    }]);
    let binder = FixtureBinder {
        leaf_syntax: leaf_node(&arena),
        leaf_body: leaf_node(&arena),
        leaf_parameters,
        wide_overrides: leaf_node(&arena),
    };

    // `leaf narrow();` — no overrides, inherits the default WIDTH.
    let narrow_name = Token::new(DemoKind::Ident, Span::new(10, 6), "narrow", &[]);
    let narrow = HierarchyInstantiationSyntax {
        syntax: leaf_node(&arena),
        definition_name: Token::new(DemoKind::Ident, Span::new(0, 4), "leaf", &[]),
        overrides: None,
        instance_names: std::slice::from_ref(&narrow_name),
    };

    // `leaf #(.WIDTH(32)) wide();` — overrides WIDTH to 32.
    let wide_name = Token::new(DemoKind::Ident, Span::new(30, 4), "wide", &[]);
    let wide = HierarchyInstantiationSyntax {
        syntax: leaf_node(&arena),
        definition_name: Token::new(DemoKind::Ident, Span::new(0, 4), "leaf", &[]),
        overrides: Some(binder.wide_overrides),
        instance_names: std::slice::from_ref(&wide_name),
    };

    let mut instances = Vec::new();
    let location = sv_hir::LookupLocation::end_of(parent_scope);
    for syntax in [narrow, wide] {
        let outcome = InstanceSymbol::from_syntax(
            &compilation,
            syntax,
            location,
            parent_scope,
            &binder,
            &mut instances,
        );
        outcome.symbol().expect("both instantiations should succeed");
    }

    assert_eq!(instances.len(), 2);
    assert_eq!(instances[0].name(), "narrow");
    assert_eq!(instances[1].name(), "wide");
    assert!(instances[0].is_kind(&SymbolKind::ModuleInstance));

    let narrow_scope = instances[0].own_scope().expect("instance has a scope");
    assert!(narrow_scope.find("WIDTH").is_none());

    let wide_scope = instances[1].own_scope().expect("instance has a scope");
    let width = wide_scope.find("WIDTH").expect("override was bound");
    assert_eq!(width.constant_value(), Some(32));

    // Both instances share the same definition body by reference.
    assert_eq!(
        narrow_scope.statement_body().unwrap() as *const _,
        wide_scope.statement_body().unwrap() as *const _
    );

    assert!(compilation.diagnostics().is_empty());

    // Only after elaboration does the root decide which instances are tops;
    // both are candidates here since nothing instantiates `leaf` itself.
    let root = compilation.finalize_root(&instances).expect("finalize succeeds");
    assert_eq!(root.top_instances().len(), 2);
}

#[test]
fn instantiating_an_unknown_definition_reports_one_diagnostic() {
    let arena = Arena::new();
    let compilation: Compilation<'_, DemoKind> =
        Compilation::create(&arena, ElaborationConfig::default()).expect("create succeeds");
    let parent_scope = compilation.root_scope();
    let location = sv_hir::LookupLocation::end_of(parent_scope);

    let leaf_parameters = arena.alloc_slice_copy(&[ParameterMetadata {
        decl: leaf_node(&arena),
        resolved_type: leaf_node(&arena),
        constant_value: 8,
    }]);
    let binder = FixtureBinder {
        leaf_syntax: leaf_node(&arena),
        leaf_body: leaf_node(&arena),
        leaf_parameters,
        wide_overrides: leaf_node(&arena),
    };

    let instance_name = Token::new(DemoKind::Ident, Span::new(0, 5), "thing", &[]);
    let syntax = HierarchyInstantiationSyntax {
        syntax: leaf_node(&arena),
        definition_name: Token::new(DemoKind::Ident, Span::new(0, 7), "unknown", &[]),
        overrides: None,
        instance_names: std::slice::from_ref(&instance_name),
    };

    let mut instances = Vec::new();
    let outcome = InstanceSymbol::from_syntax(
        &compilation,
        syntax,
        location,
        parent_scope,
        &binder,
        &mut instances,
    );

    assert!(outcome.symbol().is_none());
    assert!(instances.is_empty());
    let diagnostics = compilation.diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code(), Some("unknown-name"));
}
