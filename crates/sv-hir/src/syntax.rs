//! Minimal typed views over the syntax tree that elaboration reads from.
//!
//! §1 scopes the concrete grammar out: "only the *shape* is specified
//! here". §4.F nonetheless names concrete syntax types by name
//! (`ModuleDeclarationSyntax`, `HierarchyInstantiationSyntax`, ...) and
//! describes exactly which pieces of each one elaboration consumes. These
//! structs are that shape, generic over the same `Kind` the parser base is
//! generic over: a concrete grammar crate built on `sv-syntax` would produce
//! these (or something that converts into them) from its own typed syntax
//! layer; this crate never walks a raw `SyntaxNode`'s children by kind to
//! reconstruct them.
use sv_syntax::{Kind, SyntaxNode, Token};

use crate::definition::ParameterMetadata;
use crate::symbol::ProcedureKind;

/// The shape `CompilationUnitSymbol::from_syntax` reads from.
#[derive(Debug, Clone, Copy)]
pub struct CompilationUnitSyntax<'a, K: Kind> {
    /// Top-level declarations, in source order.
    pub top_level_items: &'a [&'a SyntaxNode<'a, K>],
}

/// The shape `PackageSymbol::from_syntax` and `Definition` construction read
/// from (§4.F `ModuleDeclarationSyntax`).
#[derive(Debug, Clone, Copy)]
pub struct ModuleDeclarationSyntax<'a, K: Kind> {
    /// The module/interface/program/package's own syntax node.
    pub syntax: &'a SyntaxNode<'a, K>,
    /// The name taken from the syntax header.
    pub name: Token<'a, K>,
    /// Parameter declarations, in source order, with their declared
    /// defaults.
    pub parameters: &'a [ParameterMetadata<'a, K>],
    /// Body items, in source order.
    pub body_items: &'a [&'a SyntaxNode<'a, K>],
}

/// One `HierarchyInstantiationSyntax`: a definition name, an optional
/// parameter-override list, and one or more instance names sharing that
/// definition and override list (§4.F `InstanceSymbol.fromSyntax`).
#[derive(Debug, Clone, Copy)]
pub struct HierarchyInstantiationSyntax<'a, K: Kind> {
    /// The syntax node the instantiation was parsed from.
    pub syntax: &'a SyntaxNode<'a, K>,
    /// The name of the `Definition` being instantiated.
    pub definition_name: Token<'a, K>,
    /// The parameter-override list syntax, if present (`#( .W(8) )`).
    pub overrides: Option<&'a SyntaxNode<'a, K>>,
    /// One name per instance this statement declares, in source order
    /// (`foo a(), b();` instantiates two instances of `foo`).
    pub instance_names: &'a [Token<'a, K>],
}

/// The shape `SequentialBlockSymbol::from_syntax` reads from.
#[derive(Debug, Clone, Copy)]
pub struct BlockStatementSyntax<'a, K: Kind> {
    /// The block's own syntax node, stored as the statement-bodied scope's
    /// statement tree.
    pub syntax: &'a SyntaxNode<'a, K>,
    /// The optional label (`foo: begin ... end`).
    pub label: Option<Token<'a, K>>,
}

/// The shape `ProceduralBlockSymbol::from_syntax` reads from.
#[derive(Debug, Clone, Copy)]
pub struct ProceduralBlockSyntax<'a, K: Kind> {
    /// The procedure's own syntax node.
    pub syntax: &'a SyntaxNode<'a, K>,
    /// Which of `initial`/`always*`/`final` this is.
    pub procedure_kind: ProcedureKind,
}

/// The shape `GenerateBlockSymbol::from_syntax` reads from.
#[derive(Debug, Clone, Copy)]
pub struct IfGenerateSyntax<'a, K: Kind> {
    /// The guard expression, evaluated as a constant by the binder.
    pub guard: &'a SyntaxNode<'a, K>,
    /// The optional label shared by whichever branch is taken.
    pub label: Option<Token<'a, K>>,
    /// The `then` branch block.
    pub then_branch: &'a SyntaxNode<'a, K>,
    /// The optional `else` branch block.
    pub else_branch: Option<&'a SyntaxNode<'a, K>>,
}

/// The shape `GenerateBlockArraySymbol::from_syntax` reads from.
#[derive(Debug, Clone, Copy)]
pub struct LoopGenerateSyntax<'a, K: Kind> {
    /// The genvar's name (`for (genvar i = 0; ...)`).
    pub genvar_name: Token<'a, K>,
    /// The initializer constant expression.
    pub init: &'a SyntaxNode<'a, K>,
    /// The loop condition constant expression, re-evaluated each
    /// iteration.
    pub condition: &'a SyntaxNode<'a, K>,
    /// The step constant expression, re-evaluated each iteration.
    pub step: &'a SyntaxNode<'a, K>,
    /// The optional label of the resulting `GenerateBlockArraySymbol`.
    pub label: Option<Token<'a, K>>,
    /// The loop body, elaborated once per iteration.
    pub body: &'a SyntaxNode<'a, K>,
}
