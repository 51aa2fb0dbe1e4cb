//! Pre-elaboration descriptors: `Definition` and `ParameterMetadata`.
use sv_syntax::{Kind, SyntaxNode, Token};

/// A single parameter declaration's elaborated record, attached to an
/// instance during elaboration (§3 "ParameterMetadata").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterMetadata<'a, K: Kind> {
    /// The parameter declaration this metadata was produced from.
    pub decl: &'a SyntaxNode<'a, K>,
    /// The resolved type token (a concrete grammar would give this a real
    /// `Type` value; this core only has a syntax node to point at).
    pub resolved_type: &'a SyntaxNode<'a, K>,
    /// The parameter's constant value after applying any override.
    pub constant_value: i64,
}

/// A pre-elaboration module/interface/program descriptor, produced once
/// from a `ModuleDeclarationSyntax` and potentially backing many instances
/// (§3 "Definition").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Definition<'a, K: Kind> {
    /// The definition's name, taken from the syntax header.
    pub name: Token<'a, K>,
    /// The syntax node this definition was produced from.
    pub syntax: &'a SyntaxNode<'a, K>,
    /// Parameter declarations, in source order, with their declared
    /// defaults (before any instance applies an override).
    pub parameters: &'a [ParameterMetadata<'a, K>],
    /// The body syntax (top-level item declarations), handed to
    /// `InstanceSymbol::populate` when an instance is created from this
    /// definition.
    pub body: &'a SyntaxNode<'a, K>,
}

impl<'a, K: Kind> Definition<'a, K> {
    /// The definition's name as plain text.
    pub fn name_text(&self) -> &'a str {
        self.name.text()
    }
}
