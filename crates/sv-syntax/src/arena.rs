//! The bump-allocated syntax tree.
//!
//! `rowan`'s green/red tree — the teacher's usual tree substrate — models
//! trivia as ordinary sibling tokens. This crate's data model instead keeps
//! trivia on the token it precedes (see [`crate::token`]), so the tree
//! itself is a plain arena of nodes and tokens with no separate trivia
//! layer. [`bumpalo`] supplies the arena, following the same pattern used by
//! Solidity front-ends that face the same "long-lived, never-freed-until-done,
//! lots-of-small-nodes" allocation shape.
use bumpalo::Bump;

use sv_diagnostics::Span;

use crate::kind::Kind;
use crate::token::{Token, Trivia};

/// The bump allocator backing one compilation's syntax tree (and, via
/// [`crate::pools`], its symbol graph).
///
/// Every [`SyntaxNode`] and every trivia/children slice referenced by a
/// [`Token`] is allocated out of this arena and lives exactly as long as it
/// does. The arena is never partially freed; it is dropped whole when the
/// owning `Compilation` is destroyed.
pub type Arena = Bump;

/// The element type of a [`SyntaxNode`]'s children: either a nested node or
/// a token, preserved losslessly and in source order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenOrSyntax<'a, K: Kind> {
    /// A child token.
    Token(Token<'a, K>),
    /// A child node, owned by the same arena as its parent.
    Node(&'a SyntaxNode<'a, K>),
}

impl<'a, K: Kind> TokenOrSyntax<'a, K> {
    /// The discriminator kind of this element, whichever variant it is.
    pub fn kind(&self) -> K {
        match self {
            Self::Token(token) => token.kind(),
            Self::Node(node) => node.kind(),
        }
    }

    /// The span of this element's own content (for a node, its full
    /// subtree; for a token, its text excluding leading trivia).
    pub fn span(&self) -> Span {
        match self {
            Self::Token(token) => token.span(),
            Self::Node(node) => node.span(),
        }
    }

    /// Reconstructs the exact source text this element and everything
    /// beneath it covers, in order, by a post-order walk.
    pub fn text_into(&self, out: &mut String) {
        match self {
            Self::Token(token) => token.text_into(out),
            Self::Node(node) => node.text_into(out),
        }
    }
}

/// A heterogeneous syntax tree node: a discriminator `kind` plus an ordered
/// list of children, each either a nested node or a token.
///
/// Nodes are immutable once built and owned exclusively by the bump arena
/// of their compilation; "rewriting" a node (as trivia propagation
/// occasionally must, to re-home skipped tokens onto a node's left-most
/// descendant) allocates a fresh node rather than mutating one in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntaxNode<'a, K: Kind> {
    kind: K,
    missing: bool,
    children: &'a [TokenOrSyntax<'a, K>],
}

impl<'a, K: Kind> SyntaxNode<'a, K> {
    /// Builds and arena-allocates a new node from its children.
    pub fn build(arena: &'a Arena, kind: K, children: &[TokenOrSyntax<'a, K>]) -> &'a Self {
        arena.alloc(Self {
            kind,
            missing: false,
            children: arena.alloc_slice_copy(children),
        })
    }

    /// Builds a node standing in for a syntactically absent item: no
    /// children, flagged as missing, spanning zero bytes at `at`.
    pub fn missing(arena: &'a Arena, kind: K, at: Span) -> &'a Self {
        let marker = Token::missing(kind, at, &[]);
        arena.alloc(Self {
            kind,
            missing: true,
            children: arena.alloc_slice_copy(&[TokenOrSyntax::Token(marker)]),
        })
    }

    /// The discriminator kind of this node.
    pub fn kind(&self) -> K {
        self.kind
    }

    /// Returns `true` if this node was synthesized to stand in for a
    /// syntactically absent item.
    pub fn is_missing(&self) -> bool {
        self.missing
    }

    /// This node's children, in source order.
    pub fn children(&self) -> &'a [TokenOrSyntax<'a, K>] {
        self.children
    }

    /// The span covering this node's full subtree (its first child's start
    /// to its last child's end), or a zero-length span if it has no
    /// children.
    pub fn span(&self) -> Span {
        match (self.children.first(), self.children.last()) {
            (Some(first), Some(last)) => first.span().to(last.span()),
            _ => Span::empty(0),
        }
    }

    /// Reconstructs the exact source text this subtree covers, in order, by
    /// a post-order walk of every child.
    pub fn text_into(&self, out: &mut String) {
        for child in self.children {
            child.text_into(out);
        }
    }

    /// Reconstructs the exact source text this subtree covers as an owned
    /// `String`; the round-trip property this crate is built to satisfy.
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.text_into(&mut out);
        out
    }
}

/// Prepends `trivia` before the existing leading trivia of a token,
/// allocating the merged slice in `arena`. A no-op (returns `token`
/// unchanged) if `trivia` is empty.
pub fn prepend_trivia_to_token<'a, K: Kind>(
    arena: &'a Arena,
    token: Token<'a, K>,
    trivia: &[Trivia<'a, K>],
) -> Token<'a, K> {
    if trivia.is_empty() {
        return token;
    }
    let mut merged = bumpalo::collections::Vec::with_capacity_in(
        trivia.len() + token.leading_trivia().len(),
        arena,
    );
    merged.extend_from_slice(trivia);
    merged.extend_from_slice(token.leading_trivia());
    token.with_leading_trivia(merged.into_bump_slice())
}

/// Prepends `trivia` before the existing leading trivia of `node`'s
/// left-most descendant token, rebuilding the spine of nodes down to that
/// token (nodes are immutable, so "prepending" allocates fresh ancestors
/// rather than mutating in place). A no-op if `trivia` is empty.
pub fn prepend_trivia_to_node<'a, K: Kind>(
    arena: &'a Arena,
    node: &'a SyntaxNode<'a, K>,
    trivia: &[Trivia<'a, K>],
) -> &'a SyntaxNode<'a, K> {
    if trivia.is_empty() || node.children.is_empty() {
        return node;
    }

    let mut new_children: Vec<TokenOrSyntax<'a, K>> = node.children.to_vec();
    new_children[0] = match new_children[0] {
        TokenOrSyntax::Token(token) => {
            TokenOrSyntax::Token(prepend_trivia_to_token(arena, token, trivia))
        }
        TokenOrSyntax::Node(child) => {
            TokenOrSyntax::Node(prepend_trivia_to_node(arena, child, trivia))
        }
    };

    arena.alloc(SyntaxNode {
        kind: node.kind,
        missing: node.missing,
        children: arena.alloc_slice_copy(&new_children),
    })
}

/// Packages `tokens` into a single `SkippedTokens` trivium and prepends it
/// to `token`'s existing leading trivia. A no-op if `tokens` is empty.
pub fn prepend_skipped_tokens_to_token<'a, K: Kind>(
    arena: &'a Arena,
    token: Token<'a, K>,
    tokens: &[Token<'a, K>],
) -> Token<'a, K> {
    if tokens.is_empty() {
        return token;
    }
    let span = tokens
        .first()
        .unwrap()
        .span()
        .to(tokens.last().unwrap().span());
    let stored = arena.alloc_slice_copy(tokens);
    let trivium = Trivia::SkippedTokens(span, stored);
    prepend_trivia_to_token(arena, token, std::slice::from_ref(&trivium))
}

/// Packages `tokens` into a single `SkippedTokens` trivium and prepends it
/// to `node`'s left-most descendant token, the `Node` half of
/// [`prepend_skipped_tokens_to_token`]. A no-op if `tokens` is empty.
pub fn prepend_skipped_tokens_to_node<'a, K: Kind>(
    arena: &'a Arena,
    node: &'a SyntaxNode<'a, K>,
    tokens: &[Token<'a, K>],
) -> &'a SyntaxNode<'a, K> {
    if tokens.is_empty() {
        return node;
    }
    let span = tokens
        .first()
        .unwrap()
        .span()
        .to(tokens.last().unwrap().span());
    let stored = arena.alloc_slice_copy(tokens);
    let trivium = Trivia::SkippedTokens(span, stored);
    prepend_trivia_to_node(arena, node, std::slice::from_ref(&trivium))
}
