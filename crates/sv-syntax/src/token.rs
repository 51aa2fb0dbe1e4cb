//! Tokens and the trivia attached to them.
use sv_diagnostics::Span;

use crate::kind::Kind;

/// A single piece of non-semantic lexical material attached to a [`Token`].
///
/// Trivia forms a flat, ordered list on the token that follows it; it is
/// never a sibling in the syntax tree. `SkippedTokens` is the one variant
/// whose payload is itself a run of tokens rather than raw text — it is how
/// [`skip_bad_tokens`](crate::list::skip_bad_tokens) preserves source bytes
/// that a recognizer declined to build a tree node for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trivia<'a, K: Kind> {
    /// Inter-token whitespace.
    Whitespace(Span, &'a str),
    /// A single-line comment, including its delimiter.
    LineComment(Span, &'a str),
    /// A block comment, including its delimiters.
    BlockComment(Span, &'a str),
    /// A preprocessor directive carried through as opaque text.
    Directive(Span, &'a str),
    /// A contiguous run of tokens discarded during error recovery.
    SkippedTokens(Span, &'a [Token<'a, K>]),
}

impl<'a, K: Kind> Trivia<'a, K> {
    /// The span of source text this trivium covers.
    pub fn span(&self) -> Span {
        match *self {
            Self::Whitespace(span, _)
            | Self::LineComment(span, _)
            | Self::BlockComment(span, _)
            | Self::Directive(span, _)
            | Self::SkippedTokens(span, _) => span,
        }
    }

    /// Reconstructs the exact source text this trivium covers, by
    /// concatenating each skipped token's own trivia and text when this is a
    /// `SkippedTokens` trivium.
    pub fn text_into(&self, out: &mut String) {
        match *self {
            Self::Whitespace(_, text)
            | Self::LineComment(_, text)
            | Self::BlockComment(_, text)
            | Self::Directive(_, text) => out.push_str(text),
            Self::SkippedTokens(_, tokens) => {
                for token in tokens {
                    token.text_into(out);
                }
            }
        }
    }
}

/// A lexeme: a `kind`, a source location, a textual value, and the ordered
/// leading trivia that preceded it.
///
/// Tokens are value-semantics: cheap to copy or move, with trivia borrowed
/// from the arena that owns the compilation's syntax tree rather than owned
/// inline. A *missing* token is a token synthesized by
/// [`expect`](crate::window::TokenWindow::expect) on a mismatch: it has the
/// expected kind, an empty text, the span of the cursor at the point of
/// failure, and [`is_missing`](Token::is_missing) set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a, K: Kind> {
    kind: K,
    span: Span,
    text: &'a str,
    leading_trivia: &'a [Trivia<'a, K>],
    missing: bool,
}

impl<'a, K: Kind> Token<'a, K> {
    /// Creates a new, ordinary (non-missing) token.
    pub fn new(kind: K, span: Span, text: &'a str, leading_trivia: &'a [Trivia<'a, K>]) -> Self {
        Self {
            kind,
            span,
            text,
            leading_trivia,
            missing: false,
        }
    }

    /// Creates the synthetic token `expect` returns on a mismatch: the
    /// expected `kind`, empty text, flagged as missing, carrying whatever
    /// leading trivia the actual (unconsumed) token already had.
    pub fn missing(kind: K, span: Span, leading_trivia: &'a [Trivia<'a, K>]) -> Self {
        Self {
            kind,
            span,
            text: "",
            leading_trivia,
            missing: true,
        }
    }

    /// The discriminator kind of this token.
    pub fn kind(&self) -> K {
        self.kind
    }

    /// The span of the token's own text, excluding leading trivia.
    pub fn span(&self) -> Span {
        self.span
    }

    /// The token's textual value (empty for a missing token).
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// The ordered leading trivia attached to this token.
    pub fn leading_trivia(&self) -> &'a [Trivia<'a, K>] {
        self.leading_trivia
    }

    /// Returns `true` if this token was synthesized by `expect` rather than
    /// read from the token source.
    pub fn is_missing(&self) -> bool {
        self.missing
    }

    /// Returns a copy of this token with `leading_trivia` replacing its
    /// current leading trivia.
    pub fn with_leading_trivia(self, leading_trivia: &'a [Trivia<'a, K>]) -> Self {
        Self {
            leading_trivia,
            ..self
        }
    }

    /// Reconstructs the exact source text this token and its leading trivia
    /// cover, in order.
    pub fn text_into(&self, out: &mut String) {
        for trivium in self.leading_trivia {
            trivium.text_into(out);
        }
        out.push_str(self.text);
    }
}
