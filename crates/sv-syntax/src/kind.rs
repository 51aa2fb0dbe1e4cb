//! The kind discriminator shared by tokens and syntax nodes.
//!
//! The concrete SystemVerilog grammar — which productions exist, which
//! punctuation spells which operator — is an external collaborator's
//! concern (see the crate-level docs). What the parser base needs from a
//! "kind" is much smaller: it has to be able to recognize trivia, recognize
//! end-of-file, and be compared/copied cheaply. [`SyntaxKind`] is a single
//! flat enum shared by both tokens and nodes (mirroring how a real grammar's
//! token and node kinds live in one enum so `expect`/`skipBadTokens` can be
//! generic over "a kind", not over "a token kind" and "a node kind"
//! separately), but its variant list only goes as far as the parser base and
//! its tests require; a concrete grammar crate built on top of this one is
//! expected to grow it.
use std::fmt;

/// A single discriminator value shared by tokens and syntax nodes.
///
/// Implementers are expected to be cheap `Copy` enums. [`is_trivia`] tells
/// the token window and trivia-propagation helpers which kinds never become
/// tree children in their own right, and [`eof`]/[`is_eof`] give the window
/// its end-of-file sentinel.
///
/// [`is_trivia`]: Kind::is_trivia
/// [`eof`]: Kind::eof
/// [`is_eof`]: Kind::is_eof
pub trait Kind: Copy + Eq + fmt::Debug + 'static {
    /// Returns `true` if a token of this kind is trivia (whitespace,
    /// comments, directives, or a packaged run of skipped tokens) rather
    /// than ordinary lexical material.
    fn is_trivia(self) -> bool;

    /// A short, human-readable name used in "expected X" diagnostics.
    fn describe(self) -> &'static str;

    /// The end-of-file sentinel kind.
    fn eof() -> Self;

    /// Returns `true` if `self` is the end-of-file sentinel.
    fn is_eof(self) -> bool {
        self == Self::eof()
    }

    /// The kind assigned to a `SkippedTokens` trivium.
    fn skipped_tokens() -> Self;
}

/// A minimal [`Kind`] implementation used by this crate's own unit tests and
/// by downstream crates that want to exercise the parser base before a real
/// grammar exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[non_exhaustive]
pub enum DemoKind {
    /// End of input.
    Eof,
    /// An identifier-shaped lexeme.
    Ident,
    /// A single `(`.
    LParen,
    /// A single `)`.
    RParen,
    /// A single `,`.
    Comma,
    /// Inline or trailing whitespace.
    Whitespace,
    /// A `// ...` comment.
    LineComment,
    /// A byte the lexer could not classify.
    Unknown,
    /// A run of tokens discarded during error recovery.
    SkippedTokens,
    /// A node produced by parsing a parenthesized, comma-separated list.
    ParenList,
    /// A node standing in for a syntactically absent item.
    MissingItem,
}

impl Kind for DemoKind {
    fn is_trivia(self) -> bool {
        matches!(
            self,
            Self::Whitespace | Self::LineComment | Self::SkippedTokens
        )
    }

    fn describe(self) -> &'static str {
        match self {
            Self::Eof => "end of file",
            Self::Ident => "identifier",
            Self::LParen => "`(`",
            Self::RParen => "`)`",
            Self::Comma => "`,`",
            Self::Whitespace => "whitespace",
            Self::LineComment => "comment",
            Self::Unknown => "unknown token",
            Self::SkippedTokens => "skipped tokens",
            Self::ParenList => "parenthesized list",
            Self::MissingItem => "item",
        }
    }

    fn eof() -> Self {
        Self::Eof
    }

    fn skipped_tokens() -> Self {
        Self::SkippedTokens
    }
}
