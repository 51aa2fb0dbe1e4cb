//! Buffered lookahead over a forward-only token source.
use std::collections::VecDeque;

use sv_diagnostics::{Diagnostic, DiagnosticSink, Span};

use crate::kind::Kind;
use crate::token::Token;

/// A cursor that yields the next [`Token`] in source order, with its
/// accumulated leading trivia already attached.
///
/// Implemented by the lexer/preprocessor, which is external to this crate —
/// the parser base only ever sees it through this contract. Repeated calls
/// after end-of-file must keep returning the same end-of-file token;
/// [`TokenWindow`] enforces that with a debug assertion rather than relying
/// on the implementation to uphold it.
pub trait TokenSource<'a, K: Kind> {
    /// Produces the next token, or an end-of-file token if the source is
    /// exhausted.
    fn next_token(&mut self) -> Token<'a, K>;
}

const INITIAL_CAPACITY: usize = 32;

/// Buffered, O(1)-lookahead window over a [`TokenSource`].
///
/// The window lazily pulls tokens from the source into an internal buffer
/// as `peek`/`peek_at` demand more lookahead than it currently holds,
/// starting at a capacity of 32 and growing (via `VecDeque`'s own doubling
/// growth) as needed.
pub struct TokenWindow<'a, K: Kind, S> {
    source: S,
    buffer: VecDeque<Token<'a, K>>,
    last_consumed: Option<Token<'a, K>>,
}

impl<'a, K: Kind, S: TokenSource<'a, K>> TokenWindow<'a, K, S> {
    /// Wraps `source` in a token window.
    pub fn new(source: S) -> Self {
        Self {
            source,
            buffer: VecDeque::with_capacity(INITIAL_CAPACITY),
            last_consumed: None,
        }
    }

    fn fill_to(&mut self, offset: usize) {
        while self.buffer.len() <= offset {
            let at_eof = self.buffer.back().is_some_and(|t| t.kind().is_eof());
            let next = if at_eof {
                *self.buffer.back().unwrap()
            } else {
                self.source.next_token()
            };
            self.buffer.push_back(next);
        }
    }

    /// Returns the current token (offset 0) without consuming it.
    pub fn peek(&mut self) -> Token<'a, K> {
        self.peek_at(0)
    }

    /// Returns the token `offset` positions ahead of the current one,
    /// without consuming anything.
    pub fn peek_at(&mut self, offset: usize) -> Token<'a, K> {
        self.fill_to(offset);
        self.buffer[offset]
    }

    /// Sugar for `self.peek().kind() == kind`.
    pub fn peek_is(&mut self, kind: K) -> bool {
        self.peek().kind() == kind
    }

    /// Consumes and returns the current token, recording it as
    /// `last_consumed`.
    pub fn consume(&mut self) -> Token<'a, K> {
        self.fill_to(0);
        let token = self.buffer.pop_front().expect("fill_to(0) guarantees an entry");
        self.last_consumed = Some(token);
        token
    }

    /// Consumes and returns the current token if it has kind `kind`,
    /// otherwise leaves the window untouched and returns `None`.
    pub fn consume_if(&mut self, kind: K) -> Option<Token<'a, K>> {
        if self.peek_is(kind) {
            Some(self.consume())
        } else {
            None
        }
    }

    /// The most recently consumed token, if any.
    pub fn last_consumed(&self) -> Option<Token<'a, K>> {
        self.last_consumed
    }

    /// Consumes a token of the given `kind`. On a match this is exactly
    /// `consume`. On a mismatch it emits an "expected `kind`" diagnostic at
    /// the current token's location and returns a *missing* token: the
    /// expected kind, empty text, flagged missing, carrying the leading
    /// trivia the actual (still unconsumed) token already had — the actual
    /// token itself is left in the window for the caller's own recovery
    /// (typically [`skip_bad_tokens`](crate::list::skip_bad_tokens)).
    pub fn expect(&mut self, sink: &mut dyn DiagnosticSink, kind: K) -> Token<'a, K> {
        let current = self.peek();
        if current.kind() == kind {
            return self.consume();
        }

        sink.report(
            Diagnostic::error(format!(
                "expected {}, found {}",
                kind.describe(),
                current.kind().describe()
            ))
            .with_code("expected-token")
            .with_label(String::new(), current.span()),
        );

        Token::missing(
            kind,
            Span::empty(current.span().start()),
            current.leading_trivia(),
        )
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::kind::DemoKind;

    /// Feeds a fixed sequence of tokens, repeating the last (EOF) token
    /// forever once it has been handed out once.
    struct FixedSource<'a> {
        tokens: std::vec::IntoIter<Token<'a, DemoKind>>,
        eof: Token<'a, DemoKind>,
    }

    impl<'a> FixedSource<'a> {
        fn new(tokens: Vec<Token<'a, DemoKind>>, eof: Token<'a, DemoKind>) -> Self {
            Self {
                tokens: tokens.into_iter(),
                eof,
            }
        }
    }

    impl<'a> TokenSource<'a, DemoKind> for FixedSource<'a> {
        fn next_token(&mut self) -> Token<'a, DemoKind> {
            self.tokens.next().unwrap_or(self.eof)
        }
    }

    fn ident<'a>(start: usize, text: &'a str) -> Token<'a, DemoKind> {
        Token::new(DemoKind::Ident, Span::new(start, text.len()), text, &[])
    }

    fn eof<'a>(at: usize) -> Token<'a, DemoKind> {
        Token::new(DemoKind::Eof, Span::empty(at), "", &[])
    }

    #[test]
    fn peek_does_not_consume() {
        let mut window = TokenWindow::new(FixedSource::new(vec![ident(0, "a")], eof(1)));
        assert_eq!(window.peek().text(), "a");
        assert_eq!(window.peek().text(), "a");
        assert_eq!(window.consume().text(), "a");
        assert!(window.peek().kind().is_eof());
    }

    #[test]
    fn peek_at_offset_is_stable_across_repeats() {
        let mut window =
            TokenWindow::new(FixedSource::new(vec![ident(0, "a"), ident(1, "b")], eof(2)));
        assert_eq!(window.peek_at(1).text(), "b");
        assert_eq!(window.peek_at(1).text(), "b");
        assert_eq!(window.peek().text(), "a");
    }

    #[test]
    fn repeated_peek_at_eof_returns_same_token() {
        let mut window = TokenWindow::new(FixedSource::new(vec![], eof(0)));
        let first = window.peek();
        let second = window.peek();
        assert_eq!(first, second);
        assert!(first.kind().is_eof());
    }

    #[test]
    fn expect_mismatch_synthesizes_missing_token_and_leaves_actual_in_window() {
        let mut sink: Vec<Diagnostic> = Vec::new();
        let mut window = TokenWindow::new(FixedSource::new(vec![ident(0, "a")], eof(1)));

        let missing = window.expect(&mut sink, DemoKind::LParen);
        assert!(missing.is_missing());
        assert_eq!(missing.kind(), DemoKind::LParen);
        assert_eq!(missing.text(), "");
        assert_eq!(sink.len(), 1);
        assert_eq!(sink[0].code(), Some("expected-token"));

        // the unexpected token was not consumed
        assert_eq!(window.peek().text(), "a");
    }

    #[test]
    fn expect_match_consumes_normally() {
        let mut sink: Vec<Diagnostic> = Vec::new();
        let mut window = TokenWindow::new(FixedSource::new(vec![ident(0, "a")], eof(1)));

        let token = window.expect(&mut sink, DemoKind::Ident);
        assert!(!token.is_missing());
        assert_eq!(token.text(), "a");
        assert!(sink.is_empty());
    }
}
