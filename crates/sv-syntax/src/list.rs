//! Error-resilient recognizer primitives: [`skip_bad_tokens`] and
//! [`parse_separated_list`].
//!
//! Every SystemVerilog list production — port lists, argument lists,
//! declaration lists — has the shape `open item (sep item)* close`. Rather
//! than hand-writing recovery for each one, a concrete grammar built on this
//! crate drives [`parse_separated_list`] with two predicates and an item
//! parser; the recovery behavior (one diagnostic per bad run, lossless
//! trivia attachment) is centralized here and shared by every call site.
use sv_diagnostics::DiagnosticSink;
use tracing::debug;

use crate::arena::{
    prepend_skipped_tokens_to_node, prepend_skipped_tokens_to_token, Arena, SyntaxNode,
    TokenOrSyntax,
};
use crate::kind::Kind;
use crate::pools::ScratchPools;
use crate::token::Token;
use crate::window::{TokenSource, TokenWindow};

/// The outcome of [`skip_bad_tokens`]: whether the caller should resume
/// normal parsing or give up and let recovery surface further up the call
/// stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryControl {
    /// A legal restart token (`IsExpected`) was found; normal parsing can
    /// resume from the current position.
    Continue,
    /// An `IsAbort` token or end-of-file was found before any restart
    /// token; the caller should stop trying to parse this construct.
    Abort,
}

/// Raises a single diagnostic at the first bad token, then consumes tokens
/// until `is_expected` matches (→ [`RecoveryControl::Continue`]) or
/// `is_abort` matches or end-of-file is reached (→
/// [`RecoveryControl::Abort`]).
///
/// Consumed tokens are returned as an arena-owned slice, empty if the call
/// consumed nothing (the current token already satisfied one of the
/// predicates, in which case this function should not have been called, or
/// was the very first token examined and happened to trigger an immediate
/// abort). The caller packages them onto the next element via
/// [`prepend_skipped_tokens_to_token`]/[`prepend_skipped_tokens_to_node`]
/// (see [`attach_pending`]).
pub fn skip_bad_tokens<'a, K, S>(
    window: &mut TokenWindow<'a, K, S>,
    arena: &'a Arena,
    pools: &ScratchPools<'a, K>,
    sink: &mut dyn DiagnosticSink,
    code: &str,
    is_expected: impl Fn(K) -> bool,
    is_abort: impl Fn(K) -> bool,
) -> (&'a [Token<'a, K>], RecoveryControl)
where
    K: Kind,
    S: TokenSource<'a, K>,
{
    let start = window.peek();
    sink.report(
        sv_diagnostics::Diagnostic::error(format!("unexpected {}", start.kind().describe()))
            .with_code(code)
            .with_label(String::new(), start.span()),
    );

    let mut skipped = pools.tokens();
    let control = loop {
        let current = window.peek();
        if current.kind().is_eof() {
            break RecoveryControl::Abort;
        }
        if is_expected(current.kind()) {
            break RecoveryControl::Continue;
        }
        if is_abort(current.kind()) {
            break RecoveryControl::Abort;
        }
        skipped.push(window.consume());
    };

    let skipped: &'a [Token<'a, K>] = arena.alloc_slice_copy(&skipped);
    debug!(skipped = !skipped.is_empty(), ?control, "recovered from unexpected token");
    (skipped, control)
}

/// Attaches `pending` (if any) as a `SkippedTokens` trivium on `element`'s
/// left-most token, clearing `pending` afterward. This is
/// [`prependSkippedTokens`/`reduceSkippedTokens`](crate) collapsed into one
/// call: the single-slot scratch accumulator used between list elements.
fn attach_pending<'a, K: Kind>(
    arena: &'a Arena,
    pending: &mut &'a [Token<'a, K>],
    element: TokenOrSyntax<'a, K>,
) -> TokenOrSyntax<'a, K> {
    let tokens = std::mem::take(pending);
    if tokens.is_empty() {
        return element;
    }
    match element {
        TokenOrSyntax::Token(token) => {
            TokenOrSyntax::Token(prepend_skipped_tokens_to_token(arena, token, tokens))
        }
        TokenOrSyntax::Node(node) => {
            TokenOrSyntax::Node(prepend_skipped_tokens_to_node(arena, node, tokens))
        }
    }
}

/// Parses `open item (sep item)* close`, the shape shared by every
/// SystemVerilog list production.
///
/// `is_expected` recognizes a token that can begin an item; `is_end`
/// recognizes the list terminator (typically `close_kind`, but callers may
/// widen it to any hard stop). `item_kind` is the discriminator used for the
/// missing-item node synthesized when a separator is not followed by an
/// item. `parse_item` is handed the window, the diagnostic sink, and
/// whether this is the first item, and must return the parsed item as a
/// node.
///
/// Returns a node of kind `list_kind` whose children are, in order: the
/// open token, then an alternation of item nodes and separator tokens, then
/// the close token. Every input token is preserved somewhere in the
/// resulting tree, either as an ordinary child or packed into a
/// `SkippedTokens` trivium.
///
/// Once the first item has been parsed, the loop that follows always
/// *expects* a separator (synthesizing a missing one with a diagnostic if
/// the current token is not actually `separator_kind`) before looking for
/// the next item; a restart during mid-list recovery is therefore "the next
/// token that looks like a separator", not "the next token that looks like
/// an item" — that is what lets a single bad token between two real
/// separators be skipped without also swallowing the surviving separator
/// that follows it.
#[allow(clippy::too_many_arguments)]
pub fn parse_separated_list<'a, K, S>(
    window: &mut TokenWindow<'a, K, S>,
    arena: &'a Arena,
    pools: &ScratchPools<'a, K>,
    sink: &mut dyn DiagnosticSink,
    list_kind: K,
    open_kind: K,
    close_kind: K,
    separator_kind: K,
    item_kind: K,
    recovery_code: &str,
    is_expected: impl Fn(K) -> bool,
    is_end: impl Fn(K) -> bool,
    mut parse_item: impl FnMut(&mut TokenWindow<'a, K, S>, &mut dyn DiagnosticSink, bool) -> &'a SyntaxNode<'a, K>,
) -> &'a SyntaxNode<'a, K>
where
    K: Kind,
    S: TokenSource<'a, K>,
{
    let mut children = pools.elements();
    let mut pending: &'a [Token<'a, K>] = &[];

    let open = window.expect(sink, open_kind);
    children.push(attach_pending(arena, &mut pending, TokenOrSyntax::Token(open)));

    let mut have_item = false;
    if !is_end(window.peek().kind()) {
        loop {
            if is_expected(window.peek().kind()) {
                let item = parse_item(window, sink, true);
                children.push(attach_pending(arena, &mut pending, TokenOrSyntax::Node(item)));
                have_item = true;
                break;
            }
            if is_end(window.peek().kind()) {
                break;
            }
            let (skipped, control) =
                skip_bad_tokens(window, arena, pools, sink, recovery_code, &is_expected, &is_end);
            pending = skipped;
            if control == RecoveryControl::Abort {
                break;
            }
        }
    }

    if have_item {
        while !is_end(window.peek().kind()) {
            let sep = window.expect(sink, separator_kind);
            children.push(attach_pending(arena, &mut pending, TokenOrSyntax::Token(sep)));

            if is_end(window.peek().kind()) {
                let missing = SyntaxNode::missing(
                    arena,
                    item_kind,
                    sv_diagnostics::Span::empty(window.peek().span().start()),
                );
                sink.report(
                    sv_diagnostics::Diagnostic::error(format!("expected {}", item_kind.describe()))
                        .with_code(recovery_code)
                        .with_label(String::new(), window.peek().span()),
                );
                children.push(TokenOrSyntax::Node(missing));
                break;
            }

            if is_expected(window.peek().kind()) {
                let item = parse_item(window, sink, false);
                children.push(attach_pending(arena, &mut pending, TokenOrSyntax::Node(item)));
            } else {
                let is_separator_restart = |kind: K| kind == separator_kind;
                let (skipped, control) = skip_bad_tokens(
                    window,
                    arena,
                    pools,
                    sink,
                    recovery_code,
                    is_separator_restart,
                    &is_end,
                );
                pending = skipped;
                if control == RecoveryControl::Abort {
                    break;
                }
            }
        }
    }

    let close = window.expect(sink, close_kind);
    children.push(attach_pending(arena, &mut pending, TokenOrSyntax::Token(close)));

    SyntaxNode::build(arena, list_kind, &children)
}

#[cfg(test)]
mod tests {
    use bumpalo::Bump;
    use pretty_assertions::assert_eq;
    use sv_diagnostics::{Diagnostic, Span};

    use super::*;
    use crate::kind::DemoKind;
    use crate::token::Trivia;

    struct VecSource<'a> {
        tokens: std::vec::IntoIter<Token<'a, DemoKind>>,
        eof: Token<'a, DemoKind>,
    }

    impl<'a> VecSource<'a> {
        fn new(tokens: Vec<Token<'a, DemoKind>>) -> Self {
            let end = tokens.last().map(|t| t.span().end()).unwrap_or(0);
            Self {
                tokens: tokens.into_iter(),
                eof: Token::new(DemoKind::Eof, Span::empty(end), "", &[]),
            }
        }
    }

    impl<'a> TokenSource<'a, DemoKind> for VecSource<'a> {
        fn next_token(&mut self) -> Token<'a, DemoKind> {
            self.tokens.next().unwrap_or(self.eof)
        }
    }

    fn tok(kind: DemoKind, start: usize, text: &str) -> Token<'_, DemoKind> {
        Token::new(kind, Span::new(start, text.len()), text, &[])
    }

    fn is_expected(kind: DemoKind) -> bool {
        kind == DemoKind::Ident
    }

    fn is_end(kind: DemoKind) -> bool {
        kind == DemoKind::RParen
    }

    fn parse_ident_item<'a, S: TokenSource<'a, DemoKind>>(
        arena: &'a Bump,
    ) -> impl FnMut(&mut TokenWindow<'a, DemoKind, S>, &mut dyn DiagnosticSink, bool) -> &'a SyntaxNode<'a, DemoKind>
    {
        move |window, sink, _is_first| {
            let token = window.expect(sink, DemoKind::Ident);
            SyntaxNode::build(arena, DemoKind::Ident, &[TokenOrSyntax::Token(token)])
        }
    }

    /// Scenario 1: `()` yields open/close with no elements and zero
    /// diagnostics.
    #[test]
    fn empty_list() {
        let arena = Bump::new();
        let pools = ScratchPools::new();
        let mut sink: Vec<Diagnostic> = Vec::new();
        let mut window = TokenWindow::new(VecSource::new(vec![
            tok(DemoKind::LParen, 0, "("),
            tok(DemoKind::RParen, 1, ")"),
        ]));

        let list = parse_separated_list(
            &mut window,
            &arena,
            &pools,
            &mut sink,
            DemoKind::ParenList,
            DemoKind::LParen,
            DemoKind::RParen,
            DemoKind::Comma,
            DemoKind::Ident,
            "expected-item",
            is_expected,
            is_end,
            parse_ident_item(&arena),
        );

        assert!(sink.is_empty());
        assert_eq!(list.children().len(), 2);
        assert_eq!(list.text(), "()");
    }

    /// Scenario 2: `(a,)` yields `[a, sep, <missing>]` with one diagnostic.
    #[test]
    fn trailing_separator_synthesizes_missing_item() {
        let arena = Bump::new();
        let pools = ScratchPools::new();
        let mut sink: Vec<Diagnostic> = Vec::new();
        let mut window = TokenWindow::new(VecSource::new(vec![
            tok(DemoKind::LParen, 0, "("),
            tok(DemoKind::Ident, 1, "a"),
            tok(DemoKind::Comma, 2, ","),
            tok(DemoKind::RParen, 3, ")"),
        ]));

        let list = parse_separated_list(
            &mut window,
            &arena,
            &pools,
            &mut sink,
            DemoKind::ParenList,
            DemoKind::LParen,
            DemoKind::RParen,
            DemoKind::Comma,
            DemoKind::Ident,
            "expected-item",
            is_expected,
            is_end,
            parse_ident_item(&arena),
        );

        // open, item, sep, missing item, close
        assert_eq!(list.children().len(), 5);
        assert_eq!(sink.len(), 1);
        let missing = match list.children()[3] {
            TokenOrSyntax::Node(node) => node,
            _ => panic!("expected a node"),
        };
        assert!(missing.is_missing());
    }

    /// Scenario 3: `(a, %, b)` packages `%` as a `SkippedTokens` trivium on
    /// the surviving second separator and reports exactly one diagnostic.
    #[test]
    fn bad_token_mid_list_is_skipped_once() {
        let arena = Bump::new();
        let pools = ScratchPools::new();
        let mut sink: Vec<Diagnostic> = Vec::new();
        let mut window = TokenWindow::new(VecSource::new(vec![
            tok(DemoKind::LParen, 0, "("),
            tok(DemoKind::Ident, 1, "a"),
            tok(DemoKind::Comma, 2, ","),
            tok(DemoKind::Unknown, 3, "%"),
            tok(DemoKind::Comma, 4, ","),
            tok(DemoKind::Ident, 5, "b"),
            tok(DemoKind::RParen, 6, ")"),
        ]));

        let list = parse_separated_list(
            &mut window,
            &arena,
            &pools,
            &mut sink,
            DemoKind::ParenList,
            DemoKind::LParen,
            DemoKind::RParen,
            DemoKind::Comma,
            DemoKind::Ident,
            "expected-item",
            is_expected,
            is_end,
            parse_ident_item(&arena),
        );

        assert_eq!(sink.len(), 1);
        assert_eq!(list.text(), "(a,%,b)");

        // open, a, sep(with '%' as SkippedTokens trivia), b, close
        assert_eq!(list.children().len(), 5);
        let sep = match list.children()[2] {
            TokenOrSyntax::Token(token) => token,
            _ => panic!("expected a token"),
        };
        assert_eq!(sep.leading_trivia().len(), 1);
        assert!(matches!(
            sep.leading_trivia()[0],
            Trivia::SkippedTokens(_, _)
        ));
    }
}
