//! Source spans and diagnostics shared across the `svfront` crates.
//!
//! This crate owns the types every other crate in the workspace builds on:
//! [`Span`] for source locations and [`Diagnostic`] for the append-only
//! records the parser and elaborator emit. Nothing here knows how to render a
//! diagnostic to a terminal or a JSON document — that is left to an embedder,
//! the same way the concrete grammar and the diagnostics-formatting layer are
//! left out of this workspace entirely.

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(rust_2021_compatibility)]
#![warn(missing_debug_implementations)]

use std::cmp::Ordering;
use std::fmt;
use std::ops::Range;

/// A half-open byte range `[start, end)` into a single UTF-8 source buffer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    /// Creates a new span from a start offset and a length.
    pub const fn new(start: usize, len: usize) -> Self {
        Self {
            start,
            end: start + len,
        }
    }

    /// Creates a zero-length span at the given offset.
    pub const fn empty(at: usize) -> Self {
        Self { start: at, end: at }
    }

    /// Gets the start offset of the span.
    pub const fn start(&self) -> usize {
        self.start
    }

    /// Gets the noninclusive end offset of the span.
    pub const fn end(&self) -> usize {
        self.end
    }

    /// Gets the length of the span.
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Determines if the span is empty.
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Determines if the span contains the given offset.
    pub const fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end
    }

    /// Calculates the intersection of two spans, if one exists.
    ///
    /// Adjacent spans intersect in a zero-length span; disjoint spans return
    /// `None`.
    pub fn intersect(self, other: Self) -> Option<Self> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        if end < start {
            return None;
        }

        Some(Self { start, end })
    }

    /// Extends this span to also cover `other`.
    pub fn to(self, other: Self) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl From<Range<usize>> for Span {
    fn from(value: Range<usize>) -> Self {
        Self::new(value.start, value.end - value.start)
    }
}

impl From<Span> for Range<usize> {
    fn from(value: Span) -> Self {
        value.start..value.end
    }
}

/// The severity of a [`Diagnostic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Severity {
    /// A hard error: the tree or symbol graph is incomplete at this point.
    Error,
    /// A warning: the tree and symbol graph are complete, but the input is
    /// suspicious.
    Warning,
    /// An informational note, usually attached as a secondary label.
    Note,
}

impl Severity {
    /// Returns `true` if the severity is [`Severity::Error`].
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }
}

/// A labeled secondary span attached to a [`Diagnostic`].
///
/// The first label added to a diagnostic is its primary label.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Label {
    message: String,
    span: Span,
}

impl Label {
    /// Creates a new label with the given message and span.
    pub fn new(message: impl Into<String>, span: impl Into<Span>) -> Self {
        Self {
            message: message.into(),
            span: span.into(),
        }
    }

    /// Gets the message of the label.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Gets the span of the label.
    pub fn span(&self) -> Span {
        self.span
    }

    /// Sets the span of the label.
    pub fn set_span(&mut self, span: impl Into<Span>) {
        self.span = span.into();
    }
}

impl Ord for Label {
    fn cmp(&self, other: &Self) -> Ordering {
        self.span
            .cmp(&other.span)
            .then_with(|| self.message.cmp(&other.message))
    }
}

impl PartialOrd for Label {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A `{code, location, arguments}` diagnostic record, as described by the
/// diagnostics sink contract.
///
/// A `Diagnostic` is cheap to build incrementally with the `with_*` builder
/// methods and is always constructed through [`Diagnostic::error`],
/// [`Diagnostic::warning`], or [`Diagnostic::note`].
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Diagnostic {
    code: Option<String>,
    severity: Severity,
    message: String,
    labels: Vec<Label>,
}

impl Diagnostic {
    /// Creates a new error diagnostic with the given message.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            code: None,
            severity: Severity::Error,
            message: message.into(),
            labels: Vec::new(),
        }
    }

    /// Creates a new warning diagnostic with the given message.
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            code: None,
            severity: Severity::Warning,
            message: message.into(),
            labels: Vec::new(),
        }
    }

    /// Creates a new note diagnostic with the given message.
    pub fn note(message: impl Into<String>) -> Self {
        Self {
            code: None,
            severity: Severity::Note,
            message: message.into(),
            labels: Vec::new(),
        }
    }

    /// Sets the stable diagnostic code (e.g. `"expected-token"`,
    /// `"iteration-cap-exceeded"`).
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Adds a label to the diagnostic. The first label added is primary.
    pub fn with_label(mut self, message: impl Into<String>, span: impl Into<Span>) -> Self {
        self.labels.push(Label::new(message, span));
        self
    }

    /// Gets the diagnostic code, if one was set.
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// Gets the severity of the diagnostic.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Gets the message of the diagnostic.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Gets the primary span of the diagnostic, if it has any labels.
    pub fn primary_span(&self) -> Option<Span> {
        self.labels.first().map(Label::span)
    }

    /// Gets the labels of the diagnostic.
    pub fn labels(&self) -> impl Iterator<Item = &Label> {
        self.labels.iter()
    }

    /// Gets the labels of the diagnostic, mutably.
    pub fn labels_mut(&mut self) -> impl Iterator<Item = &mut Label> {
        self.labels.iter_mut()
    }
}

impl Ord for Diagnostic {
    fn cmp(&self, other: &Self) -> Ordering {
        self.primary_span()
            .cmp(&other.primary_span())
            .then_with(|| self.severity.cmp(&other.severity))
            .then_with(|| self.message.cmp(&other.message))
    }
}

impl PartialOrd for Diagnostic {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// An append-only collection of [`Diagnostic`]s.
///
/// `Vec<Diagnostic>` is the canonical implementation; anything that can
/// accept a diagnostic and hand back a mutable reference to it (so a caller
/// may attach further labels) satisfies the contract.
pub trait DiagnosticSink {
    /// Appends `diagnostic` to the sink and returns a mutable reference to
    /// it so the caller may attach additional labels.
    fn report(&mut self, diagnostic: Diagnostic) -> &mut Diagnostic;

    /// Convenience for reporting an error with a single primary label.
    ///
    /// Takes `&str` rather than `impl Into<String>` so the trait stays
    /// usable as `dyn DiagnosticSink` across the parser and elaborator,
    /// which both pass the sink around as a trait object.
    fn error_at(&mut self, message: &str, span: Span) -> &mut Diagnostic {
        self.report(Diagnostic::error(message).with_label(String::new(), span))
    }
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) -> &mut Diagnostic {
        self.push(diagnostic);
        self.last_mut().expect("just pushed")
    }
}
