//! Short-lived scratch buffers for recognizer frames.
//!
//! A recognizer like [`parse_separated_list`](crate::list::parse_separated_list)
//! needs a growable buffer to accumulate items while it parses, but that
//! buffer never outlives the call: once the list is closed its contents are
//! copied into an arena-owned slice and the scratch buffer is free for the
//! next recognizer. [`ScratchPools`] hands out one free-listed `Vec` per
//! element type and takes it back automatically when the checkout is
//! dropped, so a frame that returns early on an error path still releases
//! its buffer.
use std::cell::RefCell;
use std::ops::{Deref, DerefMut};

use crate::arena::TokenOrSyntax;
use crate::kind::Kind;
use crate::token::{Token, Trivia};

/// A single pool of reusable, emptied `Vec<T>` buffers.
#[derive(Debug)]
struct Pool<T> {
    free: RefCell<Vec<Vec<T>>>,
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Self {
            free: RefCell::new(Vec::new()),
        }
    }
}

impl<T> Pool<T> {
    fn checkout(&self) -> Vec<T> {
        self.free.borrow_mut().pop().unwrap_or_default()
    }

    fn restore(&self, mut buf: Vec<T>) {
        buf.clear();
        self.free.borrow_mut().push(buf);
    }
}

/// The typed scratch pools one parsing frame draws from: one free-list per
/// element type the parser base's recognizers need a growable buffer of.
#[derive(Debug)]
pub struct ScratchPools<'a, K: Kind> {
    trivia: Pool<Trivia<'a, K>>,
    tokens: Pool<Token<'a, K>>,
    elements: Pool<TokenOrSyntax<'a, K>>,
}

impl<'a, K: Kind> Default for ScratchPools<'a, K> {
    fn default() -> Self {
        Self {
            trivia: Pool::default(),
            tokens: Pool::default(),
            elements: Pool::default(),
        }
    }
}

impl<'a, K: Kind> ScratchPools<'a, K> {
    /// Creates a new, empty set of scratch pools.
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks out a scratch buffer of [`Trivia`] values.
    pub fn trivia(&self) -> PooledVec<'_, Trivia<'a, K>> {
        PooledVec::new(&self.trivia)
    }

    /// Checks out a scratch buffer of [`Token`] values.
    pub fn tokens(&self) -> PooledVec<'_, Token<'a, K>> {
        PooledVec::new(&self.tokens)
    }

    /// Checks out a scratch buffer of [`TokenOrSyntax`] values, the element
    /// type of a separated-list recognizer's accumulator.
    pub fn elements(&self) -> PooledVec<'_, TokenOrSyntax<'a, K>> {
        PooledVec::new(&self.elements)
    }
}

/// An RAII checkout of a scratch buffer: derefs to `Vec<T>`, and returns the
/// (cleared) buffer to its pool on drop, on every exit path including an
/// early return or a panic unwind.
pub struct PooledVec<'p, T> {
    pool: &'p Pool<T>,
    buf: Option<Vec<T>>,
}

impl<'p, T> PooledVec<'p, T> {
    fn new(pool: &'p Pool<T>) -> Self {
        Self {
            pool,
            buf: Some(pool.checkout()),
        }
    }
}

impl<T> Deref for PooledVec<'_, T> {
    type Target = Vec<T>;

    fn deref(&self) -> &Self::Target {
        self.buf.as_ref().expect("buffer checked out for lifetime of PooledVec")
    }
}

impl<T> DerefMut for PooledVec<'_, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.buf.as_mut().expect("buffer checked out for lifetime of PooledVec")
    }
}

impl<T> Drop for PooledVec<'_, T> {
    fn drop(&mut self) {
        if let Some(buf) = self.buf.take() {
            self.pool.restore(buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::kind::DemoKind;

    #[test]
    fn checkout_is_empty_and_restored_on_drop() {
        let pools: ScratchPools<'_, DemoKind> = ScratchPools::new();
        {
            let mut buf = pools.elements();
            assert_eq!(buf.len(), 0);
            buf.push(TokenOrSyntax::Token(Token::new(
                DemoKind::Ident,
                sv_diagnostics::Span::new(0, 1),
                "a",
                &[],
            )));
        }
        // The buffer above was restored empty; a fresh checkout reuses the
        // same allocation rather than growing a new one.
        let buf = pools.elements();
        assert_eq!(buf.len(), 0);
    }
}
