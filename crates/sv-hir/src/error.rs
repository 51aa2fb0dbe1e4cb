//! The one error type that is allowed to unwind out of a [`Compilation`](crate::compilation::Compilation).
//!
//! Every other failure mode in this crate — an unknown name, a duplicate
//! declaration, a constant-evaluation failure, an iteration-cap overrun —
//! is represented as data (a diagnostic plus a placeholder symbol) rather
//! than as a `Result::Err`. `InternalError` is reserved for bugs: violated
//! invariants that indicate this crate itself is broken, not that the input
//! SystemVerilog was bad.
use thiserror::Error;

/// A violated internal invariant, fatal to the whole [`Compilation`](crate::compilation::Compilation).
#[derive(Debug, Error)]
pub enum InternalError {
    /// A scope's owner was queried before it was assigned.
    #[error("scope has no owner symbol")]
    UnboundScopeOwner,
    /// `Compilation::finalize_root` was called more than once.
    #[error("root symbol was already finalized for this compilation")]
    RootAlreadyFinalized,
    /// `ElaborationConfig`'s iteration cap was constructed below the
    /// implementation-defined floor (2^16).
    #[error("iteration cap {0} is below the minimum of 65536")]
    IterationCapTooLow(u32),
}
