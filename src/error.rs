//! Error taxonomy (§7).
//!
//! [`WaveError`] is the engine-local error type: the only failures that
//! can originate inside [`crate::Wave`] itself. [`CommandError`] is the
//! broader taxonomy a host's key/value store, wire layer, and dispatcher
//! would surface around a wave; it is defined here so integrators have a
//! stable contract to target, and is the error type returned by
//! [`crate::ops`], which is this crate's reference implementation of the
//! host-facing call surface.

use thiserror::Error;

/// Errors the wave engine itself can raise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WaveError {
    /// `incr` was called with a value greater than the wave's configured
    /// `R`. The host is expected to reject this before calling the
    /// engine, but the engine checks it too since it is a precondition
    /// of `incr` (§4.4).
    #[error("increment {incr} exceeds configured bound {bound}")]
    TooBig {
        /// The rejected increment.
        incr: i64,
        /// The configured bound `R`.
        bound: i64,
    },
    /// Allocating a new triple failed. In this implementation the arena
    /// grows on the heap, so this can only occur if the process is
    /// genuinely out of memory.
    #[error("allocation failed")]
    Oom,
    /// An invariant that should be impossible to violate was violated
    /// (e.g. a level index computed out of range, or a cross-reference
    /// between the list and a level queue that could not be resolved).
    /// This is a bug, not a data error; it is not meant to be handled.
    #[error("internal invariant violated: {0}")]
    Internal(&'static str),
}

/// The full error taxonomy named by §6/§7 for the host-facing command
/// surface (`wv.incrby`, `wv.get`, `wv.total`, `wv.reset`, `wv.debug`).
///
/// `Syntax`, `WrongType`, and `NoKey` are raised by [`crate::ops`]'s own
/// simulation of argument parsing and key lookup; a real host's wire
/// layer and key/value store would raise the equivalents before ever
/// reaching the wave engine. They are included here so that this enum is
/// the single stable error contract a host integration can match on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// Argument count, type, or range was invalid.
    #[error("syntax error: {0}")]
    Syntax(String),
    /// The key exists but does not hold a wave.
    #[error("wrong type: key does not hold a wave")]
    WrongType,
    /// The key does not exist.
    #[error("no such key")]
    NoKey,
    /// `incr` exceeded the configured bound `R`.
    #[error("incr exceeds R")]
    TooBig,
    /// Allocation failed.
    #[error("out of memory")]
    Oom,
    /// An engine invariant was violated.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<WaveError> for CommandError {
    fn from(err: WaveError) -> Self {
        match err {
            WaveError::TooBig { .. } => CommandError::TooBig,
            WaveError::Oom => CommandError::Oom,
            WaveError::Internal(msg) => CommandError::Internal(msg.to_string()),
        }
    }
}
