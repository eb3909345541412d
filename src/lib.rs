//! `wave-engine` is a deterministic engine for approximate sliding-window
//! sums over a stream of bounded non-negative integers.
//!
//! Given a stream of `(value, timestamp)` items, a [`Wave`] maintains an
//! answer to "what is the approximate sum of values whose timestamp falls
//! within the last `N` time units" with a caller-chosen relative error
//! `ε`. Insertion ([`Wave::incr`]) and both the fast and slow query paths
//! ([`Wave::get`]) run in bounded time and allocate a fixed amount of
//! memory proportional to `1/ε`.
//!
//! This crate implements only the data structure itself: the triples, the
//! level queues, the chronological list, the level-selection bit trick,
//! and the expiry/eviction rules. Hosting waves behind string keys, wire
//! encoding, and command dispatch are left to integrators; [`ops`]
//! documents the call surface such an integrator would sit on top of.

mod admin;
mod arena;
mod config;
mod error;
mod insert;
mod level_queue;
mod list;
pub mod ops;
mod query;
mod selector;
pub mod sizing;
mod triple;
mod wave;

pub use config::WaveConfig;
pub use error::{CommandError, WaveError};
pub use triple::Triple;
pub use wave::Wave;
