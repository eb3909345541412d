//! The wave object (§3, component D): owns the level queues and the
//! ordered list `L`, and holds the counters and configuration that the
//! insert and query engines operate on.

use crate::arena::Arena;
use crate::config::{ConfigError, WaveConfig};
use crate::level_queue::LevelQueue;
use crate::list::OrderedList;

/// A single wave: the unit the engine operates on. Hosting waves behind
/// string keys is left to integrators (§1); this type is the "wave
/// object" of §3.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Wave {
    pub(crate) config: WaveConfig,
    pub(crate) start: i64,
    pub(crate) last: i64,
    pub(crate) pos: i64,
    pub(crate) total: i64,
    pub(crate) z: i64,
    pub(crate) arena: Arena,
    pub(crate) list: OrderedList,
    pub(crate) level_queues: Vec<LevelQueue>,
}

impl Wave {
    /// Creates a new wave at timestamp `ts` (§4.5/§6 `create`/`wv.incrby`
    /// on a fresh key). `start` and `last` are both set to `ts`, `pos` to
    /// `0`, and `total`/`z` to `0`.
    pub fn create(config: WaveConfig, ts: i64) -> Self {
        tracing::debug!(n = config.n(), eps = config.eps(), r = config.r(), ts, "wave created");
        let levels = config.levels();
        Self {
            config,
            start: ts,
            last: ts,
            pos: 0,
            total: 0,
            z: 0,
            arena: Arena::new(),
            list: OrderedList::new(),
            level_queues: vec![LevelQueue::new(); levels],
        }
    }

    pub fn config(&self) -> &WaveConfig {
        &self.config
    }

    pub fn start(&self) -> i64 {
        self.start
    }

    pub fn last(&self) -> i64 {
        self.last
    }

    pub fn pos(&self) -> i64 {
        self.pos
    }

    /// The raw running `total`, modulo `M` (§6 `wv.total`).
    pub fn total(&self) -> i64 {
        self.total
    }

    pub fn z(&self) -> i64 {
        self.z
    }

    /// Updates the `expire` flag in place, without touching `L`, the
    /// level queues, or any counter (§6: "If `expire` is explicit at
    /// argc=4, the wave's `expire` field is updated").
    pub fn set_expire(&mut self, expire: bool) {
        self.config.set_expire(expire);
    }

    /// Number of live triples currently held in `L` (and, in aggregate,
    /// across all level queues, per I1).
    pub fn live_triples(&self) -> usize {
        self.list.len()
    }

    /// Current length of level queue `j`, for invariant checks (I5) and
    /// diagnostics. Panics if `j >= self.config().levels()`.
    pub fn level_queue_len(&self, j: usize) -> usize {
        self.level_queues[j].len()
    }

    /// The `pos` field of every live triple in `L`, oldest first. For
    /// invariant checks (I4) and diagnostics; not part of the engine's
    /// own algorithms.
    pub fn live_triple_positions(&self) -> Vec<i64> {
        self.list
            .iter_forward(&self.arena)
            .map(|(_, triple)| triple.pos)
            .collect()
    }

    /// Purges `L` and every level queue and zeroes the counters, keeping
    /// `(N, ε, R, expire)` (§4.5 `reset`).
    pub fn reset(&mut self, now: i64) {
        tracing::debug!(ts = now, "wave reset");
        self.arena.clear();
        self.list.clear();
        for queue in &mut self.level_queues {
            queue.clear();
        }
        self.start = now;
        self.last = now;
        self.pos = 0;
        self.total = 0;
        self.z = 0;
    }

    /// Purges `L` and every level queue and overwrites `(N, ε, R)`,
    /// keeping `expire` (§4.5 `resize`). Counters are kept, but per
    /// §4.5 their meaning against the new geometry is
    /// implementation-defined; callers should treat resize as a
    /// semantic reset, which is why this also re-bases `start`/`last`
    /// to `now` and zeroes `pos`/`total`/`z` (the only reading of
    /// "kept but implementation-defined" that preserves I1–I6 against
    /// the new `M`/level count).
    pub fn resize(&mut self, n: i64, eps: f64, r: i64, now: i64) -> Result<(), ConfigError> {
        let expire = self.config.expire();
        let new_config = WaveConfig::new(n, eps, r, expire)?;
        tracing::debug!(n, eps, r, ts = now, "wave resized");
        self.config = new_config;
        self.arena.clear();
        self.list.clear();
        self.level_queues = vec![LevelQueue::new(); new_config.levels()];
        self.start = now;
        self.last = now;
        self.pos = 0;
        self.total = 0;
        self.z = 0;
        Ok(())
    }
}
