//! Reference host-contract layer (§6, ambient; not part of the core
//! engine, but documents the call surface a real key/value store, wire
//! layer, and command dispatcher would sit on top of).
//!
//! [`WaveStore`] is a minimal in-memory map from string keys to [`Wave`]s.
//! It exists so this crate's test suite can exercise the full `wv.incrby` / `wv.get` /
//! `wv.total` / `wv.reset` / `wv.debug` surface end to end; a real
//! integration would replace it with its own keyspace, its own wire
//! encoding, and its own expiry clock, but the argument-clamping and
//! resize-triggering rules below are the engine-facing contract such an
//! integration must reproduce.

use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::CommandError;
use crate::sizing;
use crate::wave::Wave;
use crate::WaveConfig;

const DEFAULT_N: i64 = 60;
const DEFAULT_EPS: f64 = 0.05;

struct Entry {
    wave: Wave,
    expires_at_ms: Option<i64>,
}

/// An in-memory reference implementation of the host's keyed wave store.
#[derive(Default)]
pub struct WaveStore {
    waves: HashMap<String, Entry>,
}

/// Arguments to [`WaveStore::incrby`], mirroring `wv.incrby`'s argc-level
/// optionality (§6): omitted fields fall back to the wave's existing
/// configuration, or the documented defaults for a brand new key.
#[derive(Debug, Clone, Copy, Default)]
pub struct IncrArgs {
    pub incr: i64,
    pub ts: i64,
    pub expire: Option<bool>,
    pub n: Option<i64>,
    pub eps: Option<f64>,
    pub r: Option<i64>,
}

impl WaveStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// `wv.incrby` (§6): creates the wave on first use, resizes it if the
    /// caller supplied geometry that differs from what is already
    /// stored, applies the increment, and returns `get(ts, fast=false)`.
    pub fn incrby(&mut self, key: &str, args: IncrArgs) -> Result<i64, CommandError> {
        if args.incr < 0 {
            return Err(CommandError::Syntax("incr must be >= 0".into()));
        }
        if args.ts < 0 {
            return Err(CommandError::Syntax("ts must be >= 0".into()));
        }
        if let Some(n) = args.n {
            if n < 0 && n != -1 {
                return Err(CommandError::Syntax("N must be > 0 or -1".into()));
            }
        }
        if let Some(r) = args.r {
            if r < -1 {
                return Err(CommandError::Syntax("R must be > 0 or -1".into()));
            }
        }
        if let Some(eps) = args.eps {
            if !(eps > 0.0 && eps < 1.0) {
                return Err(CommandError::Syntax("epsilon must be in (0, 1)".into()));
            }
        }

        let ts = if args.ts == 0 { now_seconds() } else { args.ts };

        let requested_n = match args.n {
            Some(-1) | None => None,
            Some(n) => Some(n),
        };
        let requested_r = match args.r {
            Some(-1) | None => None,
            Some(r) => Some(r),
        };
        let requested_eps = args.eps;

        if !self.waves.contains_key(key) {
            let n = requested_n.unwrap_or(DEFAULT_N);
            let eps = requested_eps.unwrap_or(DEFAULT_EPS);
            let r = requested_r.unwrap_or_else(|| sizing::max_increment(n));
            let expire = args.expire.unwrap_or(false);
            let config = WaveConfig::new(n, eps, r, expire)
                .map_err(|e| CommandError::Syntax(e.to_string()))?;
            if args.incr > config.r() {
                return Err(CommandError::TooBig);
            }
            tracing::debug!(key, n, eps, r, ts, "creating wave for key");
            let wave = Wave::create(config, ts);
            self.waves.insert(
                key.to_string(),
                Entry {
                    wave,
                    expires_at_ms: None,
                },
            );
        } else {
            let entry = self.waves.get_mut(key).expect("checked above");
            let config = entry.wave.config();
            let differs = requested_n.is_some_and(|n| n != config.n())
                || requested_eps.is_some_and(|e| e != config.eps())
                || requested_r.is_some_and(|r| r != config.r());
            if differs {
                let n = requested_n.unwrap_or(config.n());
                let eps = requested_eps.unwrap_or(config.eps());
                let r = requested_r.unwrap_or(config.r());
                entry
                    .wave
                    .resize(n, eps, r, ts)
                    .map_err(|e| CommandError::Syntax(e.to_string()))?;
            }
            if let Some(expire) = args.expire {
                entry.wave.set_expire(expire);
            }
        }

        let entry = self.waves.get_mut(key).expect("just inserted or present");
        if args.incr > entry.wave.config().r() {
            return Err(CommandError::TooBig);
        }
        if args.incr > 0 {
            entry.wave.incr(args.incr, ts)?;
        }
        if entry.wave.config().expire() {
            entry.expires_at_ms = Some((entry.wave.last() + entry.wave.config().n() + 1) * 1000);
        }
        Ok(entry.wave.get(ts, false))
    }

    /// `wv.get` (§6).
    pub fn get(&self, key: &str, ts: i64, fast: bool) -> Result<i64, CommandError> {
        let entry = self.waves.get(key).ok_or(CommandError::NoKey)?;
        let ts = if ts == 0 { now_seconds() } else { ts };
        Ok(entry.wave.get(ts, fast))
    }

    /// `wv.total` (§6): the raw running `total`, bypassing query
    /// resolution entirely.
    pub fn total(&self, key: &str) -> Result<i64, CommandError> {
        Ok(self.waves.get(key).ok_or(CommandError::NoKey)?.wave.total())
    }

    /// `wv.reset` (§6): resets every existing key in `keys`, returning how
    /// many were found. Missing keys are silently skipped, matching the
    /// table's lack of a `NoKey` error for this op.
    pub fn reset(&mut self, keys: &[&str], now: i64) -> usize {
        let now = if now == 0 { now_seconds() } else { now };
        let mut count = 0;
        for key in keys {
            if let Some(entry) = self.waves.get_mut(*key) {
                entry.wave.reset(now);
                entry.expires_at_ms = None;
                count += 1;
            }
        }
        count
    }

    /// `wv.debug` (§6).
    pub fn debug(&self, key: &str, show_lists: bool) -> Result<Vec<String>, CommandError> {
        Ok(self
            .waves
            .get(key)
            .ok_or(CommandError::NoKey)?
            .wave
            .debug(show_lists))
    }

    /// The host-side auto-expire TTL set for `key`, if `expire=yes` is in
    /// effect (§6 "Auto-expire semantics"). Exposed only so tests can
    /// observe the contract; a real host would drive its own key-expiry
    /// clock from this value instead of reading it back.
    pub fn expires_at_ms(&self, key: &str) -> Option<i64> {
        self.waves.get(key).and_then(|e| e.expires_at_ms)
    }
}

fn now_seconds() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incrby_creates_wave_with_defaults() {
        let mut store = WaveStore::new();
        let total = store
            .incrby(
                "k",
                IncrArgs {
                    incr: 5,
                    ts: 1000,
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(total, 5);
        assert_eq!(store.total("k").unwrap(), 5);
    }

    #[test]
    fn incrby_rejects_too_big() {
        let mut store = WaveStore::new();
        let err = store
            .incrby(
                "k",
                IncrArgs {
                    incr: 5,
                    ts: 1000,
                    r: Some(4),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert_eq!(err, CommandError::TooBig);
    }

    #[test]
    fn get_on_missing_key_is_no_key() {
        let store = WaveStore::new();
        assert_eq!(store.get("missing", 1000, false).unwrap_err(), CommandError::NoKey);
    }

    #[test]
    fn differing_geometry_triggers_resize() {
        let mut store = WaveStore::new();
        store
            .incrby(
                "k",
                IncrArgs {
                    incr: 5,
                    ts: 1000,
                    n: Some(60),
                    ..Default::default()
                },
            )
            .unwrap();
        store
            .incrby(
                "k",
                IncrArgs {
                    incr: 1,
                    ts: 1001,
                    n: Some(120),
                    ..Default::default()
                },
            )
            .unwrap();
        // resize treats the change as a semantic reset (§4.5): only the
        // second increment survives.
        assert_eq!(store.total("k").unwrap(), 1);
    }

    #[test]
    fn reset_counts_only_existing_keys() {
        let mut store = WaveStore::new();
        store
            .incrby(
                "a",
                IncrArgs {
                    incr: 1,
                    ts: 1000,
                    ..Default::default()
                },
            )
            .unwrap();
        let count = store.reset(&["a", "missing"], 2000);
        assert_eq!(count, 1);
        assert_eq!(store.get("a", 2000, false).unwrap(), 0);
    }

    #[test]
    fn expire_yes_sets_ttl() {
        let mut store = WaveStore::new();
        store
            .incrby(
                "k",
                IncrArgs {
                    incr: 1,
                    ts: 1000,
                    n: Some(60),
                    expire: Some(true),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(store.expires_at_ms("k"), Some((1000 + 60 + 1) * 1000));
    }
}
