//! The query engine (§4.3, component G): `get`.

use crate::triple::Triple;
use crate::wave::Wave;

impl Wave {
    /// Resolves a query at timestamp `ts` (§4.3). Rules are evaluated in
    /// order; the first match returns. `fast` selects the O(1) midpoint
    /// estimate over the O(|L|) exact scan.
    pub fn get(&self, ts: i64, fast: bool) -> i64 {
        // Rule 1 (`wave is null`) has no analogue for a live `&Wave`;
        // `ts == 0` still applies.
        if ts == 0 {
            return 0;
        }
        if ts < self.start {
            return 0;
        }
        if ts <= self.last - self.config.n() {
            return 0;
        }
        if ts >= self.last + self.config.n() {
            return 0;
        }
        if ts == self.last {
            return self.total - self.z;
        }
        if self.list.is_empty() {
            return 0;
        }

        // Rule 7: advance past every triple whose pos has fallen out of
        // the window as of `ts`, stopping at the first that is still in
        // it. `z1` is the wave's own `z` field (the watermark left by the
        // insert engine's own expirations), `z2`/`v2` belong to the
        // effective head found here.
        let threshold = ts - self.config.n();
        let mut effective_head: Option<Triple> = None;
        for (_, triple) in self.list.iter_forward(&self.arena) {
            if triple.pos < threshold {
                continue;
            }
            effective_head = Some(triple);
            break;
        }
        let Some(head) = effective_head else {
            return 0;
        };
        let z1 = self.z;
        let z2 = head.z;
        let v2 = head.v;

        if head.pos == threshold + 1 {
            return self.total - z2 + v2;
        }
        if head.pos == threshold {
            return self.total - z2;
        }
        if ts == self.pos {
            return self.total - self.z;
        }
        if fast {
            return self.total - (z1 + z2 - v2) / 2;
        }

        if ts < self.last {
            let cutoff = (ts - self.start).rem_euclid(self.config.modulus());
            let sum: i64 = self
                .list
                .iter_backward(&self.arena)
                .filter(|(_, t)| t.pos <= cutoff)
                .map(|(_, t)| t.v)
                .sum();
            self.total - sum
        } else {
            let cutoff = (ts - self.start - self.config.n()).rem_euclid(self.config.modulus());
            self.list
                .iter_forward(&self.arena)
                .filter(|(_, t)| t.pos > cutoff)
                .map(|(_, t)| t.v)
                .sum()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WaveConfig;

    fn wave(n: i64, eps: f64, r: i64, ts: i64) -> Wave {
        let config = WaveConfig::new(n, eps, r, false).unwrap();
        Wave::create(config, ts)
    }

    #[test]
    fn s1_fresh_wave_queries_zero() {
        let w = wave(60, 0.05, 1024, 1000);
        assert_eq!(w.get(1000, false), 0);
    }

    #[test]
    fn s2_single_increment_is_exact() {
        let mut w = wave(60, 0.05, 1024, 1000);
        w.incr(5, 1000).unwrap();
        assert_eq!(w.get(1000, false), 5);
        assert_eq!(w.total(), 5);
    }

    #[test]
    fn s3_three_increments_then_far_future_query() {
        let mut w = wave(60, 0.05, 1024, 1000);
        w.incr(5, 1000).unwrap();
        w.incr(3, 1001).unwrap();
        w.incr(7, 1002).unwrap();
        assert_eq!(w.get(1002, false), 15);
        // last=1002, N=60: 1030 < last+N=1062 and 1030 > last, so rule 4
        // does not fire; rule 3 (ts <= last-N = 942) doesn't fire either.
        // Rule 7's walk still runs: threshold = 1030 - 60 = 970, and
        // every live triple has pos in {0, 1, 2}, all below threshold,
        // so no effective head is found and the window is empty.
        assert_eq!(w.get(1030, false), 0);
    }

    #[test]
    fn s4_expired_item_drops_out_of_exact_sum() {
        let mut w = wave(3, 0.5, 10, 100);
        w.incr(1, 100).unwrap();
        w.incr(2, 101).unwrap();
        w.incr(3, 102).unwrap();
        w.incr(4, 103).unwrap();
        assert_eq!(w.get(103, false), 2 + 3 + 4);
        assert_eq!(w.z(), 1);
    }

    #[test]
    fn s6_reset_then_query_is_zero() {
        let mut w = wave(60, 0.05, 1024, 1000);
        w.incr(5, 1000).unwrap();
        w.reset(2000);
        assert_eq!(w.get(2000, false), 0);
        assert_eq!(w.live_triples(), 0);
    }

    #[test]
    fn rule_5_exact_at_last() {
        let mut w = wave(60, 0.05, 1024, 1000);
        w.incr(5, 1000).unwrap();
        w.incr(3, 1001).unwrap();
        assert_eq!(w.get(1001, false), w.total() - w.z());
    }

    #[test]
    fn fast_and_slow_agree_when_no_boundary_triple() {
        let mut w = wave(10, 0.2, 50, 0);
        for ts in 0..30 {
            w.incr((ts % 5) + 1, ts).unwrap();
        }
        let slow = w.get(29, false);
        let fast = w.get(29, true);
        // Relative error bound (§4.3): |fast - slow| <= eps * slow when
        // slow > 0.
        if slow != 0 {
            let err = (fast - slow).unsigned_abs() as f64 / slow as f64;
            assert!(err <= 0.2 + 1e-9, "fast={fast} slow={slow} err={err}");
        }
    }

    #[test]
    fn before_start_is_zero() {
        let w = wave(60, 0.05, 1024, 1000);
        assert_eq!(w.get(500, false), 0);
    }

    #[test]
    fn ts_zero_is_always_zero() {
        let mut w = wave(60, 0.05, 1024, 1000);
        w.incr(5, 1000).unwrap();
        assert_eq!(w.get(0, false), 0);
    }
}
