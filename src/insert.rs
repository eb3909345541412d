//! The insert engine (§4.4, component F): `incr`.

use crate::error::WaveError;
use crate::selector::select_level;
use crate::triple::Triple;
use crate::wave::Wave;

impl Wave {
    /// Records an increment of `v` at timestamp `ts` (§4.4).
    ///
    /// Preconditions (enforced by the host before this is called, per
    /// §4.4's "`v > R` is rejected by the host before reaching this
    /// function"): `v > 0`, `ts > 0`, `ts >= start`. This still double
    /// checks `v` against the configured bound defensively, since a
    /// violated precondition here would otherwise corrupt the modular
    /// arithmetic invariants (I6) silently.
    pub fn incr(&mut self, v: i64, ts: i64) -> Result<(), WaveError> {
        if v > self.config.r() {
            return Err(WaveError::TooBig {
                incr: v,
                bound: self.config.r(),
            });
        }

        // Step 1: advance pos only on strictly newer timestamps.
        if ts > self.start && ts > self.last {
            self.pos = (ts - self.start).rem_euclid(self.config.modulus());
            self.last = ts;
        }

        self.expire(self.pos)?;

        // Step 3: choose level for the new triple.
        let level = select_level(self.total, v, self.config.levels());

        // Step 4: accumulate total, kept within [0, M).
        self.total = (self.total + v).rem_euclid(self.config.modulus());

        // Step 5: evict the tail of l[level] first if it is already at
        // capacity, so the post-insert length never exceeds level_cap
        // (I5). Evicting before the push is equivalent to evicting after,
        // since the evicted triple is always the queue's current tail
        // regardless of where the new head lands.
        if self.level_queues[level].len() >= self.config.level_cap() {
            if let Some(evicted) = self.level_queues[level].pop_tail(&mut self.arena) {
                self.list.remove(&mut self.arena, evicted);
                self.arena.remove(evicted);
                tracing::trace!(level, "evicted triple at level capacity");
            }
        }

        // Step 6: insert the new triple.
        let triple = Triple::new(self.pos, v, self.total);
        let id = self
            .arena
            .try_insert(triple, level)
            .map_err(|()| WaveError::Oom)?;
        self.level_queues[level].push_head(&mut self.arena, id);
        self.list.push_tail(&mut self.arena, id);
        tracing::trace!(pos = self.pos, v, level, total = self.total, "triple inserted");

        Ok(())
    }

    /// Step 2: expires every triple at the head of `L` whose `pos` has
    /// fallen out of the window, looping until none remain expired (§9:
    /// "the correct semantics is loop-until-no-expired").
    fn expire(&mut self, pos: i64) -> Result<(), WaveError> {
        let threshold = pos - self.config.n();
        loop {
            let Some(head_id) = self.list.head() else {
                break;
            };
            let head = self
                .arena
                .get(head_id)
                .ok_or(WaveError::Internal("list head missing from arena"))?;
            if head.triple.pos > threshold {
                break;
            }
            let z = head.triple.z;
            let level = head.level;

            self.level_queues[level].remove(&mut self.arena, head_id);
            self.list.remove(&mut self.arena, head_id);
            self.arena.remove(head_id);

            self.z = z;
            tracing::trace!(pos = threshold, level, z, "triple expired");
        }
        Ok(())
    }
}
