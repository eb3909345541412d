//! Admin ops (§4.6/§6, component H): `debug`.
//!
//! `create`, `reset`, and `resize` live on [`crate::wave::Wave`] directly
//! (`wave.rs`) since they are constructors/mutators of the wave object
//! itself; `debug` is a read-only reporting op over the same state and is
//! kept separate from that mutating core.

use crate::wave::Wave;

impl Wave {
    /// Produces human-readable lines describing the wave's configuration
    /// and, if `show_lists` is set, the contents of `L` and every level
    /// queue (§4.6). Has no effect on state.
    pub fn debug(&self, show_lists: bool) -> Vec<String> {
        let mut lines = Vec::new();
        lines.push(format!(
            "N={} eps={} R={} expire={} M={} levels={} level_cap={}",
            self.config.n(),
            self.config.eps(),
            self.config.r(),
            self.config.expire(),
            self.config.modulus(),
            self.config.levels(),
            self.config.level_cap(),
        ));
        lines.push(format!(
            "start={} last={} pos={} total={} z={} live={}",
            self.start,
            self.last,
            self.pos,
            self.total,
            self.z,
            self.live_triples(),
        ));

        if !show_lists {
            return lines;
        }

        lines.push(format!("L ({} entries, head..tail):", self.list.len()));
        for (_, triple) in self.list.iter_forward(&self.arena) {
            lines.push(format!(
                "  (pos={}, v={}, z={})",
                triple.pos, triple.v, triple.z
            ));
        }

        for (j, queue) in self.level_queues.iter().enumerate() {
            lines.push(format!("l[{j}] ({} entries, head..tail):", queue.len()));
            let mut next = queue.head();
            while let Some(id) = next {
                let Some(node) = self.arena.get(id) else {
                    break;
                };
                lines.push(format!(
                    "  (pos={}, v={}, z={})",
                    node.triple.pos, node.triple.v, node.triple.z
                ));
                next = node.level_next;
            }
        }

        lines
    }
}
