//! Level queues `l[0..L-1]` (§3, component B): per-level bounded
//! sequences of triples, newest at head, oldest at tail, capped at
//! [`crate::sizing::level_cap`].
//!
//! As with [`crate::list::OrderedList`], a `LevelQueue` only tracks
//! head/tail identity; the links themselves live on the arena node's
//! `level_prev`/`level_next` fields, since a triple's `L`-links and
//! level-queue-links must coexist on the same node without aliasing
//! (§9).

use crate::arena::Arena;
use crate::triple::TripleId;

#[derive(Debug, Default, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub(crate) struct LevelQueue {
    head: Option<TripleId>,
    tail: Option<TripleId>,
    len: usize,
}

impl LevelQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn head(&self) -> Option<TripleId> {
        self.head
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Inserts `id` at the head (newest position). The caller is
    /// responsible for evicting a tail triple first if the queue is at
    /// capacity (§4.4 step 5 runs before step 6).
    pub fn push_head(&mut self, arena: &mut Arena, id: TripleId) {
        let old_head = self.head;
        if let Some(old_head) = old_head {
            arena.get_mut(old_head).expect("head must be live").level_prev = Some(id);
        }
        {
            let node = arena.get_mut(id).expect("inserted node must be live");
            node.level_next = old_head;
            node.level_prev = None;
        }
        self.head = Some(id);
        if self.tail.is_none() {
            self.tail = Some(id);
        }
        self.len += 1;
    }

    /// Unlinks `id` from this level queue, wherever it sits.
    pub fn remove(&mut self, arena: &mut Arena, id: TripleId) {
        let (prev, next) = match arena.get(id) {
            Some(node) => (node.level_prev, node.level_next),
            None => return,
        };
        match prev {
            Some(prev_id) => {
                arena.get_mut(prev_id).expect("prev must be live").level_next = next
            }
            None => self.head = next,
        }
        match next {
            Some(next_id) => {
                arena.get_mut(next_id).expect("next must be live").level_prev = prev
            }
            None => self.tail = prev,
        }
        self.len -= 1;
    }

    /// Removes and returns the current tail (oldest) triple's id.
    pub fn pop_tail(&mut self, arena: &mut Arena) -> Option<TripleId> {
        let tail = self.tail?;
        self.remove(arena, tail);
        Some(tail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::triple::Triple;

    #[test]
    fn push_head_and_pop_tail_order() {
        let mut arena = Arena::new();
        let mut queue = LevelQueue::new();
        let a = arena.try_insert(Triple::new(0, 1, 0), 0).unwrap();
        let b = arena.try_insert(Triple::new(1, 1, 1), 0).unwrap();
        queue.push_head(&mut arena, a);
        queue.push_head(&mut arena, b);
        assert_eq!(queue.len(), 2);
        let tail = queue.pop_tail(&mut arena).unwrap();
        assert_eq!(tail, a);
        assert_eq!(queue.len(), 1);
    }
}
