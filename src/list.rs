//! The ordered list `L` (§3, component C): a doubly-linked list of every
//! live triple, ordered by insertion (head = oldest, tail = newest).
//!
//! `L` does not own triples (the [`crate::arena::Arena`] does); it only
//! holds the head/tail identity, while the links themselves live on the
//! arena node's `list_prev`/`list_next` fields, per §9's index-based
//! reading of the cross-reference.

use crate::arena::Arena;
use crate::triple::TripleId;

#[derive(Debug, Default, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub(crate) struct OrderedList {
    head: Option<TripleId>,
    tail: Option<TripleId>,
    len: usize,
}

impl OrderedList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn head(&self) -> Option<TripleId> {
        self.head
    }

    pub fn tail(&self) -> Option<TripleId> {
        self.tail
    }

    /// Appends `id` at the tail (newest position).
    pub fn push_tail(&mut self, arena: &mut Arena, id: TripleId) {
        let old_tail = self.tail;
        if let Some(old_tail) = old_tail {
            arena.get_mut(old_tail).expect("tail must be live").list_next = Some(id);
        }
        {
            let node = arena.get_mut(id).expect("inserted node must be live");
            node.list_prev = old_tail;
            node.list_next = None;
        }
        self.tail = Some(id);
        if self.head.is_none() {
            self.head = Some(id);
        }
        self.len += 1;
    }

    /// Unlinks `id` from the list, wherever it currently sits. The node
    /// itself is left in the arena for the caller to remove or reuse.
    pub fn remove(&mut self, arena: &mut Arena, id: TripleId) {
        let (prev, next) = match arena.get(id) {
            Some(node) => (node.list_prev, node.list_next),
            None => return,
        };
        match prev {
            Some(prev_id) => arena.get_mut(prev_id).expect("prev must be live").list_next = next,
            None => self.head = next,
        }
        match next {
            Some(next_id) => arena.get_mut(next_id).expect("next must be live").list_prev = prev,
            None => self.tail = prev,
        }
        self.len -= 1;
    }

    /// Removes and returns the current head (oldest) triple's id.
    pub fn pop_head(&mut self, arena: &mut Arena) -> Option<TripleId> {
        let head = self.head?;
        self.remove(arena, head);
        Some(head)
    }

    /// Forward iterator from head (oldest) to tail (newest).
    pub fn iter_forward<'a>(&self, arena: &'a Arena) -> ForwardIter<'a> {
        ForwardIter {
            arena,
            next: self.head,
        }
    }

    /// Backward iterator from tail (newest) to head (oldest).
    pub fn iter_backward<'a>(&self, arena: &'a Arena) -> BackwardIter<'a> {
        BackwardIter {
            arena,
            next: self.tail,
        }
    }
}

pub(crate) struct ForwardIter<'a> {
    arena: &'a Arena,
    next: Option<TripleId>,
}

impl<'a> Iterator for ForwardIter<'a> {
    type Item = (TripleId, crate::triple::Triple);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        let node = self.arena.get(id)?;
        self.next = node.list_next;
        Some((id, node.triple))
    }
}

pub(crate) struct BackwardIter<'a> {
    arena: &'a Arena,
    next: Option<TripleId>,
}

impl<'a> Iterator for BackwardIter<'a> {
    type Item = (TripleId, crate::triple::Triple);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        let node = self.arena.get(id)?;
        self.next = node.list_prev;
        Some((id, node.triple))
    }
}
