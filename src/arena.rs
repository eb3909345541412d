//! Arena storage for triples, resolving the cyclic cross-reference
//! between the ordered list `L` and the level queues (§9 design note).
//!
//! Every live triple occupies one arena slot. The slot carries the
//! triple's value plus the intrusive doubly-linked pointers for both `L`
//! (I1: "every triple in L is in exactly one level queue") and for
//! whichever level queue holds it. Removal is by [`crate::triple::TripleId`]
//! rather than by walking a structure looking for an equal value, which
//! is the Rust-idiomatic reading of the source's "scan and remove by
//! value equality" (triples are unique and immutable, §3, so an arena
//! slot's identity and its value coincide for the triple's entire
//! lifetime).

use crate::triple::{Triple, TripleId};

#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub(crate) struct Node {
    pub triple: Triple,
    pub level: usize,
    pub list_prev: Option<TripleId>,
    pub list_next: Option<TripleId>,
    pub level_prev: Option<TripleId>,
    pub level_next: Option<TripleId>,
    generation: u32,
}

#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
enum Slot {
    Occupied(Node),
    Vacant { next_free: Option<u32>, generation: u32 },
}

/// Growable slot storage for [`Node`]s, indexed by [`TripleId`].
#[derive(Debug, Default, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub(crate) struct Arena {
    slots: Vec<Slot>,
    free_head: Option<u32>,
    len: usize,
}

impl Arena {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_head: None,
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.free_head = None;
        self.len = 0;
    }

    /// Inserts a new triple, reusing a freed slot if one is available.
    ///
    /// Returns `Err(())` if a fresh slot is needed and the allocator
    /// cannot grow the backing storage (§7 `OOM`); a reused slot never
    /// allocates, so eviction-heavy workloads stay allocation-free in
    /// steady state.
    pub fn try_insert(&mut self, triple: Triple, level: usize) -> Result<TripleId, ()> {
        let node = Node {
            triple,
            level,
            list_prev: None,
            list_next: None,
            level_prev: None,
            level_next: None,
            generation: 0,
        };
        match self.free_head {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                let generation = match *slot {
                    Slot::Vacant { next_free, generation } => {
                        self.free_head = next_free;
                        generation
                    }
                    Slot::Occupied(_) => unreachable!("free list points at occupied slot"),
                };
                let mut node = node;
                node.generation = generation;
                *slot = Slot::Occupied(node);
                self.len += 1;
                Ok(TripleId { index, generation })
            }
            None => {
                self.slots.try_reserve(1).map_err(|_| ())?;
                let index = self.slots.len() as u32;
                self.slots.push(Slot::Occupied(node));
                self.len += 1;
                Ok(TripleId { index, generation: 0 })
            }
        }
    }

    pub fn get(&self, id: TripleId) -> Option<&Node> {
        match self.slots.get(id.index as usize) {
            Some(Slot::Occupied(node)) if node.generation == id.generation => Some(node),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, id: TripleId) -> Option<&mut Node> {
        match self.slots.get_mut(id.index as usize) {
            Some(Slot::Occupied(node)) if node.generation == id.generation => Some(node),
            _ => None,
        }
    }

    /// Removes the slot for `id`, returning its node if it was live.
    pub fn remove(&mut self, id: TripleId) -> Option<Node> {
        let slot = self.slots.get_mut(id.index as usize)?;
        match *slot {
            Slot::Occupied(node) if node.generation == id.generation => {
                let next_generation = node.generation.wrapping_add(1);
                *slot = Slot::Vacant {
                    next_free: self.free_head,
                    generation: next_generation,
                };
                self.free_head = Some(id.index);
                self.len -= 1;
                Some(node)
            }
            _ => None,
        }
    }
}
