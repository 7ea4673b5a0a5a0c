use crate::error::AllocationError;
use std::mem;
use std::ops::{Index, IndexMut};

/// A slot of the pool. Vacant slots form a singly-linked free list.
pub(crate) struct Slot<Node> {
    generation: u32,
    entry: Entry<Node>,
}

enum Entry<Node> {
    Occupied(Node),
    Vacant { next_free: Option<usize> },
}

impl<Node> Slot<Node> {
    /// Get a mutable reference to the node, if the slot is occupied
    pub(crate) fn node_mut(&mut self) -> Option<&mut Node> {
        match &mut self.entry {
            Entry::Occupied(node) => Some(node),
            Entry::Vacant { .. } => None,
        }
    }
}

/// Generation of a slot that has been reused so often its counter would wrap. It is never
/// handed out again, so a stale handle can't match a later node.
const RETIRED: u32 = u32::MAX;

/// Allocates nodes out of a growable block of slots. Released slots are recycled before the
/// block grows, and every release bumps the slot's generation so old handles stop matching.
pub(crate) struct NodePool<Node> {
    slots: Vec<Slot<Node>>,
    free: Option<usize>,
    live: usize,
    retired: usize,
}

impl<Node> NodePool<Node> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: None,
            live: 0,
            retired: 0,
        }
    }

    /// Reserves room for `additional` more nodes without touching any occupied slot.
    pub(crate) fn reserve(&mut self, additional: usize) -> Result<(), AllocationError> {
        let vacant = self.slots.len() - self.live - self.retired;
        if additional <= vacant {
            return Ok(());
        }
        let requested = additional - vacant;
        self.slots
            .try_reserve(requested)
            .map_err(|source| AllocationError { requested, source })
    }

    /// Stores `node`, returning its slot index and generation.
    pub(crate) fn allocate(&mut self, node: Node) -> Result<(usize, u32), AllocationError> {
        if let Some(index) = self.free {
            let slot = &mut self.slots[index];
            match mem::replace(&mut slot.entry, Entry::Occupied(node)) {
                Entry::Vacant { next_free } => self.free = next_free,
                Entry::Occupied(_) => unreachable!("free list points at occupied slot {index}"),
            }
            self.live += 1;
            return Ok((index, slot.generation));
        }

        // there aren't any freed slots. grow the block
        self.reserve(1)?;
        let index = self.slots.len();
        self.slots.push(Slot {
            generation: 0,
            entry: Entry::Occupied(node),
        });
        self.live += 1;
        Ok((index, 0))
    }

    /// Releases the slot at `index`, handing back its node.
    pub(crate) fn release(&mut self, index: usize) -> Option<Node> {
        let slot = self.slots.get_mut(index)?;
        if let Entry::Vacant { .. } = slot.entry {
            return None;
        }
        slot.generation += 1;
        let next_free = if slot.generation == RETIRED {
            self.retired += 1;
            None
        } else {
            let next_free = self.free;
            self.free = Some(index);
            next_free
        };
        let entry = mem::replace(&mut slot.entry, Entry::Vacant { next_free });
        self.live -= 1;
        match entry {
            Entry::Occupied(node) => Some(node),
            Entry::Vacant { .. } => None,
        }
    }

    /// Returns true if `index` is occupied and still carries `generation`.
    pub(crate) fn is_live(&self, index: usize, generation: u32) -> bool {
        self.slots.get(index).is_some_and(|slot| {
            slot.generation == generation && matches!(slot.entry, Entry::Occupied(_))
        })
    }

    /// The current generation of the slot at `index`
    pub(crate) fn generation(&self, index: usize) -> Option<u32> {
        self.slots.get(index).map(|slot| slot.generation)
    }

    /// Number of occupied slots
    pub(crate) fn len(&self) -> usize {
        self.live
    }

    /// Number of slots, occupied or not
    #[cfg(test)]
    pub(crate) fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Number of slots the pool can hold before it has to grow
    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Drops every node. Slots are kept for reuse and their generations move on, so no handle
    /// issued before the clear matches afterwards. Slots that reach `RETIRED` stay out of use.
    pub(crate) fn clear(&mut self) {
        let mut next_free = None;
        let mut retired = 0;
        for (index, slot) in self.slots.iter_mut().enumerate().rev() {
            if let Entry::Occupied(_) = slot.entry {
                slot.generation += 1;
            }
            if slot.generation == RETIRED {
                slot.entry = Entry::Vacant { next_free: None };
                retired += 1;
            } else {
                slot.entry = Entry::Vacant { next_free };
                next_free = Some(index);
            }
        }
        self.free = next_free;
        self.live = 0;
        self.retired = retired;
    }

    /// Raw pointer to the first slot, for iterators handing out disjoint mutable references.
    pub(crate) fn as_mut_ptr(&mut self) -> *mut Slot<Node> {
        self.slots.as_mut_ptr()
    }
}

impl<Node> Default for NodePool<Node> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Node> Index<usize> for NodePool<Node> {
    type Output = Node;

    fn index(&self, index: usize) -> &Node {
        match &self.slots[index].entry {
            Entry::Occupied(node) => node,
            Entry::Vacant { .. } => unreachable!("slot {index} is vacant"),
        }
    }
}

impl<Node> IndexMut<usize> for NodePool<Node> {
    fn index_mut(&mut self, index: usize) -> &mut Node {
        match &mut self.slots[index].entry {
            Entry::Occupied(node) => node,
            Entry::Vacant { .. } => unreachable!("slot {index} is vacant"),
        }
    }
}
