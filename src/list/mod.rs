use crate::compare::{equals, Comparator};
use crate::error::{AllocationError, InvalidOperation, ListError};
use crate::list::node::ListNode;
use crate::pool::NodePool;
use duplicate::duplicate_item;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use tracing::{trace, warn};

mod handle;
pub mod iter;
mod node;

pub use handle::Handle;
pub use iter::{Handles, IntoIter, Iter, IterMut};

static NEXT_LIST_ID: AtomicU64 = AtomicU64::new(1);

/// The insertion discipline of a list, fixed when the list is created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Elements keep the position they were pushed to
    #[default]
    Arrival,
    /// Elements are expected to be inserted with `insert_by_priority`
    Priority,
}

/// A doubly linked list whose nodes live in an arena and are addressed by `Handle`s.
/// The API is modelled after `std::collections::LinkedList`, with the additions a
/// record store needs: priority-ordered insertion, comparator search and removal by handle.
pub struct List<T> {
    pool: NodePool<ListNode<T>>,
    head: Option<usize>,
    tail: Option<usize>,
    size: usize,
    mode: Mode,
    comparator: Option<Comparator<T>>,
    id: u64,
}

impl<T> List<T> {
    /// Create a new, empty list.
    ///
    /// # Arguments
    ///
    /// `mode`: The insertion discipline
    pub fn new(mode: Mode) -> Self {
        Self {
            pool: NodePool::new(),
            head: None,
            tail: None,
            size: 0,
            mode,
            comparator: None,
            id: NEXT_LIST_ID.fetch_add(1, AtomicOrdering::Relaxed),
        }
    }

    /// Create a new, empty list that `find` searches with `comparator`.
    ///
    /// # Arguments
    ///
    /// `mode`: The insertion discipline
    ///
    /// `comparator`: The comparator used by `find`
    pub fn with_comparator(mode: Mode, comparator: Comparator<T>) -> Self {
        Self {
            comparator: Some(comparator),
            ..Self::new(mode)
        }
    }

    /// Create a new, empty list with room for `capacity` nodes.
    ///
    /// # Arguments
    ///
    /// `mode`: The insertion discipline
    ///
    /// `capacity`: The number of nodes to reserve
    pub fn try_with_capacity(mode: Mode, capacity: usize) -> Result<Self, AllocationError> {
        let mut list = Self::new(mode);
        list.pool.reserve(capacity)?;
        Ok(list)
    }

    /// Create a new, empty arrival-order list
    pub fn arrival() -> Self {
        Self::new(Mode::Arrival)
    }

    /// Create a new, empty priority-ordered list
    pub fn priority() -> Self {
        Self::new(Mode::Priority)
    }

    /// The insertion discipline the list was created with
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Get the list's size
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the number of elements in the list.
    pub fn len(&self) -> usize {
        self.size
    }

    /// If the list is empty or not
    pub fn empty(&self) -> bool {
        self.size == 0
    }

    /// Returns true if the list contains no elements
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of nodes the list can hold without growing its storage
    pub fn capacity(&self) -> usize {
        self.pool.capacity()
    }

    #[duplicate_item(
        front        Self          Value     value;
        [front]      [&Self]       [&T]      [value];
        [front_mut]  [&mut Self]   [&mut T]  [value_mut];
    )]
    /// Get the front value, if any
    ///
    /// # Return
    /// The front value if present, `None` if the list is empty.
    #[allow(clippy::needless_arbitrary_self_type)]
    pub fn front(self: Self) -> Option<Value> {
        match self.head {
            Some(index) => Some(self.pool[index].value()),
            None => None,
        }
    }

    #[duplicate_item(
        back        Self          Value     value;
        [back]      [&Self]       [&T]      [value];
        [back_mut]  [&mut Self]   [&mut T]  [value_mut];
    )]
    /// Get the back value, if any
    ///
    /// # Return
    /// The back value if present, `None` if the list is empty.
    #[allow(clippy::needless_arbitrary_self_type)]
    pub fn back(self: Self) -> Option<Value> {
        match self.tail {
            Some(index) => Some(self.pool[index].value()),
            None => None,
        }
    }

    #[duplicate_item(
        get        Self          Value     value;
        [get]      [&Self]       [&T]      [value];
        [get_mut]  [&mut Self]   [&mut T]  [value_mut];
    )]
    /// Get the value a handle refers to
    ///
    /// # Return
    /// The value if the handle is live in this list, `None` otherwise.
    #[allow(clippy::needless_arbitrary_self_type)]
    pub fn get(self: Self, handle: Handle) -> Option<Value> {
        let index = self.resolve(handle).ok()?;
        Some(self.pool[index].value())
    }

    /// Get the priority a node was inserted with
    ///
    /// # Return
    /// The key passed to `insert_by_priority`, `None` if the node was pushed or the handle is
    /// not live in this list.
    pub fn priority_of(&self, handle: Handle) -> Option<i64> {
        let index = self.resolve(handle).ok()?;
        self.pool[index].priority
    }

    /// Returns true if the handle refers to a node currently linked into this list
    pub fn contains(&self, handle: Handle) -> bool {
        self.resolve(handle).is_ok()
    }

    /// Push a value to the front of the list
    ///
    /// # Arguments
    ///
    /// `value`: The value to push
    pub fn push_front(&mut self, value: T) -> Result<Handle, ListError> {
        let head = self.head;
        self.insert_node(value, None, head)
    }

    /// Push a value to the back of the list
    ///
    /// # Arguments
    ///
    /// `value`: The value to push
    pub fn push_back(&mut self, value: T) -> Result<Handle, ListError> {
        self.insert_node(value, None, None)
    }

    /// Push every value of `iter` to the back of the list
    ///
    /// # Return
    /// The first allocation failure. Values pushed before it stay in the list, the rest of
    /// `iter` is dropped.
    pub fn try_extend<I: IntoIterator<Item = T>>(&mut self, iter: I) -> Result<(), ListError> {
        let iter = iter.into_iter();
        self.pool.reserve(iter.size_hint().0)?;
        for value in iter {
            self.push_back(value)?;
        }
        Ok(())
    }

    /// Insert a value before the first node whose priority is strictly greater than `key`, so
    /// equal keys keep their arrival order. Nodes without a priority never stop the walk. O(n).
    ///
    /// # Arguments
    ///
    /// `value`: The value to insert
    ///
    /// `key`: The ordering key
    pub fn insert_by_priority(&mut self, value: T, key: i64) -> Result<Handle, ListError> {
        let mut next = self.head;
        while let Some(index) = next {
            let node = &self.pool[index];
            if node.sorts_after(key) {
                break;
            }
            next = node.next;
        }
        self.insert_node(value, Some(key), next)
    }

    /// Find the first value the list's comparator judges equal to `key`
    ///
    /// # Return
    /// The handle of the match, `None` if there is none, or `InvalidOperation::MissingComparator`
    /// if the list was created without a comparator.
    pub fn find(&self, key: &T) -> Result<Option<Handle>, ListError> {
        let compare = self
            .comparator
            .ok_or(InvalidOperation::MissingComparator)?;
        Ok(self.find_with(key, compare))
    }

    /// Find the first value `compare` judges equal to `key`
    ///
    /// # Arguments
    ///
    /// `key`: The key to search for
    ///
    /// `compare`: Compares a value of the list against `key`
    pub fn find_with<K: ?Sized, C: FnMut(&T, &K) -> Ordering>(
        &self,
        key: &K,
        mut compare: C,
    ) -> Option<Handle> {
        self.find_by(|value| equals(&mut compare, value, key))
    }

    /// Find the first value matching `predicate`
    pub fn find_by<P: FnMut(&T) -> bool>(&self, mut predicate: P) -> Option<Handle> {
        let mut next = self.head;
        while let Some(index) = next {
            let node = &self.pool[index];
            if predicate(node.value()) {
                return Some(self.handle(index));
            }
            next = node.next;
        }
        None
    }

    /// Removes the node a handle refers to, handing its value back to the caller
    ///
    /// # Arguments
    ///
    /// `handle`: The node to remove
    pub fn remove(&mut self, handle: Handle) -> Result<T, ListError> {
        let index = self.resolve(handle)?;
        Ok(self.remove_node(index))
    }

    /// Removes the node a handle refers to and passes its value to `destructor`
    ///
    /// # Arguments
    ///
    /// `handle`: The node to remove
    ///
    /// `destructor`: Receives the removed value
    pub fn remove_with<D: FnOnce(T)>(
        &mut self,
        handle: Handle,
        destructor: D,
    ) -> Result<(), ListError> {
        destructor(self.remove(handle)?);
        Ok(())
    }

    /// Removes the first element in the list, returning its value
    ///
    /// # Return
    /// The first value if present, `None` if the list is empty.
    pub fn pop_front(&mut self) -> Option<T> {
        let head = self.head?;
        Some(self.remove_node(head))
    }

    /// Removes the last element in the list, returning its value
    ///
    /// # Return
    /// The last value if present, `None` if the list is empty.
    pub fn pop_back(&mut self) -> Option<T> {
        let tail = self.tail?;
        Some(self.remove_node(tail))
    }

    /// Removes every value for which `keep` returns false, preserving the order of the rest
    pub fn retain<F: FnMut(&T) -> bool>(&mut self, mut keep: F) {
        let mut next = self.head;
        while let Some(index) = next {
            let node = &self.pool[index];
            next = node.next;
            if !keep(node.value()) {
                self.remove_node(index);
            }
        }
    }

    /// Remove all elements from this list
    pub fn clear(&mut self) {
        self.pool.clear();
        self.head = None;
        self.tail = None;
        self.size = 0;
        trace!(list = self.id, "cleared");
    }

    /// Destroys the list, dropping every remaining value
    pub fn destroy(self) {
        drop(self)
    }

    /// Destroys the list, passing every remaining value to `destructor` from front to back.
    /// The destructor is not called for an empty list.
    pub fn destroy_with<D: FnMut(T)>(mut self, mut destructor: D) {
        while let Some(value) = self.pop_front() {
            destructor(value);
        }
    }

    /// Return a forward iterator for this list
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            pool: &self.pool,
            front: self.head,
            back: self.tail,
            len: self.size,
        }
    }

    /// Return a mutable forward iterator for this list
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut {
            slots: self.pool.as_mut_ptr(),
            front: self.head,
            back: self.tail,
            len: self.size,
            marker: PhantomData,
        }
    }

    /// Return an iterator over the handles of this list
    pub fn handles(&self) -> Handles<'_, T> {
        Handles {
            inner: self.iter(),
            list: self.id,
        }
    }

    /// Walks the chain in both directions and checks that every link is mirrored by its
    /// neighbour and that both walks visit exactly `size` nodes.
    pub fn check_links(&self) -> bool {
        let limit = self.pool.len();
        if limit != self.size {
            return false;
        }

        let mut visited = 0;
        let mut prev = None;
        let mut next = self.head;
        while let Some(index) = next {
            if visited == limit {
                return false;
            }
            let node = &self.pool[index];
            if node.prev != prev {
                return false;
            }
            visited += 1;
            prev = Some(index);
            next = node.next;
        }
        if prev != self.tail || visited != self.size {
            return false;
        }

        let mut visited = 0;
        let mut next = self.tail;
        while let Some(index) = next {
            if visited == limit {
                return false;
            }
            visited += 1;
            next = self.pool[index].prev;
        }
        visited == self.size
    }

    fn handle(&self, index: usize) -> Handle {
        Handle {
            list: self.id,
            index,
            generation: self.pool.generation(index).unwrap_or_default(),
        }
    }

    fn resolve(&self, handle: Handle) -> Result<usize, InvalidOperation> {
        if handle.list != self.id {
            warn!(list = self.id, owner = handle.list, "rejected foreign handle");
            return Err(InvalidOperation::ForeignHandle);
        }
        if !self.pool.is_live(handle.index, handle.generation) {
            warn!(list = self.id, index = handle.index, "rejected stale handle");
            return Err(InvalidOperation::StaleHandle);
        }
        Ok(handle.index)
    }

    /// Allocates a node and links it before `next`, or at the back if `next` is `None`.
    /// Nothing is linked unless the allocation succeeded.
    fn insert_node(
        &mut self,
        value: T,
        priority: Option<i64>,
        next: Option<usize>,
    ) -> Result<Handle, ListError> {
        let (index, generation) = self.pool.allocate(ListNode::new(value, priority))?;
        let prev = match next {
            Some(next) => self.pool[next].prev,
            None => self.tail,
        };
        {
            let node = &mut self.pool[index];
            node.prev = prev;
            node.next = next;
        }
        match prev {
            Some(prev) => self.pool[prev].next = Some(index),
            None => self.head = Some(index),
        }
        match next {
            Some(next) => self.pool[next].prev = Some(index),
            None => self.tail = Some(index),
        }
        self.size += 1;
        trace!(list = self.id, index, ?priority, size = self.size, "linked node");
        self.verify_links();

        Ok(Handle {
            list: self.id,
            index,
            generation,
        })
    }

    /// Unlinks and releases a node known to be linked into this list
    fn remove_node(&mut self, index: usize) -> T {
        let (prev, next) = {
            let node = &self.pool[index];
            (node.prev, node.next)
        };
        match prev {
            Some(prev) => self.pool[prev].next = next,
            None => self.head = next,
        }
        match next {
            Some(next) => self.pool[next].prev = prev,
            None => self.tail = prev,
        }
        self.size -= 1;
        trace!(list = self.id, index, size = self.size, "unlinked node");

        match self.pool.release(index) {
            Some(node) => {
                self.verify_links();
                node.value
            }
            None => unreachable!("linked node {index} has no slot"),
        }
    }

    #[inline]
    fn verify_links(&self) {
        #[cfg(feature = "strict-links")]
        assert!(self.check_links(), "list {} has corrupt links", self.id);
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::arrival()
    }
}

impl<T: fmt::Debug> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Extend<T> for List<T> {
    /// Pushes every value to the back. Panics if node storage cannot be allocated, like the
    /// standard collections do; use `try_extend` to handle the failure.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        if let Err(err) = self.try_extend(iter) {
            panic!("list {}: {err}", self.id);
        }
    }
}

impl<'a, T: 'a + Copy> Extend<&'a T> for List<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().cloned());
    }
}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut List<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T> IntoIterator for List<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { list: self }
    }
}
