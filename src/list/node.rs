/// A link record. Neighbours are slot indices into the owning list's pool; the list owns the
/// chain, a node never owns its neighbours.
pub(crate) struct ListNode<T> {
    pub(crate) prev: Option<usize>,
    pub(crate) next: Option<usize>,
    // only set by priority insertion
    pub(crate) priority: Option<i64>,
    pub(crate) value: T,
}

impl<T> ListNode<T> {
    /// Creates an unlinked node
    pub(crate) fn new(value: T, priority: Option<i64>) -> Self {
        Self {
            prev: None,
            next: None,
            priority,
            value,
        }
    }

    /// Get a reference to the contained value
    pub(crate) fn value(&self) -> &T {
        &self.value
    }

    /// Get a mutable reference to the contained value
    pub(crate) fn value_mut(&mut self) -> &mut T {
        &mut self.value
    }

    /// True if a priority insertion of `key` must be placed before this node
    pub(crate) fn sorts_after(&self, key: i64) -> bool {
        self.priority.is_some_and(|priority| priority > key)
    }
}
