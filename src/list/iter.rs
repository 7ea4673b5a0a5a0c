use crate::list::handle::Handle;
use crate::list::node::ListNode;
use crate::list::List;
use crate::pool::{NodePool, Slot};
use std::iter::FusedIterator;
use std::marker::PhantomData;

/// Iterator over `List`, yielding references in the list's order
pub struct Iter<'a, T: 'a> {
    pub(crate) pool: &'a NodePool<ListNode<T>>,
    pub(crate) front: Option<usize>,
    pub(crate) back: Option<usize>,
    pub(crate) len: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let node = &self.pool[self.front?];
        self.front = node.next;
        self.len -= 1;
        Some(node.value())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let node = &self.pool[self.back?];
        self.back = node.prev;
        self.len -= 1;
        Some(node.value())
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T> FusedIterator for Iter<'a, T> {}

impl<'a, T> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool,
            front: self.front,
            back: self.back,
            len: self.len,
        }
    }
}

/// Iterator over `List`, yielding mutable references in the list's order
pub struct IterMut<'a, T: 'a> {
    pub(crate) slots: *mut Slot<ListNode<T>>,
    pub(crate) front: Option<usize>,
    pub(crate) back: Option<usize>,
    pub(crate) len: usize,
    pub(crate) marker: PhantomData<&'a mut ListNode<T>>,
}

impl<'a, T> IterMut<'a, T> {
    // every linked slot is visited at most once, so the references handed out never alias
    unsafe fn node(&self, index: usize) -> Option<&'a mut ListNode<T>> {
        (*self.slots.add(index)).node_mut()
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let node = unsafe { self.node(self.front?) }?;
        self.front = node.next;
        self.len -= 1;
        Some(node.value_mut())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let node = unsafe { self.node(self.back?) }?;
        self.back = node.prev;
        self.len -= 1;
        Some(node.value_mut())
    }
}

impl<'a, T> ExactSizeIterator for IterMut<'a, T> {}

impl<'a, T> FusedIterator for IterMut<'a, T> {}

/// Iterator over the handles of a `List`, in the list's order. Collect it before removing.
pub struct Handles<'a, T: 'a> {
    pub(crate) inner: Iter<'a, T>,
    pub(crate) list: u64,
}

impl<'a, T> Handles<'a, T> {
    fn handle(&self, index: usize) -> Option<Handle> {
        Some(Handle {
            list: self.list,
            index,
            generation: self.inner.pool.generation(index)?,
        })
    }
}

impl<'a, T> Iterator for Handles<'a, T> {
    type Item = Handle;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.inner.front?;
        self.inner.next()?;
        self.handle(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, T> DoubleEndedIterator for Handles<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let index = self.inner.back?;
        self.inner.next_back()?;
        self.handle(index)
    }
}

impl<'a, T> ExactSizeIterator for Handles<'a, T> {}

/// Owning iterator over `List`, yielding values in the list's order
pub struct IntoIter<T> {
    pub(crate) list: List<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.list.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.size(), Some(self.list.size()))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.list.pop_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
