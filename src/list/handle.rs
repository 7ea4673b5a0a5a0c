/// Refers to one node of one list. A handle is only accepted by the list that produced it, and
/// only while its node is still linked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle {
    pub(crate) list: u64,
    pub(crate) index: usize,
    pub(crate) generation: u32,
}

impl Handle {
    /// Returns the slot index, for debugging or external maps.
    pub fn as_raw(&self) -> usize {
        self.index
    }
}
