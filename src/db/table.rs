use crate::error::DbError;
use crate::list::{Handle, Iter, List, Mode};
use crate::model::{by_id, Record};
use tracing::{debug, warn};

/// The records of one kind, kept in a `List` and addressed by id.
pub struct Table<R> {
    list: List<R>,
}

impl<R: Record> Table<R> {
    /// Creates an empty table
    ///
    /// # Arguments
    ///
    /// `mode`: `Mode::Arrival` keeps records in insertion order, `Mode::Priority` keeps them
    /// ordered by id
    pub fn new(mode: Mode) -> Self {
        Self {
            list: List::with_comparator(mode, by_id::<R>),
        }
    }

    /// Adds a record. Fails with `DbError::Duplicate` if its id is taken.
    pub fn insert(&mut self, record: R) -> Result<(), DbError> {
        let id = record.id();
        if self.list.find(&record)?.is_some() {
            warn!(kind = R::KIND, id, "rejected duplicate id");
            return Err(DbError::Duplicate { kind: R::KIND, id });
        }
        match self.list.mode() {
            Mode::Arrival => self.list.push_back(record)?,
            Mode::Priority => self.list.insert_by_priority(record, i64::from(id))?,
        };
        debug!(kind = R::KIND, id, len = self.list.len(), "added record");
        Ok(())
    }

    /// Fetches the record with the given id
    pub fn get(&self, id: u32) -> Option<&R> {
        self.list.get(self.locate(id)?)
    }

    /// Fetches the record with the given id for modification
    pub fn get_mut(&mut self, id: u32) -> Option<&mut R> {
        let handle = self.locate(id)?;
        self.list.get_mut(handle)
    }

    /// Returns true if a record with the given id exists
    pub fn contains(&self, id: u32) -> bool {
        self.locate(id).is_some()
    }

    /// Removes the record with the given id and returns it
    pub fn remove(&mut self, id: u32) -> Result<R, DbError> {
        let handle = self
            .locate(id)
            .ok_or(DbError::NotFound { kind: R::KIND, id })?;
        let record = self.list.remove(handle)?;
        debug!(kind = R::KIND, id, len = self.list.len(), "removed record");
        Ok(record)
    }

    /// Keeps only the records for which `keep` returns true
    pub fn retain<F: FnMut(&R) -> bool>(&mut self, keep: F) {
        self.list.retain(keep)
    }

    /// One past the largest id in the table, or 1 if it is empty
    pub fn next_id(&self) -> u32 {
        self.list
            .iter()
            .map(|record| record.id())
            .max()
            .map_or(1, |id| id.saturating_add(1))
    }

    /// Returns the number of records
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Returns true if the table holds no records
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Iterates the records in the table's order
    pub fn iter(&self) -> Iter<'_, R> {
        self.list.iter()
    }

    /// The list backing the table
    pub fn list(&self) -> &List<R> {
        &self.list
    }

    /// Releases every record, returning how many there were
    pub(crate) fn close(self) -> usize {
        let mut released = 0;
        self.list.destroy_with(|_| released += 1);
        released
    }

    fn locate(&self, id: u32) -> Option<Handle> {
        self.list.find_with(&id, |record, id| record.id().cmp(id))
    }
}

impl<'a, R> IntoIterator for &'a Table<R> {
    type Item = &'a R;
    type IntoIter = Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.list.iter()
    }
}
