//! Records held by the catalog

mod book;
mod loan;
mod suggestion;
mod user;

pub use book::Book;
pub use loan::Loan;
pub use suggestion::Suggestion;
pub use user::User;

use std::cmp::Ordering;

/// A record identified by a numeric id, unique within its kind.
pub trait Record {
    /// Name of the kind of record, used in logs and errors
    const KIND: &'static str;

    /// The record's identifier
    fn id(&self) -> u32;
}

/// Compares two records by identifier
pub fn by_id<R: Record>(left: &R, right: &R) -> Ordering {
    left.id().cmp(&right.id())
}
