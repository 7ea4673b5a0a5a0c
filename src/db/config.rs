use crate::list::Mode;
use serde::{Deserialize, Serialize};

/// Chooses the insertion discipline of every table. Missing fields default to `Mode::Arrival`,
/// which keeps records in the order they were added.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DbConfig {
    pub books: Mode,
    pub users: Mode,
    pub loans: Mode,
    pub suggestions: Mode,
}

impl DbConfig {
    /// Keeps every table ordered by record id
    pub fn ordered_by_id() -> Self {
        Self {
            books: Mode::Priority,
            users: Mode::Priority,
            loans: Mode::Priority,
            suggestions: Mode::Priority,
        }
    }
}
