use crate::model::Record;
use serde::{Deserialize, Serialize};

/// A book of the library's collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: u32,
    pub title: String,
    pub author: String,
    pub year: i32,
    pub available: bool,
}

impl Book {
    pub fn new(
        id: u32,
        title: impl Into<String>,
        author: impl Into<String>,
        year: i32,
        available: bool,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
            year,
            available,
        }
    }
}

impl Record for Book {
    const KIND: &'static str = "book";

    fn id(&self) -> u32 {
        self.id
    }
}
