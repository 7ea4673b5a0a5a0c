use crate::model::Record;
use serde::{Deserialize, Serialize};

/// A reader's request for a book the library does not hold yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: u32,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub isbn: String,
    #[serde(default)]
    pub edition: String,
}

impl Suggestion {
    pub fn new(
        id: u32,
        title: impl Into<String>,
        author: impl Into<String>,
        isbn: impl Into<String>,
        edition: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
            isbn: isbn.into(),
            edition: edition.into(),
        }
    }
}

impl Record for Suggestion {
    const KIND: &'static str = "suggestion";

    fn id(&self) -> u32 {
        self.id
    }
}
