use crate::model::Record;
use serde::{Deserialize, Serialize};

/// A registered reader
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u32,
    pub name: String,
    pub email: String,
}

impl User {
    pub fn new(id: u32, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
        }
    }
}

impl Record for User {
    const KIND: &'static str = "user";

    fn id(&self) -> u32 {
        self.id
    }
}
