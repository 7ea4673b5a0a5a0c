use crate::model::Record;
use serde::{Deserialize, Serialize};

/// A book lent to a user. Dates are `YYYYMMDD` integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loan {
    pub id: u32,
    pub user_id: u32,
    pub book_id: u32,
    pub date_borrow: u32,
    /// 0 while the book is still out
    pub date_return: u32,
}

impl Loan {
    pub fn new(id: u32, user_id: u32, book_id: u32, date_borrow: u32, date_return: u32) -> Self {
        Self {
            id,
            user_id,
            book_id,
            date_borrow,
            date_return,
        }
    }

    /// True once a return date has been recorded
    pub fn is_returned(&self) -> bool {
        self.date_return != 0
    }
}

impl Record for Loan {
    const KIND: &'static str = "loan";

    fn id(&self) -> u32 {
        self.id
    }
}

#[cfg(test)]
mod test {
    use super::Loan;

    #[test]
    fn returned() {
        assert!(!Loan::new(1, 2, 3, 20240105, 0).is_returned());
        assert!(Loan::new(1, 2, 3, 20240105, 20240119).is_returned());
    }
}
