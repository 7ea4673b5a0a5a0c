//! The in-memory catalog: one table per kind of record, owned by a single `Db` value that the
//! application threads through its layers.

mod config;
mod table;

pub use config::DbConfig;
pub use table::Table;

use crate::error::DbError;
use crate::model::{Book, Loan, Suggestion, User};
use duplicate::duplicate_item;
use itertools::Itertools;
use std::fmt;
use tracing::{debug, info};

/// Books, users, loans and suggestions held in memory.
pub struct Db {
    books: Table<Book>,
    users: Table<User>,
    loans: Table<Loan>,
    suggestions: Table<Suggestion>,
}

/// A loan together with the user and book it refers to, if they still exist
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoanDetails<'a> {
    pub loan: &'a Loan,
    pub user: Option<&'a User>,
    pub book: Option<&'a Book>,
}

/// Number of records per table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub books: usize,
    pub users: usize,
    pub loans: usize,
    pub suggestions: usize,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts = [
            (self.books, "books"),
            (self.users, "users"),
            (self.loans, "loans"),
            (self.suggestions, "suggestions"),
        ];
        write!(
            f,
            "{}",
            counts
                .iter()
                .map(|(count, kind)| format!("{count} {kind}"))
                .join(", ")
        )
    }
}

impl Db {
    /// Creates an empty catalog
    ///
    /// # Arguments
    ///
    /// `config`: The insertion discipline of each table
    pub fn new(config: DbConfig) -> Self {
        debug!(?config, "opening catalog");
        Self {
            books: Table::new(config.books),
            users: Table::new(config.users),
            loans: Table::new(config.loans),
            suggestions: Table::new(config.suggestions),
        }
    }

    /// Iterates the loans, each joined with its user and book
    pub fn loan_details(&self) -> impl Iterator<Item = LoanDetails<'_>> + '_ {
        self.loans.iter().map(|loan| LoanDetails {
            loan,
            user: self.users.get(loan.user_id),
            book: self.books.get(loan.book_id),
        })
    }

    /// Iterates the loans of one user that have not been returned
    pub fn open_loans_of(&self, user_id: u32) -> impl Iterator<Item = &Loan> + '_ {
        self.loans
            .iter()
            .filter(move |loan| loan.user_id == user_id && !loan.is_returned())
    }

    /// Counts the records of every table
    pub fn summary(&self) -> Summary {
        Summary {
            books: self.books.len(),
            users: self.users.len(),
            loans: self.loans.len(),
            suggestions: self.suggestions.len(),
        }
    }

    /// Releases every record, returning how many each table held
    pub fn close(self) -> Summary {
        let summary = Summary {
            books: self.books.close(),
            users: self.users.close(),
            loans: self.loans.close(),
            suggestions: self.suggestions.close(),
        };
        info!(%summary, "closed catalog");
        summary
    }
}

impl Default for Db {
    fn default() -> Self {
        Self::new(DbConfig::default())
    }
}

#[duplicate_item(
    records        records_mut        add_record        find_record    find_record_mut    remove_record        next_record_id          RecordType;
    [books]        [books_mut]        [add_book]        [find_book]    [find_book_mut]    [remove_book]        [next_book_id]          [Book];
    [users]        [users_mut]        [add_user]        [find_user]    [find_user_mut]    [remove_user]        [next_user_id]          [User];
    [loans]        [loans_mut]        [add_loan]        [find_loan]    [find_loan_mut]    [remove_loan]        [next_loan_id]          [Loan];
    [suggestions]  [suggestions_mut]  [add_suggestion]  [find_suggestion] [find_suggestion_mut] [remove_suggestion] [next_suggestion_id] [Suggestion];
)]
impl Db {
    /// Read access to the table
    pub fn records(&self) -> &Table<RecordType> {
        &self.records
    }

    /// Write access to the table
    pub fn records_mut(&mut self) -> &mut Table<RecordType> {
        &mut self.records
    }

    /// Adds a record, rejecting an id that is already taken
    pub fn add_record(&mut self, record: RecordType) -> Result<(), DbError> {
        self.records.insert(record)
    }

    /// Fetches a record by id
    pub fn find_record(&self, id: u32) -> Option<&RecordType> {
        self.records.get(id)
    }

    /// Fetches a record by id for modification
    pub fn find_record_mut(&mut self, id: u32) -> Option<&mut RecordType> {
        self.records.get_mut(id)
    }

    /// Removes a record by id and returns it
    pub fn remove_record(&mut self, id: u32) -> Result<RecordType, DbError> {
        self.records.remove(id)
    }

    /// The id a new record should use
    pub fn next_record_id(&self) -> u32 {
        self.records.next_id()
    }
}

#[cfg(test)]
mod test {
    use super::{Db, DbConfig, Summary};
    use crate::error::DbError;
    use crate::model::{Book, Loan, Suggestion, User};
    use itertools::assert_equal;

    fn sample() -> Db {
        let mut db = Db::default();
        db.add_book(Book::new(1, "Os Maias", "Eca de Queiros", 1888, true)).unwrap();
        db.add_book(Book::new(2, "Ensaio sobre a Cegueira", "Jose Saramago", 1995, false)).unwrap();
        db.add_user(User::new(10, "Ana", "ana@example.org")).unwrap();
        db.add_loan(Loan::new(100, 10, 2, 20240301, 0)).unwrap();
        db.add_loan(Loan::new(101, 10, 1, 20240110, 20240124)).unwrap();
        db.add_loan(Loan::new(102, 11, 1, 20240201, 0)).unwrap();
        db
    }

    #[test]
    fn add_and_find() {
        let db = sample();
        assert_eq!(db.find_book(2).unwrap().author, "Jose Saramago");
        assert_eq!(db.find_user(10).unwrap().name, "Ana");
        assert!(db.find_user(11).is_none());
        assert!(db.find_suggestion(1).is_none());
    }

    #[test]
    fn duplicate_ids_are_per_table() {
        let mut db = sample();
        assert_eq!(
            db.add_book(Book::new(1, "Other", "Someone", 2000, true)),
            Err(DbError::Duplicate { kind: "book", id: 1 })
        );
        // the same id in another table is fine
        db.add_suggestion(Suggestion::new(1, "Mensagem", "Fernando Pessoa", "", "")).unwrap();
        assert_eq!(db.suggestions().len(), 1);
    }

    #[test]
    fn modify_in_place() {
        let mut db = sample();
        db.find_book_mut(1).unwrap().available = false;
        assert!(!db.find_book(1).unwrap().available);
    }

    #[test]
    fn remove() {
        let mut db = sample();
        let removed = db.remove_loan(101).unwrap();
        assert_eq!(removed.book_id, 1);
        assert_eq!(
            db.remove_loan(101),
            Err(DbError::NotFound { kind: "loan", id: 101 })
        );
        assert_equal(db.loans().iter().map(|loan| loan.id), [100, 102]);
    }

    #[test]
    fn next_ids() {
        let db = sample();
        assert_eq!(db.next_book_id(), 3);
        assert_eq!(db.next_loan_id(), 103);
        assert_eq!(db.next_suggestion_id(), 1);
    }

    #[test]
    fn loan_details() {
        let db = sample();
        let details = db.loan_details().collect::<Vec<_>>();
        assert_eq!(details.len(), 3);
        assert_eq!(details[0].book.unwrap().id, 2);
        assert_eq!(details[0].user.unwrap().name, "Ana");
        // user 11 was never registered
        assert!(details[2].user.is_none());
        assert_eq!(details[2].book.unwrap().id, 1);
    }

    #[test]
    fn open_loans() {
        let db = sample();
        assert_equal(db.open_loans_of(10).map(|loan| loan.id), [100]);
        assert_eq!(db.open_loans_of(12).count(), 0);
    }

    #[test]
    fn ordered_tables() {
        let mut db = Db::new(DbConfig::ordered_by_id());
        for id in [5, 2, 9, 1] {
            db.add_user(User::new(id, format!("user {id}"), "")).unwrap();
        }
        assert_equal(db.users().iter().map(|user| user.id), [1, 2, 5, 9]);
    }

    #[test]
    fn summary_and_close() {
        let db = sample();
        let summary = db.summary();
        assert_eq!(
            summary,
            Summary {
                books: 2,
                users: 1,
                loans: 3,
                suggestions: 0
            }
        );
        assert_eq!(
            summary.to_string(),
            "2 books, 1 users, 3 loans, 0 suggestions"
        );
        assert_eq!(db.close(), summary);
    }

    #[test]
    fn table_access() {
        let mut db = sample();
        db.users_mut().retain(|user| user.id != 10);
        assert!(db.users().is_empty());
    }
}
