pub mod compare;
pub mod db;
pub mod error;
pub mod list;
pub mod model;
mod pool;

pub use compare::Comparator;
pub use db::{Db, DbConfig, LoanDetails, Summary, Table};
pub use error::{AllocationError, DbError, InvalidOperation, ListError};
pub use list::{Handle, List, Mode};
pub use model::{Book, Loan, Record, Suggestion, User};
