pub mod category;
pub mod transaction;

pub use category::CategoryRegistry;
pub use transaction::{parse_date, Transaction, TransactionKind, DATE_FORMAT};
