pub mod dialect;
pub mod error;
pub mod split;
pub mod sql;

pub use dialect::{Dialect, StoreDialect, prepare_statement};
pub use error::QueryError;
pub use split::{rewrite_json_columns, split_statements};
