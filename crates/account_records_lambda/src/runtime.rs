pub use account_records_core::{contract, error, storage_schema};
