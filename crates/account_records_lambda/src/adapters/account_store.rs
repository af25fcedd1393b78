use serde_json::{Map, Value};

use crate::runtime::contract::{Account, AccountChanges};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store rejected the write because its condition did not hold.
    ConditionFailed(String),
    Backend(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConditionFailed(message) => write!(f, "condition failed: {message}"),
            Self::Backend(message) => f.write_str(message),
        }
    }
}

impl std::error::Error for StoreError {}

pub trait AccountStore {
    fn insert_account(&self, account: &Account) -> Result<(), StoreError>;

    fn scan_accounts(&self) -> Result<Vec<Value>, StoreError>;

    /// Returns the attributes the store reports as changed.
    fn update_account(
        &self,
        id: &str,
        changes: &AccountChanges,
    ) -> Result<Map<String, Value>, StoreError>;

    fn delete_account(&self, id: &str) -> Result<(), StoreError>;
}
