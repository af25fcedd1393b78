//! In-process [`AccountStore`] for tests and local runs.
//!
//! Mirrors the DynamoDB adapter's conditional semantics: inserts never
//! overwrite, updates require the record to exist, deletes are idempotent.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde_json::{Map, Value};

use crate::adapters::account_store::{AccountStore, StoreError};
use crate::runtime::contract::{Account, AccountChanges};
use crate::runtime::storage_schema::{account_attributes, StoredValue, UpdatePlan};

type Record = Map<String, Value>;

#[derive(Default)]
pub struct InMemoryAccountStore {
    records: Mutex<BTreeMap<String, Record>>,
    failure: Option<String>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every operation fails with a backend error.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            records: Mutex::new(BTreeMap::new()),
            failure: Some(message.into()),
        }
    }

    pub fn seed_record(&self, id: &str, record: Record) {
        self.lock_records().insert(id.to_string(), record);
    }

    pub fn record(&self, id: &str) -> Option<Record> {
        self.lock_records().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock_records().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock_records(&self) -> MutexGuard<'_, BTreeMap<String, Record>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check_failure(&self) -> Result<(), StoreError> {
        match &self.failure {
            Some(message) => Err(StoreError::Backend(message.clone())),
            None => Ok(()),
        }
    }
}

impl AccountStore for InMemoryAccountStore {
    fn insert_account(&self, account: &Account) -> Result<(), StoreError> {
        self.check_failure()?;
        let mut records = self.lock_records();
        if records.contains_key(&account.id) {
            return Err(StoreError::ConditionFailed(format!(
                "account item {} already exists",
                account.id
            )));
        }

        let record = account_attributes(account)
            .into_iter()
            .map(|(attribute, value)| (attribute.as_str().to_string(), stored_to_json(value)))
            .collect();
        records.insert(account.id.clone(), record);
        Ok(())
    }

    fn scan_accounts(&self) -> Result<Vec<Value>, StoreError> {
        self.check_failure()?;
        Ok(self
            .lock_records()
            .values()
            .cloned()
            .map(Value::Object)
            .collect())
    }

    fn update_account(
        &self,
        id: &str,
        changes: &AccountChanges,
    ) -> Result<Map<String, Value>, StoreError> {
        self.check_failure()?;
        let mut records = self.lock_records();
        let Some(record) = records.get_mut(id) else {
            return Err(StoreError::ConditionFailed(format!(
                "account item {id} does not exist"
            )));
        };

        let mut updated = Map::new();
        for (attribute, value) in UpdatePlan::from_changes(changes).assignments {
            let value = stored_to_json(value);
            record.insert(attribute.as_str().to_string(), value.clone());
            updated.insert(attribute.as_str().to_string(), value);
        }
        Ok(updated)
    }

    fn delete_account(&self, id: &str) -> Result<(), StoreError> {
        self.check_failure()?;
        self.lock_records().remove(id);
        Ok(())
    }
}

fn stored_to_json(value: StoredValue) -> Value {
    match value {
        StoredValue::Text(text) => Value::String(text),
        StoredValue::Millis(millis) => Value::from(millis),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn sample_account(id: &str) -> Account {
        Account {
            id: id.to_string(),
            sk_id: "u1".to_string(),
            role: "admin".to_string(),
            permissions: "rw".to_string(),
            submitted_at: 100,
            updated_at: 100,
        }
    }

    #[test]
    fn insert_refuses_to_overwrite_existing_id() {
        let store = InMemoryAccountStore::new();
        store
            .insert_account(&sample_account("a"))
            .expect("first insert should succeed");

        let error = store
            .insert_account(&sample_account("a"))
            .expect_err("second insert should fail");
        assert!(matches!(error, StoreError::ConditionFailed(_)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn update_reports_only_changed_attributes() {
        let store = InMemoryAccountStore::new();
        store
            .insert_account(&sample_account("a"))
            .expect("insert should succeed");

        let updated = store
            .update_account(
                "a",
                &AccountChanges {
                    role: "viewer".to_string(),
                    permissions: "r".to_string(),
                    updated_at: 200,
                },
            )
            .expect("update should succeed");

        assert_eq!(
            Value::Object(updated),
            json!({"role": "viewer", "permissions": "r", "updatedAt": 200})
        );
        let record = store.record("a").expect("record should remain");
        assert_eq!(record["sk_id"], json!("u1"));
        assert_eq!(record["submittedAt"], json!(100));
    }

    #[test]
    fn update_of_missing_record_does_not_create_it() {
        let store = InMemoryAccountStore::new();
        let error = store
            .update_account(
                "ghost",
                &AccountChanges {
                    role: "viewer".to_string(),
                    permissions: "r".to_string(),
                    updated_at: 200,
                },
            )
            .expect_err("update should fail");

        assert!(matches!(error, StoreError::ConditionFailed(_)));
        assert!(store.is_empty());
    }

    #[test]
    fn failing_store_rejects_every_operation() {
        let store = InMemoryAccountStore::failing("simulated outage");
        assert_eq!(
            store.scan_accounts().expect_err("scan should fail"),
            StoreError::Backend("simulated outage".to_string())
        );
        assert!(store.delete_account("a").is_err());
    }
}
