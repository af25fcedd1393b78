use std::collections::HashMap;
use std::future::Future;

use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde_json::{Map, Number, Value};

use crate::adapters::account_store::{AccountStore, StoreError};
use crate::runtime::contract::{Account, AccountChanges};
use crate::runtime::storage_schema::{
    account_attributes, insert_if_absent_condition, record_exists_condition, StoredValue,
    UpdatePlan, PARTITION_KEY,
};

pub struct DynamoAccountStore {
    table_name: String,
    client: aws_sdk_dynamodb::Client,
}

impl DynamoAccountStore {
    pub fn new(client: aws_sdk_dynamodb::Client, table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            client,
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

impl AccountStore for DynamoAccountStore {
    fn insert_account(&self, account: &Account) -> Result<(), StoreError> {
        let client = self.client.clone();
        let table_name = self.table_name.clone();
        let item: HashMap<String, AttributeValue> = account_attributes(account)
            .into_iter()
            .map(|(attribute, value)| {
                (
                    attribute.as_str().to_string(),
                    to_attribute_value(value),
                )
            })
            .collect();

        block_on(async move {
            client
                .put_item()
                .table_name(table_name)
                .set_item(Some(item))
                .condition_expression(insert_if_absent_condition())
                .expression_attribute_names(
                    PARTITION_KEY.name_placeholder(),
                    PARTITION_KEY.as_str(),
                )
                .send()
                .await
                .map(|_| ())
                .map_err(|error| {
                    let service_error = error.into_service_error();
                    if service_error.is_conditional_check_failed_exception() {
                        StoreError::ConditionFailed(format!(
                            "account item already exists: {service_error}"
                        ))
                    } else {
                        StoreError::Backend(format!("failed to put account item: {service_error}"))
                    }
                })
        })
    }

    fn scan_accounts(&self) -> Result<Vec<Value>, StoreError> {
        let client = self.client.clone();
        let table_name = self.table_name.clone();

        block_on(async move {
            let mut items = Vec::new();
            let mut exclusive_start_key: Option<HashMap<String, AttributeValue>> = None;
            loop {
                let output = client
                    .scan()
                    .table_name(&table_name)
                    .set_exclusive_start_key(exclusive_start_key.take())
                    .send()
                    .await
                    .map_err(|error| {
                        StoreError::Backend(format!("failed to scan account table: {error}"))
                    })?;

                items.extend(
                    output
                        .items()
                        .iter()
                        .map(|item| Value::Object(item_to_map(item))),
                );

                match output.last_evaluated_key() {
                    Some(key) if !key.is_empty() => exclusive_start_key = Some(key.clone()),
                    _ => break,
                }
            }
            Ok::<_, StoreError>(items)
        })
    }

    fn update_account(
        &self,
        id: &str,
        changes: &AccountChanges,
    ) -> Result<Map<String, Value>, StoreError> {
        let client = self.client.clone();
        let table_name = self.table_name.clone();
        let key = id.to_string();
        let plan = UpdatePlan::from_changes(changes);

        block_on(async move {
            let mut request = client
                .update_item()
                .table_name(table_name)
                .key(PARTITION_KEY.as_str(), AttributeValue::S(key))
                .update_expression(plan.update_expression())
                .condition_expression(record_exists_condition())
                .return_values(ReturnValue::UpdatedNew);
            for (placeholder, name) in plan.expression_attribute_names() {
                request = request.expression_attribute_names(placeholder, name);
            }
            for (placeholder, value) in plan.expression_attribute_values() {
                request =
                    request.expression_attribute_values(placeholder, to_attribute_value(value));
            }

            let output = request.send().await.map_err(|error| {
                let service_error = error.into_service_error();
                if service_error.is_conditional_check_failed_exception() {
                    StoreError::ConditionFailed(format!(
                        "account item does not exist: {service_error}"
                    ))
                } else {
                    StoreError::Backend(format!(
                        "failed to update account item: {service_error}"
                    ))
                }
            })?;

            Ok::<_, StoreError>(output.attributes().map(item_to_map).unwrap_or_default())
        })
    }

    fn delete_account(&self, id: &str) -> Result<(), StoreError> {
        let client = self.client.clone();
        let table_name = self.table_name.clone();
        let key = id.to_string();

        block_on(async move {
            client
                .delete_item()
                .table_name(table_name)
                .key(PARTITION_KEY.as_str(), AttributeValue::S(key))
                .send()
                .await
                .map(|_| ())
                .map_err(|error| {
                    StoreError::Backend(format!("failed to delete account item: {error}"))
                })
        })
    }
}

fn block_on<F: Future>(future: F) -> F::Output {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

fn to_attribute_value(value: StoredValue) -> AttributeValue {
    match value {
        StoredValue::Text(text) => AttributeValue::S(text),
        StoredValue::Millis(millis) => AttributeValue::N(millis.to_string()),
    }
}

fn item_to_map(item: &HashMap<String, AttributeValue>) -> Map<String, Value> {
    item.iter()
        .map(|(name, value)| (name.clone(), attribute_to_json(value)))
        .collect()
}

fn attribute_to_json(value: &AttributeValue) -> Value {
    match value {
        AttributeValue::S(text) => Value::String(text.clone()),
        AttributeValue::N(number) => number_to_json(number),
        AttributeValue::Bool(flag) => Value::Bool(*flag),
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::B(blob) => Value::String(BASE64.encode(blob.as_ref())),
        AttributeValue::L(values) => Value::Array(values.iter().map(attribute_to_json).collect()),
        AttributeValue::M(entries) => Value::Object(item_to_map(entries)),
        AttributeValue::Ss(values) => {
            Value::Array(values.iter().cloned().map(Value::String).collect())
        }
        AttributeValue::Ns(values) => Value::Array(
            values
                .iter()
                .map(|number| number_to_json(number))
                .collect(),
        ),
        AttributeValue::Bs(blobs) => Value::Array(
            blobs
                .iter()
                .map(|blob| Value::String(BASE64.encode(blob.as_ref())))
                .collect(),
        ),
        _ => Value::Null,
    }
}

// DynamoDB numbers arrive as decimal strings.
fn number_to_json(number: &str) -> Value {
    if let Ok(integer) = number.parse::<i64>() {
        return Value::from(integer);
    }
    number
        .parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .unwrap_or_else(|| Value::String(number.to_string()))
}

#[cfg(test)]
mod tests {
    use aws_sdk_dynamodb::primitives::Blob;
    use serde_json::json;

    use super::*;

    #[test]
    fn stored_values_map_to_string_and_number_attributes() {
        assert_eq!(
            to_attribute_value(StoredValue::Text("admin".to_string())),
            AttributeValue::S("admin".to_string())
        );
        assert_eq!(
            to_attribute_value(StoredValue::Millis(1_700_000_000_123)),
            AttributeValue::N("1700000000123".to_string())
        );
    }

    #[test]
    fn item_converts_to_raw_json_record() {
        let item = HashMap::from([
            ("id".to_string(), AttributeValue::S("abc".to_string())),
            (
                "submittedAt".to_string(),
                AttributeValue::N("1700000000123".to_string()),
            ),
            ("active".to_string(), AttributeValue::Bool(true)),
            (
                "tags".to_string(),
                AttributeValue::Ss(vec!["a".to_string(), "b".to_string()]),
            ),
        ]);

        let record = Value::Object(item_to_map(&item));
        assert_eq!(record["id"], json!("abc"));
        assert_eq!(record["submittedAt"], json!(1_700_000_000_123_i64));
        assert_eq!(record["active"], json!(true));
        assert_eq!(record["tags"], json!(["a", "b"]));
    }

    #[test]
    fn fractional_and_oversized_numbers_are_preserved() {
        assert_eq!(number_to_json("1.5"), json!(1.5));
        assert_eq!(
            number_to_json("123456789012345678901234567890"),
            json!(1.2345678901234568e29)
        );
        assert_eq!(number_to_json("not-a-number"), json!("not-a-number"));
    }

    #[test]
    fn binary_attributes_are_base64_encoded() {
        let value = AttributeValue::B(Blob::new(b"rw".to_vec()));
        assert_eq!(attribute_to_json(&value), json!("cnc="));
    }
}
