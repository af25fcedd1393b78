use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const CREATE_REQUIRED_FIELDS: [&str; 3] = ["sk_id", "role", "permissions"];
pub const UPDATE_REQUIRED_FIELDS: [&str; 2] = ["role", "permissions"];
pub const VALIDATION_MESSAGE_PREFIX: &str = "Validation errors occurred";

/// A stored account record. Field names on the wire match the table
/// attribute names exactly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Account {
    pub id: String,
    pub sk_id: String,
    pub role: String,
    pub permissions: String,
    #[serde(rename = "submittedAt")]
    pub submitted_at: i64,
    #[serde(rename = "updatedAt")]
    pub updated_at: i64,
}

impl Account {
    pub fn new(id: impl Into<String>, input: CreateAccountInput, timestamp_ms: i64) -> Self {
        Self {
            id: id.into(),
            sk_id: input.sk_id,
            role: input.role,
            permissions: input.permissions,
            submitted_at: timestamp_ms,
            updated_at: timestamp_ms,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateAccountInput {
    pub sk_id: String,
    pub role: String,
    pub permissions: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateAccountInput {
    pub role: String,
    pub permissions: String,
}

impl UpdateAccountInput {
    pub fn into_changes(self, timestamp_ms: i64) -> AccountChanges {
        AccountChanges {
            role: self.role,
            permissions: self.permissions,
            updated_at: timestamp_ms,
        }
    }
}

/// The attributes an update writes. `id`, `sk_id` and `submittedAt` are
/// never part of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountChanges {
    pub role: String,
    pub permissions: String,
    pub updated_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccountCreatedResponse {
    pub message: String,
    #[serde(rename = "accountId")]
    pub account_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccountListResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: Vec<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccountUpdatedResponse {
    pub message: String,
    #[serde(rename = "updatedAttributes")]
    pub updated_attributes: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

pub fn validate_create_request(payload: &Value) -> Result<CreateAccountInput, ValidationError> {
    let [sk_id, role, permissions] = require_string_fields(payload, CREATE_REQUIRED_FIELDS)?;
    Ok(CreateAccountInput {
        sk_id,
        role,
        permissions,
    })
}

pub fn validate_update_request(payload: &Value) -> Result<UpdateAccountInput, ValidationError> {
    let [role, permissions] = require_string_fields(payload, UPDATE_REQUIRED_FIELDS)?;
    Ok(UpdateAccountInput { role, permissions })
}

pub fn validate_account_id(id: Option<&str>) -> Result<String, ValidationError> {
    match id.map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value.to_string()),
        _ => Err(ValidationError::new(format!(
            "{VALIDATION_MESSAGE_PREFIX}: path parameter id is required"
        ))),
    }
}

fn require_string_fields<const N: usize>(
    payload: &Value,
    fields: [&str; N],
) -> Result<[String; N], ValidationError> {
    let Some(object) = payload.as_object() else {
        return Err(ValidationError::new(format!(
            "{VALIDATION_MESSAGE_PREFIX}: request body must be a JSON object"
        )));
    };

    let values = fields.map(|field| {
        object
            .get(field)
            .and_then(Value::as_str)
            .map(str::to_string)
    });

    let invalid: Vec<&str> = fields
        .iter()
        .zip(values.iter())
        .filter(|(_, value)| value.is_none())
        .map(|(field, _)| *field)
        .collect();

    match invalid.as_slice() {
        [] => Ok(values.map(Option::unwrap_or_default)),
        [field] => Err(ValidationError::new(format!(
            "{VALIDATION_MESSAGE_PREFIX}: {field} must be a string"
        ))),
        fields => Err(ValidationError::new(format!(
            "{VALIDATION_MESSAGE_PREFIX}: {} must be strings",
            fields.join(", ")
        ))),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn create_request_accepts_string_fields() {
        let input = validate_create_request(&json!({
            "sk_id": "u1",
            "role": "admin",
            "permissions": "rw",
        }))
        .expect("request should pass");

        assert_eq!(input.sk_id, "u1");
        assert_eq!(input.role, "admin");
        assert_eq!(input.permissions, "rw");
    }

    #[test]
    fn create_request_ignores_caller_supplied_id() {
        let input = validate_create_request(&json!({
            "id": "caller-chosen",
            "sk_id": "u1",
            "role": "admin",
            "permissions": "rw",
        }))
        .expect("request should pass");

        let account = Account::new("generated", input, 1_000);
        assert_eq!(account.id, "generated");
    }

    #[test]
    fn create_request_names_every_invalid_field() {
        let error = validate_create_request(&json!({
            "sk_id": 42,
            "permissions": "rw",
        }))
        .expect_err("request should fail");

        assert_eq!(
            error.message(),
            "Validation errors occurred: sk_id, role must be strings"
        );
    }

    #[test]
    fn update_request_rejects_null_permissions() {
        let error = validate_update_request(&json!({
            "role": "admin",
            "permissions": null,
        }))
        .expect_err("request should fail");

        assert_eq!(
            error.message(),
            "Validation errors occurred: permissions must be a string"
        );
    }

    #[test]
    fn update_request_does_not_require_sk_id() {
        let input = validate_update_request(&json!({
            "role": "viewer",
            "permissions": "r",
        }))
        .expect("request should pass");

        let changes = input.into_changes(2_000);
        assert_eq!(changes.role, "viewer");
        assert_eq!(changes.updated_at, 2_000);
    }

    #[test]
    fn non_object_body_is_rejected() {
        let error = validate_create_request(&json!(["u1", "admin", "rw"]))
            .expect_err("array body should fail");
        assert!(error.message().contains("must be a JSON object"));
    }

    #[test]
    fn blank_account_id_is_rejected() {
        assert!(validate_account_id(None).is_err());
        assert!(validate_account_id(Some("  ")).is_err());
        assert_eq!(
            validate_account_id(Some(" abc ")).expect("id should pass"),
            "abc"
        );
    }

    #[test]
    fn new_account_stamps_both_timestamps() {
        let account = Account::new(
            "id-1",
            CreateAccountInput {
                sk_id: "u1".to_string(),
                role: "admin".to_string(),
                permissions: "rw".to_string(),
            },
            1_700_000_000_000,
        );

        assert_eq!(account.submitted_at, account.updated_at);
        let value = serde_json::to_value(&account).expect("account should serialize");
        assert_eq!(value["submittedAt"], json!(1_700_000_000_000_i64));
        assert_eq!(value["updatedAt"], json!(1_700_000_000_000_i64));
    }
}
