use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::adapters::account_store::{AccountStore, StoreError};
use crate::handlers::event::{path_parameter, request_body};
use crate::logging::{log_error, log_info};
use crate::runtime::contract::{
    validate_account_id, validate_create_request, validate_update_request, Account,
    AccountCreatedResponse, AccountListResponse, AccountUpdatedResponse, MessageResponse,
};
use crate::runtime::error::{AccountServiceError, WriteOperation};
use crate::stamp::RequestStamp;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiGatewayResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub headers: Value,
    pub body: String,
}

impl ApiGatewayResponse {
    /// Parses `body` back into JSON. Empty bodies read as `null`.
    pub fn json_body(&self) -> Result<Value, serde_json::Error> {
        if self.body.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&self.body)
    }
}

pub fn handle_create_account(
    event: Value,
    stamp: &RequestStamp,
    store: &impl AccountStore,
) -> ApiGatewayResponse {
    log_request("create", &event);
    respond("create", create_account(&event, stamp, store))
}

pub fn handle_list_accounts(event: Value, store: &impl AccountStore) -> ApiGatewayResponse {
    log_request("list", &event);
    respond("list", list_accounts(store))
}

pub fn handle_update_account(
    event: Value,
    stamp: &RequestStamp,
    store: &impl AccountStore,
) -> ApiGatewayResponse {
    log_request("update", &event);
    let id = path_parameter(&event, "id");
    respond("update", update_account(&event, id, stamp, store))
}

pub fn handle_delete_account(event: Value, store: &impl AccountStore) -> ApiGatewayResponse {
    log_request("delete", &event);
    let id = path_parameter(&event, "id");
    respond("delete", delete_account(id, store))
}

pub(crate) fn create_account(
    event: &Value,
    stamp: &RequestStamp,
    store: &impl AccountStore,
) -> Result<AccountCreatedResponse, AccountServiceError> {
    let payload = request_body(event)?;
    let input = validate_create_request(&payload)?;
    let account = Account::new(stamp.account_id.clone(), input, stamp.timestamp_ms);

    if let Err(error) = store.insert_account(&account) {
        log_error(
            "account_create_failed",
            json!({
                "sk_id": account.sk_id.clone(),
                "account_id": account.id.clone(),
                "error": error.to_string(),
            }),
        );
        return Err(AccountServiceError::StorageConflict {
            sk_id: account.sk_id,
        });
    }

    log_info(
        "account_created",
        json!({
            "sk_id": account.sk_id.clone(),
            "account_id": account.id.clone(),
        }),
    );
    Ok(AccountCreatedResponse {
        message: format!("Successfully submitted account with sk_id {}", account.sk_id),
        account_id: account.id,
    })
}

pub(crate) fn list_accounts(
    store: &impl AccountStore,
) -> Result<AccountListResponse, AccountServiceError> {
    let records = store.scan_accounts().map_err(|error| {
        log_error("account_list_failed", json!({ "error": error.to_string() }));
        AccountServiceError::StorageRead
    })?;

    log_info("accounts_listed", json!({ "count": records.len() }));
    Ok(AccountListResponse {
        status_code: 200,
        body: records,
    })
}

pub(crate) fn update_account(
    event: &Value,
    id: Option<&str>,
    stamp: &RequestStamp,
    store: &impl AccountStore,
) -> Result<AccountUpdatedResponse, AccountServiceError> {
    let id = validate_account_id(id)?;
    let payload = request_body(event)?;
    let changes = validate_update_request(&payload)?.into_changes(stamp.timestamp_ms);

    let updated_attributes = store.update_account(&id, &changes).map_err(|error| {
        log_error(
            "account_update_failed",
            json!({
                "account_id": id.clone(),
                "error": error.to_string(),
            }),
        );
        match error {
            StoreError::ConditionFailed(_) => {
                AccountServiceError::AccountNotFound { id: id.clone() }
            }
            StoreError::Backend(_) => AccountServiceError::StorageWrite {
                operation: WriteOperation::Update,
                id: id.clone(),
            },
        }
    })?;

    log_info(
        "account_updated",
        json!({
            "account_id": id.clone(),
            "updated_attributes": updated_attributes.keys().collect::<Vec<_>>(),
        }),
    );
    Ok(AccountUpdatedResponse {
        message: format!("Successfully updated account {id}"),
        updated_attributes,
    })
}

pub(crate) fn delete_account(
    id: Option<&str>,
    store: &impl AccountStore,
) -> Result<MessageResponse, AccountServiceError> {
    let id = validate_account_id(id)?;

    if let Err(error) = store.delete_account(&id) {
        log_error(
            "account_delete_failed",
            json!({
                "account_id": id.clone(),
                "error": error.to_string(),
            }),
        );
        return Err(AccountServiceError::StorageWrite {
            operation: WriteOperation::Delete,
            id,
        });
    }

    log_info("account_deleted", json!({ "account_id": id.clone() }));
    Ok(MessageResponse::new(format!("Successfully deleted account {id}")))
}

pub(crate) fn respond(
    operation: &str,
    result: Result<impl Serialize, AccountServiceError>,
) -> ApiGatewayResponse {
    match result {
        Ok(payload) => success_response(payload),
        Err(error) => {
            if let AccountServiceError::Validation(validation) = &error {
                log_error(
                    "validation_failed",
                    json!({
                        "operation": operation,
                        "message": validation.message(),
                    }),
                );
            }
            error_response(error.status_code(), &error.message())
        }
    }
}

pub(crate) fn success_response(payload: impl Serialize) -> ApiGatewayResponse {
    match serde_json::to_string(&payload) {
        Ok(body) => ApiGatewayResponse {
            status_code: 200,
            headers: response_headers(),
            body,
        },
        Err(error) => {
            log_error(
                "response_serialization_failed",
                json!({ "error": error.to_string() }),
            );
            error_response(500, "Failed to serialize response")
        }
    }
}

pub(crate) fn error_response(status_code: u16, message: &str) -> ApiGatewayResponse {
    ApiGatewayResponse {
        status_code,
        headers: response_headers(),
        body: json!({ "message": message }).to_string(),
    }
}

pub(crate) fn response_headers() -> Value {
    json!({
        "Content-Type": "application/json",
        "Access-Control-Allow-Origin": "*",
    })
}

fn log_request(operation: &str, event: &Value) {
    log_info(
        "request_received",
        json!({
            "operation": operation,
            "request_id": event.pointer("/requestContext/requestId").cloned(),
            "path_parameters": event.get("pathParameters").cloned(),
        }),
    );
}
