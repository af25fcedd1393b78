use serde_json::{json, Value};

use crate::adapters::account_store::AccountStore;
use crate::handlers::accounts::{
    create_account, delete_account, error_response, list_accounts, respond, response_headers,
    update_account, ApiGatewayResponse,
};
use crate::handlers::event::{http_method, path_parameter, request_path};
use crate::logging::{log_error, log_info};
use crate::stamp::RequestStamp;

const COLLECTION_SEGMENT: &str = "accounts";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Collection,
    Item(String),
}

/// Resolves `/accounts` or `/accounts/{id}`, tolerating a stage prefix and a
/// trailing slash.
pub fn resolve_route(path: &str) -> Option<Route> {
    let segments: Vec<&str> = path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect();
    let position = segments
        .iter()
        .position(|segment| *segment == COLLECTION_SEGMENT)?;

    match &segments[position + 1..] {
        [] => Some(Route::Collection),
        [id] => Some(Route::Item((*id).to_string())),
        _ => None,
    }
}

pub fn route_event(
    event: Value,
    stamp: &RequestStamp,
    store: &impl AccountStore,
) -> ApiGatewayResponse {
    let method = http_method(&event).unwrap_or_default();
    let path = request_path(&event).unwrap_or_default().to_string();

    if method == "OPTIONS" {
        return preflight_response();
    }

    let Some(route) = resolve_route(&path) else {
        log_error("route_unmatched", json!({ "method": method, "path": path }));
        return error_response(404, "Route not found");
    };

    log_info(
        "request_received",
        json!({
            "operation": "route",
            "method": method.clone(),
            "path": path.clone(),
            "request_id": event.pointer("/requestContext/requestId").cloned(),
        }),
    );

    match (method.as_str(), route) {
        ("POST", Route::Collection) => respond("create", create_account(&event, stamp, store)),
        ("GET", Route::Collection) => respond("list", list_accounts(store)),
        ("PUT" | "PATCH", Route::Item(path_id)) => {
            let id = path_parameter(&event, "id").unwrap_or(&path_id);
            respond("update", update_account(&event, Some(id), stamp, store))
        }
        ("DELETE", Route::Item(path_id)) => {
            let id = path_parameter(&event, "id").unwrap_or(&path_id);
            respond("delete", delete_account(Some(id), store))
        }
        _ => {
            log_error(
                "route_unmatched",
                json!({ "method": method.clone(), "path": path }),
            );
            error_response(405, &format!("Method {method} not allowed"))
        }
    }
}

fn preflight_response() -> ApiGatewayResponse {
    let mut headers = response_headers();
    if let Some(object) = headers.as_object_mut() {
        object.insert(
            "Access-Control-Allow-Methods".to_string(),
            Value::from("GET,POST,PUT,PATCH,DELETE,OPTIONS"),
        );
        object.insert(
            "Access-Control-Allow-Headers".to_string(),
            Value::from("Content-Type"),
        );
    }
    ApiGatewayResponse {
        status_code: 200,
        headers,
        body: String::new(),
    }
}
