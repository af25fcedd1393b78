use account_records_lambda::handlers::accounts::ApiGatewayResponse;
use account_records_lambda::stamp::RequestStamp;
use serde_json::{json, Value};

pub fn stamp(account_id: &str, timestamp_ms: i64) -> RequestStamp {
    RequestStamp {
        account_id: account_id.to_string(),
        timestamp_ms,
    }
}

pub fn create_event(body: Value) -> Value {
    json!({
        "resource": "/accounts",
        "path": "/accounts",
        "httpMethod": "POST",
        "pathParameters": null,
        "requestContext": {"requestId": "req-create"},
        "body": body.to_string(),
        "isBase64Encoded": false
    })
}

pub fn list_event() -> Value {
    json!({
        "resource": "/accounts",
        "path": "/accounts",
        "httpMethod": "GET",
        "pathParameters": null,
        "requestContext": {"requestId": "req-list"},
        "body": null
    })
}

pub fn update_event(id: &str, body: Value) -> Value {
    json!({
        "resource": "/accounts/{id}",
        "path": format!("/accounts/{id}"),
        "httpMethod": "PUT",
        "pathParameters": {"id": id},
        "requestContext": {"requestId": "req-update"},
        "body": body.to_string()
    })
}

pub fn delete_event(id: &str) -> Value {
    json!({
        "resource": "/accounts/{id}",
        "path": format!("/accounts/{id}"),
        "httpMethod": "DELETE",
        "pathParameters": {"id": id},
        "requestContext": {"requestId": "req-delete"},
        "body": null
    })
}

pub fn body(response: &ApiGatewayResponse) -> Value {
    response.json_body().expect("response body should be JSON")
}

pub fn listed_records(response: &ApiGatewayResponse) -> Vec<Value> {
    let body = body(response);
    assert_eq!(body["statusCode"], 200);
    body["body"]
        .as_array()
        .expect("list body should wrap an array")
        .clone()
}

pub fn find_record<'a>(records: &'a [Value], id: &str) -> Option<&'a Value> {
    records.iter().find(|record| record["id"] == id)
}
