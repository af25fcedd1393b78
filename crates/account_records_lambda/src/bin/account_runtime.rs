use account_records_lambda::adapters::dynamo_store::DynamoAccountStore;
use account_records_lambda::config::AccountServiceConfig;
use account_records_lambda::handlers::accounts::ApiGatewayResponse;
use account_records_lambda::handlers::router::route_event;
use account_records_lambda::logging::log_info;
use account_records_lambda::stamp::RequestStamp;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::{json, Value};

async fn handle_request(
    store: &DynamoAccountStore,
    event: LambdaEvent<Value>,
) -> Result<ApiGatewayResponse, Error> {
    Ok(route_event(event.payload, &RequestStamp::now(), store))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = AccountServiceConfig::from_env()?;
    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let store = DynamoAccountStore::new(
        aws_sdk_dynamodb::Client::new(&aws_config),
        config.table_name,
    );
    log_info("runtime_started", json!({ "table_name": store.table_name() }));

    lambda_runtime::run(service_fn(|event| handle_request(&store, event))).await
}
