pub mod account_store;
pub mod dynamo_store;
#[cfg(any(test, feature = "test-helpers"))]
pub mod memory_store;
