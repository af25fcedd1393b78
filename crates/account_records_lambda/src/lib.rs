//! AWS-oriented adapters and handlers for the account record service.
//!
//! This crate owns runtime integration details (Lambda handlers, API Gateway
//! event handling, routing, and DynamoDB storage) and exposes a single
//! runtime module boundary for contract, error, and storage schema
//! primitives.

pub mod adapters;
pub mod config;
pub mod handlers;
pub mod logging;
pub mod runtime;
pub mod stamp;
