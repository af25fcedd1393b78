//! Shared account record domain primitives.
//!
//! This crate owns the account model, request validation, response payload
//! contracts, the error taxonomy, and the storage attribute schema. It
//! intentionally excludes AWS SDK and Lambda runtime concerns.

pub mod contract;
pub mod error;
pub mod storage_schema;
