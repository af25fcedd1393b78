pub mod accounts;
pub mod event;
pub mod router;
