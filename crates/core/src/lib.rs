//! Domain rules for the snippets service.
//!
//! Nothing in this crate touches the database or HTTP. Handlers in
//! `snippets_api` call into these modules to validate payloads, decide
//! write permission, and render highlighted HTML.

pub mod error;
pub mod highlight;
pub mod pagination;
pub mod permissions;
pub mod snippet;
pub mod types;
