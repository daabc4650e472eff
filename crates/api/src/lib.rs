//! Snippets API server library.
//!
//! Exposes the building blocks (config, state, error handling, routing,
//! representations) so integration tests and the binary entrypoint can
//! both access them.

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod links;
pub mod middleware;
pub mod negotiation;
pub mod query;
pub mod representation;
pub mod router;
pub mod routes;
pub mod state;
pub mod viewset;
