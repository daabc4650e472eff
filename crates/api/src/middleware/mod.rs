//! Authentication and permission extractors.
//!
//! - [`auth::MaybeAuthUser`] -- Optional identity; rejects only malformed credentials.
//! - [`permissions::ReadOrAuthenticated`] -- Anonymous callers may only use safe methods;
//!   writers must still exist and be active.

pub mod auth;
pub mod permissions;
