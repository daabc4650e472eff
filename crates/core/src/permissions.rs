//! Write-permission predicates.
//!
//! Reads are open to everyone. Writes need an authenticated requester, and
//! object-level writes additionally need the requester to own the object.
//! Both checks are pure; the HTTP layer turns a `false` into a 403.

use crate::types::DbId;

/// HTTP methods that never mutate state.
pub const SAFE_METHODS: &[&str] = &["GET", "HEAD", "OPTIONS"];

/// Whether `method` is one of [`SAFE_METHODS`].
pub fn is_safe_method(method: &str) -> bool {
    SAFE_METHODS.contains(&method)
}

/// View-level gate: anonymous requesters may only use safe methods.
pub fn is_authenticated_or_read_only(method: &str, requester: Option<DbId>) -> bool {
    is_safe_method(method) || requester.is_some()
}

/// Object-level gate: unsafe methods are limited to the object's owner.
///
/// An anonymous requester never matches an owner, so every unsafe method
/// is denied for it.
pub fn is_owner_or_read_only(method: &str, requester: Option<DbId>, owner: DbId) -> bool {
    if is_safe_method(method) {
        return true;
    }
    requester == Some(owner)
}
