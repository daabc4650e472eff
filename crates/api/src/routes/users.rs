//! Resource declaration for the read-only `/users`.

use axum::routing::get;

use crate::handlers::users;
use crate::representation::USERS;
use crate::viewset::Resource;

/// ```text
/// GET /      -> list
/// GET /{id}  -> retrieve
/// ```
pub fn resource() -> Resource {
    Resource::new(USERS, get(users::list), get(users::retrieve))
}
