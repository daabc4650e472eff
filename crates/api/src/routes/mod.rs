pub mod auth;
pub mod health;
pub mod snippets;
pub mod users;

use axum::Router;

use crate::state::AppState;
use crate::viewset::DefaultRouter;

/// Mount point of the versioned API.
pub const API_PREFIX: &str = "/api/v1";

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /                              api root (resource locators)
///
/// /auth/register                 register (public)
/// /auth/login                    login (public)
///
/// /snippets                      list, create
/// /snippets/{id}                 retrieve, update, partial_update, destroy
/// /snippets/{id}/highlight       highlighted HTML
///
/// /users                         list
/// /users/{id}                    retrieve
/// ```
pub fn api_routes() -> Router<AppState> {
    DefaultRouter::new()
        .register(snippets::resource())
        .register(users::resource())
        .into_router()
        .nest("/auth", auth::router())
}
