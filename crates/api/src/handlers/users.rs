//! Handlers for the read-only `/users` resource.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use snippets_core::error::CoreError;
use snippets_core::types::DbId;
use snippets_db::repositories::{SnippetRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::links::Links;
use crate::negotiation::{Format, Rendered};
use crate::query::PaginationParams;
use crate::representation::{encode_user, UserRepr};
use crate::state::AppState;

/// GET /api/v1/users
pub async fn list(
    State(state): State<AppState>,
    format: Format,
    links: Links,
    Query(params): Query<PaginationParams>,
) -> AppResult<Rendered<Vec<UserRepr>>> {
    let (limit, offset) = params.resolve(state.config.page_size);
    let users = UserRepo::list(&state.pool, limit, offset).await?;
    let total = UserRepo::count(&state.pool).await?;

    let user_ids: Vec<DbId> = users.iter().map(|u| u.id).collect();
    let mut owned: HashMap<DbId, Vec<DbId>> = HashMap::new();
    for (owner_id, snippet_id) in SnippetRepo::list_ids_by_owners(&state.pool, &user_ids).await? {
        owned.entry(owner_id).or_default().push(snippet_id);
    }

    let body = users
        .iter()
        .map(|user| {
            let snippet_ids = owned.get(&user.id).map(Vec::as_slice).unwrap_or_default();
            encode_user(user, snippet_ids, state.config.link_style, &links)
        })
        .collect();
    Ok(Rendered::ok(format, "User List", body).with_total_count(total))
}

/// GET /api/v1/users/{id}
pub async fn retrieve(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    format: Format,
    links: Links,
) -> AppResult<Rendered<UserRepr>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    let snippet_ids: Vec<DbId> = SnippetRepo::list_ids_by_owners(&state.pool, &[id])
        .await?
        .into_iter()
        .map(|(_, snippet_id)| snippet_id)
        .collect();

    Ok(Rendered::ok(
        format,
        "User Instance",
        encode_user(&user, &snippet_ids, state.config.link_style, &links),
    ))
}
