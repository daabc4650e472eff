//! Handlers for the `/snippets` resource.

use axum::extract::{Path, Query, State};
use axum::http::{Method, StatusCode};
use axum::response::Html;
use snippets_core::error::CoreError;
use snippets_core::highlight::render_html;
use snippets_core::snippet::{decode_create, decode_update, SnippetFields, SnippetPayload, UpdateMode};
use snippets_core::types::DbId;
use snippets_db::models::snippet::{Snippet, WriteSnippet};
use snippets_db::repositories::SnippetRepo;

use crate::error::{AppError, AppResult};
use crate::extract::ApiJson;
use crate::links::Links;
use crate::middleware::permissions::{check_owner, ReadOrAuthenticated};
use crate::negotiation::{Format, Rendered};
use crate::query::PaginationParams;
use crate::representation::{encode_snippet, SnippetRepr};
use crate::state::AppState;

const LIST_TITLE: &str = "Snippet List";
const DETAIL_TITLE: &str = "Snippet Instance";

/// GET /api/v1/snippets
pub async fn list(
    State(state): State<AppState>,
    format: Format,
    links: Links,
    Query(params): Query<PaginationParams>,
) -> AppResult<Rendered<Vec<SnippetRepr>>> {
    let (limit, offset) = params.resolve(state.config.page_size);
    let snippets = SnippetRepo::list(&state.pool, limit, offset).await?;
    let total = SnippetRepo::count(&state.pool).await?;

    let body = snippets
        .iter()
        .map(|s| encode_snippet(s, state.config.link_style, &links))
        .collect();
    Ok(Rendered::ok(format, LIST_TITLE, body).with_total_count(total))
}

/// POST /api/v1/snippets
///
/// The requester becomes the owner; any `owner` in the body is ignored.
pub async fn create(
    State(state): State<AppState>,
    gate: ReadOrAuthenticated,
    format: Format,
    links: Links,
    ApiJson(payload): ApiJson<SnippetPayload>,
) -> AppResult<Rendered<SnippetRepr>> {
    let owner_id = gate.require_user_id()?;
    let fields = decode_create(&payload).map_err(CoreError::InvalidFields)?;
    let input = highlighted(fields)?;

    let snippet = SnippetRepo::create(&state.pool, owner_id, &input).await?;
    tracing::info!(snippet_id = snippet.id, owner_id, "Snippet created");

    Ok(Rendered::created(
        format,
        LIST_TITLE,
        encode_snippet(&snippet, state.config.link_style, &links),
    ))
}

/// GET /api/v1/snippets/{id}
pub async fn retrieve(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    format: Format,
    links: Links,
) -> AppResult<Rendered<SnippetRepr>> {
    let snippet = find(&state, id).await?;
    Ok(Rendered::ok(
        format,
        DETAIL_TITLE,
        encode_snippet(&snippet, state.config.link_style, &links),
    ))
}

/// PUT /api/v1/snippets/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    gate: ReadOrAuthenticated,
    format: Format,
    links: Links,
    ApiJson(payload): ApiJson<SnippetPayload>,
) -> AppResult<Rendered<SnippetRepr>> {
    let snippet = write(&state, id, &gate, &payload, UpdateMode::Full).await?;
    Ok(Rendered::ok(
        format,
        DETAIL_TITLE,
        encode_snippet(&snippet, state.config.link_style, &links),
    ))
}

/// PATCH /api/v1/snippets/{id}
pub async fn partial_update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    gate: ReadOrAuthenticated,
    format: Format,
    links: Links,
    ApiJson(payload): ApiJson<SnippetPayload>,
) -> AppResult<Rendered<SnippetRepr>> {
    let snippet = write(&state, id, &gate, &payload, UpdateMode::Partial).await?;
    Ok(Rendered::ok(
        format,
        DETAIL_TITLE,
        encode_snippet(&snippet, state.config.link_style, &links),
    ))
}

/// DELETE /api/v1/snippets/{id}
pub async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    gate: ReadOrAuthenticated,
) -> AppResult<StatusCode> {
    let snippet = find(&state, id).await?;
    check_owner(&Method::DELETE, gate.user_id(), snippet.owner_id)?;

    if !SnippetRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(snippet_id = id, owner_id = snippet.owner_id, "Snippet deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/snippets/{id}/highlight
///
/// Serves the stored highlighted document verbatim, whatever the
/// negotiated format.
pub async fn highlight(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Html<String>> {
    let snippet = find(&state, id).await?;
    Ok(Html(snippet.highlighted))
}

/// Shared PUT/PATCH path: existence, then ownership, then validation.
async fn write(
    state: &AppState,
    id: DbId,
    gate: &ReadOrAuthenticated,
    payload: &SnippetPayload,
    mode: UpdateMode,
) -> AppResult<Snippet> {
    let method = match mode {
        UpdateMode::Full => Method::PUT,
        UpdateMode::Partial => Method::PATCH,
    };

    let existing = find(state, id).await?;
    check_owner(&method, gate.user_id(), existing.owner_id)?;

    let fields =
        decode_update(&existing.fields(), payload, mode).map_err(CoreError::InvalidFields)?;
    let input = highlighted(fields)?;

    let snippet = SnippetRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(snippet_id = id, owner_id = snippet.owner_id, "Snippet updated");
    Ok(snippet)
}

async fn find(state: &AppState, id: DbId) -> AppResult<Snippet> {
    SnippetRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))
}

/// Render the highlighted document for validated fields.
fn highlighted(fields: SnippetFields) -> AppResult<WriteSnippet> {
    let highlighted = render_html(
        &fields.title,
        &fields.code,
        &fields.language,
        &fields.style,
        fields.linenos,
    )?;
    Ok(WriteSnippet {
        fields,
        highlighted,
    })
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Snippet",
        id,
    })
}
