//! Resource declaration for `/snippets`.

use axum::routing::get;

use crate::handlers::snippets;
use crate::representation::{HIGHLIGHT_ACTION, SNIPPETS};
use crate::viewset::Resource;

/// ```text
/// GET    /                -> list
/// POST   /                -> create
/// GET    /{id}            -> retrieve
/// PUT    /{id}            -> update
/// PATCH  /{id}            -> partial_update
/// DELETE /{id}            -> destroy
/// GET    /{id}/highlight  -> highlight
/// ```
pub fn resource() -> Resource {
    Resource::new(
        SNIPPETS,
        get(snippets::list).post(snippets::create),
        get(snippets::retrieve)
            .put(snippets::update)
            .patch(snippets::partial_update)
            .delete(snippets::destroy),
    )
    .detail_action(HIGHLIGHT_ACTION, get(snippets::highlight))
}
