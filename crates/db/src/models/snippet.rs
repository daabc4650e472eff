//! Snippet entity model and DTOs.

use serde::Serialize;
use snippets_core::snippet::SnippetFields;
use snippets_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A snippet row joined with its owner's username.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Snippet {
    pub id: DbId,
    pub owner_id: DbId,
    pub owner_username: String,
    pub title: String,
    pub code: String,
    pub linenos: bool,
    pub language: String,
    pub style: String,
    /// Rendered HTML document; recomputed on every write.
    #[serde(skip)]
    pub highlighted: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Snippet {
    /// The client-writable subset of this row.
    pub fn fields(&self) -> SnippetFields {
        SnippetFields {
            title: self.title.clone(),
            code: self.code.clone(),
            linenos: self.linenos,
            language: self.language.clone(),
            style: self.style.clone(),
        }
    }
}

/// DTO for inserting or fully rewriting a snippet.
///
/// `highlighted` must already be rendered from `fields`.
#[derive(Debug, Clone)]
pub struct WriteSnippet {
    pub fields: SnippetFields,
    pub highlighted: String,
}
