//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod snippet_repo;
pub mod user_repo;

pub use snippet_repo::SnippetRepo;
pub use user_repo::UserRepo;
