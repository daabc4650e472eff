pub mod auth;
pub mod root;
pub mod snippets;
pub mod users;
