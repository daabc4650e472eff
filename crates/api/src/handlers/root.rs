//! API root discovery endpoint.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::links::Links;
use crate::negotiation::{Format, Rendered};

/// GET /api/v1
///
/// Maps every registered resource prefix to its collection locator.
pub async fn api_root(
    prefixes: Arc<[&'static str]>,
    format: Format,
    links: Links,
) -> Rendered<BTreeMap<&'static str, String>> {
    let body = prefixes
        .iter()
        .map(|prefix| (*prefix, links.collection(prefix)))
        .collect();
    Rendered::ok(format, "Api Root", body)
}
