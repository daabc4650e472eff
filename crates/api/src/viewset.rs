//! Route generation from declared resource actions.
//!
//! A [`Resource`] bundles the collection, detail and extra per-object
//! routes of one entity type. [`DefaultRouter`] expands every registered
//! resource into concrete paths and adds a root endpoint that lists each
//! collection's locator.

use std::sync::Arc;

use axum::routing::{get, MethodRouter};
use axum::Router;

use crate::handlers::root;
use crate::links::Links;
use crate::negotiation::Format;
use crate::state::AppState;

/// The routes of one entity type.
pub struct Resource {
    prefix: &'static str,
    collection: MethodRouter<AppState>,
    detail: MethodRouter<AppState>,
    detail_actions: Vec<(&'static str, MethodRouter<AppState>)>,
}

impl Resource {
    /// `collection` serves `/{prefix}`, `detail` serves `/{prefix}/{id}`.
    pub fn new(
        prefix: &'static str,
        collection: MethodRouter<AppState>,
        detail: MethodRouter<AppState>,
    ) -> Self {
        Self {
            prefix,
            collection,
            detail,
            detail_actions: Vec::new(),
        }
    }

    /// Add an extra per-object route served at `/{prefix}/{id}/{name}`.
    pub fn detail_action(mut self, name: &'static str, route: MethodRouter<AppState>) -> Self {
        self.detail_actions.push((name, route));
        self
    }

    pub fn prefix(&self) -> &'static str {
        self.prefix
    }

    /// Every path this resource expands to, in registration order.
    pub fn paths(&self) -> Vec<String> {
        let mut paths = vec![
            format!("/{}", self.prefix),
            format!("/{}/{{id}}", self.prefix),
        ];
        paths.extend(
            self.detail_actions
                .iter()
                .map(|(name, _)| format!("/{}/{{id}}/{name}", self.prefix)),
        );
        paths
    }
}

/// Collects resources and builds the final router.
#[derive(Default)]
pub struct DefaultRouter {
    resources: Vec<Resource>,
}

impl DefaultRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(mut self, resource: Resource) -> Self {
        self.resources.push(resource);
        self
    }

    /// Registered prefixes in registration order.
    pub fn prefixes(&self) -> Vec<&'static str> {
        self.resources.iter().map(Resource::prefix).collect()
    }

    /// Every generated path, root included.
    pub fn paths(&self) -> Vec<String> {
        let mut paths = vec!["/".to_string()];
        paths.extend(self.resources.iter().flat_map(Resource::paths));
        paths
    }

    /// Expand all resources into a router with a root discovery endpoint at `/`.
    pub fn into_router(self) -> Router<AppState> {
        tracing::debug!(paths = ?self.paths(), "Registering API routes");
        let prefixes: Arc<[&'static str]> = self.prefixes().into();
        let root_route = get(move |format: Format, links: Links| {
            root::api_root(Arc::clone(&prefixes), format, links)
        });

        let mut router = Router::new().route("/", root_route);
        for resource in self.resources {
            let prefix = resource.prefix;
            router = router
                .route(&format!("/{prefix}"), resource.collection)
                .route(&format!("/{prefix}/{{id}}"), resource.detail);
            for (name, route) in resource.detail_actions {
                router = router.route(&format!("/{prefix}/{{id}}/{name}"), route);
            }
        }
        router
    }
}
