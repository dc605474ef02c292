//! Process-scoped dependencies handed to every handler.

use crate::services::{catalog_service::ProductCatalog, link_service::AssetLinkIssuer};
use std::sync::Arc;

/// Constructed once in `main`; cloning only bumps reference counts.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn ProductCatalog>,
    pub links: Arc<dyn AssetLinkIssuer>,
    /// Object key signed on every `GET /`.
    pub banner_key: Arc<str>,
}

impl AppState {
    pub fn new(
        catalog: Arc<dyn ProductCatalog>,
        links: Arc<dyn AssetLinkIssuer>,
        banner_key: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            catalog,
            links,
            banner_key: banner_key.into(),
        }
    }
}
