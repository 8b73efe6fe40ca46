use super::authorize;
use crate::api::ApiClient;
use crate::errors::AppResult;
use crate::models::catalog::{CatalogItem, CatalogKind};
use crate::models::envelope::decode_payload;
use crate::session::SessionContext;
use tracing::debug;

/// Read-only reference lists. Each kind lives behind its own GET endpoint,
/// so the path is resolved at runtime from [`CatalogKind::path`].
pub struct CatalogService<'a> {
    api: &'a ApiClient,
    session: &'a SessionContext,
}

impl<'a> CatalogService<'a> {
    pub fn new(api: &'a ApiClient, session: &'a SessionContext) -> Self {
        Self { api, session }
    }

    pub async fn list(&self, kind: CatalogKind) -> AppResult<Vec<CatalogItem>> {
        authorize(self.api, self.session)?;
        let body = self.api.get(kind.path(), true).await?;
        let items: Vec<CatalogItem> = decode_payload(body)?;
        debug!(kind = kind.title(), count = items.len(), "catalog loaded");
        Ok(items)
    }

    pub async fn faculties(&self) -> AppResult<Vec<CatalogItem>> {
        self.list(CatalogKind::Faculties).await
    }

    pub async fn careers(&self) -> AppResult<Vec<CatalogItem>> {
        self.list(CatalogKind::Careers).await
    }

    /// Careers belonging to one faculty.
    pub async fn careers_of(&self, faculty_id: &str) -> AppResult<Vec<CatalogItem>> {
        let careers = self.careers().await?;
        Ok(filter_by_parent(careers, faculty_id))
    }

    pub async fn campuses(&self) -> AppResult<Vec<CatalogItem>> {
        self.list(CatalogKind::Campuses).await
    }

    pub async fn spaces(&self) -> AppResult<Vec<CatalogItem>> {
        self.list(CatalogKind::Spaces).await
    }

    pub async fn categories(&self) -> AppResult<Vec<CatalogItem>> {
        self.list(CatalogKind::Categories).await
    }

    pub async fn event_types(&self) -> AppResult<Vec<CatalogItem>> {
        self.list(CatalogKind::EventTypes).await
    }
}

pub fn filter_by_parent(items: Vec<CatalogItem>, parent_id: &str) -> Vec<CatalogItem> {
    items
        .into_iter()
        .filter(|i| i.parent_id.as_deref() == Some(parent_id))
        .collect()
}
