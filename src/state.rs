use std::sync::Arc;

use crate::catalog::CatalogStore;
use crate::services::enrichment::EnrichmentService;
use crate::services::fallback::FallbackService;
use crate::services::providers::MetadataProvider;

/// Shared application state
///
/// The catalog is loaded once at startup and never written afterwards,
/// so handlers share it through plain `Arc` handles without locking.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogStore>,
    pub provider: Arc<dyn MetadataProvider>,
    pub enrichment: Arc<EnrichmentService>,
    pub fallback: Arc<FallbackService>,
    /// Recommendations returned per request
    pub top_n: usize,
}

impl AppState {
    pub fn new(
        catalog: Arc<CatalogStore>,
        provider: Arc<dyn MetadataProvider>,
        top_n: usize,
        enrich_concurrency: usize,
    ) -> Self {
        let enrichment = Arc::new(EnrichmentService::new(
            Arc::clone(&provider),
            enrich_concurrency,
        ));
        let fallback = Arc::new(FallbackService::new(Arc::clone(&provider), top_n));

        Self {
            catalog,
            provider,
            enrichment,
            fallback,
            top_n,
        }
    }
}
