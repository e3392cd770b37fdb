use std::sync::Arc;

use crate::models::TitleView;
use crate::services::providers::MetadataProvider;

/// Result reconstructed from the external search index after a local miss
#[derive(Debug)]
pub struct FallbackResult {
    pub searched: TitleView,
    pub recommendations: Vec<TitleView>,
}

/// Resolves off-catalog queries through the external provider.
///
/// Triggered only when local resolution finds nothing. The top search hit
/// becomes the resolved item and the provider's own related-titles signal
/// stands in for the local ranker, since no local vector exists for an
/// off-catalog item. Provider failures are contained here: a failed search
/// behaves as a miss, a failed related lookup yields an empty list.
pub struct FallbackService {
    provider: Arc<dyn MetadataProvider>,
    limit: usize,
}

impl FallbackService {
    pub fn new(provider: Arc<dyn MetadataProvider>, limit: usize) -> Self {
        Self { provider, limit }
    }

    /// Returns `None` when the external search also misses, which is the
    /// pipeline's single terminal not-found state.
    pub async fn resolve(&self, query: &str) -> Option<FallbackResult> {
        let hits = match self.provider.search_titles(query).await {
            Ok(hits) => hits,
            Err(e) => {
                tracing::warn!(query = %query, error = %e, "Fallback search failed");
                return None;
            }
        };

        let top = hits.into_iter().next()?;

        tracing::info!(
            query = %query,
            resolved = %top.title,
            "Query resolved through external search"
        );

        let related = match self.provider.related_titles(&top).await {
            Ok(related) => related,
            Err(e) => {
                tracing::warn!(
                    title_id = top.id,
                    error = %e,
                    "Related titles lookup failed, returning resolved item only"
                );
                Vec::new()
            }
        };

        let recommendations = related
            .into_iter()
            .take(self.limit)
            .map(TitleView::from)
            .collect();

        Some(FallbackResult {
            searched: top.into(),
            recommendations,
        })
    }
}
