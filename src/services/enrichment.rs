use std::sync::Arc;

use futures::StreamExt;

use crate::models::EnrichedDetails;
use crate::services::providers::MetadataProvider;

/// Best-effort detail enrichment for ranked recommendation lists
///
/// External lookups run concurrently under a fixed cap so a page of
/// recommendations costs roughly one provider round trip, and results are
/// collected by original index so the ranked order survives out-of-order
/// completion. Any per-item failure is replaced with the documented
/// placeholder; enrichment never fails the surrounding request.
pub struct EnrichmentService {
    provider: Arc<dyn MetadataProvider>,
    concurrency: usize,
}

impl EnrichmentService {
    pub fn new(provider: Arc<dyn MetadataProvider>, concurrency: usize) -> Self {
        Self {
            provider,
            concurrency: concurrency.max(1),
        }
    }

    /// Fetches details for each title, preserving input order.
    /// Always returns exactly one entry per input title.
    pub async fn enrich_all(&self, titles: &[String]) -> Vec<EnrichedDetails> {
        let lookups = titles.iter().enumerate().map(|(index, title)| {
            let provider = Arc::clone(&self.provider);
            let title = title.clone();

            async move {
                match provider.title_details(&title).await {
                    Ok(details) => (index, details),
                    Err(e) => {
                        tracing::warn!(
                            title = %title,
                            error = %e,
                            "Detail lookup failed, using placeholder"
                        );
                        (index, EnrichedDetails::placeholder())
                    }
                }
            }
        });

        let mut slots: Vec<Option<EnrichedDetails>> = vec![None; titles.len()];

        let mut stream = futures::stream::iter(lookups).buffer_unordered(self.concurrency);
        while let Some((index, details)) = stream.next().await {
            slots[index] = Some(details);
        }

        slots
            .into_iter()
            .map(|details| details.unwrap_or_else(EnrichedDetails::placeholder))
            .collect()
    }
}
