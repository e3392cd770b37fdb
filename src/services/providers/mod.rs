/// External metadata provider abstraction
///
/// The provider is a black-box lookup service with latency and failure
/// modes of its own. Every response shape is normalized into
/// [`RemoteTitle`] / [`EnrichedDetails`] at this boundary, so nothing
/// downstream ever sees a raw provider payload.
use crate::{
    error::AppResult,
    models::{EnrichedDetails, RemoteTitle},
};

pub mod tmdb;

/// Trait for external metadata providers
///
/// Covers the four outbound operations the service needs: free-text title
/// search, the provider's own related-titles signal, per-title detail
/// lookup, and the trending/discovery feed.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Search the provider's index by free text
    async fn search_titles(&self, query: &str) -> AppResult<Vec<RemoteTitle>>;

    /// Fetch the provider's related/recommended titles for a known title
    async fn related_titles(&self, title: &RemoteTitle) -> AppResult<Vec<RemoteTitle>>;

    /// Fetch genre, runtime, availability, and synopsis for a title name
    async fn title_details(&self, title: &str) -> AppResult<EnrichedDetails>;

    /// Fetch the provider's trending/discovery feed
    async fn trending(&self) -> AppResult<Vec<RemoteTitle>>;
}
