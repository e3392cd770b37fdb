/// TMDB API provider
///
/// API flow:
/// 1. Search: /search/multi → mixed movie/tv/person results
/// 2. Related: /movie/{id}/recommendations or /tv/{id}/recommendations
/// 3. Details: /movie/{id} or /tv/{id} with appended watch/providers
/// 4. Trending: /trending/all/week
///
/// Person results are filtered out during normalization; everything else
/// is converted to `RemoteTitle` before leaving this module.
use std::time::Duration;

use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;

use crate::{
    error::{AppError, AppResult},
    models::{EnrichedDetails, RemoteTitle, TitleKind, TmdbDetails, TmdbListResponse},
    services::providers::MetadataProvider,
};

/// Country key used when picking a streaming platform from watch providers
const WATCH_REGION: &str = "US";

pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl TmdbProvider {
    /// Creates a provider with a bounded per-call timeout.
    /// The client is reused across requests for connection pooling.
    pub fn new(api_key: String, api_url: String, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url,
        })
    }

    async fn fetch_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> AppResult<T> {
        let url = format!("{}{}", self.api_url, path);

        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(query)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDB returned status {}: {}",
                status, body
            )));
        }

        Ok(response.json().await?)
    }

    /// Keeps movie and tv rows, drops person and unknown media types
    fn normalize_list(&self, payload: TmdbListResponse) -> Vec<RemoteTitle> {
        payload
            .results
            .into_iter()
            .filter(|raw| matches!(raw.media_type.as_deref(), Some("movie") | Some("tv") | None))
            .map(RemoteTitle::from)
            .collect()
    }

    fn detail_path(kind: TitleKind, id: u64) -> String {
        match kind {
            TitleKind::Movie => format!("/movie/{}", id),
            TitleKind::Series => format!("/tv/{}", id),
        }
    }

    fn build_details(details: TmdbDetails) -> EnrichedDetails {
        let genres = if details.genres.is_empty() {
            "General".to_string()
        } else {
            details
                .genres
                .iter()
                .map(|g| g.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };

        let minutes = details
            .runtime
            .or_else(|| details.episode_run_time.first().copied());
        let runtime = match minutes {
            Some(m) if m > 0 => format!("{} min", m),
            _ => "N/A".to_string(),
        };

        let platform = details
            .watch_providers
            .as_ref()
            .and_then(|wp| wp.results.get(WATCH_REGION))
            .and_then(|country| country.flatrate.first())
            .map(|p| p.provider_name.clone())
            .unwrap_or_else(|| "Streaming".to_string());

        let synopsis = details
            .overview
            .filter(|o| !o.is_empty())
            .unwrap_or_else(|| "No additional details available.".to_string());

        EnrichedDetails {
            genres,
            runtime,
            platform,
            synopsis,
        }
    }
}

#[async_trait::async_trait]
impl MetadataProvider for TmdbProvider {
    async fn search_titles(&self, query: &str) -> AppResult<Vec<RemoteTitle>> {
        let payload: TmdbListResponse = self
            .fetch_json(
                "/search/multi",
                &[("query", query), ("include_adult", "false")],
            )
            .await?;

        let titles = self.normalize_list(payload);

        tracing::info!(
            query = %query,
            results = titles.len(),
            provider = "tmdb",
            "Title search completed"
        );

        Ok(titles)
    }

    async fn related_titles(&self, title: &RemoteTitle) -> AppResult<Vec<RemoteTitle>> {
        let path = format!("{}/recommendations", Self::detail_path(title.kind, title.id));
        let payload: TmdbListResponse = self.fetch_json(&path, &[]).await?;

        let titles = self.normalize_list(payload);

        tracing::info!(
            title_id = title.id,
            results = titles.len(),
            provider = "tmdb",
            "Related titles fetched"
        );

        Ok(titles)
    }

    async fn title_details(&self, title: &str) -> AppResult<EnrichedDetails> {
        // Resolve the name to a provider id first, then fetch full details
        // with the watch-provider list appended to save a round trip.
        let hits = self.search_titles(title).await?;
        let top = hits.into_iter().next().ok_or_else(|| {
            AppError::ExternalApi(format!("No TMDB match for title '{}'", title))
        })?;

        let path = Self::detail_path(top.kind, top.id);
        let details: TmdbDetails = self
            .fetch_json(&path, &[("append_to_response", "watch/providers")])
            .await?;

        Ok(Self::build_details(details))
    }

    async fn trending(&self) -> AppResult<Vec<RemoteTitle>> {
        let payload: TmdbListResponse = self.fetch_json("/trending/all/week", &[]).await?;
        Ok(self.normalize_list(payload))
    }
}
