use serde::{Deserialize, Serialize};

/// Content kind for a catalog or provider title
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TitleKind {
    Movie,
    Series,
}

impl TitleKind {
    /// Parses the free-form kind strings found in catalog snapshots
    /// ("Movie", "TV Show", "series", ...). Unknown values default to Movie.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "tv show" | "tv_series" | "series" | "tv" => TitleKind::Series,
            _ => TitleKind::Movie,
        }
    }
}

/// One catalog row. Identity is the row position in the store,
/// which stays stable for the process lifetime.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CatalogEntry {
    pub title: String,
    pub kind: TitleKind,
    pub release_year: String,
    pub rating: String,
    pub duration: String,
    pub genres: Vec<String>,
    pub description: String,
}

/// Short form used when a query resolves ambiguously
#[derive(Debug, Clone, Serialize)]
pub struct TitleSummary {
    pub title: String,
    pub release_year: String,
    pub kind: TitleKind,
}

impl From<&CatalogEntry> for TitleSummary {
    fn from(entry: &CatalogEntry) -> Self {
        Self {
            title: entry.title.clone(),
            release_year: entry.release_year.clone(),
            kind: entry.kind,
        }
    }
}

/// Canonical title view returned to clients, for both catalog rows and
/// normalized provider payloads
#[derive(Debug, Clone, Serialize)]
pub struct TitleView {
    pub title: String,
    pub kind: TitleKind,
    pub release_year: String,
    pub rating: String,
    pub duration: String,
    pub genres: Vec<String>,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shared_genres: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<EnrichedDetails>,
}

impl From<&CatalogEntry> for TitleView {
    fn from(entry: &CatalogEntry) -> Self {
        Self {
            title: entry.title.clone(),
            kind: entry.kind,
            release_year: entry.release_year.clone(),
            rating: entry.rating.clone(),
            duration: entry.duration.clone(),
            genres: entry.genres.clone(),
            description: entry.description.clone(),
            score: None,
            shared_genres: None,
            details: None,
        }
    }
}

impl From<RemoteTitle> for TitleView {
    fn from(remote: RemoteTitle) -> Self {
        Self {
            title: remote.title,
            kind: remote.kind,
            release_year: remote.release_year.unwrap_or_else(|| "N/A".to_string()),
            rating: "NR".to_string(),
            duration: "N/A".to_string(),
            genres: Vec::new(),
            description: remote
                .overview
                .unwrap_or_else(|| "No description available.".to_string()),
            score: None,
            shared_genres: None,
            details: None,
        }
    }
}

/// Normalized form of any external provider payload. Provider response
/// shapes are converted to this at the adapter boundary before they touch
/// ranking or formatting logic.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteTitle {
    pub id: u64,
    pub title: String,
    pub kind: TitleKind,
    pub release_year: Option<String>,
    pub overview: Option<String>,
}

/// Externally fetched details attached to recommended titles
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EnrichedDetails {
    pub genres: String,
    pub runtime: String,
    pub platform: String,
    pub synopsis: String,
}

impl EnrichedDetails {
    /// Placeholder returned whenever an external lookup fails.
    /// Enrichment is best-effort and must never fail the request.
    pub fn placeholder() -> Self {
        Self {
            genres: "General".to_string(),
            runtime: "N/A".to_string(),
            platform: "Streaming".to_string(),
            synopsis: "No additional details available.".to_string(),
        }
    }
}

// ============================================================================
// Request / response wire types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    pub title: String,
    #[serde(default)]
    pub include_details: bool,
}

/// Where a resolved result came from
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ResultSource {
    /// Resolved locally against the catalog and ranked by similarity
    Catalog,
    /// Reconstructed from the external search index after a local miss
    Discovery,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum RecommendOutcome {
    Ambiguous {
        matches: Vec<TitleSummary>,
    },
    Results {
        source: ResultSource,
        searched: TitleView,
        recommendations: Vec<TitleView>,
    },
}

#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    pub success: bool,
    #[serde(flatten)]
    pub outcome: RecommendOutcome,
}

impl RecommendResponse {
    pub fn ambiguous(matches: Vec<TitleSummary>) -> Self {
        Self {
            success: true,
            outcome: RecommendOutcome::Ambiguous { matches },
        }
    }

    pub fn results(
        source: ResultSource,
        searched: TitleView,
        recommendations: Vec<TitleView>,
    ) -> Self {
        Self {
            success: true,
            outcome: RecommendOutcome::Results {
                source,
                searched,
                recommendations,
            },
        }
    }
}

// ============================================================================
// TMDB API types
// ============================================================================

/// Raw list payload from TMDB search, recommendations, and trending endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbListResponse {
    #[serde(default)]
    pub results: Vec<TmdbTitle>,
}

/// One TMDB list entry. Movies carry `title`/`release_date`,
/// series carry `name`/`first_air_date`.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbTitle {
    pub id: u64,
    #[serde(default)]
    pub media_type: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
}

impl From<TmdbTitle> for RemoteTitle {
    fn from(raw: TmdbTitle) -> Self {
        let kind = match raw.media_type.as_deref() {
            Some("tv") => TitleKind::Series,
            _ => TitleKind::Movie,
        };

        let title = raw
            .title
            .or(raw.name)
            .unwrap_or_else(|| "Unknown".to_string());

        // "2010-07-15" -> "2010"
        let release_year = raw
            .release_date
            .or(raw.first_air_date)
            .filter(|d| d.len() >= 4)
            .map(|d| d[..4].to_string());

        RemoteTitle {
            id: raw.id,
            title,
            kind,
            release_year,
            overview: raw.overview.filter(|o| !o.is_empty()),
        }
    }
}

/// Detail payload from GET /movie/{id} or /tv/{id}
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbDetails {
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub episode_run_time: Vec<u32>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default, rename = "watch/providers")]
    pub watch_providers: Option<TmdbWatchProviders>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbGenre {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbWatchProviders {
    #[serde(default)]
    pub results: std::collections::HashMap<String, TmdbCountryProviders>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbCountryProviders {
    #[serde(default)]
    pub flatrate: Vec<TmdbProviderEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbProviderEntry {
    pub provider_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_kind_parse() {
        assert_eq!(TitleKind::parse("Movie"), TitleKind::Movie);
        assert_eq!(TitleKind::parse("TV Show"), TitleKind::Series);
        assert_eq!(TitleKind::parse("series"), TitleKind::Series);
        assert_eq!(TitleKind::parse("something else"), TitleKind::Movie);
    }

    #[test]
    fn test_tmdb_title_to_remote_movie() {
        let raw = TmdbTitle {
            id: 27205,
            media_type: Some("movie".to_string()),
            title: Some("Inception".to_string()),
            name: None,
            release_date: Some("2010-07-15".to_string()),
            first_air_date: None,
            overview: Some("A thief who steals corporate secrets".to_string()),
        };

        let remote: RemoteTitle = raw.into();
        assert_eq!(remote.id, 27205);
        assert_eq!(remote.title, "Inception");
        assert_eq!(remote.kind, TitleKind::Movie);
        assert_eq!(remote.release_year, Some("2010".to_string()));
    }

    #[test]
    fn test_tmdb_title_to_remote_series_uses_name_and_air_date() {
        let raw = TmdbTitle {
            id: 1396,
            media_type: Some("tv".to_string()),
            title: None,
            name: Some("Breaking Bad".to_string()),
            release_date: None,
            first_air_date: Some("2008-01-20".to_string()),
            overview: None,
        };

        let remote: RemoteTitle = raw.into();
        assert_eq!(remote.title, "Breaking Bad");
        assert_eq!(remote.kind, TitleKind::Series);
        assert_eq!(remote.release_year, Some("2008".to_string()));
        assert_eq!(remote.overview, None);
    }

    #[test]
    fn test_tmdb_title_to_remote_short_date_dropped() {
        let raw = TmdbTitle {
            id: 1,
            media_type: Some("movie".to_string()),
            title: Some("Oddity".to_string()),
            name: None,
            release_date: Some("20".to_string()),
            first_air_date: None,
            overview: Some(String::new()),
        };

        let remote: RemoteTitle = raw.into();
        assert_eq!(remote.release_year, None);
        assert_eq!(remote.overview, None);
    }

    #[test]
    fn test_remote_title_to_view_fills_defaults() {
        let remote = RemoteTitle {
            id: 42,
            title: "Obscure Film".to_string(),
            kind: TitleKind::Movie,
            release_year: None,
            overview: None,
        };

        let view: TitleView = remote.into();
        assert_eq!(view.release_year, "N/A");
        assert_eq!(view.rating, "NR");
        assert_eq!(view.duration, "N/A");
        assert!(view.genres.is_empty());
        assert_eq!(view.description, "No description available.");
    }

    #[test]
    fn test_ambiguous_response_shape() {
        let response = RecommendResponse::ambiguous(vec![TitleSummary {
            title: "Inception".to_string(),
            release_year: "2010".to_string(),
            kind: TitleKind::Movie,
        }]);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["status"], "ambiguous");
        assert_eq!(json["matches"][0]["title"], "Inception");
    }

    #[test]
    fn test_results_response_shape() {
        let entry = CatalogEntry {
            title: "Avatar".to_string(),
            kind: TitleKind::Movie,
            release_year: "2009".to_string(),
            rating: "PG-13".to_string(),
            duration: "162 min".to_string(),
            genres: vec!["Action".to_string(), "Sci-Fi".to_string()],
            description: "Blue people".to_string(),
        };

        let response =
            RecommendResponse::results(ResultSource::Catalog, TitleView::from(&entry), vec![]);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["status"], "results");
        assert_eq!(json["source"], "catalog");
        assert_eq!(json["searched"]["title"], "Avatar");
        // Optional scoring fields are omitted until populated
        assert!(json["searched"].get("score").is_none());
    }

    #[test]
    fn test_tmdb_details_deserialization() {
        let json = r#"{
            "genres": [{"id": 28, "name": "Action"}, {"id": 878, "name": "Science Fiction"}],
            "runtime": 148,
            "overview": "Dreams within dreams",
            "watch/providers": {
                "results": {
                    "US": {"flatrate": [{"provider_id": 8, "provider_name": "Netflix"}]}
                }
            }
        }"#;

        let details: TmdbDetails = serde_json::from_str(json).unwrap();
        assert_eq!(details.genres.len(), 2);
        assert_eq!(details.runtime, Some(148));
        let us = details.watch_providers.unwrap().results["US"].clone();
        assert_eq!(us.flatrate[0].provider_name, "Netflix");
    }
}
