use std::sync::Arc;

use axum_test::TestServer;
use serde_json::json;

use cinematch_api::catalog::CatalogStore;
use cinematch_api::error::{AppError, AppResult};
use cinematch_api::models::{CatalogEntry, EnrichedDetails, RemoteTitle, TitleKind};
use cinematch_api::routes::create_router;
use cinematch_api::services::providers::MetadataProvider;
use cinematch_api::state::AppState;

/// Stub provider with canned responses, standing in for TMDB.
/// Mock expectations live in the crate's unit tests; integration tests
/// only need deterministic data.
#[derive(Clone, Default)]
struct StubProvider {
    search_results: Vec<RemoteTitle>,
    related_results: Vec<RemoteTitle>,
    failing_detail_title: Option<String>,
}

#[async_trait::async_trait]
impl MetadataProvider for StubProvider {
    async fn search_titles(&self, _query: &str) -> AppResult<Vec<RemoteTitle>> {
        Ok(self.search_results.clone())
    }

    async fn related_titles(&self, _title: &RemoteTitle) -> AppResult<Vec<RemoteTitle>> {
        Ok(self.related_results.clone())
    }

    async fn title_details(&self, title: &str) -> AppResult<EnrichedDetails> {
        if self.failing_detail_title.as_deref() == Some(title) {
            return Err(AppError::ExternalApi("stubbed timeout".to_string()));
        }

        Ok(EnrichedDetails {
            genres: format!("{} genres", title),
            runtime: "100 min".to_string(),
            platform: "Netflix".to_string(),
            synopsis: format!("{} synopsis", title),
        })
    }

    async fn trending(&self) -> AppResult<Vec<RemoteTitle>> {
        Ok(self.search_results.clone())
    }
}

fn entry(title: &str, genres: &[&str]) -> CatalogEntry {
    CatalogEntry {
        title: title.to_string(),
        kind: TitleKind::Movie,
        release_year: "2010".to_string(),
        rating: "PG-13".to_string(),
        duration: "120 min".to_string(),
        genres: genres.iter().map(|g| g.to_string()).collect(),
        description: format!("{} description", title),
    }
}

fn remote(id: u64, title: &str) -> RemoteTitle {
    RemoteTitle {
        id,
        title: title.to_string(),
        kind: TitleKind::Movie,
        release_year: Some("2014".to_string()),
        overview: Some(format!("{} overview", title)),
    }
}

fn test_catalog() -> CatalogStore {
    let entries = vec![
        entry("Inception", &["Action", "Sci-Fi"]),
        entry("Inception 2", &["Action", "Sci-Fi"]),
        entry("Avatar", &["Action", "Adventure"]),
        entry("The Notebook", &["Romance"]),
    ];
    let vectors = vec![
        vec![1.0, 0.0],
        vec![0.9, 0.1],
        vec![0.8, 0.2],
        vec![0.0, 1.0],
    ];
    CatalogStore::from_parts(entries, vectors).unwrap()
}

fn create_test_server(provider: StubProvider) -> TestServer {
    let state = AppState::new(Arc::new(test_catalog()), Arc::new(provider), 6, 7);
    TestServer::new(create_router(state)).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server(StubProvider::default());
    let response = server.get("/health").await;
    response.assert_status_ok();
}

#[tokio::test]
async fn test_empty_query_is_rejected() {
    let server = create_test_server(StubProvider::default());

    let response = server
        .post("/api/v1/recommend")
        .json(&json!({ "title": "   " }))
        .await;

    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().unwrap().contains("enter a title"));
}

#[tokio::test]
async fn test_partial_query_returns_ambiguous_candidates() {
    let server = create_test_server(StubProvider::default());

    let response = server
        .post("/api/v1/recommend")
        .json(&json!({ "title": "Incep" }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["status"], "ambiguous");

    let matches = body["matches"].as_array().unwrap();
    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0]["title"], "Inception");
    assert_eq!(matches[1]["title"], "Inception 2");
}

#[tokio::test]
async fn test_exact_match_wins_over_ambiguity() {
    let server = create_test_server(StubProvider::default());

    let response = server
        .post("/api/v1/recommend")
        .json(&json!({ "title": "Inception" }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "results");
    assert_eq!(body["source"], "catalog");
    assert_eq!(body["searched"]["title"], "Inception");

    // The searched title never recommends itself
    let recommendations = body["recommendations"].as_array().unwrap();
    assert_eq!(recommendations.len(), 3);
    assert!(recommendations
        .iter()
        .all(|r| r["title"] != "Inception"));
}

#[tokio::test]
async fn test_exact_match_is_case_insensitive() {
    let server = create_test_server(StubProvider::default());

    let response = server
        .post("/api/v1/recommend")
        .json(&json!({ "title": "inception" }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "results");
    assert_eq!(body["searched"]["title"], "Inception");
}

#[tokio::test]
async fn test_genre_boost_orders_recommendations() {
    let server = create_test_server(StubProvider::default());

    let response = server
        .post("/api/v1/recommend")
        .json(&json!({ "title": "Inception" }))
        .await;

    let body: serde_json::Value = response.json();
    let recommendations = body["recommendations"].as_array().unwrap();

    // Inception 2 shares both genres and nearly the same vector; its
    // boosted score exceeds plain cosine range.
    assert_eq!(recommendations[0]["title"], "Inception 2");
    assert!(recommendations[0]["score"].as_f64().unwrap() > 1.0);
    let shared: Vec<&str> = recommendations[0]["shared_genres"]
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g.as_str().unwrap())
        .collect();
    assert_eq!(shared, vec!["Action", "Sci-Fi"]);

    assert_eq!(recommendations[1]["title"], "Avatar");
    assert_eq!(recommendations[2]["title"], "The Notebook");
}

#[tokio::test]
async fn test_unknown_title_with_empty_fallback_is_not_found() {
    let server = create_test_server(StubProvider::default());

    let response = server
        .post("/api/v1/recommend")
        .json(&json!({ "title": "Nonexistent Title XYZ" }))
        .await;

    response.assert_status(axum::http::StatusCode::NOT_FOUND);
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Title not found");
}

#[tokio::test]
async fn test_unknown_title_falls_back_to_external_search() {
    let provider = StubProvider {
        search_results: vec![remote(1, "Interstellar")],
        related_results: vec![remote(10, "Gravity"), remote(11, "Arrival")],
        failing_detail_title: None,
    };
    let server = create_test_server(provider);

    let response = server
        .post("/api/v1/recommend")
        .json(&json!({ "title": "Interstellar" }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["status"], "results");
    assert_eq!(body["source"], "discovery");
    assert_eq!(body["searched"]["title"], "Interstellar");

    let recommendations = body["recommendations"].as_array().unwrap();
    assert_eq!(recommendations.len(), 2);
    assert_eq!(recommendations[0]["title"], "Gravity");
    // Off-catalog views carry normalized defaults
    assert_eq!(recommendations[0]["rating"], "NR");
}

#[tokio::test]
async fn test_enrichment_failure_keeps_all_items() {
    let provider = StubProvider {
        failing_detail_title: Some("Avatar".to_string()),
        ..StubProvider::default()
    };
    let server = create_test_server(provider);

    let response = server
        .post("/api/v1/recommend")
        .json(&json!({ "title": "Inception", "include_details": true }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], true);

    let recommendations = body["recommendations"].as_array().unwrap();
    assert_eq!(recommendations.len(), 3);
    assert!(recommendations.iter().all(|r| !r["details"].is_null()));

    // The failed item degrades to the placeholder payload
    let avatar = recommendations
        .iter()
        .find(|r| r["title"] == "Avatar")
        .unwrap();
    assert_eq!(avatar["details"]["genres"], "General");
    assert_eq!(avatar["details"]["platform"], "Streaming");

    // The others keep their fetched details
    let other = recommendations
        .iter()
        .find(|r| r["title"] == "Inception 2")
        .unwrap();
    assert_eq!(other["details"]["platform"], "Netflix");
}

#[tokio::test]
async fn test_details_omitted_unless_requested() {
    let server = create_test_server(StubProvider::default());

    let response = server
        .post("/api/v1/recommend")
        .json(&json!({ "title": "Inception" }))
        .await;

    let body: serde_json::Value = response.json();
    let recommendations = body["recommendations"].as_array().unwrap();
    assert!(recommendations.iter().all(|r| r.get("details").is_none()));
}

#[tokio::test]
async fn test_identical_queries_are_idempotent() {
    let server = create_test_server(StubProvider::default());

    let first = server
        .post("/api/v1/recommend")
        .json(&json!({ "title": "Inception" }))
        .await;
    let second = server
        .post("/api/v1/recommend")
        .json(&json!({ "title": "Inception" }))
        .await;

    let first_body: serde_json::Value = first.json();
    let second_body: serde_json::Value = second.json();
    assert_eq!(first_body, second_body);
}

#[tokio::test]
async fn test_trending_proxies_provider_feed() {
    let provider = StubProvider {
        search_results: vec![remote(1, "Dune"), remote(2, "Oppenheimer")],
        ..StubProvider::default()
    };
    let server = create_test_server(provider);

    let response = server.get("/api/v1/trending").await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    let feed = body.as_array().unwrap();
    assert_eq!(feed.len(), 2);
    assert_eq!(feed[0]["title"], "Dune");
}
