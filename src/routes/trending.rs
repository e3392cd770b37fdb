use axum::{extract::State, Json};

use crate::{models::TitleView, state::AppState};

/// Handler for the trending/discovery feed
///
/// Proxies the provider's trending query. The feed is decorative, so a
/// provider failure degrades to an empty list instead of an error.
pub async fn trending(State(state): State<AppState>) -> Json<Vec<TitleView>> {
    let titles = match state.provider.trending().await {
        Ok(titles) => titles,
        Err(e) => {
            tracing::warn!(error = %e, "Trending lookup failed");
            Vec::new()
        }
    };

    Json(titles.into_iter().map(TitleView::from).collect())
}
