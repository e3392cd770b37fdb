use axum::{extract::State, Json};

use crate::{
    engine::{self, Resolution},
    error::{AppError, AppResult},
    models::{RecommendRequest, RecommendResponse, ResultSource, TitleSummary, TitleView},
    state::AppState,
};

/// Handler for the recommendation endpoint
///
/// Resolves the query locally, ranks by boosted similarity, and optionally
/// enriches the result. A local miss falls through to the external search
/// fallback; only a miss there becomes a 404.
pub async fn recommend(
    State(state): State<AppState>,
    Json(request): Json<RecommendRequest>,
) -> AppResult<Json<RecommendResponse>> {
    let query = request.title.trim();
    if query.is_empty() {
        return Err(AppError::InvalidInput(
            "Please enter a title to search for".to_string(),
        ));
    }

    match engine::resolve(&state.catalog, query) {
        Resolution::Ambiguous(positions) => {
            tracing::info!(
                query = %query,
                candidates = positions.len(),
                "Query resolved ambiguously"
            );

            let matches: Vec<TitleSummary> = positions
                .iter()
                .filter_map(|&position| state.catalog.get(position))
                .map(TitleSummary::from)
                .collect();

            Ok(Json(RecommendResponse::ambiguous(matches)))
        }

        Resolution::Unique(position) => {
            // Resolver positions come from the store itself; a miss here
            // means the alignment invariant is broken.
            let searched = state.catalog.get(position).map(TitleView::from).ok_or_else(|| {
                AppError::Internal(format!("resolved position {} out of bounds", position))
            })?;

            let ranked = engine::rank(&state.catalog, position, state.top_n);

            let mut recommendations: Vec<TitleView> = ranked
                .iter()
                .filter_map(|candidate| {
                    state.catalog.get(candidate.position).map(|entry| {
                        let mut view = TitleView::from(entry);
                        view.score = Some(candidate.score);
                        view.shared_genres =
                            Some(candidate.shared_genres.iter().cloned().collect());
                        view
                    })
                })
                .collect();

            if request.include_details {
                attach_details(&state, &mut recommendations).await;
            }

            tracing::info!(
                query = %query,
                position = position,
                recommendations = recommendations.len(),
                "Recommendations ranked"
            );

            Ok(Json(RecommendResponse::results(
                ResultSource::Catalog,
                searched,
                recommendations,
            )))
        }

        Resolution::NotFound => match state.fallback.resolve(query).await {
            Some(result) => {
                let mut recommendations = result.recommendations;
                if request.include_details {
                    attach_details(&state, &mut recommendations).await;
                }

                Ok(Json(RecommendResponse::results(
                    ResultSource::Discovery,
                    result.searched,
                    recommendations,
                )))
            }
            None => Err(AppError::NotFound("Title not found".to_string())),
        },
    }
}

/// Attaches best-effort external details to each view, in ranked order
async fn attach_details(state: &AppState, views: &mut [TitleView]) {
    let titles: Vec<String> = views.iter().map(|view| view.title.clone()).collect();
    let details = state.enrichment.enrich_all(&titles).await;

    for (view, detail) in views.iter_mut().zip(details) {
        view.details = Some(detail);
    }
}
