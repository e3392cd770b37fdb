use std::collections::BTreeSet;

use crate::catalog::CatalogStore;

/// Additive score bump per shared genre tag
const GENRE_BOOST: f32 = 0.1;

/// Score assigned to the target's own row. Strictly below the cosine range
/// so the target sorts last and can never be selected, even after the
/// boost re-sorts everything else.
const SELF_SCORE: f32 = -2.0;

/// One scored recommendation candidate
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    /// Row position in the catalog
    pub position: usize,
    /// Raw cosine similarity, in [-1, 1]
    pub similarity: f32,
    /// similarity + GENRE_BOOST * |shared genres|, uncapped
    pub score: f32,
    /// Genre tags shared with the target, kept for response transparency
    pub shared_genres: BTreeSet<String>,
}

/// Ranks every other catalog row against the target position.
///
/// Cosine similarity against each row, plus an additive boost per genre
/// tag shared with the target. Results are sorted by descending score with
/// ties broken by ascending catalog position, so identical inputs always
/// produce identical output. Returns at most `limit` candidates and never
/// the target itself.
pub fn rank(store: &CatalogStore, position: usize, limit: usize) -> Vec<ScoredCandidate> {
    let Some(target_vector) = store.vector(position) else {
        return Vec::new();
    };

    let target_genres: BTreeSet<&str> = store
        .get(position)
        .map(|entry| entry.genres.iter().map(String::as_str).collect())
        .unwrap_or_default();

    let mut candidates: Vec<ScoredCandidate> = Vec::with_capacity(store.len());

    for (index, entry) in store.entries().iter().enumerate() {
        if index == position {
            candidates.push(ScoredCandidate {
                position: index,
                similarity: SELF_SCORE,
                score: SELF_SCORE,
                shared_genres: BTreeSet::new(),
            });
            continue;
        }

        let similarity = store
            .vector(index)
            .map(|vector| cosine(target_vector, vector))
            .unwrap_or(0.0);

        let shared_genres: BTreeSet<String> = entry
            .genres
            .iter()
            .filter(|genre| target_genres.contains(genre.as_str()))
            .cloned()
            .collect();

        let score = similarity + GENRE_BOOST * shared_genres.len() as f32;

        candidates.push(ScoredCandidate {
            position: index,
            similarity,
            score,
            shared_genres,
        });
    }

    candidates.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.position.cmp(&b.position))
    });

    // The sentinel puts the target last; capping at len - 1 keeps it out
    // even when the requested limit covers the whole catalog.
    candidates.truncate(limit.min(store.len().saturating_sub(1)));
    candidates
}

/// Cosine similarity between two vectors, in [-1, 1].
/// Zero-norm vectors have no direction and score 0.
fn cosine(a: &[f32], b: &[f32]) -> f32 {
    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;

    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a.sqrt() * norm_b.sqrt())
}
