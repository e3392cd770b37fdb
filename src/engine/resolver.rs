use crate::catalog::CatalogStore;

/// Most candidates ever returned for an ambiguous query
pub const MAX_CANDIDATES: usize = 10;

/// Outcome of resolving a free-text query against the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Exactly one match, or an exact title match that wins over the rest
    Unique(usize),
    /// Multiple substring matches and no exact title match;
    /// candidate positions in catalog order, capped at [`MAX_CANDIDATES`]
    Ambiguous(Vec<usize>),
    /// No title contains the query
    NotFound,
}

/// Resolves a query to catalog positions by case-insensitive substring
/// containment over the title field.
///
/// An exact case-insensitive title match always wins, even when the query
/// is a substring of several other titles. Candidate ordering follows
/// catalog position order; no relevance sorting happens at this stage.
/// Empty queries are rejected upstream and never reach this function.
pub fn resolve(store: &CatalogStore, query: &str) -> Resolution {
    let needle = query.trim().to_lowercase();

    let mut matches = Vec::new();
    let mut exact = None;

    for (position, entry) in store.entries().iter().enumerate() {
        let title = entry.title.to_lowercase();
        if title.contains(&needle) {
            matches.push(position);
            if exact.is_none() && title == needle {
                exact = Some(position);
            }
        }
    }

    if let Some(position) = exact {
        return Resolution::Unique(position);
    }

    match matches.len() {
        0 => Resolution::NotFound,
        1 => Resolution::Unique(matches[0]),
        _ => {
            matches.truncate(MAX_CANDIDATES);
            Resolution::Ambiguous(matches)
        }
    }
}
