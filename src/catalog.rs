use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::models::{CatalogEntry, TitleKind};

/// Errors raised while loading the catalog snapshot.
/// All of these are fatal: the process must not serve without a catalog.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read catalog snapshot: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse catalog entries: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to decode embedding vectors: {0}")]
    Decode(#[from] bincode::Error),

    #[error("catalog snapshot misaligned: {entries} entries vs {vectors} vectors")]
    Misaligned { entries: usize, vectors: usize },

    #[error("embedding row {row} has dimension {found}, expected {expected}")]
    DimensionMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("catalog snapshot is empty")]
    Empty,
}

/// One row of the catalog entries CSV
#[derive(Debug, Deserialize)]
struct CatalogRecord {
    title: String,
    #[serde(default)]
    kind: String,
    #[serde(default)]
    release_year: String,
    #[serde(default)]
    rating: String,
    #[serde(default)]
    duration: String,
    #[serde(default)]
    genres: String,
    #[serde(default)]
    description: String,
}

impl From<CatalogRecord> for CatalogEntry {
    fn from(record: CatalogRecord) -> Self {
        CatalogEntry {
            title: record.title.trim().to_string(),
            kind: TitleKind::parse(&record.kind),
            release_year: or_na(record.release_year),
            rating: if record.rating.trim().is_empty() {
                "NR".to_string()
            } else {
                record.rating.trim().to_string()
            },
            duration: or_na(record.duration),
            genres: parse_genres(&record.genres),
            description: if record.description.trim().is_empty() {
                "No description available.".to_string()
            } else {
                record.description.trim().to_string()
            },
        }
    }
}

fn or_na(value: String) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        "N/A".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Splits a comma-separated genre field into trimmed tags.
/// A blank field yields an empty list.
pub fn parse_genres(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .map(str::to_string)
        .collect()
}

/// Dense row-major matrix of embedding vectors, one row per catalog entry
#[derive(Debug)]
pub struct EmbeddingMatrix {
    dim: usize,
    data: Vec<f32>,
}

impl EmbeddingMatrix {
    fn from_rows(rows: Vec<Vec<f32>>) -> Result<Self, LoadError> {
        let dim = rows.first().map(Vec::len).ok_or(LoadError::Empty)?;

        let mut data = Vec::with_capacity(rows.len() * dim);
        for (row, vector) in rows.into_iter().enumerate() {
            if vector.len() != dim {
                return Err(LoadError::DimensionMismatch {
                    row,
                    expected: dim,
                    found: vector.len(),
                });
            }
            data.extend_from_slice(&vector);
        }

        Ok(Self { dim, data })
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn rows(&self) -> usize {
        self.data.len() / self.dim
    }

    pub fn row(&self, index: usize) -> Option<&[f32]> {
        let start = index.checked_mul(self.dim)?;
        self.data.get(start..start + self.dim)
    }
}

/// Read-only store of catalog entries and their embedding vectors.
///
/// Loaded once at startup and shared via `Arc`; nothing mutates it at
/// request time, so concurrent readers need no locking.
#[derive(Debug)]
pub struct CatalogStore {
    entries: Vec<CatalogEntry>,
    matrix: EmbeddingMatrix,
}

impl CatalogStore {
    /// Loads the catalog snapshot: a CSV table of entries and a
    /// bincode-encoded `Vec<Vec<f32>>` of embedding vectors.
    ///
    /// Rows with a blank title are dropped together with their vector so
    /// row alignment survives compaction. Any remaining mismatch between
    /// entry count and vector count is a corrupt snapshot.
    pub fn load<P: AsRef<Path>>(entries_path: P, vectors_path: P) -> Result<Self, LoadError> {
        let mut reader = csv::Reader::from_path(entries_path.as_ref())?;
        let records = reader
            .deserialize::<CatalogRecord>()
            .collect::<Result<Vec<_>, _>>()?;

        let file = File::open(vectors_path.as_ref())?;
        let vectors: Vec<Vec<f32>> = bincode::deserialize_from(BufReader::new(file))?;

        if records.len() != vectors.len() {
            return Err(LoadError::Misaligned {
                entries: records.len(),
                vectors: vectors.len(),
            });
        }

        let before = records.len();
        let (entries, vectors): (Vec<CatalogEntry>, Vec<Vec<f32>>) = records
            .into_iter()
            .zip(vectors)
            .filter(|(record, _)| !record.title.trim().is_empty())
            .map(|(record, vector)| (CatalogEntry::from(record), vector))
            .unzip();

        if entries.len() < before {
            tracing::warn!(
                dropped = before - entries.len(),
                remaining = entries.len(),
                "Compacted blank catalog rows"
            );
        }

        Self::from_parts(entries, vectors)
    }

    /// Builds a store from already-parsed parts, enforcing the alignment
    /// and dimensionality invariants.
    pub fn from_parts(
        entries: Vec<CatalogEntry>,
        vectors: Vec<Vec<f32>>,
    ) -> Result<Self, LoadError> {
        if entries.is_empty() {
            return Err(LoadError::Empty);
        }
        if entries.len() != vectors.len() {
            return Err(LoadError::Misaligned {
                entries: entries.len(),
                vectors: vectors.len(),
            });
        }

        let matrix = EmbeddingMatrix::from_rows(vectors)?;

        tracing::info!(
            entries = entries.len(),
            dim = matrix.dim(),
            "Catalog loaded"
        );

        Ok(Self { entries, matrix })
    }

    pub fn get(&self, position: usize) -> Option<&CatalogEntry> {
        self.entries.get(position)
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn vector(&self, position: usize) -> Option<&[f32]> {
        self.matrix.row(position)
    }

    pub fn dim(&self) -> usize {
        self.matrix.dim()
    }
}
