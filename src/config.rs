use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Path to the catalog entries CSV
    #[serde(default = "default_catalog_path")]
    pub catalog_path: String,

    /// Path to the bincode-encoded embedding vectors
    #[serde(default = "default_embeddings_path")]
    pub embeddings_path: String,

    /// TMDB API key
    pub tmdb_api_key: String,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Number of recommendations returned per request
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// Concurrent external lookups during enrichment
    #[serde(default = "default_enrich_concurrency")]
    pub enrich_concurrency: usize,

    /// Per-call timeout for external provider requests, in seconds
    #[serde(default = "default_provider_timeout_secs")]
    pub provider_timeout_secs: u64,
}

fn default_catalog_path() -> String {
    "data/catalog.csv".to_string()
}

fn default_embeddings_path() -> String {
    "data/embeddings.bin".to_string()
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_top_n() -> usize {
    6
}

fn default_enrich_concurrency() -> usize {
    7
}

fn default_provider_timeout_secs() -> u64 {
    4
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}
