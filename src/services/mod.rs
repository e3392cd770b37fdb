pub mod enrichment;
pub mod fallback;
pub mod providers;
