pub mod classifier;
pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod sources;
pub mod types;
pub mod writer;

// Fetch seam and its production adapter
pub mod app;
pub mod infra;
