//! Application layer - the aggregation pipeline and configuration

pub mod config;
pub mod pipeline;

pub use config::Config;
pub use pipeline::AnalysisPipeline;
