//! Application use cases. Orchestrate domain logic via ports.

pub mod file_processor;
pub mod report_builder;
pub mod stats_store;

pub use file_processor::{BatchOutcome, FileProcessorService, RunSummary};
pub use report_builder::build_report;
pub use stats_store::UserStatsStore;
