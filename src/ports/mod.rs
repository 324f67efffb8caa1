//! Port traits. API boundaries for the hexagon.
//!
//! - Outbound: Called by the use cases into enrichment services and storage

pub mod outbound;

pub use outbound::{RecordSourcePort, ReportSinkPort, ScorerPort, TranslatorPort};
