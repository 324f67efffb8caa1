//! Infrastructure adapters. Implement outbound ports.
//!
//! Simulated enrichment APIs and filesystem I/O. Map errors to DomainError.

pub mod enrichment;
pub mod persistence;
