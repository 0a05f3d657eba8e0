// src/output/mod.rs
//! Output handling with planning separated from execution.
//!
//! Callers build an [`OutputPlan`] of pure data; [`deliver`] performs the
//! I/O and reports per-target results.

mod types;
mod writer;

// Re-export the public interface
pub use types::{DeliveryTarget, OutputPlan, OutputReport};
pub use writer::deliver;
