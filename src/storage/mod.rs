//! Storage boundary for LedgerPulse
//!
//! The engine itself never touches disk. This module loads the per-user
//! snapshot the aggregators read and writes it back atomically.

pub mod snapshot;

pub use snapshot::{load_snapshot, save_snapshot, SnapshotFormat};
