//! Configuration module for LedgerPulse
//!
//! This module provides configuration management including:
//! - Base directory resolution with an environment override
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::LedgerPaths;
pub use settings::Settings;
