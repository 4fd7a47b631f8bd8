//! Configuration module for the finances client
//!
//! This module provides configuration management including:
//! - Platform path resolution
//! - Global settings persistence
//! - Local preferences (flags, collapsed groups)

pub mod paths;
pub mod prefs;
pub mod settings;

pub use paths::FinancesPaths;
pub use prefs::Prefs;
pub use settings::Settings;
