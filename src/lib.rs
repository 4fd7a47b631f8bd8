//! Finances - terminal client for a personal-finance budget
//!
//! The library hosts the application shell and the budget sidebar behind
//! both the TUI and the command line.
//!
//! # Architecture
//!
//! - `shell`: routing, responsive redirects, startup sync and update check
//! - `budget`: category group rows and the list that owns them
//! - `actions`: the operations the shell runs against local data
//! - `config`: paths, settings and user preferences
//! - `storage`: JSON file storage layer
//! - `services`: business rules for accounts and category groups
//! - `tui`: ratatui front end
//!
//! # Example
//!
//! ```rust,ignore
//! use finances::config::{paths::FinancesPaths, settings::Settings};
//!
//! let paths = FinancesPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! ```

pub mod actions;
pub mod budget;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod notifications;
pub mod services;
pub mod shell;
pub mod storage;
pub mod tui;
pub mod undo;
pub mod update_check;

pub use error::FinancesError;
