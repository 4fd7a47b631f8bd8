//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod account;
pub mod group;
pub mod payee;
pub mod route;

pub use account::{handle_account_command, AccountCommands};
pub use group::{handle_group_command, GroupCommands};
pub use payee::{handle_payee_command, PayeeCommands};
pub use route::{handle_route_command, handle_routes_command, RouteArgs};
