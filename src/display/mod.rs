//! Display formatting for terminal output
//!
//! Tables for the CLI commands, rendered with `tabled`.

pub mod account;
pub mod group;
pub mod payee;
pub mod route;

pub use account::format_account_list;
pub use group::format_group_list;
pub use payee::format_payee_list;
pub use route::{format_route_table, format_settled, RouteReport};
