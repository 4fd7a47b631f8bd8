//! Route inspection commands
//!
//! Resolve a path the way the shell would at a given terminal width,
//! without starting the TUI.

use clap::Args;

use crate::config::settings::Settings;
use crate::display::route::{format_route_table, format_settled, RouteReport};
use crate::shell::router::nav_tabs_visible;
use crate::shell::{Location, RouteTable, ViewportClass};

/// Arguments for `route`
#[derive(Args)]
pub struct RouteArgs {
    /// Path to resolve, e.g. /accounts/42
    pub path: String,
    /// Terminal width in columns
    #[arg(short, long, default_value_t = 120)]
    pub width: u16,
}

/// Resolve a path and describe the outcome
pub fn resolve_route(settings: &Settings, args: &RouteArgs) -> RouteReport {
    let location = Location::parse(&args.path);
    let viewport = ViewportClass::from_width(args.width, settings.narrow_breakpoint);
    let settled = RouteTable::primary().settle(&location.pathname, viewport);
    let nav_tabs = nav_tabs_visible(&settled.path, viewport);

    RouteReport {
        requested: location.pathname,
        viewport,
        settled,
        nav_tabs,
    }
}

pub fn handle_route_command(settings: &Settings, args: RouteArgs) {
    print!("{}", format_settled(&resolve_route(settings, &args)));
}

pub fn handle_routes_command() {
    println!("{}", format_route_table(&RouteTable::primary()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::Screen;

    fn report(path: &str, width: u16) -> RouteReport {
        resolve_route(
            &Settings::default(),
            &RouteArgs {
                path: path.into(),
                width,
            },
        )
    }

    #[test]
    fn test_unknown_path_lands_on_budget() {
        let report = report("/nonexistent", 120);
        assert_eq!(report.settled.screen, Screen::Budget);
        assert_eq!(report.settled.path, "/budget");
    }

    #[test]
    fn test_query_is_ignored_for_matching() {
        let report = report("/payees?sort=name", 120);
        assert_eq!(report.settled.screen, Screen::Payees);
        assert!(report.settled.redirects.is_empty());
    }

    #[test]
    fn test_narrow_budget_shows_tabs() {
        let report = report("/budget", 60);
        assert!(report.nav_tabs);
        assert!(report.settled.narrow_variant);
    }
}
