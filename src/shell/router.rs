//! Route table
//!
//! Maps paths to screens. Routes are tried in declaration order and the
//! first match wins. A route may be limited to one viewport class, in which
//! case it redirects elsewhere when viewed in the other one.

use std::collections::BTreeMap;
use std::fmt;

use super::viewport::ViewportClass;

/// Parameters captured from `:name` segments, plus `*` for a wildcard tail
pub type Params = BTreeMap<String, String>;

/// Default landing path
pub const BUDGET_PATH: &str = "/budget";

/// Path of the account list, used for first-run setup
pub const ACCOUNTS_PATH: &str = "/accounts";

/// Upper bound on redirects followed when settling a path
const MAX_REDIRECTS: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

/// A path pattern such as `/accounts/:id` or `/reports/*`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    source: &'static str,
    segments: Vec<Segment>,
    wildcard: bool,
}

fn split_path(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

impl PathPattern {
    pub fn new(source: &'static str) -> Self {
        let mut segments = Vec::new();
        let mut wildcard = false;
        for part in split_path(source) {
            if part == "*" {
                wildcard = true;
                break;
            }
            match part.strip_prefix(':') {
                Some(name) => segments.push(Segment::Param(name.to_string())),
                None => segments.push(Segment::Literal(part.to_string())),
            }
        }
        Self {
            source,
            segments,
            wildcard,
        }
    }

    pub fn as_str(&self) -> &'static str {
        self.source
    }

    /// Match `path`, returning captured params
    ///
    /// Empty segments are ignored so trailing slashes do not matter.
    pub fn matches(&self, path: &str) -> Option<Params> {
        let parts: Vec<&str> = split_path(path).collect();
        if parts.len() < self.segments.len() {
            return None;
        }
        if !self.wildcard && parts.len() != self.segments.len() {
            return None;
        }

        let mut params = Params::new();
        for (segment, part) in self.segments.iter().zip(&parts) {
            match segment {
                Segment::Literal(lit) if lit == part => {}
                Segment::Literal(_) => return None,
                Segment::Param(name) => {
                    params.insert(name.clone(), (*part).to_string());
                }
            }
        }
        if self.wildcard {
            params.insert("*".into(), parts[self.segments.len()..].join("/"));
        }
        Some(params)
    }
}

/// Screens the shell can render
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Reports { rest: String },
    Budget,
    Schedules,
    Payees,
    Rules,
    Settings,
    BankLink,
    Accounts,
    Account { id: String },
    /// `transaction_id` is `None` for a new transaction
    TransactionEdit {
        account_id: Option<String>,
        transaction_id: Option<String>,
    },
}

impl Screen {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Reports { .. } => "Reports",
            Self::Budget => "Budget",
            Self::Schedules => "Schedules",
            Self::Payees => "Payees",
            Self::Rules => "Rules",
            Self::Settings => "Settings",
            Self::BankLink => "BankLink",
            Self::Accounts => "Accounts",
            Self::Account { .. } => "Account",
            Self::TransactionEdit { .. } => "TransactionEdit",
        }
    }

    /// Title shown in the title bar
    pub fn title(&self) -> String {
        match self {
            Self::Reports { rest } if !rest.is_empty() => format!("Reports / {}", rest),
            Self::Account { id } => format!("Account {}", id),
            Self::TransactionEdit {
                transaction_id: None,
                ..
            } => "New Transaction".into(),
            Self::TransactionEdit {
                transaction_id: Some(id),
                ..
            } => format!("Transaction {}", id),
            Self::BankLink => "Link Bank Account".into(),
            other => other.name().into(),
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title())
    }
}

/// Viewport restriction on a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidthConstraint {
    Any,
    /// Redirects when the viewport is narrow
    WideOnly { redirect_to: &'static str },
    /// Redirects when the viewport is wide
    NarrowOnly { redirect_to: &'static str },
    /// Renders in both classes with a separate narrow layout
    NarrowAlternate,
}

impl WidthConstraint {
    fn redirect_for(&self, viewport: ViewportClass) -> Option<&'static str> {
        match (self, viewport) {
            (Self::WideOnly { redirect_to }, ViewportClass::Narrow) => Some(*redirect_to),
            (Self::NarrowOnly { redirect_to }, ViewportClass::Wide) => Some(*redirect_to),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::WideOnly { .. } => "wide only",
            Self::NarrowOnly { .. } => "narrow only",
            Self::NarrowAlternate => "narrow alternate",
        }
    }
}

#[derive(Debug, Clone)]
pub enum RouteTarget {
    Render(fn(&Params) -> Screen),
    Redirect { to: &'static str, replace: bool },
}

#[derive(Debug, Clone)]
pub struct Route {
    pub pattern: PathPattern,
    pub target: RouteTarget,
    pub constraint: WidthConstraint,
}

/// Outcome of resolving a single path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Render {
        screen: Screen,
        /// Whether the screen uses its narrow layout
        narrow_variant: bool,
        pattern: &'static str,
    },
    Redirect {
        to: String,
        replace: bool,
    },
}

/// Outcome of following redirects until something renders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settled {
    pub redirects: Vec<(String, bool)>,
    pub path: String,
    pub screen: Screen,
    pub narrow_variant: bool,
}

fn param(params: &Params, name: &str) -> String {
    params.get(name).cloned().unwrap_or_default()
}

/// Ordered list of routes
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    /// The application's primary routes
    pub fn primary() -> Self {
        use WidthConstraint::*;

        fn render(
            pattern: &'static str,
            constraint: WidthConstraint,
            screen: fn(&Params) -> Screen,
        ) -> Route {
            Route {
                pattern: PathPattern::new(pattern),
                target: RouteTarget::Render(screen),
                constraint,
            }
        }
        fn redirect(pattern: &'static str, to: &'static str) -> Route {
            Route {
                pattern: PathPattern::new(pattern),
                target: RouteTarget::Redirect { to, replace: true },
                constraint: WidthConstraint::Any,
            }
        }
        let wide_only = WideOnly {
            redirect_to: BUDGET_PATH,
        };
        let narrow_only = NarrowOnly {
            redirect_to: BUDGET_PATH,
        };

        Self::new(vec![
            redirect("/", BUDGET_PATH),
            render("/reports/*", wide_only, |p| Screen::Reports {
                rest: param(p, "*"),
            }),
            render(BUDGET_PATH, NarrowAlternate, |_| Screen::Budget),
            render("/schedules", wide_only, |_| Screen::Schedules),
            render("/payees", Any, |_| Screen::Payees),
            render("/rules", Any, |_| Screen::Rules),
            render("/settings", Any, |_| Screen::Settings),
            render("/gocardless/link", wide_only, |_| Screen::BankLink),
            render(ACCOUNTS_PATH, NarrowAlternate, |_| Screen::Accounts),
            render("/accounts/:id", NarrowAlternate, |p| Screen::Account {
                id: param(p, "id"),
            }),
            render("/accounts/:id/transactions/new", narrow_only, |p| {
                Screen::TransactionEdit {
                    account_id: Some(param(p, "id")),
                    transaction_id: None,
                }
            }),
            render(
                "/accounts/:id/transactions/:transactionId",
                narrow_only,
                |p| Screen::TransactionEdit {
                    account_id: Some(param(p, "id")),
                    transaction_id: Some(param(p, "transactionId")),
                },
            ),
            render("/transactions/new", narrow_only, |_| Screen::TransactionEdit {
                account_id: None,
                transaction_id: None,
            }),
            redirect("/*", BUDGET_PATH),
        ])
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Resolve one path without following redirects
    pub fn resolve(&self, path: &str, viewport: ViewportClass) -> Resolution {
        for route in &self.routes {
            let Some(params) = route.pattern.matches(path) else {
                continue;
            };

            if let Some(to) = route.constraint.redirect_for(viewport) {
                return Resolution::Redirect {
                    to: to.to_string(),
                    replace: false,
                };
            }

            return match &route.target {
                RouteTarget::Render(screen) => Resolution::Render {
                    screen: screen(&params),
                    narrow_variant: viewport.is_narrow()
                        && route.constraint == WidthConstraint::NarrowAlternate,
                    pattern: route.pattern.as_str(),
                },
                RouteTarget::Redirect { to, replace } => Resolution::Redirect {
                    to: to.to_string(),
                    replace: *replace,
                },
            };
        }

        Resolution::Redirect {
            to: BUDGET_PATH.to_string(),
            replace: true,
        }
    }

    /// Follow redirects from `path` until a screen renders
    pub fn settle(&self, path: &str, viewport: ViewportClass) -> Settled {
        let mut redirects = Vec::new();
        let mut current = path.to_string();

        loop {
            match self.resolve(&current, viewport) {
                Resolution::Render {
                    screen,
                    narrow_variant,
                    ..
                } => {
                    return Settled {
                        redirects,
                        path: current,
                        screen,
                        narrow_variant,
                    }
                }
                Resolution::Redirect { to, replace } if redirects.len() < MAX_REDIRECTS => {
                    redirects.push((to.clone(), replace));
                    current = to;
                }
                Resolution::Redirect { .. } => {
                    return Settled {
                        redirects,
                        path: current,
                        screen: Screen::Budget,
                        narrow_variant: viewport.is_narrow(),
                    }
                }
            }
        }
    }
}

/// Paths that show the bottom navigation tabs in the narrow layout
const NAV_TAB_PATHS: [&str; 3] = [BUDGET_PATH, ACCOUNTS_PATH, "/settings"];

/// Whether the navigation tabs show for `path`
pub fn nav_tabs_visible(path: &str, viewport: ViewportClass) -> bool {
    viewport.is_narrow()
        && NAV_TAB_PATHS
            .iter()
            .any(|p| PathPattern::new(*p).matches(path).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ViewportClass::{Narrow, Wide};

    fn render_screen(resolution: Resolution) -> Screen {
        match resolution {
            Resolution::Render { screen, .. } => screen,
            other => panic!("expected render, got {:?}", other),
        }
    }

    #[test]
    fn test_pattern_matching() {
        let pattern = PathPattern::new("/accounts/:id");
        assert_eq!(pattern.matches("/accounts/42").unwrap()["id"], "42");
        assert!(pattern.matches("/accounts/42/").is_some());
        assert!(pattern.matches("/accounts").is_none());
        assert!(pattern.matches("/accounts/42/transactions").is_none());

        let wildcard = PathPattern::new("/reports/*");
        assert_eq!(wildcard.matches("/reports/net-worth/2024").unwrap()["*"], "net-worth/2024");
        assert_eq!(wildcard.matches("/reports").unwrap()["*"], "");

        assert!(PathPattern::new("/").matches("/").is_some());
        assert!(PathPattern::new("/").matches("/budget").is_none());
        assert!(PathPattern::new("/*").matches("/anything/at/all").is_some());
    }

    #[test]
    fn test_root_redirects_to_budget() {
        let table = RouteTable::primary();
        assert_eq!(
            table.resolve("/", Wide),
            Resolution::Redirect {
                to: "/budget".into(),
                replace: true
            }
        );
    }

    #[test]
    fn test_unknown_path_settles_on_budget() {
        let table = RouteTable::primary();
        let settled = table.settle("/nonexistent", Wide);
        assert_eq!(settled.screen, Screen::Budget);
        assert_eq!(settled.redirects, vec![("/budget".to_string(), true)]);
    }

    #[test]
    fn test_wide_only_routes_redirect_when_narrow() {
        let table = RouteTable::primary();
        for path in ["/reports/spending", "/schedules", "/gocardless/link"] {
            assert!(matches!(table.resolve(path, Wide), Resolution::Render { .. }));
            assert_eq!(
                table.resolve(path, Narrow),
                Resolution::Redirect {
                    to: "/budget".into(),
                    replace: false
                }
            );
        }
    }

    #[test]
    fn test_new_transaction_only_renders_narrow() {
        let table = RouteTable::primary();
        let screen = render_screen(table.resolve("/accounts/123/transactions/new", Narrow));
        assert_eq!(
            screen,
            Screen::TransactionEdit {
                account_id: Some("123".into()),
                transaction_id: None
            }
        );

        let settled = table.settle("/accounts/123/transactions/new", Wide);
        assert_eq!(settled.screen, Screen::Budget);
        assert_eq!(settled.redirects.len(), 1);
    }

    #[test]
    fn test_new_transaction_matches_static_route() {
        let table = RouteTable::primary();
        match table.resolve("/accounts/1/transactions/new", Narrow) {
            Resolution::Render { pattern, .. } => {
                assert_eq!(pattern, "/accounts/:id/transactions/new")
            }
            other => panic!("expected render, got {:?}", other),
        }
        match table.resolve("/accounts/1/transactions/t2", Narrow) {
            Resolution::Render { pattern, .. } => {
                assert_eq!(pattern, "/accounts/:id/transactions/:transactionId")
            }
            other => panic!("expected render, got {:?}", other),
        }
    }

    #[test]
    fn test_existing_transaction_route() {
        let table = RouteTable::primary();
        let screen = render_screen(table.resolve("/accounts/a1/transactions/t9", Narrow));
        assert_eq!(
            screen,
            Screen::TransactionEdit {
                account_id: Some("a1".into()),
                transaction_id: Some("t9".into())
            }
        );
        assert!(matches!(
            table.resolve("/transactions/new", Narrow),
            Resolution::Render { .. }
        ));
    }

    #[test]
    fn test_narrow_alternates_render_in_both() {
        let table = RouteTable::primary();
        for path in ["/budget", "/accounts", "/accounts/7"] {
            match table.resolve(path, Narrow) {
                Resolution::Render { narrow_variant, .. } => assert!(narrow_variant),
                other => panic!("{} resolved to {:?}", path, other),
            }
            match table.resolve(path, Wide) {
                Resolution::Render { narrow_variant, .. } => assert!(!narrow_variant),
                other => panic!("{} resolved to {:?}", path, other),
            }
        }
        assert_eq!(
            render_screen(table.resolve("/payees", Narrow)),
            Screen::Payees
        );
    }

    #[test]
    fn test_nav_tabs() {
        assert!(nav_tabs_visible("/budget", Narrow));
        assert!(nav_tabs_visible("/accounts", Narrow));
        assert!(nav_tabs_visible("/settings", Narrow));
        assert!(!nav_tabs_visible("/accounts/1", Narrow));
        assert!(!nav_tabs_visible("/payees", Narrow));
        assert!(!nav_tabs_visible("/budget", Wide));
    }
}
