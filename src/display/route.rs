//! Route display formatting

use tabled::{settings::Style, Table, Tabled};

use crate::shell::router::{RouteTarget, Settled};
use crate::shell::{RouteTable, ViewportClass};

/// Outcome of resolving one path
#[derive(Debug, Clone)]
pub struct RouteReport {
    pub requested: String,
    pub viewport: ViewportClass,
    pub settled: Settled,
    pub nav_tabs: bool,
}

/// Describe a resolved path, one redirect per line
pub fn format_settled(report: &RouteReport) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "Path:     {} ({})\n",
        report.requested, report.viewport
    ));

    for (to, replace) in &report.settled.redirects {
        let how = if *replace { "replace" } else { "push" };
        output.push_str(&format!("  -> {} ({})\n", to, how));
    }

    output.push_str(&format!("Screen:   {}\n", report.settled.screen.name()));
    output.push_str(&format!("Title:    {}\n", report.settled.screen.title()));
    output.push_str(&format!("Final:    {}\n", report.settled.path));
    if report.settled.narrow_variant {
        output.push_str("Layout:   narrow\n");
    }
    if report.nav_tabs {
        output.push_str("Nav tabs: shown\n");
    }
    output
}

#[derive(Tabled)]
struct RouteRow {
    #[tabled(rename = "Pattern")]
    pattern: &'static str,
    #[tabled(rename = "Target")]
    target: String,
    #[tabled(rename = "Width")]
    width: &'static str,
}

/// Format the route table in match order
pub fn format_route_table(table: &RouteTable) -> String {
    let rows = table.routes().iter().map(|route| RouteRow {
        pattern: route.pattern.as_str(),
        target: match &route.target {
            RouteTarget::Render(_) => "render".to_string(),
            RouteTarget::Redirect { to, .. } => format!("redirect {}", to),
        },
        width: route.constraint.label(),
    });

    Table::new(rows).with(Style::rounded()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_table_lists_catch_all_last() {
        let output = format_route_table(&RouteTable::primary());
        let catch_all = output.rfind("/*").unwrap();
        let budget = output.find("/budget").unwrap();
        assert!(budget < catch_all);
        assert!(output.contains("wide only"));
    }
}
