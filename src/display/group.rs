//! Category group display formatting

use tabled::{settings::Style, Table, Tabled};

use crate::models::CategoryGroup;

#[derive(Tabled)]
struct GroupRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "Group")]
    name: String,
    #[tabled(rename = "Categories")]
    categories: String,
    #[tabled(rename = "Hidden")]
    hidden: &'static str,
}

/// Format groups, in sort order, with their category names
pub fn format_group_list(groups: &[CategoryGroup]) -> String {
    if groups.is_empty() {
        return "No category groups found.\n\nRun 'finances init' to create the default groups."
            .to_string();
    }

    let rows = groups.iter().enumerate().map(|(i, group)| GroupRow {
        position: i + 1,
        name: group.name.clone(),
        categories: group
            .categories
            .iter()
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join(", "),
        hidden: if group.hidden { "yes" } else { "" },
    });

    Table::new(rows).with(Style::rounded()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    #[test]
    fn test_group_list_includes_categories() {
        let mut bills = CategoryGroup::new("Bills");
        let id = bills.id.saved().unwrap();
        bills.categories = vec![Category::new("Rent", id), Category::new("Power", id)];

        let output = format_group_list(&[bills]);
        assert!(output.contains("Bills"));
        assert!(output.contains("Rent, Power"));
    }

    #[test]
    fn test_empty_groups_hint_at_init() {
        assert!(format_group_list(&[]).contains("finances init"));
    }
}
