//! Payee display formatting

use tabled::{settings::Style, Table, Tabled};

use crate::models::Payee;

#[derive(Tabled)]
struct PayeeRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Added")]
    added: String,
}

/// Format payees as a table
pub fn format_payee_list(payees: &[Payee]) -> String {
    if payees.is_empty() {
        return "No payees found.".to_string();
    }

    let rows = payees.iter().map(|payee| PayeeRow {
        name: payee.name.clone(),
        added: payee.created_at.format("%Y-%m-%d").to_string(),
    });

    format!(
        "{}\n\nTotal: {} payees",
        Table::new(rows).with(Style::rounded()),
        payees.len()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payee_list_counts() {
        let output = format_payee_list(&[Payee::new("Corner Store"), Payee::new("Landlord")]);
        assert!(output.contains("Corner Store"));
        assert!(output.ends_with("Total: 2 payees"));
        assert_eq!(format_payee_list(&[]), "No payees found.");
    }
}
