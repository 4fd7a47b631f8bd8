//! Account display formatting

use tabled::{settings::Style, Table, Tabled};

use crate::models::Account;

#[derive(Tabled)]
struct AccountRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    account_type: String,
    #[tabled(rename = "Budget")]
    budget: &'static str,
    #[tabled(rename = "Status")]
    status: &'static str,
}

/// Format a list of accounts as a table
pub fn format_account_list(accounts: &[Account]) -> String {
    if accounts.is_empty() {
        return "No accounts found.".to_string();
    }

    let rows = accounts.iter().map(|account| AccountRow {
        name: account.name.clone(),
        account_type: account.account_type.to_string(),
        budget: if account.on_budget { "on" } else { "off" },
        status: if account.closed { "Closed" } else { "Open" },
    });

    Table::new(rows).with(Style::rounded()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AccountType;

    #[test]
    fn test_empty_list() {
        assert_eq!(format_account_list(&[]), "No accounts found.");
    }

    #[test]
    fn test_list_shows_type_and_status() {
        let mut savings = Account::new("Rainy Day", AccountType::Savings);
        savings.on_budget = false;
        let checking = Account::new("Checking", AccountType::Checking);
        let output = format_account_list(&[checking, savings]);

        assert!(output.contains("Rainy Day"));
        assert!(output.contains("Savings"));
        assert!(output.contains("off"));
        assert!(output.contains("Open"));
    }
}
