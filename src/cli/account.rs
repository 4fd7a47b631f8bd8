//! Account CLI commands
//!
//! Implements CLI commands for account management.

use clap::Subcommand;

use crate::display::account::format_account_list;
use crate::error::{FinancesError, FinancesResult};
use crate::models::AccountType;
use crate::services::AccountService;
use crate::storage::Storage;

/// Account subcommands
#[derive(Subcommand)]
pub enum AccountCommands {
    /// Create a new account
    Create {
        /// Account name
        name: String,
        /// Account type (checking, savings, credit, cash, investment, other)
        #[arg(short = 't', long, default_value = "checking")]
        account_type: String,
        /// Mark as off-budget
        #[arg(long)]
        off_budget: bool,
    },
    /// Close an account
    Close {
        /// Account name or ID
        account: String,
    },
    /// List accounts
    List {
        /// Include closed accounts
        #[arg(short, long)]
        all: bool,
    },
}

/// Handle an account command
pub fn handle_account_command(storage: &Storage, cmd: AccountCommands) -> FinancesResult<()> {
    let service = AccountService::new(storage);

    match cmd {
        AccountCommands::Create {
            name,
            account_type,
            off_budget,
        } => {
            let account_type = AccountType::parse(&account_type).ok_or_else(|| {
                FinancesError::Validation(format!(
                    "Invalid account type: '{}'. Valid types: checking, savings, credit, cash, investment, other",
                    account_type
                ))
            })?;

            let account = service.create(&name, account_type, !off_budget)?;

            println!("Created account: {}", account.name);
            println!("  Type: {}", account.account_type);
            println!(
                "  On Budget: {}",
                if account.on_budget { "Yes" } else { "No" }
            );
            println!("  ID: {}", account.id);
        }

        AccountCommands::Close { account } => {
            let found = service
                .find(&account)?
                .ok_or_else(|| FinancesError::account_not_found(&account))?;
            let closed = service.close(found.id)?;
            println!("Closed account: {}", closed.name);
        }

        AccountCommands::List { all } => {
            let accounts = service.list(all)?;
            println!("{}", format_account_list(&accounts));
        }
    }

    Ok(())
}
