//! Payee CLI commands

use clap::Subcommand;

use crate::display::payee::format_payee_list;
use crate::error::FinancesResult;
use crate::services::PayeeService;
use crate::storage::Storage;

/// Payee subcommands
#[derive(Subcommand)]
pub enum PayeeCommands {
    /// Add a payee
    Add {
        /// Payee name
        name: String,
    },
    /// List all payees
    List,
}

/// Handle a payee command
pub fn handle_payee_command(storage: &Storage, cmd: PayeeCommands) -> FinancesResult<()> {
    let service = PayeeService::new(storage);

    match cmd {
        PayeeCommands::Add { name } => {
            let payee = service.add(&name)?;
            println!("Payee: {}", payee.name);
            println!("  ID: {}", payee.id);
        }
        PayeeCommands::List => {
            println!("{}", format_payee_list(&service.list()?));
        }
    }

    Ok(())
}
