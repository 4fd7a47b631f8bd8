//! Category group CLI commands
//!
//! The same operations the budget sidebar offers, for scripting.

use clap::Subcommand;

use crate::display::group::format_group_list;
use crate::error::{FinancesError, FinancesResult};
use crate::models::{CategoryGroup, CategoryGroupId};
use crate::services::CategoryService;
use crate::storage::Storage;

/// Group subcommands
#[derive(Subcommand)]
pub enum GroupCommands {
    /// List category groups with their categories
    List {
        /// Include hidden groups
        #[arg(short, long)]
        all: bool,
    },
    /// Create a category group
    Create { name: String },
    /// Rename a category group
    Rename {
        /// Group name or ID
        group: String,
        /// New name
        name: String,
    },
    /// Hide a category group
    Hide {
        /// Group name or ID
        group: String,
    },
    /// Show a hidden category group
    Show {
        /// Group name or ID
        group: String,
    },
    /// Delete a category group
    Delete {
        /// Group name or ID
        group: String,
    },
    /// Move a category group to a position (starting at 1)
    Move {
        /// Group name or ID
        group: String,
        position: usize,
    },
    /// Add a category to a group
    AddCategory {
        /// Group name or ID
        group: String,
        /// Category name
        name: String,
    },
}

fn find(
    service: &CategoryService<'_>,
    identifier: &str,
) -> FinancesResult<(CategoryGroupId, CategoryGroup)> {
    let group = service
        .find_group(identifier)?
        .ok_or_else(|| FinancesError::group_not_found(identifier))?;
    let id = group
        .id
        .saved()
        .ok_or_else(|| FinancesError::group_not_found(identifier))?;
    Ok((id, group))
}

/// Handle a group command
pub fn handle_group_command(storage: &Storage, cmd: GroupCommands) -> FinancesResult<()> {
    let service = CategoryService::new(storage);

    match cmd {
        GroupCommands::List { all } => {
            let groups: Vec<_> = service
                .list_groups_with_categories()?
                .into_iter()
                .filter(|g| all || !g.hidden)
                .collect();
            println!("{}", format_group_list(&groups));
        }

        GroupCommands::Create { name } => {
            let group = service.create_group(&name)?;
            println!("Created category group: {}", group.name);
            println!("  ID: {}", group.id);
        }

        GroupCommands::Rename { group, name } => {
            let (id, _) = find(&service, &group)?;
            let renamed = service.rename_group(id, &name)?;
            println!("Renamed category group to: {}", renamed.name);
        }

        GroupCommands::Hide { group } => {
            let (id, _) = find(&service, &group)?;
            let hidden = service.set_group_hidden(id, true)?;
            println!("Hid category group: {}", hidden.name);
        }

        GroupCommands::Show { group } => {
            let (id, _) = find(&service, &group)?;
            let shown = service.set_group_hidden(id, false)?;
            println!("Showing category group: {}", shown.name);
        }

        GroupCommands::Delete { group } => {
            let (id, found) = find(&service, &group)?;
            service.delete_group(id)?;
            println!("Deleted category group: {}", found.name);
        }

        GroupCommands::Move { group, position } => {
            let (id, found) = find(&service, &group)?;
            let mut order: Vec<CategoryGroupId> = service
                .list_groups_with_categories()?
                .iter()
                .filter_map(|g| g.id.saved())
                .filter(|other| *other != id)
                .collect();
            let index = position.saturating_sub(1).min(order.len());
            order.insert(index, id);
            service.reorder_groups(&order)?;
            println!("Moved category group '{}' to position {}", found.name, index + 1);
        }

        GroupCommands::AddCategory { group, name } => {
            let (id, found) = find(&service, &group)?;
            let category = service.create_category(&name, id)?;
            println!("Added category '{}' to {}", category.name, found.name);
        }
    }

    Ok(())
}
