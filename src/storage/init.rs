//! Storage initialization
//!
//! Handles first-run setup and default data creation

use tracing::info;

use crate::config::paths::FinancesPaths;
use crate::error::FinancesError;
use crate::models::{Category, DefaultCategoryGroup};

use super::categories::CategoryData;
use super::file_io::write_json_atomic;

/// Initialize storage for a fresh installation
///
/// Seeds the default category groups unless budget.json already exists.
pub fn initialize_storage(paths: &FinancesPaths) -> Result<(), FinancesError> {
    paths.ensure_directories()?;

    if !paths.budget_file().exists() {
        create_default_categories(paths)?;
    }

    Ok(())
}

fn create_default_categories(paths: &FinancesPaths) -> Result<(), FinancesError> {
    let mut groups = Vec::new();
    let mut categories = Vec::new();

    for (i, default_group) in DefaultCategoryGroup::all().iter().enumerate() {
        let group = default_group.to_group(i as i32);
        let Some(group_id) = group.id.saved() else {
            continue;
        };
        groups.push(group);

        for (j, name) in default_group.categories().iter().enumerate() {
            categories.push(Category::with_sort_order(*name, group_id, j as i32));
        }
    }

    info!(groups = groups.len(), "seeding default category groups");
    write_json_atomic(paths.budget_file(), &CategoryData { groups, categories })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::categories::CategoryRepository;
    use tempfile::TempDir;

    #[test]
    fn test_initialize_seeds_once() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinancesPaths::with_base_dir(temp_dir.path().to_path_buf());

        initialize_storage(&paths).unwrap();
        let repo = CategoryRepository::new(paths.budget_file());
        repo.load().unwrap();
        assert_eq!(repo.group_count().unwrap(), DefaultCategoryGroup::all().len());

        // Second run leaves existing data alone
        repo.upsert_group(crate::models::CategoryGroup::new("Extra")).unwrap();
        repo.save().unwrap();
        initialize_storage(&paths).unwrap();
        repo.load().unwrap();
        assert_eq!(
            repo.group_count().unwrap(),
            DefaultCategoryGroup::all().len() + 1
        );
    }
}
