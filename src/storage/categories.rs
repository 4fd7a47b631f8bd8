//! Category and CategoryGroup repository for JSON storage
//!
//! Manages loading and saving categories to budget.json. Only saved groups
//! live here; drafts stay with the sidebar until they are committed.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::FinancesError;
use crate::models::{Category, CategoryGroup, CategoryGroupId, CategoryId, GroupKey};

use super::file_io::{read_json, write_json_atomic};

/// Serializable category data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct CategoryData {
    pub groups: Vec<CategoryGroup>,
    pub categories: Vec<Category>,
}

/// Repository for category and group persistence
pub struct CategoryRepository {
    path: PathBuf,
    groups: RwLock<HashMap<CategoryGroupId, CategoryGroup>>,
    categories: RwLock<HashMap<CategoryId, Category>>,
}

fn lock_err(e: impl std::fmt::Display) -> FinancesError {
    FinancesError::Storage(format!("Failed to acquire lock: {}", e))
}

impl CategoryRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            groups: RwLock::new(HashMap::new()),
            categories: RwLock::new(HashMap::new()),
        }
    }

    /// Load categories from disk
    pub fn load(&self) -> Result<(), FinancesError> {
        let file_data: CategoryData = read_json(&self.path)?;

        let mut groups = self.groups.write().map_err(lock_err)?;
        let mut categories = self.categories.write().map_err(lock_err)?;

        groups.clear();
        categories.clear();

        for group in file_data.groups {
            // Drafts never reach disk through this repository
            if let GroupKey::Saved(id) = group.id {
                groups.insert(id, group);
            }
        }

        for category in file_data.categories {
            categories.insert(category.id, category);
        }

        Ok(())
    }

    /// Save categories to disk
    pub fn save(&self) -> Result<(), FinancesError> {
        let groups = self.groups.read().map_err(lock_err)?;
        let categories = self.categories.read().map_err(lock_err)?;

        let mut group_list: Vec<_> = groups.values().cloned().collect();
        group_list.sort_by_key(|g| g.sort_order);

        let mut category_list: Vec<_> = categories.values().cloned().collect();
        category_list.sort_by_key(|c| (c.sort_order, c.name.clone()));

        write_json_atomic(
            &self.path,
            &CategoryData {
                groups: group_list,
                categories: category_list,
            },
        )
    }

    pub fn get_group(&self, id: CategoryGroupId) -> Result<Option<CategoryGroup>, FinancesError> {
        let groups = self.groups.read().map_err(lock_err)?;
        Ok(groups.get(&id).cloned())
    }

    /// Get live (non-tombstoned) groups ordered by sort order
    pub fn get_all_groups(&self) -> Result<Vec<CategoryGroup>, FinancesError> {
        let groups = self.groups.read().map_err(lock_err)?;

        let mut list: Vec<_> = groups.values().filter(|g| !g.tombstone).cloned().collect();
        list.sort_by_key(|g| g.sort_order);
        Ok(list)
    }

    /// Get a live group by name (case-insensitive)
    pub fn get_group_by_name(&self, name: &str) -> Result<Option<CategoryGroup>, FinancesError> {
        let groups = self.groups.read().map_err(lock_err)?;

        let name_lower = name.to_lowercase();
        Ok(groups
            .values()
            .find(|g| !g.tombstone && g.name.to_lowercase() == name_lower)
            .cloned())
    }

    /// Insert or update a saved group
    pub fn upsert_group(&self, group: CategoryGroup) -> Result<(), FinancesError> {
        let id = group.id.saved().ok_or_else(|| {
            FinancesError::Validation("Draft groups cannot be stored".into())
        })?;

        let mut groups = self.groups.write().map_err(lock_err)?;
        groups.insert(id, group);
        Ok(())
    }

    /// Get categories in a group
    pub fn get_categories_in_group(
        &self,
        group_id: CategoryGroupId,
    ) -> Result<Vec<Category>, FinancesError> {
        let categories = self.categories.read().map_err(lock_err)?;

        let mut list: Vec<_> = categories
            .values()
            .filter(|c| c.group_id == group_id)
            .cloned()
            .collect();
        list.sort_by_key(|c| (c.sort_order, c.name.clone()));
        Ok(list)
    }

    pub fn upsert_category(&self, category: Category) -> Result<(), FinancesError> {
        let mut categories = self.categories.write().map_err(lock_err)?;
        categories.insert(category.id, category);
        Ok(())
    }

    /// Count live groups
    pub fn group_count(&self) -> Result<usize, FinancesError> {
        let groups = self.groups.read().map_err(lock_err)?;
        Ok(groups.values().filter(|g| !g.tombstone).count())
    }

    pub fn category_count(&self) -> Result<usize, FinancesError> {
        let categories = self.categories.read().map_err(lock_err)?;
        Ok(categories.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, CategoryRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = CategoryRepository::new(temp_dir.path().join("budget.json"));
        (temp_dir, repo)
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.group_count().unwrap(), 0);
        assert_eq!(repo.category_count().unwrap(), 0);
    }

    #[test]
    fn test_draft_cannot_be_stored() {
        let (_temp_dir, repo) = create_test_repo();
        let err = repo.upsert_group(CategoryGroup::draft()).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_tombstoned_groups_are_hidden_from_listing() {
        let (_temp_dir, repo) = create_test_repo();

        let live = CategoryGroup::with_sort_order("Bills", 0);
        let mut dead = CategoryGroup::with_sort_order("Old", 1);
        dead.tombstone = true;
        let dead_id = dead.id.saved().unwrap();

        repo.upsert_group(live).unwrap();
        repo.upsert_group(dead).unwrap();

        let names: Vec<_> = repo
            .get_all_groups()
            .unwrap()
            .into_iter()
            .map(|g| g.name)
            .collect();
        assert_eq!(names, vec!["Bills"]);
        assert!(repo.get_group(dead_id).unwrap().is_some());
        assert!(repo.get_group_by_name("old").unwrap().is_none());
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();

        let group = CategoryGroup::new("Bills");
        let group_id = group.id.saved().unwrap();
        repo.upsert_group(group).unwrap();
        repo.upsert_category(Category::new("Rent", group_id)).unwrap();
        repo.save().unwrap();

        let repo2 = CategoryRepository::new(temp_dir.path().join("budget.json"));
        repo2.load().unwrap();

        assert_eq!(repo2.group_count().unwrap(), 1);
        let in_group = repo2.get_categories_in_group(group_id).unwrap();
        assert_eq!(in_group.len(), 1);
        assert_eq!(in_group[0].name, "Rent");
    }
}
