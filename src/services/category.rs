//! Category service
//!
//! Business rules for category groups as the budget sidebar edits them:
//! creating from a draft, renaming, toggling visibility, soft-deleting and
//! reordering.

use chrono::Utc;
use tracing::info;

use crate::error::{FinancesError, FinancesResult};
use crate::models::{Category, CategoryGroup, CategoryGroupId};
use crate::storage::Storage;

/// Service for category management
pub struct CategoryService<'a> {
    storage: &'a Storage,
}

impl<'a> CategoryService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new category group at the end of the list
    pub fn create_group(&self, name: &str) -> FinancesResult<CategoryGroup> {
        let name = name.trim();
        if name.is_empty() {
            return Err(FinancesError::Validation(
                "Category group name cannot be empty".into(),
            ));
        }

        if self.storage.categories.get_group_by_name(name)?.is_some() {
            return Err(FinancesError::Duplicate {
                entity_type: "Category Group",
                identifier: name.to_string(),
            });
        }

        let groups = self.storage.categories.get_all_groups()?;
        let max_order = groups.iter().map(|g| g.sort_order).max().unwrap_or(-1);

        let group = CategoryGroup::with_sort_order(name, max_order + 1);
        group
            .validate()
            .map_err(|e| FinancesError::Validation(e.to_string()))?;

        self.storage.categories.upsert_group(group.clone())?;
        self.storage.categories.save()?;

        info!(group = %group.id, name = %group.name, "created category group");
        Ok(group)
    }

    /// Find a live group by name or ID string
    pub fn find_group(&self, identifier: &str) -> FinancesResult<Option<CategoryGroup>> {
        if let Some(group) = self.storage.categories.get_group_by_name(identifier)? {
            return Ok(Some(group));
        }

        if let Ok(id) = identifier.parse::<CategoryGroupId>() {
            return Ok(self
                .storage
                .categories
                .get_group(id)?
                .filter(|g| !g.tombstone));
        }

        Ok(None)
    }

    /// List live groups with their categories filled in
    pub fn list_groups_with_categories(&self) -> FinancesResult<Vec<CategoryGroup>> {
        let mut groups = self.storage.categories.get_all_groups()?;
        for group in &mut groups {
            if let Some(id) = group.id.saved() {
                group.categories = self.storage.categories.get_categories_in_group(id)?;
            }
        }
        Ok(groups)
    }

    fn require_group(&self, id: CategoryGroupId) -> FinancesResult<CategoryGroup> {
        self.storage
            .categories
            .get_group(id)?
            .filter(|g| !g.tombstone)
            .ok_or_else(|| FinancesError::group_not_found(id.to_string()))
    }

    /// Rename a group
    ///
    /// Empty names are rejected; the stored name is left untouched.
    pub fn rename_group(&self, id: CategoryGroupId, name: &str) -> FinancesResult<CategoryGroup> {
        let mut group = self.require_group(id)?;

        let new_name = name.trim();
        if new_name.is_empty() {
            return Err(FinancesError::Validation(
                "Category group name cannot be empty".into(),
            ));
        }

        if let Some(existing) = self.storage.categories.get_group_by_name(new_name)? {
            if existing.id != group.id {
                return Err(FinancesError::Duplicate {
                    entity_type: "Category Group",
                    identifier: new_name.to_string(),
                });
            }
        }

        let before = std::mem::replace(&mut group.name, new_name.to_string());
        group.updated_at = Utc::now();
        group
            .validate()
            .map_err(|e| FinancesError::Validation(e.to_string()))?;

        self.storage.categories.upsert_group(group.clone())?;
        self.storage.categories.save()?;

        info!(group = %group.id, from = %before, to = %group.name, "renamed category group");
        Ok(group)
    }

    /// Show or hide a group
    pub fn set_group_hidden(
        &self,
        id: CategoryGroupId,
        hidden: bool,
    ) -> FinancesResult<CategoryGroup> {
        let mut group = self.require_group(id)?;
        group.hidden = hidden;
        group.updated_at = Utc::now();

        self.storage.categories.upsert_group(group.clone())?;
        self.storage.categories.save()?;

        info!(group = %group.id, hidden, "changed category group visibility");
        Ok(group)
    }

    /// Soft-delete a group by setting its tombstone
    pub fn delete_group(&self, id: CategoryGroupId) -> FinancesResult<()> {
        let mut group = self.require_group(id)?;
        group.tombstone = true;
        group.updated_at = Utc::now();

        self.storage.categories.upsert_group(group.clone())?;
        self.storage.categories.save()?;

        info!(group = %group.id, name = %group.name, "deleted category group");
        Ok(())
    }

    /// Rewrite sort orders to follow `order`
    pub fn reorder_groups(&self, order: &[CategoryGroupId]) -> FinancesResult<()> {
        for (i, &id) in order.iter().enumerate() {
            if let Some(mut group) = self.storage.categories.get_group(id)? {
                group.sort_order = i as i32;
                group.updated_at = Utc::now();
                self.storage.categories.upsert_group(group)?;
            }
        }
        self.storage.categories.save()?;
        Ok(())
    }

    /// Create a new category at the end of a group
    pub fn create_category(&self, name: &str, group_id: CategoryGroupId) -> FinancesResult<Category> {
        let name = name.trim();
        self.require_group(group_id)?;

        let existing = self.storage.categories.get_categories_in_group(group_id)?;
        if existing.iter().any(|c| c.name.eq_ignore_ascii_case(name)) {
            return Err(FinancesError::Duplicate {
                entity_type: "Category",
                identifier: name.to_string(),
            });
        }
        let max_order = existing.iter().map(|c| c.sort_order).max().unwrap_or(-1);

        let category = Category::with_sort_order(name, group_id, max_order + 1);
        category
            .validate()
            .map_err(|e| FinancesError::Validation(e.to_string()))?;

        self.storage.categories.upsert_category(category.clone())?;
        self.storage.categories.save()?;

        info!(category = %category.id, name = %category.name, "created category");
        Ok(category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::FinancesPaths;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinancesPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_create_group_appends() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);

        let a = service.create_group("Bills").unwrap();
        let b = service.create_group("  Needs ").unwrap();
        assert_eq!(a.sort_order, 0);
        assert_eq!(b.sort_order, 1);
        assert_eq!(b.name, "Needs");
    }

    #[test]
    fn test_create_group_rejects_duplicates() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);

        service.create_group("Bills").unwrap();
        let err = service.create_group("bills").unwrap_err();
        assert!(matches!(err, FinancesError::Duplicate { .. }));
    }

    #[test]
    fn test_rename_rejects_empty_and_keeps_name() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);

        let group = service.create_group("Bills").unwrap();
        let id = group.id.saved().unwrap();

        let err = service.rename_group(id, "").unwrap_err();
        assert!(err.is_validation());
        assert_eq!(storage.categories.get_group(id).unwrap().unwrap().name, "Bills");

        let renamed = service.rename_group(id, "Fixed Bills").unwrap();
        assert_eq!(renamed.name, "Fixed Bills");
    }

    #[test]
    fn test_delete_sets_tombstone() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);

        let group = service.create_group("Bills").unwrap();
        let id = group.id.saved().unwrap();
        service.delete_group(id).unwrap();

        assert!(storage.categories.get_group(id).unwrap().unwrap().tombstone);
        assert!(service.find_group("Bills").unwrap().is_none());
        assert!(service.delete_group(id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_hidden_and_reorder() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);

        let a = service.create_group("A").unwrap().id.saved().unwrap();
        let b = service.create_group("B").unwrap().id.saved().unwrap();

        assert!(service.set_group_hidden(a, true).unwrap().hidden);

        service.reorder_groups(&[b, a]).unwrap();
        let names: Vec<_> = service
            .list_groups_with_categories()
            .unwrap()
            .into_iter()
            .map(|g| g.name)
            .collect();
        assert_eq!(names, vec!["B", "A"]);
    }

    #[test]
    fn test_create_category_fills_group() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);

        let id = service.create_group("Needs").unwrap().id.saved().unwrap();
        service.create_category("Groceries", id).unwrap();
        assert!(service.create_category("", id).unwrap_err().is_validation());

        let groups = service.list_groups_with_categories().unwrap();
        assert_eq!(groups[0].categories.len(), 1);
    }
}
