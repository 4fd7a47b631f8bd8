//! Category and CategoryGroup models
//!
//! Groups head the budget sidebar. A group that has not been saved yet is a
//! draft and carries the `"new"` sentinel key instead of an id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CategoryGroupId, CategoryId};

/// Sentinel used on the wire for a draft group
pub const DRAFT_GROUP_KEY: &str = "new";

/// Identity of a group row: either an unsaved draft or a stored group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum GroupKey {
    Draft,
    Saved(CategoryGroupId),
}

impl GroupKey {
    pub fn is_draft(&self) -> bool {
        matches!(self, Self::Draft)
    }

    pub fn saved(&self) -> Option<CategoryGroupId> {
        match self {
            Self::Draft => None,
            Self::Saved(id) => Some(*id),
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Draft => write!(f, "{}", DRAFT_GROUP_KEY),
            Self::Saved(id) => write!(f, "{}", id.as_uuid()),
        }
    }
}

impl From<CategoryGroupId> for GroupKey {
    fn from(id: CategoryGroupId) -> Self {
        Self::Saved(id)
    }
}

impl From<GroupKey> for String {
    fn from(key: GroupKey) -> Self {
        key.to_string()
    }
}

impl TryFrom<String> for GroupKey {
    type Error = uuid::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value == DRAFT_GROUP_KEY {
            Ok(Self::Draft)
        } else {
            Ok(Self::Saved(value.parse()?))
        }
    }
}

/// A group of related categories (e.g., "Bills", "Needs", "Wants")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryGroup {
    pub id: GroupKey,

    pub name: String,

    /// Whether the group is hidden from the budget
    #[serde(default)]
    pub hidden: bool,

    /// Income groups collect inflow categories
    #[serde(default)]
    pub is_income: bool,

    /// Sort order for display
    pub sort_order: i32,

    /// Soft-delete flag
    #[serde(default)]
    pub tombstone: bool,

    /// Categories in this group, filled in by the service layer
    #[serde(skip)]
    pub categories: Vec<Category>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl CategoryGroup {
    /// Create a new stored category group
    pub fn new(name: impl Into<String>) -> Self {
        let mut group = Self::draft();
        group.id = GroupKey::Saved(CategoryGroupId::new());
        group.name = name.into();
        group
    }

    /// Create an unsaved draft with an empty name
    pub fn draft() -> Self {
        let now = Utc::now();
        Self {
            id: GroupKey::Draft,
            name: String::new(),
            hidden: false,
            is_income: false,
            sort_order: 0,
            tombstone: false,
            categories: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a new group with a specific sort order
    pub fn with_sort_order(name: impl Into<String>, sort_order: i32) -> Self {
        let mut group = Self::new(name);
        group.sort_order = sort_order;
        group
    }

    pub fn is_draft(&self) -> bool {
        self.id.is_draft()
    }

    /// Validate the group
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if self.name.trim().is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }

        if self.name.len() > 50 {
            return Err(CategoryValidationError::NameTooLong(self.name.len()));
        }

        Ok(())
    }
}

impl fmt::Display for CategoryGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A budget category within a group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,

    pub name: String,

    /// The group this category belongs to
    pub group_id: CategoryGroupId,

    /// Sort order within the group
    pub sort_order: i32,

    #[serde(default)]
    pub hidden: bool,

    #[serde(default)]
    pub notes: String,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Category {
    /// Create a new category
    pub fn new(name: impl Into<String>, group_id: CategoryGroupId) -> Self {
        let now = Utc::now();
        Self {
            id: CategoryId::new(),
            name: name.into(),
            group_id,
            sort_order: 0,
            hidden: false,
            notes: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_sort_order(
        name: impl Into<String>,
        group_id: CategoryGroupId,
        sort_order: i32,
    ) -> Self {
        let mut category = Self::new(name, group_id);
        category.sort_order = sort_order;
        category
    }

    /// Validate the category
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if self.name.trim().is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }

        if self.name.len() > 50 {
            return Err(CategoryValidationError::NameTooLong(self.name.len()));
        }

        Ok(())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Default category groups for new budgets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultCategoryGroup {
    Bills,
    Needs,
    Wants,
    Savings,
    Income,
}

impl DefaultCategoryGroup {
    /// Get all default groups in order
    pub fn all() -> &'static [Self] {
        &[
            Self::Bills,
            Self::Needs,
            Self::Wants,
            Self::Savings,
            Self::Income,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Bills => "Bills",
            Self::Needs => "Needs",
            Self::Wants => "Wants",
            Self::Savings => "Savings",
            Self::Income => "Income",
        }
    }

    /// Starter categories seeded into this group
    pub fn categories(&self) -> &'static [&'static str] {
        match self {
            Self::Bills => &["Rent/Mortgage", "Electric", "Internet", "Phone"],
            Self::Needs => &["Groceries", "Transportation", "Medical"],
            Self::Wants => &["Dining Out", "Entertainment", "Subscriptions"],
            Self::Savings => &["Emergency Fund", "Vacation"],
            Self::Income => &["Paycheck", "Other Income"],
        }
    }

    /// Create a CategoryGroup from this default
    pub fn to_group(&self, sort_order: i32) -> CategoryGroup {
        let mut group = CategoryGroup::with_sort_order(self.name(), sort_order);
        group.is_income = matches!(self, Self::Income);
        group
    }
}

/// Validation errors for categories and groups
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Name cannot be empty"),
            Self::NameTooLong(len) => write!(f, "Name too long ({} chars, max 50)", len),
        }
    }
}

impl std::error::Error for CategoryValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_group() {
        let group = CategoryGroup::new("Bills");
        assert_eq!(group.name, "Bills");
        assert!(!group.is_draft());
        assert!(!group.hidden);
        assert!(!group.tombstone);
    }

    #[test]
    fn test_draft_key_serializes_as_sentinel() {
        let draft = CategoryGroup::draft();
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["id"], "new");

        let back: CategoryGroup = serde_json::from_value(json).unwrap();
        assert_eq!(back.id, GroupKey::Draft);
    }

    #[test]
    fn test_saved_key_round_trips_through_string() {
        let group = CategoryGroup::new("Needs");
        let text = String::from(group.id);
        assert_eq!(GroupKey::try_from(text).unwrap(), group.id);
        assert!(GroupKey::try_from("bogus".to_string()).is_err());
    }

    #[test]
    fn test_group_validation() {
        let mut group = CategoryGroup::new("Valid");
        assert!(group.validate().is_ok());

        group.name = "   ".into();
        assert_eq!(group.validate(), Err(CategoryValidationError::EmptyName));

        group.name = "x".repeat(51);
        assert_eq!(
            group.validate(),
            Err(CategoryValidationError::NameTooLong(51))
        );
    }

    #[test]
    fn test_income_default_group() {
        let group = DefaultCategoryGroup::Income.to_group(4);
        assert!(group.is_income);
        assert_eq!(group.sort_order, 4);
        assert!(!DefaultCategoryGroup::Bills.to_group(0).is_income);
    }
}
