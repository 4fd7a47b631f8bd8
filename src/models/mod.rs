//! Core data models
//!
//! The slice of the budgeting domain the client shell and sidebar read:
//! accounts, payees, categories and category groups.

pub mod account;
pub mod category;
pub mod ids;
pub mod payee;

pub use account::{Account, AccountType};
pub use category::{Category, CategoryGroup, DefaultCategoryGroup, GroupKey, DRAFT_GROUP_KEY};
pub use ids::{AccountId, CategoryGroupId, CategoryId, PayeeId};
pub use payee::Payee;
