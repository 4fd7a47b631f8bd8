//! Service layer
//!
//! Business rules on top of the storage layer: validation, ordering and
//! soft deletes.

pub mod account;
pub mod category;
pub mod payee;

pub use account::AccountService;
pub use category::CategoryService;
pub use payee::PayeeService;
