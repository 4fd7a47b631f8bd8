//! Storage layer
//!
//! Provides JSON file storage with atomic writes and automatic directory
//! creation.

pub mod accounts;
pub mod categories;
pub mod file_io;
pub mod init;
pub mod payees;

pub use accounts::AccountRepository;
pub use categories::CategoryRepository;
pub use file_io::{read_json, write_json_atomic};
pub use init::initialize_storage;
pub use payees::PayeeRepository;

use crate::config::paths::FinancesPaths;
use crate::error::FinancesError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: FinancesPaths,
    pub accounts: AccountRepository,
    pub categories: CategoryRepository,
    pub payees: PayeeRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: FinancesPaths) -> Result<Self, FinancesError> {
        paths.ensure_directories()?;

        Ok(Self {
            accounts: AccountRepository::new(paths.accounts_file()),
            categories: CategoryRepository::new(paths.budget_file()),
            payees: PayeeRepository::new(paths.payees_file()),
            paths,
        })
    }

    pub fn paths(&self) -> &FinancesPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&self) -> Result<(), FinancesError> {
        self.accounts.load()?;
        self.categories.load()?;
        self.payees.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), FinancesError> {
        self.accounts.save()?;
        self.categories.save()?;
        self.payees.save()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinancesPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        storage.load_all().unwrap();
        assert_eq!(storage.accounts.count().unwrap(), 0);
    }
}
