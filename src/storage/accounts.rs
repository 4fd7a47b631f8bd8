//! Account repository for JSON storage
//!
//! Manages loading and saving accounts to accounts.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::FinancesError;
use crate::models::{Account, AccountId};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct AccountData {
    accounts: Vec<Account>,
}

/// Repository for account persistence
pub struct AccountRepository {
    path: PathBuf,
    data: RwLock<HashMap<AccountId, Account>>,
}

impl AccountRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load accounts from disk
    pub fn load(&self) -> Result<(), FinancesError> {
        let file_data: AccountData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            FinancesError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.clear();
        for account in file_data.accounts {
            data.insert(account.id, account);
        }

        Ok(())
    }

    /// Save accounts to disk
    pub fn save(&self) -> Result<(), FinancesError> {
        let data = self.data.read().map_err(|e| {
            FinancesError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let file_data = AccountData {
            accounts: data.values().cloned().collect(),
        };

        write_json_atomic(&self.path, &file_data)
    }

    pub fn get(&self, id: AccountId) -> Result<Option<Account>, FinancesError> {
        let data = self.data.read().map_err(|e| {
            FinancesError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.get(&id).cloned())
    }

    /// Get all accounts ordered by sort order, then name
    pub fn get_all(&self) -> Result<Vec<Account>, FinancesError> {
        let data = self.data.read().map_err(|e| {
            FinancesError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut accounts: Vec<_> = data.values().cloned().collect();
        accounts.sort_by(|a, b| a.sort_order.cmp(&b.sort_order).then(a.name.cmp(&b.name)));
        Ok(accounts)
    }

    /// Get all open accounts
    pub fn get_open(&self) -> Result<Vec<Account>, FinancesError> {
        Ok(self.get_all()?.into_iter().filter(|a| !a.closed).collect())
    }

    /// Get an account by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Result<Option<Account>, FinancesError> {
        let name_lower = name.to_lowercase();
        Ok(self
            .get_all()?
            .into_iter()
            .find(|a| a.name.to_lowercase() == name_lower))
    }

    pub fn upsert(&self, account: Account) -> Result<(), FinancesError> {
        let mut data = self.data.write().map_err(|e| {
            FinancesError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.insert(account.id, account);
        Ok(())
    }

    pub fn count(&self) -> Result<usize, FinancesError> {
        let data = self.data.read().map_err(|e| {
            FinancesError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AccountType;
    use tempfile::TempDir;

    #[test]
    fn test_open_filters_closed() {
        let temp_dir = TempDir::new().unwrap();
        let repo = AccountRepository::new(temp_dir.path().join("accounts.json"));

        let open = Account::new("Checking", AccountType::Checking);
        let mut closed = Account::new("Old Card", AccountType::Credit);
        closed.close();

        repo.upsert(open).unwrap();
        repo.upsert(closed).unwrap();

        assert_eq!(repo.count().unwrap(), 2);
        let names: Vec<_> = repo.get_open().unwrap().into_iter().map(|a| a.name).collect();
        assert_eq!(names, vec!["Checking"]);
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("accounts.json");
        let repo = AccountRepository::new(path.clone());

        repo.upsert(Account::new("Savings", AccountType::Savings)).unwrap();
        repo.save().unwrap();

        let repo2 = AccountRepository::new(path);
        repo2.load().unwrap();
        assert!(repo2.get_by_name("SAVINGS").unwrap().is_some());
    }
}
