//! Account service
//!
//! Creates, closes and lists accounts for the account setup screen and the
//! CLI.

use tracing::info;

use crate::error::{FinancesError, FinancesResult};
use crate::models::{Account, AccountId, AccountType};
use crate::storage::Storage;

/// Service for account management
pub struct AccountService<'a> {
    storage: &'a Storage,
}

impl<'a> AccountService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new account
    pub fn create(
        &self,
        name: &str,
        account_type: AccountType,
        on_budget: bool,
    ) -> FinancesResult<Account> {
        let name = name.trim();
        if name.is_empty() {
            return Err(FinancesError::Validation(
                "Account name cannot be empty".into(),
            ));
        }

        if self.storage.accounts.get_by_name(name)?.is_some() {
            return Err(FinancesError::Duplicate {
                entity_type: "Account",
                identifier: name.to_string(),
            });
        }

        let mut account = Account::new(name, account_type);
        account.on_budget = on_budget;
        account.sort_order = self.storage.accounts.count()? as i32;
        account
            .validate()
            .map_err(|e| FinancesError::Validation(e.to_string()))?;

        self.storage.accounts.upsert(account.clone())?;
        self.storage.accounts.save()?;

        info!(account = %account.id, name = %account.name, "created account");
        Ok(account)
    }

    /// Find an account by name or ID
    pub fn find(&self, identifier: &str) -> FinancesResult<Option<Account>> {
        if let Some(account) = self.storage.accounts.get_by_name(identifier)? {
            return Ok(Some(account));
        }

        if let Ok(id) = identifier.parse::<AccountId>() {
            return self.storage.accounts.get(id);
        }

        Ok(None)
    }

    /// Close an account so it drops out of the sidebar
    pub fn close(&self, id: AccountId) -> FinancesResult<Account> {
        let mut account = self
            .storage
            .accounts
            .get(id)?
            .ok_or_else(|| FinancesError::account_not_found(id.to_string()))?;

        if account.closed {
            return Err(FinancesError::Validation(
                "Account is already closed".into(),
            ));
        }

        account.close();
        self.storage.accounts.upsert(account.clone())?;
        self.storage.accounts.save()?;

        info!(account = %account.id, "closed account");
        Ok(account)
    }

    /// List accounts, optionally including closed ones
    pub fn list(&self, include_closed: bool) -> FinancesResult<Vec<Account>> {
        if include_closed {
            self.storage.accounts.get_all()
        } else {
            self.storage.accounts.get_open()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::FinancesPaths;
    use tempfile::TempDir;

    #[test]
    fn test_create_and_list() {
        let temp_dir = TempDir::new().unwrap();
        let storage =
            Storage::new(FinancesPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();
        let service = AccountService::new(&storage);

        service.create("Checking", AccountType::Checking, true).unwrap();
        let err = service.create("checking", AccountType::Savings, true).unwrap_err();
        assert!(matches!(err, FinancesError::Duplicate { .. }));
        assert!(service.create(" ", AccountType::Cash, true).unwrap_err().is_validation());

        let listed = service.list(false).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Checking");
    }

    #[test]
    fn test_close_hides_account() {
        let temp_dir = TempDir::new().unwrap();
        let storage =
            Storage::new(FinancesPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();
        let service = AccountService::new(&storage);

        let account = service.create("Wallet", AccountType::Cash, true).unwrap();
        let found = service.find("wallet").unwrap().unwrap();
        assert_eq!(found.id, account.id);

        let closed = service.close(account.id).unwrap();
        assert!(closed.closed);
        assert!(service.list(false).unwrap().is_empty());
        assert_eq!(service.list(true).unwrap().len(), 1);
        assert!(service.close(account.id).unwrap_err().is_validation());
    }
}
