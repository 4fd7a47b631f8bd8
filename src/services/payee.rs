//! Payee service

use tracing::info;

use crate::error::{FinancesError, FinancesResult};
use crate::models::Payee;
use crate::storage::Storage;

/// Service for payee management
pub struct PayeeService<'a> {
    storage: &'a Storage,
}

impl<'a> PayeeService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Add a payee, returning the existing one when the name is already known
    pub fn add(&self, name: &str) -> FinancesResult<Payee> {
        if name.trim().is_empty() {
            return Err(FinancesError::Validation(
                "Payee name cannot be empty".into(),
            ));
        }

        let known = self
            .storage
            .payees
            .get_all()?
            .iter()
            .any(|p| p.matches_name(name));
        let payee = self.storage.payees.get_or_create(name)?;
        if !known {
            self.storage.payees.save()?;
            info!(payee = %payee.id, name = %payee.name, "created payee");
        }
        Ok(payee)
    }

    /// All payees sorted by name
    pub fn list(&self) -> FinancesResult<Vec<Payee>> {
        self.storage.payees.get_all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::FinancesPaths;
    use tempfile::TempDir;

    #[test]
    fn test_add_reuses_existing_payee() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinancesPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths.clone()).unwrap();
        let service = PayeeService::new(&storage);

        let first = service.add("Corner Store").unwrap();
        let second = service.add(" corner store ").unwrap();
        assert_eq!(first.id, second.id);
        assert!(service.add("   ").unwrap_err().is_validation());

        let reopened = Storage::new(paths).unwrap();
        reopened.load_all().unwrap();
        let names: Vec<_> = PayeeService::new(&reopened)
            .list()
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Corner Store"]);
    }
}
