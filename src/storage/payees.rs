//! Payee repository for JSON storage
//!
//! Manages loading and saving payees to payees.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::FinancesError;
use crate::models::{Payee, PayeeId};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct PayeeData {
    payees: Vec<Payee>,
}

/// Repository for payee persistence
pub struct PayeeRepository {
    path: PathBuf,
    data: RwLock<HashMap<PayeeId, Payee>>,
}

impl PayeeRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load payees from disk
    pub fn load(&self) -> Result<(), FinancesError> {
        let file_data: PayeeData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            FinancesError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.clear();
        for payee in file_data.payees {
            data.insert(payee.id, payee);
        }

        Ok(())
    }

    /// Save payees to disk
    pub fn save(&self) -> Result<(), FinancesError> {
        let payees = self.get_all()?;
        write_json_atomic(&self.path, &PayeeData { payees })
    }

    /// Get all payees sorted by name
    pub fn get_all(&self) -> Result<Vec<Payee>, FinancesError> {
        let data = self.data.read().map_err(|e| {
            FinancesError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut payees: Vec<_> = data.values().cloned().collect();
        payees.sort_by_key(|p| Payee::normalize_name(&p.name));
        Ok(payees)
    }

    /// Get or create a payee by name
    pub fn get_or_create(&self, name: &str) -> Result<Payee, FinancesError> {
        if let Some(payee) = self.get_all()?.into_iter().find(|p| p.matches_name(name)) {
            return Ok(payee);
        }

        let payee = Payee::new(name.trim());
        let mut data = self.data.write().map_err(|e| {
            FinancesError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        data.insert(payee.id, payee.clone());
        Ok(payee)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_get_or_create_is_case_insensitive() {
        let temp_dir = TempDir::new().unwrap();
        let repo = PayeeRepository::new(temp_dir.path().join("payees.json"));

        let first = repo.get_or_create("Corner Store").unwrap();
        let second = repo.get_or_create("corner store").unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(repo.get_all().unwrap().len(), 1);
    }
}
