//! Local preferences
//!
//! A flat string-keyed map persisted to `prefs.json`. Saving merges a patch
//! into whatever is already stored, so callers only send the keys they touch.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::paths::FinancesPaths;
use crate::error::FinancesError;
use crate::storage::file_io::{read_json, write_json_atomic};

/// Key recording the release an update notification was already shown for
pub const UPDATE_NOTIFICATION_SHOWN_FOR_VERSION: &str = "flags.updateNotificationShownForVersion";

/// Key holding the ids of collapsed category groups
pub const COLLAPSED_GROUPS: &str = "budget.collapsed";

/// Local preference map
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Prefs(BTreeMap<String, Value>);

impl Prefs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a single-key patch
    pub fn with(key: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut prefs = Self::new();
        prefs.set(key, value);
        prefs
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Get a string-valued preference
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Get a list of strings, skipping non-string entries
    pub fn get_str_list(&self, key: &str) -> Vec<String> {
        self.0
            .get(key)
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Overwrite keys present in `patch`
    pub fn merge(&mut self, patch: Prefs) {
        self.0.extend(patch.0);
    }

    /// Load preferences, empty if the file is missing
    pub fn load(paths: &FinancesPaths) -> Result<Self, FinancesError> {
        read_json(paths.prefs_file())
    }

    /// Merge `patch` into the stored preferences and write them back
    pub fn save_patch(paths: &FinancesPaths, patch: Prefs) -> Result<Self, FinancesError> {
        let mut prefs = Self::load(paths)?;
        prefs.merge(patch);
        write_json_atomic(paths.prefs_file(), &prefs)?;
        Ok(prefs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinancesPaths::with_base_dir(temp_dir.path().to_path_buf());

        let prefs = Prefs::load(&paths).unwrap();
        assert_eq!(prefs, Prefs::new());
    }

    #[test]
    fn test_save_patch_merges() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinancesPaths::with_base_dir(temp_dir.path().to_path_buf());

        Prefs::save_patch(&paths, Prefs::with("a", "1")).unwrap();
        Prefs::save_patch(&paths, Prefs::with(UPDATE_NOTIFICATION_SHOWN_FOR_VERSION, "2.0.0"))
            .unwrap();

        let prefs = Prefs::load(&paths).unwrap();
        assert_eq!(prefs.get_str("a"), Some("1"));
        assert_eq!(
            prefs.get_str(UPDATE_NOTIFICATION_SHOWN_FOR_VERSION),
            Some("2.0.0")
        );
    }

    #[test]
    fn test_str_list() {
        let prefs = Prefs::with(COLLAPSED_GROUPS, serde_json::json!(["x", 3, "y"]));
        assert_eq!(prefs.get_str_list(COLLAPSED_GROUPS), vec!["x", "y"]);
        assert!(prefs.get_str_list("missing").is_empty());
    }
}
