//! Application actions
//!
//! The capabilities the shell consumes: syncing, reading accounts, raising
//! notifications and reading or writing local preferences. `LocalActions`
//! backs them with the on-disk store.

use tracing::{info, warn};

use crate::config::prefs::Prefs;
use crate::error::FinancesResult;
use crate::models::{Account, Payee};
use crate::notifications::{CloseAction, Notification, NotificationKind, NotificationQueue};
use crate::storage::Storage;

/// Counts reported by a sync
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub accounts: usize,
    pub groups: usize,
}

/// Capabilities the application shell depends on
pub trait Actions {
    /// Bring local data up to date
    fn sync(&mut self) -> FinancesResult<SyncReport>;

    /// All accounts, including closed ones
    fn get_accounts(&self) -> FinancesResult<Vec<Account>>;

    fn get_payees(&self) -> FinancesResult<Vec<Payee>>;

    fn add_notification(&mut self, notification: Notification);

    fn load_prefs(&self) -> FinancesResult<Prefs>;

    /// Merge `patch` into the stored preferences
    fn save_prefs(&mut self, patch: Prefs) -> FinancesResult<()>;
}

/// Actions backed by the local JSON store
pub struct LocalActions {
    storage: Storage,
    notifications: NotificationQueue,
}

impl LocalActions {
    pub fn new(storage: Storage) -> Self {
        Self {
            storage,
            notifications: NotificationQueue::new(),
        }
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub fn notifications(&self) -> &NotificationQueue {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut NotificationQueue {
        &mut self.notifications
    }

    /// Dismiss the current notification and run its close action
    pub fn dismiss_notification(&mut self) -> FinancesResult<Option<Notification>> {
        let Some(notification) = self.notifications.dismiss() else {
            return Ok(None);
        };

        if let Some(CloseAction::SavePrefs(patch)) = notification.on_close.clone() {
            self.save_prefs(patch)?;
        }
        Ok(Some(notification))
    }
}

impl Actions for LocalActions {
    fn sync(&mut self) -> FinancesResult<SyncReport> {
        self.storage.load_all()?;
        let report = SyncReport {
            accounts: self.storage.accounts.count()?,
            groups: self.storage.categories.group_count()?,
        };
        info!(accounts = report.accounts, groups = report.groups, "sync complete");
        Ok(report)
    }

    fn get_accounts(&self) -> FinancesResult<Vec<Account>> {
        self.storage.accounts.get_all()
    }

    fn get_payees(&self) -> FinancesResult<Vec<Payee>> {
        self.storage.payees.get_all()
    }

    fn add_notification(&mut self, notification: Notification) {
        if notification.kind == NotificationKind::Error {
            warn!(message = %notification.message, "error notification");
        }
        self.notifications.push(notification);
    }

    fn load_prefs(&self) -> FinancesResult<Prefs> {
        Prefs::load(self.storage.paths())
    }

    fn save_prefs(&mut self, patch: Prefs) -> FinancesResult<()> {
        Prefs::save_patch(self.storage.paths(), patch)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::FinancesPaths;
    use crate::config::prefs::UPDATE_NOTIFICATION_SHOWN_FOR_VERSION;
    use crate::models::AccountType;
    use crate::services::AccountService;
    use tempfile::TempDir;

    fn create_actions() -> (TempDir, LocalActions) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinancesPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        (temp_dir, LocalActions::new(storage))
    }

    #[test]
    fn test_sync_reloads_from_disk() {
        let (_temp_dir, mut actions) = create_actions();
        assert_eq!(actions.sync().unwrap().accounts, 0);

        // Written by another storage handle, only visible after a sync
        let other = Storage::new(actions.storage().paths().clone()).unwrap();
        AccountService::new(&other)
            .create("Checking", AccountType::Checking, true)
            .unwrap();

        assert!(actions.get_accounts().unwrap().is_empty());
        assert_eq!(actions.sync().unwrap().accounts, 1);
        assert_eq!(actions.get_accounts().unwrap().len(), 1);
    }

    #[test]
    fn test_dismiss_runs_close_action() {
        let (_temp_dir, mut actions) = create_actions();
        actions.add_notification(
            Notification::info("update")
                .sticky()
                .with_close_action(CloseAction::SavePrefs(Prefs::with(
                    UPDATE_NOTIFICATION_SHOWN_FOR_VERSION,
                    "9.9.9",
                ))),
        );

        assert!(actions.load_prefs().unwrap().get(UPDATE_NOTIFICATION_SHOWN_FOR_VERSION).is_none());
        actions.dismiss_notification().unwrap();

        let prefs = actions.load_prefs().unwrap();
        assert_eq!(prefs.get_str(UPDATE_NOTIFICATION_SHOWN_FOR_VERSION), Some("9.9.9"));
        assert!(actions.dismiss_notification().unwrap().is_none());
    }
}
