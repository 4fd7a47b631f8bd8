//! Update checker
//!
//! Finds the newest release tag on GitHub and raises a sticky notification
//! when it is newer than the running build. Dismissing the notification
//! records the version so the same release is only announced once.

use std::sync::Arc;
use std::thread;

use semver::Version;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::actions::Actions;
use crate::config::prefs::{Prefs, UPDATE_NOTIFICATION_SHOWN_FOR_VERSION};
use crate::error::{FinancesError, FinancesResult};
use crate::notifications::{CloseAction, Notification, NotificationKind};

/// Current version from Cargo.toml
pub const CURRENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Id of the update notification; a second one replaces the first
pub const UPDATE_NOTIFICATION_ID: &str = "update-notification";

/// Where the latest released version comes from
pub trait VersionSource: Send + Sync {
    fn latest_version(&self) -> FinancesResult<String>;
}

#[derive(Debug, Clone, Deserialize)]
struct Tag {
    name: String,
}

/// Reads release tags from the GitHub API
pub struct GithubVersionSource {
    url: String,
    client: reqwest::blocking::Client,
}

impl GithubVersionSource {
    pub fn new(url: impl Into<String>) -> FinancesResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("finances-app/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(10))
            .build()?;
        Ok(Self {
            url: url.into(),
            client,
        })
    }
}

impl VersionSource for GithubVersionSource {
    fn latest_version(&self) -> FinancesResult<String> {
        let response = self.client.get(&self.url).send()?;
        if !response.status().is_success() {
            return Err(FinancesError::Network(format!(
                "GitHub API returned status {}",
                response.status()
            )));
        }

        let tags: Vec<Tag> = response.json()?;
        let names: Vec<&str> = tags.iter().map(|t| t.name.as_str()).collect();
        latest_release(&names)
            .ok_or_else(|| FinancesError::Network("No release tags found".into()))
    }
}

/// Parse a version, tolerating a leading `v`
pub fn parse_version(raw: &str) -> Option<Version> {
    let trimmed = raw.trim();
    Version::parse(trimmed.strip_prefix('v').unwrap_or(trimmed)).ok()
}

/// Pick the highest stable release among tag names
pub fn latest_release(tags: &[&str]) -> Option<String> {
    tags.iter()
        .filter_map(|t| parse_version(t))
        .filter(|v| v.pre.is_empty())
        .max()
        .map(|v| v.to_string())
}

/// Check whether `latest` is newer than `current`
///
/// Either side failing to parse counts as up to date.
pub fn is_outdated(current: &str, latest: &str) -> bool {
    match (parse_version(current), parse_version(latest)) {
        (Some(current), Some(latest)) => latest > current,
        _ => false,
    }
}

/// Build the sticky update notification for `latest`
pub fn update_notification(latest: &str, changelog_url: &str) -> Notification {
    Notification::new(
        format!("Version {} was recently released.", latest),
        NotificationKind::Message,
    )
    .with_id(UPDATE_NOTIFICATION_ID)
    .with_title("A new version is available!")
    .with_button("Open changelog", changelog_url)
    .with_close_action(CloseAction::SavePrefs(Prefs::with(
        UPDATE_NOTIFICATION_SHOWN_FOR_VERSION,
        latest,
    )))
    .sticky()
}

/// Raise the update notification unless it is not needed
///
/// Returns whether a notification was added.
pub fn check_for_update_notification<A: Actions + ?Sized>(
    actions: &mut A,
    current: &str,
    latest: &str,
    changelog_url: &str,
) -> FinancesResult<bool> {
    if !is_outdated(current, latest) {
        debug!(current, latest, "up to date");
        return Ok(false);
    }

    let prefs = actions.load_prefs()?;
    if prefs.get_str(UPDATE_NOTIFICATION_SHOWN_FOR_VERSION) == Some(latest) {
        debug!(latest, "update notification already shown");
        return Ok(false);
    }

    info!(current, latest, "new version available");
    actions.add_notification(update_notification(latest, changelog_url));
    Ok(true)
}

/// Fetch the latest version on a worker thread
///
/// `deliver` receives the outcome on the worker thread; errors are passed as
/// display strings.
pub fn spawn_fetch<F>(source: Arc<dyn VersionSource>, deliver: F) -> thread::JoinHandle<()>
where
    F: FnOnce(Result<String, String>) + Send + 'static,
{
    thread::spawn(move || {
        let result = source.latest_version().map_err(|e| {
            warn!(error = %e, "update check failed");
            e.to_string()
        });
        deliver(result);
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::FinancesPaths;
    use crate::actions::LocalActions;
    use crate::storage::Storage;
    use std::sync::mpsc;
    use tempfile::TempDir;

    struct FixedVersion(&'static str);

    impl VersionSource for FixedVersion {
        fn latest_version(&self) -> FinancesResult<String> {
            Ok(self.0.to_string())
        }
    }

    fn create_actions() -> (TempDir, LocalActions) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinancesPaths::with_base_dir(temp_dir.path().to_path_buf());
        (temp_dir, LocalActions::new(Storage::new(paths).unwrap()))
    }

    #[test]
    fn test_current_version_parses() {
        assert!(parse_version(CURRENT_VERSION).is_some());
    }

    #[test]
    fn test_is_outdated() {
        assert!(is_outdated("0.1.0", "v0.2.0"));
        assert!(!is_outdated("0.2.0", "0.2.0"));
        assert!(!is_outdated("0.3.0", "0.2.0"));
        assert!(!is_outdated("0.1.0", "nightly"));
    }

    #[test]
    fn test_latest_release_skips_prereleases() {
        let tags = ["v24.1.0", "v24.10.0", "v25.0.0-beta.1", "junk", "v24.2.0"];
        assert_eq!(latest_release(&tags).as_deref(), Some("24.10.0"));
        assert_eq!(latest_release(&[]), None);
    }

    #[test]
    fn test_notification_shown_once_per_version() {
        let (_temp_dir, mut actions) = create_actions();

        let added = check_for_update_notification(&mut actions, "1.0.0", "1.1.0", "https://x").unwrap();
        assert!(added);
        let notification = actions.notifications().find(UPDATE_NOTIFICATION_ID).unwrap();
        assert!(notification.sticky);
        assert_eq!(notification.button.as_ref().unwrap().title, "Open changelog");

        // Dismiss records the version
        actions.dismiss_notification().unwrap();
        let added = check_for_update_notification(&mut actions, "1.0.0", "1.1.0", "https://x").unwrap();
        assert!(!added);
        assert!(actions.notifications().is_empty());

        // A newer release is announced again
        assert!(check_for_update_notification(&mut actions, "1.0.0", "1.2.0", "https://x").unwrap());
    }

    #[test]
    fn test_up_to_date_adds_nothing() {
        let (_temp_dir, mut actions) = create_actions();
        assert!(!check_for_update_notification(&mut actions, "2.0.0", "1.9.0", "https://x").unwrap());
        assert!(actions.notifications().is_empty());
    }

    #[test]
    fn test_spawn_fetch_delivers() {
        let (tx, rx) = mpsc::channel();
        let handle = spawn_fetch(Arc::new(FixedVersion("3.0.0")), move |result| {
            tx.send(result).unwrap();
        });
        handle.join().unwrap();
        assert_eq!(rx.recv().unwrap(), Ok("3.0.0".to_string()));
    }
}
