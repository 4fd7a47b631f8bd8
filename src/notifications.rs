//! Notifications
//!
//! Messages raised by the shell and the budget screens. A notification may be
//! sticky and may carry an action that runs when the user dismisses it.

use std::time::{Duration, Instant};

use crate::config::prefs::Prefs;

/// Kind of notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
    /// A persistent message that asks the user to act, such as an update prompt
    Message,
}

/// Work to perform when a notification is dismissed
#[derive(Debug, Clone, PartialEq)]
pub enum CloseAction {
    /// Persist a preference patch
    SavePrefs(Prefs),
}

/// A labelled link shown inside a notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationButton {
    pub title: String,
    pub url: String,
}

/// A single notification
#[derive(Debug, Clone)]
pub struct Notification {
    /// Stable id; pushing another notification with the same id replaces it
    pub id: Option<String>,
    pub kind: NotificationKind,
    pub title: Option<String>,
    pub message: String,
    /// Sticky notifications never expire on their own
    pub sticky: bool,
    pub button: Option<NotificationButton>,
    pub on_close: Option<CloseAction>,
    pub created_at: Instant,
    pub duration: Duration,
}

impl Notification {
    pub fn new(message: impl Into<String>, kind: NotificationKind) -> Self {
        Self {
            id: None,
            kind,
            title: None,
            message: message.into(),
            sticky: false,
            button: None,
            on_close: None,
            created_at: Instant::now(),
            duration: Duration::from_secs(3),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, NotificationKind::Info)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, NotificationKind::Success)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, NotificationKind::Warning)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, NotificationKind::Error).with_duration(Duration::from_secs(5))
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_button(mut self, title: impl Into<String>, url: impl Into<String>) -> Self {
        self.button = Some(NotificationButton {
            title: title.into(),
            url: url.into(),
        });
        self
    }

    pub fn with_close_action(mut self, action: CloseAction) -> Self {
        self.on_close = Some(action);
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn sticky(mut self) -> Self {
        self.sticky = true;
        self
    }

    /// Check whether the notification should be dropped at `now`
    pub fn is_expired_at(&self, now: Instant) -> bool {
        !self.sticky && now.saturating_duration_since(self.created_at) >= self.duration
    }
}

/// A queue of notifications, oldest first
#[derive(Debug, Default)]
pub struct NotificationQueue {
    notifications: Vec<Notification>,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a notification, replacing any queued one with the same id
    pub fn push(&mut self, notification: Notification) {
        if let Some(id) = notification.id.as_deref() {
            if let Some(slot) = self
                .notifications
                .iter_mut()
                .find(|n| n.id.as_deref() == Some(id))
            {
                *slot = notification;
                return;
            }
        }
        self.notifications.push(notification);
    }

    pub fn remove_expired(&mut self, now: Instant) {
        self.notifications.retain(|n| !n.is_expired_at(now));
    }

    pub fn current(&self) -> Option<&Notification> {
        self.notifications.first()
    }

    /// Remove the current notification, handing it back so its close action can run
    pub fn dismiss(&mut self) -> Option<Notification> {
        if self.notifications.is_empty() {
            None
        } else {
            Some(self.notifications.remove(0))
        }
    }

    pub fn find(&self, id: &str) -> Option<&Notification> {
        self.notifications.iter().find(|n| n.id.as_deref() == Some(id))
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }

    pub fn len(&self) -> usize {
        self.notifications.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_order() {
        let mut queue = NotificationQueue::new();
        assert!(queue.is_empty());

        queue.push(Notification::info("First"));
        queue.push(Notification::success("Second"));

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.current().unwrap().message, "First");
        assert_eq!(queue.dismiss().unwrap().message, "First");
        assert_eq!(queue.current().unwrap().message, "Second");
    }

    #[test]
    fn test_same_id_replaces() {
        let mut queue = NotificationQueue::new();
        queue.push(Notification::info("one").with_id("update"));
        queue.push(Notification::info("two").with_id("update"));

        assert_eq!(queue.len(), 1);
        assert_eq!(queue.find("update").unwrap().message, "two");
    }

    #[test]
    fn test_sticky_never_expires() {
        let mut queue = NotificationQueue::new();
        queue.push(Notification::info("gone"));
        queue.push(Notification::new("stays", NotificationKind::Message).sticky());

        queue.remove_expired(Instant::now() + Duration::from_secs(3600));
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.current().unwrap().message, "stays");
    }
}
