//! Application shell
//!
//! Owns navigation and the responsive layout, and runs the startup sequence.
//! Everything here is driven from the UI loop: input, resizes and timer
//! polls arrive as method calls, and work started on other threads reports
//! back through a channel that `poll` drains.
//!
//! On mount the shell:
//!
//! - claims the `app` keyboard scope
//! - settles the initial location, following redirects
//! - sends the user to `/accounts` if there are no accounts yet
//! - schedules the deferred sync and update check
//!
//! Every location change, including those caused by redirects, is written to
//! the undo tracker.

pub mod keyscope;
pub mod navigator;
pub mod providers;
pub mod router;
pub mod scheduler;
pub mod viewport;

use std::sync::{mpsc, Arc};
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::actions::Actions;
use crate::config::settings::Settings;
use crate::undo::{UndoKey, UndoTracker};
use crate::update_check::{self, VersionSource, CURRENT_VERSION};

pub use keyscope::{KeyScopeRegistry, APP_SCOPE};
pub use navigator::{Location, NavigateOptions, Navigator};
pub use providers::{ProviderSeed, Providers};
pub use router::{Resolution, RouteTable, Screen, ACCOUNTS_PATH, BUDGET_PATH};
pub use scheduler::Scheduler;
pub use viewport::{ResponsiveObserver, ViewportClass};

/// Redirects followed per location change before giving up
const MAX_REDIRECT_HOPS: usize = 8;

/// Shell tuning taken from settings
#[derive(Debug, Clone)]
pub struct ShellConfig {
    pub narrow_breakpoint: u16,
    pub startup_delay: Duration,
    pub update_check: bool,
    pub changelog_url: String,
    pub current_version: String,
    pub initial_path: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            narrow_breakpoint: 100,
            startup_delay: Duration::from_millis(100),
            update_check: true,
            changelog_url: "https://actualbudget.org/docs/releases".into(),
            current_version: CURRENT_VERSION.into(),
            initial_path: "/".into(),
        }
    }
}

impl ShellConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            narrow_breakpoint: settings.narrow_breakpoint,
            startup_delay: Duration::from_millis(settings.startup_delay_ms),
            update_check: settings.update_check.enabled,
            changelog_url: settings.update_check.changelog_url.clone(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShellTask {
    Startup,
}

/// Results delivered from worker threads
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellMessage {
    LatestVersion(Result<String, String>),
}

/// Progress of the deferred startup work
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartupPhase {
    Scheduled,
    CheckingForUpdates,
    Done,
}

/// What is currently on screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveView {
    pub screen: Screen,
    pub narrow_variant: bool,
}

pub struct AppShell<A: Actions> {
    actions: A,
    config: ShellConfig,
    routes: RouteTable,
    navigator: Navigator,
    responsive: ResponsiveObserver,
    undo: UndoTracker,
    key_scope: KeyScopeRegistry,
    providers: Providers,
    scheduler: Scheduler<ShellTask>,
    version_source: Option<Arc<dyn VersionSource>>,
    sender: mpsc::Sender<ShellMessage>,
    receiver: mpsc::Receiver<ShellMessage>,
    phase: StartupPhase,
    mounted: bool,
    view: Option<ActiveView>,
    redirects: usize,
}

impl<A: Actions> AppShell<A> {
    pub fn new(actions: A, config: ShellConfig, width: u16) -> Self {
        let responsive = ResponsiveObserver::new(config.narrow_breakpoint, width);

        let accounts = actions.get_accounts().unwrap_or_else(|e| {
            warn!(error = %e, "could not load accounts for providers");
            Vec::new()
        });
        let payees = actions.get_payees().unwrap_or_else(|e| {
            warn!(error = %e, "could not load payees for providers");
            Vec::new()
        });
        let providers = Providers::compose(ProviderSeed {
            width,
            viewport: Some(responsive.class()),
            accounts,
            payees,
        });

        let (sender, receiver) = mpsc::channel();
        Self {
            actions,
            navigator: Navigator::new(&config.initial_path),
            config,
            routes: RouteTable::primary(),
            responsive,
            undo: UndoTracker::new(),
            key_scope: KeyScopeRegistry::new(),
            providers,
            scheduler: Scheduler::new(),
            version_source: None,
            sender,
            receiver,
            phase: StartupPhase::Scheduled,
            mounted: false,
            view: None,
            redirects: 0,
        }
    }

    /// Use `source` for the update check
    pub fn with_version_source(mut self, source: Arc<dyn VersionSource>) -> Self {
        self.version_source = Some(source);
        self
    }

    pub fn mount(&mut self, now: Instant) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        self.key_scope.set_scope(APP_SCOPE);
        info!(viewport = %self.responsive.class(), "shell mounted");

        self.location_changed();

        match self.actions.get_accounts() {
            Ok(accounts) if accounts.is_empty() => {
                info!("no accounts, opening account setup");
                self.navigate(ACCOUNTS_PATH, NavigateOptions::default());
            }
            Ok(_) => {}
            Err(e) => warn!(error = %e, "could not check accounts"),
        }

        self.scheduler
            .schedule_at(now + self.config.startup_delay, ShellTask::Startup);
    }

    /// Release the keyboard scope
    ///
    /// Already scheduled startup work still runs if the loop keeps polling.
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.key_scope.reset();
        info!("shell unmounted");
    }

    pub fn navigate(&mut self, href: &str, options: NavigateOptions) {
        self.navigator.navigate(href, options);
        self.location_changed();
    }

    /// Step back in history
    pub fn back(&mut self) -> bool {
        if self.navigator.back().is_none() {
            return false;
        }
        self.location_changed();
        true
    }

    /// Feed a new terminal width
    pub fn resize(&mut self, width: u16) {
        let changed = self.responsive.observe(width);
        let class = self.responsive.class();
        self.providers.relayout(width, class, changed.is_some());

        if let Some(class) = changed {
            debug!(%class, width, "viewport class changed");
            self.settle();
        }
    }

    /// Run due timers and deliver worker results
    pub fn poll(&mut self, now: Instant) {
        for task in self.scheduler.take_due(now) {
            match task {
                ShellTask::Startup => self.run_startup(),
            }
        }

        while let Ok(message) = self.receiver.try_recv() {
            match message {
                ShellMessage::LatestVersion(result) => self.on_latest_version(result),
            }
        }
    }

    fn run_startup(&mut self) {
        match self.actions.sync() {
            Ok(report) => debug!(?report, "startup sync finished"),
            Err(e) => warn!(error = %e, "startup sync failed"),
        }
        match self.actions.get_accounts() {
            Ok(accounts) => self.providers.accounts.replace(accounts),
            Err(e) => warn!(error = %e, "could not refresh accounts"),
        }

        let source = match (&self.version_source, self.config.update_check) {
            (Some(source), true) => Arc::clone(source),
            _ => {
                self.phase = StartupPhase::Done;
                return;
            }
        };

        self.phase = StartupPhase::CheckingForUpdates;
        let sender = self.sender.clone();
        update_check::spawn_fetch(source, move |result| {
            // The receiver is gone once the shell is dropped
            let _ = sender.send(ShellMessage::LatestVersion(result));
        });
    }

    /// Handle the outcome of the latest-version fetch
    pub fn on_latest_version(&mut self, result: Result<String, String>) {
        self.phase = StartupPhase::Done;
        let latest = match result {
            Ok(latest) => latest,
            Err(e) => {
                debug!(error = %e, "skipping update notification");
                return;
            }
        };

        if let Err(e) = update_check::check_for_update_notification(
            &mut self.actions,
            &self.config.current_version,
            &latest,
            &self.config.changelog_url,
        ) {
            warn!(error = %e, "update notification check failed");
        }
    }

    fn location_changed(&mut self) {
        let href = self.navigator.location().href();
        self.undo.set_undo_state(UndoKey::Url, href);
        self.settle();
    }

    /// Resolve the current location, following redirects
    fn settle(&mut self) {
        for _ in 0..MAX_REDIRECT_HOPS {
            let path = self.navigator.location().pathname.clone();
            match self.routes.resolve(&path, self.responsive.class()) {
                Resolution::Render {
                    screen,
                    narrow_variant,
                    ..
                } => {
                    self.providers.titlebar.set_title(screen.title());
                    self.view = Some(ActiveView {
                        screen,
                        narrow_variant,
                    });
                    return;
                }
                Resolution::Redirect { to, replace } => {
                    debug!(from = %path, to = %to, replace, "redirect");
                    self.redirects += 1;
                    self.navigator.navigate(&to, NavigateOptions { replace });
                    let href = self.navigator.location().href();
                    self.undo.set_undo_state(UndoKey::Url, href);
                }
            }
        }
        warn!(path = %self.navigator.location(), "too many redirects");
    }

    pub fn actions(&self) -> &A {
        &self.actions
    }

    pub fn actions_mut(&mut self) -> &mut A {
        &mut self.actions
    }

    pub fn location(&self) -> &Location {
        self.navigator.location()
    }

    pub fn view(&self) -> Option<&ActiveView> {
        self.view.as_ref()
    }

    pub fn current_screen(&self) -> Option<&Screen> {
        self.view.as_ref().map(|v| &v.screen)
    }

    pub fn viewport(&self) -> ViewportClass {
        self.responsive.class()
    }

    pub fn width(&self) -> u16 {
        self.responsive.width()
    }

    /// Whether the bottom navigation tabs are shown
    pub fn nav_tabs_visible(&self) -> bool {
        router::nav_tabs_visible(&self.navigator.location().pathname, self.viewport())
    }

    pub fn undo(&self) -> &UndoTracker {
        &self.undo
    }

    pub fn key_scope(&self) -> &KeyScopeRegistry {
        &self.key_scope
    }

    pub fn providers(&self) -> &Providers {
        &self.providers
    }

    pub fn providers_mut(&mut self) -> &mut Providers {
        &mut self.providers
    }

    /// Borrow the actions alongside mutable providers
    pub fn actions_and_providers_mut(&mut self) -> (&A, &mut Providers) {
        (&self.actions, &mut self.providers)
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn startup_phase(&self) -> StartupPhase {
        self.phase
    }

    /// Redirects performed since construction
    pub fn redirect_count(&self) -> usize {
        self.redirects
    }
}
