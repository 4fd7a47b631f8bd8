//! Application state for the TUI
//!
//! The App struct holds the shell, the budget sidebar list and the input
//! state needed for rendering and handling events.

use std::sync::Arc;
use std::time::Instant;

use tracing::warn;

use crate::actions::{Actions, LocalActions};
use crate::budget::{GroupList, GroupRowEvent, ListEffect};
use crate::config::prefs::{Prefs, COLLAPSED_GROUPS};
use crate::config::settings::Settings;
use crate::error::FinancesResult;
use crate::models::{AccountType, GroupKey};
use crate::notifications::{Notification, NotificationKind};
use crate::services::AccountService;
use crate::shell::{AppShell, NavigateOptions, Screen, ShellConfig, StartupPhase};
use crate::storage::Storage;
use crate::update_check::GithubVersionSource;

use super::widgets::input::TextInput;

/// Sidebar navigation entries: shortcut, label and path
pub const NAV_ITEMS: [(char, &str, &str); 7] = [
    ('1', "Budget", "/budget"),
    ('2', "Reports", "/reports"),
    ('3', "Schedules", "/schedules"),
    ('4', "Accounts", "/accounts"),
    ('5', "Payees", "/payees"),
    ('6', "Rules", "/rules"),
    ('7', "Settings", "/settings"),
];

/// Which panel currently has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusedPanel {
    Sidebar,
    #[default]
    Main,
}

/// Mode of input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Naming or renaming a category group
    EditingGroup,
    NewCategory,
    /// Typing a path to open
    GoTo,
}

/// Currently active dialog (if any)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ActiveDialog {
    #[default]
    None,
    Help,
    AddAccount,
    Notes(GroupKey),
}

/// Add-account form state
#[derive(Debug, Clone, Default)]
pub struct AccountFormState {
    pub name: TextInput,
    pub account_type: AccountType,
}

impl AccountFormState {
    const TYPES: [AccountType; 6] = [
        AccountType::Checking,
        AccountType::Savings,
        AccountType::Credit,
        AccountType::Cash,
        AccountType::Investment,
        AccountType::Other,
    ];

    pub fn reset(&mut self) {
        self.name = TextInput::new()
            .label("Name")
            .placeholder("Account name")
            .focused(true);
        self.account_type = AccountType::default();
    }

    /// Step through account types
    pub fn cycle_type(&mut self, forward: bool) {
        let len = Self::TYPES.len();
        let i = Self::TYPES
            .iter()
            .position(|t| *t == self.account_type)
            .unwrap_or(0);
        let next = if forward { (i + 1) % len } else { (i + len - 1) % len };
        self.account_type = Self::TYPES[next];
    }
}

/// Main application state
pub struct App {
    pub shell: AppShell<LocalActions>,
    pub settings: Settings,
    pub groups: GroupList,
    pub should_quit: bool,
    pub focused_panel: FocusedPanel,
    pub input_mode: InputMode,
    pub active_dialog: ActiveDialog,
    /// Group name or new category name being typed
    pub name_input: TextInput,
    /// Path typed in go-to mode
    pub goto_input: TextInput,
    pub account_form: AccountFormState,
    pub selected_nav_index: usize,
    pub selected_account_index: usize,
    pub status_message: Option<String>,
    synced: bool,
}

impl App {
    /// Create the app around loaded storage
    pub fn new(storage: Storage, settings: Settings, width: u16) -> FinancesResult<Self> {
        let actions = LocalActions::new(storage);
        let collapsed = actions.load_prefs()?.get_str_list(COLLAPSED_GROUPS);
        let groups = GroupList::load(actions.storage(), &collapsed)?;

        let mut shell = AppShell::new(actions, ShellConfig::from_settings(&settings), width);
        if settings.update_check.enabled {
            match GithubVersionSource::new(settings.update_check.tags_url.clone()) {
                Ok(source) => shell = shell.with_version_source(Arc::new(source)),
                Err(e) => warn!(error = %e, "update check disabled"),
            }
        }

        let mut app = Self {
            shell,
            settings,
            groups,
            should_quit: false,
            focused_panel: FocusedPanel::default(),
            input_mode: InputMode::default(),
            active_dialog: ActiveDialog::default(),
            name_input: TextInput::new(),
            goto_input: TextInput::new(),
            account_form: AccountFormState::default(),
            selected_nav_index: 0,
            selected_account_index: 0,
            status_message: None,
            synced: false,
        };
        app.bind_group_counts();
        Ok(app)
    }

    pub fn storage(&self) -> &Storage {
        self.shell.actions().storage()
    }

    /// Request to quit the application
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn notify(&mut self, notification: Notification) {
        self.shell.actions_mut().add_notification(notification);
    }

    pub fn has_dialog(&self) -> bool {
        self.active_dialog != ActiveDialog::None
    }

    pub fn open_dialog(&mut self, dialog: ActiveDialog) {
        if dialog == ActiveDialog::AddAccount {
            self.account_form.reset();
        }
        self.active_dialog = dialog;
    }

    pub fn close_dialog(&mut self) {
        self.active_dialog = ActiveDialog::None;
    }

    pub fn toggle_panel_focus(&mut self) {
        self.focused_panel = match self.focused_panel {
            FocusedPanel::Sidebar => FocusedPanel::Main,
            FocusedPanel::Main => FocusedPanel::Sidebar,
        };
    }

    pub fn current_screen(&self) -> Option<&Screen> {
        self.shell.current_screen()
    }

    pub fn navigate(&mut self, path: &str) {
        self.shell.navigate(path, NavigateOptions::default());
        self.clear_status();
    }

    pub fn back(&mut self) {
        if !self.shell.back() {
            self.set_status("Already at the first page");
        }
    }

    pub fn resize(&mut self, width: u16) {
        self.shell.resize(width);
    }

    pub fn toggle_sidebar(&mut self) {
        let width = self.shell.width();
        let viewport = self.shell.viewport();
        let providers = self.shell.providers_mut();
        providers.sidebar.toggle();
        providers.relayout(width, viewport, false);
    }

    /// Run due shell work, then drop expired notifications
    pub fn tick(&mut self, now: Instant) {
        self.shell.poll(now);
        self.shell.actions_mut().notifications_mut().remove_expired(now);

        if !self.synced && self.shell.startup_phase() != StartupPhase::Scheduled {
            self.synced = true;
            self.reload_groups();
        }
    }

    pub fn reload_groups(&mut self) {
        let result = self.groups.reload(self.shell.actions().storage());
        if let Err(e) = result {
            self.notify(Notification::error(e.to_string()));
        }
        self.bind_group_counts();
    }

    fn bind_group_counts(&mut self) {
        let groups = self.groups.groups();
        self.shell
            .providers_mut()
            .spreadsheet
            .bind_group_counts(groups);
    }

    /// Dismiss the current notification, running its close action
    pub fn dismiss_notification(&mut self) {
        if let Err(e) = self.shell.actions_mut().dismiss_notification() {
            self.notify(Notification::error(e.to_string()));
        }
    }

    /// Send an event to the selected group row
    pub fn dispatch_group(&mut self, event: GroupRowEvent) -> bool {
        let index = self.groups.selected();
        let effects = self
            .groups
            .dispatch(index, event, self.shell.actions().storage());
        self.apply_effects(effects)
    }

    pub fn add_group(&mut self) {
        let effects = self.groups.add_group();
        self.apply_effects(effects);
    }

    pub fn add_category(&mut self) {
        let name = self.name_input.value().to_string();
        let effects = self
            .groups
            .add_category(&name, self.shell.actions().storage());
        self.input_mode = InputMode::Normal;
        self.apply_effects(effects);
    }

    pub fn cancel_new_category(&mut self) {
        self.groups.cancel_new_category();
        self.input_mode = InputMode::Normal;
    }

    pub fn begin_drag(&mut self) {
        let dnd = &mut self.shell.providers_mut().drag_drop;
        if !self.groups.begin_drag(dnd) {
            self.set_status("Nothing to move");
        }
    }

    pub fn drag_hover(&mut self, delta: isize) {
        let dnd = &mut self.shell.providers_mut().drag_drop;
        self.groups.drag_hover(dnd, delta);
    }

    pub fn drop_drag(&mut self) {
        let (actions, providers) = self.shell.actions_and_providers_mut();
        let effects = self
            .groups
            .drop_drag(&mut providers.drag_drop, actions.storage());
        self.apply_effects(effects);
    }

    pub fn cancel_drag(&mut self) {
        self.shell.providers_mut().drag_drop.cancel();
    }

    pub fn is_dragging(&self) -> bool {
        self.shell.providers().drag_drop.dragging().is_some()
    }

    /// Carry out list effects; returns false if any of them reported an error
    pub fn apply_effects(&mut self, effects: Vec<ListEffect>) -> bool {
        let mut ok = true;
        for effect in effects {
            match effect {
                ListEffect::Notify(notification) => {
                    ok &= notification.kind != NotificationKind::Error;
                    self.notify(notification);
                }
                ListEffect::PersistCollapsed(ids) => {
                    let patch = Prefs::with(COLLAPSED_GROUPS, ids);
                    if let Err(e) = self.shell.actions_mut().save_prefs(patch) {
                        self.notify(Notification::error(e.to_string()));
                    }
                }
                ListEffect::BeginEdit(editor) => {
                    self.name_input = TextInput::new()
                        .content(editor.initial)
                        .placeholder(editor.placeholder)
                        .focused(true);
                    self.input_mode = InputMode::EditingGroup;
                }
                ListEffect::BeginNewCategory(_) => {
                    self.name_input = TextInput::new()
                        .label("New category")
                        .placeholder("Category name")
                        .focused(true);
                    self.input_mode = InputMode::NewCategory;
                }
                ListEffect::OpenNotes(key) => self.open_dialog(ActiveDialog::Notes(key)),
            }
        }

        if self.input_mode == InputMode::EditingGroup && self.groups.editing().is_none() {
            self.input_mode = InputMode::Normal;
        }
        self.bind_group_counts();
        ok
    }

    /// Commit the name editor and close it unless the save was rejected
    pub fn commit_group_name(&mut self) {
        let value = self.name_input.value().trim().to_string();
        if self.dispatch_group(GroupRowEvent::Commit(value)) {
            self.close_group_editor();
        }
    }

    /// Leave the name editor, saving what was typed
    ///
    /// An empty draft is discarded. A rejected rename is reported and the
    /// old name kept.
    pub fn blur_group_name(&mut self) {
        let value = self.name_input.value().trim().to_string();
        self.dispatch_group(GroupRowEvent::Commit(value));
        self.close_group_editor();
    }

    fn close_group_editor(&mut self) {
        self.dispatch_group(GroupRowEvent::Blur);
        self.input_mode = InputMode::Normal;
    }

    pub fn open_goto(&mut self) {
        self.goto_input = TextInput::new()
            .label("Go to")
            .content(self.shell.location().href())
            .focused(true);
        self.input_mode = InputMode::GoTo;
    }

    pub fn submit_goto(&mut self) {
        let path = self.goto_input.value().trim().to_string();
        self.input_mode = InputMode::Normal;
        if !path.is_empty() {
            self.navigate(&path);
        }
    }

    /// Create an account from the add-account form
    pub fn submit_account_form(&mut self) {
        let name = self.account_form.name.value().to_string();
        let account_type = self.account_form.account_type;
        let result =
            AccountService::new(self.shell.actions().storage()).create(&name, account_type, true);

        match result {
            Ok(account) => {
                self.close_dialog();
                self.refresh_accounts();
                self.notify(Notification::success(format!(
                    "Created account '{}'",
                    account.name
                )));
            }
            Err(e) => self.notify(Notification::error(e.to_string())),
        }
    }

    pub fn refresh_accounts(&mut self) {
        match self.shell.actions().get_accounts() {
            Ok(accounts) => self.shell.providers_mut().accounts.replace(accounts),
            Err(e) => self.notify(Notification::error(e.to_string())),
        }
    }

    /// Open accounts, in display order
    pub fn open_account_count(&self) -> usize {
        self.shell.providers().accounts.open().count()
    }

    pub fn move_account_selection(&mut self, delta: isize) {
        let count = self.open_account_count();
        if count == 0 {
            self.selected_account_index = 0;
            return;
        }
        let next = (self.selected_account_index as isize + delta).clamp(0, count as isize - 1);
        self.selected_account_index = next as usize;
    }

    pub fn open_selected_account(&mut self) {
        let id = self
            .shell
            .providers()
            .accounts
            .open()
            .nth(self.selected_account_index)
            .map(|a| a.id.as_uuid().to_string());
        if let Some(id) = id {
            self.navigate(&format!("/accounts/{}", id));
        }
    }

    pub fn move_nav_selection(&mut self, delta: isize) {
        let len = NAV_ITEMS.len() as isize;
        self.selected_nav_index = (self.selected_nav_index as isize + delta).rem_euclid(len) as usize;
    }

    pub fn open_selected_nav(&mut self) {
        let (_, _, path) = NAV_ITEMS[self.selected_nav_index];
        self.navigate(path);
    }
}
