//! Shared context for screens
//!
//! The shell builds these once at mount, in a fixed order, and hands them to
//! every screen. Later providers may read earlier ones while initializing.

use std::collections::HashMap;

use tracing::debug;

use super::viewport::ViewportClass;
use crate::models::{Account, CategoryGroup, GroupKey, Payee};

/// Initialization order of the providers
pub const PROVIDER_ORDER: [ProviderKind; 8] = [
    ProviderKind::Spreadsheet,
    ProviderKind::Titlebar,
    ProviderKind::Sidebar,
    ProviderKind::BudgetMonthCount,
    ProviderKind::Payees,
    ProviderKind::Accounts,
    ProviderKind::DragDrop,
    ProviderKind::Scroll,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    Spreadsheet,
    Titlebar,
    Sidebar,
    BudgetMonthCount,
    Payees,
    Accounts,
    DragDrop,
    Scroll,
}

/// Named numeric cells computed from budget data
#[derive(Debug, Default)]
pub struct Spreadsheet {
    cells: HashMap<String, i64>,
}

impl Spreadsheet {
    pub fn set(&mut self, name: impl Into<String>, value: i64) {
        self.cells.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<i64> {
        self.cells.get(name).copied()
    }

    /// Cell name holding the category count of a group
    pub fn group_count_cell(key: &GroupKey) -> String {
        format!("group-count-{}", key)
    }

    /// Recompute per-group category counts
    pub fn bind_group_counts(&mut self, groups: &[CategoryGroup]) {
        self.cells.retain(|name, _| !name.starts_with("group-count-"));
        for group in groups {
            self.set(
                Self::group_count_cell(&group.id),
                group.categories.len() as i64,
            );
        }
    }
}

#[derive(Debug, Default)]
pub struct TitlebarState {
    title: String,
}

impl TitlebarState {
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

/// Columns taken by the pinned sidebar
pub const SIDEBAR_WIDTH: u16 = 24;

#[derive(Debug, Clone, Copy)]
pub struct SidebarState {
    /// Floating sidebars overlay the screen instead of taking columns
    pub floating: bool,
    pub visible: bool,
}

impl SidebarState {
    fn for_viewport(viewport: ViewportClass) -> Self {
        Self {
            floating: viewport.is_narrow(),
            visible: !viewport.is_narrow(),
        }
    }

    pub fn update_for(&mut self, viewport: ViewportClass) {
        *self = Self::for_viewport(viewport);
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    /// Columns the sidebar removes from the main area
    pub fn reserved_width(&self) -> u16 {
        if self.visible && !self.floating {
            SIDEBAR_WIDTH
        } else {
            0
        }
    }
}

const CATEGORY_COLUMN_WIDTH: u16 = 30;
const MONTH_COLUMN_WIDTH: u16 = 28;
const MAX_MONTHS: usize = 3;

/// How many budget months fit on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetMonthCount {
    count: usize,
}

impl BudgetMonthCount {
    fn compute(width: u16, sidebar: &SidebarState) -> Self {
        let available = width
            .saturating_sub(sidebar.reserved_width())
            .saturating_sub(CATEGORY_COLUMN_WIDTH);
        let count = (available / MONTH_COLUMN_WIDTH) as usize;
        Self {
            count: count.clamp(1, MAX_MONTHS),
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

#[derive(Debug, Default)]
pub struct PayeesCache {
    payees: Vec<Payee>,
}

impl PayeesCache {
    pub fn replace(&mut self, payees: Vec<Payee>) {
        self.payees = payees;
    }

    pub fn all(&self) -> &[Payee] {
        &self.payees
    }
}

#[derive(Debug, Default)]
pub struct AccountsCache {
    accounts: Vec<Account>,
}

impl AccountsCache {
    pub fn replace(&mut self, accounts: Vec<Account>) {
        self.accounts = accounts;
    }

    pub fn all(&self) -> &[Account] {
        &self.accounts
    }

    pub fn open(&self) -> impl Iterator<Item = &Account> {
        self.accounts.iter().filter(|a| !a.closed)
    }
}

/// Tracks the item being dragged and its prospective slot
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DragDropBackend {
    dragging: Option<GroupKey>,
    target: usize,
}

impl DragDropBackend {
    pub fn begin(&mut self, key: GroupKey, index: usize) {
        self.dragging = Some(key);
        self.target = index;
    }

    /// Move the prospective slot, clamped to `0..len`
    pub fn hover(&mut self, delta: isize, len: usize) {
        if len == 0 {
            return;
        }
        let next = (self.target as isize + delta).clamp(0, len as isize - 1);
        self.target = next as usize;
    }

    /// Finish the drag, returning what was dragged and where it lands
    pub fn end(&mut self) -> Option<(GroupKey, usize)> {
        self.dragging.take().map(|key| (key, self.target))
    }

    pub fn cancel(&mut self) {
        self.dragging = None;
    }

    pub fn dragging(&self) -> Option<&GroupKey> {
        self.dragging.as_ref()
    }

    pub fn target(&self) -> usize {
        self.target
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ScrollState {
    offset: usize,
}

impl ScrollState {
    /// Adjust the offset so `selected` is inside a window of `visible` rows
    pub fn follow(&mut self, selected: usize, visible: usize) {
        if visible == 0 {
            return;
        }
        if selected < self.offset {
            self.offset = selected;
        } else if selected >= self.offset + visible {
            self.offset = selected + 1 - visible;
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn reset(&mut self) {
        self.offset = 0;
    }
}

/// Data the providers are seeded with
#[derive(Debug, Default)]
pub struct ProviderSeed {
    pub width: u16,
    pub viewport: Option<ViewportClass>,
    pub accounts: Vec<Account>,
    pub payees: Vec<Payee>,
}

/// All shared context, built in `PROVIDER_ORDER`
#[derive(Debug)]
pub struct Providers {
    pub spreadsheet: Spreadsheet,
    pub titlebar: TitlebarState,
    pub sidebar: SidebarState,
    pub month_count: BudgetMonthCount,
    pub payees: PayeesCache,
    pub accounts: AccountsCache,
    pub drag_drop: DragDropBackend,
    pub scroll: ScrollState,
    initialized: Vec<ProviderKind>,
}

impl Providers {
    pub fn compose(seed: ProviderSeed) -> Self {
        let viewport = seed.viewport.unwrap_or(ViewportClass::Wide);
        let mut initialized = Vec::with_capacity(PROVIDER_ORDER.len());
        let mut ready = |kind: ProviderKind| {
            debug!(?kind, "provider ready");
            initialized.push(kind);
        };

        let spreadsheet = Spreadsheet::default();
        ready(ProviderKind::Spreadsheet);

        let titlebar = TitlebarState::default();
        ready(ProviderKind::Titlebar);

        let sidebar = SidebarState::for_viewport(viewport);
        ready(ProviderKind::Sidebar);

        // Reads the sidebar's reserved width
        let month_count = BudgetMonthCount::compute(seed.width, &sidebar);
        ready(ProviderKind::BudgetMonthCount);

        let mut payees = PayeesCache::default();
        payees.replace(seed.payees);
        ready(ProviderKind::Payees);

        let mut accounts = AccountsCache::default();
        accounts.replace(seed.accounts);
        ready(ProviderKind::Accounts);

        let drag_drop = DragDropBackend::default();
        ready(ProviderKind::DragDrop);

        let scroll = ScrollState::default();
        ready(ProviderKind::Scroll);

        Self {
            spreadsheet,
            titlebar,
            sidebar,
            month_count,
            payees,
            accounts,
            drag_drop,
            scroll,
            initialized,
        }
    }

    /// Providers in the order they were built
    pub fn initialized(&self) -> &[ProviderKind] {
        &self.initialized
    }

    /// Recompute the layout-dependent providers after a resize
    pub fn relayout(&mut self, width: u16, viewport: ViewportClass, class_changed: bool) {
        if class_changed {
            self.sidebar.update_for(viewport);
        }
        self.month_count = BudgetMonthCount::compute(width, &self.sidebar);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_order() {
        let providers = Providers::compose(ProviderSeed {
            width: 120,
            viewport: Some(ViewportClass::Wide),
            ..Default::default()
        });
        assert_eq!(providers.initialized(), &PROVIDER_ORDER);
    }

    #[test]
    fn test_month_count_depends_on_sidebar() {
        let wide = Providers::compose(ProviderSeed {
            width: 110,
            viewport: Some(ViewportClass::Wide),
            ..Default::default()
        });
        // 110 - 24 - 30 = 56 columns
        assert_eq!(wide.month_count.count(), 2);

        let mut narrow = Providers::compose(ProviderSeed {
            width: 60,
            viewport: Some(ViewportClass::Narrow),
            ..Default::default()
        });
        assert!(narrow.sidebar.floating);
        assert_eq!(narrow.month_count.count(), 1);

        narrow.relayout(200, ViewportClass::Wide, true);
        assert!(!narrow.sidebar.floating);
        assert_eq!(narrow.month_count.count(), 3);
    }

    #[test]
    fn test_drag_drop_clamps() {
        let mut dnd = DragDropBackend::default();
        dnd.begin(GroupKey::Draft, 1);
        dnd.hover(-5, 4);
        assert_eq!(dnd.target(), 0);
        dnd.hover(10, 4);
        assert_eq!(dnd.target(), 3);
        assert_eq!(dnd.end(), Some((GroupKey::Draft, 3)));
        assert_eq!(dnd.end(), None);
    }

    #[test]
    fn test_scroll_follow() {
        let mut scroll = ScrollState::default();
        scroll.follow(12, 5);
        assert_eq!(scroll.offset(), 8);
        scroll.follow(3, 5);
        assert_eq!(scroll.offset(), 3);
    }
}
