//! Category group list
//!
//! Owns the rows of the budget sidebar: which groups exist, which are
//! collapsed, which one is being edited, the optional draft group and the
//! per-row menu state. Row events are routed through
//! [`group_row::update`](super::group_row::update) and the resulting intents
//! are carried out against the category service.

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use super::group_row::{
    self, menu_items, EditorView, GroupIntent, GroupRowEvent, GroupRowProps, GroupRowState,
    GroupSave, MenuItem,
};
use crate::error::{FinancesError, FinancesResult};
use crate::models::{CategoryGroup, GroupKey};
use crate::notifications::Notification;
use crate::services::CategoryService;
use crate::shell::providers::DragDropBackend;
use crate::storage::Storage;

/// Side effects for the screen hosting the list
#[derive(Debug, Clone)]
pub enum ListEffect {
    Notify(Notification),
    /// Persist the ids of collapsed groups
    PersistCollapsed(Vec<String>),
    /// Open the name editor seeded with these contents
    BeginEdit(EditorView),
    /// Open the new-category input under a group
    BeginNewCategory(GroupKey),
    OpenNotes(GroupKey),
}

impl ListEffect {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Notify(n) if n.kind == crate::notifications::NotificationKind::Error)
    }
}

#[derive(Debug, Default)]
pub struct GroupList {
    groups: Vec<CategoryGroup>,
    draft: Option<CategoryGroup>,
    editing: Option<GroupKey>,
    collapsed: HashSet<GroupKey>,
    row_states: HashMap<GroupKey, GroupRowState>,
    selected: usize,
    menu_cursor: usize,
    new_category_for: Option<GroupKey>,
}

impl GroupList {
    /// Load groups and restore collapsed ids saved in preferences
    pub fn load(storage: &Storage, collapsed: &[String]) -> FinancesResult<Self> {
        let collapsed = collapsed
            .iter()
            .filter_map(|raw| GroupKey::try_from(raw.clone()).ok())
            .filter(|key| !key.is_draft())
            .collect();

        let mut list = Self {
            collapsed,
            ..Self::default()
        };
        list.reload(storage)?;
        Ok(list)
    }

    pub fn reload(&mut self, storage: &Storage) -> FinancesResult<()> {
        self.groups = CategoryService::new(storage).list_groups_with_categories()?;
        let live: HashSet<GroupKey> = self.groups.iter().map(|g| g.id).collect();
        self.row_states.retain(|key, _| live.contains(key));
        self.selected = self.selected.min(self.len().saturating_sub(1));
        Ok(())
    }

    /// Stored groups followed by the draft, if any
    pub fn rows(&self) -> Vec<&CategoryGroup> {
        self.groups.iter().chain(self.draft.as_ref()).collect()
    }

    pub fn groups(&self) -> &[CategoryGroup] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len() + usize::from(self.draft.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn row(&self, index: usize) -> Option<&CategoryGroup> {
        self.groups.get(index).or_else(|| {
            (index == self.groups.len())
                .then_some(self.draft.as_ref())
                .flatten()
        })
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_key(&self) -> Option<GroupKey> {
        self.row(self.selected).map(|g| g.id)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn editing(&self) -> Option<GroupKey> {
        self.editing
    }

    pub fn is_collapsed(&self, key: &GroupKey) -> bool {
        self.collapsed.contains(key)
    }

    pub fn new_category_for(&self) -> Option<GroupKey> {
        self.new_category_for
    }

    pub fn row_state(&self, key: &GroupKey) -> GroupRowState {
        self.row_states.get(key).copied().unwrap_or_default()
    }

    /// Row whose menu is open
    pub fn open_menu(&self) -> Option<GroupKey> {
        self.row_states
            .iter()
            .find(|(_, state)| state.menu_open)
            .map(|(key, _)| *key)
    }

    pub fn menu_cursor(&self) -> usize {
        self.menu_cursor
    }

    /// Props for row `index`; `hovered` follows the selection
    pub fn props(&self, index: usize) -> Option<GroupRowProps<'_>> {
        let group = self.row(index)?;
        Some(GroupRowProps {
            group,
            editing: self.editing == Some(group.id),
            collapsed: self.collapsed.contains(&group.id),
            drag_preview: false,
            hovered: index == self.selected,
            can_delete: true,
        })
    }

    pub fn move_menu_cursor(&mut self, delta: isize) {
        let Some(props) = self.open_menu().and(self.props(self.selected)) else {
            return;
        };
        let count = menu_items(&props).len() as isize;
        self.menu_cursor = (self.menu_cursor as isize + delta).rem_euclid(count) as usize;
    }

    /// Menu item under the cursor of the open menu
    pub fn menu_selection(&self) -> Option<MenuItem> {
        let key = self.open_menu()?;
        let index = self.rows().iter().position(|g| g.id == key)?;
        let props = self.props(index)?;
        menu_items(&props).get(self.menu_cursor).copied()
    }

    /// Route an event to row `index` and carry out its intents
    pub fn dispatch(
        &mut self,
        index: usize,
        event: GroupRowEvent,
        storage: &Storage,
    ) -> Vec<ListEffect> {
        let Some(props) = self.props(index) else {
            return Vec::new();
        };
        let key = props.group.id;
        let mut state = self.row_state(&key);
        let was_open = state.menu_open;

        let intents = group_row::update(&mut state, &props, event);

        if state.menu_open && !was_open {
            self.menu_cursor = 0;
            // Only one menu is open at a time
            self.row_states.values_mut().for_each(|s| s.menu_open = false);
        }
        self.row_states.insert(key, state);

        let mut effects = Vec::new();
        for intent in intents {
            self.apply(intent, storage, &mut effects);
        }
        effects
    }

    /// Insert a draft group and start naming it
    pub fn add_group(&mut self) -> Vec<ListEffect> {
        let draft = CategoryGroup::draft();
        let editor = EditorView {
            initial: draft.name.clone(),
            placeholder: group_row::NEW_GROUP_PLACEHOLDER,
        };
        self.draft = Some(draft);
        self.editing = Some(GroupKey::Draft);
        self.selected = self.groups.len();
        vec![ListEffect::BeginEdit(editor)]
    }

    /// Create a category under the group chosen with "Add category"
    pub fn add_category(&mut self, name: &str, storage: &Storage) -> Vec<ListEffect> {
        let Some(group_id) = self.new_category_for.take().and_then(|k| k.saved()) else {
            return Vec::new();
        };
        if name.trim().is_empty() {
            return Vec::new();
        }

        match CategoryService::new(storage).create_category(name, group_id) {
            Ok(category) => {
                let mut effects = vec![ListEffect::Notify(Notification::success(format!(
                    "Added category '{}'",
                    category.name
                )))];
                self.reload_into(storage, &mut effects);
                effects
            }
            Err(e) => vec![error_effect(e)],
        }
    }

    pub fn cancel_new_category(&mut self) {
        self.new_category_for = None;
    }

    /// Start dragging the selected group
    pub fn begin_drag(&self, dnd: &mut DragDropBackend) -> bool {
        if self.editing.is_some() {
            return false;
        }
        match self.groups.get(self.selected) {
            Some(group) => {
                dnd.begin(group.id, self.selected);
                true
            }
            None => false,
        }
    }

    pub fn drag_hover(&self, dnd: &mut DragDropBackend, delta: isize) {
        dnd.hover(delta, self.groups.len());
    }

    /// Drop the dragged group at its hovered slot and persist the order
    pub fn drop_drag(&mut self, dnd: &mut DragDropBackend, storage: &Storage) -> Vec<ListEffect> {
        let Some((key, target)) = dnd.end() else {
            return Vec::new();
        };

        let mut order: Vec<GroupKey> = self.groups.iter().map(|g| g.id).collect();
        let Some(from) = order.iter().position(|k| *k == key) else {
            return Vec::new();
        };
        if from == target {
            return Vec::new();
        }
        order.remove(from);
        order.insert(target.min(order.len()), key);

        let ids: Vec<_> = order.iter().filter_map(GroupKey::saved).collect();
        let mut effects = Vec::new();
        match CategoryService::new(storage).reorder_groups(&ids) {
            Ok(()) => {
                debug!(group = %key, from, to = target, "moved category group");
                self.reload_into(storage, &mut effects);
                self.selected = target.min(self.len().saturating_sub(1));
            }
            Err(e) => effects.push(error_effect(e)),
        }
        effects
    }

    /// Rows in display order while a drag is in progress
    ///
    /// Each entry is an index into [`rows`](Self::rows) and whether that row
    /// is drawn as the drag preview.
    pub fn display_order(&self, dnd: &DragDropBackend) -> Vec<(usize, bool)> {
        let mut order: Vec<(usize, bool)> = (0..self.len()).map(|i| (i, false)).collect();
        let Some(key) = dnd.dragging() else {
            return order;
        };
        let Some(from) = self.groups.iter().position(|g| g.id == *key) else {
            return order;
        };
        order.remove(from);
        order.insert(dnd.target().min(order.len()), (from, true));
        order
    }

    fn apply(&mut self, intent: GroupIntent, storage: &Storage, effects: &mut Vec<ListEffect>) {
        let service = CategoryService::new(storage);

        match intent {
            GroupIntent::ToggleCollapse(key) => {
                if !self.collapsed.remove(&key) {
                    self.collapsed.insert(key);
                }
                effects.push(ListEffect::PersistCollapsed(self.collapsed_ids()));
            }
            GroupIntent::OpenNotes(key) => effects.push(ListEffect::OpenNotes(key)),
            GroupIntent::ShowNewCategory(key) => {
                if self.collapsed.remove(&key) {
                    effects.push(ListEffect::PersistCollapsed(self.collapsed_ids()));
                }
                self.new_category_for = Some(key);
                effects.push(ListEffect::BeginNewCategory(key));
            }
            GroupIntent::Save(GroupSave::Name {
                id: GroupKey::Draft,
                name,
            }) => match service.create_group(&name) {
                Ok(group) => {
                    self.draft = None;
                    self.editing = None;
                    self.reload_into(storage, effects);
                    if let Some(i) = self.groups.iter().position(|g| g.id == group.id) {
                        self.selected = i;
                    }
                }
                Err(e) => effects.push(error_effect(e)),
            },
            GroupIntent::Save(GroupSave::Name {
                id: GroupKey::Saved(id),
                name,
            }) => match service.rename_group(id, &name) {
                Ok(_) => {
                    self.editing = None;
                    self.reload_into(storage, effects);
                }
                Err(e) => effects.push(error_effect(e)),
            },
            GroupIntent::Save(GroupSave::Group(updated)) => {
                let Some(id) = updated.id.saved() else {
                    effects.push(error_effect(FinancesError::Validation(
                        "Draft groups must be named before saving".into(),
                    )));
                    return;
                };
                let current = self.groups.iter().find(|g| g.id == updated.id).cloned();

                let mut result = Ok(());
                if let Some(current) = &current {
                    if current.name != updated.name {
                        result = service.rename_group(id, &updated.name).map(|_| ());
                    }
                }
                if result.is_ok() && current.map(|c| c.hidden) != Some(updated.hidden) {
                    result = service.set_group_hidden(id, updated.hidden).map(|_| ());
                }

                match result {
                    Ok(()) => self.reload_into(storage, effects),
                    Err(e) => effects.push(error_effect(e)),
                }
            }
            GroupIntent::Edit(Some(key)) => {
                if let Some(group) = self.rows().into_iter().find(|g| g.id == key) {
                    let editor = EditorView {
                        initial: group.name.clone(),
                        placeholder: if key.is_draft() {
                            group_row::NEW_GROUP_PLACEHOLDER
                        } else {
                            ""
                        },
                    };
                    self.editing = Some(key);
                    effects.push(ListEffect::BeginEdit(editor));
                }
            }
            GroupIntent::Edit(None) => {
                self.editing = None;
                // A draft never outlives its editor
                self.draft = None;
                self.selected = self.selected.min(self.len().saturating_sub(1));
            }
            GroupIntent::Delete(key) => {
                let Some(id) = key.saved() else { return };
                let name = self
                    .groups
                    .iter()
                    .find(|g| g.id == key)
                    .map(|g| g.name.clone())
                    .unwrap_or_default();
                match service.delete_group(id) {
                    Ok(()) => {
                        self.collapsed.remove(&key);
                        if self.editing == Some(key) {
                            self.editing = None;
                        }
                        effects.push(ListEffect::Notify(Notification::success(format!(
                            "Deleted group '{}'",
                            name
                        ))));
                        self.reload_into(storage, effects);
                    }
                    Err(e) => effects.push(error_effect(e)),
                }
            }
            GroupIntent::HideNewGroup => {
                self.draft = None;
                if self.editing == Some(GroupKey::Draft) {
                    self.editing = None;
                }
                self.selected = self.selected.min(self.len().saturating_sub(1));
            }
        }
    }

    fn reload_into(&mut self, storage: &Storage, effects: &mut Vec<ListEffect>) {
        if let Err(e) = self.reload(storage) {
            effects.push(error_effect(e));
        }
    }

    fn collapsed_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .collapsed
            .iter()
            .filter(|k| !k.is_draft())
            .map(|k| k.to_string())
            .collect();
        ids.sort();
        ids
    }
}

fn error_effect(error: FinancesError) -> ListEffect {
    warn!(error = %error, "category group change rejected");
    ListEffect::Notify(Notification::error(error.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::FinancesPaths;
    use tempfile::TempDir;

    fn create_list(names: &[&str]) -> (TempDir, Storage, GroupList) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinancesPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        let service = CategoryService::new(&storage);
        for name in names {
            service.create_group(name).unwrap();
        }
        let list = GroupList::load(&storage, &[]).unwrap();
        (temp_dir, storage, list)
    }

    fn names(list: &GroupList) -> Vec<String> {
        list.rows().iter().map(|g| g.name.clone()).collect()
    }

    #[test]
    fn test_click_body_collapses_and_persists() {
        let (_temp_dir, storage, mut list) = create_list(&["Bills", "Needs"]);
        let key = list.groups()[0].id;

        let effects = list.dispatch(0, GroupRowEvent::ClickBody, &storage);
        assert!(list.is_collapsed(&key));
        match effects.as_slice() {
            [ListEffect::PersistCollapsed(ids)] => assert_eq!(ids, &vec![key.to_string()]),
            other => panic!("unexpected effects {:?}", other),
        }

        list.dispatch(0, GroupRowEvent::ClickBody, &storage);
        assert!(!list.is_collapsed(&key));
    }

    #[test]
    fn test_collapsed_restored_from_prefs() {
        let (_temp_dir, storage, list) = create_list(&["Bills"]);
        let key = list.groups()[0].id;

        let restored =
            GroupList::load(&storage, &[key.to_string(), "garbage".into(), "new".into()]).unwrap();
        assert!(restored.is_collapsed(&key));
        assert!(!restored.is_collapsed(&GroupKey::Draft));
    }

    #[test]
    fn test_draft_saved_with_name() {
        let (_temp_dir, storage, mut list) = create_list(&["Bills"]);

        let effects = list.add_group();
        assert!(matches!(effects.as_slice(), [ListEffect::BeginEdit(_)]));
        assert_eq!(list.len(), 2);
        assert_eq!(list.editing(), Some(GroupKey::Draft));

        let effects = list.dispatch(1, GroupRowEvent::Commit("Groceries".into()), &storage);
        assert!(effects.iter().all(|e| !e.is_error()));
        assert_eq!(names(&list), vec!["Bills", "Groceries"]);
        assert_eq!(list.editing(), None);
        assert_eq!(list.selected(), 1);
        assert!(list.rows().iter().all(|g| !g.is_draft()));
    }

    #[test]
    fn test_empty_draft_is_discarded() {
        let (_temp_dir, storage, mut list) = create_list(&["Bills"]);
        list.add_group();

        list.dispatch(1, GroupRowEvent::Commit(String::new()), &storage);
        assert_eq!(list.len(), 1);
        assert_eq!(list.editing(), None);
        assert_eq!(storage.categories.group_count().unwrap(), 1);
    }

    #[test]
    fn test_blur_drops_draft() {
        let (_temp_dir, storage, mut list) = create_list(&["Bills"]);
        list.add_group();

        list.dispatch(1, GroupRowEvent::Blur, &storage);
        assert_eq!(list.len(), 1);
        assert_eq!(list.selected(), 0);
    }

    #[test]
    fn test_rename_via_menu() {
        let (_temp_dir, storage, mut list) = create_list(&["Bills"]);

        list.dispatch(0, GroupRowEvent::ClickMenuButton, &storage);
        assert_eq!(list.open_menu(), Some(list.groups()[0].id));
        list.move_menu_cursor(2);
        assert_eq!(list.menu_selection(), Some(MenuItem::Rename));

        let effects = list.dispatch(0, GroupRowEvent::SelectMenu(MenuItem::Rename), &storage);
        assert!(matches!(effects.as_slice(), [ListEffect::BeginEdit(e)] if e.initial == "Bills"));
        assert_eq!(list.open_menu(), None);

        list.dispatch(0, GroupRowEvent::Commit("Fixed Bills".into()), &storage);
        assert_eq!(names(&list), vec!["Fixed Bills"]);
        assert_eq!(list.editing(), None);
    }

    #[test]
    fn test_empty_rename_keeps_old_name() {
        let (_temp_dir, storage, mut list) = create_list(&["Bills"]);
        let key = list.groups()[0].id;
        list.dispatch(0, GroupRowEvent::ClickMenuButton, &storage);
        list.dispatch(0, GroupRowEvent::SelectMenu(MenuItem::Rename), &storage);

        let effects = list.dispatch(0, GroupRowEvent::Commit(String::new()), &storage);
        assert!(effects.iter().any(ListEffect::is_error));
        assert_eq!(names(&list), vec!["Bills"]);
        assert_eq!(list.editing(), Some(key));
    }

    #[test]
    fn test_toggle_visibility_persists() {
        let (_temp_dir, storage, mut list) = create_list(&["Bills"]);
        list.dispatch(0, GroupRowEvent::ClickMenuButton, &storage);
        list.dispatch(0, GroupRowEvent::SelectMenu(MenuItem::ToggleVisibility), &storage);

        assert!(list.groups()[0].hidden);
        let stored = CategoryService::new(&storage).find_group("Bills").unwrap().unwrap();
        assert!(stored.hidden);
    }

    #[test]
    fn test_delete_removes_group() {
        let (_temp_dir, storage, mut list) = create_list(&["Bills", "Needs"]);
        list.dispatch(0, GroupRowEvent::ClickMenuButton, &storage);
        let effects = list.dispatch(0, GroupRowEvent::SelectMenu(MenuItem::Delete), &storage);

        assert!(matches!(effects.first(), Some(ListEffect::Notify(_))));
        assert_eq!(names(&list), vec!["Needs"]);
    }

    #[test]
    fn test_add_category_expands_group() {
        let (_temp_dir, storage, mut list) = create_list(&["Needs"]);
        let key = list.groups()[0].id;
        list.dispatch(0, GroupRowEvent::ClickBody, &storage);
        assert!(list.is_collapsed(&key));

        list.dispatch(0, GroupRowEvent::ClickMenuButton, &storage);
        let effects = list.dispatch(0, GroupRowEvent::SelectMenu(MenuItem::AddCategory), &storage);
        assert!(!list.is_collapsed(&key));
        assert!(effects
            .iter()
            .any(|e| matches!(e, ListEffect::BeginNewCategory(k) if *k == key)));

        list.add_category("Groceries", &storage);
        assert_eq!(list.groups()[0].categories.len(), 1);
        assert_eq!(list.new_category_for(), None);
    }

    #[test]
    fn test_drag_reorders() {
        let (_temp_dir, storage, mut list) = create_list(&["A", "B", "C"]);
        let mut dnd = DragDropBackend::default();

        assert!(list.begin_drag(&mut dnd));
        list.drag_hover(&mut dnd, 2);
        assert_eq!(list.display_order(&dnd), vec![(1, false), (2, false), (0, true)]);

        list.drop_drag(&mut dnd, &storage);
        assert_eq!(names(&list), vec!["B", "C", "A"]);
        assert_eq!(list.selected(), 2);
        assert!(dnd.dragging().is_none());
    }

    #[test]
    fn test_selection_bounds() {
        let (_temp_dir, _storage, mut list) = create_list(&["A", "B"]);
        list.select_prev();
        assert_eq!(list.selected(), 0);
        list.select_next();
        list.select_next();
        assert_eq!(list.selected(), 1);
        assert_eq!(list.selected_key(), Some(list.groups()[1].id));
    }
}
