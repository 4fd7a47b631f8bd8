//! Category group row
//!
//! One row of the budget sidebar. The row owns only whether its menu is
//! open; everything else arrives as props from the list that renders it.
//! User interaction is fed in as [`GroupRowEvent`]s and answered with
//! [`GroupIntent`]s for the owner to carry out.

use crate::models::{CategoryGroup, GroupKey};

/// Placeholder shown while naming a new group
pub const NEW_GROUP_PLACEHOLDER: &str = "New Group Name";

/// Label prefix used while the row is drawn as a drag preview
pub const DRAG_PREVIEW_PREFIX: &str = "Group: ";

/// Inputs supplied by the owning list
#[derive(Debug, Clone, Copy)]
pub struct GroupRowProps<'a> {
    pub group: &'a CategoryGroup,
    pub editing: bool,
    pub collapsed: bool,
    pub drag_preview: bool,
    /// Row has the pointer or the keyboard cursor
    pub hovered: bool,
    /// Owner can delete groups
    pub can_delete: bool,
}

impl<'a> GroupRowProps<'a> {
    pub fn new(group: &'a CategoryGroup) -> Self {
        Self {
            group,
            editing: false,
            collapsed: false,
            drag_preview: false,
            hovered: false,
            can_delete: true,
        }
    }

    /// Drafts always show the name editor
    pub fn is_editing(&self) -> bool {
        self.editing || self.group.is_draft()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroupRowState {
    pub menu_open: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    AddCategory,
    ToggleVisibility,
    Rename,
    Delete,
}

impl MenuItem {
    /// Stable item name
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddCategory => "add-category",
            Self::ToggleVisibility => "toggle-visibility",
            Self::Rename => "rename",
            Self::Delete => "delete",
        }
    }

    pub fn label(&self, group: &CategoryGroup) -> &'static str {
        match self {
            Self::AddCategory => "Add category",
            Self::ToggleVisibility if group.hidden => "Show",
            Self::ToggleVisibility => "Hide",
            Self::Rename => "Rename",
            Self::Delete => "Delete",
        }
    }
}

/// Menu entries for a row, in display order
pub fn menu_items(props: &GroupRowProps<'_>) -> Vec<MenuItem> {
    let mut items = vec![
        MenuItem::AddCategory,
        MenuItem::ToggleVisibility,
        MenuItem::Rename,
    ];
    if props.can_delete {
        items.push(MenuItem::Delete);
    }
    items
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupRowEvent {
    ClickBody,
    ClickMenuButton,
    ClickNotes,
    SelectMenu(MenuItem),
    CloseMenu,
    /// The name editor committed a value
    Commit(String),
    /// The name editor lost focus
    Blur,
    /// Enter pressed while the row itself has focus
    RowEnter,
}

/// What to save for a group
#[derive(Debug, Clone, PartialEq)]
pub enum GroupSave {
    /// The full group, with fields changed
    Group(CategoryGroup),
    /// Only a new name
    Name { id: GroupKey, name: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum GroupIntent {
    ToggleCollapse(GroupKey),
    OpenNotes(GroupKey),
    ShowNewCategory(GroupKey),
    Save(GroupSave),
    /// Start editing a row, or stop editing with `None`
    Edit(Option<GroupKey>),
    Delete(GroupKey),
    /// Discard the draft group
    HideNewGroup,
}

/// Apply `event` to the row, returning what the owner should do
pub fn update(
    state: &mut GroupRowState,
    props: &GroupRowProps<'_>,
    event: GroupRowEvent,
) -> Vec<GroupIntent> {
    let group = props.group;
    let id = group.id;

    match event {
        GroupRowEvent::ClickBody if props.drag_preview => vec![],
        GroupRowEvent::ClickBody => vec![GroupIntent::ToggleCollapse(id)],

        GroupRowEvent::ClickMenuButton if props.drag_preview || group.is_draft() => vec![],
        GroupRowEvent::ClickMenuButton => {
            state.menu_open = true;
            vec![]
        }

        GroupRowEvent::ClickNotes if props.drag_preview || group.is_draft() => vec![],
        GroupRowEvent::ClickNotes => vec![GroupIntent::OpenNotes(id)],

        GroupRowEvent::CloseMenu => {
            state.menu_open = false;
            vec![]
        }

        GroupRowEvent::SelectMenu(_) if !state.menu_open => vec![],
        GroupRowEvent::SelectMenu(item) => {
            state.menu_open = false;
            match item {
                MenuItem::AddCategory => vec![GroupIntent::ShowNewCategory(id)],
                MenuItem::ToggleVisibility => {
                    let mut updated = group.clone();
                    updated.hidden = !group.hidden;
                    vec![GroupIntent::Save(GroupSave::Group(updated))]
                }
                MenuItem::Rename => vec![GroupIntent::Edit(Some(id))],
                MenuItem::Delete if props.can_delete => vec![GroupIntent::Delete(id)],
                MenuItem::Delete => vec![],
            }
        }

        GroupRowEvent::Commit(_) if !props.is_editing() => vec![],
        GroupRowEvent::Commit(value) if group.is_draft() => {
            if value.is_empty() {
                vec![GroupIntent::HideNewGroup]
            } else {
                vec![GroupIntent::Save(GroupSave::Name { id, name: value })]
            }
        }
        GroupRowEvent::Commit(value) => vec![GroupIntent::Save(GroupSave::Name { id, name: value })],

        GroupRowEvent::Blur if !props.is_editing() => vec![],
        GroupRowEvent::Blur | GroupRowEvent::RowEnter => vec![GroupIntent::Edit(None)],
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arrow {
    Expanded,
    Collapsed,
}

impl Arrow {
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Expanded => "▾",
            Self::Collapsed => "▸",
        }
    }
}

/// Name editor contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorView {
    pub initial: String,
    pub placeholder: &'static str,
}

/// Presentation of a row, derived from props and state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupRowView {
    pub arrow: Option<Arrow>,
    pub label: String,
    pub dimmed: bool,
    pub show_menu_button: bool,
    pub show_notes_button: bool,
    pub editor: Option<EditorView>,
    /// Open menu entries with their labels
    pub menu: Option<Vec<(MenuItem, &'static str)>>,
    /// Drawn lifted off the list with rounded corners and an indent
    pub elevated: bool,
    pub indent: u16,
}

pub fn view(props: &GroupRowProps<'_>, state: &GroupRowState) -> GroupRowView {
    let group = props.group;

    if props.drag_preview {
        return GroupRowView {
            arrow: None,
            label: format!("{}{}", DRAG_PREVIEW_PREFIX, group.name),
            dimmed: group.hidden,
            show_menu_button: false,
            show_notes_button: false,
            editor: None,
            menu: None,
            elevated: true,
            indent: 1,
        };
    }

    let arrow = Some(if props.collapsed {
        Arrow::Collapsed
    } else {
        Arrow::Expanded
    });

    let editor = props.is_editing().then(|| EditorView {
        initial: group.name.clone(),
        placeholder: if group.is_draft() {
            NEW_GROUP_PLACEHOLDER
        } else {
            ""
        },
    });

    let menu = state.menu_open.then(|| {
        menu_items(props)
            .into_iter()
            .map(|item| (item, item.label(group)))
            .collect()
    });

    GroupRowView {
        arrow,
        label: group.name.clone(),
        dimmed: group.hidden,
        show_menu_button: !group.is_draft() && (props.hovered || state.menu_open),
        show_notes_button: !group.is_draft(),
        editor,
        menu,
        elevated: false,
        indent: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn saved() -> CategoryGroup {
        CategoryGroup::new("Bills")
    }

    fn open_menu(state: &mut GroupRowState, props: &GroupRowProps<'_>) {
        assert!(update(state, props, GroupRowEvent::ClickMenuButton).is_empty());
        assert!(state.menu_open);
    }

    #[test]
    fn test_click_body_toggles_collapse() {
        let group = saved();
        let props = GroupRowProps::new(&group);
        let mut state = GroupRowState::default();

        assert_eq!(
            update(&mut state, &props, GroupRowEvent::ClickBody),
            vec![GroupIntent::ToggleCollapse(group.id)]
        );

        let preview = GroupRowProps {
            drag_preview: true,
            ..props
        };
        assert!(update(&mut state, &preview, GroupRowEvent::ClickBody).is_empty());
    }

    #[test]
    fn test_draft_commit() {
        let draft = CategoryGroup::draft();
        let props = GroupRowProps::new(&draft);
        let mut state = GroupRowState::default();

        assert_eq!(
            update(&mut state, &props, GroupRowEvent::Commit(String::new())),
            vec![GroupIntent::HideNewGroup]
        );
        assert_eq!(
            update(&mut state, &props, GroupRowEvent::Commit("Groceries".into())),
            vec![GroupIntent::Save(GroupSave::Name {
                id: GroupKey::Draft,
                name: "Groceries".into()
            })]
        );
    }

    #[test]
    fn test_saved_commit_relays_even_empty() {
        let group = saved();
        let props = GroupRowProps {
            editing: true,
            ..GroupRowProps::new(&group)
        };
        let mut state = GroupRowState::default();

        assert_eq!(
            update(&mut state, &props, GroupRowEvent::Commit(String::new())),
            vec![GroupIntent::Save(GroupSave::Name {
                id: group.id,
                name: String::new()
            })]
        );

        // Not editing: nothing to commit
        let idle = GroupRowProps::new(&group);
        assert!(update(&mut state, &idle, GroupRowEvent::Commit("x".into())).is_empty());
    }

    #[test]
    fn test_blur_and_enter_stop_editing() {
        let group = saved();
        let props = GroupRowProps {
            editing: true,
            ..GroupRowProps::new(&group)
        };
        let mut state = GroupRowState::default();

        assert_eq!(
            update(&mut state, &props, GroupRowEvent::Blur),
            vec![GroupIntent::Edit(None)]
        );
        assert_eq!(
            update(&mut state, &GroupRowProps::new(&group), GroupRowEvent::RowEnter),
            vec![GroupIntent::Edit(None)]
        );
    }

    #[test]
    fn test_toggle_visibility_saves_flipped_group() {
        let mut group = saved();
        group.hidden = true;
        let props = GroupRowProps::new(&group);
        let mut state = GroupRowState::default();
        open_menu(&mut state, &props);

        let intents = update(
            &mut state,
            &props,
            GroupRowEvent::SelectMenu(MenuItem::ToggleVisibility),
        );
        assert!(!state.menu_open);
        match intents.as_slice() {
            [GroupIntent::Save(GroupSave::Group(updated))] => {
                assert!(!updated.hidden);
                assert_eq!(updated.name, group.name);
                assert_eq!(updated.id, group.id);
            }
            other => panic!("unexpected intents {:?}", other),
        }
    }

    #[test]
    fn test_menu_items_and_labels() {
        let group = saved();
        let mut props = GroupRowProps::new(&group);
        let names: Vec<_> = menu_items(&props).iter().map(|i| i.name()).collect();
        assert_eq!(names, vec!["add-category", "toggle-visibility", "rename", "delete"]);
        assert_eq!(MenuItem::ToggleVisibility.label(&group), "Hide");

        props.can_delete = false;
        assert!(!menu_items(&props).contains(&MenuItem::Delete));

        let mut state = GroupRowState::default();
        open_menu(&mut state, &props);
        assert!(update(&mut state, &props, GroupRowEvent::SelectMenu(MenuItem::Delete)).is_empty());
        assert!(!state.menu_open);
    }

    #[test]
    fn test_menu_selection_intents() {
        let group = saved();
        let props = GroupRowProps::new(&group);
        let mut state = GroupRowState::default();

        // A closed menu ignores selections
        assert!(update(&mut state, &props, GroupRowEvent::SelectMenu(MenuItem::Rename)).is_empty());

        for (item, expected) in [
            (MenuItem::AddCategory, GroupIntent::ShowNewCategory(group.id)),
            (MenuItem::Rename, GroupIntent::Edit(Some(group.id))),
            (MenuItem::Delete, GroupIntent::Delete(group.id)),
        ] {
            open_menu(&mut state, &props);
            assert_eq!(
                update(&mut state, &props, GroupRowEvent::SelectMenu(item)),
                vec![expected]
            );
            assert!(!state.menu_open);
        }

        open_menu(&mut state, &props);
        assert!(update(&mut state, &props, GroupRowEvent::CloseMenu).is_empty());
        assert!(!state.menu_open);
    }

    #[test]
    fn test_notes() {
        let group = saved();
        let props = GroupRowProps::new(&group);
        let mut state = GroupRowState::default();
        assert_eq!(
            update(&mut state, &props, GroupRowEvent::ClickNotes),
            vec![GroupIntent::OpenNotes(group.id)]
        );

        let draft = CategoryGroup::draft();
        let draft_props = GroupRowProps::new(&draft);
        assert!(update(&mut state, &draft_props, GroupRowEvent::ClickNotes).is_empty());
        assert!(update(&mut state, &draft_props, GroupRowEvent::ClickMenuButton).is_empty());
        assert!(!state.menu_open);
    }

    #[test]
    fn test_drag_preview_view() {
        let group = saved();
        let props = GroupRowProps {
            drag_preview: true,
            hovered: true,
            ..GroupRowProps::new(&group)
        };
        let view = view(&props, &GroupRowState::default());

        assert_eq!(view.label, "Group: Bills");
        assert_eq!(view.arrow, None);
        assert!(!view.show_menu_button);
        assert!(!view.show_notes_button);
        assert!(view.elevated);
        assert_eq!(view.indent, 1);
    }

    #[test]
    fn test_regular_view() {
        let group = saved();
        let props = GroupRowProps {
            collapsed: true,
            hovered: true,
            ..GroupRowProps::new(&group)
        };
        let mut state = GroupRowState::default();
        let plain = view(&props, &state);
        assert_eq!(plain.arrow, Some(Arrow::Collapsed));
        assert_eq!(plain.label, "Bills");
        assert!(plain.show_menu_button);
        assert!(plain.editor.is_none());
        assert!(plain.menu.is_none());

        state.menu_open = true;
        let with_menu = view(&props, &state);
        assert_eq!(with_menu.menu.unwrap()[1], (MenuItem::ToggleVisibility, "Hide"));

        let draft = CategoryGroup::draft();
        let draft_view = view(&GroupRowProps::new(&draft), &GroupRowState::default());
        assert_eq!(draft_view.editor.unwrap().placeholder, NEW_GROUP_PLACEHOLDER);
        assert!(!draft_view.show_menu_button);
    }
}
