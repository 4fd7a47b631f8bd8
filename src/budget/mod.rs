//! Budget sidebar: category group rows and the list that owns them

pub mod group_list;
pub mod group_row;

pub use group_list::{GroupList, ListEffect};
pub use group_row::{
    GroupIntent, GroupRowEvent, GroupRowProps, GroupRowState, GroupRowView, GroupSave, MenuItem,
};
