use ndarray::ArrayD;
use std::fmt;

use crate::constants::store::ITEM_PATH_SEPARATOR;
use crate::types::{GroupName, ItemName, ItemPath};

/// Identifier of one item: its parent group plus its own name.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId {
    /// Top-level group holding the item.
    pub group: GroupName,
    /// Item name within the group.
    pub name: ItemName,
}

impl ItemId {
    /// Build an id from a group and item name.
    pub fn new(group: impl Into<GroupName>, name: impl Into<ItemName>) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
        }
    }

    /// Fully-qualified `group/item` path.
    pub fn path(&self) -> ItemPath {
        format!("{}{ITEM_PATH_SEPARATOR}{}", self.group, self.name)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{ITEM_PATH_SEPARATOR}{}", self.group, self.name)
    }
}

/// One sampled slice together with where it came from.
#[derive(Clone, Debug, PartialEq)]
pub struct Sample<T> {
    /// Item the slice was read from.
    pub item: ItemId,
    /// Start offset per requested dimension.
    pub offsets: Vec<usize>,
    /// Slice data; its shape is the resolved slice shape.
    pub data: ArrayD<T>,
}

impl<T> Sample<T> {
    /// Shape of the sliced data.
    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    /// Drop provenance and keep only the array.
    pub fn into_data(self) -> ArrayD<T> {
        self.data
    }
}
