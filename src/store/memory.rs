use ndarray::{ArrayD, Axis, Slice};
use std::collections::BTreeMap;
use std::ops::Range;

use super::{ItemStore, check_ranges};
use crate::data::ItemId;
use crate::errors::SamplerError;
use crate::types::{Extents, GroupName, ItemName};

/// Item store backed by arrays held in memory.
///
/// Groups and items enumerate in name order, the same order hierarchical
/// array files report their members in.
#[derive(Clone, Debug)]
pub struct InMemoryStore<T> {
    groups: BTreeMap<GroupName, BTreeMap<ItemName, ArrayD<T>>>,
}

impl<T> Default for InMemoryStore<T> {
    fn default() -> Self {
        Self {
            groups: BTreeMap::new(),
        }
    }
}

impl<T> InMemoryStore<T> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an item, creating its group if needed. Returns any replaced array.
    pub fn insert(
        &mut self,
        group: impl Into<GroupName>,
        name: impl Into<ItemName>,
        data: ArrayD<T>,
    ) -> Option<ArrayD<T>> {
        self.groups
            .entry(group.into())
            .or_default()
            .insert(name.into(), data)
    }

    /// Builder form of [`InMemoryStore::insert`].
    pub fn with_item(
        mut self,
        group: impl Into<GroupName>,
        name: impl Into<ItemName>,
        data: ArrayD<T>,
    ) -> Self {
        self.insert(group, name, data);
        self
    }

    /// Create a group with no items.
    pub fn insert_group(&mut self, group: impl Into<GroupName>) {
        self.groups.entry(group.into()).or_default();
    }

    /// Borrow an item's array.
    pub fn get(&self, item: &ItemId) -> Option<&ArrayD<T>> {
        self.groups.get(&item.group)?.get(&item.name)
    }

    /// Total number of items across groups.
    pub fn len(&self) -> usize {
        self.groups.values().map(BTreeMap::len).sum()
    }

    /// True when no group holds any item.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn require(&self, item: &ItemId) -> Result<&ArrayD<T>, SamplerError> {
        self.get(item)
            .ok_or_else(|| SamplerError::MissingItem(item.path()))
    }
}

impl<T: Clone> ItemStore for InMemoryStore<T> {
    type Elem = T;

    fn groups(&self) -> Result<Vec<GroupName>, SamplerError> {
        Ok(self.groups.keys().cloned().collect())
    }

    fn items(&self, group: &str) -> Result<Vec<ItemName>, SamplerError> {
        self.groups
            .get(group)
            .map(|items| items.keys().cloned().collect())
            .ok_or_else(|| SamplerError::MissingItem(group.to_string()))
    }

    fn shape(&self, item: &ItemId) -> Result<Extents, SamplerError> {
        Ok(self.require(item)?.shape().to_vec())
    }

    fn read_slice(&self, item: &ItemId, ranges: &[Range<usize>]) -> Result<ArrayD<T>, SamplerError> {
        let data = self.require(item)?;
        check_ranges(item, data.shape(), ranges)?;
        let mut view = data.view();
        for (axis, range) in ranges.iter().enumerate() {
            view.slice_axis_inplace(Axis(axis), Slice::from(range.clone()));
        }
        Ok(view.to_owned())
    }
}
