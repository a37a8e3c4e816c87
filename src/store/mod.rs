//! Item store interfaces.
//!
//! Ownership model:
//! - `ItemStore` is the sampler-facing read interface over grouped arrays.
//! - `OpenStore` adds path-based construction for file-backed stores.
//! - The sampler owns its store and releases it on drop or `close`.

use ndarray::ArrayD;
use std::ops::Range;
use std::path::Path;

use crate::data::ItemId;
use crate::errors::SamplerError;
use crate::types::{Extents, GroupName, ItemName};

#[cfg(feature = "hdf5")]
mod hdf5_store;
mod memory;

#[cfg(feature = "hdf5")]
pub use hdf5_store::Hdf5Store;
pub use memory::InMemoryStore;

/// Read access to named n-dimensional items grouped one level deep.
///
/// Enumeration order must be stable for a fixed store so catalogs (and thus
/// seeded sample sequences) are reproducible.
pub trait ItemStore {
    /// Element type of every item in the store.
    type Elem: Clone;

    /// Top-level group names in enumeration order.
    fn groups(&self) -> Result<Vec<GroupName>, SamplerError>;

    /// Names of items nested directly under `group`, in enumeration order.
    fn items(&self, group: &str) -> Result<Vec<ItemName>, SamplerError>;

    /// Concrete extents of `item`.
    fn shape(&self, item: &ItemId) -> Result<Extents, SamplerError>;

    /// Read the rectangular sub-slice `ranges` of `item`.
    ///
    /// `ranges` covers the leading dimensions; any remaining dimensions are
    /// read whole. Ranges past the item's extent are store errors.
    fn read_slice(
        &self,
        item: &ItemId,
        ranges: &[Range<usize>],
    ) -> Result<ArrayD<Self::Elem>, SamplerError>;

    /// Release the store. The default just drops it.
    fn close(self) -> Result<(), SamplerError>
    where
        Self: Sized,
    {
        Ok(())
    }
}

/// Stores that can be opened read-only from a filesystem path.
pub trait OpenStore: ItemStore + Sized {
    /// Open the store at `path` for reading.
    fn open(path: &Path) -> Result<Self, SamplerError>;
}

/// Flatten groups and their items into an ordered catalog.
pub fn build_catalog<S: ItemStore + ?Sized>(store: &S) -> Result<Vec<ItemId>, SamplerError> {
    let mut catalog = Vec::new();
    for group in store.groups()? {
        for name in store.items(&group)? {
            catalog.push(ItemId::new(group.clone(), name));
        }
    }
    Ok(catalog)
}

/// Check `ranges` against `extents`, returning a store error on the first
/// range that is reversed or runs past its dimension.
pub(crate) fn check_ranges(
    item: &ItemId,
    extents: &[usize],
    ranges: &[Range<usize>],
) -> Result<(), SamplerError> {
    if ranges.len() > extents.len() {
        return Err(SamplerError::Store {
            item: item.path(),
            reason: format!(
                "{} ranges requested for an item with {} dimensions",
                ranges.len(),
                extents.len()
            ),
        });
    }
    for (axis, (range, &extent)) in ranges.iter().zip(extents).enumerate() {
        if range.start > range.end || range.end > extent {
            return Err(SamplerError::Store {
                item: item.path(),
                reason: format!(
                    "range {}..{} is out of bounds for axis {axis} of extent {extent}",
                    range.start, range.end
                ),
            });
        }
    }
    Ok(())
}
