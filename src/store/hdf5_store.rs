use hdf5::{File, H5Type, Hyperslab, SliceOrIndex};
use ndarray::{ArrayD, IxDyn};
use std::marker::PhantomData;
use std::ops::Range;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::{ItemStore, OpenStore, check_ranges};
use crate::constants::store::ITEM_PATH_SEPARATOR;
use crate::data::ItemId;
use crate::errors::SamplerError;
use crate::types::{Extents, GroupName, ItemName};

/// Read-only item store over an HDF5 file: root groups hold datasets.
pub struct Hdf5Store<T> {
    file: File,
    path: PathBuf,
    _elem: PhantomData<T>,
}

impl<T> Hdf5Store<T> {
    /// Path the store was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn member_name(full: &str) -> String {
    full.rsplit(ITEM_PATH_SEPARATOR)
        .next()
        .unwrap_or(full)
        .to_string()
}

impl<T: H5Type + Clone> OpenStore for Hdf5Store<T> {
    fn open(path: &Path) -> Result<Self, SamplerError> {
        let file = File::open(path)?;
        debug!(path = %path.display(), "opened hdf5 item store");
        Ok(Self {
            file,
            path: path.to_path_buf(),
            _elem: PhantomData,
        })
    }
}

impl<T: H5Type + Clone> ItemStore for Hdf5Store<T> {
    type Elem = T;

    fn groups(&self) -> Result<Vec<GroupName>, SamplerError> {
        Ok(self
            .file
            .groups()?
            .iter()
            .map(|group| member_name(&group.name()))
            .collect())
    }

    fn items(&self, group: &str) -> Result<Vec<ItemName>, SamplerError> {
        Ok(self
            .file
            .group(group)?
            .datasets()?
            .iter()
            .map(|dataset| member_name(&dataset.name()))
            .collect())
    }

    fn shape(&self, item: &ItemId) -> Result<Extents, SamplerError> {
        Ok(self.file.dataset(&item.path())?.shape())
    }

    fn read_slice(&self, item: &ItemId, ranges: &[Range<usize>]) -> Result<ArrayD<T>, SamplerError> {
        let dataset = self.file.dataset(&item.path())?;
        let extents = dataset.shape();
        check_ranges(item, &extents, ranges)?;

        let mut out_shape: Vec<usize> = ranges.iter().map(|range| range.end - range.start).collect();
        out_shape.extend_from_slice(&extents[ranges.len()..]);
        if out_shape.contains(&0) {
            // Zero-sized hyperslab selections are rejected by libhdf5.
            return ArrayD::from_shape_vec(IxDyn(&out_shape), Vec::new()).map_err(|err| {
                SamplerError::Store {
                    item: item.path(),
                    reason: err.to_string(),
                }
            });
        }

        let mut slab: Vec<SliceOrIndex> = ranges.iter().cloned().map(SliceOrIndex::from).collect();
        slab.extend(extents[ranges.len()..].iter().map(|&extent| SliceOrIndex::from(0..extent)));
        let data = dataset.read_slice::<T, _, ndarray_h5::IxDyn>(Hyperslab::from(slab))?;
        let values = data.into_raw_vec();
        ArrayD::from_shape_vec(IxDyn(&out_shape), values).map_err(|err| SamplerError::Store {
            item: item.path(),
            reason: err.to_string(),
        })
    }

    fn close(self) -> Result<(), SamplerError> {
        debug!(path = %self.path.display(), "closing hdf5 item store");
        self.file.close()?;
        Ok(())
    }
}
