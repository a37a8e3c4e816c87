use std::io;

use thiserror::Error;

use crate::types::ItemPath;

/// Error type for sampler configuration, store access, and exhaustion failures.
#[derive(Debug, Error)]
pub enum SamplerError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("no valid slice of shape {shape} found after {attempts} attempts; slice size too big?")]
    Exhausted { attempts: usize, shape: String },
    #[error("item '{0}' is not present in the store")]
    MissingItem(ItemPath),
    #[error("item store failure on '{item}': {reason}")]
    Store { item: ItemPath, reason: String },
    #[error(transparent)]
    Io(#[from] io::Error),
    #[cfg(feature = "hdf5")]
    #[error(transparent)]
    Hdf5(#[from] hdf5::Error),
}
