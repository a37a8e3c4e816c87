#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Sampler configuration types.
pub mod config;
/// Centralized constants used across the sampler and stores.
pub mod constants;
/// Item identifiers and sample types.
pub mod data;
/// Slice sampler and shape resolution.
pub mod sampler;
/// Item store traits and built-in stores.
pub mod store;
/// Shared type aliases.
pub mod types;

mod errors;

pub use config::{Extent, Position, SamplerConfig};
pub use data::{ItemId, Sample};
pub use errors::SamplerError;
pub use sampler::{SliceSampler, resolve_shape};
#[cfg(feature = "hdf5")]
pub use store::Hdf5Store;
pub use store::{InMemoryStore, ItemStore, OpenStore};
pub use types::{Extents, GroupName, ItemName, ItemPath};
