use rand::Rng;
use std::ops::Range;
use std::path::Path;
use tracing::{debug, trace};

use crate::config::{Extent, Position, SamplerConfig, render_shape};
use crate::constants::sampler::MAX_SLICE_ATTEMPTS;
use crate::data::{ItemId, Sample};
use crate::errors::SamplerError;
use crate::store::{ItemStore, OpenStore, build_catalog};
use crate::types::Extents;

#[derive(Debug, Clone)]
/// Small deterministic RNG used for reproducible sampler behavior.
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    #[cfg(test)]
    fn state(&self) -> u64 {
        self.state
    }

    fn next_u64_internal(&mut self) -> u64 {
        let mut z = self.state.wrapping_add(0x9E3779B97F4A7C15);
        self.state = z;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
        z ^ (z >> 31)
    }
}

impl rand::RngCore for DeterministicRng {
    fn next_u32(&mut self) -> u32 {
        self.next_u64_internal() as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.next_u64_internal()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        let mut offset = 0;
        while offset < dest.len() {
            let value = self.next_u64_internal();
            let bytes = value.to_le_bytes();
            let remaining = dest.len() - offset;
            let copy_len = remaining.min(bytes.len());
            dest[offset..offset + copy_len].copy_from_slice(&bytes[..copy_len]);
            offset += copy_len;
        }
    }
}

/// Resolve a shape spec against one item's extents.
///
/// `Full` dimensions take the item's extent. Returns `None` when the item has
/// fewer dimensions than the spec or any resolved extent exceeds the item's.
/// Dimensions beyond the spec are not part of the result; reads span them whole.
pub fn resolve_shape(shape: &[Extent], item_extents: &[usize]) -> Option<Extents> {
    if item_extents.len() < shape.len() {
        return None;
    }
    let resolved: Extents = shape
        .iter()
        .zip(item_extents)
        .map(|(want, &have)| want.resolve(have))
        .collect();
    if resolved
        .iter()
        .zip(item_extents)
        .any(|(want, have)| want > have)
    {
        return None;
    }
    Some(resolved)
}

/// Draws randomly positioned, fixed-shape slices from uniformly chosen items.
///
/// The sampler owns its store for its whole lifetime; dropping the sampler
/// releases it. Sampling mutates the RNG, so `next_sample` takes `&mut self`
/// and concurrent use needs external locking or one sampler per thread.
///
/// The iterator never ends: every `next()` yields `Some(next_sample())`.
pub struct SliceSampler<S: ItemStore> {
    /// Backing item store.
    store: S,
    /// Every item id, groups flattened in enumeration order.
    catalog: Vec<ItemId>,
    /// Item extents per catalog index, fetched on first draw.
    extents: Vec<Option<Extents>>,
    /// Requested extent per dimension.
    shape: Vec<Extent>,
    /// Requested start offset per dimension (same length as `shape`).
    position: Vec<Position>,
    /// Seed the RNG was created from.
    seed: u64,
    /// Deterministic RNG for item and offset draws.
    rng: DeterministicRng,
}

impl<S: ItemStore> SliceSampler<S> {
    /// Build a sampler over `store`.
    ///
    /// Fails with `Configuration` when `position` and `shape` differ in length,
    /// when `shape` is empty, or when the store holds no items.
    pub fn new(store: S, config: SamplerConfig) -> Result<Self, SamplerError> {
        let position = config.validated_position()?;
        let catalog = build_catalog(&store)?;
        if catalog.is_empty() {
            return Err(SamplerError::Configuration(
                "item store contains no items to sample from".into(),
            ));
        }
        debug!(
            items = catalog.len(),
            shape = %render_shape(&config.shape),
            seed = config.seed,
            "built slice sampler catalog"
        );
        Ok(Self {
            store,
            extents: vec![None; catalog.len()],
            catalog,
            shape: config.shape,
            position,
            seed: config.seed,
            rng: DeterministicRng::new(config.seed),
        })
    }

    /// Open the store at `path` read-only and build a sampler over it.
    pub fn open(path: impl AsRef<Path>, config: SamplerConfig) -> Result<Self, SamplerError>
    where
        S: OpenStore,
    {
        // Validate before touching the filesystem.
        config.validated_position()?;
        let store = S::open(path.as_ref())?;
        Self::new(store, config)
    }

    /// Draw the next slice.
    ///
    /// Each attempt picks an item uniformly; items the resolved shape does not
    /// fit are skipped. After `MAX_SLICE_ATTEMPTS` misfits this returns
    /// `Exhausted`. Store errors (including pinned positions past an item's
    /// extent) are returned as-is.
    pub fn next_sample(&mut self) -> Result<Sample<S::Elem>, SamplerError> {
        for attempt in 0..MAX_SLICE_ATTEMPTS {
            let idx = self.rng.random_range(0..self.catalog.len());
            let extents = self.item_extents(idx)?;
            let Some(resolved) = resolve_shape(&self.shape, &extents) else {
                trace!(
                    attempt,
                    item = %self.catalog[idx],
                    item_shape = ?extents,
                    "slice does not fit item; redrawing"
                );
                continue;
            };

            let mut offsets = Vec::with_capacity(resolved.len());
            let mut ranges: Vec<Range<usize>> = Vec::with_capacity(resolved.len());
            for ((&have, &want), position) in extents.iter().zip(&resolved).zip(&self.position) {
                let start = match position {
                    Position::Random => self.rng.random_range(0..=have - want),
                    Position::Fixed(start) => *start,
                };
                offsets.push(start);
                ranges.push(start..start.saturating_add(want));
            }

            let item = &self.catalog[idx];
            let data = self.store.read_slice(item, &ranges)?;
            return Ok(Sample {
                item: item.clone(),
                offsets,
                data,
            });
        }
        Err(SamplerError::Exhausted {
            attempts: MAX_SLICE_ATTEMPTS,
            shape: render_shape(&self.shape),
        })
    }

    fn item_extents(&mut self, idx: usize) -> Result<Extents, SamplerError> {
        if let Some(extents) = &self.extents[idx] {
            return Ok(extents.clone());
        }
        let extents = self.store.shape(&self.catalog[idx])?;
        self.extents[idx] = Some(extents.clone());
        Ok(extents)
    }

    /// Item ids in catalog order.
    pub fn catalog(&self) -> &[ItemId] {
        &self.catalog
    }

    /// Requested extent per dimension.
    pub fn shape_spec(&self) -> &[Extent] {
        &self.shape
    }

    /// Requested start offset per dimension.
    pub fn position_spec(&self) -> &[Position] {
        &self.position
    }

    /// Seed the sampler was built with.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Borrow the backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Give up the sampler and take back its store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Tear down the sampler and close its store.
    pub fn close(self) -> Result<(), SamplerError> {
        self.store.close()
    }
}

impl<S: ItemStore> Iterator for SliceSampler<S> {
    type Item = Result<Sample<S::Elem>, SamplerError>;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_sample())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}
