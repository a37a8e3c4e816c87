use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::sampler::DEFAULT_SEED;
use crate::constants::store::FULL_EXTENT_LABEL;
use crate::errors::SamplerError;

/// Requested slice extent along one dimension.
///
/// Serialized untagged: `Fixed(n)` is a bare number and `Full` is `null`, so a
/// JSON shape like `[2, null]` reads as "two rows, every column".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Extent {
    /// Take exactly this many elements.
    Fixed(usize),
    /// Take the chosen item's full extent on this dimension.
    Full,
}

impl Extent {
    /// Resolve against an item's concrete extent on the same dimension.
    pub fn resolve(self, item_extent: usize) -> usize {
        match self {
            Extent::Fixed(extent) => extent,
            Extent::Full => item_extent,
        }
    }
}

impl fmt::Display for Extent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Extent::Fixed(extent) => write!(f, "{extent}"),
            Extent::Full => f.write_str(FULL_EXTENT_LABEL),
        }
    }
}

/// Slice start offset along one dimension.
///
/// Serialized the same way as [`Extent`]: a number pins the offset, `null`
/// draws it at random.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Position {
    /// Always start at this offset. Not bounds-checked by the sampler.
    Fixed(usize),
    /// Draw a uniformly random valid offset per sample.
    #[default]
    Random,
}

/// Top-level sampler configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamplerConfig {
    /// Requested slice extent per dimension, outermost first.
    pub shape: Vec<Extent>,
    /// Start offset per dimension; `None` means random on every dimension.
    #[serde(default)]
    pub position: Option<Vec<Position>>,
    /// RNG seed that controls deterministic sampling order.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

impl SamplerConfig {
    /// Config with random positions on every dimension and the default seed.
    pub fn new(shape: impl IntoIterator<Item = Extent>) -> Self {
        Self {
            shape: shape.into_iter().collect(),
            position: None,
            seed: DEFAULT_SEED,
        }
    }

    /// Pin (or randomize) start offsets per dimension.
    pub fn with_position(mut self, position: impl IntoIterator<Item = Position>) -> Self {
        self.position = Some(position.into_iter().collect());
        self
    }

    /// Override the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Parse a config from JSON, e.g. `{"shape": [2, null], "position": [null, 0]}`.
    pub fn from_json_str(json: &str) -> Result<Self, SamplerError> {
        serde_json::from_str(json)
            .map_err(|err| SamplerError::Configuration(format!("invalid sampler config: {err}")))
    }

    /// Check dimensionality and return the effective per-dimension positions.
    pub(crate) fn validated_position(&self) -> Result<Vec<Position>, SamplerError> {
        if self.shape.is_empty() {
            return Err(SamplerError::Configuration(
                "slice shape must have at least one dimension".into(),
            ));
        }
        match &self.position {
            None => Ok(vec![Position::Random; self.shape.len()]),
            Some(position) if position.len() == self.shape.len() => Ok(position.clone()),
            Some(position) => Err(SamplerError::Configuration(format!(
                "position has {} dimensions but shape has {}",
                position.len(),
                self.shape.len()
            ))),
        }
    }
}

/// Render a shape spec as `(2, *)`.
pub fn render_shape(shape: &[Extent]) -> String {
    let parts: Vec<String> = shape.iter().map(ToString::to_string).collect();
    format!("({})", parts.join(", "))
}
