/// Constants used by the slice sampler runtime.
pub mod sampler {
    /// Number of item draws attempted before `next_sample` gives up.
    pub const MAX_SLICE_ATTEMPTS: usize = 500;
    /// Seed used when the caller does not supply one.
    pub const DEFAULT_SEED: u64 = 41;
}

/// Constants used by item stores.
pub mod store {
    /// Separator joining a group name and an item name into an item path.
    pub const ITEM_PATH_SEPARATOR: &str = "/";
    /// Placeholder shown for full-extent dimensions in rendered shapes.
    pub const FULL_EXTENT_LABEL: &str = "*";
}
