/// Name of a top-level group in an item store.
/// Examples: `a`, `run_2024_03`
pub type GroupName = String;
/// Name of an item nested directly under a group.
/// Examples: `0`, `spectrogram`
pub type ItemName = String;
/// Fully-qualified item path (`group/item`).
/// Example: `a/3`
pub type ItemPath = String;
/// Concrete extents of an n-dimensional array, outermost dimension first.
/// Example: `[15, 20]`
pub type Extents = Vec<usize>;
