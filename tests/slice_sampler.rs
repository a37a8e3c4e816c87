use ndarray::{Array, ArrayD, IxDyn};

use slabs::constants::sampler::MAX_SLICE_ATTEMPTS;
use slabs::{Extent, InMemoryStore, ItemStore, Position, SamplerConfig, SamplerError, SliceSampler};

const GROUPS: [&str; 5] = ["a", "b", "c", "d", "e"];

fn build_item(group: usize, item: usize, rows: usize, cols: usize) -> ArrayD<f64> {
    Array::from_shape_fn(IxDyn(&[rows, cols]), |idx| {
        (group * 1_000_000 + item * 10_000 + idx[0] * 100 + idx[1]) as f64
    })
}

/// Five groups of five `(15, 20)` items.
fn uniform_store() -> InMemoryStore<f64> {
    let mut store = InMemoryStore::new();
    for (g, group) in GROUPS.iter().enumerate() {
        for item in 0..5 {
            store.insert(*group, item.to_string(), build_item(g, item, 15, 20));
        }
    }
    store
}

/// Items whose extents differ per group: group `i` holds `(10 + i, 12 + 2 * i)`.
fn ragged_store() -> InMemoryStore<f64> {
    let mut store = InMemoryStore::new();
    for (g, group) in GROUPS.iter().enumerate() {
        for item in 0..3 {
            store.insert(*group, item.to_string(), build_item(g, item, 10 + g, 12 + 2 * g));
        }
    }
    store
}

fn sampler(shape: &[Extent]) -> SliceSampler<InMemoryStore<f64>> {
    SliceSampler::new(uniform_store(), SamplerConfig::new(shape.iter().copied())).unwrap()
}

#[test]
fn catalog_lists_every_item_grouped_in_order() {
    let sampler = sampler(&[Extent::Full, Extent::Full]);
    let catalog = sampler.catalog();
    assert_eq!(catalog.len(), 25);
    assert_eq!(catalog[0].path(), "a/0");
    assert_eq!(catalog[5].path(), "b/0");
    assert_eq!(catalog[24].path(), "e/4");
}

#[test]
fn fixed_rows_full_columns() {
    let mut sampler = sampler(&[Extent::Fixed(2), Extent::Full]);
    assert_eq!(sampler.next_sample().unwrap().shape(), &[2, 20]);
}

#[test]
fn zero_rows_full_columns() {
    let mut sampler = sampler(&[Extent::Fixed(0), Extent::Full]);
    for _ in 0..20 {
        let sample = sampler.next_sample().unwrap();
        assert_eq!(sample.shape(), &[0, 20]);
        assert!(sample.offsets[0] <= 15);
    }
}

#[test]
fn full_rows_full_columns() {
    let mut sampler = sampler(&[Extent::Full, Extent::Full]);
    let sample = sampler.next_sample().unwrap();
    assert_eq!(sample.shape(), &[15, 20]);
    assert_eq!(sample.offsets, vec![0, 0]);
}

#[test]
fn oversized_shape_exhausts_attempts() {
    let mut sampler = sampler(&[Extent::Fixed(100), Extent::Fixed(100)]);
    match sampler.next_sample() {
        Err(SamplerError::Exhausted { attempts, shape }) => {
            assert_eq!(attempts, MAX_SLICE_ATTEMPTS);
            assert_eq!(shape, "(100, 100)");
        }
        other => panic!("expected exhaustion, got {other:?}"),
    }
}

#[test]
fn fixed_shape_is_returned_exactly() {
    let mut sampler = sampler(&[Extent::Fixed(2), Extent::Fixed(5)]);
    for sample in sampler.by_ref().take(100) {
        assert_eq!(sample.unwrap().shape(), &[2, 5]);
    }
}

#[test]
fn random_offsets_stay_in_bounds_and_match_store_contents() {
    let store = uniform_store();
    let mut sampler = SliceSampler::new(
        store.clone(),
        SamplerConfig::new([Extent::Fixed(4), Extent::Fixed(7)]).with_seed(9),
    )
    .unwrap();
    for _ in 0..500 {
        let sample = sampler.next_sample().unwrap();
        let (row, col) = (sample.offsets[0], sample.offsets[1]);
        assert!(row + 4 <= 15);
        assert!(col + 7 <= 20);
        let source = store.get(&sample.item).unwrap();
        assert_eq!(sample.data[[0, 0]], source[[row, col]]);
        assert_eq!(sample.data[[3, 6]], source[[row + 3, col + 6]]);
    }
}

#[test]
fn random_offsets_cover_the_whole_valid_range() {
    let mut sampler = sampler(&[Extent::Fixed(13), Extent::Fixed(20)]);
    let mut seen = [false; 3];
    for _ in 0..300 {
        let sample = sampler.next_sample().unwrap();
        assert_eq!(sample.offsets[1], 0);
        seen[sample.offsets[0]] = true;
    }
    assert_eq!(seen, [true; 3]);
}

#[test]
fn full_dimensions_follow_each_chosen_item() {
    let store = ragged_store();
    let mut sampler =
        SliceSampler::new(store.clone(), SamplerConfig::new([Extent::Fixed(3), Extent::Full])).unwrap();
    let mut widths = std::collections::BTreeSet::new();
    for _ in 0..200 {
        let sample = sampler.next_sample().unwrap();
        let item_shape = store.shape(&sample.item).unwrap();
        assert_eq!(sample.shape(), &[3, item_shape[1]]);
        widths.insert(item_shape[1]);
    }
    assert!(widths.len() > 1);
}

#[test]
fn only_items_large_enough_are_sampled() {
    // Only group `e` (14, 20) can hold 14 rows.
    let mut sampler =
        SliceSampler::new(ragged_store(), SamplerConfig::new([Extent::Fixed(14), Extent::Full])).unwrap();
    for _ in 0..20 {
        let sample = sampler.next_sample().unwrap();
        assert_eq!(sample.item.group, "e");
        assert_eq!(sample.shape(), &[14, 20]);
    }
}

#[test]
fn pinned_column_with_full_rows() {
    let mut sampler = SliceSampler::new(
        uniform_store(),
        SamplerConfig::new([Extent::Full, Extent::Fixed(6)])
            .with_position([Position::Random, Position::Fixed(10)]),
    )
    .unwrap();
    for _ in 0..10 {
        let sample = sampler.next_sample().unwrap();
        assert_eq!(sample.offsets, vec![0, 10]);
        assert_eq!(sample.shape(), &[15, 6]);
        assert_eq!(sample.data[[0, 0]] as u64 % 100, 10);
    }
}

#[test]
fn position_length_mismatch_is_rejected_at_construction() {
    let config = SamplerConfig::new([Extent::Fixed(2), Extent::Full])
        .with_position([Position::Random, Position::Random, Position::Fixed(0)]);
    let result = SliceSampler::new(uniform_store(), config);
    assert!(matches!(result, Err(SamplerError::Configuration(_))));
}

#[test]
fn json_config_drives_the_sampler() {
    let config = SamplerConfig::from_json_str(r#"{"shape": [null, 5], "position": [null, 0], "seed": 3}"#)
        .unwrap();
    let mut sampler = SliceSampler::new(uniform_store(), config).unwrap();
    assert_eq!(sampler.seed(), 3);
    let sample = sampler.next_sample().unwrap();
    assert_eq!(sample.shape(), &[15, 5]);
    assert_eq!(sample.offsets, vec![0, 0]);
}

#[test]
fn close_and_into_store_release_the_store() {
    let sampler = sampler(&[Extent::Fixed(1), Extent::Fixed(1)]);
    let store = sampler.into_store();
    assert_eq!(store.len(), 25);

    let sampler = SliceSampler::new(store, SamplerConfig::new([Extent::Full])).unwrap();
    sampler.close().unwrap();
}
