//! Property tests: discovered size ranges tile the supported sizes.

use contour_containers::{Container, FrozenSequence, ReferenceSequence};
use contour_engine::{ContainerFactory, DirectFactory, SizeRangeDiscoverer};
use contour_types::{CapabilityKind, SizeBound, SizeRange};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn arb_factory(max_size: usize) -> impl Strategy<Value = ContainerFactory> {
    prop_oneof![
        Just(ContainerFactory::from(
            DirectFactory::new("resizable", CapabilityKind::Sequence, |e| {
                Ok(Container::sequence(ReferenceSequence::new(e.to_vec())))
            })
            .with_max_size(max_size)
        )),
        Just(ContainerFactory::from(
            DirectFactory::new("compact", CapabilityKind::Sequence, |e| {
                FrozenSequence::compact(e.to_vec()).map(Container::sequence)
            })
            .with_max_size(max_size)
        )),
    ]
}

fn upper(range: &SizeRange, ceiling: usize) -> usize {
    match range.max {
        SizeBound::Bounded(max) => max,
        SizeBound::Unbounded => ceiling,
    }
}

// ---------------------------------------------------------------------------
// Property Tests
// ---------------------------------------------------------------------------

proptest! {
    /// Ranges start at zero, follow each other without gaps and cover every
    /// size the factory can build up to the ceiling.
    #[test]
    fn ranges_tile_the_supported_sizes(
        (max_size, factory) in (0usize..30).prop_flat_map(|m| (Just(m), arb_factory(m))),
        ceiling in 1usize..25,
    ) {
        let profile = SizeRangeDiscoverer::new(ceiling).discover(&factory).unwrap();
        let ranges = &profile.ranges;
        prop_assert!(!ranges.is_empty());
        prop_assert_eq!(ranges[0].min, 0);
        for pair in ranges.windows(2) {
            prop_assert_eq!(pair[1].min, upper(&pair[0], ceiling) + 1);
            prop_assert_ne!(&pair[0].implementation, &pair[1].implementation);
        }
        let last = ranges.last().unwrap();
        prop_assert_eq!(upper(last, ceiling), max_size.min(ceiling));
        if max_size <= ceiling {
            prop_assert_eq!(last.max, SizeBound::Bounded(max_size));
            prop_assert_eq!(profile.supported.max, SizeBound::Bounded(max_size));
        }
        for size in 0..=max_size.min(ceiling) {
            prop_assert_eq!(ranges.iter().filter(|r| r.contains(size)).count(), 1);
        }
    }

    /// Only ranges that reach the ceiling can be open-ended.
    #[test]
    fn bounded_factories_stay_bounded(
        (max_size, factory) in (0usize..10).prop_flat_map(|m| (Just(m), arb_factory(m))),
        ceiling in 12usize..25,
    ) {
        let profile = SizeRangeDiscoverer::new(ceiling).discover(&factory).unwrap();
        prop_assert_eq!(profile.supported.max, SizeBound::Bounded(max_size));
        prop_assert!(profile.ranges.iter().all(|r| r.max != SizeBound::Unbounded));
    }
}
