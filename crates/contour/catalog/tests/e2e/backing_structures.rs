//! End-to-end: containers derived from a backing structure.

use contour_catalog::{standard_catalogs, standard_registry};
use contour_engine::{analyze, ContainerFactory, SizeRangeDiscoverer};
use contour_types::{reference_payload, BackingInfluence, SizeBound};
use std::collections::BTreeSet;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn factory(name: &str) -> ContainerFactory {
    crate::init_tracing();
    standard_registry().unwrap().get(name).unwrap().clone()
}

fn backing_of(name: &str) -> BTreeSet<BackingInfluence> {
    let factory = factory(name);
    let catalog = standard_catalogs()
        .unwrap()
        .catalog_for(factory.capability())
        .unwrap();
    analyze(&factory, &catalog).unwrap().backing
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn read_only_views_only_observe_their_structure() {
    let expected: BTreeSet<_> = [BackingInfluence::StructureInfluencesContainer].into();
    for name in ["read-only sequence view", "read-only set view", "read-only map view"] {
        assert_eq!(backing_of(name), expected, "{}", name);
    }
}

#[test]
fn fixed_size_view_writes_through() {
    let expected: BTreeSet<_> = [
        BackingInfluence::StructureInfluencesContainer,
        BackingInfluence::ContainerInfluencesStructure,
    ]
    .into();
    assert_eq!(backing_of("fixed-size array view"), expected);
}

#[test]
fn copies_and_direct_containers_are_independent() {
    assert!(backing_of("copied frozen sequence").is_empty());
    assert!(backing_of("resizable sequence").is_empty());
}

#[test]
fn reference_sample_matches_backed_construction() {
    let payload = reference_payload();
    for name in ["fixed-size array view", "read-only set view", "read-only map view"] {
        let factory = factory(name);
        let sample = factory.create_reference_sample().unwrap();
        let backed = factory.create_with_backing_handle(&payload).unwrap().unwrap();
        assert_eq!(sample.snapshot(), backed.container.snapshot(), "{}", name);
        assert_eq!(sample.snapshot(), backed.backing.snapshot(), "{}", name);
    }
}

#[test]
fn self_wrapping() {
    let wrap_twice = |name: &str| {
        let factory = factory(name);
        let catalog = standard_catalogs()
            .unwrap()
            .catalog_for(factory.capability())
            .unwrap();
        analyze(&factory, &catalog).unwrap().self_wrapping_idempotent
    };
    assert_eq!(wrap_twice("read-only sequence view"), Some(true));
    assert_eq!(wrap_twice("fixed-size array view"), Some(false));
    assert_eq!(wrap_twice("resizable sequence"), None);
}

#[test]
fn alternate_seed_changes_view_identity() {
    let profile = SizeRangeDiscoverer::default()
        .discover(&factory("read-only sequence view"))
        .unwrap();
    assert_eq!(profile.ranges.len(), 1);
    assert_eq!(
        profile.ranges[0].implementation.as_str(),
        "ReadOnlyRandomAccessView"
    );
    assert_eq!(profile.ranges[0].max, SizeBound::Unbounded);

    assert_eq!(profile.alternates.len(), 1);
    let linked = &profile.alternates[0];
    assert_eq!(linked.seed, "linked");
    assert_eq!(linked.ranges[0].implementation.as_str(), "ReadOnlySequenceView");
}

#[test]
fn wrapping_without_a_differing_alternate_reports_none() {
    let profile = SizeRangeDiscoverer::default()
        .discover(&factory("read-only set view"))
        .unwrap();
    assert!(profile.alternates.is_empty());
}
