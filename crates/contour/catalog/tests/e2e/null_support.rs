//! End-to-end: null element and null argument support.

use contour_catalog::{standard_catalogs, standard_registry};
use contour_engine::analyze;
use contour_types::{AggregatedBehavior, ErrorKind, NullElementSupport};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn characterize(name: &str) -> AggregatedBehavior {
    crate::init_tracing();
    let registry = standard_registry().unwrap();
    let factory = registry.get(name).unwrap();
    let catalog = standard_catalogs()
        .unwrap()
        .catalog_for(factory.capability())
        .unwrap();
    analyze(factory, &catalog).unwrap()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn null_hostile_containers_refuse_elements_and_queries() {
    for name in ["compact frozen sequence", "compact frozen set", "compact frozen map"] {
        let behavior = characterize(name);
        assert_eq!(behavior.null_element_support, NullElementSupport::No, "{}", name);
        assert_eq!(behavior.null_argument_support, Some(false), "{}", name);
    }
}

#[test]
fn null_query_refusal_is_a_null_element_error() {
    let behavior = characterize("compact frozen sequence");
    let finding = behavior.findings_for("contains(null)").next().unwrap();
    assert_eq!(finding.error, Some(ErrorKind::NullElement));
}

#[test]
fn permissive_containers_accept_nulls() {
    for name in ["resizable sequence", "resizable set", "resizable map", "singleton map"] {
        let behavior = characterize(name);
        assert_eq!(behavior.null_element_support, NullElementSupport::Yes, "{}", name);
        assert_eq!(behavior.null_argument_support, Some(true), "{}", name);
    }
}

#[test]
fn empty_containers_cannot_hold_a_null() {
    let behavior = characterize("empty sequence");
    assert_eq!(behavior.null_element_support, NullElementSupport::NotApplicable);
    assert_eq!(behavior.null_argument_support, Some(true));
}

#[test]
fn wrapped_rejection_is_seen_through_the_wrapper() {
    let behavior = characterize("copied frozen sequence");
    assert_eq!(behavior.null_element_support, NullElementSupport::No);
}
