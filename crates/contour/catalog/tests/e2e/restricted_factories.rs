//! End-to-end: single-element and empty factories.

use contour_catalog::{standard_catalogs, standard_registry};
use contour_engine::{analyze, discover_size_ranges, ContainerFactory};
use contour_types::{Effect, Element, ErrorKind, FactoryError, FactoryVariant, SizeBound};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn factory(name: &str) -> ContainerFactory {
    crate::init_tracing();
    standard_registry().unwrap().get(name).unwrap().clone()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn singleton_sequence_grows_from_one_element() {
    let singleton = factory("singleton sequence");
    assert_eq!(singleton.variant(), FactoryVariant::SingleElement);
    assert_eq!(singleton.size_limit(), Some(1));

    let catalog = standard_catalogs()
        .unwrap()
        .catalog_for(singleton.capability())
        .unwrap();
    let behavior = analyze(&singleton, &catalog).unwrap();
    let push = behavior.findings_for("push(x)").next().unwrap();
    assert_eq!(push.effect, Effect::SizeAltering);
    assert_eq!(push.error, None);
    assert_eq!(behavior.size_limit, Some(1));
}

#[test]
fn singleton_sizes_are_exactly_one() {
    let ranges = discover_size_ranges(&factory("singleton map")).unwrap();
    assert_eq!(ranges.len(), 1);
    assert_eq!(ranges[0].min, 1);
    assert_eq!(ranges[0].max, SizeBound::Bounded(1));
    assert_eq!(ranges[0].implementation.as_str(), "SingletonMap");
}

#[test]
fn empty_factory_refuses_elements() {
    let empty = factory("empty sequence");
    let err = empty.create(&[Element::from("x")]).unwrap_err();
    assert!(matches!(
        err,
        FactoryError::SizeNotSupported {
            requested: 1,
            limit: 0,
            ..
        }
    ));
    let ranges = discover_size_ranges(&empty).unwrap();
    let rendered: Vec<String> = ranges.iter().map(ToString::to_string).collect();
    assert_eq!(rendered, vec!["[0, 0] EmptySequence"]);
}

#[test]
fn empty_container_refuses_no_op_removal() {
    let empty = factory("empty sequence");
    let catalog = standard_catalogs()
        .unwrap()
        .catalog_for(empty.capability())
        .unwrap();
    let behavior = analyze(&empty, &catalog).unwrap();
    let finding = behavior.findings_for("remove_if(any)").next().unwrap();
    assert_eq!(finding.error, Some(ErrorKind::UnsupportedOperation));
    assert_eq!(finding.effect, Effect::NonModifying);
    assert!(behavior.modification.is_empty());
}
