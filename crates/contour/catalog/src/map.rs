//! Map probes.

use contour_engine::{Operation, OperationCatalog};
use contour_types::OperationTag::{EmptyArgument, NullArgument, ReadOnly};
use contour_types::{CapabilityKind, Element, ProbeResult};

fn e(value: &str) -> Element {
    Element::from(value)
}

fn lowercase_value(_: &Element, value: &Element) -> Element {
    match value {
        Element::Value(v) => Element::value(v.to_lowercase()),
        Element::Null => Element::Null,
    }
}

/// Probes against the [`Map`](contour_containers::Map) surface.
///
/// Samples map each key to its upper-cased value, so `a` maps to `A`.
pub fn map_catalog() -> ProbeResult<OperationCatalog> {
    OperationCatalog::from_operations(
        CapabilityKind::Map,
        [
            Operation::map("get(a)", |m| m.get(&e("a")).map(drop)).tagged(&[ReadOnly]),
            Operation::map("get(x)", |m| m.get(&e("x")).map(drop)).tagged(&[ReadOnly]),
            Operation::map("get(null)", |m| m.get(&Element::Null).map(drop))
                .tagged(&[NullArgument, ReadOnly]),
            Operation::map("get_or_default(null, X)", |m| {
                m.get_or_default(&Element::Null, &e("X")).map(drop)
            })
            .tagged(&[NullArgument, ReadOnly]),
            Operation::map("contains_key(a)", |m| m.contains_key(&e("a")).map(drop))
                .tagged(&[ReadOnly]),
            Operation::map("contains_key(null)", |m| m.contains_key(&Element::Null).map(drop))
                .tagged(&[NullArgument, ReadOnly]),
            Operation::map("contains_value(A)", |m| m.contains_value(&e("A")).map(drop))
                .tagged(&[ReadOnly]),
            Operation::map("contains_value(null)", |m| {
                m.contains_value(&Element::Null).map(drop)
            })
            .tagged(&[NullArgument, ReadOnly]),
            Operation::map("insert(a, X)", |m| m.insert(e("a"), e("X")).map(drop)),
            Operation::map("insert(x, X)", |m| m.insert(e("x"), e("X")).map(drop)),
            Operation::map("insert(null, X)", |m| m.insert(Element::Null, e("X")).map(drop))
                .tagged(&[NullArgument]),
            Operation::map("insert(a, null)", |m| m.insert(e("a"), Element::Null).map(drop))
                .tagged(&[NullArgument]),
            Operation::map("insert_if_absent(a, X)", |m| {
                m.insert_if_absent(e("a"), e("X")).map(drop)
            }),
            Operation::map("insert_if_absent(x, X)", |m| {
                m.insert_if_absent(e("x"), e("X")).map(drop)
            }),
            Operation::map("remove(a)", |m| m.remove(&e("a")).map(drop)),
            Operation::map("remove(x)", |m| m.remove(&e("x")).map(drop)),
            Operation::map("remove(null)", |m| m.remove(&Element::Null).map(drop))
                .tagged(&[NullArgument]),
            Operation::map("remove_entry(a, A)", |m| m.remove_entry(&e("a"), &e("A")).map(drop)),
            Operation::map("remove_entry(a, X)", |m| m.remove_entry(&e("a"), &e("X")).map(drop)),
            Operation::map("replace(a, X)", |m| m.replace(e("a"), e("X")).map(drop)),
            Operation::map("replace(x, X)", |m| m.replace(e("x"), e("X")).map(drop)),
            Operation::map("replace_all(lowercase)", |m| m.replace_all(&lowercase_value)),
            Operation::map("extend_from([x=X])", |m| m.extend_from(&[(e("x"), e("X"))])),
            Operation::map("extend_from([])", |m| m.extend_from(&[])).tagged(&[EmptyArgument]),
            Operation::map("clear()", |m| m.clear()),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_builds() {
        let catalog = map_catalog().unwrap();
        assert_eq!(catalog.capability(), CapabilityKind::Map);
        assert_eq!(catalog.count_tagged(&[NullArgument, ReadOnly]), 4);
    }

    #[test]
    fn lowercase_keeps_nulls() {
        assert_eq!(lowercase_value(&e("a"), &e("A")), e("a"));
        assert_eq!(lowercase_value(&e("a"), &Element::Null), Element::Null);
    }
}
