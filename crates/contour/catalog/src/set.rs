//! Set probes.

use contour_engine::{Operation, OperationCatalog};
use contour_types::OperationTag::{EmptyArgument, NullArgument, ReadOnly};
use contour_types::{CapabilityKind, Element, ProbeResult};

fn x() -> Element {
    Element::from("x")
}

fn a() -> Element {
    Element::from("a")
}

/// Probes against the [`Set`](contour_containers::Set) surface.
///
/// Sets have no positional edit, so `exchange(a, x)` removes one member and
/// adds another to expose entry modification without a size change.
pub fn set_catalog() -> ProbeResult<OperationCatalog> {
    OperationCatalog::from_operations(
        CapabilityKind::Set,
        [
            Operation::set("contains(a)", |s| s.contains(&a()).map(drop)).tagged(&[ReadOnly]),
            Operation::set("contains(null)", |s| s.contains(&Element::Null).map(drop))
                .tagged(&[NullArgument, ReadOnly]),
            Operation::set("contains_all([a])", |s| s.contains_all(&[a()]).map(drop))
                .tagged(&[ReadOnly]),
            Operation::set("contains_all([])", |s| s.contains_all(&[]).map(drop))
                .tagged(&[EmptyArgument, ReadOnly]),
            Operation::set("contains_all([null])", |s| {
                s.contains_all(&[Element::Null]).map(drop)
            })
            .tagged(&[NullArgument, ReadOnly]),
            Operation::set("insert(x)", |s| s.insert(x()).map(drop)),
            Operation::set("insert(a)", |s| s.insert(a()).map(drop)),
            Operation::set("insert(null)", |s| s.insert(Element::Null).map(drop))
                .tagged(&[NullArgument]),
            Operation::set("remove(a)", |s| s.remove(&a()).map(drop)),
            Operation::set("remove(x)", |s| s.remove(&x()).map(drop)),
            Operation::set("remove(null)", |s| s.remove(&Element::Null).map(drop))
                .tagged(&[NullArgument]),
            Operation::set("exchange(a, x)", |s| {
                if s.remove(&a())? {
                    s.insert(x())?;
                }
                Ok(())
            }),
            Operation::set("extend_from([x])", |s| s.extend_from(&[x()]).map(drop)),
            Operation::set("extend_from([])", |s| s.extend_from(&[]).map(drop))
                .tagged(&[EmptyArgument]),
            Operation::set("remove_all([a])", |s| s.remove_all(&[a()]).map(drop)),
            Operation::set("remove_all([])", |s| s.remove_all(&[]).map(drop))
                .tagged(&[EmptyArgument]),
            Operation::set("retain_all([a])", |s| s.retain_all(&[a()]).map(drop)),
            Operation::set("retain_all([])", |s| s.retain_all(&[]).map(drop))
                .tagged(&[EmptyArgument]),
            Operation::set("remove_if(is_null)", |s| {
                s.remove_if(&|e: &Element| e.is_null()).map(drop)
            }),
            Operation::set("remove_if(any)", |s| s.remove_if(&|_: &Element| true).map(drop)),
            Operation::set("clear()", |s| s.clear()),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_builds() {
        let catalog = set_catalog().unwrap();
        assert_eq!(catalog.capability(), CapabilityKind::Set);
        assert_eq!(catalog.count_tagged(&[NullArgument, ReadOnly]), 2);
        assert_eq!(catalog.count_tagged(&[EmptyArgument]), 4);
    }
}
