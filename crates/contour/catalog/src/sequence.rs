//! Sequence and sequence-cursor probes.

use contour_engine::{Operation, OperationCatalog};
use contour_types::{CapabilityKind, Element, ProbeResult};

use contour_types::OperationTag::{EmptyArgument, NullArgument, ReadOnly};

fn x() -> Element {
    Element::from("x")
}

fn a() -> Element {
    Element::from("a")
}

fn uppercase(e: &Element) -> Element {
    e.paired_value()
}

/// Probes against the [`Sequence`](contour_containers::Sequence) surface.
pub fn sequence_catalog() -> ProbeResult<OperationCatalog> {
    OperationCatalog::from_operations(
        CapabilityKind::Sequence,
        [
            Operation::sequence("get(0)", |s| s.get(0).map(drop)).tagged(&[ReadOnly]),
            Operation::sequence("get(4)", |s| s.get(4).map(drop)).tagged(&[ReadOnly]),
            Operation::sequence("first()", |s| s.first().map(drop)).tagged(&[ReadOnly]),
            Operation::sequence("contains(a)", |s| s.contains(&a()).map(drop)).tagged(&[ReadOnly]),
            Operation::sequence("contains(null)", |s| s.contains(&Element::Null).map(drop))
                .tagged(&[NullArgument, ReadOnly]),
            Operation::sequence("index_of(null)", |s| s.index_of(&Element::Null).map(drop))
                .tagged(&[NullArgument, ReadOnly]),
            Operation::sequence("last_index_of(null)", |s| {
                s.last_index_of(&Element::Null).map(drop)
            })
            .tagged(&[NullArgument, ReadOnly]),
            Operation::sequence("contains_all([])", |s| s.contains_all(&[]).map(drop))
                .tagged(&[EmptyArgument, ReadOnly]),
            Operation::sequence("contains_all([null])", |s| {
                s.contains_all(&[Element::Null]).map(drop)
            })
            .tagged(&[NullArgument, ReadOnly]),
            Operation::sequence("set(0, x)", |s| s.set(0, x()).map(drop)),
            Operation::sequence("set(0, null)", |s| s.set(0, Element::Null).map(drop))
                .tagged(&[NullArgument]),
            Operation::sequence("push(x)", |s| s.push(x())),
            Operation::sequence("push(null)", |s| s.push(Element::Null)).tagged(&[NullArgument]),
            Operation::sequence("insert(0, x)", |s| s.insert(0, x())),
            Operation::sequence("remove_at(0)", |s| s.remove_at(0).map(drop)),
            Operation::sequence("remove(a)", |s| s.remove(&a()).map(drop)),
            Operation::sequence("remove(x)", |s| s.remove(&x()).map(drop)),
            Operation::sequence("remove(null)", |s| s.remove(&Element::Null).map(drop))
                .tagged(&[NullArgument]),
            Operation::sequence("remove_last()", |s| s.remove_last().map(drop)),
            Operation::sequence("extend_from([x])", |s| s.extend_from(&[x()]).map(drop)),
            Operation::sequence("extend_from([])", |s| s.extend_from(&[]).map(drop))
                .tagged(&[EmptyArgument]),
            Operation::sequence("remove_all([a])", |s| s.remove_all(&[a()]).map(drop)),
            Operation::sequence("remove_all([])", |s| s.remove_all(&[]).map(drop))
                .tagged(&[EmptyArgument]),
            Operation::sequence("retain_all([a])", |s| s.retain_all(&[a()]).map(drop)),
            Operation::sequence("retain_all(self)", |s| {
                let all = s.elements();
                s.retain_all(&all).map(drop)
            }),
            Operation::sequence("remove_if(is_null)", |s| {
                s.remove_if(&|e: &Element| e.is_null()).map(drop)
            }),
            Operation::sequence("remove_if(any)", |s| s.remove_if(&|_: &Element| true).map(drop)),
            Operation::sequence("replace_all(uppercase)", |s| s.replace_all(&uppercase)),
            Operation::sequence("sort()", |s| s.sort()),
            Operation::sequence("clear()", |s| s.clear()),
        ],
    )
}

/// Probes against the [`SequenceCursor`](contour_containers::SequenceCursor)
/// surface.
pub fn cursor_catalog() -> ProbeResult<OperationCatalog> {
    use contour_engine::CursorStart::{Back, Front};
    OperationCatalog::from_operations(
        CapabilityKind::SequenceIterator,
        [
            Operation::cursor("next()", Front, |c| c.next().map(drop)).tagged(&[ReadOnly]),
            Operation::cursor("previous() at front", Front, |c| c.previous().map(drop))
                .tagged(&[ReadOnly]),
            Operation::cursor("previous() at back", Back, |c| c.previous().map(drop))
                .tagged(&[ReadOnly]),
            Operation::cursor("next() at back", Back, |c| c.next().map(drop)).tagged(&[ReadOnly]),
            Operation::cursor("remove() before next", Front, |c| c.remove()),
            Operation::cursor("set(x) before next", Front, |c| c.set(x())),
            Operation::cursor("next(); remove()", Front, |c| {
                c.next()?;
                c.remove()
            }),
            Operation::cursor("next(); set(x)", Front, |c| {
                c.next()?;
                c.set(x())
            }),
            Operation::cursor("next(); set(null)", Front, |c| {
                c.next()?;
                c.set(Element::Null)
            })
            .tagged(&[NullArgument]),
            Operation::cursor("add(x)", Front, |c| c.add(x())),
            Operation::cursor("previous(); remove() at back", Back, |c| {
                c.previous()?;
                c.remove()
            }),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogs_build() {
        let sequence = sequence_catalog().unwrap();
        assert_eq!(sequence.capability(), CapabilityKind::Sequence);
        assert_eq!(sequence.count_tagged(&[NullArgument, ReadOnly]), 4);
        let cursor = cursor_catalog().unwrap();
        assert_eq!(cursor.capability(), CapabilityKind::SequenceIterator);
        assert!(cursor.operations().iter().all(|op| !op.name().is_empty()));
    }

    #[test]
    fn probe_names_are_unique() {
        let catalog = sequence_catalog()
            .unwrap()
            .merged(&cursor_catalog().unwrap());
        let mut names: Vec<&str> = catalog.operations().iter().map(|op| op.name()).collect();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total);
    }
}
