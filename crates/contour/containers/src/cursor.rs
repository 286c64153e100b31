//! Index-based cursor usable over any [`Sequence`].

use crate::traits::{Sequence, SequenceCursor};
use contour_types::{ContainerError, ContainerResult, Element};

/// Cursor that walks a sequence through its positional methods.
///
/// Structural changes go through the sequence, so a sequence that refuses
/// `insert` or `remove_at` refuses them through the cursor too.
pub struct IndexCursor<'a> {
    sequence: &'a mut dyn Sequence,
    position: usize,
    last: Option<usize>,
}

/// Cursor positioned before `index`; `index` may equal the length.
pub fn cursor(sequence: &mut dyn Sequence, index: usize) -> ContainerResult<IndexCursor<'_>> {
    let len = sequence.len();
    if index > len {
        return Err(ContainerError::index_out_of_bounds(index, len));
    }
    Ok(IndexCursor {
        sequence,
        position: index,
        last: None,
    })
}

impl IndexCursor<'_> {
    fn last_returned(&self, method: &str) -> ContainerResult<usize> {
        self.last.ok_or_else(|| {
            ContainerError::illegal_state(format!(
                "{} called before next or previous, or after a structural change",
                method
            ))
        })
    }
}

impl SequenceCursor for IndexCursor<'_> {
    fn has_next(&self) -> bool {
        self.position < self.sequence.len()
    }

    fn next(&mut self) -> ContainerResult<Element> {
        if !self.has_next() {
            return Err(ContainerError::no_such_element("cursor is at the end"));
        }
        let element = self.sequence.get(self.position)?;
        self.last = Some(self.position);
        self.position += 1;
        Ok(element)
    }

    fn has_previous(&self) -> bool {
        self.position > 0
    }

    fn previous(&mut self) -> ContainerResult<Element> {
        if !self.has_previous() {
            return Err(ContainerError::no_such_element("cursor is at the start"));
        }
        let element = self.sequence.get(self.position - 1)?;
        self.position -= 1;
        self.last = Some(self.position);
        Ok(element)
    }

    fn next_index(&self) -> usize {
        self.position
    }

    fn remove(&mut self) -> ContainerResult<()> {
        let last = self.last_returned("remove")?;
        self.sequence.remove_at(last)?;
        if last < self.position {
            self.position -= 1;
        }
        self.last = None;
        Ok(())
    }

    fn set(&mut self, element: Element) -> ContainerResult<()> {
        let last = self.last_returned("set")?;
        self.sequence.set(last, element).map(drop)
    }

    fn add(&mut self, element: Element) -> ContainerResult<()> {
        self.sequence.insert(self.position, element)?;
        self.position += 1;
        self.last = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frozen::FrozenSequence;
    use crate::reference::ReferenceSequence;
    use contour_types::{reference_payload, ErrorKind};

    #[test]
    fn walks_forward_and_back() {
        let mut seq = ReferenceSequence::new(reference_payload());
        let mut it = cursor(&mut seq, 0).unwrap();
        assert_eq!(it.next().unwrap(), Element::from("a"));
        assert_eq!(it.next().unwrap(), Element::from("b"));
        assert_eq!(it.previous().unwrap(), Element::from("b"));
        assert_eq!(it.next_index(), 1);
    }

    #[test]
    fn end_and_start_are_no_such_element() {
        let mut seq = ReferenceSequence::new(reference_payload());
        let mut it = cursor(&mut seq, 4).unwrap();
        assert!(!it.has_next());
        assert_eq!(it.next().unwrap_err().kind, ErrorKind::NoSuchElement);

        let mut it = cursor(&mut seq, 0).unwrap();
        assert_eq!(it.previous().unwrap_err().kind, ErrorKind::NoSuchElement);
    }

    #[test]
    fn start_past_end_is_out_of_bounds() {
        let mut seq = ReferenceSequence::new(reference_payload());
        assert_eq!(
            cursor(&mut seq, 5).err().map(|e| e.kind),
            Some(ErrorKind::IndexOutOfBounds)
        );
    }

    #[test]
    fn remove_requires_a_returned_element() {
        let mut seq = ReferenceSequence::new(reference_payload());
        let mut it = cursor(&mut seq, 0).unwrap();
        assert_eq!(it.remove().unwrap_err().kind, ErrorKind::IllegalState);
        it.next().unwrap();
        it.remove().unwrap();
        assert_eq!(it.remove().unwrap_err().kind, ErrorKind::IllegalState);
        assert_eq!(it.next_index(), 0);
        assert_eq!(seq.elements().len(), 3);
    }

    #[test]
    fn add_inserts_before_next() {
        let mut seq = ReferenceSequence::new(reference_payload());
        let mut it = cursor(&mut seq, 1).unwrap();
        it.add("z".into()).unwrap();
        assert_eq!(it.next().unwrap(), Element::from("b"));
        assert_eq!(it.set("y".into()).map_err(|e| e.kind), Ok(()));
        assert_eq!(seq.get(1).unwrap(), Element::from("z"));
        assert_eq!(seq.get(2).unwrap(), Element::from("y"));
    }

    #[test]
    fn frozen_sequence_refuses_through_cursor() {
        let mut seq = FrozenSequence::compact(reference_payload()).unwrap();
        let mut it = cursor(&mut seq, 0).unwrap();
        it.next().unwrap();
        assert_eq!(
            it.set("z".into()).unwrap_err().kind,
            ErrorKind::UnsupportedOperation
        );
        assert_eq!(
            it.add("z".into()).unwrap_err().kind,
            ErrorKind::UnsupportedOperation
        );
    }
}
