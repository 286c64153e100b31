//! Capability traits.
//!
//! Every container under test is reached only through one of these
//! object-safe surfaces. Refusals are returned as [`ContainerError`] values
//! so that the probe engine can record them as data.
//!
//! [`ContainerError`]: contour_types::ContainerError

use crate::container::SharedContainer;
use crate::view::ViewPolicy;
use contour_types::{ContainerResult, Element, ImplementationId};

/// Ordered, index-addressable container.
pub trait Sequence {
    fn implementation(&self) -> ImplementationId;
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    fn elements(&self) -> Vec<Element>;
    /// Whether positional access is constant time.
    fn random_access(&self) -> bool {
        true
    }
    /// Number of view layers between this container and its storage.
    fn depth(&self) -> usize {
        0
    }
    /// Source shared by this container when it is a view with `policy`.
    fn view_source(&self, _policy: ViewPolicy) -> Option<SharedContainer> {
        None
    }

    fn get(&self, index: usize) -> ContainerResult<Element>;
    fn first(&self) -> ContainerResult<Element>;
    fn contains(&self, element: &Element) -> ContainerResult<bool>;
    fn index_of(&self, element: &Element) -> ContainerResult<Option<usize>>;
    fn last_index_of(&self, element: &Element) -> ContainerResult<Option<usize>>;
    fn contains_all(&self, elements: &[Element]) -> ContainerResult<bool>;

    fn set(&mut self, index: usize, element: Element) -> ContainerResult<Element>;
    fn push(&mut self, element: Element) -> ContainerResult<()>;
    fn insert(&mut self, index: usize, element: Element) -> ContainerResult<()>;
    fn remove_at(&mut self, index: usize) -> ContainerResult<Element>;
    fn remove(&mut self, element: &Element) -> ContainerResult<bool>;
    fn remove_last(&mut self) -> ContainerResult<Element>;
    fn extend_from(&mut self, elements: &[Element]) -> ContainerResult<bool>;
    fn remove_all(&mut self, elements: &[Element]) -> ContainerResult<bool>;
    fn retain_all(&mut self, elements: &[Element]) -> ContainerResult<bool>;
    fn remove_if(&mut self, predicate: &dyn Fn(&Element) -> bool) -> ContainerResult<bool>;
    fn replace_all(&mut self, operator: &dyn Fn(&Element) -> Element) -> ContainerResult<()>;
    fn sort(&mut self) -> ContainerResult<()>;
    fn clear(&mut self) -> ContainerResult<()>;
}

/// Bidirectional cursor over a sequence.
pub trait SequenceCursor {
    fn has_next(&self) -> bool;
    fn next(&mut self) -> ContainerResult<Element>;
    fn has_previous(&self) -> bool;
    fn previous(&mut self) -> ContainerResult<Element>;
    fn next_index(&self) -> usize;
    /// Removes the element last returned by `next` or `previous`.
    fn remove(&mut self) -> ContainerResult<()>;
    /// Replaces the element last returned by `next` or `previous`.
    fn set(&mut self, element: Element) -> ContainerResult<()>;
    /// Inserts before the element `next` would return.
    fn add(&mut self, element: Element) -> ContainerResult<()>;
}

/// Container of distinct members.
pub trait Set {
    fn implementation(&self) -> ImplementationId;
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    fn elements(&self) -> Vec<Element>;
    fn depth(&self) -> usize {
        0
    }
    fn view_source(&self, _policy: ViewPolicy) -> Option<SharedContainer> {
        None
    }

    fn contains(&self, element: &Element) -> ContainerResult<bool>;
    fn contains_all(&self, elements: &[Element]) -> ContainerResult<bool>;

    fn insert(&mut self, element: Element) -> ContainerResult<bool>;
    fn remove(&mut self, element: &Element) -> ContainerResult<bool>;
    fn extend_from(&mut self, elements: &[Element]) -> ContainerResult<bool>;
    fn remove_all(&mut self, elements: &[Element]) -> ContainerResult<bool>;
    fn retain_all(&mut self, elements: &[Element]) -> ContainerResult<bool>;
    fn remove_if(&mut self, predicate: &dyn Fn(&Element) -> bool) -> ContainerResult<bool>;
    fn clear(&mut self) -> ContainerResult<()>;
}

/// Key-value container.
pub trait Map {
    fn implementation(&self) -> ImplementationId;
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    fn entries(&self) -> Vec<(Element, Element)>;
    fn depth(&self) -> usize {
        0
    }
    fn view_source(&self, _policy: ViewPolicy) -> Option<SharedContainer> {
        None
    }

    fn get(&self, key: &Element) -> ContainerResult<Option<Element>>;
    fn get_or_default(&self, key: &Element, default: &Element) -> ContainerResult<Element>;
    fn contains_key(&self, key: &Element) -> ContainerResult<bool>;
    fn contains_value(&self, value: &Element) -> ContainerResult<bool>;

    fn insert(&mut self, key: Element, value: Element) -> ContainerResult<Option<Element>>;
    fn insert_if_absent(&mut self, key: Element, value: Element)
        -> ContainerResult<Option<Element>>;
    fn remove(&mut self, key: &Element) -> ContainerResult<Option<Element>>;
    fn remove_entry(&mut self, key: &Element, value: &Element) -> ContainerResult<bool>;
    fn replace(&mut self, key: Element, value: Element) -> ContainerResult<Option<Element>>;
    fn replace_all(
        &mut self,
        operator: &dyn Fn(&Element, &Element) -> Element,
    ) -> ContainerResult<()>;
    fn extend_from(&mut self, entries: &[(Element, Element)]) -> ContainerResult<()>;
    fn clear(&mut self) -> ContainerResult<()>;
}
