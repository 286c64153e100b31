//! Permissive, mutable reference implementations.
//!
//! These accept nulls and every mutation. The probe engine copies each
//! reference sample into one of them to calibrate what an operation does.

use crate::traits::{Map, Sequence, Set};
use contour_types::{ContainerError, ContainerResult, Element, ImplementationId};
use std::collections::{BTreeMap, BTreeSet};

/// Growable sequence backed by a `Vec`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReferenceSequence {
    items: Vec<Element>,
    linked: bool,
}

impl ReferenceSequence {
    pub fn new(items: Vec<Element>) -> Self {
        Self {
            items,
            linked: false,
        }
    }

    /// Same semantics, but reports sequential rather than random access.
    pub fn linked(items: Vec<Element>) -> Self {
        Self {
            items,
            linked: true,
        }
    }

    fn check_index(&self, index: usize) -> ContainerResult<()> {
        if index < self.items.len() {
            Ok(())
        } else {
            Err(ContainerError::index_out_of_bounds(index, self.items.len()))
        }
    }
}

impl Sequence for ReferenceSequence {
    fn implementation(&self) -> ImplementationId {
        if self.linked {
            ImplementationId::new("LinkedSequence")
        } else {
            ImplementationId::new("ReferenceSequence")
        }
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn elements(&self) -> Vec<Element> {
        self.items.clone()
    }

    fn random_access(&self) -> bool {
        !self.linked
    }

    fn get(&self, index: usize) -> ContainerResult<Element> {
        self.check_index(index)?;
        Ok(self.items[index].clone())
    }

    fn first(&self) -> ContainerResult<Element> {
        self.items
            .first()
            .cloned()
            .ok_or_else(|| ContainerError::no_such_element("first of an empty sequence"))
    }

    fn contains(&self, element: &Element) -> ContainerResult<bool> {
        Ok(self.items.contains(element))
    }

    fn index_of(&self, element: &Element) -> ContainerResult<Option<usize>> {
        Ok(self.items.iter().position(|e| e == element))
    }

    fn last_index_of(&self, element: &Element) -> ContainerResult<Option<usize>> {
        Ok(self.items.iter().rposition(|e| e == element))
    }

    fn contains_all(&self, elements: &[Element]) -> ContainerResult<bool> {
        Ok(elements.iter().all(|e| self.items.contains(e)))
    }

    fn set(&mut self, index: usize, element: Element) -> ContainerResult<Element> {
        self.check_index(index)?;
        Ok(std::mem::replace(&mut self.items[index], element))
    }

    fn push(&mut self, element: Element) -> ContainerResult<()> {
        self.items.push(element);
        Ok(())
    }

    fn insert(&mut self, index: usize, element: Element) -> ContainerResult<()> {
        if index > self.items.len() {
            return Err(ContainerError::index_out_of_bounds(index, self.items.len()));
        }
        self.items.insert(index, element);
        Ok(())
    }

    fn remove_at(&mut self, index: usize) -> ContainerResult<Element> {
        self.check_index(index)?;
        Ok(self.items.remove(index))
    }

    fn remove(&mut self, element: &Element) -> ContainerResult<bool> {
        match self.items.iter().position(|e| e == element) {
            Some(index) => {
                self.items.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn remove_last(&mut self) -> ContainerResult<Element> {
        self.items
            .pop()
            .ok_or_else(|| ContainerError::no_such_element("last of an empty sequence"))
    }

    fn extend_from(&mut self, elements: &[Element]) -> ContainerResult<bool> {
        self.items.extend_from_slice(elements);
        Ok(!elements.is_empty())
    }

    fn remove_all(&mut self, elements: &[Element]) -> ContainerResult<bool> {
        let before = self.items.len();
        self.items.retain(|e| !elements.contains(e));
        Ok(self.items.len() != before)
    }

    fn retain_all(&mut self, elements: &[Element]) -> ContainerResult<bool> {
        let before = self.items.len();
        self.items.retain(|e| elements.contains(e));
        Ok(self.items.len() != before)
    }

    fn remove_if(&mut self, predicate: &dyn Fn(&Element) -> bool) -> ContainerResult<bool> {
        let before = self.items.len();
        self.items.retain(|e| !predicate(e));
        Ok(self.items.len() != before)
    }

    fn replace_all(&mut self, operator: &dyn Fn(&Element) -> Element) -> ContainerResult<()> {
        for item in self.items.iter_mut() {
            *item = operator(item);
        }
        Ok(())
    }

    fn sort(&mut self) -> ContainerResult<()> {
        self.items.sort();
        Ok(())
    }

    fn clear(&mut self) -> ContainerResult<()> {
        self.items.clear();
        Ok(())
    }
}

/// Ordered set backed by a `BTreeSet`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReferenceSet {
    items: BTreeSet<Element>,
}

impl ReferenceSet {
    pub fn new(items: impl IntoIterator<Item = Element>) -> Self {
        Self {
            items: items.into_iter().collect(),
        }
    }
}

impl Set for ReferenceSet {
    fn implementation(&self) -> ImplementationId {
        ImplementationId::new("ReferenceSet")
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn elements(&self) -> Vec<Element> {
        self.items.iter().cloned().collect()
    }

    fn contains(&self, element: &Element) -> ContainerResult<bool> {
        Ok(self.items.contains(element))
    }

    fn contains_all(&self, elements: &[Element]) -> ContainerResult<bool> {
        Ok(elements.iter().all(|e| self.items.contains(e)))
    }

    fn insert(&mut self, element: Element) -> ContainerResult<bool> {
        Ok(self.items.insert(element))
    }

    fn remove(&mut self, element: &Element) -> ContainerResult<bool> {
        Ok(self.items.remove(element))
    }

    fn extend_from(&mut self, elements: &[Element]) -> ContainerResult<bool> {
        let before = self.items.len();
        self.items.extend(elements.iter().cloned());
        Ok(self.items.len() != before)
    }

    fn remove_all(&mut self, elements: &[Element]) -> ContainerResult<bool> {
        let before = self.items.len();
        self.items.retain(|e| !elements.contains(e));
        Ok(self.items.len() != before)
    }

    fn retain_all(&mut self, elements: &[Element]) -> ContainerResult<bool> {
        let before = self.items.len();
        self.items.retain(|e| elements.contains(e));
        Ok(self.items.len() != before)
    }

    fn remove_if(&mut self, predicate: &dyn Fn(&Element) -> bool) -> ContainerResult<bool> {
        let before = self.items.len();
        self.items.retain(|e| !predicate(e));
        Ok(self.items.len() != before)
    }

    fn clear(&mut self) -> ContainerResult<()> {
        self.items.clear();
        Ok(())
    }
}

/// Ordered map backed by a `BTreeMap`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReferenceMap {
    entries: BTreeMap<Element, Element>,
}

impl ReferenceMap {
    pub fn new(entries: impl IntoIterator<Item = (Element, Element)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Map whose values are [`Element::paired_value`] of each key.
    pub fn from_keys(keys: &[Element]) -> Self {
        Self::new(keys.iter().map(|k| (k.clone(), k.paired_value())))
    }
}

impl Map for ReferenceMap {
    fn implementation(&self) -> ImplementationId {
        ImplementationId::new("ReferenceMap")
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn entries(&self) -> Vec<(Element, Element)> {
        self.entries
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    fn get(&self, key: &Element) -> ContainerResult<Option<Element>> {
        Ok(self.entries.get(key).cloned())
    }

    fn get_or_default(&self, key: &Element, default: &Element) -> ContainerResult<Element> {
        Ok(self
            .entries
            .get(key)
            .cloned()
            .unwrap_or_else(|| default.clone()))
    }

    fn contains_key(&self, key: &Element) -> ContainerResult<bool> {
        Ok(self.entries.contains_key(key))
    }

    fn contains_value(&self, value: &Element) -> ContainerResult<bool> {
        Ok(self.entries.values().any(|v| v == value))
    }

    fn insert(&mut self, key: Element, value: Element) -> ContainerResult<Option<Element>> {
        Ok(self.entries.insert(key, value))
    }

    fn insert_if_absent(
        &mut self,
        key: Element,
        value: Element,
    ) -> ContainerResult<Option<Element>> {
        if let Some(existing) = self.entries.get(&key) {
            return Ok(Some(existing.clone()));
        }
        self.entries.insert(key, value);
        Ok(None)
    }

    fn remove(&mut self, key: &Element) -> ContainerResult<Option<Element>> {
        Ok(self.entries.remove(key))
    }

    fn remove_entry(&mut self, key: &Element, value: &Element) -> ContainerResult<bool> {
        if self.entries.get(key) == Some(value) {
            self.entries.remove(key);
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn replace(&mut self, key: Element, value: Element) -> ContainerResult<Option<Element>> {
        match self.entries.get_mut(&key) {
            Some(slot) => Ok(Some(std::mem::replace(slot, value))),
            None => Ok(None),
        }
    }

    fn replace_all(
        &mut self,
        operator: &dyn Fn(&Element, &Element) -> Element,
    ) -> ContainerResult<()> {
        for (key, value) in self.entries.iter_mut() {
            *value = operator(key, value);
        }
        Ok(())
    }

    fn extend_from(&mut self, entries: &[(Element, Element)]) -> ContainerResult<()> {
        self.entries.extend(entries.iter().cloned());
        Ok(())
    }

    fn clear(&mut self) -> ContainerResult<()> {
        self.entries.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contour_types::{reference_payload, ErrorKind};

    #[test]
    fn sequence_bounds() {
        let mut seq = ReferenceSequence::new(reference_payload());
        assert_eq!(seq.get(3).unwrap(), Element::from("d"));
        assert_eq!(seq.get(4).unwrap_err().kind, ErrorKind::IndexOutOfBounds);
        assert_eq!(
            seq.insert(5, "z".into()).unwrap_err().kind,
            ErrorKind::IndexOutOfBounds
        );
        seq.insert(4, "z".into()).unwrap();
        assert_eq!(seq.len(), 5);
    }

    #[test]
    fn empty_sequence_has_no_first() {
        let mut seq = ReferenceSequence::default();
        assert_eq!(seq.first().unwrap_err().kind, ErrorKind::NoSuchElement);
        assert_eq!(seq.remove_last().unwrap_err().kind, ErrorKind::NoSuchElement);
    }

    #[test]
    fn sequence_bulk_removals_report_change() {
        let mut seq = ReferenceSequence::new(reference_payload());
        assert!(!seq.remove_all(&["z".into()]).unwrap());
        assert!(seq.remove_all(&["a".into()]).unwrap());
        assert!(seq.retain_all(&["b".into(), "c".into()]).unwrap());
        assert_eq!(seq.elements(), vec![Element::from("b"), Element::from("c")]);
        assert!(seq.remove_if(&|e| e == &Element::from("b")).unwrap());
        assert_eq!(seq.len(), 1);
    }

    #[test]
    fn linked_sequence_is_not_random_access() {
        let seq = ReferenceSequence::linked(Vec::new());
        assert!(!seq.random_access());
        assert_eq!(seq.implementation().as_str(), "LinkedSequence");
    }

    #[test]
    fn set_accepts_null() {
        let mut set = ReferenceSet::new(reference_payload());
        assert!(set.insert(Element::Null).unwrap());
        assert!(!set.insert(Element::Null).unwrap());
        assert!(set.contains(&Element::Null).unwrap());
        assert_eq!(set.len(), 5);
    }

    #[test]
    fn map_put_semantics() {
        let mut map = ReferenceMap::from_keys(&reference_payload());
        assert_eq!(
            map.insert("a".into(), "X".into()).unwrap(),
            Some(Element::from("A"))
        );
        assert_eq!(
            map.insert_if_absent("a".into(), "Y".into()).unwrap(),
            Some(Element::from("X"))
        );
        assert_eq!(map.replace("z".into(), "Z".into()).unwrap(), None);
        assert!(!map.contains_key(&"z".into()).unwrap());
        assert!(map.remove_entry(&"b".into(), &"B".into()).unwrap());
        assert_eq!(map.len(), 3);
        assert_eq!(
            map.get_or_default(&Element::Null, &"fallback".into()).unwrap(),
            Element::from("fallback")
        );
    }
}
