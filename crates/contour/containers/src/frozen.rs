//! Immutable containers.
//!
//! Every mutator refuses with `UnsupportedOperation`, including calls that
//! would leave the contents unchanged.

use crate::traits::{Map, Sequence, Set};
use contour_types::{ContainerError, ContainerResult, Element, ImplementationId};

/// Whether a frozen container admits `Element::Null`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NullPolicy {
    Permit,
    /// Null is refused at construction and as a query argument.
    Reject,
}

impl NullPolicy {
    fn check(&self, method: &str, element: &Element) -> ContainerResult<()> {
        match self {
            Self::Reject if element.is_null() => Err(ContainerError::null_element(method)),
            _ => Ok(()),
        }
    }

    fn check_all(&self, method: &str, elements: &[Element]) -> ContainerResult<()> {
        elements.iter().try_for_each(|e| self.check(method, e))
    }
}

/// How a frozen container names its implementation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IdentityRule {
    Fixed(&'static str),
    /// `Compact12` for one or two elements, `CompactN` otherwise.
    Compact,
}

impl IdentityRule {
    fn identity(&self, len: usize) -> ImplementationId {
        match self {
            Self::Fixed(name) => ImplementationId::new(*name),
            Self::Compact if (1..=2).contains(&len) => ImplementationId::new("Compact12"),
            Self::Compact => ImplementationId::new("CompactN"),
        }
    }
}

fn refuse<T>(method: &str) -> ContainerResult<T> {
    Err(ContainerError::unsupported(method))
}

/// Immutable sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrozenSequence {
    items: Vec<Element>,
    nulls: NullPolicy,
    identity: IdentityRule,
}

impl FrozenSequence {
    pub fn new(
        items: Vec<Element>,
        nulls: NullPolicy,
        identity: IdentityRule,
    ) -> ContainerResult<Self> {
        nulls.check_all("construction", &items)?;
        Ok(Self {
            items,
            nulls,
            identity,
        })
    }

    /// Null-hostile sequence with size-dependent identity.
    pub fn compact(items: Vec<Element>) -> ContainerResult<Self> {
        Self::new(items, NullPolicy::Reject, IdentityRule::Compact)
    }

    /// Empty sequence that tolerates null queries.
    pub fn empty(identity: IdentityRule) -> Self {
        Self {
            items: Vec::new(),
            nulls: NullPolicy::Permit,
            identity,
        }
    }
}

impl Sequence for FrozenSequence {
    fn implementation(&self) -> ImplementationId {
        self.identity.identity(self.items.len())
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn elements(&self) -> Vec<Element> {
        self.items.clone()
    }

    fn get(&self, index: usize) -> ContainerResult<Element> {
        self.items
            .get(index)
            .cloned()
            .ok_or_else(|| ContainerError::index_out_of_bounds(index, self.items.len()))
    }

    fn first(&self) -> ContainerResult<Element> {
        self.items
            .first()
            .cloned()
            .ok_or_else(|| ContainerError::no_such_element("first of an empty sequence"))
    }

    fn contains(&self, element: &Element) -> ContainerResult<bool> {
        self.nulls.check("contains", element)?;
        Ok(self.items.contains(element))
    }

    fn index_of(&self, element: &Element) -> ContainerResult<Option<usize>> {
        self.nulls.check("index_of", element)?;
        Ok(self.items.iter().position(|e| e == element))
    }

    fn last_index_of(&self, element: &Element) -> ContainerResult<Option<usize>> {
        self.nulls.check("last_index_of", element)?;
        Ok(self.items.iter().rposition(|e| e == element))
    }

    fn contains_all(&self, elements: &[Element]) -> ContainerResult<bool> {
        self.nulls.check_all("contains_all", elements)?;
        Ok(elements.iter().all(|e| self.items.contains(e)))
    }

    fn set(&mut self, _index: usize, _element: Element) -> ContainerResult<Element> {
        refuse("set")
    }

    fn push(&mut self, _element: Element) -> ContainerResult<()> {
        refuse("push")
    }

    fn insert(&mut self, _index: usize, _element: Element) -> ContainerResult<()> {
        refuse("insert")
    }

    fn remove_at(&mut self, _index: usize) -> ContainerResult<Element> {
        refuse("remove_at")
    }

    fn remove(&mut self, _element: &Element) -> ContainerResult<bool> {
        refuse("remove")
    }

    fn remove_last(&mut self) -> ContainerResult<Element> {
        refuse("remove_last")
    }

    fn extend_from(&mut self, _elements: &[Element]) -> ContainerResult<bool> {
        refuse("extend_from")
    }

    fn remove_all(&mut self, _elements: &[Element]) -> ContainerResult<bool> {
        refuse("remove_all")
    }

    fn retain_all(&mut self, _elements: &[Element]) -> ContainerResult<bool> {
        refuse("retain_all")
    }

    fn remove_if(&mut self, _predicate: &dyn Fn(&Element) -> bool) -> ContainerResult<bool> {
        refuse("remove_if")
    }

    fn replace_all(&mut self, _operator: &dyn Fn(&Element) -> Element) -> ContainerResult<()> {
        refuse("replace_all")
    }

    fn sort(&mut self) -> ContainerResult<()> {
        refuse("sort")
    }

    fn clear(&mut self) -> ContainerResult<()> {
        refuse("clear")
    }
}

/// Immutable set preserving construction order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrozenSet {
    items: Vec<Element>,
    nulls: NullPolicy,
    identity: IdentityRule,
}

impl FrozenSet {
    /// Fails on duplicate members.
    pub fn new(
        items: Vec<Element>,
        nulls: NullPolicy,
        identity: IdentityRule,
    ) -> ContainerResult<Self> {
        nulls.check_all("construction", &items)?;
        for (i, item) in items.iter().enumerate() {
            if items[..i].contains(item) {
                return Err(ContainerError::illegal_argument(format!(
                    "duplicate member {}",
                    item
                )));
            }
        }
        Ok(Self {
            items,
            nulls,
            identity,
        })
    }

    pub fn compact(items: Vec<Element>) -> ContainerResult<Self> {
        Self::new(items, NullPolicy::Reject, IdentityRule::Compact)
    }

    pub fn empty(identity: IdentityRule) -> Self {
        Self {
            items: Vec::new(),
            nulls: NullPolicy::Permit,
            identity,
        }
    }
}

impl Set for FrozenSet {
    fn implementation(&self) -> ImplementationId {
        self.identity.identity(self.items.len())
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn elements(&self) -> Vec<Element> {
        self.items.clone()
    }

    fn contains(&self, element: &Element) -> ContainerResult<bool> {
        self.nulls.check("contains", element)?;
        Ok(self.items.contains(element))
    }

    fn contains_all(&self, elements: &[Element]) -> ContainerResult<bool> {
        self.nulls.check_all("contains_all", elements)?;
        Ok(elements.iter().all(|e| self.items.contains(e)))
    }

    fn insert(&mut self, _element: Element) -> ContainerResult<bool> {
        refuse("insert")
    }

    fn remove(&mut self, _element: &Element) -> ContainerResult<bool> {
        refuse("remove")
    }

    fn extend_from(&mut self, _elements: &[Element]) -> ContainerResult<bool> {
        refuse("extend_from")
    }

    fn remove_all(&mut self, _elements: &[Element]) -> ContainerResult<bool> {
        refuse("remove_all")
    }

    fn retain_all(&mut self, _elements: &[Element]) -> ContainerResult<bool> {
        refuse("retain_all")
    }

    fn remove_if(&mut self, _predicate: &dyn Fn(&Element) -> bool) -> ContainerResult<bool> {
        refuse("remove_if")
    }

    fn clear(&mut self) -> ContainerResult<()> {
        refuse("clear")
    }
}

/// Immutable map preserving construction order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrozenMap {
    entries: Vec<(Element, Element)>,
    nulls: NullPolicy,
    identity: IdentityRule,
}

impl FrozenMap {
    /// Fails on duplicate keys. Null checks cover keys and values.
    pub fn new(
        entries: Vec<(Element, Element)>,
        nulls: NullPolicy,
        identity: IdentityRule,
    ) -> ContainerResult<Self> {
        for (i, (key, value)) in entries.iter().enumerate() {
            nulls.check("construction", key)?;
            nulls.check("construction", value)?;
            if entries[..i].iter().any(|(k, _)| k == key) {
                return Err(ContainerError::illegal_argument(format!(
                    "duplicate key {}",
                    key
                )));
            }
        }
        Ok(Self {
            entries,
            nulls,
            identity,
        })
    }

    /// Keys paired with [`Element::paired_value`].
    pub fn from_keys(
        keys: &[Element],
        nulls: NullPolicy,
        identity: IdentityRule,
    ) -> ContainerResult<Self> {
        Self::new(
            keys.iter().map(|k| (k.clone(), k.paired_value())).collect(),
            nulls,
            identity,
        )
    }

    pub fn empty(identity: IdentityRule) -> Self {
        Self {
            entries: Vec::new(),
            nulls: NullPolicy::Permit,
            identity,
        }
    }

    fn lookup(&self, key: &Element) -> Option<&Element> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }
}

impl Map for FrozenMap {
    fn implementation(&self) -> ImplementationId {
        self.identity.identity(self.entries.len())
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn entries(&self) -> Vec<(Element, Element)> {
        self.entries.clone()
    }

    fn get(&self, key: &Element) -> ContainerResult<Option<Element>> {
        self.nulls.check("get", key)?;
        Ok(self.lookup(key).cloned())
    }

    fn get_or_default(&self, key: &Element, default: &Element) -> ContainerResult<Element> {
        self.nulls.check("get_or_default", key)?;
        Ok(self.lookup(key).cloned().unwrap_or_else(|| default.clone()))
    }

    fn contains_key(&self, key: &Element) -> ContainerResult<bool> {
        self.nulls.check("contains_key", key)?;
        Ok(self.lookup(key).is_some())
    }

    fn contains_value(&self, value: &Element) -> ContainerResult<bool> {
        self.nulls.check("contains_value", value)?;
        Ok(self.entries.iter().any(|(_, v)| v == value))
    }

    fn insert(&mut self, _key: Element, _value: Element) -> ContainerResult<Option<Element>> {
        refuse("insert")
    }

    fn insert_if_absent(
        &mut self,
        _key: Element,
        _value: Element,
    ) -> ContainerResult<Option<Element>> {
        refuse("insert_if_absent")
    }

    fn remove(&mut self, _key: &Element) -> ContainerResult<Option<Element>> {
        refuse("remove")
    }

    fn remove_entry(&mut self, _key: &Element, _value: &Element) -> ContainerResult<bool> {
        refuse("remove_entry")
    }

    fn replace(&mut self, _key: Element, _value: Element) -> ContainerResult<Option<Element>> {
        refuse("replace")
    }

    fn replace_all(
        &mut self,
        _operator: &dyn Fn(&Element, &Element) -> Element,
    ) -> ContainerResult<()> {
        refuse("replace_all")
    }

    fn extend_from(&mut self, _entries: &[(Element, Element)]) -> ContainerResult<()> {
        refuse("extend_from")
    }

    fn clear(&mut self) -> ContainerResult<()> {
        refuse("clear")
    }
}
