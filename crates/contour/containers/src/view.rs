//! Views over a shared source container.
//!
//! A view reads through to its source on every call, so mutations made to
//! the source are visible through the view. What the view lets through in
//! the other direction is governed by its [`ViewPolicy`].

use crate::container::SharedContainer;
use crate::traits::{Map, Sequence, Set};
use contour_types::{ContainerError, ContainerResult, Element, ImplementationId};

/// Which mutations a view forwards to its source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ViewPolicy {
    /// Every call is forwarded.
    Mutable,
    /// Entry edits are forwarded; anything that would change the size is
    /// refused. Bulk removals refuse only when they would remove something.
    FixedSize,
    /// Every mutator is refused.
    ReadOnly,
}

impl ViewPolicy {
    fn allow_edit(&self, method: &str) -> ContainerResult<()> {
        match self {
            Self::ReadOnly => Err(ContainerError::unsupported(method)),
            _ => Ok(()),
        }
    }

    fn allow_resize(&self, method: &str) -> ContainerResult<()> {
        match self {
            Self::Mutable => Ok(()),
            _ => Err(ContainerError::unsupported(method)),
        }
    }

    /// `would_change` is evaluated only for fixed-size views.
    fn allow_if_unchanged(
        &self,
        method: &str,
        would_change: impl FnOnce() -> ContainerResult<bool>,
    ) -> ContainerResult<()> {
        match self {
            Self::Mutable => Ok(()),
            Self::ReadOnly => Err(ContainerError::unsupported(method)),
            Self::FixedSize if would_change()? => Err(ContainerError::unsupported(method)),
            Self::FixedSize => Ok(()),
        }
    }
}

fn detached(capability: &str) -> ContainerError {
    ContainerError::illegal_state(format!("view source is no longer a {}", capability))
}

/// Read-only views never stack: viewing one read-only again shares its
/// source instead of adding a layer.
fn flatten(source: SharedContainer, policy: ViewPolicy) -> SharedContainer {
    if policy != ViewPolicy::ReadOnly {
        return source;
    }
    let inner = source.borrow().view_source(policy);
    inner.unwrap_or(source)
}

/// Sequence view.
pub struct SequenceView {
    source: SharedContainer,
    policy: ViewPolicy,
    identity: ImplementationId,
}

impl SequenceView {
    pub fn new(source: SharedContainer, policy: ViewPolicy) -> ContainerResult<Self> {
        let source = flatten(source, policy);
        let identity = {
            let inner = source.borrow();
            let sequence = inner.as_sequence().ok_or_else(|| {
                ContainerError::illegal_argument(format!(
                    "cannot view a {} as a sequence",
                    inner.capability()
                ))
            })?;
            let name = match (policy, sequence.random_access()) {
                (ViewPolicy::Mutable, _) => "SequenceView",
                (ViewPolicy::FixedSize, _) => "FixedSizeSequenceView",
                (ViewPolicy::ReadOnly, true) => "ReadOnlyRandomAccessView",
                (ViewPolicy::ReadOnly, false) => "ReadOnlySequenceView",
            };
            ImplementationId::new(name)
        };
        Ok(Self {
            source,
            policy,
            identity,
        })
    }

    fn read<R>(&self, f: impl FnOnce(&dyn Sequence) -> ContainerResult<R>) -> ContainerResult<R> {
        let source = self.source.borrow();
        source.as_sequence().map_or_else(|| Err(detached("sequence")), f)
    }

    fn write<R>(
        &self,
        f: impl FnOnce(&mut dyn Sequence) -> ContainerResult<R>,
    ) -> ContainerResult<R> {
        let mut source = self.source.borrow_mut();
        source
            .as_sequence_mut()
            .map_or_else(|| Err(detached("sequence")), f)
    }

    fn current(&self) -> Vec<Element> {
        self.read(|s| Ok(s.elements())).unwrap_or_default()
    }
}

impl Sequence for SequenceView {
    fn implementation(&self) -> ImplementationId {
        self.identity.clone()
    }

    fn len(&self) -> usize {
        self.read(|s| Ok(s.len())).unwrap_or(0)
    }

    fn elements(&self) -> Vec<Element> {
        self.current()
    }

    fn random_access(&self) -> bool {
        self.read(|s| Ok(s.random_access())).unwrap_or(false)
    }

    fn depth(&self) -> usize {
        1 + self.source.borrow().depth()
    }

    fn view_source(&self, policy: ViewPolicy) -> Option<SharedContainer> {
        (policy == self.policy).then(|| self.source.clone())
    }

    fn get(&self, index: usize) -> ContainerResult<Element> {
        self.read(|s| s.get(index))
    }

    fn first(&self) -> ContainerResult<Element> {
        self.read(|s| s.first())
    }

    fn contains(&self, element: &Element) -> ContainerResult<bool> {
        self.read(|s| s.contains(element))
    }

    fn index_of(&self, element: &Element) -> ContainerResult<Option<usize>> {
        self.read(|s| s.index_of(element))
    }

    fn last_index_of(&self, element: &Element) -> ContainerResult<Option<usize>> {
        self.read(|s| s.last_index_of(element))
    }

    fn contains_all(&self, elements: &[Element]) -> ContainerResult<bool> {
        self.read(|s| s.contains_all(elements))
    }

    fn set(&mut self, index: usize, element: Element) -> ContainerResult<Element> {
        self.policy.allow_edit("set")?;
        self.write(|s| s.set(index, element))
    }

    fn push(&mut self, element: Element) -> ContainerResult<()> {
        self.policy.allow_resize("push")?;
        self.write(|s| s.push(element))
    }

    fn insert(&mut self, index: usize, element: Element) -> ContainerResult<()> {
        self.policy.allow_resize("insert")?;
        self.write(|s| s.insert(index, element))
    }

    fn remove_at(&mut self, index: usize) -> ContainerResult<Element> {
        self.policy.allow_resize("remove_at")?;
        self.write(|s| s.remove_at(index))
    }

    fn remove(&mut self, element: &Element) -> ContainerResult<bool> {
        self.policy
            .allow_if_unchanged("remove", || Ok(self.current().contains(element)))?;
        self.write(|s| s.remove(element))
    }

    fn remove_last(&mut self) -> ContainerResult<Element> {
        self.policy.allow_resize("remove_last")?;
        self.write(|s| s.remove_last())
    }

    fn extend_from(&mut self, elements: &[Element]) -> ContainerResult<bool> {
        self.policy.allow_resize("extend_from")?;
        self.write(|s| s.extend_from(elements))
    }

    fn remove_all(&mut self, elements: &[Element]) -> ContainerResult<bool> {
        self.policy.allow_if_unchanged("remove_all", || {
            Ok(self.current().iter().any(|e| elements.contains(e)))
        })?;
        self.write(|s| s.remove_all(elements))
    }

    fn retain_all(&mut self, elements: &[Element]) -> ContainerResult<bool> {
        self.policy.allow_if_unchanged("retain_all", || {
            Ok(self.current().iter().any(|e| !elements.contains(e)))
        })?;
        self.write(|s| s.retain_all(elements))
    }

    fn remove_if(&mut self, predicate: &dyn Fn(&Element) -> bool) -> ContainerResult<bool> {
        self.policy
            .allow_if_unchanged("remove_if", || Ok(self.current().iter().any(predicate)))?;
        self.write(|s| s.remove_if(predicate))
    }

    fn replace_all(&mut self, operator: &dyn Fn(&Element) -> Element) -> ContainerResult<()> {
        self.policy.allow_edit("replace_all")?;
        self.write(|s| s.replace_all(operator))
    }

    fn sort(&mut self) -> ContainerResult<()> {
        self.policy.allow_edit("sort")?;
        self.write(|s| s.sort())
    }

    fn clear(&mut self) -> ContainerResult<()> {
        self.policy
            .allow_if_unchanged("clear", || Ok(!self.current().is_empty()))?;
        self.write(|s| s.clear())
    }
}

/// Set view.
pub struct SetView {
    source: SharedContainer,
    policy: ViewPolicy,
}

impl SetView {
    pub fn new(source: SharedContainer, policy: ViewPolicy) -> ContainerResult<Self> {
        let source = flatten(source, policy);
        let capability = source.borrow().capability();
        if source.borrow().as_set().is_none() {
            return Err(ContainerError::illegal_argument(format!(
                "cannot view a {} as a set",
                capability
            )));
        }
        Ok(Self { source, policy })
    }

    fn read<R>(&self, f: impl FnOnce(&dyn Set) -> ContainerResult<R>) -> ContainerResult<R> {
        let source = self.source.borrow();
        source.as_set().map_or_else(|| Err(detached("set")), f)
    }

    fn write<R>(&self, f: impl FnOnce(&mut dyn Set) -> ContainerResult<R>) -> ContainerResult<R> {
        let mut source = self.source.borrow_mut();
        source.as_set_mut().map_or_else(|| Err(detached("set")), f)
    }

    fn current(&self) -> Vec<Element> {
        self.read(|s| Ok(s.elements())).unwrap_or_default()
    }
}

impl Set for SetView {
    fn implementation(&self) -> ImplementationId {
        match self.policy {
            ViewPolicy::Mutable => ImplementationId::new("SetView"),
            ViewPolicy::FixedSize => ImplementationId::new("FixedSizeSetView"),
            ViewPolicy::ReadOnly => ImplementationId::new("ReadOnlySetView"),
        }
    }

    fn len(&self) -> usize {
        self.read(|s| Ok(s.len())).unwrap_or(0)
    }

    fn elements(&self) -> Vec<Element> {
        self.current()
    }

    fn depth(&self) -> usize {
        1 + self.source.borrow().depth()
    }

    fn view_source(&self, policy: ViewPolicy) -> Option<SharedContainer> {
        (policy == self.policy).then(|| self.source.clone())
    }

    fn contains(&self, element: &Element) -> ContainerResult<bool> {
        self.read(|s| s.contains(element))
    }

    fn contains_all(&self, elements: &[Element]) -> ContainerResult<bool> {
        self.read(|s| s.contains_all(elements))
    }

    fn insert(&mut self, element: Element) -> ContainerResult<bool> {
        self.policy
            .allow_if_unchanged("insert", || Ok(!self.current().contains(&element)))?;
        self.write(|s| s.insert(element))
    }

    fn remove(&mut self, element: &Element) -> ContainerResult<bool> {
        self.policy
            .allow_if_unchanged("remove", || Ok(self.current().contains(element)))?;
        self.write(|s| s.remove(element))
    }

    fn extend_from(&mut self, elements: &[Element]) -> ContainerResult<bool> {
        self.policy.allow_if_unchanged("extend_from", || {
            let current = self.current();
            Ok(elements.iter().any(|e| !current.contains(e)))
        })?;
        self.write(|s| s.extend_from(elements))
    }

    fn remove_all(&mut self, elements: &[Element]) -> ContainerResult<bool> {
        self.policy.allow_if_unchanged("remove_all", || {
            Ok(self.current().iter().any(|e| elements.contains(e)))
        })?;
        self.write(|s| s.remove_all(elements))
    }

    fn retain_all(&mut self, elements: &[Element]) -> ContainerResult<bool> {
        self.policy.allow_if_unchanged("retain_all", || {
            Ok(self.current().iter().any(|e| !elements.contains(e)))
        })?;
        self.write(|s| s.retain_all(elements))
    }

    fn remove_if(&mut self, predicate: &dyn Fn(&Element) -> bool) -> ContainerResult<bool> {
        self.policy
            .allow_if_unchanged("remove_if", || Ok(self.current().iter().any(predicate)))?;
        self.write(|s| s.remove_if(predicate))
    }

    fn clear(&mut self) -> ContainerResult<()> {
        self.policy
            .allow_if_unchanged("clear", || Ok(!self.current().is_empty()))?;
        self.write(|s| s.clear())
    }
}

/// Map view.
pub struct MapView {
    source: SharedContainer,
    policy: ViewPolicy,
}

impl MapView {
    pub fn new(source: SharedContainer, policy: ViewPolicy) -> ContainerResult<Self> {
        let source = flatten(source, policy);
        let capability = source.borrow().capability();
        if source.borrow().as_map().is_none() {
            return Err(ContainerError::illegal_argument(format!(
                "cannot view a {} as a map",
                capability
            )));
        }
        Ok(Self { source, policy })
    }

    fn read<R>(&self, f: impl FnOnce(&dyn Map) -> ContainerResult<R>) -> ContainerResult<R> {
        let source = self.source.borrow();
        source.as_map().map_or_else(|| Err(detached("map")), f)
    }

    fn write<R>(&self, f: impl FnOnce(&mut dyn Map) -> ContainerResult<R>) -> ContainerResult<R> {
        let mut source = self.source.borrow_mut();
        source.as_map_mut().map_or_else(|| Err(detached("map")), f)
    }

    fn has_key(&self, key: &Element) -> bool {
        self.read(|m| Ok(m.entries().iter().any(|(k, _)| k == key)))
            .unwrap_or(false)
    }
}

impl Map for MapView {
    fn implementation(&self) -> ImplementationId {
        match self.policy {
            ViewPolicy::Mutable => ImplementationId::new("MapView"),
            ViewPolicy::FixedSize => ImplementationId::new("FixedSizeMapView"),
            ViewPolicy::ReadOnly => ImplementationId::new("ReadOnlyMapView"),
        }
    }

    fn len(&self) -> usize {
        self.read(|m| Ok(m.len())).unwrap_or(0)
    }

    fn entries(&self) -> Vec<(Element, Element)> {
        self.read(|m| Ok(m.entries())).unwrap_or_default()
    }

    fn depth(&self) -> usize {
        1 + self.source.borrow().depth()
    }

    fn view_source(&self, policy: ViewPolicy) -> Option<SharedContainer> {
        (policy == self.policy).then(|| self.source.clone())
    }

    fn get(&self, key: &Element) -> ContainerResult<Option<Element>> {
        self.read(|m| m.get(key))
    }

    fn get_or_default(&self, key: &Element, default: &Element) -> ContainerResult<Element> {
        self.read(|m| m.get_or_default(key, default))
    }

    fn contains_key(&self, key: &Element) -> ContainerResult<bool> {
        self.read(|m| m.contains_key(key))
    }

    fn contains_value(&self, value: &Element) -> ContainerResult<bool> {
        self.read(|m| m.contains_value(value))
    }

    fn insert(&mut self, key: Element, value: Element) -> ContainerResult<Option<Element>> {
        self.policy
            .allow_if_unchanged("insert", || Ok(!self.has_key(&key)))?;
        self.write(|m| m.insert(key, value))
    }

    fn insert_if_absent(
        &mut self,
        key: Element,
        value: Element,
    ) -> ContainerResult<Option<Element>> {
        self.policy
            .allow_if_unchanged("insert_if_absent", || Ok(!self.has_key(&key)))?;
        self.write(|m| m.insert_if_absent(key, value))
    }

    fn remove(&mut self, key: &Element) -> ContainerResult<Option<Element>> {
        self.policy
            .allow_if_unchanged("remove", || Ok(self.has_key(key)))?;
        self.write(|m| m.remove(key))
    }

    fn remove_entry(&mut self, key: &Element, value: &Element) -> ContainerResult<bool> {
        self.policy.allow_if_unchanged("remove_entry", || {
            Ok(self
                .entries()
                .iter()
                .any(|(k, v)| k == key && v == value))
        })?;
        self.write(|m| m.remove_entry(key, value))
    }

    fn replace(&mut self, key: Element, value: Element) -> ContainerResult<Option<Element>> {
        self.policy.allow_edit("replace")?;
        self.write(|m| m.replace(key, value))
    }

    fn replace_all(
        &mut self,
        operator: &dyn Fn(&Element, &Element) -> Element,
    ) -> ContainerResult<()> {
        self.policy.allow_edit("replace_all")?;
        self.write(|m| m.replace_all(operator))
    }

    fn extend_from(&mut self, entries: &[(Element, Element)]) -> ContainerResult<()> {
        self.policy.allow_if_unchanged("extend_from", || {
            Ok(entries.iter().any(|(k, _)| !self.has_key(k)))
        })?;
        self.write(|m| m.extend_from(entries))
    }

    fn clear(&mut self) -> ContainerResult<()> {
        self.policy
            .allow_if_unchanged("clear", || Ok(!self.entries().is_empty()))?;
        self.write(|m| m.clear())
    }
}
