//! Recording decorators.
//!
//! Each decorator implements one capability trait, records the call it
//! receives into an [`InvocationLog`] and forwards it unchanged. Errors
//! returned by the wrapped container pass through untouched.

use contour_containers::{Map, Sequence, SequenceCursor, Set, SharedContainer, ViewPolicy};
use contour_types::{
    render_elements, CapabilityKind, ContainerResult, Element, ImplementationId, Invocation,
};
use std::cell::RefCell;
use std::fmt::Display;

const PREDICATE: &str = "<predicate>";
const OPERATOR: &str = "<operator>";

/// Last call seen by a recording decorator.
#[derive(Debug, Default)]
pub struct InvocationLog {
    last: RefCell<Option<Invocation>>,
}

impl InvocationLog {
    /// Empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the last recorded call.
    pub fn record(&self, invocation: Invocation) {
        *self.last.borrow_mut() = Some(invocation);
    }

    /// Most recent call, if any.
    pub fn last(&self) -> Option<Invocation> {
        self.last.borrow().clone()
    }
}

/// One recorded parameter: type name and rendered value.
type Param = (&'static str, String);

fn arg(type_name: &'static str, value: impl Display) -> Param {
    (type_name, value.to_string())
}

fn elements(values: &[Element]) -> Param {
    ("&[Element]", render_elements(values))
}

fn entries(values: &[(Element, Element)]) -> Param {
    let parts: Vec<String> = values.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
    ("&[(Element, Element)]", format!("[{}]", parts.join(", ")))
}

fn record(log: &InvocationLog, capability: CapabilityKind, method: &str, params: Vec<Param>) {
    let (types, arguments): (Vec<String>, Vec<String>) = params
        .into_iter()
        .map(|(ty, value)| (ty.to_string(), value))
        .unzip();
    log.record(Invocation::new(capability, method, types, arguments));
}

/// Recording decorator for [`Sequence`].
pub struct RecordingSequence<'a> {
    inner: &'a mut dyn Sequence,
    log: &'a InvocationLog,
}

impl<'a> RecordingSequence<'a> {
    /// Records every call made on `inner` into `log`.
    pub fn new(inner: &'a mut dyn Sequence, log: &'a InvocationLog) -> Self {
        Self { inner, log }
    }

    fn record(&self, method: &str, params: Vec<Param>) {
        record(self.log, CapabilityKind::Sequence, method, params);
    }
}

impl Sequence for RecordingSequence<'_> {
    fn implementation(&self) -> ImplementationId {
        self.inner.implementation()
    }

    fn len(&self) -> usize {
        self.record("len", Vec::new());
        self.inner.len()
    }

    fn elements(&self) -> Vec<Element> {
        self.inner.elements()
    }

    fn random_access(&self) -> bool {
        self.inner.random_access()
    }

    fn depth(&self) -> usize {
        self.inner.depth()
    }

    fn view_source(&self, policy: ViewPolicy) -> Option<SharedContainer> {
        self.inner.view_source(policy)
    }

    fn get(&self, index: usize) -> ContainerResult<Element> {
        self.record("get", vec![arg("usize", index)]);
        self.inner.get(index)
    }

    fn first(&self) -> ContainerResult<Element> {
        self.record("first", Vec::new());
        self.inner.first()
    }

    fn contains(&self, element: &Element) -> ContainerResult<bool> {
        self.record("contains", vec![arg("&Element", element)]);
        self.inner.contains(element)
    }

    fn index_of(&self, element: &Element) -> ContainerResult<Option<usize>> {
        self.record("index_of", vec![arg("&Element", element)]);
        self.inner.index_of(element)
    }

    fn last_index_of(&self, element: &Element) -> ContainerResult<Option<usize>> {
        self.record("last_index_of", vec![arg("&Element", element)]);
        self.inner.last_index_of(element)
    }

    fn contains_all(&self, values: &[Element]) -> ContainerResult<bool> {
        self.record("contains_all", vec![elements(values)]);
        self.inner.contains_all(values)
    }

    fn set(&mut self, index: usize, element: Element) -> ContainerResult<Element> {
        self.record("set", vec![arg("usize", index), arg("Element", &element)]);
        self.inner.set(index, element)
    }

    fn push(&mut self, element: Element) -> ContainerResult<()> {
        self.record("push", vec![arg("Element", &element)]);
        self.inner.push(element)
    }

    fn insert(&mut self, index: usize, element: Element) -> ContainerResult<()> {
        self.record("insert", vec![arg("usize", index), arg("Element", &element)]);
        self.inner.insert(index, element)
    }

    fn remove_at(&mut self, index: usize) -> ContainerResult<Element> {
        self.record("remove_at", vec![arg("usize", index)]);
        self.inner.remove_at(index)
    }

    fn remove(&mut self, element: &Element) -> ContainerResult<bool> {
        self.record("remove", vec![arg("&Element", element)]);
        self.inner.remove(element)
    }

    fn remove_last(&mut self) -> ContainerResult<Element> {
        self.record("remove_last", Vec::new());
        self.inner.remove_last()
    }

    fn extend_from(&mut self, values: &[Element]) -> ContainerResult<bool> {
        self.record("extend_from", vec![elements(values)]);
        self.inner.extend_from(values)
    }

    fn remove_all(&mut self, values: &[Element]) -> ContainerResult<bool> {
        self.record("remove_all", vec![elements(values)]);
        self.inner.remove_all(values)
    }

    fn retain_all(&mut self, values: &[Element]) -> ContainerResult<bool> {
        self.record("retain_all", vec![elements(values)]);
        self.inner.retain_all(values)
    }

    fn remove_if(&mut self, predicate: &dyn Fn(&Element) -> bool) -> ContainerResult<bool> {
        self.record("remove_if", vec![arg("&dyn Fn(&Element) -> bool", PREDICATE)]);
        self.inner.remove_if(predicate)
    }

    fn replace_all(&mut self, operator: &dyn Fn(&Element) -> Element) -> ContainerResult<()> {
        self.record(
            "replace_all",
            vec![arg("&dyn Fn(&Element) -> Element", OPERATOR)],
        );
        self.inner.replace_all(operator)
    }

    fn sort(&mut self) -> ContainerResult<()> {
        self.record("sort", Vec::new());
        self.inner.sort()
    }

    fn clear(&mut self) -> ContainerResult<()> {
        self.record("clear", Vec::new());
        self.inner.clear()
    }
}

/// Recording decorator for [`SequenceCursor`].
pub struct RecordingCursor<'a> {
    inner: &'a mut dyn SequenceCursor,
    log: &'a InvocationLog,
}

impl<'a> RecordingCursor<'a> {
    /// Records every call made on `inner` into `log`.
    pub fn new(inner: &'a mut dyn SequenceCursor, log: &'a InvocationLog) -> Self {
        Self { inner, log }
    }

    fn record(&self, method: &str, params: Vec<Param>) {
        record(self.log, CapabilityKind::SequenceIterator, method, params);
    }
}

impl SequenceCursor for RecordingCursor<'_> {
    fn has_next(&self) -> bool {
        self.record("has_next", Vec::new());
        self.inner.has_next()
    }

    fn next(&mut self) -> ContainerResult<Element> {
        self.record("next", Vec::new());
        self.inner.next()
    }

    fn has_previous(&self) -> bool {
        self.record("has_previous", Vec::new());
        self.inner.has_previous()
    }

    fn previous(&mut self) -> ContainerResult<Element> {
        self.record("previous", Vec::new());
        self.inner.previous()
    }

    fn next_index(&self) -> usize {
        self.record("next_index", Vec::new());
        self.inner.next_index()
    }

    fn remove(&mut self) -> ContainerResult<()> {
        self.record("remove", Vec::new());
        self.inner.remove()
    }

    fn set(&mut self, element: Element) -> ContainerResult<()> {
        self.record("set", vec![arg("Element", &element)]);
        self.inner.set(element)
    }

    fn add(&mut self, element: Element) -> ContainerResult<()> {
        self.record("add", vec![arg("Element", &element)]);
        self.inner.add(element)
    }
}

/// Recording decorator for [`Set`].
pub struct RecordingSet<'a> {
    inner: &'a mut dyn Set,
    log: &'a InvocationLog,
}

impl<'a> RecordingSet<'a> {
    /// Records every call made on `inner` into `log`.
    pub fn new(inner: &'a mut dyn Set, log: &'a InvocationLog) -> Self {
        Self { inner, log }
    }

    fn record(&self, method: &str, params: Vec<Param>) {
        record(self.log, CapabilityKind::Set, method, params);
    }
}

impl Set for RecordingSet<'_> {
    fn implementation(&self) -> ImplementationId {
        self.inner.implementation()
    }

    fn len(&self) -> usize {
        self.record("len", Vec::new());
        self.inner.len()
    }

    fn elements(&self) -> Vec<Element> {
        self.inner.elements()
    }

    fn depth(&self) -> usize {
        self.inner.depth()
    }

    fn view_source(&self, policy: ViewPolicy) -> Option<SharedContainer> {
        self.inner.view_source(policy)
    }

    fn contains(&self, element: &Element) -> ContainerResult<bool> {
        self.record("contains", vec![arg("&Element", element)]);
        self.inner.contains(element)
    }

    fn contains_all(&self, values: &[Element]) -> ContainerResult<bool> {
        self.record("contains_all", vec![elements(values)]);
        self.inner.contains_all(values)
    }

    fn insert(&mut self, element: Element) -> ContainerResult<bool> {
        self.record("insert", vec![arg("Element", &element)]);
        self.inner.insert(element)
    }

    fn remove(&mut self, element: &Element) -> ContainerResult<bool> {
        self.record("remove", vec![arg("&Element", element)]);
        self.inner.remove(element)
    }

    fn extend_from(&mut self, values: &[Element]) -> ContainerResult<bool> {
        self.record("extend_from", vec![elements(values)]);
        self.inner.extend_from(values)
    }

    fn remove_all(&mut self, values: &[Element]) -> ContainerResult<bool> {
        self.record("remove_all", vec![elements(values)]);
        self.inner.remove_all(values)
    }

    fn retain_all(&mut self, values: &[Element]) -> ContainerResult<bool> {
        self.record("retain_all", vec![elements(values)]);
        self.inner.retain_all(values)
    }

    fn remove_if(&mut self, predicate: &dyn Fn(&Element) -> bool) -> ContainerResult<bool> {
        self.record("remove_if", vec![arg("&dyn Fn(&Element) -> bool", PREDICATE)]);
        self.inner.remove_if(predicate)
    }

    fn clear(&mut self) -> ContainerResult<()> {
        self.record("clear", Vec::new());
        self.inner.clear()
    }
}

/// Recording decorator for [`Map`].
pub struct RecordingMap<'a> {
    inner: &'a mut dyn Map,
    log: &'a InvocationLog,
}

impl<'a> RecordingMap<'a> {
    /// Records every call made on `inner` into `log`.
    pub fn new(inner: &'a mut dyn Map, log: &'a InvocationLog) -> Self {
        Self { inner, log }
    }

    fn record(&self, method: &str, params: Vec<Param>) {
        record(self.log, CapabilityKind::Map, method, params);
    }
}

impl Map for RecordingMap<'_> {
    fn implementation(&self) -> ImplementationId {
        self.inner.implementation()
    }

    fn len(&self) -> usize {
        self.record("len", Vec::new());
        self.inner.len()
    }

    fn entries(&self) -> Vec<(Element, Element)> {
        self.inner.entries()
    }

    fn depth(&self) -> usize {
        self.inner.depth()
    }

    fn view_source(&self, policy: ViewPolicy) -> Option<SharedContainer> {
        self.inner.view_source(policy)
    }

    fn get(&self, key: &Element) -> ContainerResult<Option<Element>> {
        self.record("get", vec![arg("&Element", key)]);
        self.inner.get(key)
    }

    fn get_or_default(&self, key: &Element, default: &Element) -> ContainerResult<Element> {
        self.record(
            "get_or_default",
            vec![arg("&Element", key), arg("&Element", default)],
        );
        self.inner.get_or_default(key, default)
    }

    fn contains_key(&self, key: &Element) -> ContainerResult<bool> {
        self.record("contains_key", vec![arg("&Element", key)]);
        self.inner.contains_key(key)
    }

    fn contains_value(&self, value: &Element) -> ContainerResult<bool> {
        self.record("contains_value", vec![arg("&Element", value)]);
        self.inner.contains_value(value)
    }

    fn insert(&mut self, key: Element, value: Element) -> ContainerResult<Option<Element>> {
        self.record("insert", vec![arg("Element", &key), arg("Element", &value)]);
        self.inner.insert(key, value)
    }

    fn insert_if_absent(
        &mut self,
        key: Element,
        value: Element,
    ) -> ContainerResult<Option<Element>> {
        self.record(
            "insert_if_absent",
            vec![arg("Element", &key), arg("Element", &value)],
        );
        self.inner.insert_if_absent(key, value)
    }

    fn remove(&mut self, key: &Element) -> ContainerResult<Option<Element>> {
        self.record("remove", vec![arg("&Element", key)]);
        self.inner.remove(key)
    }

    fn remove_entry(&mut self, key: &Element, value: &Element) -> ContainerResult<bool> {
        self.record(
            "remove_entry",
            vec![arg("&Element", key), arg("&Element", value)],
        );
        self.inner.remove_entry(key, value)
    }

    fn replace(&mut self, key: Element, value: Element) -> ContainerResult<Option<Element>> {
        self.record("replace", vec![arg("Element", &key), arg("Element", &value)]);
        self.inner.replace(key, value)
    }

    fn replace_all(
        &mut self,
        operator: &dyn Fn(&Element, &Element) -> Element,
    ) -> ContainerResult<()> {
        self.record(
            "replace_all",
            vec![arg("&dyn Fn(&Element, &Element) -> Element", OPERATOR)],
        );
        self.inner.replace_all(operator)
    }

    fn extend_from(&mut self, values: &[(Element, Element)]) -> ContainerResult<()> {
        self.record("extend_from", vec![entries(values)]);
        self.inner.extend_from(values)
    }

    fn clear(&mut self) -> ContainerResult<()> {
        self.record("clear", Vec::new());
        self.inner.clear()
    }
}
