//! The capability-tagged container union and its snapshots.

use crate::reference::{ReferenceMap, ReferenceSequence, ReferenceSet};
use crate::traits::{Map, Sequence, Set};
use crate::view::ViewPolicy;
use contour_types::{render_elements, CapabilityKind, Element, ImplementationId};
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::rc::Rc;

/// A container shared between a backing structure and the views over it.
pub type SharedContainer = Rc<RefCell<Container>>;

/// A container instance behind one capability surface.
pub enum Container {
    Sequence(Box<dyn Sequence>),
    Set(Box<dyn Set>),
    Map(Box<dyn Map>),
}

impl Container {
    pub fn sequence(sequence: impl Sequence + 'static) -> Self {
        Self::Sequence(Box::new(sequence))
    }

    pub fn set(set: impl Set + 'static) -> Self {
        Self::Set(Box::new(set))
    }

    pub fn map(map: impl Map + 'static) -> Self {
        Self::Map(Box::new(map))
    }

    pub fn shared(self) -> SharedContainer {
        Rc::new(RefCell::new(self))
    }

    pub fn capability(&self) -> CapabilityKind {
        match self {
            Self::Sequence(_) => CapabilityKind::Sequence,
            Self::Set(_) => CapabilityKind::Set,
            Self::Map(_) => CapabilityKind::Map,
        }
    }

    pub fn implementation(&self) -> ImplementationId {
        match self {
            Self::Sequence(s) => s.implementation(),
            Self::Set(s) => s.implementation(),
            Self::Map(m) => m.implementation(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Sequence(s) => s.len(),
            Self::Set(s) => s.len(),
            Self::Map(m) => m.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn depth(&self) -> usize {
        match self {
            Self::Sequence(s) => s.depth(),
            Self::Set(s) => s.depth(),
            Self::Map(m) => m.depth(),
        }
    }

    /// `None` for anything but sequences.
    pub fn random_access(&self) -> Option<bool> {
        match self {
            Self::Sequence(s) => Some(s.random_access()),
            _ => None,
        }
    }

    pub fn view_source(&self, policy: ViewPolicy) -> Option<SharedContainer> {
        match self {
            Self::Sequence(s) => s.view_source(policy),
            Self::Set(s) => s.view_source(policy),
            Self::Map(m) => m.view_source(policy),
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        match self {
            Self::Sequence(s) => Snapshot::Sequence(s.elements()),
            Self::Set(s) => Snapshot::Set(s.elements().into_iter().collect()),
            Self::Map(m) => Snapshot::Map(m.entries().into_iter().collect()),
        }
    }

    pub fn as_sequence(&self) -> Option<&dyn Sequence> {
        match self {
            Self::Sequence(s) => Some(s.as_ref()),
            _ => None,
        }
    }

    pub fn as_sequence_mut(&mut self) -> Option<&mut dyn Sequence> {
        match self {
            Self::Sequence(s) => Some(s.as_mut()),
            _ => None,
        }
    }

    pub fn as_set(&self) -> Option<&dyn Set> {
        match self {
            Self::Set(s) => Some(s.as_ref()),
            _ => None,
        }
    }

    pub fn as_set_mut(&mut self) -> Option<&mut dyn Set> {
        match self {
            Self::Set(s) => Some(s.as_mut()),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&dyn Map> {
        match self {
            Self::Map(m) => Some(m.as_ref()),
            _ => None,
        }
    }

    pub fn as_map_mut(&mut self) -> Option<&mut dyn Map> {
        match self {
            Self::Map(m) => Some(m.as_mut()),
            _ => None,
        }
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.implementation(), self.snapshot())
    }
}

/// Owned, comparable state of a container.
///
/// Sets and maps compare without regard to iteration order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Snapshot {
    Sequence(Vec<Element>),
    Set(BTreeSet<Element>),
    Map(BTreeMap<Element, Element>),
}

impl Snapshot {
    /// Snapshot a container of `capability` built from `elements` would have.
    ///
    /// Map keys are paired with [`Element::paired_value`].
    pub fn from_payload(capability: CapabilityKind, elements: &[Element]) -> Self {
        match capability.container_kind() {
            CapabilityKind::Set => Self::Set(elements.iter().cloned().collect()),
            CapabilityKind::Map => Self::Map(
                elements
                    .iter()
                    .map(|k| (k.clone(), k.paired_value()))
                    .collect(),
            ),
            _ => Self::Sequence(elements.to_vec()),
        }
    }

    pub fn capability(&self) -> CapabilityKind {
        match self {
            Self::Sequence(_) => CapabilityKind::Sequence,
            Self::Set(_) => CapabilityKind::Set,
            Self::Map(_) => CapabilityKind::Map,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Sequence(items) => items.len(),
            Self::Set(items) => items.len(),
            Self::Map(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A fresh, permissive, mutable copy holding this state.
    pub fn to_reference(&self) -> Container {
        match self {
            Self::Sequence(items) => Container::sequence(ReferenceSequence::new(items.clone())),
            Self::Set(items) => Container::set(ReferenceSet::new(items.iter().cloned())),
            Self::Map(entries) => Container::map(ReferenceMap::new(
                entries.iter().map(|(k, v)| (k.clone(), v.clone())),
            )),
        }
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequence(items) => f.write_str(&render_elements(items)),
            Self::Set(items) => {
                let parts: Vec<String> = items.iter().map(ToString::to_string).collect();
                write!(f, "{{{}}}", parts.join(", "))
            }
            Self::Map(entries) => {
                let parts: Vec<String> = entries
                    .iter()
                    .map(|(k, v)| format!("{}={}", k, v))
                    .collect();
                write!(f, "{{{}}}", parts.join(", "))
            }
        }
    }
}
