//! Container elements.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Values of the reference sample every probe is calibrated against.
pub const REFERENCE_VALUES: [&str; 4] = ["a", "b", "c", "d"];

/// One element stored in a container under test.
///
/// `Null` is the absent-value marker that some containers tolerate and
/// others refuse outright. Serialized as JSON `null` or a bare string.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Element {
    Null,
    Value(String),
}

impl Element {
    pub fn value(value: impl Into<String>) -> Self {
        Self::Value(value.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Value a map associates with this element when it is used as a key.
    pub fn paired_value(&self) -> Element {
        match self {
            Self::Null => Self::Null,
            Self::Value(v) => Self::Value(v.to_uppercase()),
        }
    }
}

impl From<&str> for Element {
    fn from(value: &str) -> Self {
        Self::value(value)
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Value(v) => write!(f, "{}", v),
        }
    }
}

/// The default "a, b, c, d" reference payload.
pub fn reference_payload() -> Vec<Element> {
    REFERENCE_VALUES.iter().map(|v| Element::from(*v)).collect()
}

/// `size` distinct, non-null elements used when probing container sizes.
pub fn generated_payload(size: usize) -> Vec<Element> {
    (0..size).map(|i| Element::value(format!("e{:04}", i))).collect()
}

/// Renders a slice as `[a, b, null]`.
pub fn render_elements(elements: &[Element]) -> String {
    let parts: Vec<String> = elements.iter().map(ToString::to_string).collect();
    format!("[{}]", parts.join(", "))
}
