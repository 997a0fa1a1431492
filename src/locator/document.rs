//! Document capability consumed by the locator.
//!
//! The locator never touches a live page directly. Hosts implement
//! [`Document`] over whatever tree they own, and tests use
//! [`DocumentSnapshot`](super::DocumentSnapshot).

use std::fmt;

use serde::{Deserialize, Serialize};

// == Control Kind ==
/// Element kinds that can hold a user-entered value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlKind {
    #[default]
    Input,
    Textarea,
    Select,
}

impl ControlKind {
    pub fn tag_name(&self) -> &'static str {
        match self {
            ControlKind::Input => "input",
            ControlKind::Textarea => "textarea",
            ControlKind::Select => "select",
        }
    }

    /// Type reported by a control that carries no explicit `type` attribute.
    pub fn default_type(&self) -> &'static str {
        match self {
            ControlKind::Input => "text",
            ControlKind::Textarea => "textarea",
            ControlKind::Select => "select-one",
        }
    }
}

// == Descriptors ==
/// Read-only view of one form control at lookup time.
///
/// String attributes are empty when absent.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor<E> {
    pub kind: ControlKind,
    /// The `type` attribute, e.g. `email` or `hidden`
    pub input_type: String,
    pub id: String,
    pub name: String,
    pub placeholder: String,
    pub required: bool,
    /// Current value of the control
    pub value: String,
    /// Handle to the live control, borrowed from the host
    pub element: E,
}

/// Read-only view of one `<label>` element.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelDescriptor<E> {
    /// Text content, untrimmed
    pub text: String,
    /// The `for` attribute, if present
    pub for_attr: Option<String>,
    /// First form control nested inside the label
    pub nested: Option<E>,
}

/// Summary of a `<form>` element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormDescriptor {
    pub id: String,
    pub name: String,
    pub action: String,
    pub method: String,
}

// == Document ==
/// A queryable, enumerable document.
///
/// Every call must reflect the document as it is now; implementations must
/// not hand back a snapshot cached from an earlier call.
pub trait Document {
    /// Opaque handle to an element owned by the host.
    type Element: Clone + PartialEq + fmt::Debug;

    /// Element whose `id` attribute equals `id` exactly.
    fn element_by_id(&self, id: &str) -> Option<Self::Element>;

    /// All `input`, `textarea` and `select` elements in document order.
    fn controls(&self) -> Vec<FieldDescriptor<Self::Element>>;

    /// All `label` elements in document order.
    fn labels(&self) -> Vec<LabelDescriptor<Self::Element>>;

    fn title(&self) -> String {
        String::new()
    }

    fn url(&self) -> String {
        String::new()
    }

    fn forms(&self) -> Vec<FormDescriptor> {
        Vec::new()
    }
}
