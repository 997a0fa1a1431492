//! In-memory document used as the HTTP request body and as a test fixture.

use serde::{Deserialize, Serialize};

use super::document::{ControlKind, Document, FieldDescriptor, FormDescriptor, LabelDescriptor};

/// Position of a control within a [`DocumentSnapshot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ControlRef(pub usize);

// == Control Spec ==
/// A form control as it appears in a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlSpec {
    pub kind: ControlKind,
    #[serde(rename = "type")]
    pub input_type: String,
    pub id: String,
    pub name: String,
    pub placeholder: String,
    pub required: bool,
    pub value: String,
}

impl ControlSpec {
    pub fn input() -> Self {
        Self::default()
    }

    pub fn textarea() -> Self {
        Self {
            kind: ControlKind::Textarea,
            ..Self::default()
        }
    }

    pub fn select() -> Self {
        Self {
            kind: ControlKind::Select,
            ..Self::default()
        }
    }

    pub fn with_type(mut self, input_type: impl Into<String>) -> Self {
        self.input_type = input_type.into();
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

// == Label Spec ==
/// A `<label>` element. `contains` indexes the control nested inside it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelSpec {
    pub text: String,
    #[serde(rename = "for")]
    pub for_attr: Option<String>,
    pub contains: Option<usize>,
}

impl LabelSpec {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_for(mut self, target: impl Into<String>) -> Self {
        self.for_attr = Some(target.into());
        self
    }

    pub fn wrapping(mut self, control: usize) -> Self {
        self.contains = Some(control);
        self
    }
}

// == Document Snapshot ==
/// A serializable page: title, URL, forms, controls and labels, each list
/// in document order.
///
/// ```rust
/// use form_assist::locator::{locate, ControlRef, ControlSpec, DocumentSnapshot};
///
/// let doc = DocumentSnapshot::new()
///     .with_control(ControlSpec::input().with_id("uci").with_placeholder("UCI Number"));
///
/// assert_eq!(locate(&doc, "uci number").map(|m| m.element), Some(ControlRef(0)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentSnapshot {
    pub title: String,
    pub url: String,
    pub forms: Vec<FormDescriptor>,
    pub controls: Vec<ControlSpec>,
    pub labels: Vec<LabelSpec>,
}

impl DocumentSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_form(mut self, form: FormDescriptor) -> Self {
        self.forms.push(form);
        self
    }

    pub fn with_control(mut self, control: ControlSpec) -> Self {
        self.push_control(control);
        self
    }

    pub fn with_label(mut self, label: LabelSpec) -> Self {
        self.labels.push(label);
        self
    }

    /// Appends a control and returns its handle.
    pub fn push_control(&mut self, control: ControlSpec) -> ControlRef {
        self.controls.push(control);
        ControlRef(self.controls.len() - 1)
    }

    pub fn control(&self, element: ControlRef) -> Option<&ControlSpec> {
        self.controls.get(element.0)
    }

    /// Overwrites a control's value, returning false for unknown handles.
    pub fn set_value(&mut self, element: ControlRef, value: impl Into<String>) -> bool {
        match self.controls.get_mut(element.0) {
            Some(control) => {
                control.value = value.into();
                true
            }
            None => false,
        }
    }
}

impl Document for DocumentSnapshot {
    type Element = ControlRef;

    fn element_by_id(&self, id: &str) -> Option<ControlRef> {
        self.controls
            .iter()
            .position(|control| control.id == id)
            .map(ControlRef)
    }

    fn controls(&self) -> Vec<FieldDescriptor<ControlRef>> {
        self.controls
            .iter()
            .enumerate()
            .map(|(index, control)| FieldDescriptor {
                kind: control.kind,
                input_type: control.input_type.clone(),
                id: control.id.clone(),
                name: control.name.clone(),
                placeholder: control.placeholder.clone(),
                required: control.required,
                value: control.value.clone(),
                element: ControlRef(index),
            })
            .collect()
    }

    fn labels(&self) -> Vec<LabelDescriptor<ControlRef>> {
        self.labels
            .iter()
            .map(|label| LabelDescriptor {
                text: label.text.clone(),
                for_attr: label.for_attr.clone(),
                nested: label
                    .contains
                    .filter(|index| *index < self.controls.len())
                    .map(ControlRef),
            })
            .collect()
    }

    fn title(&self) -> String {
        self.title.clone()
    }

    fn url(&self) -> String {
        self.url.clone()
    }

    fn forms(&self) -> Vec<FormDescriptor> {
        self.forms.clone()
    }
}
