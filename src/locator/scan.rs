//! Page extraction: the fillable fields of a page with their resolved labels.

use serde::Serialize;
use tracing::debug;

use super::document::{Document, FieldDescriptor, FormDescriptor, LabelDescriptor};

/// Control types that never take user input.
const SKIPPED_TYPES: [&str; 4] = ["hidden", "submit", "button", "reset"];

/// One fillable field as reported to the assistant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScannedField {
    #[serde(rename = "type")]
    pub field_type: String,
    pub name: String,
    pub id: String,
    pub placeholder: String,
    pub label: String,
    pub required: bool,
    pub value: String,
}

/// Everything the assistant needs to reason about a page's forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageData {
    pub title: String,
    pub url: String,
    pub forms: Vec<FormDescriptor>,
    pub fields: Vec<ScannedField>,
}

/// Extracts title, URL, forms and fillable fields from `doc`.
///
/// Forms without an id are named `form-{index}` and default to method
/// `get`. Field labels come from `label[for=id]` first, then from an
/// enclosing label.
pub fn scan_page<D>(doc: &D) -> PageData
where
    D: Document + ?Sized,
{
    let labels = doc.labels();

    let forms = doc
        .forms()
        .into_iter()
        .enumerate()
        .map(|(index, form)| FormDescriptor {
            id: if form.id.is_empty() {
                format!("form-{index}")
            } else {
                form.id
            },
            method: if form.method.is_empty() {
                "get".to_string()
            } else {
                form.method
            },
            ..form
        })
        .collect();

    let fields: Vec<ScannedField> = doc
        .controls()
        .into_iter()
        .map(|control| scanned_field(control, &labels))
        .filter(|field| !SKIPPED_TYPES.contains(&field.field_type.as_str()))
        .collect();

    debug!(fields = fields.len(), "Extracted page data");

    PageData {
        title: doc.title(),
        url: doc.url(),
        forms,
        fields,
    }
}

fn scanned_field<E: PartialEq>(
    control: FieldDescriptor<E>,
    labels: &[LabelDescriptor<E>],
) -> ScannedField {
    let field_type = if control.input_type.is_empty() {
        control.kind.default_type().to_string()
    } else {
        control.input_type.to_lowercase()
    };

    ScannedField {
        field_type,
        label: label_for(&control, labels),
        name: control.name,
        id: control.id,
        placeholder: control.placeholder,
        required: control.required,
        value: control.value,
    }
}

fn label_for<E: PartialEq>(control: &FieldDescriptor<E>, labels: &[LabelDescriptor<E>]) -> String {
    let by_for = (!control.id.is_empty())
        .then(|| {
            labels
                .iter()
                .find(|label| label.for_attr.as_deref() == Some(control.id.as_str()))
        })
        .flatten()
        .map(|label| label.text.trim())
        .filter(|text| !text.is_empty());

    by_for
        .or_else(|| {
            labels
                .iter()
                .find(|label| label.nested.as_ref() == Some(&control.element))
                .map(|label| label.text.trim())
        })
        .unwrap_or_default()
        .to_string()
}
