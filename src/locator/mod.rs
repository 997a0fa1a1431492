//! Field Locator Module
//!
//! Finds the form control matching a human-supplied field name, highlights
//! it, and extracts a page's fillable fields. The page is reached only
//! through the [`Document`] capability.

mod document;
mod highlight;
mod matcher;
mod normalize;
mod scan;
mod snapshot;

pub use document::{ControlKind, Document, FieldDescriptor, FormDescriptor, LabelDescriptor};
pub use highlight::{
    FieldFilled, HighlightSurface, Highlighter, TooltipId, CLEAR_AFTER_FILL, TOOLTIP_TIMEOUT,
};
pub use matcher::{locate, FieldMatch, MatchStrategy};
pub use normalize::normalize;
pub use scan::{scan_page, PageData, ScannedField};
pub use snapshot::{ControlRef, ControlSpec, DocumentSnapshot, LabelSpec};
