//! Field lookup cascade.
//!
//! Strategies are tried in a fixed order and the first hit wins; there is no
//! scoring across strategies. Within the fuzzy strategies the first control
//! in document order wins, which is not always the most relevant one.

use serde::Serialize;
use tracing::debug;

use super::document::{ControlKind, Document};
use super::normalize::normalize;

// == Match Strategy ==
/// Which step of the cascade produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    /// Element id equals the query
    ExactId,
    /// An input's name attribute equals the query
    ExactName,
    /// Normalized query is a substring of the normalized id
    Id,
    /// ... of the normalized name
    Name,
    /// ... of the normalized placeholder
    Placeholder,
    /// ... of a label's normalized text
    Label,
}

/// A located control and how it was found.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldMatch<E> {
    pub element: E,
    pub strategy: MatchStrategy,
}

impl<E> FieldMatch<E> {
    fn new(element: E, strategy: MatchStrategy) -> Self {
        Self { element, strategy }
    }
}

// == Locate ==
/// Finds the control best matching a human-supplied field name.
///
/// Returns `None` when nothing matches; a form may legitimately lack the
/// field, so callers should treat that as a no-op.
pub fn locate<D>(doc: &D, query: &str) -> Option<FieldMatch<D::Element>>
where
    D: Document + ?Sized,
{
    let found = exact_match(doc, query).or_else(|| fuzzy_match(doc, query));

    match &found {
        Some(found) => debug!(query = %query, strategy = ?found.strategy, "Field located"),
        None => debug!(query = %query, "No field matched"),
    }
    found
}

fn exact_match<D>(doc: &D, query: &str) -> Option<FieldMatch<D::Element>>
where
    D: Document + ?Sized,
{
    if query.is_empty() {
        return None;
    }

    if let Some(element) = doc.element_by_id(query) {
        return Some(FieldMatch::new(element, MatchStrategy::ExactId));
    }

    doc.controls()
        .into_iter()
        .find(|control| control.kind == ControlKind::Input && control.name == query)
        .map(|control| FieldMatch::new(control.element, MatchStrategy::ExactName))
}

fn fuzzy_match<D>(doc: &D, query: &str) -> Option<FieldMatch<D::Element>>
where
    D: Document + ?Sized,
{
    let needle = normalize(query);
    // An empty needle is a substring of everything
    if needle.is_empty() {
        return None;
    }

    for control in doc.controls() {
        let strategy = if normalize(&control.id).contains(&needle) {
            MatchStrategy::Id
        } else if normalize(&control.name).contains(&needle) {
            MatchStrategy::Name
        } else if normalize(&control.placeholder).contains(&needle) {
            MatchStrategy::Placeholder
        } else {
            continue;
        };
        return Some(FieldMatch::new(control.element, strategy));
    }

    doc.labels()
        .into_iter()
        .filter(|label| normalize(&label.text).contains(&needle))
        .find_map(|label| {
            label
                .for_attr
                .as_deref()
                .and_then(|target| doc.element_by_id(target))
                .or(label.nested)
        })
        .map(|element| FieldMatch::new(element, MatchStrategy::Label))
}
