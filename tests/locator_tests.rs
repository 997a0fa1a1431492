//! Integration Tests for the Field Locator
//!
//! Drives the public locate/scan API against page snapshots shaped like
//! real immigration forms.

use form_assist::locator::{
    locate, scan_page, ControlRef, ControlSpec, DocumentSnapshot, LabelSpec, MatchStrategy,
};

// == Fixtures ==

fn study_permit_form() -> DocumentSnapshot {
    DocumentSnapshot::new()
        .with_title("Study permit")
        .with_control(ControlSpec::input().with_id("dli").with_placeholder("School Code"))
        .with_control(ControlSpec::input().with_id("uci").with_placeholder("UCI Number"))
}

fn locate_ref(doc: &DocumentSnapshot, query: &str) -> Option<(ControlRef, MatchStrategy)> {
    locate(doc, query).map(|found| (found.element, found.strategy))
}

// == Locate Tests ==

#[test]
fn test_locates_by_placeholder_and_reports_missing_fields() {
    let doc = study_permit_form();

    assert_eq!(
        locate_ref(&doc, "School Code"),
        Some((ControlRef(0), MatchStrategy::Placeholder))
    );
    assert_eq!(
        locate_ref(&doc, "uci number"),
        Some((ControlRef(1), MatchStrategy::Placeholder))
    );
    assert_eq!(locate_ref(&doc, "passport number"), None);
}

#[test]
fn test_exact_id_wins_over_fuzzy() {
    let doc = study_permit_form();

    assert_eq!(
        locate_ref(&doc, "uci"),
        Some((ControlRef(1), MatchStrategy::ExactId))
    );
}

#[test]
fn test_query_variants_normalize_to_same_field() {
    let doc = DocumentSnapshot::new()
        .with_control(ControlSpec::input().with_name("first_name"))
        .with_control(ControlSpec::input().with_name("family_name"));

    for query in ["First Name", "first-name", "FIRST NAME!", "firstname"] {
        assert_eq!(
            locate_ref(&doc, query),
            Some((ControlRef(0), MatchStrategy::Name)),
            "query {query:?}"
        );
    }
}

#[test]
fn test_label_fallback_by_for_and_by_nesting() {
    let doc = DocumentSnapshot::new()
        .with_control(ControlSpec::input().with_id("f1"))
        .with_control(ControlSpec::select())
        .with_label(LabelSpec::new("Date of Birth").with_for("f1"))
        .with_label(LabelSpec::new("Country of Citizenship").wrapping(1));

    assert_eq!(
        locate_ref(&doc, "date of birth"),
        Some((ControlRef(0), MatchStrategy::Label))
    );
    assert_eq!(
        locate_ref(&doc, "citizenship"),
        Some((ControlRef(1), MatchStrategy::Label))
    );
}

#[test]
fn test_blank_query_matches_nothing() {
    let doc = study_permit_form();

    assert_eq!(locate_ref(&doc, ""), None);
    assert_eq!(locate_ref(&doc, " -- "), None);
}

#[test]
fn test_snapshot_from_json_is_locatable() {
    let doc: DocumentSnapshot = serde_json::from_str(
        r#"{
            "controls": [
                {"type": "email", "name": "contact", "placeholder": "you@example.com"},
                {"kind": "textarea", "id": "history"}
            ],
            "labels": [{"text": "Travel history", "contains": 1}]
        }"#,
    )
    .unwrap();

    assert_eq!(
        locate_ref(&doc, "travel history"),
        Some((ControlRef(1), MatchStrategy::Label))
    );
    assert_eq!(
        locate_ref(&doc, "contact"),
        Some((ControlRef(0), MatchStrategy::ExactName))
    );
}

// == Scan Tests ==

#[test]
fn test_scan_lists_fillable_fields_with_labels() {
    let doc = study_permit_form()
        .with_control(ControlSpec::input().with_type("hidden").with_name("session"))
        .with_control(ControlSpec::input().with_type("submit"))
        .with_label(LabelSpec::new("Designated Learning Institution").with_for("dli"));

    let page = scan_page(&doc);

    assert_eq!(page.title, "Study permit");
    assert_eq!(page.fields.len(), 2);
    assert_eq!(page.fields[0].id, "dli");
    assert_eq!(page.fields[0].label, "Designated Learning Institution");
    assert_eq!(page.fields[1].placeholder, "UCI Number");
    assert_eq!(page.fields[1].field_type, "text");
}
