//! Identification create and edit pages.

mod common;

use std::sync::Arc;
use std::time::Duration;

use assert_matches::assert_matches;
use catalogo_app::pages::create_identification::{CreateIdentificationPage, MISSING_CASE_NUMBER};
use catalogo_app::pages::edit_identification::{
    EditIdentificationPage, IDENTIFICATION_NOT_FOUND, INVALID_CASE_NUMBER,
    LOAD_IDENTIFICATION_FAILED,
};
use catalogo_app::pages::Submit;
use catalogo_app::{Navigation, Route};
use catalogo_core::fields::{FieldInput, InputKind};
use catalogo_core::validation::{
    BIRTH_DATE_INVALID, BIRTH_DATE_REQUIRED, INVENTORY_REQUIRED, ROOM_REQUIRED,
};
use catalogo_core::ErrorLocation;
use common::{complete_identification, session, FakeGateway};

const ROOM: ErrorLocation = ErrorLocation::GroupField {
    group: "section",
    field: "Room",
};

const BIRTH_DATE: ErrorLocation = ErrorLocation::GroupField {
    group: "author",
    field: "BirthDate",
};

fn fill(page: &CreateIdentificationPage) {
    let assignments = [
        ("inventory", "12"),
        ("genericClassification", "Pintura"),
        ("objectName", "Óleo sobre lienzo"),
        ("observations", "Restaurado en 1998"),
        ("section.Room", "Sala Virreinal"),
        ("typology.Type", "Bidimensional"),
        ("specificName.GenericName", "Retrato"),
        ("author.Name", "Melchor Pérez de Holguín"),
        ("author.BirthPlace", "Cochabamba"),
        ("author.BirthDate", "1660-01-01"),
        ("title.Name", "San Juan de Dios"),
        ("material.MaterialName", "Lienzo"),
        ("techniques.TechniqueName", "Óleo"),
    ];
    for (key, value) in assignments {
        assert!(page.set(key, value), "{key} should resolve");
    }
}

// ---------------------------------------------------------------------------
// Test: create page
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_without_case_number_redirects_to_list() {
    let gateway = FakeGateway::new();
    for case_number in [None, Some(0), Some(-3)] {
        let page = CreateIdentificationPage::new(session(&gateway), case_number);
        assert_eq!(
            page.open(),
            Navigation::Redirect {
                to: Route::List,
                after: Duration::from_millis(2000),
            }
        );
        assert_eq!(page.errors().general(), Some(MISSING_CASE_NUMBER));
        assert_eq!(page.submit().await, Submit::Failed);
    }
    assert!(gateway.calls().is_empty());
}

#[tokio::test]
async fn fresh_draft_fails_validation_locally() {
    let gateway = FakeGateway::new();
    let page = CreateIdentificationPage::new(session(&gateway), Some(4));
    assert_eq!(page.open(), Navigation::Stay);
    assert_eq!(page.draft().expediente, 4);

    assert_eq!(page.submit().await, Submit::Failed);
    let errors = page.errors();
    assert_eq!(errors.get(ErrorLocation::Field("inventory")), Some(INVENTORY_REQUIRED));
    assert_eq!(errors.get(ROOM), Some(ROOM_REQUIRED));
    assert_eq!(errors.get(ErrorLocation::Field("numberOfObjects")), None);
    assert!(gateway.calls().is_empty());

    // Editing the room clears only that entry.
    let input = FieldInput::grouped("section", "Room", InputKind::Text, "Sala 2");
    assert!(page.edit(&input));
    let errors = page.errors();
    assert_eq!(errors.get(ROOM), None);
    assert_eq!(errors.get(ErrorLocation::Field("inventory")), Some(INVENTORY_REQUIRED));
}

#[tokio::test]
async fn complete_draft_is_posted() {
    let gateway = FakeGateway::new();
    let page = CreateIdentificationPage::new(session(&gateway), Some(4));
    fill(&page);

    assert_eq!(page.submit().await, Submit::Done(Navigation::Go(Route::List)));
    let stored = gateway.identifications();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].expediente, 4);
    assert_eq!(stored[0].author_name(), Some("Melchor Pérez de Holguín"));
}

#[tokio::test]
async fn bad_birth_date_is_reported_on_the_field() {
    let gateway = FakeGateway::new();
    let page = CreateIdentificationPage::new(session(&gateway), Some(4));
    fill(&page);

    assert!(page.set("author.BirthDate", "   "));
    assert_eq!(page.submit().await, Submit::Failed);
    assert_eq!(page.errors().get(BIRTH_DATE), Some(BIRTH_DATE_REQUIRED));

    assert!(page.set("author.BirthDate", "mil seiscientos"));
    assert_eq!(page.submit().await, Submit::Failed);
    let errors = page.errors();
    assert_eq!(errors.get(BIRTH_DATE), Some(BIRTH_DATE_INVALID));
    assert_eq!(errors.general(), None);
    assert!(gateway.calls().is_empty());
}

#[tokio::test]
async fn conflict_is_prefixed() {
    let gateway = FakeGateway::new();
    gateway.fail(
        "POST /Identification",
        409,
        r#"{"title":"Ya existe una identificación para este expediente"}"#,
    );
    let page = CreateIdentificationPage::new(session(&gateway), Some(4));
    fill(&page);

    assert_eq!(page.submit().await, Submit::Failed);
    assert_eq!(
        page.errors().general(),
        Some("Conflicto: Ya existe una identificación para este expediente")
    );
    assert_eq!(page.draft().inventory.as_i64(), Some(12));
}

#[tokio::test]
async fn second_submit_is_rejected_while_first_is_in_flight() {
    let gateway = FakeGateway::new();
    let page = Arc::new(CreateIdentificationPage::new(session(&gateway), Some(4)));
    fill(&page);
    let gate = gateway.hold_writes();

    let first = tokio::spawn({
        let page = page.clone();
        async move { page.submit().await }
    });
    gate.entered.notified().await;
    assert!(page.is_submitting());

    assert_eq!(page.submit().await, Submit::Busy);
    gate.release.notify_one();
    assert_matches!(first.await.unwrap(), Submit::Done(_));
    assert_eq!(gateway.count("POST /Identification"), 1);
    assert!(!page.is_submitting());
}

// ---------------------------------------------------------------------------
// Test: edit page
// ---------------------------------------------------------------------------

#[tokio::test]
async fn invalid_case_number_redirects_without_fetching() {
    let gateway = FakeGateway::new();
    let page = EditIdentificationPage::new(session(&gateway), 0);

    assert_eq!(
        page.load().await,
        Navigation::Redirect {
            to: Route::List,
            after: Duration::from_millis(1500),
        }
    );
    assert_eq!(page.errors().general(), Some(INVALID_CASE_NUMBER));
    assert!(gateway.calls().is_empty());
}

#[tokio::test]
async fn loaded_record_gets_missing_groups_and_saves() {
    let gateway = FakeGateway::new();
    let mut stored = complete_identification(9);
    stored.techniques = None;
    gateway.add_identification(stored);
    let page = EditIdentificationPage::new(session(&gateway), 9);

    assert_eq!(page.load().await, Navigation::Stay);
    let draft = page.draft();
    assert_eq!(draft.techniques, Some(Default::default()));
    assert_eq!(draft.author_name(), Some("Melchor Pérez de Holguín"));

    assert_eq!(page.submit().await, Submit::Failed);
    assert!(page.set("techniques.TechniqueName", "Temple"));
    assert!(!page.set("expediente", "10"));

    assert_eq!(page.submit().await, Submit::Done(Navigation::Go(Route::List)));
    let saved = &gateway.identifications()[0];
    assert_eq!(saved.expediente, 9);
    assert_eq!(
        saved.techniques.as_ref().map(|t| t.technique_name.as_str()),
        Some("Temple")
    );
    assert_eq!(gateway.count("PUT /Identification/9"), 1);
}

#[tokio::test]
async fn missing_record_reports_load_failure() {
    let gateway = FakeGateway::new();
    let page = EditIdentificationPage::new(session(&gateway), 30);

    assert_eq!(page.load().await, Navigation::Stay);
    assert_eq!(page.errors().general(), Some(LOAD_IDENTIFICATION_FAILED));
}

#[tokio::test]
async fn update_of_vanished_record_reports_not_found() {
    let gateway = FakeGateway::new();
    gateway.add_identification(complete_identification(11));
    let page = EditIdentificationPage::new(session(&gateway), 11);
    page.load().await;
    gateway.fail("PUT /Identification/11", 404, "");

    assert_eq!(page.submit().await, Submit::Failed);
    assert_eq!(page.errors().general(), Some(IDENTIFICATION_NOT_FOUND));
}
