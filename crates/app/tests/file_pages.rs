//! Administrative file list, create and edit pages.

mod common;

use std::time::Duration;

use assert_matches::assert_matches;
use catalogo_app::pages::create_file::{CreateFilePage, CASE_NUMBER_CHECK_FAILED, CASE_NUMBER_TAKEN};
use catalogo_app::pages::edit_file::{EditFilePage, LOAD_FILE_FAILED};
use catalogo_app::pages::file_list::{FileListPage, FILE_HAS_IDENTIFICATION};
use catalogo_app::pages::{Delete, Submit, SELECT_TENANT_FIRST};
use catalogo_app::{Navigation, Route};
use catalogo_core::table::{SearchField, TRANSFER_REQUEST_ACTIVE};
use catalogo_core::validation::UNIT_REQUIRED;
use catalogo_core::ErrorLocation;
use chrono::NaiveDate;
use common::{complete_identification, file, session, session_without_tenant, FakeGateway};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 20).unwrap()
}

// ---------------------------------------------------------------------------
// Test: list page
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_without_tenant_leaves_immediately() {
    let gateway = FakeGateway::new();
    let page = FileListPage::new(session_without_tenant(&gateway));

    assert_eq!(page.load().await, Navigation::Go(Route::Tenants));
    assert!(gateway.calls().is_empty());
}

#[tokio::test]
async fn list_pages_and_filters_files() {
    let gateway = FakeGateway::new();
    for n in 1..=12 {
        gateway.add_file(file(n, false));
    }
    let page = FileListPage::new(session(&gateway));
    page.load().await;

    page.with_files(|t| {
        assert_eq!(t.page_count(), 2);
        assert_eq!(t.visible().len(), 10);
    });
    assert!(page.next_file_page());
    assert!(!page.next_file_page());
    page.with_files(|t| assert_eq!(t.visible().len(), 2));
    assert!(page.previous_file_page());
    assert!(!page.previous_file_page());
    assert!(page.next_file_page());

    page.search_files("1");
    page.with_files(|t| {
        assert_eq!(t.page(), 1);
        let cases: Vec<_> = t.visible().iter().map(|f| f.expediente).collect();
        assert_eq!(cases, vec![1, 10, 11, 12]);
    });
}

#[tokio::test]
async fn identification_search_by_author() {
    let gateway = FakeGateway::new();
    let mut gargoyle = complete_identification(1);
    gargoyle.author.as_mut().unwrap().name = "Gargoyle".into();
    let mut smith = complete_identification(2);
    smith.author.as_mut().unwrap().name = "Smith".into();
    gateway.add_identification(gargoyle);
    gateway.add_identification(smith);

    let page = FileListPage::new(session(&gateway));
    page.load().await;
    page.search_identifications(SearchField::AuthorName, "gar");

    page.with_identifications(|t| {
        let rows = t.rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].author, "Gargoyle");
    });
    assert!(!page.next_identification_page());
    assert!(!page.previous_identification_page());
}

// ---------------------------------------------------------------------------
// Test: delete gates
// ---------------------------------------------------------------------------

#[tokio::test]
async fn transfer_request_blocks_delete_without_a_request() {
    let gateway = FakeGateway::new();
    gateway.add_file(file(3, true));
    let page = FileListPage::new(session(&gateway));
    page.load().await;

    let outcome = page.delete_file(3).await;
    assert_eq!(outcome, Delete::Blocked(TRANSFER_REQUEST_ACTIVE.to_string()));
    assert_eq!(page.error().as_deref(), Some(TRANSFER_REQUEST_ACTIVE));
    assert!(gateway
        .calls()
        .iter()
        .all(|c| !c.starts_with("DELETE") && c != "GET /Identification/3"));
    assert_eq!(gateway.files().len(), 1);
}

#[tokio::test]
async fn linked_identification_blocks_delete() {
    let gateway = FakeGateway::new();
    gateway.add_file(file(5, false));
    gateway.add_identification(complete_identification(5));
    let page = FileListPage::new(session(&gateway));
    page.load().await;

    let outcome = page.delete_file(5).await;
    assert_eq!(outcome, Delete::Blocked(FILE_HAS_IDENTIFICATION.to_string()));
    assert_eq!(gateway.count("GET /Identification/5"), 1);
    assert_eq!(gateway.count("DELETE /ArchivoAdministrativo/5"), 0);
}

#[tokio::test]
async fn unlinked_file_is_deleted_and_list_reloaded() {
    let gateway = FakeGateway::new();
    gateway.add_file(file(6, false));
    gateway.add_file(file(7, false));
    let page = FileListPage::new(session(&gateway));
    page.load().await;

    assert_eq!(page.delete_file(6).await, Delete::Deleted);
    assert_eq!(gateway.count("DELETE /ArchivoAdministrativo/6"), 1);
    page.with_files(|t| {
        let cases: Vec<_> = t.visible().iter().map(|f| f.expediente).collect();
        assert_eq!(cases, vec![7]);
    });
}

#[tokio::test]
async fn delete_failure_surfaces_backend_message() {
    let gateway = FakeGateway::new();
    gateway.add_file(file(8, false));
    gateway.fail(
        "DELETE /ArchivoAdministrativo/8",
        500,
        r#"{"message":"Archivo bloqueado"}"#,
    );
    let page = FileListPage::new(session(&gateway));
    page.load().await;

    assert_eq!(page.delete_file(8).await, Delete::Failed);
    assert_eq!(page.error().as_deref(), Some("Archivo bloqueado"));
}

#[tokio::test]
async fn file_details_card() {
    let gateway = FakeGateway::new();
    gateway.add_file(file(4, false));
    let page = FileListPage::new(session(&gateway));

    let card = page.file_details(4).await.expect("card");
    assert_eq!(card.value("Expediente"), Some("4"));
    assert!(page.file_details(99).await.is_none());
    assert!(page.error().is_some());
}

// ---------------------------------------------------------------------------
// Test: create page
// ---------------------------------------------------------------------------

fn fill_new_file(page: &CreateFilePage, case_number: &str) {
    assert!(page.set("Unidad", "Archivo Central"));
    assert!(page.set("Expediente", case_number));
    assert!(page.set("Asunto", "Compra de lienzos"));
}

#[tokio::test]
async fn create_file_without_tenant_redirects() {
    let gateway = FakeGateway::new();
    let page = CreateFilePage::new(session_without_tenant(&gateway), today());

    assert_eq!(
        page.open(),
        Navigation::Redirect {
            to: Route::Tenants,
            after: Duration::from_millis(1500),
        }
    );
    assert_eq!(page.errors().general(), Some(SELECT_TENANT_FIRST));
}

#[tokio::test]
async fn create_file_validates_locally() {
    let gateway = FakeGateway::new();
    let page = CreateFilePage::new(session(&gateway), today());
    assert_eq!(page.open(), Navigation::Stay);

    assert_eq!(page.submit().await, Submit::Failed);
    assert_eq!(page.errors().get(ErrorLocation::Field("Unidad")), Some(UNIT_REQUIRED));
    assert!(gateway.calls().is_empty());

    assert!(page.set("Unidad", "Archivo"));
    assert_eq!(page.errors().get(ErrorLocation::Field("Unidad")), None);
}

#[tokio::test]
async fn taken_case_number_is_reported_without_posting() {
    let gateway = FakeGateway::new();
    gateway.add_file(file(7, false));
    let page = CreateFilePage::new(session(&gateway), today());
    fill_new_file(&page, "7");

    assert_eq!(page.submit().await, Submit::Failed);
    assert_eq!(
        page.errors().get(ErrorLocation::Field("Expediente")),
        Some(CASE_NUMBER_TAKEN)
    );
    assert_eq!(gateway.count("GET /ArchivoAdministrativo/7"), 1);
    assert_eq!(gateway.count("POST /ArchivoAdministrativo"), 0);
}

#[tokio::test]
async fn failed_pre_check_is_a_general_error() {
    let gateway = FakeGateway::new();
    gateway.fail("GET /ArchivoAdministrativo/9", 503, "");
    let page = CreateFilePage::new(session(&gateway), today());
    fill_new_file(&page, "9");

    assert_eq!(page.submit().await, Submit::Failed);
    assert_eq!(page.errors().general(), Some(CASE_NUMBER_CHECK_FAILED));
    assert_eq!(gateway.count("POST /ArchivoAdministrativo"), 0);
}

#[tokio::test]
async fn created_file_continues_to_its_identification() {
    let gateway = FakeGateway::new();
    let page = CreateFilePage::new(session(&gateway), today());
    fill_new_file(&page, "21");

    let outcome = page.submit().await;
    assert_eq!(
        outcome,
        Submit::Done(Navigation::Go(Route::CreateIdentification {
            case_number: Some(21)
        }))
    );
    let stored = gateway.files();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].expediente, 21);
    assert_eq!(stored[0].fecha_inicial, today());
    assert_eq!(stored[0].documento_origen, "Compra");
}

// ---------------------------------------------------------------------------
// Test: edit page
// ---------------------------------------------------------------------------

#[tokio::test]
async fn edit_file_keeps_case_number_and_saves_changes() {
    let gateway = FakeGateway::new();
    gateway.add_file(file(10, false));
    let page = EditFilePage::new(session(&gateway), 10);

    assert_eq!(page.load().await, Navigation::Stay);
    assert_eq!(page.draft().unidad, "Archivo Central");
    assert!(!page.set("Expediente", "11"));
    assert!(page.set("Asunto", "Donación"));
    assert!(page.set("PeticionTransferencia", "true"));

    assert_eq!(page.submit().await, Submit::Done(Navigation::Go(Route::List)));
    let stored = gateway.files();
    assert_eq!(stored[0].expediente, 10);
    assert_eq!(stored[0].asunto.as_deref(), Some("Donación"));
    assert!(stored[0].peticion_transferencia);
    assert_eq!(gateway.count("PUT /ArchivoAdministrativo/10"), 1);
}

#[tokio::test]
async fn edit_file_load_failure_returns_to_list() {
    let gateway = FakeGateway::new();
    let page = EditFilePage::new(session(&gateway), 404);

    assert_eq!(page.load().await, Navigation::Go(Route::List));
    assert_eq!(page.errors().general(), Some(LOAD_FILE_FAILED));
}

#[tokio::test]
async fn delete_is_refused_while_another_is_running() {
    let gateway = FakeGateway::new();
    gateway.add_file(file(1, false));
    gateway.add_file(file(2, false));
    let page = std::sync::Arc::new(FileListPage::new(session(&gateway)));
    page.load().await;
    let gate = gateway.hold_writes();

    let first = tokio::spawn({
        let page = page.clone();
        async move { page.delete_file(1).await }
    });
    gate.entered.notified().await;

    assert_matches!(page.delete_file(2).await, Delete::Busy);
    gate.release.notify_one();
    assert_eq!(first.await.unwrap(), Delete::Deleted);
    assert_eq!(gateway.count("DELETE /ArchivoAdministrativo/2"), 0);
}
