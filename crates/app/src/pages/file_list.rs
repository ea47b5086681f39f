//! `/list`: the tenant's administrative files with their identifications.

use std::sync::Mutex;

use catalogo_core::detail::{self, DetailCard};
use catalogo_core::table::{FileTable, IdentificationTable, SearchField};
use catalogo_core::{CaseNumber, CoreError};

use super::{lock, Delete};
use crate::in_flight::InFlight;
use crate::route::{Navigation, Route};
use crate::session::Session;

pub const LOAD_FILES_FAILED: &str = "No se pudieron cargar los archivos administrativos";
pub const LOAD_IDENTIFICATIONS_FAILED: &str = "No se pudieron cargar las identificaciones";
pub const DELETE_FILE_FAILED: &str = "No se pudo eliminar el archivo administrativo.";
pub const DELETE_IDENTIFICATION_FAILED: &str = "No se pudo eliminar la identificación.";
pub const FILE_DETAILS_FAILED: &str = "No se pudo cargar los detalles del archivo administrativo.";
pub const IDENTIFICATION_DETAILS_FAILED: &str = "No se pudo cargar los detalles de la identificación.";
pub const FILE_HAS_IDENTIFICATION: &str =
    "No se puede eliminar el archivo porque tiene una identificación asociada.";
pub const IDENTIFICATION_CHECK_FAILED: &str =
    "No se pudo verificar si el archivo tiene una identificación asociada.";

#[derive(Debug)]
pub struct FileListPage {
    session: Session,
    files: Mutex<FileTable>,
    identifications: Mutex<IdentificationTable>,
    error: Mutex<Option<String>>,
    in_flight: InFlight,
    loading: InFlight,
}

impl FileListPage {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            files: Mutex::new(FileTable::default()),
            identifications: Mutex::new(IdentificationTable::default()),
            error: Mutex::new(None),
            in_flight: InFlight::new(),
            loading: InFlight::new(),
        }
    }

    /// Fetch both tables. Without a tenant the page leaves immediately.
    pub async fn load(&self) -> Navigation {
        let _loading = self.loading.begin();
        if !self.session.has_tenant() {
            return Navigation::Go(Route::Tenants);
        }
        *lock(&self.error) = None;
        self.reload_files().await;
        self.reload_identifications().await;
        Navigation::Stay
    }

    async fn reload_files(&self) {
        let ctx = self.session.context();
        match self.session.gateway().list_files(&ctx).await {
            Ok(files) => {
                lock(&self.files).replace(files);
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load administrative files");
                self.set_error(LOAD_FILES_FAILED);
            }
        }
    }

    async fn reload_identifications(&self) {
        let ctx = self.session.context();
        match self.session.gateway().list_identifications(&ctx).await {
            Ok(items) => {
                lock(&self.identifications).replace(items);
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load identifications");
                self.set_error(LOAD_IDENTIFICATIONS_FAILED);
            }
        }
    }

    fn set_error(&self, message: impl Into<String>) {
        *lock(&self.error) = Some(message.into());
    }

    /// True while a fetch is running.
    pub fn is_loading(&self) -> bool {
        self.loading.is_busy()
    }

    pub fn error(&self) -> Option<String> {
        lock(&self.error).clone()
    }

    /// Page heading, e.g. `Archivos Administrativos - mna`.
    pub fn title(&self) -> String {
        match self.session.tenant_display_name() {
            Some(name) => format!("Archivos Administrativos - {name}"),
            None => "Archivos Administrativos".to_string(),
        }
    }

    // --- Tables ---

    /// Read the file table.
    pub fn with_files<R>(&self, f: impl FnOnce(&FileTable) -> R) -> R {
        f(&lock(&self.files))
    }

    /// Read the identification table.
    pub fn with_identifications<R>(&self, f: impl FnOnce(&IdentificationTable) -> R) -> R {
        f(&lock(&self.identifications))
    }

    pub fn search_files(&self, query: &str) {
        lock(&self.files).set_query(query);
    }

    pub fn next_file_page(&self) -> bool {
        lock(&self.files).next_page()
    }

    pub fn previous_file_page(&self) -> bool {
        lock(&self.files).previous_page()
    }

    pub fn search_identifications(&self, field: SearchField, query: &str) {
        let mut table = lock(&self.identifications);
        table.set_field(field);
        table.set_query(query);
    }

    pub fn next_identification_page(&self) -> bool {
        lock(&self.identifications).next_page()
    }

    pub fn previous_identification_page(&self) -> bool {
        lock(&self.identifications).previous_page()
    }

    // --- Row actions ---

    /// Delete a file.
    ///
    /// Refused without a request when the row carries an active transfer
    /// request or when an identification exists for the case number.
    pub async fn delete_file(&self, case_number: CaseNumber) -> Delete {
        let Some(_token) = self.in_flight.begin() else {
            return Delete::Busy;
        };

        let gate = lock(&self.files).request_delete(case_number).map(|_| ());
        match gate {
            Ok(()) | Err(CoreError::NotFound { .. }) => {}
            Err(e) => {
                let message = match e {
                    CoreError::Conflict(message) => message,
                    other => other.to_string(),
                };
                tracing::info!(case_number, "File delete refused");
                self.set_error(message.clone());
                return Delete::Blocked(message);
            }
        }

        let ctx = self.session.context();
        let gateway = self.session.gateway();
        match gateway.identification_exists(&ctx, case_number).await {
            Ok(false) => {}
            Ok(true) => {
                tracing::info!(case_number, "File delete refused: identification exists");
                self.set_error(FILE_HAS_IDENTIFICATION);
                return Delete::Blocked(FILE_HAS_IDENTIFICATION.to_string());
            }
            Err(e) => {
                tracing::error!(case_number, error = %e, "Identification pre-check failed");
                self.set_error(IDENTIFICATION_CHECK_FAILED);
                return Delete::Failed;
            }
        }

        match gateway.delete_file(&ctx, case_number).await {
            Ok(()) => {
                *lock(&self.error) = None;
                self.reload_files().await;
                Delete::Deleted
            }
            Err(e) => {
                tracing::error!(case_number, error = %e, "Failed to delete administrative file");
                self.set_error(e.user_message(DELETE_FILE_FAILED));
                Delete::Failed
            }
        }
    }

    pub async fn delete_identification(&self, case_number: CaseNumber) -> Delete {
        let Some(_token) = self.in_flight.begin() else {
            return Delete::Busy;
        };
        let ctx = self.session.context();
        match self
            .session
            .gateway()
            .delete_identification(&ctx, case_number)
            .await
        {
            Ok(()) => {
                *lock(&self.error) = None;
                self.reload_identifications().await;
                Delete::Deleted
            }
            Err(e) => {
                tracing::error!(case_number, error = %e, "Failed to delete identification");
                self.set_error(e.user_message(DELETE_IDENTIFICATION_FAILED));
                Delete::Failed
            }
        }
    }

    /// Fetch one file and build its detail card.
    pub async fn file_details(&self, case_number: CaseNumber) -> Option<DetailCard> {
        let ctx = self.session.context();
        match self.session.gateway().get_file(&ctx, case_number).await {
            Ok(file) => Some(detail::file_card(&file)),
            Err(e) => {
                tracing::error!(case_number, error = %e, "Failed to load file details");
                self.set_error(FILE_DETAILS_FAILED);
                None
            }
        }
    }

    pub async fn identification_details(&self, case_number: CaseNumber) -> Option<DetailCard> {
        let ctx = self.session.context();
        match self
            .session
            .gateway()
            .get_identification(&ctx, case_number)
            .await
        {
            Ok(record) => Some(detail::identification_card(&record)),
            Err(e) => {
                tracing::error!(case_number, error = %e, "Failed to load identification details");
                self.set_error(IDENTIFICATION_DETAILS_FAILED);
                None
            }
        }
    }

    // --- Navigation ---

    pub fn create_file(&self) -> Navigation {
        Navigation::Go(Route::CreateAdministrativeFile)
    }

    pub fn edit_file(&self, case_number: CaseNumber) -> Navigation {
        Navigation::Go(Route::EditAdministrativeFile(case_number))
    }

    pub fn create_identification(&self, case_number: CaseNumber) -> Navigation {
        Navigation::Go(Route::CreateIdentification {
            case_number: Some(case_number),
        })
    }

    pub fn edit_identification(&self, case_number: CaseNumber) -> Navigation {
        Navigation::Go(Route::EditIdentification(case_number))
    }

    /// Leave the tenant: clears the selection.
    pub fn back_to_tenants(&self) -> Navigation {
        self.session.clear_tenant();
        Navigation::Go(Route::Tenants)
    }
}
