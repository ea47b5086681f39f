use chrono::NaiveDate;

use catalogo_core::administrative_file::{AdministrativeFileDraft, FileField};
use catalogo_core::fields::FieldInput;
use catalogo_core::{ErrorTree, FieldPath};

use super::{tenant_redirect, FormCell, Submit, SELECT_TENANT_FIRST};
use crate::in_flight::InFlight;
use crate::route::{Navigation, Route};
use crate::session::Session;

pub const CASE_NUMBER_TAKEN: &str = "El número de expediente ya existe.";
pub const CASE_NUMBER_CHECK_FAILED: &str = "Error al verificar el expediente. Intenta de nuevo.";
pub const CREATE_FILE_FAILED: &str = "No se pudo guardar el archivo administrativo.";

/// `/createAdministrativeFile`.
#[derive(Debug)]
pub struct CreateFilePage {
    session: Session,
    form: FormCell<AdministrativeFileDraft>,
    in_flight: InFlight,
}

impl CreateFilePage {
    /// A blank form whose start date is `today`.
    pub fn new(session: Session, today: NaiveDate) -> Self {
        Self {
            session,
            form: FormCell::new(AdministrativeFileDraft::new(today)),
            in_flight: InFlight::new(),
        }
    }

    pub fn open(&self) -> Navigation {
        match tenant_redirect(&self.session) {
            Some(nav) => {
                self.form.set_general_error(SELECT_TENANT_FIRST);
                nav
            }
            None => Navigation::Stay,
        }
    }

    pub fn edit(&self, input: &FieldInput<'_>) -> bool {
        self.form.edit(input)
    }

    pub fn set(&self, key: &str, raw: &str) -> bool {
        self.form.set_key(key, raw)
    }

    pub fn draft(&self) -> AdministrativeFileDraft {
        self.form.draft()
    }

    pub fn errors(&self) -> ErrorTree {
        self.form.errors()
    }

    /// Validate, make sure the case number is free, then create the file
    /// and continue to its identification.
    pub async fn submit(&self) -> Submit {
        let Some(_token) = self.in_flight.begin() else {
            return Submit::Busy;
        };
        let Some(draft) = self.form.validated() else {
            return Submit::Failed;
        };
        let record = match draft.to_record() {
            Ok(record) => record,
            Err(errors) => {
                self.form.set_errors(errors);
                return Submit::Failed;
            }
        };
        let case_number = record.expediente;
        let ctx = self.session.context();
        let gateway = self.session.gateway();

        match gateway.file_exists(&ctx, case_number).await {
            Ok(false) => {}
            Ok(true) => {
                tracing::info!(case_number, "Case number already in use");
                self.form
                    .set_error(FileField::Expediente.location(), CASE_NUMBER_TAKEN);
                return Submit::Failed;
            }
            Err(e) => {
                tracing::error!(case_number, error = %e, "Case number pre-check failed");
                self.form.set_general_error(CASE_NUMBER_CHECK_FAILED);
                return Submit::Failed;
            }
        }

        match gateway.create_file(&ctx, &record).await {
            Ok(()) => Submit::Done(Navigation::Go(Route::CreateIdentification {
                case_number: Some(case_number),
            })),
            Err(e) => {
                tracing::error!(case_number, error = %e, "Failed to create administrative file");
                self.form.set_general_error(e.user_message(CREATE_FILE_FAILED));
                Submit::Failed
            }
        }
    }

    pub fn cancel(&self) -> Navigation {
        Navigation::Go(Route::List)
    }
}
