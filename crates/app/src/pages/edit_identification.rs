use catalogo_core::fields::FieldInput;
use catalogo_core::identification::Identification;
use catalogo_core::{CaseNumber, ErrorTree};
use catalogo_gateway::GatewayError;

use super::{tenant_redirect, FormCell, Submit, SELECT_TENANT_FIRST};
use crate::in_flight::InFlight;
use crate::route::{Navigation, Route};
use crate::session::Session;

pub const INVALID_CASE_NUMBER: &str = "Número de expediente inválido.";
pub const INVALID_CASE_NUMBER_REDIRECT_MS: u64 = 1500;
pub const LOAD_IDENTIFICATION_FAILED: &str =
    "No se pudo cargar la información de la identificación para editar.";
pub const UPDATE_IDENTIFICATION_FAILED: &str = "No se pudo actualizar la identificación.";
pub const IDENTIFICATION_NOT_FOUND: &str =
    "Error: No se encontró la identificación para actualizar.";

/// `/editIdentification/{expediente}`.
#[derive(Debug)]
pub struct EditIdentificationPage {
    session: Session,
    case_number: CaseNumber,
    form: FormCell<Identification>,
    in_flight: InFlight,
    loading: InFlight,
}

impl EditIdentificationPage {
    pub fn new(session: Session, case_number: CaseNumber) -> Self {
        Self {
            session,
            case_number,
            form: FormCell::new(Identification::new(case_number)),
            in_flight: InFlight::new(),
            loading: InFlight::new(),
        }
    }

    /// Fetch the record. Missing groups are filled with empty ones so every
    /// section of the form can be edited.
    pub async fn load(&self) -> Navigation {
        let _loading = self.loading.begin();
        if let Some(nav) = tenant_redirect(&self.session) {
            self.form.set_general_error(SELECT_TENANT_FIRST);
            return nav;
        }
        if self.case_number <= 0 {
            self.form.set_general_error(INVALID_CASE_NUMBER);
            return Navigation::redirect(Route::List, INVALID_CASE_NUMBER_REDIRECT_MS);
        }

        let ctx = self.session.context();
        match self
            .session
            .gateway()
            .get_identification(&ctx, self.case_number)
            .await
        {
            Ok(mut record) => {
                record.fill_missing_groups();
                if record.expediente <= 0 {
                    record.expediente = self.case_number;
                }
                self.form.reset(record);
            }
            Err(e) => {
                tracing::error!(case_number = self.case_number, error = %e, "Failed to load identification");
                let message = match e {
                    GatewayError::Decode(message) => message,
                    _ => LOAD_IDENTIFICATION_FAILED.to_string(),
                };
                self.form.set_general_error(message);
            }
        }
        Navigation::Stay
    }

    /// True while a fetch is running.
    pub fn is_loading(&self) -> bool {
        self.loading.is_busy()
    }

    pub fn case_number(&self) -> CaseNumber {
        self.case_number
    }

    pub fn edit(&self, input: &FieldInput<'_>) -> bool {
        self.form.edit(input)
    }

    pub fn set(&self, key: &str, raw: &str) -> bool {
        self.form.set_key(key, raw)
    }

    pub fn draft(&self) -> Identification {
        self.form.draft()
    }

    pub fn errors(&self) -> ErrorTree {
        self.form.errors()
    }

    pub async fn submit(&self) -> Submit {
        let Some(_token) = self.in_flight.begin() else {
            return Submit::Busy;
        };
        let Some(record) = self.form.validated() else {
            return Submit::Failed;
        };

        let ctx = self.session.context();
        match self
            .session
            .gateway()
            .update_identification(&ctx, self.case_number, &record)
            .await
        {
            Ok(()) => Submit::Done(Navigation::Go(Route::List)),
            Err(e) => {
                tracing::error!(case_number = self.case_number, error = %e, "Failed to update identification");
                let message = if e.is_not_found() {
                    IDENTIFICATION_NOT_FOUND.to_string()
                } else {
                    e.user_message(UPDATE_IDENTIFICATION_FAILED)
                };
                self.form.set_general_error(message);
                Submit::Failed
            }
        }
    }

    pub fn cancel(&self) -> Navigation {
        Navigation::Go(Route::List)
    }
}
