use catalogo_core::fields::FieldInput;
use catalogo_core::identification::Identification;
use catalogo_core::{CaseNumber, ErrorTree};

use super::{tenant_redirect, FormCell, Submit, SELECT_TENANT_FIRST};
use crate::in_flight::InFlight;
use crate::route::{Navigation, Route};
use crate::session::Session;

pub const MISSING_CASE_NUMBER: &str =
    "No se proporcionó un número de expediente válido para la identificación.";
pub const MISSING_CASE_NUMBER_REDIRECT_MS: u64 = 2000;
pub const CREATE_IDENTIFICATION_FAILED: &str = "No se pudo guardar la identificación.";

/// `/createIdentification`, reached with the case number of the file it
/// belongs to.
#[derive(Debug)]
pub struct CreateIdentificationPage {
    session: Session,
    case_number: Option<CaseNumber>,
    form: FormCell<Identification>,
    in_flight: InFlight,
}

impl CreateIdentificationPage {
    pub fn new(session: Session, case_number: Option<CaseNumber>) -> Self {
        let case_number = case_number.filter(|n| *n > 0);
        Self {
            session,
            case_number,
            form: FormCell::new(Identification::new(case_number.unwrap_or_default())),
            in_flight: InFlight::new(),
        }
    }

    pub fn open(&self) -> Navigation {
        if let Some(nav) = tenant_redirect(&self.session) {
            self.form.set_general_error(SELECT_TENANT_FIRST);
            return nav;
        }
        if self.case_number.is_none() {
            tracing::warn!("Identification form opened without a case number");
            self.form.set_general_error(MISSING_CASE_NUMBER);
            return Navigation::redirect(Route::List, MISSING_CASE_NUMBER_REDIRECT_MS);
        }
        Navigation::Stay
    }

    pub fn case_number(&self) -> Option<CaseNumber> {
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

    pub fn is_submitting(&self) -> bool {
        self.in_flight.is_busy()
    }

    pub async fn submit(&self) -> Submit {
        let Some(_token) = self.in_flight.begin() else {
            return Submit::Busy;
        };
        let Some(case_number) = self.case_number else {
            self.form.set_general_error(MISSING_CASE_NUMBER);
            return Submit::Failed;
        };
        let Some(record) = self.form.validated() else {
            return Submit::Failed;
        };

        let ctx = self.session.context();
        match self
            .session
            .gateway()
            .create_identification(&ctx, &record)
            .await
        {
            Ok(()) => Submit::Done(Navigation::Go(Route::List)),
            Err(e) => {
                tracing::error!(case_number, error = %e, "Failed to create identification");
                let message = e.user_message(CREATE_IDENTIFICATION_FAILED);
                let message = if e.is_conflict() {
                    format!("Conflicto: {message}")
                } else {
                    message
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
