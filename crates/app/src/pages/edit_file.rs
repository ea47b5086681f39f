use catalogo_core::administrative_file::{AdministrativeFileDraft, FileField};
use catalogo_core::fields::FieldInput;
use catalogo_core::{CaseNumber, ErrorTree};

use super::{tenant_redirect, FormCell, Submit, SELECT_TENANT_FIRST};
use crate::in_flight::InFlight;
use crate::route::{Navigation, Route};
use crate::session::Session;

pub const LOAD_FILE_FAILED: &str = "No se pudo cargar el archivo administrativo.";
pub const UPDATE_FILE_FAILED: &str = "No se pudo actualizar el archivo administrativo.";

/// `/editAdministrativeFile/{expediente}`. The case number is read-only.
#[derive(Debug)]
pub struct EditFilePage {
    session: Session,
    case_number: CaseNumber,
    form: FormCell<AdministrativeFileDraft>,
    in_flight: InFlight,
    loading: InFlight,
}

impl EditFilePage {
    pub fn new(session: Session, case_number: CaseNumber) -> Self {
        let form = FormCell::new(AdministrativeFileDraft::new(chrono::Utc::now().date_naive()));
        form.lock_path(FileField::Expediente);
        Self {
            session,
            case_number,
            form,
            in_flight: InFlight::new(),
            loading: InFlight::new(),
        }
    }

    pub fn case_number(&self) -> CaseNumber {
        self.case_number
    }

    /// Fetch the file into the form. A failed fetch returns to the list.
    pub async fn load(&self) -> Navigation {
        let _loading = self.loading.begin();
        if let Some(nav) = tenant_redirect(&self.session) {
            self.form.set_general_error(SELECT_TENANT_FIRST);
            return nav;
        }
        let ctx = self.session.context();
        match self.session.gateway().get_file(&ctx, self.case_number).await {
            Ok(file) => {
                self.form.reset(AdministrativeFileDraft::from_record(&file));
                Navigation::Stay
            }
            Err(e) => {
                tracing::error!(case_number = self.case_number, error = %e, "Failed to load administrative file");
                self.form.set_general_error(LOAD_FILE_FAILED);
                Navigation::Go(Route::List)
            }
        }
    }

    /// True while a fetch is running.
    pub fn is_loading(&self) -> bool {
        self.loading.is_busy()
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

        let ctx = self.session.context();
        match self
            .session
            .gateway()
            .update_file(&ctx, self.case_number, &record)
            .await
        {
            Ok(()) => Submit::Done(Navigation::Go(Route::List)),
            Err(e) => {
                tracing::error!(case_number = self.case_number, error = %e, "Failed to update administrative file");
                self.form.set_general_error(e.user_message(UPDATE_FILE_FAILED));
                Submit::Failed
            }
        }
    }

    pub fn cancel(&self) -> Navigation {
        Navigation::Go(Route::List)
    }
}
