use std::sync::Mutex;

use catalogo_core::fields::FieldInput;
use catalogo_core::tenant::TenantDraft;
use catalogo_core::ErrorTree;

use super::{lock, FormCell, Submit};
use crate::in_flight::InFlight;
use crate::route::{Navigation, Route};
use crate::session::Session;

pub const CREATE_TENANT_FAILED: &str = "No se pudo crear la institución.";

/// Pause on the success message before returning to the tenant list.
pub const CREATED_REDIRECT_MS: u64 = 1500;

/// `/createTenant`.
#[derive(Debug)]
pub struct CreateTenantPage {
    session: Session,
    form: FormCell<TenantDraft>,
    success: Mutex<Option<String>>,
    in_flight: InFlight,
}

impl CreateTenantPage {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            form: FormCell::new(TenantDraft::default()),
            success: Mutex::new(None),
            in_flight: InFlight::new(),
        }
    }

    pub fn edit(&self, input: &FieldInput<'_>) -> bool {
        self.form.edit(input)
    }

    pub fn set(&self, key: &str, raw: &str) -> bool {
        self.form.set_key(key, raw)
    }

    pub fn draft(&self) -> TenantDraft {
        self.form.draft()
    }

    pub fn errors(&self) -> ErrorTree {
        self.form.errors()
    }

    pub fn success(&self) -> Option<String> {
        lock(&self.success).clone()
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.is_busy()
    }

    /// Create the tenant, select it, and return to the tenant list after a
    /// short pause.
    pub async fn submit(&self) -> Submit {
        let Some(_token) = self.in_flight.begin() else {
            return Submit::Busy;
        };
        let Some(draft) = self.form.validated() else {
            return Submit::Failed;
        };

        match self.session.gateway().create_tenant(&draft).await {
            Ok(tenant) => {
                *lock(&self.success) = Some(format!("Institución {} creada exitosamente", tenant.name));
                self.session.select_tenant(tenant.id);
                Submit::Done(Navigation::redirect(Route::Tenants, CREATED_REDIRECT_MS))
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to create tenant");
                self.form
                    .set_general_error(e.user_message(CREATE_TENANT_FAILED));
                Submit::Failed
            }
        }
    }

    pub fn cancel(&self) -> Navigation {
        Navigation::Go(Route::Tenants)
    }
}
