use std::sync::Mutex;

use catalogo_core::tenant::Tenant;

use super::lock;
use crate::in_flight::InFlight;
use crate::route::{Navigation, Route};
use crate::session::Session;

pub const LOAD_TENANTS_FAILED: &str = "No se pudieron cargar las instituciones.";

/// `/tenants`: pick the institution to work in.
#[derive(Debug)]
pub struct TenantListPage {
    session: Session,
    tenants: Mutex<Vec<Tenant>>,
    error: Mutex<Option<String>>,
    loading: InFlight,
}

impl TenantListPage {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            tenants: Mutex::new(Vec::new()),
            error: Mutex::new(None),
            loading: InFlight::new(),
        }
    }

    pub async fn load(&self) {
        let _loading = self.loading.begin();
        match self.session.gateway().list_tenants().await {
            Ok(tenants) => {
                tracing::debug!(count = tenants.len(), "Tenants loaded");
                *lock(&self.tenants) = tenants;
                *lock(&self.error) = None;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load tenants");
                *lock(&self.error) = Some(LOAD_TENANTS_FAILED.to_string());
            }
        }
    }

    /// True while a fetch is running.
    pub fn is_loading(&self) -> bool {
        self.loading.is_busy()
    }

    pub fn tenants(&self) -> Vec<Tenant> {
        lock(&self.tenants).clone()
    }

    pub fn error(&self) -> Option<String> {
        lock(&self.error).clone()
    }

    /// Make `tenant_id` the session's tenant and open its file list.
    pub fn select(&self, tenant_id: &str) -> Navigation {
        self.session.select_tenant(tenant_id);
        Navigation::Go(Route::List)
    }

    pub fn create_tenant(&self) -> Navigation {
        Navigation::Go(Route::CreateTenant)
    }
}
