//! The client session: backend gateway plus the selected tenant.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use catalogo_core::TenantId;
use catalogo_gateway::{BackendGateway, RequestContext};

/// Shared by every page controller of one client. Clones see the same
/// tenant selection; gateway calls receive a snapshot of the context.
#[derive(Clone)]
pub struct Session {
    gateway: Arc<dyn BackendGateway>,
    context: Arc<RwLock<RequestContext>>,
}

impl Session {
    pub fn new(gateway: Arc<dyn BackendGateway>) -> Self {
        Self {
            gateway,
            context: Arc::new(RwLock::new(RequestContext::new())),
        }
    }

    pub fn with_tenant(gateway: Arc<dyn BackendGateway>, tenant: impl Into<TenantId>) -> Self {
        let session = Self::new(gateway);
        session.select_tenant(tenant);
        session
    }

    pub fn gateway(&self) -> &dyn BackendGateway {
        self.gateway.as_ref()
    }

    /// Snapshot of the current request context.
    pub fn context(&self) -> RequestContext {
        self.context
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn tenant(&self) -> Option<TenantId> {
        self.context().tenant().map(str::to_string)
    }

    pub fn has_tenant(&self) -> bool {
        self.context().tenant().is_some()
    }

    /// The selected tenant without its `tenant_` prefix.
    pub fn tenant_display_name(&self) -> Option<String> {
        self.context().tenant_display_name().map(str::to_string)
    }

    pub fn select_tenant(&self, tenant: impl Into<TenantId>) {
        let tenant = tenant.into();
        tracing::info!(tenant = %tenant, "Tenant selected");
        self.context
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .select(tenant);
    }

    pub fn clear_tenant(&self) {
        tracing::info!("Tenant cleared");
        self.context
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("context", &self.context())
            .finish_non_exhaustive()
    }
}
