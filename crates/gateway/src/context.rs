use catalogo_core::tenant;
use catalogo_core::TenantId;

use crate::error::GatewayError;

/// Header carrying the selected tenant on every tenant-scoped request.
pub const TENANT_HEADER: &str = "tenant";

/// Per-request context. Owned by the caller's session and passed explicitly
/// to every tenant-scoped gateway call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    tenant: Option<TenantId>,
}

impl RequestContext {
    /// A context with no tenant selected.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_tenant(tenant: impl Into<TenantId>) -> Self {
        Self {
            tenant: Some(tenant.into()),
        }
    }

    pub fn tenant(&self) -> Option<&str> {
        self.tenant.as_deref()
    }

    /// The tenant id, or [`GatewayError::MissingTenant`] when none is set.
    pub fn require_tenant(&self) -> Result<&str, GatewayError> {
        self.tenant().ok_or(GatewayError::MissingTenant)
    }

    /// The tenant's display name (id without the `tenant_` prefix).
    pub fn tenant_display_name(&self) -> Option<&str> {
        self.tenant().map(tenant::display_name)
    }

    pub fn select(&mut self, tenant: impl Into<TenantId>) {
        self.tenant = Some(tenant.into());
    }

    pub fn clear(&mut self) {
        self.tenant = None;
    }
}
