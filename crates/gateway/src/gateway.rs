use async_trait::async_trait;
use catalogo_core::administrative_file::AdministrativeFile;
use catalogo_core::identification::Identification;
use catalogo_core::tenant::{Tenant, TenantDraft};
use catalogo_core::CaseNumber;

use crate::context::RequestContext;
use crate::error::GatewayError;

/// The backend REST surface used by the page controllers.
///
/// Tenant calls go out without a tenant header; every other call requires a
/// tenant in `ctx` and fails with [`GatewayError::MissingTenant`] otherwise.
#[async_trait]
pub trait BackendGateway: Send + Sync {
    // --- Tenants ---

    async fn list_tenants(&self) -> Result<Vec<Tenant>, GatewayError>;

    async fn create_tenant(&self, draft: &TenantDraft) -> Result<Tenant, GatewayError>;

    // --- Administrative files ---

    async fn list_files(&self, ctx: &RequestContext)
        -> Result<Vec<AdministrativeFile>, GatewayError>;

    async fn get_file(
        &self,
        ctx: &RequestContext,
        case_number: CaseNumber,
    ) -> Result<AdministrativeFile, GatewayError>;

    async fn create_file(
        &self,
        ctx: &RequestContext,
        file: &AdministrativeFile,
    ) -> Result<(), GatewayError>;

    async fn update_file(
        &self,
        ctx: &RequestContext,
        case_number: CaseNumber,
        file: &AdministrativeFile,
    ) -> Result<(), GatewayError>;

    async fn delete_file(
        &self,
        ctx: &RequestContext,
        case_number: CaseNumber,
    ) -> Result<(), GatewayError>;

    // --- Identifications ---

    async fn list_identifications(
        &self,
        ctx: &RequestContext,
    ) -> Result<Vec<Identification>, GatewayError>;

    async fn get_identification(
        &self,
        ctx: &RequestContext,
        case_number: CaseNumber,
    ) -> Result<Identification, GatewayError>;

    async fn create_identification(
        &self,
        ctx: &RequestContext,
        record: &Identification,
    ) -> Result<(), GatewayError>;

    async fn update_identification(
        &self,
        ctx: &RequestContext,
        case_number: CaseNumber,
        record: &Identification,
    ) -> Result<(), GatewayError>;

    async fn delete_identification(
        &self,
        ctx: &RequestContext,
        case_number: CaseNumber,
    ) -> Result<(), GatewayError>;

    // --- Existence checks ---

    /// Whether a file with this case number exists. A 404 means "no"; any
    /// other failure is returned.
    ///
    /// The default fetches and decodes the record. Implementations that can
    /// answer from the status alone should override both checks.
    async fn file_exists(
        &self,
        ctx: &RequestContext,
        case_number: CaseNumber,
    ) -> Result<bool, GatewayError> {
        match self.get_file(ctx, case_number).await {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Whether an identification exists for this case number.
    async fn identification_exists(
        &self,
        ctx: &RequestContext,
        case_number: CaseNumber,
    ) -> Result<bool, GatewayError> {
        match self.get_identification(ctx, case_number).await {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }
}
