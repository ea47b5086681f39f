//! REST client for the catalogue backend.
//!
//! Wraps the backend HTTP API (tenants, administrative files,
//! identifications) using [`reqwest`]. Every body passes through
//! [`crate::codec`].

use std::time::Duration;

use async_trait::async_trait;
use catalogo_core::administrative_file::AdministrativeFile;
use catalogo_core::identification::Identification;
use catalogo_core::tenant::{Tenant, TenantDraft};
use catalogo_core::CaseNumber;
use reqwest::{Method, RequestBuilder, Response};
use serde_json::Value;

use crate::codec;
use crate::context::{RequestContext, TENANT_HEADER};
use crate::error::GatewayError;
use crate::gateway::BackendGateway;

const TENANTS: &str = "Tenants";
const FILES: &str = "ArchivoAdministrativo";
const IDENTIFICATIONS: &str = "Identification";

/// HTTP gateway for one backend instance.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpGateway {
    /// Create a gateway for `base_url` (e.g. `http://localhost:5258/`) with a
    /// per-request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Create a gateway reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// A request without the tenant header.
    fn unscoped(&self, method: Method, path: &str) -> RequestBuilder {
        self.client.request(method, self.url(path))
    }

    /// A request carrying the context's tenant header.
    fn scoped(
        &self,
        method: Method,
        ctx: &RequestContext,
        path: &str,
    ) -> Result<RequestBuilder, GatewayError> {
        let tenant = ctx.require_tenant()?;
        Ok(self
            .client
            .request(method, self.url(path))
            .header(TENANT_HEADER, tenant))
    }

    // ---- private helpers ----

    async fn send(request: RequestBuilder, path: &str) -> Result<Response, GatewayError> {
        tracing::debug!(path, "Backend request");
        let response = request.send().await.map_err(|e| {
            tracing::error!(path, error = %e, "Backend request failed");
            e
        })?;
        Self::ensure_success(response, path).await
    }

    /// Ensure the response has a success status code. Returns the response
    /// unchanged on success, or a [`GatewayError::Api`] carrying the status
    /// and body text on failure.
    async fn ensure_success(response: Response, path: &str) -> Result<Response, GatewayError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::warn!(path, status = status.as_u16(), "Backend returned an error status");
            return Err(GatewayError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Read a successful JSON body. An empty body reads as `null`.
    async fn read_json(response: Response) -> Result<Value, GatewayError> {
        let bytes = response.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn get_json(
        &self,
        ctx: &RequestContext,
        path: &str,
    ) -> Result<Value, GatewayError> {
        let request = self.scoped(Method::GET, ctx, path)?;
        let response = Self::send(request, path).await?;
        Self::read_json(response).await
    }

    /// Status-only existence check: any 2xx means present, 404 means absent.
    /// The body is never decoded.
    async fn exists(&self, ctx: &RequestContext, path: &str) -> Result<bool, GatewayError> {
        let request = self.scoped(Method::GET, ctx, path)?;
        match Self::send(request, path).await {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn write_json(
        &self,
        method: Method,
        ctx: &RequestContext,
        path: &str,
        body: &Value,
    ) -> Result<(), GatewayError> {
        let request = self.scoped(method, ctx, path)?.json(body);
        Self::send(request, path).await?;
        Ok(())
    }
}

#[async_trait]
impl BackendGateway for HttpGateway {
    async fn list_tenants(&self) -> Result<Vec<Tenant>, GatewayError> {
        let response = Self::send(self.unscoped(Method::GET, TENANTS), TENANTS).await?;
        codec::decode_tenants(Self::read_json(response).await?)
    }

    async fn create_tenant(&self, draft: &TenantDraft) -> Result<Tenant, GatewayError> {
        let request = self.unscoped(Method::POST, TENANTS).json(draft);
        let response = Self::send(request, TENANTS).await?;
        let tenant = codec::decode_created_tenant(Self::read_json(response).await?)?;
        tracing::info!(tenant = %tenant.id, "Tenant created");
        Ok(tenant)
    }

    async fn list_files(
        &self,
        ctx: &RequestContext,
    ) -> Result<Vec<AdministrativeFile>, GatewayError> {
        codec::decode_files(self.get_json(ctx, FILES).await?)
    }

    async fn get_file(
        &self,
        ctx: &RequestContext,
        case_number: CaseNumber,
    ) -> Result<AdministrativeFile, GatewayError> {
        let path = format!("{FILES}/{case_number}");
        codec::decode_file(self.get_json(ctx, &path).await?)
    }

    async fn create_file(
        &self,
        ctx: &RequestContext,
        file: &AdministrativeFile,
    ) -> Result<(), GatewayError> {
        let body = codec::encode_file(file)?;
        self.write_json(Method::POST, ctx, FILES, &body).await?;
        tracing::info!(case_number = file.expediente, "Administrative file created");
        Ok(())
    }

    async fn update_file(
        &self,
        ctx: &RequestContext,
        case_number: CaseNumber,
        file: &AdministrativeFile,
    ) -> Result<(), GatewayError> {
        let body = codec::encode_file(file)?;
        let path = format!("{FILES}/{case_number}");
        self.write_json(Method::PUT, ctx, &path, &body).await?;
        tracing::info!(case_number, "Administrative file updated");
        Ok(())
    }

    async fn delete_file(
        &self,
        ctx: &RequestContext,
        case_number: CaseNumber,
    ) -> Result<(), GatewayError> {
        let path = format!("{FILES}/{case_number}");
        Self::send(self.scoped(Method::DELETE, ctx, &path)?, &path).await?;
        tracing::info!(case_number, "Administrative file deleted");
        Ok(())
    }

    async fn list_identifications(
        &self,
        ctx: &RequestContext,
    ) -> Result<Vec<Identification>, GatewayError> {
        codec::decode_identifications(self.get_json(ctx, IDENTIFICATIONS).await?)
    }

    async fn get_identification(
        &self,
        ctx: &RequestContext,
        case_number: CaseNumber,
    ) -> Result<Identification, GatewayError> {
        let path = format!("{IDENTIFICATIONS}/{case_number}");
        match self.get_json(ctx, &path).await? {
            Value::Null => Err(GatewayError::Decode(format!(
                "No se recibieron datos para la identificación con expediente {case_number}."
            ))),
            body => codec::decode_identification(body),
        }
    }

    async fn create_identification(
        &self,
        ctx: &RequestContext,
        record: &Identification,
    ) -> Result<(), GatewayError> {
        let body = codec::encode_identification(record)?;
        self.write_json(Method::POST, ctx, IDENTIFICATIONS, &body)
            .await?;
        tracing::info!(case_number = record.expediente, "Identification created");
        Ok(())
    }

    async fn update_identification(
        &self,
        ctx: &RequestContext,
        case_number: CaseNumber,
        record: &Identification,
    ) -> Result<(), GatewayError> {
        let body = codec::encode_identification(record)?;
        let path = format!("{IDENTIFICATIONS}/{case_number}");
        self.write_json(Method::PUT, ctx, &path, &body).await?;
        tracing::info!(case_number, "Identification updated");
        Ok(())
    }

    async fn delete_identification(
        &self,
        ctx: &RequestContext,
        case_number: CaseNumber,
    ) -> Result<(), GatewayError> {
        let path = format!("{IDENTIFICATIONS}/{case_number}");
        Self::send(self.scoped(Method::DELETE, ctx, &path)?, &path).await?;
        tracing::info!(case_number, "Identification deleted");
        Ok(())
    }

    async fn file_exists(
        &self,
        ctx: &RequestContext,
        case_number: CaseNumber,
    ) -> Result<bool, GatewayError> {
        self.exists(ctx, &format!("{FILES}/{case_number}")).await
    }

    async fn identification_exists(
        &self,
        ctx: &RequestContext,
        case_number: CaseNumber,
    ) -> Result<bool, GatewayError> {
        self.exists(ctx, &format!("{IDENTIFICATIONS}/{case_number}"))
            .await
    }
}
