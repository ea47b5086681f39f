#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::Notify;

use catalogo_app::Session;
use catalogo_core::administrative_file::AdministrativeFile;
use catalogo_core::fields::NumberInput;
use catalogo_core::identification::Identification;
use catalogo_core::tenant::{Tenant, TenantDraft};
use catalogo_core::CaseNumber;
use catalogo_gateway::{BackendGateway, GatewayError, RequestContext};

pub const TENANT: &str = "tenant_mna";

/// Holds write calls until released.
#[derive(Default)]
pub struct Gate {
    pub entered: Notify,
    pub release: Notify,
}

#[derive(Default)]
struct FakeState {
    tenants: Vec<Tenant>,
    files: Vec<AdministrativeFile>,
    identifications: Vec<Identification>,
    calls: Vec<String>,
    failures: HashMap<String, (u16, String)>,
}

/// In-memory backend that records every call as `METHOD /path`.
#[derive(Default)]
pub struct FakeGateway {
    state: Mutex<FakeState>,
    gate: Mutex<Option<Arc<Gate>>>,
}

impl FakeGateway {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn add_tenant(&self, tenant: Tenant) {
        self.state.lock().unwrap().tenants.push(tenant);
    }

    pub fn add_file(&self, file: AdministrativeFile) {
        self.state.lock().unwrap().files.push(file);
    }

    pub fn add_identification(&self, record: Identification) {
        self.state.lock().unwrap().identifications.push(record);
    }

    /// Make `call` (e.g. `POST /Identification`) fail with `status`.
    pub fn fail(&self, call: &str, status: u16, body: &str) {
        self.state
            .lock()
            .unwrap()
            .failures
            .insert(call.to_string(), (status, body.to_string()));
    }

    /// Hold every write until `gate.release` is notified.
    pub fn hold_writes(&self) -> Arc<Gate> {
        let gate = Arc::new(Gate::default());
        *self.gate.lock().unwrap() = Some(Arc::clone(&gate));
        gate
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls().iter().filter(|c| c.as_str() == call).count()
    }

    pub fn files(&self) -> Vec<AdministrativeFile> {
        self.state.lock().unwrap().files.clone()
    }

    pub fn identifications(&self) -> Vec<Identification> {
        self.state.lock().unwrap().identifications.clone()
    }

    fn record(&self, call: String) -> Result<(), GatewayError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call.clone());
        match state.failures.get(&call) {
            Some((status, body)) => Err(GatewayError::Api {
                status: *status,
                body: body.clone(),
            }),
            None => Ok(()),
        }
    }

    fn scoped(&self, ctx: &RequestContext, call: String) -> Result<(), GatewayError> {
        ctx.require_tenant()?;
        self.record(call)
    }

    async fn write(&self, ctx: &RequestContext, call: String) -> Result<(), GatewayError> {
        ctx.require_tenant()?;
        let gate = self.gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }
        self.record(call)
    }
}

fn not_found() -> GatewayError {
    GatewayError::Api {
        status: 404,
        body: r#"{"title":"Not Found","status":404}"#.to_string(),
    }
}

#[async_trait]
impl BackendGateway for FakeGateway {
    async fn list_tenants(&self) -> Result<Vec<Tenant>, GatewayError> {
        self.record("GET /Tenants".into())?;
        Ok(self.state.lock().unwrap().tenants.clone())
    }

    async fn create_tenant(&self, draft: &TenantDraft) -> Result<Tenant, GatewayError> {
        self.record("POST /Tenants".into())?;
        let tenant = Tenant {
            id: format!("tenant_{}", draft.isil.to_lowercase()),
            name: draft.name.clone(),
            isil: draft.isil.clone(),
            description: draft.description.clone(),
        };
        self.state.lock().unwrap().tenants.push(tenant.clone());
        Ok(tenant)
    }

    async fn list_files(
        &self,
        ctx: &RequestContext,
    ) -> Result<Vec<AdministrativeFile>, GatewayError> {
        self.scoped(ctx, "GET /ArchivoAdministrativo".into())?;
        Ok(self.files())
    }

    async fn get_file(
        &self,
        ctx: &RequestContext,
        case_number: CaseNumber,
    ) -> Result<AdministrativeFile, GatewayError> {
        self.scoped(ctx, format!("GET /ArchivoAdministrativo/{case_number}"))?;
        self.files()
            .into_iter()
            .find(|f| f.expediente == case_number)
            .ok_or_else(not_found)
    }

    async fn create_file(
        &self,
        ctx: &RequestContext,
        file: &AdministrativeFile,
    ) -> Result<(), GatewayError> {
        self.write(ctx, "POST /ArchivoAdministrativo".into()).await?;
        self.add_file(file.clone());
        Ok(())
    }

    async fn update_file(
        &self,
        ctx: &RequestContext,
        case_number: CaseNumber,
        file: &AdministrativeFile,
    ) -> Result<(), GatewayError> {
        self.write(ctx, format!("PUT /ArchivoAdministrativo/{case_number}"))
            .await?;
        let mut state = self.state.lock().unwrap();
        match state.files.iter_mut().find(|f| f.expediente == case_number) {
            Some(slot) => {
                *slot = file.clone();
                Ok(())
            }
            None => Err(not_found()),
        }
    }

    async fn delete_file(
        &self,
        ctx: &RequestContext,
        case_number: CaseNumber,
    ) -> Result<(), GatewayError> {
        self.write(ctx, format!("DELETE /ArchivoAdministrativo/{case_number}"))
            .await?;
        self.state
            .lock()
            .unwrap()
            .files
            .retain(|f| f.expediente != case_number);
        Ok(())
    }

    async fn list_identifications(
        &self,
        ctx: &RequestContext,
    ) -> Result<Vec<Identification>, GatewayError> {
        self.scoped(ctx, "GET /Identification".into())?;
        Ok(self.identifications())
    }

    async fn get_identification(
        &self,
        ctx: &RequestContext,
        case_number: CaseNumber,
    ) -> Result<Identification, GatewayError> {
        self.scoped(ctx, format!("GET /Identification/{case_number}"))?;
        self.identifications()
            .into_iter()
            .find(|i| i.expediente == case_number)
            .ok_or_else(not_found)
    }

    async fn create_identification(
        &self,
        ctx: &RequestContext,
        record: &Identification,
    ) -> Result<(), GatewayError> {
        self.write(ctx, "POST /Identification".into()).await?;
        self.add_identification(record.clone());
        Ok(())
    }

    async fn update_identification(
        &self,
        ctx: &RequestContext,
        case_number: CaseNumber,
        record: &Identification,
    ) -> Result<(), GatewayError> {
        self.write(ctx, format!("PUT /Identification/{case_number}"))
            .await?;
        let mut state = self.state.lock().unwrap();
        match state
            .identifications
            .iter_mut()
            .find(|i| i.expediente == case_number)
        {
            Some(slot) => {
                *slot = record.clone();
                Ok(())
            }
            None => Err(not_found()),
        }
    }

    async fn delete_identification(
        &self,
        ctx: &RequestContext,
        case_number: CaseNumber,
    ) -> Result<(), GatewayError> {
        self.write(ctx, format!("DELETE /Identification/{case_number}"))
            .await?;
        self.state
            .lock()
            .unwrap()
            .identifications
            .retain(|i| i.expediente != case_number);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn session(gateway: &Arc<FakeGateway>) -> Session {
    Session::with_tenant(gateway.clone(), TENANT)
}

pub fn session_without_tenant(gateway: &Arc<FakeGateway>) -> Session {
    Session::new(gateway.clone())
}

pub fn file(case_number: CaseNumber, transfer: bool) -> AdministrativeFile {
    AdministrativeFile {
        id: None,
        institucion: "UMRPSFXCH".into(),
        unidad: "Archivo Central".into(),
        expediente: case_number,
        serie: None,
        documento_origen: "Compra".into(),
        fecha_inicial: NaiveDate::from_ymd_opt(2023, 3, 1).unwrap(),
        fecha_final: None,
        expediente_anterior: None,
        asunto: Some("Adquisición".into()),
        peticion_transferencia: transfer,
        historial: None,
        archivo_documental: None,
        observaciones: None,
    }
}

/// An identification that passes every required-field rule.
pub fn complete_identification(case_number: CaseNumber) -> Identification {
    let mut record = Identification::new(case_number);
    record.inventory = NumberInput::from(12);
    record.generic_classification = "Pintura".into();
    record.object_name = "Óleo".into();
    record.observations = "Buen estado".into();
    if let Some(section) = record.section.as_mut() {
        section.room = "Sala 1".into();
    }
    if let Some(typology) = record.typology.as_mut() {
        typology.r#type = "Bidimensional".into();
    }
    if let Some(name) = record.specific_name.as_mut() {
        name.generic_name = "Retrato".into();
    }
    if let Some(author) = record.author.as_mut() {
        author.name = "Melchor Pérez de Holguín".into();
        author.birth_place = "Cochabamba".into();
        author.birth_date = "1660-01-01".into();
    }
    if let Some(title) = record.title.as_mut() {
        title.name = "San Juan de Dios".into();
    }
    if let Some(material) = record.material.as_mut() {
        material.material_name = "Lienzo".into();
    }
    if let Some(techniques) = record.techniques.as_mut() {
        techniques.technique_name = "Óleo".into();
    }
    record
}
