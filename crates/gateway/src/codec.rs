//! Wire-format conversions. Every casing rewrite and every date widening or
//! narrowing between the backend and the record models happens here, one
//! encode/decode pair per entity.

use catalogo_core::administrative_file::AdministrativeFile;
use catalogo_core::casing;
use catalogo_core::dates;
use catalogo_core::identification::Identification;
use catalogo_core::tenant::Tenant;
use catalogo_core::types::RecordId;
use catalogo_core::CoreError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::GatewayError;

/// Reported when a create-tenant response lacks its id or name.
pub const TENANT_RESPONSE_INCOMPLETE: &str =
    "La respuesta del servidor no contiene los datos esperados.";

// ---------------------------------------------------------------------------
// Identification
// ---------------------------------------------------------------------------

/// Decode one backend identification into form-model shape: group keys
/// upper-camel-cased, author dates narrowed to `YYYY-MM-DD`.
pub fn decode_identification(value: Value) -> Result<Identification, GatewayError> {
    let mapped = casing::map_backend_keys(value);
    let mut record: Identification = serde_json::from_value(mapped)?;
    if let Some(author) = record.author.as_mut() {
        author.birth_date = dates::date_input_value(Some(author.birth_date.as_str()));
        author.death_date = dates::date_input_value(Some(author.death_date.as_str()));
    }
    Ok(record)
}

pub fn decode_identifications(value: Value) -> Result<Vec<Identification>, GatewayError> {
    decode_rows(value, "identifications", decode_identification)
}

/// Encode a draft for POST/PUT.
///
/// Author dates widen to full timestamps (empty becomes `null`), numeric
/// inputs go out as numbers when they parse, `id` and `unit` are dropped,
/// and group keys are rewritten to backend casing.
pub fn encode_identification(record: &Identification) -> Result<Value, GatewayError> {
    let mut value = serde_json::to_value(record)?;
    let Value::Object(root) = &mut value else {
        return Err(GatewayError::Decode(
            "identification did not encode to an object".into(),
        ));
    };

    root.remove("id");
    root.remove("unit");
    root.insert("inventory".into(), record.inventory.to_json());
    root.insert("numberOfObjects".into(), record.number_of_objects.to_json());

    if let Some(author) = &record.author {
        let birth = dates::widen_to_timestamp("BirthDate", &author.birth_date)?;
        let death = dates::widen_to_timestamp("DeathDate", &author.death_date)?;
        if let Some(Value::Object(group)) = root.get_mut("author") {
            group.insert("BirthDate".into(), birth.map_or(Value::Null, Value::String));
            group.insert("DeathDate".into(), death.map_or(Value::Null, Value::String));
        }
    }

    Ok(casing::map_frontend_keys(value))
}

// ---------------------------------------------------------------------------
// Administrative file
// ---------------------------------------------------------------------------

/// Administrative file as the backend returns it (lower camel case).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileResponse {
    #[serde(default)]
    id: Option<RecordId>,
    #[serde(default)]
    institucion: Option<String>,
    #[serde(default)]
    unidad: Option<String>,
    expediente: i64,
    #[serde(default)]
    serie: Option<String>,
    #[serde(default)]
    documento_origen: Option<String>,
    #[serde(default)]
    fecha_inicial: Option<String>,
    #[serde(default)]
    fecha_final: Option<String>,
    #[serde(default)]
    expediente_anterior: Option<String>,
    #[serde(default)]
    asunto: Option<String>,
    #[serde(default)]
    peticion_transferencia: Option<bool>,
    #[serde(default)]
    historial: Option<String>,
    #[serde(default)]
    archivo_documental: Option<String>,
    #[serde(default)]
    observaciones: Option<String>,
}

/// Administrative file as the backend accepts it (upper camel case).
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct FilePayload<'a> {
    institucion: &'a str,
    unidad: &'a str,
    expediente: i64,
    serie: &'a str,
    documento_origen: &'a str,
    fecha_inicial: String,
    fecha_final: Option<String>,
    expediente_anterior: &'a str,
    asunto: &'a str,
    peticion_transferencia: bool,
    historial: &'a str,
    archivo_documental: &'a str,
    observaciones: &'a str,
}

fn text(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or_default()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

pub fn decode_file(value: Value) -> Result<AdministrativeFile, GatewayError> {
    let raw: FileResponse = serde_json::from_value(value)?;

    let start = raw.fecha_inicial.unwrap_or_default();
    let fecha_inicial = dates::narrow_to_date(&start).ok_or(CoreError::InvalidDate {
        field: "fechaInicial",
        value: start,
    })?;
    let fecha_final = match non_empty(raw.fecha_final) {
        Some(end) => Some(dates::narrow_to_date(&end).ok_or(CoreError::InvalidDate {
            field: "fechaFinal",
            value: end,
        })?),
        None => None,
    };

    Ok(AdministrativeFile {
        id: raw.id,
        institucion: raw.institucion.unwrap_or_default(),
        unidad: raw.unidad.unwrap_or_default(),
        expediente: raw.expediente,
        serie: non_empty(raw.serie),
        documento_origen: raw.documento_origen.unwrap_or_default(),
        fecha_inicial,
        fecha_final,
        expediente_anterior: non_empty(raw.expediente_anterior),
        asunto: non_empty(raw.asunto),
        peticion_transferencia: raw.peticion_transferencia.unwrap_or(false),
        historial: non_empty(raw.historial),
        archivo_documental: non_empty(raw.archivo_documental),
        observaciones: non_empty(raw.observaciones),
    })
}

pub fn decode_files(value: Value) -> Result<Vec<AdministrativeFile>, GatewayError> {
    decode_rows(value, "administrative files", decode_file)
}

/// Encode a file for POST/PUT. Dates widen to midnight-UTC timestamps and
/// absent optional text goes out as `""`.
pub fn encode_file(file: &AdministrativeFile) -> Result<Value, GatewayError> {
    let payload = FilePayload {
        institucion: &file.institucion,
        unidad: &file.unidad,
        expediente: file.expediente,
        serie: text(&file.serie),
        documento_origen: &file.documento_origen,
        fecha_inicial: dates::date_to_timestamp(file.fecha_inicial),
        fecha_final: file.fecha_final.map(dates::date_to_timestamp),
        expediente_anterior: text(&file.expediente_anterior),
        asunto: text(&file.asunto),
        peticion_transferencia: file.peticion_transferencia,
        historial: text(&file.historial),
        archivo_documental: text(&file.archivo_documental),
        observaciones: text(&file.observaciones),
    };
    Ok(serde_json::to_value(payload)?)
}

// ---------------------------------------------------------------------------
// Tenant
// ---------------------------------------------------------------------------

pub fn decode_tenants(value: Value) -> Result<Vec<Tenant>, GatewayError> {
    match value {
        Value::Null => Ok(Vec::new()),
        other => Ok(serde_json::from_value(other)?),
    }
}

/// Decode a create-tenant response, which must carry an id and a name.
pub fn decode_created_tenant(value: Value) -> Result<Tenant, GatewayError> {
    let tenant: Tenant = serde_json::from_value(value)
        .map_err(|_| GatewayError::Decode(TENANT_RESPONSE_INCOMPLETE.to_string()))?;
    if tenant.id.is_empty() || tenant.name.is_empty() {
        return Err(GatewayError::Decode(TENANT_RESPONSE_INCOMPLETE.to_string()));
    }
    Ok(tenant)
}

/// Decode a list row by row. A row that fails to decode is logged and
/// skipped; only a body that is not a list fails as a whole.
fn decode_rows<T>(
    value: Value,
    entity: &'static str,
    decode: fn(Value) -> Result<T, GatewayError>,
) -> Result<Vec<T>, GatewayError> {
    let items = match value {
        Value::Array(items) => items,
        Value::Null => return Ok(Vec::new()),
        other => {
            return Err(GatewayError::Decode(format!(
                "expected a list of {entity}, got {}",
                json_kind(&other)
            )))
        }
    };

    let total = items.len();
    let rows: Vec<T> = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match decode(item) {
            Ok(row) => Some(row),
            Err(e) => {
                tracing::warn!(entity, index, error = %e, "Skipping undecodable row");
                None
            }
        })
        .collect();
    if rows.len() < total {
        tracing::warn!(entity, total, kept = rows.len(), "Some rows were skipped");
    }
    Ok(rows)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
