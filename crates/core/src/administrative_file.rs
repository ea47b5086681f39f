//! Administrative files ("archivos administrativos"): the case-numbered
//! accession record an identification hangs off.

use chrono::NaiveDate;

use crate::dates;
use crate::error_tree::{ErrorLocation, ErrorTree};
use crate::fields::{define_field_enum, FieldValue, InputKind, NumberInput};
use crate::form::{FieldPath, FormModel};
use crate::types::{CaseNumber, RecordId};
use crate::validation;

/// Institution type preselected on a new file.
pub const DEFAULT_INSTITUTION_TYPE: &str = "UMRPSFXCH";

/// Origin document type preselected on a new file.
pub const DEFAULT_ORIGIN_DOCUMENT: &str = "Compra";

// ---------------------------------------------------------------------------
// Typed record
// ---------------------------------------------------------------------------

/// A stored administrative file. Optional text fields are `None` when empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdministrativeFile {
    pub id: Option<RecordId>,
    pub institucion: String,
    pub unidad: String,
    pub expediente: CaseNumber,
    pub serie: Option<String>,
    pub documento_origen: String,
    pub fecha_inicial: NaiveDate,
    pub fecha_final: Option<NaiveDate>,
    pub expediente_anterior: Option<String>,
    pub asunto: Option<String>,
    pub peticion_transferencia: bool,
    pub historial: Option<String>,
    pub archivo_documental: Option<String>,
    pub observaciones: Option<String>,
}

impl AdministrativeFile {
    /// Files with an active transfer request cannot be deleted.
    pub fn is_delete_blocked(&self) -> bool {
        self.peticion_transferencia
    }
}

// ---------------------------------------------------------------------------
// Form draft
// ---------------------------------------------------------------------------

define_field_enum! {
    /// Form keys of an administrative file.
    FileField {
        TipoInstitucion => "TipoInstitucion",
        Unidad => "Unidad",
        Expediente => "Expediente",
        Serie => "Serie",
        TipoDocumentoOrigen => "TipoDocumentoOrigen",
        FechaInicial => "FechaInicial",
        FechaFinal => "FechaFinal",
        ExpedienteAnterior => "ExpedienteAnterior",
        Asunto => "Asunto",
        PeticionTransferencia => "PeticionTransferencia",
        Historial => "Historial",
        ArchivoDocumental => "ArchivoDocumental",
        Observaciones => "Observaciones",
    }
}

impl FieldPath for FileField {
    fn location(self) -> ErrorLocation {
        ErrorLocation::Field(self.as_str())
    }
}

/// Editable form of an [`AdministrativeFile`]. Dates are `YYYY-MM-DD`
/// strings and the case number is a numeric input.
#[derive(Debug, Clone, PartialEq)]
pub struct AdministrativeFileDraft {
    pub id: Option<RecordId>,
    pub tipo_institucion: String,
    pub unidad: String,
    pub expediente: NumberInput,
    pub serie: String,
    pub tipo_documento_origen: String,
    pub fecha_inicial: String,
    pub fecha_final: String,
    pub expediente_anterior: String,
    pub asunto: String,
    pub peticion_transferencia: bool,
    pub historial: String,
    pub archivo_documental: String,
    pub observaciones: String,
}

impl AdministrativeFileDraft {
    /// A blank draft with the default selections and `today` as start date.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            id: None,
            tipo_institucion: DEFAULT_INSTITUTION_TYPE.to_string(),
            unidad: String::new(),
            expediente: NumberInput::default(),
            serie: String::new(),
            tipo_documento_origen: DEFAULT_ORIGIN_DOCUMENT.to_string(),
            fecha_inicial: today.format("%Y-%m-%d").to_string(),
            fecha_final: String::new(),
            expediente_anterior: String::new(),
            asunto: String::new(),
            peticion_transferencia: false,
            historial: String::new(),
            archivo_documental: String::new(),
            observaciones: String::new(),
        }
    }

    pub fn from_record(record: &AdministrativeFile) -> Self {
        let date = |d: NaiveDate| d.format("%Y-%m-%d").to_string();
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        Self {
            id: record.id.clone(),
            tipo_institucion: record.institucion.clone(),
            unidad: record.unidad.clone(),
            expediente: NumberInput::from(record.expediente),
            serie: text(&record.serie),
            tipo_documento_origen: record.documento_origen.clone(),
            fecha_inicial: date(record.fecha_inicial),
            fecha_final: record.fecha_final.map(date).unwrap_or_default(),
            expediente_anterior: text(&record.expediente_anterior),
            asunto: text(&record.asunto),
            peticion_transferencia: record.peticion_transferencia,
            historial: text(&record.historial),
            archivo_documental: text(&record.archivo_documental),
            observaciones: text(&record.observaciones),
        }
    }

    /// The case number, when the input currently holds a whole number.
    pub fn case_number(&self) -> Option<CaseNumber> {
        self.expediente.as_i64()
    }

    /// Validate and convert into the typed record.
    pub fn to_record(&self) -> Result<AdministrativeFile, ErrorTree> {
        let errors = validation::validate_file_draft(self);
        if !errors.is_empty() {
            return Err(errors);
        }

        let invalid = |field: FileField, message: &str| {
            let mut errors = ErrorTree::new();
            errors.insert(field.location(), message);
            errors
        };
        let expediente = self
            .case_number()
            .ok_or_else(|| invalid(FileField::Expediente, validation::CASE_NUMBER_REQUIRED))?;
        let fecha_inicial = dates::parse_date(&self.fecha_inicial)
            .ok_or_else(|| invalid(FileField::FechaInicial, validation::START_DATE_REQUIRED))?;
        let optional = |v: &str| {
            if v.is_empty() {
                None
            } else {
                Some(v.to_string())
            }
        };

        Ok(AdministrativeFile {
            id: self.id.clone(),
            institucion: self.tipo_institucion.clone(),
            unidad: self.unidad.clone(),
            expediente,
            serie: optional(&self.serie),
            documento_origen: self.tipo_documento_origen.clone(),
            fecha_inicial,
            fecha_final: dates::parse_date(&self.fecha_final),
            expediente_anterior: optional(&self.expediente_anterior),
            asunto: optional(&self.asunto),
            peticion_transferencia: self.peticion_transferencia,
            historial: optional(&self.historial),
            archivo_documental: optional(&self.archivo_documental),
            observaciones: optional(&self.observaciones),
        })
    }
}

impl FormModel for AdministrativeFileDraft {
    type Path = FileField;

    fn resolve_field(name: &str) -> Option<Self::Path> {
        FileField::parse(name)
    }

    fn input_kind(path: Self::Path) -> InputKind {
        match path {
            FileField::Expediente => InputKind::Number,
            FileField::FechaInicial | FileField::FechaFinal => InputKind::Date,
            FileField::TipoInstitucion
            | FileField::TipoDocumentoOrigen
            | FileField::PeticionTransferencia => InputKind::Select,
            FileField::Historial | FileField::Observaciones => InputKind::TextArea,
            _ => InputKind::Text,
        }
    }

    fn write(&mut self, path: Self::Path, value: FieldValue) {
        match path {
            FileField::Expediente => self.expediente = value.into_number(),
            FileField::PeticionTransferencia => self.peticion_transferencia = value.into_bool(),
            FileField::TipoInstitucion => self.tipo_institucion = value.into_text(),
            FileField::Unidad => self.unidad = value.into_text(),
            FileField::Serie => self.serie = value.into_text(),
            FileField::TipoDocumentoOrigen => self.tipo_documento_origen = value.into_text(),
            FileField::FechaInicial => self.fecha_inicial = value.into_text(),
            FileField::FechaFinal => self.fecha_final = value.into_text(),
            FileField::ExpedienteAnterior => self.expediente_anterior = value.into_text(),
            FileField::Asunto => self.asunto = value.into_text(),
            FileField::Historial => self.historial = value.into_text(),
            FileField::ArchivoDocumental => self.archivo_documental = value.into_text(),
            FileField::Observaciones => self.observaciones = value.into_text(),
        }
    }

    fn validate(&self) -> ErrorTree {
        validation::validate_file_draft(self)
    }
}
