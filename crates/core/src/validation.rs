//! Required-field rules. Pure logic: every function takes a draft by
//! reference and returns a fresh error tree; an empty tree means "valid".

use crate::administrative_file::{AdministrativeFileDraft, FileField};
use crate::dates;
use crate::error_tree::{ErrorLocation, ErrorTree};
use crate::identification::Identification;
use crate::tenant::{TenantDraft, TenantField};

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

pub const INVENTORY_REQUIRED: &str = "El inventario es obligatorio y debe ser mayor a 0.";
pub const NUMBER_OF_OBJECTS_REQUIRED: &str = "El número de objetos debe ser mayor a 0.";
pub const GENERIC_CLASSIFICATION_REQUIRED: &str = "La clasificación genérica es obligatoria.";
pub const OBJECT_NAME_REQUIRED: &str = "El nombre del objeto es obligatorio.";
pub const OBSERVATIONS_REQUIRED: &str = "Las observaciones son obligatorias.";
pub const ROOM_REQUIRED: &str = "La Sala es obligatoria.";
pub const TYPE_REQUIRED: &str = "El Tipo (Tipología) es obligatorio.";
pub const GENERIC_NAME_REQUIRED: &str = "El Nombre Genérico (Nombre Específico) es obligatorio.";
pub const AUTHOR_NAME_REQUIRED: &str = "El Nombre (Autor) es obligatorio.";
pub const BIRTH_PLACE_REQUIRED: &str = "El Lugar de Nacimiento (Autor) es obligatorio.";
pub const BIRTH_DATE_REQUIRED: &str = "La Fecha de Nacimiento (Autor) es obligatoria.";
pub const BIRTH_DATE_INVALID: &str = "La Fecha de Nacimiento (Autor) no es válida.";
pub const DEATH_DATE_INVALID: &str = "La Fecha de Fallecimiento (Autor) no es válida.";
pub const TITLE_REQUIRED: &str = "El Título es obligatorio.";
pub const MATERIAL_REQUIRED: &str = "La Materia es obligatoria.";
pub const TECHNIQUE_REQUIRED: &str = "La Técnica es obligatoria.";

pub const INSTITUTION_REQUIRED: &str = "La institución es obligatoria.";
pub const UNIT_REQUIRED: &str = "La unidad es obligatoria.";
pub const CASE_NUMBER_REQUIRED: &str = "El expediente es obligatorio y debe ser mayor a 0.";
pub const ORIGIN_DOCUMENT_REQUIRED: &str = "El tipo de documento origen es obligatorio.";
pub const START_DATE_REQUIRED: &str = "La fecha inicial es obligatoria.";
pub const END_DATE_INVALID: &str = "La fecha final no es válida.";

pub const TENANT_NAME_REQUIRED: &str = "El nombre de la institución es obligatorio.";
pub const TENANT_ISIL_REQUIRED: &str = "El identificador ISIL es obligatorio.";
pub const TENANT_DESCRIPTION_REQUIRED: &str = "La descripción es obligatoria.";

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn group(group: &'static str, field: &'static str) -> ErrorLocation {
    ErrorLocation::GroupField { group, field }
}

// ---------------------------------------------------------------------------
// Identification
// ---------------------------------------------------------------------------

/// Validate an identification draft.
///
/// An absent group is treated like an empty one, so its required sub-field
/// fails. No cross-field checks are made.
pub fn validate_identification(draft: &Identification) -> ErrorTree {
    let mut errors = ErrorTree::new();

    if !draft.inventory.is_positive() {
        errors.insert(ErrorLocation::Field("inventory"), INVENTORY_REQUIRED);
    }
    if !draft.number_of_objects.is_positive() {
        errors.insert(ErrorLocation::Field("numberOfObjects"), NUMBER_OF_OBJECTS_REQUIRED);
    }
    if is_blank(&draft.generic_classification) {
        errors.insert(
            ErrorLocation::Field("genericClassification"),
            GENERIC_CLASSIFICATION_REQUIRED,
        );
    }
    if is_blank(&draft.object_name) {
        errors.insert(ErrorLocation::Field("objectName"), OBJECT_NAME_REQUIRED);
    }

    let room = draft.section.as_ref().map_or("", |s| s.room.as_str());
    if is_blank(room) {
        errors.insert(group("section", "Room"), ROOM_REQUIRED);
    }
    let kind = draft.typology.as_ref().map_or("", |t| t.r#type.as_str());
    if is_blank(kind) {
        errors.insert(group("typology", "Type"), TYPE_REQUIRED);
    }
    let generic_name = draft
        .specific_name
        .as_ref()
        .map_or("", |s| s.generic_name.as_str());
    if is_blank(generic_name) {
        errors.insert(group("specificName", "GenericName"), GENERIC_NAME_REQUIRED);
    }

    let (name, birth_place, birth_date, death_date) =
        draft.author.as_ref().map_or(("", "", "", ""), |a| {
            (
                a.name.as_str(),
                a.birth_place.as_str(),
                a.birth_date.as_str(),
                a.death_date.as_str(),
            )
        });
    if is_blank(name) {
        errors.insert(group("author", "Name"), AUTHOR_NAME_REQUIRED);
    }
    if is_blank(birth_place) {
        errors.insert(group("author", "BirthPlace"), BIRTH_PLACE_REQUIRED);
    }
    if is_blank(birth_date) {
        errors.insert(group("author", "BirthDate"), BIRTH_DATE_REQUIRED);
    } else if dates::parse_date(birth_date).is_none() {
        errors.insert(group("author", "BirthDate"), BIRTH_DATE_INVALID);
    }
    // Death date is optional, but must parse when given.
    if !is_blank(death_date) && dates::parse_date(death_date).is_none() {
        errors.insert(group("author", "DeathDate"), DEATH_DATE_INVALID);
    }

    let title = draft.title.as_ref().map_or("", |t| t.name.as_str());
    if is_blank(title) {
        errors.insert(group("title", "Name"), TITLE_REQUIRED);
    }
    let material = draft
        .material
        .as_ref()
        .map_or("", |m| m.material_name.as_str());
    if is_blank(material) {
        errors.insert(group("material", "MaterialName"), MATERIAL_REQUIRED);
    }
    let technique = draft
        .techniques
        .as_ref()
        .map_or("", |t| t.technique_name.as_str());
    if is_blank(technique) {
        errors.insert(group("techniques", "TechniqueName"), TECHNIQUE_REQUIRED);
    }

    if is_blank(&draft.observations) {
        errors.insert(ErrorLocation::Field("observations"), OBSERVATIONS_REQUIRED);
    }

    errors
}

// ---------------------------------------------------------------------------
// Administrative file
// ---------------------------------------------------------------------------

pub fn validate_file_draft(draft: &AdministrativeFileDraft) -> ErrorTree {
    let mut errors = ErrorTree::new();
    let at = |field: FileField| ErrorLocation::Field(field.as_str());

    if is_blank(&draft.tipo_institucion) {
        errors.insert(at(FileField::TipoInstitucion), INSTITUTION_REQUIRED);
    }
    if is_blank(&draft.unidad) {
        errors.insert(at(FileField::Unidad), UNIT_REQUIRED);
    }
    if !draft.expediente.as_i64().is_some_and(|n| n > 0) {
        errors.insert(at(FileField::Expediente), CASE_NUMBER_REQUIRED);
    }
    if is_blank(&draft.tipo_documento_origen) {
        errors.insert(at(FileField::TipoDocumentoOrigen), ORIGIN_DOCUMENT_REQUIRED);
    }
    if dates::parse_date(&draft.fecha_inicial).is_none() {
        errors.insert(at(FileField::FechaInicial), START_DATE_REQUIRED);
    }
    if !is_blank(&draft.fecha_final) && dates::parse_date(&draft.fecha_final).is_none() {
        errors.insert(at(FileField::FechaFinal), END_DATE_INVALID);
    }

    errors
}

// ---------------------------------------------------------------------------
// Tenant
// ---------------------------------------------------------------------------

pub fn validate_tenant_draft(draft: &TenantDraft) -> ErrorTree {
    let mut errors = ErrorTree::new();
    let rules = [
        (TenantField::Name, draft.name.as_str(), TENANT_NAME_REQUIRED),
        (TenantField::Isil, draft.isil.as_str(), TENANT_ISIL_REQUIRED),
        (
            TenantField::Description,
            draft.description.as_str(),
            TENANT_DESCRIPTION_REQUIRED,
        ),
    ];
    for (field, value, message) in rules {
        if is_blank(value) {
            errors.insert(ErrorLocation::Field(field.as_str()), message);
        }
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::NumberInput;
    use crate::identification::{Author, Material, Section, Techniques, Title, Typology};
    use crate::identification::SpecificName;
    use chrono::NaiveDate;
    use serde_json::json;

    fn complete() -> Identification {
        Identification {
            inventory: NumberInput::from(5),
            number_of_objects: NumberInput::from(1),
            generic_classification: "Pintura".into(),
            object_name: "Lienzo".into(),
            observations: "Sin daños".into(),
            section: Some(Section {
                room: "Sala A".into(),
                ..Default::default()
            }),
            typology: Some(Typology {
                r#type: "Óleo".into(),
                ..Default::default()
            }),
            specific_name: Some(SpecificName {
                generic_name: "Retrato".into(),
                ..Default::default()
            }),
            author: Some(Author {
                name: "Melchor Pérez de Holguín".into(),
                birth_place: "Cochabamba".into(),
                birth_date: "1660-01-01".into(),
                ..Default::default()
            }),
            title: Some(Title {
                name: "San Juan".into(),
                ..Default::default()
            }),
            material: Some(Material {
                material_name: "Tela".into(),
                ..Default::default()
            }),
            techniques: Some(Techniques {
                technique_name: "Óleo".into(),
                ..Default::default()
            }),
            ..Identification::new(7)
        }
    }

    // -- identification ------------------------------------------------------

    #[test]
    fn complete_draft_is_valid() {
        assert!(validate_identification(&complete()).is_empty());
    }

    #[test]
    fn zero_inventory_is_the_only_error() {
        let draft = Identification {
            inventory: NumberInput::from(0),
            ..complete()
        };
        let errors = validate_identification(&draft);
        assert_eq!(
            serde_json::to_value(&errors).unwrap(),
            json!({"inventory": INVENTORY_REQUIRED})
        );
    }

    #[test]
    fn group_failures_merge() {
        let mut draft = complete();
        draft.author = Some(Author::default());
        let errors = validate_identification(&draft);
        assert_eq!(
            serde_json::to_value(&errors).unwrap(),
            json!({"author": {
                "Name": AUTHOR_NAME_REQUIRED,
                "BirthPlace": BIRTH_PLACE_REQUIRED,
                "BirthDate": BIRTH_DATE_REQUIRED,
            }})
        );
    }

    #[test]
    fn whitespace_only_text_is_blank() {
        let draft = Identification {
            object_name: "   ".into(),
            ..complete()
        };
        let errors = validate_identification(&draft);
        assert_eq!(
            errors.get(ErrorLocation::Field("objectName")),
            Some(OBJECT_NAME_REQUIRED)
        );
    }

    #[test]
    fn whitespace_only_birth_date_is_required() {
        let mut draft = complete();
        if let Some(author) = draft.author.as_mut() {
            author.birth_date = "   ".into();
        }
        let errors = validate_identification(&draft);
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get(group("author", "BirthDate")),
            Some(BIRTH_DATE_REQUIRED)
        );
    }

    #[test]
    fn unparseable_author_dates_are_field_errors() {
        let mut draft = complete();
        if let Some(author) = draft.author.as_mut() {
            author.birth_date = "ayer".into();
            author.death_date = "31/12/1700".into();
        }
        let errors = validate_identification(&draft);
        assert_eq!(
            serde_json::to_value(&errors).unwrap(),
            json!({"author": {
                "BirthDate": BIRTH_DATE_INVALID,
                "DeathDate": DEATH_DATE_INVALID,
            }})
        );
    }

    #[test]
    fn unparseable_number_is_invalid() {
        let draft = Identification {
            number_of_objects: NumberInput::Raw("dos".into()),
            ..complete()
        };
        let errors = validate_identification(&draft);
        assert_eq!(errors.len(), 1);
        assert!(errors.get(ErrorLocation::Field("numberOfObjects")).is_some());
    }

    #[test]
    fn absent_group_fails_its_required_field() {
        let draft = Identification {
            material: None,
            ..complete()
        };
        let errors = validate_identification(&draft);
        assert_eq!(errors.get(group("material", "MaterialName")), Some(MATERIAL_REQUIRED));
    }

    #[test]
    fn death_before_birth_is_not_checked() {
        let mut draft = complete();
        if let Some(author) = draft.author.as_mut() {
            author.death_date = "1500-01-01".into();
        }
        assert!(validate_identification(&draft).is_empty());
    }

    #[test]
    fn validation_does_not_touch_the_draft() {
        let draft = Identification::new(3);
        let before = draft.clone();
        let first = validate_identification(&draft);
        let second = validate_identification(&draft);
        assert_eq!(first, second);
        assert_eq!(draft, before);
    }

    // -- administrative file -------------------------------------------------

    #[test]
    fn fresh_file_draft_needs_unit_and_case_number() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let errors = validate_file_draft(&AdministrativeFileDraft::new(today));
        let keys: Vec<String> = errors.messages().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["Expediente", "Unidad"]);
    }

    #[test]
    fn malformed_end_date_is_rejected() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let mut draft = AdministrativeFileDraft::new(today);
        draft.unidad = "Archivo".into();
        draft.expediente = NumberInput::from(10);
        draft.fecha_final = "mañana".into();
        let errors = validate_file_draft(&draft);
        assert_eq!(
            errors.get(ErrorLocation::Field("FechaFinal")),
            Some(END_DATE_INVALID)
        );
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn huge_case_number_is_rejected() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let mut draft = AdministrativeFileDraft::new(today);
        draft.unidad = "Archivo".into();
        draft.expediente = NumberInput::parse("1e30");
        let errors = validate_file_draft(&draft);
        assert_eq!(
            errors.get(ErrorLocation::Field("Expediente")),
            Some(CASE_NUMBER_REQUIRED)
        );
    }

    // -- tenant --------------------------------------------------------------

    #[test]
    fn tenant_fields_are_required() {
        let errors = validate_tenant_draft(&TenantDraft {
            name: " ".into(),
            isil: "BO-MNA".into(),
            description: String::new(),
        });
        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors.get(ErrorLocation::Field("name")),
            Some(TENANT_NAME_REQUIRED)
        );
    }
}
