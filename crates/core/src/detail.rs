//! Read-only "view details" cards for both entities.

use std::fmt;

use crate::administrative_file::AdministrativeFile;
use crate::dates;
use crate::identification::Identification;
use crate::table::NOT_AVAILABLE;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailItem {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailSection {
    pub title: &'static str,
    pub items: Vec<DetailItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailCard {
    pub title: &'static str,
    pub sections: Vec<DetailSection>,
}

impl DetailCard {
    /// Value shown for `label`, searching every section in order.
    pub fn value(&self, label: &str) -> Option<&str> {
        self.sections
            .iter()
            .flat_map(|s| s.items.iter())
            .find(|item| item.label == label)
            .map(|item| item.value.as_str())
    }
}

impl fmt::Display for DetailCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        for section in &self.sections {
            if !section.title.is_empty() {
                writeln!(f)?;
                writeln!(f, "[{}]", section.title)?;
            }
            for item in &section.items {
                writeln!(f, "  {}: {}", item.label, item.value)?;
            }
        }
        Ok(())
    }
}

fn item(label: &'static str, value: impl Into<String>) -> DetailItem {
    DetailItem {
        label,
        value: value.into(),
    }
}

fn or_placeholder(value: &str, placeholder: &str) -> String {
    if value.is_empty() {
        placeholder.to_string()
    } else {
        value.to_string()
    }
}

// ---------------------------------------------------------------------------
// Administrative file
// ---------------------------------------------------------------------------

pub fn file_card(file: &AdministrativeFile) -> DetailCard {
    let text = |value: &Option<String>, placeholder: &str| {
        or_placeholder(value.as_deref().unwrap_or_default(), placeholder)
    };

    let items = vec![
        item("Institución", or_placeholder(&file.institucion, "No especificada")),
        item("Unidad", or_placeholder(&file.unidad, "No especificada")),
        item("Expediente", file.expediente.to_string()),
        item("Serie", text(&file.serie, "No especificada")),
        item(
            "Tipo de Documento Origen",
            or_placeholder(&file.documento_origen, "No especificado"),
        ),
        item("Fecha Inicial", dates::display_date(file.fecha_inicial)),
        item(
            "Fecha Final",
            file.fecha_final
                .map(dates::display_date)
                .unwrap_or_else(|| "No especificada".to_string()),
        ),
        item(
            "Expediente Anterior",
            text(&file.expediente_anterior, "No especificado"),
        ),
        item("Asunto", text(&file.asunto, "No especificado")),
        item(
            "Petición de Transferencia",
            if file.peticion_transferencia { "Sí" } else { "No" },
        ),
        item("Historial", text(&file.historial, "No especificado")),
        item(
            "Archivo Documental",
            text(&file.archivo_documental, "No especificado"),
        ),
        item("Observaciones", text(&file.observaciones, "No especificadas")),
    ];

    DetailCard {
        title: "Detalles del Archivo Administrativo",
        sections: vec![DetailSection { title: "", items }],
    }
}

// ---------------------------------------------------------------------------
// Identification
// ---------------------------------------------------------------------------

fn optional(value: &str) -> String {
    or_placeholder(value, NOT_AVAILABLE)
}

fn date(value: &str) -> String {
    dates::parse_date(value)
        .map(dates::display_date)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

pub fn identification_card(record: &Identification) -> DetailCard {
    let section = record.section.clone().unwrap_or_default();
    let typology = record.typology.clone().unwrap_or_default();
    let specific = record.specific_name.clone().unwrap_or_default();
    let author = record.author.clone().unwrap_or_default();
    let title = record.title.clone().unwrap_or_default();
    let material = record.material.clone().unwrap_or_default();
    let techniques = record.techniques.clone().unwrap_or_default();

    let sections = vec![
        DetailSection {
            title: "Información General",
            items: vec![
                item("Número de Expediente", record.expediente.to_string()),
                item(
                    "Institución/Unidad",
                    optional(record.unit.as_deref().unwrap_or_default()),
                ),
                item("Inventario", optional(&record.inventory.to_string())),
                item("Número de Objetos", optional(&record.number_of_objects.to_string())),
                item("Clasificación Genérica", optional(&record.generic_classification)),
                item("Nombre del Objeto/Grupo", optional(&record.object_name)),
            ],
        },
        DetailSection {
            title: "Sección",
            items: vec![
                item("Sala", optional(&section.room)),
                item("Panel", optional(&section.panel)),
                item("Vitrina", optional(&section.display_case)),
                item("Caballete", optional(&section.easel)),
                item("Depósito", optional(&section.storage)),
                item("Patio", optional(&section.courtyard)),
                item("Pilar", optional(&section.pillar)),
                item("Otros", optional(&section.others)),
            ],
        },
        DetailSection {
            title: "Tipología",
            items: vec![
                item("Tipo", optional(&typology.r#type)),
                item("Subtipo", optional(&typology.subtype)),
                item("Clase", optional(&typology.class)),
                item("Subclase", optional(&typology.subclass)),
                item("Orden", optional(&typology.order)),
                item("Suborden", optional(&typology.suborder)),
            ],
        },
        DetailSection {
            title: "Nombre Específico",
            items: vec![
                item("Nombre Genérico", optional(&specific.generic_name)),
                item("Términos Relacionados", optional(&specific.related_terms)),
                item("Términos Específicos", optional(&specific.specific_terms)),
                item("Usado Por", optional(&specific.used_by)),
                item("Notas", optional(&specific.notes)),
            ],
        },
        DetailSection {
            title: "Autor",
            items: vec![
                item("Nombre", optional(&author.name)),
                item("Lugar de Nacimiento", optional(&author.birth_place)),
                item("Fecha de Nacimiento", date(&author.birth_date)),
                item("Lugar de Defunción", optional(&author.death_place)),
                item("Fecha de Defunción", date(&author.death_date)),
            ],
        },
        DetailSection {
            title: "Título",
            items: vec![
                item("Título", optional(&title.name)),
                item("Atribución", optional(&title.attribution)),
                item("Traducción", optional(&title.translation)),
            ],
        },
        DetailSection {
            title: "Materia",
            items: vec![
                item("Materia", optional(&material.material_name)),
                item("Parte Descrita", optional(&material.described_part)),
                item("Colores", optional(&material.colors)),
            ],
        },
        DetailSection {
            title: "Técnica",
            items: vec![
                item("Técnica", optional(&techniques.technique_name)),
                item("Parte Descrita", optional(&techniques.described_part)),
            ],
        },
        DetailSection {
            title: "Observaciones",
            items: vec![item("Observaciones Generales", optional(&record.observations))],
        },
    ];

    DetailCard {
        title: "Detalles de la Identificación",
        sections,
    }
}
