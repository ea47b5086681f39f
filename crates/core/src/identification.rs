//! Identification records: a museum object's catalogue entry, linked to an
//! administrative file by its case number.
//!
//! Field names follow the form model's casing: top-level scalars are lower
//! camel case, keys inside the eight nested groups are upper camel case. The
//! wire casing is applied only by the gateway codec.

use serde::{Deserialize, Serialize};

use crate::error_tree::{ErrorLocation, ErrorTree};
use crate::fields::{define_field_enum, FieldValue, InputKind, NumberInput};
use crate::form::{FieldPath, FormModel};
use crate::types::{nullable, CaseNumber, RecordId};
use crate::validation;

// ---------------------------------------------------------------------------
// Nested groups
// ---------------------------------------------------------------------------

/// Where the object is displayed or stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Section {
    #[serde(deserialize_with = "nullable")]
    pub room: String,
    #[serde(deserialize_with = "nullable")]
    pub panel: String,
    #[serde(deserialize_with = "nullable")]
    pub display_case: String,
    #[serde(deserialize_with = "nullable")]
    pub easel: String,
    #[serde(deserialize_with = "nullable")]
    pub storage: String,
    #[serde(deserialize_with = "nullable")]
    pub courtyard: String,
    #[serde(deserialize_with = "nullable")]
    pub pillar: String,
    #[serde(deserialize_with = "nullable")]
    pub others: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Typology {
    #[serde(deserialize_with = "nullable")]
    pub r#type: String,
    #[serde(deserialize_with = "nullable")]
    pub subtype: String,
    #[serde(deserialize_with = "nullable")]
    pub class: String,
    #[serde(deserialize_with = "nullable")]
    pub subclass: String,
    #[serde(deserialize_with = "nullable")]
    pub order: String,
    #[serde(deserialize_with = "nullable")]
    pub suborder: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SpecificName {
    #[serde(deserialize_with = "nullable")]
    pub generic_name: String,
    #[serde(deserialize_with = "nullable")]
    pub related_terms: String,
    #[serde(deserialize_with = "nullable")]
    pub specific_terms: String,
    #[serde(deserialize_with = "nullable")]
    pub used_by: String,
    #[serde(deserialize_with = "nullable")]
    pub notes: String,
}

/// Authorship. Dates are `YYYY-MM-DD` strings; empty means unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Author {
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub birth_place: String,
    #[serde(deserialize_with = "nullable")]
    pub birth_date: String,
    #[serde(deserialize_with = "nullable")]
    pub death_place: String,
    #[serde(deserialize_with = "nullable")]
    pub death_date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Title {
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub attribution: String,
    #[serde(deserialize_with = "nullable")]
    pub translation: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Material {
    #[serde(deserialize_with = "nullable")]
    pub material_name: String,
    #[serde(deserialize_with = "nullable")]
    pub described_part: String,
    #[serde(deserialize_with = "nullable")]
    pub colors: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Techniques {
    #[serde(deserialize_with = "nullable")]
    pub technique_name: String,
    #[serde(deserialize_with = "nullable")]
    pub described_part: String,
}

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

fn default_number_of_objects() -> NumberInput {
    NumberInput::from(1)
}

/// One identification draft.
///
/// Groups are optional so that a record decoded without a group can be told
/// apart from one whose group is present but empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identification {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub section: Option<Section>,
    #[serde(default, deserialize_with = "nullable")]
    pub inventory: NumberInput,
    #[serde(default = "default_number_of_objects", deserialize_with = "nullable")]
    pub number_of_objects: NumberInput,
    #[serde(default, deserialize_with = "nullable")]
    pub generic_classification: String,
    #[serde(default, deserialize_with = "nullable")]
    pub object_name: String,
    #[serde(default)]
    pub typology: Option<Typology>,
    #[serde(default)]
    pub specific_name: Option<SpecificName>,
    #[serde(default)]
    pub author: Option<Author>,
    #[serde(default)]
    pub title: Option<Title>,
    #[serde(default)]
    pub material: Option<Material>,
    #[serde(default)]
    pub techniques: Option<Techniques>,
    #[serde(default, deserialize_with = "nullable")]
    pub observations: String,
    /// Case number of the owning file. Set once at creation, never edited.
    #[serde(default, deserialize_with = "nullable")]
    pub expediente: CaseNumber,
    /// Institution of the owning file, filled in by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl Identification {
    /// A blank draft for a new identification of `case_number`: every group
    /// present, one object, nothing else filled in.
    pub fn new(case_number: CaseNumber) -> Self {
        Self {
            id: None,
            section: Some(Section::default()),
            inventory: NumberInput::default(),
            number_of_objects: default_number_of_objects(),
            generic_classification: String::new(),
            object_name: String::new(),
            typology: Some(Typology::default()),
            specific_name: Some(SpecificName::default()),
            author: Some(Author::default()),
            title: Some(Title::default()),
            material: Some(Material::default()),
            techniques: Some(Techniques::default()),
            observations: String::new(),
            expediente: case_number,
            unit: None,
        }
    }

    /// Give every absent group an empty structure, keeping present ones.
    pub fn fill_missing_groups(&mut self) {
        self.section.get_or_insert_with(Section::default);
        self.typology.get_or_insert_with(Typology::default);
        self.specific_name.get_or_insert_with(SpecificName::default);
        self.author.get_or_insert_with(Author::default);
        self.title.get_or_insert_with(Title::default);
        self.material.get_or_insert_with(Material::default);
        self.techniques.get_or_insert_with(Techniques::default);
    }

    pub fn author_name(&self) -> Option<&str> {
        self.author
            .as_ref()
            .map(|a| a.name.as_str())
            .filter(|n| !n.is_empty())
    }
}

// ---------------------------------------------------------------------------
// Field paths
// ---------------------------------------------------------------------------

define_field_enum! {
    /// Editable top-level scalars. `expediente`, `id` and `unit` are not
    /// editable and have no path.
    ScalarField {
        Inventory => "inventory",
        NumberOfObjects => "numberOfObjects",
        GenericClassification => "genericClassification",
        ObjectName => "objectName",
        Observations => "observations",
    }
}

define_field_enum! {
    /// The nested groups of an identification.
    IdentificationGroup {
        Section => "section",
        Typology => "typology",
        SpecificName => "specificName",
        Author => "author",
        Title => "title",
        Material => "material",
        Techniques => "techniques",
    }
}

define_field_enum! {
    SectionField {
        Room => "Room",
        Panel => "Panel",
        DisplayCase => "DisplayCase",
        Easel => "Easel",
        Storage => "Storage",
        Courtyard => "Courtyard",
        Pillar => "Pillar",
        Others => "Others",
    }
}

define_field_enum! {
    TypologyField {
        Type => "Type",
        Subtype => "Subtype",
        Class => "Class",
        Subclass => "Subclass",
        Order => "Order",
        Suborder => "Suborder",
    }
}

define_field_enum! {
    SpecificNameField {
        GenericName => "GenericName",
        RelatedTerms => "RelatedTerms",
        SpecificTerms => "SpecificTerms",
        UsedBy => "UsedBy",
        Notes => "Notes",
    }
}

define_field_enum! {
    AuthorField {
        Name => "Name",
        BirthPlace => "BirthPlace",
        BirthDate => "BirthDate",
        DeathPlace => "DeathPlace",
        DeathDate => "DeathDate",
    }
}

define_field_enum! {
    TitleField {
        Name => "Name",
        Attribution => "Attribution",
        Translation => "Translation",
    }
}

define_field_enum! {
    MaterialField {
        MaterialName => "MaterialName",
        DescribedPart => "DescribedPart",
        Colors => "Colors",
    }
}

define_field_enum! {
    TechniqueField {
        TechniqueName => "TechniqueName",
        DescribedPart => "DescribedPart",
    }
}

/// A typed location inside an [`Identification`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentificationPath {
    Scalar(ScalarField),
    Section(SectionField),
    Typology(TypologyField),
    SpecificName(SpecificNameField),
    Author(AuthorField),
    Title(TitleField),
    Material(MaterialField),
    Techniques(TechniqueField),
}

impl IdentificationPath {
    /// The group this path lives in, if any.
    pub fn group(self) -> Option<IdentificationGroup> {
        match self {
            IdentificationPath::Scalar(_) => None,
            IdentificationPath::Section(_) => Some(IdentificationGroup::Section),
            IdentificationPath::Typology(_) => Some(IdentificationGroup::Typology),
            IdentificationPath::SpecificName(_) => Some(IdentificationGroup::SpecificName),
            IdentificationPath::Author(_) => Some(IdentificationGroup::Author),
            IdentificationPath::Title(_) => Some(IdentificationGroup::Title),
            IdentificationPath::Material(_) => Some(IdentificationGroup::Material),
            IdentificationPath::Techniques(_) => Some(IdentificationGroup::Techniques),
        }
    }

    fn field_key(self) -> &'static str {
        match self {
            IdentificationPath::Scalar(f) => f.as_str(),
            IdentificationPath::Section(f) => f.as_str(),
            IdentificationPath::Typology(f) => f.as_str(),
            IdentificationPath::SpecificName(f) => f.as_str(),
            IdentificationPath::Author(f) => f.as_str(),
            IdentificationPath::Title(f) => f.as_str(),
            IdentificationPath::Material(f) => f.as_str(),
            IdentificationPath::Techniques(f) => f.as_str(),
        }
    }
}

impl FieldPath for IdentificationPath {
    fn location(self) -> ErrorLocation {
        match self.group() {
            None => ErrorLocation::Field(self.field_key()),
            Some(group) => ErrorLocation::GroupField {
                group: group.as_str(),
                field: self.field_key(),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Form model
// ---------------------------------------------------------------------------

impl FormModel for Identification {
    type Path = IdentificationPath;

    fn resolve_field(name: &str) -> Option<Self::Path> {
        ScalarField::parse(name).map(IdentificationPath::Scalar)
    }

    fn resolve_group_field(group: &str, sub_field: &str) -> Option<Self::Path> {
        match IdentificationGroup::parse(group)? {
            IdentificationGroup::Section => {
                SectionField::parse(sub_field).map(IdentificationPath::Section)
            }
            IdentificationGroup::Typology => {
                TypologyField::parse(sub_field).map(IdentificationPath::Typology)
            }
            IdentificationGroup::SpecificName => {
                SpecificNameField::parse(sub_field).map(IdentificationPath::SpecificName)
            }
            IdentificationGroup::Author => {
                AuthorField::parse(sub_field).map(IdentificationPath::Author)
            }
            IdentificationGroup::Title => {
                TitleField::parse(sub_field).map(IdentificationPath::Title)
            }
            IdentificationGroup::Material => {
                MaterialField::parse(sub_field).map(IdentificationPath::Material)
            }
            IdentificationGroup::Techniques => {
                TechniqueField::parse(sub_field).map(IdentificationPath::Techniques)
            }
        }
    }

    fn input_kind(path: Self::Path) -> InputKind {
        match path {
            IdentificationPath::Scalar(ScalarField::Inventory)
            | IdentificationPath::Scalar(ScalarField::NumberOfObjects) => InputKind::Number,
            IdentificationPath::Scalar(ScalarField::Observations)
            | IdentificationPath::SpecificName(SpecificNameField::Notes) => InputKind::TextArea,
            IdentificationPath::Author(AuthorField::BirthDate)
            | IdentificationPath::Author(AuthorField::DeathDate) => InputKind::Date,
            _ => InputKind::Text,
        }
    }

    fn write(&mut self, path: Self::Path, value: FieldValue) {
        match path {
            IdentificationPath::Scalar(field) => match field {
                ScalarField::Inventory => self.inventory = value.into_number(),
                ScalarField::NumberOfObjects => self.number_of_objects = value.into_number(),
                ScalarField::GenericClassification => {
                    self.generic_classification = value.into_text()
                }
                ScalarField::ObjectName => self.object_name = value.into_text(),
                ScalarField::Observations => self.observations = value.into_text(),
            },
            IdentificationPath::Section(field) => {
                let section = self.section.get_or_insert_with(Section::default);
                let slot = match field {
                    SectionField::Room => &mut section.room,
                    SectionField::Panel => &mut section.panel,
                    SectionField::DisplayCase => &mut section.display_case,
                    SectionField::Easel => &mut section.easel,
                    SectionField::Storage => &mut section.storage,
                    SectionField::Courtyard => &mut section.courtyard,
                    SectionField::Pillar => &mut section.pillar,
                    SectionField::Others => &mut section.others,
                };
                *slot = value.into_text();
            }
            IdentificationPath::Typology(field) => {
                let typology = self.typology.get_or_insert_with(Typology::default);
                let slot = match field {
                    TypologyField::Type => &mut typology.r#type,
                    TypologyField::Subtype => &mut typology.subtype,
                    TypologyField::Class => &mut typology.class,
                    TypologyField::Subclass => &mut typology.subclass,
                    TypologyField::Order => &mut typology.order,
                    TypologyField::Suborder => &mut typology.suborder,
                };
                *slot = value.into_text();
            }
            IdentificationPath::SpecificName(field) => {
                let name = self.specific_name.get_or_insert_with(SpecificName::default);
                let slot = match field {
                    SpecificNameField::GenericName => &mut name.generic_name,
                    SpecificNameField::RelatedTerms => &mut name.related_terms,
                    SpecificNameField::SpecificTerms => &mut name.specific_terms,
                    SpecificNameField::UsedBy => &mut name.used_by,
                    SpecificNameField::Notes => &mut name.notes,
                };
                *slot = value.into_text();
            }
            IdentificationPath::Author(field) => {
                let author = self.author.get_or_insert_with(Author::default);
                let slot = match field {
                    AuthorField::Name => &mut author.name,
                    AuthorField::BirthPlace => &mut author.birth_place,
                    AuthorField::BirthDate => &mut author.birth_date,
                    AuthorField::DeathPlace => &mut author.death_place,
                    AuthorField::DeathDate => &mut author.death_date,
                };
                *slot = value.into_text();
            }
            IdentificationPath::Title(field) => {
                let title = self.title.get_or_insert_with(Title::default);
                let slot = match field {
                    TitleField::Name => &mut title.name,
                    TitleField::Attribution => &mut title.attribution,
                    TitleField::Translation => &mut title.translation,
                };
                *slot = value.into_text();
            }
            IdentificationPath::Material(field) => {
                let material = self.material.get_or_insert_with(Material::default);
                let slot = match field {
                    MaterialField::MaterialName => &mut material.material_name,
                    MaterialField::DescribedPart => &mut material.described_part,
                    MaterialField::Colors => &mut material.colors,
                };
                *slot = value.into_text();
            }
            IdentificationPath::Techniques(field) => {
                let techniques = self.techniques.get_or_insert_with(Techniques::default);
                let slot = match field {
                    TechniqueField::TechniqueName => &mut techniques.technique_name,
                    TechniqueField::DescribedPart => &mut techniques.described_part,
                };
                *slot = value.into_text();
            }
        }
    }

    fn validate(&self) -> ErrorTree {
        validation::validate_identification(self)
    }
}
