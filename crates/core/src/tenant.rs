//! Tenants (institutions). Each tenant owns an isolated set of files and
//! identifications on the backend.

use serde::{Deserialize, Serialize};

use crate::error_tree::{ErrorLocation, ErrorTree};
use crate::fields::{define_field_enum, FieldValue, InputKind};
use crate::form::{FieldPath, FormModel};
use crate::types::{nullable, TenantId};
use crate::validation;

const TENANT_ID_PREFIX: &str = "tenant_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenant {
    pub id: TenantId,
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub isil: String,
    #[serde(default, deserialize_with = "nullable")]
    pub description: String,
}

/// Human-facing name of a tenant id: the id without its `tenant_` prefix.
pub fn display_name(id: &str) -> &str {
    id.strip_prefix(TENANT_ID_PREFIX).unwrap_or(id)
}

define_field_enum! {
    TenantField {
        Name => "name",
        Isil => "isil",
        Description => "description",
    }
}

impl FieldPath for TenantField {
    fn location(self) -> ErrorLocation {
        ErrorLocation::Field(self.as_str())
    }
}

/// Body of a create-tenant request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TenantDraft {
    pub name: String,
    pub isil: String,
    pub description: String,
}

impl FormModel for TenantDraft {
    type Path = TenantField;

    fn resolve_field(name: &str) -> Option<Self::Path> {
        TenantField::parse(name)
    }

    fn input_kind(path: Self::Path) -> InputKind {
        match path {
            TenantField::Description => InputKind::TextArea,
            TenantField::Name | TenantField::Isil => InputKind::Text,
        }
    }

    fn write(&mut self, path: Self::Path, value: FieldValue) {
        let slot = match path {
            TenantField::Name => &mut self.name,
            TenantField::Isil => &mut self.isil,
            TenantField::Description => &mut self.description,
        };
        *slot = value.into_text();
    }

    fn validate(&self) -> ErrorTree {
        validation::validate_tenant_draft(self)
    }
}
