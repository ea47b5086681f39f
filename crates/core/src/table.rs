//! Filtered, paginated list views over fetched records.
//!
//! Tables hold the full fetched list; filtering and paging are computed on
//! demand so a reload never leaves stale rows behind.

use crate::administrative_file::AdministrativeFile;
use crate::error::CoreError;
use crate::fields::define_field_enum;
use crate::identification::Identification;
use crate::types::CaseNumber;

/// Rows per page.
pub const PAGE_SIZE: usize = 10;

/// Shown when a file with an active transfer request is deleted.
pub const TRANSFER_REQUEST_ACTIVE: &str =
    "No se puede eliminar un archivo con Petición de Transferencia activa.";

/// Placeholder for absent cell values.
pub const NOT_AVAILABLE: &str = "N/A";

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// A 1-based page cursor. Moving past either end is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self { page: 1 }
    }
}

impl Paginator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// `ceil(len / PAGE_SIZE)`; zero for an empty list.
    pub fn page_count(len: usize) -> usize {
        len.div_ceil(PAGE_SIZE)
    }

    /// The rows on the current page.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = (self.page - 1) * PAGE_SIZE;
        if start >= items.len() {
            return &[];
        }
        let end = (start + PAGE_SIZE).min(items.len());
        &items[start..end]
    }

    /// Advance one page. Returns whether the page changed.
    pub fn next(&mut self, len: usize) -> bool {
        if self.page < Self::page_count(len) {
            self.page += 1;
            true
        } else {
            false
        }
    }

    /// Go back one page. Returns whether the page changed.
    pub fn previous(&mut self) -> bool {
        if self.page > 1 {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.page = 1;
    }

    /// Pull the cursor back inside `len` rows after the list shrinks.
    pub fn clamp(&mut self, len: usize) {
        self.page = self.page.min(Self::page_count(len)).max(1);
    }
}

// ---------------------------------------------------------------------------
// Administrative file table
// ---------------------------------------------------------------------------

/// Files filtered by a substring of their case number.
#[derive(Debug, Clone, Default)]
pub struct FileTable {
    files: Vec<AdministrativeFile>,
    query: String,
    pager: Paginator,
}

impl FileTable {
    pub fn new(files: Vec<AdministrativeFile>) -> Self {
        Self {
            files,
            ..Self::default()
        }
    }

    /// Swap in a freshly fetched list, keeping the query.
    pub fn replace(&mut self, files: Vec<AdministrativeFile>) {
        self.files = files;
        let len = self.filtered().len();
        self.pager.clamp(len);
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Change the search text. A blank query shows every file.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.pager.reset();
    }

    /// Files whose case number contains the query verbatim. The query is
    /// trimmed only to decide whether it is blank.
    pub fn filtered(&self) -> Vec<&AdministrativeFile> {
        if self.query.trim().is_empty() {
            return self.files.iter().collect();
        }
        self.files
            .iter()
            .filter(|f| f.expediente.to_string().contains(self.query.as_str()))
            .collect()
    }

    pub fn visible(&self) -> Vec<&AdministrativeFile> {
        self.pager.slice(&self.filtered()).to_vec()
    }

    pub fn page(&self) -> usize {
        self.pager.page()
    }

    pub fn page_count(&self) -> usize {
        Paginator::page_count(self.filtered().len())
    }

    pub fn next_page(&mut self) -> bool {
        let len = self.filtered().len();
        self.pager.next(len)
    }

    pub fn previous_page(&mut self) -> bool {
        self.pager.previous()
    }

    pub fn find(&self, case_number: CaseNumber) -> Option<&AdministrativeFile> {
        self.files.iter().find(|f| f.expediente == case_number)
    }

    /// Client-side delete gate: the row must exist and must not carry an
    /// active transfer request.
    pub fn request_delete(&self, case_number: CaseNumber) -> Result<&AdministrativeFile, CoreError> {
        let file = self.find(case_number).ok_or(CoreError::NotFound {
            entity: "administrative file",
            case_number,
        })?;
        if file.is_delete_blocked() {
            return Err(CoreError::Conflict(TRANSFER_REQUEST_ACTIVE.to_string()));
        }
        Ok(file)
    }
}

// ---------------------------------------------------------------------------
// Identification table
// ---------------------------------------------------------------------------

define_field_enum! {
    /// Searchable identification fields, keyed by dotted path.
    SearchField {
        MaterialName => "material.MaterialName",
        AuthorName => "author.Name",
        TitleName => "title.Name",
        ObjectName => "objectName",
        GenericClassification => "genericClassification",
    }
}

impl Default for SearchField {
    fn default() -> Self {
        SearchField::MaterialName
    }
}

impl SearchField {
    pub fn label(self) -> &'static str {
        match self {
            SearchField::MaterialName => "Materia",
            SearchField::AuthorName => "Autor",
            SearchField::TitleName => "Título",
            SearchField::ObjectName => "Nombre del Objeto",
            SearchField::GenericClassification => "Clasificación Genérica",
        }
    }

    /// The value at this path, or `""` when the group is absent.
    pub fn value_of(self, item: &Identification) -> &str {
        match self {
            SearchField::MaterialName => item
                .material
                .as_ref()
                .map_or("", |m| m.material_name.as_str()),
            SearchField::AuthorName => item.author.as_ref().map_or("", |a| a.name.as_str()),
            SearchField::TitleName => item.title.as_ref().map_or("", |t| t.name.as_str()),
            SearchField::ObjectName => &item.object_name,
            SearchField::GenericClassification => &item.generic_classification,
        }
    }
}

/// Identifications filtered by a case-insensitive substring of one
/// selectable field.
#[derive(Debug, Clone, Default)]
pub struct IdentificationTable {
    items: Vec<Identification>,
    field: SearchField,
    query: String,
    pager: Paginator,
}

/// One rendered row.
#[derive(Debug, Clone, PartialEq)]
pub struct IdentificationRow<'a> {
    pub expediente: CaseNumber,
    pub inventory: String,
    pub object_name: &'a str,
    pub generic_classification: &'a str,
    pub author: &'a str,
    pub unit: &'a str,
}

impl<'a> From<&'a Identification> for IdentificationRow<'a> {
    fn from(item: &'a Identification) -> Self {
        Self {
            expediente: item.expediente,
            inventory: item.inventory.to_string(),
            object_name: &item.object_name,
            generic_classification: &item.generic_classification,
            author: item.author_name().unwrap_or(NOT_AVAILABLE),
            unit: item
                .unit
                .as_deref()
                .filter(|u| !u.is_empty())
                .unwrap_or(NOT_AVAILABLE),
        }
    }
}

impl IdentificationTable {
    pub fn new(items: Vec<Identification>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    pub fn replace(&mut self, items: Vec<Identification>) {
        self.items = items;
        let len = self.filtered().len();
        self.pager.clamp(len);
    }

    pub fn field(&self) -> SearchField {
        self.field
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_field(&mut self, field: SearchField) {
        self.field = field;
        self.pager.reset();
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.pager.reset();
    }

    pub fn filtered(&self) -> Vec<&Identification> {
        if self.query.trim().is_empty() {
            return self.items.iter().collect();
        }
        let needle = self.query.to_lowercase();
        self.items
            .iter()
            .filter(|item| self.field.value_of(item).to_lowercase().contains(&needle))
            .collect()
    }

    pub fn visible(&self) -> Vec<&Identification> {
        self.pager.slice(&self.filtered()).to_vec()
    }

    pub fn rows(&self) -> Vec<IdentificationRow<'_>> {
        self.visible().into_iter().map(IdentificationRow::from).collect()
    }

    pub fn page(&self) -> usize {
        self.pager.page()
    }

    pub fn page_count(&self) -> usize {
        Paginator::page_count(self.filtered().len())
    }

    pub fn next_page(&mut self) -> bool {
        let len = self.filtered().len();
        self.pager.next(len)
    }

    pub fn previous_page(&mut self) -> bool {
        self.pager.previous()
    }

    pub fn find(&self, case_number: CaseNumber) -> Option<&Identification> {
        self.items.iter().find(|i| i.expediente == case_number)
    }

    /// Whether any identification in the list belongs to `case_number`.
    pub fn contains(&self, case_number: CaseNumber) -> bool {
        self.find(case_number).is_some()
    }
}
