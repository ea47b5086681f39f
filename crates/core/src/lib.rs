//! Pure catalogue logic: record models, the nested form controller, the
//! validation rules, key casing and date conversion, list views and detail
//! cards. Nothing in this crate performs I/O.

pub mod administrative_file;
pub mod casing;
pub mod dates;
pub mod detail;
pub mod error;
pub mod error_tree;
pub mod fields;
pub mod form;
pub mod identification;
pub mod table;
pub mod tenant;
pub mod types;
pub mod validation;

pub use error::CoreError;
pub use error_tree::{ErrorLocation, ErrorTree};
pub use form::{FieldPath, FormModel, FormState};
pub use types::{CaseNumber, TenantId};
