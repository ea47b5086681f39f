use crate::types::CaseNumber;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with case number {case_number}")]
    NotFound {
        entity: &'static str,
        case_number: CaseNumber,
    },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid date '{value}' in field '{field}'")]
    InvalidDate { field: &'static str, value: String },
}
