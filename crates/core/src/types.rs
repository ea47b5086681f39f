use serde::{Deserialize, Deserializer, Serialize};

/// Case number ("expediente") shared by an administrative file and its
/// identification.
pub type CaseNumber = i64;

/// Backend-assigned tenant identifier, sent verbatim in the `tenant` header.
pub type TenantId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Backend row identifier. The backend is free to use numeric or string ids;
/// the client never interprets them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

/// Deserialize `null` as the type's default (`""` for strings).
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
