use catalogo_core::CoreError;

/// Errors from the backend gateway.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The HTTP request itself failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend returned a non-2xx status code.
    #[error("Backend error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// A tenant-scoped call was made without a selected tenant.
    #[error("No tenant selected")]
    MissingTenant,

    /// The response body could not be turned into a record.
    #[error("Malformed response: {0}")]
    Decode(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl GatewayError {
    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::Api { status, .. } => Some(*status),
            GatewayError::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    pub fn is_conflict(&self) -> bool {
        self.status() == Some(409)
    }

    /// Message supplied by the backend body, preferring `message` over
    /// `title`.
    pub fn backend_message(&self) -> Option<String> {
        let GatewayError::Api { body, .. } = self else {
            return None;
        };
        let json: serde_json::Value = serde_json::from_str(body).ok()?;
        ["message", "title"]
            .iter()
            .filter_map(|key| json.get(key).and_then(|v| v.as_str()))
            .find(|m| !m.trim().is_empty())
            .map(str::to_string)
    }

    /// Text to show the user: the backend's own message when it sent one,
    /// otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            GatewayError::Decode(message) => message.clone(),
            _ => self
                .backend_message()
                .unwrap_or_else(|| fallback.to_string()),
        }
    }
}
