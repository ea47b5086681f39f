use catalogo_gateway::GatewayError;

/// Application-level error type for the client shell.
///
/// Page controllers catch gateway failures and turn them into form
/// messages; this type covers what reaches the shell itself.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A backend gateway failure.
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// Invalid configuration value.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input from the command line.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for shell return values.
pub type AppResult<T> = Result<T, AppError>;
