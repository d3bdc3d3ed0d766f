use thiserror::Error;

/// Top-level error type for Factly operations.
#[derive(Debug, Error)]
pub enum FactlyError {
    // --- Caller-fixable errors (scoring refuses to run) ---
    /// Invalid weight table, zero components, or a configured component
    /// with no supplied score. Fatal at startup or call time.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed input (out-of-range score, negative credibility).
    /// Rejected before any computation; no default score is substituted.
    #[error("Validation error: {0}")]
    Validation(String),

    // --- Evidence search errors (collection degrades, scoring proceeds) ---
    #[error("Provider error from {provider}: {detail}")]
    Provider { provider: String, detail: String },

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    // --- Operational errors ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Internal(String),
}

impl FactlyError {
    /// Whether this error means the caller supplied bad input
    /// (maps to a client error at the HTTP boundary).
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Whether this error came from an external provider and the
    /// evidence search may continue with the remaining providers.
    pub fn is_provider_error(&self) -> bool {
        matches!(
            self,
            Self::Provider { .. } | Self::Timeout(_) | Self::RateLimited(_)
        )
    }
}

/// Result type alias for Factly operations.
pub type Result<T> = std::result::Result<T, FactlyError>;
