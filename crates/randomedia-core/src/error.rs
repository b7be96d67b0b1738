//! Unified error type for random discovery.
//!
//! Every failure mode an upstream call or a discovery run can produce is an
//! [`Error`] variant. The HTTP layer derives its status code from
//! [`Error::http_status`] and its machine-readable tag from [`Error::code`].

/// Unified error type covering upstream and discovery failures.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request never produced a response (DNS, connect, timeout, body read).
    #[error("Transport error [{upstream}]: {message}")]
    Transport {
        /// Upstream the request was addressed to.
        upstream: String,
        /// Human-readable error description.
        message: String,
    },

    /// The upstream answered with a non-success status or an error envelope.
    #[error("Upstream error [{upstream}] {status}: {message}")]
    UpstreamStatus {
        /// Upstream that answered.
        upstream: String,
        /// HTTP status code of the answer.
        status: u16,
        /// Error text extracted from the body, if any.
        message: String,
    },

    /// The upstream answered but the body did not have the expected shape.
    #[error("Malformed response [{upstream}]: {message}")]
    MalformedUpstream {
        /// Upstream that answered.
        upstream: String,
        /// Decoder message.
        message: String,
    },

    /// A "latest" endpoint reported an identifier that cannot bound sampling.
    #[error("Invalid catalog bound [{upstream}]: {message}")]
    InvalidCatalogBound {
        /// Upstream whose catalog was queried.
        upstream: String,
        /// What was wrong with the reported value.
        message: String,
    },

    /// The discovery budget ran out before a valid candidate was found.
    #[error("No valid {entity} found after {attempts} attempts{}", last_suffix(.last_failure))]
    Exhausted {
        /// Kind of entity that was being discovered.
        entity: String,
        /// Number of resolution attempts that were made.
        attempts: u32,
        /// Description of the last rejected or failed attempt.
        last_failure: Option<String>,
    },

    /// Configuration is missing or inconsistent.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Catch-all for unexpected internal errors.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Map this error to an appropriate HTTP status code.
    pub fn http_status(&self) -> u16 {
        match self {
            Error::Transport { .. } => 502,
            Error::UpstreamStatus { .. } => 502,
            Error::MalformedUpstream { .. } => 502,
            Error::InvalidCatalogBound { .. } => 502,
            Error::Exhausted { .. } => 503,
            Error::Config(_) => 500,
            Error::Internal(_) => 500,
        }
    }

    /// Stable snake_case tag used in error envelopes.
    pub fn code(&self) -> &'static str {
        match self {
            Error::Transport { .. } => "transport_error",
            Error::UpstreamStatus { .. } => "upstream_error",
            Error::MalformedUpstream { .. } => "malformed_upstream",
            Error::InvalidCatalogBound { .. } => "invalid_catalog_bound",
            Error::Exhausted { .. } => "discovery_exhausted",
            Error::Config(_) => "configuration_error",
            Error::Internal(_) => "internal_error",
        }
    }

    /// Whether a discovery loop may retry past this failure with a fresh
    /// candidate. Shape mismatches are not retried.
    pub fn is_transient(&self) -> bool {
        matches!(self, Error::Transport { .. } | Error::UpstreamStatus { .. })
    }

    /// Convenience constructor for [`Error::Transport`].
    pub fn transport(upstream: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Transport {
            upstream: upstream.into(),
            message: message.into(),
        }
    }

    /// Convenience constructor for [`Error::UpstreamStatus`].
    pub fn upstream_status(
        upstream: impl Into<String>,
        status: u16,
        message: impl Into<String>,
    ) -> Self {
        Error::UpstreamStatus {
            upstream: upstream.into(),
            status,
            message: message.into(),
        }
    }

    /// Convenience constructor for [`Error::MalformedUpstream`].
    pub fn malformed(upstream: impl Into<String>, message: impl Into<String>) -> Self {
        Error::MalformedUpstream {
            upstream: upstream.into(),
            message: message.into(),
        }
    }
}

fn last_suffix(last_failure: &Option<String>) -> String {
    last_failure
        .as_deref()
        .map(|f| format!(" (last: {f})"))
        .unwrap_or_default()
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
