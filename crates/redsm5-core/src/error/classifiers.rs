//! Error classification used by retry loops and fallback tagging

use super::types::Redsm5Error;
use crate::outcome::FailureKind;

impl Redsm5Error {
    /// Whether the HTTP layer should retry the request that produced this error
    ///
    /// Retries cover rate limiting, server-side failures, timeouts and
    /// connection problems. Client errors such as 400 or 401 are returned
    /// immediately.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http {
                status_code: Some(status),
                ..
            } => matches!(*status, 408 | 429 | 500 | 502 | 503 | 504),
            Self::Http {
                status_code: None,
                message,
                ..
            } => {
                let lower = message.to_lowercase();
                lower.contains("timed out")
                    || lower.contains("timeout")
                    || lower.contains("connection")
                    || lower.contains("error sending request")
            }
            _ => false,
        }
    }

    /// Map this error onto the taxonomy used by fallback outcomes
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            Self::Validation { .. } | Self::Json { .. } => FailureKind::Validation,
            Self::Truncated { .. } => FailureKind::Truncated,
            Self::Http { .. } | Self::Io { .. } => FailureKind::Transport,
            Self::Llm { .. } => FailureKind::Endpoint,
            Self::Config { .. }
            | Self::Csv { .. }
            | Self::InvalidInput { .. }
            | Self::Other { .. } => FailureKind::Other,
        }
    }
}
