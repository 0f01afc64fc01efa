//! From trait implementations for Redsm5Error conversions

use super::types::Redsm5Error;

impl From<anyhow::Error> for Redsm5Error {
    fn from(error: anyhow::Error) -> Self {
        Self::other(error.to_string())
    }
}

impl From<std::io::Error> for Redsm5Error {
    fn from(error: std::io::Error) -> Self {
        Self::io(error.to_string())
    }
}

impl From<serde_json::Error> for Redsm5Error {
    fn from(error: serde_json::Error) -> Self {
        Self::json(error.to_string())
    }
}

impl From<csv::Error> for Redsm5Error {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|p| p.line());
        Self::Csv {
            message: error.to_string(),
            line,
        }
    }
}

impl From<reqwest::Error> for Redsm5Error {
    fn from(error: reqwest::Error) -> Self {
        let status_code = error.status().map(|s| s.as_u16());
        let url = error.url().map(|u| u.to_string());
        Self::Http {
            message: error.to_string(),
            url,
            status_code,
            context: None,
        }
    }
}
