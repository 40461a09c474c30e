pub type Result<T> = std::result::Result<T, Error>;

pub const REQUIRED_FIELDS_MESSAGE: &str = "Please fill in all required fields";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    /// Local form check that failed before any request was issued.
    #[error("{0}")]
    Validation(String),

    /// Non-success response from the backend. Displays the server-supplied
    /// message, or `HTTP <status>` when the body carried none.
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    pub fn api(status: u16, server_message: Option<String>) -> Self {
        let message = server_message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| format!("HTTP {}", status));
        Error::Api { status, message }
    }

    /// Text shown in the status banner for this failure.
    pub fn user_message(&self) -> String {
        match self {
            Error::Validation(msg) | Error::Api { message: msg, .. } => msg.clone(),
            Error::Unauthorized(msg) | Error::Forbidden(msg) | Error::NotFound(msg) => {
                msg.clone()
            }
            Error::Http(err) => format!("Network error: {}", err),
            other => other.to_string(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(_: validator::ValidationErrors) -> Self {
        Error::Validation(REQUIRED_FIELDS_MESSAGE.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_prefers_server_message() {
        let err = Error::api(409, Some("Email already registered".into()));
        assert_eq!(err.to_string(), "Email already registered");
        assert_eq!(err.user_message(), "Email already registered");
    }

    #[test]
    fn api_error_falls_back_to_status() {
        assert_eq!(Error::api(500, None).to_string(), "HTTP 500");
        assert_eq!(Error::api(502, Some("  ".into())).to_string(), "HTTP 502");
    }

    #[test]
    fn validation_errors_collapse_to_required_fields_message() {
        let err: Error = validator::ValidationErrors::new().into();
        assert!(err.is_validation());
        assert_eq!(err.user_message(), REQUIRED_FIELDS_MESSAGE);
    }
}
