/// Error types for the translation and phrase lookup clients
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MtError {
    /// The request never produced a response (connection refused, DNS, TLS...)
    NetworkError(String),
    /// The endpoint answered with a non-success status
    StatusError { status: u16, message: String },
    /// The response body could not be decoded into the expected shape
    DecodeError(String),
    /// The client is missing configuration it needs (endpoint, credential)
    ConfigError(String),
}

impl MtError {
    /// HTTP status carried by the error, if the endpoint answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            MtError::StatusError { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl std::fmt::Display for MtError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MtError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            MtError::StatusError { status, message } => {
                write!(f, "API error: {} {}", status, message)
            }
            MtError::DecodeError(msg) => write!(f, "Decode error: {}", msg),
            MtError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for MtError {}

impl From<reqwest::Error> for MtError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            MtError::DecodeError(err.to_string())
        } else {
            MtError::NetworkError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for MtError {
    fn from(err: serde_json::Error) -> Self {
        MtError::DecodeError(err.to_string())
    }
}

/// Result type for client operations
pub type MtResult<T> = Result<T, MtError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display_matches_api_wording() {
        let err = MtError::StatusError {
            status: 500,
            message: "Internal Server Error".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 500 Internal Server Error");
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn test_json_error_becomes_decode_error() {
        let err: MtError = serde_json::from_str::<serde_json::Value>("{not json")
            .unwrap_err()
            .into();
        assert!(matches!(err, MtError::DecodeError(_)));
        assert_eq!(err.status(), None);
    }
}
