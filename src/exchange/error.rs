use reqwest::StatusCode;

/// Failure of a single REST call
#[derive(thiserror::Error, Debug)]
pub enum ExchangeError {
    #[error("Transport error: {0}")] Transport(#[from] reqwest::Error),
    #[error("Decode error: {0}")] Decode(#[from] serde_json::Error),
    #[error("HTTP {status}: {body}")] Status {
        status: StatusCode,
        body: String,
    },
    #[error("Invalid URL: {0}")] Url(#[from] url::ParseError),
    #[error("Fetch task failed: {0}")] Task(#[from] tokio::task::JoinError),
}

impl ExchangeError {
    /// Network or connection level failure
    pub fn is_transport(&self) -> bool {
        matches!(self, ExchangeError::Transport(_))
    }

    /// Body did not match the expected shape
    pub fn is_decode(&self) -> bool {
        matches!(self, ExchangeError::Decode(_))
    }
}

pub type Result<T> = std::result::Result<T, ExchangeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_errors_carry_cause_text() {
        let cause = serde_json::from_str::<u32>("\"x\"").unwrap_err();
        let err = ExchangeError::from(cause);
        assert!(err.is_decode());
        assert!(!err.is_transport());
        assert!(err.to_string().starts_with("Decode error: "));
    }

    #[test]
    fn status_errors_render_code_and_body() {
        let err = ExchangeError::Status {
            status: StatusCode::BAD_REQUEST,
            body: "Invalid symbol.".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 400 Bad Request: Invalid symbol.");
    }
}
