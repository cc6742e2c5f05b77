//! Error types for the Sleeper client

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SleeperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Sleeper API error on {endpoint}: status {status}: {body}")]
    Api { endpoint: String, status: u16, body: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = SleeperError::Api {
            endpoint: "/league/123/users".to_string(),
            status: 404,
            body: "not found".to_string(),
        };

        assert_eq!(
            err.to_string(),
            "Sleeper API error on /league/123/users: status 404: not found"
        );
    }

    #[test]
    fn test_serialization_error_from() {
        let err: SleeperError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, SleeperError::Serialization(_)));
    }
}
