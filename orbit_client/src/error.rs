use thiserror::Error;
use wallet_core::WalletError;

#[derive(Error, Debug)]
pub enum OrbitClientError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Status {status}: {body}")]
    StatusError { status: u16, body: String },

    #[error("Invalid API base URL: {url}")]
    InvalidUrl { url: String },
}

pub type Result<T> = std::result::Result<T, OrbitClientError>;

impl From<OrbitClientError> for WalletError {
    fn from(err: OrbitClientError) -> Self {
        match err {
            OrbitClientError::JsonError(_) => WalletError::DecodeFailure {
                message: err.to_string(),
            },
            OrbitClientError::HttpError(ref e) if e.is_decode() => WalletError::DecodeFailure {
                message: err.to_string(),
            },
            _ => WalletError::FetchFailure {
                message: err.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_maps_to_fetch_failure() {
        let err = OrbitClientError::StatusError {
            status: 404,
            body: "not found".to_string(),
        };
        assert_eq!(
            WalletError::from(err),
            WalletError::FetchFailure {
                message: "Status 404: not found".to_string()
            }
        );
    }

    #[test]
    fn test_json_maps_to_decode_failure() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = WalletError::from(OrbitClientError::from(json_err));
        assert!(matches!(err, WalletError::DecodeFailure { .. }));
    }

    #[test]
    fn test_invalid_url_maps_to_fetch_failure() {
        let err = WalletError::from(OrbitClientError::InvalidUrl {
            url: "nope".to_string(),
        });
        assert!(matches!(err, WalletError::FetchFailure { .. }));
    }
}
