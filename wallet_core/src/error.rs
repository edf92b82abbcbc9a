use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WalletError {
    #[error("Please enter a wallet address")]
    EmptyAddress,

    #[error("Fetch failed: {message}")]
    FetchFailure { message: String },

    #[error("Response decode failed: {message}")]
    DecodeFailure { message: String },
}

impl From<serde_json::Error> for WalletError {
    fn from(err: serde_json::Error) -> Self {
        WalletError::DecodeFailure {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, WalletError>;
