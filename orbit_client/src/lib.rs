pub mod client;
pub mod error;
pub mod types;

pub use client::OrbitClient;
pub use error::OrbitClientError;
pub use types::OrbitClientConfig;
