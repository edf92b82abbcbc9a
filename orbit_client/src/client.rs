use crate::{
    error::{OrbitClientError, Result},
    types::OrbitClientConfig,
};
use reqwest::Client;
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};
use url::Url;
use wallet_core::{Address, RawWalletPayload, SnapshotBuilder, WalletView};

/// Longest response body excerpt kept in a status error
const ERROR_BODY_LIMIT: usize = 512;

/// Client for the explorer's `GET <base>/<address>` wallet endpoint.
///
/// One request per call, no retries. Non-success statuses and bodies that
/// are not JSON are returned as errors; everything else is handed to the
/// wallet core, which tolerates any JSON shape.
#[derive(Debug, Clone)]
pub struct OrbitClient {
    client: Client,
    config: OrbitClientConfig,
    base_url: Url,
}

impl OrbitClient {
    /// Create a new client with custom configuration
    pub fn with_config(config: OrbitClientConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|_| OrbitClientError::InvalidUrl {
            url: config.base_url.clone(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(OrbitClientError::InvalidUrl {
                url: config.base_url.clone(),
            });
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            config,
            base_url,
        })
    }

    /// `<base>/<address>` with the address as one percent-encoded segment
    pub fn wallet_url(&self, address: &Address) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| OrbitClientError::InvalidUrl {
                url: self.config.base_url.clone(),
            })?
            .pop_if_empty()
            .push(address.as_str());
        Ok(url)
    }

    /// Fetch the raw wallet payload for an address
    pub async fn get_wallet(&self, address: &Address) -> Result<RawWalletPayload> {
        let url = self.wallet_url(address)?;
        info!("🔍 Fetching wallet {} from {}", address, url);

        let start_time = Instant::now();
        let response = self.client.get(url).send().await?;
        let status = response.status();
        info!(
            "📨 Response status: {} ({:.2}s)",
            status,
            start_time.elapsed().as_secs_f64()
        );

        if !status.is_success() {
            let mut body = response.text().await.unwrap_or_default();
            error!("❌ Wallet API error - Status: {}, Body: {}", status, body);
            truncate_on_char_boundary(&mut body, ERROR_BODY_LIMIT);
            return Err(OrbitClientError::StatusError {
                status: status.as_u16(),
                body,
            });
        }

        let response_text = response.text().await?;
        debug!("Received {} bytes", response_text.len());

        let value: Value = match serde_json::from_str(&response_text) {
            Ok(value) => value,
            Err(e) => {
                let sample_size = response_text.len().min(200);
                let mut sample = response_text.clone();
                truncate_on_char_boundary(&mut sample, sample_size);
                error!("❌ Failed to parse wallet response: {} (body starts with: {})", e, sample);
                return Err(e.into());
            }
        };

        Ok(RawWalletPayload::from_value(value))
    }

    /// Fetch and build the display-ready view in one step
    pub async fn fetch_wallet_view(&self, address: &Address) -> Result<WalletView> {
        let payload = self.get_wallet(address).await?;
        let view = SnapshotBuilder::build(&payload, address);
        info!(
            "✅ Wallet {}: {} transactions",
            view.address,
            view.transactions.len()
        );
        Ok(view)
    }
}

fn truncate_on_char_boundary(text: &mut String, max_len: usize) {
    if text.len() <= max_len {
        return;
    }
    let mut cut = max_len;
    while !text.is_char_boundary(cut) {
        cut -= 1;
    }
    text.truncate(cut);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_for(base: &str) -> OrbitClient {
        OrbitClient::with_config(OrbitClientConfig {
            base_url: base.to_string(),
            timeout_seconds: 5,
            connect_timeout_seconds: 5,
        })
        .unwrap()
    }

    #[test]
    fn test_wallet_url_appends_segment() {
        let client = client_for("https://explorer.example.org/api/address");
        let address = Address::normalize("ORB.ABCDEF1234").unwrap();
        assert_eq!(
            client.wallet_url(&address).unwrap().as_str(),
            "https://explorer.example.org/api/address/ORB.ABCDEF1234"
        );
    }

    #[test]
    fn test_wallet_url_trailing_slash() {
        let client = client_for("https://explorer.example.org/api/address/");
        let address = Address::normalize("ORB1").unwrap();
        assert_eq!(
            client.wallet_url(&address).unwrap().as_str(),
            "https://explorer.example.org/api/address/ORB1"
        );
    }

    #[test]
    fn test_wallet_url_percent_encodes() {
        let client = client_for("https://explorer.example.org/api/address");
        let address = Address::normalize("a b/c?d#e").unwrap();
        assert_eq!(
            client.wallet_url(&address).unwrap().as_str(),
            "https://explorer.example.org/api/address/a%20b%2Fc%3Fd%23e"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let err = OrbitClient::with_config(OrbitClientConfig {
            base_url: "mailto:someone@example.org".to_string(),
            timeout_seconds: 5,
            connect_timeout_seconds: 5,
        })
        .unwrap_err();
        assert!(matches!(err, OrbitClientError::InvalidUrl { .. }));
    }

    #[test]
    fn test_truncate_on_char_boundary() {
        let mut text = "ab€cd".to_string();
        truncate_on_char_boundary(&mut text, 3);
        assert_eq!(text, "ab");

        let mut short = "abc".to_string();
        truncate_on_char_boundary(&mut short, 10);
        assert_eq!(short, "abc");
    }
}
