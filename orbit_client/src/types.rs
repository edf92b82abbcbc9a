use config_manager::ApiConfig;

/// Configuration for the wallet API client
#[derive(Debug, Clone)]
pub struct OrbitClientConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
    pub connect_timeout_seconds: u64,
}

impl From<ApiConfig> for OrbitClientConfig {
    fn from(api: ApiConfig) -> Self {
        Self {
            base_url: api.api_base_url,
            timeout_seconds: api.request_timeout_seconds,
            connect_timeout_seconds: api.connect_timeout_seconds,
        }
    }
}

impl From<&ApiConfig> for OrbitClientConfig {
    fn from(api: &ApiConfig) -> Self {
        api.clone().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config_manager::SystemConfig;

    #[test]
    fn test_client_config_from_api_config() {
        let mut api = SystemConfig::default().api;
        api.api_base_url = "http://localhost:9000/wallet".to_string();
        api.request_timeout_seconds = 3;

        let config = OrbitClientConfig::from(&api);
        assert_eq!(config.base_url, "http://localhost:9000/wallet");
        assert_eq!(config.timeout_seconds, 3);
        assert_eq!(config.connect_timeout_seconds, api.connect_timeout_seconds);
    }
}
