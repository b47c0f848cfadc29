use crate::adapters::http::DEFAULT_TIMEOUT_SECONDS;
use crate::domain::model::{Address, MAX_BASE_TIMESTAMP_MS};
use crate::utils::error::{DappError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

pub const FALLBACK_NETWORK: &str = "localhost";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DappConfig {
    pub default_network: Option<String>,
    pub networks: HashMap<String, NetworkConfig>,
    pub rpc: Option<RpcConfig>,
    pub session: Option<SessionConfig>,
}

/// One deployment: node endpoint plus the two contract addresses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub url: String,
    pub app_address: String,
    pub data_address: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcConfig {
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Fixed base for flight timestamps, so separate runs agree on them.
    pub base_timestamp_ms: Option<u64>,
}

/// A network entry after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedNetwork {
    pub name: String,
    pub url: String,
    pub app_address: Address,
    pub data_address: Address,
}

impl DappConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DappError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| DappError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${APP_ADDRESS})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| DappError::ConfigError {
            message: format!("env substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        if self.networks.is_empty() {
            return Err(DappError::MissingConfigError {
                field: "networks".to_string(),
            });
        }

        for (name, network) in &self.networks {
            validation::validate_non_empty_string("networks", name)?;
            validation::validate_url(&format!("networks.{}.url", name), &network.url)?;
            validation::validate_address(
                &format!("networks.{}.app_address", name),
                &network.app_address,
            )?;
            validation::validate_address(
                &format!("networks.{}.data_address", name),
                &network.data_address,
            )?;
        }

        if let Some(default) = &self.default_network {
            if !self.networks.contains_key(default) {
                return Err(DappError::InvalidConfigValueError {
                    field: "default_network".to_string(),
                    value: default.clone(),
                    reason: "No such entry under [networks]".to_string(),
                });
            }
        }

        if let Some(timeout) = self.rpc.as_ref().and_then(|r| r.timeout_seconds) {
            validation::validate_positive_number("rpc.timeout_seconds", timeout, 1)?;
        }

        // 航班時間 = base + offset，不可溢位
        if let Some(base) = self.base_timestamp_ms() {
            validation::validate_max_number(
                "session.base_timestamp_ms",
                base,
                MAX_BASE_TIMESTAMP_MS,
            )?;
        }

        Ok(())
    }

    /// 選擇網路：明確指定 > default_network > "localhost"
    pub fn network(&self, requested: Option<&str>) -> Result<ResolvedNetwork> {
        let name = requested
            .or(self.default_network.as_deref())
            .unwrap_or(FALLBACK_NETWORK);

        let network = validation::validate_required_field(
            &format!("networks.{}", name),
            &self.networks.get(name).cloned(),
        )?
        .clone();

        Ok(ResolvedNetwork {
            name: name.to_string(),
            app_address: validation::validate_address(
                &format!("networks.{}.app_address", name),
                &network.app_address,
            )?,
            data_address: validation::validate_address(
                &format!("networks.{}.data_address", name),
                &network.data_address,
            )?,
            url: network.url,
        })
    }

    pub fn request_timeout(&self) -> Duration {
        let seconds = self
            .rpc
            .as_ref()
            .and_then(|r| r.timeout_seconds)
            .unwrap_or(DEFAULT_TIMEOUT_SECONDS);
        Duration::from_secs(seconds)
    }

    pub fn base_timestamp_ms(&self) -> Option<u64> {
        self.session.as_ref().and_then(|s| s.base_timestamp_ms)
    }
}

impl Validate for DappConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const APP: &str = "0xf2e246bb76df876cef8b38ae84130f4f55de395b";
    const DATA: &str = "0x9fbda871d559710256a2502a2517b794b482db40";

    fn basic_toml() -> String {
        format!(
            r#"
[networks.localhost]
url = "http://localhost:8545"
app_address = "{APP}"
data_address = "{DATA}"
"#
        )
    }

    #[test]
    fn test_parse_basic_toml_config() {
        let config = DappConfig::from_toml_str(&basic_toml()).unwrap();
        assert!(config.validate().is_ok());

        let network = config.network(None).unwrap();
        assert_eq!(network.name, "localhost");
        assert_eq!(network.url, "http://localhost:8545");
        assert_eq!(network.app_address.to_string(), APP);
        assert_eq!(network.data_address.to_string(), DATA);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.base_timestamp_ms(), None);
    }

    #[test]
    fn test_default_network_and_sections() {
        let toml_content = format!(
            r#"
default_network = "ganache"

[networks.ganache]
url = "http://127.0.0.1:7545"
app_address = "{APP}"
data_address = "{DATA}"

[rpc]
timeout_seconds = 5

[session]
base_timestamp_ms = 1700000000000
"#
        );

        let config = DappConfig::from_toml_str(&toml_content).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.network(None).unwrap().name, "ganache");
        assert!(config.network(Some("localhost")).is_err());
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
        assert_eq!(config.base_timestamp_ms(), Some(1_700_000_000_000));
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("TEST_FLIGHTSURETY_APP", APP);

        let toml_content = format!(
            r#"
[networks.localhost]
url = "http://localhost:8545"
app_address = "${{TEST_FLIGHTSURETY_APP}}"
data_address = "{DATA}"
"#
        );

        let config = DappConfig::from_toml_str(&toml_content).unwrap();
        assert_eq!(config.networks["localhost"].app_address, APP);

        std::env::remove_var("TEST_FLIGHTSURETY_APP");
    }

    #[test]
    fn test_config_validation() {
        let bad_url = basic_toml().replace("http://localhost:8545", "localhost:8545");
        assert!(DappConfig::from_toml_str(&bad_url).unwrap().validate().is_err());

        let bad_address = basic_toml().replace(APP, "0x1234");
        assert!(DappConfig::from_toml_str(&bad_address).unwrap().validate().is_err());

        let bad_default = format!("default_network = \"mainnet\"\n{}", basic_toml());
        assert!(DappConfig::from_toml_str(&bad_default).unwrap().validate().is_err());

        let empty = "[networks]\n";
        assert!(DappConfig::from_toml_str(empty).unwrap().validate().is_err());
    }

    #[test]
    fn test_base_timestamp_upper_bound() {
        let mut config = DappConfig::from_toml_str(&basic_toml()).unwrap();

        config.session = Some(SessionConfig {
            base_timestamp_ms: Some(MAX_BASE_TIMESTAMP_MS),
        });
        assert!(config.validate().is_ok());

        config.session = Some(SessionConfig {
            base_timestamp_ms: Some(u64::MAX),
        });
        assert!(matches!(
            config.validate(),
            Err(DappError::InvalidConfigValueError { ref field, .. }) if field == "session.base_timestamp_ms"
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(basic_toml().as_bytes()).unwrap();

        let config = DappConfig::from_file(temp_file.path()).unwrap();
        assert!(config.networks.contains_key("localhost"));
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            DappConfig::from_toml_str("networks = 3"),
            Err(DappError::ConfigError { .. })
        ));
    }
}
