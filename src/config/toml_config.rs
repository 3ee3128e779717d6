use crate::core::ConfigProvider;
use crate::utils::error::{ApiError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub client: ClientConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    pub base_url: Option<String>,
    pub user_agent: Option<String>,
    #[serde(default = "default_cookie_store")]
    pub cookie_store: bool,
    pub headers: Option<HashMap<String, String>>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            user_agent: None,
            cookie_store: default_cookie_store(),
            headers: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    #[serde(default)]
    pub json: bool,
}

fn default_cookie_store() -> bool {
    true
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ApiError::Io)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ApiError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${API_TOKEN})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ApiError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn logging_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().map(|l| l.json).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn base_url(&self) -> Option<&str> {
        self.client.base_url.as_deref()
    }

    fn default_headers(&self) -> Option<&HashMap<String, String>> {
        self.client.headers.as_ref()
    }

    fn user_agent(&self) -> Option<&str> {
        self.client.user_agent.as_deref()
    }

    fn cookie_store(&self) -> bool {
        self.client.cookie_store
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(base_url) = &self.client.base_url {
            validation::validate_url("client.base_url", base_url)?;
        }

        if let Some(user_agent) = &self.client.user_agent {
            validation::validate_non_empty_string("client.user_agent", user_agent)?;
        }

        if let Some(headers) = &self.client.headers {
            for name in headers.keys() {
                validation::validate_header_name("client.headers", name)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[client]
base_url = "http://127.0.0.1:5000"
user_agent = "mega-tool/0.1"
cookie_store = false

[client.headers]
Accept = "application/json"

[logging]
level = "debug"
json = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.base_url(), Some("http://127.0.0.1:5000"));
        assert_eq!(config.user_agent(), Some("mega-tool/0.1"));
        assert!(!config.cookie_store());
        assert_eq!(
            config.default_headers().unwrap().get("Accept").unwrap(),
            "application/json"
        );
        assert_eq!(config.logging_level(), Some("debug"));
        assert!(config.json_logs());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert!(config.base_url().is_none());
        assert!(config.default_headers().is_none());
        assert!(config.cookie_store());
        assert!(!config.json_logs());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("MEGA_API_TEST_TOKEN", "secret-123");
        let toml_content = r#"
[client.headers]
Authorization = "Bearer ${MEGA_API_TEST_TOKEN}"
X-Unset = "${MEGA_API_TEST_UNSET_VAR}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        let headers = config.default_headers().unwrap();
        assert_eq!(headers.get("Authorization").unwrap(), "Bearer secret-123");
        assert_eq!(
            headers.get("X-Unset").unwrap(),
            "${MEGA_API_TEST_UNSET_VAR}"
        );
        std::env::remove_var("MEGA_API_TEST_TOKEN");
    }

    #[test]
    fn test_invalid_base_url_fails_validation() {
        let config = TomlConfig::from_toml_str(
            r#"
[client]
base_url = "ftp://files.example.com"
"#,
        )
        .unwrap();
        assert!(matches!(
            config.validate(),
            Err(ApiError::InvalidConfigValueError { .. })
        ));
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let err = TomlConfig::from_toml_str("[client\nbase_url =").unwrap_err();
        assert!(matches!(err, ApiError::ConfigError { .. }));
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[client]\nbase_url = \"https://tools.internal\"").unwrap();

        let config = TomlConfig::from_file(file.path()).unwrap();
        assert_eq!(config.base_url(), Some("https://tools.internal"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = TomlConfig::from_file("/nonexistent/mega-api.toml").unwrap_err();
        assert!(matches!(err, ApiError::Io(_)));
    }
}
