pub mod toml_config;

use crate::core::ConfigProvider;
use std::collections::HashMap;
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
use crate::core::RequestOptions;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;

/// One-shot request from the command line.
#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "mega-api")]
#[command(about = "Issue an HTTP request and print the body as JSON or text")]
pub struct CliConfig {
    /// URL, or path relative to --base-url
    pub path: String,

    /// HTTP method (defaults to GET)
    #[arg(short = 'X', long)]
    pub method: Option<String>,

    /// Request header as 'Name: value'; replaces any configured headers
    #[arg(short = 'H', long = "header")]
    pub headers: Vec<String>,

    /// Request body
    #[arg(short, long)]
    pub data: Option<String>,

    #[arg(long)]
    pub base_url: Option<String>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long)]
    pub user_agent: Option<String>,

    /// Do not keep cookies between requests
    #[arg(long)]
    pub no_cookies: bool,

    /// Pretty-print JSON responses
    #[arg(long)]
    pub pretty: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Parsed `--header` lines, or `None` when no header was given.
    pub fn header_map(&self) -> Result<Option<HashMap<String, String>>> {
        if self.headers.is_empty() {
            return Ok(None);
        }

        let mut map = HashMap::new();
        for line in &self.headers {
            let (name, value) = validation::parse_header_line("header", line)?;
            map.insert(name, value);
        }
        Ok(Some(map))
    }

    /// Layers command-line overrides on top of file settings.
    pub fn settings(&self, file: TomlConfig) -> Result<Settings> {
        let mut settings = Settings::from(file);

        if let Some(base_url) = &self.base_url {
            settings.base_url = Some(base_url.clone());
        }
        if let Some(user_agent) = &self.user_agent {
            settings.user_agent = Some(user_agent.clone());
        }
        if self.no_cookies {
            settings.cookie_store = false;
        }
        if let Some(headers) = self.header_map()? {
            settings.headers = Some(headers);
        }

        Ok(settings)
    }

    /// Headers come from the provider's configured defaults, if any.
    pub fn request_options<C: ConfigProvider>(&self, config: &C) -> RequestOptions {
        RequestOptions {
            method: self.method.clone(),
            body: self.data.clone(),
            headers: config.default_headers().cloned(),
        }
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("path", &self.path)?;

        if let Some(method) = &self.method {
            validation::validate_method("method", method)?;
        }
        if let Some(base_url) = &self.base_url {
            validation::validate_url("base_url", base_url)?;
        }
        self.header_map()?;

        Ok(())
    }
}

/// Effective client settings after merging file and command line.
#[derive(Debug, Clone)]
pub struct Settings {
    pub base_url: Option<String>,
    pub user_agent: Option<String>,
    pub cookie_store: bool,
    pub headers: Option<HashMap<String, String>>,
}

impl From<TomlConfig> for Settings {
    fn from(file: TomlConfig) -> Self {
        Self {
            base_url: file.client.base_url,
            user_agent: file.client.user_agent,
            cookie_store: file.client.cookie_store,
            headers: file.client.headers,
        }
    }
}

impl ConfigProvider for Settings {
    fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    fn default_headers(&self) -> Option<&HashMap<String, String>> {
        self.headers.as_ref()
    }

    fn user_agent(&self) -> Option<&str> {
        self.user_agent.as_deref()
    }

    fn cookie_store(&self) -> bool {
        self.cookie_store
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliConfig {
        CliConfig::try_parse_from(std::iter::once("mega-api").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_minimal_invocation() {
        let cli = parse(&["/api/ping"]);
        assert_eq!(cli.path, "/api/ping");
        assert!(cli.method.is_none());
        assert!(cli.header_map().unwrap().is_none());
        assert!(cli.validate().is_ok());

        let settings = cli.settings(TomlConfig::default()).unwrap();
        assert!(settings.cookie_store());
        assert_eq!(cli.request_options(&settings), RequestOptions::default());
    }

    #[test]
    fn test_cli_headers_replace_file_headers() {
        let file = TomlConfig::from_toml_str(
            r#"
[client]
base_url = "http://127.0.0.1:5000"

[client.headers]
Authorization = "Bearer abc"
"#,
        )
        .unwrap();

        let cli = parse(&["/api/raw", "-H", "Accept: text/plain"]);
        let settings = cli.settings(file).unwrap();

        let headers = settings.default_headers().unwrap();
        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("Accept").unwrap(), "text/plain");
        assert_eq!(settings.base_url(), Some("http://127.0.0.1:5000"));
    }

    #[test]
    fn test_file_headers_used_when_cli_has_none() {
        let file = TomlConfig::from_toml_str(
            r#"
[client.headers]
Authorization = "Bearer abc"
"#,
        )
        .unwrap();

        let cli = parse(&["/api/raw"]);
        let settings = cli.settings(file).unwrap();
        let options = cli.request_options(&settings);
        assert_eq!(
            options.headers.unwrap().get("Authorization").unwrap(),
            "Bearer abc"
        );
    }

    #[test]
    fn test_request_options_read_provider_default_headers() {
        let file = TomlConfig::from_toml_str(
            r#"
[client.headers]
X-Api-Key = "k-1"
"#,
        )
        .unwrap();

        let cli = parse(&["/api/raw", "-X", "PUT"]);
        let options = cli.request_options(&file);
        assert_eq!(options.method.as_deref(), Some("PUT"));
        assert_eq!(options.headers.as_ref(), file.default_headers());

        let options = cli.request_options(&cli.settings(TomlConfig::default()).unwrap());
        assert!(options.headers.is_none());
    }

    #[test]
    fn test_overrides() {
        let cli = parse(&[
            "/api/containers",
            "-X",
            "POST",
            "-d",
            r#"{"image":"nginx"}"#,
            "--base-url",
            "http://localhost:8000",
            "--user-agent",
            "mega-cli",
            "--no-cookies",
        ]);
        assert!(cli.validate().is_ok());

        let settings = cli.settings(TomlConfig::default()).unwrap();
        assert_eq!(settings.base_url(), Some("http://localhost:8000"));
        assert_eq!(settings.user_agent(), Some("mega-cli"));
        assert!(!settings.cookie_store());

        let options = cli.request_options(&settings);
        assert_eq!(options.method.as_deref(), Some("POST"));
        assert_eq!(options.body.as_deref(), Some(r#"{"image":"nginx"}"#));
        assert!(options.headers.is_none());
    }

    #[test]
    fn test_validation_failures() {
        assert!(parse(&["/x", "-H", "missing-colon"]).validate().is_err());
        assert!(parse(&["/x", "-X", "BAD METHOD"]).validate().is_err());
        assert!(parse(&["/x", "--base-url", "not a url"]).validate().is_err());
        assert!(parse(&["  "]).validate().is_err());
    }
}
