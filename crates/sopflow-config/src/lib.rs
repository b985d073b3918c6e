//! Configuration management for sopflow.
//!
//! Parses `sopflow.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! Confluence credential fields support environment variable expansion
//! (`${VAR}` and `${VAR:-default}`). When no config file is found, the
//! credentials fall back to the environment variables the original
//! deployment used:
//!
//! - `CONFLUENCE_SERVICE_ACCOUNT_BASE_URL`
//! - `CONFLUENCE_USERNAME`
//! - `CONFLUENCE_API_TOKEN`
//!
//! Credentials are validated at load time so a misconfigured service
//! fails at startup rather than on the first webhook.

mod expand;

use std::path::{Path, PathBuf};

use serde::Deserialize;

use expand::expand_env;

/// Configuration filename to search for.
pub const CONFIG_FILENAME: &str = "sopflow.toml";

/// Environment fallbacks for the Confluence credentials.
const ENV_BASE_URL: &str = "CONFLUENCE_SERVICE_ACCOUNT_BASE_URL";
const ENV_USERNAME: &str = "CONFLUENCE_USERNAME";
const ENV_API_TOKEN: &str = "CONFLUENCE_API_TOKEN";

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Clone, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
}

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Confluence configuration as parsed from TOML (values may contain
    /// `${VAR}` references).
    confluence: Option<ConfluenceConfigRaw>,

    /// Resolved Confluence configuration (set after loading).
    #[serde(skip)]
    pub confluence_resolved: ConfluenceConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            confluence: None,
            confluence_resolved: ConfluenceConfig::default(),
            config_path: None,
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 8080,
        }
    }
}

/// Raw Confluence configuration as parsed from TOML.
#[derive(Debug, Clone, Deserialize)]
struct ConfluenceConfigRaw {
    base_url: String,
    username: String,
    api_token: String,
}

/// Resolved Confluence configuration with expanded credentials.
#[derive(Debug, Clone, Default)]
pub struct ConfluenceConfig {
    /// Confluence site base URL (without the `/wiki` suffix).
    pub base_url: String,
    /// Service account username (email).
    pub username: String,
    /// API token for the service account.
    pub api_token: String,
}

impl ConfluenceConfig {
    /// Validate that all credential fields are present and non-empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.is_empty() {
            return Err(ConfigError::MissingCredential("confluence.base_url"));
        }
        if self.username.is_empty() {
            return Err(ConfigError::MissingCredential("confluence.username"));
        }
        if self.api_token.is_empty() {
            return Err(ConfigError::MissingCredential("confluence.api_token"));
        }
        Ok(())
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Explicitly requested config file does not exist.
    #[error("config file not found: {0}")]
    NotFound(PathBuf),

    /// IO error reading the config file.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Environment variable expansion failed.
    #[error("{field}: {message}")]
    EnvVar { field: String, message: String },

    /// A required Confluence credential is missing or empty.
    #[error("missing Confluence configuration: {0}")]
    MissingCredential(&'static str),
}

impl Config {
    /// Load configuration.
    ///
    /// When `path` is given the file must exist. Otherwise `sopflow.toml`
    /// is discovered by walking up from the current directory; if none is
    /// found, defaults plus environment credentials are used.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the
    /// Confluence credentials are incomplete after resolution.
    pub fn load(path: Option<&Path>, cli: Option<&CliSettings>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound(path.to_path_buf()));
                }
                Self::load_from_file(path)?
            }
            None => match discover_config_file() {
                Some(path) => Self::load_from_file(&path)?,
                None => Self::default(),
            },
        };

        if let Some(cli) = cli {
            if let Some(host) = &cli.host {
                config.server.host.clone_from(host);
            }
            if let Some(port) = cli.port {
                config.server.port = port;
            }
        }

        config.confluence_resolved = config.resolve_confluence()?;
        config.confluence_resolved.validate()?;
        Ok(config)
    }

    /// Load and parse a specific config file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&contents)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Resolve Confluence credentials from the config section or the
    /// environment.
    fn resolve_confluence(&self) -> Result<ConfluenceConfig, ConfigError> {
        match &self.confluence {
            Some(raw) => Ok(ConfluenceConfig {
                base_url: expand_env(&raw.base_url, "confluence.base_url")?
                    .trim_end_matches('/')
                    .to_owned(),
                username: expand_env(&raw.username, "confluence.username")?,
                api_token: expand_env(&raw.api_token, "confluence.api_token")?,
            }),
            None => Ok(ConfluenceConfig {
                base_url: std::env::var(ENV_BASE_URL)
                    .unwrap_or_default()
                    .trim_end_matches('/')
                    .to_owned(),
                username: std::env::var(ENV_USERNAME).unwrap_or_default(),
                api_token: std::env::var(ENV_API_TOKEN).unwrap_or_default(),
            }),
        }
    }
}

/// Search for `sopflow.toml` in the current directory and its parents.
fn discover_config_file() -> Option<PathBuf> {
    let mut dir = std::env::current_dir().ok()?;
    loop {
        let candidate = dir.join(CONFIG_FILENAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        if !dir.pop() {
            return None;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_full_config() {
        let file = write_config(
            r#"
            [server]
            host = "0.0.0.0"
            port = 9090

            [confluence]
            base_url = "https://wiki.example.com/"
            username = "svc@example.com"
            api_token = "token-123"
            "#,
        );

        let config = Config::load(Some(file.path()), None).unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9090);
        // Trailing slash is stripped from the base URL
        assert_eq!(
            config.confluence_resolved.base_url,
            "https://wiki.example.com"
        );
        assert_eq!(config.confluence_resolved.username, "svc@example.com");
        assert_eq!(config.confluence_resolved.api_token, "token-123");
        assert_eq!(config.config_path.as_deref(), Some(file.path()));
    }

    #[test]
    fn test_load_expands_env_in_credentials() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("SOPFLOW_CFG_TOKEN", "from-env");
        }
        let file = write_config(
            r#"
            [confluence]
            base_url = "https://wiki.example.com"
            username = "svc@example.com"
            api_token = "${SOPFLOW_CFG_TOKEN}"
            "#,
        );

        let config = Config::load(Some(file.path()), None).unwrap();
        assert_eq!(config.confluence_resolved.api_token, "from-env");
        unsafe {
            std::env::remove_var("SOPFLOW_CFG_TOKEN");
        }
    }

    #[test]
    fn test_env_fallback_without_confluence_section() {
        // SAFETY: no other test reads these variables
        unsafe {
            std::env::set_var(ENV_BASE_URL, "https://wiki.example.com/");
            std::env::set_var(ENV_USERNAME, "svc@example.com");
            std::env::set_var(ENV_API_TOKEN, "env-token");
        }
        let file = write_config(
            r#"
            [server]
            port = 9090
            "#,
        );

        let config = Config::load(Some(file.path()), None).unwrap();
        assert_eq!(
            config.confluence_resolved.base_url,
            "https://wiki.example.com"
        );
        assert_eq!(config.confluence_resolved.api_token, "env-token");
        unsafe {
            std::env::remove_var(ENV_BASE_URL);
            std::env::remove_var(ENV_USERNAME);
            std::env::remove_var(ENV_API_TOKEN);
        }
    }

    #[test]
    fn test_load_missing_credential_fails() {
        let file = write_config(
            r#"
            [confluence]
            base_url = "https://wiki.example.com"
            username = ""
            api_token = "token"
            "#,
        );

        let err = Config::load(Some(file.path()), None).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingCredential("confluence.username")
        ));
    }

    #[test]
    fn test_load_explicit_path_not_found() {
        let err = Config::load(Some(Path::new("/nonexistent/sopflow.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_cli_overrides() {
        let file = write_config(
            r#"
            [server]
            port = 9090

            [confluence]
            base_url = "https://wiki.example.com"
            username = "svc@example.com"
            api_token = "token"
            "#,
        );
        let cli = CliSettings {
            host: Some("10.0.0.1".to_owned()),
            port: Some(7070),
        };

        let config = Config::load(Some(file.path()), Some(&cli)).unwrap();
        assert_eq!(config.server.host, "10.0.0.1");
        assert_eq!(config.server.port, 7070);
    }

    #[test]
    fn test_server_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
    }
}
