use config::{Config, ConfigError, Environment, File};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Prefix for structured environment overrides, e.g. `SQLITE_PANEL__SERVER__PORT`.
pub const ENV_PREFIX: &str = "SQLITE_PANEL";

/// Flat environment variables honoured for compatibility with older deployments.
const LEGACY_ENV_VARS: &[(&str, &str)] = &[
    ("ADMIN_USER", "auth.admin_user"),
    ("ADMIN_PASSWORD", "auth.admin_password"),
    ("JWT_SECRET", "auth.jwt_secret"),
    ("GEMINI_API_KEY", "llm.gemini_api_key"),
    ("GEMINI_MODEL", "llm.gemini_model"),
    ("PORT", "server.port"),
    ("HOST", "server.host"),
];

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub database: DatabaseConfig,
    pub llm: LlmConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Largest accepted blob upload, in bytes
    pub max_upload_bytes: usize,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AuthConfig {
    pub admin_user: String,
    pub admin_password: String,
    pub jwt_secret: Option<String>,
    pub token_ttl_seconds: i64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    /// Used when the login form does not name a database file
    pub default_path: String,
    pub busy_timeout_ms: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LlmConfig {
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
                max_upload_bytes: 64 * 1024 * 1024,
            },
            auth: AuthConfig {
                admin_user: "guest".to_string(),
                admin_password: "guest".to_string(),
                jwt_secret: None,
                token_ttl_seconds: 60 * 60,
            },
            database: DatabaseConfig {
                default_path: "/sqlite/data.db".to_string(),
                busy_timeout_ms: 5000,
            },
            llm: LlmConfig {
                gemini_api_key: None,
                gemini_model: panel_llm_sdk::models::gemini::DEFAULT_MODEL.to_string(),
            },
            cors: CorsConfig {
                allowed_origins: vec!["http://localhost:3000".to_string()],
            },
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, the config file, and the process environment.
    ///
    /// An explicit `config_file` must exist; the default location is optional.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_from(
            config_file,
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
            |name| std::env::var(name).ok(),
        )
    }

    /// Same layering as [`AppConfig::load`] with the environment sources injected.
    pub fn load_from<F>(
        config_file: Option<&Path>,
        environment: Environment,
        legacy_lookup: F,
    ) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file_source = match config_file {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::Message(format!(
                        "Configuration file not found: {}",
                        path.display()
                    )));
                }
                Some(File::from(path.to_path_buf()))
            }
            None => get_config_path().map(|path| File::from(path).required(false)),
        };

        let mut builder = Config::builder().add_source(Config::try_from(&AppConfig::default())?);
        if let Some(file) = file_source {
            builder = builder.add_source(file);
        }
        builder = builder.add_source(environment);

        for (var, key) in LEGACY_ENV_VARS {
            builder = builder.set_override_option(*key, legacy_lookup(var))?;
        }

        let config: AppConfig = builder.build()?.try_deserialize()?;
        config.finalize()
    }

    fn finalize(mut self) -> Result<Self, ConfigError> {
        if self.auth.token_ttl_seconds <= 0 {
            return Err(ConfigError::Message(
                "auth.token_ttl_seconds must be positive".to_string(),
            ));
        }

        let secret_missing = self
            .auth
            .jwt_secret
            .as_deref()
            .map(str::is_empty)
            .unwrap_or(true);

        if secret_missing {
            tracing::warn!(
                "No JWT secret configured; generated a random one. Tokens will not survive a restart"
            );
            self.auth.jwt_secret = Some(generate_jwt_secret());
        }

        if self.llm.gemini_api_key.as_deref() == Some("") {
            self.llm.gemini_api_key = None;
        }

        Ok(self)
    }

    pub fn jwt_secret(&self) -> &str {
        self.auth.jwt_secret.as_deref().unwrap_or_default()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("sqlite-panel/panel.toml"))
}

/// Generates a random JWT secret, equivalent to `openssl rand -base64 48`
fn generate_jwt_secret() -> String {
    let mut rng = rand::rng();
    let random_bytes: Vec<u8> = (0..48).map(|_| rng.random()).collect();
    base64::Engine::encode(&base64::engine::general_purpose::STANDARD, &random_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn isolated_env() -> Environment {
        Environment::with_prefix("SQLITE_PANEL_CONFIG_TESTS_UNSET").separator("__")
    }

    fn load_with(file: Option<&Path>, vars: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let dir = tempfile::tempdir().unwrap();
        let empty = dir.path().join("empty.toml");
        std::fs::write(&empty, "").unwrap();
        AppConfig::load_from(Some(file.unwrap_or(&empty)), isolated_env(), |name| {
            vars.get(name).cloned()
        })
        .unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = load_with(None, &[]);
        assert_eq!(config.auth.admin_user, "guest");
        assert_eq!(config.auth.admin_password, "guest");
        assert_eq!(config.auth.token_ttl_seconds, 3600);
        assert_eq!(config.database.default_path, "/sqlite/data.db");
        assert_eq!(config.database.busy_timeout_ms, 5000);
        assert_eq!(config.llm.gemini_model, "gemini-2.0-flash");
        assert!(config.llm.gemini_api_key.is_none());
        assert_eq!(config.server.max_upload_bytes, 64 * 1024 * 1024);
    }

    #[test]
    fn test_missing_secret_is_generated() {
        let first = load_with(None, &[]);
        let second = load_with(None, &[]);
        assert!(!first.jwt_secret().is_empty());
        assert_ne!(first.jwt_secret(), second.jwt_secret());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::with_suffix(".toml").unwrap();
        writeln!(
            file,
            r#"
[server]
port = 8088

[auth]
admin_user = "root"
jwt_secret = "from-file"

[database]
default_path = "/data/app.db"
"#
        )
        .unwrap();

        let config = load_with(Some(file.path()), &[]);
        assert_eq!(config.server.port, 8088);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.auth.admin_user, "root");
        assert_eq!(config.auth.admin_password, "guest");
        assert_eq!(config.jwt_secret(), "from-file");
        assert_eq!(config.database.default_path, "/data/app.db");
    }

    #[test]
    fn test_legacy_variables_win() {
        let mut file = tempfile::NamedTempFile::with_suffix(".toml").unwrap();
        writeln!(file, "[auth]\nadmin_user = \"root\"").unwrap();

        let config = load_with(
            Some(file.path()),
            &[
                ("ADMIN_USER", "admin"),
                ("ADMIN_PASSWORD", "s3cret"),
                ("JWT_SECRET", "env-secret"),
                ("GEMINI_API_KEY", "key-123"),
                ("GEMINI_MODEL", "gemini-2.5-flash"),
                ("PORT", "9000"),
            ],
        );

        assert_eq!(config.auth.admin_user, "admin");
        assert_eq!(config.auth.admin_password, "s3cret");
        assert_eq!(config.jwt_secret(), "env-secret");
        assert_eq!(config.llm.gemini_api_key.as_deref(), Some("key-123"));
        assert_eq!(config.llm.gemini_model, "gemini-2.5-flash");
        assert_eq!(config.server.port, 9000);
    }

    #[test]
    fn test_empty_api_key_counts_as_missing() {
        let config = load_with(None, &[("GEMINI_API_KEY", "")]);
        assert!(config.llm.gemini_api_key.is_none());
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let result = AppConfig::load_from(
            Some(Path::new("/definitely/not/here/panel.toml")),
            isolated_env(),
            |_| None,
        );
        assert!(result.is_err());
    }
}
