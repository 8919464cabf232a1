use serde::Deserialize;

static CONFIG: OnceCell<Config> = OnceCell::const_new();

mod config_dir;
pub use config_dir::{find_config_file, read_config, read_config_at};

mod error;
pub use error::{ConfigError, ConfigResult};
use tokio::sync::OnceCell;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    host: Host,
    app: App,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Host {
    bindto: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct App {
    jwt: String,
    database_uri: String,
    /// Serve swagger-ui under `/api/docs`
    #[serde(default)]
    docs: bool,
    /// Persist handled requests to `activity_logs`
    #[serde(default)]
    activity_log: bool,
}

impl Config {
    /// Loaded once per process. Exits when no usable config exists, the server
    /// can't do anything meaningful without one.
    #[tracing::instrument]
    pub async fn get_or_init(use_local: bool) -> &'static Config {
        CONFIG
            .get_or_init(|| async {
                match Self::load(use_local) {
                    Ok(c) => c,
                    Err(e) => {
                        if !matches!(e, ConfigError::ConfigNotFound) {
                            crate::error::log_error(&e);
                        }
                        tracing::error!("Config not found.");
                        std::process::exit(1);
                    }
                }
            })
            .await
    }

    pub fn load(use_local: bool) -> ConfigResult<Self> {
        let bytes = read_config(use_local)?;
        Self::from_toml(&String::from_utf8(bytes)?)
    }

    pub fn from_toml(source: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(source)?)
    }

    #[inline]
    pub fn host(&self) -> &Host {
        &self.host
    }

    #[inline]
    pub fn app(&self) -> &App {
        &self.app
    }
}

impl Host {
    #[inline]
    pub fn bindto(&self) -> &str {
        &self.bindto
    }
}

impl App {
    #[inline]
    pub fn jwt(&self) -> &str {
        &self.jwt
    }

    #[inline]
    pub fn database_uri(&self) -> &str {
        &self.database_uri
    }

    #[inline]
    pub fn docs(&self) -> bool {
        self.docs
    }

    #[inline]
    pub fn activity_log(&self) -> bool {
        self.activity_log
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn config_test() {
        let config = Config::load(true).unwrap();
        assert_eq!(config.host().bindto(), "127.0.0.1:5000"); // defaults
    }

    #[test]
    fn config_optional_flags_default_off() {
        let config = Config::from_toml(
            r#"
            [host]
            bindto = "0.0.0.0:8080"

            [app]
            jwt = "secret"
            database_uri = "postgres://localhost/lessonhub"
            "#,
        )
        .unwrap();

        assert_eq!(config.app().jwt(), "secret");
        assert!(!config.app().docs());
        assert!(!config.app().activity_log());
    }

    #[test]
    fn config_missing_section() {
        let result = Config::from_toml("[host]\nbindto = \"127.0.0.1:1\"\n");
        assert!(matches!(result, Err(ConfigError::TomlDeError(_))));
    }
}
