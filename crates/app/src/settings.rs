//! Handles settings for the application.
//!
//! Sources, lowest priority first: built-in defaults, an optional `settings`
//! file (`settings.toml` or any other format `config` reads), `BILLY__*`
//! environment variables (e.g. `BILLY__SERVER__PORT`), and finally `PORT`.
use config::{Config, ConfigError, Environment, File, Source};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct App {
    pub level: String,
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    Sqlite(String),
}

fn default_database() -> Database {
    Database::Sqlite("billy.db".to_string())
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: String,
    pub port: u16,
    #[serde(default = "default_database")]
    pub database: Database,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: App,
    pub server: Server,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_sources(
            File::with_name("settings").required(false),
            std::env::var("PORT").ok(),
        )
    }

    fn from_sources<S>(file: S, port: Option<String>) -> Result<Self, ConfigError>
    where
        S: Source + Send + Sync + 'static,
    {
        Config::builder()
            .set_default("app.level", "info")?
            .set_default("server.bind", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .add_source(file)
            .add_source(
                Environment::with_prefix("BILLY")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("server.port", port)?
            .build()?
            .try_deserialize()
    }
}
