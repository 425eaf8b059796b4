use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub application: ApplicationSettings,
    pub auth: AuthSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub username: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub database_name: String,
    pub max_connections: u32,
}

impl DatabaseSettings {
    pub fn connection_string(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.username, self.password, self.host, self.port, self.database_name
        )
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApplicationSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthSettings {
    /// Bcrypt cost applied to stored credentials.
    pub password_work_factor: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub level: String,
}

impl Settings {
    /// Layered configuration: default file, environment-specific file, then
    /// `SNIPBIN_`-prefixed environment variables.
    pub fn load() -> Result<Self, config::ConfigError> {
        let environment = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", environment)).required(false))
            .add_source(config::Environment::with_prefix("SNIPBIN").separator("_"))
            .build()?;

        config.try_deserialize()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database: DatabaseSettings {
                username: "snipbin".to_string(),
                password: "snipbin123".to_string(),
                host: "localhost".to_string(),
                port: 5432,
                database_name: "snipbin_dev".to_string(),
                max_connections: 10,
            },
            application: ApplicationSettings {
                host: "127.0.0.1".to_string(),
                port: 4000,
            },
            auth: AuthSettings {
                password_work_factor: crate::util::password::DEFAULT_WORK_FACTOR,
            },
            logging: LoggingSettings {
                level: "info".to_string(),
            },
        }
    }
}
