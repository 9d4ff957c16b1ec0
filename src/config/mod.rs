use std::str::FromStr;

use dotenvy::dotenv;
use serde::Deserialize;
use sqlx::postgres::PgConnectOptions;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read environment: {0}")]
    Env(#[from] envy::Error),

    #[error("invalid DATABASE_URL: {0}")]
    DatabaseUrl(#[source] sqlx::Error),

    #[error("BCRYPT_COST must be between 4 and 31, got {0}")]
    BcryptCost(u32),
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    5432
}

fn default_bcrypt_cost() -> u32 {
    bcrypt::DEFAULT_COST
}

/// Configuration shared by the three menu programs
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Full Postgres connection URL; takes precedence over the `DB_*` parts
    pub database_url: Option<String>,
    #[serde(default = "default_host")]
    pub db_host: String,
    #[serde(default = "default_port")]
    pub db_port: u16,
    pub db_name: Option<String>,
    pub db_user: Option<String>,
    pub db_password: Option<String>,
    /// Work factor for new password hashes
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// This function will:
    /// 1. Load variables from .env file if it exists
    /// 2. Deserialize environment variables into Config struct
    pub fn load() -> Result<Self, ConfigError> {
        dotenv().ok();
        let config = envy::from_env::<Config>()?;
        config.validate()
    }

    /// Build a config from explicit key/value pairs instead of the process environment
    pub fn from_pairs<I>(pairs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config = envy::from_iter::<_, Config>(pairs)?;
        config.validate()
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if !(4..=31).contains(&self.bcrypt_cost) {
            return Err(ConfigError::BcryptCost(self.bcrypt_cost));
        }
        Ok(self)
    }

    /// Replace the database URL, e.g. from a command line flag
    pub fn with_database_url(mut self, url: Option<String>) -> Self {
        if url.is_some() {
            self.database_url = url;
        }
        self
    }

    pub fn connect_options(&self) -> Result<PgConnectOptions, ConfigError> {
        if let Some(url) = &self.database_url {
            return PgConnectOptions::from_str(url).map_err(ConfigError::DatabaseUrl);
        }

        let mut options = PgConnectOptions::new()
            .host(&self.db_host)
            .port(self.db_port);
        if let Some(name) = &self.db_name {
            options = options.database(name);
        }
        if let Some(user) = &self.db_user {
            options = options.username(user);
        }
        if let Some(password) = &self.db_password {
            options = options.password(password);
        }
        Ok(options)
    }
}

/// Initialize environment variables and load configuration
pub fn init() -> Result<Config, ConfigError> {
    dotenv().ok();
    Config::load()
}
