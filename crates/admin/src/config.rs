use anyhow::{Context, Result};

const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
}

impl Config {
    /// Reads the environment; `database_url` wins over `DATABASE_URL` when given.
    pub fn from_env(database_url: Option<String>) -> Result<Self> {
        let database_url = match database_url {
            Some(url) => url,
            None => std::env::var("DATABASE_URL")
                .context("Cannot load DATABASE_URL env variable")?,
        };

        Ok(Self {
            database_url,
            max_connections: parse_max_connections(
                std::env::var("DATABASE_MAX_CONNECTIONS").ok().as_deref(),
            )?,
        })
    }

    /// Connection string with credentials stripped, for logs.
    pub fn database_host(&self) -> &str {
        self.database_url
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    }
}

fn parse_max_connections(raw: Option<&str>) -> Result<u32> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(value) => value
            .parse()
            .with_context(|| format!("DATABASE_MAX_CONNECTIONS must be a number, got '{value}'")),
        None => Ok(DEFAULT_MAX_CONNECTIONS),
    }
}
