use std::env;

/// Runtime environment, selects the tracing output format among other things.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    /// Local development: pretty logs, default DEBUG level
    Development,
    /// Everything else: JSON logs, default INFO level
    Production,
}

impl Environment {
    /// Parse from the `ENVIRONMENT` variable; anything that is not
    /// "production" counts as development.
    pub fn from_env() -> Self {
        match env::var("ENVIRONMENT").as_deref() {
            Ok("production") => Self::Production,
            _ => Self::Development,
        }
    }

    pub const fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Application configuration, loaded from environment variables.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub database_url: String,
    pub bind_addr: String,
    pub max_db_connections: u32,
    pub env: Environment,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")?,
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            max_db_connections: env::var("MAX_DB_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            env: Environment::from_env(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_development_is_development() {
        assert!(Environment::Development.is_development());
        assert!(!Environment::Production.is_development());
    }
}
