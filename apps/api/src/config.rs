use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub anthropic_api_key: String,
    pub port: u16,
    pub db_max_connections: u32,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            port: env_var_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            db_max_connections: env_var_or("DB_MAX_CONNECTIONS", "10")
                .parse::<u32>()
                .context("DB_MAX_CONNECTIONS must be a positive integer")?,
            rust_log: env_var_or("RUST_LOG", "info"),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_var_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_var_or_uses_default_when_missing() {
        assert_eq!(env_var_or("GUIDANCE_UNSET_TEST_VAR", "10"), "10");
    }

    #[test]
    fn test_env_var_or_reads_set_value() {
        std::env::set_var("GUIDANCE_POOL_TEST_VAR", "25");
        assert_eq!(env_var_or("GUIDANCE_POOL_TEST_VAR", "10"), "25");
    }

    #[test]
    fn test_require_env_errors_when_missing() {
        assert!(require_env("GUIDANCE_MISSING_TEST_VAR").is_err());
    }
}
