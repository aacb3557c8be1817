//! Server configuration from the environment (`.env` honoured through `dotenvy`).

use std::time::Duration;

/// Settings read once at server start.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub max_connections: u32,
    /// Mark the session cookie `Secure` (set behind HTTPS).
    pub secure_cookie: bool,
    /// Inactivity window after which a session expires.
    pub session_ttl: Duration,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, String> {
        dotenvy::dotenv().ok();

        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set")?;
        let max_connections = parse_var("DB_MAX_CONNECTIONS", 5)?;
        let secure_cookie = parse_var("SESSION_SECURE_COOKIE", false)?;
        let ttl_days: u64 = parse_var("SESSION_TTL_DAYS", 7)?;

        Ok(Self {
            database_url,
            max_connections,
            secure_cookie,
            session_ttl: Duration::from_secs(60 * 60 * 24 * ttl_days),
        })
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T, String> {
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| format!("{name} has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_variables_fall_back_to_defaults() {
        assert_eq!(parse_var("FITNESS_TEST_UNSET_VAR", 5u32), Ok(5));
    }

    #[test]
    fn invalid_values_are_reported() {
        std::env::set_var("FITNESS_TEST_BAD_BOOL", "maybe");
        let err = parse_var("FITNESS_TEST_BAD_BOOL", false).unwrap_err();
        assert!(err.contains("FITNESS_TEST_BAD_BOOL"));
    }
}
