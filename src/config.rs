use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    pub ttl_minutes: i64,
    pub secure_cookie: bool,
    pub sweep_minutes: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub max_connections: u32,
    pub session: SessionConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL is not set")?;
        let session = SessionConfig {
            ttl_minutes: std::env::var("SESSION_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(30),
            secure_cookie: std::env::var("SESSION_SECURE_COOKIE")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
            sweep_minutes: std::env::var("SESSION_SWEEP_MINUTES")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .filter(|m| *m > 0)
                .unwrap_or(10),
        };
        Ok(Self {
            database_url,
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: std::env::var("APP_PORT")
                .ok()
                .and_then(|v| v.parse::<u16>().ok())
                .unwrap_or(8080),
            max_connections: std::env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse::<u32>().ok())
                .unwrap_or(10),
            session,
        })
    }

    pub fn sweep_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.session.sweep_minutes * 60)
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::state::AppState;

    #[test]
    fn sweep_interval_is_in_minutes() {
        let config = AppState::test_config();
        assert_eq!(config.sweep_interval(), Duration::from_secs(600));
        assert_eq!(config.listen_addr(), "127.0.0.1:0");
    }
}
