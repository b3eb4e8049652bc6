use std::env;

const DEFAULT_BODY_LIMIT: usize = 8 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Largest accepted request body in bytes. Logos arrive inline as data URLs.
    pub body_limit: usize,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(5000);
        let body_limit = match env::var("APP_BODY_LIMIT") {
            Ok(raw) => raw.parse::<usize>()?,
            Err(_) => DEFAULT_BODY_LIMIT,
        };
        Ok(Self {
            host,
            port,
            body_limit,
        })
    }
}
