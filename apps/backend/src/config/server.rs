//! Listener configuration.

use std::env;

use crate::error::AppError;

pub const HOST_ENV: &str = "BACKEND_HOST";
pub const PORT_ENV: &str = "PORT";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3001;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// Build from optional raw values, applying defaults for absent or blank
    /// entries. A port that is not a valid `u16` is a configuration error.
    pub fn from_values(host: Option<String>, port: Option<String>) -> Result<Self, AppError> {
        let host = host
            .map(|h| h.trim().to_string())
            .filter(|h| !h.is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match port.as_deref().map(str::trim) {
            None | Some("") => DEFAULT_PORT,
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| AppError::config(format!("{PORT_ENV} must be a valid port number")))?,
        };

        Ok(Self { host, port })
    }

    pub fn from_env() -> Result<Self, AppError> {
        Self::from_values(env::var(HOST_ENV).ok(), env::var(PORT_ENV).ok())
    }
}
