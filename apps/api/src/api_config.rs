use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use docwatch_core::AppError;
use docwatch_infrastructure::ObjectSinkConfig;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub api_host: String,
    pub api_port: u16,
    pub push_verification_token: Option<String>,
    pub object_sink: ObjectSinkConfig,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_host = lookup("API_HOST").unwrap_or_else(|| "127.0.0.1".to_owned());
        let api_port = match lookup("API_PORT") {
            Some(value) => value.parse::<u16>().map_err(|error| {
                AppError::Validation(format!("invalid API_PORT value '{value}': {error}"))
            })?,
            None => 8080,
        };

        let push_verification_token = lookup("PUSH_VERIFICATION_TOKEN")
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty());

        Ok(Self {
            api_host,
            api_port,
            push_verification_token,
            object_sink: ObjectSinkConfig::from_lookup(&lookup)?,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Internal(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}
