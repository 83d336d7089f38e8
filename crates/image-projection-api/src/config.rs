//! Server configuration from environment variables.
//!
//! | Variable         | Default     |
//! |------------------|-------------|
//! | `HOST`           | `0.0.0.0`   |
//! | `SERVER_PORT`    | `8080`      |
//! | `MAX_BODY_BYTES` | `67108864`  |
//!
//! A `.env` file in the working directory is honored. Unparseable values
//! fall back to the default with a warning.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

use image_projection_core::CanvasSize;
use tracing::{debug, warn};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Upper bound on request body size in bytes.
    pub max_body_bytes: usize,
    /// Output canvas for `/processImage`. Not read from the environment.
    pub canvas: CanvasSize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            canvas: CanvasSize::default(),
        }
    }
}

impl ServerConfig {
    /// Load from the process environment (after `.env`, if present).
    pub fn from_env() -> Self {
        load_dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            host: parse_or("HOST", lookup("HOST"), defaults.host),
            port: parse_or("SERVER_PORT", lookup("SERVER_PORT"), defaults.port),
            max_body_bytes: parse_or(
                "MAX_BODY_BYTES",
                lookup("MAX_BODY_BYTES"),
                defaults.max_body_bytes,
            ),
            canvas: defaults.canvas,
        }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => debug!(path = %path.display(), "loaded .env"),
        Err(e) if e.not_found() => {}
        Err(e) => warn!("Failed to read .env: {e}"),
    }
}

fn parse_or<T: FromStr>(key: &str, raw: Option<String>, default: T) -> T {
    let Some(raw) = raw else {
        return default;
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return default;
    }
    match trimmed.parse() {
        Ok(value) => value,
        Err(_) => {
            warn!("Ignoring invalid {key}={raw:?}, using default");
            default
        }
    }
}
