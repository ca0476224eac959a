use std::{
    net::{Ipv4Addr, SocketAddr, SocketAddrV4},
    time::Duration,
};

use utility::env::{self, EnvError};

pub const DEFAULT_BIND_ADDRESS: SocketAddr =
    SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, 8080));
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_address: SocketAddr,
    /// Upper bound for a whole request, including the store fetch.
    pub request_timeout: Duration,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, EnvError> {
        let bind_address = env::parse_var_or("WEB_BIND_ADDRESS", DEFAULT_BIND_ADDRESS)?;
        let request_timeout = env::parse_var_or(
            "WEB_REQUEST_TIMEOUT_SECS",
            DEFAULT_REQUEST_TIMEOUT_SECS,
        )?;
        Ok(Self {
            bind_address,
            request_timeout: Duration::from_secs(request_timeout),
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}
