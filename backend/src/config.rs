use std::{net::SocketAddr, time::Duration};

use clap::Parser;

use crate::osrm::DEFAULT_BASE_URL;

/// Sun-exposure route planning service
#[derive(Parser, Debug, Clone)]
#[command(name = "sunroute-backend", version, about)]
pub struct ServerConfig {
    /// Address the HTTP server listens on
    #[arg(long, env = "SUNROUTE_BIND", default_value = "0.0.0.0:8080")]
    pub bind: SocketAddr,

    /// Base URL of the OSRM-compatible directions service
    #[arg(long, env = "OSRM_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub osrm_url: String,

    /// Per-request timeout for directions calls, in seconds
    #[arg(long, env = "OSRM_TIMEOUT_SECS", default_value_t = 15)]
    pub request_timeout_secs: u64,

    /// User-Agent sent to the directions service
    #[arg(long, env = "OSRM_USER_AGENT", default_value = concat!("sunroute/", env!("CARGO_PKG_VERSION")))]
    pub user_agent: String,
}

impl ServerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
