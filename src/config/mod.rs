// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Server configuration from command-line flags and environment variables

use clap::Parser;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Bubble-sheet exam scanning service
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "exam-scanner")]
#[command(version)]
#[command(about = "HTTP service that reads marked answers from bubble-sheet photos", long_about = None)]
pub struct ServerConfig {
    /// Interface to bind the HTTP API to
    #[arg(long, env = "API_HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Port for the HTTP API
    #[arg(long, env = "API_PORT", default_value_t = 8080)]
    pub port: u16,
}

impl ServerConfig {
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8080,
        }
    }
}
