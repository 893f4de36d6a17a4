// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Server configuration.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

/// Configuration for a thermostat API server.
///
/// # Examples
///
/// ```
/// use thermostat_api::ServerConfig;
///
/// let config = ServerConfig::default()
///     .with_address("127.0.0.1:8080".parse().unwrap())
///     .with_thermostats(4);
///
/// assert_eq!(config.address.port(), 8080);
/// assert_eq!(config.thermostats, 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to listen on.
    pub address: SocketAddr,
    /// Number of thermostats created at startup.
    pub thermostats: usize,
    /// Largest request body accepted, in bytes.
    pub max_body_bytes: usize,
    /// How long a client may take to send its whole request.
    pub read_timeout: Duration,
}

impl ServerConfig {
    /// Default listen address, all interfaces on port 80.
    pub const DEFAULT_ADDRESS: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 80);

    /// Default number of thermostats.
    pub const DEFAULT_THERMOSTATS: usize = 2;

    /// Default request body limit (64 KiB).
    pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;

    /// Default request read timeout (10 s).
    pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(10);

    /// Sets the listen address.
    #[must_use]
    pub fn with_address(mut self, address: SocketAddr) -> Self {
        self.address = address;
        self
    }

    /// Sets how many thermostats are created at startup.
    #[must_use]
    pub fn with_thermostats(mut self, count: usize) -> Self {
        self.thermostats = count;
        self
    }

    /// Sets the request body limit.
    #[must_use]
    pub fn with_max_body_bytes(mut self, limit: usize) -> Self {
        self.max_body_bytes = limit;
        self
    }

    /// Sets how long a client may take to send its request.
    #[must_use]
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: Self::DEFAULT_ADDRESS,
            thermostats: Self::DEFAULT_THERMOSTATS,
            max_body_bytes: Self::DEFAULT_MAX_BODY_BYTES,
            read_timeout: Self::DEFAULT_READ_TIMEOUT,
        }
    }
}
