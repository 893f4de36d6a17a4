// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Thermostat API - simulated thermostats behind a JSON HTTP interface.
//!
//! The crate models a fixed set of thermostats. Each one has an identifier,
//! a name, an operating mode, a fan mode, heat and cool setpoints, and a
//! synthetic current-temperature reading. Clients list thermostats, fetch one
//! by id, and patch its mutable fields.
//!
//! # Modules
//!
//! - [`types`]: [`Temperature`] with Celsius/Fahrenheit/Kelvin conversion,
//!   plus [`OperatingMode`] and [`FanMode`]
//! - [`thermostat`]: the lock-guarded [`Thermostat`] entity, its
//!   [`Snapshot`], and strict [`ThermostatUpdate`] decoding
//! - [`Registry`]: the id-sorted set of thermostats
//! - `http` (feature `http`): routing and a tokio TCP server
//!
//! # Quick Start
//!
//! ```
//! use thermostat_api::{Registry, ThermostatUpdate};
//!
//! let registry = Registry::with_thermostats(2)?;
//!
//! let update = ThermostatUpdate::from_json_strict(br#"{"operatingMode": "cool"}"#)?;
//! let snapshot = registry.apply_partial_update(1, &update)?;
//!
//! assert_eq!(snapshot.operating_mode.as_str(), "cool");
//! assert_eq!(snapshot.heat_point.to_string(), "65.0°F");
//! # Ok::<(), thermostat_api::Error>(())
//! ```
//!
//! ## Serving over HTTP
//!
//! ```no_run
//! use std::sync::Arc;
//! use thermostat_api::{Registry, ServerConfig};
//! use thermostat_api::http::HttpServer;
//!
//! #[tokio::main]
//! async fn main() -> thermostat_api::Result<()> {
//!     let config = ServerConfig::default();
//!     let registry = Arc::new(Registry::with_thermostats(config.thermostats)?);
//!     HttpServer::bind(&config, registry).await?.serve().await
//! }
//! ```

mod config;
pub mod error;
#[cfg(feature = "http")]
pub mod http;
mod registry;
pub mod thermostat;
pub mod types;

pub use config::ServerConfig;
pub use error::{Error, ParseError, ProtocolError, Result, UnknownFieldError};
pub use registry::Registry;
pub use thermostat::{Snapshot, Thermostat, ThermostatUpdate};
pub use types::{FanMode, OperatingMode, Temperature, TemperatureUnit};
