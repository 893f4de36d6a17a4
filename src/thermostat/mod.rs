// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Simulated thermostats.
//!
//! A [`Thermostat`] holds its identity plus a set of mutable settings behind
//! one reader/writer lock. Settings are read individually through getters or
//! all at once as a [`Snapshot`], and changed through setters or a
//! [`ThermostatUpdate`].
//!
//! # Examples
//!
//! ```
//! use thermostat_api::thermostat::{IdAllocator, Thermostat, ThermostatUpdate};
//! use thermostat_api::types::FanMode;
//!
//! let ids = IdAllocator::new();
//! let thermostat = Thermostat::new(&ids).unwrap();
//!
//! let update = ThermostatUpdate::from_json_strict(br#"{"fanMode": "off"}"#).unwrap();
//! thermostat.apply(&update);
//!
//! assert_eq!(thermostat.fan_mode(), FanMode::Off);
//! ```

mod entity;
mod id;
mod sensor;
mod snapshot;
mod update;

pub use entity::Thermostat;
pub use id::IdAllocator;
pub use sensor::{FixedSensor, SyntheticSensor, TemperatureSensor};
pub use snapshot::Snapshot;
pub use update::{ThermostatUpdate, UpdateField};
