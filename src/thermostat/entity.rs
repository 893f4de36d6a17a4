// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The thermostat entity.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Serialize, Serializer};

use crate::error::Error;
use crate::types::{FanMode, OperatingMode, Temperature};

use super::id::IdAllocator;
use super::sensor::{SyntheticSensor, TemperatureSensor};
use super::snapshot::Snapshot;
use super::update::ThermostatUpdate;

/// Default heat point, in °F.
const DEFAULT_HEAT_POINT_F: f64 = 65.0;

/// Default cool point, in °F.
const DEFAULT_COOL_POINT_F: f64 = 80.0;

/// Builds a setpoint that reads back as exactly `fahrenheit`.
///
/// Goes through the Celsius scale because `Temperature::from_fahrenheit`
/// offsets by 273 K instead of 273.15 K.
fn setpoint(fahrenheit: f64) -> Temperature {
    Temperature::from_celsius((fahrenheit - 32.0) / 1.8)
}

/// Mutable fields, all behind the one entity lock.
#[derive(Debug, Clone)]
struct State {
    name: String,
    operating_mode: OperatingMode,
    heat_point: Temperature,
    cool_point: Temperature,
    fan_mode: FanMode,
}

/// One simulated thermostat.
///
/// The identifier is fixed at construction. Every other field lives behind a
/// single reader/writer lock: reads share it, writes exclude every read of
/// every field on the same instance, and a [`snapshot`](Self::snapshot) sees
/// all fields as of one instant.
///
/// # Examples
///
/// ```
/// use thermostat_api::thermostat::{IdAllocator, Thermostat};
/// use thermostat_api::types::OperatingMode;
///
/// let ids = IdAllocator::new();
/// let thermostat = Thermostat::new(&ids).unwrap();
/// assert_eq!(thermostat.id(), 1);
/// assert_eq!(thermostat.name(), "thermostat-1");
///
/// thermostat.set_operating_mode(OperatingMode::Cool);
/// assert_eq!(thermostat.snapshot().operating_mode, OperatingMode::Cool);
/// ```
#[derive(Debug)]
pub struct Thermostat {
    id: u32,
    state: RwLock<State>,
    sensor: Arc<dyn TemperatureSensor>,
}

impl Thermostat {
    /// Creates a thermostat with default settings and a synthetic sensor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IdsExhausted`] if `ids` has no identifiers left.
    pub fn new(ids: &IdAllocator) -> Result<Self, Error> {
        Self::with_sensor(ids, Arc::new(SyntheticSensor::default()))
    }

    /// Creates a thermostat with default settings reading from `sensor`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IdsExhausted`] if `ids` has no identifiers left.
    pub fn with_sensor(
        ids: &IdAllocator,
        sensor: Arc<dyn TemperatureSensor>,
    ) -> Result<Self, Error> {
        let id = ids.allocate()?;
        Ok(Self {
            id,
            state: RwLock::new(State {
                name: format!("thermostat-{id}"),
                operating_mode: OperatingMode::default(),
                heat_point: setpoint(DEFAULT_HEAT_POINT_F),
                cool_point: setpoint(DEFAULT_COOL_POINT_F),
                fan_mode: FanMode::default(),
            }),
            sensor,
        })
    }

    /// Returns the unique identifier.
    #[must_use]
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Returns the human-readable name.
    #[must_use]
    pub fn name(&self) -> String {
        self.state.read().name.clone()
    }

    /// Sets the human-readable name.
    pub fn set_name(&self, name: impl Into<String>) {
        self.state.write().name = name.into();
    }

    /// Returns the operating mode.
    #[must_use]
    pub fn operating_mode(&self) -> OperatingMode {
        self.state.read().operating_mode
    }

    /// Sets the operating mode.
    pub fn set_operating_mode(&self, mode: OperatingMode) {
        self.state.write().operating_mode = mode;
    }

    /// Returns the fan mode.
    #[must_use]
    pub fn fan_mode(&self) -> FanMode {
        self.state.read().fan_mode
    }

    /// Sets the fan mode.
    pub fn set_fan_mode(&self, mode: FanMode) {
        self.state.write().fan_mode = mode;
    }

    /// Returns the temperature the thermostat heats to.
    #[must_use]
    pub fn heat_point(&self) -> Temperature {
        self.state.read().heat_point
    }

    /// Sets the temperature the thermostat heats to.
    pub fn set_heat_point(&self, point: Temperature) {
        self.state.write().heat_point = point;
    }

    /// Returns the temperature the thermostat cools to.
    #[must_use]
    pub fn cool_point(&self) -> Temperature {
        self.state.read().cool_point
    }

    /// Sets the temperature the thermostat cools to.
    pub fn set_cool_point(&self, point: Temperature) {
        self.state.write().cool_point = point;
    }

    /// Takes a fresh reading from the sensor.
    #[must_use]
    pub fn current_temp(&self) -> Temperature {
        self.sensor.read()
    }

    /// Captures every field, plus a sensor reading, under one read lock.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        let state = self.state.read();
        Snapshot {
            id: self.id,
            name: state.name.clone(),
            current_temp: self.current_temp(),
            operating_mode: state.operating_mode,
            heat_point: state.heat_point,
            cool_point: state.cool_point,
            fan_mode: state.fan_mode,
        }
    }

    /// Applies every present field of `update`.
    ///
    /// All fields are written under one write lock, so readers observe either
    /// none or all of them.
    pub fn apply(&self, update: &ThermostatUpdate) {
        if update.is_empty() {
            return;
        }

        let mut state = self.state.write();
        if let Some(name) = &update.name {
            state.name.clone_from(name);
        }
        if let Some(mode) = update.operating_mode {
            state.operating_mode = mode;
        }
        if let Some(point) = update.heat_point {
            state.heat_point = point;
        }
        if let Some(point) = update.cool_point {
            state.cool_point = point;
        }
        if let Some(mode) = update.fan_mode {
            state.fan_mode = mode;
        }
        drop(state);

        tracing::debug!(
            id = self.id,
            fields = ?update.fields(),
            "Applied thermostat update"
        );
    }
}

impl Serialize for Thermostat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.snapshot().serialize(serializer)
    }
}
