// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Current-temperature sources.

use std::fmt;

use rand::Rng;
use rand_distr::StandardNormal;

use crate::types::Temperature;

/// Something that can report the ambient temperature.
pub trait TemperatureSensor: Send + Sync + fmt::Debug {
    /// Takes one reading.
    fn read(&self) -> Temperature;
}

/// Synthetic readings drawn from a normal distribution in Fahrenheit.
///
/// # Examples
///
/// ```
/// use thermostat_api::thermostat::{SyntheticSensor, TemperatureSensor};
///
/// let sensor = SyntheticSensor::default();
/// assert_eq!(sensor.mean_fahrenheit(), 70.0);
/// let _reading = sensor.read();
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SyntheticSensor {
    mean: f64,
    deviation: f64,
}

impl SyntheticSensor {
    /// Mean of the default distribution, in °F.
    pub const DEFAULT_MEAN: f64 = 70.0;

    /// Standard deviation of the default distribution, in °F.
    pub const DEFAULT_DEVIATION: f64 = 10.0;

    /// Creates a sensor sampling `N(mean, deviation²)` in °F.
    #[must_use]
    pub const fn new(mean: f64, deviation: f64) -> Self {
        Self { mean, deviation }
    }

    /// Returns the distribution mean in °F.
    #[must_use]
    pub const fn mean_fahrenheit(&self) -> f64 {
        self.mean
    }

    /// Returns the distribution standard deviation in °F.
    #[must_use]
    pub const fn deviation_fahrenheit(&self) -> f64 {
        self.deviation
    }
}

impl Default for SyntheticSensor {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MEAN, Self::DEFAULT_DEVIATION)
    }
}

impl TemperatureSensor for SyntheticSensor {
    fn read(&self) -> Temperature {
        let z: f64 = rand::rng().sample(StandardNormal);
        Temperature::from_fahrenheit(z * self.deviation + self.mean)
    }
}

/// A sensor that always reports the same value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedSensor(pub Temperature);

impl TemperatureSensor for FixedSensor {
    fn read(&self) -> Temperature {
        self.0
    }
}
