// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types held by a thermostat.
//!
//! # Types
//!
//! - [`Temperature`] - Absolute temperature, stored in Kelvin
//! - [`TemperatureUnit`] - Fahrenheit, Celsius or Kelvin
//! - [`OperatingMode`] - Off/Cool/Heat
//! - [`FanMode`] - Off/Auto

mod mode;
mod temperature;

pub use mode::{FanMode, OperatingMode};
pub use temperature::{Temperature, TemperatureUnit};
