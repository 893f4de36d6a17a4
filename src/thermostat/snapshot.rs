// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Serialization-ready thermostat state.

use serde::Serialize;

use crate::types::{FanMode, OperatingMode, Temperature};

/// Every field of a thermostat as of one instant.
///
/// Serializes with the wire field names `id`, `name`, `currentTemp`,
/// `operatingMode`, `heatPoint`, `coolPoint` and `fanMode`; temperatures
/// render as `"<v>°F"` and modes as their lowercase text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Unique identifier.
    pub id: u32,
    /// Human-readable name.
    pub name: String,
    /// Reading taken while the snapshot was produced.
    pub current_temp: Temperature,
    /// Operating mode.
    pub operating_mode: OperatingMode,
    /// Temperature to heat to.
    pub heat_point: Temperature,
    /// Temperature to cool to.
    pub cool_point: Temperature,
    /// Fan mode.
    pub fan_mode: FanMode,
}
