// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Operating and fan modes.
//!
//! Both enums map one-to-one onto their lowercase text form, which is used
//! for display, parsing, and JSON. Parsing is exact: anything outside the
//! mapping is a [`ParseError`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// What the thermostat is currently driving the HVAC system to do.
///
/// # Examples
///
/// ```
/// use thermostat_api::types::OperatingMode;
///
/// assert_eq!(OperatingMode::Cool.as_str(), "cool");
/// assert_eq!("heat".parse::<OperatingMode>().unwrap(), OperatingMode::Heat);
/// assert!("HEAT".parse::<OperatingMode>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum OperatingMode {
    /// Neither heating nor cooling.
    #[default]
    Off,
    /// Cooling towards the cool point.
    Cool,
    /// Heating towards the heat point.
    Heat,
}

impl OperatingMode {
    /// Returns the canonical text form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Cool => "cool",
            Self::Heat => "heat",
        }
    }
}

impl fmt::Display for OperatingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperatingMode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "off" => Ok(Self::Off),
            "cool" => Ok(Self::Cool),
            "heat" => Ok(Self::Heat),
            _ => Err(ParseError::OperatingMode(s.to_string())),
        }
    }
}

impl TryFrom<String> for OperatingMode {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<OperatingMode> for &'static str {
    fn from(mode: OperatingMode) -> Self {
        mode.as_str()
    }
}

/// Fan behaviour.
///
/// # Examples
///
/// ```
/// use thermostat_api::types::FanMode;
///
/// assert_eq!(FanMode::default(), FanMode::Auto);
/// assert_eq!("off".parse::<FanMode>().unwrap(), FanMode::Off);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum FanMode {
    /// Fan stays off.
    Off,
    /// Fan runs while heating or cooling.
    #[default]
    Auto,
}

impl FanMode {
    /// Returns the canonical text form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Auto => "auto",
        }
    }
}

impl fmt::Display for FanMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FanMode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "off" => Ok(Self::Off),
            "auto" => Ok(Self::Auto),
            _ => Err(ParseError::FanMode(s.to_string())),
        }
    }
}

impl TryFrom<String> for FanMode {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FanMode> for &'static str {
    fn from(mode: FanMode) -> Self {
        mode.as_str()
    }
}
