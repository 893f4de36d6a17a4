// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Partial updates and strict decoding.
//!
//! A [`ThermostatUpdate`] carries an optional new value for each mutable
//! field. [`ThermostatUpdate::from_json_strict`] decodes one from a request
//! body and rejects any key that does not name a mutable field, so a typo
//! such as `"nmae"` is reported instead of silently ignored.

use std::fmt;

use serde::de::{IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::error::{Error, UnknownFieldError};
use crate::types::{FanMode, OperatingMode, Temperature};

/// The fields a partial update may touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpdateField {
    /// `name`
    Name,
    /// `operatingMode`
    OperatingMode,
    /// `heatPoint`
    HeatPoint,
    /// `coolPoint`
    CoolPoint,
    /// `fanMode`
    FanMode,
}

impl UpdateField {
    /// Every mutable field, in wire order.
    pub const ALL: [Self; 5] = [
        Self::Name,
        Self::OperatingMode,
        Self::HeatPoint,
        Self::CoolPoint,
        Self::FanMode,
    ];

    /// Returns the wire name of the field.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::OperatingMode => "operatingMode",
            Self::HeatPoint => "heatPoint",
            Self::CoolPoint => "coolPoint",
            Self::FanMode => "fanMode",
        }
    }

    /// Matches a key against the wire names, ignoring ASCII case.
    #[must_use]
    pub fn lookup(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(key))
    }
}

impl fmt::Display for UpdateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// New values for some subset of a thermostat's mutable fields.
///
/// `None` means "leave unchanged".
///
/// # Examples
///
/// ```
/// use thermostat_api::thermostat::ThermostatUpdate;
/// use thermostat_api::types::OperatingMode;
///
/// let update = ThermostatUpdate::from_json_strict(br#"{"operatingMode": "cool"}"#).unwrap();
/// assert_eq!(update.operating_mode, Some(OperatingMode::Cool));
/// assert!(update.name.is_none());
///
/// assert!(ThermostatUpdate::from_json_strict(br#"{"nmae": "x"}"#).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThermostatUpdate {
    /// New human-readable name.
    pub name: Option<String>,
    /// New operating mode.
    pub operating_mode: Option<OperatingMode>,
    /// New heat point.
    pub heat_point: Option<Temperature>,
    /// New cool point.
    pub cool_point: Option<Temperature>,
    /// New fan mode.
    pub fan_mode: Option<FanMode>,
}

impl ThermostatUpdate {
    /// Creates an update that changes nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the new name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the new operating mode.
    #[must_use]
    pub fn with_operating_mode(mut self, mode: OperatingMode) -> Self {
        self.operating_mode = Some(mode);
        self
    }

    /// Sets the new heat point.
    #[must_use]
    pub fn with_heat_point(mut self, point: Temperature) -> Self {
        self.heat_point = Some(point);
        self
    }

    /// Sets the new cool point.
    #[must_use]
    pub fn with_cool_point(mut self, point: Temperature) -> Self {
        self.cool_point = Some(point);
        self
    }

    /// Sets the new fan mode.
    #[must_use]
    pub fn with_fan_mode(mut self, mode: FanMode) -> Self {
        self.fan_mode = Some(mode);
        self
    }

    /// Returns `true` if no field is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields().is_empty()
    }

    /// Returns the fields that are present.
    #[must_use]
    pub fn fields(&self) -> Vec<UpdateField> {
        let present = [
            (UpdateField::Name, self.name.is_some()),
            (UpdateField::OperatingMode, self.operating_mode.is_some()),
            (UpdateField::HeatPoint, self.heat_point.is_some()),
            (UpdateField::CoolPoint, self.cool_point.is_some()),
            (UpdateField::FanMode, self.fan_mode.is_some()),
        ];
        present
            .into_iter()
            .filter_map(|(field, is_set)| is_set.then_some(field))
            .collect()
    }

    /// Decodes a JSON object, rejecting keys that are not mutable fields.
    ///
    /// The body is decoded twice: once as a generic object to learn which
    /// keys it holds, and once into the typed update. Any key that matches
    /// none of [`UpdateField::ALL`] (ignoring ASCII case) fails the decode.
    ///
    /// # Errors
    ///
    /// - [`Error::Json`] if the body is not a JSON object or a value has the
    ///   wrong shape (including unparseable temperatures and modes).
    /// - [`Error::UnknownFields`] naming every unrecognized key.
    pub fn from_json_strict(body: &[u8]) -> Result<Self, Error> {
        let present: Map<String, Value> = serde_json::from_slice(body)?;
        let update: Self = serde_json::from_slice(body)?;

        let unknown: Vec<String> = present
            .keys()
            .filter(|key| UpdateField::lookup(key).is_none())
            .cloned()
            .collect();
        if !unknown.is_empty() {
            return Err(UnknownFieldError::new(unknown).into());
        }

        Ok(update)
    }
}

impl<'de> Deserialize<'de> for ThermostatUpdate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(UpdateVisitor)
    }
}

/// Lenient on keys: unknown ones are skipped here and rejected by
/// [`ThermostatUpdate::from_json_strict`].
struct UpdateVisitor;

impl<'de> Visitor<'de> for UpdateVisitor {
    type Value = ThermostatUpdate;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a thermostat update object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut update = ThermostatUpdate::default();

        while let Some(key) = map.next_key::<String>()? {
            match UpdateField::lookup(&key) {
                Some(UpdateField::Name) => update.name = map.next_value()?,
                Some(UpdateField::OperatingMode) => update.operating_mode = map.next_value()?,
                Some(UpdateField::HeatPoint) => update.heat_point = map.next_value()?,
                Some(UpdateField::CoolPoint) => update.cool_point = map.next_value()?,
                Some(UpdateField::FanMode) => update.fan_mode = map.next_value()?,
                None => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }

        Ok(update)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_only_payload() {
        let update = ThermostatUpdate::from_json_strict(br#"{"name": "x"}"#).unwrap();
        assert_eq!(update, ThermostatUpdate::new().with_name("x"));
        assert_eq!(update.fields(), [UpdateField::Name]);
    }

    #[test]
    fn unknown_field_is_named() {
        let err = ThermostatUpdate::from_json_strict(br#"{"nmae": "x"}"#).unwrap_err();
        match err {
            Error::UnknownFields(e) => assert_eq!(e.fields(), ["nmae"]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn every_unknown_field_is_reported() {
        let body = br#"{"name": "x", "zeta": 1, "alpha": true}"#;
        let err = ThermostatUpdate::from_json_strict(body).unwrap_err();
        assert_eq!(err.to_string(), "unsupported fields 'alpha', 'zeta'");
    }

    #[test]
    fn keys_match_case_insensitively() {
        let body = br#"{"NAME": "attic", "operatingmode": "heat", "HeatPoint": "20C"}"#;
        let update = ThermostatUpdate::from_json_strict(body).unwrap();
        assert_eq!(update.name.as_deref(), Some("attic"));
        assert_eq!(update.operating_mode, Some(OperatingMode::Heat));
        assert_eq!(update.heat_point, Some(Temperature::from_celsius(20.0)));
    }

    #[test]
    fn all_fields_decode() {
        let body = r#"{
            "name": "den",
            "operatingMode": "cool",
            "heatPoint": "290 K",
            "coolPoint": "25°C",
            "fanMode": "off"
        }"#;
        let update = ThermostatUpdate::from_json_strict(body.as_bytes()).unwrap();
        assert_eq!(
            update,
            ThermostatUpdate::new()
                .with_name("den")
                .with_operating_mode(OperatingMode::Cool)
                .with_heat_point(Temperature::from_kelvin(290.0))
                .with_cool_point(Temperature::from_celsius(25.0))
                .with_fan_mode(FanMode::Off)
        );
        assert_eq!(update.fields(), UpdateField::ALL);
    }

    #[test]
    fn null_means_absent() {
        let update = ThermostatUpdate::from_json_strict(br#"{"name": null}"#).unwrap();
        assert!(update.is_empty());
    }

    #[test]
    fn empty_object_is_a_no_op() {
        assert!(ThermostatUpdate::from_json_strict(b"{}").unwrap().is_empty());
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = ThermostatUpdate::from_json_strict(br#"{"heatPoint": "72"}"#).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
        assert!(err.to_string().contains("is the unit included?"));

        let err = ThermostatUpdate::from_json_strict(br#"{"fanMode": "high"}"#).unwrap_err();
        assert!(err.to_string().contains("invalid fanMode 'high'"));

        let err = ThermostatUpdate::from_json_strict(br#"{"name": 5}"#).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn non_object_bodies_are_rejected() {
        for body in [&b""[..], b"[]", b"\"name\"", b"null", b"{"] {
            let err = ThermostatUpdate::from_json_strict(body).unwrap_err();
            assert!(matches!(err, Error::Json(_)), "body {body:?}");
        }
    }

    #[test]
    fn last_duplicate_key_wins() {
        let update =
            ThermostatUpdate::from_json_strict(br#"{"name": "a", "name": "b"}"#).unwrap();
        assert_eq!(update.name.as_deref(), Some("b"));
    }

    #[test]
    fn lookup_covers_every_field() {
        for field in UpdateField::ALL {
            assert_eq!(UpdateField::lookup(field.as_str()), Some(field));
            assert_eq!(UpdateField::lookup(&field.as_str().to_uppercase()), Some(field));
        }
        assert_eq!(UpdateField::lookup("id"), None);
        assert_eq!(UpdateField::lookup("currentTemp"), None);
    }
}
