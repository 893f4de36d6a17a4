// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The fixed set of thermostats served by the process.

use std::sync::Arc;

use crate::error::Error;
use crate::thermostat::{
    IdAllocator, Snapshot, SyntheticSensor, TemperatureSensor, Thermostat, ThermostatUpdate,
};

/// Owns every thermostat, sorted by identifier.
///
/// The set is populated at construction and never changes afterwards, so
/// lookups need no locking of their own; each [`Thermostat`] guards its own
/// fields. Share a registry across tasks with an [`Arc`].
///
/// # Examples
///
/// ```
/// use thermostat_api::Registry;
///
/// let registry = Registry::with_thermostats(2).unwrap();
/// let ids: Vec<u32> = registry.list_all().iter().map(|s| s.id).collect();
/// assert_eq!(ids, [1, 2]);
///
/// assert!(registry.find_by_id(1).is_some());
/// assert!(registry.find_by_id(9999).is_none());
/// ```
#[derive(Debug)]
pub struct Registry {
    thermostats: Vec<Thermostat>,
    ids: IdAllocator,
}

impl Registry {
    /// Creates `count` default thermostats with synthetic sensors.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IdsExhausted`] if identifiers run out.
    pub fn with_thermostats(count: usize) -> Result<Self, Error> {
        Self::with_sensor(count, Arc::new(SyntheticSensor::default()))
    }

    /// Creates `count` default thermostats sharing one sensor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IdsExhausted`] if identifiers run out.
    pub fn with_sensor(count: usize, sensor: Arc<dyn TemperatureSensor>) -> Result<Self, Error> {
        let ids = IdAllocator::new();
        let thermostats = (0..count)
            .map(|_| Thermostat::with_sensor(&ids, Arc::clone(&sensor)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_parts(ids, thermostats))
    }

    /// Takes ownership of thermostats built from `ids`.
    ///
    /// The thermostats are sorted by identifier.
    #[must_use]
    pub fn from_parts(ids: IdAllocator, mut thermostats: Vec<Thermostat>) -> Self {
        thermostats.sort_by_key(Thermostat::id);
        tracing::debug!(count = thermostats.len(), "Registry populated");
        Self { thermostats, ids }
    }

    /// Returns a snapshot of every thermostat, in identifier order.
    #[must_use]
    pub fn list_all(&self) -> Vec<Snapshot> {
        self.thermostats.iter().map(Thermostat::snapshot).collect()
    }

    /// Looks up a thermostat by identifier.
    #[must_use]
    pub fn find_by_id(&self, id: u32) -> Option<&Thermostat> {
        self.thermostats
            .binary_search_by_key(&id, Thermostat::id)
            .ok()
            .map(|index| &self.thermostats[index])
    }

    /// Looks up a thermostat by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no thermostat has that identifier.
    pub fn get(&self, id: u32) -> Result<&Thermostat, Error> {
        self.find_by_id(id).ok_or(Error::NotFound { id })
    }

    /// Applies `update` to one thermostat and returns its new snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no thermostat has that identifier.
    pub fn apply_partial_update(
        &self,
        id: u32,
        update: &ThermostatUpdate,
    ) -> Result<Snapshot, Error> {
        let thermostat = self.get(id)?;
        thermostat.apply(update);
        Ok(thermostat.snapshot())
    }

    /// Returns an iterator over the thermostats, in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &Thermostat> {
        self.thermostats.iter()
    }

    /// Returns the number of thermostats.
    #[must_use]
    pub fn len(&self) -> usize {
        self.thermostats.len()
    }

    /// Returns `true` if the registry holds no thermostats.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.thermostats.is_empty()
    }

    /// Returns the allocator the thermostats were numbered from.
    #[must_use]
    pub fn id_allocator(&self) -> &IdAllocator {
        &self.ids
    }
}
