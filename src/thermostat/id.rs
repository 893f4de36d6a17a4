// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sequential thermostat identifiers.

use std::sync::atomic::{AtomicU32, Ordering};

use crate::error::Error;

/// Hands out thermostat identifiers: 1, 2, 3, ...
///
/// Each call to [`allocate`](Self::allocate) advances the counter exactly
/// once, atomically, so concurrent construction never yields duplicates.
/// Identifiers are never reused.
///
/// # Examples
///
/// ```
/// use thermostat_api::thermostat::IdAllocator;
///
/// let ids = IdAllocator::new();
/// assert_eq!(ids.allocate().unwrap(), 1);
/// assert_eq!(ids.allocate().unwrap(), 2);
/// assert_eq!(ids.peek(), 3);
/// ```
#[derive(Debug)]
pub struct IdAllocator {
    next: AtomicU32,
}

impl IdAllocator {
    /// The first identifier handed out.
    pub const FIRST: u32 = 1;

    /// Creates an allocator starting at [`FIRST`](Self::FIRST).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            next: AtomicU32::new(Self::FIRST),
        }
    }

    /// Takes the next identifier.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IdsExhausted`] when the counter would advance past
    /// `u32::MAX`.
    pub fn allocate(&self) -> Result<u32, Error> {
        self.next
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |id| id.checked_add(1))
            .map_err(|_| Error::IdsExhausted)
    }

    /// Returns the identifier the next allocation would produce.
    #[must_use]
    pub fn peek(&self) -> u32 {
        self.next.load(Ordering::Relaxed)
    }

    /// Restarts the sequence at [`FIRST`](Self::FIRST).
    ///
    /// Only safe when no thermostat built from this allocator is still in
    /// use, otherwise identifiers will collide.
    pub fn reset(&self) {
        self.next.store(Self::FIRST, Ordering::Relaxed);
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}
