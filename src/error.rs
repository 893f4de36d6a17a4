// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the thermostat API.
//!
//! Every failure is scoped to the operation that triggered it: malformed
//! values, unknown update fields, lookups that miss, and transport faults at
//! the HTTP boundary. Nothing here is fatal to the process.

use std::time::Duration;

use thiserror::Error;

/// The main error type for this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// A temperature or mode string could not be parsed.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// A partial update named fields outside the mutable set.
    #[error(transparent)]
    UnknownFields(#[from] UnknownFieldError),

    /// No registered thermostat carries the requested identifier.
    #[error("no thermostat with ID={id}")]
    NotFound {
        /// The identifier that was looked up.
        id: u32,
    },

    /// The body was not valid JSON or held values of the wrong shape.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Every `u32` identifier has been handed out.
    #[error("thermostat identifiers exhausted")]
    IdsExhausted,

    /// Error occurred at the HTTP boundary.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),
}

/// Errors raised while parsing textual values.
///
/// Each variant carries the raw input exactly as received.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Text did not match `<number> [°] <F|C|K>`.
    #[error("could not parse temperature string of '{0}' (is the unit included?)")]
    Temperature(String),

    /// Text is not one of `off`, `cool`, `heat`.
    #[error("invalid operatingMode '{0}'")]
    OperatingMode(String),

    /// Text is not one of `off`, `auto`.
    #[error("invalid fanMode '{0}'")]
    FanMode(String),
}

/// A partial update named one or more fields that cannot be patched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unsupported fields '{}'", .fields.join("', '"))]
pub struct UnknownFieldError {
    fields: Vec<String>,
}

impl UnknownFieldError {
    /// Creates an error naming the rejected fields.
    #[must_use]
    pub fn new(fields: Vec<String>) -> Self {
        Self { fields }
    }

    /// Returns the rejected field names, as spelled in the input.
    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }
}

/// Errors related to HTTP transport.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Reading from or writing to the socket failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The request line or headers could not be understood.
    #[error("malformed request: {0}")]
    MalformedRequest(String),

    /// The request head exceeded the allowed size.
    #[error("request headers exceed {limit} bytes")]
    HeadersTooLarge {
        /// Maximum head size in bytes.
        limit: usize,
    },

    /// The declared body length exceeded the allowed size.
    #[error("request body exceeds {limit} bytes")]
    BodyTooLarge {
        /// Maximum body size in bytes.
        limit: usize,
    },

    /// The client did not finish sending its request in time.
    #[error("request not received within {}ms", .after.as_millis())]
    Timeout {
        /// How long the server waited.
        after: Duration,
    },
}

/// A specialized Result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
