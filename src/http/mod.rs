// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! JSON-over-HTTP boundary.
//!
//! [`ThermostatApi`] maps requests onto [`Registry`](crate::Registry)
//! operations and is usable without a socket; [`HttpServer`] puts it behind
//! a tokio TCP listener.
//!
//! # Routes
//!
//! | Method  | Path              | Result                          |
//! |---------|-------------------|---------------------------------|
//! | `GET`   | `/thermostat`     | every thermostat, by id         |
//! | `GET`   | `/thermostat/:id` | one thermostat                  |
//! | `PATCH` | `/thermostat/:id` | strict partial update, new state |

mod api;
mod request;
mod response;
mod server;

pub use api::ThermostatApi;
pub use request::{MAX_HEAD_BYTES, Method, Request};
pub use response::{Response, Status};
pub use server::HttpServer;
