// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Routing and request handlers.

use std::sync::Arc;

use crate::Registry;
use crate::error::Error;
use crate::thermostat::ThermostatUpdate;

use super::request::{Method, Request};
use super::response::{Response, Status};

/// Collection path; single thermostats live at `/thermostat/:id`.
const COLLECTION: &str = "/thermostat";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route<'a> {
    List,
    Item(&'a str),
}

impl<'a> Route<'a> {
    fn resolve(path: &'a str) -> Option<Self> {
        if path == COLLECTION {
            return Some(Self::List);
        }
        let raw_id = path.strip_prefix(COLLECTION)?.strip_prefix('/')?;
        (!raw_id.is_empty() && !raw_id.contains('/')).then_some(Self::Item(raw_id))
    }
}

/// Request handlers over a shared [`Registry`].
///
/// - `GET /thermostat` lists every thermostat.
/// - `GET /thermostat/:id` returns one thermostat.
/// - `PATCH /thermostat/:id` applies a strict partial update.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use thermostat_api::Registry;
/// use thermostat_api::http::{Method, Request, Status, ThermostatApi};
///
/// let api = ThermostatApi::new(Arc::new(Registry::with_thermostats(1).unwrap()));
/// let response = api.handle(&Request::new(Method::Get, "/thermostat/1", Vec::new()));
/// assert_eq!(response.status(), Status::Ok);
/// ```
#[derive(Debug, Clone)]
pub struct ThermostatApi {
    registry: Arc<Registry>,
}

impl ThermostatApi {
    /// Creates handlers serving `registry`.
    #[must_use]
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    /// Returns the registry being served.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Routes `request` and produces its response.
    #[must_use]
    pub fn handle(&self, request: &Request) -> Response {
        let path = request.path();
        match (Route::resolve(path), &request.method) {
            (Some(Route::List), Method::Get) => Response::ok(&self.registry.list_all()),
            (Some(Route::Item(raw_id)), Method::Get) => self.get(raw_id),
            (Some(Route::Item(raw_id)), Method::Patch) => self.patch(raw_id, &request.body),
            (Some(_), method) => Response::error(
                Status::MethodNotAllowed,
                format!("method {method} not allowed on {path}"),
            ),
            (None, method) => {
                Response::error(Status::NotFound, format!("no route for {method} {path}"))
            }
        }
    }

    fn get(&self, raw_id: &str) -> Response {
        let id = match parse_id(raw_id) {
            Ok(id) => id,
            Err(response) => return response,
        };
        match self.registry.get(id) {
            Ok(thermostat) => Response::ok(thermostat),
            Err(e) => error_response(&e),
        }
    }

    fn patch(&self, raw_id: &str, body: &[u8]) -> Response {
        let id = match parse_id(raw_id) {
            Ok(id) => id,
            Err(response) => return response,
        };
        if let Err(e) = self.registry.get(id) {
            return error_response(&e);
        }

        let update = match ThermostatUpdate::from_json_strict(body) {
            Ok(update) => update,
            Err(e) => {
                tracing::debug!(id, error = %e, "Rejected thermostat update");
                return Response::error(
                    Status::BadRequest,
                    format!("Could not unmarshal body: {e}"),
                );
            }
        };

        match self.registry.apply_partial_update(id, &update) {
            Ok(snapshot) => Response::ok(&snapshot),
            Err(e) => error_response(&e),
        }
    }
}

fn parse_id(raw_id: &str) -> Result<u32, Response> {
    let invalid = || {
        Response::error(
            Status::BadRequest,
            format!("ID field must be integer, got ID='{raw_id}'"),
        )
    };
    if !raw_id.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    raw_id.parse().map_err(|_| invalid())
}

fn error_response(error: &Error) -> Response {
    match error {
        Error::NotFound { id } => {
            Response::error(Status::NotFound, format!("No thermostat with ID={id}"))
        }
        Error::Parse(_) | Error::UnknownFields(_) | Error::Json(_) => {
            Response::error(Status::BadRequest, error.to_string())
        }
        Error::IdsExhausted | Error::Protocol(_) => {
            Response::error(Status::InternalServerError, format!("unexpected error: {error}"))
        }
    }
}
