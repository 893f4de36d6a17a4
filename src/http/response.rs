// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! JSON response envelopes.
//!
//! Successful responses are `{"status": "ok", "data": ...}`; failures are
//! `{"status": "error", "errorMessage": "..."}`. Both are pretty-printed.

use serde::Serialize;
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Returned if even the error envelope cannot be encoded.
const FALLBACK_ERROR_BODY: &str = r#"{"status": "error", "errorMessage": "internal error"}"#;

/// HTTP status codes used by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// 200
    Ok,
    /// 400
    BadRequest,
    /// 404
    NotFound,
    /// 405
    MethodNotAllowed,
    /// 408
    RequestTimeout,
    /// 413
    PayloadTooLarge,
    /// 431
    HeadersTooLarge,
    /// 500
    InternalServerError,
}

impl Status {
    /// Returns the numeric status code.
    #[must_use]
    pub const fn code(&self) -> u16 {
        match self {
            Self::Ok => 200,
            Self::BadRequest => 400,
            Self::NotFound => 404,
            Self::MethodNotAllowed => 405,
            Self::RequestTimeout => 408,
            Self::PayloadTooLarge => 413,
            Self::HeadersTooLarge => 431,
            Self::InternalServerError => 500,
        }
    }

    /// Returns the reason phrase.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::BadRequest => "Bad Request",
            Self::NotFound => "Not Found",
            Self::MethodNotAllowed => "Method Not Allowed",
            Self::RequestTimeout => "Request Timeout",
            Self::PayloadTooLarge => "Payload Too Large",
            Self::HeadersTooLarge => "Request Header Fields Too Large",
            Self::InternalServerError => "Internal Server Error",
        }
    }
}

#[derive(Serialize)]
struct OkEnvelope<'a, T: Serialize> {
    status: &'static str,
    data: &'a T,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorEnvelope<'a> {
    status: &'static str,
    error_message: &'a str,
}

/// A response ready to be written to the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status: Status,
    body: String,
}

impl Response {
    /// Wraps `data` in an `ok` envelope.
    ///
    /// Falls back to a 500 error envelope if `data` fails to serialize.
    pub fn ok<T: Serialize>(data: &T) -> Self {
        let envelope = OkEnvelope { status: "ok", data };
        match serde_json::to_string_pretty(&envelope) {
            Ok(body) => Self {
                status: Status::Ok,
                body,
            },
            Err(e) => Self::error(
                Status::InternalServerError,
                format!("Could not encode JSON: {e}"),
            ),
        }
    }

    /// Builds an `error` envelope carrying `message`.
    pub fn error(status: Status, message: impl AsRef<str>) -> Self {
        let envelope = ErrorEnvelope {
            status: "error",
            error_message: message.as_ref(),
        };
        let body = serde_json::to_string_pretty(&envelope)
            .unwrap_or_else(|_| FALLBACK_ERROR_BODY.to_string());
        Self { status, body }
    }

    /// Returns the status.
    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    /// Returns the JSON body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Serializes status line, headers, and body.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let head = format!(
            "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\n\
             Content-Length: {}\r\nConnection: close\r\n\r\n",
            self.status.code(),
            self.status.reason(),
            self.body.len(),
        );
        let mut bytes = Vec::with_capacity(head.len() + self.body.len());
        bytes.extend_from_slice(head.as_bytes());
        bytes.extend_from_slice(self.body.as_bytes());
        bytes
    }

    /// Writes the response and flushes `writer`.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from the writer.
    pub async fn write_to<W: AsyncWrite + Unpin>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&self.to_bytes()).await?;
        writer.flush().await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;

    #[test]
    fn ok_envelope() {
        let response = Response::ok(&vec![1, 2]);
        assert_eq!(response.status(), Status::Ok);
        let body: Value = serde_json::from_str(response.body()).unwrap();
        assert_eq!(body, json!({"status": "ok", "data": [1, 2]}));
    }

    #[test]
    fn error_envelope() {
        let response = Response::error(Status::NotFound, "No thermostat with ID=3");
        assert_eq!(response.status().code(), 404);
        let body: Value = serde_json::from_str(response.body()).unwrap();
        assert_eq!(
            body,
            json!({"status": "error", "errorMessage": "No thermostat with ID=3"})
        );
    }

    #[test]
    fn body_is_pretty_printed() {
        let response = Response::ok(&json!({"id": 1}));
        assert!(response.body().contains("\n  \"data\""));
    }

    #[test]
    fn wire_format() {
        let response = Response::error(Status::BadRequest, "bad");
        let wire = String::from_utf8(response.to_bytes()).unwrap();
        let (head, body) = wire.split_once("\r\n\r\n").unwrap();

        assert!(head.starts_with("HTTP/1.1 400 Bad Request\r\n"));
        assert!(head.contains("Content-Type: application/json"));
        assert!(head.contains(&format!("Content-Length: {}", body.len())));
        assert!(head.contains("Connection: close"));
        assert_eq!(body, response.body());
    }
}
