// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP/1.1 request parsing.

use std::fmt;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};

use crate::error::ProtocolError;

/// Largest request head (request line plus headers) accepted, in bytes.
pub const MAX_HEAD_BYTES: usize = 8 * 1024;

/// HTTP request method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    /// `GET`
    Get,
    /// `PATCH`
    Patch,
    /// Any other method, as sent.
    Other(String),
}

impl Method {
    /// Returns the method token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Get => "GET",
            Self::Patch => "PATCH",
            Self::Other(token) => token,
        }
    }
}

impl From<&str> for Method {
    fn from(token: &str) -> Self {
        match token {
            "GET" => Self::Get,
            "PATCH" => Self::Patch,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully read HTTP request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Request method.
    pub method: Method,
    /// Request target, including any query string.
    pub target: String,
    /// Request body.
    pub body: Vec<u8>,
}

impl Request {
    /// Creates a request without going through the wire format.
    #[must_use]
    pub fn new(method: Method, target: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            method,
            target: target.into(),
            body: body.into(),
        }
    }

    /// Returns the target without its query string.
    #[must_use]
    pub fn path(&self) -> &str {
        self.target
            .split_once('?')
            .map_or(self.target.as_str(), |(path, _)| path)
    }

    /// Reads one request from `reader`.
    ///
    /// Returns `Ok(None)` if the peer closed the connection before sending
    /// anything.
    ///
    /// # Errors
    ///
    /// - [`ProtocolError::HeadersTooLarge`] if the head exceeds
    ///   [`MAX_HEAD_BYTES`].
    /// - [`ProtocolError::BodyTooLarge`] if `Content-Length` exceeds
    ///   `max_body_bytes`.
    /// - [`ProtocolError::MalformedRequest`] for anything unparseable.
    /// - [`ProtocolError::Io`] if reading fails.
    pub async fn read_from<R>(
        reader: &mut R,
        max_body_bytes: usize,
    ) -> Result<Option<Self>, ProtocolError>
    where
        R: AsyncBufRead + Unpin,
    {
        let Some(head) = read_head(reader).await? else {
            return Ok(None);
        };

        let mut lines = head.iter().map(String::as_str);
        let request_line = lines
            .next()
            .ok_or_else(|| ProtocolError::MalformedRequest("empty request line".to_string()))?;
        let (method, target) = parse_request_line(request_line)?;

        let mut content_length: Option<usize> = None;
        for line in lines {
            let (name, value) = line.split_once(':').ok_or_else(|| {
                ProtocolError::MalformedRequest(format!("invalid header line '{line}'"))
            })?;
            let value = value.trim();

            if name.eq_ignore_ascii_case("content-length") {
                let length = value.parse().map_err(|_| {
                    ProtocolError::MalformedRequest(format!("invalid Content-Length '{value}'"))
                })?;
                if content_length.is_some_and(|previous| previous != length) {
                    return Err(ProtocolError::MalformedRequest(
                        "conflicting Content-Length headers".to_string(),
                    ));
                }
                content_length = Some(length);
            } else if name.eq_ignore_ascii_case("transfer-encoding") {
                return Err(ProtocolError::MalformedRequest(format!(
                    "unsupported Transfer-Encoding '{value}'"
                )));
            }
        }

        let content_length = content_length.unwrap_or(0);
        if content_length > max_body_bytes {
            return Err(ProtocolError::BodyTooLarge {
                limit: max_body_bytes,
            });
        }

        let mut body = vec![0; content_length];
        reader.read_exact(&mut body).await?;

        Ok(Some(Self::new(method, target, body)))
    }
}

/// Reads header lines up to the blank line, without their line endings.
async fn read_head<R>(reader: &mut R) -> Result<Option<Vec<String>>, ProtocolError>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = Vec::new();
    let mut used = 0;

    loop {
        let mut line = Vec::new();
        let budget = (MAX_HEAD_BYTES - used + 1) as u64;
        let n = (&mut *reader).take(budget).read_until(b'\n', &mut line).await?;

        if n == 0 && used == 0 {
            return Ok(None);
        }
        used += n;
        if used > MAX_HEAD_BYTES {
            return Err(ProtocolError::HeadersTooLarge {
                limit: MAX_HEAD_BYTES,
            });
        }
        if line.last() != Some(&b'\n') {
            return Err(ProtocolError::MalformedRequest(
                "connection closed inside request head".to_string(),
            ));
        }

        let text = String::from_utf8(line)
            .map_err(|_| ProtocolError::MalformedRequest("request head is not UTF-8".to_string()))?;
        let text = text.trim_end_matches(['\r', '\n']);
        if text.is_empty() {
            // Tolerate stray blank lines before the request line.
            if lines.is_empty() {
                continue;
            }
            return Ok(Some(lines));
        }
        lines.push(text.to_string());
    }
}

fn parse_request_line(line: &str) -> Result<(Method, &str), ProtocolError> {
    let malformed = || ProtocolError::MalformedRequest(format!("invalid request line '{line}'"));

    let mut parts = line.split_ascii_whitespace();
    let (Some(method), Some(target), Some(version), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(malformed());
    };

    if !version.starts_with("HTTP/1.") || !target.starts_with('/') {
        return Err(malformed());
    }

    Ok((Method::from(method), target))
}
