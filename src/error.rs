// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `wyze_sensors` library.
//!
//! This module provides the error hierarchy used across the library: value
//! validation of vendor codes, communication with the Wyze cloud, and JSON
//! parsing of cloud responses.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// A vendor code could not be mapped to a known value.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred while talking to the cloud API.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Error occurred while parsing a cloud response.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
}

impl Error {
    /// Returns `true` if the error means the client has no valid access
    /// token, either because it was rejected or because none is stored.
    ///
    /// This is the only error class the library recovers from locally, by
    /// re-authenticating once and repeating the failed call.
    #[must_use]
    pub fn is_access_token(&self) -> bool {
        matches!(
            self,
            Self::Protocol(ProtocolError::AccessTokenExpired | ProtocolError::NotAuthenticated)
        )
    }
}

/// Errors raised when a vendor code has no known mapping.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// The product type reported for a device is not recognized.
    #[error("unknown device type: {0}")]
    UnknownDeviceType(String),

    /// The property identifier is not recognized.
    #[error("unknown property id: {0}")]
    UnknownPropertyId(String),

    /// The event type name is not recognized.
    #[error("unknown event type: {0}")]
    UnknownEventType(String),
}

/// Errors related to communication with the Wyze cloud.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP request failed.
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The access token was rejected by the API and must be renewed.
    #[error("access token expired")]
    AccessTokenExpired,

    /// Login was refused.
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// A call was attempted before logging in.
    #[error("client is not authenticated")]
    NotAuthenticated,

    /// The API answered with a non-success code.
    #[error("API error {code}: {message}")]
    Api {
        /// The vendor response code.
        code: String,
        /// The vendor response message.
        message: String,
    },

    /// The server could not be reached or answered with an HTTP error.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Invalid URL or address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),
}

/// Errors related to parsing cloud responses.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Expected field is missing from the response.
    #[error("missing field in response: {0}")]
    MissingField(String),

    /// Unexpected response format.
    #[error("unexpected response format: {0}")]
    UnexpectedFormat(String),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
