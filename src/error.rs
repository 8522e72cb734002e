// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `SCNR` library.
//!
//! This module provides a comprehensive error hierarchy for handling failures
//! across the library: authentication, device resolution, parameter
//! validation, command dispatch, and HTTP transport.

use std::time::Duration;

use thiserror::Error;

use crate::params::Parameter;

/// The main error type for this library.
///
/// This enum encompasses all possible errors that can occur when driving a
/// clean cycle against the SwitchBot cloud.
#[derive(Debug, Error)]
pub enum Error {
    /// Login was rejected or the login response was unusable.
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// An authorized call was attempted before a successful login.
    #[error("no authenticated session, call authenticate first")]
    NotAuthenticated,

    /// No device in the account listing matched the configured model name.
    #[error("no device matching \"{model}\" found in account")]
    DeviceNotFound {
        /// The model-name fragment that was searched for.
        model: String,
    },

    /// A clean parameter was out of range or had the wrong shape.
    #[error("invalid parameter: {0}")]
    Value(#[from] ValueError),

    /// An authorized cloud call failed or was rejected.
    #[error("command error: {0}")]
    Command(#[from] CommandError),

    /// The clean parameters did not all resolve within the retry budget.
    #[error(
        "clean parameters unresolved after {attempts} attempts, missing: {}",
        format_missing(.missing)
    )]
    ReadinessTimeout {
        /// Number of resolution attempts that were made.
        attempts: u32,
        /// The parameters that were still unresolved when the budget ran out.
        missing: Vec<Parameter>,
    },

    /// HTTP-level failure outside of any specific call context.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
}

fn format_missing(missing: &[Parameter]) -> String {
    missing
        .iter()
        .map(|parameter| parameter.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Errors produced by the login exchange.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The auth endpoint answered with a non-success status.
    #[error("login rejected (HTTP {status}): {body}")]
    Rejected {
        /// HTTP status code of the rejection.
        status: u16,
        /// Response body as returned by the cloud.
        body: String,
    },

    /// The login response parsed, but carried no access token.
    #[error("login response is missing the access token")]
    MissingToken,

    /// The login response body was not valid JSON.
    #[error("malformed login response: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The login request never completed.
    #[error("transport failure during login: {0}")]
    Transport(#[from] TransportError),
}

/// Errors produced by authorized cloud calls (device listing and invoke).
#[derive(Debug, Error)]
pub enum CommandError {
    /// The cloud answered with a non-success status.
    #[error("cloud rejected the request (HTTP {status}): {body}")]
    Rejected {
        /// HTTP status code of the rejection.
        status: u16,
        /// Response body as returned by the cloud.
        body: String,
    },

    /// The response body could not be decoded.
    #[error("failed to decode cloud response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The request never completed.
    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),
}

/// Errors at the HTTP layer.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The underlying HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The request exceeded the per-call timeout budget.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
}

/// Errors related to value validation and constraints.
///
/// These errors occur when constructing constrained clean-parameter types
/// with invalid values, or when coercing parameter-store values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A numeric value is outside the allowed range.
    #[error("{name} value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// The parameter the value was meant for.
        name: &'static str,
        /// Minimum allowed value.
        min: u8,
        /// Maximum allowed value.
        max: u8,
        /// The actual value that was provided.
        actual: i64,
    },

    /// An invalid clean mode string was provided.
    #[error("invalid clean mode: {0:?}")]
    InvalidMode(String),

    /// A parameter value could not be coerced to an integer.
    #[error("{name} value {value:?} is not an integer")]
    NotNumeric {
        /// The parameter the value was meant for.
        name: &'static str,
        /// The offending value, rendered as text.
        value: String,
    },

    /// A parameter expected text but held a number.
    #[error("{name} value is not textual")]
    NotText {
        /// The parameter the value was meant for.
        name: &'static str,
    },

    /// A room identifier was empty.
    #[error("room id must not be empty")]
    EmptyRoomId,
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
