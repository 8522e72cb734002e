// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP transport for the SwitchBot cloud API.
//!
//! Every cloud call is a JSON POST carrying the same identity header set.
//! The transport performs exactly one request/response exchange per call;
//! retry and caching policy live with the callers.

use std::time::Duration;

use reqwest::Client;
use serde::Serialize;

use crate::error::TransportError;

/// Content type sent with every request.
const CONTENT_TYPE_JSON: &str = "application/json; charset=UTF-8";

/// The identity header set attached to a single cloud request.
///
/// `authorization` is empty for the login call and carries the access token
/// for every authorized call. `request_id` must be freshly minted per
/// request.
#[derive(Debug, Clone)]
pub struct RequestHeaders {
    /// Access token, or empty for the login call.
    pub authorization: String,
    /// Installation UUID of the calling application instance.
    pub uuid: String,
    /// Fresh per-request UUID for vendor-side tracing.
    pub request_id: String,
    /// App version string expected by the vendor.
    pub app_version: String,
}

/// HTTP client for the vendor cloud.
///
/// Stateless: each call is an independent request bounded by the configured
/// timeout. Cloning is cheap; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct ApiTransport {
    client: Client,
    timeout: Duration,
}

impl ApiTransport {
    /// Creates a transport with the given per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(TransportError::Http)?;
        Ok(Self { client, timeout })
    }

    /// Sends one JSON POST and collects the full response body.
    ///
    /// The connection is released on every exit path; a timeout is surfaced
    /// as [`TransportError::Timeout`].
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if the exchange does not complete.
    pub async fn post_json<B>(
        &self,
        url: &str,
        headers: &RequestHeaders,
        body: &B,
    ) -> Result<ApiResponse, TransportError>
    where
        B: Serialize + ?Sized,
    {
        tracing::debug!(url = %url, request_id = %headers.request_id, "sending cloud request");

        let response = self
            .client
            .post(url)
            .header("authorization", &headers.authorization)
            .header("uuid", &headers.uuid)
            .header("requestid", &headers.request_id)
            .header("appversion", &headers.app_version)
            .header("content-type", CONTENT_TYPE_JSON)
            .json(body)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| self.classify(e))?;

        tracing::debug!(status, body = %body, "received cloud response");

        Ok(ApiResponse { status, body })
    }

    fn classify(&self, error: reqwest::Error) -> TransportError {
        if error.is_timeout() {
            TransportError::Timeout(self.timeout)
        } else {
            TransportError::Http(error)
        }
    }
}

/// Response from a cloud call.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: u16,
    body: String,
}

impl ApiResponse {
    /// Returns the HTTP status code.
    #[must_use]
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Returns whether the status code is in the 2xx range.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Returns the raw response body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Consumes the response, returning the raw body.
    #[must_use]
    pub fn into_body(self) -> String {
        self.body
    }

    /// Parses the body as a specific type.
    ///
    /// # Errors
    ///
    /// Returns error if the body cannot be parsed into the target type.
    pub fn parse<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_range() {
        let ok = ApiResponse {
            status: 200,
            body: String::new(),
        };
        assert!(ok.is_success());

        let created = ApiResponse {
            status: 201,
            body: String::new(),
        };
        assert!(created.is_success());

        let unauthorized = ApiResponse {
            status: 401,
            body: String::new(),
        };
        assert!(!unauthorized.is_success());
    }

    #[test]
    fn parse_body() {
        let response = ApiResponse {
            status: 200,
            body: r#"{"body":{"access_token":"T1"}}"#.to_string(),
        };
        let value: serde_json::Value = response.parse().unwrap();
        assert_eq!(value["body"]["access_token"], "T1");
    }
}
