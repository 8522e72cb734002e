// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Authenticated session against the vendor account service.
//!
//! A session owns the access token and the client identity used to decorate
//! outgoing requests. It knows how to (re)authenticate; when and how often
//! to do so is the coordinator's policy (see
//! [`SessionCache`](crate::SessionCache)).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::{CloudConfig, Credentials};
use crate::error::{AuthError, Error};
use crate::identity::ClientIdentity;
use crate::transport::{ApiTransport, RequestHeaders};

/// Device name reported in the login request's `deviceInfo` block.
const LOGIN_DEVICE_NAME: &str = "Home Assistant";

/// Device model reported in the login request's `deviceInfo` block.
const LOGIN_DEVICE_MODEL: &str = "Home Assistant";

/// Opaque access token returned by a successful login.
///
/// The token value is redacted from `Debug` output so it cannot leak
/// through logging. Vendor-side expiry is not tracked locally.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wraps a raw token value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the raw token value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// Login request body, per the vendor's password-grant contract.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginBody<'a> {
    client_id: &'a str,
    device_info: LoginDeviceInfo<'a>,
    grant_type: &'static str,
    password: &'a str,
    username: &'a str,
    verify_code: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginDeviceInfo<'a> {
    device_id: &'a str,
    device_name: &'static str,
    model: &'static str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(default)]
    body: Option<LoginResponseBody>,
}

#[derive(Debug, Deserialize)]
struct LoginResponseBody {
    #[serde(default)]
    access_token: Option<String>,
}

/// An account session holding the access token and client identity.
///
/// # Examples
///
/// ```no_run
/// use scnr_lib::{ApiTransport, ClientIdentity, CloudConfig, Credentials, Session};
///
/// # async fn example() -> scnr_lib::Result<()> {
/// let config = CloudConfig::new();
/// let transport = ApiTransport::new(config.timeout())?;
/// let mut session = Session::new(
///     transport,
///     config,
///     Credentials::new("user@example.com", "hunter2"),
///     ClientIdentity::new(),
/// );
///
/// session.authenticate().await?;
/// let headers = session.authorized_headers()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Session {
    transport: ApiTransport,
    config: CloudConfig,
    credentials: Credentials,
    identity: ClientIdentity,
    token: Option<AccessToken>,
}

impl Session {
    /// Creates an unauthenticated session.
    #[must_use]
    pub fn new(
        transport: ApiTransport,
        config: CloudConfig,
        credentials: Credentials,
        identity: ClientIdentity,
    ) -> Self {
        Self {
            transport,
            config,
            credentials,
            identity,
            token: None,
        }
    }

    /// Rebuilds a session around a previously obtained token.
    ///
    /// The token is used as-is; if it has expired vendor-side, the next
    /// authorized call will be rejected by the cloud.
    #[must_use]
    pub fn resume(
        transport: ApiTransport,
        config: CloudConfig,
        credentials: Credentials,
        identity: ClientIdentity,
        token: AccessToken,
    ) -> Self {
        Self {
            transport,
            config,
            credentials,
            identity,
            token: Some(token),
        }
    }

    /// Returns the client identity of this session.
    #[must_use]
    pub fn identity(&self) -> &ClientIdentity {
        &self.identity
    }

    /// Returns the current access token, if any.
    #[must_use]
    pub fn token(&self) -> Option<&AccessToken> {
        self.token.as_ref()
    }

    /// Returns whether a login has succeeded.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Performs a password-grant login and stores the access token.
    ///
    /// No retry happens inside this call; a failed login leaves any
    /// previously held token untouched.
    ///
    /// # Errors
    ///
    /// Returns `AuthError` if the login is rejected, the response carries no
    /// token, or the request does not complete.
    pub async fn authenticate(&mut self) -> Result<(), Error> {
        let installation = self.identity.installation_id().to_string();
        let body = LoginBody {
            client_id: self.config.client_id(),
            device_info: LoginDeviceInfo {
                device_id: &installation,
                device_name: LOGIN_DEVICE_NAME,
                model: LOGIN_DEVICE_MODEL,
            },
            grant_type: "password",
            password: self.credentials.password(),
            username: self.credentials.username(),
            verify_code: "",
        };

        let headers = self.request_headers(String::new());
        let response = self
            .transport
            .post_json(&self.config.login_url(), &headers, &body)
            .await
            .map_err(AuthError::Transport)?;

        if !response.is_success() {
            return Err(AuthError::Rejected {
                status: response.status(),
                body: response.into_body(),
            }
            .into());
        }

        let parsed: LoginResponse = response.parse().map_err(AuthError::Malformed)?;
        let token = parsed
            .body
            .and_then(|body| body.access_token)
            .ok_or(AuthError::MissingToken)?;

        tracing::debug!("login successful");
        self.token = Some(AccessToken::new(token));
        Ok(())
    }

    /// Returns the header set for an authorized cloud call.
    ///
    /// A fresh request UUID is minted on every invocation.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotAuthenticated` if called before a successful
    /// [`authenticate`](Self::authenticate).
    pub fn authorized_headers(&self) -> Result<RequestHeaders, Error> {
        let token = self.token.as_ref().ok_or(Error::NotAuthenticated)?;
        Ok(self.request_headers(token.as_str().to_owned()))
    }

    fn request_headers(&self, authorization: String) -> RequestHeaders {
        RequestHeaders {
            authorization,
            uuid: self.identity.installation_id().to_string(),
            request_id: self.identity.fresh_request_id().to_string(),
            app_version: self.config.app_version().to_owned(),
        }
    }
}
