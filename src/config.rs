// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Configuration for the SwitchBot cloud connection.

use std::fmt;
use std::time::Duration;

use crate::types::RoomId;

/// Account credentials for the vendor cloud.
///
/// Owned by the host's configuration and read-only to the session. The
/// password is redacted from `Debug` output so it cannot leak through
/// logging.
///
/// # Examples
///
/// ```
/// use scnr_lib::Credentials;
///
/// let credentials = Credentials::new("user@example.com", "hunter2");
/// assert_eq!(credentials.username(), "user@example.com");
/// assert!(!format!("{credentials:?}").contains("hunter2"));
/// ```
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// Creates a new set of credentials.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Returns the account username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the account password.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Configuration for the SwitchBot cloud endpoints and the target device.
///
/// The defaults reproduce the vendor constants of the EU deployment; hosts
/// only need to override them for other regions or for testing against a
/// mock server.
///
/// # Examples
///
/// ```
/// use scnr_lib::CloudConfig;
/// use std::time::Duration;
///
/// // Stock configuration
/// let config = CloudConfig::new();
/// assert_eq!(config.device_model(), "Floor Cleaning Robot S10");
///
/// // With overrides
/// let config = CloudConfig::new()
///     .with_api_host("http://127.0.0.1:8080")
///     .with_timeout(Duration::from_secs(5));
/// ```
#[derive(Debug, Clone)]
pub struct CloudConfig {
    auth_host: String,
    api_host: String,
    client_id: String,
    app_version: String,
    device_model: String,
    timeout: Duration,
    rooms: Vec<RoomId>,
}

impl CloudConfig {
    /// Default account/auth service host.
    pub const DEFAULT_AUTH_HOST: &'static str = "https://account.api.switchbot.net";

    /// Default API host (EU deployment).
    pub const DEFAULT_API_HOST: &'static str = "https://wonderlabs.eu.api.switchbot.net";

    /// OAuth client id of the vendor app.
    pub const DEFAULT_CLIENT_ID: &'static str = "5nnwmhmsa9xxskm14hd85lm9bm";

    /// App version string expected by the vendor API.
    pub const DEFAULT_APP_VERSION: &'static str = "8.6.1";

    /// Device-name fragment identifying the target robot model.
    pub const DEFAULT_DEVICE_MODEL: &'static str = "Floor Cleaning Robot S10";

    /// Per-request timeout budget.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Room codes offered by default.
    ///
    /// Whether this list is vendor-stable or per-installation is unknown;
    /// it is configuration data and can be replaced via
    /// [`with_rooms`](Self::with_rooms).
    pub const DEFAULT_ROOMS: [&'static str; 10] = [
        "ROOM_000", "ROOM_001", "ROOM_002", "ROOM_003", "ROOM_004", "ROOM_005", "ROOM_006",
        "ROOM_007", "ROOM_008", "ROOM_009",
    ];

    /// Creates a configuration with the stock vendor constants.
    #[must_use]
    pub fn new() -> Self {
        Self {
            auth_host: Self::DEFAULT_AUTH_HOST.to_string(),
            api_host: Self::DEFAULT_API_HOST.to_string(),
            client_id: Self::DEFAULT_CLIENT_ID.to_string(),
            app_version: Self::DEFAULT_APP_VERSION.to_string(),
            device_model: Self::DEFAULT_DEVICE_MODEL.to_string(),
            timeout: Self::DEFAULT_TIMEOUT,
            rooms: Self::DEFAULT_ROOMS
                .iter()
                .filter_map(|id| RoomId::new(*id).ok())
                .collect(),
        }
    }

    /// Sets the auth service host.
    #[must_use]
    pub fn with_auth_host(mut self, host: impl Into<String>) -> Self {
        self.auth_host = host.into();
        self
    }

    /// Sets the API host.
    #[must_use]
    pub fn with_api_host(mut self, host: impl Into<String>) -> Self {
        self.api_host = host.into();
        self
    }

    /// Sets the app version string sent with every request.
    #[must_use]
    pub fn with_app_version(mut self, version: impl Into<String>) -> Self {
        self.app_version = version.into();
        self
    }

    /// Sets the device-name fragment used to resolve the target device.
    #[must_use]
    pub fn with_device_model(mut self, model: impl Into<String>) -> Self {
        self.device_model = model.into();
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Replaces the offered room codes.
    #[must_use]
    pub fn with_rooms(mut self, rooms: Vec<RoomId>) -> Self {
        self.rooms = rooms;
        self
    }

    /// Returns the auth service host.
    #[must_use]
    pub fn auth_host(&self) -> &str {
        &self.auth_host
    }

    /// Returns the API host.
    #[must_use]
    pub fn api_host(&self) -> &str {
        &self.api_host
    }

    /// Returns the OAuth client id.
    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Returns the app version string.
    #[must_use]
    pub fn app_version(&self) -> &str {
        &self.app_version
    }

    /// Returns the device-name fragment of the target model.
    #[must_use]
    pub fn device_model(&self) -> &str {
        &self.device_model
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the room codes offered to settings providers.
    #[must_use]
    pub fn rooms(&self) -> &[RoomId] {
        &self.rooms
    }

    /// Builds the login endpoint URL.
    #[must_use]
    pub fn login_url(&self) -> String {
        format!("{}/account/api/v1/user/login", self.auth_host)
    }

    /// Builds the device listing endpoint URL.
    #[must_use]
    pub fn device_list_url(&self) -> String {
        format!("{}/wonder/device/v3/getdevice", self.api_host)
    }

    /// Builds the function invoke endpoint URL.
    #[must_use]
    pub fn invoke_url(&self) -> String {
        format!("{}/command/cmd/api/v1/func/invoke", self.api_host)
    }
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self::new()
    }
}
