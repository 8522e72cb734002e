// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device discovery against the account's device listing.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::CloudConfig;
use crate::error::{CommandError, Error};
use crate::session::Session;
use crate::transport::ApiTransport;

/// Reference to a resolved device.
///
/// Wraps the vendor's MAC-like device identifier used to address commands.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeviceRef {
    mac: String,
}

impl DeviceRef {
    /// Creates a device reference from a raw identifier.
    #[must_use]
    pub fn new(mac: impl Into<String>) -> Self {
        Self { mac: mac.into() }
    }

    /// Returns the vendor device identifier.
    #[must_use]
    pub fn mac(&self) -> &str {
        &self.mac
    }
}

impl fmt::Display for DeviceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.mac)
    }
}

#[derive(Debug, Serialize)]
struct DeviceListRequest {
    required_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct DeviceListResponse {
    #[serde(default)]
    body: DeviceListBody,
}

#[derive(Debug, Default, Deserialize)]
struct DeviceListBody {
    #[serde(rename = "Items", default)]
    items: Vec<DeviceEntry>,
}

#[derive(Debug, Deserialize)]
struct DeviceEntry {
    #[serde(default)]
    device_name: String,
    #[serde(default)]
    device_mac: String,
}

/// Resolves the logical target device to its vendor identifier.
///
/// Matching is by device-name fragment, in the order the API returns
/// entries; the first match wins. Accounts holding several robots of the
/// same model are not disambiguated.
#[derive(Debug, Clone)]
pub struct DeviceRegistry {
    transport: ApiTransport,
    config: CloudConfig,
}

impl DeviceRegistry {
    /// Creates a registry over the given transport and configuration.
    #[must_use]
    pub fn new(transport: ApiTransport, config: CloudConfig) -> Self {
        Self { transport, config }
    }

    /// Fetches the account's device listing and returns the first device
    /// whose name contains the configured model fragment.
    ///
    /// # Errors
    ///
    /// Returns `Error::DeviceNotFound` if no entry matches, or
    /// `Error::Command` if the listing call fails.
    pub async fn resolve_device(&self, session: &Session) -> Result<DeviceRef, Error> {
        let headers = session.authorized_headers()?;
        let body = DeviceListRequest {
            required_type: "All",
        };

        let response = self
            .transport
            .post_json(&self.config.device_list_url(), &headers, &body)
            .await
            .map_err(CommandError::Transport)?;

        if !response.is_success() {
            return Err(CommandError::Rejected {
                status: response.status(),
                body: response.into_body(),
            }
            .into());
        }

        let parsed: DeviceListResponse = response.parse().map_err(CommandError::Decode)?;
        match first_match(&parsed.body.items, self.config.device_model()) {
            Some(entry) => {
                tracing::debug!(
                    device_name = %entry.device_name,
                    device_mac = %entry.device_mac,
                    "resolved target device"
                );
                Ok(DeviceRef::new(entry.device_mac.clone()))
            }
            None => Err(Error::DeviceNotFound {
                model: self.config.device_model().to_owned(),
            }),
        }
    }
}

fn first_match<'a>(items: &'a [DeviceEntry], model: &str) -> Option<&'a DeviceEntry> {
    items.iter().find(|entry| entry.device_name.contains(model))
}
