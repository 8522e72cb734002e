// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Dispatch of clean commands to the function-invoke endpoint.

use crate::command::{CleanCommand, CleanRequest};
use crate::config::CloudConfig;
use crate::error::{CommandError, Error};
use crate::registry::DeviceRef;
use crate::session::Session;
use crate::transport::ApiTransport;

/// Sends clean commands to a resolved device.
///
/// Authorization is delegated to the [`Session`]; addressing to the
/// [`DeviceRef`] resolved by the registry. Sending is not idempotent from
/// the device's perspective: a re-sent command re-triggers cleaning, so the
/// dispatcher never retries on its own.
#[derive(Debug, Clone)]
pub struct CommandDispatcher {
    transport: ApiTransport,
    config: CloudConfig,
}

impl CommandDispatcher {
    /// Creates a dispatcher over the given transport and configuration.
    #[must_use]
    pub fn new(transport: ApiTransport, config: CloudConfig) -> Self {
        Self { transport, config }
    }

    /// Sends one room-clean command and returns the raw vendor response
    /// body.
    ///
    /// All parameter validation has already happened at [`CleanRequest`]
    /// construction; nothing is sent for an invalid tuple.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotAuthenticated` if the session holds no token, or
    /// `Error::Command` if the invoke call fails or is rejected.
    pub async fn clean_room(
        &self,
        session: &Session,
        device: &DeviceRef,
        request: &CleanRequest,
    ) -> Result<String, Error> {
        let headers = session.authorized_headers()?;
        let command = CleanCommand::new(device, session.identity(), request);

        tracing::debug!(
            device = %device,
            room = %request.room(),
            mode = %request.mode(),
            "dispatching clean command"
        );

        let response = self
            .transport
            .post_json(&self.config.invoke_url(), &headers, &command)
            .await
            .map_err(CommandError::Transport)?;

        if !response.is_success() {
            return Err(CommandError::Rejected {
                status: response.status(),
                body: response.into_body(),
            }
            .into());
        }

        Ok(response.into_body())
    }
}
