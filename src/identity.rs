// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Client identity sent with every cloud request.

use uuid::Uuid;

/// Identity of this application instance towards the vendor cloud.
///
/// The installation UUID is generated once at construction and identifies
/// the calling application instance for the lifetime of its coordinator; it
/// never changes afterwards. Every outbound request additionally carries a
/// freshly generated request UUID for vendor-side tracing, which is never
/// reused.
///
/// # Examples
///
/// ```
/// use scnr_lib::ClientIdentity;
///
/// let identity = ClientIdentity::new();
/// assert_eq!(identity.installation_id(), identity.installation_id());
/// assert_ne!(identity.fresh_request_id(), identity.fresh_request_id());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientIdentity {
    installation: Uuid,
}

impl ClientIdentity {
    /// Creates a new identity with a random installation UUID.
    #[must_use]
    pub fn new() -> Self {
        Self {
            installation: Uuid::new_v4(),
        }
    }

    /// Returns the stable installation UUID.
    #[must_use]
    pub const fn installation_id(&self) -> Uuid {
        self.installation
    }

    /// Mints a new request UUID.
    #[must_use]
    pub fn fresh_request_id(&self) -> Uuid {
        Uuid::new_v4()
    }

    /// Returns the MQTT topic on which the vendor publishes the function
    /// response for commands issued by this identity.
    ///
    /// The vendor convention embeds the installation UUID twice:
    /// `v1_1/{uuid}/APP_HA_{uuid}/funcResp`.
    #[must_use]
    pub fn notify_topic(&self) -> String {
        format!(
            "v1_1/{installation}/APP_HA_{installation}/funcResp",
            installation = self.installation
        )
    }
}

impl Default for ClientIdentity {
    fn default() -> Self {
        Self::new()
    }
}
