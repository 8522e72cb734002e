// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Room identifier type.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// Vendor room code identifying a mapped room on the device.
///
/// Room codes are opaque strings assigned by the vendor (e.g. `ROOM_003`).
/// Whether the code list is vendor-stable or per-installation is unknown, so
/// the set of offered codes is configuration data, not a property of this
/// type; the only local constraint is that a code must not be empty.
///
/// # Examples
///
/// ```
/// use scnr_lib::types::RoomId;
///
/// let room = RoomId::new("ROOM_003").unwrap();
/// assert_eq!(room.as_str(), "ROOM_003");
///
/// assert!(RoomId::new("").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct RoomId(String);

impl RoomId {
    /// Creates a new room identifier.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::EmptyRoomId` if the identifier is empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ValueError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ValueError::EmptyRoomId);
        }
        Ok(Self(id))
    }

    /// Returns the room code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for RoomId {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn room_id_valid() {
        let room = RoomId::new("ROOM_007").unwrap();
        assert_eq!(room.as_str(), "ROOM_007");
        assert_eq!(room.to_string(), "ROOM_007");
    }

    #[test]
    fn room_id_empty() {
        assert_eq!(RoomId::new("").unwrap_err(), ValueError::EmptyRoomId);
    }

    #[test]
    fn room_id_serializes_transparently() {
        let room = RoomId::new("ROOM_001").unwrap();
        assert_eq!(
            serde_json::to_value(&room).unwrap(),
            serde_json::json!("ROOM_001")
        );
    }
}
