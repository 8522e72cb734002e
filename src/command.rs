// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Clean command definitions.
//!
//! [`CleanRequest`] is the typed, fully validated tuple of clean parameters;
//! [`CleanCommand`] is its wire form for the vendor's function-invoke
//! endpoint. The vendor contract duplicates the mode block at command level
//! and room level, and each invoke addresses exactly one room; whether the
//! API supports multi-room batches is unconfirmed, so the payload type does
//! not admit more than one room entry.

use serde::Serialize;

use crate::identity::ClientIdentity;
use crate::registry::DeviceRef;
use crate::types::{CleanMode, CleanTimes, FanLevel, RoomId, WaterLevel};

/// Vendor function id meaning "invoke device function".
pub const FUNCTION_ID: u32 = 1001;

/// Action name carried in the function parameters.
const ACTION_CLEAN_ROOMS: &str = "clean_rooms";

/// A fully populated room-clean request.
///
/// All five fields are range-validated at construction of their types, so a
/// value of this struct is always dispatchable; partial requests cannot be
/// expressed.
///
/// # Examples
///
/// ```
/// use scnr_lib::CleanRequest;
/// use scnr_lib::types::{CleanMode, CleanTimes, FanLevel, RoomId, WaterLevel};
///
/// let request = CleanRequest::new(
///     RoomId::new("ROOM_003").unwrap(),
///     CleanMode::SweepMop,
///     WaterLevel::new(2).unwrap(),
///     FanLevel::new(4).unwrap(),
///     CleanTimes::ONCE,
/// );
/// assert_eq!(request.room().as_str(), "ROOM_003");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanRequest {
    room: RoomId,
    mode: CleanMode,
    water_level: WaterLevel,
    fan_level: FanLevel,
    times: CleanTimes,
}

impl CleanRequest {
    /// Assembles a request from its five typed parameters.
    #[must_use]
    pub fn new(
        room: RoomId,
        mode: CleanMode,
        water_level: WaterLevel,
        fan_level: FanLevel,
        times: CleanTimes,
    ) -> Self {
        Self {
            room,
            mode,
            water_level,
            fan_level,
            times,
        }
    }

    /// Returns the target room.
    #[must_use]
    pub fn room(&self) -> &RoomId {
        &self.room
    }

    /// Returns the cleaning mode.
    #[must_use]
    pub fn mode(&self) -> CleanMode {
        self.mode
    }

    /// Returns the water level.
    #[must_use]
    pub fn water_level(&self) -> WaterLevel {
        self.water_level
    }

    /// Returns the fan level.
    #[must_use]
    pub fn fan_level(&self) -> FanLevel {
        self.fan_level
    }

    /// Returns the number of cleaning passes.
    #[must_use]
    pub fn times(&self) -> CleanTimes {
        self.times
    }
}

/// Wire payload for the function-invoke endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct CleanCommand {
    #[serde(rename = "deviceID")]
    device_id: String,
    #[serde(rename = "functionID")]
    function_id: u32,
    notify: NotifyTarget,
    params: CleanParams,
}

#[derive(Debug, Clone, Serialize)]
struct NotifyTarget {
    #[serde(rename = "type")]
    kind: &'static str,
    url: String,
}

#[derive(Debug, Clone, Serialize)]
struct CleanParams {
    #[serde(rename = "0")]
    action: &'static str,
    #[serde(rename = "1")]
    arguments: CleanArguments,
}

#[derive(Debug, Clone, Serialize)]
struct CleanArguments {
    force_order: bool,
    mode: ModeBlock,
    rooms: Vec<RoomEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct ModeBlock {
    fan_level: u8,
    times: u8,
    #[serde(rename = "type")]
    kind: CleanMode,
    water_level: u8,
}

#[derive(Debug, Clone, Serialize)]
struct RoomEntry {
    mode: ModeBlock,
    room_id: RoomId,
}

impl CleanCommand {
    /// Builds the invoke payload for one request.
    ///
    /// The mode block appears twice, once at command level and once inside
    /// the single room entry, per the vendor contract.
    #[must_use]
    pub fn new(device: &DeviceRef, identity: &ClientIdentity, request: &CleanRequest) -> Self {
        let mode = ModeBlock {
            fan_level: request.fan_level().value(),
            times: request.times().value(),
            kind: request.mode(),
            water_level: request.water_level().value(),
        };

        Self {
            device_id: device.mac().to_owned(),
            function_id: FUNCTION_ID,
            notify: NotifyTarget {
                kind: "mqtt",
                url: identity.notify_topic(),
            },
            params: CleanParams {
                action: ACTION_CLEAN_ROOMS,
                arguments: CleanArguments {
                    force_order: true,
                    mode: mode.clone(),
                    rooms: vec![RoomEntry {
                        mode,
                        room_id: request.room().clone(),
                    }],
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(
        room: &str,
        mode: CleanMode,
        water: i64,
        fan: i64,
        times: i64,
    ) -> CleanRequest {
        CleanRequest::new(
            RoomId::new(room).unwrap(),
            mode,
            WaterLevel::new(water).unwrap(),
            FanLevel::new(fan).unwrap(),
            CleanTimes::new(times).unwrap(),
        )
    }

    #[test]
    fn payload_wire_shape() {
        let identity = ClientIdentity::new();
        let device = DeviceRef::new("CC:DD:EE");
        let command = CleanCommand::new(
            &device,
            &identity,
            &request("ROOM_003", CleanMode::SweepMop, 2, 4, 1),
        );

        let value = serde_json::to_value(&command).unwrap();
        let uuid = identity.installation_id().to_string();
        assert_eq!(
            value,
            serde_json::json!({
                "deviceID": "CC:DD:EE",
                "functionID": 1001,
                "notify": {
                    "type": "mqtt",
                    "url": format!("v1_1/{uuid}/APP_HA_{uuid}/funcResp"),
                },
                "params": {
                    "0": "clean_rooms",
                    "1": {
                        "force_order": true,
                        "mode": {
                            "fan_level": 4,
                            "times": 1,
                            "type": "sweep_mop",
                            "water_level": 2,
                        },
                        "rooms": [{
                            "mode": {
                                "fan_level": 4,
                                "times": 1,
                                "type": "sweep_mop",
                                "water_level": 2,
                            },
                            "room_id": "ROOM_003",
                        }],
                    },
                },
            })
        );
    }

    #[test]
    fn mode_block_duplicated_for_all_valid_tuples() {
        let identity = ClientIdentity::new();
        let device = DeviceRef::new("AA");

        for water in 1..=2 {
            for fan in 1..=4 {
                for times in 1..=2 {
                    for mode in [CleanMode::Sweep, CleanMode::SweepMop] {
                        let command = CleanCommand::new(
                            &device,
                            &identity,
                            &request("ROOM_001", mode, water, fan, times),
                        );
                        let value = serde_json::to_value(&command).unwrap();
                        let top = &value["params"]["1"]["mode"];
                        let per_room = &value["params"]["1"]["rooms"][0]["mode"];
                        assert_eq!(top, per_room);
                        assert_eq!(
                            *top,
                            serde_json::json!({
                                "fan_level": fan,
                                "times": times,
                                "type": mode.as_str(),
                                "water_level": water,
                            })
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn exactly_one_room_entry() {
        let identity = ClientIdentity::new();
        let device = DeviceRef::new("AA");
        let command = CleanCommand::new(
            &device,
            &identity,
            &request("ROOM_009", CleanMode::Sweep, 1, 1, 1),
        );
        let value = serde_json::to_value(&command).unwrap();
        let rooms = value["params"]["1"]["rooms"].as_array().unwrap();
        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0]["room_id"], "ROOM_009");
    }
}
