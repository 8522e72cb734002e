// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for clean-command parameters.
//!
//! This module provides type-safe representations of the values carried by a
//! clean command. Each type ensures values are within their valid ranges at
//! construction time, so a fully assembled request is always dispatchable.
//!
//! # Types
//!
//! - [`CleanMode`] - Sweep or sweep-and-mop
//! - [`RoomId`] - Vendor room code (e.g. `ROOM_003`)
//! - [`WaterLevel`] - Mopping water level (1-2)
//! - [`FanLevel`] - Suction fan level (1-4)
//! - [`CleanTimes`] - Number of cleaning passes (1-2)

mod levels;
mod mode;
mod room;

pub use levels::{CleanTimes, FanLevel, WaterLevel};
pub use mode::CleanMode;
pub use room::RoomId;
