// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Clean mode type.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// Cleaning mode of the robot.
///
/// The vendor API accepts exactly two modes: a dry sweep and a combined
/// sweep-and-mop pass. The wire representation is the lowercase snake_case
/// string (`"sweep"` / `"sweep_mop"`).
///
/// # Examples
///
/// ```
/// use scnr_lib::types::CleanMode;
///
/// let mode: CleanMode = "sweep_mop".parse().unwrap();
/// assert_eq!(mode, CleanMode::SweepMop);
/// assert_eq!(mode.as_str(), "sweep_mop");
///
/// assert!("polish".parse::<CleanMode>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CleanMode {
    /// Dry sweeping only.
    Sweep,
    /// Sweeping followed by mopping.
    SweepMop,
}

impl CleanMode {
    /// Returns the wire representation of this mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sweep => "sweep",
            Self::SweepMop => "sweep_mop",
        }
    }
}

impl FromStr for CleanMode {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sweep" => Ok(Self::Sweep),
            "sweep_mop" => Ok(Self::SweepMop),
            other => Err(ValueError::InvalidMode(other.to_string())),
        }
    }
}

impl fmt::Display for CleanMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
