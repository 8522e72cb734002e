// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bounded numeric clean parameters: water level, fan level, clean times.
//!
//! Constructors take `i64` because these values typically arrive from a
//! parameter store as coerced floats; range checking happens before any
//! narrowing.

use std::fmt;

use crate::error::ValueError;

/// Mopping water level (1-2).
///
/// # Examples
///
/// ```
/// use scnr_lib::types::WaterLevel;
///
/// let level = WaterLevel::new(2).unwrap();
/// assert_eq!(level.value(), 2);
///
/// assert!(WaterLevel::new(3).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WaterLevel(u8);

impl WaterLevel {
    /// Minimum water level.
    pub const MIN: u8 = 1;

    /// Maximum water level.
    pub const MAX: u8 = 2;

    /// Low water output.
    pub const LOW: Self = Self(1);

    /// High water output.
    pub const HIGH: Self = Self(2);

    /// Creates a new water level.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if the value is outside [1, 2].
    pub fn new(value: i64) -> Result<Self, ValueError> {
        if !(i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            return Err(ValueError::OutOfRange {
                name: "water_level",
                min: Self::MIN,
                max: Self::MAX,
                actual: value,
            });
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Ok(Self(value as u8))
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for WaterLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for WaterLevel {
    type Error = ValueError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Suction fan level (1-4).
///
/// # Examples
///
/// ```
/// use scnr_lib::types::FanLevel;
///
/// let level = FanLevel::new(4).unwrap();
/// assert_eq!(level.value(), 4);
///
/// assert!(FanLevel::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FanLevel(u8);

impl FanLevel {
    /// Minimum fan level.
    pub const MIN: u8 = 1;

    /// Maximum fan level.
    pub const MAX: u8 = 4;

    /// Creates a new fan level.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if the value is outside [1, 4].
    pub fn new(value: i64) -> Result<Self, ValueError> {
        if !(i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            return Err(ValueError::OutOfRange {
                name: "fan_level",
                min: Self::MIN,
                max: Self::MAX,
                actual: value,
            });
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Ok(Self(value as u8))
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for FanLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for FanLevel {
    type Error = ValueError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Number of cleaning passes over the room (1-2).
///
/// # Examples
///
/// ```
/// use scnr_lib::types::CleanTimes;
///
/// let times = CleanTimes::ONCE;
/// assert_eq!(times.value(), 1);
///
/// assert!(CleanTimes::new(5).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CleanTimes(u8);

impl CleanTimes {
    /// Minimum number of passes.
    pub const MIN: u8 = 1;

    /// Maximum number of passes.
    pub const MAX: u8 = 2;

    /// A single cleaning pass.
    pub const ONCE: Self = Self(1);

    /// Two cleaning passes.
    pub const TWICE: Self = Self(2);

    /// Creates a new pass count.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if the value is outside [1, 2].
    pub fn new(value: i64) -> Result<Self, ValueError> {
        if !(i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            return Err(ValueError::OutOfRange {
                name: "clean_times",
                min: Self::MIN,
                max: Self::MAX,
                actual: value,
            });
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Ok(Self(value as u8))
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for CleanTimes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for CleanTimes {
    type Error = ValueError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn water_level_range() {
        assert_eq!(WaterLevel::new(1).unwrap().value(), 1);
        assert_eq!(WaterLevel::new(2).unwrap().value(), 2);
        assert!(WaterLevel::new(0).is_err());
        assert!(WaterLevel::new(3).is_err());
    }

    #[test]
    fn fan_level_range() {
        for v in 1..=4 {
            assert_eq!(i64::from(FanLevel::new(v).unwrap().value()), v);
        }
        assert!(FanLevel::new(0).is_err());
        assert!(FanLevel::new(5).is_err());
    }

    #[test]
    fn clean_times_range() {
        assert_eq!(CleanTimes::new(1).unwrap(), CleanTimes::ONCE);
        assert_eq!(CleanTimes::new(2).unwrap(), CleanTimes::TWICE);
        assert!(CleanTimes::new(3).is_err());
    }

    #[test]
    fn out_of_range_error_names_parameter() {
        let err = FanLevel::new(9).unwrap_err();
        assert_eq!(
            err,
            ValueError::OutOfRange {
                name: "fan_level",
                min: 1,
                max: 4,
                actual: 9,
            }
        );
    }

    #[test]
    fn negative_value_rejected() {
        let err = WaterLevel::new(-1).unwrap_err();
        assert!(matches!(err, ValueError::OutOfRange { actual: -1, .. }));
    }

    #[test]
    fn level_ordering() {
        assert!(WaterLevel::LOW < WaterLevel::HIGH);
        assert!(FanLevel::new(1).unwrap() < FanLevel::new(4).unwrap());
    }
}
