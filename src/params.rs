// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Externally-owned clean parameters.
//!
//! The five inputs of a clean command (room, mode, water level, fan level,
//! clean times) are owned by settings providers outside this library, such
//! as the select and number controls of a home-automation host. This module
//! defines the contract through which the
//! [`ReadinessPoller`](crate::ReadinessPoller) reads their current values.
//!
//! Store values are loosely shaped: hosts commonly hand numbers over as
//! floats or as strings like `"2.0"`. [`ParameterValue`] carries both shapes
//! and performs the strict integer coercion the wire payload needs.

use std::fmt;

use crate::error::ValueError;

/// The five named clean parameters.
///
/// # Examples
///
/// ```
/// use scnr_lib::params::Parameter;
///
/// assert_eq!(Parameter::WaterLevel.as_str(), "water_level");
/// assert_eq!(Parameter::ALL.len(), 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parameter {
    /// The room to clean.
    Room,
    /// The cleaning mode.
    Mode,
    /// The mopping water level.
    WaterLevel,
    /// The suction fan level.
    FanLevel,
    /// The number of cleaning passes.
    CleanTimes,
}

impl Parameter {
    /// All five parameters, in resolution order.
    pub const ALL: [Self; 5] = [
        Self::Room,
        Self::Mode,
        Self::WaterLevel,
        Self::FanLevel,
        Self::CleanTimes,
    ];

    /// Returns the canonical name of this parameter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Room => "room",
            Self::Mode => "mode",
            Self::WaterLevel => "water_level",
            Self::FanLevel => "fan_level",
            Self::CleanTimes => "clean_times",
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A current value read from a parameter store.
///
/// # Examples
///
/// ```
/// use scnr_lib::params::{Parameter, ParameterValue};
///
/// // Hosts report numbers as floats; "2.0" still means 2.
/// let value = ParameterValue::text("2.0");
/// assert_eq!(value.into_int(Parameter::WaterLevel).unwrap(), 2);
///
/// let value = ParameterValue::text("abc");
/// assert!(value.into_int(Parameter::WaterLevel).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterValue {
    /// A textual value.
    Text(String),
    /// A numeric value.
    Number(f64),
}

impl ParameterValue {
    /// Creates a textual value.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Creates a numeric value.
    #[must_use]
    pub fn number(value: f64) -> Self {
        Self::Number(value)
    }

    /// Extracts the value as text.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::NotText` if the value is numeric.
    pub fn into_text(self, parameter: Parameter) -> Result<String, ValueError> {
        match self {
            Self::Text(value) => Ok(value),
            Self::Number(_) => Err(ValueError::NotText {
                name: parameter.as_str(),
            }),
        }
    }

    /// Coerces the value to an integer.
    ///
    /// Textual values are parsed as floats first, so `"1.0"` coerces to `1`.
    /// Fractional or non-numeric values are a data-shape bug in the store,
    /// not a transient condition, and are rejected.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::NotNumeric` if the value does not represent an
    /// integer.
    pub fn into_int(self, parameter: Parameter) -> Result<i64, ValueError> {
        match self {
            Self::Text(value) => {
                let parsed: f64 =
                    value
                        .trim()
                        .parse()
                        .map_err(|_| ValueError::NotNumeric {
                            name: parameter.as_str(),
                            value: value.clone(),
                        })?;
                float_to_int(parameter, parsed, &value)
            }
            Self::Number(value) => float_to_int(parameter, value, &value.to_string()),
        }
    }
}

fn float_to_int(parameter: Parameter, value: f64, original: &str) -> Result<i64, ValueError> {
    #[allow(clippy::cast_precision_loss)]
    let representable = value.is_finite()
        && value.fract() == 0.0
        && value >= i64::MIN as f64
        && value <= i64::MAX as f64;
    if !representable {
        return Err(ValueError::NotNumeric {
            name: parameter.as_str(),
            value: original.to_string(),
        });
    }
    #[allow(clippy::cast_possible_truncation)]
    Ok(value as i64)
}

/// Read access to the externally-owned clean parameters.
///
/// Implemented by the host embedding this library. Each parameter is
/// independently settable by an operator and independently possibly-absent
/// until its control has been initialized, so `get` returns `None` rather
/// than a default for anything not yet known.
pub trait ParameterStore: Send + Sync {
    /// Returns the current value of `parameter` for the device, or `None`
    /// if the value is not (yet) available.
    fn get(&self, device_id: &str, parameter: Parameter) -> Option<ParameterValue>;
}
