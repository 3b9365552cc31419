// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device property identifiers.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// Identifier of a device property in the cloud property list.
///
/// # Examples
///
/// ```
/// use wyze_sensors::types::PropertyId;
///
/// assert_eq!("P5".parse::<PropertyId>().unwrap(), PropertyId::Available);
/// assert_eq!(PropertyId::Available.as_str(), "P5");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyId {
    /// Push notifications enabled.
    Notification,
    /// Device power.
    On,
    /// Device reachable by the cloud (`"1"` when online).
    Available,
    /// Camera siren.
    CameraSiren,
    /// Camera floodlight.
    FloodLight,
    /// Contact sensor state.
    ContactState,
    /// Motion sensor state.
    MotionState,
    /// Light brightness.
    Brightness,
    /// Light color temperature.
    ColorTemp,
    /// Light color.
    Color,
    /// Lock door state.
    DoorOpen,
}

impl PropertyId {
    /// Returns the vendor property code.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Notification => "P1",
            Self::On => "P3",
            Self::Available => "P5",
            Self::CameraSiren => "P1049",
            Self::FloodLight => "P1056",
            Self::ContactState => "P1301",
            Self::MotionState => "P1302",
            Self::Brightness => "P1501",
            Self::ColorTemp => "P1502",
            Self::Color => "P1507",
            Self::DoorOpen => "P2001",
        }
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyId {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "P1" => Ok(Self::Notification),
            "P3" => Ok(Self::On),
            "P5" => Ok(Self::Available),
            "P1049" => Ok(Self::CameraSiren),
            "P1056" => Ok(Self::FloodLight),
            "P1301" => Ok(Self::ContactState),
            "P1302" => Ok(Self::MotionState),
            "P1501" => Ok(Self::Brightness),
            "P1502" => Ok(Self::ColorTemp),
            "P1507" => Ok(Self::Color),
            "P2001" => Ok(Self::DoorOpen),
            _ => Err(ValueError::UnknownPropertyId(s.to_string())),
        }
    }
}
