// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device records and product types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::ValueError;

/// Product category reported by the cloud for each device.
///
/// Only cameras, motion sensors and contact sensors produce binary sensors;
/// the remaining variants exist so that those devices are recognized and
/// skipped quietly.
///
/// # Examples
///
/// ```
/// use wyze_sensors::types::DeviceType;
///
/// let camera: DeviceType = "Camera".parse().unwrap();
/// assert_eq!(camera, DeviceType::Camera);
/// assert!("Toaster".parse::<DeviceType>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceType {
    /// Wyze Cam (all generations).
    Camera,
    /// Wyze Sense motion sensor.
    MotionSensor,
    /// Wyze Sense contact sensor.
    ContactSensor,
    /// Bulb.
    Light,
    /// Color bulb.
    MeshLight,
    /// Indoor plug.
    Plug,
    /// Outdoor plug.
    OutdoorPlug,
    /// Lock.
    Lock,
    /// Lock gateway.
    Gateway,
    /// Sense bridge.
    BaseStation,
    /// Doorbell chime.
    ChimeSensor,
    /// Thermostat.
    Thermostat,
    /// Scale.
    Scale,
    /// Band or watch.
    Wrist,
    /// Generic account-level object.
    Common,
}

impl DeviceType {
    /// Returns the product type code used by the cloud.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Camera => "Camera",
            Self::MotionSensor => "MotionSensor",
            Self::ContactSensor => "ContactSensor",
            Self::Light => "Light",
            Self::MeshLight => "MeshLight",
            Self::Plug => "Plug",
            Self::OutdoorPlug => "OutdoorPlug",
            Self::Lock => "Lock",
            Self::Gateway => "gateway",
            Self::BaseStation => "BaseStation",
            Self::ChimeSensor => "ChimeSensor",
            Self::Thermostat => "Thermostat",
            Self::Scale => "WyzeScale",
            Self::Wrist => "Wrist",
            Self::Common => "Common",
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceType {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Camera" => Ok(Self::Camera),
            "MotionSensor" => Ok(Self::MotionSensor),
            "ContactSensor" => Ok(Self::ContactSensor),
            "Light" => Ok(Self::Light),
            "MeshLight" => Ok(Self::MeshLight),
            "Plug" => Ok(Self::Plug),
            "OutdoorPlug" => Ok(Self::OutdoorPlug),
            "Lock" => Ok(Self::Lock),
            "gateway" => Ok(Self::Gateway),
            "BaseStation" => Ok(Self::BaseStation),
            "ChimeSensor" => Ok(Self::ChimeSensor),
            "Thermostat" => Ok(Self::Thermostat),
            "WyzeScale" => Ok(Self::Scale),
            "Wrist" => Ok(Self::Wrist),
            "Common" => Ok(Self::Common),
            _ => Err(ValueError::UnknownDeviceType(s.to_string())),
        }
    }
}

/// A device as listed by the cloud.
///
/// Field names follow the cloud's JSON so a device list entry deserializes
/// directly. Unknown fields are ignored. Only `mac` and `product_type` are
/// required; the other fields fall back to empty when missing or `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    /// Hardware address; also the stable identifier.
    pub mac: String,
    /// User-assigned display name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub nickname: String,
    /// Product type code (see [`DeviceType`]).
    pub product_type: String,
    /// Product model code, e.g. `WYZE_CAKP2JFUS`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub product_model: String,
    /// Vendor-specific parameters such as `rssi` and `voltage`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub device_params: Map<String, Value>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Device {
    /// Creates a device record with no parameters.
    #[must_use]
    pub fn new(
        mac: impl Into<String>,
        nickname: impl Into<String>,
        product_type: impl Into<String>,
        product_model: impl Into<String>,
    ) -> Self {
        Self {
            mac: mac.into(),
            nickname: nickname.into(),
            product_type: product_type.into(),
            product_model: product_model.into(),
            device_params: Map::new(),
        }
    }

    /// Adds a vendor parameter.
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.device_params.insert(key.into(), value.into());
        self
    }

    /// Classifies the device by its product type code.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::UnknownDeviceType` for unrecognized codes.
    pub fn device_type(&self) -> Result<DeviceType, ValueError> {
        self.product_type.parse()
    }

    /// Returns a vendor parameter by name.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&Value> {
        self.device_params.get(key)
    }
}
