// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-category feature flags that decide which sensors are created.

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Option key for camera motion sensors.
pub const CONF_CAM_MOTION: &str = "cam_motion";
/// Option key for camera sound sensors.
pub const CONF_CAM_SOUND: &str = "cam_sound";
/// Option key for camera smoke alarm sensors.
pub const CONF_CAM_SMOKE: &str = "cam_smoke";
/// Option key for camera CO alarm sensors.
pub const CONF_CAM_CO2: &str = "cam_co2";
/// Option key for Wyze Sense motion sensors.
pub const CONF_WYZE_MOTION: &str = "motion_sensor";
/// Option key for Wyze Sense contact sensors.
pub const CONF_WYZE_CONTACT: &str = "contact_sensor";

/// Feature flags for sensor creation.
///
/// Every flag may be unset. Camera motion is the only sensor enabled when its
/// flag is unset; every other sensor requires an explicit `true`.
///
/// # Examples
///
/// ```
/// use wyze_sensors::SensorOptions;
///
/// let options = SensorOptions::default();
/// assert!(options.camera_motion());
/// assert!(!options.camera_sound());
///
/// let options = SensorOptions::from_json(r#"{"cam_motion": false, "contact_sensor": true}"#)
///     .unwrap();
/// assert!(!options.camera_motion());
/// assert!(options.contact_sensor());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorOptions {
    /// Camera motion sensors.
    pub cam_motion: Option<bool>,
    /// Camera sound sensors.
    pub cam_sound: Option<bool>,
    /// Camera smoke alarm sensors.
    pub cam_smoke: Option<bool>,
    /// Camera CO alarm sensors.
    pub cam_co2: Option<bool>,
    /// Wyze Sense motion sensors.
    pub motion_sensor: Option<bool>,
    /// Wyze Sense contact sensors.
    pub contact_sensor: Option<bool>,
}

impl SensorOptions {
    /// Creates options with every flag unset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options with every flag set to `true`.
    #[must_use]
    pub fn all_enabled() -> Self {
        Self {
            cam_motion: Some(true),
            cam_sound: Some(true),
            cam_smoke: Some(true),
            cam_co2: Some(true),
            motion_sensor: Some(true),
            contact_sensor: Some(true),
        }
    }

    /// Parses options from a JSON object keyed by the option names.
    ///
    /// Missing keys leave the flag unset; `null` is treated as unset.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Json` if the input is not a valid options object.
    pub fn from_json(json: &str) -> Result<Self, ParseError> {
        serde_json::from_str(json).map_err(ParseError::from)
    }

    /// Sets the camera motion flag.
    #[must_use]
    pub fn with_camera_motion(mut self, enabled: bool) -> Self {
        self.cam_motion = Some(enabled);
        self
    }

    /// Sets the camera sound flag.
    #[must_use]
    pub fn with_camera_sound(mut self, enabled: bool) -> Self {
        self.cam_sound = Some(enabled);
        self
    }

    /// Sets the camera smoke flag.
    #[must_use]
    pub fn with_camera_smoke(mut self, enabled: bool) -> Self {
        self.cam_smoke = Some(enabled);
        self
    }

    /// Sets the camera CO2 flag.
    #[must_use]
    pub fn with_camera_co2(mut self, enabled: bool) -> Self {
        self.cam_co2 = Some(enabled);
        self
    }

    /// Sets the motion sensor flag.
    #[must_use]
    pub fn with_motion_sensor(mut self, enabled: bool) -> Self {
        self.motion_sensor = Some(enabled);
        self
    }

    /// Sets the contact sensor flag.
    #[must_use]
    pub fn with_contact_sensor(mut self, enabled: bool) -> Self {
        self.contact_sensor = Some(enabled);
        self
    }

    /// Camera motion sensors are enabled unless explicitly turned off.
    #[must_use]
    pub fn camera_motion(&self) -> bool {
        self.cam_motion.unwrap_or(true)
    }

    /// Returns whether camera sound sensors are enabled.
    #[must_use]
    pub fn camera_sound(&self) -> bool {
        self.cam_sound.unwrap_or(false)
    }

    /// Returns whether camera smoke sensors are enabled.
    #[must_use]
    pub fn camera_smoke(&self) -> bool {
        self.cam_smoke.unwrap_or(false)
    }

    /// Returns whether camera CO2 sensors are enabled.
    #[must_use]
    pub fn camera_co2(&self) -> bool {
        self.cam_co2.unwrap_or(false)
    }

    /// Returns whether motion sensors are enabled.
    #[must_use]
    pub fn motion_sensor(&self) -> bool {
        self.motion_sensor.unwrap_or(false)
    }

    /// Returns whether contact sensors are enabled.
    #[must_use]
    pub fn contact_sensor(&self) -> bool {
        self.contact_sensor.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_enable_only_camera_motion() {
        let options = SensorOptions::new();
        assert!(options.camera_motion());
        assert!(!options.camera_sound());
        assert!(!options.camera_smoke());
        assert!(!options.camera_co2());
        assert!(!options.motion_sensor());
        assert!(!options.contact_sensor());
    }

    #[test]
    fn explicit_false_disables_camera_motion() {
        let options = SensorOptions::new().with_camera_motion(false);
        assert!(!options.camera_motion());
    }

    #[test]
    fn all_enabled() {
        let options = SensorOptions::all_enabled();
        assert!(options.camera_motion());
        assert!(options.camera_sound());
        assert!(options.camera_smoke());
        assert!(options.camera_co2());
        assert!(options.motion_sensor());
        assert!(options.contact_sensor());
    }

    #[test]
    fn from_json_uses_option_keys() {
        let json = format!(
            r#"{{"{CONF_CAM_SOUND}": true, "{CONF_WYZE_MOTION}": true, "{CONF_CAM_MOTION}": null}}"#
        );
        let options = SensorOptions::from_json(&json).unwrap();
        assert!(options.camera_sound());
        assert!(options.motion_sensor());
        assert!(options.camera_motion());
        assert_eq!(options.cam_motion, None);
    }

    #[test]
    fn from_json_rejects_non_boolean() {
        let result = SensorOptions::from_json(r#"{"cam_co2": "yes"}"#);
        assert!(matches!(result, Err(ParseError::Json(_))));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let options = SensorOptions::from_json(r#"{"scan_interval": 30}"#).unwrap();
        assert_eq!(options, SensorOptions::new());
    }

    #[test]
    fn serializes_with_option_keys() {
        let value = serde_json::to_value(SensorOptions::new().with_contact_sensor(true)).unwrap();
        assert_eq!(value[CONF_WYZE_CONTACT], serde_json::json!(true));
        assert!(value[CONF_CAM_SMOKE].is_null());
    }
}
