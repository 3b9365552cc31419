// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Display metadata for binary sensors.
//!
//! Icon, device class and unique-id suffix depend only on the sensor kind and
//! its configured event type, so they are resolved once when a sensor is
//! created.

use std::fmt;

use crate::types::EventType;

/// Origin of a binary sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorKind {
    /// Derived from camera events (motion, sound, smoke, CO2).
    Camera,
    /// A Wyze Sense motion or contact sensor.
    Standalone,
}

impl SensorKind {
    /// Returns the event type to query for a sensor configured with
    /// `configured`.
    ///
    /// Standalone sensors always query [`EventType::All`], whatever their
    /// configured type.
    #[must_use]
    pub const fn query_event_type(&self, configured: EventType) -> EventType {
        match self {
            Self::Camera => configured,
            Self::Standalone => EventType::All,
        }
    }
}

/// Home-automation device class of a binary sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceClass {
    /// Motion detected.
    Motion,
    /// Sound detected.
    Sound,
    /// Gas (CO/CO2) detected.
    Gas,
    /// Smoke detected.
    Smoke,
    /// Door or window opened.
    Opening,
}

impl DeviceClass {
    /// Returns the class identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Motion => "motion",
            Self::Sound => "sound",
            Self::Gas => "gas",
            Self::Smoke => "smoke",
            Self::Opening => "opening",
        }
    }
}

impl fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed display metadata of a sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayInfo {
    /// Icon shown while the sensor is on.
    pub icon_on: &'static str,
    /// Icon shown while the sensor is off.
    pub icon_off: &'static str,
    /// Device class.
    pub device_class: DeviceClass,
    /// Appended to the device MAC to form the unique id.
    pub unique_id_suffix: &'static str,
}

impl DisplayInfo {
    /// Looks up the metadata for a sensor kind and event type.
    ///
    /// # Examples
    ///
    /// ```
    /// use wyze_sensors::sensor::{DeviceClass, DisplayInfo, SensorKind};
    /// use wyze_sensors::types::EventType;
    ///
    /// let info = DisplayInfo::lookup(SensorKind::Camera, EventType::Co2);
    /// assert_eq!(info.device_class, DeviceClass::Gas);
    /// assert_eq!(info.unique_id_suffix, "-co2");
    /// ```
    #[must_use]
    pub const fn lookup(kind: SensorKind, event_type: EventType) -> Self {
        match (kind, event_type) {
            (SensorKind::Camera, EventType::Sound) => Self {
                icon_on: "hass:music-note",
                icon_off: "hass:music-note-off",
                device_class: DeviceClass::Sound,
                unique_id_suffix: "-sound",
            },
            (SensorKind::Camera, EventType::Co2) => Self {
                icon_on: "mdi:molecule-co2",
                icon_off: "mdi:molecule-co2",
                device_class: DeviceClass::Gas,
                unique_id_suffix: "-co2",
            },
            (SensorKind::Camera, EventType::Smoke) => Self {
                icon_on: "mdi:smoking",
                icon_off: "mdi:smoking-off",
                device_class: DeviceClass::Smoke,
                unique_id_suffix: "-smoke",
            },
            (SensorKind::Standalone, EventType::Triggered) => Self {
                icon_on: "hass:door-closed",
                icon_off: "hass:door-open",
                device_class: DeviceClass::Opening,
                unique_id_suffix: "-trigger",
            },
            _ => Self::MOTION,
        }
    }

    const MOTION: Self = Self {
        icon_on: "hass:run",
        icon_off: "hass:walk",
        device_class: DeviceClass::Motion,
        unique_id_suffix: "-motion",
    };

    /// Returns the icon for the given state.
    #[must_use]
    pub const fn icon(&self, is_on: bool) -> &'static str {
        if is_on { self.icon_on } else { self.icon_off }
    }

    /// Builds the unique id for a device MAC.
    #[must_use]
    pub fn unique_id(&self, mac: &str) -> String {
        format!("{mac}{}", self.unique_id_suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camera_table() {
        let cases = [
            (EventType::Motion, DeviceClass::Motion, "-motion", "hass:run", "hass:walk"),
            (
                EventType::Sound,
                DeviceClass::Sound,
                "-sound",
                "hass:music-note",
                "hass:music-note-off",
            ),
            (EventType::Smoke, DeviceClass::Smoke, "-smoke", "mdi:smoking", "mdi:smoking-off"),
            (EventType::Co2, DeviceClass::Gas, "-co2", "mdi:molecule-co2", "mdi:molecule-co2"),
        ];

        for (event_type, class, suffix, on, off) in cases {
            let info = DisplayInfo::lookup(SensorKind::Camera, event_type);
            assert_eq!(info.device_class, class, "{event_type}");
            assert_eq!(info.unique_id_suffix, suffix, "{event_type}");
            assert_eq!(info.icon(true), on, "{event_type}");
            assert_eq!(info.icon(false), off, "{event_type}");
        }
    }

    #[test]
    fn camera_falls_back_to_motion() {
        let info = DisplayInfo::lookup(SensorKind::Camera, EventType::Triggered);
        assert_eq!(info.device_class, DeviceClass::Motion);
        assert_eq!(info.unique_id_suffix, "-motion");
    }

    #[test]
    fn standalone_table() {
        let contact = DisplayInfo::lookup(SensorKind::Standalone, EventType::Triggered);
        assert_eq!(contact.device_class, DeviceClass::Opening);
        assert_eq!(contact.unique_id("AABB"), "AABB-trigger");
        assert_eq!(contact.icon(true), "hass:door-closed");
        assert_eq!(contact.icon(false), "hass:door-open");

        let motion = DisplayInfo::lookup(SensorKind::Standalone, EventType::Motion);
        assert_eq!(motion.device_class, DeviceClass::Motion);
        assert_eq!(motion.unique_id("AABB"), "AABB-motion");
    }

    #[test]
    fn standalone_ignores_camera_types() {
        let info = DisplayInfo::lookup(SensorKind::Standalone, EventType::Sound);
        assert_eq!(info.device_class, DeviceClass::Motion);
    }

    #[test]
    fn query_event_type() {
        assert_eq!(
            SensorKind::Camera.query_event_type(EventType::Smoke),
            EventType::Smoke
        );
        assert_eq!(
            SensorKind::Standalone.query_event_type(EventType::Triggered),
            EventType::All
        );
        assert_eq!(
            SensorKind::Standalone.query_event_type(EventType::Motion),
            EventType::All
        );
    }

    #[test]
    fn device_class_display() {
        assert_eq!(DeviceClass::Gas.to_string(), "gas");
        assert_eq!(DeviceClass::Opening.to_string(), "opening");
    }
}
