// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The polled binary sensor.

use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};

use super::display::{DeviceClass, DisplayInfo, SensorKind};
use super::watermark::EventWatermark;
use super::{ATTRIBUTION, DOMAIN, MANUFACTURER};
use crate::client::{CloudClient, with_reauth};
use crate::error::Result;
use crate::types::{Device, EventType, PropertyId, Timestamp};

/// Device registry entry shared by every sensor of one device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceInfo {
    /// `(domain, mac)` pairs identifying the device.
    pub identifiers: Vec<(String, String)>,
    /// Display name.
    pub name: String,
    /// Manufacturer name.
    pub manufacturer: String,
    /// Product model.
    pub model: String,
}

/// Point-in-time view of a sensor's state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SensorState {
    /// Unique id of the sensor.
    pub unique_id: String,
    /// Whether a new event was seen on the last poll.
    pub is_on: bool,
    /// Whether the device was reported reachable.
    pub available: bool,
    /// Timestamp of the last observed event.
    pub last_event: Timestamp,
}

/// A binary sensor derived from one event type of one device.
///
/// Each poll ([`update`](Self::update)) refreshes availability from the
/// device properties and turns the sensor on when the latest event is newer
/// than any seen before.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use wyze_sensors::client::CloudConfig;
/// use wyze_sensors::sensor::BinarySensor;
/// use wyze_sensors::types::{Device, EventType};
///
/// # async fn example() -> wyze_sensors::Result<()> {
/// let client = Arc::new(CloudConfig::new("me@example.com", "pw").connect().await?);
/// let device = Device::new("2CAA8E000001", "Porch", "Camera", "WYZE_CAKP2JFUS");
///
/// let mut sensor = BinarySensor::camera(client, device, EventType::Sound);
/// sensor.update().await?;
/// println!("{} is_on={}", sensor.unique_id(), sensor.is_on());
/// # Ok(())
/// # }
/// ```
pub struct BinarySensor<C> {
    client: Arc<C>,
    device: Device,
    event_type: EventType,
    kind: SensorKind,
    display: DisplayInfo,
    unique_id: String,
    is_on: bool,
    available: bool,
    watermark: EventWatermark,
}

impl<C> std::fmt::Debug for BinarySensor<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BinarySensor")
            .field("unique_id", &self.unique_id)
            .field("kind", &self.kind)
            .field("event_type", &self.event_type)
            .field("is_on", &self.is_on)
            .field("available", &self.available)
            .field("last_event", &self.watermark.last_event())
            .finish_non_exhaustive()
    }
}

impl<C: CloudClient> BinarySensor<C> {
    /// Creates a sensor of the given kind.
    ///
    /// The watermark starts at the current time, so events that happened
    /// before the sensor existed do not turn it on at the first poll.
    #[must_use]
    pub fn new(client: Arc<C>, device: Device, event_type: EventType, kind: SensorKind) -> Self {
        let display = DisplayInfo::lookup(kind, event_type);
        let unique_id = display.unique_id(&device.mac);
        Self {
            client,
            device,
            event_type,
            kind,
            display,
            unique_id,
            is_on: false,
            available: false,
            watermark: EventWatermark::new(),
        }
    }

    /// Creates a camera-derived sensor.
    #[must_use]
    pub fn camera(client: Arc<C>, device: Device, event_type: EventType) -> Self {
        Self::new(client, device, event_type, SensorKind::Camera)
    }

    /// Creates a Wyze Sense sensor.
    #[must_use]
    pub fn standalone(client: Arc<C>, device: Device, event_type: EventType) -> Self {
        Self::new(client, device, event_type, SensorKind::Standalone)
    }

    /// Replaces the starting watermark.
    #[must_use]
    pub fn with_last_event(mut self, last_event: Timestamp) -> Self {
        self.watermark = EventWatermark::starting_at(last_event);
        self
    }

    /// Polls the cloud and refreshes the sensor state.
    ///
    /// The property fetch is retried once after re-authenticating when the
    /// access token was rejected. Availability is only touched when the
    /// device reports the availability property.
    ///
    /// # Errors
    ///
    /// Returns error if the property fetch fails twice, re-authentication
    /// fails, or the event lookup fails.
    pub async fn update(&mut self) -> Result<()> {
        let client = self.client.as_ref();
        let device = &self.device;

        let properties = with_reauth(client, || client.get_info(device)).await?;
        for (property, value) in &properties {
            if *property == PropertyId::Available {
                self.available = value == "1";
            }
        }

        let query = self.kind.query_event_type(self.event_type);
        let latest = client.get_latest_event(device, query).await?;
        self.is_on = self.watermark.observe(latest.as_ref());

        tracing::debug!(
            unique_id = %self.unique_id,
            is_on = self.is_on,
            available = self.available,
            last_event = %self.watermark.last_event(),
            "Sensor updated"
        );

        Ok(())
    }
}

impl<C> BinarySensor<C> {
    /// Returns the unique id (`{mac}{suffix}`).
    #[must_use]
    pub fn unique_id(&self) -> &str {
        &self.unique_id
    }

    /// Returns the display name (the device nickname).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.device.nickname
    }

    /// Returns the icon for the current state.
    #[must_use]
    pub fn icon(&self) -> &'static str {
        self.display.icon(self.is_on)
    }

    /// Returns the device class.
    #[must_use]
    pub fn device_class(&self) -> DeviceClass {
        self.display.device_class
    }

    /// Returns whether a new event was seen on the last poll.
    #[must_use]
    pub fn is_on(&self) -> bool {
        self.is_on
    }

    /// Returns whether the device was last reported reachable.
    #[must_use]
    pub fn available(&self) -> bool {
        self.available
    }

    /// Returns the timestamp of the last observed event.
    #[must_use]
    pub fn last_event(&self) -> Timestamp {
        self.watermark.last_event()
    }

    /// Returns the configured event type.
    #[must_use]
    pub fn event_type(&self) -> EventType {
        self.event_type
    }

    /// Returns the sensor kind.
    #[must_use]
    pub fn kind(&self) -> SensorKind {
        self.kind
    }

    /// Returns the underlying device.
    #[must_use]
    pub fn device(&self) -> &Device {
        &self.device
    }

    /// Returns the device registry entry.
    #[must_use]
    pub fn device_info(&self) -> DeviceInfo {
        DeviceInfo {
            identifiers: vec![(DOMAIN.to_string(), self.device.mac.clone())],
            name: self.device.nickname.clone(),
            manufacturer: MANUFACTURER.to_string(),
            model: self.device.product_model.clone(),
        }
    }

    /// Returns the state attributes shown alongside the sensor.
    #[must_use]
    pub fn state_attributes(&self) -> Map<String, Value> {
        let mut attributes = Map::new();
        attributes.insert("attribution".into(), ATTRIBUTION.into());
        attributes.insert("state".into(), self.is_on.into());
        attributes.insert("available".into(), self.available.into());
        attributes.insert("device model".into(), self.device.product_model.clone().into());
        attributes.insert("mac".into(), self.unique_id.clone().into());
        attributes
    }

    /// Returns signal strength and battery attributes of Wyze Sense devices.
    ///
    /// Camera sensors return `None`. Missing parameters are reported as
    /// `null`.
    #[must_use]
    pub fn extra_state_attributes(&self) -> Option<Map<String, Value>> {
        if self.kind != SensorKind::Standalone {
            return None;
        }

        let param = |key: &str| self.device.param(key).cloned().unwrap_or(Value::Null);

        let mut attributes = Map::new();
        attributes.insert("device_model".into(), self.device.product_model.clone().into());
        attributes.insert("rssi".into(), param("rssi"));
        attributes.insert("voltage".into(), param("voltage"));
        attributes.insert("mac".into(), self.device.mac.clone().into());
        Some(attributes)
    }

    /// Returns a snapshot of the current state.
    #[must_use]
    pub fn snapshot(&self) -> SensorState {
        SensorState {
            unique_id: self.unique_id.clone(),
            is_on: self.is_on,
            available: self.available,
            last_event: self.watermark.last_event(),
        }
    }
}
