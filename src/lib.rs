// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wyze Sensors - Wyze cameras and sensors as polled binary sensors.
//!
//! This library turns the devices on a Wyze account into binary sensors that
//! are "on" while a new event has been seen since the last poll.
//!
//! # Supported Sensors
//!
//! - **Cameras**: Motion (on by default), sound, smoke and CO2 detection
//! - **Wyze Sense motion sensors**: Motion
//! - **Wyze Sense contact sensors**: Open/close triggers
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use wyze_sensors::SensorOptions;
//! use wyze_sensors::client::CloudConfig;
//! use wyze_sensors::platform::{SensorPoller, setup_entry};
//!
//! #[tokio::main]
//! async fn main() -> wyze_sensors::Result<()> {
//!     let client = Arc::new(
//!         CloudConfig::new("me@example.com", "secret")
//!             .connect()
//!             .await?,
//!     );
//!
//!     let options = SensorOptions::new()
//!         .with_camera_sound(true)
//!         .with_contact_sensor(true);
//!
//!     let mut poller = SensorPoller::new();
//!     let mut events = poller.subscribe();
//!     setup_entry(&client, &options, &mut poller).await?;
//!     poller.start();
//!
//!     while let Ok(event) = events.recv().await {
//!         println!("{event:?}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Custom Cloud Access
//!
//! Sensors only depend on the [`CloudClient`] trait. Implement it to drive
//! sensors from another transport, or from fixtures in tests.

pub mod client;
pub mod error;
mod options;
pub mod platform;
pub mod sensor;
pub mod types;

pub use client::{CloudClient, with_reauth};
#[cfg(feature = "http")]
pub use client::{CloudConfig, HttpCloudClient};
pub use error::{Error, ParseError, ProtocolError, Result, ValueError};
pub use options::{
    CONF_CAM_CO2, CONF_CAM_MOTION, CONF_CAM_SMOKE, CONF_CAM_SOUND, CONF_WYZE_CONTACT,
    CONF_WYZE_MOTION, SensorOptions,
};
pub use platform::{
    EventBus, SCAN_INTERVAL, SensorEvent, SensorPoller, SensorRegistry, setup_entry,
};
pub use sensor::{BinarySensor, SensorKind, SensorState, create_sensors};
pub use types::{Device, DeviceType, Event, EventType, PropertyId, Timestamp};
