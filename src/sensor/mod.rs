// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Binary sensors derived from Wyze device events.
//!
//! A [`BinarySensor`] watches one event type of one device. Cameras can
//! produce motion, sound, smoke and CO2 sensors; Wyze Sense devices produce a
//! motion or contact sensor. [`create_sensors`] decides which sensors exist
//! from the account's device list and the [`SensorOptions`](crate::SensorOptions).
//!
//! # Examples
//!
//! ```no_run
//! use std::sync::Arc;
//! use wyze_sensors::SensorOptions;
//! use wyze_sensors::client::CloudConfig;
//! use wyze_sensors::sensor::create_sensors;
//!
//! # async fn example() -> wyze_sensors::Result<()> {
//! let client = Arc::new(CloudConfig::new("me@example.com", "pw").connect().await?);
//! let options = SensorOptions::new().with_contact_sensor(true);
//!
//! for mut sensor in create_sensors(&client, &options).await? {
//!     sensor.update().await?;
//!     println!("{}: {}", sensor.unique_id(), sensor.is_on());
//! }
//! # Ok(())
//! # }
//! ```

mod binary_sensor;
mod display;
mod factory;
mod watermark;

pub use binary_sensor::{BinarySensor, DeviceInfo, SensorState};
pub use display::{DeviceClass, DisplayInfo, SensorKind};
pub use factory::{create_sensors, sensors_for_devices};
pub use watermark::EventWatermark;

/// Integration domain used in device identifiers.
pub const DOMAIN: &str = "wyzeapi";

/// Manufacturer reported in device info.
pub const MANUFACTURER: &str = "WyzeLabs";

/// Attribution shown in state attributes.
pub const ATTRIBUTION: &str = "Data provided by Wyze";
