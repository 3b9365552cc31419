// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for Wyze cloud records.
//!
//! # Types
//!
//! - [`Device`] - A device record from the cloud device list
//! - [`DeviceType`] - Product category used to pick sensors
//! - [`Event`] - A single event record
//! - [`EventType`] - Event category (motion, sound, smoke, CO2, trigger, all)
//! - [`PropertyId`] - Property identifiers in the property list
//! - [`Timestamp`] - Milliseconds since the Unix epoch

mod device;
mod event;
mod property;
mod timestamp;

pub use device::{Device, DeviceType};
pub use event::{Event, EventType};
pub use property::PropertyId;
pub use timestamp::Timestamp;
