// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Creates sensors for the devices on an account.

use std::sync::Arc;

use super::BinarySensor;
use crate::client::{CloudClient, with_reauth};
use crate::error::Result;
use crate::options::SensorOptions;
use crate::types::{Device, DeviceType, EventType};

/// Lists the account's devices and creates every enabled sensor.
///
/// The device list is fetched again once after re-authenticating when the
/// access token was rejected.
///
/// # Errors
///
/// Returns error if the device list cannot be fetched.
pub async fn create_sensors<C: CloudClient>(
    client: &Arc<C>,
    options: &SensorOptions,
) -> Result<Vec<BinarySensor<C>>> {
    let devices = with_reauth(client.as_ref(), || client.get_devices()).await?;
    Ok(sensors_for_devices(client, devices, options))
}

/// Creates the enabled sensors for an already fetched device list.
///
/// Devices with an unrecognized product type are logged and skipped.
#[must_use]
pub fn sensors_for_devices<C: CloudClient>(
    client: &Arc<C>,
    devices: Vec<Device>,
    options: &SensorOptions,
) -> Vec<BinarySensor<C>> {
    let mut sensors = Vec::new();

    for device in devices {
        let device_type = match device.device_type() {
            Ok(device_type) => device_type,
            Err(err) => {
                tracing::warn!(
                    mac = %device.mac,
                    nickname = %device.nickname,
                    error = %err,
                    "Skipping device with unrecognized product type"
                );
                continue;
            }
        };

        match device_type {
            DeviceType::Camera => {
                let enabled = [
                    (options.camera_motion(), EventType::Motion),
                    (options.camera_sound(), EventType::Sound),
                    (options.camera_smoke(), EventType::Smoke),
                    (options.camera_co2(), EventType::Co2),
                ];
                for (_, event_type) in enabled.into_iter().filter(|(on, _)| *on) {
                    sensors.push(BinarySensor::camera(
                        Arc::clone(client),
                        device.clone(),
                        event_type,
                    ));
                }
            }
            DeviceType::MotionSensor if options.motion_sensor() => {
                sensors.push(BinarySensor::standalone(
                    Arc::clone(client),
                    device,
                    EventType::Motion,
                ));
            }
            DeviceType::ContactSensor if options.contact_sensor() => {
                sensors.push(BinarySensor::standalone(
                    Arc::clone(client),
                    device,
                    EventType::Triggered,
                ));
            }
            other => {
                tracing::debug!(
                    mac = %device.mac,
                    device_type = %other,
                    "No binary sensor for device"
                );
            }
        }
    }

    tracing::debug!(count = sensors.len(), "Created binary sensors");
    sensors
}
