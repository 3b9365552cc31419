// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sensor registration and polling.
//!
//! [`setup_entry`] creates the sensors for an account and hands them to a
//! [`SensorRegistry`]. The bundled [`SensorPoller`] is a registry that polls
//! each sensor every [`SCAN_INTERVAL`] and broadcasts [`SensorEvent`]s on
//! an [`EventBus`].

mod event;
mod event_bus;
mod poller;

pub use event::SensorEvent;
pub use event_bus::EventBus;
pub use poller::SensorPoller;

use std::sync::Arc;
use std::time::Duration;

use crate::client::CloudClient;
use crate::error::Result;
use crate::options::SensorOptions;
use crate::sensor::{BinarySensor, create_sensors};

/// How often each sensor is polled.
pub const SCAN_INTERVAL: Duration = Duration::from_secs(20);

/// Receives newly created sensors.
pub trait SensorRegistry<C> {
    /// Registers sensors.
    ///
    /// With `update_before_add` set, each sensor is polled once before its
    /// state is first reported.
    fn add_sensors(&mut self, sensors: Vec<BinarySensor<C>>, update_before_add: bool);
}

/// Creates every enabled sensor for the account and registers them.
///
/// Returns the number of sensors registered.
///
/// # Errors
///
/// Returns error if the device list cannot be fetched.
pub async fn setup_entry<C, R>(
    client: &Arc<C>,
    options: &SensorOptions,
    registry: &mut R,
) -> Result<usize>
where
    C: CloudClient,
    R: SensorRegistry<C>,
{
    let sensors = create_sensors(client, options).await?;
    let count = sensors.len();
    tracing::info!(count, "Registering binary sensors");
    registry.add_sensors(sensors, true);
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Device, Event, EventType, PropertyId};

    struct OneCamera;

    impl CloudClient for OneCamera {
        async fn get_devices(&self) -> Result<Vec<Device>> {
            Ok(vec![Device::new("CAM1", "Garage", "Camera", "WYZEC1-JZ")])
        }

        async fn get_info(&self, _device: &Device) -> Result<Vec<(PropertyId, String)>> {
            Ok(Vec::new())
        }

        async fn get_latest_event(
            &self,
            _device: &Device,
            _event_type: EventType,
        ) -> Result<Option<Event>> {
            Ok(None)
        }

        async fn reauthenticate(&self) -> Result<()> {
            Ok(())
        }
    }

    #[derive(Default)]
    struct Collect {
        ids: Vec<String>,
        update_before_add: Option<bool>,
    }

    impl<C> SensorRegistry<C> for Collect {
        fn add_sensors(&mut self, sensors: Vec<BinarySensor<C>>, update_before_add: bool) {
            self.ids
                .extend(sensors.iter().map(|sensor| sensor.unique_id().to_string()));
            self.update_before_add = Some(update_before_add);
        }
    }

    #[tokio::test]
    async fn setup_entry_registers_with_update_before_add() {
        let mut registry = Collect::default();
        let options = SensorOptions::new().with_camera_sound(true);

        let count = setup_entry(&Arc::new(OneCamera), &options, &mut registry)
            .await
            .unwrap();

        assert_eq!(count, 2);
        assert_eq!(registry.ids, vec!["CAM1-motion", "CAM1-sound"]);
        assert_eq!(registry.update_before_add, Some(true));
    }
}
