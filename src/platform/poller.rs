// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Periodic polling of registered sensors.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::{EventBus, SCAN_INTERVAL, SensorEvent, SensorRegistry};
use crate::client::CloudClient;
use crate::sensor::{BinarySensor, SensorState};

type StateMap = Arc<RwLock<HashMap<String, SensorState>>>;

/// Polls every registered sensor on a fixed interval.
///
/// Each sensor runs on its own task and is the only owner of its state, so
/// sensors never wait on each other. The latest [`SensorState`] of every
/// sensor is kept for queries, and changes are broadcast as
/// [`SensorEvent`]s.
///
/// A failed poll marks the sensor unavailable until its next successful poll.
///
/// Sensors registered with `update_before_add` are polled once before they
/// are added: their [`SensorEvent::SensorAdded`] is published and their state
/// becomes visible only after that first poll. Other sensors are added
/// immediately with their initial state.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use wyze_sensors::SensorOptions;
/// use wyze_sensors::client::CloudConfig;
/// use wyze_sensors::platform::{SensorPoller, setup_entry};
///
/// # async fn example() -> wyze_sensors::Result<()> {
/// let client = Arc::new(CloudConfig::new("me@example.com", "pw").connect().await?);
/// let mut poller = SensorPoller::new();
/// let mut events = poller.subscribe();
///
/// setup_entry(&client, &SensorOptions::new(), &mut poller).await?;
/// poller.start();
///
/// while let Ok(event) = events.recv().await {
///     println!("{event:?}");
/// }
/// # Ok(())
/// # }
/// ```
pub struct SensorPoller<C> {
    interval: Duration,
    pending: Vec<(BinarySensor<C>, bool)>,
    registered: usize,
    states: StateMap,
    event_bus: EventBus,
    tasks: Vec<JoinHandle<()>>,
}

impl<C> std::fmt::Debug for SensorPoller<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SensorPoller")
            .field("interval", &self.interval)
            .field("pending", &self.pending.len())
            .field("running", &self.tasks.len())
            .finish_non_exhaustive()
    }
}

impl<C: CloudClient + 'static> SensorPoller<C> {
    /// Creates a poller using [`SCAN_INTERVAL`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            interval: SCAN_INTERVAL,
            pending: Vec::new(),
            registered: 0,
            states: Arc::new(RwLock::new(HashMap::new())),
            event_bus: EventBus::new(),
            tasks: Vec::new(),
        }
    }

    /// Sets the polling interval.
    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Returns the polling interval.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Subscribes to sensor events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SensorEvent> {
        self.event_bus.subscribe()
    }

    /// Returns the number of registered sensors, including those not yet
    /// added.
    #[must_use]
    pub fn sensor_count(&self) -> usize {
        self.registered
    }

    /// Returns the latest state of an added sensor.
    #[must_use]
    pub fn state(&self, unique_id: &str) -> Option<SensorState> {
        self.states.read().get(unique_id).cloned()
    }

    /// Returns the latest state of every added sensor.
    #[must_use]
    pub fn states(&self) -> HashMap<String, SensorState> {
        self.states.read().clone()
    }

    /// Returns `true` while poll tasks are running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.tasks.iter().any(|task| !task.is_finished())
    }

    /// Spawns a poll task for every sensor registered since the last call.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self) {
        let interval = self.interval;
        for (sensor, update_before_add) in self.pending.drain(..) {
            tracing::debug!(
                unique_id = %sensor.unique_id(),
                ?interval,
                "Starting sensor poll task"
            );
            let task = tokio::spawn(poll_loop(
                sensor,
                update_before_add,
                interval,
                Arc::clone(&self.states),
                self.event_bus.clone(),
            ));
            self.tasks.push(task);
        }
    }

    /// Stops every poll task.
    pub fn shutdown(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
        tracing::debug!("Sensor poller stopped");
    }
}

impl<C: CloudClient + 'static> Default for SensorPoller<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Drop for SensorPoller<C> {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}

impl<C: CloudClient + 'static> SensorRegistry<C> for SensorPoller<C> {
    fn add_sensors(&mut self, sensors: Vec<BinarySensor<C>>, update_before_add: bool) {
        for sensor in sensors {
            if !update_before_add {
                add_sensor(sensor.snapshot(), &self.states, &self.event_bus);
            }
            self.registered += 1;
            self.pending.push((sensor, update_before_add));
        }
    }
}

async fn poll_loop<C: CloudClient>(
    mut sensor: BinarySensor<C>,
    update_before_add: bool,
    period: Duration,
    states: StateMap,
    event_bus: EventBus,
) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    // The first tick completes immediately
    ticker.tick().await;
    if update_before_add {
        let state = refresh(&mut sensor, &event_bus).await;
        add_sensor(state, &states, &event_bus);
    }

    loop {
        ticker.tick().await;
        poll_once(&mut sensor, &states, &event_bus).await;
    }
}

fn add_sensor(state: SensorState, states: &StateMap, event_bus: &EventBus) {
    let unique_id = state.unique_id.clone();
    states.write().insert(unique_id.clone(), state);
    event_bus.publish(SensorEvent::sensor_added(unique_id));
}

/// Updates one sensor. A failure is published and reported as unavailable.
async fn refresh<C: CloudClient>(
    sensor: &mut BinarySensor<C>,
    event_bus: &EventBus,
) -> SensorState {
    match sensor.update().await {
        Ok(()) => sensor.snapshot(),
        Err(err) => {
            let unique_id = sensor.unique_id();
            tracing::warn!(unique_id = %unique_id, error = %err, "Sensor update failed");
            event_bus.publish(SensorEvent::poll_failed(unique_id, err.to_string()));
            SensorState {
                available: false,
                ..sensor.snapshot()
            }
        }
    }
}

/// Updates one sensor and publishes what changed.
async fn poll_once<C: CloudClient>(
    sensor: &mut BinarySensor<C>,
    states: &StateMap,
    event_bus: &EventBus,
) {
    let unique_id = sensor.unique_id().to_string();
    let previous = states.read().get(&unique_id).cloned();
    let current = refresh(sensor, event_bus).await;

    let (was_on, was_available) = previous
        .as_ref()
        .map_or((false, false), |state| (state.is_on, state.available));

    if current.available != was_available {
        event_bus.publish(SensorEvent::availability_changed(&unique_id, current.available));
    }
    if current.is_on != was_on {
        event_bus.publish(SensorEvent::state_changed(
            &unique_id,
            current.is_on,
            current.last_event,
        ));
    }

    states.write().insert(unique_id, current);
}
