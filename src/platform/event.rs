// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sensor event types.

use serde::Serialize;

use crate::types::Timestamp;

/// Events emitted by the sensor poller.
///
/// Every event carries the unique id of the sensor it concerns.
///
/// # Examples
///
/// ```
/// use wyze_sensors::platform::SensorEvent;
///
/// let event = SensorEvent::availability_changed("AABB-motion", false);
/// assert_eq!(event.unique_id(), "AABB-motion");
/// assert!(event.is_availability());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SensorEvent {
    /// A sensor was registered with the poller.
    SensorAdded {
        /// The sensor's unique id.
        unique_id: String,
    },

    /// The sensor turned on or off.
    StateChanged {
        /// The sensor's unique id.
        unique_id: String,
        /// The new state.
        is_on: bool,
        /// Timestamp of the last observed event.
        last_event: Timestamp,
    },

    /// The device became reachable or unreachable.
    AvailabilityChanged {
        /// The sensor's unique id.
        unique_id: String,
        /// Whether the sensor is now available.
        available: bool,
    },

    /// A poll failed; the sensor is unavailable until the next good poll.
    PollFailed {
        /// The sensor's unique id.
        unique_id: String,
        /// Description of the failure.
        error: String,
    },
}

impl SensorEvent {
    /// Returns the unique id of the sensor this event concerns.
    #[must_use]
    pub fn unique_id(&self) -> &str {
        match self {
            Self::SensorAdded { unique_id }
            | Self::StateChanged { unique_id, .. }
            | Self::AvailabilityChanged { unique_id, .. }
            | Self::PollFailed { unique_id, .. } => unique_id,
        }
    }

    /// Returns `true` if this is a state change event.
    #[must_use]
    pub fn is_state_change(&self) -> bool {
        matches!(self, Self::StateChanged { .. })
    }

    /// Returns `true` if this is an availability event.
    #[must_use]
    pub fn is_availability(&self) -> bool {
        matches!(self, Self::AvailabilityChanged { .. })
    }

    /// Returns `true` if this is a poll failure.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::PollFailed { .. })
    }

    /// Creates a sensor added event.
    #[must_use]
    pub fn sensor_added(unique_id: impl Into<String>) -> Self {
        Self::SensorAdded {
            unique_id: unique_id.into(),
        }
    }

    /// Creates a state changed event.
    #[must_use]
    pub fn state_changed(unique_id: impl Into<String>, is_on: bool, last_event: Timestamp) -> Self {
        Self::StateChanged {
            unique_id: unique_id.into(),
            is_on,
            last_event,
        }
    }

    /// Creates an availability changed event.
    #[must_use]
    pub fn availability_changed(unique_id: impl Into<String>, available: bool) -> Self {
        Self::AvailabilityChanged {
            unique_id: unique_id.into(),
            available,
        }
    }

    /// Creates a poll failure event.
    #[must_use]
    pub fn poll_failed(unique_id: impl Into<String>, error: impl Into<String>) -> Self {
        Self::PollFailed {
            unique_id: unique_id.into(),
            error: error.into(),
        }
    }
}
