// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event freshness tracking.

use crate::types::{Event, Timestamp};

/// Timestamp of the last observed event, used to detect new events.
///
/// A sensor is on for exactly one poll after a newer event appears. The
/// watermark starts at the creation time, so an event that already existed
/// then does not turn the sensor on at its first poll.
///
/// # Examples
///
/// ```
/// use wyze_sensors::sensor::EventWatermark;
/// use wyze_sensors::types::{Event, Timestamp};
///
/// let start = Timestamp::from_millis(10_000);
/// let mut watermark = EventWatermark::starting_at(start);
///
/// let event = Event::new("1", start.offset_millis(5000));
/// assert!(watermark.observe(Some(&event)));
/// assert!(!watermark.observe(Some(&event)));
/// assert!(!watermark.observe(None));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventWatermark {
    last_event: Timestamp,
}

impl EventWatermark {
    /// Creates a watermark at the current time.
    #[must_use]
    pub fn new() -> Self {
        Self::starting_at(Timestamp::now())
    }

    /// Creates a watermark at the given time.
    #[must_use]
    pub const fn starting_at(last_event: Timestamp) -> Self {
        Self { last_event }
    }

    /// Returns the timestamp of the last observed event.
    #[must_use]
    pub const fn last_event(&self) -> Timestamp {
        self.last_event
    }

    /// Records the latest event and returns whether the sensor is on.
    ///
    /// - No event: off, watermark unchanged.
    /// - Event newer than the watermark: on, watermark moves to the event.
    /// - Otherwise: off, watermark still moves to the event.
    pub fn observe(&mut self, latest: Option<&Event>) -> bool {
        let Some(event) = latest else {
            return false;
        };

        let is_new = event.event_ts > self.last_event;
        self.last_event = event.event_ts;
        is_new
    }
}

impl Default for EventWatermark {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event_at(millis: i64) -> Event {
        Event::new("1", Timestamp::from_millis(millis))
    }

    #[test]
    fn new_starts_at_now() {
        let before = Timestamp::now();
        let watermark = EventWatermark::new();
        assert!(watermark.last_event() >= before);
    }

    #[test]
    fn no_event_keeps_watermark() {
        let mut watermark = EventWatermark::starting_at(Timestamp::from_millis(1000));
        assert!(!watermark.observe(None));
        assert_eq!(watermark.last_event(), Timestamp::from_millis(1000));
    }

    #[test]
    fn newer_event_turns_on_and_advances() {
        let mut watermark = EventWatermark::starting_at(Timestamp::from_millis(1000));
        assert!(watermark.observe(Some(&event_at(1001))));
        assert_eq!(watermark.last_event(), Timestamp::from_millis(1001));
    }

    #[test]
    fn equal_event_is_not_new() {
        let mut watermark = EventWatermark::starting_at(Timestamp::from_millis(1000));
        assert!(!watermark.observe(Some(&event_at(1000))));
        assert_eq!(watermark.last_event(), Timestamp::from_millis(1000));
    }

    #[test]
    fn older_event_is_off_and_restamps() {
        let mut watermark = EventWatermark::starting_at(Timestamp::from_millis(5000));
        assert!(!watermark.observe(Some(&event_at(2000))));
        assert_eq!(watermark.last_event(), Timestamp::from_millis(2000));
    }

    #[test]
    fn repeated_stale_event_stays_off() {
        let mut watermark = EventWatermark::starting_at(Timestamp::from_millis(5000));
        let stale = event_at(4000);
        for _ in 0..5 {
            assert!(!watermark.observe(Some(&stale)));
            assert_eq!(watermark.last_event(), Timestamp::from_millis(4000));
        }
    }
}
