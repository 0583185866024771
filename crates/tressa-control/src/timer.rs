// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Inter-frame delta measurement.

/// Tracks the timestamp of the previous render callback.
///
/// Timestamps are host milliseconds, monotonically increasing. Before the
/// first frame the previous timestamp is unset and reads as `0`, so the very
/// first delta equals the full timestamp value. Callers that do not want
/// that synthetic delta check [`FrameTimer::is_primed`] first.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameTimer {
    previous_timestamp: Option<f64>,
}

impl FrameTimer {
    /// Creates an unprimed timer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a frame and returns the delta to the previous one, in ms.
    ///
    /// A timestamp earlier than the previous one yields a delta of `0`.
    /// A non-finite timestamp is ignored and also yields `0`.
    pub fn on_frame(&mut self, timestamp: f64) -> f64 {
        if !timestamp.is_finite() {
            log::warn!("FrameTimer: Ignoring non-finite timestamp {}", timestamp);
            return 0.0;
        }

        let delta = timestamp - self.previous_timestamp();
        self.previous_timestamp = Some(timestamp);

        if delta < 0.0 {
            log::warn!(
                "FrameTimer: Timestamp went backwards by {:.3}ms, clamping delta to 0",
                -delta
            );
            return 0.0;
        }
        delta
    }

    /// `true` once at least one frame has been recorded.
    pub fn is_primed(&self) -> bool {
        self.previous_timestamp.is_some()
    }

    /// The last recorded timestamp, or `0` if none.
    pub fn previous_timestamp(&self) -> f64 {
        self.previous_timestamp.unwrap_or(0.0)
    }

    /// Forgets the previous timestamp.
    pub fn reset(&mut self) {
        self.previous_timestamp = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_measures_from_zero() {
        let mut timer = FrameTimer::new();
        assert!(!timer.is_primed());
        assert_eq!(timer.on_frame(1234.5), 1234.5);
        assert!(timer.is_primed());
    }

    #[test]
    fn test_subsequent_frames_measure_from_previous() {
        let mut timer = FrameTimer::new();
        timer.on_frame(100.0);
        assert_eq!(timer.on_frame(116.0), 16.0);
        assert_eq!(timer.on_frame(150.0), 34.0);
        assert_eq!(timer.previous_timestamp(), 150.0);
    }

    #[test]
    fn test_backwards_timestamp_clamps_to_zero() {
        let mut timer = FrameTimer::new();
        timer.on_frame(500.0);
        assert_eq!(timer.on_frame(400.0), 0.0);
        // The new, earlier timestamp becomes the reference.
        assert_eq!(timer.on_frame(420.0), 20.0);
    }

    #[test]
    fn test_non_finite_timestamp_is_ignored() {
        let mut timer = FrameTimer::new();
        timer.on_frame(10.0);
        assert_eq!(timer.on_frame(f64::NAN), 0.0);
        assert_eq!(timer.previous_timestamp(), 10.0);
    }

    #[test]
    fn test_reset_unprimes() {
        let mut timer = FrameTimer::new();
        timer.on_frame(10.0);
        timer.reset();
        assert!(!timer.is_primed());
        assert_eq!(timer.on_frame(30.0), 30.0);
    }
}
