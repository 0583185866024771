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

//! Fast/slow frame streak accumulation.

/// Default upper bound (exclusive) of a fast frame, in ms.
pub const DEFAULT_FAST_THRESHOLD_MS: f64 = 40.0;
/// Default lower bound (exclusive) of a slow frame, in ms.
pub const DEFAULT_SLOW_THRESHOLD_MS: f64 = 100.0;

/// Classification of a single frame delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameClass {
    /// Strictly below the fast threshold.
    Fast,
    /// Inside the hysteresis band; affects neither streak.
    Neutral,
    /// Strictly above the slow threshold.
    Slow,
}

/// Accumulated duration of the current fast and slow streaks.
///
/// At most one of the two is non-zero at any time.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameSums {
    /// Sum of consecutive fast deltas, in ms.
    pub fast_ms: f64,
    /// Sum of consecutive slow deltas, in ms.
    pub slow_ms: f64,
}

/// Turns frame deltas into two rolling streak sums.
///
/// A fast frame extends the fast streak and breaks the slow one; a slow frame
/// does the opposite. Frames between the two thresholds (inclusive) leave
/// both sums untouched, so a frame rate hovering near either boundary does
/// not make the level oscillate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTrendClassifier {
    fast_threshold_ms: f64,
    slow_threshold_ms: f64,
    sums: FrameSums,
}

impl Default for FrameTrendClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_FAST_THRESHOLD_MS, DEFAULT_SLOW_THRESHOLD_MS)
    }
}

impl FrameTrendClassifier {
    /// Creates a classifier with empty sums.
    ///
    /// `fast_threshold_ms` must not exceed `slow_threshold_ms`;
    /// [`QualityConfig::validate`](crate::QualityConfig::validate) enforces it.
    pub fn new(fast_threshold_ms: f64, slow_threshold_ms: f64) -> Self {
        Self {
            fast_threshold_ms,
            slow_threshold_ms,
            sums: FrameSums::default(),
        }
    }

    /// Classifies a delta without recording it.
    pub fn classify(&self, delta_ms: f64) -> FrameClass {
        if delta_ms < self.fast_threshold_ms {
            FrameClass::Fast
        } else if delta_ms > self.slow_threshold_ms {
            FrameClass::Slow
        } else {
            FrameClass::Neutral
        }
    }

    /// Records a delta and returns the updated sums.
    pub fn observe(&mut self, delta_ms: f64) -> FrameSums {
        match self.classify(delta_ms) {
            FrameClass::Fast => {
                self.sums.fast_ms += delta_ms;
                self.sums.slow_ms = 0.0;
            }
            FrameClass::Slow => {
                self.sums.slow_ms += delta_ms;
                self.sums.fast_ms = 0.0;
            }
            FrameClass::Neutral => {}
        }
        self.sums
    }

    /// Current sums.
    pub fn sums(&self) -> FrameSums {
        self.sums
    }

    /// Mutable access for the level controller, which resets a sum once it
    /// has acted on it.
    pub fn sums_mut(&mut self) -> &mut FrameSums {
        &mut self.sums
    }

    /// Clears both sums.
    pub fn reset(&mut self) {
        self.sums = FrameSums::default();
    }

    /// The fast threshold, in ms.
    pub fn fast_threshold_ms(&self) -> f64 {
        self.fast_threshold_ms
    }

    /// The slow threshold, in ms.
    pub fn slow_threshold_ms(&self) -> f64 {
        self.slow_threshold_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fast_frames_accumulate() {
        let mut classifier = FrameTrendClassifier::default();
        classifier.observe(16.0);
        let sums = classifier.observe(20.0);
        assert_eq!(sums.fast_ms, 36.0);
        assert_eq!(sums.slow_ms, 0.0);
    }

    #[test]
    fn test_slow_frame_breaks_fast_streak() {
        let mut classifier = FrameTrendClassifier::default();
        classifier.observe(16.0);
        classifier.observe(16.0);
        let sums = classifier.observe(150.0);
        assert_eq!(sums.fast_ms, 0.0);
        assert_eq!(sums.slow_ms, 150.0);

        let sums = classifier.observe(10.0);
        assert_eq!(sums.fast_ms, 10.0);
        assert_eq!(sums.slow_ms, 0.0);
    }

    #[test]
    fn test_hysteresis_band_is_inert() {
        let mut classifier = FrameTrendClassifier::default();
        classifier.observe(30.0);
        for delta in [40.0, 55.0, 99.9, 100.0] {
            assert_eq!(classifier.classify(delta), FrameClass::Neutral);
            classifier.observe(delta);
        }
        assert_eq!(classifier.sums().fast_ms, 30.0);
        assert_eq!(classifier.sums().slow_ms, 0.0);
    }

    #[test]
    fn test_threshold_boundaries_are_strict() {
        let classifier = FrameTrendClassifier::default();
        assert_eq!(classifier.classify(39.999), FrameClass::Fast);
        assert_eq!(classifier.classify(40.0), FrameClass::Neutral);
        assert_eq!(classifier.classify(100.0), FrameClass::Neutral);
        assert_eq!(classifier.classify(100.001), FrameClass::Slow);
    }

    #[test]
    fn test_reset_clears_sums() {
        let mut classifier = FrameTrendClassifier::new(10.0, 20.0);
        classifier.observe(5.0);
        classifier.reset();
        assert_eq!(classifier.sums(), FrameSums::default());
        assert_eq!(classifier.fast_threshold_ms(), 10.0);
        assert_eq!(classifier.slow_threshold_ms(), 20.0);
    }
}
