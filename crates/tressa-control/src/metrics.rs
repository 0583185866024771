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

//! Rolling frame-time statistics for status reporting.
//!
//! Nothing here feeds back into the level decision.

/// Number of frame deltas kept by [`FrameHistory`] (2s at 60Hz).
pub const FRAME_HISTORY_LEN: usize = 120;

/// A fixed-size circular buffer for storing numerical samples.
#[derive(Debug, Clone)]
pub struct RingBuffer<T, const N: usize> {
    data: [T; N],
    index: usize,
    count: usize,
}

impl<T: Default + Copy, const N: usize> Default for RingBuffer<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Default + Copy, const N: usize> RingBuffer<T, N> {
    /// Creates a new, empty ring buffer.
    pub fn new() -> Self {
        Self {
            data: [T::default(); N],
            index: 0,
            count: 0,
        }
    }

    /// Pushes a new value, overwriting the oldest if full.
    pub fn push(&mut self, value: T) {
        self.data[self.index] = value;
        self.index = (self.index + 1) % N;
        if self.count < N {
            self.count += 1;
        }
    }

    /// Number of samples currently held.
    pub fn count(&self) -> usize {
        self.count
    }

    /// `true` if no sample has been pushed since creation or the last clear.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Drops every sample.
    pub fn clear(&mut self) {
        self.index = 0;
        self.count = 0;
    }

    /// Values in chronological order (oldest to newest).
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        let (left, right) = self.data.split_at(self.index);
        // While filling, everything after `index` is unwritten.
        let older = if self.count < N { &right[..0] } else { right };
        older.iter().chain(left.iter())
    }

    /// The most recent sample.
    pub fn last(&self) -> Option<&T> {
        if self.count == 0 {
            return None;
        }
        Some(&self.data[(self.index + N - 1) % N])
    }
}

impl<const N: usize> RingBuffer<f64, N> {
    /// Arithmetic mean, or `0` if empty.
    pub fn average(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.iter().sum::<f64>() / self.count as f64
    }

    /// Population variance, or `0` with fewer than two samples.
    ///
    /// High variance in frame times indicates stutter.
    pub fn variance(&self) -> f64 {
        if self.count < 2 {
            return 0.0;
        }
        let avg = self.average();
        let sum_sq: f64 = self.iter().map(|v| (v - avg) * (v - avg)).sum();
        sum_sq / self.count as f64
    }

    /// Smallest sample, or `None` if empty.
    pub fn min(&self) -> Option<f64> {
        self.iter().copied().reduce(f64::min)
    }

    /// Largest sample, or `None` if empty.
    pub fn max(&self) -> Option<f64> {
        self.iter().copied().reduce(f64::max)
    }
}

/// Recent frame deltas, in ms.
pub type FrameHistory = RingBuffer<f64, FRAME_HISTORY_LEN>;

/// Snapshot of [`FrameHistory`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameStats {
    /// Number of deltas the snapshot covers.
    pub samples: usize,
    /// Mean delta, in ms.
    pub average_ms: f64,
    /// Shortest delta, in ms.
    pub min_ms: f64,
    /// Longest delta, in ms.
    pub max_ms: f64,
    /// Variance of the deltas, in ms².
    pub variance: f64,
    /// Frames per second derived from the mean delta.
    pub fps: f64,
}

impl FrameStats {
    /// Summarises a history. An empty history yields all zeros.
    pub fn from_history(history: &FrameHistory) -> Self {
        if history.is_empty() {
            return Self::default();
        }
        let average_ms = history.average();
        Self {
            samples: history.count(),
            average_ms,
            min_ms: history.min().unwrap_or(0.0),
            max_ms: history.max().unwrap_or(0.0),
            variance: history.variance(),
            fps: if average_ms > 0.0 {
                1000.0 / average_ms
            } else {
                0.0
            },
        }
    }
}
