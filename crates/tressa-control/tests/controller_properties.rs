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

//! Behavioural tests of the frame-timing chain, driven through the public
//! API with raw deltas and with host timestamps.

use proptest::prelude::*;
use std::io::Write;
use tressa_control::{
    tick, ControllerState, FrameSums, FrameTrendClassifier, QualityConfig, QualityGovernor,
    QualityLevelController,
};
use tressa_core::{LevelChange, QualityLevel};

/// Feeds raw deltas through classifier and controller, returning every change.
fn drive(
    classifier: &mut FrameTrendClassifier,
    controller: &mut QualityLevelController,
    deltas: &[f64],
) -> Vec<LevelChange> {
    deltas
        .iter()
        .filter_map(|&delta| {
            classifier.observe(delta);
            controller.tick(classifier.sums_mut())
        })
        .collect()
}

fn controller_at(level: QualityLevel) -> QualityLevelController {
    QualityLevelController::new(level, QualityLevel::LOW, QualityLevel::HIGH, 1000.0, 1000.0)
}

fn raw_config() -> QualityConfig {
    QualityConfig {
        skip_first_frame: false,
        ..Default::default()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Scenarios
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_thirty_four_fast_frames_raise_level_once() {
    let mut state = ControllerState::new(&raw_config());
    let mut changes = Vec::new();

    // Timestamps 30, 60, ..., 1020: thirty-four 30ms deltas.
    for i in 1..=34 {
        let (next, change) = tick(state, i as f64 * 30.0);
        state = next;
        changes.extend(change);
    }

    assert_eq!(changes.len(), 1, "Exactly one level change expected");
    assert_eq!(changes[0].from, QualityLevel::LOW);
    assert_eq!(changes[0].to, QualityLevel::MEDIUM);
    assert_eq!(state.sums().fast_ms, 0.0, "Fast sum resets on escalation");
}

#[test]
fn test_slow_streak_from_top_lowers_one_step() {
    let mut classifier = FrameTrendClassifier::default();
    let mut controller = controller_at(QualityLevel::HIGH);

    let changes = drive(&mut classifier, &mut controller, &[150.0; 7]);

    assert_eq!(changes.len(), 1);
    assert_eq!(controller.level(), QualityLevel::MEDIUM);
    assert_eq!(classifier.sums().slow_ms, 0.0);
}

#[test]
fn test_neutral_frames_do_not_break_streak() {
    let mut classifier = FrameTrendClassifier::default();
    let mut controller = controller_at(QualityLevel::LOW);

    let mut deltas = vec![30.0; 20];
    deltas.extend([60.0; 50]);
    deltas.extend([30.0; 14]);
    let changes = drive(&mut classifier, &mut controller, &deltas);

    assert_eq!(changes.len(), 1, "600 + 420 fast ms crosses despite neutral gap");
    assert_eq!(controller.level(), QualityLevel::MEDIUM);
}

#[test]
fn test_governor_with_file_config() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        "(escalate_threshold_ms: 200.0, initial_level: 2, skip_first_frame: false)"
    )
    .unwrap();

    let config = QualityConfig::load(file.path()).unwrap();
    let mut governor = QualityGovernor::new(config).unwrap();
    assert_eq!(governor.level(), QualityLevel::MEDIUM);

    let changes: Vec<_> = (1..=10)
        .filter_map(|i| governor.on_frame(i as f64 * 25.0))
        .collect();
    assert_eq!(changes.len(), 1, "250ms of fast frames exceeds 200ms");
    assert_eq!(governor.level(), QualityLevel::HIGH);
}

// ─────────────────────────────────────────────────────────────────────────────
// Properties
// ─────────────────────────────────────────────────────────────────────────────

fn any_delta() -> impl Strategy<Value = f64> {
    prop_oneof![0.0..40.0f64, 40.0..=100.0f64, 100.0..5000.0f64]
}

proptest! {
    #[test]
    fn prop_sums_never_both_non_zero(deltas in prop::collection::vec(any_delta(), 0..400)) {
        let mut classifier = FrameTrendClassifier::default();
        let mut controller = controller_at(QualityLevel::MEDIUM);
        for delta in deltas {
            classifier.observe(delta);
            let FrameSums { fast_ms, slow_ms } = classifier.sums();
            prop_assert!(fast_ms == 0.0 || slow_ms == 0.0);
            controller.tick(classifier.sums_mut());
            let FrameSums { fast_ms, slow_ms } = classifier.sums();
            prop_assert!(fast_ms == 0.0 || slow_ms == 0.0);
        }
    }

    #[test]
    fn prop_level_stays_in_range(
        deltas in prop::collection::vec(any_delta(), 0..600),
        initial in 1u8..=3,
    ) {
        let mut classifier = FrameTrendClassifier::default();
        let mut controller = controller_at(QualityLevel::new(initial).unwrap());
        for change in drive(&mut classifier, &mut controller, &deltas) {
            prop_assert_eq!(change.from.passes().abs_diff(change.to.passes()), 1);
        }
        prop_assert!(controller.level() >= QualityLevel::LOW);
        prop_assert!(controller.level() <= QualityLevel::HIGH);
    }

    #[test]
    fn prop_fast_streak_raises_exactly_one_step(delta in 0.5..40.0f64) {
        let mut classifier = FrameTrendClassifier::default();
        let mut controller = controller_at(QualityLevel::LOW);

        let mut total = 0.0;
        let mut changes = Vec::new();
        while total < 1000.0 {
            total += delta;
            changes.extend(drive(&mut classifier, &mut controller, &[delta]));
        }

        prop_assert_eq!(changes.len(), 1);
        prop_assert_eq!(controller.level(), QualityLevel::MEDIUM);
        prop_assert_eq!(classifier.sums().fast_ms, 0.0);
    }

    #[test]
    fn prop_slow_streak_lowers_exactly_one_step(delta in 100.5..1000.0f64) {
        let mut classifier = FrameTrendClassifier::default();
        let mut controller = controller_at(QualityLevel::HIGH);

        let mut total = 0.0;
        let mut changes = Vec::new();
        while total < 1000.0 {
            total += delta;
            changes.extend(drive(&mut classifier, &mut controller, &[delta]));
        }

        prop_assert_eq!(changes.len(), 1);
        prop_assert_eq!(controller.level(), QualityLevel::MEDIUM);
    }

    #[test]
    fn prop_timestamps_never_leave_range(steps in prop::collection::vec(0.0..300.0f64, 0..500)) {
        let mut state = ControllerState::default();
        let mut ts = 0.0;
        for step in steps {
            ts += step;
            state = tick(state, ts).0;
            prop_assert!((1..=3).contains(&state.level().passes()));
        }
    }
}
