//! Property-based invariant tests for target selection and settling.
//!
//! ## Invariants
//!
//! 1. `nearest` returns a minimal-distance target, and the first such one.
//! 2. Spring runs always finish on their target with zero velocity.
//! 3. Decay velocity magnitude never increases.
//! 4. The committed offset stays finite whatever the gesture input.
//! 5. While dragging, rendered == committed + delta.

use std::time::Duration;

use dropzone_core::*;
use proptest::prelude::*;

// ── Strategies ────────────────────────────────────────────────────────────

fn arb_coord() -> impl Strategy<Value = f64> {
    (-2_000i32..=2_000).prop_map(|x| x as f64 / 2.0)
}

fn arb_targets() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(arb_coord(), 1..8)
}

fn arb_velocity() -> impl Strategy<Value = f64> {
    (-5_000i32..=5_000).prop_map(f64::from)
}

fn arb_frame() -> impl Strategy<Value = Duration> {
    (1u64..=80).prop_map(Duration::from_millis)
}

fn arb_wild() -> impl Strategy<Value = f64> {
    prop_oneof![
        arb_coord(),
        Just(f64::NAN),
        Just(f64::INFINITY),
        Just(f64::NEG_INFINITY),
    ]
}

// ── 1. Nearest selection ──────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn nearest_is_first_minimum(targets in arb_targets(), position in arb_coord()) {
        let set = TargetSet::new(Axis::X, targets.clone()).unwrap();
        let idx = set.nearest_index(position);
        let best = (position - targets[idx]).abs();
        for (i, t) in targets.iter().enumerate() {
            let d = (position - t).abs();
            prop_assert!(d >= best, "target {i} closer than chosen {idx}");
            if i < idx {
                prop_assert!(d > best, "earlier target {i} ties chosen {idx}");
            }
        }
    }
}

// ── 2. Spring convergence ─────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn spring_runs_finish_on_target(
        targets in arb_targets(),
        delta in arb_coord(),
        velocity in arb_velocity(),
        frame in arb_frame(),
    ) {
        let set = TargetSet::new(Axis::X, targets).unwrap();
        let mut ctrl = MotionController::new(set, 0.0, MotionConfig::default()).unwrap();
        ctrl.on_gesture(Phase::Active, Sample::new(delta, velocity));
        ctrl.on_gesture(Phase::Ended, Sample::new(delta, velocity));
        let target = ctrl.run_target().unwrap();

        let mut frames = 0;
        while ctrl.is_animating() {
            ctrl.on_frame(frame);
            frames += 1;
            prop_assert!(frames < 20_000, "spring never settled");
        }
        prop_assert_eq!(ctrl.position(), target);
        prop_assert_eq!(ctrl.committed_offset(), target);
    }
}

// ── 3. Decay monotonicity ─────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn decay_speed_never_grows(
        velocity in arb_velocity(),
        deceleration in (900u32..=999).prop_map(|d| f64::from(d) / 1000.0),
        frames in prop::collection::vec(arb_frame(), 1..400),
    ) {
        let decay = DecayIntegrator::new(DecayConfig {
            deceleration,
            ..DecayConfig::default()
        });
        let mut state = SimulationState::launch(0.0, velocity);
        for dt in frames {
            let next = decay.step(&state, dt);
            prop_assert!(next.velocity.abs() <= state.velocity.abs());
            state = next;
        }
    }
}

// ── 4/5. Gesture robustness ───────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn committed_offset_stays_finite(
        events in prop::collection::vec((0u8..3, arb_wild(), arb_wild()), 1..60),
        frame in arb_frame(),
    ) {
        let set = TargetSet::new(Axis::Y, vec![-100.0, 0.0, 250.0]).unwrap();
        let mut ctrl = MotionController::new(set, 0.0, MotionConfig::default()).unwrap();
        for (phase, delta, velocity) in events {
            let phase = match phase {
                0 => Phase::Idle,
                1 => Phase::Active,
                _ => Phase::Ended,
            };
            ctrl.on_gesture(phase, Sample::new(delta, velocity));
            if ctrl.state() == ControllerState::Dragging && delta.is_finite() {
                prop_assert_eq!(ctrl.position(), ctrl.committed_offset() + delta);
            }
            ctrl.on_frame(frame);
            prop_assert!(ctrl.committed_offset().is_finite());
            prop_assert!(ctrl.position().is_finite());
        }
    }
}
