//! Property tests for the countdown invariants: the remaining time stays in
//! `[0, phase duration]` under any action sequence, frozen ticks change
//! nothing, and the interruption count never decreases.

use proptest::prelude::*;

use ironhour_core::{Field, PhaseDurations, Plan, SessionMachine, SessionPhase};

#[derive(Debug, Clone, Copy)]
enum Op {
    Tick,
    TogglePause,
    RequestEmergency,
    ResolveBreak,
    ResolveCancel,
    EndEarly,
    Advance,
    ResetTimer,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => Just(Op::Tick),
        2 => Just(Op::TogglePause),
        1 => Just(Op::RequestEmergency),
        1 => Just(Op::ResolveBreak),
        1 => Just(Op::ResolveCancel),
        1 => Just(Op::EndEarly),
        1 => Just(Op::Advance),
        1 => Just(Op::ResetTimer),
    ]
}

fn machine_under_test() -> SessionMachine {
    // Short phases so random walks actually cross expiry boundaries.
    let durations = PhaseDurations {
        calibration_secs: 5,
        focus_secs: 9,
        review_secs: 4,
    };
    let mut m = SessionMachine::with_durations(Plan::Builder, durations);
    m.set_field(Field::Goal, "g").unwrap();
    m.set_field(Field::Why, "w").unwrap();
    m.set_field(Field::Reflection, "r").unwrap();
    m
}

proptest! {
    #[test]
    fn countdown_and_interruptions_hold_their_invariants(
        ops in proptest::collection::vec(op_strategy(), 0..300),
    ) {
        let mut m = machine_under_test();

        for op in ops {
            let frozen = m.is_paused()
                || m.overlay_open()
                || m.phase() == SessionPhase::Completed
                || m.remaining_secs() == 0;
            let remaining_before = m.remaining_secs();
            let interruptions_before = m.interruptions();

            match op {
                Op::Tick => {
                    m.tick();
                    if frozen {
                        prop_assert_eq!(m.remaining_secs(), remaining_before);
                    }
                }
                Op::TogglePause => {
                    m.toggle_pause();
                    prop_assert_eq!(m.remaining_secs(), remaining_before);
                }
                Op::RequestEmergency => {
                    m.request_emergency();
                    prop_assert_eq!(m.remaining_secs(), remaining_before);
                }
                Op::ResolveBreak => {
                    let was_open = m.overlay_open();
                    m.resolve_emergency(true);
                    if was_open {
                        prop_assert_eq!(m.interruptions(), interruptions_before + 1);
                        prop_assert!(m.is_paused());
                    } else {
                        prop_assert_eq!(m.interruptions(), interruptions_before);
                    }
                }
                Op::ResolveCancel => {
                    m.resolve_emergency(false);
                    prop_assert_eq!(m.interruptions(), interruptions_before);
                }
                Op::EndEarly => {
                    m.end_early(true);
                }
                Op::Advance => {
                    let _ = m.advance();
                }
                Op::ResetTimer => {
                    m.reset_phase_timer(true);
                }
            }

            prop_assert!(m.remaining_secs() <= m.total_secs());
            prop_assert!(m.interruptions() >= interruptions_before);
            if m.phase() == SessionPhase::Completed {
                prop_assert_eq!(m.remaining_secs(), 0);
            }
        }
    }

    #[test]
    fn ticks_while_paused_never_move_the_clock(ticks in 1usize..500) {
        let mut m = machine_under_test();
        m.toggle_pause().unwrap();
        for _ in 0..ticks {
            prop_assert!(m.tick().is_none());
        }
        prop_assert_eq!(m.remaining_secs(), 5);
    }

    #[test]
    fn ticks_while_overlay_open_never_move_the_clock(ticks in 1usize..500) {
        let mut m = machine_under_test();
        m.request_emergency().unwrap();
        for _ in 0..ticks {
            prop_assert!(m.tick().is_none());
        }
        prop_assert_eq!(m.remaining_secs(), 5);
    }
}
