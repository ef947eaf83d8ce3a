//! Property-based tests for the supervisor state machine.
//!
//! These tests use proptest to drive machines with random command codes and
//! check that the transition rules and history invariants always hold.

use proptest::prelude::*;
use supervisor_fsm::clock::SequenceClock;
use supervisor_fsm::command::ScriptedCommands;
use supervisor_fsm::core::SystemState;
use supervisor_fsm::machine::{Machine, StepResult};
use supervisor_fsm::report::NullReporter;

type TestMachine = Machine<SequenceClock, ScriptedCommands, NullReporter>;

fn machine(codes: &[i64]) -> TestMachine {
    Machine::new(
        SequenceClock::new(1, 1),
        codes.iter().copied().collect(),
        NullReporter,
    )
}

prop_compose! {
    fn arbitrary_code()(code in -2i64..8) -> i64 {
        code
    }
}

prop_compose! {
    fn valid_code()(code in 1i64..=4) -> i64 {
        code
    }
}

prop_compose! {
    fn arbitrary_state()(code in 0u8..7) -> SystemState {
        SystemState::from_code(code).unwrap()
    }
}

proptest! {
    #[test]
    fn history_grows_by_one_per_transition(
        codes in prop::collection::vec(arbitrary_code(), 0..40)
    ) {
        let mut machine = machine(&codes);
        let mut transitions = 0usize;

        for _ in 0..200 {
            let before = machine.history().len();
            match machine.step() {
                StepResult::Transitioned { to, .. } => {
                    transitions += 1;
                    prop_assert_eq!(machine.history().len(), before + 1);
                    prop_assert_eq!(machine.current_state(), to);
                }
                StepResult::Reported => {
                    prop_assert_eq!(machine.history().len(), before);
                }
                StepResult::Halted => break,
            }

            prop_assert_eq!(machine.history().len(), 1 + transitions);
            let last = machine.history().last().copied().unwrap();
            prop_assert_eq!(last.state, machine.current_state());
            prop_assert_eq!(last.timestamp, machine.last_heartbeat());
        }
    }

    #[test]
    fn counters_stay_within_thresholds(
        codes in prop::collection::vec(arbitrary_code(), 0..40)
    ) {
        let mut machine = machine(&codes);
        let mut errors = 0;

        loop {
            let previous_errors = machine.error_count();
            if machine.step() == StepResult::Halted {
                break;
            }

            prop_assert!(machine.move_count() <= 3);
            prop_assert!(machine.error_count() >= previous_errors);
            prop_assert!(machine.error_count() - previous_errors <= 1);
            errors = machine.error_count();
        }

        prop_assert!(errors <= 4);
    }

    #[test]
    fn run_always_terminates_stopped(
        codes in prop::collection::vec(arbitrary_code(), 0..40)
    ) {
        let summary = machine(&codes).run();

        prop_assert_eq!(summary.final_state, SystemState::Stopped);
        prop_assert_eq!(summary.history.first().map(|e| e.state), Some(SystemState::Init));
        prop_assert_eq!(summary.history.last().map(|e| e.state), Some(SystemState::Stopped));
        prop_assert_eq!(summary.history.count(SystemState::Stopped), 1);
        prop_assert_eq!(summary.history.count(SystemState::Error) as u32, summary.error_count);
    }

    #[test]
    fn heartbeats_never_decrease(
        codes in prop::collection::vec(arbitrary_code(), 0..40)
    ) {
        let summary = machine(&codes).run();
        let stamps: Vec<_> = summary.history.iter().map(|e| e.timestamp).collect();
        prop_assert!(stamps.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn calculation_never_changes_move_count(moves in 0u32..3) {
        let mut machine = machine(&[]);
        for _ in 0..moves {
            machine.transition_to(SystemState::Movement);
            machine.step();
        }
        prop_assert_eq!(machine.move_count(), moves);

        machine.transition_to(SystemState::Calculation);
        let expected = if moves == 0 { SystemState::Error } else { SystemState::Idle };
        prop_assert_eq!(machine.step().target(), Some(expected));
        prop_assert_eq!(machine.move_count(), moves);
    }

    #[test]
    fn shooting_always_resets(moves in 0u32..3) {
        let mut machine = machine(&[]);
        for _ in 0..moves {
            machine.transition_to(SystemState::Movement);
            machine.step();
        }

        machine.transition_to(SystemState::Shooting);
        prop_assert_eq!(machine.step().target(), Some(SystemState::Idle));
        prop_assert_eq!(machine.move_count(), 0);
    }

    #[test]
    fn transition_to_is_unconditional(targets in prop::collection::vec(arbitrary_state(), 1..20)) {
        let mut machine = machine(&[]);
        for (i, target) in targets.iter().enumerate() {
            machine.transition_to(*target);
            prop_assert_eq!(machine.current_state(), *target);
            prop_assert_eq!(machine.history().len(), i + 2);
        }
    }

    #[test]
    fn observers_are_idempotent(
        codes in prop::collection::vec(valid_code(), 0..10),
        steps in 0usize..15,
        reads in 1usize..6
    ) {
        let mut machine = machine(&codes);
        for _ in 0..steps {
            machine.step();
        }

        let status = machine.status();
        let len = machine.history().len();
        let report = machine.history_report();
        for _ in 0..reads {
            prop_assert_eq!(machine.status(), status);
            prop_assert_eq!(machine.history_report(), report.clone());
        }
        prop_assert_eq!(machine.history().len(), len);
    }
}
