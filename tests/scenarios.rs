use std::path::Path;

use mtm::Direction::{Left, Right, Stay};
use mtm::{
    MachineDefinition, MachineError, ProgramLoader, State, Status, TransitionTable, TuringMachine,
};

fn unary_scan(accepting: bool) -> MachineDefinition {
    let transitions = TransitionTable::new().rule("q0", &["1"], "q0", &["1"], &[Right]);
    let definition = MachineDefinition::new("q0", transitions)
        .with_states(["q0"])
        .with_input_alphabet(&["1"])
        .with_tape_alphabet(&["1", "_"]);

    if accepting {
        definition.with_accept_states(["q0"])
    } else {
        definition
    }
}

fn copier() -> MachineDefinition {
    let transitions = TransitionTable::new()
        .rule("copy", &["a", "_"], "copy", &["a", "a"], &[Right, Right])
        .rule("copy", &["b", "_"], "copy", &["b", "b"], &[Right, Right])
        .rule("copy", &["_", "_"], "done", &["_", "_"], &[Stay, Stay]);

    MachineDefinition::new("copy", transitions)
        .with_accept_states(["done"])
        .with_tapes(2)
}

#[test]
fn accepting_scan_stops_on_first_accepting_state() {
    let mut machine = TuringMachine::with_inputs(unary_scan(true), &["111"]).unwrap();

    assert_eq!(machine.run(10), Status::Accept);
    assert_eq!(machine.step_count(), 1);
}

#[test]
fn accepting_start_state_without_transition_accepts_at_once() {
    let mut machine = TuringMachine::with_inputs(unary_scan(true), &[""]).unwrap();

    assert_eq!(machine.run(10), Status::Accept);
    assert_eq!(machine.step_count(), 0);
}

#[test]
fn plain_scan_runs_onto_blank_and_halts() {
    let mut machine = TuringMachine::with_inputs(unary_scan(false), &["111"]).unwrap();

    assert_eq!(machine.run(10), Status::Halt);
    assert_eq!(machine.step_count(), 3);
    assert_eq!(machine.tapes()[0].head(), 3);
}

#[test]
fn two_tape_copier_copies_input() {
    let mut machine = TuringMachine::with_inputs(copier(), &["ab", ""]).unwrap();

    assert_eq!(machine.run(100), Status::Accept);
    assert_eq!(machine.step_count(), 3);

    let copy = &machine.tapes()[1];
    assert_eq!(copy.symbol_at(0), "a");
    assert_eq!(copy.symbol_at(1), "b");
    assert_eq!(copy.contents(), "ab");

    let configuration = machine.configuration();
    assert_eq!(configuration.state, State::from("done"));
    assert_eq!(configuration.tapes, vec![" a  b [_]", " a  b [_]"]);
    assert_eq!(configuration.step, 3);
}

#[test]
fn empty_table_halts_immediately() {
    let definition = MachineDefinition::new("q0", TransitionTable::new());
    let mut machine = TuringMachine::new(definition).unwrap();

    assert_eq!(machine.step(), Status::Halt);
    assert_eq!(machine.step_count(), 0);
}

#[test]
fn rejecting_start_state_rejects_immediately() {
    let definition =
        MachineDefinition::new("q0", TransitionTable::new()).with_reject_states(["q0"]);
    let mut machine = TuringMachine::new(definition).unwrap();

    assert_eq!(machine.step(), Status::Reject);
    assert_eq!(machine.step_count(), 0);
}

#[test]
fn transition_into_rejecting_state_rejects() {
    let transitions = TransitionTable::new().rule("q0", &["x"], "bad", &["x"], &[Left]);
    let definition = MachineDefinition::new("q0", transitions).with_reject_states(["bad"]);
    let mut machine = TuringMachine::with_inputs(definition, &["x"]).unwrap();

    assert_eq!(machine.step(), Status::Reject);
    assert_eq!(machine.step_count(), 1);
    assert_eq!(machine.tapes()[0].head(), -1);
}

#[test]
fn infinite_loop_exhausts_budget() {
    let transitions = TransitionTable::new().rule("loop", &["_"], "loop", &["_"], &[Stay]);
    let mut machine = TuringMachine::new(MachineDefinition::new("loop", transitions)).unwrap();

    assert_eq!(machine.run(5), Status::Running);
    assert_eq!(machine.step_count(), 5);
}

#[test]
fn dual_membership_is_a_configuration_error() {
    let definition = MachineDefinition::new("q0", TransitionTable::new())
        .with_accept_states(["q0"])
        .with_reject_states(["q0"]);

    assert_eq!(
        TuringMachine::new(definition).unwrap_err(),
        MachineError::AmbiguousFinalStates(vec![State::from("q0")])
    );
}

#[test]
fn input_count_must_match_tapes() {
    assert!(matches!(
        TuringMachine::with_inputs(copier(), &["ab"]),
        Err(MachineError::InitialInputs {
            expected: 2,
            found: 1
        })
    ));
    assert!(matches!(
        TuringMachine::with_inputs(copier(), &["ab", "", ""]),
        Err(MachineError::InitialInputs {
            expected: 2,
            found: 3
        })
    ));

    let mut machine = TuringMachine::new(copier()).unwrap();
    assert!(machine.reset_with(&["ab"]).is_err());
    assert!(machine.reset_with::<&str>(&[]).is_err());
}

#[test]
fn reset_restores_fresh_machine() {
    let mut machine = TuringMachine::with_inputs(copier(), &["ab", ""]).unwrap();
    let fresh = machine.configuration();

    machine.step();
    machine.step();
    machine.reset_with(&["ab", ""]).unwrap();

    assert_eq!(machine.configuration(), fresh);
    assert_eq!(machine.step_count(), 0);
    assert_eq!(machine.state(), machine.start_state());
    assert_eq!(
        machine.tapes(),
        TuringMachine::with_inputs(copier(), &["ab", ""])
            .unwrap()
            .tapes()
    );
}

#[test]
fn demo_definitions_load_and_run() {
    let demos = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos");

    let copy = ProgramLoader::load_program(&demos.join("two-tape-copy.json")).unwrap();
    let mut machine = TuringMachine::with_inputs(copy, &["abba", ""]).unwrap();
    assert_eq!(machine.run(100), Status::Accept);
    assert_eq!(machine.tapes()[1].contents(), "abba");

    let parity = ProgramLoader::load_program(&demos.join("even-ones.json")).unwrap();
    let mut machine = TuringMachine::with_inputs(parity, &["0110"]).unwrap();
    assert_eq!(machine.run(100), Status::Accept);
    machine.reset_with(&["0111"]).unwrap();
    assert_eq!(machine.run(100), Status::Reject);

    let results = ProgramLoader::load_programs(&demos);
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(Result::is_ok));
}
