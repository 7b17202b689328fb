//! This module checks machine definitions before execution. `validate` rejects definitions
//! the engine cannot run consistently; `lint` reports suspicious but runnable definitions,
//! such as states or symbols missing from the declared sets and unreachable states.

use crate::definition::MachineDefinition;
use crate::types::{MachineError, State, Symbol};
use std::collections::BTreeSet;
use std::fmt;

/// A non-fatal finding about a machine definition.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Lint {
    /// States used by the definition but missing from `states`.
    UndeclaredStates(Vec<State>),
    /// Symbols read or written by transitions but missing from `tape_alphabet`.
    UndeclaredSymbols(Vec<Symbol>),
    /// The blank symbol is missing from `tape_alphabet`.
    BlankNotInTapeAlphabet(Symbol),
    /// Input symbols missing from `tape_alphabet`.
    InputNotInTapeAlphabet(Vec<Symbol>),
    /// States with outgoing transitions that cannot be reached from the start state.
    UnreachableStates(Vec<State>),
}

impl fmt::Display for Lint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lint::UndeclaredStates(states) => {
                write!(f, "States used but not declared: {:?}", labels(states))
            }
            Lint::UndeclaredSymbols(symbols) => {
                write!(f, "Symbols used but not in the tape alphabet: {:?}", symbols)
            }
            Lint::BlankNotInTapeAlphabet(blank) => {
                write!(f, "Blank symbol {:?} is not in the tape alphabet", blank)
            }
            Lint::InputNotInTapeAlphabet(symbols) => {
                write!(f, "Input symbols not in the tape alphabet: {:?}", symbols)
            }
            Lint::UnreachableStates(states) => {
                write!(f, "Unreachable states detected: {:?}", labels(states))
            }
        }
    }
}

fn labels(states: &[State]) -> Vec<&str> {
    states.iter().map(State::as_str).collect()
}

/// Checks that a definition can be executed.
///
/// # Returns
///
/// * `Ok(())` if the definition is consistent.
/// * `Err(MachineError::NoTapes)` if `num_tapes` is zero.
/// * `Err(MachineError::ArityMismatch)` if a transition tuple does not have one entry per tape.
/// * `Err(MachineError::AmbiguousFinalStates)` if a state is both accepting and rejecting.
pub fn validate(definition: &MachineDefinition) -> Result<(), MachineError> {
    check_tapes(definition)?;
    check_arity(definition)?;
    check_final_states(definition)?;

    Ok(())
}

/// Collects every lint for a definition. An empty result means nothing looked suspicious.
pub fn lint(definition: &MachineDefinition) -> Vec<Lint> {
    [
        check_declared_states,
        check_declared_symbols,
        check_blank_declared,
        check_input_alphabet,
        check_unreachable_states,
    ]
    .iter()
    .filter_map(|f| f(definition))
    .collect()
}

fn check_tapes(definition: &MachineDefinition) -> Result<(), MachineError> {
    if definition.num_tapes == 0 {
        return Err(MachineError::NoTapes);
    }

    Ok(())
}

/// Every read, write and move tuple must have exactly `num_tapes` entries.
fn check_arity(definition: &MachineDefinition) -> Result<(), MachineError> {
    let expected = definition.num_tapes;

    for (state, read, value) in definition.transitions.iter() {
        let found = [read.len(), value.write.len(), value.moves.len()]
            .into_iter()
            .find(|&len| len != expected);

        if let Some(found) = found {
            return Err(MachineError::ArityMismatch {
                state: state.clone(),
                expected,
                found,
            });
        }
    }

    Ok(())
}

/// A state that is both accepting and rejecting has no well-defined outcome.
fn check_final_states(definition: &MachineDefinition) -> Result<(), MachineError> {
    let ambiguous: Vec<State> = definition
        .accept_states
        .intersection(&definition.reject_states)
        .cloned()
        .collect();

    if !ambiguous.is_empty() {
        return Err(MachineError::AmbiguousFinalStates(ambiguous));
    }

    Ok(())
}

/// Reports states referenced anywhere in the definition but absent from `states`.
/// Skipped when no states are declared at all.
fn check_declared_states(definition: &MachineDefinition) -> Option<Lint> {
    if definition.states.is_empty() {
        return None;
    }

    let mut used: BTreeSet<&State> = BTreeSet::new();
    used.insert(&definition.start_state);
    used.extend(&definition.accept_states);
    used.extend(&definition.reject_states);
    for (state, _, value) in definition.transitions.iter() {
        used.insert(state);
        used.insert(&value.next_state);
    }

    let undeclared: Vec<State> = used
        .into_iter()
        .filter(|state| !definition.states.contains(*state))
        .cloned()
        .collect();

    (!undeclared.is_empty()).then_some(Lint::UndeclaredStates(undeclared))
}

/// Reports symbols the transitions read or write that are absent from `tape_alphabet`.
/// Skipped when no tape alphabet is declared.
fn check_declared_symbols(definition: &MachineDefinition) -> Option<Lint> {
    if definition.tape_alphabet.is_empty() {
        return None;
    }

    let undeclared: BTreeSet<Symbol> = definition
        .transitions
        .iter()
        .flat_map(|(_, read, value)| read.iter().chain(value.write.iter()))
        .filter(|symbol| !definition.tape_alphabet.contains(*symbol))
        .cloned()
        .collect();

    (!undeclared.is_empty()).then(|| Lint::UndeclaredSymbols(undeclared.into_iter().collect()))
}

fn check_blank_declared(definition: &MachineDefinition) -> Option<Lint> {
    (!definition.tape_alphabet.is_empty()
        && !definition.tape_alphabet.contains(&definition.blank))
    .then(|| Lint::BlankNotInTapeAlphabet(definition.blank.clone()))
}

fn check_input_alphabet(definition: &MachineDefinition) -> Option<Lint> {
    if definition.tape_alphabet.is_empty() {
        return None;
    }

    let missing: Vec<Symbol> = definition
        .input_alphabet
        .difference(&definition.tape_alphabet)
        .cloned()
        .collect();

    (!missing.is_empty()).then_some(Lint::InputNotInTapeAlphabet(missing))
}

/// Walks the transition graph from the start state. States that have outgoing
/// transitions but are never visited are unreachable.
fn check_unreachable_states(definition: &MachineDefinition) -> Option<Lint> {
    let mut visited: BTreeSet<&State> = BTreeSet::new();
    let mut queue = vec![&definition.start_state];

    while let Some(state) = queue.pop() {
        if !visited.insert(state) {
            continue;
        }

        for (_, value) in definition.transitions.from_state(state) {
            if !visited.contains(&value.next_state) {
                queue.push(&value.next_state);
            }
        }
    }

    let unreachable: BTreeSet<State> = definition
        .transitions
        .states()
        .filter(|state| !visited.contains(state))
        .cloned()
        .collect();

    (!unreachable.is_empty()).then(|| Lint::UnreachableStates(unreachable.into_iter().collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transitions::TransitionTable;
    use crate::types::Direction::{Right, Stay};

    fn create_test_definition() -> MachineDefinition {
        let transitions = TransitionTable::new()
            .rule("start", &["a"], "start", &["b"], &[Right])
            .rule("start", &["_"], "done", &["_"], &[Stay]);

        MachineDefinition::new("start", transitions)
            .with_states(["start", "done"])
            .with_input_alphabet(&["a"])
            .with_tape_alphabet(&["a", "b", "_"])
            .with_accept_states(["done"])
    }

    #[test]
    fn test_valid_definition() {
        let definition = create_test_definition();

        assert_eq!(validate(&definition), Ok(()));
        assert!(lint(&definition).is_empty());
    }

    #[test]
    fn test_zero_tapes() {
        let definition = create_test_definition().with_tapes(0);

        assert_eq!(validate(&definition), Err(MachineError::NoTapes));
    }

    #[test]
    fn test_arity_mismatch() {
        let definition = create_test_definition().with_tapes(2);

        match validate(&definition) {
            Err(MachineError::ArityMismatch {
                state,
                expected,
                found,
            }) => {
                assert_eq!(state, "start");
                assert_eq!(expected, 2);
                assert_eq!(found, 1);
            }
            other => panic!("Expected an arity mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_arity_mismatch_in_moves_only() {
        let mut transitions = TransitionTable::new();
        let (key, mut value) =
            crate::types::Rule::new("q0", &["a"], "q0", &["a"], &[Right]).into_parts();
        value.moves.push(Right);
        transitions.insert(key, value);

        let definition = MachineDefinition::new("q0", transitions);

        assert!(matches!(
            validate(&definition),
            Err(MachineError::ArityMismatch { found: 2, .. })
        ));
    }

    #[test]
    fn test_ambiguous_final_states() {
        let definition = create_test_definition()
            .with_accept_states(["done", "start"])
            .with_reject_states(["done"]);

        assert_eq!(
            validate(&definition),
            Err(MachineError::AmbiguousFinalStates(vec![State::from("done")]))
        );
    }

    #[test]
    fn test_undeclared_states() {
        let definition = create_test_definition()
            .with_states(["start"])
            .with_reject_states(["nope"]);

        let lints = lint(&definition);
        assert!(lints.contains(&Lint::UndeclaredStates(vec![
            State::from("done"),
            State::from("nope")
        ])));
    }

    #[test]
    fn test_undeclared_symbols() {
        let definition = create_test_definition().with_tape_alphabet(&["a", "_"]);

        let lints = lint(&definition);
        assert_eq!(lints, vec![Lint::UndeclaredSymbols(vec!["b".to_string()])]);
    }

    #[test]
    fn test_blank_and_input_not_in_tape_alphabet() {
        let definition = create_test_definition()
            .with_input_alphabet(&["a", "z"])
            .with_tape_alphabet(&["a", "b"]);

        let lints = lint(&definition);
        assert!(lints.contains(&Lint::BlankNotInTapeAlphabet("_".to_string())));
        assert!(lints.contains(&Lint::InputNotInTapeAlphabet(vec!["z".to_string()])));
    }

    #[test]
    fn test_unreachable_states() {
        let transitions = TransitionTable::new()
            .rule("start", &["a"], "middle", &["a"], &[Right])
            .rule("middle", &["a"], "start", &["a"], &[Right])
            .rule("island", &["a"], "lagoon", &["a"], &[Right])
            .rule("lagoon", &["a"], "island", &["a"], &[Right]);
        let definition = MachineDefinition::new("start", transitions);

        assert_eq!(
            lint(&definition),
            vec![Lint::UnreachableStates(vec![
                State::from("island"),
                State::from("lagoon")
            ])]
        );
    }

    #[test]
    fn test_lints_are_skipped_without_declarations() {
        let transitions = TransitionTable::new().rule("q0", &["x"], "q1", &["y"], &[Right]);
        let definition = MachineDefinition::new("q0", transitions);

        assert!(lint(&definition).is_empty());
    }

    #[test]
    fn test_lint_display() {
        let lint = Lint::UnreachableStates(vec![State::from("q9")]);
        assert!(lint.to_string().contains("q9"));
    }
}
