//! A catalogue of built-in machines, each paired with sample tape inputs.

use crate::definition::MachineDefinition;
use crate::machine::TuringMachine;
use crate::transitions::TransitionTable;
use crate::types::Direction::{Left, Right, Stay};
use crate::types::MachineError;
use std::sync::Arc;

/// A built-in machine together with inputs it is meant to be run on.
#[derive(Debug, Clone)]
pub struct Program {
    pub definition: Arc<MachineDefinition>,
    /// One sample input per tape.
    pub inputs: Vec<String>,
}

impl Program {
    fn new(definition: MachineDefinition, inputs: &[&str]) -> Self {
        Self {
            definition: Arc::new(definition),
            inputs: inputs.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.definition.name
    }

    /// Builds a machine loaded with the sample inputs.
    pub fn machine(&self) -> Result<TuringMachine, MachineError> {
        TuringMachine::with_inputs(Arc::clone(&self.definition), &self.inputs)
    }
}

lazy_static::lazy_static! {
    pub static ref PROGRAMS: Vec<Program> = vec![
        unary_successor(),
        two_tape_copy(),
        binary_increment(),
        palindrome(),
        busy_beaver_2(),
        endless_walk(),
    ];
}

/// Appends a `1` to a unary number.
fn unary_successor() -> Program {
    let transitions = TransitionTable::new()
        .rule("scan", &["1"], "scan", &["1"], &[Right])
        .rule("scan", &["_"], "done", &["1"], &[Stay]);

    let definition = MachineDefinition::new("scan", transitions)
        .named("Unary successor")
        .with_states(["scan", "done"])
        .with_input_alphabet(&["1"])
        .with_tape_alphabet(&["1", "_"])
        .with_accept_states(["done"]);

    Program::new(definition, &["111"])
}

/// Copies tape 0 onto tape 1.
fn two_tape_copy() -> Program {
    let transitions = TransitionTable::new()
        .rule("copy", &["a", "_"], "copy", &["a", "a"], &[Right, Right])
        .rule("copy", &["b", "_"], "copy", &["b", "b"], &[Right, Right])
        .rule("copy", &["_", "_"], "done", &["_", "_"], &[Stay, Stay]);

    let definition = MachineDefinition::new("copy", transitions)
        .named("Two-tape copy")
        .with_states(["copy", "done"])
        .with_input_alphabet(&["a", "b"])
        .with_tape_alphabet(&["a", "b", "_"])
        .with_accept_states(["done"])
        .with_tapes(2);

    Program::new(definition, &["ab", ""])
}

/// Adds one to a binary number written most significant bit first.
fn binary_increment() -> Program {
    let transitions = TransitionTable::new()
        .rule("right", &["0"], "right", &["0"], &[Right])
        .rule("right", &["1"], "right", &["1"], &[Right])
        .rule("right", &["_"], "carry", &["_"], &[Left])
        .rule("carry", &["1"], "carry", &["0"], &[Left])
        .rule("carry", &["0"], "done", &["1"], &[Stay])
        .rule("carry", &["_"], "done", &["1"], &[Stay]);

    let definition = MachineDefinition::new("right", transitions)
        .named("Binary increment")
        .with_states(["right", "carry", "done"])
        .with_input_alphabet(&["0", "1"])
        .with_tape_alphabet(&["0", "1", "_"])
        .with_accept_states(["done"]);

    Program::new(definition, &["1011"])
}

/// Accepts palindromes over `{a, b}` by erasing matching outer symbols.
fn palindrome() -> Program {
    let transitions = TransitionTable::new()
        .rule("start", &["a"], "have_a", &["_"], &[Right])
        .rule("start", &["b"], "have_b", &["_"], &[Right])
        .rule("start", &["_"], "accept", &["_"], &[Stay])
        .rule("have_a", &["a"], "have_a", &["a"], &[Right])
        .rule("have_a", &["b"], "have_a", &["b"], &[Right])
        .rule("have_a", &["_"], "check_a", &["_"], &[Left])
        .rule("have_b", &["a"], "have_b", &["a"], &[Right])
        .rule("have_b", &["b"], "have_b", &["b"], &[Right])
        .rule("have_b", &["_"], "check_b", &["_"], &[Left])
        .rule("check_a", &["a"], "back", &["_"], &[Left])
        .rule("check_a", &["b"], "reject", &["b"], &[Stay])
        .rule("check_a", &["_"], "accept", &["_"], &[Stay])
        .rule("check_b", &["b"], "back", &["_"], &[Left])
        .rule("check_b", &["a"], "reject", &["a"], &[Stay])
        .rule("check_b", &["_"], "accept", &["_"], &[Stay])
        .rule("back", &["a"], "back", &["a"], &[Left])
        .rule("back", &["b"], "back", &["b"], &[Left])
        .rule("back", &["_"], "start", &["_"], &[Right]);

    let definition = MachineDefinition::new("start", transitions)
        .named("Palindrome checker")
        .with_states([
            "start", "have_a", "have_b", "check_a", "check_b", "back", "accept", "reject",
        ])
        .with_input_alphabet(&["a", "b"])
        .with_tape_alphabet(&["a", "b", "_"])
        .with_accept_states(["accept"])
        .with_reject_states(["reject"]);

    Program::new(definition, &["abba"])
}

/// The 2-state, 2-symbol busy beaver. Halts after 6 steps with four `1`s, in a state that
/// is neither accepting nor rejecting.
fn busy_beaver_2() -> Program {
    let transitions = TransitionTable::new()
        .rule("A", &["0"], "B", &["1"], &[Right])
        .rule("A", &["1"], "B", &["1"], &[Left])
        .rule("B", &["0"], "A", &["1"], &[Left])
        .rule("B", &["1"], "H", &["1"], &[Right]);

    let definition = MachineDefinition::new("A", transitions)
        .named("Busy beaver 2")
        .with_states(["A", "B", "H"])
        .with_tape_alphabet(&["0", "1"])
        .with_blank("0");

    Program::new(definition, &[""])
}

/// Walks right forever.
fn endless_walk() -> Program {
    let transitions = TransitionTable::new().rule("walk", &["_"], "walk", &["_"], &[Right]);

    let definition = MachineDefinition::new("walk", transitions)
        .named("Endless walk")
        .with_states(["walk"])
        .with_tape_alphabet(&["_"]);

    Program::new(definition, &[""])
}

/// Lookup helpers over [`PROGRAMS`].
pub struct ProgramCatalog;

impl ProgramCatalog {
    /// Get the number of available programs
    pub fn count() -> usize {
        PROGRAMS.len()
    }

    /// Get a program by its index
    pub fn get_by_index(index: usize) -> Result<&'static Program, MachineError> {
        PROGRAMS.get(index).ok_or_else(|| {
            MachineError::ProgramNotFound(format!("Program index {} out of range", index))
        })
    }

    /// Get a program by its name, ignoring case
    pub fn get_by_name(name: &str) -> Result<&'static Program, MachineError> {
        PROGRAMS
            .iter()
            .find(|program| program.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| MachineError::ProgramNotFound(format!("Program '{}' not found", name)))
    }

    /// List all program names
    pub fn list_names() -> Vec<&'static str> {
        PROGRAMS.iter().map(Program::name).collect()
    }

    /// Search for programs by name
    pub fn search(query: &str) -> Vec<usize> {
        let query = query.to_lowercase();
        PROGRAMS
            .iter()
            .enumerate()
            .filter(|(_, program)| program.name().to_lowercase().contains(&query))
            .map(|(index, _)| index)
            .collect()
    }

    /// Get information about a program by its index
    pub fn info(index: usize) -> Result<ProgramInfo, MachineError> {
        let program = Self::get_by_index(index)?;
        let definition = &program.definition;

        Ok(ProgramInfo {
            index,
            name: definition.name.clone(),
            start_state: definition.start_state.to_string(),
            inputs: program.inputs.clone(),
            num_tapes: definition.num_tapes,
            state_count: definition.states.len(),
            transition_count: definition.transitions.len(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct ProgramInfo {
    pub index: usize,
    pub name: String,
    pub start_state: String,
    pub inputs: Vec<String>,
    pub num_tapes: usize,
    pub state_count: usize,
    pub transition_count: usize,
}
