//! This module defines `MachineDefinition`, the immutable description of a Turing Machine:
//! its states, alphabets, blank symbol, transition table, start and final states and the
//! number of tapes.

use crate::transitions::TransitionTable;
use crate::types::{State, Symbol, DEFAULT_BLANK_SYMBOL};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Everything needed to build a machine except its initial tape contents.
///
/// `states`, `input_alphabet` and `tape_alphabet` are informational. The engine accepts
/// whatever the transition table reads and writes; mismatches are reported as lints by
/// [`crate::analyzer::lint`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineDefinition {
    /// Display name of the program.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub states: BTreeSet<State>,
    #[serde(default)]
    pub input_alphabet: BTreeSet<Symbol>,
    #[serde(default)]
    pub tape_alphabet: BTreeSet<Symbol>,
    /// The symbol filling every unwritten cell of every tape.
    #[serde(default = "default_blank")]
    pub blank: Symbol,
    pub transitions: TransitionTable,
    pub start_state: State,
    #[serde(default)]
    pub accept_states: BTreeSet<State>,
    #[serde(default)]
    pub reject_states: BTreeSet<State>,
    /// Number of tapes; every transition tuple and every set of initial inputs has this length.
    #[serde(default = "default_num_tapes")]
    pub num_tapes: usize,
}

fn default_blank() -> Symbol {
    DEFAULT_BLANK_SYMBOL.to_string()
}

fn default_num_tapes() -> usize {
    1
}

impl MachineDefinition {
    /// Creates a single-tape definition with the default blank and no final states.
    pub fn new(start_state: impl Into<State>, transitions: TransitionTable) -> Self {
        Self {
            name: String::new(),
            states: BTreeSet::new(),
            input_alphabet: BTreeSet::new(),
            tape_alphabet: BTreeSet::new(),
            blank: default_blank(),
            transitions,
            start_state: start_state.into(),
            accept_states: BTreeSet::new(),
            reject_states: BTreeSet::new(),
            num_tapes: default_num_tapes(),
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_states<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<State>,
    {
        self.states = states.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_input_alphabet(mut self, symbols: &[&str]) -> Self {
        self.input_alphabet = symbols.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_tape_alphabet(mut self, symbols: &[&str]) -> Self {
        self.tape_alphabet = symbols.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_blank(mut self, blank: impl Into<Symbol>) -> Self {
        self.blank = blank.into();
        self
    }

    pub fn with_accept_states<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<State>,
    {
        self.accept_states = states.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_reject_states<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<State>,
    {
        self.reject_states = states.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_tapes(mut self, num_tapes: usize) -> Self {
        self.num_tapes = num_tapes;
        self
    }

    pub fn is_accepting(&self, state: &State) -> bool {
        self.accept_states.contains(state)
    }

    pub fn is_rejecting(&self, state: &State) -> bool {
        self.reject_states.contains(state)
    }
}
