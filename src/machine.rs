//! This module defines the `TuringMachine` struct, which executes a deterministic multi-tape
//! Turing Machine. It owns the tapes and the control state and resolves each step against the
//! read-only transition table of its `MachineDefinition`.

use crate::analyzer::{lint, validate};
use crate::definition::MachineDefinition;
use crate::tape::Tape;
use crate::types::{Configuration, MachineError, State, Status, Symbol, TransitionValue};
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Represents a multi-tape Turing Machine.
///
/// The definition is shared through an `Arc` and never mutated, so any number of machines
/// can execute the same program. Tapes are owned by the machine and rebuilt on every
/// [`TuringMachine::reset`].
///
/// Stepping after a terminal status is allowed and re-evaluates the current configuration.
/// When no transition applies this reproduces the same status; when the machine stopped by
/// entering an accepting or rejecting state that still has an applicable transition, the
/// next `step` applies it.
#[derive(Debug, Clone)]
pub struct TuringMachine {
    definition: Arc<MachineDefinition>,
    tapes: Vec<Tape>,
    state: State,
    step_count: usize,
}

impl TuringMachine {
    /// Creates a machine with every tape blank.
    ///
    /// # Returns
    ///
    /// * `Ok(TuringMachine)` in the start state with a step count of 0.
    /// * `Err(MachineError)` if the definition fails [`validate`].
    pub fn new(definition: impl Into<Arc<MachineDefinition>>) -> Result<Self, MachineError> {
        let definition = definition.into();
        let inputs = vec![""; definition.num_tapes];
        Self::with_inputs(definition, inputs.as_slice())
    }

    /// Creates a machine whose tapes hold `inputs`, one string per tape.
    ///
    /// # Returns
    ///
    /// * `Err(MachineError::InitialInputs)` if `inputs.len()` differs from `num_tapes`.
    /// * `Err(MachineError)` if the definition fails [`validate`].
    pub fn with_inputs<S: AsRef<str>>(
        definition: impl Into<Arc<MachineDefinition>>,
        inputs: &[S],
    ) -> Result<Self, MachineError> {
        let definition = definition.into();
        validate(&definition)?;

        for finding in lint(&definition) {
            warn!(program = %definition.name, "{}", finding);
        }

        let tapes = build_tapes(&definition, inputs)?;
        debug!(
            program = %definition.name,
            tapes = definition.num_tapes,
            transitions = definition.transitions.len(),
            "machine created"
        );

        Ok(Self {
            state: definition.start_state.clone(),
            definition,
            tapes,
            step_count: 0,
        })
    }

    /// Resets the machine to its start state with every tape blank.
    pub fn reset(&mut self) {
        self.tapes = (0..self.definition.num_tapes)
            .map(|_| Tape::empty(self.definition.blank.as_str()))
            .collect();
        self.restart();
    }

    /// Resets the machine to its start state with new tape contents.
    ///
    /// On error the machine is left untouched.
    pub fn reset_with<S: AsRef<str>>(&mut self, inputs: &[S]) -> Result<(), MachineError> {
        self.tapes = build_tapes(&self.definition, inputs)?;
        self.restart();
        Ok(())
    }

    fn restart(&mut self) {
        self.state = self.definition.start_state.clone();
        self.step_count = 0;
        debug!(program = %self.definition.name, "machine reset");
    }

    /// Returns a snapshot of the current state, rendered tapes and step count.
    pub fn configuration(&self) -> Configuration {
        Configuration {
            state: self.state.clone(),
            tapes: self.tapes.iter().map(Tape::to_string).collect(),
            step: self.step_count,
        }
    }

    /// Executes a single step.
    ///
    /// Reads every head, looks up `(state, symbols)` and, if a transition exists, writes
    /// every tape, then moves every head, in tape order, before entering the next state.
    ///
    /// # Returns
    ///
    /// * `Status::Running` if a transition was applied and the new state is not final.
    /// * `Status::Accept` / `Status::Reject` if the resulting (or, when no transition
    ///   applies, the current) state is accepting / rejecting. Accepting wins.
    /// * `Status::Halt` if no transition applies and the current state is not final.
    pub fn step(&mut self) -> Status {
        let symbols = self.symbols();
        let Some(transition) = self
            .definition
            .transitions
            .get_exact(&self.state, &symbols)
        else {
            let status = self.halting_status();
            trace!(state = %self.state, ?symbols, %status, "no transition");
            return status;
        };

        for (tape, symbol) in self.tapes.iter_mut().zip(&transition.write) {
            tape.write(symbol);
        }
        for (tape, &direction) in self.tapes.iter_mut().zip(&transition.moves) {
            tape.move_head(direction);
        }

        self.state = transition.next_state.clone();
        self.step_count += 1;

        let status = self.classify(Status::Running);
        trace!(step = self.step_count, state = %self.state, %status, "step");
        status
    }

    /// Steps until the machine stops or `step_count` reaches `max_steps`.
    ///
    /// Returns the last status. `Status::Running` means the budget ran out; calling `run`
    /// again with a larger budget resumes where this call stopped. If `step_count` is
    /// already at or above `max_steps`, no step is taken and `Status::Running` is returned.
    pub fn run(&mut self, max_steps: usize) -> Status {
        let mut status = Status::Running;
        while status == Status::Running && self.step_count < max_steps {
            status = self.step();
        }

        debug!(
            program = %self.definition.name,
            steps = self.step_count,
            state = %self.state,
            %status,
            "run finished"
        );
        status
    }

    /// Returns an iterator over the configurations reached by stepping, at most `max_steps`
    /// in total counted from the current step count.
    pub fn trace(&mut self, max_steps: usize) -> Trace<'_> {
        Trace {
            machine: self,
            max_steps,
            done: false,
        }
    }

    fn halting_status(&self) -> Status {
        self.classify(Status::Halt)
    }

    fn classify(&self, otherwise: Status) -> Status {
        if self.definition.is_accepting(&self.state) {
            Status::Accept
        } else if self.definition.is_rejecting(&self.state) {
            Status::Reject
        } else {
            otherwise
        }
    }

    /// Returns the current state.
    pub fn state(&self) -> &State {
        &self.state
    }

    /// Returns the start state.
    pub fn start_state(&self) -> &State {
        &self.definition.start_state
    }

    /// Returns the number of transitions applied since construction or the last reset.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    pub fn tapes(&self) -> &[Tape] {
        &self.tapes
    }

    pub fn num_tapes(&self) -> usize {
        self.tapes.len()
    }

    /// Returns the head positions of all tapes.
    pub fn heads(&self) -> Vec<i64> {
        self.tapes.iter().map(Tape::head).collect()
    }

    /// Returns the symbols currently under each head, in tape order.
    ///
    /// | a | b | c | tape 0
    /// | d | e |   | tape 1
    ///   0   1   2   position
    ///
    /// heads [0, 2] read ["a", "_"]
    pub fn symbols(&self) -> Vec<Symbol> {
        self.tapes.iter().map(|tape| tape.read().to_string()).collect()
    }

    /// Returns the transition the next `step` would apply, if any.
    pub fn transition(&self) -> Option<&TransitionValue> {
        self.definition
            .transitions
            .get_exact(&self.state, &self.symbols())
    }

    pub fn definition(&self) -> &MachineDefinition {
        &self.definition
    }
}

/// Builds fresh tapes from `inputs`, one per tape.
fn build_tapes<S: AsRef<str>>(
    definition: &MachineDefinition,
    inputs: &[S],
) -> Result<Vec<Tape>, MachineError> {
    if inputs.len() != definition.num_tapes {
        return Err(MachineError::InitialInputs {
            expected: definition.num_tapes,
            found: inputs.len(),
        });
    }

    if !definition.input_alphabet.is_empty() {
        for (i, input) in inputs.iter().enumerate() {
            let outside: Vec<char> = input
                .as_ref()
                .chars()
                .filter(|c| !definition.input_alphabet.contains(&c.to_string()))
                .collect();
            if !outside.is_empty() {
                warn!(tape = i, symbols = ?outside, "input symbols outside the input alphabet");
            }
        }
    }

    Ok(inputs
        .iter()
        .map(|input| Tape::new(definition.blank.as_str(), input.as_ref()))
        .collect())
}

/// One entry of an execution trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceEntry {
    /// The status returned by the step.
    pub status: Status,
    /// The configuration after the step.
    pub configuration: Configuration,
}

/// Iterator returned by [`TuringMachine::trace`].
///
/// Yields one entry per call to `step`. The final entry carries the terminal status; no
/// entry is produced once the step budget is spent.
pub struct Trace<'a> {
    machine: &'a mut TuringMachine,
    max_steps: usize,
    done: bool,
}

impl Iterator for Trace<'_> {
    type Item = TraceEntry;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.machine.step_count >= self.max_steps {
            return None;
        }

        let status = self.machine.step();
        self.done = status.is_terminal();

        Some(TraceEntry {
            status,
            configuration: self.machine.configuration(),
        })
    }
}
