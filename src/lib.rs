//! This crate provides the core logic for a deterministic multi-tape Turing Machine simulator.
//! It includes modules for the sparse tape, the transition table, definition checks, the
//! execution engine, loading definitions from JSON and a catalogue of built-in machines.

pub mod analyzer;
pub mod definition;
pub mod loader;
pub mod machine;
pub mod programs;
pub mod tape;
pub mod transitions;
pub mod types;

/// Re-exports the checks from the analyzer module.
pub use analyzer::{lint, validate, Lint};
/// Re-exports the `MachineDefinition` struct from the definition module.
pub use definition::MachineDefinition;
/// Re-exports the `ProgramLoader` struct from the loader module.
pub use loader::ProgramLoader;
/// Re-exports the execution engine and its trace types from the machine module.
pub use machine::{Trace, TraceEntry, TuringMachine};
/// Re-exports `Program`, `ProgramCatalog`, `ProgramInfo` and `PROGRAMS` from the programs module.
pub use programs::{Program, ProgramCatalog, ProgramInfo, PROGRAMS};
/// Re-exports the `Tape` struct from the tape module.
pub use tape::Tape;
/// Re-exports the `TransitionTable` struct from the transitions module.
pub use transitions::TransitionTable;
/// Re-exports the core types from the types module.
pub use types::{
    Configuration, Direction, MachineError, Rule, State, Status, Symbol, TransitionKey,
    TransitionValue, DEFAULT_BLANK_SYMBOL, DEFAULT_MAX_STEPS,
};
