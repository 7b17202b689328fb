//! This module defines the core data structures and types used throughout the Turing Machine
//! simulator, including states, symbols, head moves, execution outcomes and error types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The default blank symbol used on every tape.
pub const DEFAULT_BLANK_SYMBOL: &str = "_";
/// The default number of steps `run` is allowed to take.
pub const DEFAULT_MAX_STEPS: usize = 10_000;

/// A tape symbol. Symbols are short strings; the blank is one designated symbol.
pub type Symbol = String;

/// An opaque control-state identifier.
///
/// States only need equality and hashing. A state carries a caller supplied label, which
/// keeps numeric states (`State::from(3)`) and named states (`State::from("q0")`) in a single
/// comparable type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct State(String);

impl State {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Returns the label of this state.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for State {
    fn from(label: &str) -> Self {
        Self(label.to_string())
    }
}

impl From<String> for State {
    fn from(label: String) -> Self {
        Self(label)
    }
}

impl From<&State> for State {
    fn from(state: &State) -> Self {
        state.clone()
    }
}

macro_rules! state_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for State {
                fn from(id: $ty) -> Self {
                    Self(id.to_string())
                }
            }
        )*
    };
}

state_from_integer!(u8, u16, u32, u64, usize, i32, i64);

impl PartialEq<str> for State {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for State {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Represents the possible directions a Turing Machine head can move.
///
/// Serialized as the integer offset it applies to the head: `-1`, `0` or `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Direction {
    /// Move the head one position to the left.
    Left,
    /// Keep the head in the same position.
    Stay,
    /// Move the head one position to the right.
    Right,
}

impl Direction {
    /// Returns the signed offset this move applies to a head position.
    pub fn offset(self) -> i64 {
        match self {
            Direction::Left => -1,
            Direction::Stay => 0,
            Direction::Right => 1,
        }
    }
}

impl TryFrom<i64> for Direction {
    type Error = MachineError;

    fn try_from(offset: i64) -> Result<Self, Self::Error> {
        match offset {
            -1 => Ok(Direction::Left),
            0 => Ok(Direction::Stay),
            1 => Ok(Direction::Right),
            other => Err(MachineError::InvalidMove(other)),
        }
    }
}

impl From<Direction> for i64 {
    fn from(direction: Direction) -> Self {
        direction.offset()
    }
}

/// The left-hand side of a transition: the current state and the symbols read, one per tape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransitionKey {
    pub state: State,
    pub read: Vec<Symbol>,
}

/// The right-hand side of a transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionValue {
    /// The state the machine moves to.
    pub next_state: State,
    /// The symbols to write, one per tape.
    pub write: Vec<Symbol>,
    /// The head moves, one per tape.
    pub moves: Vec<Direction>,
}

/// A single transition rule, the flat form used when a transition table is serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub state: State,
    pub read: Vec<Symbol>,
    pub next_state: State,
    pub write: Vec<Symbol>,
    pub moves: Vec<Direction>,
}

impl Rule {
    /// Creates a rule from borrowed symbol lists.
    pub fn new(
        state: impl Into<State>,
        read: &[&str],
        next_state: impl Into<State>,
        write: &[&str],
        moves: &[Direction],
    ) -> Self {
        Self {
            state: state.into(),
            read: read.iter().map(|s| s.to_string()).collect(),
            next_state: next_state.into(),
            write: write.iter().map(|s| s.to_string()).collect(),
            moves: moves.to_vec(),
        }
    }

    /// Splits the rule into its key and value.
    pub fn into_parts(self) -> (TransitionKey, TransitionValue) {
        (
            TransitionKey {
                state: self.state,
                read: self.read,
            },
            TransitionValue {
                next_state: self.next_state,
                write: self.write,
                moves: self.moves,
            },
        )
    }

    /// Joins a key and a value back into a rule.
    pub fn from_parts(key: TransitionKey, value: TransitionValue) -> Self {
        Self {
            state: key.state,
            read: key.read,
            next_state: value.next_state,
            write: value.write,
            moves: value.moves,
        }
    }
}

/// The outcome of a single step or of a bounded run.
///
/// `Running` is the only non-terminal value. When returned by `run` it means the step budget
/// was spent before the machine reached a halting classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    /// A transition was applied and the new state is neither accepting nor rejecting.
    Running,
    /// The machine is in an accepting state.
    Accept,
    /// The machine is in a rejecting state.
    Reject,
    /// No transition applies and the state is neither accepting nor rejecting.
    Halt,
}

impl Status {
    /// Returns the exact token for this status.
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Running => "RUNNING",
            Status::Accept => "ACCEPT",
            Status::Reject => "REJECT",
            Status::Halt => "HALT",
        }
    }

    pub fn is_terminal(self) -> bool {
        self != Status::Running
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = MachineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "RUNNING" => Ok(Status::Running),
            "ACCEPT" => Ok(Status::Accept),
            "REJECT" => Ok(Status::Reject),
            "HALT" => Ok(Status::Halt),
            other => Err(MachineError::ParseError(format!(
                "Unknown status token: {}",
                other
            ))),
        }
    }
}

/// A snapshot of a machine: control state, rendered tapes and step counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    pub state: State,
    pub tapes: Vec<String>,
    pub step: usize,
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Step: {}, State: {}, Tapes: [{}]",
            self.step,
            self.state,
            self.tapes.join(" | ")
        )
    }
}

/// Represents the errors that can occur while configuring or loading a machine.
///
/// Undefined transitions and exhausted step budgets are not errors; they are reported
/// through [`Status`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MachineError {
    /// The number of initial inputs does not match the number of tapes.
    #[error("Expected {expected} initial inputs (one per tape), got {found}")]
    InitialInputs { expected: usize, found: usize },
    /// A machine needs at least one tape.
    #[error("A machine needs at least one tape")]
    NoTapes,
    /// A transition tuple does not have one entry per tape.
    #[error("Transition from state {state} has {found} entries, expected {expected}")]
    ArityMismatch {
        state: State,
        expected: usize,
        found: usize,
    },
    /// The same states were declared both accepting and rejecting.
    #[error("States are both accepting and rejecting: {0:?}")]
    AmbiguousFinalStates(Vec<State>),
    /// Two rules share the same state and read tuple.
    #[error("Duplicate transition for state {0} reading {1:?}")]
    DuplicateTransition(State, Vec<Symbol>),
    /// A head move outside of -1, 0 and 1.
    #[error("Invalid head move: {0} (expected -1, 0 or 1)")]
    InvalidMove(i64),
    /// A machine definition could not be decoded.
    #[error("Program parsing error: {0}")]
    ParseError(String),
    /// A definition file or directory could not be read.
    #[error("File error: {0}")]
    FileError(String),
    /// No built-in program matches the request.
    #[error("Program not found: {0}")]
    ProgramNotFound(String),
}

impl From<serde_json::Error> for MachineError {
    fn from(error: serde_json::Error) -> Self {
        MachineError::ParseError(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(Status::Running, "RUNNING")]
    #[test_case(Status::Accept, "ACCEPT")]
    #[test_case(Status::Reject, "REJECT")]
    #[test_case(Status::Halt, "HALT")]
    fn test_status_tokens(status: Status, token: &str) {
        assert_eq!(status.to_string(), token);
        assert_eq!(serde_json::to_string(&status).unwrap(), format!("\"{}\"", token));
        assert_eq!(token.parse::<Status>().unwrap(), status);
    }

    #[test]
    fn test_only_running_is_non_terminal() {
        assert!(!Status::Running.is_terminal());
        assert!(Status::Accept.is_terminal());
        assert!(Status::Reject.is_terminal());
        assert!(Status::Halt.is_terminal());
    }

    #[test]
    fn test_direction_serialization() {
        assert_eq!(serde_json::to_string(&Direction::Left).unwrap(), "-1");
        assert_eq!(serde_json::to_string(&Direction::Right).unwrap(), "1");

        let stay: Direction = serde_json::from_str("0").unwrap();
        assert_eq!(stay, Direction::Stay);

        let invalid = serde_json::from_str::<Direction>("2");
        assert!(invalid.is_err());
    }

    #[test]
    fn test_direction_try_from() {
        assert_eq!(Direction::try_from(-1), Ok(Direction::Left));
        assert_eq!(Direction::try_from(7), Err(MachineError::InvalidMove(7)));
    }

    #[test]
    fn test_state_labels() {
        assert_eq!(State::from(3u32), State::from("3"));
        assert_eq!(State::from("q0"), "q0");
        assert_eq!(serde_json::to_string(&State::from("q0")).unwrap(), "\"q0\"");
    }

    #[test]
    fn test_rule_parts() {
        let rule = Rule::new("q0", &["a"], "q1", &["b"], &[Direction::Right]);
        let (key, value) = rule.clone().into_parts();

        assert_eq!(key.state, "q0");
        assert_eq!(value.write, vec!["b".to_string()]);
        assert_eq!(Rule::from_parts(key, value), rule);
    }

    #[test]
    fn test_error_display() {
        let error = MachineError::InitialInputs {
            expected: 2,
            found: 1,
        };

        let error_msg = format!("{}", error);
        assert!(error_msg.contains("Expected 2"));
        assert!(error_msg.contains("got 1"));
    }
}
