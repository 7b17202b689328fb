//! The transition table: the machine's program.
//!
//! Rules are indexed by state first, then by the tuple of symbols read, so the engine can
//! resolve a step with borrowed data only.

use crate::types::{Direction, MachineError, Rule, State, Symbol, TransitionKey, TransitionValue};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A finite mapping from `(state, read symbols)` to `(next state, write symbols, moves)`.
///
/// Serialized as a list of [`Rule`]s, sorted by state and read tuple.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Rule>", into = "Vec<Rule>")]
pub struct TransitionTable {
    rules: HashMap<State, HashMap<Vec<Symbol>, TransitionValue>>,
}

impl TransitionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a transition, returning the value it replaced, if any.
    pub fn insert(&mut self, key: TransitionKey, value: TransitionValue) -> Option<TransitionValue> {
        self.rules
            .entry(key.state)
            .or_default()
            .insert(key.read, value)
    }

    /// Adds a rule and returns the table, for building programs inline.
    pub fn rule(
        mut self,
        state: impl Into<State>,
        read: &[&str],
        next_state: impl Into<State>,
        write: &[&str],
        moves: &[Direction],
    ) -> Self {
        let (key, value) = Rule::new(state, read, next_state, write, moves).into_parts();
        self.insert(key, value);
        self
    }

    /// Looks up the transition for `state` reading `symbols`.
    ///
    /// Accepts borrowed symbols, at the cost of scanning the rules of `state`. The engine
    /// uses [`TransitionTable::get_exact`].
    pub fn get<S: AsRef<str>>(&self, state: &State, symbols: &[S]) -> Option<&TransitionValue> {
        self.rules.get(state)?.iter().find_map(|(read, value)| {
            (read.len() == symbols.len()
                && read.iter().zip(symbols).all(|(r, s)| r == s.as_ref()))
            .then_some(value)
        })
    }

    /// Looks up the transition for an owned read tuple in constant time.
    pub fn get_exact(&self, state: &State, symbols: &[Symbol]) -> Option<&TransitionValue> {
        self.rules.get(state)?.get(symbols)
    }

    pub fn contains(&self, state: &State, symbols: &[Symbol]) -> bool {
        self.get_exact(state, symbols).is_some()
    }

    /// Total number of transitions.
    pub fn len(&self) -> usize {
        self.rules.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// States that have at least one outgoing transition.
    pub fn states(&self) -> impl Iterator<Item = &State> {
        self.rules
            .iter()
            .filter(|(_, by_read)| !by_read.is_empty())
            .map(|(state, _)| state)
    }

    /// Iterates over every transition in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&State, &[Symbol], &TransitionValue)> {
        self.rules.iter().flat_map(|(state, by_read)| {
            by_read
                .iter()
                .map(move |(read, value)| (state, read.as_slice(), value))
        })
    }

    /// Transitions leaving `state`.
    pub fn from_state<'a>(
        &'a self,
        state: &State,
    ) -> impl Iterator<Item = (&'a [Symbol], &'a TransitionValue)> {
        self.rules
            .get(state)
            .into_iter()
            .flat_map(|by_read| by_read.iter().map(|(read, value)| (read.as_slice(), value)))
    }

    /// Returns every transition as a rule, sorted by state and read tuple.
    pub fn to_rules(&self) -> Vec<Rule> {
        let mut rules: Vec<Rule> = self
            .iter()
            .map(|(state, read, value)| {
                Rule::from_parts(
                    TransitionKey {
                        state: state.clone(),
                        read: read.to_vec(),
                    },
                    value.clone(),
                )
            })
            .collect();
        rules.sort_by(|a, b| (&a.state, &a.read).cmp(&(&b.state, &b.read)));
        rules
    }
}

impl TryFrom<Vec<Rule>> for TransitionTable {
    type Error = MachineError;

    /// Builds a table from a rule list. A deterministic machine has at most one rule per
    /// key, so a repeated key is an error rather than a silent overwrite.
    fn try_from(rules: Vec<Rule>) -> Result<Self, Self::Error> {
        let mut table = TransitionTable::new();
        for rule in rules {
            let (key, value) = rule.into_parts();
            if table.contains(&key.state, &key.read) {
                return Err(MachineError::DuplicateTransition(key.state, key.read));
            }
            table.insert(key, value);
        }
        Ok(table)
    }
}

impl From<TransitionTable> for Vec<Rule> {
    fn from(table: TransitionTable) -> Self {
        table.to_rules()
    }
}

/// Collects rules into a table; later rules replace earlier ones with the same key.
impl FromIterator<Rule> for TransitionTable {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        let mut table = TransitionTable::new();
        for rule in iter {
            let (key, value) = rule.into_parts();
            table.insert(key, value);
        }
        table
    }
}
