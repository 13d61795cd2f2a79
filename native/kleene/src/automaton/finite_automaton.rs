//! The finite automaton value type and its builder.

use crate::automaton::state::{StateId, StateSet};
use crate::automaton::symbol::{EPSILON, Symbol, is_epsilon};
use crate::error::{Error, Result};
use indexmap::IndexSet;
use std::collections::{BTreeSet, HashMap};

/// A labeled edge in the graph representation: (source, destination, label).
pub type GraphEdge<'a> = (&'a str, &'a str, String);

/// A finite automaton, possibly nondeterministic and with epsilon transitions.
///
/// Values are only produced by [`AutomatonBuilder::build`] (or by the
/// algorithms in this crate) and are never mutated afterwards.
#[derive(Debug, Clone)]
pub struct FiniteAutomaton {
    /// State labels; the index of a label is its `StateId`
    states: IndexSet<String>,
    initial_state: StateId,
    /// Input alphabet, never containing `EPSILON`
    alphabet: BTreeSet<Symbol>,
    /// (source, symbol) -> destinations; epsilon edges use `EPSILON`
    transitions: HashMap<(StateId, Symbol), StateSet>,
    final_states: StateSet,
}

impl FiniteAutomaton {
    /// Number of states. Ids are `0..num_states()`.
    pub fn num_states(&self) -> StateId {
        self.states.len() as StateId
    }

    /// The single initial state.
    pub fn initial_state(&self) -> StateId {
        self.initial_state
    }

    /// The accepting states.
    pub fn final_states(&self) -> &StateSet {
        &self.final_states
    }

    /// Check if a state is accepting.
    pub fn is_final(&self, state: StateId) -> bool {
        self.final_states.contains(state)
    }

    /// The alphabet in ascending order (epsilon excluded).
    pub fn alphabet(&self) -> &BTreeSet<Symbol> {
        &self.alphabet
    }

    /// Label of a state, if it exists.
    pub fn label(&self, state: StateId) -> Option<&str> {
        self.states.get_index(state as usize).map(String::as_str)
    }

    /// Look up a state by label.
    pub fn state_id(&self, label: &str) -> Option<StateId> {
        self.states.get_index_of(label).map(|i| i as StateId)
    }

    /// All state labels, ordered by `StateId`.
    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.states.iter().map(String::as_str)
    }

    /// Destinations of `source` on exactly `symbol` (which may be `EPSILON`).
    pub fn successors(&self, source: StateId, symbol: Symbol) -> Option<&StateSet> {
        self.transitions.get(&(source, symbol))
    }

    /// Check if any state has an epsilon edge.
    pub fn has_epsilon_transitions(&self) -> bool {
        self.transitions
            .iter()
            .any(|(&(_, symbol), dests)| is_epsilon(symbol) && !dests.is_empty())
    }

    /// Get all transitions as an iterator.
    pub fn transitions(&self) -> impl Iterator<Item = (StateId, Symbol, StateId)> + '_ {
        self.transitions
            .iter()
            .flat_map(|(&(src, sym), dests)| dests.iter().map(move |dst| (src, sym, dst)))
    }

    /// Convert to a graph representation for renderers.
    /// Returns `(nodes, edges)` with edges sorted and epsilon labelled `λ`.
    pub fn to_graph(&self) -> (Vec<&str>, Vec<GraphEdge<'_>>) {
        let mut triples: Vec<_> = self.transitions().collect();
        triples.sort_unstable();

        let edges = triples
            .into_iter()
            .filter_map(|(src, sym, dst)| {
                Some((self.label(src)?, self.label(dst)?, sym.to_string()))
            })
            .collect();

        (self.labels().collect(), edges)
    }
}

/// Incrementally assembles a [`FiniteAutomaton`], validating it on [`build`](Self::build).
#[derive(Debug, Clone, Default)]
pub struct AutomatonBuilder {
    states: IndexSet<String>,
    initial_state: Option<StateId>,
    alphabet: BTreeSet<Symbol>,
    transitions: HashMap<(StateId, Symbol), StateSet>,
    final_states: StateSet,
}

impl AutomatonBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a state with a label that is unique within this automaton.
    pub fn add_state(&mut self, label: impl Into<String>) -> Result<StateId> {
        let label = label.into();
        if self.states.contains(&label) {
            return Err(Error::invariant(format!("duplicate state `{label}`")));
        }
        Ok(self.add_fresh_state(label))
    }

    /// Add a state whose label the caller guarantees to be unused.
    pub(crate) fn add_fresh_state(&mut self, label: String) -> StateId {
        let (id, inserted) = self.states.insert_full(label);
        debug_assert!(inserted, "state label reused");
        id as StateId
    }

    pub fn state_id(&self, label: &str) -> Option<StateId> {
        self.states.get_index_of(label).map(|i| i as StateId)
    }

    /// Number of states added so far.
    pub fn num_states(&self) -> StateId {
        self.states.len() as StateId
    }

    /// Declare an alphabet symbol.
    pub fn add_symbol(&mut self, symbol: Symbol) {
        self.alphabet.insert(symbol);
    }

    /// Set the initial state, replacing any earlier one.
    pub fn set_initial_state(&mut self, state: StateId) {
        self.initial_state = Some(state);
    }

    /// Mark a state as accepting.
    pub fn add_final_state(&mut self, state: StateId) {
        self.final_states.insert(state);
    }

    /// Add a transition. `symbol` must be declared with [`add_symbol`](Self::add_symbol)
    /// unless it is `EPSILON`.
    pub fn add_transition(&mut self, source: StateId, symbol: Symbol, destination: StateId) {
        self.transitions
            .entry((source, symbol))
            .or_default()
            .insert(destination);
    }

    pub fn add_epsilon_transition(&mut self, source: StateId, destination: StateId) {
        self.add_transition(source, EPSILON, destination);
    }

    /// Copy every state, symbol and transition of `other` into this builder,
    /// shifting its state ids past the ones already present and naming each
    /// copied state with `relabel(original_label)`.
    ///
    /// Returns the offset to add to an id of `other` to find its copy here.
    /// Initial and final markings are not copied. On a label collision the
    /// builder is left unchanged.
    pub fn embed<F>(&mut self, other: &FiniteAutomaton, relabel: F) -> Result<StateId>
    where
        F: FnMut(&str) -> String,
    {
        let offset = self.num_states();

        let mut labels: IndexSet<String> = IndexSet::with_capacity(other.states.len());
        for label in other.labels().map(relabel) {
            if self.states.contains(&label) || labels.contains(&label) {
                return Err(Error::invariant(format!("duplicate state `{label}`")));
            }
            labels.insert(label);
        }

        self.states.extend(labels);
        self.alphabet.extend(other.alphabet.iter().copied());
        for (&(src, sym), dests) in &other.transitions {
            let shifted = self.transitions.entry((src + offset, sym)).or_default();
            for dst in dests.iter() {
                shifted.insert(dst + offset);
            }
        }

        Ok(offset)
    }

    fn validate(&self) -> Result<StateId> {
        let num_states = self.num_states();
        let label = |state: StateId| -> String {
            self.states
                .get_index(state as usize)
                .cloned()
                .unwrap_or_else(|| format!("#{state}"))
        };

        if self.alphabet.contains(&EPSILON) {
            return Err(Error::invariant(format!(
                "alphabet contains the epsilon marker `{EPSILON}`"
            )));
        }

        let initial = self
            .initial_state
            .ok_or_else(|| Error::invariant("no initial state"))?;
        if initial >= num_states {
            return Err(Error::invariant(format!(
                "initial state #{initial} is not a state"
            )));
        }

        if let Some(state) = self.final_states.iter().find(|&s| s >= num_states) {
            return Err(Error::invariant(format!(
                "final state #{state} is not a state"
            )));
        }

        for (&(src, sym), dests) in &self.transitions {
            if src >= num_states {
                return Err(Error::invariant(format!(
                    "transition on `{sym}` leaves unknown state #{src}"
                )));
            }
            if let Some(dst) = dests.iter().find(|&d| d >= num_states) {
                return Err(Error::invariant(format!(
                    "transition `{}` -{sym}-> #{dst} targets an unknown state",
                    label(src)
                )));
            }
            if !is_epsilon(sym) && !self.alphabet.contains(&sym) {
                return Err(Error::invariant(format!(
                    "transition from `{}` uses `{sym}`, which is not in the alphabet",
                    label(src)
                )));
            }
        }

        Ok(initial)
    }

    /// Validate the invariants and produce the automaton.
    pub fn build(self) -> Result<FiniteAutomaton> {
        let initial_state = self.validate()?;
        Ok(self.finish(initial_state))
    }

    /// Produce the automaton without reporting errors. For algorithms whose
    /// output is valid by construction.
    pub(crate) fn build_valid(self) -> FiniteAutomaton {
        debug_assert!(self.validate().is_ok(), "{:?}", self.validate());
        let initial_state = self.initial_state.unwrap_or_default();
        self.finish(initial_state)
    }

    fn finish(self, initial_state: StateId) -> FiniteAutomaton {
        FiniteAutomaton {
            states: self.states,
            initial_state,
            alphabet: self.alphabet,
            transitions: self.transitions,
            final_states: self.final_states,
        }
    }
}
