//! Deterministic Finite Automaton (DFA) with a total transition function.

use crate::automaton::finite_automaton::FiniteAutomaton;
use crate::automaton::state::StateId;
use crate::automaton::symbol::Symbol;
use crate::error::{Error, Result};
use std::ops::Deref;

/// A deterministic automaton whose transition function is total: every state
/// has exactly one destination for every alphabet symbol, and there are no
/// epsilon transitions.
///
/// A `DFA` is produced by [`determinize`](crate::determinize), by
/// [`minimize`](crate::minimize), or by the checked conversion
/// `DFA::try_from(FiniteAutomaton)`. Holding one is proof of the minimizer's
/// precondition.
#[derive(Debug, Clone)]
pub struct DFA {
    automaton: FiniteAutomaton,
    /// The alphabet in ascending order; a symbol's index is its column
    symbols: Vec<Symbol>,
    /// Row-major `num_states x symbols.len()` destination table
    table: Vec<StateId>,
}

impl DFA {
    /// Assemble a DFA whose table was filled alongside the automaton.
    pub(crate) fn from_parts(automaton: FiniteAutomaton, table: Vec<StateId>) -> Self {
        let symbols: Vec<Symbol> = automaton.alphabet().iter().copied().collect();
        debug_assert_eq!(
            table.len(),
            automaton.num_states() as usize * symbols.len(),
            "transition table is not total"
        );
        Self {
            automaton,
            symbols,
            table,
        }
    }

    /// The alphabet in column order.
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Destination of `state` on the symbol in column `column`.
    pub(crate) fn next_by_column(&self, state: StateId, column: usize) -> StateId {
        self.table[state as usize * self.symbols.len() + column]
    }

    /// The unique destination of `state` on `symbol`. `None` only when the
    /// symbol is outside the alphabet or the state does not exist.
    pub fn next(&self, state: StateId, symbol: Symbol) -> Option<StateId> {
        if state >= self.automaton.num_states() {
            return None;
        }
        let column = self.symbols.binary_search(&symbol).ok()?;
        Some(self.next_by_column(state, column))
    }

    pub fn as_automaton(&self) -> &FiniteAutomaton {
        &self.automaton
    }

    pub fn into_automaton(self) -> FiniteAutomaton {
        self.automaton
    }
}

impl Deref for DFA {
    type Target = FiniteAutomaton;

    fn deref(&self) -> &FiniteAutomaton {
        &self.automaton
    }
}

impl From<DFA> for FiniteAutomaton {
    fn from(dfa: DFA) -> Self {
        dfa.automaton
    }
}

impl TryFrom<FiniteAutomaton> for DFA {
    type Error = Error;

    /// Accept an automaton as a DFA only if it has no epsilon transitions and
    /// exactly one destination per state and alphabet symbol. Partial
    /// automata are rejected rather than completed.
    fn try_from(automaton: FiniteAutomaton) -> Result<Self> {
        if automaton.has_epsilon_transitions() {
            return Err(Error::invariant(
                "a deterministic automaton cannot have epsilon transitions",
            ));
        }

        let symbols: Vec<Symbol> = automaton.alphabet().iter().copied().collect();
        let mut table = Vec::with_capacity(automaton.num_states() as usize * symbols.len());

        for state in 0..automaton.num_states() {
            for &symbol in &symbols {
                let destinations = automaton.successors(state, symbol);
                match destinations.map(|d| (d.len(), d.iter().next())) {
                    Some((1, Some(destination))) => table.push(destination),
                    found => {
                        return Err(Error::invariant(format!(
                            "state `{}` has {} transitions on `{symbol}`, expected exactly one",
                            automaton.label(state).unwrap_or_default(),
                            found.map_or(0, |(n, _)| n),
                        )));
                    }
                }
            }
        }

        Ok(Self::from_parts(automaton, table))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::finite_automaton::AutomatonBuilder;

    /// Binary strings with an even number of zeros.
    fn even_zeros() -> AutomatonBuilder {
        let mut builder = AutomatonBuilder::new();
        let even = builder.add_state("even").unwrap();
        let odd = builder.add_state("odd").unwrap();
        builder.add_symbol('0');
        builder.add_symbol('1');
        builder.set_initial_state(even);
        builder.add_final_state(even);
        builder.add_transition(even, '0', odd);
        builder.add_transition(even, '1', even);
        builder.add_transition(odd, '0', even);
        builder.add_transition(odd, '1', odd);
        builder
    }

    #[test]
    fn test_try_from_total_automaton() {
        let dfa = DFA::try_from(even_zeros().build().unwrap()).unwrap();

        assert_eq!(dfa.symbols(), &['0', '1']);
        assert_eq!(dfa.next(0, '0'), Some(1));
        assert_eq!(dfa.next(1, '1'), Some(1));
        assert_eq!(dfa.next(0, 'x'), None);
        assert_eq!(dfa.next(5, '0'), None);
        assert!(dfa.accepts("1001".chars()));
        assert!(!dfa.accepts("10001".chars()));
    }

    #[test]
    fn test_try_from_rejects_partial() {
        let mut builder = AutomatonBuilder::new();
        let s = builder.add_state("s").unwrap();
        builder.add_symbol('a');
        builder.add_symbol('b');
        builder.set_initial_state(s);
        builder.add_transition(s, 'a', s);
        let err = DFA::try_from(builder.build().unwrap()).unwrap_err();
        assert!(matches!(err, Error::InvariantViolation(ref msg) if msg.contains("0 transitions")));
    }

    #[test]
    fn test_try_from_rejects_nondeterminism() {
        let mut builder = even_zeros();
        builder.add_transition(0, '1', 1);
        let err = DFA::try_from(builder.build().unwrap()).unwrap_err();
        assert!(matches!(err, Error::InvariantViolation(ref msg) if msg.contains("2 transitions")));
    }

    #[test]
    fn test_try_from_rejects_epsilon() {
        let mut builder = even_zeros();
        builder.add_epsilon_transition(1, 0);
        assert!(DFA::try_from(builder.build().unwrap()).is_err());
    }
}
