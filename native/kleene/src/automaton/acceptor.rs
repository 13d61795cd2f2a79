//! String acceptance by simulation.

use crate::automaton::finite_automaton::FiniteAutomaton;
use crate::automaton::state::StateSet;
use crate::automaton::symbol::{Symbol, is_epsilon};

impl FiniteAutomaton {
    /// Check whether the automaton accepts the given input.
    ///
    /// Works for any automaton: the set of live states is tracked through
    /// epsilon closures, and a DFA is the case where that set is a singleton.
    /// A symbol outside the alphabet (the epsilon marker included) has no
    /// transitions, so it rejects.
    pub fn accepts<I>(&self, input: I) -> bool
    where
        I: IntoIterator<Item = Symbol>,
    {
        let start = StateSet::singleton(self.initial_state(), self.num_states() as usize);
        let mut current = self.epsilon_closure(&start);

        for symbol in input {
            if is_epsilon(symbol) {
                return false;
            }
            current = self.move_on_symbol(&current, symbol);
            if current.is_empty() {
                // Nothing left alive; the rest of the input cannot matter
                return false;
            }
        }

        current.intersects(self.final_states())
    }

    /// Check whether the automaton accepts the characters of `input`.
    pub fn accepts_str(&self, input: &str) -> bool {
        self.accepts(input.chars())
    }
}
