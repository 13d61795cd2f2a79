//! Epsilon closures and symbol moves.

use crate::automaton::finite_automaton::FiniteAutomaton;
use crate::automaton::state::StateSet;
use crate::automaton::symbol::{EPSILON, Symbol, is_epsilon};

impl FiniteAutomaton {
    /// Get the epsilon closure of a set of states: the smallest superset of
    /// `states` closed under epsilon transitions.
    pub fn epsilon_closure(&self, states: &StateSet) -> StateSet {
        let mut closure = StateSet::with_capacity(self.num_states() as usize);
        let mut stack: Vec<_> = states.iter().collect();

        while let Some(s) = stack.pop() {
            // Membership is checked before following edges so epsilon cycles terminate
            if !closure.insert(s) {
                continue;
            }

            if let Some(destinations) = self.successors(s, EPSILON) {
                stack.extend(destinations.iter().filter(|&d| !closure.contains(d)));
            }
        }

        closure
    }

    /// Get the states reachable from a set of states on a given symbol,
    /// including everything reachable afterwards through epsilon transitions.
    pub fn move_on_symbol(&self, states: &StateSet, symbol: Symbol) -> StateSet {
        debug_assert!(!is_epsilon(symbol), "use epsilon_closure for epsilon moves");

        let mut reached = StateSet::with_capacity(self.num_states() as usize);
        for state in states.iter() {
            if let Some(destinations) = self.successors(state, symbol) {
                reached.union_with(destinations);
            }
        }

        self.epsilon_closure(&reached)
    }
}

#[cfg(test)]
mod tests {
    use crate::automaton::finite_automaton::{AutomatonBuilder, FiniteAutomaton};
    use crate::automaton::state::StateSet;

    /// States `s0..s{n-1}`, `s0` initial, no finals.
    fn chain(n: u32, edges: &[(u32, char, u32)]) -> FiniteAutomaton {
        let mut builder = AutomatonBuilder::new();
        for i in 0..n {
            builder.add_state(format!("s{i}")).unwrap();
        }
        builder.set_initial_state(0);
        for &(src, sym, dst) in edges {
            if sym != 'λ' {
                builder.add_symbol(sym);
            }
            builder.add_transition(src, sym, dst);
        }
        builder.build().unwrap()
    }

    #[test]
    fn test_closure_without_epsilons() {
        let fa = chain(2, &[(0, 'a', 1)]);
        let closure = fa.epsilon_closure(&StateSet::singleton(0, 2));
        assert_eq!(closure.to_vec(), vec![0]);
    }

    #[test]
    fn test_closure_follows_chains() {
        // 0 -ε-> 1 -ε-> 2
        let fa = chain(4, &[(0, 'λ', 1), (1, 'λ', 2), (2, 'a', 3)]);
        let closure = fa.epsilon_closure(&StateSet::singleton(0, 4));
        assert_eq!(closure.to_vec(), vec![0, 1, 2]);
    }

    #[test]
    fn test_closure_terminates_on_cycles() {
        // 0 -ε-> 1 -ε-> 2 -ε-> 0, and 2 -ε-> 2
        let fa = chain(3, &[(0, 'λ', 1), (1, 'λ', 2), (2, 'λ', 0), (2, 'λ', 2)]);
        let closure = fa.epsilon_closure(&StateSet::singleton(1, 3));
        assert_eq!(closure.to_vec(), vec![0, 1, 2]);
    }

    #[test]
    fn test_closure_of_empty_set() {
        let fa = chain(2, &[(0, 'λ', 1)]);
        assert!(fa.epsilon_closure(&StateSet::default()).is_empty());
    }

    #[test]
    fn test_move_on_symbol() {
        // 0 -a-> 1, 0 -a-> 2, 1 -ε-> 3
        let fa = chain(4, &[(0, 'a', 1), (0, 'a', 2), (1, 'λ', 3)]);
        let reached = fa.move_on_symbol(&StateSet::singleton(0, 4), 'a');
        assert_eq!(reached.to_vec(), vec![1, 2, 3]);

        assert!(fa.move_on_symbol(&StateSet::singleton(3, 4), 'a').is_empty());
        // Symbols outside the alphabet simply have no transitions
        assert!(fa.move_on_symbol(&StateSet::singleton(0, 4), 'z').is_empty());
    }
}
