//! Subset construction algorithm for converting an ε-NFA to a DFA.

use crate::automaton::dfa::DFA;
use crate::automaton::finite_automaton::{AutomatonBuilder, FiniteAutomaton};
use crate::automaton::state::{StateId, StateSet};
use crate::automaton::symbol::Symbol;
use indexmap::IndexMap;
use std::collections::VecDeque;

/// Label of the DFA state standing for the empty set of NFA states.
pub const DEAD_STATE: &str = "dead";

/// Name a set of NFA states: member labels sorted and joined as `{a,b}`.
///
/// Separators inside labels are escaped so that distinct sets always get
/// distinct names. Only the empty set is named [`DEAD_STATE`].
pub fn canonical_name(nfa: &FiniteAutomaton, members: &[StateId]) -> String {
    if members.is_empty() {
        return DEAD_STATE.to_string();
    }

    let mut labels: Vec<&str> = members.iter().filter_map(|&s| nfa.label(s)).collect();
    labels.sort_unstable();

    let mut name = String::from("{");
    for (i, label) in labels.iter().enumerate() {
        if i > 0 {
            name.push(',');
        }
        for c in label.chars() {
            if matches!(c, '{' | '}' | ',' | '\\') {
                name.push('\\');
            }
            name.push(c);
        }
    }
    name.push('}');
    name
}

/// Subsets discovered so far, keyed by their sorted member list. The index of
/// an entry is the id of its DFA state.
struct Discovered<'a> {
    nfa: &'a FiniteAutomaton,
    builder: AutomatonBuilder,
    subsets: IndexMap<Vec<StateId>, StateId>,
    queue: VecDeque<(StateId, StateSet)>,
}

impl Discovered<'_> {
    /// Get the DFA state for `subset`, registering and enqueueing it if new.
    fn state_for(&mut self, subset: StateSet) -> StateId {
        let key = subset.to_vec();
        if let Some(&existing) = self.subsets.get(&key) {
            return existing;
        }

        let state = self
            .builder
            .add_fresh_state(canonical_name(self.nfa, &key));
        if subset.intersects(self.nfa.final_states()) {
            self.builder.add_final_state(state);
        }
        self.subsets.insert(key, state);
        self.queue.push_back((state, subset));
        state
    }
}

/// Convert any automaton to an equivalent DFA using the powerset construction.
///
/// Every discovered subset gets exactly one transition per alphabet symbol,
/// including those into (and out of) the dead state, so the result is total.
pub fn determinize(nfa: &FiniteAutomaton) -> DFA {
    let symbols: Vec<Symbol> = nfa.alphabet().iter().copied().collect();

    let mut builder = AutomatonBuilder::new();
    for &symbol in &symbols {
        builder.add_symbol(symbol);
    }

    let mut discovered = Discovered {
        nfa,
        builder,
        subsets: IndexMap::new(),
        queue: VecDeque::new(),
    };

    let start = StateSet::singleton(nfa.initial_state(), nfa.num_states() as usize);
    let initial = discovered.state_for(nfa.epsilon_closure(&start));
    discovered.builder.set_initial_state(initial);

    // Rows are pushed in id order: ids are handed out in queue order
    let mut table = Vec::new();
    while let Some((current, subset)) = discovered.queue.pop_front() {
        debug_assert_eq!(table.len(), current as usize * symbols.len());

        for &symbol in &symbols {
            let next = discovered.state_for(nfa.move_on_symbol(&subset, symbol));
            discovered.builder.add_transition(current, symbol, next);
            table.push(next);
        }
    }

    log::debug!(
        "subset construction: {} NFA states -> {} DFA states over {} symbols",
        nfa.num_states(),
        discovered.subsets.len(),
        symbols.len()
    );

    DFA::from_parts(discovered.builder.build_valid(), table)
}

impl FiniteAutomaton {
    /// Equivalent deterministic automaton. See [`determinize`].
    pub fn to_deterministic(&self) -> DFA {
        determinize(self)
    }
}
