//! DFA minimization by partition refinement.

use crate::automaton::dfa::DFA;
use crate::automaton::finite_automaton::{AutomatonBuilder, FiniteAutomaton};
use crate::automaton::state::StateId;
use crate::error::Result;
use indexmap::IndexMap;
use std::collections::VecDeque;

/// Block assignment of the reachable states of a DFA.
struct Partition {
    /// Reachable states in breadth-first order from the initial state
    states: Vec<StateId>,
    /// Block of each state, indexed by `StateId`; only reachable entries are meaningful
    block_of: Vec<usize>,
    num_blocks: usize,
}

impl Partition {
    /// Start from the final / non-final split of the reachable states,
    /// omitting an empty block.
    fn initial(dfa: &DFA, states: Vec<StateId>) -> Self {
        let mut block_of = vec![0; dfa.num_states() as usize];
        // Block of the non-final and of the final states, numbered as first seen
        let mut ids: [Option<usize>; 2] = [None, None];
        let mut num_blocks = 0;
        for &state in &states {
            let slot = &mut ids[usize::from(dfa.is_final(state))];
            block_of[state as usize] = *slot.get_or_insert_with(|| {
                num_blocks += 1;
                num_blocks - 1
            });
        }

        Self {
            states,
            block_of,
            num_blocks,
        }
    }

    fn block(&self, state: StateId) -> usize {
        self.block_of[state as usize]
    }

    /// One refinement pass. States stay together only if they share a block
    /// and their destinations share blocks on every symbol. Returns `true` if
    /// some block was split.
    fn refine(&mut self, dfa: &DFA) -> bool {
        let columns = dfa.symbols().len();
        let mut signatures: IndexMap<Vec<usize>, usize> = IndexMap::new();
        let mut next_block_of = self.block_of.clone();

        for &state in &self.states {
            let mut signature = Vec::with_capacity(columns + 1);
            signature.push(self.block(state));
            signature.extend((0..columns).map(|c| self.block(dfa.next_by_column(state, c))));

            let next_id = signatures.len();
            next_block_of[state as usize] = *signatures.entry(signature).or_insert(next_id);
        }

        // Signatures include the current block, so blocks can only split
        let split = signatures.len() != self.num_blocks;
        self.block_of = next_block_of;
        self.num_blocks = signatures.len();
        split
    }

    /// At the fixpoint every member of a block agrees on the destination
    /// block of every symbol.
    fn is_stable(&self, dfa: &DFA) -> bool {
        let mut representative: Vec<Option<StateId>> = vec![None; self.num_blocks];
        self.states.iter().all(|&state| {
            let rep = *representative[self.block(state)].get_or_insert(state);
            (0..dfa.symbols().len()).all(|c| {
                self.block(dfa.next_by_column(state, c)) == self.block(dfa.next_by_column(rep, c))
            })
        })
    }
}

impl DFA {
    /// States reachable from the initial state, in breadth-first order.
    pub fn reachable_states(&self) -> Vec<StateId> {
        let mut seen = vec![false; self.num_states() as usize];
        let mut order = Vec::new();
        let mut queue = VecDeque::from([self.initial_state()]);
        seen[self.initial_state() as usize] = true;

        while let Some(state) = queue.pop_front() {
            order.push(state);
            for column in 0..self.symbols().len() {
                let next = self.next_by_column(state, column);
                if !seen[next as usize] {
                    seen[next as usize] = true;
                    queue.push_back(next);
                }
            }
        }

        order
    }

    /// Produce the minimal DFA accepting the same language.
    ///
    /// Unreachable states are dropped, the reachable ones are refined from
    /// the final / non-final split until no block splits, and each block
    /// becomes one state labelled `q0`, `q1`, ... in breadth-first order
    /// (`q0` is the initial state).
    pub fn minimize(&self) -> DFA {
        let mut partition = Partition::initial(self, self.reachable_states());

        let mut passes = 1;
        while partition.refine(self) {
            passes += 1;
        }
        debug_assert!(partition.is_stable(self), "refinement stopped early");

        log::debug!(
            "minimization: {} states, {} reachable -> {} blocks after {} passes",
            self.num_states(),
            partition.states.len(),
            partition.num_blocks,
            passes
        );

        // Number blocks by their first member in breadth-first order
        let mut output_id: Vec<Option<StateId>> = vec![None; partition.num_blocks];
        let mut representatives = Vec::with_capacity(partition.num_blocks);
        for &state in &partition.states {
            let slot = &mut output_id[partition.block(state)];
            if slot.is_none() {
                *slot = Some(representatives.len() as StateId);
                representatives.push(state);
            }
        }
        let id_of = |state: StateId| output_id[partition.block(state)].unwrap_or_default();

        let mut builder = AutomatonBuilder::new();
        for &symbol in self.symbols() {
            builder.add_symbol(symbol);
        }
        for (i, &rep) in representatives.iter().enumerate() {
            let state = builder.add_fresh_state(format!("q{i}"));
            if self.is_final(rep) {
                builder.add_final_state(state);
            }
        }
        builder.set_initial_state(id_of(self.initial_state()));

        let mut table = Vec::with_capacity(representatives.len() * self.symbols().len());
        for (i, &rep) in representatives.iter().enumerate() {
            for (column, &symbol) in self.symbols().iter().enumerate() {
                let destination = id_of(self.next_by_column(rep, column));
                builder.add_transition(i as StateId, symbol, destination);
                table.push(destination);
            }
        }

        DFA::from_parts(builder.build_valid(), table)
    }
}

/// Minimize a DFA. See [`DFA::minimize`].
pub fn minimize(dfa: &DFA) -> DFA {
    dfa.minimize()
}

impl FiniteAutomaton {
    /// Minimize an automaton that is already deterministic and total.
    ///
    /// Fails with [`Error::InvariantViolation`](crate::Error::InvariantViolation)
    /// otherwise; call [`to_deterministic`](Self::to_deterministic) first when
    /// unsure.
    pub fn to_minimized(&self) -> Result<DFA> {
        Ok(DFA::try_from(self.clone())?.minimize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::subset_construction::determinize;

    fn dfa(num_states: u32, edges: &[(u32, char, u32)], finals: &[u32]) -> DFA {
        let mut builder = AutomatonBuilder::new();
        for i in 0..num_states {
            builder.add_state(i.to_string()).unwrap();
        }
        for &(_, sym, _) in edges {
            builder.add_symbol(sym);
        }
        builder.set_initial_state(0);
        for &(src, sym, dst) in edges {
            builder.add_transition(src, sym, dst);
        }
        for &f in finals {
            builder.add_final_state(f);
        }
        DFA::try_from(builder.build().unwrap()).unwrap()
    }

    /// Two paths to equivalent states: 1 ~ 2 and 3 ~ 4.
    fn redundant() -> DFA {
        dfa(
            6,
            &[
                (0, 'a', 1),
                (0, 'b', 2),
                (1, 'a', 5),
                (1, 'b', 3),
                (2, 'a', 5),
                (2, 'b', 4),
                (3, 'a', 5),
                (3, 'b', 5),
                (4, 'a', 5),
                (4, 'b', 5),
                (5, 'a', 5),
                (5, 'b', 5),
            ],
            &[3, 4],
        )
    }

    #[test]
    fn test_merges_equivalent_states() {
        let original = redundant();
        let minimized = original.minimize();

        assert_eq!(minimized.num_states(), 4);
        assert_eq!(minimized.label(minimized.initial_state()), Some("q0"));
        assert_eq!(minimized.final_states().len(), 1);
        for word in ["ab", "bb", "", "a", "abb", "ba", "aab"] {
            assert_eq!(
                original.accepts(word.chars()),
                minimized.accepts(word.chars()),
                "{word:?}"
            );
        }
    }

    #[test]
    fn test_drops_unreachable_states() {
        // 2 is unreachable and would otherwise stay distinct
        let original = dfa(3, &[(0, 'a', 1), (1, 'a', 0), (2, 'a', 2)], &[1, 2]);
        assert_eq!(original.reachable_states(), vec![0, 1]);

        let minimized = original.minimize();
        assert_eq!(minimized.num_states(), 2);
        assert!(minimized.accepts("a".chars()));
        assert!(!minimized.accepts("aa".chars()));
    }

    #[test]
    fn test_single_block() {
        // Every state final: one block
        let original = dfa(3, &[(0, 'a', 1), (1, 'a', 2), (2, 'a', 0)], &[0, 1, 2]);
        let minimized = original.minimize();
        assert_eq!(minimized.num_states(), 1);
        assert_eq!(minimized.next(0, 'a'), Some(0));

        // No final states: one block that rejects everything
        let original = dfa(2, &[(0, 'a', 1), (1, 'a', 0)], &[]);
        let minimized = original.minimize();
        assert_eq!(minimized.num_states(), 1);
        assert!(minimized.final_states().is_empty());
    }

    #[test]
    fn test_initial_partition_omits_empty_block() {
        let all_final = dfa(2, &[(0, 'a', 1), (1, 'a', 0)], &[0, 1]);
        let partition = Partition::initial(&all_final, all_final.reachable_states());
        assert_eq!(partition.num_blocks, 1);

        // The initial state's block comes first
        let mixed = dfa(2, &[(0, 'a', 1), (1, 'a', 0)], &[0]);
        let partition = Partition::initial(&mixed, mixed.reachable_states());
        assert_eq!(partition.num_blocks, 2);
        assert_eq!(partition.block(0), 0);
        assert_eq!(partition.block(1), 1);
    }

    #[test]
    fn test_refinement_fixpoint_is_stable() {
        let original = redundant();
        let mut partition = Partition::initial(&original, original.reachable_states());
        assert_eq!(partition.num_blocks, 2);

        // 0 and 5 only separate once 1/2 have left their block
        let mut passes = 0;
        while partition.refine(&original) {
            passes += 1;
        }
        assert_eq!(passes, 2);
        assert!(partition.is_stable(&original));
        assert_eq!(partition.block(1), partition.block(2));
        assert_eq!(partition.block(3), partition.block(4));
        assert_ne!(partition.block(0), partition.block(1));
    }

    #[test]
    fn test_idempotent() {
        let once = redundant().minimize();
        let twice = once.minimize();
        assert_eq!(once.num_states(), twice.num_states());
        let labels: Vec<_> = twice.labels().collect();
        assert_eq!(labels, vec!["q0", "q1", "q2", "q3"]);
    }

    #[test]
    fn test_minimize_after_determinize() {
        // (a|b)*b as an NFA
        let mut builder = AutomatonBuilder::new();
        let s = builder.add_state("s").unwrap();
        let f = builder.add_state("f").unwrap();
        builder.add_symbol('a');
        builder.add_symbol('b');
        builder.set_initial_state(s);
        builder.add_final_state(f);
        builder.add_transition(s, 'a', s);
        builder.add_transition(s, 'b', s);
        builder.add_transition(s, 'b', f);
        let nfa = builder.build().unwrap();

        let minimized = determinize(&nfa).minimize();
        assert_eq!(minimized.num_states(), 2);
        assert!(minimized.accepts("abab".chars()));
        assert!(!minimized.accepts("ba".chars()));
    }

    #[test]
    fn test_to_minimized_requires_total_dfa() {
        let mut builder = AutomatonBuilder::new();
        let s = builder.add_state("s").unwrap();
        builder.add_symbol('a');
        builder.set_initial_state(s);
        let partial: FiniteAutomaton = builder.build().unwrap();

        assert!(matches!(
            partial.to_minimized(),
            Err(crate::Error::InvariantViolation(_))
        ));
        assert_eq!(
            partial.to_deterministic().as_automaton().to_minimized().unwrap().num_states(),
            1
        );
    }
}
