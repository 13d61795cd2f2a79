//! Finite automata over `char` symbols.
//!
//! This module provides the automaton value type together with:
//! - Epsilon closure computation and string acceptance by simulation
//! - Subset construction (NFA to total DFA conversion)
//! - Partition-refinement DFA minimization

mod acceptor;
mod closure;
mod dfa;
mod finite_automaton;
mod minimize;
mod state;
mod subset_construction;
mod symbol;

pub use dfa::DFA;
pub use finite_automaton::{AutomatonBuilder, FiniteAutomaton, GraphEdge};
pub use minimize::minimize;
pub use state::{StateId, StateSet};
pub use subset_construction::{DEAD_STATE, canonical_name, determinize};
pub use symbol::{EPSILON, Symbol, is_epsilon};
