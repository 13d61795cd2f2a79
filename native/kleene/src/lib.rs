//! Compile regular expressions into finite automata and reduce them to
//! canonical form.
//!
//! ```
//! let nfa = kleene::compile("(a+b).c").unwrap();
//! assert!(nfa.accepts("ac".chars()));
//!
//! let dfa = kleene::determinize(&nfa);
//! let minimal = kleene::minimize(&dfa);
//! assert!(minimal.accepts("bc".chars()));
//! assert!(!minimal.accepts("abc".chars()));
//! ```

pub mod automaton;
mod error;
pub mod format;
#[cfg(feature = "python")]
mod python_bindings;
pub mod regex;

pub use automaton::{
    AutomatonBuilder, DFA, EPSILON, FiniteAutomaton, StateId, StateSet, Symbol, determinize,
    minimize,
};
pub use error::{Error, Result};
pub use regex::{RegexCompiler, compile};
