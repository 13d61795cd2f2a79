//! PyO3 bindings.
//!
//! Exposes `FiniteAutomaton` and `REParser` to Python. States are named by
//! strings and symbols by one-character strings; `None` as a transition symbol
//! stands for an epsilon edge.

use crate::automaton::{AutomatonBuilder, EPSILON, FiniteAutomaton, StateId};
use crate::error::Error;
use crate::regex::RegexCompiler;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use std::collections::BTreeSet;

fn to_py_err(error: Error) -> PyErr {
    PyValueError::new_err(error.to_string())
}

/// A finite automaton, possibly nondeterministic and with epsilon transitions.
#[pyclass(name = "FiniteAutomaton", module = "kleene", frozen)]
pub struct PyFiniteAutomaton {
    automaton: FiniteAutomaton,
}

impl From<FiniteAutomaton> for PyFiniteAutomaton {
    fn from(automaton: FiniteAutomaton) -> Self {
        Self { automaton }
    }
}

impl PyFiniteAutomaton {
    fn label(&self, state: StateId) -> String {
        self.automaton.label(state).unwrap_or_default().to_string()
    }
}

#[pymethods]
impl PyFiniteAutomaton {
    #[new]
    #[pyo3(signature = (initial_state, states, symbols, transitions, final_states))]
    fn new(
        initial_state: String,
        states: BTreeSet<String>,
        symbols: BTreeSet<char>,
        transitions: Vec<(String, Option<char>, String)>,
        final_states: BTreeSet<String>,
    ) -> PyResult<Self> {
        let mut builder = AutomatonBuilder::new();
        for state in states {
            builder.add_state(state).map_err(to_py_err)?;
        }
        for symbol in symbols {
            builder.add_symbol(symbol);
        }

        let lookup = |builder: &AutomatonBuilder, label: &str| {
            builder
                .state_id(label)
                .ok_or_else(|| PyValueError::new_err(format!("unknown state `{label}`")))
        };

        builder.set_initial_state(lookup(&builder, &initial_state)?);
        for state in &final_states {
            let id = lookup(&builder, state)?;
            builder.add_final_state(id);
        }
        for (source, symbol, destination) in &transitions {
            let source = lookup(&builder, source)?;
            let destination = lookup(&builder, destination)?;
            builder.add_transition(source, symbol.unwrap_or(EPSILON), destination);
        }

        builder.build().map(Self::from).map_err(to_py_err)
    }

    /// Whether the automaton accepts `string`.
    fn accepts(&self, string: &str) -> bool {
        self.automaton.accepts_str(string)
    }

    /// Equivalent deterministic automaton.
    fn to_deterministic(&self) -> Self {
        self.automaton.to_deterministic().into_automaton().into()
    }

    /// Minimal equivalent automaton. Raises `ValueError` unless this
    /// automaton is already deterministic and total.
    fn to_minimized(&self) -> PyResult<Self> {
        self.automaton
            .to_minimized()
            .map(|dfa| dfa.into_automaton().into())
            .map_err(to_py_err)
    }

    /// `(nodes, edges)` for drawing, each edge `(source, destination, label)`.
    #[allow(clippy::type_complexity)]
    fn to_graph(&self) -> (Vec<String>, Vec<(String, String, String)>) {
        let (nodes, edges) = self.automaton.to_graph();
        (
            nodes.into_iter().map(str::to_string).collect(),
            edges
                .into_iter()
                .map(|(src, dst, label)| (src.to_string(), dst.to_string(), label))
                .collect(),
        )
    }

    #[getter]
    fn initial_state(&self) -> String {
        self.label(self.automaton.initial_state())
    }

    #[getter]
    fn states(&self) -> Vec<String> {
        self.automaton.labels().map(str::to_string).collect()
    }

    #[getter]
    fn symbols(&self) -> Vec<char> {
        self.automaton.alphabet().iter().copied().collect()
    }

    #[getter]
    fn final_states(&self) -> Vec<String> {
        self.automaton
            .final_states()
            .iter()
            .map(|state| self.label(state))
            .collect()
    }

    fn __repr__(&self) -> String {
        format!(
            "FiniteAutomaton(states={}, symbols={}, initial={:?})",
            self.automaton.num_states(),
            self.automaton.alphabet().len(),
            self.initial_state()
        )
    }
}

/// Regular expression compiler. State labels keep increasing across calls.
#[pyclass(name = "REParser", module = "kleene")]
#[derive(Default)]
pub struct PyREParser {
    compiler: RegexCompiler,
}

#[pymethods]
impl PyREParser {
    #[new]
    fn new() -> Self {
        Self::default()
    }

    /// Compile an infix expression. Raises `ValueError` on a syntax error.
    fn create_automaton(&mut self, re_string: &str) -> PyResult<PyFiniteAutomaton> {
        self.compiler
            .compile(re_string)
            .map(PyFiniteAutomaton::from)
            .map_err(to_py_err)
    }
}

#[pymodule]
pub fn kleene(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyFiniteAutomaton>()?;
    m.add_class::<PyREParser>()?;
    m.add("EPSILON", EPSILON.to_string())?;
    Ok(())
}
