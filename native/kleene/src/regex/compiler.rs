//! Thompson construction: evaluating postfix regexes into automata.

use crate::automaton::{AutomatonBuilder, EPSILON, FiniteAutomaton, StateId, Symbol};
use crate::error::{Error, Result};
use crate::regex::postfix::{CONCAT, STAR, UNION, to_postfix};

/// Compiles regular expressions into automata.
///
/// Every composition copies its operands into a new transition table and
/// renames all of their states with fresh labels from a single increasing
/// counter, so labels never collide, even when one operand is used twice.
#[derive(Debug, Default)]
pub struct RegexCompiler {
    state_counter: u64,
}

impl RegexCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_label(&mut self) -> String {
        let label = self.state_counter.to_string();
        self.state_counter += 1;
        label
    }

    fn fresh_state(&mut self, builder: &mut AutomatonBuilder) -> Result<StateId> {
        let label = self.next_label();
        builder.add_state(label)
    }

    /// Copy `operand` into `builder` under fresh labels.
    fn embed(
        &mut self,
        builder: &mut AutomatonBuilder,
        operand: &FiniteAutomaton,
    ) -> Result<StateId> {
        builder.embed(operand, |_| self.next_label())
    }

    /// Automaton accepting no string at all.
    pub fn empty(&mut self) -> Result<FiniteAutomaton> {
        let mut builder = AutomatonBuilder::new();
        let state = self.fresh_state(&mut builder)?;
        builder.set_initial_state(state);
        builder.build()
    }

    /// Automaton accepting only the empty string.
    pub fn lambda(&mut self) -> Result<FiniteAutomaton> {
        let mut builder = AutomatonBuilder::new();
        let state = self.fresh_state(&mut builder)?;
        builder.set_initial_state(state);
        builder.add_final_state(state);
        builder.build()
    }

    /// Automaton accepting exactly the one-symbol string `symbol`.
    pub fn symbol(&mut self, symbol: Symbol) -> Result<FiniteAutomaton> {
        let mut builder = AutomatonBuilder::new();
        let start = self.fresh_state(&mut builder)?;
        let end = self.fresh_state(&mut builder)?;
        builder.add_symbol(symbol);
        builder.set_initial_state(start);
        builder.add_final_state(end);
        builder.add_transition(start, symbol, end);
        builder.build()
    }

    /// Kleene star: zero or more repetitions of `inner`.
    pub fn star(&mut self, inner: &FiniteAutomaton) -> Result<FiniteAutomaton> {
        let mut builder = AutomatonBuilder::new();
        let start = self.fresh_state(&mut builder)?;
        let end = self.fresh_state(&mut builder)?;
        let offset = self.embed(&mut builder, inner)?;
        let inner_start = inner.initial_state() + offset;

        builder.set_initial_state(start);
        builder.add_final_state(end);
        builder.add_epsilon_transition(start, inner_start);
        builder.add_epsilon_transition(start, end);
        for state in inner.final_states().iter() {
            builder.add_epsilon_transition(state + offset, inner_start);
            builder.add_epsilon_transition(state + offset, end);
        }
        builder.build()
    }

    /// Union: strings accepted by `left` or by `right`.
    pub fn union(
        &mut self,
        left: &FiniteAutomaton,
        right: &FiniteAutomaton,
    ) -> Result<FiniteAutomaton> {
        let mut builder = AutomatonBuilder::new();
        let start = self.fresh_state(&mut builder)?;
        let end = self.fresh_state(&mut builder)?;
        builder.set_initial_state(start);
        builder.add_final_state(end);

        for operand in [left, right] {
            let offset = self.embed(&mut builder, operand)?;
            builder.add_epsilon_transition(start, operand.initial_state() + offset);
            for state in operand.final_states().iter() {
                builder.add_epsilon_transition(state + offset, end);
            }
        }
        builder.build()
    }

    /// Concatenation: a string of `left` followed by a string of `right`.
    pub fn concat(
        &mut self,
        left: &FiniteAutomaton,
        right: &FiniteAutomaton,
    ) -> Result<FiniteAutomaton> {
        let mut builder = AutomatonBuilder::new();
        let left_offset = self.embed(&mut builder, left)?;
        let right_offset = self.embed(&mut builder, right)?;
        let right_start = right.initial_state() + right_offset;

        builder.set_initial_state(left.initial_state() + left_offset);
        for state in left.final_states().iter() {
            builder.add_epsilon_transition(state + left_offset, right_start);
        }
        for state in right.final_states().iter() {
            builder.add_final_state(state + right_offset);
        }
        builder.build()
    }

    /// Compile an infix expression.
    ///
    /// Literals are any character other than `+ . * ( )`; `λ` is the empty
    /// string. An empty expression denotes the empty language. Fails with
    /// [`Error::Syntax`] on unbalanced parentheses, an operator missing an
    /// operand, or operands left without an operator between them.
    pub fn compile(&mut self, expression: &str) -> Result<FiniteAutomaton> {
        if expression.is_empty() {
            return self.empty();
        }

        let mut stack: Vec<FiniteAutomaton> = Vec::new();
        for (position, token) in to_postfix(expression)? {
            log::trace!("regex token {token:?} at {position}, {} operands", stack.len());

            let next = match token {
                STAR => {
                    let inner = pop_operand(&mut stack, position, token)?;
                    self.star(&inner)?
                }
                UNION | CONCAT => {
                    // The operand pushed last is the right-hand side
                    let right = pop_operand(&mut stack, position, token)?;
                    let left = pop_operand(&mut stack, position, token)?;
                    if token == UNION {
                        self.union(&left, &right)?
                    } else {
                        self.concat(&left, &right)?
                    }
                }
                EPSILON => self.lambda()?,
                literal => self.symbol(literal)?,
            };
            stack.push(next);
        }

        let result = stack.pop();
        match (result, stack.is_empty()) {
            (Some(automaton), true) => Ok(automaton),
            (Some(_), false) => Err(Error::syntax(
                expression.chars().count(),
                format!("{} operands are missing an operator", stack.len() + 1),
            )),
            (None, _) => Err(Error::syntax(0, "expression has no operands")),
        }
    }
}

fn pop_operand(
    stack: &mut Vec<FiniteAutomaton>,
    position: usize,
    operator: char,
) -> Result<FiniteAutomaton> {
    stack
        .pop()
        .ok_or_else(|| Error::syntax(position, format!("`{operator}` is missing an operand")))
}

/// Compile an expression with a fresh [`RegexCompiler`].
pub fn compile(expression: &str) -> Result<FiniteAutomaton> {
    RegexCompiler::new().compile(expression)
}
