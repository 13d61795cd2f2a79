//! Plain-text automaton descriptions.
//!
//! ```text
//! Automaton:
//!     Symbols: 01
//!
//!     even final
//!     odd
//!
//!     ini even -0-> odd
//!     even -1-> even
//!     odd -0-> even
//!     odd -1-> odd
//! ```
//!
//! The first non-blank line must be the `Automaton:` header. `Symbols:` lists
//! the alphabet, one character per symbol. A state line is a label optionally
//! followed by `final`; a transition line is `SRC -SYM-> DST`, where `-->` is
//! an epsilon edge. Either kind of line may start with `ini` to mark its
//! (source) state as the initial one.

use crate::automaton::{AutomatonBuilder, EPSILON, FiniteAutomaton, StateId, Symbol};
use crate::error::{Error, Result};
use std::str::FromStr;

const HEADER: &str = "Automaton:";
const SYMBOLS: &str = "Symbols:";
const INITIAL: &str = "ini";
const FINAL: &str = "final";

/// Symbol of an arrow token such as `-a->`. `-->` yields [`EPSILON`].
fn arrow_symbol(token: &str) -> Option<Symbol> {
    let inner = token.strip_prefix('-')?.strip_suffix("->")?;
    let mut chars = inner.chars();
    match (chars.next(), chars.next()) {
        (None, _) => Some(EPSILON),
        (Some(symbol), None) => Some(symbol),
        _ => None,
    }
}

struct Loader {
    builder: AutomatonBuilder,
    initial: Option<StateId>,
}

impl Loader {
    fn state(&self, line: usize, label: &str) -> Result<StateId> {
        self.builder
            .state_id(label)
            .ok_or_else(|| Error::format(line, format!("unknown state `{label}`")))
    }

    fn declare(&mut self, line: usize, label: &str) -> Result<StateId> {
        if self.builder.state_id(label).is_some() {
            return Err(Error::format(line, format!("state `{label}` declared twice")));
        }
        self.builder.add_state(label)
    }

    fn mark_initial(&mut self, line: usize, state: StateId) -> Result<()> {
        match self.initial {
            Some(existing) if existing != state => Err(Error::format(
                line,
                "a different state is already marked `ini`",
            )),
            _ => {
                self.initial = Some(state);
                self.builder.set_initial_state(state);
                Ok(())
            }
        }
    }

    fn line(&mut self, line: usize, text: &str) -> Result<()> {
        if let Some(symbols) = text.strip_prefix(SYMBOLS) {
            for symbol in symbols.chars().filter(|c| !c.is_whitespace()) {
                self.builder.add_symbol(symbol);
            }
            return Ok(());
        }

        let tokens: Vec<&str> = text.split_whitespace().collect();
        let (initial, tokens) = match tokens.split_first() {
            Some((&INITIAL, rest)) if !rest.is_empty() => (true, rest),
            _ => (false, &tokens[..]),
        };

        let source = match *tokens {
            [source, arrow, destination] => {
                let symbol = arrow_symbol(arrow)
                    .ok_or_else(|| Error::format(line, format!("malformed arrow `{arrow}`")))?;
                let source = self.state(line, source)?;
                let destination = self.state(line, destination)?;
                self.builder.add_transition(source, symbol, destination);
                source
            }
            [label] => self.declare(line, label)?,
            [label, FINAL] => {
                let state = self.declare(line, label)?;
                self.builder.add_final_state(state);
                state
            }
            _ => return Err(Error::format(line, format!("cannot parse `{text}`"))),
        };

        if initial {
            self.mark_initial(line, source)?;
        }
        Ok(())
    }
}

/// Read an automaton from its textual description.
///
/// Grammar errors are reported as [`Error::Format`] with a 1-based line
/// number; the result is then validated like any other built automaton.
pub fn parse(description: &str) -> Result<FiniteAutomaton> {
    let mut lines = description
        .lines()
        .enumerate()
        .map(|(i, text)| (i + 1, text.trim()))
        .filter(|(_, text)| !text.is_empty());

    match lines.next() {
        Some((_, HEADER)) => {}
        Some((line, _)) => return Err(Error::format(line, format!("expected `{HEADER}`"))),
        None => return Err(Error::format(1, format!("expected `{HEADER}`"))),
    }

    let mut loader = Loader {
        builder: AutomatonBuilder::new(),
        initial: None,
    };
    for (line, text) in lines {
        loader.line(line, text)?;
    }

    let automaton = loader.builder.build()?;
    log::debug!(
        "loaded automaton with {} states over {} symbols",
        automaton.num_states(),
        automaton.alphabet().len()
    );
    Ok(automaton)
}

impl FromStr for FiniteAutomaton {
    type Err = Error;

    fn from_str(description: &str) -> Result<Self> {
        parse(description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_symbol() {
        assert_eq!(arrow_symbol("-a->"), Some('a'));
        assert_eq!(arrow_symbol("-->"), Some(EPSILON));
        assert_eq!(arrow_symbol("--->"), Some('-'));
        assert_eq!(arrow_symbol("-.->"), Some('.'));
        assert_eq!(arrow_symbol("-ab->"), None);
        assert_eq!(arrow_symbol("a->"), None);
        assert_eq!(arrow_symbol("->"), None);
    }

    #[test]
    fn test_parse() {
        let fa: FiniteAutomaton = "
            Automaton:
                Symbols: ab

                p
                q final

                ini p -a-> q
                q --> p
        "
        .parse()
        .unwrap();

        assert_eq!(fa.labels().collect::<Vec<_>>(), vec!["p", "q"]);
        assert_eq!(fa.label(fa.initial_state()), Some("p"));
        assert!(fa.is_final(1));
        assert_eq!(fa.alphabet().iter().collect::<String>(), "ab");
        assert!(fa.has_epsilon_transitions());
        assert!(fa.accepts("aa".chars()));
    }

    #[test]
    fn test_initial_on_declaration() {
        let fa = parse("Automaton:\nSymbols:\nini only final").unwrap();
        assert_eq!(fa.num_states(), 1);
        assert!(fa.accepts("".chars()));
    }

    #[test]
    fn test_repeated_initial_marker() {
        let fa = parse("Automaton:\nSymbols: 01\ns\nini s -0-> s\nini s -1-> s").unwrap();
        assert_eq!(fa.initial_state(), 0);

        let err = parse("Automaton:\nSymbols: 0\ns\nt\nini s -0-> t\nini t -0-> s").unwrap_err();
        assert!(matches!(err, Error::Format { line: 6, .. }));
    }

    #[test]
    fn test_missing_header() {
        assert!(matches!(parse(""), Err(Error::Format { line: 1, .. })));
        assert!(matches!(
            parse("\n\nSymbols: a"),
            Err(Error::Format { line: 3, .. })
        ));
    }

    #[test]
    fn test_unknown_and_duplicate_states() {
        let err = parse("Automaton:\nSymbols: a\nini p\np -a-> q").unwrap_err();
        assert_eq!(
            err,
            Error::Format {
                line: 4,
                message: "unknown state `q`".to_string()
            }
        );

        let err = parse("Automaton:\nini p\np final").unwrap_err();
        assert!(matches!(err, Error::Format { line: 3, .. }));
    }

    #[test]
    fn test_malformed_lines() {
        assert!(matches!(
            parse("Automaton:\nini p\np -ab-> p"),
            Err(Error::Format { line: 3, .. })
        ));
        assert!(matches!(
            parse("Automaton:\nini p sometimes"),
            Err(Error::Format { line: 2, .. })
        ));
    }

    #[test]
    fn test_validation_after_parsing() {
        // Symbol not listed under `Symbols:`
        assert!(matches!(
            parse("Automaton:\nSymbols: a\nini p\np -b-> p"),
            Err(Error::InvariantViolation(_))
        ));
        // No `ini` anywhere
        assert!(matches!(
            parse("Automaton:\np final"),
            Err(Error::InvariantViolation(_))
        ));
    }
}
