//! Regular expressions in infix Kleene syntax.
//!
//! | Syntax    | Meaning                      |
//! |-----------|------------------------------|
//! | `a`       | the one-symbol string `a`    |
//! | `λ`       | the empty string             |
//! | `r.s`     | concatenation                |
//! | `r+s`     | union                        |
//! | `r*`      | Kleene star                  |
//! | `(r)`     | grouping                     |
//!
//! Expressions are converted to postfix order and then evaluated on a stack
//! of automata using Thompson's construction.

mod compiler;
mod postfix;

pub use compiler::{RegexCompiler, compile};
pub use postfix::{CLOSE, CONCAT, OPEN, STAR, Token, UNION, to_postfix};
