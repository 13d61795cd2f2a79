//! Infix to postfix conversion for the regex syntax.

use crate::error::{Error, Result};

pub const UNION: char = '+';
pub const CONCAT: char = '.';
pub const STAR: char = '*';
pub const OPEN: char = '(';
pub const CLOSE: char = ')';

/// A postfix token: the character and its offset in the original expression.
pub type Token = (usize, char);

/// Convert an infix expression to postfix (reverse Polish) order.
///
/// A restricted shunting-yard: `+` binds looser than `.`, both are
/// left-associative, and `*` is already postfix so it is emitted in place
/// along with every literal. Fails on unbalanced parentheses.
pub fn to_postfix(expression: &str) -> Result<Vec<Token>> {
    let mut output = Vec::with_capacity(expression.len());
    let mut operators: Vec<Token> = Vec::new();

    for (position, c) in expression.chars().enumerate() {
        match c {
            UNION => {
                while let Some(&top) = operators.last() {
                    if top.1 == OPEN {
                        break;
                    }
                    output.extend(operators.pop());
                }
                operators.push((position, c));
            }
            CONCAT => {
                while let Some(&top) = operators.last() {
                    if top.1 != CONCAT {
                        break;
                    }
                    output.extend(operators.pop());
                }
                operators.push((position, c));
            }
            OPEN => operators.push((position, c)),
            CLOSE => loop {
                match operators.pop() {
                    Some((_, OPEN)) => break,
                    Some(op) => output.push(op),
                    None => return Err(Error::syntax(position, "unmatched `)`")),
                }
            },
            _ => output.push((position, c)),
        }
    }

    while let Some(op) = operators.pop() {
        if op.1 == OPEN {
            return Err(Error::syntax(op.0, "unclosed `(`"));
        }
        output.push(op);
    }

    log::trace!(
        "postfix of {expression:?}: {:?}",
        output.iter().map(|&(_, c)| c).collect::<String>()
    );

    Ok(output)
}
