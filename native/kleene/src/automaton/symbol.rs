//! Symbol types for automata transitions.

/// An input symbol. Expressions and descriptions are read one `char` at a time.
pub type Symbol = char;

/// Reserved symbol marking an epsilon (empty) transition.
/// It doubles as the empty-string literal of the regex syntax and may never
/// appear in an alphabet.
pub const EPSILON: Symbol = 'λ';

/// Check if a symbol is the epsilon marker.
#[inline]
pub fn is_epsilon(symbol: Symbol) -> bool {
    symbol == EPSILON
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epsilon() {
        assert!(is_epsilon(EPSILON));
        assert!(is_epsilon('λ'));
        assert!(!is_epsilon('a'));
        assert!(!is_epsilon('-'));
    }
}
