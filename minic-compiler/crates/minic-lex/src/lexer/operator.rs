//! The delimiter set and the compound-operator lookahead table.
//!
//! The lexer scans left to right and stops at the first delimiter
//! character. Once it has stopped, this module decides whether the
//! delimiter pairs with the next character into a two-character compound
//! operator, or stands alone.

/// Characters that end an in-progress lexeme. Whitespace is a delimiter
/// too: it is discarded rather than emitted.
pub fn is_delimiter(c: char) -> bool {
    matches!(
        c,
        ' ' | '\t'
            | '+'
            | '-'
            | '*'
            | '/'
            | '('
            | ')'
            | '='
            | '!'
            | '>'
            | '<'
            | '&'
            | '|'
            | ';'
            | '{'
            | '}'
            | '%'
    )
}

/// Given a delimiter and the character immediately following it, returns
/// the second character of the compound operator it forms, if any.
///
/// Lexemes produced here are not guaranteed to be meaningful tokens: `&`
/// followed by `=` forms the two-character lexeme `&=`, which is outside
/// the closed token set and is later classified as `Unknown`. The table
/// only decides how many characters to consume as one lexeme.
pub fn compound_second(first: char, next: char) -> Option<char> {
    match (first, next) {
        ('*', '=') | ('/', '=') | ('!', '=') | ('=', '=') | ('%', '=') => Some('='),
        ('+', '=') => Some('='),
        ('+', '+') => Some('+'),
        ('-', '=') => Some('='),
        ('-', '-') => Some('-'),
        ('&', '&') => Some('&'),
        ('&', '=') => Some('='),
        ('|', '|') => Some('|'),
        ('|', '=') => Some('='),
        ('>', '>') => Some('>'),
        ('>', '=') => Some('='),
        ('<', '<') => Some('<'),
        ('<', '=') => Some('='),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_every_listed_delimiter() {
        for c in " \t+-*/()=!><&|;{}%".chars() {
            assert!(is_delimiter(c), "{c:?} should be a delimiter");
        }
    }

    #[test]
    fn rejects_non_delimiters() {
        for c in "abc_019".chars() {
            assert!(!is_delimiter(c));
        }
    }

    #[test]
    fn builds_two_character_comparison_operators() {
        assert_eq!(compound_second('=', '='), Some('='));
        assert_eq!(compound_second('!', '='), Some('='));
        assert_eq!(compound_second('<', '='), Some('='));
        assert_eq!(compound_second('>', '='), Some('='));
    }

    #[test]
    fn builds_increment_and_decrement() {
        assert_eq!(compound_second('+', '+'), Some('+'));
        assert_eq!(compound_second('-', '-'), Some('-'));
    }

    #[test]
    fn single_char_delimiter_has_no_pair() {
        assert_eq!(compound_second('+', 'x'), None);
        assert_eq!(compound_second('(', '='), None);
    }
}
