//! The lexer's main loop: scan to the next delimiter, classify what was
//! skipped over, repeat.

use std::collections::HashMap;

use super::operator::{compound_second, is_delimiter};
use crate::cursor::Cursor;
use crate::token::{Token, TokenKind};

/// Seeded once per lexer so keywords and operators classify without
/// re-deriving their kind from the lexeme text every time they recur.
fn seed_cache() -> HashMap<String, TokenKind> {
    use TokenKind::*;
    let seeds: &[(&str, TokenKind)] = &[
        ("if", If),
        ("else", Else),
        ("while", While),
        ("do", Do),
        ("return", Return),
        ("int", TypeInt),
        ("+", Plus),
        ("-", Minus),
        ("*", Star),
        ("/", Slash),
        ("%", Percent),
        ("=", Assign),
        ("(", LParen),
        (")", RParen),
        ("{", LBrace),
        ("}", RBrace),
        (";", Semicolon),
        ("!", Bang),
        ("<", Less),
        (">", Greater),
        ("==", EqEq),
        ("!=", NotEq),
        ("<=", LessEq),
        (">=", GreaterEq),
        ("&&", AndAnd),
        ("||", OrOr),
        ("+=", PlusEq),
        ("-=", MinusEq),
        ("*=", StarEq),
        ("/=", SlashEq),
        ("%=", PercentEq),
        ("++", PlusPlus),
        ("--", MinusMinus),
    ];
    seeds.iter().map(|(lexeme, kind)| (lexeme.to_string(), *kind)).collect()
}

fn classify_unseeded(lexeme: &str) -> TokenKind {
    let mut chars = lexeme.chars();
    let Some(first) = chars.next() else {
        return TokenKind::Unknown;
    };
    if (first.is_ascii_alphabetic() || first == '_')
        && lexeme.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return TokenKind::Identifier;
    }
    if lexeme.chars().all(|c| c.is_ascii_digit()) {
        return TokenKind::IntLiteral;
    }
    TokenKind::Unknown
}

/// Converts a source string into a stream of [`Token`]s.
///
/// The lexer never fails: every character either belongs to a lexeme or is
/// a delimiter that gets discarded (whitespace), folded into a two-char
/// operator, or emitted as a one-char token. A lexeme that doesn't match
/// any keyword, operator, identifier, or integer shape is still emitted,
/// classified as [`TokenKind::Unknown`] — rejecting it is the parser's
/// job, not the lexer's.
pub struct Lexer<'a> {
    cursor: Cursor<'a>,
    cache: HashMap<String, TokenKind>,
    done: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            cursor: Cursor::new(source),
            cache: seed_cache(),
            done: false,
        }
    }

    fn classify(&mut self, lexeme: &str) -> TokenKind {
        if let Some(kind) = self.cache.get(lexeme) {
            return *kind;
        }
        let kind = classify_unseeded(lexeme);
        self.cache.insert(lexeme.to_string(), kind);
        kind
    }

    /// Scans and returns the next token, or the `FileEnd` sentinel once the
    /// source is exhausted. Calling this again after `FileEnd` keeps
    /// returning `FileEnd`.
    pub fn next_token(&mut self) -> Token {
        loop {
            if self.cursor.is_at_end() {
                return Token::file_end(self.cursor.line(), self.cursor.column());
            }

            let start_line = self.cursor.line();
            let start_col = self.cursor.column();
            let c = self.cursor.current_char();

            if c == '\n' || c == '\r' {
                self.cursor.advance();
                continue;
            }

            if is_delimiter(c) {
                self.cursor.advance();

                if c == ' ' || c == '\t' {
                    continue;
                }

                if c == '/' && self.cursor.current_char() == '/' {
                    while !self.cursor.is_at_end() && self.cursor.current_char() != '\n' {
                        self.cursor.advance();
                    }
                    continue;
                }

                if let Some(second) = compound_second(c, self.cursor.current_char()) {
                    self.cursor.advance();
                    let lexeme: String = [c, second].iter().collect();
                    let kind = self.classify(&lexeme);
                    return Token::new(lexeme, kind, start_line, start_col);
                }

                let lexeme = c.to_string();
                let kind = self.classify(&lexeme);
                return Token::new(lexeme, kind, start_line, start_col);
            }

            let start = self.cursor.position();
            while !self.cursor.is_at_end() {
                let ch = self.cursor.current_char();
                if is_delimiter(ch) || ch == '\n' || ch == '\r' {
                    break;
                }
                self.cursor.advance();
            }
            let lexeme = self.cursor.slice_from(start).to_string();
            let kind = self.classify(&lexeme);
            return Token::new(lexeme, kind, start_line, start_col);
        }
    }

    /// Scans the entire source, returning every token including the
    /// trailing `FileEnd` sentinel.
    pub fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let is_end = token.kind == TokenKind::FileEnd;
            tokens.push(token);
            if is_end {
                return tokens;
            }
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.done {
            return None;
        }
        let token = self.next_token();
        if token.kind == TokenKind::FileEnd {
            self.done = true;
        }
        Some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source).tokenize().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn empty_source_is_just_file_end() {
        assert_eq!(kinds(""), vec![TokenKind::FileEnd]);
    }

    #[test]
    fn whitespace_only_is_just_file_end() {
        assert_eq!(kinds("   \t\n\n  "), vec![TokenKind::FileEnd]);
    }

    #[test]
    fn every_stream_ends_with_file_end() {
        let tokens = Lexer::new("int x = 1;").tokenize();
        assert_eq!(tokens.last().unwrap().kind, TokenKind::FileEnd);
    }

    #[test]
    fn keyword_and_identifier_and_literal() {
        assert_eq!(
            kinds("int x = 42;"),
            vec![
                TokenKind::TypeInt,
                TokenKind::Identifier,
                TokenKind::Assign,
                TokenKind::IntLiteral,
                TokenKind::Semicolon,
                TokenKind::FileEnd,
            ]
        );
    }

    #[test]
    fn compound_operators_are_not_split() {
        assert_eq!(
            kinds("x >= 1 && y <= 2"),
            vec![
                TokenKind::Identifier,
                TokenKind::GreaterEq,
                TokenKind::IntLiteral,
                TokenKind::AndAnd,
                TokenKind::Identifier,
                TokenKind::LessEq,
                TokenKind::IntLiteral,
                TokenKind::FileEnd,
            ]
        );
    }

    #[test]
    fn greedy_match_prefers_two_chars_over_one() {
        let tokens = Lexer::new("i++").tokenize();
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!(tokens[1].kind, TokenKind::PlusPlus);
        assert_eq!(tokens[1].lexeme, "++");
    }

    #[test]
    fn line_comment_consumes_to_end_of_line_only() {
        assert_eq!(
            kinds("int x; // trailing\nint y;"),
            vec![
                TokenKind::TypeInt,
                TokenKind::Identifier,
                TokenKind::Semicolon,
                TokenKind::TypeInt,
                TokenKind::Identifier,
                TokenKind::Semicolon,
                TokenKind::FileEnd,
            ]
        );
    }

    #[test]
    fn unseeded_symbol_lexeme_classifies_as_unknown() {
        let tokens = Lexer::new("a &= b").tokenize();
        assert_eq!(tokens[1].kind, TokenKind::Unknown);
        assert_eq!(tokens[1].lexeme, "&=");
    }

    #[test]
    fn stray_character_is_unknown_not_an_error() {
        let tokens = Lexer::new("@").tokenize();
        assert_eq!(tokens[0].kind, TokenKind::Unknown);
        assert_eq!(tokens[0].lexeme, "@");
    }

    #[test]
    fn same_lexeme_classifies_identically_every_time() {
        let mut lexer = Lexer::new("int int int");
        let a = lexer.next_token();
        let b = lexer.next_token();
        let c = lexer.next_token();
        assert_eq!(a.kind, TokenKind::TypeInt);
        assert_eq!(a.kind, b.kind);
        assert_eq!(b.kind, c.kind);
    }

    #[test]
    fn line_and_column_track_across_lines() {
        let tokens = Lexer::new("int x;\nint y;").tokenize();
        let second_int = tokens.iter().filter(|t| t.kind == TokenKind::TypeInt).nth(1).unwrap();
        assert_eq!(second_int.line, 2);
    }

    #[test]
    fn iterator_yields_file_end_once_then_stops() {
        let lexer = Lexer::new("x;");
        let collected: Vec<_> = lexer.collect();
        assert_eq!(collected.last().unwrap().kind, TokenKind::FileEnd);
        assert_eq!(
            collected.iter().filter(|t| t.kind == TokenKind::FileEnd).count(),
            1
        );
    }
}
