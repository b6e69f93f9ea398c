//! Token kinds and the `Token` type the lexer produces.

/// The classified kind of a lexeme.
///
/// A closed enumeration: every lexeme the lexer can emit falls into exactly
/// one of these kinds. Nothing downstream ever matches on a lexeme string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    IntLiteral,
    Identifier,

    // Keywords and built-in type names.
    If,
    Else,
    While,
    Do,
    Return,
    TypeInt,

    // Single-char operators and punctuators.
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Assign,
    LParen,
    RParen,
    LBrace,
    RBrace,
    Semicolon,
    Bang,
    Less,
    Greater,

    // Compound operators.
    EqEq,
    NotEq,
    LessEq,
    GreaterEq,
    AndAnd,
    OrOr,
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,
    PercentEq,
    PlusPlus,
    MinusMinus,

    /// A lexeme that matched neither a keyword/operator nor the identifier
    /// or integer-literal shape.
    Unknown,
    /// Sentinel terminating every token stream.
    FileEnd,
}

impl TokenKind {
    /// True for the five reserved words (`if else while do return`); the
    /// built-in type name `int` is classified separately as `TypeInt`.
    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::If | TokenKind::Else | TokenKind::While | TokenKind::Do | TokenKind::Return
        )
    }
}

/// A classified lexeme with its source location. Immutable once produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub lexeme: String,
    pub kind: TokenKind,
    pub line: u32,
    pub col: u32,
}

impl Token {
    pub fn new(lexeme: impl Into<String>, kind: TokenKind, line: u32, col: u32) -> Self {
        Self {
            lexeme: lexeme.into(),
            kind,
            line,
            col,
        }
    }

    pub fn file_end(line: u32, col: u32) -> Self {
        Self::new(String::new(), TokenKind::FileEnd, line, col)
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.lexeme)
    }
}
