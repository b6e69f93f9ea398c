//! Grammar implementation: one function per precedence layer, plus the
//! statement and declaration productions.

use minic_lex::{Token, TokenKind};
use minic_util::diagnostic::SourceSnippet;
use minic_util::{DiagnosticBuilder, Handler, Span};
use thiserror::Error;

use crate::ast::{
    BinaryOperator, ConditionOperator, Declare, Expr, Ident, IfBranch, NodeId, Stmt,
    UnaryOperator,
};

/// Raised the moment `consume` sees the wrong token kind. Carries no data
/// of its own: the formatted diagnostic (location, source line, caret) has
/// already been pushed onto the [`Handler`] by the time this is returned.
#[derive(Debug, Error)]
#[error("unexpected token")]
pub struct ParseError;

/// Parses a full program (`'{' { statement } '}'`) from a token stream.
///
/// `source` is the original text, needed only to render the source-line
/// snippet under a diagnostic; it plays no role in the grammar itself.
pub fn parse(tokens: Vec<Token>, source: &str, handler: &mut Handler) -> Result<Stmt, ParseError> {
    Parser::new(tokens, source, handler).parse_program()
}

pub struct Parser<'a> {
    tokens: Vec<Token>,
    position: usize,
    source: &'a str,
    handler: &'a mut Handler,
    next_id: u32,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: Vec<Token>, source: &'a str, handler: &'a mut Handler) -> Self {
        Self {
            tokens,
            position: 0,
            source,
            handler,
            next_id: 0,
        }
    }

    pub fn parse_program(&mut self) -> Result<Stmt, ParseError> {
        let program = self.parse_compound()?;
        self.consume(TokenKind::FileEnd, "end of file")?;
        Ok(program)
    }

    fn fresh_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    fn current(&self) -> &Token {
        &self.tokens[self.position]
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current().kind == kind
    }

    fn advance(&mut self) -> Token {
        let token = self.tokens[self.position].clone();
        if self.position + 1 < self.tokens.len() {
            self.position += 1;
        }
        token
    }

    fn consume(&mut self, kind: TokenKind, expected: &str) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            self.unexpected(expected)
        }
    }

    fn unexpected<T>(&mut self, expected: &str) -> Result<T, ParseError> {
        let token = self.current().clone();
        let found = if token.kind == TokenKind::FileEnd {
            "end of file".to_string()
        } else {
            format!("'{}'", token.lexeme)
        };
        let line_text = self
            .source
            .lines()
            .nth((token.line as usize).saturating_sub(1))
            .unwrap_or("");
        let start_col = token.col.max(1) as usize;
        let end_col = start_col + token.lexeme.chars().count().max(1);

        DiagnosticBuilder::error(format!("expected {expected}, found {found}"))
            .span(Span::point(token.line, token.col))
            .snippet(SourceSnippet::new(
                line_text,
                token.line as usize,
                start_col,
                end_col,
                Some("unexpected token"),
            ))
            .emit(self.handler);
        Err(ParseError)
    }

    fn parse_ident(&mut self) -> Result<Ident, ParseError> {
        if self.check(TokenKind::Identifier) {
            let token = self.advance();
            Ok(Ident {
                name: token.lexeme,
                line: token.line,
                col: token.col,
            })
        } else {
            self.unexpected("an identifier")
        }
    }

    fn parse_type_name(&mut self) -> Result<String, ParseError> {
        if self.check(TokenKind::TypeInt) {
            Ok(self.advance().lexeme)
        } else {
            self.unexpected("a type name")
        }
    }

    // ---- statement := declare ';' | assign ';' | return ';' | if | while
    //                 | do_while | block | ';' ----

    fn parse_brace_list(&mut self) -> Result<(NodeId, Vec<Stmt>), ParseError> {
        let id = self.fresh_id();
        self.consume(TokenKind::LBrace, "'{'")?;
        let mut statements = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.check(TokenKind::FileEnd) {
            statements.push(self.parse_statement()?);
        }
        self.consume(TokenKind::RBrace, "'}'")?;
        Ok((id, statements))
    }

    fn parse_compound(&mut self) -> Result<Stmt, ParseError> {
        let (id, statements) = self.parse_brace_list()?;
        Ok(Stmt::Compound { id, statements })
    }

    fn parse_block(&mut self) -> Result<Stmt, ParseError> {
        let (id, statements) = self.parse_brace_list()?;
        Ok(Stmt::StatementBlock { id, statements })
    }

    fn parse_statement(&mut self) -> Result<Stmt, ParseError> {
        match self.current().kind {
            TokenKind::Semicolon => {
                let id = self.fresh_id();
                self.advance();
                Ok(Stmt::Empty { id })
            }
            TokenKind::LBrace => self.parse_block(),
            TokenKind::If => self.parse_if(),
            TokenKind::While => self.parse_while(),
            TokenKind::Do => self.parse_do_while(),
            TokenKind::Return => self.parse_return(),
            TokenKind::TypeInt => self.parse_declare(),
            TokenKind::Identifier => self.parse_assign(),
            _ => self.unexpected("a statement"),
        }
    }

    /// A body that may legitimately be absent: a bare `;` collapses to
    /// `None` rather than `Some(Empty)`, per the "empty body" boundary
    /// case for `if`/`while`/`do-while`.
    fn parse_statement_or_block(&mut self) -> Result<Option<Box<Stmt>>, ParseError> {
        match self.parse_statement()? {
            Stmt::Empty { .. } => Ok(None),
            other => Ok(Some(Box::new(other))),
        }
    }

    fn parse_declare(&mut self) -> Result<Stmt, ParseError> {
        let id = self.fresh_id();
        let type_name = self.parse_type_name()?;
        let name = self.parse_ident()?;
        let declare = Declare {
            id,
            type_name,
            name,
        };
        if self.check(TokenKind::Assign) {
            self.advance();
            let expr = self.parse_expression()?;
            self.consume(TokenKind::Semicolon, "';'")?;
            Ok(Stmt::DeclareAssign {
                id: self.fresh_id(),
                declare,
                expr,
            })
        } else {
            self.consume(TokenKind::Semicolon, "';'")?;
            Ok(Stmt::Declare(declare))
        }
    }

    fn parse_assign(&mut self) -> Result<Stmt, ParseError> {
        let id = self.fresh_id();
        let name = self.parse_ident()?;
        self.consume(TokenKind::Assign, "'='")?;
        let expr = self.parse_expression()?;
        self.consume(TokenKind::Semicolon, "';'")?;
        Ok(Stmt::Assign {
            id,
            name,
            offset: None,
            expr,
        })
    }

    fn parse_return(&mut self) -> Result<Stmt, ParseError> {
        let id = self.fresh_id();
        self.consume(TokenKind::Return, "'return'")?;
        let expr = self.parse_expression()?;
        self.consume(TokenKind::Semicolon, "';'")?;
        Ok(Stmt::Return { id, expr })
    }

    fn parse_if_branch(&mut self) -> Result<IfBranch, ParseError> {
        let id = self.fresh_id();
        self.consume(TokenKind::If, "'if'")?;
        self.consume(TokenKind::LParen, "'('")?;
        let condition = self.parse_condition()?;
        self.consume(TokenKind::RParen, "')'")?;
        let body = self.parse_statement_or_block()?;
        Ok(IfBranch {
            id,
            condition,
            body,
        })
    }

    fn parse_if(&mut self) -> Result<Stmt, ParseError> {
        let mut branches = vec![self.parse_if_branch()?];
        let mut else_body = None;
        while self.check(TokenKind::Else) {
            self.advance();
            if self.check(TokenKind::If) {
                branches.push(self.parse_if_branch()?);
            } else {
                else_body = self.parse_statement_or_block()?;
                break;
            }
        }
        if branches.len() == 1 && else_body.is_none() {
            Ok(Stmt::If(branches.pop().expect("branches is non-empty")))
        } else {
            Ok(Stmt::IfStatement {
                id: self.fresh_id(),
                branches,
                else_body,
            })
        }
    }

    fn parse_while(&mut self) -> Result<Stmt, ParseError> {
        let id = self.fresh_id();
        self.consume(TokenKind::While, "'while'")?;
        self.consume(TokenKind::LParen, "'('")?;
        let condition = self.parse_condition()?;
        self.consume(TokenKind::RParen, "')'")?;
        let body = self.parse_statement_or_block()?;
        Ok(Stmt::While {
            id,
            condition,
            body,
        })
    }

    fn parse_do_while(&mut self) -> Result<Stmt, ParseError> {
        let id = self.fresh_id();
        self.consume(TokenKind::Do, "'do'")?;
        let body = self.parse_statement_or_block()?;
        self.consume(TokenKind::While, "'while'")?;
        self.consume(TokenKind::LParen, "'('")?;
        let condition = self.parse_condition()?;
        self.consume(TokenKind::RParen, "')'")?;
        self.consume(TokenKind::Semicolon, "';'")?;
        Ok(Stmt::DoWhile {
            id,
            body,
            condition,
        })
    }

    // ---- expression grammar: condition -> logical_or -> logical_and ->
    // equality -> relational -> expression -> term -> factor ----

    fn parse_condition(&mut self) -> Result<Expr, ParseError> {
        self.parse_logical_or()
    }

    fn parse_logical_or(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_logical_and()?;
        while self.check(TokenKind::OrOr) {
            self.advance();
            let right = self.parse_logical_and()?;
            left = Expr::Condition {
                id: self.fresh_id(),
                op: ConditionOperator::Or,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_logical_and(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_equality()?;
        while self.check(TokenKind::AndAnd) {
            self.advance();
            let right = self.parse_equality()?;
            left = Expr::Condition {
                id: self.fresh_id(),
                op: ConditionOperator::And,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_equality(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_relational()?;
        loop {
            let op = match self.current().kind {
                TokenKind::EqEq => ConditionOperator::Eq,
                TokenKind::NotEq => ConditionOperator::Ne,
                _ => break,
            };
            self.advance();
            let right = self.parse_relational()?;
            left = Expr::Condition {
                id: self.fresh_id(),
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_relational(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_expression()?;
        loop {
            let op = match self.current().kind {
                TokenKind::Less => ConditionOperator::Lt,
                TokenKind::Greater => ConditionOperator::Gt,
                TokenKind::LessEq => ConditionOperator::Le,
                TokenKind::GreaterEq => ConditionOperator::Ge,
                _ => break,
            };
            self.advance();
            let right = self.parse_expression()?;
            left = Expr::Condition {
                id: self.fresh_id(),
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_term()?;
        loop {
            let op = match self.current().kind {
                TokenKind::Plus => BinaryOperator::Add,
                TokenKind::Minus => BinaryOperator::Sub,
                _ => break,
            };
            self.advance();
            let right = self.parse_term()?;
            left = Expr::BinaryOp {
                id: self.fresh_id(),
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_term(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_factor()?;
        loop {
            let op = match self.current().kind {
                TokenKind::Star => BinaryOperator::Mul,
                TokenKind::Slash => BinaryOperator::Div,
                TokenKind::Percent => BinaryOperator::Mod,
                _ => break,
            };
            self.advance();
            let right = self.parse_factor()?;
            left = Expr::BinaryOp {
                id: self.fresh_id(),
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_factor(&mut self) -> Result<Expr, ParseError> {
        match self.current().kind {
            TokenKind::Plus | TokenKind::Minus | TokenKind::Bang => {
                let op = match self.current().kind {
                    TokenKind::Plus => UnaryOperator::Plus,
                    TokenKind::Minus => UnaryOperator::Minus,
                    _ => UnaryOperator::Not,
                };
                let id = self.fresh_id();
                self.advance();
                let expr = self.parse_factor()?;
                Ok(Expr::UnaryOp {
                    id,
                    op,
                    expr: Box::new(expr),
                })
            }
            TokenKind::IntLiteral => {
                let id = self.fresh_id();
                let token = self.advance();
                let value = token.lexeme.parse().unwrap_or(0);
                Ok(Expr::Integer { id, value })
            }
            TokenKind::Identifier => {
                let id = self.fresh_id();
                let token = self.advance();
                Ok(Expr::Identifier {
                    id,
                    name: Ident {
                        name: token.lexeme,
                        line: token.line,
                        col: token.col,
                    },
                    offset: None,
                })
            }
            TokenKind::LParen => {
                self.advance();
                let expr = self.parse_condition()?;
                self.consume(TokenKind::RParen, "')'")?;
                Ok(expr)
            }
            _ => self.unexpected("an expression"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minic_lex::Lexer;

    fn parse_ok(source: &str) -> Stmt {
        let tokens = Lexer::new(source).tokenize();
        let mut handler = Handler::new();
        parse(tokens, source, &mut handler).unwrap_or_else(|_| {
            panic!("expected {source:?} to parse, diagnostics: {:?}", handler.diagnostics())
        })
    }

    fn parse_err(source: &str) {
        let tokens = Lexer::new(source).tokenize();
        let mut handler = Handler::new();
        assert!(parse(tokens, source, &mut handler).is_err());
        assert!(handler.has_errors());
    }

    #[test]
    fn empty_compound_has_no_statements() {
        match parse_ok("{}") {
            Stmt::Compound { statements, .. } => assert!(statements.is_empty()),
            other => panic!("expected Compound, got {other:?}"),
        }
    }

    #[test]
    fn declare_and_declare_assign() {
        match parse_ok("{ int a; int b = 1; }") {
            Stmt::Compound { statements, .. } => {
                assert_eq!(statements.len(), 2);
                assert!(matches!(statements[0], Stmt::Declare(_)));
                assert!(matches!(statements[1], Stmt::DeclareAssign { .. }));
            }
            other => panic!("expected Compound, got {other:?}"),
        }
    }

    #[test]
    fn arithmetic_is_left_associative_with_correct_precedence() {
        // 1 + 2 * 3 should group as 1 + (2 * 3), not (1 + 2) * 3.
        let stmt = parse_ok("{ return 1 + 2 * 3; }");
        let Stmt::Compound { statements, .. } = stmt else { unreachable!() };
        let Stmt::Return { expr, .. } = &statements[0] else { panic!() };
        match expr {
            Expr::BinaryOp { op: BinaryOperator::Add, right, .. } => {
                assert!(matches!(**right, Expr::BinaryOp { op: BinaryOperator::Mul, .. }));
            }
            other => panic!("expected top-level Add, got {other:?}"),
        }
    }

    #[test]
    fn empty_if_body_is_none() {
        let stmt = parse_ok("{ if (1) ; }");
        let Stmt::Compound { statements, .. } = stmt else { unreachable!() };
        let Stmt::If(branch) = &statements[0] else { panic!() };
        assert!(branch.body.is_none());
    }

    #[test]
    fn empty_block_creates_a_statement_block_node() {
        let stmt = parse_ok("{ {} }");
        let Stmt::Compound { statements, .. } = stmt else { unreachable!() };
        match &statements[0] {
            Stmt::StatementBlock { statements, .. } => assert!(statements.is_empty()),
            other => panic!("expected StatementBlock, got {other:?}"),
        }
    }

    #[test]
    fn chained_else_if_becomes_if_statement() {
        let stmt = parse_ok("{ if (1) return 1; else if (2) return 2; else return 3; }");
        let Stmt::Compound { statements, .. } = stmt else { unreachable!() };
        match &statements[0] {
            Stmt::IfStatement { branches, else_body, .. } => {
                assert_eq!(branches.len(), 2);
                assert!(else_body.is_some());
            }
            other => panic!("expected IfStatement, got {other:?}"),
        }
    }

    #[test]
    fn do_while_round_trips() {
        let stmt = parse_ok("{ do { } while (1); }");
        let Stmt::Compound { statements, .. } = stmt else { unreachable!() };
        assert!(matches!(statements[0], Stmt::DoWhile { .. }));
    }

    #[test]
    fn missing_semicolon_is_a_fatal_parse_error() {
        parse_err("{ int a }");
    }

    #[test]
    fn missing_closing_brace_is_a_fatal_parse_error() {
        parse_err("{ int a;");
    }

    #[test]
    fn condition_layer_is_unreachable_from_assignment_rhs() {
        // `expression` (used by declare/assign/return) does not descend
        // into relational/logical operators, so `a == b` is not a valid
        // assignment right-hand side.
        parse_err("{ int a; a = 1 == 1; }");
    }
}
