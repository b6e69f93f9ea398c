//! The semantic pass: a single pre-order walk that builds the scope tree,
//! resolves identifiers, and writes stack offsets back into the AST.

use minic_par::{Declare, Expr, IfBranch, Stmt};
use minic_util::diagnostic::SourceSnippet;
use minic_util::{DiagnosticBuilder, Handler, Span};

use crate::error::SemanticError;
use crate::scope::ScopeTree;
use crate::symbol::Symbol;

const INT_TYPE: &str = "int";
const WORD_SIZE: i32 = 4;

pub struct SemanticAnalyzer<'a> {
    scopes: ScopeTree,
    address_offset: i32,
    handler: &'a mut Handler,
    source: &'a str,
    fail_state: bool,
    dirty: bool,
}

impl<'a> SemanticAnalyzer<'a> {
    pub fn new(source: &'a str, handler: &'a mut Handler) -> Self {
        Self {
            scopes: ScopeTree::new(),
            address_offset: 0,
            handler,
            source,
            fail_state: false,
            dirty: true,
        }
    }

    /// Whether the next `run` call will actually do anything; false once a
    /// clean pass has completed and nothing has touched the tree since.
    pub fn should_run(&self) -> bool {
        self.dirty
    }

    /// Forces the next `run` call to re-analyse even if nothing changed.
    pub fn set_to_run(&mut self) {
        self.dirty = true;
    }

    /// Signals that the AST this analyser was built for has changed.
    pub fn update(&mut self) {
        self.dirty = true;
    }

    pub fn has_errors(&self) -> bool {
        self.fail_state
    }

    /// Runs one pre-order pass over `root`, writing resolved offsets into
    /// `Identifier` nodes as it goes. Returns `true` on success; on the
    /// first semantic error the pass stops immediately and returns `false`
    /// — whatever offsets were already written stay written, but no
    /// further AST is visited.
    pub fn run(&mut self, root: &mut Stmt) -> bool {
        if !self.dirty {
            return !self.fail_state;
        }

        self.scopes = ScopeTree::new();
        self.scopes
            .define(Symbol::BuiltInType {
                name: INT_TYPE.to_string(),
            })
            .expect("global scope starts empty");
        self.address_offset = 0;
        self.fail_state = false;

        self.visit_stmt(root);
        self.dirty = false;
        !self.fail_state
    }

    fn report(&mut self, error: SemanticError, line: u32, col: u32) {
        self.fail_state = true;
        let line_text = self
            .source
            .lines()
            .nth((line as usize).saturating_sub(1))
            .unwrap_or("");
        let start_col = col.max(1) as usize;
        DiagnosticBuilder::error(error.to_string())
            .span(Span::point(line, col))
            .snippet(SourceSnippet::new(
                line_text,
                line as usize,
                start_col,
                start_col + 1,
                None::<String>,
            ))
            .emit(self.handler);
    }

    fn visit_stmt(&mut self, stmt: &mut Stmt) {
        if self.fail_state {
            return;
        }
        match stmt {
            Stmt::Declare(declare) => self.visit_declare(declare),
            Stmt::DeclareAssign { declare, expr, .. } => {
                self.visit_declare(declare);
                self.visit_expr(expr);
            }
            Stmt::Assign { name, offset, expr, .. } => {
                *offset = self.resolve_identifier_use(&name.name, name.line, name.col);
                self.visit_expr(expr);
            }
            Stmt::Return { expr, .. } => self.visit_expr(expr),
            Stmt::Empty { .. } => {}
            Stmt::Compound { statements, .. } | Stmt::StatementBlock { statements, .. } => {
                let is_block = matches!(stmt, Stmt::StatementBlock { .. });
                if is_block {
                    let id = stmt.id();
                    self.scopes.enter_scope(format!("BLOCK_{id}"));
                }
                for statement in statements {
                    self.visit_stmt(statement);
                    if self.fail_state {
                        break;
                    }
                }
                if is_block {
                    self.scopes.exit_scope();
                }
            }
            Stmt::If(branch) => self.visit_if_branch(branch, "IF_"),
            Stmt::IfStatement {
                branches,
                else_body,
                id,
                ..
            } => {
                for branch in branches {
                    self.visit_if_branch(branch, "IF_");
                    if self.fail_state {
                        return;
                    }
                }
                self.scopes.enter_scope(format!("ELSE_{id}"));
                if let Some(body) = else_body {
                    self.visit_stmt(body);
                }
                self.scopes.exit_scope();
            }
            Stmt::While {
                condition,
                body,
                id,
            } => {
                self.visit_expr(condition);
                if self.fail_state {
                    return;
                }
                self.scopes.enter_scope(format!("WHILE_{id}"));
                if let Some(body) = body {
                    self.visit_stmt(body);
                }
                self.scopes.exit_scope();
            }
            Stmt::DoWhile {
                body,
                condition,
                id,
            } => {
                self.scopes.enter_scope(format!("DO_{id}"));
                if let Some(body) = body {
                    self.visit_stmt(body);
                }
                self.scopes.exit_scope();
                if self.fail_state {
                    return;
                }
                // The condition belongs to the parent scope, visited after
                // the body's scope has already been popped.
                self.visit_expr(condition);
            }
        }
    }

    fn visit_if_branch(&mut self, branch: &mut IfBranch, tag: &str) {
        self.visit_expr(&mut branch.condition);
        if self.fail_state {
            return;
        }
        let id = branch.id;
        self.scopes.enter_scope(format!("{tag}{id}"));
        if let Some(body) = &mut branch.body {
            self.visit_stmt(body);
        }
        self.scopes.exit_scope();
    }

    fn visit_declare(&mut self, declare: &mut Declare) {
        if self.fail_state {
            return;
        }
        let line = declare.name.line;
        let col = declare.name.col;
        self.address_offset -= WORD_SIZE;
        let offset = self.address_offset;
        let symbol = Symbol::Variable {
            name: declare.name.name.clone(),
            type_name: declare.type_name.clone(),
            offset,
        };
        if self.scopes.define(symbol).is_err() {
            self.report(
                SemanticError::SymbolRedefinition {
                    name: declare.name.name.clone(),
                },
                line,
                col,
            );
        }
    }

    fn resolve_identifier_use(&mut self, name: &str, line: u32, col: u32) -> Option<i32> {
        match self.scopes.resolve(name) {
            Some(Symbol::Variable { offset, .. }) => Some(*offset),
            _ => {
                self.report(
                    SemanticError::SymbolNotFound {
                        name: name.to_string(),
                    },
                    line,
                    col,
                );
                None
            }
        }
    }

    fn visit_expr(&mut self, expr: &mut Expr) {
        if self.fail_state {
            return;
        }
        match expr {
            Expr::Integer { .. } => {}
            Expr::Identifier { name, offset, .. } => {
                *offset = self.resolve_identifier_use(&name.name, name.line, name.col);
            }
            Expr::UnaryOp { expr, .. } => self.visit_expr(expr),
            Expr::BinaryOp { left, right, .. } | Expr::Condition { left, right, .. } => {
                self.visit_expr(left);
                self.visit_expr(right);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minic_lex::Lexer;
    use minic_par::parse;

    fn analyze(source: &str) -> (Stmt, bool) {
        let tokens = Lexer::new(source).tokenize();
        let mut parse_handler = Handler::new();
        let mut root = parse(tokens, source, &mut parse_handler).expect("parses");
        let mut handler = Handler::new();
        let mut analyzer = SemanticAnalyzer::new(source, &mut handler);
        let ok = analyzer.run(&mut root);
        (root, ok)
    }

    #[test]
    fn declares_resolve_to_negative_offsets() {
        let (root, ok) = analyze("{ int a; int b; a = 2; b = a + 3; return b; }");
        assert!(ok);
        let Stmt::Compound { statements, .. } = root else { unreachable!() };
        let Stmt::Assign { expr, .. } = &statements[3] else { panic!() };
        let Expr::BinaryOp { left, .. } = expr else { panic!() };
        assert!(matches!(**left, Expr::Identifier { offset: Some(-4), .. }));
    }

    #[test]
    fn assign_target_offset_is_resolved() {
        let (root, ok) = analyze("{ int a; int b; a = 2; b = a + 3; return b; }");
        assert!(ok);
        let Stmt::Compound { statements, .. } = root else { unreachable!() };
        let Stmt::Assign { offset, .. } = &statements[2] else { panic!() };
        assert_eq!(*offset, Some(-4));
    }

    #[test]
    fn redefinition_in_same_scope_fails() {
        let (_, ok) = analyze("{ int a; int a; }");
        assert!(!ok);
    }

    #[test]
    fn undeclared_use_fails() {
        let (_, ok) = analyze("{ a = 1; }");
        assert!(!ok);
    }

    #[test]
    fn shadowing_across_sibling_scopes_succeeds() {
        let (_, ok) = analyze("{ int a; { int a; a = 2; } a = 3; }");
        assert!(ok);
    }

    #[test]
    fn second_run_without_update_is_a_no_op_success() {
        let tokens = Lexer::new("{ int a; }").tokenize();
        let mut parse_handler = Handler::new();
        let mut root = parse(tokens, "{ int a; }", &mut parse_handler).unwrap();
        let mut handler = Handler::new();
        let mut analyzer = SemanticAnalyzer::new("{ int a; }", &mut handler);
        assert!(analyzer.run(&mut root));
        assert!(!analyzer.should_run());
        assert!(analyzer.run(&mut root));
    }
}
