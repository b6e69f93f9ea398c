//! Lowers an analysed AST into a flat list of [`Quadruple`]s.
//!
//! Every expression-producing visit returns the quadruple the parent reads
//! `.dest` off of (`fetch`, below); leaves return a synthetic quadruple with
//! only `dest` set and no instruction appended. Temporaries and labels are
//! minted from counters owned by this struct, fresh for every run — never
//! process-wide statics.

use minic_par::{Declare, Expr, IfBranch, Stmt};

use crate::operand::Operand;
use crate::quadruple::Quadruple;

pub struct IrGen {
    instructions: Vec<Quadruple>,
    next_temp: u32,
    next_label: u32,
}

impl IrGen {
    pub fn new() -> Self {
        IrGen {
            instructions: Vec::new(),
            next_temp: 0,
            next_label: 0,
        }
    }

    /// Runs one pass over `root`, returning the flat instruction list.
    /// Constructing a fresh `IrGen` per run is how this generator resets —
    /// there is nothing process-wide to clear.
    pub fn generate(mut self, root: &Stmt) -> Vec<Quadruple> {
        self.visit_stmt(root);
        self.instructions
    }

    fn fresh_temp(&mut self) -> Operand {
        let op = Operand::temporary(self.next_temp);
        self.next_temp += 1;
        op
    }

    fn fresh_label(&mut self) -> Operand {
        let op = Operand::label(self.next_label);
        self.next_label += 1;
        op
    }

    fn emit(&mut self, quad: Quadruple) {
        self.instructions.push(quad);
    }

    /// Visits `expr`, appending whatever instruction(s) it produces, and
    /// returns the operand the caller should read as its value.
    fn fetch(&mut self, expr: &Expr) -> Operand {
        match expr {
            Expr::Integer { value, .. } => Operand::int_literal(*value),
            Expr::Identifier { name, offset, .. } => {
                Operand::identifier(name.name.clone(), *offset)
            }
            Expr::UnaryOp { op, expr, .. } => {
                let src = self.fetch(expr);
                let dest = self.fresh_temp();
                self.emit(Quadruple::unary(op.as_str(), src, dest.clone()));
                dest
            }
            Expr::BinaryOp { op, left, right, .. } => {
                let src1 = self.fetch(left);
                let src2 = self.fetch(right);
                let dest = self.fresh_temp();
                self.emit(Quadruple::binary(op.as_str(), src1, src2, dest.clone()));
                dest
            }
            Expr::Condition { op, left, right, .. } => {
                let src1 = self.fetch(left);
                let src2 = self.fetch(right);
                let dest = self.fresh_temp();
                self.emit(Quadruple::binary(op.as_str(), src1, src2, dest.clone()));
                dest
            }
        }
    }

    fn visit_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Declare(_) | Stmt::Empty { .. } => {}
            Stmt::DeclareAssign { declare, expr, .. } => self.visit_assign(declare, expr),
            Stmt::Assign { name, offset, expr, .. } => {
                let value = self.fetch(expr);
                self.emit(Quadruple::assign(
                    value,
                    Operand::identifier(name.name.clone(), *offset),
                ));
            }
            Stmt::Return { expr, .. } => {
                let value = self.fetch(expr);
                self.emit(Quadruple::ret(value));
            }
            Stmt::Compound { statements, .. } | Stmt::StatementBlock { statements, .. } => {
                for statement in statements {
                    self.visit_stmt(statement);
                }
            }
            Stmt::If(branch) => self.visit_if_branch(branch),
            Stmt::IfStatement {
                branches,
                else_body,
                ..
            } => {
                for branch in branches {
                    self.visit_if_branch(branch);
                }
                if let Some(body) = else_body {
                    self.visit_stmt(body);
                }
            }
            Stmt::While { condition, body, .. } => {
                let top = self.fresh_label();
                self.emit(Quadruple::label(top.clone()));
                let cond = self.fetch(condition);
                let end = self.fresh_label();
                self.emit(Quadruple::if_false(cond, end.clone()));
                if let Some(body) = body {
                    self.visit_stmt(body);
                }
                self.emit(Quadruple::goto(top));
                self.emit(Quadruple::label(end));
            }
            Stmt::DoWhile { body, condition, .. } => {
                let top = self.fresh_label();
                self.emit(Quadruple::label(top.clone()));
                if let Some(body) = body {
                    self.visit_stmt(body);
                }
                let cond = self.fetch(condition);
                self.emit(Quadruple::if_true(cond, top));
            }
        }
    }

    fn visit_if_branch(&mut self, branch: &IfBranch) {
        let cond = self.fetch(&branch.condition);
        let end = self.fresh_label();
        self.emit(Quadruple::if_false(cond, end.clone()));
        if let Some(body) = &branch.body {
            self.visit_stmt(body);
        }
        self.emit(Quadruple::label(end));
    }

    fn visit_assign(&mut self, declare: &Declare, expr: &Expr) {
        let value = self.fetch(expr);
        self.emit(Quadruple::assign(
            value,
            Operand::identifier(declare.name.name.clone(), None),
        ));
    }
}

impl Default for IrGen {
    fn default() -> Self {
        Self::new()
    }
}
