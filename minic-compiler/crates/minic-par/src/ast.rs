//! Abstract syntax tree produced by the parser.
//!
//! Every node carries a [`NodeId`]: a stable identity, unique within one
//! parse, used later to derive scope names (`IF_<id>`, `WHILE_<id>`, ...)
//! and to label nodes in AST dump sidecars. Children are owned by their
//! parent through `Box`; the tree is acyclic and every non-root node has
//! exactly one parent.

use minic_util::define_idx;

define_idx!(NodeId);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:x}", self.0)
    }
}

/// An identifier occurrence: the name plus where it was written, so
/// diagnostics can point at it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub name: String,
    pub line: u32,
    pub col: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Plus,
    Minus,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

/// The operator of a `Condition` node: relational, equality, or logical.
/// Kept distinct from [`BinaryOperator`] because conditions feed control
/// flow rather than arithmetic (§4.4 routes them through the same
/// temporary-producing quadruple path as binary ops, but the grammar keeps
/// them in their own layer).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionOperator {
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
    And,
    Or,
}

impl ConditionOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            ConditionOperator::Eq => "==",
            ConditionOperator::Ne => "!=",
            ConditionOperator::Lt => "<",
            ConditionOperator::Gt => ">",
            ConditionOperator::Le => "<=",
            ConditionOperator::Ge => ">=",
            ConditionOperator::And => "&&",
            ConditionOperator::Or => "||",
        }
    }
}

impl BinaryOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Sub => "-",
            BinaryOperator::Mul => "*",
            BinaryOperator::Div => "/",
            BinaryOperator::Mod => "%",
        }
    }
}

impl UnaryOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            UnaryOperator::Plus => "+",
            UnaryOperator::Minus => "-",
            UnaryOperator::Not => "!",
        }
    }
}

/// An expression node. `Identifier`'s `offset` starts `None` and is filled
/// in by the semantic analyser once the name resolves.
#[derive(Debug, Clone)]
pub enum Expr {
    Integer {
        id: NodeId,
        value: i64,
    },
    Identifier {
        id: NodeId,
        name: Ident,
        offset: Option<i32>,
    },
    UnaryOp {
        id: NodeId,
        op: UnaryOperator,
        expr: Box<Expr>,
    },
    BinaryOp {
        id: NodeId,
        op: BinaryOperator,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Condition {
        id: NodeId,
        op: ConditionOperator,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

impl Expr {
    pub fn id(&self) -> NodeId {
        match self {
            Expr::Integer { id, .. }
            | Expr::Identifier { id, .. }
            | Expr::UnaryOp { id, .. }
            | Expr::BinaryOp { id, .. }
            | Expr::Condition { id, .. } => *id,
        }
    }
}

/// A `type IDENT` declaration, shared by the bare `Declare` statement and
/// `DeclareAssign`.
#[derive(Debug, Clone)]
pub struct Declare {
    pub id: NodeId,
    pub type_name: String,
    pub name: Ident,
}

/// One `if (...)`/`else if (...)` branch. Reused both as the lone branch of
/// a standalone `If` statement and as an element of `IfStatement.branches`
/// when the source chains `else if`.
#[derive(Debug, Clone)]
pub struct IfBranch {
    pub id: NodeId,
    pub condition: Expr,
    pub body: Option<Box<Stmt>>,
}

/// A statement node. `Compound` is the program root; `StatementBlock` is a
/// free-floating `{ ... }` that introduces its own scope like a compound
/// does, but never appears at the root.
#[derive(Debug, Clone)]
pub enum Stmt {
    Declare(Declare),
    DeclareAssign {
        id: NodeId,
        declare: Declare,
        expr: Expr,
    },
    Assign {
        id: NodeId,
        name: Ident,
        offset: Option<i32>,
        expr: Expr,
    },
    Return {
        id: NodeId,
        expr: Expr,
    },
    Empty {
        id: NodeId,
    },
    Compound {
        id: NodeId,
        statements: Vec<Stmt>,
    },
    StatementBlock {
        id: NodeId,
        statements: Vec<Stmt>,
    },
    If(IfBranch),
    IfStatement {
        id: NodeId,
        branches: Vec<IfBranch>,
        else_body: Option<Box<Stmt>>,
    },
    While {
        id: NodeId,
        condition: Expr,
        body: Option<Box<Stmt>>,
    },
    DoWhile {
        id: NodeId,
        body: Option<Box<Stmt>>,
        condition: Expr,
    },
}

impl Stmt {
    pub fn id(&self) -> NodeId {
        match self {
            Stmt::Declare(d) => d.id,
            Stmt::DeclareAssign { id, .. }
            | Stmt::Assign { id, .. }
            | Stmt::Return { id, .. }
            | Stmt::Empty { id }
            | Stmt::Compound { id, .. }
            | Stmt::StatementBlock { id, .. }
            | Stmt::While { id, .. }
            | Stmt::DoWhile { id, .. }
            | Stmt::IfStatement { id, .. } => *id,
            Stmt::If(branch) => branch.id,
        }
    }
}
