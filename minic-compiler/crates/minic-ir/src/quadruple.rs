//! The flat three-address instruction the IR generator emits: `(op, src1,
//! src2, dest)` with any slot left empty when the instruction doesn't need
//! it. A compilation's IR is just `Vec<Quadruple>`, appended to in order and
//! never mutated once the generator has moved past it.

use crate::operand::Operand;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quadruple {
    pub op: Option<String>,
    pub src1: Option<Operand>,
    pub src2: Option<Operand>,
    pub dest: Option<Operand>,
}

impl Quadruple {
    /// A leaf result with no instruction attached: `Integer`/`Identifier`
    /// visits return one of these so the parent can read `.dest`.
    pub fn value(dest: Operand) -> Self {
        Quadruple {
            op: None,
            src1: None,
            src2: None,
            dest: Some(dest),
        }
    }

    pub fn unary(op: &str, src1: Operand, dest: Operand) -> Self {
        Quadruple {
            op: Some(op.to_string()),
            src1: Some(src1),
            src2: None,
            dest: Some(dest),
        }
    }

    pub fn binary(op: &str, src1: Operand, src2: Operand, dest: Operand) -> Self {
        Quadruple {
            op: Some(op.to_string()),
            src1: Some(src1),
            src2: Some(src2),
            dest: Some(dest),
        }
    }

    pub fn assign(src1: Operand, dest: Operand) -> Self {
        Quadruple {
            op: Some("=".to_string()),
            src1: Some(src1),
            src2: None,
            dest: Some(dest),
        }
    }

    pub fn if_false(cond: Operand, target: Operand) -> Self {
        Quadruple {
            op: Some("IfFalse".to_string()),
            src1: Some(cond),
            src2: None,
            dest: Some(target),
        }
    }

    pub fn if_true(cond: Operand, target: Operand) -> Self {
        Quadruple {
            op: Some("If".to_string()),
            src1: Some(cond),
            src2: None,
            dest: Some(target),
        }
    }

    pub fn goto(target: Operand) -> Self {
        Quadruple {
            op: Some("Goto".to_string()),
            src1: None,
            src2: None,
            dest: Some(target),
        }
    }

    pub fn label(target: Operand) -> Self {
        Quadruple {
            op: Some("Label".to_string()),
            src1: None,
            src2: None,
            dest: Some(target),
        }
    }

    pub fn ret(value: Operand) -> Self {
        Quadruple {
            op: Some("Return".to_string()),
            src1: None,
            src2: None,
            dest: Some(value),
        }
    }

    /// Whether this quadruple is an actual instruction or just a leaf
    /// result carrying a `dest` for the parent visit to read.
    pub fn is_instruction(&self) -> bool {
        self.op.is_some()
    }
}

impl std::fmt::Display for Quadruple {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let op = match &self.op {
            Some(op) => op,
            None => return Ok(()),
        };
        match op.as_str() {
            "=" => write!(f, "{} = {};", self.dest.as_ref().unwrap(), self.src1.as_ref().unwrap()),
            "IfFalse" | "If" => write!(
                f,
                "{op} {} Goto {};",
                self.src1.as_ref().unwrap(),
                self.dest.as_ref().unwrap()
            ),
            "Goto" => write!(f, "Goto {};", self.dest.as_ref().unwrap()),
            "Label" => write!(f, "Label {}:", self.dest.as_ref().unwrap()),
            "Return" => write!(f, "Return {};", self.dest.as_ref().unwrap()),
            _ if self.src2.is_some() => write!(
                f,
                "{} = {} {op} {};",
                self.dest.as_ref().unwrap(),
                self.src1.as_ref().unwrap(),
                self.src2.as_ref().unwrap()
            ),
            _ => write!(
                f,
                "{} = {op} {};",
                self.dest.as_ref().unwrap(),
                self.src1.as_ref().unwrap()
            ),
        }
    }
}
