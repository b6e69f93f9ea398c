//! The value side of a [`crate::Quadruple`]: literals, variables, and the
//! two kinds of names the IR generator mints for itself.

/// What an [`Operand`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandKind {
    IntLiteral,
    Identifier,
    Temporary,
    Label,
}

/// One value slot in a quadruple. `name` carries the printable form
/// (`"3"`, `"a"`, `"_t0"`, `"L0"`); `address` is the stack offset for
/// `Identifier` operands resolved by semantic analysis, `None` otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operand {
    pub kind: OperandKind,
    pub name: String,
    pub address: Option<i32>,
}

impl Operand {
    pub fn int_literal(value: i64) -> Self {
        Operand {
            kind: OperandKind::IntLiteral,
            name: value.to_string(),
            address: None,
        }
    }

    pub fn identifier(name: impl Into<String>, address: Option<i32>) -> Self {
        Operand {
            kind: OperandKind::Identifier,
            name: name.into(),
            address,
        }
    }

    pub fn temporary(index: u32) -> Self {
        Operand {
            kind: OperandKind::Temporary,
            name: format!("_t{index}"),
            address: None,
        }
    }

    pub fn label(index: u32) -> Self {
        Operand {
            kind: OperandKind::Label,
            name: format!("L{index}"),
            address: None,
        }
    }
}

impl std::fmt::Display for Operand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}
