// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Diagnostic rendering of symbolic trees.

use crate::{BinaryOp, ExprArena, ExprId, ExprKind, TernaryOp, UnaryOp, VariadicOp};
use std::fmt;

impl fmt::Display for ExprId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0)
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sym = match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        };
        write!(f, "{}", sym)
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnaryOp::Not => write!(f, "!"),
        }
    }
}

/// Renders a node and everything under it.
pub struct ExprDisplay<'a> {
    arena: &'a ExprArena,
    id: ExprId,
}

impl ExprArena {
    pub fn display(&self, id: ExprId) -> ExprDisplay<'_> {
        ExprDisplay { arena: self, id }
    }
}

impl ExprDisplay<'_> {
    fn child(&self, id: ExprId) -> Self {
        ExprDisplay {
            arena: self.arena,
            id,
        }
    }

    fn list(&self, f: &mut fmt::Formatter<'_>, ids: &[ExprId]) -> fmt::Result {
        for (i, &id) in ids.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", self.child(id))?;
        }
        Ok(())
    }
}

impl fmt::Display for ExprDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.arena.kind(self.id) {
            ExprKind::Unbound => match self.arena.ty(self.id) {
                Some(ty) => write!(f, "{}:{}", self.id, ty),
                None => write!(f, "{}", self.id),
            },
            ExprKind::Unary { op, operand } => write!(f, "{}{}", op, self.child(*operand)),
            ExprKind::Binary { op, lhs, rhs } => {
                write!(f, "({} {} {})", self.child(*lhs), op, self.child(*rhs))
            }
            ExprKind::Ternary {
                op: TernaryOp::Select,
                operands,
            } => {
                write!(f, "select(")?;
                self.list(f, operands)?;
                write!(f, ")")
            }
            ExprKind::Variadic { op, operands } => {
                match op {
                    VariadicOp::Load => write!(f, "load(")?,
                    VariadicOp::Store => write!(f, "store(")?,
                    VariadicOp::Alloc(ty) => write!(f, "alloc<{}>(", ty)?,
                    VariadicOp::Dealloc => write!(f, "dealloc(")?,
                    VariadicOp::Return => write!(f, "return(")?,
                    VariadicOp::Call { callee, .. } => write!(f, "call @{}(", callee)?,
                }
                self.list(f, operands)?;
                write!(f, ")")
            }
            ExprKind::StmtBlockLike { exprs, .. } => {
                write!(f, "for(")?;
                self.list(f, exprs)?;
                write!(f, ")")
            }
        }
    }
}
