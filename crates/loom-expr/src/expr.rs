// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Symbolic expression nodes.

use loom_ir::IrType;

/// Arena-issued identity of a symbolic node. Two ids are equal iff they
/// denote the same node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExprId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// Logical negation of an `i1`.
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TernaryOp {
    /// `select(cond, then, else)`
    Select,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VariadicOp {
    /// `[memref, indices...]`
    Load,
    /// `[value, memref, indices...]`
    Store,
    /// `[dynamic extents...]`, allocating a buffer of the given memref type.
    Alloc(IrType),
    /// `[memref]`
    Dealloc,
    /// `[values...]`
    Return,
    /// Call with an optional single result.
    Call {
        callee: String,
        result: Option<IrType>,
    },
}

/// Structured constructs that introduce a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockLikeKind {
    /// Bounded loop; exprs are `[lower, upper, step]`.
    For,
}

/// The kind of a symbolic node.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// Placeholder awaiting a binding.
    Unbound,
    Unary {
        op: UnaryOp,
        operand: ExprId,
    },
    Binary {
        op: BinaryOp,
        lhs: ExprId,
        rhs: ExprId,
    },
    Ternary {
        op: TernaryOp,
        operands: [ExprId; 3],
    },
    Variadic {
        op: VariadicOp,
        operands: Vec<ExprId>,
    },
    StmtBlockLike {
        kind: BlockLikeKind,
        exprs: Vec<ExprId>,
    },
}

impl ExprKind {
    pub fn is_unbound(&self) -> bool {
        matches!(self, ExprKind::Unbound)
    }

    /// Unary, binary, ternary and variadic applications.
    pub fn is_application(&self) -> bool {
        matches!(
            self,
            ExprKind::Unary { .. }
                | ExprKind::Binary { .. }
                | ExprKind::Ternary { .. }
                | ExprKind::Variadic { .. }
        )
    }

    pub fn is_for(&self) -> bool {
        matches!(
            self,
            ExprKind::StmtBlockLike {
                kind: BlockLikeKind::For,
                ..
            }
        )
    }
}

/// A node in the arena. Placeholders usually carry the type they will
/// be bound to; applications leave it to the emitter.
#[derive(Debug, Clone)]
pub struct ExprNode {
    pub kind: ExprKind,
    pub ty: Option<IrType>,
}
