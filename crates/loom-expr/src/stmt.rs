// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Statements and statement blocks.

use crate::ExprId;

/// `lhs = rhs { body }`
///
/// Once emitted, `lhs` is bound to the value of `rhs`. For loops the body
/// is emitted inside the loop.
#[derive(Debug, Clone)]
pub struct Stmt {
    pub lhs: ExprId,
    pub rhs: ExprId,
    pub body: Vec<Stmt>,
}

impl Stmt {
    /// Statement with a caller-chosen placeholder as its left-hand side.
    pub fn bind(lhs: ExprId, rhs: ExprId, body: Vec<Stmt>) -> Self {
        Self { lhs, rhs, body }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StmtBlockId(pub u32);

/// A named scope with declared arguments, lowered to a real IR block.
#[derive(Debug, Clone)]
pub struct StmtBlock {
    pub id: StmtBlockId,
    pub args: Vec<ExprId>,
    pub body: Vec<Stmt>,
}
