// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Symbolic expression trees for the loom emitter.
//!
//! Nodes live in an [`ExprArena`] and are referred to by [`ExprId`].
//! Placeholders stay abstract until the emitter binds them to IR values.

mod arena;
mod display;
mod expr;
mod stmt;

pub use arena::ExprArena;
pub use display::ExprDisplay;
pub use expr::{BinaryOp, BlockLikeKind, ExprId, ExprKind, ExprNode, TernaryOp, UnaryOp, VariadicOp};
pub use stmt::{Stmt, StmtBlock, StmtBlockId};
