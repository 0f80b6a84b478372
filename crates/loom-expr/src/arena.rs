// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Node arena and operator constructors.
//!
//! Constructors only build tree structure. Nothing here looks at bindings
//! or touches an IR builder; lowering happens when the emitter walks the tree.

use crate::{
    BinaryOp, BlockLikeKind, ExprId, ExprKind, ExprNode, Stmt, StmtBlock, StmtBlockId, TernaryOp,
    UnaryOp, VariadicOp,
};
use loom_ir::IrType;

#[derive(Debug, Default)]
pub struct ExprArena {
    nodes: Vec<ExprNode>,
    next_block: u32,
}

impl ExprArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: ExprId) -> &ExprNode {
        &self.nodes[id.0 as usize]
    }

    pub fn kind(&self, id: ExprId) -> &ExprKind {
        &self.node(id).kind
    }

    pub fn ty(&self, id: ExprId) -> Option<&IrType> {
        self.node(id).ty.as_ref()
    }

    fn push(&mut self, kind: ExprKind, ty: Option<IrType>) -> ExprId {
        let id = ExprId(self.nodes.len() as u32);
        self.nodes.push(ExprNode { kind, ty });
        id
    }

    // ── Placeholders ────────────────────────────────────────────

    /// Fresh typed placeholder.
    pub fn unbound(&mut self, ty: IrType) -> ExprId {
        self.push(ExprKind::Unbound, Some(ty))
    }

    /// Fresh placeholder whose type is decided by whatever gets bound to it.
    pub fn placeholder(&mut self) -> ExprId {
        self.push(ExprKind::Unbound, None)
    }

    /// `n` fresh placeholders of the same type.
    pub fn unbound_n(&mut self, n: usize, ty: &IrType) -> Vec<ExprId> {
        (0..n).map(|_| self.unbound(ty.clone())).collect()
    }

    // ── Operators ───────────────────────────────────────────────

    pub fn unary(&mut self, op: UnaryOp, operand: ExprId) -> ExprId {
        self.push(ExprKind::Unary { op, operand }, None)
    }

    pub fn binary(&mut self, op: BinaryOp, lhs: ExprId, rhs: ExprId) -> ExprId {
        self.push(ExprKind::Binary { op, lhs, rhs }, None)
    }

    pub fn add(&mut self, lhs: ExprId, rhs: ExprId) -> ExprId {
        self.binary(BinaryOp::Add, lhs, rhs)
    }

    pub fn sub(&mut self, lhs: ExprId, rhs: ExprId) -> ExprId {
        self.binary(BinaryOp::Sub, lhs, rhs)
    }

    pub fn mul(&mut self, lhs: ExprId, rhs: ExprId) -> ExprId {
        self.binary(BinaryOp::Mul, lhs, rhs)
    }

    pub fn lt(&mut self, lhs: ExprId, rhs: ExprId) -> ExprId {
        self.binary(BinaryOp::Lt, lhs, rhs)
    }

    pub fn le(&mut self, lhs: ExprId, rhs: ExprId) -> ExprId {
        self.binary(BinaryOp::Le, lhs, rhs)
    }

    pub fn gt(&mut self, lhs: ExprId, rhs: ExprId) -> ExprId {
        self.binary(BinaryOp::Gt, lhs, rhs)
    }

    pub fn ge(&mut self, lhs: ExprId, rhs: ExprId) -> ExprId {
        self.binary(BinaryOp::Ge, lhs, rhs)
    }

    pub fn eq(&mut self, lhs: ExprId, rhs: ExprId) -> ExprId {
        self.binary(BinaryOp::Eq, lhs, rhs)
    }

    pub fn ne(&mut self, lhs: ExprId, rhs: ExprId) -> ExprId {
        self.binary(BinaryOp::Ne, lhs, rhs)
    }

    pub fn and(&mut self, lhs: ExprId, rhs: ExprId) -> ExprId {
        self.binary(BinaryOp::And, lhs, rhs)
    }

    pub fn or(&mut self, lhs: ExprId, rhs: ExprId) -> ExprId {
        self.binary(BinaryOp::Or, lhs, rhs)
    }

    pub fn negate(&mut self, operand: ExprId) -> ExprId {
        self.unary(UnaryOp::Not, operand)
    }

    pub fn select(&mut self, cond: ExprId, then: ExprId, otherwise: ExprId) -> ExprId {
        self.push(
            ExprKind::Ternary {
                op: TernaryOp::Select,
                operands: [cond, then, otherwise],
            },
            None,
        )
    }

    pub fn variadic(&mut self, op: VariadicOp, operands: Vec<ExprId>) -> ExprId {
        let ty = match &op {
            VariadicOp::Alloc(ty) => Some(ty.clone()),
            VariadicOp::Call { result, .. } => result.clone(),
            _ => None,
        };
        self.push(ExprKind::Variadic { op, operands }, ty)
    }

    pub fn load(&mut self, memref: ExprId, indices: &[ExprId]) -> ExprId {
        let mut operands = vec![memref];
        operands.extend_from_slice(indices);
        self.variadic(VariadicOp::Load, operands)
    }

    pub fn store(&mut self, value: ExprId, memref: ExprId, indices: &[ExprId]) -> ExprId {
        let mut operands = vec![value, memref];
        operands.extend_from_slice(indices);
        self.variadic(VariadicOp::Store, operands)
    }

    pub fn alloc(&mut self, ty: IrType, dynamic_sizes: &[ExprId]) -> ExprId {
        self.variadic(VariadicOp::Alloc(ty), dynamic_sizes.to_vec())
    }

    pub fn dealloc(&mut self, memref: ExprId) -> ExprId {
        self.variadic(VariadicOp::Dealloc, vec![memref])
    }

    pub fn ret(&mut self, values: &[ExprId]) -> ExprId {
        self.variadic(VariadicOp::Return, values.to_vec())
    }

    pub fn call(&mut self, callee: impl Into<String>, result: Option<IrType>, args: &[ExprId]) -> ExprId {
        self.variadic(
            VariadicOp::Call {
                callee: callee.into(),
                result,
            },
            args.to_vec(),
        )
    }

    /// Bounded loop node over `[lower, upper)` with the given step.
    pub fn for_range(&mut self, lower: ExprId, upper: ExprId, step: ExprId) -> ExprId {
        self.push(
            ExprKind::StmtBlockLike {
                kind: BlockLikeKind::For,
                exprs: vec![lower, upper, step],
            },
            Some(IrType::Index),
        )
    }

    // ── Statements ──────────────────────────────────────────────

    /// Statement binding a fresh placeholder to `rhs`.
    pub fn stmt(&mut self, rhs: ExprId, body: Vec<Stmt>) -> Stmt {
        let ty = self.ty(rhs).cloned();
        let lhs = self.push(ExprKind::Unbound, ty);
        Stmt::bind(lhs, rhs, body)
    }

    /// `for iv = lower to upper step step { body }`
    pub fn for_loop(
        &mut self,
        iv: ExprId,
        lower: ExprId,
        upper: ExprId,
        step: ExprId,
        body: Vec<Stmt>,
    ) -> Stmt {
        let rhs = self.for_range(lower, upper, step);
        Stmt::bind(iv, rhs, body)
    }

    /// New statement block with its own identity.
    pub fn block(&mut self, args: Vec<ExprId>, body: Vec<Stmt>) -> StmtBlock {
        let id = StmtBlockId(self.next_block);
        self.next_block += 1;
        StmtBlock { id, args, body }
    }
}
