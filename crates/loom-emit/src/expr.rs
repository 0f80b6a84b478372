// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! Expression emission - memoized lowering of symbolic nodes.

use loom_expr::{BlockLikeKind, ExprId, ExprKind, TernaryOp, UnaryOp, VariadicOp};
use loom_ir::{AffineMap, ForBounds, OpKind, ValueId};
use tracing::{debug, error, trace};

use crate::{arith, BoundSide, EmitResult, Emitter, InvariantViolation};

impl Emitter<'_> {
    /// Materialize `node`, reusing its binding when there is one.
    ///
    /// Returns `Ok(None)` for zero-result applications (store, dealloc,
    /// return, result-less calls). Operands are emitted before their
    /// consumer and memoized, so a shared operand is emitted once.
    pub fn emit_expr(&mut self, node: ExprId) -> EmitResult<Option<ValueId>> {
        if let Some(value) = self.value_of(node) {
            trace!(node = %node, value = %value, "memo hit");
            return Ok(Some(value));
        }
        if self.effects.contains(&node) {
            return Ok(None);
        }

        let kind = self.exprs.kind(node).clone();
        let result = match kind {
            ExprKind::Unbound => return Err(self.missing_value(node)),
            ExprKind::Unary {
                op: UnaryOp::Not,
                operand,
            } => {
                let value = self.emit_operand(operand)?;
                let ty = self.builder.value_type(value).clone();
                Some(self.create_value(OpKind::Not, vec![value], ty))
            }
            ExprKind::Binary { op, lhs, rhs } => {
                let lhs = self.emit_operand(lhs)?;
                let rhs = self.emit_operand(rhs)?;
                Some(arith::binary(self.builder, &self.location, op, lhs, rhs))
            }
            ExprKind::Ternary {
                op: TernaryOp::Select,
                operands,
            } => {
                let values = self.emit_operands(&operands)?;
                let ty = self.builder.value_type(values[1]).clone();
                Some(self.create_value(OpKind::Select, values, ty))
            }
            ExprKind::Variadic { op, operands } => self.emit_variadic(node, &op, &operands)?,
            ExprKind::StmtBlockLike {
                kind: BlockLikeKind::For,
                exprs,
            } => Some(self.emit_for(node, &exprs)?),
        };

        match result {
            Some(value) => {
                self.record(node, value);
                Ok(Some(value))
            }
            None => {
                self.effects.insert(node);
                Ok(None)
            }
        }
    }

    /// Emit each node in order; stops at the first failure.
    pub fn emit_exprs(&mut self, nodes: &[ExprId]) -> EmitResult<Vec<Option<ValueId>>> {
        nodes.iter().map(|&node| self.emit_expr(node)).collect()
    }

    /// Emit a node whose value is required.
    pub fn emit_operand(&mut self, node: ExprId) -> EmitResult<ValueId> {
        match self.emit_expr(node)? {
            Some(value) => Ok(value),
            None => Err(self.missing_value(node)),
        }
    }

    fn emit_operands(&mut self, nodes: &[ExprId]) -> EmitResult<Vec<ValueId>> {
        nodes.iter().map(|&node| self.emit_operand(node)).collect()
    }

    fn emit_variadic(
        &mut self,
        node: ExprId,
        op: &VariadicOp,
        operands: &[ExprId],
    ) -> EmitResult<Option<ValueId>> {
        let values = self.emit_operands(operands)?;
        match op {
            VariadicOp::Load => {
                let Some(&memref) = values.first() else {
                    return Err(self.missing_operands(node));
                };
                let elem = self.builder.value_type(memref).element_type().clone();
                Ok(Some(self.create_value(OpKind::Load, values, elem)))
            }
            VariadicOp::Store => {
                if values.len() < 2 {
                    return Err(self.missing_operands(node));
                }
                self.create_effect(OpKind::Store, values);
                Ok(None)
            }
            VariadicOp::Alloc(ty) => Ok(Some(self.create_value(OpKind::Alloc, values, ty.clone()))),
            VariadicOp::Dealloc => {
                if values.is_empty() {
                    return Err(self.missing_operands(node));
                }
                self.create_effect(OpKind::Dealloc, values);
                Ok(None)
            }
            VariadicOp::Return => {
                self.create_effect(OpKind::Return, values);
                Ok(None)
            }
            VariadicOp::Call { callee, result } => {
                let kind = OpKind::Call {
                    callee: callee.clone(),
                };
                let op = self
                    .builder
                    .create_op(kind, values, result.clone(), &self.location);
                Ok(self.builder.result(op))
            }
        }
    }

    /// Lower a bounded loop node to `affine.for` and return its induction
    /// variable. The cursor is left where it was.
    fn emit_for(&mut self, node: ExprId, exprs: &[ExprId]) -> EmitResult<ValueId> {
        let [lower, upper, step] = exprs else {
            return Err(InvariantViolation::MalformedLoop {
                node,
                expr: self.render(node),
                found: exprs.len(),
            }
            .into());
        };
        let lower = self.emit_operand(*lower)?;
        let upper = self.emit_operand(*upper)?;
        let step = self.emit_operand(*step)?;

        let Some(step) = self.constant_index(step) else {
            error!(node = %node, "dynamic loop step");
            return Err(InvariantViolation::DynamicLoopStep {
                node,
                expr: self.render(node),
            }
            .into());
        };
        self.check_affine_provenance(node, BoundSide::Lower, lower)?;
        self.check_affine_provenance(node, BoundSide::Upper, upper)?;

        let (bounds, operands) = match (self.constant_index(lower), self.constant_index(upper)) {
            (Some(lower), Some(upper)) => (ForBounds::Constant { lower, upper, step }, vec![]),
            _ => (
                ForBounds::Symbolic {
                    lower_map: AffineMap::identity(1),
                    upper_map: AffineMap::identity(1),
                    step,
                },
                vec![lower, upper],
            ),
        };
        let for_loop = self.builder.create_for(bounds, operands, &self.location);
        debug!(node = %node, iv = %for_loop.induction_var, "loop");
        Ok(for_loop.induction_var)
    }

    fn constant_index(&self, value: ValueId) -> Option<i64> {
        match self.builder.defining_op(value).map(|op| &op.kind) {
            Some(OpKind::ConstantIndex(c)) => Some(*c),
            _ => None,
        }
    }

    /// Loop bounds must come from a constant, an `affine.apply`, or a
    /// block argument (function arguments and induction variables).
    fn check_affine_provenance(&self, node: ExprId, side: BoundSide, value: ValueId) -> EmitResult<()> {
        match self.builder.defining_op(value).map(|op| &op.kind) {
            None | Some(OpKind::ConstantIndex(_)) | Some(OpKind::AffineApply(_)) => Ok(()),
            Some(kind) => {
                let producer = kind.name();
                error!(node = %node, %side, producer, "non-affine loop bound");
                Err(InvariantViolation::NonAffineBound {
                    node,
                    expr: self.render(node),
                    side,
                    producer,
                }
                .into())
            }
        }
    }

    fn missing_operands(&self, node: ExprId) -> crate::EmitError {
        InvariantViolation::MissingOperands {
            node,
            expr: self.render(node),
        }
        .into()
    }
}
