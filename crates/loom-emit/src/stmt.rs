// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! Statement and block emission.

use loom_expr::{ExprKind, Stmt, StmtBlock, VariadicOp};
use loom_ir::{BlockId, IrType};
use tracing::{debug, error};

use crate::{EmitResult, Emitter, InvariantViolation};

impl Emitter<'_> {
    /// Emit `stmt` and its nested statements. The cursor is back where it
    /// started on return, including when emission fails.
    pub fn emit_stmt(&mut self, stmt: &Stmt) -> EmitResult<()> {
        self.with_saved_insertion_point(|this| this.emit_stmt_here(stmt))
    }

    /// Emit in order; the first failure abandons the rest.
    pub fn emit_stmts(&mut self, stmts: &[Stmt]) -> EmitResult<()> {
        for stmt in stmts {
            self.emit_stmt(stmt)?;
        }
        Ok(())
    }

    fn emit_stmt_here(&mut self, stmt: &Stmt) -> EmitResult<()> {
        let Some(value) = self.emit_expr(stmt.rhs)? else {
            if self.is_pure_effect(stmt) {
                return self.emit_stmts(&stmt.body);
            }
            let expr = self.render(stmt.rhs);
            error!(node = %stmt.rhs, expr = %expr, "statement produced no value");
            return Err(InvariantViolation::UnexpectedZeroResult {
                node: stmt.rhs,
                expr,
            }
            .into());
        };
        self.bind(stmt.lhs, value)?;

        if self.exprs.kind(stmt.rhs).is_for() {
            let body = self.builder.induction_var_owner(value).and_then(|op| op.body);
            if let Some(body) = body {
                self.builder.set_insertion_point_to_start(body);
            }
        }
        self.emit_stmts(&stmt.body)
    }

    fn is_pure_effect(&self, stmt: &Stmt) -> bool {
        matches!(
            self.exprs.kind(stmt.rhs),
            ExprKind::Variadic {
                op: VariadicOp::Store | VariadicOp::Dealloc | VariadicOp::Return,
                ..
            }
        )
    }

    /// Lower `block` to a fresh IR block. Emitting the same block again
    /// returns the block created the first time.
    pub fn emit_block(&mut self, block: &StmtBlock) -> EmitResult<BlockId> {
        if let Some(existing) = self.block_for(block.id) {
            return Ok(existing);
        }
        let arg_types = self.block_argument_types(block)?;

        self.with_saved_insertion_point(|this| {
            let ir_block = this.builder.create_block();
            this.block_bindings.insert(block.id, ir_block);
            debug!(block = %ir_block, args = block.args.len(), "block");
            for (&arg, ty) in block.args.iter().zip(arg_types) {
                let value = this.builder.add_block_argument(ir_block, ty);
                this.record(arg, value);
            }
            this.emit_stmts(&block.body)?;
            Ok(ir_block)
        })
    }

    /// Arguments must be distinct fresh typed placeholders; checked before
    /// any IR is created.
    fn block_argument_types(&self, block: &StmtBlock) -> EmitResult<Vec<IrType>> {
        block
            .args
            .iter()
            .enumerate()
            .map(|(pos, &arg)| -> EmitResult<IrType> {
                if block.args[..pos].contains(&arg) {
                    error!(node = %arg, "block argument listed twice");
                    return Err(InvariantViolation::DuplicateBlockArgument {
                        node: arg,
                        expr: self.render(arg),
                    }
                    .into());
                }
                if !self.exprs.kind(arg).is_unbound() || self.value_of(arg).is_some() {
                    error!(node = %arg, "block argument already has a value");
                    return Err(InvariantViolation::BoundBlockArgument {
                        node: arg,
                        expr: self.render(arg),
                    }
                    .into());
                }
                self.exprs.ty(arg).cloned().ok_or_else(|| {
                    InvariantViolation::UntypedBlockArgument {
                        node: arg,
                        expr: self.render(arg),
                    }
                    .into()
                })
            })
            .collect()
    }
}
