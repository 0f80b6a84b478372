// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! Memref shape and region views.
//!
//! A view is the `[lower, upper)` box with unit steps covering a whole
//! memref, as placeholders bound to `index` values: ready to drive one
//! loop per dimension.

use loom_expr::ExprId;
use loom_ir::{is_dynamic_size, IrType, OpKind, ValueId};
use tracing::debug;

use crate::{EmitResult, Emitter, InvariantViolation};

/// Per-dimension loop bounds over a memref.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemRefView {
    pub lower_bounds: Vec<ExprId>,
    pub upper_bounds: Vec<ExprId>,
    pub steps: Vec<ExprId>,
}

impl MemRefView {
    pub fn rank(&self) -> usize {
        self.upper_bounds.len()
    }
}

impl Emitter<'_> {
    /// One fresh `index` placeholder per dimension of `memref`, in
    /// ascending order, bound to the static extent or to `dim`.
    pub fn bound_memref_shape(&mut self, memref: ValueId) -> EmitResult<Vec<ExprId>> {
        let shape = self.memref_shape_of(memref)?;
        let mut sizes = Vec::with_capacity(shape.len());
        for (index, extent) in shape.into_iter().enumerate() {
            let value = if is_dynamic_size(extent) {
                self.create_value(OpKind::Dim { index: index as u32 }, vec![memref], IrType::Index)
            } else {
                self.create_value(OpKind::ConstantIndex(extent), vec![], IrType::Index)
            };
            let node = self.exprs.unbound(IrType::Index);
            self.record(node, value);
            sizes.push(node);
        }
        Ok(sizes)
    }

    /// Full-extent view of `memref`. Emits `constant 0`, the sizes, then
    /// `constant 1`; every dimension shares the same zero and one.
    pub fn bound_memref_view(&mut self, memref: ValueId) -> EmitResult<MemRefView> {
        self.memref_shape_of(memref)?;
        let zero = self.bind_constant_index(0);
        let upper_bounds = self.bound_memref_shape(memref)?;
        let one = self.bind_constant_index(1);
        let rank = upper_bounds.len();
        debug!(memref = %memref, rank, "memref view");
        Ok(MemRefView {
            lower_bounds: vec![zero; rank],
            upper_bounds,
            steps: vec![one; rank],
        })
    }

    /// [`bound_memref_view`](Self::bound_memref_view) of the value bound to `node`.
    pub fn bound_memref_view_of(&mut self, node: ExprId) -> EmitResult<MemRefView> {
        let memref = self.expect_bound(node)?;
        self.bound_memref_view(memref)
    }

    pub fn bound_memref_rank(&self, node: ExprId) -> EmitResult<usize> {
        let memref = self.expect_bound(node)?;
        Ok(self.memref_shape_of(memref)?.len())
    }

    /// Shape of the memref bound to `node`, written into `out`.
    pub fn bind_memref_shape_into(&mut self, node: ExprId, out: &mut [ExprId]) -> EmitResult<()> {
        let rank = self.bound_memref_rank(node)?;
        check_slots(rank, out.len())?;
        let memref = self.expect_bound(node)?;
        let sizes = self.bound_memref_shape(memref)?;
        out.copy_from_slice(&sizes);
        Ok(())
    }

    /// View of the memref bound to `node`, written into caller buffers.
    pub fn bind_memref_view_into(
        &mut self,
        node: ExprId,
        lower_bounds: &mut [ExprId],
        upper_bounds: &mut [ExprId],
        steps: &mut [ExprId],
    ) -> EmitResult<()> {
        let rank = self.bound_memref_rank(node)?;
        for slots in [lower_bounds.len(), upper_bounds.len(), steps.len()] {
            check_slots(rank, slots)?;
        }
        let view = self.bound_memref_view_of(node)?;
        lower_bounds.copy_from_slice(&view.lower_bounds);
        upper_bounds.copy_from_slice(&view.upper_bounds);
        steps.copy_from_slice(&view.steps);
        Ok(())
    }

    fn memref_shape_of(&self, value: ValueId) -> EmitResult<Vec<i64>> {
        let ty = self.builder.value_type(value);
        match ty.memref_shape() {
            Some(shape) => Ok(shape.to_vec()),
            None => Err(InvariantViolation::NotAMemRef { ty: ty.to_string() }.into()),
        }
    }
}

fn check_slots(rank: usize, found: usize) -> EmitResult<()> {
    if rank == found {
        Ok(())
    } else {
        Err(InvariantViolation::ResultCountMismatch {
            expected: rank,
            found,
        }
        .into())
    }
}
