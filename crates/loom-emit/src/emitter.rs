// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! The emitter and its binding tables.

use indexmap::IndexMap;
use loom_expr::{ExprArena, ExprId, StmtBlockId};
use loom_ir::{BlockId, FuncBuilder, IrType, Location, OpKind, ValueId};
use std::collections::{HashMap, HashSet};
use tracing::{debug, error};

use crate::{EmitError, EmitResult, InvariantViolation};

/// Lowers symbolic trees into the function under construction.
///
/// The binding table lives as long as the emitter: constants and loop
/// bounds materialized by one call are reused by later calls.
pub struct Emitter<'b> {
    pub(crate) builder: &'b mut FuncBuilder,
    pub(crate) location: Location,
    pub(crate) exprs: ExprArena,
    /// Node → materialized value. At most one entry per node.
    pub(crate) bindings: IndexMap<ExprId, ValueId>,
    /// Zero-result applications already emitted.
    pub(crate) effects: HashSet<ExprId>,
    pub(crate) block_bindings: HashMap<StmtBlockId, BlockId>,
    zero: ExprId,
    one: ExprId,
}

impl<'b> Emitter<'b> {
    pub fn new(builder: &'b mut FuncBuilder, location: Location) -> Self {
        Self::with_arena(builder, location, ExprArena::new())
    }

    /// Emitter over trees built before it existed.
    /// Emits and binds `index` zero and one at the cursor.
    pub fn with_arena(builder: &'b mut FuncBuilder, location: Location, mut exprs: ExprArena) -> Self {
        let zero = exprs.unbound(IrType::Index);
        let one = exprs.unbound(IrType::Index);
        let mut emitter = Self {
            builder,
            location,
            exprs,
            bindings: IndexMap::new(),
            effects: HashSet::new(),
            block_bindings: HashMap::new(),
            zero,
            one,
        };
        let zero_value = emitter.create_value(OpKind::ConstantIndex(0), vec![], IrType::Index);
        emitter.record(zero, zero_value);
        let one_value = emitter.create_value(OpKind::ConstantIndex(1), vec![], IrType::Index);
        emitter.record(one, one_value);
        emitter
    }

    pub fn builder(&self) -> &FuncBuilder {
        &*self.builder
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn exprs(&self) -> &ExprArena {
        &self.exprs
    }

    pub fn exprs_mut(&mut self) -> &mut ExprArena {
        &mut self.exprs
    }

    /// `index` constant 0 emitted at construction.
    pub fn zero(&self) -> ExprId {
        self.zero
    }

    /// `index` constant 1 emitted at construction.
    pub fn one(&self) -> ExprId {
        self.one
    }

    pub fn value_of(&self, node: ExprId) -> Option<ValueId> {
        self.bindings.get(&node).copied()
    }

    /// Bindings in the order they were recorded.
    pub fn bindings(&self) -> impl Iterator<Item = (ExprId, ValueId)> + '_ {
        self.bindings.iter().map(|(&node, &value)| (node, value))
    }

    pub fn block_for(&self, block: StmtBlockId) -> Option<BlockId> {
        self.block_bindings.get(&block).copied()
    }

    /// Bind `node` to `value`. A node binds at most once; the table is
    /// left untouched when it is already bound.
    pub fn bind(&mut self, node: ExprId, value: ValueId) -> EmitResult<&mut Self> {
        if let Some(&existing) = self.bindings.get(&node) {
            let violation = InvariantViolation::DoubleBinding {
                node,
                expr: self.render(node),
                existing,
                value,
            };
            error!(node = %node, existing = %existing, value = %value, "rebinding");
            return Err(violation.into());
        }
        self.record(node, value);
        Ok(self)
    }

    /// Insert a binding known to be fresh.
    pub(crate) fn record(&mut self, node: ExprId, value: ValueId) {
        debug!(node = %node, value = %value, ty = %self.builder.value_type(value), "binding");
        self.bindings.insert(node, value);
    }

    /// Bound value of `node`, or an invariant violation.
    pub(crate) fn expect_bound(&self, node: ExprId) -> EmitResult<ValueId> {
        self.value_of(node).ok_or_else(|| {
            InvariantViolation::ExpectedBound {
                node,
                expr: self.render(node),
            }
            .into()
        })
    }

    pub(crate) fn render(&self, node: ExprId) -> String {
        self.exprs.display(node).to_string()
    }

    pub(crate) fn missing_value(&self, node: ExprId) -> EmitError {
        let expr = self.render(node);
        let state = if self.effects.contains(&node) {
            "zero-result"
        } else {
            "unbound"
        };
        error!(node = %node, expr = %expr, state, "no value produced");
        EmitError::MissingValue { node, expr }
    }

    pub(crate) fn create_value(&mut self, kind: OpKind, operands: Vec<ValueId>, ty: IrType) -> ValueId {
        debug!(op = %kind, "emit");
        self.builder.create_value(kind, operands, ty, &self.location)
    }

    pub(crate) fn create_effect(&mut self, kind: OpKind, operands: Vec<ValueId>) {
        debug!(op = %kind, "emit");
        self.builder.create_op(kind, operands, None, &self.location);
    }

    /// Run `f`, then put the cursor back where it was, whether `f`
    /// succeeded or not.
    pub(crate) fn with_saved_insertion_point<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> EmitResult<T>,
    ) -> EmitResult<T> {
        let saved = self.builder.insertion_point();
        let result = f(self);
        self.builder.set_insertion_point(saved);
        result
    }
}
