// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! FuncBuilder - helper for IR construction with an insertion cursor.

use crate::{
    AffineExpr, AffineMap, Block, BlockId, ForBounds, IrFunction, IrType, Location, Op, OpId,
    OpKind, Value, ValueDef, ValueId,
};

/// Insertion cursor: new ops go right before `before`, or at the end of
/// `block` when `before` is `None`.
///
/// Anchoring on an op (not a numeric offset) keeps a saved cursor valid
/// while nested emission inserts ops into the same block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertPoint {
    pub block: BlockId,
    pub before: Option<OpId>,
}

impl InsertPoint {
    pub fn end_of(block: BlockId) -> Self {
        Self {
            block,
            before: None,
        }
    }
}

/// Handles returned by [`FuncBuilder::create_for`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForLoop {
    pub op: OpId,
    pub body: BlockId,
    pub induction_var: ValueId,
}

pub struct FuncBuilder {
    function: IrFunction,
    cursor: InsertPoint,
}

impl FuncBuilder {
    /// New function whose entry block carries one argument per `arg_types`.
    /// The cursor starts at the end of the entry block.
    pub fn new(name: impl Into<String>, arg_types: Vec<IrType>) -> Self {
        let entry_block = BlockId(0);
        let function = IrFunction {
            name: name.into(),
            values: Vec::new(),
            ops: Vec::new(),
            blocks: vec![Block {
                id: entry_block,
                args: Vec::new(),
                ops: Vec::new(),
                parent_op: None,
            }],
            entry_block,
        };

        let mut builder = Self {
            function,
            cursor: InsertPoint::end_of(entry_block),
        };
        for ty in arg_types {
            builder.add_block_argument(entry_block, ty);
        }
        builder
    }

    pub fn function(&self) -> &IrFunction {
        &self.function
    }

    pub fn finish(self) -> IrFunction {
        self.function
    }

    pub fn insertion_point(&self) -> InsertPoint {
        self.cursor
    }

    pub fn insertion_block(&self) -> BlockId {
        self.cursor.block
    }

    pub fn set_insertion_point(&mut self, ip: InsertPoint) {
        self.cursor = ip;
    }

    pub fn set_insertion_point_to_start(&mut self, block: BlockId) {
        let before = self.function.block(block).ops.first().copied();
        self.cursor = InsertPoint { block, before };
    }

    pub fn set_insertion_point_to_end(&mut self, block: BlockId) {
        self.cursor = InsertPoint::end_of(block);
    }

    /// Append a function-level block and move the cursor to its end.
    pub fn create_block(&mut self) -> BlockId {
        let id = self.push_block(None);
        self.set_insertion_point_to_end(id);
        id
    }

    pub fn add_block_argument(&mut self, block: BlockId, ty: IrType) -> ValueId {
        let index = self.function.block(block).args.len() as u32;
        let value = self.push_value(ty, ValueDef::BlockArgument { block, index });
        self.function.blocks[block.0 as usize].args.push(value);
        value
    }

    /// Create an op at the cursor. A result value is allocated when
    /// `result_ty` is given.
    pub fn create_op(
        &mut self,
        kind: OpKind,
        operands: Vec<ValueId>,
        result_ty: Option<IrType>,
        location: &Location,
    ) -> OpId {
        let id = OpId(self.function.ops.len() as u32);
        let result = result_ty.map(|ty| self.push_value(ty, ValueDef::OpResult(id)));
        self.push_op(id, kind, operands, result, location);
        id
    }

    /// Create a single-result op and return its result.
    pub fn create_value(
        &mut self,
        kind: OpKind,
        operands: Vec<ValueId>,
        result_ty: IrType,
        location: &Location,
    ) -> ValueId {
        let id = OpId(self.function.ops.len() as u32);
        let result = self.push_value(result_ty, ValueDef::OpResult(id));
        self.push_op(id, kind, operands, Some(result), location);
        result
    }

    fn push_op(
        &mut self,
        id: OpId,
        kind: OpKind,
        operands: Vec<ValueId>,
        result: Option<ValueId>,
        location: &Location,
    ) {
        self.function.ops.push(Op {
            id,
            kind,
            operands,
            result,
            location: location.clone(),
            parent: self.cursor.block,
            body: None,
        });
        self.insert_at_cursor(id);
    }

    /// Create an `affine.for` and its body block. The body's single
    /// `index` argument is the induction variable. The cursor is unchanged.
    pub fn create_for(
        &mut self,
        bounds: ForBounds,
        operands: Vec<ValueId>,
        location: &Location,
    ) -> ForLoop {
        let op = self.create_op(OpKind::AffineFor(bounds), operands, None, location);
        let body = self.push_block(Some(op));
        let induction_var = self.add_block_argument(body, IrType::Index);
        self.function.ops[op.0 as usize].body = Some(body);
        ForLoop {
            op,
            body,
            induction_var,
        }
    }

    /// `affine.apply` of `map` with operands produced by single-result
    /// applications folded into the new map.
    pub fn create_composed_affine_apply(
        &mut self,
        map: &AffineMap,
        operands: &[ValueId],
        location: &Location,
    ) -> ValueId {
        let (map, operands) = self.compose_affine_map(map, operands);
        self.create_value(OpKind::AffineApply(map), operands, IrType::Index, location)
    }

    fn compose_affine_map(&self, map: &AffineMap, operands: &[ValueId]) -> (AffineMap, Vec<ValueId>) {
        let mut new_operands: Vec<ValueId> = Vec::with_capacity(operands.len());
        let mut replacements = Vec::with_capacity(operands.len());

        for &operand in operands {
            let producer = self.function.defining_op(operand).and_then(|op| match &op.kind {
                OpKind::AffineApply(inner) => inner
                    .single_result()
                    .map(|expr| (expr.clone(), op.operands.clone())),
                _ => None,
            });
            let base = new_operands.len() as u32;
            match producer {
                Some((expr, inner_operands)) => {
                    replacements.push(expr.replace_dims(&mut |d| AffineExpr::Dim(base + d)));
                    new_operands.extend(inner_operands);
                }
                None => {
                    replacements.push(AffineExpr::Dim(base));
                    new_operands.push(operand);
                }
            }
        }

        let results = map
            .results
            .iter()
            .map(|r| r.replace_dims(&mut |d| replacements[d as usize].clone()))
            .collect();
        (AffineMap::new(new_operands.len() as u32, results), new_operands)
    }

    pub fn result(&self, op: OpId) -> Option<ValueId> {
        self.function.op(op).result
    }

    pub fn loop_body(&self, op: OpId) -> Option<BlockId> {
        self.function.op(op).body
    }

    pub fn value_type(&self, value: ValueId) -> &IrType {
        self.function.value_type(value)
    }

    pub fn defining_op(&self, value: ValueId) -> Option<&Op> {
        self.function.defining_op(value)
    }

    pub fn induction_var_owner(&self, value: ValueId) -> Option<&Op> {
        self.function.induction_var_owner(value)
    }

    fn push_value(&mut self, ty: IrType, def: ValueDef) -> ValueId {
        let id = ValueId(self.function.values.len() as u32);
        self.function.values.push(Value { id, ty, def });
        id
    }

    fn push_block(&mut self, parent_op: Option<OpId>) -> BlockId {
        let id = BlockId(self.function.blocks.len() as u32);
        self.function.blocks.push(Block {
            id,
            args: Vec::new(),
            ops: Vec::new(),
            parent_op,
        });
        id
    }

    fn insert_at_cursor(&mut self, op: OpId) {
        let block = &mut self.function.blocks[self.cursor.block.0 as usize];
        let position = self
            .cursor
            .before
            .and_then(|anchor| block.ops.iter().position(|&o| o == anchor))
            .unwrap_or(block.ops.len());
        block.ops.insert(position, op);
    }
}
