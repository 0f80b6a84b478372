// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! IR function representation - SSA values, ops and nested blocks.

use crate::{IrType, OpKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ValueId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OpId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(pub u32);

/// Source location attached to every created op.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Location {
    #[default]
    Unknown,
    FileLineCol {
        file: String,
        line: u32,
        col: u32,
    },
}

impl Location {
    pub fn new(file: impl Into<String>, line: u32, col: u32) -> Self {
        Location::FileLineCol {
            file: file.into(),
            line,
            col,
        }
    }
}

/// Where an SSA value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueDef {
    OpResult(OpId),
    BlockArgument { block: BlockId, index: u32 },
}

#[derive(Debug, Clone)]
pub struct Value {
    pub id: ValueId,
    pub ty: IrType,
    pub def: ValueDef,
}

#[derive(Debug, Clone)]
pub struct Op {
    pub id: OpId,
    pub kind: OpKind,
    pub operands: Vec<ValueId>,
    pub result: Option<ValueId>,
    pub location: Location,
    pub parent: BlockId,
    /// Body block of an `affine.for`.
    pub body: Option<BlockId>,
}

#[derive(Debug, Clone)]
pub struct Block {
    pub id: BlockId,
    pub args: Vec<ValueId>,
    pub ops: Vec<OpId>,
    /// Owning loop for region bodies, `None` for function-level blocks.
    pub parent_op: Option<OpId>,
}

/// IR function. Arguments are the arguments of the entry block.
#[derive(Debug, Clone)]
pub struct IrFunction {
    pub name: String,
    pub values: Vec<Value>,
    pub ops: Vec<Op>,
    pub blocks: Vec<Block>,
    pub entry_block: BlockId,
}

impl IrFunction {
    pub fn value(&self, id: ValueId) -> &Value {
        &self.values[id.0 as usize]
    }

    pub fn op(&self, id: OpId) -> &Op {
        &self.ops[id.0 as usize]
    }

    pub fn block(&self, id: BlockId) -> &Block {
        &self.blocks[id.0 as usize]
    }

    pub fn value_type(&self, id: ValueId) -> &IrType {
        &self.value(id).ty
    }

    pub fn arguments(&self) -> &[ValueId] {
        &self.block(self.entry_block).args
    }

    pub fn num_arguments(&self) -> usize {
        self.arguments().len()
    }

    pub fn argument(&self, pos: usize) -> Option<ValueId> {
        self.arguments().get(pos).copied()
    }

    pub fn argument_type(&self, pos: usize) -> Option<&IrType> {
        self.argument(pos).map(|v| self.value_type(v))
    }

    /// Rank of a memref argument; every other argument has rank 0.
    pub fn argument_rank(&self, pos: usize) -> Option<usize> {
        self.argument_type(pos).map(|ty| match ty {
            IrType::MemRef { shape, .. } => shape.len(),
            _ => 0,
        })
    }

    /// Op producing `value`, `None` for block arguments.
    pub fn defining_op(&self, value: ValueId) -> Option<&Op> {
        match self.value(value).def {
            ValueDef::OpResult(op) => Some(self.op(op)),
            ValueDef::BlockArgument { .. } => None,
        }
    }

    /// Loop whose induction variable is `value`.
    pub fn induction_var_owner(&self, value: ValueId) -> Option<&Op> {
        match self.value(value).def {
            ValueDef::BlockArgument { block, index: 0 } => {
                let owner = self.block(block).parent_op?;
                let op = self.op(owner);
                matches!(op.kind, OpKind::AffineFor(_)).then_some(op)
            }
            _ => None,
        }
    }

    /// Top-level blocks other than loop bodies, entry first.
    pub fn top_level_blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter().filter(|b| b.parent_op.is_none())
    }

    /// Ops of a given kind anywhere in the function, in creation order.
    pub fn ops_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Op> + 'a {
        self.ops.iter().filter(move |op| op.kind.name() == name)
    }
}
