// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! IR instruction kinds.

use crate::{AffineMap, FloatKind};

/// Comparison predicate shared by `cmpi` and `cmpf`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CmpPredicate {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
}

/// Bounds of an `affine.for`.
#[derive(Debug, Clone, PartialEq)]
pub enum ForBounds {
    /// Compact form when both bounds are compile-time constants.
    Constant { lower: i64, upper: i64, step: i64 },
    /// General form. The loop op carries `[lower, upper]` as operands,
    /// each fed through its map.
    Symbolic {
        lower_map: AffineMap,
        upper_map: AffineMap,
        step: i64,
    },
}

impl ForBounds {
    pub fn step(&self) -> i64 {
        match self {
            ForBounds::Constant { step, .. } | ForBounds::Symbolic { step, .. } => *step,
        }
    }
}

/// Instruction kind. Operands and results live on [`crate::Op`].
#[derive(Debug, Clone, PartialEq)]
pub enum OpKind {
    ConstantIndex(i64),
    ConstantInt { value: i64, width: u32 },
    ConstantFloat { value: f64, kind: FloatKind },
    AffineApply(AffineMap),
    AddI,
    SubI,
    MulI,
    AddF,
    SubF,
    MulF,
    CmpI(CmpPredicate),
    CmpF(CmpPredicate),
    And,
    Or,
    Not,
    /// `select %cond, %then, %else`
    Select,
    /// Runtime extent of dimension `index` of the memref operand.
    Dim { index: u32 },
    /// Operands are the dynamic extents, in dimension order.
    Alloc,
    /// `load %memref[%indices...]`
    Load,
    /// `store %value, %memref[%indices...]`
    Store,
    Dealloc,
    Return,
    Call { callee: String },
    AffineFor(ForBounds),
}

impl OpKind {
    /// Mnemonic used by the printer.
    pub fn name(&self) -> &'static str {
        match self {
            OpKind::ConstantIndex(_) | OpKind::ConstantInt { .. } | OpKind::ConstantFloat { .. } => {
                "constant"
            }
            OpKind::AffineApply(_) => "affine.apply",
            OpKind::AddI => "addi",
            OpKind::SubI => "subi",
            OpKind::MulI => "muli",
            OpKind::AddF => "addf",
            OpKind::SubF => "subf",
            OpKind::MulF => "mulf",
            OpKind::CmpI(_) => "cmpi",
            OpKind::CmpF(_) => "cmpf",
            OpKind::And => "and",
            OpKind::Or => "or",
            OpKind::Not => "not",
            OpKind::Select => "select",
            OpKind::Dim { .. } => "dim",
            OpKind::Alloc => "alloc",
            OpKind::Load => "load",
            OpKind::Store => "store",
            OpKind::Dealloc => "dealloc",
            OpKind::Return => "return",
            OpKind::Call { .. } => "call",
            OpKind::AffineFor(_) => "affine.for",
        }
    }

    pub fn is_constant(&self) -> bool {
        matches!(
            self,
            OpKind::ConstantIndex(_) | OpKind::ConstantInt { .. } | OpKind::ConstantFloat { .. }
        )
    }
}
