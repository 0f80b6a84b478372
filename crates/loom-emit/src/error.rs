// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! Emission errors.
//!
//! Two disjoint classes: [`EmitError::MissingValue`] means the tree is
//! incomplete and the enclosing statement sequence should be abandoned;
//! [`EmitError::Invariant`] means the caller assembled an inconsistent tree
//! and the emitted IR must not be used.

use loom_expr::ExprId;
use loom_ir::ValueId;
use std::fmt;
use thiserror::Error;

pub type EmitResult<T> = Result<T, EmitError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmitError {
    #[error("expression `{expr}` ({node}) did not produce a value")]
    MissingValue { node: ExprId, expr: String },

    #[error("invariant violated: {0}")]
    Invariant(#[from] InvariantViolation),
}

impl EmitError {
    /// Programmer errors; the IR built so far is unusable.
    pub fn is_fatal(&self) -> bool {
        matches!(self, EmitError::Invariant(_))
    }

    pub fn invariant(&self) -> Option<&InvariantViolation> {
        match self {
            EmitError::Invariant(violation) => Some(violation),
            EmitError::MissingValue { .. } => None,
        }
    }
}

/// Which bound of a loop a diagnostic refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundSide {
    Lower,
    Upper,
}

impl fmt::Display for BoundSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundSide::Lower => write!(f, "lower"),
            BoundSide::Upper => write!(f, "upper"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("double binding of `{expr}` ({node}): bound to {existing}, rebinding to {value}")]
    DoubleBinding {
        node: ExprId,
        expr: String,
        existing: ValueId,
        value: ValueId,
    },

    #[error("`{expr}` produced no value; only dealloc, store and return may have zero results")]
    UnexpectedZeroResult { node: ExprId, expr: String },

    #[error("{side} bound of `{expr}` is defined by `{producer}`, which is not affine")]
    NonAffineBound {
        node: ExprId,
        expr: String,
        side: BoundSide,
        producer: &'static str,
    },

    #[error("step of `{expr}` is not a constant index")]
    DynamicLoopStep { node: ExprId, expr: String },

    #[error("loop `{expr}` needs lower bound, upper bound and step, found {found} expressions")]
    MalformedLoop {
        node: ExprId,
        expr: String,
        found: usize,
    },

    #[error("`{expr}` is missing required operands")]
    MissingOperands { node: ExprId, expr: String },

    #[error("block argument `{expr}` is not a placeholder")]
    BoundBlockArgument { node: ExprId, expr: String },

    #[error("block argument `{expr}` ({node}) is listed more than once")]
    DuplicateBlockArgument { node: ExprId, expr: String },

    #[error("block argument `{expr}` has no type")]
    UntypedBlockArgument { node: ExprId, expr: String },

    #[error("function has {expected} arguments but {found} result slots were supplied")]
    ArgumentCountMismatch { expected: usize, found: usize },

    #[error("argument position {pos} out of range for a function with {count} arguments")]
    ArgumentOutOfRange { pos: usize, count: usize },

    #[error("expected `{expr}` ({node}) to be bound")]
    ExpectedBound { node: ExprId, expr: String },

    #[error("expected a memref value, found `{ty}`")]
    NotAMemRef { ty: String },

    #[error("memref has rank {expected} but {found} result slots were supplied")]
    ResultCountMismatch { expected: usize, found: usize },
}
