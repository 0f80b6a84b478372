// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! Affine-flavoured SSA IR targeted by the emitter.
//!
//! Functions own a flat arena of values, ops and blocks. Loop bodies are
//! blocks parented by their `affine.for`; everything else hangs off the
//! function. [`FuncBuilder`] threads a single insertion cursor.

mod affine;
mod builder;
mod display;
mod function;
mod op;
mod types;
mod tests;

pub use affine::{AffineExpr, AffineMap};
pub use builder::{ForLoop, FuncBuilder, InsertPoint};
pub use function::{Block, BlockId, IrFunction, Location, Op, OpId, Value, ValueDef, ValueId};
pub use op::{CmpPredicate, ForBounds, OpKind};
pub use types::{is_dynamic_size, FloatKind, IrType, DYNAMIC_SIZE};
