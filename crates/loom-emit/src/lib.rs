// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! Lowers symbolic expression trees into the loom IR.
//!
//! An [`Emitter`] borrows a [`loom_ir::FuncBuilder`] and owns the arena of
//! symbolic nodes. Placeholders are bound to IR values once; every later
//! use of a node reuses its value, so sharing a subtree shares the
//! emitted ops.

mod arith;
mod emitter;
mod error;
mod expr;
mod literals;
mod memref;
mod stmt;

pub use emitter::Emitter;
pub use error::{BoundSide, EmitError, EmitResult, InvariantViolation};
pub use literals::{narrow_to_bf16, narrow_to_f16};
pub use memref::MemRefView;
