// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! Literal constants and function arguments as bound placeholders.

use loom_expr::ExprId;
use loom_ir::{FloatKind, IrType, OpKind, ValueId};

use crate::{EmitResult, Emitter, InvariantViolation};

impl Emitter<'_> {
    pub fn bind_constant_index(&mut self, value: i64) -> ExprId {
        self.bind_constant(OpKind::ConstantIndex(value), IrType::Index)
    }

    pub fn bind_constant_int(&mut self, value: i64, width: u32) -> ExprId {
        self.bind_constant(OpKind::ConstantInt { value, width }, IrType::Int(width))
    }

    pub fn bind_constant_bool(&mut self, value: bool) -> ExprId {
        self.bind_constant_int(i64::from(value), 1)
    }

    pub fn bind_constant_f32(&mut self, value: f32) -> ExprId {
        self.bind_float(f64::from(value), FloatKind::F32)
    }

    pub fn bind_constant_f64(&mut self, value: f64) -> ExprId {
        self.bind_float(value, FloatKind::F64)
    }

    /// Half-precision constant; `value` is rounded to the nearest binary16,
    /// ties to even, overflowing to infinity.
    pub fn bind_constant_f16(&mut self, value: f32) -> ExprId {
        self.bind_float(narrow_to_f16(f64::from(value)), FloatKind::F16)
    }

    /// bfloat16 constant, rounded like [`bind_constant_f16`](Self::bind_constant_f16).
    pub fn bind_constant_bf16(&mut self, value: f64) -> ExprId {
        self.bind_float(narrow_to_bf16(value), FloatKind::BF16)
    }

    fn bind_float(&mut self, value: f64, kind: FloatKind) -> ExprId {
        self.bind_constant(OpKind::ConstantFloat { value, kind }, IrType::Float(kind))
    }

    fn bind_constant(&mut self, kind: OpKind, ty: IrType) -> ExprId {
        let value = self.create_value(kind, vec![], ty.clone());
        self.bind_fresh(value, ty)
    }

    fn bind_fresh(&mut self, value: ValueId, ty: IrType) -> ExprId {
        let node = self.exprs.unbound(ty);
        self.record(node, value);
        node
    }

    // ── Function arguments ──────────────────────────────────────

    /// Placeholder bound to argument `pos` of the function being built.
    pub fn bind_function_argument(&mut self, pos: usize) -> EmitResult<ExprId> {
        let function = self.builder.function();
        let Some(value) = function.argument(pos) else {
            return Err(InvariantViolation::ArgumentOutOfRange {
                pos,
                count: function.num_arguments(),
            }
            .into());
        };
        let ty = function.value_type(value).clone();
        Ok(self.bind_fresh(value, ty))
    }

    /// One placeholder per function argument, in order.
    pub fn bind_function_arguments(&mut self) -> Vec<ExprId> {
        let arguments = self.builder.function().arguments().to_vec();
        arguments
            .into_iter()
            .map(|value| {
                let ty = self.builder.value_type(value).clone();
                self.bind_fresh(value, ty)
            })
            .collect()
    }

    /// Like [`bind_function_arguments`](Self::bind_function_arguments), into
    /// a caller buffer that must have one slot per argument.
    pub fn bind_function_arguments_into(&mut self, out: &mut [ExprId]) -> EmitResult<()> {
        let expected = self.builder.function().num_arguments();
        if out.len() != expected {
            return Err(InvariantViolation::ArgumentCountMismatch {
                expected,
                found: out.len(),
            }
            .into());
        }
        let nodes = self.bind_function_arguments();
        out.copy_from_slice(&nodes);
        Ok(())
    }
}

pub fn narrow_to_f16(value: f64) -> f64 {
    round_to_format(value, 5, 10)
}

pub fn narrow_to_bf16(value: f64) -> f64 {
    round_to_format(value, 8, 7)
}

/// Round `value` to the nearest number representable with the given
/// exponent and fraction widths (IEEE layout with subnormals), ties to even.
fn round_to_format(value: f64, exponent_bits: u32, fraction_bits: u32) -> f64 {
    if !value.is_finite() || value == 0.0 {
        return value;
    }
    let bias = (1i32 << (exponent_bits - 1)) - 1;
    let min_normal_exp = 1 - bias;
    let fraction_bits = fraction_bits as i32;
    let max_finite = (2.0 - 2f64.powi(-fraction_bits)) * 2f64.powi(bias);

    let magnitude = value.abs();
    let exponent = ((magnitude.to_bits() >> 52) as i32 - 1023).max(min_normal_exp);
    let quantum = 2f64.powi(exponent - fraction_bits);
    let rounded = (magnitude / quantum).round_ties_even() * quantum;
    let narrowed = if rounded > max_finite {
        f64::INFINITY
    } else {
        rounded
    };
    narrowed.copysign(value)
}
