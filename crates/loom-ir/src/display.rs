// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! Display implementations for IR types.

use crate::*;
use std::fmt;

impl fmt::Display for FloatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FloatKind::BF16 => write!(f, "bf16"),
            FloatKind::F16 => write!(f, "f16"),
            FloatKind::F32 => write!(f, "f32"),
            FloatKind::F64 => write!(f, "f64"),
        }
    }
}

impl fmt::Display for IrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IrType::Index => write!(f, "index"),
            IrType::Int(width) => write!(f, "i{}", width),
            IrType::Float(kind) => write!(f, "{}", kind),
            IrType::Vector { shape, elem } => {
                write!(f, "vector<")?;
                for extent in shape {
                    write!(f, "{}x", extent)?;
                }
                write!(f, "{}>", elem)
            }
            IrType::MemRef { shape, elem } => {
                write!(f, "memref<")?;
                for &extent in shape {
                    if is_dynamic_size(extent) {
                        write!(f, "?x")?;
                    } else {
                        write!(f, "{}x", extent)?;
                    }
                }
                write!(f, "{}>", elem)
            }
        }
    }
}

impl fmt::Display for ValueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "%{}", self.0)
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "^bb{}", self.0)
    }
}

impl fmt::Display for CmpPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CmpPredicate::Lt => "lt",
            CmpPredicate::Le => "le",
            CmpPredicate::Gt => "gt",
            CmpPredicate::Ge => "ge",
            CmpPredicate::Eq => "eq",
            CmpPredicate::Ne => "ne",
        };
        write!(f, "{}", name)
    }
}

/// Mnemonic plus attributes, without operands or types.
impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpKind::ConstantIndex(v) => write!(f, "constant {}", v),
            OpKind::ConstantInt { value, .. } => write!(f, "constant {}", value),
            OpKind::ConstantFloat { value, .. } => write!(f, "constant {:?}", value),
            OpKind::AffineApply(map) => write!(f, "affine.apply {}", map),
            OpKind::CmpI(pred) | OpKind::CmpF(pred) => write!(f, "{} {}", self.name(), pred),
            OpKind::Dim { index } => write!(f, "dim {}", index),
            OpKind::Call { callee } => write!(f, "call @{}", callee),
            OpKind::AffineFor(ForBounds::Constant { lower, upper, step }) => {
                write!(f, "affine.for {} to {} step {}", lower, upper, step)
            }
            OpKind::AffineFor(ForBounds::Symbolic {
                lower_map,
                upper_map,
                step,
            }) => write!(f, "affine.for {} to {} step {}", lower_map, upper_map, step),
            kind => write!(f, "{}", kind.name()),
        }
    }
}

impl fmt::Display for AffineExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AffineExpr::Dim(n) => write!(f, "d{}", n),
            AffineExpr::Const(c) => write!(f, "{}", c),
            AffineExpr::Add(l, r) => write!(f, "{} + {}", l, r),
            AffineExpr::Sub(l, r) if r.is_atom() => write!(f, "{} - {}", l, r),
            AffineExpr::Sub(l, r) => write!(f, "{} - ({})", l, r),
            AffineExpr::Mul(e, c) if e.is_atom() => write!(f, "{} * {}", e, c),
            AffineExpr::Mul(e, c) => write!(f, "({}) * {}", e, c),
        }
    }
}

impl fmt::Display for AffineMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dims: Vec<String> = (0..self.num_dims).map(|d| format!("d{}", d)).collect();
        let results: Vec<String> = self.results.iter().map(|r| r.to_string()).collect();
        write!(f, "({}) -> ({})", dims.join(", "), results.join(", "))
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Unknown => write!(f, "unknown"),
            Location::FileLineCol { file, line, col } => write!(f, "{}:{}:{}", file, line, col),
        }
    }
}

fn value_list(values: &[ValueId]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl fmt::Display for IrFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let args: Vec<String> = self
            .arguments()
            .iter()
            .map(|&a| format!("{}: {}", a, self.value_type(a)))
            .collect();
        writeln!(f, "func @{}({}) {{", self.name, args.join(", "))?;
        for block in self.top_level_blocks() {
            if block.id != self.entry_block {
                let args: Vec<String> = block
                    .args
                    .iter()
                    .map(|&a| format!("{}: {}", a, self.value_type(a)))
                    .collect();
                writeln!(f, "{}({}):", block.id, args.join(", "))?;
            }
            self.fmt_block(f, block, 1)?;
        }
        writeln!(f, "}}")
    }
}

impl IrFunction {
    fn fmt_block(&self, f: &mut fmt::Formatter<'_>, block: &Block, depth: usize) -> fmt::Result {
        for &op in &block.ops {
            self.fmt_op(f, self.op(op), depth)?;
        }
        Ok(())
    }

    fn fmt_op(&self, f: &mut fmt::Formatter<'_>, op: &Op, depth: usize) -> fmt::Result {
        let indent = "  ".repeat(depth);
        write!(f, "{}", indent)?;
        if let Some(result) = op.result {
            write!(f, "{} = ", result)?;
        }
        let result_ty = op.result.map(|r| self.value_type(r));
        let operands = op.operands.as_slice();

        match &op.kind {
            OpKind::ConstantIndex(v) => writeln!(f, "constant {} : index", v),
            OpKind::ConstantInt { value, width } => writeln!(f, "constant {} : i{}", value, width),
            OpKind::ConstantFloat { value, kind } => writeln!(f, "constant {:?} : {}", value, kind),
            OpKind::AffineApply(map) => {
                writeln!(f, "affine.apply {}({})", map, value_list(operands))
            }
            OpKind::CmpI(pred) | OpKind::CmpF(pred) => {
                let operand_ty = operands.first().map(|&v| self.value_type(v).to_string());
                writeln!(
                    f,
                    "{} {}, {} : {}",
                    op.kind.name(),
                    pred,
                    value_list(operands),
                    operand_ty.unwrap_or_default()
                )
            }
            OpKind::Dim { index } => {
                let memref_ty = operands.first().map(|&v| self.value_type(v).to_string());
                writeln!(
                    f,
                    "dim {}, {} : {}",
                    value_list(operands),
                    index,
                    memref_ty.unwrap_or_default()
                )
            }
            OpKind::Load => match operands.split_first() {
                Some((memref, indices)) => writeln!(
                    f,
                    "load {}[{}] : {}",
                    memref,
                    value_list(indices),
                    self.value_type(*memref)
                ),
                None => writeln!(f, "load"),
            },
            OpKind::Store => match operands {
                [value, memref, indices @ ..] => writeln!(
                    f,
                    "store {}, {}[{}] : {}",
                    value,
                    memref,
                    value_list(indices),
                    self.value_type(*memref)
                ),
                _ => writeln!(f, "store {}", value_list(operands)),
            },
            OpKind::Call { callee } => match result_ty {
                Some(ty) => writeln!(f, "call @{}({}) : {}", callee, value_list(operands), ty),
                None => writeln!(f, "call @{}({})", callee, value_list(operands)),
            },
            OpKind::AffineFor(bounds) => {
                let iv = op
                    .body
                    .and_then(|b| self.block(b).args.first().copied())
                    .map(|v| v.to_string())
                    .unwrap_or_default();
                match bounds {
                    ForBounds::Constant { lower, upper, step } => {
                        writeln!(f, "affine.for {} = {} to {} step {} {{", iv, lower, upper, step)?
                    }
                    ForBounds::Symbolic {
                        lower_map,
                        upper_map,
                        step,
                    } => {
                        let lower = operands.first().map(|v| v.to_string()).unwrap_or_default();
                        let upper = operands.get(1).map(|v| v.to_string()).unwrap_or_default();
                        writeln!(
                            f,
                            "affine.for {} = {}({}) to {}({}) step {} {{",
                            iv, lower_map, lower, upper_map, upper, step
                        )?
                    }
                }
                if let Some(body) = op.body {
                    self.fmt_block(f, self.block(body), depth + 1)?;
                }
                writeln!(f, "{}}}", indent)
            }
            kind => {
                write!(f, "{}", kind.name())?;
                if !operands.is_empty() {
                    write!(f, " {}", value_list(operands))?;
                }
                let ty = result_ty
                    .cloned()
                    .or_else(|| operands.first().map(|&v| self.value_type(v).clone()));
                match ty {
                    Some(ty) => writeln!(f, " : {}", ty),
                    None => writeln!(f),
                }
            }
        }
    }
}
