// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! Operator lowering by element category.
//!
//! Index `+`/`-` become composed `affine.apply` so the result keeps affine
//! provenance and stays usable as a loop bound. `*` is never affine.

use loom_expr::BinaryOp;
use loom_ir::{AffineMap, CmpPredicate, FuncBuilder, IrType, Location, OpKind, ValueId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementCategory {
    Index,
    Integer,
    Float,
}

/// Classify by element type; vectors and memrefs classify by their element.
pub fn classify(ty: &IrType) -> ElementCategory {
    match ty.element_type() {
        IrType::Index => ElementCategory::Index,
        IrType::Float(_) => ElementCategory::Float,
        _ => ElementCategory::Integer,
    }
}

fn category_of(b: &FuncBuilder, value: ValueId) -> (ElementCategory, IrType) {
    let ty = b.value_type(value).clone();
    (classify(&ty), ty)
}

pub fn add(b: &mut FuncBuilder, loc: &Location, lhs: ValueId, rhs: ValueId) -> ValueId {
    match category_of(b, lhs) {
        (ElementCategory::Index, _) => {
            b.create_composed_affine_apply(&AffineMap::binary_add(), &[lhs, rhs], loc)
        }
        (ElementCategory::Integer, ty) => b.create_value(OpKind::AddI, vec![lhs, rhs], ty, loc),
        (ElementCategory::Float, ty) => b.create_value(OpKind::AddF, vec![lhs, rhs], ty, loc),
    }
}

pub fn sub(b: &mut FuncBuilder, loc: &Location, lhs: ValueId, rhs: ValueId) -> ValueId {
    match category_of(b, lhs) {
        (ElementCategory::Index, _) => {
            b.create_composed_affine_apply(&AffineMap::binary_sub(), &[lhs, rhs], loc)
        }
        (ElementCategory::Integer, ty) => b.create_value(OpKind::SubI, vec![lhs, rhs], ty, loc),
        (ElementCategory::Float, ty) => b.create_value(OpKind::SubF, vec![lhs, rhs], ty, loc),
    }
}

pub fn mul(b: &mut FuncBuilder, loc: &Location, lhs: ValueId, rhs: ValueId) -> ValueId {
    match category_of(b, lhs) {
        (ElementCategory::Float, ty) => b.create_value(OpKind::MulF, vec![lhs, rhs], ty, loc),
        (_, ty) => b.create_value(OpKind::MulI, vec![lhs, rhs], ty, loc),
    }
}

/// `i1` result, or a vector of `i1` for vector operands.
fn predicate_type(ty: &IrType) -> IrType {
    match ty {
        IrType::Vector { shape, .. } => IrType::vector(shape.clone(), IrType::BOOL),
        _ => IrType::BOOL,
    }
}

pub fn compare(
    b: &mut FuncBuilder,
    loc: &Location,
    pred: CmpPredicate,
    lhs: ValueId,
    rhs: ValueId,
) -> ValueId {
    let (category, ty) = category_of(b, lhs);
    let kind = match category {
        ElementCategory::Float => OpKind::CmpF(pred),
        _ => OpKind::CmpI(pred),
    };
    b.create_value(kind, vec![lhs, rhs], predicate_type(&ty), loc)
}

pub fn binary(
    b: &mut FuncBuilder,
    loc: &Location,
    op: BinaryOp,
    lhs: ValueId,
    rhs: ValueId,
) -> ValueId {
    match op {
        BinaryOp::Add => add(b, loc, lhs, rhs),
        BinaryOp::Sub => sub(b, loc, lhs, rhs),
        BinaryOp::Mul => mul(b, loc, lhs, rhs),
        BinaryOp::Lt => compare(b, loc, CmpPredicate::Lt, lhs, rhs),
        BinaryOp::Le => compare(b, loc, CmpPredicate::Le, lhs, rhs),
        BinaryOp::Gt => compare(b, loc, CmpPredicate::Gt, lhs, rhs),
        BinaryOp::Ge => compare(b, loc, CmpPredicate::Ge, lhs, rhs),
        BinaryOp::Eq => compare(b, loc, CmpPredicate::Eq, lhs, rhs),
        BinaryOp::Ne => compare(b, loc, CmpPredicate::Ne, lhs, rhs),
        BinaryOp::And | BinaryOp::Or => {
            let ty = b.value_type(lhs).clone();
            let kind = if op == BinaryOp::And { OpKind::And } else { OpKind::Or };
            b.create_value(kind, vec![lhs, rhs], ty, loc)
        }
    }
}
