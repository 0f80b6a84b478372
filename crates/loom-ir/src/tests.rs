// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! IR builder tests: cursor discipline, loop bodies, affine composition, printing.

#[cfg(test)]
mod tests {
    use crate::{
        AffineExpr, AffineMap, FloatKind, ForBounds, FuncBuilder, InsertPoint, IrType, Location,
        OpKind, DYNAMIC_SIZE,
    };
    use pretty_assertions::assert_eq;

    fn loc() -> Location {
        Location::Unknown
    }

    fn const_index(b: &mut FuncBuilder, v: i64) -> crate::ValueId {
        b.create_value(OpKind::ConstantIndex(v), vec![], IrType::Index, &loc())
    }

    // ── Types ───────────────────────────────────────────────────

    #[test]
    fn memref_type_prints_dynamic_extents() {
        let ty = IrType::memref(vec![DYNAMIC_SIZE, 4, DYNAMIC_SIZE], IrType::f32());
        assert_eq!(ty.to_string(), "memref<?x4x?xf32>");
        assert_eq!(ty.rank(), 3);
        assert_eq!(ty.element_type(), &IrType::Float(FloatKind::F32));
    }

    #[test]
    fn scalar_element_type_is_itself() {
        assert_eq!(IrType::Index.element_type(), &IrType::Index);
        assert_eq!(IrType::vector(vec![4], IrType::Int(8)).element_type(), &IrType::Int(8));
    }

    // ── Cursor ──────────────────────────────────────────────────

    #[test]
    fn saved_end_cursor_stays_after_nested_inserts() {
        let mut b = FuncBuilder::new("f", vec![]);
        let saved = b.insertion_point();
        let first = const_index(&mut b, 1);
        b.set_insertion_point(saved);
        let second = const_index(&mut b, 2);

        let entry = b.function().block(b.function().entry_block);
        let order: Vec<_> = entry
            .ops
            .iter()
            .map(|&op| b.function().op(op).result)
            .collect();
        assert_eq!(order, vec![Some(first), Some(second)]);
    }

    #[test]
    fn insert_at_start_keeps_program_order() {
        let mut b = FuncBuilder::new("f", vec![]);
        let last = const_index(&mut b, 3);
        let entry = b.function().entry_block;
        b.set_insertion_point_to_start(entry);
        let first = const_index(&mut b, 1);
        let second = const_index(&mut b, 2);

        let results: Vec<_> = b
            .function()
            .block(entry)
            .ops
            .iter()
            .map(|&op| b.function().op(op).result)
            .collect();
        assert_eq!(results, vec![Some(first), Some(second), Some(last)]);
    }

    #[test]
    fn create_block_moves_cursor_to_new_block() {
        let mut b = FuncBuilder::new("f", vec![]);
        let block = b.create_block();
        assert_eq!(b.insertion_point(), InsertPoint::end_of(block));
        let arg = b.add_block_argument(block, IrType::Int(32));
        assert_eq!(b.function().block(block).args, vec![arg]);
        assert!(b.function().induction_var_owner(arg).is_none());
    }

    // ── Loops ───────────────────────────────────────────────────

    #[test]
    fn for_op_owns_body_with_induction_variable() {
        let mut b = FuncBuilder::new("f", vec![]);
        let cursor = b.insertion_point();
        let for_loop = b.create_for(
            ForBounds::Constant { lower: 0, upper: 10, step: 1 },
            vec![],
            &loc(),
        );
        assert_eq!(b.insertion_point(), cursor);

        let iv = for_loop.induction_var;
        assert_eq!(b.loop_body(for_loop.op), Some(for_loop.body));
        assert_eq!(b.function().block(for_loop.body).args, vec![iv]);
        assert_eq!(b.value_type(iv), &IrType::Index);
        assert_eq!(b.induction_var_owner(iv).map(|o| o.id), Some(for_loop.op));
        assert!(b.defining_op(iv).is_none());
    }

    // ── Affine composition ──────────────────────────────────────

    #[test]
    fn plain_operands_keep_the_map() {
        let mut b = FuncBuilder::new("f", vec![IrType::Index, IrType::Index]);
        let args = b.function().arguments().to_vec();
        let v = b.create_composed_affine_apply(&AffineMap::binary_sub(), &args, &loc());
        let op = b.defining_op(v).expect("apply");
        assert_eq!(op.kind, OpKind::AffineApply(AffineMap::binary_sub()));
        assert_eq!(op.operands, args);
    }

    #[test]
    fn nested_apply_is_folded() {
        let mut b = FuncBuilder::new("f", vec![IrType::Index, IrType::Index, IrType::Index]);
        let args = b.function().arguments().to_vec();
        let inner = b.create_composed_affine_apply(&AffineMap::binary_add(), &args[..2], &loc());
        let outer =
            b.create_composed_affine_apply(&AffineMap::binary_sub(), &[args[2], inner], &loc());

        let op = b.defining_op(outer).expect("apply");
        let expected = AffineMap::new(
            3,
            vec![AffineExpr::dim(0) - (AffineExpr::dim(1) + AffineExpr::dim(2))],
        );
        assert_eq!(op.kind, OpKind::AffineApply(expected.clone()));
        assert_eq!(op.operands, vec![args[2], args[0], args[1]]);
        assert_eq!(expected.to_string(), "(d0, d1, d2) -> (d0 - (d1 + d2))");
    }

    // ── Printing ────────────────────────────────────────────────

    #[test]
    fn prints_nested_loop_function() {
        let mut b = FuncBuilder::new("f", vec![IrType::Index, IrType::Index]);
        let args = b.function().arguments().to_vec();
        const_index(&mut b, 10);
        b.create_composed_affine_apply(&AffineMap::binary_add(), &args, &loc());
        let for_loop = b.create_for(
            ForBounds::Constant { lower: 0, upper: 10, step: 1 },
            vec![],
            &loc(),
        );
        b.set_insertion_point_to_start(for_loop.body);
        const_index(&mut b, 1);

        let expected = "\
func @f(%0: index, %1: index) {
  %2 = constant 10 : index
  %3 = affine.apply (d0, d1) -> (d0 + d1)(%0, %1)
  affine.for %4 = 0 to 10 step 1 {
    %5 = constant 1 : index
  }
}
";
        assert_eq!(b.finish().to_string(), expected);
    }

    #[test]
    fn prints_symbolic_loop_and_blocks() {
        let mut b = FuncBuilder::new("g", vec![IrType::Index]);
        let n = b.function().arguments()[0];
        let zero = const_index(&mut b, 0);
        b.create_for(
            ForBounds::Symbolic {
                lower_map: AffineMap::identity(1),
                upper_map: AffineMap::identity(1),
                step: 2,
            },
            vec![zero, n],
            &loc(),
        );
        let block = b.create_block();
        let arg = b.add_block_argument(block, IrType::f32());
        b.create_op(OpKind::Return, vec![arg], None, &loc());

        let expected = "\
func @g(%0: index) {
  %1 = constant 0 : index
  affine.for %2 = (d0) -> (d0)(%1) to (d0) -> (d0)(%0) step 2 {
  }
^bb2(%3: f32):
  return %3 : f32
}
";
        assert_eq!(b.finish().to_string(), expected);
    }

    #[test]
    fn prints_load_and_store_with_indices() {
        let memref = IrType::memref(vec![4, DYNAMIC_SIZE], IrType::f32());
        let mut b = FuncBuilder::new("copy", vec![memref, IrType::Index, IrType::Index]);
        let args = b.function().arguments().to_vec();
        let (m, i, j) = (args[0], args[1], args[2]);
        let value = b.create_value(OpKind::Load, vec![m, i, j], IrType::f32(), &loc());
        b.create_op(OpKind::Store, vec![value, m, j, i], None, &loc());
        b.create_op(OpKind::Store, vec![value], None, &loc());

        let expected = "\
func @copy(%0: memref<4x?xf32>, %1: index, %2: index) {
  %3 = load %0[%1, %2] : memref<4x?xf32>
  store %3, %0[%2, %1] : memref<4x?xf32>
  store %3
}
";
        assert_eq!(b.finish().to_string(), expected);
    }

    #[test]
    fn op_kind_display_shows_attributes() {
        assert_eq!(OpKind::ConstantIndex(4).to_string(), "constant 4");
        assert_eq!(OpKind::Dim { index: 2 }.to_string(), "dim 2");
        assert_eq!(
            OpKind::AffineFor(ForBounds::Constant { lower: 0, upper: 8, step: 2 }).to_string(),
            "affine.for 0 to 8 step 2"
        );
        assert_eq!(OpKind::Call { callee: "sqrt".into() }.to_string(), "call @sqrt");
        assert_eq!(OpKind::MulF.to_string(), "mulf");
    }

    #[test]
    fn argument_rank_and_type() {
        let memref = IrType::memref(vec![DYNAMIC_SIZE, 8], IrType::f32());
        let b = FuncBuilder::new("h", vec![memref.clone(), IrType::Int(32)]);
        let func = b.finish();
        assert_eq!(func.argument_rank(0), Some(2));
        assert_eq!(func.argument_rank(1), Some(0));
        assert_eq!(func.argument_rank(2), None);
        assert_eq!(func.argument_type(0), Some(&memref));
    }
}
