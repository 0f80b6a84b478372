// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! Bundled kernels, each built by driving the emitter over a small
//! symbolic program.

use loom_emit::{EmitResult, Emitter};
use loom_expr::ExprId;
use loom_ir::{FuncBuilder, IrFunction, IrType, Location, DYNAMIC_SIZE};

pub struct Demo {
    pub name: &'static str,
    pub about: &'static str,
    arg_types: fn() -> Vec<IrType>,
    body: fn(&mut Emitter<'_>) -> EmitResult<()>,
}

impl Demo {
    /// Build the function and run the emitter over its body.
    pub fn build(&self) -> EmitResult<IrFunction> {
        let mut builder = FuncBuilder::new(self.name, (self.arg_types)());
        {
            let location = Location::new(format!("<{}>", self.name), 1, 1);
            let mut emitter = Emitter::new(&mut builder, location);
            (self.body)(&mut emitter)?;
        }
        Ok(builder.finish())
    }
}

pub const DEMOS: &[Demo] = &[
    Demo {
        name: "scale",
        about: "multiply a 4x8 buffer in place, bounds from a memref view",
        arg_types: scale_args,
        body: scale,
    },
    Demo {
        name: "saxpy",
        about: "y = a * x + y over a runtime length",
        arg_types: saxpy_args,
        body: saxpy,
    },
    Demo {
        name: "triangle",
        about: "mirror the upper triangle; inner loop starts at i + 1",
        arg_types: triangle_args,
        body: triangle,
    },
    Demo {
        name: "clamp",
        about: "clamp a float between two bounds with compare and select",
        arg_types: clamp_args,
        body: clamp,
    },
    Demo {
        name: "fill",
        about: "allocate, fill and free a dynamically sized buffer",
        arg_types: fill_args,
        body: fill,
    },
    Demo {
        name: "blocks",
        about: "half-precision literals and a standalone block",
        arg_types: blocks_args,
        body: blocks,
    },
];

pub fn find(name: &str) -> Option<&'static Demo> {
    DEMOS.iter().find(|demo| demo.name == name)
}

fn arguments<const N: usize>(e: &mut Emitter<'_>) -> EmitResult<[ExprId; N]> {
    let mut args = [ExprId(0); N];
    e.bind_function_arguments_into(&mut args)?;
    Ok(args)
}

fn emit_return(e: &mut Emitter<'_>, values: &[ExprId]) -> EmitResult<()> {
    let ret = e.exprs_mut().ret(values);
    let stmt = e.exprs_mut().stmt(ret, vec![]);
    e.emit_stmt(&stmt)
}

// ── scale ───────────────────────────────────────────────────────

fn scale_args() -> Vec<IrType> {
    vec![IrType::memref(vec![4, 8], IrType::f32()), IrType::f32()]
}

fn scale(e: &mut Emitter<'_>) -> EmitResult<()> {
    let [buffer, factor] = arguments::<2>(e)?;
    let view = e.bound_memref_view_of(buffer)?;

    let exprs = e.exprs_mut();
    let i = exprs.unbound(IrType::Index);
    let j = exprs.unbound(IrType::Index);
    let elem = exprs.load(buffer, &[i, j]);
    let scaled = exprs.mul(elem, factor);
    let store = exprs.store(scaled, buffer, &[i, j]);
    let body = exprs.stmt(store, vec![]);
    let inner = exprs.for_loop(
        j,
        view.lower_bounds[1],
        view.upper_bounds[1],
        view.steps[1],
        vec![body],
    );
    let outer = exprs.for_loop(
        i,
        view.lower_bounds[0],
        view.upper_bounds[0],
        view.steps[0],
        vec![inner],
    );
    e.emit_stmt(&outer)?;
    emit_return(e, &[])
}

// ── saxpy ───────────────────────────────────────────────────────

fn saxpy_args() -> Vec<IrType> {
    let vector = IrType::memref(vec![DYNAMIC_SIZE], IrType::f32());
    vec![IrType::Index, IrType::f32(), vector.clone(), vector]
}

fn saxpy(e: &mut Emitter<'_>) -> EmitResult<()> {
    let [n, a, x, y] = arguments::<4>(e)?;
    let (zero, one) = (e.zero(), e.one());

    let exprs = e.exprs_mut();
    let i = exprs.unbound(IrType::Index);
    let xi = exprs.load(x, &[i]);
    let yi = exprs.load(y, &[i]);
    let ax = exprs.mul(a, xi);
    let sum = exprs.add(ax, yi);
    let store = exprs.store(sum, y, &[i]);
    let body = exprs.stmt(store, vec![]);
    let lp = exprs.for_loop(i, zero, n, one, vec![body]);
    e.emit_stmt(&lp)?;
    emit_return(e, &[])
}

// ── triangle ────────────────────────────────────────────────────

fn triangle_args() -> Vec<IrType> {
    vec![
        IrType::Index,
        IrType::memref(vec![DYNAMIC_SIZE, DYNAMIC_SIZE], IrType::f64()),
    ]
}

fn triangle(e: &mut Emitter<'_>) -> EmitResult<()> {
    let [n, matrix] = arguments::<2>(e)?;
    let (zero, one) = (e.zero(), e.one());

    let exprs = e.exprs_mut();
    let i = exprs.unbound(IrType::Index);
    let j = exprs.unbound(IrType::Index);
    let after_diagonal = exprs.add(i, one);
    let upper = exprs.load(matrix, &[i, j]);
    let store = exprs.store(upper, matrix, &[j, i]);
    let body = exprs.stmt(store, vec![]);
    let inner = exprs.for_loop(j, after_diagonal, n, one, vec![body]);
    let outer = exprs.for_loop(i, zero, n, one, vec![inner]);
    e.emit_stmt(&outer)?;
    emit_return(e, &[])
}

// ── clamp ───────────────────────────────────────────────────────

fn clamp_args() -> Vec<IrType> {
    vec![IrType::f32(), IrType::f32(), IrType::f32()]
}

fn clamp(e: &mut Emitter<'_>) -> EmitResult<()> {
    let [x, lo, hi] = arguments::<3>(e)?;

    let exprs = e.exprs_mut();
    let below = exprs.lt(x, lo);
    let above = exprs.gt(x, hi);
    let capped = exprs.select(above, hi, x);
    let clamped = exprs.select(below, lo, capped);
    emit_return(e, &[clamped])
}

// ── fill ────────────────────────────────────────────────────────

fn fill_args() -> Vec<IrType> {
    vec![IrType::Index]
}

fn fill(e: &mut Emitter<'_>) -> EmitResult<()> {
    let [n] = arguments::<1>(e)?;
    let (zero, one) = (e.zero(), e.one());
    let value = e.bind_constant_f32(0.5);

    let exprs = e.exprs_mut();
    let buffer = exprs.alloc(IrType::memref(vec![DYNAMIC_SIZE], IrType::f32()), &[n]);
    let allocated = exprs.stmt(buffer, vec![]);
    let i = exprs.unbound(IrType::Index);
    let store = exprs.store(value, buffer, &[i]);
    let body = exprs.stmt(store, vec![]);
    let lp = exprs.for_loop(i, zero, n, one, vec![body]);
    let free = exprs.dealloc(buffer);
    let free = exprs.stmt(free, vec![]);
    e.emit_stmts(&[allocated, lp, free])?;
    emit_return(e, &[])
}

// ── blocks ──────────────────────────────────────────────────────

fn blocks_args() -> Vec<IrType> {
    vec![IrType::f32()]
}

fn blocks(e: &mut Emitter<'_>) -> EmitResult<()> {
    let [x] = arguments::<1>(e)?;
    let overflow = e.bind_constant_f16(65520.0);
    let tenth = e.bind_constant_bf16(0.1);

    let exprs = e.exprs_mut();
    let t = exprs.unbound(IrType::f32());
    let doubled = exprs.add(t, t);
    let ret = exprs.ret(&[doubled]);
    let ret = exprs.stmt(ret, vec![]);
    let block = exprs.block(vec![t], vec![ret]);
    e.emit_block(&block)?;

    emit_return(e, &[x, overflow, tenth])
}
