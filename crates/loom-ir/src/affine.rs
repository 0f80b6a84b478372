// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! Affine expressions and maps.
//!
//! Only the subset the emitter produces is modelled: dimensions, constants,
//! sums, differences and multiplication by a constant. No symbols.

use std::ops;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AffineExpr {
    Dim(u32),
    Const(i64),
    Add(Box<AffineExpr>, Box<AffineExpr>),
    Sub(Box<AffineExpr>, Box<AffineExpr>),
    Mul(Box<AffineExpr>, i64),
}

impl AffineExpr {
    pub fn dim(position: u32) -> Self {
        AffineExpr::Dim(position)
    }

    pub fn constant(value: i64) -> Self {
        AffineExpr::Const(value)
    }

    /// Rewrite every `Dim(n)` with `f(n)`.
    pub fn replace_dims(&self, f: &mut impl FnMut(u32) -> AffineExpr) -> AffineExpr {
        match self {
            AffineExpr::Dim(n) => f(*n),
            AffineExpr::Const(c) => AffineExpr::Const(*c),
            AffineExpr::Add(l, r) => {
                AffineExpr::Add(Box::new(l.replace_dims(f)), Box::new(r.replace_dims(f)))
            }
            AffineExpr::Sub(l, r) => {
                AffineExpr::Sub(Box::new(l.replace_dims(f)), Box::new(r.replace_dims(f)))
            }
            AffineExpr::Mul(e, c) => AffineExpr::Mul(Box::new(e.replace_dims(f)), *c),
        }
    }

    /// Dims and constants print without parentheses.
    pub fn is_atom(&self) -> bool {
        matches!(self, AffineExpr::Dim(_) | AffineExpr::Const(_))
    }
}

impl ops::Add for AffineExpr {
    type Output = AffineExpr;

    fn add(self, rhs: AffineExpr) -> AffineExpr {
        AffineExpr::Add(Box::new(self), Box::new(rhs))
    }
}

impl ops::Sub for AffineExpr {
    type Output = AffineExpr;

    fn sub(self, rhs: AffineExpr) -> AffineExpr {
        AffineExpr::Sub(Box::new(self), Box::new(rhs))
    }
}

impl ops::Mul<i64> for AffineExpr {
    type Output = AffineExpr;

    fn mul(self, rhs: i64) -> AffineExpr {
        AffineExpr::Mul(Box::new(self), rhs)
    }
}

/// `(d0, ..., dN-1) -> (results...)`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AffineMap {
    pub num_dims: u32,
    pub results: Vec<AffineExpr>,
}

impl AffineMap {
    pub fn new(num_dims: u32, results: Vec<AffineExpr>) -> Self {
        Self { num_dims, results }
    }

    /// `(d0, ..., dN-1) -> (d0, ..., dN-1)`
    pub fn identity(num_dims: u32) -> Self {
        Self {
            num_dims,
            results: (0..num_dims).map(AffineExpr::Dim).collect(),
        }
    }

    /// `(d0, d1) -> (d0 + d1)`
    pub fn binary_add() -> Self {
        Self::new(2, vec![AffineExpr::dim(0) + AffineExpr::dim(1)])
    }

    /// `(d0, d1) -> (d0 - d1)`
    pub fn binary_sub() -> Self {
        Self::new(2, vec![AffineExpr::dim(0) - AffineExpr::dim(1)])
    }

    pub fn single_result(&self) -> Option<&AffineExpr> {
        match self.results.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }
}
