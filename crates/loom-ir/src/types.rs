// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! IR type system - index, integers, floats, vectors and memrefs.

/// Extent marker for a memref dimension whose size is only known at runtime.
pub const DYNAMIC_SIZE: i64 = -1;

/// Floating-point formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FloatKind {
    BF16,
    F16,
    F32,
    F64,
}

impl FloatKind {
    pub fn width(self) -> u32 {
        match self {
            FloatKind::BF16 | FloatKind::F16 => 16,
            FloatKind::F32 => 32,
            FloatKind::F64 => 64,
        }
    }
}

/// IR type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IrType {
    /// Target-sized integer used for loop counters and affine arithmetic.
    Index,
    /// Signless integer of the given bit width (`i1` doubles as bool).
    Int(u32),
    Float(FloatKind),
    Vector {
        shape: Vec<u64>,
        elem: Box<IrType>,
    },
    /// Buffer with a static or dynamic extent per dimension.
    /// Dynamic extents are stored as [`DYNAMIC_SIZE`].
    MemRef {
        shape: Vec<i64>,
        elem: Box<IrType>,
    },
}

impl IrType {
    pub const BOOL: IrType = IrType::Int(1);

    pub fn f32() -> Self {
        IrType::Float(FloatKind::F32)
    }

    pub fn f64() -> Self {
        IrType::Float(FloatKind::F64)
    }

    pub fn memref(shape: Vec<i64>, elem: IrType) -> Self {
        IrType::MemRef {
            shape,
            elem: Box::new(elem),
        }
    }

    pub fn vector(shape: Vec<u64>, elem: IrType) -> Self {
        IrType::Vector {
            shape,
            elem: Box::new(elem),
        }
    }

    /// Element type for containers, the type itself for scalars.
    pub fn element_type(&self) -> &IrType {
        match self {
            IrType::Vector { elem, .. } | IrType::MemRef { elem, .. } => elem,
            _ => self,
        }
    }

    pub fn is_index(&self) -> bool {
        matches!(self, IrType::Index)
    }

    pub fn is_int(&self) -> bool {
        matches!(self, IrType::Int(_))
    }

    pub fn is_float(&self) -> bool {
        matches!(self, IrType::Float(_))
    }

    pub fn is_memref(&self) -> bool {
        matches!(self, IrType::MemRef { .. })
    }

    /// Memref shape, `None` for every other type.
    pub fn memref_shape(&self) -> Option<&[i64]> {
        match self {
            IrType::MemRef { shape, .. } => Some(shape),
            _ => None,
        }
    }

    /// Number of dimensions; scalars have rank 0.
    pub fn rank(&self) -> usize {
        match self {
            IrType::Vector { shape, .. } => shape.len(),
            IrType::MemRef { shape, .. } => shape.len(),
            _ => 0,
        }
    }
}

/// True when a memref extent has to be queried at runtime.
pub fn is_dynamic_size(extent: i64) -> bool {
    extent < 0
}
