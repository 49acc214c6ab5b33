//! Mapping from the public (family, type index) pairs to the engine's
//! real-even/real-odd transform kinds, plus the inverse-type relation used by
//! the inverse entry points.

use crate::{FftError, Res};

/// The two real-to-real transform families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformFamily {
    /// Discrete cosine transforms (real-even symmetry).
    Cosine,
    /// Discrete sine transforms (real-odd symmetry).
    Sine,
}

/// Opaque identifier selecting one of the engine's real-even (cosine) or
/// real-odd (sine) transform variants. The numeric suffix follows the
/// legacy engine's flag naming: `10` is the type II "forward" variant,
/// `01` its type III transpose, `00` the self-transposed type I, and
/// `11` type IV.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineKind {
    RealEven00,
    RealEven10,
    RealEven01,
    RealEven11,
    RealOdd00,
    RealOdd10,
    RealOdd01,
    RealOdd11,
}

/// Resolve a (family, type index) pair to the engine transform kind.
/// Type indices outside 1..=4 fail with `UnsupportedType`.
pub fn engine_kind(family: TransformFamily, type_index: usize) -> Res<EngineKind> {
    match (family, type_index) {
        (TransformFamily::Cosine, 1) => Ok(EngineKind::RealEven00),
        (TransformFamily::Cosine, 2) => Ok(EngineKind::RealEven10),
        (TransformFamily::Cosine, 3) => Ok(EngineKind::RealEven01),
        (TransformFamily::Cosine, 4) => Ok(EngineKind::RealEven11),
        (TransformFamily::Sine, 1) => Ok(EngineKind::RealOdd00),
        (TransformFamily::Sine, 2) => Ok(EngineKind::RealOdd10),
        (TransformFamily::Sine, 3) => Ok(EngineKind::RealOdd01),
        (TransformFamily::Sine, 4) => Ok(EngineKind::RealOdd11),
        (_, other) => Err(FftError::UnsupportedType(other)),
    }
}

/// The type computing the inverse of a given DCT/DST type, in both families:
/// type I and type IV are their own inverses, types II and III invert each
/// other. Unsupported indices fail the same way as [`engine_kind`].
pub fn inverse_type_index(type_index: usize) -> Res<usize> {
    match type_index {
        1 => Ok(1),
        2 => Ok(3),
        3 => Ok(2),
        4 => Ok(4),
        other => Err(FftError::UnsupportedType(other)),
    }
}
