use crate::s11n::{self, S11nError};
use crate::types::{Mat, Point, Point2f, Rect, Scalar, Size};
use num_derive::FromPrimitive;

/// Identifies the concrete payload type behind a type-erased handle.
///
/// The integer values are the wire representation and must never be reused.
#[repr(u32)]
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Default, FromPrimitive, Debug)]
pub enum OpaqueKind {
    #[default]
    Unknown = 0,
    Bool = 1,
    Int = 2,
    Int64 = 3,
    Double = 4,
    Float = 5,
    UInt64 = 6,
    String = 7,
    Point = 8,
    Point2f = 9,
    Size = 10,
    Rect = 11,
    Scalar = 12,
    Mat = 13,
}
s11n::wire_enum!(OpaqueKind as u32);

impl OpaqueKind {
    pub const ALL: [OpaqueKind; 14] = [
        OpaqueKind::Unknown,
        OpaqueKind::Bool,
        OpaqueKind::Int,
        OpaqueKind::Int64,
        OpaqueKind::Double,
        OpaqueKind::Float,
        OpaqueKind::UInt64,
        OpaqueKind::String,
        OpaqueKind::Point,
        OpaqueKind::Point2f,
        OpaqueKind::Size,
        OpaqueKind::Rect,
        OpaqueKind::Scalar,
        OpaqueKind::Mat,
    ];
}

/// Maps a host type to its kind tag. Each kind has exactly one host type.
pub trait OpaqueKindOf {
    const KIND: OpaqueKind;
}

macro_rules! impl_kind_of {
    ($($t:ty => $kind:ident),* $(,)?) => {
        $(
            impl OpaqueKindOf for $t {
                const KIND: OpaqueKind = OpaqueKind::$kind;
            }
        )*
    };
}

impl_kind_of!(
    bool => Bool,
    i32 => Int,
    i64 => Int64,
    f64 => Double,
    f32 => Float,
    u64 => UInt64,
    String => String,
    Point => Point,
    Point2f => Point2f,
    Size => Size,
    Rect => Rect,
    Scalar => Scalar,
    Mat => Mat,
);

pub(crate) fn unsupported(handle: &'static str, kind: OpaqueKind) -> anyhow::Error {
    tracing::debug!(handle, ?kind, "no codec for payload kind");
    S11nError::UnsupportedKind { handle, kind }.into()
}

pub(crate) fn mismatch(requested: OpaqueKind, actual: OpaqueKind) -> anyhow::Error {
    S11nError::KindMismatch { requested, actual }.into()
}
