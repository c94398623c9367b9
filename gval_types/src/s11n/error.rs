use crate::types::OpaqueKind;
use thiserror::Error;

/// Categorised de/serialization failures.
///
/// Every fallible operation in this crate returns [`anyhow::Result`]; these
/// errors travel inside it and can be recovered with
/// `err.downcast_ref::<S11nError>()`.
#[derive(Error, PartialEq, Debug)]
pub enum S11nError {
    #[error("Unexpected EOF: wanted {wanted} bytes but only {remaining} remain.")]
    UnexpectedEof { wanted: usize, remaining: usize },

    #[error("Variant index {index} is out of range for {type_name}, which has {alternatives} alternatives.")]
    BadVariantIndex {
        type_name: &'static str,
        index: u32,
        alternatives: u32,
    },

    #[error("Unknown {type_name} tag {tag}")]
    UnknownTag { type_name: &'static str, tag: u32 },

    #[error("{handle} does not support payload kind {kind:?}")]
    UnsupportedKind {
        handle: &'static str,
        kind: OpaqueKind,
    },

    #[error("Requested a {requested:?} payload from a handle holding {actual:?}")]
    KindMismatch {
        requested: OpaqueKind,
        actual: OpaqueKind,
    },

    #[error("Invalid bool byte {0:#04x}")]
    InvalidBool(u8),

    #[error("Invalid UTF-8 in string body")]
    InvalidUtf8,

    #[error("Length {0} does not fit in the u32 length field")]
    LengthOverflow(usize),

    #[error("Repeated key while reading a map")]
    DuplicateMapKey,

    #[error("{0} bytes left over after decoding")]
    TrailingBytes(usize),

    #[error("Invalid Mat layout: {0}")]
    InvalidMatLayout(String),
}
