use crate::s11n::{self, ByteMemoryInStream, ByteMemoryOutStream, Deser, S11nError, Ser};
use crate::types::{OpaqueKind, OpaquePayload, OpaqueValue};
use anyhow::Result;
use num_derive::FromPrimitive;
use std::mem;

#[repr(u32)]
#[derive(PartialEq, Eq, Hash, Clone, Copy, FromPrimitive, Debug)]
pub enum ArgKind {
    OpaqueVal = 0,
    GObjRef = 1,
}
s11n::wire_enum!(ArgKind as u32);

/// The shape of a graph object.
#[repr(u32)]
#[derive(PartialEq, Eq, Hash, Clone, Copy, FromPrimitive, Debug)]
pub enum GShape {
    GMat = 0,
    GScalar = 1,
    GArray = 2,
    GOpaque = 3,
    GFrame = 4,
}
s11n::wire_enum!(GShape as u32);

/// Reference to an object created during graph construction.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct RcDesc {
    pub id: i32,
    pub shape: GShape,
}
impl RcDesc {
    pub fn new(id: i32, shape: GShape) -> Self {
        Self { id, shape }
    }
}
impl Ser for RcDesc {
    fn ser(&self, os: &mut ByteMemoryOutStream) -> Result<()> {
        self.id.ser(os)?;
        self.shape.ser(os)
    }
}
impl Deser for RcDesc {
    const MIN_WIRE_LEN: usize = mem::size_of::<i32>() + GShape::MIN_WIRE_LEN;
    fn deser(is: &mut ByteMemoryInStream<'_>) -> Result<Self> {
        Ok(Self {
            id: i32::deser(is)?,
            shape: GShape::deser(is)?,
        })
    }
}

/// A build-time graph argument.
///
/// ```text
/// struct GArg {
///     arg_kind:       u32,
///     opaque_kind:    u32,
///     body:           OpaqueBody[opaque_kind] | RcDesc,  // per arg_kind
/// }
/// ```
#[derive(PartialEq, Clone, Debug)]
pub enum GArg {
    /// A plain value, passed through the graph as-is.
    Value(OpaqueValue),
    /// A graph object, annotated with the kind of the data it will carry.
    ObjRef {
        desc: RcDesc,
        opaque_kind: OpaqueKind,
    },
}

impl GArg {
    pub fn new<T: OpaquePayload>(t: T) -> Self {
        Self::Value(t.into_opaque())
    }

    pub fn obj_ref(desc: RcDesc, opaque_kind: OpaqueKind) -> Self {
        Self::ObjRef { desc, opaque_kind }
    }

    pub fn kind(&self) -> ArgKind {
        match self {
            Self::Value(_) => ArgKind::OpaqueVal,
            Self::ObjRef { .. } => ArgKind::GObjRef,
        }
    }

    pub fn opaque_kind(&self) -> OpaqueKind {
        match self {
            Self::Value(val) => val.kind(),
            Self::ObjRef { opaque_kind, .. } => *opaque_kind,
        }
    }

    /// The carried value. An object reference carries none,
    /// so access always fails with an `Unknown` actual kind.
    pub fn get<T: OpaquePayload>(&self) -> Result<&T> {
        let actual = match self {
            Self::Value(val) => match T::from_opaque(val) {
                Some(t) => return Ok(t),
                None => val.kind(),
            },
            Self::ObjRef { .. } => OpaqueKind::Unknown,
        };
        Err(S11nError::KindMismatch {
            requested: T::KIND,
            actual,
        }
        .into())
    }
}

impl Ser for GArg {
    fn ser(&self, os: &mut ByteMemoryOutStream) -> Result<()> {
        self.kind().ser(os)?;
        self.opaque_kind().ser(os)?;
        match self {
            Self::Value(val) => val.ser_body(os),
            Self::ObjRef { desc, .. } => desc.ser(os),
        }
    }
}
impl Deser for GArg {
    const MIN_WIRE_LEN: usize = ArgKind::MIN_WIRE_LEN + OpaqueKind::MIN_WIRE_LEN;
    fn deser(is: &mut ByteMemoryInStream<'_>) -> Result<Self> {
        let arg_kind = ArgKind::deser(is)?;
        let opaque_kind = OpaqueKind::deser(is)?;
        tracing::trace!(?arg_kind, ?opaque_kind, "decoding GArg");
        match arg_kind {
            ArgKind::OpaqueVal => Ok(Self::Value(OpaqueValue::deser_body(opaque_kind, is)?)),
            ArgKind::GObjRef => Ok(Self::ObjRef {
                desc: RcDesc::deser(is)?,
                opaque_kind,
            }),
        }
    }
}
