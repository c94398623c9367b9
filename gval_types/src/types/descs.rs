use crate::s11n::{ByteMemoryInStream, ByteMemoryOutStream, Deser, Ser};
use crate::types::{Depth, Mat, Size};
use anyhow::Result;

/// Shape and type metadata of a [`Mat`], without its data.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct MatDesc {
    pub depth: Depth,
    pub chan: i32,
    pub size: Size,
    pub planar: bool,
}
impl MatDesc {
    pub fn new(depth: Depth, chan: i32, size: Size) -> Self {
        Self {
            depth,
            chan,
            size,
            planar: false,
        }
    }

    pub fn of(mat: &Mat) -> Self {
        let typ = mat.typ();
        Self::new(typ.depth, typ.channels as i32, mat.size())
    }
}
impl Ser for MatDesc {
    fn ser(&self, os: &mut ByteMemoryOutStream) -> Result<()> {
        self.depth.ser(os)?;
        self.chan.ser(os)?;
        self.size.ser(os)?;
        self.planar.ser(os)
    }
}
impl Deser for MatDesc {
    const MIN_WIRE_LEN: usize = 1 + 4 + 8 + 1;
    fn deser(is: &mut ByteMemoryInStream<'_>) -> Result<Self> {
        Ok(Self {
            depth: Depth::deser(is)?,
            chan: i32::deser(is)?,
            size: Size::deser(is)?,
            planar: bool::deser(is)?,
        })
    }
}

/* Descriptors that carry no metadata. They occupy zero bytes on the wire. */

#[derive(PartialEq, Eq, Hash, Clone, Copy, Default, Debug)]
pub struct ScalarDesc;

#[derive(PartialEq, Eq, Hash, Clone, Copy, Default, Debug)]
pub struct ArrayDesc;

#[derive(PartialEq, Eq, Hash, Clone, Copy, Default, Debug)]
pub struct OpaqueDesc;

macro_rules! impl_empty_desc_s11n {
    ($($t:ident),*) => {
        $(
            impl Ser for $t {
                fn ser(&self, os: &mut ByteMemoryOutStream) -> Result<()> {
                    ().ser(os)
                }
            }
            impl Deser for $t {
                fn deser(is: &mut ByteMemoryInStream<'_>) -> Result<Self> {
                    <()>::deser(is)?;
                    Ok($t)
                }
            }
        )*
    };
}

impl_empty_desc_s11n!(ScalarDesc, ArrayDesc, OpaqueDesc);
