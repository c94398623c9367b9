use crate::graph::RunArg;
use crate::s11n::{ByteMemoryInStream, ByteMemoryOutStream, Deser, Ser, VariantIndex};
use crate::types::{ArrayDesc, MatDesc, OpaqueDesc, ScalarDesc};
use anyhow::Result;
use std::mem;

/// Metadata of a graph argument, known before any data arrives.
#[derive(PartialEq, Eq, Clone, Copy, Default, Debug)]
pub enum MetaArg {
    /// No metadata. Distinct from every descriptor, including the empty ones.
    #[default]
    Empty,
    Mat(MatDesc),
    Scalar(ScalarDesc),
    Array(ArrayDesc),
    Opaque(OpaqueDesc),
}

pub type MetaArgs = Vec<MetaArg>;

impl MetaArg {
    const ALTERNATIVES: u32 = 5;

    pub fn descr_of(arg: &RunArg) -> Self {
        match arg {
            RunArg::Mat(mat) => Self::Mat(MatDesc::of(mat)),
            RunArg::Scalar(_) => Self::Scalar(ScalarDesc),
            RunArg::Opaque(_) => Self::Opaque(OpaqueDesc),
            RunArg::Vector(_) => Self::Array(ArrayDesc),
        }
    }

    fn variant_index(&self) -> VariantIndex {
        let idx = match self {
            Self::Empty => 0,
            Self::Mat(_) => 1,
            Self::Scalar(_) => 2,
            Self::Array(_) => 3,
            Self::Opaque(_) => 4,
        };
        VariantIndex::from(idx)
    }
}

impl Ser for MetaArg {
    fn ser(&self, os: &mut ByteMemoryOutStream) -> Result<()> {
        self.variant_index().ser(os)?;
        match self {
            Self::Empty => ().ser(os),
            Self::Mat(desc) => desc.ser(os),
            Self::Scalar(desc) => desc.ser(os),
            Self::Array(desc) => desc.ser(os),
            Self::Opaque(desc) => desc.ser(os),
        }
    }
}
impl Deser for MetaArg {
    const MIN_WIRE_LEN: usize = mem::size_of::<u32>();
    fn deser(is: &mut ByteMemoryInStream<'_>) -> Result<Self> {
        let idx = VariantIndex::deser_checked::<Self>(is, Self::ALTERNATIVES)?;
        let moi = match *idx {
            0 => {
                <()>::deser(is)?;
                Self::Empty
            }
            1 => Self::Mat(MatDesc::deser(is)?),
            2 => Self::Scalar(ScalarDesc::deser(is)?),
            3 => Self::Array(ArrayDesc::deser(is)?),
            4 => Self::Opaque(OpaqueDesc::deser(is)?),
            index => return Err(VariantIndex::out_of_range::<Self>(index, Self::ALTERNATIVES)),
        };
        Ok(moi)
    }
}
