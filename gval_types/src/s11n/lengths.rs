use crate::s11n::{ByteMemoryInStream, ByteMemoryOutStream, Deser, S11nError, Ser};
use anyhow::{Error, Result};
use derive_more::{Deref, From};
use std::any;
use std::mem;

/// Element count of a sequence or map, or byte length of a string body.
#[derive(Deref, From, PartialEq, Eq, Clone, Copy, Debug)]
pub struct ContainerLen(u32);
impl ContainerLen {
    pub fn from_len(len: usize) -> Result<Self> {
        let int = u32::try_from(len).map_err(|_| S11nError::LengthOverflow(len))?;
        Ok(Self(int))
    }
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}
impl Ser for ContainerLen {
    fn ser(&self, os: &mut ByteMemoryOutStream) -> Result<()> {
        self.0.ser(os)
    }
}
impl Deser for ContainerLen {
    const MIN_WIRE_LEN: usize = mem::size_of::<u32>();
    fn deser(is: &mut ByteMemoryInStream<'_>) -> Result<Self> {
        Ok(Self(u32::deser(is)?))
    }
}

/// Discriminant of a tagged union.
///
/// Indices are positional and fixed at compile time; both ends must agree on them.
#[derive(Deref, From, PartialEq, Eq, Clone, Copy, Debug)]
pub struct VariantIndex(u32);
impl VariantIndex {
    /// The error for an index that names no alternative of `T`.
    pub fn out_of_range<T>(index: u32, alternatives: u32) -> Error {
        let type_name = any::type_name::<T>();
        tracing::debug!(type_name, index, alternatives, "rejecting variant index");
        S11nError::BadVariantIndex {
            type_name,
            index,
            alternatives,
        }
        .into()
    }

    /// Reads an index and rejects one that names no alternative of `T`.
    pub fn deser_checked<T>(is: &mut ByteMemoryInStream<'_>, alternatives: u32) -> Result<Self> {
        let idx = Self::deser(is)?;
        if idx.0 >= alternatives {
            return Err(Self::out_of_range::<T>(idx.0, alternatives));
        }
        Ok(idx)
    }
}
impl Ser for VariantIndex {
    fn ser(&self, os: &mut ByteMemoryOutStream) -> Result<()> {
        self.0.ser(os)
    }
}
impl Deser for VariantIndex {
    const MIN_WIRE_LEN: usize = mem::size_of::<u32>();
    fn deser(is: &mut ByteMemoryInStream<'_>) -> Result<Self> {
        Ok(Self(u32::deser(is)?))
    }
}
