use crate::s11n::{ByteMemoryInStream, ByteMemoryOutStream, ContainerLen, S11nError};
use anyhow::Result;

pub trait Ser {
    fn ser(&self, os: &mut ByteMemoryOutStream) -> Result<()>;

    /// Encodes a sequence of `Self`. Element types may override this to pick a packed layout.
    fn ser_seq(items: &[Self], os: &mut ByteMemoryOutStream) -> Result<()>
    where
        Self: Sized,
    {
        ContainerLen::from_len(items.len())?.ser(os)?;
        for item in items {
            item.ser(os)?;
        }
        Ok(())
    }

    fn ser_solo(&self) -> Result<Vec<u8>> {
        let mut os = ByteMemoryOutStream::new();
        self.ser(&mut os)?;
        Ok(os.into_data())
    }
}

pub trait Deser: Sized {
    /// The fewest bytes any encoding of `Self` occupies.
    /// Used to reject element counts that the remaining input cannot possibly hold.
    const MIN_WIRE_LEN: usize = 0;

    fn deser(is: &mut ByteMemoryInStream<'_>) -> Result<Self>;

    fn deser_seq(is: &mut ByteMemoryInStream<'_>) -> Result<Vec<Self>> {
        let count = ContainerLen::deser(is)?.as_usize();
        is.ensure(count.saturating_mul(Self::MIN_WIRE_LEN))?;

        let mut items = Vec::with_capacity(count.min(is.remaining()));
        for _ in 0..count {
            items.push(Self::deser(is)?);
        }
        Ok(items)
    }

    /// Decodes exactly one `Self` out of `buf`. Left-over bytes are an error.
    fn deser_solo(buf: &[u8]) -> Result<Self> {
        let mut is = ByteMemoryInStream::new(buf);
        let moi = Self::deser(&mut is)?;
        if !is.is_exhausted() {
            return Err(S11nError::TrailingBytes(is.remaining()).into());
        }
        Ok(moi)
    }
}

pub trait Serializable: Ser + Deser {}
impl<T> Serializable for T where T: Ser + Deser {}
