use crate::s11n::S11nError;
use anyhow::Result;
use derive_more::{From, Into};

/// An append-only byte buffer that every encoder writes through.
#[derive(From, Into, Default, Clone, Debug)]
pub struct ByteMemoryOutStream {
    buf: Vec<u8>,
}

impl ByteMemoryOutStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    pub fn put_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn put_byte(&mut self, byte: u8) {
        self.buf.push(byte);
    }

    /// A snapshot of everything written so far. Later writes are unaffected.
    pub fn data(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_data(self) -> Vec<u8> {
        self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

/// A forward-only read cursor over a borrowed byte sequence.
///
/// The cursor never advances on a failed read.
#[derive(Clone, Debug)]
pub struct ByteMemoryInStream<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> From<&'a [u8]> for ByteMemoryInStream<'a> {
    fn from(buf: &'a [u8]) -> Self {
        Self::new(buf)
    }
}

impl<'a> ByteMemoryInStream<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        self.ensure(n)?;
        let bytes = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    pub fn take_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut arr = [0u8; N];
        arr.copy_from_slice(self.take(N)?);
        Ok(arr)
    }

    pub fn take_byte(&mut self) -> Result<u8> {
        let [byte] = self.take_array::<1>()?;
        Ok(byte)
    }

    /// Fails unless at least `n` more bytes are available.
    pub fn ensure(&self, n: usize) -> Result<()> {
        let remaining = self.remaining();
        if n > remaining {
            return Err(S11nError::UnexpectedEof {
                wanted: n,
                remaining,
            }
            .into());
        }
        Ok(())
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }
}
