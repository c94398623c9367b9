use crate::s11n::{self, ByteMemoryInStream, ByteMemoryOutStream, Deser, S11nError, Ser};
use crate::types::{Rect, Scalar, Size};
use anyhow::Result;
use num_derive::FromPrimitive;
use std::mem;

/// Element depth of a [`Mat`] channel.
#[repr(u8)]
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, FromPrimitive, Debug)]
pub enum Depth {
    U8 = 0,
    S8 = 1,
    U16 = 2,
    S16 = 3,
    S32 = 4,
    F32 = 5,
    F64 = 6,
}
s11n::wire_enum!(Depth as u8);

impl Depth {
    pub fn elem_size(self) -> usize {
        match self {
            Depth::U8 | Depth::S8 => 1,
            Depth::U16 | Depth::S16 => 2,
            Depth::S32 | Depth::F32 => 4,
            Depth::F64 => 8,
        }
    }

    /// Saturates, as a cast from `f64` does.
    fn write_elem(self, v: f64, out: &mut [u8]) {
        match self {
            Depth::U8 => out.copy_from_slice(&(v.round() as u8).to_le_bytes()),
            Depth::S8 => out.copy_from_slice(&(v.round() as i8).to_le_bytes()),
            Depth::U16 => out.copy_from_slice(&(v.round() as u16).to_le_bytes()),
            Depth::S16 => out.copy_from_slice(&(v.round() as i16).to_le_bytes()),
            Depth::S32 => out.copy_from_slice(&(v.round() as i32).to_le_bytes()),
            Depth::F32 => out.copy_from_slice(&(v as f32).to_le_bytes()),
            Depth::F64 => out.copy_from_slice(&v.to_le_bytes()),
        }
    }

    fn read_elem(self, bytes: &[u8]) -> f64 {
        let mut buf = [0u8; 8];
        buf[..bytes.len()].copy_from_slice(bytes);
        match self {
            Depth::U8 => buf[0] as f64,
            Depth::S8 => buf[0] as i8 as f64,
            Depth::U16 => u16::from_le_bytes([buf[0], buf[1]]) as f64,
            Depth::S16 => i16::from_le_bytes([buf[0], buf[1]]) as f64,
            Depth::S32 => i32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]) as f64,
            Depth::F32 => f32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]) as f64,
            Depth::F64 => f64::from_le_bytes(buf),
        }
    }
}

#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct MatType {
    pub depth: Depth,
    pub channels: u32,
}
impl MatType {
    pub const U8C1: Self = Self::new(Depth::U8, 1);
    pub const U8C3: Self = Self::new(Depth::U8, 3);
    pub const F32C1: Self = Self::new(Depth::F32, 1);
    pub const F32C2: Self = Self::new(Depth::F32, 2);

    pub const fn new(depth: Depth, channels: u32) -> Self {
        Self { depth, channels }
    }

    pub fn pixel_size(&self) -> usize {
        self.depth.elem_size() * self.channels as usize
    }
}

/// A dense, row-major, contiguous multi-channel 2D buffer.
///
/// Elements are stored little-endian, channels interleaved.
#[derive(PartialEq, Clone, Debug)]
pub struct Mat {
    rows: u32,
    cols: u32,
    typ: MatType,
    data: Vec<u8>,
}

/// Byte length of a `rows x cols` buffer of `typ`.
///
/// Rows, columns and channels must each fit in an `i32`, and there is at least one channel.
fn layout_len(rows: u32, cols: u32, typ: MatType) -> Result<usize> {
    let invalid = |why: &str| -> anyhow::Error {
        S11nError::InvalidMatLayout(format!("{rows}x{cols} {typ:?} {why}")).into()
    };
    let max_dim = i32::MAX as u32;
    if rows > max_dim || cols > max_dim {
        return Err(invalid("exceeds the i32 dimension range"));
    }
    if typ.channels == 0 || typ.channels > max_dim {
        return Err(invalid("has an invalid channel count"));
    }
    typ.depth
        .elem_size()
        .checked_mul(typ.channels as usize)
        .and_then(|pixel_size| pixel_size.checked_mul(rows as usize))
        .and_then(|col_bytes| col_bytes.checked_mul(cols as usize))
        .ok_or_else(|| invalid("overflows"))
}

impl Mat {
    pub fn zeros(rows: u32, cols: u32, typ: MatType) -> Result<Self> {
        let len = layout_len(rows, cols, typ)?;
        Ok(Self {
            rows,
            cols,
            typ,
            data: vec![0u8; len],
        })
    }

    /// Every pixel's channel `c` is set to `scalar[c]`; channels beyond the 4th are zero.
    pub fn new_with(rows: u32, cols: u32, typ: MatType, scalar: Scalar) -> Result<Self> {
        let mut mat = Self::zeros(rows, cols, typ)?;
        for r in 0..rows {
            for c in 0..cols {
                for ch in 0..typ.channels.min(4) {
                    mat.set(r, c, ch, scalar.0[ch as usize]);
                }
            }
        }
        Ok(mat)
    }

    /// Ones on channel 0 of the main diagonal.
    pub fn eye(rows: u32, cols: u32, typ: MatType) -> Result<Self> {
        let mut mat = Self::zeros(rows, cols, typ)?;
        for i in 0..rows.min(cols) {
            mat.set(i, i, 0, 1.0);
        }
        Ok(mat)
    }

    pub fn from_raw(rows: u32, cols: u32, typ: MatType, data: Vec<u8>) -> Result<Self> {
        let expected = layout_len(rows, cols, typ)?;
        if data.len() != expected {
            return Err(S11nError::InvalidMatLayout(format!(
                "{rows}x{cols} {typ:?} needs {expected} bytes, got {}",
                data.len()
            ))
            .into());
        }
        Ok(Self {
            rows,
            cols,
            typ,
            data,
        })
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }
    pub fn cols(&self) -> u32 {
        self.cols
    }
    pub fn typ(&self) -> MatType {
        self.typ
    }
    /// Lossless, as dimensions never exceed `i32::MAX`.
    pub fn size(&self) -> Size {
        Size::new(self.cols as i32, self.rows as i32)
    }
    pub fn data(&self) -> &[u8] {
        &self.data
    }
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn offset(&self, row: u32, col: u32, ch: u32) -> usize {
        let pixel = row as usize * self.cols as usize + col as usize;
        pixel * self.typ.pixel_size() + ch as usize * self.typ.depth.elem_size()
    }

    pub fn at(&self, row: u32, col: u32, ch: u32) -> f64 {
        let off = self.offset(row, col, ch);
        let elem_size = self.typ.depth.elem_size();
        self.typ.depth.read_elem(&self.data[off..off + elem_size])
    }

    pub fn set(&mut self, row: u32, col: u32, ch: u32, v: f64) {
        let off = self.offset(row, col, ch);
        let elem_size = self.typ.depth.elem_size();
        self.typ.depth.write_elem(v, &mut self.data[off..off + elem_size]);
    }

    /// Copies the region `roi` into a new contiguous `Mat`.
    pub fn roi(&self, roi: Rect) -> Result<Self> {
        let fits = roi.x >= 0
            && roi.y >= 0
            && roi.width >= 0
            && roi.height >= 0
            && roi.x as i64 + roi.width as i64 <= self.cols as i64
            && roi.y as i64 + roi.height as i64 <= self.rows as i64;
        if !fits {
            return Err(S11nError::InvalidMatLayout(format!(
                "{roi:?} is outside of {:?}",
                self.size()
            ))
            .into());
        }

        let pixel_size = self.typ.pixel_size();
        let row_len = roi.width as usize * pixel_size;
        let mut data = Vec::with_capacity(row_len * roi.height as usize);
        let top = roi.y as u32;
        for r in top..top + roi.height as u32 {
            let start = self.offset(r, roi.x as u32, 0);
            data.extend_from_slice(&self.data[start..start + row_len]);
        }
        Self::from_raw(roi.height as u32, roi.width as u32, self.typ, data)
    }

    /// The largest absolute element-wise difference,
    /// or `None` if the two buffers differ in shape or type.
    pub fn norm_inf(&self, other: &Mat) -> Option<f64> {
        if self.rows != other.rows || self.cols != other.cols || self.typ != other.typ {
            return None;
        }
        let elem_size = self.typ.depth.elem_size();
        let norm = self
            .data
            .chunks_exact(elem_size)
            .zip(other.data.chunks_exact(elem_size))
            .map(|(a, b)| (self.typ.depth.read_elem(a) - self.typ.depth.read_elem(b)).abs())
            .fold(0.0, f64::max);
        Some(norm)
    }
}

impl Ser for Mat {
    fn ser(&self, os: &mut ByteMemoryOutStream) -> Result<()> {
        self.rows.ser(os)?;
        self.cols.ser(os)?;
        self.typ.depth.ser(os)?;
        self.typ.channels.ser(os)?;
        os.put_bytes(&self.data);
        Ok(())
    }
}

impl Deser for Mat {
    const MIN_WIRE_LEN: usize = 3 * mem::size_of::<u32>() + mem::size_of::<u8>();
    fn deser(is: &mut ByteMemoryInStream<'_>) -> Result<Self> {
        let rows = u32::deser(is)?;
        let cols = u32::deser(is)?;
        let depth = Depth::deser(is)?;
        let channels = u32::deser(is)?;
        let typ = MatType::new(depth, channels);

        let len = layout_len(rows, cols, typ)?;
        let data = is.take(len)?.to_vec();
        Self::from_raw(rows, cols, typ, data)
    }
}
