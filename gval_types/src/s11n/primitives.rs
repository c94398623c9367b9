use crate::s11n::{ByteMemoryInStream, ByteMemoryOutStream, ContainerLen, Deser, S11nError, Ser};
use anyhow::Result;
use std::mem;

macro_rules! impl_fixed_width {
    ($($t:ty),* $(,)?) => {
        $(
            impl Ser for $t {
                fn ser(&self, os: &mut ByteMemoryOutStream) -> Result<()> {
                    os.put_bytes(&self.to_le_bytes());
                    Ok(())
                }
            }
            impl Deser for $t {
                const MIN_WIRE_LEN: usize = mem::size_of::<$t>();
                fn deser(is: &mut ByteMemoryInStream<'_>) -> Result<Self> {
                    Ok(<$t>::from_le_bytes(is.take_array()?))
                }
            }
        )*
    };
}

impl_fixed_width!(i8, u8, i16, u16, i32, u32, i64, u64, f32, f64);

/* bool */

fn bool_from_byte(byte: u8) -> Result<bool> {
    match byte {
        0 => Ok(false),
        1 => Ok(true),
        _ => Err(S11nError::InvalidBool(byte).into()),
    }
}

impl Ser for bool {
    fn ser(&self, os: &mut ByteMemoryOutStream) -> Result<()> {
        os.put_byte(u8::from(*self));
        Ok(())
    }

    /// Packs 8 elements per byte, LSB first.
    fn ser_seq(items: &[Self], os: &mut ByteMemoryOutStream) -> Result<()> {
        ContainerLen::from_len(items.len())?.ser(os)?;
        for chunk in items.chunks(8) {
            let byte = chunk
                .iter()
                .enumerate()
                .fold(0u8, |byte, (bit_i, b)| byte | (u8::from(*b) << bit_i));
            os.put_byte(byte);
        }
        Ok(())
    }
}

impl Deser for bool {
    const MIN_WIRE_LEN: usize = 1;

    fn deser(is: &mut ByteMemoryInStream<'_>) -> Result<Self> {
        bool_from_byte(is.take_byte()?)
    }

    fn deser_seq(is: &mut ByteMemoryInStream<'_>) -> Result<Vec<Self>> {
        let count = ContainerLen::deser(is)?.as_usize();
        let packed = is.take(count.div_ceil(8))?;

        let mut items = Vec::with_capacity(count);
        for (byte_i, byte) in packed.iter().enumerate() {
            let bits_here = (count - byte_i * 8).min(8);
            for bit_i in 0..bits_here {
                items.push((byte >> bit_i) & 1 == 1);
            }
            if bits_here < 8 && (byte >> bits_here) != 0 {
                return Err(S11nError::InvalidBool(*byte).into());
            }
        }
        Ok(items)
    }
}

/* String */

impl Ser for str {
    fn ser(&self, os: &mut ByteMemoryOutStream) -> Result<()> {
        ContainerLen::from_len(self.len())?.ser(os)?;
        os.put_bytes(self.as_bytes());
        Ok(())
    }
}

impl Ser for String {
    fn ser(&self, os: &mut ByteMemoryOutStream) -> Result<()> {
        self.as_str().ser(os)
    }
}

impl Deser for String {
    const MIN_WIRE_LEN: usize = mem::size_of::<u32>();
    fn deser(is: &mut ByteMemoryInStream<'_>) -> Result<Self> {
        let len = ContainerLen::deser(is)?.as_usize();
        let body = is.take(len)?;
        let s = String::from_utf8(body.to_vec()).map_err(|_| S11nError::InvalidUtf8)?;
        Ok(s)
    }
}

/* Unit, for alternatives and descriptors that carry no data. */

impl Ser for () {
    fn ser(&self, _os: &mut ByteMemoryOutStream) -> Result<()> {
        Ok(())
    }
}

impl Deser for () {
    fn deser(_is: &mut ByteMemoryInStream<'_>) -> Result<Self> {
        Ok(())
    }
}
