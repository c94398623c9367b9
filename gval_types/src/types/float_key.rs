use crate::s11n::{ByteMemoryInStream, ByteMemoryOutStream, Deser, Ser};
use anyhow::Result;
use derive_more::{Deref, From};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/* Floats usable as map keys. Ordering is IEEE 754 `totalOrder`, so `-0.0 < 0.0`
and NaNs sort by sign and payload. Two keys are equal iff their bits are. The
wire form is the bare float. */

macro_rules! float_key {
    ($name:ident($f:ty)) => {
        #[derive(Deref, From, Clone, Copy, Debug)]
        pub struct $name(pub $f);

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.0.to_bits() == other.0.to_bits()
            }
        }
        impl Eq for $name {}

        impl PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }
        impl Ord for $name {
            fn cmp(&self, other: &Self) -> Ordering {
                self.0.total_cmp(&other.0)
            }
        }

        impl Hash for $name {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.0.to_bits().hash(state)
            }
        }

        impl Ser for $name {
            fn ser(&self, os: &mut ByteMemoryOutStream) -> Result<()> {
                self.0.ser(os)
            }
        }
        impl Deser for $name {
            const MIN_WIRE_LEN: usize = <$f>::MIN_WIRE_LEN;
            fn deser(is: &mut ByteMemoryInStream<'_>) -> Result<Self> {
                Ok(Self(<$f>::deser(is)?))
            }
        }
    };
}

float_key!(F32Key(f32));
float_key!(F64Key(f64));
