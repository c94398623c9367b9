use crate::s11n::{ByteMemoryInStream, ByteMemoryOutStream, Deser, Ser};
use anyhow::Result;
use derive_more::{Constructor, From};
use std::mem;

/* Fixed-width aggregates. Fields travel in declaration order, no count and no tag. */

#[derive(Constructor, From, PartialEq, Eq, Hash, Clone, Copy, Default, Debug)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

#[derive(Constructor, From, PartialEq, Clone, Copy, Default, Debug)]
pub struct Point2f {
    pub x: f32,
    pub y: f32,
}

#[derive(Constructor, From, PartialEq, Eq, Hash, Clone, Copy, Default, Debug)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}
impl Size {
    pub fn area(&self) -> i64 {
        self.width as i64 * self.height as i64
    }
}

#[derive(Constructor, PartialEq, Eq, Hash, Clone, Copy, Default, Debug)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}
impl Rect {
    pub fn tl(&self) -> Point {
        Point::new(self.x, self.y)
    }
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// A fixed 4-vector of doubles, used for colors and per-channel intensities.
#[derive(From, PartialEq, Clone, Copy, Default, Debug)]
pub struct Scalar(pub [f64; 4]);
impl Scalar {
    pub fn new(v0: f64, v1: f64, v2: f64, v3: f64) -> Self {
        Self([v0, v1, v2, v3])
    }
    pub fn all(v: f64) -> Self {
        Self([v; 4])
    }
    pub fn val(&self) -> &[f64; 4] {
        &self.0
    }
}
/// Fills only the first component, like a single-channel intensity.
impl From<f64> for Scalar {
    fn from(v0: f64) -> Self {
        Self([v0, 0.0, 0.0, 0.0])
    }
}

macro_rules! impl_fields_s11n {
    ($t:ident { $( $field:ident: $ft:ty ),+ }) => {
        impl Ser for $t {
            fn ser(&self, os: &mut ByteMemoryOutStream) -> Result<()> {
                $( self.$field.ser(os)?; )+
                Ok(())
            }
        }
        impl Deser for $t {
            const MIN_WIRE_LEN: usize = 0 $( + mem::size_of::<$ft>() )+;
            fn deser(is: &mut ByteMemoryInStream<'_>) -> Result<Self> {
                $( let $field = <$ft>::deser(is)?; )+
                Ok(Self { $( $field ),+ })
            }
        }
    };
}

impl_fields_s11n!(Point { x: i32, y: i32 });
impl_fields_s11n!(Point2f { x: f32, y: f32 });
impl_fields_s11n!(Size { width: i32, height: i32 });
impl_fields_s11n!(Rect { x: i32, y: i32, width: i32, height: i32 });

impl Ser for Scalar {
    fn ser(&self, os: &mut ByteMemoryOutStream) -> Result<()> {
        self.0.ser(os)
    }
}
impl Deser for Scalar {
    const MIN_WIRE_LEN: usize = mem::size_of::<[f64; 4]>();
    fn deser(is: &mut ByteMemoryInStream<'_>) -> Result<Self> {
        Ok(Self(<[f64; 4]>::deser(is)?))
    }
}
