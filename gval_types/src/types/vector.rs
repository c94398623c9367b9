use crate::s11n::{ByteMemoryInStream, ByteMemoryOutStream, Deser, Ser};
use crate::types::{kind, Mat, OpaqueKind, OpaqueKindOf, Point, Point2f, Rect, Scalar, Size};
use anyhow::Result;

/// A host element type that a [`VectorRef`] can own a sequence of.
pub trait ArrayPayload: OpaqueKindOf + Sized {
    fn into_vector(items: Vec<Self>) -> VectorValue;
    fn from_vector(val: &VectorValue) -> Option<&Vec<Self>>;
    fn from_vector_mut(val: &mut VectorValue) -> Option<&mut Vec<Self>>;
    fn from_vector_owned(val: VectorValue) -> Option<Vec<Self>>;
}

macro_rules! array_payloads {
    ($($kind:ident($t:ty)),* $(,)?) => {
        /// A homogeneous sequence, one alternative per element kind.
        #[derive(PartialEq, Clone, Debug)]
        pub enum VectorValue {
            $( $kind(Vec<$t>), )*
        }

        impl VectorValue {
            pub fn kind(&self) -> OpaqueKind {
                match self {
                    $( Self::$kind(_) => OpaqueKind::$kind, )*
                }
            }

            pub fn len(&self) -> usize {
                match self {
                    $( Self::$kind(items) => items.len(), )*
                }
            }

            pub fn is_empty(&self) -> bool {
                self.len() == 0
            }

            fn ser_body(&self, os: &mut ByteMemoryOutStream) -> Result<()> {
                match self {
                    $( Self::$kind(items) => items.ser(os), )*
                }
            }

            fn deser_body(kind: OpaqueKind, is: &mut ByteMemoryInStream<'_>) -> Result<Self> {
                tracing::trace!(?kind, "decoding vector payload");
                match kind {
                    $( OpaqueKind::$kind => Ok(Self::$kind(Vec::<$t>::deser(is)?)), )*
                    #[allow(unreachable_patterns)]
                    kind => Err(kind::unsupported("VectorRef", kind)),
                }
            }
        }

        $(
            impl ArrayPayload for $t {
                fn into_vector(items: Vec<Self>) -> VectorValue {
                    VectorValue::$kind(items)
                }
                fn from_vector(val: &VectorValue) -> Option<&Vec<Self>> {
                    match val {
                        VectorValue::$kind(items) => Some(items),
                        #[allow(unreachable_patterns)]
                        _ => None,
                    }
                }
                fn from_vector_mut(val: &mut VectorValue) -> Option<&mut Vec<Self>> {
                    match val {
                        VectorValue::$kind(items) => Some(items),
                        #[allow(unreachable_patterns)]
                        _ => None,
                    }
                }
                fn from_vector_owned(val: VectorValue) -> Option<Vec<Self>> {
                    match val {
                        VectorValue::$kind(items) => Some(items),
                        #[allow(unreachable_patterns)]
                        _ => None,
                    }
                }
            }

            impl From<Vec<$t>> for VectorValue {
                fn from(items: Vec<$t>) -> Self {
                    VectorValue::$kind(items)
                }
            }
        )*
    };
}

array_payloads!(
    Bool(bool),
    Int(i32),
    Int64(i64),
    Double(f64),
    Float(f32),
    UInt64(u64),
    String(String),
    Point(Point),
    Point2f(Point2f),
    Size(Size),
    Rect(Rect),
    Scalar(Scalar),
    Mat(Mat),
);

impl Ser for VectorValue {
    fn ser(&self, os: &mut ByteMemoryOutStream) -> Result<()> {
        self.kind().ser(os)?;
        self.ser_body(os)
    }
}
impl Deser for VectorValue {
    const MIN_WIRE_LEN: usize = OpaqueKind::MIN_WIRE_LEN + 4;
    fn deser(is: &mut ByteMemoryInStream<'_>) -> Result<Self> {
        let kind = OpaqueKind::deser(is)?;
        Self::deser_body(kind, is)
    }
}

/// Type-erased owner of a homogeneous kind-tagged sequence.
///
/// The default handle is empty and reports [`OpaqueKind::Unknown`]; it cannot be encoded.
#[derive(PartialEq, Clone, Default, Debug)]
pub struct VectorRef {
    payload: Option<VectorValue>,
}

impl VectorRef {
    pub fn new<T: ArrayPayload>(items: Vec<T>) -> Self {
        Self {
            payload: Some(T::into_vector(items)),
        }
    }

    pub fn kind(&self) -> OpaqueKind {
        self.payload
            .as_ref()
            .map(VectorValue::kind)
            .unwrap_or(OpaqueKind::Unknown)
    }

    /// Element count. An empty handle has none.
    pub fn len(&self) -> usize {
        self.payload.as_ref().map(VectorValue::len).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn value(&self) -> Option<&VectorValue> {
        self.payload.as_ref()
    }

    pub fn rref<T: ArrayPayload>(&self) -> Result<&Vec<T>> {
        self.payload
            .as_ref()
            .and_then(T::from_vector)
            .ok_or_else(|| kind::mismatch(T::KIND, self.kind()))
    }

    pub fn wref<T: ArrayPayload>(&mut self) -> Result<&mut Vec<T>> {
        let actual = self.kind();
        self.payload
            .as_mut()
            .and_then(T::from_vector_mut)
            .ok_or_else(|| kind::mismatch(T::KIND, actual))
    }

    pub fn into_inner<T: ArrayPayload>(self) -> Result<Vec<T>> {
        let actual = self.kind();
        self.payload
            .and_then(T::from_vector_owned)
            .ok_or_else(|| kind::mismatch(T::KIND, actual))
    }

    /// Replaces the payload with an empty `Vec<T>`, retagging the handle as `T::KIND`.
    pub fn reset<T: ArrayPayload>(&mut self) {
        self.payload = Some(T::into_vector(vec![]));
    }
}

impl From<VectorValue> for VectorRef {
    fn from(val: VectorValue) -> Self {
        Self { payload: Some(val) }
    }
}

impl Ser for VectorRef {
    fn ser(&self, os: &mut ByteMemoryOutStream) -> Result<()> {
        match &self.payload {
            None => Err(kind::unsupported("VectorRef", OpaqueKind::Unknown)),
            Some(val) => {
                tracing::trace!(kind = ?val.kind(), len = val.len(), "encoding VectorRef");
                val.ser(os)
            }
        }
    }
}
impl Deser for VectorRef {
    const MIN_WIRE_LEN: usize = VectorValue::MIN_WIRE_LEN;
    fn deser(is: &mut ByteMemoryInStream<'_>) -> Result<Self> {
        Ok(Self::from(VectorValue::deser(is)?))
    }
}
