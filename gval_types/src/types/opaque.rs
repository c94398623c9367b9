use crate::s11n::{ByteMemoryInStream, ByteMemoryOutStream, Deser, Ser};
use crate::types::{kind, OpaqueKind, OpaqueKindOf, Point, Point2f, Rect, Size};
use anyhow::Result;

/// A host type that an [`OpaqueRef`] can own.
pub trait OpaquePayload: OpaqueKindOf + Sized {
    fn into_opaque(self) -> OpaqueValue;
    fn from_opaque(val: &OpaqueValue) -> Option<&Self>;
    fn from_opaque_mut(val: &mut OpaqueValue) -> Option<&mut Self>;
    fn from_opaque_owned(val: OpaqueValue) -> Option<Self>;
}

/// Declares [`OpaqueValue`], with one alternative per supported kind,
/// and the codec dispatch keyed by [`OpaqueKind`].
/// Every alternative is named after its kind.
macro_rules! opaque_payloads {
    ($($kind:ident($t:ty)),* $(,)?) => {
        #[derive(PartialEq, Clone, Debug)]
        pub enum OpaqueValue {
            $( $kind($t), )*
        }

        impl OpaqueValue {
            pub fn kind(&self) -> OpaqueKind {
                match self {
                    $( Self::$kind(_) => OpaqueKind::$kind, )*
                }
            }

            pub(crate) fn ser_body(&self, os: &mut ByteMemoryOutStream) -> Result<()> {
                match self {
                    $( Self::$kind(val) => val.ser(os), )*
                }
            }

            pub(crate) fn deser_body(
                kind: OpaqueKind,
                is: &mut ByteMemoryInStream<'_>,
            ) -> Result<Self> {
                tracing::trace!(?kind, "decoding opaque payload");
                match kind {
                    $( OpaqueKind::$kind => Ok(Self::$kind(<$t>::deser(is)?)), )*
                    #[allow(unreachable_patterns)]
                    kind => Err(kind::unsupported("OpaqueRef", kind)),
                }
            }
        }

        $(
            impl OpaquePayload for $t {
                fn into_opaque(self) -> OpaqueValue {
                    OpaqueValue::$kind(self)
                }
                fn from_opaque(val: &OpaqueValue) -> Option<&Self> {
                    match val {
                        OpaqueValue::$kind(t) => Some(t),
                        #[allow(unreachable_patterns)]
                        _ => None,
                    }
                }
                fn from_opaque_mut(val: &mut OpaqueValue) -> Option<&mut Self> {
                    match val {
                        OpaqueValue::$kind(t) => Some(t),
                        #[allow(unreachable_patterns)]
                        _ => None,
                    }
                }
                fn from_opaque_owned(val: OpaqueValue) -> Option<Self> {
                    match val {
                        OpaqueValue::$kind(t) => Some(t),
                        #[allow(unreachable_patterns)]
                        _ => None,
                    }
                }
            }

            impl From<$t> for OpaqueValue {
                fn from(t: $t) -> Self {
                    OpaqueValue::$kind(t)
                }
            }
        )*
    };
}

// Scalar and Mat are array-only kinds.
opaque_payloads!(
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
);

impl Ser for OpaqueValue {
    fn ser(&self, os: &mut ByteMemoryOutStream) -> Result<()> {
        self.kind().ser(os)?;
        self.ser_body(os)
    }
}
impl Deser for OpaqueValue {
    const MIN_WIRE_LEN: usize = OpaqueKind::MIN_WIRE_LEN;
    fn deser(is: &mut ByteMemoryInStream<'_>) -> Result<Self> {
        let kind = OpaqueKind::deser(is)?;
        Self::deser_body(kind, is)
    }
}

/// Type-erased owner of a single kind-tagged value.
///
/// The default handle is empty and reports [`OpaqueKind::Unknown`]; it cannot be encoded.
#[derive(PartialEq, Clone, Default, Debug)]
pub struct OpaqueRef {
    payload: Option<OpaqueValue>,
}

impl OpaqueRef {
    pub fn new<T: OpaquePayload>(t: T) -> Self {
        Self {
            payload: Some(t.into_opaque()),
        }
    }

    pub fn kind(&self) -> OpaqueKind {
        self.payload
            .as_ref()
            .map(OpaqueValue::kind)
            .unwrap_or(OpaqueKind::Unknown)
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_none()
    }

    pub fn value(&self) -> Option<&OpaqueValue> {
        self.payload.as_ref()
    }

    /// Read access, checked against the handle's kind.
    pub fn rref<T: OpaquePayload>(&self) -> Result<&T> {
        self.payload
            .as_ref()
            .and_then(T::from_opaque)
            .ok_or_else(|| kind::mismatch(T::KIND, self.kind()))
    }

    /// Write access, checked against the handle's kind.
    pub fn wref<T: OpaquePayload>(&mut self) -> Result<&mut T> {
        let actual = self.kind();
        self.payload
            .as_mut()
            .and_then(T::from_opaque_mut)
            .ok_or_else(|| kind::mismatch(T::KIND, actual))
    }

    pub fn into_inner<T: OpaquePayload>(self) -> Result<T> {
        let actual = self.kind();
        self.payload
            .and_then(T::from_opaque_owned)
            .ok_or_else(|| kind::mismatch(T::KIND, actual))
    }

    /// Replaces the payload with a default `T`, retagging the handle as `T::KIND`.
    pub fn reset<T: OpaquePayload + Default>(&mut self) {
        self.payload = Some(T::default().into_opaque());
    }
}

impl From<OpaqueValue> for OpaqueRef {
    fn from(val: OpaqueValue) -> Self {
        Self { payload: Some(val) }
    }
}

impl Ser for OpaqueRef {
    fn ser(&self, os: &mut ByteMemoryOutStream) -> Result<()> {
        match &self.payload {
            None => Err(kind::unsupported("OpaqueRef", OpaqueKind::Unknown)),
            Some(val) => {
                tracing::trace!(kind = ?val.kind(), "encoding OpaqueRef");
                val.ser(os)
            }
        }
    }
}
impl Deser for OpaqueRef {
    const MIN_WIRE_LEN: usize = OpaqueKind::MIN_WIRE_LEN;
    fn deser(is: &mut ByteMemoryInStream<'_>) -> Result<Self> {
        Ok(Self::from(OpaqueValue::deser(is)?))
    }
}
