/// Implements [`Ser`](crate::s11n::Ser) and [`Deser`](crate::s11n::Deser) for an enum
/// whose every alternative holds exactly one value.
///
/// Each alternative is listed with its wire index. Indices must be `0..N`, in order.
///
/// ```text
/// s11n_variant! {
///     IntOrStr {
///         Int(i32) = 0,
///         Str(String) = 1,
///     }
/// }
/// ```
#[macro_export]
macro_rules! s11n_variant {
    ($enm:ident { $( $var:ident($ty:ty) = $idx:literal ),+ $(,)? }) => {
        impl $crate::s11n::Ser for $enm {
            fn ser(
                &self,
                os: &mut $crate::s11n::ByteMemoryOutStream,
            ) -> $crate::__anyhow::Result<()> {
                match self {
                    $(
                        Self::$var(val) => {
                            $crate::s11n::Ser::ser(&$crate::s11n::VariantIndex::from($idx), os)?;
                            $crate::s11n::Ser::ser(val, os)
                        }
                    )+
                }
            }
        }

        impl $crate::s11n::Deser for $enm {
            const MIN_WIRE_LEN: usize = ::std::mem::size_of::<u32>();

            fn deser(
                is: &mut $crate::s11n::ByteMemoryInStream<'_>,
            ) -> $crate::__anyhow::Result<Self> {
                const ALTERNATIVES: u32 = [$( $idx ),+].len() as u32;
                let idx = $crate::s11n::VariantIndex::deser_checked::<Self>(is, ALTERNATIVES)?;
                match *idx {
                    $(
                        $idx => Ok(Self::$var(<$ty as $crate::s11n::Deser>::deser(is)?)),
                    )+
                    index => Err($crate::s11n::VariantIndex::out_of_range::<Self>(
                        index,
                        ALTERNATIVES,
                    )),
                }
            }
        }
    };
}

/// Implements `Ser` and `Deser` for a fieldless `#[repr]` enum that travels as an `$int`.
/// The enum must derive `num_derive::FromPrimitive`.
macro_rules! wire_enum {
    ($enm:ty as $int:ty) => {
        impl $crate::s11n::Ser for $enm {
            fn ser(&self, os: &mut $crate::s11n::ByteMemoryOutStream) -> ::anyhow::Result<()> {
                $crate::s11n::Ser::ser(&(*self as $int), os)
            }
        }

        impl $crate::s11n::Deser for $enm {
            const MIN_WIRE_LEN: usize = ::std::mem::size_of::<$int>();

            fn deser(is: &mut $crate::s11n::ByteMemoryInStream<'_>) -> ::anyhow::Result<Self> {
                let int = <$int as $crate::s11n::Deser>::deser(is)?;
                <$enm as ::num_traits::FromPrimitive>::from_u64(int as u64).ok_or_else(|| {
                    $crate::s11n::S11nError::UnknownTag {
                        type_name: ::std::any::type_name::<$enm>(),
                        tag: int as u32,
                    }
                    .into()
                })
            }
        }
    };
}

pub(crate) use wire_enum;
