//! # Serialization format
//!
//! Every value is encoded into a [`ByteMemoryOutStream`] and decoded from a
//! [`ByteMemoryInStream`]. Nothing in the byte sequence describes its own
//! schema: the decoding end must request the same type that the encoding end
//! wrote. The only runtime type information is carried by tagged unions
//! (`variant_index`) and by type-erased handles (`opaque_kind`).
//!
//! All fixed-width numbers are little-endian.
//!
//! ```text
//! struct Primitive {                  // i8 .. u64, f32, f64
//!     body:               [u8; size_of::<T>()],
//! }
//!
//! struct Bool {
//!     body:               u8,         // 0 or 1
//! }
//!
//! struct String {
//!     len:                u32,
//!     body:               [u8; len],  // UTF-8, no terminator
//! }
//!
//! struct Seq<T> {
//!     count:              u32,
//!     elems:              [T; count],
//! }
//!
//! struct Seq<bool> {
//!     count:              u32,
//!     bits:               [u8; (count + 7) / 8],  // elem i at bit (i % 8) of byte (i / 8)
//! }
//!
//! struct Map<K, V> {
//!     count:              u32,
//!     entries:            [(K, V); count],  // ascending by the bytes of each encoded K
//! }
//!
//! struct Variant {
//!     variant_index:      u32,
//!     body:               Alternative[variant_index],
//! }
//!
//! struct OpaqueRef {
//!     opaque_kind:        u32,
//!     body:               Payload[opaque_kind],
//! }
//!
//! struct VectorRef {
//!     opaque_kind:        u32,
//!     body:               Seq<Payload[opaque_kind]>,
//! }
//! ```

mod containers;
mod error;
mod lengths;
mod primitives;
mod serializable;
mod stream;
mod variant;

pub use error::*;
pub use lengths::*;
pub use serializable::*;
pub use stream::*;
pub(crate) use variant::wire_enum;
