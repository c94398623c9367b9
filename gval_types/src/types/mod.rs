mod descs;
mod float_key;
mod geometry;
mod kind;
mod mat;

mod opaque;
mod vector;

pub use descs::*;
pub use float_key::*;
pub use geometry::*;
pub use kind::*;
pub use mat::*;

pub use opaque::*;
pub use vector::*;
