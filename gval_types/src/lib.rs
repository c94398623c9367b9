//! Binary encoding of the runtime-typed values that flow through a compute graph:
//! primitives, containers, tagged unions, kind-tagged handles, dense buffers,
//! and the graph argument unions built on top of them.

pub mod graph;
pub mod s11n;
pub mod types;

#[doc(hidden)]
pub use anyhow as __anyhow;
