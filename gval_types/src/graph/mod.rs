//! The argument unions that cross the boundary of a compiled graph:
//! build-time arguments ([`GArg`]), run-time values ([`RunArg`]),
//! and their metadata ([`MetaArg`]).

mod garg;
mod meta_arg;
mod run_arg;

pub use garg::*;
pub use meta_arg::*;
pub use run_arg::*;
