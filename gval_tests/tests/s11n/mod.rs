pub mod graph_args;
pub mod handles;
