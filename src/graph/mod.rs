//! Graph representation module

pub mod builder;
pub mod residual;

pub use residual::{EdgeId, EdgeRecord, ResidualGraph, Vertex, Weight};
