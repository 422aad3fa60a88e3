//! Graph representation and algorithms module

pub mod algorithms;
pub mod builder;
pub mod components;
pub mod flow;
pub mod spectral;
pub mod undirected;

pub use builder::GraphBuilder;
pub use undirected::Graph;
