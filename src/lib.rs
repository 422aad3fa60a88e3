//! Core library functions for the graph metrics analyzer

pub mod config;
pub mod data;
pub mod error;
pub mod graph;
pub mod metrics;
pub mod pipeline;
pub mod storage;
pub mod viz;

pub use anyhow::{anyhow, Result};
