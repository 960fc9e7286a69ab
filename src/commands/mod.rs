//! Command implementations for the wpenv CLI

pub mod clone;
pub mod completions;
