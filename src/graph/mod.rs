//! Graph output: Cypher construction and neo4rs execution.

pub mod cypher;
mod writer;

pub use writer::{GraphWriter, RowStats};
