//! Sheetgraph - spreadsheet to Neo4j graph importer
//!
//! Reads tabular data from an `.xlsx` workbook and loads it into Neo4j:
//! every categorical cell becomes a node labeled by its column header,
//! and every pair of categorical columns in a row is linked by directed
//! relationships carrying the row's numeric values as properties.
//!
//! # Example
//!
//! ```no_run
//! use sheetgraph::{ImportConfig, Importer};
//!
//! # async fn demo() -> sheetgraph::ImportResult<()> {
//! let mut config = ImportConfig::new("sales.xlsx");
//! config.db_url = "bolt://localhost:7687".to_string();
//!
//! let report = Importer::new(config).run().await?;
//! println!("merged {} nodes", report.nodes_merged);
//! # Ok(())
//! # }
//! ```

pub mod classify;
pub mod cli;
pub mod config;
pub mod error;
pub mod graph;
pub mod importer;
pub mod label;
pub mod sheet;

// Re-export commonly used types
pub use config::{ImportConfig, TxnScope, WriteErrorPolicy};
pub use error::{ImportError, ImportResult};
pub use importer::{ImportReport, Importer, Preview};
