//! neo4rs-backed execution of a row's writes.
//!
//! Query construction lives in [`cypher`]; this module owns the driver
//! handle and the transaction scoping. In `PerWrite` mode every merge and
//! every relationship create is its own auto-commit transaction (a
//! failure mid-row leaves the row partially written); in `PerRow` mode
//! one explicit transaction brackets the row and rolls back on failure.

use std::collections::HashMap;

use neo4rs::{query, BoltType, Graph, Query};
use tracing::debug;

use crate::config::{ImportConfig, TxnScope};
use crate::error::ImportResult;
use crate::graph::cypher;
use crate::importer::RowPartition;

/// Writes issued for one row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowStats {
    pub nodes_merged: usize,
    pub relationships_created: usize,
}

pub struct GraphWriter {
    graph: Graph,
    import_tag: String,
    node_key_property: String,
    txn_scope: TxnScope,
}

impl GraphWriter {
    /// Build a driver for the configured endpoint. neo4rs connects
    /// lazily, so an unreachable server surfaces on the first write, not
    /// here.
    pub async fn connect(config: &ImportConfig) -> ImportResult<Self> {
        let graph = Graph::new(&config.db_url, &config.db_user, &config.db_password).await?;
        Ok(Self {
            graph,
            import_tag: config.import_tag.clone(),
            node_key_property: config.node_key_property.clone(),
            txn_scope: config.txn_scope,
        })
    }

    /// Merge-create one categorical node by its (label, tag, value)
    /// natural key. Idempotent: a second call with the same arguments
    /// matches the existing node.
    pub async fn upsert_node(&self, label: &str, value: &str) -> ImportResult<()> {
        let q = merge_node(label, value, &self.import_tag, &self.node_key_property)?;
        self.graph.run(q).await?;
        Ok(())
    }

    /// Create the directed relationships from `anchor` to every other
    /// categorical column in the partition, each carrying the row's full
    /// numeric property set. Returns the number of relationships created.
    pub async fn link_row(&self, partition: &RowPartition, anchor: &str) -> ImportResult<usize> {
        let queries = anchor_links(partition, anchor, &self.import_tag, &self.node_key_property)?;
        let created = queries.len();
        for q in queries {
            self.graph.run(q).await?;
        }
        Ok(created)
    }

    /// Write one partitioned row: merge every categorical node, then link
    /// each categorical column as anchor to all the others. With `k`
    /// categorical columns this creates `k * (k - 1)` directed
    /// relationships; both directions of every pair are kept.
    pub async fn write_row(&self, row: usize, partition: &RowPartition) -> ImportResult<RowStats> {
        let stats = match self.txn_scope {
            TxnScope::PerWrite => self.write_row_per_write(partition).await?,
            TxnScope::PerRow => self.write_row_per_row(partition).await?,
        };
        debug!(
            row,
            nodes = stats.nodes_merged,
            relationships = stats.relationships_created,
            "row written"
        );
        Ok(stats)
    }

    async fn write_row_per_write(&self, partition: &RowPartition) -> ImportResult<RowStats> {
        let mut stats = RowStats::default();
        for (label, value) in &partition.categorical {
            self.upsert_node(label, value).await?;
            stats.nodes_merged += 1;
        }
        for (anchor, _) in &partition.categorical {
            stats.relationships_created += self.link_row(partition, anchor).await?;
        }
        Ok(stats)
    }

    async fn write_row_per_row(&self, partition: &RowPartition) -> ImportResult<RowStats> {
        let mut stats = RowStats::default();
        let mut queries = Vec::new();

        for (label, value) in &partition.categorical {
            queries.push(merge_node(label, value, &self.import_tag, &self.node_key_property)?);
            stats.nodes_merged += 1;
        }
        for (anchor, _) in &partition.categorical {
            let links = anchor_links(partition, anchor, &self.import_tag, &self.node_key_property)?;
            stats.relationships_created += links.len();
            queries.extend(links);
        }

        let mut txn = self.graph.start_txn().await?;
        for q in queries {
            if let Err(err) = txn.run(q).await {
                txn.rollback().await?;
                return Err(err.into());
            }
        }
        txn.commit().await?;
        Ok(stats)
    }
}

fn merge_node(label: &str, value: &str, tag: &str, key_property: &str) -> ImportResult<Query> {
    let text = cypher::merge_node_query(label, tag, key_property)?;
    Ok(query(&text).param("value", value))
}

fn anchor_links(
    partition: &RowPartition,
    anchor: &str,
    tag: &str,
    key_property: &str,
) -> ImportResult<Vec<Query>> {
    let Some((_, a_value)) = partition.categorical.iter().find(|(key, _)| key == anchor) else {
        return Ok(Vec::new());
    };

    let props = bolt_props(&partition.numeric_props);
    let mut queries = Vec::new();
    for (other, b_value) in &partition.categorical {
        if other == anchor {
            continue;
        }
        let text = cypher::link_query(anchor, other, tag, key_property)?;
        queries.push(
            query(&text)
                .param("a_value", a_value.as_str())
                .param("b_value", b_value.as_str())
                .param("props", props.clone()),
        );
    }
    Ok(queries)
}

fn bolt_props(numeric: &[(String, f64)]) -> HashMap<String, BoltType> {
    numeric
        .iter()
        .map(|(key, value)| (key.clone(), (*value).into()))
        .collect()
}
