//! Pure Cypher text construction.
//!
//! Labels, relationship types, and property keys are the only things that
//! end up in query text, and all of them come from spreadsheet headers -
//! untrusted input. Everything passing through here is checked against the
//! identifier allow-list and backtick-quoted; cell values never appear in
//! query text at all, they are always bound as `$` parameters.

use crate::error::{ImportError, ImportResult};
use crate::label::is_safe_identifier;

/// Reject anything unfit for interpolation into query text.
pub fn ensure_safe_identifier(name: &str) -> ImportResult<()> {
    if is_safe_identifier(name) {
        Ok(())
    } else {
        Err(ImportError::InvalidLabel(name.to_string()))
    }
}

/// Render a node pattern: `` (a:`REGION`:`Import` { value: $a_value }) ``.
///
/// The key property name is configurable; the value is always a
/// parameter reference, never inline text.
pub fn node_pattern(
    selector: &str,
    label: &str,
    tag: &str,
    key_property: &str,
    value_param: &str,
) -> ImportResult<String> {
    ensure_safe_identifier(label)?;
    ensure_safe_identifier(tag)?;
    ensure_safe_identifier(key_property)?;
    Ok(format!(
        "({selector}:`{label}`:`{tag}` {{ {key_property}: ${value_param} }})"
    ))
}

/// Merge-create a node by its (label, tag, value) natural key. Running
/// the same query twice leaves exactly one node; MERGE carries the
/// idempotence.
pub fn merge_node_query(label: &str, tag: &str, key_property: &str) -> ImportResult<String> {
    let node = node_pattern("n", label, tag, key_property, "value")?;
    Ok(format!("MERGE {node}"))
}

/// Relationship type for an anchor -> other pair, source column first.
pub fn relationship_type(anchor: &str, other: &str) -> String {
    format!("{anchor}_{other}")
}

/// Match two categorical nodes and create a directed relationship from
/// anchor to other, attaching the row's numeric properties from the
/// `$props` map parameter.
pub fn link_query(
    anchor: &str,
    other: &str,
    tag: &str,
    key_property: &str,
) -> ImportResult<String> {
    let a = node_pattern("a", anchor, tag, key_property, "a_value")?;
    let b = node_pattern("b", other, tag, key_property, "b_value")?;
    let rel = relationship_type(anchor, other);
    Ok(format!(
        "MATCH {a} MATCH {b} CREATE (a)-[r:`{rel}`]->(b) SET r += $props"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn node_pattern_quotes_and_parameterizes() {
        let pattern = node_pattern("n", "REGION", "Import", "value", "value").unwrap();
        assert_eq!(pattern, "(n:`REGION`:`Import` { value: $value })");
    }

    #[test]
    fn merge_node_query_uses_merge_semantics() {
        let query = merge_node_query("REGION", "Import", "value").unwrap();
        assert_eq!(query, "MERGE (n:`REGION`:`Import` { value: $value })");
    }

    #[test]
    fn link_query_names_relationship_anchor_first() {
        let query = link_query("REGION", "CITY", "Import", "value").unwrap();
        assert_eq!(
            query,
            "MATCH (a:`REGION`:`Import` { value: $a_value }) \
             MATCH (b:`CITY`:`Import` { value: $b_value }) \
             CREATE (a)-[r:`REGION_CITY`]->(b) SET r += $props"
        );
    }

    #[test]
    fn hostile_labels_are_rejected() {
        let injected = "REGION` { }) DETACH DELETE n //";
        assert!(matches!(
            merge_node_query(injected, "Import", "value"),
            Err(ImportError::InvalidLabel(_))
        ));
        assert!(matches!(
            link_query("REGION", injected, "Import", "value"),
            Err(ImportError::InvalidLabel(_))
        ));
    }

    #[test]
    fn tag_and_key_property_are_validated_too() {
        assert!(merge_node_query("REGION", "bad tag", "value").is_err());
        assert!(merge_node_query("REGION", "Import", "va lue").is_err());
    }
}
