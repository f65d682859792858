//! Node and element tables for the bridge model.
//!
//! Each source file is a JSON document holding exactly one object that maps
//! integer ids to fixed-size tuples:
//!
//! ```json
//! { "1": [0.0, 0.0, 0.0], "2": [5.0, 0.0, 0.0] }
//! ```
//!
//! Elements map to `[start_node, end_node]`. Anything else fails closed with
//! [`DiagramError::ConfigLoadError`].

use crate::domain::model::{Coordinate, ElementId, NodeId};
use crate::utils::error::{DiagramError, Result};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub struct Topology {
    nodes: BTreeMap<NodeId, Coordinate>,
    elements: BTreeMap<ElementId, (NodeId, NodeId)>,
}

impl Topology {
    pub fn new(
        nodes: BTreeMap<NodeId, Coordinate>,
        elements: BTreeMap<ElementId, (NodeId, NodeId)>,
    ) -> Self {
        Self { nodes, elements }
    }

    /// Loads both tables; either both succeed or the whole call fails.
    pub fn load<P: AsRef<Path>, Q: AsRef<Path>>(nodes_path: P, elements_path: Q) -> Result<Self> {
        let nodes = load_nodes(nodes_path)?;
        let elements = load_elements(elements_path)?;

        tracing::info!(
            "Node and element data loaded successfully ({} nodes, {} elements)",
            nodes.len(),
            elements.len()
        );
        for (id, [x, y, z]) in nodes.iter().take(5) {
            tracing::debug!("node {}: ({}, {}, {})", id, x, y, z);
        }
        for (id, (start, end)) in elements.iter().take(5) {
            tracing::debug!("element {}: {} -> {}", id, start, end);
        }

        Ok(Self::new(nodes, elements))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    pub fn node(&self, id: NodeId) -> Result<Coordinate> {
        self.nodes
            .get(&id)
            .copied()
            .ok_or_else(|| DiagramError::lookup(format!("node {} is not defined in the topology", id)))
    }

    pub fn element_nodes(&self, id: ElementId) -> Result<(NodeId, NodeId)> {
        self.elements.get(&id).copied().ok_or_else(|| {
            DiagramError::lookup(format!("element {} is not defined in the topology", id))
        })
    }

    /// Start and end coordinates of an element.
    pub fn element_endpoints(&self, id: ElementId) -> Result<(Coordinate, Coordinate)> {
        let (start, end) = self.element_nodes(id)?;
        let start = self.node(start).map_err(|_| {
            DiagramError::lookup(format!(
                "node {} (start of element {}) is not defined in the topology",
                start, id
            ))
        })?;
        let end = self.node(end).map_err(|_| {
            DiagramError::lookup(format!(
                "node {} (end of element {}) is not defined in the topology",
                end, id
            ))
        })?;
        Ok((start, end))
    }
}

pub fn load_nodes<P: AsRef<Path>>(path: P) -> Result<BTreeMap<NodeId, Coordinate>> {
    load_mapping(path.as_ref(), "node")
}

pub fn load_elements<P: AsRef<Path>>(path: P) -> Result<BTreeMap<ElementId, (NodeId, NodeId)>> {
    load_mapping(path.as_ref(), "element")
}

fn load_mapping<V: DeserializeOwned>(path: &Path, kind: &str) -> Result<BTreeMap<u32, V>> {
    let display = path.display().to_string();
    let content = std::fs::read_to_string(path)
        .map_err(|e| DiagramError::config_load(&display, format!("cannot read file: {}", e)))?;
    parse_mapping(&content, kind).map_err(|message| DiagramError::config_load(&display, message))
}

/// Parses a single JSON object of `id -> tuple`; the error is a plain message
/// so the caller can attach the source path.
fn parse_mapping<V: DeserializeOwned>(
    content: &str,
    kind: &str,
) -> std::result::Result<BTreeMap<u32, V>, String> {
    let value: serde_json::Value =
        serde_json::from_str(content).map_err(|e| format!("not valid JSON: {}", e))?;

    if !value.is_object() {
        return Err(format!(
            "expected a single object mapping {} ids to tuples",
            kind
        ));
    }

    let mapping: BTreeMap<u32, V> = serde_json::from_str(content)
        .map_err(|e| format!("{} table does not match the expected schema: {}", kind, e))?;

    if mapping.is_empty() {
        return Err(format!("{} table is empty", kind));
    }

    Ok(mapping)
}
