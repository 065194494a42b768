//! Source records and graph construction
//!
//! Locations and assets arrive as two flat JSON arrays. Each record has an
//! `id`, an optional `parentId`, and any number of other fields, all of
//! which end up in the node's attribute bag.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::attributes::{Attributes, NodeKind};
use crate::error::{Error, Result};
use crate::graph::HierarchyGraph;

/// One flat input record, location or asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceRecord {
    pub id: String,
    #[serde(flatten)]
    pub attributes: Attributes,
}

impl SourceRecord {
    pub fn new(id: impl Into<String>, attributes: Attributes) -> Self {
        Self {
            id: id.into(),
            attributes,
        }
    }
}

/// Parse a JSON array of records.
pub fn parse_records(json: &str) -> Result<Vec<SourceRecord>> {
    Ok(serde_json::from_str(json)?)
}

/// Read a JSON array of records from a file.
pub fn read_records<P: AsRef<Path>>(path: P) -> Result<Vec<SourceRecord>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    let records: Vec<SourceRecord> =
        serde_json::from_str(&content).map_err(|e| Error::InvalidRecords {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    tracing::info!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

impl HierarchyGraph {
    /// Build a graph from the two source collections.
    ///
    /// Locations are registered first, then assets. Assets with a sensor id
    /// are tagged as components, the rest as assets.
    pub fn from_records<L, A>(locations: L, assets: A) -> Self
    where
        L: IntoIterator<Item = SourceRecord>,
        A: IntoIterator<Item = SourceRecord>,
    {
        let mut graph = Self::new();

        for location in locations {
            graph.register_record(location, NodeKind::Location);
        }
        for asset in assets {
            let kind = if asset.attributes.sensor().is_some() {
                NodeKind::Component
            } else {
                NodeKind::Asset
            };
            graph.register_record(asset, kind);
        }

        tracing::debug!(
            "Graph built: {} nodes, {} edges",
            graph.node_count(),
            graph.edge_count()
        );

        graph
    }

    /// Register one record under `kind`, linking it to its parent.
    ///
    /// A parent that has not been registered yet gets an empty placeholder,
    /// which its own record replaces if it arrives later.
    pub fn register_record(&mut self, record: SourceRecord, kind: NodeKind) {
        let SourceRecord { id, mut attributes } = record;
        attributes.kind = Some(kind);
        let parent = attributes.parent().map(str::to_string);

        self.set_node(id.clone(), Some(attributes));

        if let Some(parent) = parent {
            if !self.has_node(&parent) {
                tracing::debug!("Synthesizing placeholder for parent '{}' of '{}'", parent, id);
                self.set_node(parent.clone(), None);
            }
            self.set_edge(parent, id);
        }
    }
}
