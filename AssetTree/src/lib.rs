//! # AssetTree
//!
//! A pure-Rust engine that turns two flat collections of records, locations
//! and assets/components, into a navigable forest for display and selection.
//!
//! ## Overview
//!
//! - **Node registry** - identifier to attribute bag
//! - **Edge registry** - parent identifier to its set of direct children
//! - **Forest builder** - root derivation, recursive subtree construction,
//!   predicate filtering with back-traced whole-root trees
//! - **Ordering** - branches before leaves, then natural names ignoring case and accents
//!
//! ## Quick Start
//!
//! ```
//! use assettree::prelude::*;
//!
//! let locations: Vec<SourceRecord> = serde_json::from_str(
//!     r#"[{ "id": "L1", "name": "Plant" }]"#,
//! )?;
//! let assets: Vec<SourceRecord> = serde_json::from_str(
//!     r#"[
//!         { "id": "A1", "name": "Motor", "parentId": "L1" },
//!         { "id": "C1", "name": "Sensor", "parentId": "A1", "sensorId": "S1" }
//!     ]"#,
//! )?;
//!
//! let graph = HierarchyGraph::from_records(locations, assets);
//! let forest = graph.build_tree()?;
//!
//! assert_eq!(forest.len(), 1);
//! assert_eq!(forest[0].id, "L1");
//! assert_eq!(forest[0].children[0].children[0].attributes.kind, Some(NodeKind::Component));
//! # Ok::<(), assettree::Error>(())
//! ```
//!
//! ### Filtering
//!
//! Filtering selects which whole root trees are visible. Every root that owns
//! at least one matching node is returned with its complete subtree:
//!
//! ```
//! use assettree::prelude::*;
//!
//! let mut graph = HierarchyGraph::new();
//! graph.set_node("R", Some(Attributes::named("Root")));
//! graph.set_node("A", Some(Attributes::named("Pump").with_parent("R")));
//! graph.set_node("B", Some(Attributes::named("Fan").with_parent("R")));
//! graph.set_edge("R", "A");
//! graph.set_edge("R", "B");
//!
//! let forest = graph.search(&NodeFilter::default().with_name("pump"))?;
//! assert_eq!(forest[0].children.len(), 2);
//! # Ok::<(), assettree::Error>(())
//! ```

pub mod attributes;
pub mod error;
pub mod filter;
pub mod forest;
pub mod graph;
pub mod ordering;
pub mod records;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::attributes::{AssetStatus, Attributes, NodeKind, SensorType};
    pub use crate::error::{Error, Result};
    pub use crate::filter::NodeFilter;
    pub use crate::forest::{Forest, TreeNode, count_nodes};
    pub use crate::graph::{HierarchyGraph, NodeMap};
    pub use crate::ordering::{natural_cmp, sort_forest};
    pub use crate::records::{SourceRecord, parse_records, read_records};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
