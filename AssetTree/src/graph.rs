//! Node and edge registries
//!
//! [`HierarchyGraph`] owns two flat stores: identifier to attribute bag, and
//! parent identifier to the set of its direct children. Both keep insertion
//! order so that everything derived from them is deterministic. Forest
//! construction lives in [`crate::forest`] and only ever reads these stores.

use std::collections::{HashMap, HashSet};

use indexmap::{IndexMap, IndexSet};

use crate::attributes::Attributes;
use crate::error::{Error, Result};

/// Flat id to attribute bag mapping, in registration order.
pub type NodeMap = IndexMap<String, Attributes>;

/// The hierarchy graph: node registry plus edge registry.
#[derive(Debug, Clone, Default)]
pub struct HierarchyGraph {
    pub(crate) nodes: NodeMap,
    pub(crate) edges: IndexMap<String, IndexSet<String>>,
    /// Most recent parent recorded for each child, used to report re-parenting.
    parent_index: HashMap<String, String>,
}

impl HierarchyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Membership test.
    pub fn has_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Independent copy of a node's attribute bag, or `None` for unknown ids.
    pub fn get_node(&self, id: &str) -> Option<Attributes> {
        self.nodes.get(id).cloned()
    }

    /// Insert or replace the bag for `id`. `None` registers an empty bag.
    ///
    /// Replacing keeps the node's original registration position.
    pub fn set_node(&mut self, id: impl Into<String>, attributes: Option<Attributes>) {
        self.nodes.insert(id.into(), attributes.unwrap_or_default());
    }

    /// Record `child_id` as a direct child of `parent_id`.
    ///
    /// Idempotent: the child set of a parent is a true set.
    pub fn set_edge(&mut self, parent_id: impl Into<String>, child_id: impl Into<String>) {
        let parent_id = parent_id.into();
        let child_id = child_id.into();

        if let Some(previous) = self.parent_index.insert(child_id.clone(), parent_id.clone())
            && previous != parent_id
        {
            tracing::warn!(
                "Node '{}' attached under '{}' is already a child of '{}'",
                child_id,
                parent_id,
                previous
            );
        }

        self.edges.entry(parent_id).or_default().insert(child_id);
    }

    /// Number of registered nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of distinct parent to child edges.
    pub fn edge_count(&self) -> usize {
        self.edges.values().map(IndexSet::len).sum()
    }

    /// Registered identifiers in registration order.
    pub fn node_ids(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    /// Direct children of `id` in insertion order. Empty for leaves and unknown ids.
    pub fn children_of(&self, id: &str) -> impl Iterator<Item = &str> {
        self.edges
            .get(id)
            .into_iter()
            .flat_map(|children| children.iter().map(String::as_str))
    }

    /// Whether `id` has at least one registered child.
    pub fn has_children(&self, id: &str) -> bool {
        self.edges.get(id).is_some_and(|children| !children.is_empty())
    }

    /// Identifiers that never appear in any child set, in registration order.
    pub fn root_ids(&self) -> Vec<&str> {
        let children: HashSet<&str> = self
            .edges
            .values()
            .flat_map(|set| set.iter().map(String::as_str))
            .collect();

        self.node_ids().filter(|id| !children.contains(id)).collect()
    }

    /// Walk the `parentId` chain from `id` up to a node without a parent.
    ///
    /// Returns `Ok(None)` if `id`, or any parent on the way, is not registered.
    pub fn find_node_root(&self, id: &str) -> Result<Option<String>> {
        Ok(self.ancestry(id)?.and_then(|mut chain| chain.pop()))
    }

    /// The identifier chain from `id` up to its root, inclusive at both ends.
    ///
    /// Returns `Ok(None)` if `id`, or any parent on the way, is not registered,
    /// and [`Error::CycleDetected`] if the chain revisits a node.
    pub fn ancestry(&self, id: &str) -> Result<Option<Vec<String>>> {
        let mut chain = Vec::new();
        let mut seen = HashSet::new();
        let mut current = id;

        loop {
            let Some(node) = self.nodes.get(current) else {
                return Ok(None);
            };
            if !seen.insert(current) {
                return Err(Error::CycleDetected {
                    id: current.to_string(),
                });
            }
            chain.push(current.to_string());

            match node.parent() {
                Some(parent) => current = parent,
                None => return Ok(Some(chain)),
            }
        }
    }

    /// Every node whose raw bag satisfies `predicate`, in registration order.
    pub fn filter_nodes<F>(&self, predicate: F) -> NodeMap
    where
        F: Fn(&Attributes) -> bool,
    {
        self.nodes
            .iter()
            .filter(|(_, attrs)| predicate(attrs))
            .map(|(id, attrs)| (id.clone(), attrs.clone()))
            .collect()
    }
}
