//! Forest construction
//!
//! Every forest-shaped output is assembled from one recursive primitive,
//! [`HierarchyGraph::build_subtree`]. Trees are freshly allocated on every
//! call and never alias the registry, so callers may mutate or drop them
//! freely. Sibling order follows [`crate::ordering`] at every level.
//!
//! Subtrees are built recursively, one stack frame per level, so a parent
//! chain tens of thousands of levels deep can exhaust the thread's stack.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::ser::{self, SerializeMap, Serializer};
use serde::Serialize;
use serde_json::Value;

use crate::attributes::Attributes;
use crate::error::{Error, Result};
use crate::filter::NodeFilter;
use crate::graph::HierarchyGraph;
use crate::ordering::sort_forest;

/// An ordered sequence of root-level trees.
pub type Forest = Vec<TreeNode>;

/// A materialized node: a copy of its attribute bag plus its ordered children.
///
/// Serializes as the flat attribute bag with `id` first and a `children`
/// array only when the node has children. Extra attributes named `id` or
/// `children` are left out so that every key appears once.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    pub id: String,
    pub attributes: Attributes,
    pub children: Vec<TreeNode>,
}

const RESERVED_KEYS: [&str; 2] = ["id", "children"];

impl Serialize for TreeNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let attributes =
            serde_json::to_value(&self.attributes).map_err(<S::Error as ser::Error>::custom)?;
        let Value::Object(fields) = attributes else {
            return Err(ser::Error::custom("attribute bag did not serialize as an object"));
        };

        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("id", &self.id)?;
        for (key, value) in &fields {
            if RESERVED_KEYS.contains(&key.as_str()) {
                tracing::debug!("Not serializing attribute '{}' of '{}': reserved key", key, self.id);
                continue;
            }
            map.serialize_entry(key, value)?;
        }
        if !self.children.is_empty() {
            map.serialize_entry("children", &self.children)?;
        }
        map.end()
    }
}

impl TreeNode {
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Ids of every descendant in depth-first pre-order, excluding this node.
    pub fn descendant_ids(&self) -> Vec<&str> {
        let mut ids = Vec::new();
        let mut stack: Vec<&TreeNode> = self.children.iter().rev().collect();
        while let Some(node) = stack.pop() {
            ids.push(node.id.as_str());
            stack.extend(node.children.iter().rev());
        }
        ids
    }

    /// Depth-first lookup of `id` in this subtree, including this node.
    pub fn find(&self, id: &str) -> Option<&TreeNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    /// Number of nodes in this subtree, including this node.
    pub fn node_count(&self) -> usize {
        1 + count_nodes(&self.children)
    }
}

/// Total number of nodes across all trees of a forest.
pub fn count_nodes(forest: &[TreeNode]) -> usize {
    forest.iter().map(TreeNode::node_count).sum()
}

impl HierarchyGraph {
    /// Build the full subtree rooted at `id`.
    ///
    /// Returns `Ok(None)` for an unregistered id, and
    /// [`Error::CycleDetected`] if the edges below `id` loop back onto a node
    /// already on the current path.
    pub fn build_subtree(&self, id: &str) -> Result<Option<TreeNode>> {
        let Some(attributes) = self.nodes.get(id) else {
            return Ok(None);
        };
        let mut path = HashSet::new();
        self.build_node(id, attributes.clone(), &mut path).map(Some)
    }

    fn build_node<'a>(
        &'a self,
        id: &'a str,
        attributes: Attributes,
        path: &mut HashSet<&'a str>,
    ) -> Result<TreeNode> {
        path.insert(id);

        let mut children = Vec::new();
        for child_id in self.children_of(id) {
            if path.contains(&child_id) {
                return Err(Error::CycleDetected {
                    id: child_id.to_string(),
                });
            }

            let child_attributes = if let Some(attrs) = self.nodes.get(child_id) {
                attrs.clone()
            } else {
                tracing::debug!("Child '{}' of '{}' is not registered, using empty bag", child_id, id);
                Attributes::default()
            };
            children.push(self.build_node(child_id, child_attributes, path)?);
        }

        path.remove(id);
        sort_forest(&mut children);

        Ok(TreeNode {
            id: id.to_string(),
            attributes,
            children,
        })
    }

    /// Build the complete forest: one tree per root, ordered.
    pub fn build_tree(&self) -> Result<Forest> {
        let roots = self.root_ids();

        let mut forest = Vec::with_capacity(roots.len());
        for root in &roots {
            if let Some(tree) = self.build_subtree(root)? {
                forest.push(tree);
            }
        }
        sort_forest(&mut forest);

        tracing::debug!(
            "Built forest: {} roots, {} nodes from {} registered",
            forest.len(),
            count_nodes(&forest),
            self.node_count()
        );

        Ok(forest)
    }

    /// Build the forest of whole root trees that contain any of `matched`.
    ///
    /// Each matched node is traced up to its root and that root's complete,
    /// unpruned subtree is emitted once, however many of its descendants
    /// matched. Matches whose parent chain leads to an unregistered node are
    /// skipped.
    pub fn build_backtraced_tree<I, S>(&self, matched: I) -> Result<Forest>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut trees: IndexMap<String, TreeNode> = IndexMap::new();

        for id in matched {
            let id = id.as_ref();
            if trees.contains_key(id) {
                continue;
            }

            let Some(root) = self.find_node_root(id)? else {
                tracing::debug!("Skipping match '{}': no registered root", id);
                continue;
            };
            if trees.contains_key(&root) {
                continue;
            }

            if let Some(tree) = self.build_subtree(&root)? {
                trees.insert(root, tree);
            }
        }

        let mut forest: Forest = trees.into_values().collect();
        sort_forest(&mut forest);

        Ok(forest)
    }

    /// The forest as filtered by `filter`.
    ///
    /// An empty filter yields the full forest; otherwise the back-traced
    /// forest of every node matching the filter.
    pub fn search(&self, filter: &NodeFilter) -> Result<Forest> {
        if filter.is_empty() {
            return self.build_tree();
        }

        let matched = self.filter_nodes(|attrs| filter.matches(attrs));
        tracing::debug!("Filter matched {} nodes", matched.len());

        self.build_backtraced_tree(matched.keys())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ids(forest: &[TreeNode]) -> Vec<&str> {
        forest.iter().map(|node| node.id.as_str()).collect()
    }

    /// R -> (A, B), B -> (B1), plus a second root S.
    fn sample_graph() -> HierarchyGraph {
        let mut graph = HierarchyGraph::new();
        graph.set_node("R", Some(Attributes::named("Root")));
        graph.set_node("A", Some(Attributes::named("Alpha").with_parent("R")));
        graph.set_node("B", Some(Attributes::named("Beta").with_parent("R")));
        graph.set_node("B1", Some(Attributes::named("Beta one").with_parent("B")));
        graph.set_node("S", Some(Attributes::named("Solo")));
        graph.set_edge("R", "A");
        graph.set_edge("R", "B");
        graph.set_edge("B", "B1");
        graph
    }

    #[test]
    fn test_build_subtree_unknown_is_none() {
        assert!(sample_graph().build_subtree("nope").unwrap().is_none());
    }

    #[test]
    fn test_build_subtree_orders_branches_first() {
        let tree = sample_graph().build_subtree("R").unwrap().unwrap();

        assert_eq!(ids(&tree.children), vec!["B", "A"]);
        assert_eq!(tree.descendant_ids(), vec!["B", "B1", "A"]);
        assert!(!tree.children[1].has_children());
        assert_eq!(tree.node_count(), 4);
    }

    #[test]
    fn test_build_tree_roots() {
        let forest = sample_graph().build_tree().unwrap();

        assert_eq!(ids(&forest), vec!["R", "S"]);
        assert_eq!(count_nodes(&forest), 5);
    }

    #[test]
    fn test_build_tree_empty_graph() {
        assert!(HierarchyGraph::new().build_tree().unwrap().is_empty());
    }

    #[test]
    fn test_tree_is_independent_of_registry() {
        let graph = sample_graph();
        let mut forest = graph.build_tree().unwrap();
        forest[0].attributes.name = Some("Mutated".to_string());
        forest[0].children.clear();

        let again = graph.build_tree().unwrap();
        assert_eq!(again[0].attributes.name.as_deref(), Some("Root"));
        assert_eq!(again[0].children.len(), 2);
        assert_eq!(graph.get_node("R").unwrap().name.as_deref(), Some("Root"));
    }

    #[test]
    fn test_unregistered_child_gets_empty_bag() {
        let mut graph = HierarchyGraph::new();
        graph.set_node("P", Some(Attributes::named("Parent")));
        graph.set_edge("P", "ghost");

        let tree = graph.build_subtree("P").unwrap().unwrap();
        assert_eq!(tree.children[0].id, "ghost");
        assert!(tree.children[0].attributes.is_empty());
    }

    #[test]
    fn test_backtraced_keeps_whole_subtree() {
        let graph = sample_graph();
        let forest = graph.build_backtraced_tree(["A"]).unwrap();

        assert_eq!(ids(&forest), vec!["R"]);
        assert_eq!(forest[0].descendant_ids(), vec!["B", "B1", "A"]);
    }

    #[test]
    fn test_backtraced_deduplicates_roots() {
        let graph = sample_graph();
        let forest = graph.build_backtraced_tree(["A", "B1", "R"]).unwrap();

        assert_eq!(ids(&forest), vec!["R"]);
    }

    #[test]
    fn test_backtraced_skips_unknown_and_sorts() {
        let graph = sample_graph();
        let forest = graph.build_backtraced_tree(["S", "missing", "B1"]).unwrap();

        assert_eq!(ids(&forest), vec!["R", "S"]);
    }

    #[test]
    fn test_subtree_cycle_is_detected() {
        let mut graph = sample_graph();
        graph.set_edge("B1", "B");

        let err = graph.build_subtree("R").unwrap_err();
        assert!(matches!(err, Error::CycleDetected { ref id } if id == "B"));
    }

    #[test]
    fn test_rootless_cycle_is_not_in_forest() {
        let mut graph = HierarchyGraph::new();
        graph.set_node("x", None);
        graph.set_node("y", None);
        graph.set_edge("x", "y");
        graph.set_edge("y", "x");

        assert!(graph.build_tree().unwrap().is_empty());
    }

    #[test]
    fn test_search_empty_filter_is_full_tree() {
        let graph = sample_graph();
        assert_eq!(
            graph.search(&NodeFilter::default()).unwrap(),
            graph.build_tree().unwrap()
        );
    }

    #[test]
    fn test_search_by_name() {
        let graph = sample_graph();
        let forest = graph.search(&NodeFilter::default().with_name("one")).unwrap();
        assert_eq!(ids(&forest), vec!["R"]);

        let none = graph.search(&NodeFilter::default().with_name("zzz")).unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn test_serialize_skips_reserved_extra_keys() {
        let tree = TreeNode {
            id: "A".to_string(),
            attributes: Attributes::named("Alpha")
                .with_field("id", "shadow")
                .with_field("children", 3)
                .with_field("gatewayId", "G1"),
            children: Vec::new(),
        };

        let json = serde_json::to_string(&tree).unwrap();
        assert_eq!(json, r#"{"id":"A","name":"Alpha","gatewayId":"G1"}"#);
    }

    #[test]
    fn test_deep_chain_builds() {
        let mut graph = HierarchyGraph::new();
        graph.set_node("n0", None);
        for i in 1..500 {
            let parent = format!("n{}", i - 1);
            let id = format!("n{i}");
            graph.set_node(id.clone(), Some(Attributes::default().with_parent(parent.clone())));
            graph.set_edge(parent, id);
        }

        let tree = graph.build_subtree("n0").unwrap().unwrap();
        assert_eq!(tree.node_count(), 500);
    }

    #[test]
    fn test_serialize_omits_children_on_leaves() {
        let tree = sample_graph().build_subtree("B").unwrap().unwrap();
        let value = serde_json::to_value(&tree).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "id": "B",
                "name": "Beta",
                "parentId": "R",
                "children": [
                    { "id": "B1", "name": "Beta one", "parentId": "B" }
                ]
            })
        );
    }
}
