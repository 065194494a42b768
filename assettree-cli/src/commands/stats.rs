//! Graph summary

use assettree::attributes::NodeKind;
use assettree::graph::HierarchyGraph;
use indexmap::IndexMap;

#[derive(Debug, Default, PartialEq, Eq)]
struct Summary {
    nodes: usize,
    edges: usize,
    roots: usize,
    by_kind: IndexMap<&'static str, usize>,
    placeholders: usize,
}

fn summarize(graph: &HierarchyGraph) -> Summary {
    let mut summary = Summary {
        nodes: graph.node_count(),
        edges: graph.edge_count(),
        roots: graph.root_ids().len(),
        ..Summary::default()
    };

    for kind in [NodeKind::Location, NodeKind::Asset, NodeKind::Component] {
        summary.by_kind.insert(kind.display_name(), 0);
    }

    for id in graph.node_ids() {
        let Some(attributes) = graph.get_node(id) else {
            continue;
        };
        if attributes.is_empty() {
            summary.placeholders += 1;
        }
        if let Some(kind) = attributes.kind {
            *summary.by_kind.entry(kind.display_name()).or_default() += 1;
        }
    }

    summary
}

pub fn execute(graph: &HierarchyGraph) -> anyhow::Result<()> {
    let summary = summarize(graph);

    println!("Nodes:        {}", summary.nodes);
    println!("Edges:        {}", summary.edges);
    println!("Roots:        {}", summary.roots);
    for (kind, count) in &summary.by_kind {
        println!("  {kind:<12}{count}");
    }
    if summary.placeholders > 0 {
        println!("Placeholders: {}", summary.placeholders);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assettree::records::parse_records;

    #[test]
    fn test_summarize() {
        let locations = parse_records(r#"[{ "id": "L1", "name": "Plant" }]"#).unwrap();
        let assets = parse_records(
            r#"[
                { "id": "A1", "name": "Motor", "parentId": "L1" },
                { "id": "C1", "name": "Tag", "parentId": "A1", "sensorId": "S1" },
                { "id": "A2", "name": "Orphan", "parentId": "ghost" }
            ]"#,
        )
        .unwrap();
        let summary = summarize(&HierarchyGraph::from_records(locations, assets));

        assert_eq!(summary.nodes, 5);
        assert_eq!(summary.edges, 3);
        assert_eq!(summary.roots, 2);
        assert_eq!(summary.placeholders, 1);
        assert_eq!(summary.by_kind["Location"], 1);
        assert_eq!(summary.by_kind["Asset"], 2);
        assert_eq!(summary.by_kind["Component"], 1);
    }
}
