//! Show a single node

use assettree::graph::HierarchyGraph;
use serde_json::json;

pub fn execute(graph: &HierarchyGraph, id: &str, json: bool) -> anyhow::Result<()> {
    // Stale selections are not an error
    let (Some(attributes), Some(mut chain)) = (graph.get_node(id), graph.ancestry(id)?) else {
        println!("Node '{id}' not found");
        return Ok(());
    };
    chain.reverse();

    if json {
        let out = json!({
            "id": id,
            "path": chain,
            "attributes": attributes,
            "children": graph.children_of(id).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("{}", breadcrumb(graph, &chain));
    println!("ID:       {id}");
    if let Some(kind) = attributes.kind {
        println!("Kind:     {}", kind.display_name());
    }
    if let Some(status) = attributes.status {
        println!("Status:   {}", status.as_str());
    }
    if let Some(sensor_type) = attributes.sensor_type {
        println!("Sensor:   {}", sensor_type.as_str());
    }
    if let Some(sensor_id) = attributes.sensor() {
        println!("SensorId: {sensor_id}");
    }
    println!("Children: {}", graph.children_of(id).count());
    println!();
    println!("{}", serde_json::to_string_pretty(&attributes)?);

    Ok(())
}

/// Root-first names joined with " / ", falling back to the id for unnamed nodes.
fn breadcrumb(graph: &HierarchyGraph, chain: &[String]) -> String {
    chain
        .iter()
        .map(|id| {
            graph
                .get_node(id)
                .and_then(|attrs| attrs.name)
                .unwrap_or_else(|| id.clone())
        })
        .collect::<Vec<_>>()
        .join(" / ")
}
