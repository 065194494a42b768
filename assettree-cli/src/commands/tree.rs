//! Print the full forest

use assettree::graph::HierarchyGraph;

use crate::config::CliConfig;
use crate::render::render_forest;

pub fn execute(graph: &HierarchyGraph, config: &CliConfig, json: bool) -> anyhow::Result<()> {
    let forest = graph.build_tree()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&forest)?);
    } else if forest.is_empty() {
        println!("No nodes");
    } else {
        print!("{}", render_forest(&forest, config.display));
    }

    Ok(())
}
