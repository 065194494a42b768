//! CLI command for filtered forests

use assettree::attributes::{AssetStatus, SensorType};
use assettree::filter::NodeFilter;
use assettree::forest::count_nodes;
use assettree::graph::HierarchyGraph;

use crate::config::CliConfig;
use crate::render::render_forest;

/// Build the filter from the command-line criteria.
fn build_filter(
    name: Option<&str>,
    status: Option<AssetStatus>,
    sensor: Option<SensorType>,
) -> NodeFilter {
    let mut filter = NodeFilter::default();
    if let Some(name) = name {
        filter = filter.with_name(name);
    }
    if let Some(status) = status {
        filter = filter.with_status(status);
    }
    if let Some(sensor) = sensor {
        filter = filter.with_sensor_type(sensor);
    }
    filter
}

pub fn execute(
    graph: &HierarchyGraph,
    config: &CliConfig,
    name: Option<&str>,
    status: Option<AssetStatus>,
    sensor: Option<SensorType>,
    json: bool,
) -> anyhow::Result<()> {
    let filter = build_filter(name, status, sensor);
    let forest = graph.search(&filter)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&forest)?);
        return Ok(());
    }

    if forest.is_empty() {
        println!("No matching nodes");
        return Ok(());
    }

    print!("{}", render_forest(&forest, config.display));
    println!();
    println!(
        "{} root tree(s), {} node(s) shown",
        forest.len(),
        count_nodes(&forest)
    );

    Ok(())
}
