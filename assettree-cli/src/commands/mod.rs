use std::path::PathBuf;

use anyhow::Context;
use assettree::attributes::{AssetStatus, SensorType};
use assettree::graph::HierarchyGraph;
use assettree::records::read_records;
use clap::{Args, Subcommand};

use crate::config::CliConfig;

pub mod search;
pub mod show;
pub mod stats;
pub mod tree;

/// Where to read the two record collections from
#[derive(Args, Debug, Clone)]
pub struct DataArgs {
    /// Locations JSON file (overrides [data].locations)
    #[arg(short, long)]
    pub locations: Option<PathBuf>,

    /// Assets JSON file (overrides [data].assets)
    #[arg(short, long)]
    pub assets: Option<PathBuf>,
}

impl DataArgs {
    /// Read both record files and build the hierarchy graph.
    pub fn load_graph(&self, config: &CliConfig) -> anyhow::Result<HierarchyGraph> {
        let locations = self
            .locations
            .clone()
            .or_else(|| config.data.locations.clone())
            .context("No locations file: pass --locations or set [data].locations")?;
        let assets = self
            .assets
            .clone()
            .or_else(|| config.data.assets.clone())
            .context("No assets file: pass --assets or set [data].assets")?;

        let locations = read_records(&locations)
            .with_context(|| format!("Failed to load locations from {}", locations.display()))?;
        let assets = read_records(&assets)
            .with_context(|| format!("Failed to load assets from {}", assets.display()))?;

        Ok(HierarchyGraph::from_records(locations, assets))
    }
}

fn parse_status(s: &str) -> Result<AssetStatus, String> {
    AssetStatus::from_name(s)
        .ok_or_else(|| format!("Invalid status '{s}'. Valid values: operating, alert"))
}

fn parse_sensor(s: &str) -> Result<SensorType, String> {
    SensorType::from_name(s)
        .ok_or_else(|| format!("Invalid sensor type '{s}'. Valid values: energy, vibration"))
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the full forest
    Tree {
        #[command(flatten)]
        data: DataArgs,

        /// Print JSON instead of a text tree
        #[arg(long)]
        json: bool,
    },

    /// Print the whole root trees containing nodes that match a filter
    Search {
        #[command(flatten)]
        data: DataArgs,

        /// Case-insensitive name query
        #[arg(short, long)]
        name: Option<String>,

        /// Status filter (operating, alert)
        #[arg(long, value_parser = parse_status)]
        status: Option<AssetStatus>,

        /// Sensor type filter (energy, vibration)
        #[arg(long, value_parser = parse_sensor)]
        sensor: Option<SensorType>,

        /// Print JSON instead of a text tree
        #[arg(long)]
        json: bool,
    },

    /// Show one node's attributes and its path to the root
    Show {
        #[command(flatten)]
        data: DataArgs,

        /// Node identifier
        #[arg(long)]
        id: String,

        /// Print JSON
        #[arg(long)]
        json: bool,
    },

    /// Print node, edge, root and kind counts
    Stats {
        #[command(flatten)]
        data: DataArgs,
    },
}

impl Commands {
    pub fn execute(&self, config: &CliConfig) -> anyhow::Result<()> {
        match self {
            Commands::Tree { data, json } => tree::execute(&data.load_graph(config)?, config, *json),
            Commands::Search {
                data,
                name,
                status,
                sensor,
                json,
            } => {
                let graph = data.load_graph(config)?;
                search::execute(&graph, config, name.as_deref(), *status, *sensor, *json)
            }
            Commands::Show { data, id, json } => show::execute(&data.load_graph(config)?, id, *json),
            Commands::Stats { data } => stats::execute(&data.load_graph(config)?),
        }
    }
}
