//! `maps` subcommand: list the maps and layers in the data file.

use anyhow::Result;
use raas_planner_cli::output::{format_maps, render_json, MapListing, OutputFormat};
use raas_planner_lib::RaasData;

pub fn handle_maps(data: &RaasData, format: OutputFormat) -> Result<()> {
    let maps: Vec<MapListing> = data
        .maps()
        .into_iter()
        .map(|(name, layers)| MapListing {
            name: name.to_string(),
            layers: layers.into_iter().map(str::to_string).collect(),
        })
        .collect();

    match format {
        OutputFormat::Text => print!("{}", format_maps(&maps)),
        OutputFormat::Json => render_json(&maps)?,
    }
    Ok(())
}
