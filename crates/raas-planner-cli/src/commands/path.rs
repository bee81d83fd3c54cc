//! `path` subcommand: per-lane shortest paths from a main base.

use anyhow::{bail, Context, Result};
use clap::Args;
use raas_planner_cli::output::{format_paths, render_json, OutputFormat, PathEntry, PathReport};
use raas_planner_lib::{build_graph, find_lane_paths, PathConstraints, RaasData};

#[derive(Args, Debug)]
pub struct PathArgs {
    /// Map name.
    #[arg(long)]
    pub map: String,
    /// Layer name within the map.
    #[arg(long)]
    pub layer: String,
    /// Main base the search starts from.
    #[arg(long)]
    pub main: String,
    /// Destination point.
    #[arg(long)]
    pub to: String,
    /// Restrict the search to one lane.
    #[arg(long)]
    pub lane: Option<String>,
}

pub fn handle_path(data: &RaasData, args: &PathArgs, format: OutputFormat) -> Result<()> {
    let layer = data.layer(&args.map, &args.layer)?;
    let graph = build_graph(&layer.lanes)
        .with_context(|| format!("invalid lane data in {} / {}", args.map, args.layer))?;

    let source = graph.resolve(&args.main)?;
    let Some(side) = graph.side_of(source) else {
        bail!("{} is not a main base", args.main);
    };
    let target = graph.resolve(&args.to)?;

    let lanes: Vec<&str> = match &args.lane {
        Some(lane) if graph.lane(lane).is_none() => {
            bail!("unknown lane {lane} in {} / {}", args.map, args.layer)
        }
        Some(lane) => vec![lane.as_str()],
        None => graph.lanes().iter().map(|lane| lane.name.as_str()).collect(),
    };

    let constraints = PathConstraints {
        own_side: Some(side),
        line: None,
    };
    let paths = find_lane_paths(&graph, source, target, lanes, &constraints)
        .into_iter()
        .map(|path| PathEntry {
            hops: path.hop_count(),
            steps: path
                .steps
                .iter()
                .map(|id| graph.point(*id).name.clone())
                .collect(),
            lane: path.lane,
        })
        .collect();

    let report = PathReport {
        from: graph.point(source).name.clone(),
        to: graph.point(target).name.clone(),
        paths,
    };
    match format {
        OutputFormat::Text => print!("{}", format_paths(&report)),
        OutputFormat::Json => render_json(&report)?,
    }
    Ok(())
}
