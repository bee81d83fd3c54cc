//! `plan` subcommand: replay clicks against a session and print the result.

use anyhow::{bail, Context, Result};
use clap::Args;
use raas_planner_cli::output::{format_snapshot, render_json, OutputFormat};
use raas_planner_cli::terminal::ColorPalette;
use raas_planner_lib::{ClickOutcome, PlannerSession, RaasData};

#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Map name.
    #[arg(long)]
    pub map: String,
    /// Layer name within the map.
    #[arg(long)]
    pub layer: String,
    /// Main base to plan from.
    #[arg(long)]
    pub main: Option<String>,
    /// Point to click, in order. May be repeated.
    #[arg(long = "click")]
    pub clicks: Vec<String>,
}

pub fn handle_plan(data: &RaasData, args: &PlanArgs, format: OutputFormat) -> Result<()> {
    let layer = data.layer(&args.map, &args.layer)?;
    let mut session = PlannerSession::new(&layer.lanes)
        .with_context(|| format!("invalid lane data in {} / {}", args.map, args.layer))?;

    if let Some(main) = &args.main {
        if let ClickOutcome::Ignored(reason) = session.on_main_base_select(main)? {
            bail!("cannot plan from {main}: {reason:?}");
        }
    }

    for name in &args.clicks {
        match session.on_point_click(name)? {
            ClickOutcome::Ignored(reason) => {
                tracing::warn!("click on {} ignored ({:?})", name, reason);
            }
            outcome => tracing::info!("click on {} -> {:?}", name, outcome),
        }
    }

    let snapshot = session.snapshot();
    match format {
        OutputFormat::Text => print!("{}", format_snapshot(&snapshot, &ColorPalette::detect())),
        OutputFormat::Json => render_json(&snapshot)?,
    }
    Ok(())
}
