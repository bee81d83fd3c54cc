//! Output formatting for planner results.
//!
//! Every subcommand produces a serializable report; this module renders it
//! either as a terminal table or as pretty-printed JSON on stdout.

use std::fmt::Write as _;
use std::io::{self, Write};

use clap::ValueEnum;
use serde::Serialize;

use raas_planner_lib::Snapshot;

use crate::terminal::ColorPalette;

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Maps and their layers.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MapListing {
    pub name: String,
    pub layers: Vec<String>,
}

/// Per-lane shortest paths from a main base to one point.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PathReport {
    pub from: String,
    pub to: String,
    pub paths: Vec<PathEntry>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PathEntry {
    pub lane: String,
    pub hops: usize,
    pub steps: Vec<String>,
}

/// Write any report as pretty JSON followed by a newline.
///
/// # Errors
///
/// Returns an error if JSON serialization or writing fails.
pub fn render_json<T: Serialize>(value: &T) -> io::Result<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer_pretty(&mut stdout, value).map_err(io::Error::other)?;
    stdout.write_all(b"\n")?;
    Ok(())
}

/// Snapshot table with the category column tinted by `palette`.
///
/// With a plain palette this is exactly [`Snapshot::render_plain`].
pub fn format_snapshot(snapshot: &Snapshot, palette: &ColorPalette) -> String {
    let plain = snapshot.render_plain();
    if palette.reset.is_empty() {
        return plain;
    }

    let mut buffer = String::new();
    let header_lines = plain.lines().count().saturating_sub(snapshot.points.len());
    for line in plain.lines().take(header_lines) {
        let _ = writeln!(buffer, "{}{}{}", palette.gray, line, palette.reset);
    }

    for point in &snapshot.points {
        let depth = point
            .depth_label
            .map(|depth| depth.to_string())
            .unwrap_or_default();
        let _ = writeln!(
            buffer,
            "{:<24} {}{:<12}{} {:>3} {}",
            point.display_name,
            palette.category(point.category),
            point.color_key,
            palette.reset,
            depth,
            point.lane_depths.join(" ")
        );
    }
    buffer
}

pub fn format_maps(maps: &[MapListing]) -> String {
    let mut buffer = String::new();
    for map in maps {
        let _ = writeln!(buffer, "{}", map.name);
        for layer in &map.layers {
            let _ = writeln!(buffer, "  - {layer}");
        }
    }
    buffer
}

pub fn format_paths(report: &PathReport) -> String {
    let mut buffer = String::new();
    if report.paths.is_empty() {
        let _ = writeln!(
            buffer,
            "{} is unreachable from {}",
            report.to, report.from
        );
        return buffer;
    }

    let _ = writeln!(buffer, "Paths from {} to {}:", report.from, report.to);
    for path in &report.paths {
        let _ = writeln!(
            buffer,
            "{} ({} hops): {}",
            path.lane,
            path.hops,
            path.steps.join(" -> ")
        );
    }
    buffer
}
