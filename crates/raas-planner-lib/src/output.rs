use std::fmt::Write;

use serde::Serialize;

use crate::classify::{Category, PlanView, PointStatus, Tier};
use crate::graph::Position;

/// Display colour for a category.
pub fn category_color(category: Category) -> &'static str {
    match category {
        Category::MainBase => "rgb(0,0,0)",
        Category::Confirmed => "rgb(0,255,13)",
        Category::Impossible => "rgb(145,145,145)",
        Category::Active => "rgb(176,255,148)",
        Category::MidPoint => "rgb(186,0,255)",
        Category::DefPoint => "rgb(0,55,255)",
        Category::OffPoint => "rgb(255,0,0)",
        Category::DefOther(Tier::Near) => "rgb(47,182,255)",
        Category::DefOther(Tier::Middle) => "rgb(145,245,220)",
        Category::DefOther(Tier::Far) => "rgb(161,250,186)",
        Category::OffOther(Tier::Near) => "rgb(255,162,92)",
        Category::OffOther(Tier::Middle) => "rgb(252,227,108)",
        Category::OffOther(Tier::Far) => "rgb(253,246,203)",
    }
}

/// Everything the renderer needs to draw one capture point.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PointView {
    pub name: String,
    pub display_name: String,
    pub position: Position,
    pub category: Category,
    pub color_key: &'static str,
    pub color: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth_label: Option<usize>,
    pub lane_depths: Vec<String>,
    /// `false` for impossible points the renderer hides and disables.
    pub visible: bool,
}

/// One link of the confirmation line.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct ChainSegment {
    pub from: Position,
    pub to: Position,
}

/// A lane and whether it is still consistent with the chain.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LaneStatus {
    pub name: String,
    pub possible: bool,
}

/// Renderer-facing state after an event.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Snapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub own_main: Option<String>,
    pub points: Vec<PointView>,
    /// Chain point names from the own main base to the terminus.
    pub chain: Vec<String>,
    pub chain_segments: Vec<ChainSegment>,
    pub lanes: Vec<LaneStatus>,
}

impl Snapshot {
    /// Build the snapshot for the current plan.
    pub fn from_view(view: &PlanView<'_>) -> Self {
        let graph = view.graph();
        let single_lane = graph.lanes().len() == 1;

        let points = graph
            .points()
            .map(|(id, point)| {
                let classification = view.classify(id);
                let is_main = graph.is_main_base(id);
                let lane_depths = if is_main || single_lane {
                    Vec::new()
                } else {
                    view.lane_depth_labels(id)
                };
                PointView {
                    name: point.name.clone(),
                    display_name: point.display_name.clone(),
                    position: point.position,
                    category: classification.category,
                    color_key: classification.category.color_key(),
                    color: category_color(classification.category),
                    depth_label: classification.depth,
                    lane_depths,
                    visible: is_main || view.status(id) != PointStatus::Impossible,
                }
            })
            .collect();

        let line = view.line();
        let chain = line
            .points()
            .map(|id| graph.point(id).name.clone())
            .collect();
        let chain_segments = line
            .links()
            .map(|(from, to)| ChainSegment {
                from: graph.point(from).position,
                to: graph.point(to).position,
            })
            .collect();
        let lanes = graph
            .lanes()
            .iter()
            .map(|lane| LaneStatus {
                name: lane.name.clone(),
                possible: view.is_lane_possible(&lane.name),
            })
            .collect();

        Self {
            own_main: view.own_main().map(|id| graph.point(id).name.clone()),
            points,
            chain,
            chain_segments,
            lanes,
        }
    }

    pub fn point(&self, name: &str) -> Option<&PointView> {
        self.points.iter().find(|point| point.name == name)
    }

    /// Plain-text table of the snapshot.
    pub fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Own main: {}",
            self.own_main.as_deref().unwrap_or("<none>")
        );
        let lanes = self
            .lanes
            .iter()
            .map(|lane| {
                let state = if lane.possible { "possible" } else { "impossible" };
                format!("{} ({})", lane.name, state)
            })
            .collect::<Vec<_>>()
            .join(", ");
        let _ = writeln!(buffer, "Lanes: {lanes}");
        if self.chain.len() > 1 {
            let _ = writeln!(buffer, "Chain: {}", self.chain.join(" -> "));
        }

        for point in &self.points {
            let depth = point
                .depth_label
                .map(|depth| depth.to_string())
                .unwrap_or_default();
            let _ = writeln!(
                buffer,
                "{:<24} {:<12} {:>3} {}",
                point.display_name,
                point.color_key,
                depth,
                point.lane_depths.join(" ")
            );
        }

        buffer
    }
}
