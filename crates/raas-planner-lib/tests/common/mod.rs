//! Common test utilities and fixture helpers.
//!
//! Provides the shared layer data fixture and a small builder for ad-hoc
//! lane graphs used by error-path tests.

use std::path::PathBuf;

use raas_planner_lib::{LaneGraph, PlannerSession, RaasData, RawPoint};

/// Path to the fixtures directory shared with the CLI tests.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// Parsed `sample_layers.json`.
pub fn sample_data() -> RaasData {
    RaasData::from_path(&fixtures_dir().join("sample_layers.json")).expect("fixture loads")
}

/// Two-lane Narva layer: North has three interior points, South two, and
/// both share the Crossroads point at depth 1.
#[allow(dead_code)]
pub fn narva_session() -> PlannerSession {
    let data = sample_data();
    let layer = data.layer("Narva", "RAAS v1").expect("Narva layer");
    PlannerSession::new(&layer.lanes).expect("Narva graph builds")
}

/// Single-lane Gorodok layer with five interior points.
#[allow(dead_code)]
pub fn gorodok_session() -> PlannerSession {
    let data = sample_data();
    let layer = data.layer("Gorodok", "RAAS v1").expect("Gorodok layer");
    PlannerSession::new(&layer.lanes).expect("Gorodok graph builds")
}

/// Builder for hand-written lane graphs.
#[allow(dead_code)]
#[derive(Default)]
pub struct LaneGraphBuilder {
    lanes: LaneGraph,
}

#[allow(dead_code)]
impl LaneGraphBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a point at `depth` on `lane`.
    pub fn point(mut self, lane: &str, depth: u32, id: &str, x: f64, y: f64) -> Self {
        self.lanes
            .entry(lane.to_string())
            .or_default()
            .entry(depth)
            .or_default()
            .insert(
                id.to_string(),
                RawPoint {
                    display_name: id.to_string(),
                    x,
                    y,
                },
            );
        self
    }

    /// Add a straight lane whose points are spaced far apart along `y`.
    pub fn straight_lane(mut self, lane: &str, ids: &[&str], y: f64) -> Self {
        let last = ids.len().saturating_sub(1);
        for (depth, id) in ids.iter().enumerate() {
            let y = if depth == 0 || depth == last { 0.0 } else { y };
            self = self.point(lane, depth as u32, id, depth as f64 * 1000.0, y);
        }
        self
    }

    pub fn build(self) -> LaneGraph {
        self.lanes
    }
}
