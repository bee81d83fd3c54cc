//! RAAS planner library entry points.
//!
//! This crate turns a layer's lane graph into a deduplicated capture point
//! graph, tracks the player's confirmation line from their own main base and
//! classifies every point against the lanes that remain consistent with it.
//! Front ends (the CLI, map renderers) should drive a [`PlannerSession`] and
//! render its [`Snapshot`] instead of reimplementing behavior.

#![deny(warnings)]

pub mod chain;
pub mod classify;
pub mod error;
pub mod graph;
pub mod layer;
pub mod output;
pub mod path;
pub mod session;

pub use chain::{possible_lanes, ConfirmationLine};
pub use classify::{
    lane_role, Category, Classification, PlanView, PointStatus, Tier, MAX_OTHER_TIERS,
};
pub use error::{Error, Result};
pub use graph::{
    build_graph, CapturePoint, CapturePointGraph, Lane, PointId, Position, Side,
    POINT_MERGE_TOLERANCE,
};
pub use layer::{LaneGraph, LayerData, RaasData, RawPoint};
pub use output::{category_color, ChainSegment, LaneStatus, PointView, Snapshot};
pub use path::{distance, find_lane_path, find_lane_paths, LanePath, PathConstraints};
pub use session::{ClickOutcome, IgnoreReason, PlannerSession};
