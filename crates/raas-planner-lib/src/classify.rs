//! Point classification for the current confirmation line.
//!
//! A [`PlanView`] is computed once per event: the possible lanes, every
//! point's distance to the own main base and its status are derived eagerly,
//! and classification queries are answered from that snapshot.

use std::cmp::Reverse;
use std::collections::BTreeSet;

use serde::Serialize;

use crate::chain::{possible_lanes, ConfirmationLine};
use crate::graph::{CapturePointGraph, PointId};
use crate::path::{distance, find_lane_path, PathConstraints};

/// Number of graduated OTHER tiers on each side of the def/off depths.
/// Points further away are clamped to the last tier.
pub const MAX_OTHER_TIERS: u32 = 3;

/// Status of a point relative to the confirmation line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PointStatus {
    Possible,
    Confirmed,
    Impossible,
}

/// Distance band of an OTHER point from the nearest def/off depth.
///
/// Ordered so that closer tiers compare greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Far,
    Middle,
    Near,
}

impl Tier {
    fn from_offset(offset: u32) -> Tier {
        match offset.clamp(1, MAX_OTHER_TIERS) {
            1 => Tier::Near,
            2 => Tier::Middle,
            _ => Tier::Far,
        }
    }

    /// 1 for the tier closest to the def/off depth.
    pub fn number(self) -> u8 {
        match self {
            Tier::Near => 1,
            Tier::Middle => 2,
            Tier::Far => 3,
        }
    }
}

/// Role assigned to a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    MainBase,
    Confirmed,
    Impossible,
    Active,
    /// Middle point of a lane with an odd number of points.
    MidPoint,
    /// Last point the own side holds before the middle of the lane.
    DefPoint,
    /// First point past the middle of the lane.
    OffPoint,
    DefOther(Tier),
    OffOther(Tier),
}

impl Category {
    /// Stable identifier the renderer maps to a colour.
    pub fn color_key(self) -> &'static str {
        match self {
            Category::MainBase => "main_base",
            Category::Confirmed => "confirmed",
            Category::Impossible => "impossible",
            Category::Active => "active",
            Category::MidPoint => "mid_point",
            Category::DefPoint => "def_point",
            Category::OffPoint => "off_point",
            Category::DefOther(Tier::Near) => "def_other_1",
            Category::DefOther(Tier::Middle) => "def_other_2",
            Category::DefOther(Tier::Far) => "def_other_3",
            Category::OffOther(Tier::Near) => "off_other_1",
            Category::OffOther(Tier::Middle) => "off_other_2",
            Category::OffOther(Tier::Far) => "off_other_3",
        }
    }
}

/// Rank of a per-lane depth role. OTHER roles rank by their unclamped
/// distance from the def/off depth, closer first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum LanePriority {
    Other(Reverse<u32>),
    OffPoint,
    DefPoint,
    MidPoint,
}

/// Depth role of a point at hop distance `dist` from the own main base on a
/// lane with `lane_length` non-main points.
pub fn lane_role(lane_length: u32, dist: usize) -> Category {
    ranked_lane_role(lane_length, dist).0
}

fn ranked_lane_role(lane_length: u32, dist: usize) -> (Category, LanePriority) {
    let dist = u32::try_from(dist).unwrap_or(u32::MAX);
    let def_depth = lane_length / 2;
    let odd = lane_length % 2 == 1;
    let off_depth = if odd { def_depth + 2 } else { def_depth + 1 };

    if odd && dist == def_depth + 1 {
        (Category::MidPoint, LanePriority::MidPoint)
    } else if dist == def_depth {
        (Category::DefPoint, LanePriority::DefPoint)
    } else if dist == off_depth {
        (Category::OffPoint, LanePriority::OffPoint)
    } else if dist < def_depth {
        let offset = def_depth - dist;
        (
            Category::DefOther(Tier::from_offset(offset)),
            LanePriority::Other(Reverse(offset)),
        )
    } else {
        let offset = dist - off_depth;
        (
            Category::OffOther(Tier::from_offset(offset)),
            LanePriority::Other(Reverse(offset)),
        )
    }
}

/// Category and displayed depth of a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub category: Category,
    pub depth: Option<usize>,
}

/// Derived state for one graph and confirmation line.
#[derive(Debug, Clone)]
pub struct PlanView<'a> {
    graph: &'a CapturePointGraph,
    line: &'a ConfirmationLine,
    constraints: PathConstraints<'a>,
    possible: BTreeSet<String>,
    distances: Vec<Option<usize>>,
    statuses: Vec<PointStatus>,
}

impl<'a> PlanView<'a> {
    pub fn new(graph: &'a CapturePointGraph, line: &'a ConfirmationLine) -> Self {
        let constraints = PathConstraints::for_line(graph, line);
        let possible = possible_lanes(graph, line);

        let distances: Vec<Option<usize>> = graph
            .point_ids()
            .map(|id| {
                line.anchor().and_then(|own_main| {
                    distance(
                        graph,
                        own_main,
                        id,
                        possible.iter().map(String::as_str),
                        &constraints,
                    )
                })
            })
            .collect();

        let statuses = graph
            .point_ids()
            .map(|id| {
                if line.contains(id) {
                    PointStatus::Confirmed
                } else if distances[id.index()].is_none() {
                    PointStatus::Impossible
                } else {
                    PointStatus::Possible
                }
            })
            .collect();

        Self {
            graph,
            line,
            constraints,
            possible,
            distances,
            statuses,
        }
    }

    pub fn graph(&self) -> &'a CapturePointGraph {
        self.graph
    }

    pub fn line(&self) -> &'a ConfirmationLine {
        self.line
    }

    pub fn own_main(&self) -> Option<PointId> {
        self.line.anchor()
    }

    /// Lanes consistent with every confirmed link.
    pub fn possible_lanes(&self) -> &BTreeSet<String> {
        &self.possible
    }

    pub fn is_lane_possible(&self, lane: &str) -> bool {
        self.possible.contains(lane)
    }

    /// Hop distance from the own main base over the possible lanes.
    pub fn distance_to_own_main(&self, id: PointId) -> Option<usize> {
        self.distances[id.index()]
    }

    /// Hop distance from the own main base on a single lane, ignoring
    /// whether that lane is still possible.
    pub fn lane_distance(&self, id: PointId, lane: &str) -> Option<usize> {
        let own_main = self.own_main()?;
        find_lane_path(self.graph, own_main, id, lane, &self.constraints).map(|p| p.hop_count())
    }

    pub fn status(&self, id: PointId) -> PointStatus {
        self.statuses[id.index()]
    }

    /// Whether `id` can be confirmed next: it is possible and neighbours the
    /// chain terminus on a possible lane.
    pub fn is_active(&self, id: PointId) -> bool {
        if self.status(id) != PointStatus::Possible {
            return false;
        }
        self.graph
            .neighbour_lanes(id)
            .filter(|(lane, _)| self.is_lane_possible(lane))
            .flat_map(|(_, neighbours)| neighbours.iter().copied())
            .any(|nb| {
                self.status(nb) == PointStatus::Confirmed && self.line.follower(nb).is_none()
            })
    }

    /// Classify a point for display.
    pub fn classify(&self, id: PointId) -> Classification {
        if self.graph.is_main_base(id) {
            return Classification {
                category: Category::MainBase,
                depth: self.distance_to_own_main(id),
            };
        }

        match self.status(id) {
            PointStatus::Confirmed => {
                return Classification {
                    category: Category::Confirmed,
                    depth: self.distance_to_own_main(id),
                }
            }
            PointStatus::Impossible => {
                return Classification {
                    category: Category::Impossible,
                    depth: None,
                }
            }
            PointStatus::Possible => {}
        }

        if self.is_active(id) {
            return Classification {
                category: Category::Active,
                depth: self.distance_to_own_main(id),
            };
        }

        let mut best: Option<(LanePriority, Classification)> = None;
        for (lane, _) in self.graph.point(id).lane_depths() {
            if !self.is_lane_possible(lane) {
                continue;
            }
            let Some(info) = self.graph.lane(lane) else {
                continue;
            };
            let Some(dist) = self.lane_distance(id, lane) else {
                continue;
            };
            let (category, priority) = ranked_lane_role(info.length(), dist);
            if best.map_or(true, |(current, _)| current < priority) {
                best = Some((
                    priority,
                    Classification {
                        category,
                        depth: Some(dist),
                    },
                ));
            }
        }

        // A possible point has a path on some possible lane, so a candidate
        // always exists; the fallback only guards the invariant.
        best.map(|(_, classification)| classification)
            .unwrap_or(Classification {
                category: Category::Impossible,
                depth: None,
            })
    }

    /// `"<hops><lane initial>"` for every lane of the point that can reach it
    /// from the own main base under the current chain, in lane order.
    pub fn lane_depth_labels(&self, id: PointId) -> Vec<String> {
        self.graph
            .point(id)
            .lane_depths()
            .filter_map(|(lane, _)| {
                let hops = self.lane_distance(id, lane)?;
                let initial = self.graph.lane(lane)?.initial();
                Some(format!("{hops}{initial}"))
            })
            .collect()
    }
}
