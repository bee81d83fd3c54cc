use std::collections::{HashMap, VecDeque};

use serde::Serialize;

use crate::chain::ConfirmationLine;
use crate::graph::{CapturePointGraph, PointId, Side};

/// Pruning rules applied while expanding the search frontier.
#[derive(Debug, Default, Clone, Copy)]
pub struct PathConstraints<'a> {
    /// Side whose main base the search moves away from. Expansion back
    /// toward that base is refused. `None` disables directional pruning.
    pub own_side: Option<Side>,
    /// Confirmed links the search must follow. A point with a follower may
    /// only be left through that follower.
    pub line: Option<&'a ConfirmationLine>,
}

impl<'a> PathConstraints<'a> {
    /// Constraints derived from the confirmation line and its anchor.
    pub fn for_line(graph: &CapturePointGraph, line: &'a ConfirmationLine) -> Self {
        Self {
            own_side: line.anchor().and_then(|anchor| graph.side_of(anchor)),
            line: Some(line),
        }
    }

    fn allows(
        &self,
        graph: &CapturePointGraph,
        lane: &str,
        current: PointId,
        next: PointId,
    ) -> bool {
        if let Some(line) = self.line {
            if let Some(follower) = line.follower(current) {
                if follower != next {
                    return false;
                }
            }
        }

        if let Some(side) = self.own_side {
            let (Some(from), Some(to)) = (
                graph.point(current).depth_on(lane),
                graph.point(next).depth_on(lane),
            ) else {
                return false;
            };
            let moves_back = match side {
                Side::Blufor => from > to,
                Side::Opfor => from < to,
            };
            if moves_back {
                return false;
            }
        }

        true
    }
}

/// Shortest path confined to a single lane.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanePath {
    pub lane: String,
    pub steps: Vec<PointId>,
}

impl LanePath {
    /// Number of edges in the path.
    pub fn hop_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    pub fn head(&self) -> Option<PointId> {
        self.steps.first().copied()
    }

    pub fn tail(&self) -> Option<PointId> {
        self.steps.last().copied()
    }
}

/// Breadth-first search from `source` to `target` using only edges of `lane`.
///
/// Returns `None` when no path satisfies the constraints.
pub fn find_lane_path(
    graph: &CapturePointGraph,
    source: PointId,
    target: PointId,
    lane: &str,
    constraints: &PathConstraints<'_>,
) -> Option<LanePath> {
    if source == target {
        return Some(LanePath {
            lane: lane.to_string(),
            steps: vec![source],
        });
    }

    let mut parents: HashMap<PointId, Option<PointId>> = HashMap::new();
    let mut queue = VecDeque::new();

    parents.insert(source, None);
    queue.push_back(source);

    while let Some(current) = queue.pop_front() {
        for next in graph.neighbours_on(current, lane) {
            if parents.contains_key(&next) {
                continue;
            }
            if !constraints.allows(graph, lane, current, next) {
                continue;
            }

            parents.insert(next, Some(current));
            if next == target {
                return Some(LanePath {
                    lane: lane.to_string(),
                    steps: reconstruct_path(&parents, source, target),
                });
            }
            queue.push_back(next);
        }
    }

    tracing::trace!(
        "no path on lane {} from {} to {}",
        lane,
        graph.point(source).name,
        graph.point(target).name
    );
    None
}

/// Shortest path per lane, in lane order. Lanes without a path are omitted.
pub fn find_lane_paths<'l, I>(
    graph: &CapturePointGraph,
    source: PointId,
    target: PointId,
    lanes: I,
    constraints: &PathConstraints<'_>,
) -> Vec<LanePath>
where
    I: IntoIterator<Item = &'l str>,
{
    lanes
        .into_iter()
        .filter_map(|lane| find_lane_path(graph, source, target, lane, constraints))
        .collect()
}

/// Minimum hop count from `source` to `target` over `lanes`.
///
/// Each lane is searched on its own so a route can never switch lanes midway.
/// `None` means the target is unreachable on every lane.
pub fn distance<'l, I>(
    graph: &CapturePointGraph,
    source: PointId,
    target: PointId,
    lanes: I,
    constraints: &PathConstraints<'_>,
) -> Option<usize>
where
    I: IntoIterator<Item = &'l str>,
{
    lanes
        .into_iter()
        .filter_map(|lane| find_lane_path(graph, source, target, lane, constraints))
        .map(|path| path.hop_count())
        .min()
}

fn reconstruct_path(
    parents: &HashMap<PointId, Option<PointId>>,
    start: PointId,
    goal: PointId,
) -> Vec<PointId> {
    let mut path = Vec::new();
    let mut current = Some(goal);
    while let Some(node) = current {
        path.push(node);
        if node == start {
            break;
        }
        current = parents.get(&node).copied().flatten();
    }
    path.reverse();
    path
}
