use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

use serde::Serialize;

use crate::error::{fuzzy_matches, Error, Result};
use crate::layer::{LaneDepths, LaneGraph};

/// Raw records closer than this (in map units) collapse into a single
/// capture point. Lane intersections are often exported with slightly
/// different coordinates and ids on each lane.
pub const POINT_MERGE_TOLERANCE: f64 = 10.0;

/// Stable arena index of a capture point within one graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PointId(usize);

impl PointId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Map coordinates of a capture point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Position) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// The two factions; each owns one main base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// Owns the depth-0 main base.
    Blufor,
    /// Owns the max-depth main base.
    Opfor,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Blufor => Side::Opfor,
            Side::Opfor => Side::Blufor,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Side::Blufor => "BLUFOR",
            Side::Opfor => "OPFOR",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A deduplicated capture point.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturePoint {
    pub name: String,
    pub display_name: String,
    pub position: Position,
    lane_depths: BTreeMap<String, u32>,
}

impl CapturePoint {
    fn new(name: &str, display_name: &str, position: Position) -> Self {
        Self {
            name: name.to_string(),
            display_name: display_name.to_string(),
            position,
            lane_depths: BTreeMap::new(),
        }
    }

    /// Depth of this point on `lane`, if it belongs to it.
    pub fn depth_on(&self, lane: &str) -> Option<u32> {
        self.lane_depths.get(lane).copied()
    }

    /// Lanes this point belongs to with its depth on each, in lane order.
    pub fn lane_depths(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.lane_depths
            .iter()
            .map(|(lane, depth)| (lane.as_str(), *depth))
    }

    fn matches(&self, name: &str, position: &Position) -> bool {
        self.name == name || self.position.distance_to(position) < POINT_MERGE_TOLERANCE
    }
}

/// A named lane running from the BLUFOR main (depth 0) to the OPFOR main
/// (depth `max_depth`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lane {
    pub name: String,
    pub max_depth: u32,
}

impl Lane {
    /// Number of non-main capture points on the lane.
    pub fn length(&self) -> u32 {
        self.max_depth - 1
    }

    /// Single-character tag used in per-lane depth labels.
    pub fn initial(&self) -> char {
        self.name.chars().next().unwrap_or('?')
    }
}

/// Deduplicated capture points with per-lane adjacency.
///
/// Points live in an arena addressed by [`PointId`]. Edges exist only between
/// two points of the same lane whose depths differ by exactly one.
#[derive(Debug, Clone)]
pub struct CapturePointGraph {
    points: Vec<CapturePoint>,
    neighbours: Vec<BTreeMap<String, BTreeSet<PointId>>>,
    lanes: Vec<Lane>,
    name_to_id: HashMap<String, PointId>,
    blufor_main: PointId,
    opfor_main: PointId,
}

impl CapturePointGraph {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn point(&self, id: PointId) -> &CapturePoint {
        &self.points[id.0]
    }

    pub fn point_ids(&self) -> impl Iterator<Item = PointId> {
        (0..self.points.len()).map(PointId)
    }

    pub fn points(&self) -> impl Iterator<Item = (PointId, &CapturePoint)> + '_ {
        self.points
            .iter()
            .enumerate()
            .map(|(index, point)| (PointId(index), point))
    }

    /// Lanes in lexical order.
    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    pub fn lane(&self, name: &str) -> Option<&Lane> {
        self.lanes.iter().find(|lane| lane.name == name)
    }

    pub fn lane_names(&self) -> BTreeSet<String> {
        self.lanes.iter().map(|lane| lane.name.clone()).collect()
    }

    pub fn main_base(&self, side: Side) -> PointId {
        match side {
            Side::Blufor => self.blufor_main,
            Side::Opfor => self.opfor_main,
        }
    }

    /// Which side's main base `id` is, if any.
    pub fn side_of(&self, id: PointId) -> Option<Side> {
        if id == self.blufor_main {
            Some(Side::Blufor)
        } else if id == self.opfor_main {
            Some(Side::Opfor)
        } else {
            None
        }
    }

    pub fn is_main_base(&self, id: PointId) -> bool {
        self.side_of(id).is_some()
    }

    /// Neighbours of `id` restricted to `lane`.
    pub fn neighbours_on<'a>(
        &'a self,
        id: PointId,
        lane: &str,
    ) -> impl Iterator<Item = PointId> + 'a {
        self.neighbours[id.0]
            .get(lane)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    /// All lanes on which `id` has neighbours, with those neighbours.
    pub fn neighbour_lanes(
        &self,
        id: PointId,
    ) -> impl Iterator<Item = (&str, &BTreeSet<PointId>)> + '_ {
        self.neighbours[id.0]
            .iter()
            .map(|(lane, set)| (lane.as_str(), set))
    }

    /// Whether `a` and `b` are depth-adjacent on `lane`.
    pub fn is_neighbour_on(&self, a: PointId, b: PointId, lane: &str) -> bool {
        self.neighbours[a.0]
            .get(lane)
            .is_some_and(|set| set.contains(&b))
    }

    /// Whether `a` and `b` are depth-adjacent on any lane.
    pub fn is_neighbour(&self, a: PointId, b: PointId) -> bool {
        self.neighbours[a.0].values().any(|set| set.contains(&b))
    }

    pub fn find(&self, name: &str) -> Option<PointId> {
        self.name_to_id.get(name).copied()
    }

    /// Resolve a point by name, suggesting close names when it is unknown.
    pub fn resolve(&self, name: &str) -> Result<PointId> {
        self.find(name).ok_or_else(|| Error::UnknownPoint {
            name: name.to_string(),
            suggestions: fuzzy_matches(name, self.points.iter().map(|p| p.name.as_str()), 3),
        })
    }
}

/// Build a capture point graph from a layer's lane graph.
///
/// Raw records merge when their ids match or their positions lie within
/// [`POINT_MERGE_TOLERANCE`]. A record matching several existing points joins
/// the lane on every one of them. A point listed twice on the same lane keeps the
/// last depth seen.
pub fn build_graph(lanes: &LaneGraph) -> Result<CapturePointGraph> {
    if lanes.is_empty() {
        return Err(Error::NoLanes);
    }

    let mut lane_info = Vec::with_capacity(lanes.len());
    for (name, depths) in lanes {
        lane_info.push(validate_lane(name, depths)?);
    }

    let mut points: Vec<CapturePoint> = Vec::new();
    for (lane, depths) in lanes {
        for (&depth, entries) in depths {
            for (id, raw) in entries {
                let position = Position::new(raw.x, raw.y);
                let mut matched: Vec<usize> = points
                    .iter()
                    .enumerate()
                    .filter(|(_, p)| p.matches(id, &position))
                    .map(|(index, _)| index)
                    .collect();
                if matched.is_empty() {
                    points.push(CapturePoint::new(id, &raw.display_name, position));
                    matched.push(points.len() - 1);
                }
                for index in matched {
                    let point = &mut points[index];
                    if let Some(previous) = point.lane_depths.insert(lane.clone(), depth) {
                        if previous != depth {
                            tracing::warn!(
                                "capture point {} listed at depths {} and {} on lane {}; keeping {}",
                                point.name,
                                previous,
                                depth,
                                lane,
                                depth
                            );
                        }
                    }
                }
            }
        }
    }

    let mut neighbours: Vec<BTreeMap<String, BTreeSet<PointId>>> =
        vec![BTreeMap::new(); points.len()];
    let mut blufor_main: Option<PointId> = None;
    let mut opfor_main: Option<PointId> = None;

    for lane in &lane_info {
        let mut by_depth: BTreeMap<u32, Vec<PointId>> = BTreeMap::new();
        for (index, point) in points.iter().enumerate() {
            if let Some(depth) = point.depth_on(&lane.name) {
                by_depth.entry(depth).or_default().push(PointId(index));
            }
        }

        let start = single_main(&lane.name, 0, &by_depth)?;
        let end = single_main(&lane.name, lane.max_depth, &by_depth)?;
        agree_on_main(&mut blufor_main, start, lane, Side::Blufor, &points)?;
        agree_on_main(&mut opfor_main, end, lane, Side::Opfor, &points)?;

        for (depth, here) in &by_depth {
            let Some(next) = by_depth.get(&(depth + 1)) else {
                continue;
            };
            for &a in here {
                for &b in next {
                    neighbours[a.0]
                        .entry(lane.name.clone())
                        .or_default()
                        .insert(b);
                    neighbours[b.0]
                        .entry(lane.name.clone())
                        .or_default()
                        .insert(a);
                }
            }
        }
    }

    let (Some(blufor_main), Some(opfor_main)) = (blufor_main, opfor_main) else {
        return Err(Error::NoLanes);
    };

    let name_to_id = points
        .iter()
        .enumerate()
        .map(|(index, point)| (point.name.clone(), PointId(index)))
        .collect();

    tracing::debug!(
        "built capture point graph: {} points, {} lanes, mains {} / {}",
        points.len(),
        lane_info.len(),
        points[blufor_main.0].name,
        points[opfor_main.0].name
    );

    Ok(CapturePointGraph {
        points,
        neighbours,
        lanes: lane_info,
        name_to_id,
        blufor_main,
        opfor_main,
    })
}

fn validate_lane(name: &str, depths: &LaneDepths) -> Result<Lane> {
    let has_entries = |depth: u32| depths.get(&depth).is_some_and(|e| !e.is_empty());

    if !has_entries(0) {
        return Err(Error::MissingStartDepth {
            lane: name.to_string(),
        });
    }
    let max_depth = depths.keys().next_back().copied().unwrap_or(0);
    if max_depth == 0 {
        return Err(Error::LaneTooShort {
            lane: name.to_string(),
        });
    }
    if !has_entries(max_depth) {
        return Err(Error::MissingEndDepth {
            lane: name.to_string(),
            depth: max_depth,
        });
    }
    if let Some(missing) = (1..max_depth).find(|depth| !has_entries(*depth)) {
        return Err(Error::NonContiguousDepths {
            lane: name.to_string(),
            missing,
        });
    }
    for depth in [0, max_depth] {
        let count = depths[&depth].len();
        if count > 1 {
            return Err(Error::AmbiguousMainBase {
                lane: name.to_string(),
                depth,
                count,
            });
        }
    }

    Ok(Lane {
        name: name.to_string(),
        max_depth,
    })
}

fn single_main(lane: &str, depth: u32, by_depth: &BTreeMap<u32, Vec<PointId>>) -> Result<PointId> {
    match by_depth.get(&depth).map(Vec::as_slice) {
        Some([only]) => Ok(*only),
        Some(many) if many.len() > 1 => Err(Error::AmbiguousMainBase {
            lane: lane.to_string(),
            depth,
            count: many.len(),
        }),
        _ if depth == 0 => Err(Error::MissingStartDepth {
            lane: lane.to_string(),
        }),
        _ => Err(Error::MissingEndDepth {
            lane: lane.to_string(),
            depth,
        }),
    }
}

fn agree_on_main(
    slot: &mut Option<PointId>,
    found: PointId,
    lane: &Lane,
    side: Side,
    points: &[CapturePoint],
) -> Result<()> {
    match *slot {
        None => {
            *slot = Some(found);
            Ok(())
        }
        Some(expected) if expected == found => Ok(()),
        Some(expected) => Err(Error::ConflictingMainBase {
            lane: lane.name.clone(),
            side: side.label(),
            expected: points[expected.0].name.clone(),
            found: points[found.0].name.clone(),
        }),
    }
}
