//! The confirmation line: the attack sequence declared by the player.
//!
//! The line is a singly linked chain of `follower` links starting at the
//! selected own main base. Each point has at most one follower, and every
//! link joins two points that are neighbours on at least one lane.

use std::collections::BTreeSet;

use crate::graph::{CapturePointGraph, PointId};

/// Follower links anchored at the own main base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationLine {
    anchor: Option<PointId>,
    followers: Vec<Option<PointId>>,
}

impl ConfirmationLine {
    /// Empty, un-anchored line for a graph with `point_count` points.
    pub fn new(point_count: usize) -> Self {
        Self {
            anchor: None,
            followers: vec![None; point_count],
        }
    }

    /// Empty line anchored at `anchor`.
    pub fn anchored(point_count: usize, anchor: PointId) -> Self {
        Self {
            anchor: Some(anchor),
            followers: vec![None; point_count],
        }
    }

    /// The own main base the chain starts from, if one has been selected.
    pub fn anchor(&self) -> Option<PointId> {
        self.anchor
    }

    pub fn follower(&self, id: PointId) -> Option<PointId> {
        self.followers.get(id.index()).copied().flatten()
    }

    /// Points on the chain from the anchor to the terminus.
    pub fn points(&self) -> ChainIter<'_> {
        ChainIter {
            line: self,
            next: self.anchor,
            remaining: self.followers.len(),
        }
    }

    /// `(from, to)` links in chain order.
    pub fn links(&self) -> impl Iterator<Item = (PointId, PointId)> + '_ {
        self.points()
            .filter_map(|from| self.follower(from).map(|to| (from, to)))
    }

    /// Number of confirmed links.
    pub fn len(&self) -> usize {
        self.links().count()
    }

    pub fn is_empty(&self) -> bool {
        self.anchor.and_then(|anchor| self.follower(anchor)).is_none()
    }

    /// Last point of the chain: the anchor itself while nothing is confirmed.
    pub fn terminus(&self) -> Option<PointId> {
        self.points().last()
    }

    pub fn contains(&self, id: PointId) -> bool {
        self.points().any(|point| point == id)
    }

    /// The chain point whose follower is `id`.
    pub fn predecessor(&self, id: PointId) -> Option<PointId> {
        self.points().find(|point| self.follower(*point) == Some(id))
    }

    /// Clear every follower link, keeping the anchor.
    pub fn reset(&mut self) {
        self.followers.iter_mut().for_each(|follower| *follower = None);
    }

    /// Move the anchor and clear the chain.
    pub(crate) fn reanchor(&mut self, anchor: Option<PointId>) {
        self.anchor = anchor;
        self.reset();
    }

    /// Append `id` after the current terminus.
    ///
    /// Refused when there is no anchor, when `id` is already on the chain, or
    /// when `id` is not a neighbour of the terminus on any lane.
    pub(crate) fn confirm(&mut self, graph: &CapturePointGraph, id: PointId) -> bool {
        let Some(terminus) = self.terminus() else {
            return false;
        };
        if self.contains(id) || !graph.is_neighbour(terminus, id) {
            return false;
        }
        self.followers[terminus.index()] = Some(id);
        true
    }

    /// Remove the link ending at `id`. Only the terminus can be removed.
    pub(crate) fn unconfirm(&mut self, id: PointId) -> bool {
        if self.follower(id).is_some() {
            return false;
        }
        match self.predecessor(id) {
            Some(previous) => {
                self.followers[previous.index()] = None;
                true
            }
            None => false,
        }
    }
}

/// Walks the chain from the anchor, bounded by the point count.
pub struct ChainIter<'a> {
    line: &'a ConfirmationLine,
    next: Option<PointId>,
    remaining: usize,
}

impl Iterator for ChainIter<'_> {
    type Item = PointId;

    fn next(&mut self) -> Option<PointId> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.next?;
        self.remaining -= 1;
        self.next = self.line.follower(current);
        Some(current)
    }
}

/// Lanes consistent with every confirmed link.
///
/// Starts from all lanes and, for each link `cur -> follower`, drops every
/// lane on which the two points are not depth-adjacent neighbours. The set
/// only shrinks as the chain grows.
pub fn possible_lanes(graph: &CapturePointGraph, line: &ConfirmationLine) -> BTreeSet<String> {
    let mut possible = graph.lane_names();
    for (from, to) in line.links() {
        possible.retain(|lane| graph.is_neighbour_on(from, to, lane));
    }
    possible
}
