//! Planner session: one graph, one confirmation line, no shared state.
//!
//! Every external event (a click, a main base selection, a reset or a layer
//! change) runs to completion against the session. Derived state is
//! recomputed from scratch through [`PlannerSession::evaluate`].

use serde::Serialize;

use crate::chain::ConfirmationLine;
use crate::classify::{PlanView, PointStatus};
use crate::error::Result;
use crate::graph::{build_graph, CapturePointGraph, PointId, Side};
use crate::layer::LaneGraph;
use crate::output::Snapshot;

/// Why a click left the session unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreReason {
    /// The point is the currently selected own main base.
    OwnMainBase,
    /// No possible lane reaches the point.
    Impossible,
    /// The point is possible but does not neighbour the chain terminus.
    NotActive,
    /// The point is confirmed and has a follower.
    MidChain,
    /// A main base selection named a point that is not a main base.
    NotMainBase,
}

/// Effect of a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClickOutcome {
    /// The own main base switched to this side and the chain was reset.
    MainBaseSelected(Side),
    /// The point was appended to the chain.
    Confirmed,
    /// The point was removed from the end of the chain.
    Unconfirmed,
    Ignored(IgnoreReason),
}

/// A graph with the player's confirmation line.
#[derive(Debug, Clone)]
pub struct PlannerSession {
    graph: CapturePointGraph,
    line: ConfirmationLine,
}

impl PlannerSession {
    /// Build a session for a layer. No own main base is selected yet.
    pub fn new(lanes: &LaneGraph) -> Result<Self> {
        Ok(Self::from_graph(build_graph(lanes)?))
    }

    pub fn from_graph(graph: CapturePointGraph) -> Self {
        let line = ConfirmationLine::new(graph.len());
        Self { graph, line }
    }

    /// Replace the graph with one built from `lanes`.
    ///
    /// The new graph is built completely before the swap; on error the
    /// session keeps its previous graph and chain.
    pub fn load_layer(&mut self, lanes: &LaneGraph) -> Result<()> {
        let graph = build_graph(lanes)?;
        *self = Self::from_graph(graph);
        tracing::debug!("loaded layer with {} capture points", self.graph.len());
        Ok(())
    }

    pub fn graph(&self) -> &CapturePointGraph {
        &self.graph
    }

    pub fn line(&self) -> &ConfirmationLine {
        &self.line
    }

    pub fn own_main(&self) -> Option<PointId> {
        self.line.anchor()
    }

    pub fn own_side(&self) -> Option<Side> {
        self.own_main().and_then(|id| self.graph.side_of(id))
    }

    /// Derived state for the current chain.
    pub fn evaluate(&self) -> PlanView<'_> {
        PlanView::new(&self.graph, &self.line)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_view(&self.evaluate())
    }

    /// Click a point by name. Only unknown names are errors; clicks the
    /// transition table does not allow are reported as ignored.
    pub fn on_point_click(&mut self, name: &str) -> Result<ClickOutcome> {
        let id = self.graph.resolve(name)?;
        Ok(self.click(id))
    }

    /// Select an own main base by name.
    pub fn on_main_base_select(&mut self, name: &str) -> Result<ClickOutcome> {
        let id = self.graph.resolve(name)?;
        if !self.graph.is_main_base(id) {
            tracing::debug!("ignoring main base selection of {}", name);
            return Ok(ClickOutcome::Ignored(IgnoreReason::NotMainBase));
        }
        Ok(self.click(id))
    }

    /// Clear the chain, keeping the own main base.
    pub fn on_reset(&mut self) {
        self.line.reset();
        tracing::debug!("confirmation line reset");
    }

    /// Apply the click transition table to `id`.
    pub fn click(&mut self, id: PointId) -> ClickOutcome {
        let outcome = self.transition(id);
        tracing::debug!(
            "click on {} -> {:?}",
            self.graph.point(id).name,
            outcome
        );
        outcome
    }

    fn transition(&mut self, id: PointId) -> ClickOutcome {
        if self.own_main() == Some(id) {
            return ClickOutcome::Ignored(IgnoreReason::OwnMainBase);
        }
        if let Some(side) = self.graph.side_of(id) {
            self.line.reanchor(Some(id));
            return ClickOutcome::MainBaseSelected(side);
        }

        let (status, active) = {
            let view = self.evaluate();
            (view.status(id), view.is_active(id))
        };

        match status {
            PointStatus::Impossible => ClickOutcome::Ignored(IgnoreReason::Impossible),
            PointStatus::Possible if !active => ClickOutcome::Ignored(IgnoreReason::NotActive),
            PointStatus::Possible => {
                if self.line.confirm(&self.graph, id) {
                    ClickOutcome::Confirmed
                } else {
                    ClickOutcome::Ignored(IgnoreReason::NotActive)
                }
            }
            PointStatus::Confirmed if self.line.follower(id).is_some() => {
                ClickOutcome::Ignored(IgnoreReason::MidChain)
            }
            PointStatus::Confirmed => {
                if self.line.unconfirm(id) {
                    ClickOutcome::Unconfirmed
                } else {
                    ClickOutcome::Ignored(IgnoreReason::MidChain)
                }
            }
        }
    }
}
