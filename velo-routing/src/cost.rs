//! Edge cost models for the route computer

use tracing::warn;
use velo_common::{Error, Result};
use velo_io::{AttributeSet, EdgeId, NodeId};

use crate::graph::Graph;

/// Cost of leaving `node_id` through `edge_id`.
///
/// Costs are non-negative; `f64::INFINITY` forbids the edge. NaN and negative
/// values are treated as forbidden by the search.
pub trait CostFunction: Send + Sync {
    fn edge_cost(&self, node_id: NodeId, edge_id: EdgeId) -> f64;

    /// Lower bound on the cost of travelling one meter in a straight line.
    ///
    /// A positive bound turns the search into A*. It must not exceed the real
    /// cost per meter of any edge, or routes may come out suboptimal.
    fn min_cost_per_meter(&self) -> f64 {
        0.0
    }
}

impl<F> CostFunction for F
where
    F: Fn(NodeId, EdgeId) -> f64 + Send + Sync,
{
    fn edge_cost(&self, node_id: NodeId, edge_id: EdgeId) -> f64 {
        self(node_id, edge_id)
    }
}

/// Shortest route: cost is the edge length.
#[derive(Debug, Clone, Copy)]
pub struct DistanceCost<'g> {
    graph: &'g Graph,
}

impl<'g> DistanceCost<'g> {
    pub fn new(graph: &'g Graph) -> Self {
        Self { graph }
    }
}

impl CostFunction for DistanceCost<'_> {
    fn edge_cost(&self, _node_id: NodeId, edge_id: EdgeId) -> f64 {
        forbid_on_error(edge_id, self.graph.edge_length(edge_id))
    }

    fn min_cost_per_meter(&self) -> f64 {
        1.0
    }
}

/// Cycling cost: length plus a penalty per meter climbed, with edges whose
/// attributes intersect `forbidden` ruled out.
#[derive(Debug, Clone, Copy)]
pub struct ClimbingCost<'g> {
    graph: &'g Graph,
    climb_weight: f64,
    forbidden: AttributeSet,
}

impl<'g> ClimbingCost<'g> {
    pub fn new(graph: &'g Graph, climb_weight: f64, forbidden: AttributeSet) -> Result<Self> {
        if !(climb_weight >= 0.0) || climb_weight.is_infinite() {
            return Err(Error::invalid_argument(format!(
                "climb weight must be finite and non-negative, got {climb_weight}"
            )));
        }
        Ok(Self {
            graph,
            climb_weight,
            forbidden,
        })
    }

    fn cost(&self, edge_id: EdgeId) -> Result<f64> {
        if self.graph.edge_attributes(edge_id)?.intersects(self.forbidden) {
            return Ok(f64::INFINITY);
        }
        let length = self.graph.edge_length(edge_id)?;
        let gain = self.graph.edge_elevation_gain(edge_id)?;
        Ok(self.climb_weight.mul_add(gain, length))
    }
}

impl CostFunction for ClimbingCost<'_> {
    fn edge_cost(&self, _node_id: NodeId, edge_id: EdgeId) -> f64 {
        forbid_on_error(edge_id, self.cost(edge_id))
    }

    fn min_cost_per_meter(&self) -> f64 {
        1.0
    }
}

// Unreadable edge records are skipped by the search, but never silently.
fn forbid_on_error(edge_id: EdgeId, cost: Result<f64>) -> f64 {
    cost.unwrap_or_else(|err| {
        warn!(edge_id, error = %err, "edge record unreadable, treating edge as forbidden");
        f64::INFINITY
    })
}
