//! Best-route search over a [`Graph`]
//!
//! Dijkstra's algorithm with a binary-heap frontier keyed by accumulated
//! cost. When the cost function reports a positive
//! [`CostFunction::min_cost_per_meter`], the key also includes that bound
//! times the straight-line distance to the destination (A*) and the search
//! settles fewer nodes.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use tracing::{debug, trace};
use velo_common::{Error, Result};
use velo_io::{EdgeId, NodeId};

use crate::cost::CostFunction;
use crate::edge::Edge;
use crate::graph::Graph;
use crate::multi_route::MultiRoute;
use crate::route::Route;
use crate::single_route::SingleRoute;

/// Which of two frontier entries with equal keys is expanded first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TieBreak {
    /// The entry pushed earlier.
    #[default]
    FirstDiscovered,
    /// The entry pushed later.
    LastDiscovered,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchOptions {
    pub tie_break: TieBreak,
}

// Frontier entry. Ordered so that BinaryHeap (a max-heap) pops the lowest key,
// then the highest rank.
#[derive(Debug, Clone, Copy)]
struct Frontier {
    key: f64,
    rank: u64,
    node_id: NodeId,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .key
            .total_cmp(&self.key)
            .then_with(|| self.rank.cmp(&other.rank))
    }
}

/// Computes routes on one graph under one cost model.
///
/// Holds no state between queries; one computer can serve concurrent callers.
#[derive(Debug, Clone)]
pub struct RouteComputer<'g, C> {
    graph: &'g Graph,
    cost: C,
    options: SearchOptions,
}

impl<'g, C: CostFunction> RouteComputer<'g, C> {
    pub fn new(graph: &'g Graph, cost: C) -> Self {
        Self {
            graph,
            cost,
            options: SearchOptions::default(),
        }
    }

    pub fn with_options(mut self, options: SearchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn graph(&self) -> &'g Graph {
        self.graph
    }

    /// Cheapest route from `start_node_id` to `end_node_id`, or `None` when
    /// no sequence of allowed edges connects them.
    pub fn best_route_between(&self, start_node_id: NodeId, end_node_id: NodeId) -> Result<Option<Route>> {
        let node_count = self.graph.node_count();
        for node_id in [start_node_id, end_node_id] {
            if node_id as usize >= node_count {
                return Err(Error::out_of_range("node", node_id, node_count));
            }
        }
        if start_node_id == end_node_id {
            return Err(Error::invalid_argument(format!(
                "route start and end are the same node {start_node_id}"
            )));
        }

        let min_cost_per_meter = self.cost.min_cost_per_meter();
        let target = if min_cost_per_meter > 0.0 {
            Some(self.graph.node_point(end_node_id)?)
        } else {
            None
        };
        let bound = |node_id: NodeId| -> Result<f64> {
            match &target {
                Some(end) => Ok(min_cost_per_meter * self.graph.node_point(node_id)?.distance_to(end)),
                None => Ok(0.0),
            }
        };

        let mut costs = vec![f64::INFINITY; node_count];
        let mut settled = vec![false; node_count];
        let mut predecessors: Vec<Option<(NodeId, EdgeId)>> = vec![None; node_count];
        let mut frontier = BinaryHeap::new();
        let mut pushed: u64 = 0;
        let mut settled_count = 0usize;

        costs[start_node_id as usize] = 0.0;
        frontier.push(Frontier {
            key: bound(start_node_id)?,
            rank: self.rank(pushed),
            node_id: start_node_id,
        });

        while let Some(Frontier { node_id, .. }) = frontier.pop() {
            let node = node_id as usize;
            if settled[node] {
                continue;
            }
            settled[node] = true;
            settled_count += 1;
            trace!(node_id, cost = costs[node], "settled");

            if node_id == end_node_id {
                let route = self.rebuild(&predecessors, start_node_id, end_node_id)?;
                debug!(
                    start_node_id,
                    end_node_id,
                    cost = costs[node],
                    settled = settled_count,
                    edges = route.edges().len(),
                    "route found"
                );
                return Ok(Some(Route::Single(route)));
            }

            for index in 0..self.graph.node_out_degree(node_id)? {
                let edge_id = self.graph.node_out_edge_id(node_id, index)?;
                let next = self.graph.edge_target_node_id(edge_id)?;
                if next as usize >= node_count {
                    return Err(Error::out_of_range("node", next, node_count));
                }
                if settled[next as usize] {
                    continue;
                }
                let edge_cost = self.cost.edge_cost(node_id, edge_id);
                if !(edge_cost >= 0.0) || edge_cost == f64::INFINITY {
                    continue;
                }
                let candidate = costs[node] + edge_cost;
                if candidate < costs[next as usize] {
                    costs[next as usize] = candidate;
                    predecessors[next as usize] = Some((node_id, edge_id));
                    pushed += 1;
                    frontier.push(Frontier {
                        key: candidate + bound(next)?,
                        rank: self.rank(pushed),
                        node_id: next,
                    });
                }
            }
        }

        debug!(start_node_id, end_node_id, settled = settled_count, "no route");
        Ok(None)
    }

    /// Route visiting `waypoints` in order, one search per consecutive pair.
    ///
    /// Consecutive waypoints on the same node are merged. A single leg is
    /// returned as is; several legs are joined in a multi-segment route.
    pub fn best_route_through(&self, waypoints: &[NodeId]) -> Result<Option<Route>> {
        if waypoints.len() < 2 {
            return Err(Error::invalid_argument(format!(
                "a route needs at least 2 waypoints, got {}",
                waypoints.len()
            )));
        }

        let mut legs = Vec::with_capacity(waypoints.len() - 1);
        for pair in waypoints.windows(2) {
            if pair[0] == pair[1] {
                continue;
            }
            match self.best_route_between(pair[0], pair[1])? {
                Some(leg) => legs.push(leg),
                None => return Ok(None),
            }
        }

        match legs.len() {
            0 => Err(Error::invalid_argument("all waypoints lie on the same node")),
            1 => Ok(legs.pop()),
            _ => Ok(Some(Route::Multi(MultiRoute::new(legs)?))),
        }
    }

    // Higher ranks pop first among equal keys.
    fn rank(&self, pushed: u64) -> u64 {
        match self.options.tie_break {
            TieBreak::FirstDiscovered => u64::MAX - pushed,
            TieBreak::LastDiscovered => pushed,
        }
    }

    fn rebuild(
        &self,
        predecessors: &[Option<(NodeId, EdgeId)>],
        start_node_id: NodeId,
        end_node_id: NodeId,
    ) -> Result<SingleRoute> {
        let mut edges = Vec::new();
        let mut node_id = end_node_id;
        while node_id != start_node_id {
            let Some((from, edge_id)) = predecessors[node_id as usize] else {
                return Err(Error::invalid_argument(format!(
                    "node {node_id} was settled without a predecessor"
                )));
            };
            edges.push(Edge::of(self.graph, edge_id, from, node_id)?);
            node_id = from;
        }
        edges.reverse();
        SingleRoute::new(edges)
    }
}
