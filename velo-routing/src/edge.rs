use velo_common::Result;
use velo_geometry::math::projection_length;
use velo_geometry::{Curve, PointCh};
use velo_io::{EdgeId, NodeId};

use crate::graph::Graph;

/// One traversed edge of a route, detached from the graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub from_node_id: NodeId,
    pub to_node_id: NodeId,
    pub from_point: PointCh,
    pub to_point: PointCh,
    pub length: f64,
    pub profile: Curve,
}

impl Edge {
    /// Reads edge `edge_id` of `graph`, traversed from `from_node_id` to `to_node_id`.
    pub fn of(graph: &Graph, edge_id: EdgeId, from_node_id: NodeId, to_node_id: NodeId) -> Result<Self> {
        Ok(Self {
            from_node_id,
            to_node_id,
            from_point: graph.node_point(from_node_id)?,
            to_point: graph.node_point(to_node_id)?,
            length: graph.edge_length(edge_id)?,
            profile: graph.edge_profile(edge_id)?,
        })
    }

    /// Position along the edge of the orthogonal projection of `point` onto
    /// the edge's line. May be negative or exceed the length.
    pub fn position_closest_to(&self, point: &PointCh) -> f64 {
        projection_length(
            self.from_point.e(),
            self.from_point.n(),
            self.to_point.e(),
            self.to_point.n(),
            point.e(),
            point.n(),
        )
    }

    /// Point at `position` meters from the start, clamped to the edge.
    pub fn point_at(&self, position: f64) -> PointCh {
        if self.length == 0.0 {
            return self.from_point;
        }
        self.from_point.lerp(&self.to_point, position / self.length)
    }

    pub fn elevation_at(&self, position: f64) -> f64 {
        self.profile.at(position)
    }
}
