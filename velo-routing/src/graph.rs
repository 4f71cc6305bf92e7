//! Read-only view of a loaded road graph

use std::path::Path;
use tracing::info;
use velo_common::Result;
use velo_geometry::math::squared_norm;
use velo_geometry::{Curve, PointCh, Sampled};
use velo_io::{AttributeSet, AttributeTable, EdgeId, GraphEdges, GraphFiles, GraphNodes, GraphSectors, NodeId};

/// Nodes, sectors, edges and attribute sets of one region.
///
/// Every accessor taking an id fails with `OutOfRange` when the id lies
/// outside its table.
#[derive(Debug, Clone)]
pub struct Graph {
    nodes: GraphNodes,
    sectors: GraphSectors,
    edges: GraphEdges,
    attribute_sets: AttributeTable,
}

impl Graph {
    pub fn new(
        nodes: GraphNodes,
        sectors: GraphSectors,
        edges: GraphEdges,
        attribute_sets: AttributeTable,
    ) -> Self {
        Self {
            nodes,
            sectors,
            edges,
            attribute_sets,
        }
    }

    /// Maps the graph files of `dir`.
    pub fn load_from(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let files = GraphFiles::map(dir)?;
        info!(
            dir = %dir.display(),
            nodes = files.nodes.count(),
            edges = files.edges.count(),
            "loaded graph"
        );
        Ok(Self::new(files.nodes, files.sectors, files.edges, files.attributes))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.count()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.count()
    }

    pub fn node_point(&self, node_id: NodeId) -> Result<PointCh> {
        PointCh::new(self.nodes.node_e(node_id)?, self.nodes.node_n(node_id)?)
    }

    pub fn node_out_degree(&self, node_id: NodeId) -> Result<u32> {
        self.nodes.out_degree(node_id)
    }

    pub fn node_out_edge_id(&self, node_id: NodeId, edge_index: u32) -> Result<EdgeId> {
        self.nodes.edge_id(node_id, edge_index)
    }

    /// Node closest to `point` within `search_distance` meters, if any.
    ///
    /// Nodes are visited sector by sector, in ascending id order inside a
    /// sector; on equal distance the node visited last wins.
    pub fn node_closest_to(&self, point: &PointCh, search_distance: f64) -> Result<Option<NodeId>> {
        let mut best_squared = search_distance * search_distance;
        let mut best = None;
        for sector in self.sectors.sectors_in_area(point, search_distance) {
            for node_id in sector.node_ids() {
                let squared = squared_norm(
                    self.nodes.node_e(node_id)? - point.e(),
                    self.nodes.node_n(node_id)? - point.n(),
                );
                if squared <= best_squared {
                    best_squared = squared;
                    best = Some(node_id);
                }
            }
        }
        Ok(best)
    }

    pub fn edge_target_node_id(&self, edge_id: EdgeId) -> Result<NodeId> {
        self.edges.target_node_id(edge_id)
    }

    pub fn edge_is_inverted(&self, edge_id: EdgeId) -> Result<bool> {
        self.edges.is_inverted(edge_id)
    }

    pub fn edge_attributes(&self, edge_id: EdgeId) -> Result<AttributeSet> {
        self.attribute_sets.get(self.edges.attributes_index(edge_id)?)
    }

    pub fn edge_length(&self, edge_id: EdgeId) -> Result<f64> {
        self.edges.length(edge_id)
    }

    pub fn edge_elevation_gain(&self, edge_id: EdgeId) -> Result<f64> {
        self.edges.elevation_gain(edge_id)
    }

    /// Elevation along the edge as a function of the distance from its start.
    ///
    /// Edges without samples map every position to NaN.
    pub fn edge_profile(&self, edge_id: EdgeId) -> Result<Curve> {
        let samples = self.edges.profile_samples(edge_id)?;
        let Some(&first) = samples.first() else {
            return Ok(Curve::unknown());
        };
        let length = self.edges.length(edge_id)?;
        if samples.len() < 2 || !(length > 0.0) {
            return Ok(Curve::Constant(f64::from(first)));
        }
        Ok(Curve::Sampled(Sampled::new(samples, length)?))
    }
}
