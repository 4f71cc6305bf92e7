//! Route between two points without intermediate waypoints

use velo_common::{Error, Result};
use velo_geometry::math::clamp;
use velo_geometry::PointCh;
use velo_io::NodeId;

use crate::edge::Edge;
use crate::route_point::RoutePoint;

/// A non-empty chain of contiguous edges.
#[derive(Debug, Clone, PartialEq)]
pub struct SingleRoute {
    edges: Vec<Edge>,
    /// `positions[i]` is the distance from the start to the start of edge `i`;
    /// the final entry is the route length.
    positions: Vec<f64>,
}

/// Where a clamped position falls in the cumulative position table.
enum Location {
    /// Exactly on the junction before edge `k` (`k == edges.len()` for the end).
    Junction(usize),
    /// Strictly inside edge `i`, at `local` meters from its start.
    Inside(usize, f64),
}

impl SingleRoute {
    pub fn new(edges: Vec<Edge>) -> Result<Self> {
        if edges.is_empty() {
            return Err(Error::invalid_argument("a route needs at least one edge"));
        }
        if let Some(i) = edges
            .windows(2)
            .position(|pair| pair[0].to_node_id != pair[1].from_node_id)
        {
            return Err(Error::invalid_argument(format!(
                "edge {i} ends at node {} but edge {} starts at node {}",
                edges[i].to_node_id,
                i + 1,
                edges[i + 1].from_node_id
            )));
        }

        let mut positions = Vec::with_capacity(edges.len() + 1);
        let mut total = 0.0;
        positions.push(total);
        for edge in &edges {
            total += edge.length;
            positions.push(total);
        }
        Ok(Self { edges, positions })
    }

    pub fn index_of_segment_at(&self, _position: f64) -> usize {
        0
    }

    pub fn length(&self) -> f64 {
        self.positions[self.edges.len()]
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    fn last_edge(&self) -> &Edge {
        &self.edges[self.edges.len() - 1]
    }

    /// Start point of every edge followed by the end point of the last one.
    pub fn points(&self) -> Vec<PointCh> {
        let mut points: Vec<PointCh> = self.edges.iter().map(|e| e.from_point).collect();
        points.push(self.last_edge().to_point);
        points
    }

    fn locate(&self, position: f64) -> (f64, Location) {
        let position = clamp(0.0, position, self.length());
        let location = match self
            .positions
            .binary_search_by(|p| p.total_cmp(&position))
        {
            Ok(k) => Location::Junction(k),
            Err(insertion) => {
                let i = insertion.saturating_sub(1).min(self.edges.len() - 1);
                Location::Inside(i, position - self.positions[i])
            }
        };
        (position, location)
    }

    pub fn point_at(&self, position: f64) -> PointCh {
        match self.locate(position).1 {
            Location::Junction(k) if k == self.edges.len() => self.last_edge().to_point,
            Location::Junction(k) => self.edges[k].from_point,
            Location::Inside(i, local) => self.edges[i].point_at(local),
        }
    }

    /// Elevation at `position`, NaN where the covering edge has no profile.
    ///
    /// At a junction the arriving edge's profile start is used, or the
    /// previous edge's profile end if the former is unknown.
    pub fn elevation_at(&self, position: f64) -> f64 {
        match self.locate(position).1 {
            Location::Junction(0) => self.edges[0].elevation_at(0.0),
            Location::Junction(k) if k == self.edges.len() => {
                let last = self.last_edge();
                last.elevation_at(last.length)
            }
            Location::Junction(k) => {
                let elevation = self.edges[k].elevation_at(0.0);
                if elevation.is_nan() {
                    let previous = &self.edges[k - 1];
                    previous.elevation_at(previous.length)
                } else {
                    elevation
                }
            }
            Location::Inside(i, local) => self.edges[i].elevation_at(local),
        }
    }

    /// Route node closest to `position`; an exact midpoint favours the earlier node.
    pub fn node_closest_to(&self, position: f64) -> NodeId {
        match self.locate(position) {
            (_, Location::Junction(k)) if k == self.edges.len() => self.last_edge().to_node_id,
            (_, Location::Junction(k)) => self.edges[k].from_node_id,
            (position, Location::Inside(i, _)) => {
                let (start, end) = (self.positions[i], self.positions[i + 1]);
                if position - start <= (end - start) / 2.0 {
                    self.edges[i].from_node_id
                } else {
                    self.edges[i].to_node_id
                }
            }
        }
    }

    pub fn point_closest_to(&self, point: &PointCh) -> RoutePoint {
        let mut closest = RoutePoint::NONE;
        for (edge, &offset) in self.edges.iter().zip(&self.positions) {
            let local = clamp(0.0, edge.position_closest_to(point), edge.length);
            let candidate = edge.point_at(local);
            closest = closest.min(RoutePoint::new(
                candidate,
                offset + local,
                candidate.distance_to(point),
            ));
        }
        closest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use velo_geometry::{Curve, Sampled};

    const E0: f64 = 2_600_000.0;
    const N0: f64 = 1_200_000.0;

    /// Straight eastward edge from `e` to `e + length`, node ids `from`, `from + 1`.
    fn edge(from: NodeId, e: f64, length: f64, profile: Curve) -> Edge {
        Edge {
            from_node_id: from,
            to_node_id: from + 1,
            from_point: PointCh::new(E0 + e, N0).unwrap(),
            to_point: PointCh::new(E0 + e + length, N0).unwrap(),
            length,
            profile,
        }
    }

    fn ramp(from: f32, to: f32, length: f64) -> Curve {
        Curve::Sampled(Sampled::new(vec![from, to], length).unwrap())
    }

    /// Edges of 10, 20 and 30 m along the same line.
    fn route() -> SingleRoute {
        SingleRoute::new(vec![
            edge(0, 0.0, 10.0, ramp(100.0, 110.0, 10.0)),
            edge(1, 10.0, 20.0, ramp(110.0, 130.0, 20.0)),
            edge(2, 30.0, 30.0, ramp(130.0, 100.0, 30.0)),
        ])
        .unwrap()
    }

    fn at(e: f64) -> PointCh {
        PointCh::new(E0 + e, N0).unwrap()
    }

    #[test]
    fn rejects_empty_and_broken_chains() {
        assert!(SingleRoute::new(Vec::new()).is_err());
        let mut second = edge(1, 10.0, 20.0, Curve::unknown());
        second.from_node_id = 7;
        let broken = SingleRoute::new(vec![edge(0, 0.0, 10.0, Curve::unknown()), second]);
        assert!(matches!(broken, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn length_and_points() {
        let r = route();
        assert_eq!(r.length(), 60.0);
        assert_eq!(r.edges().len(), 3);
        assert_eq!(r.points(), vec![at(0.0), at(10.0), at(30.0), at(60.0)]);
        assert_eq!(r.index_of_segment_at(42.0), 0);
    }

    #[test]
    fn points_on_edge_boundaries_and_clamped() {
        let r = route();
        assert_eq!(r.point_at(0.0), at(0.0));
        assert_eq!(r.point_at(10.0), at(10.0));
        assert_eq!(r.point_at(30.0), at(30.0));
        assert_eq!(r.point_at(60.0), at(60.0));
        assert_eq!(r.point_at(-5.0), at(0.0));
        assert_eq!(r.point_at(65.0), at(60.0));
        assert_eq!(r.point_at(45.0), at(45.0));
    }

    #[test]
    fn elevation_inside_and_at_junctions() {
        let r = route();
        assert_eq!(r.elevation_at(-1.0), 100.0);
        assert_eq!(r.elevation_at(5.0), 105.0);
        assert_eq!(r.elevation_at(10.0), 110.0);
        assert_eq!(r.elevation_at(20.0), 120.0);
        assert_eq!(r.elevation_at(45.0), 115.0);
        assert_eq!(r.elevation_at(100.0), 100.0);
    }

    #[test]
    fn unknown_profile_at_junction_falls_back_to_previous_edge() {
        let r = SingleRoute::new(vec![
            edge(0, 0.0, 10.0, ramp(100.0, 110.0, 10.0)),
            edge(1, 10.0, 20.0, Curve::unknown()),
        ])
        .unwrap();
        assert_eq!(r.elevation_at(10.0), 110.0);
        assert!(r.elevation_at(15.0).is_nan());
        assert!(r.elevation_at(30.0).is_nan());
    }

    #[test]
    fn closest_node_breaks_midpoint_ties_towards_the_start() {
        let r = route();
        assert_eq!(r.node_closest_to(-3.0), 0);
        assert_eq!(r.node_closest_to(5.0), 0);
        assert_eq!(r.node_closest_to(5.5), 1);
        assert_eq!(r.node_closest_to(10.0), 1);
        assert_eq!(r.node_closest_to(20.0), 1);
        assert_eq!(r.node_closest_to(20.1), 2);
        assert_eq!(r.node_closest_to(60.0), 3);
        assert_eq!(r.node_closest_to(1e6), 3);
    }

    #[test]
    fn closest_point_projects_and_clamps() {
        let r = route();
        let above = PointCh::new(E0 + 42.0, N0 + 7.0).unwrap();
        let closest = r.point_closest_to(&above);
        assert_eq!(closest.point(), Some(at(42.0)));
        assert_eq!(closest.position(), 42.0);
        assert_eq!(closest.distance_to_reference(), 7.0);

        let before = PointCh::new(E0 - 3.0, N0 - 4.0).unwrap();
        let closest = r.point_closest_to(&before);
        assert_eq!(closest.point(), Some(at(0.0)));
        assert_eq!(closest.position(), 0.0);
        assert_eq!(closest.distance_to_reference(), 5.0);
    }
}
