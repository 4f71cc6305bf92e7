//! Route made of consecutive sub-routes, one per pair of waypoints

use velo_common::{Error, Result};
use velo_geometry::math::clamp;
use velo_geometry::PointCh;
use velo_io::NodeId;

use crate::edge::Edge;
use crate::route::Route;
use crate::route_point::RoutePoint;

#[derive(Debug, Clone, PartialEq)]
pub struct MultiRoute {
    segments: Vec<Route>,
    length: f64,
}

impl MultiRoute {
    /// Fails unless `segments` is non-empty and each segment ends where the
    /// next one starts.
    pub fn new(segments: Vec<Route>) -> Result<Self> {
        if segments.is_empty() {
            return Err(Error::invalid_argument("a multi-segment route needs at least one segment"));
        }
        for (i, pair) in segments.windows(2).enumerate() {
            let end = pair[0].point_at(pair[0].length());
            let start = pair[1].point_at(0.0);
            if end != start {
                return Err(Error::invalid_argument(format!(
                    "segment {i} ends at {end} but segment {} starts at {start}",
                    i + 1
                )));
            }
        }
        let length: f64 = segments.iter().map(Route::length).sum();
        Ok(Self { segments, length })
    }

    pub fn segments(&self) -> &[Route] {
        &self.segments
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    /// Segment covering `position` and the position relative to its start.
    ///
    /// A position on a joint belongs to the earlier segment.
    fn locate(&self, position: f64) -> (&Route, f64) {
        let position = clamp(0.0, position, self.length);
        let mut start = 0.0;
        for segment in &self.segments {
            let end = start + segment.length();
            if position <= end {
                return (segment, position - start);
            }
            start = end;
        }
        let last = &self.segments[self.segments.len() - 1];
        (last, last.length())
    }

    pub fn index_of_segment_at(&self, position: f64) -> usize {
        let position = clamp(0.0, position, self.length);
        let mut index = 0;
        let mut start = 0.0;
        for segment in &self.segments {
            let end = start + segment.length();
            if position <= end {
                return index + segment.index_of_segment_at(position - start);
            }
            index += segment.index_of_segment_at(segment.length()) + 1;
            start = end;
        }
        index.saturating_sub(1)
    }

    pub fn edges(&self) -> Vec<Edge> {
        self.segments.iter().flat_map(Route::edges).collect()
    }

    pub fn points(&self) -> Vec<PointCh> {
        let mut points = Vec::new();
        for segment in &self.segments {
            points.extend(segment.points());
            points.pop();
        }
        let last = &self.segments[self.segments.len() - 1];
        points.push(last.point_at(last.length()));
        points
    }

    pub fn point_at(&self, position: f64) -> PointCh {
        let (segment, local) = self.locate(position);
        segment.point_at(local)
    }

    pub fn elevation_at(&self, position: f64) -> f64 {
        let (segment, local) = self.locate(position);
        segment.elevation_at(local)
    }

    pub fn node_closest_to(&self, position: f64) -> NodeId {
        let (segment, local) = self.locate(position);
        segment.node_closest_to(local)
    }

    pub fn point_closest_to(&self, point: &PointCh) -> RoutePoint {
        let mut closest = RoutePoint::NONE;
        let mut offset = 0.0;
        for segment in &self.segments {
            let candidate = segment.point_closest_to(point);
            closest = closest.min(candidate.with_position_shifted_by(offset));
            offset += segment.length();
        }
        closest
    }
}
