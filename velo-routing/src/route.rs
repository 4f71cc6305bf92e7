use velo_geometry::PointCh;
use velo_io::NodeId;

use crate::edge::Edge;
use crate::multi_route::MultiRoute;
use crate::route_point::RoutePoint;
use crate::single_route::SingleRoute;

/// An itinerary: either one chain of edges or a sequence of nested routes.
///
/// Every position-based query clamps its position to `[0, length]`.
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    Single(SingleRoute),
    Multi(MultiRoute),
}

impl Route {
    /// Index of the elementary segment containing `position`, counting the
    /// segments of nested routes individually.
    pub fn index_of_segment_at(&self, position: f64) -> usize {
        match self {
            Route::Single(r) => r.index_of_segment_at(position),
            Route::Multi(r) => r.index_of_segment_at(position),
        }
    }

    pub fn length(&self) -> f64 {
        match self {
            Route::Single(r) => r.length(),
            Route::Multi(r) => r.length(),
        }
    }

    pub fn edges(&self) -> Vec<Edge> {
        match self {
            Route::Single(r) => r.edges().to_vec(),
            Route::Multi(r) => r.edges(),
        }
    }

    /// Every edge end point, without duplicates at segment joints.
    pub fn points(&self) -> Vec<PointCh> {
        match self {
            Route::Single(r) => r.points(),
            Route::Multi(r) => r.points(),
        }
    }

    pub fn point_at(&self, position: f64) -> PointCh {
        match self {
            Route::Single(r) => r.point_at(position),
            Route::Multi(r) => r.point_at(position),
        }
    }

    pub fn elevation_at(&self, position: f64) -> f64 {
        match self {
            Route::Single(r) => r.elevation_at(position),
            Route::Multi(r) => r.elevation_at(position),
        }
    }

    pub fn node_closest_to(&self, position: f64) -> NodeId {
        match self {
            Route::Single(r) => r.node_closest_to(position),
            Route::Multi(r) => r.node_closest_to(position),
        }
    }

    pub fn point_closest_to(&self, point: &PointCh) -> RoutePoint {
        match self {
            Route::Single(r) => r.point_closest_to(point),
            Route::Multi(r) => r.point_closest_to(point),
        }
    }
}

impl From<SingleRoute> for Route {
    fn from(route: SingleRoute) -> Self {
        Route::Single(route)
    }
}

impl From<MultiRoute> for Route {
    fn from(route: MultiRoute) -> Self {
        Route::Multi(route)
    }
}
