//! Routing on a velo graph
//!
//! [`Graph`] wraps the memory-mapped tables of one region. A
//! [`RouteComputer`] searches it under a [`CostFunction`] and yields a
//! [`Route`], from which an [`ElevationProfile`] can be derived.
//!
//! ```no_run
//! use velo_routing::{elevation_profile, ClimbingCost, Graph, RouteComputer};
//! use velo_io::AttributeSet;
//!
//! # fn main() -> velo_common::Result<()> {
//! let graph = Graph::load_from("ch_west")?;
//! let computer = RouteComputer::new(&graph, ClimbingCost::new(&graph, 4.0, AttributeSet::EMPTY)?);
//! if let Some(route) = computer.best_route_between(159_049, 117_669)? {
//!     let profile = elevation_profile(&route, 5.0)?;
//!     println!("{:.0} m, {:.0} m ascent", route.length(), profile.total_ascent());
//! }
//! # Ok(())
//! # }
//! ```

pub mod cost;
pub mod edge;
pub mod elevation_profile;
pub mod graph;
pub mod multi_route;
pub mod route;
pub mod route_computer;
pub mod route_point;
pub mod single_route;

pub use cost::{ClimbingCost, CostFunction, DistanceCost};
pub use edge::Edge;
pub use elevation_profile::{elevation_profile, ElevationProfile};
pub use graph::Graph;
pub use multi_route::MultiRoute;
pub use route::Route;
pub use route_computer::{RouteComputer, SearchOptions, TieBreak};
pub use route_point::RoutePoint;
pub use single_route::SingleRoute;
