//! CLI commands for velo-route

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;
use velo_geometry::PointCh;
use velo_io::NodeId;
use velo_routing::{elevation_profile, ClimbingCost, Graph, Route, RouteComputer, SearchOptions};

use crate::config::RouteConfig;

#[derive(Parser)]
#[command(name = "velo-route")]
#[command(about = "Cycling routes over a precomputed Swiss road graph", long_about = None)]
pub struct Cli {
    /// Graph directory (overrides `graph_dir` from the config file)
    #[arg(short, long, global = true)]
    pub graph: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log as JSON lines
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print table sizes of a graph directory
    Info,

    /// Find the graph node closest to a point
    Nearest {
        /// Point as `east,north` (LV95 meters), or `lat,lon` with --wgs84
        point: String,

        /// Read points as WGS84 degrees
        #[arg(long)]
        wgs84: bool,
    },

    /// Compute the best route through two or more points
    Route {
        /// Start point
        #[arg(long)]
        from: String,

        /// End point
        #[arg(long)]
        to: String,

        /// Intermediate points, in visiting order
        #[arg(long)]
        via: Vec<String>,

        /// Read points as WGS84 degrees
        #[arg(long)]
        wgs84: bool,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Format {
    Text,
    Json,
}

#[derive(Debug, Serialize)]
struct RouteSummary {
    nodes: Vec<NodeId>,
    length_m: f64,
    segments: usize,
    edges: usize,
    ascent_m: f64,
    descent_m: f64,
    min_elevation_m: f64,
    max_elevation_m: f64,
    points: Vec<PointCh>,
}

pub fn run(command: Commands, config: &RouteConfig) -> Result<()> {
    let dir = config
        .graph_dir
        .as_deref()
        .context("No graph directory: pass --graph or set graph_dir in the config file")?;
    let graph = load_graph(dir)?;

    match command {
        Commands::Info => {
            println!("graph:  {}", dir.display());
            println!("nodes:  {}", graph.node_count());
            println!("edges:  {}", graph.edge_count());
        }
        Commands::Nearest { point, wgs84 } => {
            let point = parse_point(&point, wgs84)?;
            let node_id = snap(&graph, &point, config.search_distance)?;
            let node = graph.node_point(node_id)?;
            println!("node {node_id} at {node}, {:.1} m away", node.distance_to(&point));
        }
        Commands::Route {
            from,
            to,
            via,
            wgs84,
            format,
        } => {
            let mut waypoints = Vec::with_capacity(via.len() + 2);
            for text in std::iter::once(&from).chain(&via).chain(std::iter::once(&to)) {
                let point = parse_point(text, wgs84)?;
                waypoints.push(snap(&graph, &point, config.search_distance)?);
            }
            let summary = plan(&graph, &waypoints, config)?;
            print_summary(&summary, format)?;
        }
    }
    Ok(())
}

fn load_graph(dir: &Path) -> Result<Graph> {
    Graph::load_from(dir).with_context(|| format!("Failed to load graph from {}", dir.display()))
}

fn snap(graph: &Graph, point: &PointCh, search_distance: f64) -> Result<NodeId> {
    match graph.node_closest_to(point, search_distance)? {
        Some(node_id) => Ok(node_id),
        None => bail!("No road within {search_distance} m of {point}"),
    }
}

fn plan(graph: &Graph, waypoints: &[NodeId], config: &RouteConfig) -> Result<RouteSummary> {
    let cost = ClimbingCost::new(graph, config.climb_weight, config.forbidden())?;
    let computer = RouteComputer::new(graph, cost).with_options(SearchOptions {
        tie_break: config.tie_break,
    });

    let Some(route) = computer.best_route_through(waypoints)? else {
        bail!("No route found through nodes {waypoints:?}");
    };
    let profile = elevation_profile(&route, config.profile_step)?;
    info!(length_m = route.length(), edges = route.edges().len(), "route computed");

    let segments = match &route {
        Route::Single(_) => 1,
        Route::Multi(_) => route.index_of_segment_at(route.length()) + 1,
    };
    Ok(RouteSummary {
        nodes: waypoints.to_vec(),
        length_m: route.length(),
        segments,
        edges: route.edges().len(),
        ascent_m: profile.total_ascent(),
        descent_m: profile.total_descent(),
        min_elevation_m: profile.min_elevation(),
        max_elevation_m: profile.max_elevation(),
        points: route.points(),
    })
}

fn print_summary(summary: &RouteSummary, format: Format) -> Result<()> {
    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(summary)?),
        Format::Text => {
            println!("length:    {:.0} m", summary.length_m);
            println!("segments:  {}", summary.segments);
            println!("edges:     {}", summary.edges);
            println!("ascent:    {:.0} m", summary.ascent_m);
            println!("descent:   {:.0} m", summary.descent_m);
            println!(
                "elevation: {:.0} - {:.0} m",
                summary.min_elevation_m, summary.max_elevation_m
            );
        }
    }
    Ok(())
}

/// Parses `east,north`, or `lat,lon` in degrees when `wgs84` is set.
pub fn parse_point(s: &str, wgs84: bool) -> Result<PointCh> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 2 {
        bail!("Point must be in format 'x,y', got '{s}'");
    }
    let a = parts[0].trim().parse::<f64>().with_context(|| format!("Invalid number in '{s}'"))?;
    let b = parts[1].trim().parse::<f64>().with_context(|| format!("Invalid number in '{s}'"))?;
    let point = if wgs84 {
        PointCh::from_wgs84(b.to_radians(), a.to_radians())
    } else {
        PointCh::new(a, b)
    };
    point.with_context(|| format!("Point '{s}' is outside the routable region"))
}
