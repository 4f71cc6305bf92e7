//! `velo.toml` - defaults for the command-line planner

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use velo_io::AttributeSet;
use velo_routing::TieBreak;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RouteConfig {
    /// Directory holding the graph files
    pub graph_dir: Option<PathBuf>,
    /// Radius in meters around a requested point in which a node is searched
    pub search_distance: f64,
    /// Extra cost per meter of climbing, on top of the distance
    pub climb_weight: f64,
    /// Attribute bits an edge must not carry
    pub forbidden_attributes: u64,
    /// Maximum spacing in meters of elevation profile samples
    pub profile_step: f64,
    pub tie_break: TieBreak,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            graph_dir: None,
            search_distance: 1000.0,
            climb_weight: 4.0,
            forbidden_attributes: 0,
            profile_step: 5.0,
            tie_break: TieBreak::default(),
        }
    }
}

impl RouteConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: RouteConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !(self.search_distance > 0.0) {
            anyhow::bail!("search_distance must be positive, got {}", self.search_distance);
        }
        if !(self.profile_step > 0.0) {
            anyhow::bail!("profile_step must be positive, got {}", self.profile_step);
        }
        if !(self.climb_weight >= 0.0) {
            anyhow::bail!("climb_weight must not be negative, got {}", self.climb_weight);
        }
        Ok(())
    }

    pub fn forbidden(&self) -> AttributeSet {
        AttributeSet::from_bits(self.forbidden_attributes)
    }
}
