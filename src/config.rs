//! Simulation configuration
//!
//! Defaults reproduce the classic setup: 3000 unit masses scattered over a
//! 600 x 600 square, advanced 10 time units per step.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// How a pair of active points closer than the collision distance is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// The point with the higher id becomes inert; the lower id survives.
    #[default]
    AbsorbHigherId,
    /// Both points of the pair become inert.
    MutualDestruction,
}

/// Constants applied by a single step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepParams {
    /// Time advanced per step.
    pub dt: f64,
    pub gravitational_constant: f64,
    /// Center-to-center distance at or below which two points collide.
    pub collision_distance: f64,
    pub collision_policy: CollisionPolicy,
}

impl Default for StepParams {
    fn default() -> Self {
        SimulationConfig::default().step_params()
    }
}

impl StepParams {
    pub fn validate(&self) -> Result<()> {
        if !self.dt.is_finite() {
            return Err(invalid(format!("dt must be finite, got {}", self.dt)));
        }
        if !self.gravitational_constant.is_finite() {
            return Err(invalid(format!(
                "gravitational_constant must be finite, got {}",
                self.gravitational_constant
            )));
        }
        if !(self.collision_distance >= 0.0 && self.collision_distance.is_finite()) {
            return Err(invalid(format!(
                "collision_distance must be finite and non-negative, got {}",
                self.collision_distance
            )));
        }
        Ok(())
    }
}

/// Full description of a simulation: initial distribution and step constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of points created at initialization.
    pub point_count: usize,
    /// Side of the square `[0, S) x [0, S)` the points are drawn from.
    pub bounds_side: f64,
    /// Optional RNG seed for reproducible runs.
    pub seed: Option<u64>,
    pub dt: f64,
    pub gravitational_constant: f64,
    pub collision_distance: f64,
    pub collision_policy: CollisionPolicy,
    /// Compute forces on the rayon thread pool.
    pub parallel: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            point_count: Self::DEFAULT_POINT_COUNT,
            bounds_side: Self::DEFAULT_BOUNDS_SIDE,
            seed: None,
            dt: Self::DEFAULT_DT,
            gravitational_constant: Self::DEFAULT_G,
            collision_distance: Self::DEFAULT_COLLISION_DISTANCE,
            collision_policy: CollisionPolicy::default(),
            parallel: false,
        }
    }
}

impl SimulationConfig {
    pub const DEFAULT_POINT_COUNT: usize = 3000;
    pub const DEFAULT_BOUNDS_SIDE: f64 = 600.0;
    pub const DEFAULT_DT: f64 = 10.0;
    pub const DEFAULT_G: f64 = 6.67;
    pub const DEFAULT_COLLISION_DISTANCE: f64 = 7.0;

    /// Parses a JSON document. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.bounds_side > 0.0 && self.bounds_side.is_finite()) {
            return Err(invalid(format!(
                "bounds_side must be finite and positive, got {}",
                self.bounds_side
            )));
        }
        self.step_params().validate()
    }

    pub fn step_params(&self) -> StepParams {
        StepParams {
            dt: self.dt,
            gravitational_constant: self.gravitational_constant,
            collision_distance: self.collision_distance,
            collision_policy: self.collision_policy,
        }
    }
}

fn invalid(message: String) -> Error {
    Error::InvalidConfiguration(message)
}
