pub mod c_api;
pub mod config;
pub mod error;
pub mod point;
pub mod simulation;
pub mod utils;
pub mod vector;

pub use config::{CollisionPolicy, SimulationConfig, StepParams};
pub use error::{Error, Result};
pub use point::{PointMass, PointState};
pub use simulation::Simulation;
pub use vector::Vector2D;
