use crate::vector::Vector2D;

/// A point mass in the simulation.
///
/// `id` is the point's index in the simulation and never changes. A mass of
/// zero marks the point as inert: it has been absorbed in a collision and no
/// longer exerts or receives force.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointMass {
    /// Stable identifier, assigned at creation and never reused.
    pub id: usize,
    /// Position vector.
    pub position: Vector2D,
    /// Mass of the point. Zero once inert.
    pub mass: f64,
}

impl PointMass {
    /// Creates a new active point with the given properties.
    pub fn new(id: usize, position: Vector2D, mass: f64) -> Self {
        Self { id, position, mass }
    }

    /// Whether the point still takes part in force and motion.
    pub fn is_active(&self) -> bool {
        self.mass > 0.0
    }

    pub fn is_inert(&self) -> bool {
        !self.is_active()
    }

    /// Returns this point with its mass zeroed and its position frozen.
    pub fn into_inert(self) -> Self {
        Self { mass: 0.0, ..self }
    }

    /// Returns this point displaced by a constant acceleration `acc` held for `dt`.
    /// Uses `x + a * dt² / 2`; no velocity is carried between steps.
    pub fn advanced(self, acc: Vector2D, dt: f64) -> Self {
        Self {
            position: self.position + acc * (0.5 * dt * dt),
            ..self
        }
    }

    /// Flattened copy for renderers.
    pub fn state(&self) -> PointState {
        PointState {
            id: self.id,
            x: self.position.x(),
            y: self.position.y(),
            mass: self.mass,
        }
    }
}

/// One entry of a simulation snapshot.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointState {
    pub id: usize,
    pub x: f64,
    pub y: f64,
    pub mass: f64,
}

impl PointState {
    pub fn is_visible(&self) -> bool {
        self.mass > 0.0
    }
}
