use crate::{
    config::{CollisionPolicy, SimulationConfig, StepParams},
    error::{Error, Result},
    point::{PointMass, PointState},
    utils,
    vector::Vector2D,
};

use broccoli::aabb::Rect;
use rayon::prelude::*;

/// Manages the point masses and advances them under mutual gravity.
///
/// Each step runs in two phases. The read phase evaluates collisions and net
/// forces against the current point set only; the write phase then builds the
/// next point set from those results and swaps it in. Nothing is updated while
/// forces are still being read, so the outcome does not depend on iteration
/// order or on whether the force pass runs in parallel.
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimulationConfig,
    params: StepParams,
    /// Current frame count.
    frame: usize,
    /// All points ever created, indexed by id. Inert points keep their slot.
    points: Vec<PointMass>,
    /// The point set as built, restored by [`Simulation::reset`].
    initial: Vec<PointMass>,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulation {
    /// Initializes a new simulation with the default configuration.
    pub fn new() -> Self {
        let config = SimulationConfig::default();
        let points = utils::uniform_square(config.point_count, config.bounds_side, config.seed);
        Self::from_parts(config, points)
    }

    /// Builds a simulation from `config`, scattering `point_count` unit masses
    /// uniformly over the configured square.
    pub fn initialize(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        let points = utils::uniform_square(config.point_count, config.bounds_side, config.seed);
        log::info!(
            "Initialized {} points over a {}x{} square (seed: {:?})",
            points.len(),
            config.bounds_side,
            config.bounds_side,
            config.seed
        );
        Ok(Self::from_parts(config, points))
    }

    /// Builds a simulation from explicit `(position, mass)` pairs.
    /// Ids are assigned in iteration order starting at zero.
    pub fn with_points<I>(points: I, params: StepParams) -> Result<Self>
    where
        I: IntoIterator<Item = (Vector2D, f64)>,
    {
        params.validate()?;
        let points = points
            .into_iter()
            .enumerate()
            .map(|(id, (position, mass))| {
                check_mass(mass)?;
                Ok(PointMass::new(id, position, mass))
            })
            .collect::<Result<Vec<_>>>()?;

        let config = SimulationConfig {
            point_count: points.len(),
            dt: params.dt,
            gravitational_constant: params.gravitational_constant,
            collision_distance: params.collision_distance,
            collision_policy: params.collision_policy,
            ..Default::default()
        };
        Ok(Self::from_parts(config, points))
    }

    fn from_parts(config: SimulationConfig, points: Vec<PointMass>) -> Self {
        Self {
            params: config.step_params(),
            config,
            frame: 0,
            initial: points.clone(),
            points,
        }
    }

    /// Appends a point and returns its id.
    pub fn push_point(&mut self, position: Vector2D, mass: f64) -> Result<usize> {
        check_mass(mass)?;
        let id = self.points.len();
        self.points.push(PointMass::new(id, position, mass));
        Ok(id)
    }

    /// Restores the point set the simulation was built with.
    pub fn reset(&mut self) {
        self.points = self.initial.clone();
        self.frame = 0;
        log::info!("Simulation reset to {} points", self.points.len());
    }

    /// Sets whether to compute forces on the rayon thread pool.
    pub fn set_parallel(&mut self, parallel: bool) {
        self.config.parallel = parallel;
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn params(&self) -> &StepParams {
        &self.params
    }

    /// Number of completed steps.
    pub fn frame(&self) -> usize {
        self.frame
    }

    /// All points, indexed by id.
    pub fn points(&self) -> &[PointMass] {
        &self.points
    }

    /// Flattened copy of every point as of the last completed step.
    pub fn snapshot(&self) -> Vec<PointState> {
        self.points.iter().map(PointMass::state).collect()
    }

    pub fn live_count(&self) -> usize {
        self.points.iter().filter(|p| p.is_active()).count()
    }

    pub fn total_mass(&self) -> f64 {
        self.points.iter().map(|p| p.mass).sum()
    }

    /// Advances the simulation by one step using the configured constants.
    pub fn step(&mut self) {
        let params = self.params;
        self.step_with(&params);
    }

    /// Advances the simulation by one step using `params`.
    /// 1. Finds colliding pairs and decides which points become inert.
    /// 2. Accumulates the net gravitational force on every active point.
    /// 3. Replaces the point set with the integrated one.
    pub fn step_with(&mut self, params: &StepParams) {
        let absorbed = self.absorbed(params);
        let forces = self.attract(params);
        let dt = params.dt;

        let next: Vec<PointMass> = self
            .points
            .iter()
            .zip(forces)
            .zip(&absorbed)
            .map(|((point, force), &gone)| {
                if point.is_inert() {
                    *point
                } else if gone {
                    point.into_inert()
                } else {
                    point.advanced(force / point.mass, dt)
                }
            })
            .collect();

        self.points = next;
        self.frame += 1;

        log::debug!(
            "Frame {}: {} live points, {} absorbed",
            self.frame,
            self.live_count(),
            absorbed.iter().filter(|&&a| a).count()
        );
    }

    /// Net gravitational force on every point, indexed by id.
    /// Inert points, and pairs within the collision distance, contribute nothing.
    pub fn attract(&self, params: &StepParams) -> Vec<Vector2D> {
        let points = self.points.as_slice();

        if self.config.parallel {
            points
                .par_iter()
                .map(|point| net_force(point, points, params))
                .collect()
        } else {
            points
                .iter()
                .map(|point| net_force(point, points, params))
                .collect()
        }
    }

    /// Pairs `(i, j)` with `i < j` of active points no farther apart than the
    /// collision distance, sorted.
    /// Uses the `broccoli` crate for the broad phase, then checks exact distances.
    pub fn collisions(&self, collision_distance: f64) -> Vec<(usize, usize)> {
        // Boxes wider than the threshold, so every colliding pair overlaps
        let half = collision_distance.max(1.0);

        let mut rects = self
            .points
            .iter()
            .filter(|p| p.is_active())
            .map(|p| {
                let (x, y) = (p.position.x(), p.position.y());
                (Rect::new(x - half, x + half, y - half, y + half), p.id)
            })
            .collect::<Vec<_>>();

        let mut pairs = Vec::new();
        let mut broccoli = broccoli::Tree::new(&mut rects);

        broccoli.find_colliding_pairs(|a, b| {
            let a = *a.unpack_inner();
            let b = *b.unpack_inner();

            let (pa, pb) = (&self.points[a], &self.points[b]);
            if pa.position.distance_to(pb.position) <= collision_distance {
                pairs.push((a.min(b), a.max(b)));
            }
        });

        pairs.sort_unstable();
        pairs
    }

    /// Flags, indexed by id, of the points that become inert this step.
    fn absorbed(&self, params: &StepParams) -> Vec<bool> {
        let mut absorbed = vec![false; self.points.len()];

        for (i, j) in self.collisions(params.collision_distance) {
            log::trace!("Points {} and {} collided", i, j);
            match params.collision_policy {
                CollisionPolicy::AbsorbHigherId => absorbed[j] = true,
                CollisionPolicy::MutualDestruction => {
                    absorbed[i] = true;
                    absorbed[j] = true;
                }
            }
        }

        absorbed
    }
}

/// Sum of the attractions on `point` from every other active point farther
/// away than the collision distance. Summed in id order.
fn net_force(point: &PointMass, points: &[PointMass], params: &StepParams) -> Vector2D {
    if point.is_inert() {
        return Vector2D::zero();
    }

    let mut force = Vector2D::zero();
    for other in points {
        if other.id == point.id || other.is_inert() {
            continue;
        }

        let r = point.position.distance_to(other.position);
        if r > params.collision_distance {
            let gmm = params.gravitational_constant * point.mass * other.mass;
            force = force + Vector2D::from_polar(gmm / (r * r), point.position.bearing_to(other.position));
        }
    }
    force
}

fn check_mass(mass: f64) -> Result<()> {
    if mass >= 0.0 && mass.is_finite() {
        Ok(())
    } else {
        Err(Error::InvalidConfiguration(format!(
            "mass must be finite and non-negative, got {mass}"
        )))
    }
}
