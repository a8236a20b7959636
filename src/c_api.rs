use crate::{
    config::SimulationConfig,
    point::{PointMass, PointState},
    simulation::Simulation,
    vector::Vector2D,
};

/// Creates a seeded simulation. Returns null if the configuration is invalid.
#[unsafe(no_mangle)]
pub extern "C" fn Simulation_Create(point_count: usize, bounds_side: f64, seed: u64) -> *mut Simulation {
    let config = SimulationConfig {
        point_count,
        bounds_side,
        seed: Some(seed),
        ..Default::default()
    };

    match Simulation::initialize(config) {
        Ok(sim) => Box::into_raw(Box::new(sim)),
        Err(err) => {
            log::warn!("Simulation_Create failed: {err}");
            std::ptr::null_mut()
        }
    }
}

/// # Safety
/// `handle` must be null or a pointer returned by [`Simulation_Create`] that
/// has not been destroyed yet.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_Destroy(handle: *mut Simulation) {
    if !handle.is_null() {
        unsafe { drop(Box::from_raw(handle)) };
    }
}

/// # Safety
/// `handle` must be null or a live simulation handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_Step(handle: *mut Simulation) {
    if let Some(sim) = unsafe { handle.as_mut() } {
        sim.step();
    }
}

/// # Safety
/// `handle` must be null or a live simulation handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_Reset(handle: *mut Simulation) {
    if let Some(sim) = unsafe { handle.as_mut() } {
        sim.reset();
    }
}

/// # Safety
/// `handle` must be null or a live simulation handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_GetPointCount(handle: *const Simulation) -> usize {
    unsafe { handle.as_ref() }.map_or(0, |sim| sim.points().len())
}

/// # Safety
/// `handle` must be null or a live simulation handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_GetLiveCount(handle: *const Simulation) -> usize {
    unsafe { handle.as_ref() }.map_or(0, |sim| sim.live_count())
}

/// Points laid out as `{ id, x, y, mass }`. Valid until the next step, reset
/// or destroy on the same handle.
///
/// # Safety
/// `handle` must be null or a live simulation handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_GetPoints(handle: *const Simulation) -> *const PointMass {
    unsafe { handle.as_ref() }.map_or(std::ptr::null(), |sim| sim.points().as_ptr())
}

/// Copies up to `capacity` snapshot entries into `out` and returns how many
/// were written.
///
/// # Safety
/// `handle` must be null or a live simulation handle, and `out` must be null
/// or valid for `capacity` writes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_CopySnapshot(
    handle: *const Simulation,
    out: *mut PointState,
    capacity: usize,
) -> usize {
    let Some(sim) = (unsafe { handle.as_ref() }) else {
        return 0;
    };
    if out.is_null() {
        return 0;
    }

    let len = capacity.min(sim.points().len());
    let out = unsafe { std::slice::from_raw_parts_mut(out, len) };
    for (slot, point) in out.iter_mut().zip(sim.points()) {
        *slot = point.state();
    }
    len
}

/// Appends a point and returns its id, or `usize::MAX` if the mass is invalid.
///
/// # Safety
/// `handle` must be null or a live simulation handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_AddPoint(handle: *mut Simulation, x: f64, y: f64, mass: f64) -> usize {
    let Some(sim) = (unsafe { handle.as_mut() }) else {
        return usize::MAX;
    };

    match sim.push_point(Vector2D::new(x, y), mass) {
        Ok(id) => id,
        Err(err) => {
            log::warn!("Simulation_AddPoint failed: {err}");
            usize::MAX
        }
    }
}
