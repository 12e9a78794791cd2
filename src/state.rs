/*!
Per-vehicle kinematic state.

One `VehicleState` is owned exclusively by one `Vehicle` and mutated every
frame by the surface integrator and, between frames, by collision impulses.
It has no independent lifecycle.
*/

use crate::types::{DriveMode, Quat, Vec3};

/// Kinematic state of a single vehicle.
#[derive(Clone, Copy, Debug)]
pub struct VehicleState {
    /// World-space location; authoritative, written every frame.
    pub position: Vec3,
    /// World-space rotation; unit length at all times. In planet mode the
    /// local up axis is kept aligned to the surface normal.
    pub orientation: Quat,
    /// Signed driving speed along the local forward axis (units/s). Clamped
    /// every frame to `[-max_speed/2, max_speed]`.
    pub speed: f32,
    /// Derived world-space velocity (driving plus momentum contribution).
    /// Recomputed each frame; never independently authoritative.
    pub velocity: Vec3,
    /// World-space collision momentum (mass * velocity units). Independent
    /// of driving controls; decays via friction and persists across frames
    /// until negligible.
    pub momentum: Vec3,
    /// Steer angle derived this frame from input and speed (radians/s of
    /// yaw once integrated).
    pub steer_angle: f32,
    /// Control authority state.
    pub mode: DriveMode,
}

impl VehicleState {
    /// State for a vehicle at rest at `position` with orientation
    /// `orientation`.
    #[inline]
    pub fn at_rest(position: Vec3, orientation: Quat) -> Self {
        Self {
            position,
            orientation,
            speed: 0.0,
            velocity: Vec3::zeros(),
            momentum: Vec3::zeros(),
            steer_angle: 0.0,
            mode: DriveMode::Driving,
        }
    }
}
