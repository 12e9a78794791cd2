/*!
Core data types and math aliases shared by the simulation modules.

This module intentionally contains no algorithms. It defines the data types
exchanged between:
- the collision calculator (momentum exchange, separation geometry)
- the surface integrators (ground plane, planet sphere)
- the vehicle controller (control integration, per-frame update)

All vector and quaternion values are treated as plain values: helper math
never mutates an input parameter, it returns a new value.
*/

use nalgebra as na;

/// Common math aliases for clarity and consistency.
pub type Vec3 = na::Vector3<f32>;
pub type Quat = na::UnitQuaternion<f32>;

/// Local forward axis of a vehicle (model space).
///
/// An identity orientation faces -Z; a positive yaw about +Y turns left.
#[inline]
pub fn local_forward() -> Vec3 {
    Vec3::new(0.0, 0.0, -1.0)
}

/// Local up axis of a vehicle (model space).
#[inline]
pub fn local_up() -> Vec3 {
    Vec3::new(0.0, 1.0, 0.0)
}

/// Per-frame player intent, supplied by an external input source.
///
/// `accelerate` and `steer` are typically -1, 0 or 1 from digital input but
/// any value in `[-1, 1]` is valid (e.g., from an analog stick). Values
/// outside that range are clamped when the input is handed to a vehicle.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ControlInput {
    /// Throttle intent in `[-1, 1]`; negative drives in reverse.
    pub accelerate: f32,
    /// Steering intent in `[-1, 1]`; sign convention follows `local_forward`.
    pub steer: f32,
    /// When set, braking overrides throttle for this frame.
    pub handbrake: bool,
}

impl ControlInput {
    /// Return a copy with `accelerate` and `steer` clamped to `[-1, 1]`.
    #[inline]
    pub fn clamped(self) -> Self {
        Self {
            accelerate: self.accelerate.clamp(-1.0, 1.0),
            steer: self.steer.clamp(-1.0, 1.0),
            handbrake: self.handbrake,
        }
    }
}

/// Driving surface a vehicle is bound to.
///
/// Detected once by an external surface detector and fixed for the lifetime
/// of the vehicle. The variant selects the position integrator:
/// - `Ground`: flat plane at a constant height; "up" is world +Y everywhere.
/// - `Planet`: sphere surface; "up" is the outward radial direction and
///   changes continuously as the vehicle moves.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Surface {
    Ground {
        /// World-space height of the driving plane (meters).
        height: f32,
    },
    Planet {
        /// World-space center of the planet.
        center: Vec3,
        /// Planet radius (meters); must be positive.
        radius: f32,
    },
}

/// Control authority state of a vehicle.
///
/// A collision impulse revokes driving authority for that instant: speed is
/// zeroed and the vehicle coasts on collision momentum until the player
/// provides new accelerate input, which returns the vehicle to `Driving`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DriveMode {
    /// Speed is under player control.
    #[default]
    Driving,
    /// A collision zeroed the driving speed; motion is momentum-only until
    /// the player accelerates again.
    Recovering,
}
