/*!
Simulation settings and tolerances.

These constants centralize the parameters used by the collision calculator,
the control integration and the surface integrators. Keeping them together
makes tuning easier and helps ensure deterministic behavior across platforms.

Notes
- Distances are in meters, time in seconds, angles in radians.
- Favor practical world-space tolerances over machine epsilon for robust
  behavior.
- Per-vehicle values (speed, acceleration, friction, steering) come from
  `VehicleConfig`; everything here is either a default for those or a fixed
  tolerance of the integrators.
*/

/// Default coefficient of restitution for dynamic collisions (0..1).
/// 0 is fully inelastic, 1 fully elastic.
pub const DEFAULT_RESTITUTION: f32 = 0.3;

/// Default damping applied to the reflected momentum when bouncing off an
/// immovable object.
pub const DEFAULT_STATIC_OBJECT_DAMPING: f32 = 0.4;

/// Default linear decay rate for collision momentum (1/s).
pub const DEFAULT_MOMENTUM_FRICTION: f32 = 0.4;

/// Momentum magnitude below which momentum is snapped to exactly zero.
/// Prevents unbounded tiny residual drift.
pub const DEFAULT_MOMENTUM_THRESHOLD: f32 = 0.05;

/// Default vehicle mass (kilograms) when a config does not supply one.
pub const DEFAULT_MASS: f32 = 1000.0;

/// Handbrake deceleration magnitude (units/s^2). Braking is a sign-aware
/// clamp toward zero and never overshoots into the opposite direction.
pub const HANDBRAKE_DECELERATION: f32 = 30.0;

/// Reverse speed limit as a fraction of `max_speed`.
pub const REVERSE_SPEED_RATIO: f32 = 0.5;

/// Minimum |speed| required before steering has any effect (units/s).
/// Below this the steer angle is forced to zero so a stationary vehicle
/// cannot spin in place.
pub const MIN_STEERING_SPEED: f32 = 0.5;

/// Minimum combined velocity magnitude required to translate this frame
/// (units/s). Velocities below this are snapped to zero to avoid perpetual
/// micro-jitter.
pub const MIN_MOVE_SPEED: f32 = 0.1;

/// Allowed drift from the exact surface radius in planet mode (meters)
/// before the position is re-projected onto the sphere.
pub const SURFACE_SNAP_TOLERANCE: f32 = 1.0e-3;

/// Practical small length for direction/axis degeneracy guards.
/// Use for zero-length normals, near-parallel alignment axes, etc.
pub const DIR_EPS: f32 = 1.0e-6;

/// Upper bound on a single integration step (seconds).
///
/// A stalled frame must not turn into one oversized step that tunnels the
/// vehicle through the sphere surface, so `update` clamps `dt` to this.
pub const MAX_STEP_SECONDS: f32 = 0.125;
