/*!
Per-vehicle tuning record.

A `VehicleConfig` is consumed once at construction and immutable thereafter.
An external config source (loader, fetcher) owns where the values come from;
this crate only validates them.
*/

use crate::settings::DEFAULT_MASS;

/// Tuning parameters for one vehicle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VehicleConfig {
    /// Forward speed limit (units/s). Reverse is limited to half of this.
    pub max_speed: f32,
    /// Throttle acceleration at full input (units/s^2).
    pub acceleration: f32,
    /// Per-second speed retention factor in `(0, 1]`; applied as
    /// `speed *= friction^dt` each frame.
    pub friction: f32,
    /// Steering authority (radians per unit of speed at full steer input).
    pub max_steer_angle: f32,
    /// Ride height above the detected surface (meters).
    pub height_offset: f32,
    /// Vehicle mass (kilograms); must be positive.
    pub mass: f32,
}

impl VehicleConfig {
    /// Build a config with the default mass.
    #[inline]
    pub fn new(
        max_speed: f32,
        acceleration: f32,
        friction: f32,
        max_steer_angle: f32,
        height_offset: f32,
    ) -> Self {
        Self {
            max_speed,
            acceleration,
            friction,
            max_steer_angle,
            height_offset,
            mass: DEFAULT_MASS,
        }
    }

    /// Override the mass.
    #[inline]
    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self
    }

    /// Return a copy with out-of-range fields clamped to usable values.
    ///
    /// A nonpositive mass would make every momentum-to-velocity conversion
    /// degenerate, so it falls back to the default mass with a warning.
    pub fn sanitized(self) -> Self {
        let mut cfg = self;
        if !(cfg.mass > 0.0) {
            log::warn!(
                "vehicle config has nonpositive mass {}; using default {}",
                cfg.mass,
                DEFAULT_MASS
            );
            cfg.mass = DEFAULT_MASS;
        }
        cfg.max_speed = cfg.max_speed.max(0.0);
        cfg.acceleration = cfg.acceleration.max(0.0);
        cfg.friction = cfg.friction.clamp(0.0, 1.0);
        cfg
    }
}
