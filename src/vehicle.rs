/*!
Drivable vehicle: control integration and per-frame update.

A `Vehicle` owns its kinematic state exclusively. Each rendered frame the
caller supplies input via `set_input` and steps the simulation with
`update(dt)`; afterwards it reads `position()`/`orientation()` back into its
scene node. Collision impulses arrive by direct call from an external
collision detector between frames, never concurrently with the integrator.

Everything here is synchronous and single-threaded; the next frame always
sees the fully settled state of the previous one.
*/

use crate::collision::CollisionPhysics;
use crate::config::VehicleConfig;
use crate::settings::{
    HANDBRAKE_DECELERATION, MAX_STEP_SECONDS, MIN_STEERING_SPEED, REVERSE_SPEED_RATIO,
};
use crate::state::VehicleState;
use crate::surface::align_up_to_normal;
use crate::types::{ControlInput, DriveMode, Quat, Surface, Vec3};

/// A drivable body bound to a surface detected at construction time.
#[derive(Clone, Debug)]
pub struct Vehicle {
    config: VehicleConfig,
    surface: Surface,
    physics: CollisionPhysics,
    input: ControlInput,
    state: VehicleState,
}

impl Vehicle {
    /// Create a vehicle on `surface` near `position`.
    ///
    /// The position is projected onto the surface at ride height and the
    /// initial orientation is aligned to the local surface normal, so the
    /// invariants hold from the first frame.
    pub fn new(config: VehicleConfig, surface: Surface, position: Vec3) -> Self {
        let config = config.sanitized();
        let position = surface.snap_position(position, config.height_offset);
        let orientation = align_up_to_normal(Quat::identity(), surface.normal_at(position))
            .unwrap_or_else(Quat::identity);

        Self {
            config,
            surface,
            physics: CollisionPhysics::default(),
            input: ControlInput::default(),
            state: VehicleState::at_rest(position, orientation),
        }
    }

    /// Use a non-default collision calculator configuration.
    #[inline]
    pub fn with_collision_physics(mut self, physics: CollisionPhysics) -> Self {
        self.physics = physics;
        self
    }

    /// Store the player intent for the next `update`. Out-of-range analog
    /// values are clamped to `[-1, 1]`.
    #[inline]
    pub fn set_input(&mut self, input: ControlInput) {
        self.input = input.clamped();
    }

    /// Advance the simulation by one frame.
    ///
    /// `dt` is clamped to [`MAX_STEP_SECONDS`] so a stalled frame cannot
    /// become one oversized integration step; nonpositive `dt` is a no-op.
    pub fn update(&mut self, dt: f32) {
        if !(dt > 0.0) {
            if dt < 0.0 {
                log::debug!("ignoring update with negative dt {dt}");
            }
            return;
        }
        let dt = if dt > MAX_STEP_SECONDS {
            log::debug!("clamping oversized dt {dt} to {MAX_STEP_SECONDS}");
            MAX_STEP_SECONDS
        } else {
            dt
        };

        self.update_movement(dt);
        self.update_position(dt);
    }

    /// Control integration: speed and steer scalars from the current input.
    fn update_movement(&mut self, dt: f32) {
        let input = self.input;

        // New accelerate input restores driving authority after a collision.
        if input.accelerate != 0.0 && self.state.mode == DriveMode::Recovering {
            self.state.mode = DriveMode::Driving;
        }

        if input.handbrake {
            // Sign-aware clamp toward zero; braking never overshoots into
            // the opposite direction in one step.
            let braking = HANDBRAKE_DECELERATION * dt;
            self.state.speed = if self.state.speed > 0.0 {
                (self.state.speed - braking).max(0.0)
            } else {
                (self.state.speed + braking).min(0.0)
            };
        } else {
            self.state.speed += input.accelerate * self.config.acceleration * dt;
            self.state.speed = self.state.speed.clamp(
                -self.config.max_speed * REVERSE_SPEED_RATIO,
                self.config.max_speed,
            );
            self.state.speed *= self.config.friction.powf(dt);
        }

        // No turning while (nearly) stationary; otherwise steering authority
        // scales with signed speed, so it reverses automatically in reverse
        // gear.
        self.state.steer_angle = if self.state.speed.abs() < MIN_STEERING_SPEED {
            0.0
        } else {
            input.steer * self.config.max_steer_angle * self.state.speed
        };
    }

    /// Position integration, dispatched by the surface variant.
    fn update_position(&mut self, dt: f32) {
        self.surface.integrate(
            &mut self.state,
            &self.physics,
            self.config.mass,
            self.config.height_offset,
            dt,
        );
    }

    /// Apply a collision impulse computed by the external detector.
    ///
    /// The impulse is added to the collision momentum and the driving speed
    /// is zeroed: a collision always takes away driving authority for that
    /// instant. The vehicle then coasts under momentum until friction and
    /// new accelerate input bring it back under control.
    pub fn apply_collision_impulse(&mut self, impulse: Vec3) {
        self.state.momentum += self.physics.impulse_to_momentum(impulse);
        self.state.speed = 0.0;
        self.state.mode = DriveMode::Recovering;
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.state.position
    }

    #[inline]
    pub fn orientation(&self) -> Quat {
        self.state.orientation
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.state.speed
    }

    /// Derived world-space velocity from the last completed frame.
    #[inline]
    pub fn velocity(&self) -> Vec3 {
        self.state.velocity
    }

    #[inline]
    pub fn momentum(&self) -> Vec3 {
        self.state.momentum
    }

    #[inline]
    pub fn mass(&self) -> f32 {
        self.config.mass
    }

    #[inline]
    pub fn mode(&self) -> DriveMode {
        self.state.mode
    }

    #[inline]
    pub fn surface(&self) -> Surface {
        self.surface
    }

    #[inline]
    pub fn collision_physics(&self) -> &CollisionPhysics {
        &self.physics
    }

    /// Override the position (orchestrator seeding). The next `update`
    /// re-applies the surface invariants.
    #[inline]
    pub fn set_position(&mut self, position: Vec3) {
        self.state.position = position;
    }

    /// Override the derived velocity until the next `update` recomputes it.
    #[inline]
    pub fn set_velocity(&mut self, velocity: Vec3) {
        self.state.velocity = velocity;
    }

    #[inline]
    pub fn set_momentum(&mut self, momentum: Vec3) {
        self.state.momentum = momentum;
    }
}
