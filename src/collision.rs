/*!
Collision response calculator.

This module is a pure calculator: it owns no body state and performs no
detection. An external collision detector decides *that* two bodies hit and
supplies a contact normal plus the participants' masses and velocities; this
module computes the resulting momentum and velocity changes, friction decay
and separation distances. The caller applies the results.

Degenerate inputs (zero mass, zero-length normal, coincident positions) are
survived with defined fallbacks rather than surfaced as errors, because these
calculations run inside a per-frame simulation loop that must not stall.
*/

use crate::settings::{
    DEFAULT_MOMENTUM_FRICTION, DEFAULT_MOMENTUM_THRESHOLD, DEFAULT_RESTITUTION,
    DEFAULT_STATIC_OBJECT_DAMPING, DIR_EPS,
};
use crate::types::Vec3;

/// Fixed configuration for the collision calculator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CollisionConfig {
    /// Coefficient of restitution for dynamic collisions (0..1).
    pub restitution: f32,
    /// Damping applied to momentum reflected off an immovable object.
    pub static_object_damping: f32,
    /// Linear momentum decay rate (1/s).
    pub momentum_friction: f32,
    /// Momentum magnitude treated as zero.
    pub momentum_threshold: f32,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            restitution: DEFAULT_RESTITUTION,
            static_object_damping: DEFAULT_STATIC_OBJECT_DAMPING,
            momentum_friction: DEFAULT_MOMENTUM_FRICTION,
            momentum_threshold: DEFAULT_MOMENTUM_THRESHOLD,
        }
    }
}

/// Velocity and mass of one collision participant, as observed by the
/// external detector at the moment of contact.
#[derive(Clone, Copy, Debug)]
pub struct BodyState {
    /// World-space velocity (units/s).
    pub velocity: Vec3,
    /// Body mass (kilograms).
    pub mass: f32,
}

impl BodyState {
    #[inline]
    pub fn new(velocity: Vec3, mass: f32) -> Self {
        Self { velocity, mass }
    }

    /// Current momentum (mass * velocity).
    #[inline]
    pub fn momentum(&self) -> Vec3 {
        self.velocity * self.mass
    }
}

/// Outcome of a dynamic (two movable bodies) collision.
#[derive(Clone, Copy, Debug)]
pub struct DynamicCollisionResult {
    /// Post-collision velocity of body 1.
    pub velocity1: Vec3,
    /// Post-collision velocity of body 2.
    pub velocity2: Vec3,
    /// Impulse applied to body 1 along the normal; body 2 receives the
    /// negation.
    pub impulse: Vec3,
    /// True when the bodies were approaching along the normal, signaling the
    /// caller to also apply positional correction (see
    /// [`CollisionPhysics::calculate_separation`]).
    pub should_separate: bool,
}

/// Stateless collision calculator, configured once and shareable read-only
/// across any number of callers.
#[derive(Clone, Copy, Debug, Default)]
pub struct CollisionPhysics {
    config: CollisionConfig,
}

impl CollisionPhysics {
    #[inline]
    pub fn new(config: CollisionConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &CollisionConfig {
        &self.config
    }

    /// Momentum after bouncing off an immovable object.
    ///
    /// Reflects the body's current momentum across `normal`
    /// (`m' = m - 2(m.n)n`), then scales by the static-object damping.
    ///
    /// A degenerate (near zero length) normal makes the reflection undefined;
    /// in that case the momentum is only damped, not reflected.
    pub fn calculate_static_collision(&self, body: &BodyState, normal: Vec3) -> Vec3 {
        let momentum = body.momentum();

        let len_sq = normal.norm_squared();
        if len_sq <= DIR_EPS * DIR_EPS {
            log::warn!("static collision with degenerate normal; damping without reflection");
            return momentum * self.config.static_object_damping;
        }

        let n = normal / len_sq.sqrt();
        let reflected = momentum - n * (2.0 * momentum.dot(&n));
        reflected * self.config.static_object_damping
    }

    /// Impulse-based resolution of a collision between two movable bodies.
    ///
    /// `normal` points from `body1` toward `body2`; callers must honor this
    /// orientation or the impulse signs invert. Uses the configured
    /// coefficient of restitution `e`:
    ///
    /// ```text
    /// vn = (v1 - v2) . n
    /// j  = -(1 + e) * vn / (1/m1 + 1/m2)
    /// ```
    ///
    /// Body 1 receives `+j*n / m1`, body 2 receives `-j*n / m2`. A
    /// nonpositive mass contributes no inverse mass (the body behaves as
    /// immovable); if both masses are degenerate the impulse is zero.
    pub fn calculate_dynamic_collision(
        &self,
        body1: &BodyState,
        body2: &BodyState,
        normal: Vec3,
    ) -> DynamicCollisionResult {
        let len_sq = normal.norm_squared();
        if len_sq <= DIR_EPS * DIR_EPS {
            log::warn!("dynamic collision with degenerate normal; no impulse applied");
            return DynamicCollisionResult {
                velocity1: body1.velocity,
                velocity2: body2.velocity,
                impulse: Vec3::zeros(),
                should_separate: false,
            };
        }
        let n = normal / len_sq.sqrt();

        let inv_mass1 = if body1.mass > 0.0 { 1.0 / body1.mass } else { 0.0 };
        let inv_mass2 = if body2.mass > 0.0 { 1.0 / body2.mass } else { 0.0 };
        let inv_sum = inv_mass1 + inv_mass2;

        let vn = (body1.velocity - body2.velocity).dot(&n);

        let j = if inv_sum > 0.0 {
            -(1.0 + self.config.restitution) * vn / inv_sum
        } else {
            0.0
        };

        let impulse = n * j;
        DynamicCollisionResult {
            velocity1: body1.velocity + impulse * inv_mass1,
            velocity2: body2.velocity - impulse * inv_mass2,
            impulse,
            should_separate: vn > 0.0,
        }
    }

    /// Unit contact normal from `p1` toward `p2`, or `None` when the points
    /// are (near) coincident and no direction exists.
    pub fn calculate_collision_normal(&self, p1: Vec3, p2: Vec3) -> Option<Vec3> {
        let delta = p2 - p1;
        let len_sq = delta.norm_squared();
        if len_sq <= DIR_EPS * DIR_EPS {
            return None;
        }
        Some(delta / len_sq.sqrt())
    }

    /// Linear friction decay of collision momentum over `dt`.
    ///
    /// Applies `momentum * max(0, 1 - friction*dt)` (the factor is clamped so
    /// an oversized step decays to zero instead of inverting the direction)
    /// and snaps the result to the zero vector once below the momentum
    /// threshold.
    pub fn apply_momentum_friction(&self, momentum: Vec3, dt: f32) -> Vec3 {
        let factor = (1.0 - self.config.momentum_friction * dt).max(0.0);
        let decayed = momentum * factor;
        if decayed.norm() < self.config.momentum_threshold {
            Vec3::zeros()
        } else {
            decayed
        }
    }

    /// True when `momentum` is below the configured threshold.
    #[inline]
    pub fn is_momentum_negligible(&self, momentum: Vec3) -> bool {
        momentum.norm() < self.config.momentum_threshold
    }

    /// Split a required separation distance between two bodies, inversely by
    /// mass: the lighter body moves farther. Doubled when the bodies are
    /// already interpenetrating. A degenerate total mass yields an even split.
    pub fn calculate_separation(
        &self,
        mass1: f32,
        mass2: f32,
        distance: f32,
        interpenetrating: bool,
    ) -> (f32, f32) {
        let distance = if interpenetrating { distance * 2.0 } else { distance };

        let total = mass1 + mass2;
        if total <= 0.0 {
            return (distance * 0.5, distance * 0.5);
        }
        (distance * mass2 / total, distance * mass1 / total)
    }

    /// Blunt push-back impulse along `normal`, used when two bodies are stuck
    /// interpenetrating and the normal ordering is unreliable.
    #[inline]
    pub fn calculate_reverse_impulse(&self, velocity: Vec3, mass: f32, normal: Vec3) -> Vec3 {
        normal * (-velocity.norm() * mass)
    }

    /// Convert momentum to velocity. Returns the zero vector for a
    /// nonpositive mass instead of dividing by zero.
    #[inline]
    pub fn momentum_to_velocity(&self, momentum: Vec3, mass: f32) -> Vec3 {
        if mass > 0.0 {
            momentum / mass
        } else {
            Vec3::zeros()
        }
    }

    /// Convert velocity to momentum.
    #[inline]
    pub fn velocity_to_momentum(&self, velocity: Vec3, mass: f32) -> Vec3 {
        velocity * mass
    }

    /// Impulse and momentum share units by convention; this is an identity
    /// copy kept for API symmetry.
    #[inline]
    pub fn impulse_to_momentum(&self, impulse: Vec3) -> Vec3 {
        impulse
    }
}
