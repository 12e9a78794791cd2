/*!
Surface-specific position integrators.

The `Surface` variant selected at construction dispatches the per-frame
position update:

- ground: translation on the horizontal plane with an authoritative height
  clamp, yaw about world up.
- planet: translation realized as a rotation of the position vector about
  the planet center, with tangent-plane projection of the velocity, an
  explicit re-projection onto the exact ride radius, and re-alignment of
  the vehicle's up axis to the moving surface normal.

Both integrators share the momentum decay and the negligible-velocity
early-out; only the geometry differs.
*/

use nalgebra as na;

use crate::collision::CollisionPhysics;
use crate::settings::{DIR_EPS, MIN_MOVE_SPEED, SURFACE_SNAP_TOLERANCE};
use crate::state::VehicleState;
use crate::types::{Quat, Surface, Vec3, local_forward, local_up};

impl Surface {
    /// Surface normal at `position`: constant world up on the ground,
    /// the outward radial direction on a planet.
    #[inline]
    pub fn normal_at(&self, position: Vec3) -> Vec3 {
        match *self {
            Surface::Ground { .. } => local_up(),
            Surface::Planet { center, .. } => planet_normal(position, center),
        }
    }

    /// Project `position` onto the surface at ride height `height_offset`.
    pub(crate) fn snap_position(&self, position: Vec3, height_offset: f32) -> Vec3 {
        match *self {
            Surface::Ground { height } => {
                Vec3::new(position.x, height + height_offset, position.z)
            }
            Surface::Planet { center, radius } => {
                let normal = planet_normal(position, center);
                center + normal * (radius + height_offset)
            }
        }
    }

    /// Run one position integration step for this surface.
    pub(crate) fn integrate(
        &self,
        state: &mut VehicleState,
        physics: &CollisionPhysics,
        mass: f32,
        height_offset: f32,
        dt: f32,
    ) {
        match *self {
            Surface::Ground { height } => {
                integrate_ground(state, physics, mass, height + height_offset, dt);
            }
            Surface::Planet { center, radius } => {
                integrate_planet(state, physics, mass, center, radius, height_offset, dt);
            }
        }
    }
}

/// Ground-plane integration step.
fn integrate_ground(
    state: &mut VehicleState,
    physics: &CollisionPhysics,
    mass: f32,
    ride_height: f32,
    dt: f32,
) {
    state.momentum = physics.apply_momentum_friction(state.momentum, dt);

    let forward = state.orientation * local_forward();
    let velocity = forward * state.speed + physics.momentum_to_velocity(state.momentum, mass);

    if velocity.norm() < MIN_MOVE_SPEED {
        // Snap to rest instead of integrating micro-jitter forever.
        state.velocity = Vec3::zeros();
    } else {
        state.velocity = velocity;
        state.position += velocity * dt;
    }

    // Height is authoritative, never integrated.
    state.position.y = ride_height;

    if state.steer_angle != 0.0 {
        let yaw = Quat::from_axis_angle(&Vec3::y_axis(), state.steer_angle * dt);
        state.orientation = yaw * state.orientation;
    }
}

/// Planet-sphere integration step.
///
/// Translation along the curved surface is realized without ever leaving the
/// sphere: the velocity is projected onto the local tangent plane, the arc
/// length `|v_t| * dt` is converted to an angle about the planet center, and
/// the position vector relative to the center is rotated by that angle.
fn integrate_planet(
    state: &mut VehicleState,
    physics: &CollisionPhysics,
    mass: f32,
    center: Vec3,
    radius: f32,
    height_offset: f32,
    dt: f32,
) {
    state.momentum = physics.apply_momentum_friction(state.momentum, dt);

    let normal = planet_normal(state.position, center);
    let forward = state.orientation * local_forward();
    let velocity = forward * state.speed + physics.momentum_to_velocity(state.momentum, mass);

    let mut orientation_touched = false;

    // Steering rotates about the vehicle's local up transformed to world
    // space, not the raw surface normal, so steering feel is independent of
    // absolute position on the sphere.
    if state.steer_angle != 0.0 {
        let up_world = state.orientation * local_up();
        let axis = na::Unit::new_normalize(up_world);
        let steer = Quat::from_axis_angle(&axis, state.steer_angle * dt);
        state.orientation = steer * state.orientation;
        orientation_touched = true;
    }

    if velocity.norm() < MIN_MOVE_SPEED {
        state.velocity = Vec3::zeros();
    } else {
        state.velocity = velocity;

        // The stored forward (and thus the velocity) may carry a component
        // off the tangent plane from prior alignment corrections; project it
        // out before converting to an arc.
        let tangent_velocity = velocity - normal * velocity.dot(&normal);
        let tangent_speed = tangent_velocity.norm();
        if tangent_speed > DIR_EPS {
            let tangent_dir = tangent_velocity / tangent_speed;
            let angle = tangent_speed * dt / radius;
            let axis = na::Unit::new_normalize(normal.cross(&tangent_dir));
            let travel = Quat::from_axis_angle(&axis, angle);
            let rel = state.position - center;
            state.position = center + travel * rel;
        }
    }

    // Re-project onto the exact ride radius once drift exceeds tolerance;
    // step 5's rotation is not relied upon to be exact.
    let ride_radius = radius + height_offset;
    let rel = state.position - center;
    let dist = rel.norm();
    if (dist - ride_radius).abs() > SURFACE_SNAP_TOLERANCE && dist > DIR_EPS {
        state.position = center + rel * (ride_radius / dist);
    }

    // The body orbits the sphere, so "up" changed: re-align to the normal at
    // the new position, preserving the steering-adjusted heading.
    let new_normal = planet_normal(state.position, center);
    if let Some(aligned) = align_up_to_normal(state.orientation, new_normal) {
        state.orientation = aligned;
        orientation_touched = true;
    }

    if orientation_touched {
        state.orientation = Quat::new_normalize(state.orientation.into_inner());
    }
}

/// Outward surface normal of a planet at `position`. Falls back to world up
/// when the position coincides with the center and no direction exists.
fn planet_normal(position: Vec3, center: Vec3) -> Vec3 {
    let rel = position - center;
    let len_sq = rel.norm_squared();
    if len_sq <= DIR_EPS * DIR_EPS {
        log::debug!("position coincides with planet center; using world up as surface normal");
        return local_up();
    }
    rel / len_sq.sqrt()
}

/// Rotate `orientation` so its local up aligns with `target_normal`,
/// composed before the current orientation.
///
/// Uses an arcsine small-angle formulation (`angle = asin(|up x target|)`),
/// which is stable near perfect alignment; the per-frame normal change on a
/// sphere is small, so large misalignments do not occur in practice.
///
/// Returns `None` when the cross product is degenerate. That covers both the
/// already-aligned case and the ambiguous antipodal case: an exactly opposite
/// normal has no preferred rotation axis, so the orientation is left as-is.
pub(crate) fn align_up_to_normal(orientation: Quat, target_normal: Vec3) -> Option<Quat> {
    let current_up = orientation * local_up();
    let axis = current_up.cross(&target_normal);
    let len = axis.norm();
    if len <= DIR_EPS {
        return None;
    }

    let angle = len.clamp(0.0, 1.0).asin();
    let rotation = Quat::from_axis_angle(&na::Unit::new_normalize(axis), angle);
    Some(rotation * orientation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use crate::types::DriveMode;

    fn resting_state(position: Vec3) -> VehicleState {
        VehicleState::at_rest(position, Quat::identity())
    }

    #[test]
    fn align_is_noop_when_already_aligned() {
        let orientation = Quat::identity();
        assert!(align_up_to_normal(orientation, local_up()).is_none());
    }

    #[test]
    fn align_is_noop_for_antipodal_normal() {
        // Opposite vectors give a degenerate axis; the ambiguous 180-degree
        // rotation is deliberately not resolved.
        let orientation = Quat::identity();
        assert!(align_up_to_normal(orientation, -local_up()).is_none());
    }

    #[test]
    fn align_tilts_up_toward_target_normal() {
        let target = Vec3::new(0.2, 1.0, 0.0).normalize();
        let aligned = align_up_to_normal(Quat::identity(), target).unwrap();
        let new_up = aligned * local_up();
        assert_relative_eq!(new_up, target, epsilon = 1.0e-4);
    }

    #[test]
    fn ground_integration_clamps_height_every_step() {
        let surface = Surface::Ground { height: 2.0 };
        let physics = CollisionPhysics::default();
        let mut state = resting_state(Vec3::new(0.0, 2.5, 0.0));
        state.speed = 10.0;

        for _ in 0..60 {
            surface.integrate(&mut state, &physics, 1000.0, 0.5, 1.0 / 60.0);
            assert_eq!(state.position.y, 2.5);
        }
        // Driving forward (-Z) actually moved the vehicle.
        assert!(state.position.z < -5.0);
    }

    #[test]
    fn ground_momentum_translates_and_decays() {
        let surface = Surface::Ground { height: 0.0 };
        let physics = CollisionPhysics::default();
        let mut state = resting_state(Vec3::new(0.0, 0.0, 0.0));
        state.momentum = Vec3::new(2000.0, 0.0, 0.0);

        surface.integrate(&mut state, &physics, 1000.0, 0.0, 0.1);

        // Momentum decayed first (factor 0.96), then moved the body.
        assert_relative_eq!(state.momentum.x, 1920.0, max_relative = 1.0e-5);
        assert_relative_eq!(state.position.x, 0.192, max_relative = 1.0e-5);
    }

    #[test]
    fn ground_negligible_velocity_snaps_to_rest() {
        let surface = Surface::Ground { height: 0.0 };
        let physics = CollisionPhysics::default();
        let mut state = resting_state(Vec3::new(1.0, 0.0, 1.0));
        state.momentum = Vec3::new(50.0, 0.0, 0.0); // 0.05 units/s at mass 1000

        surface.integrate(&mut state, &physics, 1000.0, 0.0, 1.0 / 60.0);

        assert_eq!(state.velocity, Vec3::zeros());
        assert_eq!(state.position.x, 1.0);
        assert_eq!(state.position.z, 1.0);
    }

    #[test]
    fn planet_drive_stays_on_sphere_and_keeps_up_aligned() {
        let center = Vec3::new(10.0, -4.0, 3.0);
        let radius = 50.0;
        let surface = Surface::Planet { center, radius };
        let physics = CollisionPhysics::default();

        let start = center + Vec3::new(0.0, radius + 0.5, 0.0);
        let mut state = resting_state(start);
        state.speed = 12.0;

        for _ in 0..600 {
            surface.integrate(&mut state, &physics, 1000.0, 0.5, 1.0 / 60.0);

            let dist = (state.position - center).norm();
            assert!((dist - (radius + 0.5)).abs() < 1.0e-3);

            let up = state.orientation * local_up();
            let normal = surface.normal_at(state.position);
            assert!(up.dot(&normal) > 0.999);
        }

        // Forward is -Z at identity, so the vehicle left the pole toward -Z.
        assert!((state.position - start).norm() > 1.0);
        assert!(state.position.z < start.z);
    }

    #[test]
    fn planet_momentum_moves_the_vehicle() {
        let center = Vec3::zeros();
        let radius = 40.0;
        let surface = Surface::Planet { center, radius };
        let physics = CollisionPhysics::default();

        let start = Vec3::new(0.0, radius, 0.0);
        let mut state = resting_state(start);
        state.mode = DriveMode::Recovering;
        state.momentum = Vec3::new(4000.0, 0.0, 0.0); // 4 units/s at mass 1000

        for _ in 0..30 {
            surface.integrate(&mut state, &physics, 1000.0, 0.0, 1.0 / 60.0);
        }

        assert!(state.position.x > 0.5);
        let dist = (state.position - center).norm();
        assert!((dist - radius).abs() < 1.0e-3);
    }

    #[test]
    fn snap_position_projects_to_ride_height() {
        let ground = Surface::Ground { height: 1.0 };
        let snapped = ground.snap_position(Vec3::new(4.0, 9.0, -2.0), 0.5);
        assert_eq!(snapped, Vec3::new(4.0, 1.5, -2.0));

        let planet = Surface::Planet {
            center: Vec3::zeros(),
            radius: 10.0,
        };
        let snapped = planet.snap_position(Vec3::new(0.0, 25.0, 0.0), 0.5);
        assert_relative_eq!(snapped, Vec3::new(0.0, 10.5, 0.0), max_relative = 1.0e-6);
    }
}
