/*!
Per-frame locomotion and collision response for drivable bodies.

A vehicle travels over either a flat ground plane or the surface of a
sphere, blending player-driven control with physically derived momentum
from collisions. The crate is split for clarity:

- types:     shared data types and math aliases (Vec3, Quat, Surface, ...)
- settings:  simulation constants and tolerances
- config:    per-vehicle tuning record
- collision: stateless momentum/impulse/separation calculator
- state:     per-vehicle kinematic state
- surface:   ground and planet position integrators
- vehicle:   control integration and the per-frame update entry point

Collision *detection* is out of scope: an external detector supplies
contact normals and participant masses/velocities, and this crate computes
the resulting momentum changes. Rendering, input mapping and asset loading
are likewise external collaborators that only read positions/orientations
and feed inputs through the `Vehicle` API.
*/

pub mod collision;
pub mod config;
pub mod settings;
pub mod state;
pub mod surface;
pub mod types;
pub mod vehicle;

pub use collision::{BodyState, CollisionConfig, CollisionPhysics, DynamicCollisionResult};
pub use config::VehicleConfig;
pub use state::VehicleState;
pub use types::{ControlInput, DriveMode, Quat, Surface, Vec3};
pub use vehicle::Vehicle;
