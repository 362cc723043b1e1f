//! Scene space module — wrap-aware geometry
//!
//! Pure geometric utilities shared by layers, cameras and gameplay code:
//! wrapping or clamping coordinates, shortest distance under wraparound,
//! and replicating boxes that straddle a wrap seam.

mod wrap;
mod scene_box;
mod scene_space;

pub use wrap::{wrap_coordinate, force_bounds, shortest_axis_distance};
pub use scene_box::SceneBox;
pub use scene_space::{SceneSpace, AXIS_X, AXIS_Y};
