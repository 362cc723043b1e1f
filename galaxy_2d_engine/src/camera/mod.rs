//! Camera module
//!
//! Split-screen cameras: per-screen smoothed scrolling through a wrapping
//! scene, seam-crossing bookkeeping and localized screen shake.

pub mod camera_config;
pub mod camera_screen;
pub mod camera_man;

pub use camera_config::{CameraConfig, FrameTime};
pub use camera_screen::CameraScreen;
pub use camera_man::{CameraMan, MAX_SCREENS};
