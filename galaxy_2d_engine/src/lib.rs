/*!
# Galaxy 2D Engine

Wrapping scene-space renderer and split-screen camera system for the Galaxy2D engine.

The scene is a 2D world whose axes may each wrap (toroidal topology) or be
bounded. Raster layers (terrain, backdrops, parallax art) are drawn into
viewports through a backend-agnostic `Renderer` trait, and one to four
independent screen cameras scroll smoothly through the scene, across wrap
seams, with additive screen shake.

## Architecture

- **SceneSpace**: scene dimensions, wrap flags, and all wrap-aware geometry
- **ScrollLayer**: a raster plus placement, parallax, scale and edge fill
- **LayerStack**: ordered, named collection of scroll layers
- **CameraMan**: owns the screen cameras and advances them every frame
- **Renderer**: blit/fill/clip factory trait implemented by backends
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod renderer;
pub mod resource;
pub mod scene_space;
pub mod layer;
pub mod camera;

// Main galaxy2d namespace module
pub mod galaxy2d {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine (logging hub)
    pub use crate::engine::Engine;

    // Renderer factory trait
    pub use crate::renderer::Renderer;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Render sub-module with all rendering types
    pub mod render {
        pub use crate::renderer::*;
    }

    // Resource sub-module
    pub mod resource {
        pub use crate::resource::*;
    }

    // Scene space (wrap math) sub-module
    pub mod scene {
        pub use crate::scene_space::*;
    }

    // Layer sub-module
    pub mod layer {
        pub use crate::layer::*;
    }

    // Camera sub-module
    pub mod camera {
        pub use crate::camera::*;
    }
}

// Re-export math library at crate root
pub use glam;
