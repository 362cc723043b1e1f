/// CameraMan — owns the screen cameras of a session.
///
/// One to four `CameraScreen`s scroll independently through the same
/// scene. Gameplay sets a scroll target per screen every frame, the frame
/// loop calls `update` (or `update_all`), and renderers read
/// `render_offset` to draw layers. Screen indices outside the active range
/// are programming errors and panic.

use glam::{IVec2, Vec2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::Result;
use crate::scene_space::{SceneBox, SceneSpace};
use super::camera_config::{CameraConfig, FrameTime};
use super::camera_screen::CameraScreen;

/// Maximum number of simultaneous screens (split-screen players)
pub const MAX_SCREENS: usize = 4;

pub struct CameraMan {
    scene: SceneSpace,
    config: CameraConfig,
    screens: Vec<CameraScreen>,
    /// Shake direction generator
    rng: StdRng,
}

impl CameraMan {
    /// Create a camera man with a single screen of `viewport_size`
    pub fn new(scene: SceneSpace, config: CameraConfig, viewport_size: Vec2) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let screens = vec![CameraScreen::new(viewport_size, config.default_scroll_speed)];

        crate::engine_info!("galaxy2d::CameraMan",
            "Camera created for {}x{} scene (wrap {}/{})",
            scene.width(), scene.height(), scene.wraps_x(), scene.wraps_y());

        Self { scene, config, screens, rng }
    }

    // ===== SCENE & SCREENS =====

    pub fn scene(&self) -> &SceneSpace {
        &self.scene
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    /// Replace the scene (world reload). Screens restart at the origin with
    /// their viewport sizes kept.
    pub fn set_scene(&mut self, scene: SceneSpace) {
        self.scene = scene;
        for screen in &mut self.screens {
            *screen = CameraScreen::new(screen.viewport_size(), self.config.default_scroll_speed);
        }
        crate::engine_info!("galaxy2d::CameraMan",
            "Scene changed to {}x{} (wrap {}/{})",
            scene.width(), scene.height(), scene.wraps_x(), scene.wraps_y());
    }

    /// Recreate the screens
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfiguration` if `count` is not in `1..=4`.
    pub fn set_screen_count(&mut self, count: usize, viewport_size: Vec2) -> Result<()> {
        if count == 0 || count > MAX_SCREENS {
            crate::engine_bail_config!("galaxy2d::CameraMan",
                "Screen count must be between 1 and {}, got {}", MAX_SCREENS, count);
        }
        self.screens = (0..count)
            .map(|_| CameraScreen::new(viewport_size, self.config.default_scroll_speed))
            .collect();
        crate::engine_info!("galaxy2d::CameraMan",
            "Using {} screen(s) of {}x{}", count, viewport_size.x, viewport_size.y);
        Ok(())
    }

    pub fn screen_count(&self) -> usize {
        self.screens.len()
    }

    /// Screen state (panics if `screen` is out of range)
    pub fn screen(&self, screen: usize) -> &CameraScreen {
        match self.screens.get(screen) {
            Some(s) => s,
            None => panic!("CameraMan: screen {} out of range ({} active)", screen, self.screens.len()),
        }
    }

    pub fn screens(&self) -> &[CameraScreen] {
        &self.screens
    }

    fn screen_mut(&mut self, screen: usize) -> &mut CameraScreen {
        let count = self.screens.len();
        match self.screens.get_mut(screen) {
            Some(s) => s,
            None => panic!("CameraMan: screen {} out of range ({} active)", screen, count),
        }
    }

    /// Resize one screen (e.g. uneven split-screen layouts)
    pub fn set_screen_viewport(&mut self, screen: usize, viewport_size: Vec2) {
        let scene = self.scene;
        self.screen_mut(screen).set_viewport_size(&scene, viewport_size);
    }

    // ===== SCROLLING =====

    /// Set the point `screen` should center on
    ///
    /// # Arguments
    ///
    /// * `screen` - Screen index
    /// * `point` - Scene position to look at
    /// * `speed` - Smoothing rate in (0, 1]; non-positive uses the configured default
    /// * `wrapped` - Caller knows the target jumped across a seam. Jumps
    ///   larger than half a wrapping dimension are detected anyway.
    pub fn set_scroll_target(&mut self, screen: usize, point: Vec2, speed: f32, wrapped: bool) {
        let speed = if speed > 0.0 { speed.min(1.0) } else { self.config.default_scroll_speed };
        let scene = self.scene;
        self.screen_mut(screen).set_scroll_target(&scene, point, speed, wrapped);
    }

    pub fn scroll_target(&self, screen: usize) -> Vec2 {
        self.screen(screen).scroll_target()
    }

    /// Pre-shake top-left of the screen in scene space
    pub fn offset(&self, screen: usize) -> Vec2 {
        self.screen(screen).offset()
    }

    /// Offset layers should be drawn with (includes shake)
    pub fn render_offset(&self, screen: usize) -> Vec2 {
        self.screen(screen).render_offset()
    }

    /// Move the screen immediately (no smoothing), clamped on bounded axes
    pub fn set_offset(&mut self, screen: usize, offset: Vec2) {
        let scene = self.scene;
        self.screen_mut(screen).set_offset(&scene, offset);
    }

    /// Change of the unwrapped offset during the last update
    pub fn delta_offset(&self, screen: usize) -> Vec2 {
        self.screen(screen).delta_offset()
    }

    /// `offset + seam_cross_count * scene dimensions`, continuous across seams
    pub fn unwrapped_offset(&self, screen: usize) -> Vec2 {
        self.screen(screen).unwrapped_offset(&self.scene)
    }

    pub fn seam_cross_count(&self, screen: usize) -> IVec2 {
        self.screen(screen).seam_cross_count()
    }

    /// Area of the scene `screen` shows (pre-shake, unwrapped corner)
    pub fn visible_box(&self, screen: usize) -> SceneBox {
        self.screen(screen).visible_box()
    }

    pub fn set_screen_occlusion(&mut self, screen: usize, occlusion: Vec2) {
        self.screen_mut(screen).set_occlusion(occlusion);
    }

    pub fn screen_occlusion(&self, screen: usize) -> Vec2 {
        self.screen(screen).occlusion()
    }

    /// Advance one screen by one frame
    pub fn update(&mut self, screen: usize, frame: &FrameTime) {
        let angle = self.rng.gen_range(0.0..std::f32::consts::TAU);
        let direction = Vec2::from_angle(angle);
        let count = self.screens.len();
        let Some(state) = self.screens.get_mut(screen) else {
            panic!("CameraMan: screen {} out of range ({} active)", screen, count);
        };
        state.update(&self.scene, &self.config, frame, direction);
    }

    /// Advance every screen by one frame
    pub fn update_all(&mut self, frame: &FrameTime) {
        for screen in 0..self.screens.len() {
            self.update(screen, frame);
        }
    }

    // ===== QUERIES =====

    /// How far `point` is from every screen, in `[0, 1]`.
    ///
    /// 0 when the point is within some screen's radius (half its larger
    /// dimension) of that screen's scroll target; otherwise the smallest
    /// normalized distance between the screen radius and the scene radius.
    pub fn target_distance_scalar(&self, point: Vec2) -> f32 {
        let base_scene_radius = self.scene.dimensions().max_element() / 2.0;
        let mut scalar = 1.0f32;

        for screen in &self.screens {
            let screen_radius = screen.viewport_size().max_element() / 2.0;
            let mut scene_radius = base_scene_radius;
            if (scene_radius - screen_radius).abs() < f32::EPSILON {
                scene_radius += self.config.degenerate_radius_nudge;
            }

            let distance = self.scene.shortest_distance(screen.scroll_target(), point).length();
            if distance <= screen_radius {
                return 0.0;
            }
            let normalized = (distance - screen_radius) / (scene_radius - screen_radius);
            scalar = scalar.min(normalized.clamp(0.0, 1.0));
        }
        scalar
    }

    // ===== SHAKE =====

    /// Shake every screen near `origin`.
    ///
    /// Screens whose visible box contains `origin` get the full
    /// `magnitude`; the share falls linearly to 0 at
    /// `shake_falloff * max(viewport w, h)` from the box.
    pub fn add_screen_shake(&mut self, magnitude: f32, origin: Vec2) {
        let scene = self.scene;
        let falloff = self.config.shake_falloff;

        for (index, screen) in self.screens.iter_mut().enumerate() {
            let distance = scene.distance_to_box(origin, &screen.visible_box());
            let falloff_distance = falloff * screen.viewport_size().max_element();
            let multiplier = if distance <= 0.0 {
                1.0
            } else if falloff_distance <= 0.0 {
                0.0
            } else {
                (1.0 - distance / falloff_distance).max(0.0)
            };
            if multiplier > 0.0 {
                screen.add_shake_magnitude(magnitude * multiplier);
                crate::engine_trace!("galaxy2d::CameraMan",
                    "Screen {} shaken by {:.2} (distance {:.1})",
                    index, magnitude * multiplier, distance);
            }
        }
    }

    pub fn set_screen_shake(&mut self, screen: usize, magnitude: f32) {
        self.screen_mut(screen).set_shake_magnitude(magnitude);
    }

    pub fn screen_shake(&self, screen: usize) -> f32 {
        self.screen(screen).shake_magnitude()
    }

    pub fn reset_all_screen_shake(&mut self) {
        for screen in &mut self.screens {
            screen.set_shake_magnitude(0.0);
        }
    }
}

#[cfg(test)]
#[path = "camera_man_tests.rs"]
mod tests;
