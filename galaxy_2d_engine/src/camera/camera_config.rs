/// Camera tuning values and per-frame timing input

/// Camera tuning values.
///
/// The defaults reproduce the shipped feel of the camera; change them per
/// game mode rather than patching the update code.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraConfig {
    /// Smoothing factor k in `offset += delta * min(1, speed * elapsed_ms * k)`
    pub scroll_time_scale: f32,
    /// Scroll speed used when a caller passes a non-positive speed
    pub default_scroll_speed: f32,
    /// Multiplier from shake magnitude to shake offset in pixels
    pub shake_strength: f32,
    /// Shake magnitude lost per second
    pub shake_decay: f32,
    /// Longest shake in seconds; magnitude is capped at `shake_decay * max_shake_time`
    pub max_shake_time: f32,
    /// Shake falloff distance as a multiple of the screen's larger dimension
    pub shake_falloff: f32,
    /// Added to the scene radius when it equals the screen radius
    pub degenerate_radius_nudge: f32,
    /// Seed for the shake direction generator, `None` for OS entropy
    pub rng_seed: Option<u64>,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            scroll_time_scale: 0.05,
            default_scroll_speed: 0.1,
            shake_strength: 1.0,
            shake_decay: 50.0,
            max_shake_time: 1.0,
            shake_falloff: 0.3,
            degenerate_radius_nudge: 100.0,
            rng_seed: None,
        }
    }
}

impl CameraConfig {
    /// Upper bound of any screen's shake magnitude
    pub fn max_shake_magnitude(&self) -> f32 {
        self.shake_decay * self.max_shake_time
    }
}

/// Timing of the frame being advanced
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    /// Milliseconds since the previous camera update
    pub elapsed_ms: f32,
    /// True when a new simulation frame has been drawn since the previous update
    pub sim_frame_drawn: bool,
}

impl FrameTime {
    pub fn new(elapsed_ms: f32, sim_frame_drawn: bool) -> Self {
        Self { elapsed_ms, sim_frame_drawn }
    }

    pub fn elapsed_seconds(&self) -> f32 {
        self.elapsed_ms / 1000.0
    }
}
