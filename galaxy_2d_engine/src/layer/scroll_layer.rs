/// ScrollLayer - a raster drawn into viewports with wrapping, parallax,
/// scaling and edge fill.
///
/// A layer is created once from a decoded `Raster`: the pixels are uploaded
/// through the renderer, the four edge-fill colors are sampled and the
/// parallax setting is resolved into a scroll ratio. Each frame the driver
/// sets the layer offset (usually from a camera) and calls `draw`.

use std::sync::{Arc, Mutex};
use glam::{BVec2, UVec2, Vec2};

use crate::error::Result;
use crate::renderer::{BlitFlip, Color, Rect2D, Renderer, Texture};
use crate::resource::Raster;
use crate::scene_space::{force_bounds, wrap_coordinate, SceneSpace, AXIS_X, AXIS_Y};
use super::draw_plan::{plan_axis, AxisPlan, ContentSpan, Edge};
use super::parallax::Parallax;

// ===== EDGE FILL =====

/// Colors used to fill the destination outside a non-wrapping layer.
///
/// Sampled once from the middle of each raster edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EdgeFill {
    pub left: Color,
    pub right: Color,
    pub up: Color,
    pub down: Color,
}

impl EdgeFill {
    /// Sample the middle pixel of each edge of `raster`
    pub fn sample(raster: &Raster) -> Self {
        let w = raster.width() as i64;
        let h = raster.height() as i64;
        let at = |x: i64, y: i64| raster.pixel(x, y).unwrap_or(Color::TRANSPARENT);
        Self {
            left: at(0, h / 2),
            right: at(w - 1, h / 2),
            up: at(w / 2, 0),
            down: at(w / 2, h - 1),
        }
    }

    /// Edge colors of the mirrored art
    pub fn flipped(self, flip: BlitFlip) -> Self {
        let mut fill = self;
        if flip.contains(BlitFlip::HORIZONTAL) {
            std::mem::swap(&mut fill.left, &mut fill.right);
        }
        if flip.contains(BlitFlip::VERTICAL) {
            std::mem::swap(&mut fill.up, &mut fill.down);
        }
        fill
    }
}

// ===== DRAW PATH =====

/// Which path the last draw took
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawPath {
    /// Content covered the destination on both axes (wrap-around split)
    Quadrants,
    /// Content was smaller than the destination on at least one axis
    Tiled,
}

// ===== SCROLL LAYER DESC =====

/// Descriptor for creating a ScrollLayer
pub struct ScrollLayerDesc {
    /// Layer name, also used as texture name
    pub name: String,
    pub renderer: Arc<Mutex<dyn Renderer>>,
    pub raster: Arc<Raster>,
    pub wrap_x: bool,
    pub wrap_y: bool,
    pub parallax: Parallax,
    /// Drawn size = raster size * scale factor (must be positive)
    pub scale_factor: Vec2,
    pub offset: Vec2,
    pub flip: BlitFlip,
    /// Scene the layer scrolls through (parallax resolution only)
    pub scene: SceneSpace,
    /// Screen size used for parallax resolution, `None` for the renderer's
    /// current viewport
    pub viewport_size: Option<UVec2>,
}

// ===== SCROLL LAYER =====

pub struct ScrollLayer {
    name: String,
    texture: Arc<dyn Texture>,
    raster: Arc<Raster>,
    wrap: BVec2,
    offset: Vec2,
    scroll_ratio: Vec2,
    scale_factor: Vec2,
    scale_inverse: Vec2,
    edge_fill: EdgeFill,
    flip: BlitFlip,
    effective_offset: Vec2,
    last_draw_path: Option<DrawPath>,
}

impl ScrollLayer {
    /// Create a layer from a descriptor
    ///
    /// # Errors
    ///
    /// - `Error::InvalidResource` if the raster has a zero dimension
    /// - `Error::InvalidConfiguration` if the scale factor is not positive
    /// - Any error returned by `Renderer::create_texture`
    pub fn from_desc(desc: ScrollLayerDesc) -> Result<Self> {
        // ========== VALIDATION ==========
        if desc.raster.is_empty() {
            crate::engine_bail_resource!("galaxy2d::ScrollLayer",
                "Layer '{}' has an empty raster ({}x{})",
                desc.name, desc.raster.width(), desc.raster.height());
        }
        validate_scale(&desc.name, desc.scale_factor)?;

        // ========== UPLOAD ==========
        let (texture, renderer_viewport) = {
            let mut renderer = desc.renderer.lock().map_err(|_| {
                crate::engine_err!("galaxy2d::ScrollLayer",
                    "Renderer lock poisoned while creating layer '{}'", desc.name)
            })?;
            let texture = renderer.create_texture(desc.raster.texture_desc(&desc.name))?;
            (texture, renderer.viewport_size())
        };

        // ========== PARALLAX ==========
        let wrap = BVec2::new(desc.wrap_x, desc.wrap_y);
        let viewport = desc.viewport_size.unwrap_or(renderer_viewport).as_vec2();
        let scaled = scaled_size(&desc.raster, desc.scale_factor).as_vec2();
        let scroll_ratio = desc.parallax.resolve(scaled, &desc.scene, viewport, wrap);

        let edge_fill = EdgeFill::sample(&desc.raster).flipped(desc.flip);

        crate::engine_debug!("galaxy2d::ScrollLayer",
            "Created layer '{}' ({}x{}, wrap {:?}, ratio {:?}, scale {:?})",
            desc.name, desc.raster.width(), desc.raster.height(),
            wrap, scroll_ratio, desc.scale_factor);

        Ok(Self {
            name: desc.name,
            texture,
            raster: desc.raster,
            wrap,
            offset: desc.offset,
            scroll_ratio,
            scale_factor: desc.scale_factor,
            scale_inverse: desc.scale_factor.recip(),
            edge_fill,
            flip: desc.flip,
            effective_offset: Vec2::ZERO,
            last_draw_path: None,
        })
    }

    // ===== ACCESSORS =====

    pub fn name(&self) -> &str { &self.name }

    pub fn texture(&self) -> &Arc<dyn Texture> { &self.texture }

    pub fn raster(&self) -> &Arc<Raster> { &self.raster }

    /// Raster width (unscaled)
    pub fn width(&self) -> u32 { self.raster.width() }

    /// Raster height (unscaled)
    pub fn height(&self) -> u32 { self.raster.height() }

    pub fn wraps_x(&self) -> bool { self.wrap.x }

    pub fn wraps_y(&self) -> bool { self.wrap.y }

    pub fn wraps(&self) -> BVec2 { self.wrap }

    pub fn offset(&self) -> Vec2 { self.offset }

    /// Set the top-left sampling position (before the scroll ratio)
    pub fn set_offset(&mut self, offset: Vec2) {
        self.offset = offset;
    }

    pub fn scroll_ratio(&self) -> Vec2 { self.scroll_ratio }

    pub fn scale_factor(&self) -> Vec2 { self.scale_factor }

    pub fn scale_inverse(&self) -> Vec2 { self.scale_inverse }

    /// Change the scale factor, keeping its inverse in sync
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfiguration` if either component is not
    /// strictly positive.
    pub fn set_scale_factor(&mut self, scale_factor: Vec2) -> Result<()> {
        validate_scale(&self.name, scale_factor)?;
        self.scale_factor = scale_factor;
        self.scale_inverse = scale_factor.recip();
        Ok(())
    }

    /// True when the layer is drawn at a size other than 1:1
    pub fn is_scaled(&self) -> bool {
        self.scale_factor != Vec2::ONE
    }

    /// Drawn size in pixels (floor of raster size * scale, at least 1)
    pub fn scaled_dimensions(&self) -> UVec2 {
        scaled_size(&self.raster, self.scale_factor)
    }

    pub fn edge_fill(&self) -> EdgeFill { self.edge_fill }

    pub fn flip(&self) -> BlitFlip { self.flip }

    /// Content offset used by the last draw (wrapped or clamped)
    pub fn effective_offset(&self) -> Vec2 { self.effective_offset }

    /// Path taken by the last draw, `None` before the first draw
    pub fn last_draw_path(&self) -> Option<DrawPath> { self.last_draw_path }

    // ===== PIXEL QUERIES =====

    /// Raster pixel at (x, y) in raster coordinates.
    ///
    /// Wrapping axes wrap the coordinate, bounded axes clamp it to the edge.
    pub fn pixel(&self, x: f32, y: f32) -> Color {
        let (x, _) = force_bounds(x, self.raster.width() as f32, self.wrap.x);
        let (y, _) = force_bounds(y, self.raster.height() as f32, self.wrap.y);
        self.raster
            .pixel(x.floor() as i64, y.floor() as i64)
            .unwrap_or(Color::TRANSPARENT)
    }

    /// Wrap `pos` (raster coordinates) on the layer's wrapping axes.
    /// Returns true if it moved.
    pub fn wrap_position(&self, pos: &mut Vec2) -> bool {
        let (x, wrapped_x) = wrap_coordinate(pos.x, self.raster.width() as f32, self.wrap.x);
        let (y, wrapped_y) = wrap_coordinate(pos.y, self.raster.height() as f32, self.wrap.y);
        *pos = Vec2::new(x, y);
        wrapped_x || wrapped_y
    }

    /// Whether `pos` (raster coordinates) lies on the layer, allowing
    /// `margin` pixels beyond bounded edges. Wrapping axes always pass.
    pub fn is_within_bounds(&self, pos: Vec2, margin: f32) -> bool {
        let inside = |value: f32, dimension: u32, wrap: bool| {
            wrap || (value >= -margin && value < dimension as f32 + margin)
        };
        inside(pos.x, self.raster.width(), self.wrap.x)
            && inside(pos.y, self.raster.height(), self.wrap.y)
    }

    // ===== DRAWING =====

    /// Draw the layer into `dest`
    ///
    /// # Arguments
    ///
    /// * `renderer` - Renderer the layer texture was created with
    /// * `dest` - Destination rectangle, zero-area for the full render target
    /// * `scroll_override` - Content offset to use instead of
    ///   `offset * scroll_ratio`
    ///
    /// Scaled layers go through `draw_scaled`.
    pub fn draw(
        &mut self,
        renderer: &mut dyn Renderer,
        dest: Rect2D,
        scroll_override: Option<Vec2>,
    ) -> Result<()> {
        self.draw_with(renderer, dest, scroll_override, self.is_scaled())
    }

    /// Draw the layer into `dest` at its scale factor.
    ///
    /// Layout is computed in scaled pixels and content pixel `c` shows
    /// texel `floor(c * scale_inverse)`. Copies are placed on that texel
    /// grid at their exact scaled size, so neighbouring copies and the
    /// wrap seam join without a visible step.
    pub fn draw_scaled(
        &mut self,
        renderer: &mut dyn Renderer,
        dest: Rect2D,
        scroll_override: Option<Vec2>,
    ) -> Result<()> {
        self.draw_with(renderer, dest, scroll_override, true)
    }

    fn draw_with(
        &mut self,
        renderer: &mut dyn Renderer,
        dest: Rect2D,
        scroll_override: Option<Vec2>,
        scaled: bool,
    ) -> Result<()> {
        let dest = if dest.is_empty() {
            Rect2D::from_size(renderer.viewport_size())
        } else {
            dest
        };
        if dest.is_empty() {
            return Ok(());
        }

        let content = if scaled {
            self.scaled_dimensions()
        } else {
            UVec2::new(self.raster.width(), self.raster.height())
        };
        let requested = scroll_override.unwrap_or(self.offset * self.scroll_ratio);

        let plan_x = plan_axis(content.x as i64, dest.width as i64, requested.x, self.wrap.x);
        let plan_y = plan_axis(content.y as i64, dest.height as i64, requested.y, self.wrap.y);

        self.effective_offset = Vec2::new(plan_x.offset as f32, plan_y.offset as f32);
        let path = if plan_x.covers && plan_y.covers { DrawPath::Quadrants } else { DrawPath::Tiled };
        self.last_draw_path = Some(path);

        crate::engine_trace!("galaxy2d::ScrollLayer",
            "Drawing '{}' via {:?} at {:?} ({} blits)",
            self.name, path, self.effective_offset,
            plan_x.content.len() * plan_y.content.len());

        renderer.set_clip_rect(dest)?;
        let drawn = self.emit(renderer, dest, &plan_x, &plan_y, scaled);
        let cleared = renderer.clear_clip_rect();
        drawn.and(cleared)
    }

    /// Issue the blits and fills of a planned draw
    fn emit(
        &self,
        renderer: &mut dyn Renderer,
        dest: Rect2D,
        plan_x: &AxisPlan,
        plan_y: &AxisPlan,
        scaled: bool,
    ) -> Result<()> {
        for span_y in &plan_y.content {
            let run_y = self.source_run(AXIS_Y, span_y, scaled);
            for span_x in &plan_x.content {
                let run_x = self.source_run(AXIS_X, span_x, scaled);
                renderer.blit(
                    &self.texture,
                    Rect2D::new(run_x.src as i32, run_y.src as i32, run_x.src_len as u32, run_y.src_len as u32),
                    Rect2D::new(
                        dest.x + run_x.dst as i32,
                        dest.y + run_y.dst as i32,
                        run_x.dst_len as u32,
                        run_y.dst_len as u32,
                    ),
                    self.flip,
                )?;
            }
        }

        // Side fills span the full destination height
        for fill in &plan_x.fills {
            let color = match fill.edge {
                Edge::Leading => self.edge_fill.left,
                Edge::Trailing => self.edge_fill.right,
            };
            renderer.fill_rect(
                Rect2D::new(dest.x + fill.dst as i32, dest.y, fill.len as u32, dest.height),
                color,
            )?;
        }

        // Top/bottom fills only cover the columns holding content
        let (content_x0, content_x1) = plan_x.content_range();
        for fill in &plan_y.fills {
            let color = match fill.edge {
                Edge::Leading => self.edge_fill.up,
                Edge::Trailing => self.edge_fill.down,
            };
            renderer.fill_rect(
                Rect2D::new(
                    dest.x + content_x0 as i32,
                    dest.y + fill.dst as i32,
                    (content_x1 - content_x0) as u32,
                    fill.len as u32,
                ),
                color,
            )?;
        }

        Ok(())
    }

    /// Texture texels and destination placement for one content run.
    ///
    /// Unscaled runs map 1:1. Scaled runs copy whole texels: texel `t`
    /// starts at content pixel `floor(t * scale)`, so the first texel of a
    /// run may begin left of the run and the last may end right of it.
    /// Overhang on the left only happens at the start of the destination
    /// (clipped); overhang on the right is drawn over by the next run or
    /// clipped. Every copy therefore keeps the exact scale and joins its
    /// neighbours on the same texel grid.
    fn source_run(&self, axis: usize, span: &ContentSpan, scaled: bool) -> BlitRun {
        let (texture_len, mirrored, scale) = if axis == AXIS_X {
            (self.raster.width() as i64, self.flip.contains(BlitFlip::HORIZONTAL), self.scale_factor.x as f64)
        } else {
            (self.raster.height() as i64, self.flip.contains(BlitFlip::VERTICAL), self.scale_factor.y as f64)
        };

        let mut run = if scaled {
            let first = ((span.src as f64 / scale).floor() as i64).clamp(0, texture_len - 1);
            let end = (((span.src + span.len) as f64 / scale).ceil() as i64).clamp(first + 1, texture_len);
            let lead = ((first as f64 * scale).floor() as i64 - span.src).min(0);
            let tail = ((end as f64 * scale).floor() as i64 - span.src).max(span.len);
            BlitRun { src: first, src_len: end - first, dst: span.dst + lead, dst_len: tail - lead }
        } else {
            BlitRun { src: span.src, src_len: span.len, dst: span.dst, dst_len: span.len }
        };

        // Content coordinates address the mirrored art
        if mirrored {
            run.src = texture_len - run.src - run.src_len;
        }
        run
    }
}

/// One axis of a blit: texture range and destination range (relative to
/// the destination rectangle)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BlitRun {
    src: i64,
    src_len: i64,
    dst: i64,
    dst_len: i64,
}

fn validate_scale(name: &str, scale_factor: Vec2) -> Result<()> {
    if !(scale_factor.x > 0.0 && scale_factor.y > 0.0) || !scale_factor.is_finite() {
        crate::engine_bail_config!("galaxy2d::ScrollLayer",
            "Layer '{}' scale factor must be positive, got {:?}", name, scale_factor);
    }
    Ok(())
}

fn scaled_size(raster: &Raster, scale_factor: Vec2) -> UVec2 {
    let size = (Vec2::new(raster.width() as f32, raster.height() as f32) * scale_factor).floor();
    size.as_uvec2().max(UVec2::ONE)
}

#[cfg(test)]
#[path = "scroll_layer_tests.rs"]
mod tests;
