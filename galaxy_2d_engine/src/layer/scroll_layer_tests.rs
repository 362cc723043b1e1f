use super::*;
use crate::error::Error;
use crate::renderer::mock_renderer::{MockCommand, MockRenderer};

// ============================================================================
// Helpers
// ============================================================================

fn create_mock_renderer(width: u32, height: u32) -> (Arc<Mutex<MockRenderer>>, Arc<Mutex<dyn Renderer>>) {
    let mock = Arc::new(Mutex::new(MockRenderer::new(width, height)));
    let renderer: Arc<Mutex<dyn Renderer>> = mock.clone();
    (mock, renderer)
}

/// Opaque raster where neighbouring pixels differ
fn gradient(width: u32, height: u32) -> Raster {
    Raster::from_fn(width, height, |x, y| {
        Color::rgb((x * 7 % 251) as u8, (y * 13 % 251) as u8, ((x + y) % 256) as u8)
    })
}

fn make_desc(renderer: Arc<Mutex<dyn Renderer>>, raster: Raster, wrap_x: bool, wrap_y: bool) -> ScrollLayerDesc {
    ScrollLayerDesc {
        name: "terrain".to_string(),
        renderer,
        raster: Arc::new(raster),
        wrap_x,
        wrap_y,
        parallax: Parallax::FullScroll,
        scale_factor: Vec2::ONE,
        offset: Vec2::ZERO,
        flip: BlitFlip::empty(),
        scene: SceneSpace::new(2000, 1000, true, true).unwrap(),
        viewport_size: None,
    }
}

fn make_layer(renderer: Arc<Mutex<dyn Renderer>>, raster: Raster, wrap_x: bool, wrap_y: bool) -> ScrollLayer {
    ScrollLayer::from_desc(make_desc(renderer, raster, wrap_x, wrap_y)).unwrap()
}

fn draw(layer: &mut ScrollLayer, mock: &Arc<Mutex<MockRenderer>>, dest: Rect2D, scroll: Option<Vec2>) {
    let mut renderer = mock.lock().unwrap();
    layer.draw(&mut *renderer, dest, scroll).unwrap();
}

fn assert_single_coverage(mock: &Arc<Mutex<MockRenderer>>) {
    let coverage = mock.lock().unwrap().coverage();
    assert!(coverage.iter().all(|&c| c == 1), "viewport not covered exactly once");
}

// ============================================================================
// Creation
// ============================================================================

#[test]
fn test_from_desc_uploads_texture() {
    let (mock, renderer) = create_mock_renderer(800, 600);
    let layer = make_layer(renderer, gradient(64, 32), true, false);
    assert_eq!(mock.lock().unwrap().texture_count(), 1);
    assert_eq!(layer.name(), "terrain");
    assert_eq!(layer.texture().info().width, 64);
    assert_eq!((layer.width(), layer.height()), (64, 32));
    assert!(layer.wraps_x());
    assert!(!layer.wraps_y());
    assert_eq!(layer.last_draw_path(), None);
}

#[test]
fn test_from_desc_rejects_empty_raster() {
    let (mock, renderer) = create_mock_renderer(800, 600);
    let result = ScrollLayer::from_desc(make_desc(renderer, Raster::solid(0, 16, Color::WHITE), true, true));
    assert!(matches!(result, Err(Error::InvalidResource(_))));
    assert_eq!(mock.lock().unwrap().texture_count(), 0);
}

#[test]
fn test_from_desc_rejects_non_positive_scale() {
    let (_mock, renderer) = create_mock_renderer(800, 600);
    let mut desc = make_desc(renderer, gradient(16, 16), true, true);
    desc.scale_factor = Vec2::new(0.0, 1.0);
    assert!(matches!(ScrollLayer::from_desc(desc), Err(Error::InvalidConfiguration(_))));
}

#[test]
fn test_from_desc_propagates_texture_failure() {
    let (mock, renderer) = create_mock_renderer(800, 600);
    mock.lock().unwrap().fail_texture_creation = true;
    let result = ScrollLayer::from_desc(make_desc(renderer, gradient(16, 16), true, true));
    assert!(matches!(result, Err(Error::OutOfMemory)));
}

#[test]
fn test_edge_fill_sampled_from_edge_midpoints() {
    let red = Color::rgb(255, 0, 0);
    let green = Color::rgb(0, 255, 0);
    let blue = Color::rgb(0, 0, 255);
    let raster = Raster::from_fn(9, 7, |x, y| {
        if x == 0 { red }
        else if x == 8 { green }
        else if y == 0 { blue }
        else if y == 6 { Color::WHITE }
        else { Color::BLACK }
    });
    let (_mock, renderer) = create_mock_renderer(800, 600);
    let layer = make_layer(renderer, raster, false, false);
    assert_eq!(layer.edge_fill(), EdgeFill { left: red, right: green, up: blue, down: Color::WHITE });
}

#[test]
fn test_edge_fill_follows_flip() {
    let fill = EdgeFill {
        left: Color::rgb(1, 0, 0),
        right: Color::rgb(2, 0, 0),
        up: Color::rgb(3, 0, 0),
        down: Color::rgb(4, 0, 0),
    };
    let flipped = fill.flipped(BlitFlip::HORIZONTAL | BlitFlip::VERTICAL);
    assert_eq!(flipped.left, fill.right);
    assert_eq!(flipped.up, fill.down);
    assert_eq!(fill.flipped(BlitFlip::empty()), fill);
}

#[test]
fn test_parallax_resolved_at_creation() {
    let (_mock, renderer) = create_mock_renderer(800, 600);
    let mut desc = make_desc(renderer, gradient(500, 250), true, true);
    desc.parallax = Parallax::LockedToViewport;
    let layer = ScrollLayer::from_desc(desc).unwrap();
    assert_eq!(layer.scroll_ratio(), Vec2::new(0.25, 0.25));
}

// ============================================================================
// Unscaled draws
// ============================================================================

#[test]
fn test_draw_quadrants_across_both_seams() {
    let (mock, renderer) = create_mock_renderer(800, 600);
    let raster = gradient(1000, 800);
    let mut layer = make_layer(renderer, raster.clone(), true, true);

    draw(&mut layer, &mock, Rect2D::default(), Some(Vec2::new(600.0, 500.0)));

    assert_eq!(layer.last_draw_path(), Some(DrawPath::Quadrants));
    assert_eq!(layer.effective_offset(), Vec2::new(600.0, 500.0));
    let m = mock.lock().unwrap();
    let blits = m.blits();
    assert_eq!(blits.len(), 4);
    // Main quadrant first
    assert_eq!(blits[0].0, Rect2D::new(600, 500, 400, 300));
    assert_eq!(blits[0].1, Rect2D::new(0, 0, 400, 300));

    let out = m.rasterize();
    assert_eq!(out.pixel(0, 0), raster.pixel(600, 500));
    assert_eq!(out.pixel(400, 0), raster.pixel(0, 500));
    assert_eq!(out.pixel(0, 300), raster.pixel(600, 0));
    assert_eq!(out.pixel(799, 599), raster.pixel(399, 299));
    drop(m);
    assert_single_coverage(&mock);
}

#[test]
fn test_draw_uses_offset_times_scroll_ratio() {
    let (mock, renderer) = create_mock_renderer(800, 600);
    let mut desc = make_desc(renderer, gradient(1000, 800), true, true);
    desc.parallax = Parallax::ExplicitRatio(0.5, 0.5);
    let mut layer = ScrollLayer::from_desc(desc).unwrap();
    layer.set_offset(Vec2::new(201.0, 101.0));

    draw(&mut layer, &mock, Rect2D::default(), None);
    assert_eq!(layer.effective_offset(), Vec2::new(100.0, 50.0));
}

#[test]
fn test_draw_wraps_negative_offset() {
    let (mock, renderer) = create_mock_renderer(800, 600);
    let mut layer = make_layer(renderer, gradient(1000, 800), true, true);
    draw(&mut layer, &mock, Rect2D::default(), Some(Vec2::new(-10.0, -1810.0)));
    assert_eq!(layer.effective_offset(), Vec2::new(990.0, 590.0));
    assert_single_coverage(&mock);
}

#[test]
fn test_draw_tiles_small_wrapping_layer() {
    let (mock, renderer) = create_mock_renderer(800, 600);
    let raster = gradient(300, 200);
    let mut layer = make_layer(renderer, raster.clone(), true, true);

    draw(&mut layer, &mock, Rect2D::default(), Some(Vec2::new(250.0, 150.0)));

    assert_eq!(layer.last_draw_path(), Some(DrawPath::Tiled));
    let out = mock.lock().unwrap().rasterize();
    for &(x, y) in &[(0u32, 0u32), (49, 49), (50, 50), (399, 333), (799, 599), (612, 7)] {
        let expected = raster.pixel(((x + 250) % 300) as i64, ((y + 150) % 200) as i64);
        assert_eq!(out.pixel(x as i64, y as i64), expected, "pixel ({}, {})", x, y);
    }
    assert_single_coverage(&mock);
}

#[test]
fn test_draw_bounded_axis_clamps_offset() {
    let (mock, renderer) = create_mock_renderer(800, 600);
    let mut layer = make_layer(renderer, gradient(1000, 800), false, false);
    draw(&mut layer, &mock, Rect2D::default(), Some(Vec2::new(5000.0, -20.0)));
    assert_eq!(layer.effective_offset(), Vec2::new(200.0, 0.0));
    assert_eq!(mock.lock().unwrap().blits().len(), 1);
}

#[test]
fn test_draw_small_bounded_layer_uses_edge_fill() {
    let (mock, renderer) = create_mock_renderer(800, 600);
    let mut layer = make_layer(renderer, gradient(400, 300), false, false);
    let fill = layer.edge_fill();

    draw(&mut layer, &mock, Rect2D::default(), Some(Vec2::new(37.0, 91.0)));

    assert_eq!(layer.effective_offset(), Vec2::ZERO);
    assert_eq!(layer.last_draw_path(), Some(DrawPath::Tiled));
    let out = mock.lock().unwrap().rasterize();
    assert!(out.pixels().iter().all(|p| p.is_opaque()));
    assert_eq!(out.pixel(0, 300), Some(fill.left));
    assert_eq!(out.pixel(100, 0), Some(fill.left));
    assert_eq!(out.pixel(799, 300), Some(fill.right));
    assert_eq!(out.pixel(400, 0), Some(fill.up));
    assert_eq!(out.pixel(400, 599), Some(fill.down));
    assert_single_coverage(&mock);
}

#[test]
fn test_edge_fill_draw_is_deterministic() {
    let (mock, renderer) = create_mock_renderer(800, 600);
    let mut layer = make_layer(renderer, gradient(400, 300), false, false);

    draw(&mut layer, &mock, Rect2D::default(), Some(Vec2::new(10.0, 10.0)));
    let first = mock.lock().unwrap().rasterize();
    mock.lock().unwrap().clear_commands();
    draw(&mut layer, &mock, Rect2D::default(), Some(Vec2::new(-300.0, 77.0)));
    let second = mock.lock().unwrap().rasterize();

    assert_eq!(first, second);
}

#[test]
fn test_draw_mixed_axes() {
    // Wraps horizontally, too short vertically
    let (mock, renderer) = create_mock_renderer(800, 600);
    let mut layer = make_layer(renderer, gradient(1000, 200), true, false);
    draw(&mut layer, &mock, Rect2D::default(), Some(Vec2::new(900.0, 0.0)));

    let m = mock.lock().unwrap();
    assert_eq!(m.blits().len(), 2);
    // One fill above, one below
    assert_eq!(m.fills().len(), 2);
    assert!(m.rasterize().pixels().iter().all(|p| p.is_opaque()));
    drop(m);
    assert_single_coverage(&mock);
}

#[test]
fn test_zero_dest_uses_full_viewport_and_clip_is_restored() {
    let (mock, renderer) = create_mock_renderer(320, 240);
    let mut layer = make_layer(renderer, gradient(100, 100), true, true);
    draw(&mut layer, &mock, Rect2D::default(), None);

    let m = mock.lock().unwrap();
    assert_eq!(m.commands.first(), Some(&MockCommand::SetClip(Rect2D::new(0, 0, 320, 240))));
    assert_eq!(m.commands.last(), Some(&MockCommand::ClearClip));
}

#[test]
fn test_draw_into_sub_rect() {
    let (mock, renderer) = create_mock_renderer(800, 600);
    let raster = gradient(1000, 800);
    let mut layer = make_layer(renderer, raster.clone(), true, true);
    let dest = Rect2D::new(400, 300, 400, 300);

    draw(&mut layer, &mock, dest, Some(Vec2::new(10.0, 20.0)));

    let m = mock.lock().unwrap();
    let coverage = m.coverage();
    for y in 0..600 {
        for x in 0..800 {
            let expected = if dest.contains(x, y) { 1 } else { 0 };
            assert_eq!(coverage[(y * 800 + x) as usize], expected);
        }
    }
    assert_eq!(m.rasterize().pixel(400, 300), raster.pixel(10, 20));
}

#[test]
fn test_draw_flipped_layer_mirrors_art() {
    let (mock, renderer) = create_mock_renderer(800, 600);
    let raster = gradient(1000, 600);
    let mut desc = make_desc(renderer, raster.clone(), true, false);
    desc.flip = BlitFlip::HORIZONTAL;
    let mut layer = ScrollLayer::from_desc(desc).unwrap();

    draw(&mut layer, &mock, Rect2D::default(), Some(Vec2::new(600.0, 0.0)));

    let out = mock.lock().unwrap().rasterize();
    for &x in &[0u32, 1, 399, 400, 401, 799] {
        let source_x = 999 - ((x + 600) % 1000);
        assert_eq!(out.pixel(x as i64, 10), raster.pixel(source_x as i64, 10), "column {}", x);
    }
    assert_single_coverage(&mock);
}

// ============================================================================
// Scaled draws
// ============================================================================

#[test]
fn test_scaled_dimensions_and_inverse() {
    let (_mock, renderer) = create_mock_renderer(800, 600);
    let mut layer = make_layer(renderer, gradient(301, 200), true, true);
    assert!(!layer.is_scaled());
    layer.set_scale_factor(Vec2::new(1.5, 2.0)).unwrap();
    assert!(layer.is_scaled());
    assert_eq!(layer.scaled_dimensions(), UVec2::new(451, 400));
    assert_eq!(layer.scale_inverse(), Vec2::new(1.0 / 1.5, 0.5));
    assert!(layer.set_scale_factor(Vec2::new(-1.0, 1.0)).is_err());
    assert_eq!(layer.scale_factor(), Vec2::new(1.5, 2.0));
}

/// Opaque raster whose red channel encodes the column
fn column_ramp(width: u32, height: u32) -> Raster {
    Raster::from_fn(width, height, |x, _| Color::rgb((x * 20) as u8, 0, 0))
}

#[test]
fn test_draw_scaled_tiles_are_texel_exact() {
    let (mock, renderer) = create_mock_renderer(60, 4);
    let mut desc = make_desc(renderer, column_ramp(10, 4), true, true);
    desc.scale_factor = Vec2::new(2.0, 1.0);
    let mut layer = ScrollLayer::from_desc(desc).unwrap();

    draw(&mut layer, &mock, Rect2D::default(), Some(Vec2::ZERO));

    assert_eq!(layer.last_draw_path(), Some(DrawPath::Tiled));
    let m = mock.lock().unwrap();
    assert_eq!(m.blits().len(), 3);
    for (src, dst, _) in m.blits() {
        assert_eq!(dst.width, src.width * 2, "copy stretched: {:?} -> {:?}", src, dst);
        assert_eq!(dst.height, src.height);
    }
    let out = m.rasterize();
    for k in 0..60i64 {
        let expected = ((k / 2) % 10 * 20) as u8;
        assert_eq!(out.pixel(k, 0).map(|c| c.r), Some(expected), "column {}", k);
    }
}

#[test]
fn test_draw_scaled_non_integer_scale_repeats_tiles() {
    let (mock, renderer) = create_mock_renderer(800, 600);
    let raster = gradient(300, 200);
    let mut desc = make_desc(renderer, raster.clone(), true, true);
    desc.scale_factor = Vec2::new(1.5, 1.5);
    let mut layer = ScrollLayer::from_desc(desc).unwrap();

    draw(&mut layer, &mock, Rect2D::default(), Some(Vec2::ZERO));

    let m = mock.lock().unwrap();
    let out = m.rasterize();
    assert!(out.pixels().iter().all(|p| p.is_opaque()));
    for x in 0..350i64 {
        let texel = (x as f64 / 1.5).floor() as i64;
        assert_eq!(out.pixel(x, 0), raster.pixel(texel, 0), "column {}", x);
        assert_eq!(out.pixel(x + 450, 0), out.pixel(x, 0), "tile mismatch at column {}", x);
    }
}

#[test]
fn test_draw_scaled_odd_offsets_stay_on_texel_grid() {
    let (mock, renderer) = create_mock_renderer(800, 600);
    let raster = gradient(700, 500);
    let mut desc = make_desc(renderer, raster.clone(), true, true);
    desc.scale_factor = Vec2::new(2.0, 2.0);
    let mut layer = ScrollLayer::from_desc(desc).unwrap();

    // Scrolling one pixel at a time must move the picture one pixel at a time
    for (ox, oy) in [(1000i64, 700i64), (1001, 701), (1002, 700), (1003, 703)] {
        mock.lock().unwrap().clear_commands();
        draw(&mut layer, &mock, Rect2D::default(), Some(Vec2::new(ox as f32, oy as f32)));

        let out = mock.lock().unwrap().rasterize();
        for k in 0..800i64 {
            let expected = raster.pixel((ox + k) / 2 % 700, oy / 2 % 500);
            assert_eq!(out.pixel(k, 0), expected, "offset ({}, {}) column {}", ox, oy, k);
        }
        for y in 0..600i64 {
            let expected = raster.pixel(ox / 2 % 700, (oy + y) / 2 % 500);
            assert_eq!(out.pixel(0, y), expected, "offset ({}, {}) row {}", ox, oy, y);
        }
    }
}

#[test]
fn test_draw_scaled_flip_mirrors_texels() {
    let (mock, renderer) = create_mock_renderer(20, 4);
    let mut desc = make_desc(renderer, column_ramp(10, 4), true, true);
    desc.scale_factor = Vec2::new(2.0, 1.0);
    desc.flip = BlitFlip::HORIZONTAL;
    let mut layer = ScrollLayer::from_desc(desc).unwrap();

    draw(&mut layer, &mock, Rect2D::default(), Some(Vec2::ZERO));

    let out = mock.lock().unwrap().rasterize();
    for k in 0..20i64 {
        let expected = ((9 - k / 2) * 20) as u8;
        assert_eq!(out.pixel(k, 2).map(|c| c.r), Some(expected), "column {}", k);
    }
}

#[test]
fn test_draw_scaled_quadrants() {
    let (mock, renderer) = create_mock_renderer(800, 600);
    let raster = gradient(700, 500);
    let mut desc = make_desc(renderer, raster.clone(), true, true);
    desc.scale_factor = Vec2::new(2.0, 2.0);
    let mut layer = ScrollLayer::from_desc(desc).unwrap();

    draw(&mut layer, &mock, Rect2D::default(), Some(Vec2::new(1000.0, 700.0)));

    assert_eq!(layer.last_draw_path(), Some(DrawPath::Quadrants));
    assert_eq!(layer.effective_offset(), Vec2::new(1000.0, 700.0));
    let m = mock.lock().unwrap();
    assert_eq!(m.blits().len(), 4);
    let out = m.rasterize();
    assert!(out.pixels().iter().all(|p| p.is_opaque()));
    // Scaled content pixel (1000, 700) is raster pixel (500, 350)
    assert_eq!(out.pixel(0, 0), raster.pixel(500, 350));
}

#[test]
fn test_draw_scaled_forced_at_unit_scale_covers_viewport() {
    let (mock, renderer) = create_mock_renderer(640, 480);
    let raster = gradient(300, 200);
    let mut layer = make_layer(renderer, raster.clone(), true, true);
    {
        let mut renderer = mock.lock().unwrap();
        layer.draw_scaled(&mut *renderer, Rect2D::default(), Some(Vec2::new(17.0, 3.0))).unwrap();
    }

    // At 1:1 the texel grid is the pixel grid: no overhang anywhere
    assert_single_coverage(&mock);
    let m = mock.lock().unwrap();
    assert_eq!(m.blits().len(), 3 * 3);
    assert_eq!(m.rasterize().pixel(0, 0), raster.pixel(17, 3));
}

// ============================================================================
// Pixel queries
// ============================================================================

#[test]
fn test_pixel_wraps_or_clamps_per_axis() {
    let (_mock, renderer) = create_mock_renderer(800, 600);
    let raster = gradient(64, 32);
    let layer = make_layer(renderer, raster.clone(), true, false);
    assert_eq!(Some(layer.pixel(-1.0, 5.0)), raster.pixel(63, 5));
    assert_eq!(Some(layer.pixel(3.0, 9999.0)), raster.pixel(3, 31));
    assert_eq!(Some(layer.pixel(64.5, -4.0)), raster.pixel(0, 0));
}

#[test]
fn test_wrap_position_and_bounds() {
    let (_mock, renderer) = create_mock_renderer(800, 600);
    let layer = make_layer(renderer, gradient(64, 32), true, false);

    let mut pos = Vec2::new(70.0, 40.0);
    assert!(layer.wrap_position(&mut pos));
    assert_eq!(pos, Vec2::new(6.0, 40.0));

    assert!(layer.is_within_bounds(Vec2::new(-100.0, 0.0), 0.0));
    assert!(!layer.is_within_bounds(Vec2::new(0.0, 32.0), 0.0));
    assert!(layer.is_within_bounds(Vec2::new(0.0, 32.0), 1.0));
}
