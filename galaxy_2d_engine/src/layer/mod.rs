//! Scroll layers: rasters drawn into viewports with wrapping, parallax,
//! scaling and edge fill.

pub mod draw_plan;
pub mod parallax;
pub mod scroll_layer;
pub mod layer_stack;

pub use parallax::Parallax;
pub use scroll_layer::{ScrollLayer, ScrollLayerDesc, EdgeFill, DrawPath};
pub use layer_stack::{LayerStack, LayerKey};
