/// LayerStack — ordered, named collection of scroll layers.
///
/// Uses a SlotMap for stable keys; a separate draw order lists the layers
/// back to front.

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use glam::Vec2;
use crate::error::Result;
use crate::renderer::{Rect2D, Renderer};
use super::scroll_layer::ScrollLayer;

// ===== SLOT MAP KEY =====

new_key_type! {
    /// Stable key for a ScrollLayer within a LayerStack.
    ///
    /// A key becomes invalid only when its own layer is removed.
    pub struct LayerKey;
}

// ===== LAYER STACK =====

pub struct LayerStack {
    /// Layers stored in a slot map for O(1) insert/remove
    layers: SlotMap<LayerKey, ScrollLayer>,
    /// Draw order, back to front
    order: Vec<LayerKey>,
    /// Layer name to key mapping
    names: FxHashMap<String, LayerKey>,
}

impl LayerStack {
    pub fn new() -> Self {
        Self {
            layers: SlotMap::with_key(),
            order: Vec::new(),
            names: FxHashMap::default(),
        }
    }

    /// Add a layer on top of the stack
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidResource` if a layer with the same name exists.
    pub fn add_layer(&mut self, layer: ScrollLayer) -> Result<LayerKey> {
        if self.names.contains_key(layer.name()) {
            crate::engine_bail_resource!("galaxy2d::LayerStack",
                "Layer '{}' already exists", layer.name());
        }
        let name = layer.name().to_string();
        let key = self.layers.insert(layer);
        self.order.push(key);
        self.names.insert(name, key);
        Ok(key)
    }

    /// Remove a layer, returning it. `None` if the key is invalid.
    pub fn remove_layer(&mut self, key: LayerKey) -> Option<ScrollLayer> {
        let layer = self.layers.remove(key)?;
        self.order.retain(|&k| k != key);
        self.names.remove(layer.name());
        Some(layer)
    }

    pub fn layer(&self, key: LayerKey) -> Option<&ScrollLayer> {
        self.layers.get(key)
    }

    pub fn layer_mut(&mut self, key: LayerKey) -> Option<&mut ScrollLayer> {
        self.layers.get_mut(key)
    }

    /// Key of the layer called `name`
    pub fn layer_by_name(&self, name: &str) -> Option<LayerKey> {
        self.names.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Keys in draw order (back to front)
    pub fn keys(&self) -> &[LayerKey] {
        &self.order
    }

    /// Move a layer to the front (drawn last). Returns false if the key is invalid.
    pub fn bring_to_front(&mut self, key: LayerKey) -> bool {
        let Some(index) = self.order.iter().position(|&k| k == key) else {
            return false;
        };
        self.order.remove(index);
        self.order.push(key);
        true
    }

    /// Set every layer's offset (each layer applies its own scroll ratio)
    pub fn set_offsets(&mut self, offset: Vec2) {
        for layer in self.layers.values_mut() {
            layer.set_offset(offset);
        }
    }

    /// Feed `camera_offset` into every layer and draw them back to front
    ///
    /// # Arguments
    ///
    /// * `renderer` - Renderer the layers were created with
    /// * `dest` - Destination rectangle, zero-area for the full render target
    /// * `camera_offset` - Render offset of the screen being drawn
    pub fn draw_all(&mut self, renderer: &mut dyn Renderer, dest: Rect2D, camera_offset: Vec2) -> Result<()> {
        for &key in &self.order {
            if let Some(layer) = self.layers.get_mut(key) {
                layer.set_offset(camera_offset);
                layer.draw(renderer, dest, None)?;
            }
        }
        Ok(())
    }
}

impl Default for LayerStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "layer_stack_tests.rs"]
mod tests;
