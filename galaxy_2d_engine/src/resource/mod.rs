//! CPU-side resources handed to the engine by the asset loader

pub mod raster;

pub use raster::Raster;
