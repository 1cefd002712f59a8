pub mod color;
pub mod color_mapper;
pub mod error;
pub mod polygon_renderer;
pub mod zone;
