//! Utility modules: obstacle file input and plotting

pub mod polygon_reader;
pub mod visualization;

pub use polygon_reader::{parse_polygons, read_polygons, read_polygons_file};
pub use visualization::{colors, quick_plot_scene, PathStyle, PointStyle, Visualizer};
