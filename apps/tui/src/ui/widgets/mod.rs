pub mod charts;
pub mod heatmap;
pub mod map;
pub mod popup;
pub mod tables;
