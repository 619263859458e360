pub mod color;
pub mod color_scale;
pub mod feature_style;
pub mod label;
