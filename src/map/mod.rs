pub mod compose;
pub mod layer;
pub mod pipeline;
pub mod tooltip;
