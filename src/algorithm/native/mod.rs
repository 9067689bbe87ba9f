pub mod bounding_rect;

pub use bounding_rect::{bounding_rect_feature, bounding_rect_geometry, BoundingRect};
