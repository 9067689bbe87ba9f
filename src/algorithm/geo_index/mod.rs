//! Spatial indexes over bounding boxes.

mod rtree;

pub use rtree::{PackedRTree, SpatialIndex, DEFAULT_NODE_SIZE};
