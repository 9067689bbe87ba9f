//! Algorithms used by the spatial join: bounding boxes, spatial indexing and exact predicates.

pub mod geo;
pub mod geo_index;
pub mod native;
