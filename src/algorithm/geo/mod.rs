//! Exact spatial predicates implemented with georust/geo.

/// Binary spatial relations used to refine index candidates.
pub mod relation;
pub use relation::{RelationTest, SpatialRelation};
