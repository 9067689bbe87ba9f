//! Spatial joins between collections of geometric features.
//!
//! [`sjoin`] pairs every feature of one collection with the features of another that satisfy a
//! [`SpatialRelation`], using a packed R-tree over bounding boxes to find candidates and
//! [georust/geo](https://github.com/georust/geo) for the exact test. Properties of both sides
//! are combined with [`merge_properties`], which renames colliding keys with configurable
//! suffixes.
//!
//! Non-spatial attribute joins are available through [`merge`].

#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(not(test), deny(unused_crate_dependencies))]

pub use algorithm::geo::{RelationTest, SpatialRelation};
pub use algorithm::geo_index::{PackedRTree, SpatialIndex};
pub use algorithm::native::{bounding_rect_feature, bounding_rect_geometry, BoundingRect};
pub use error::{Result, SjoinError};
pub use feature::{Feature, FeatureCollection, Properties};
pub use join::{
    merge, merge_collections, merge_geojson, sjoin, sjoin_geojson, sjoin_json,
    sjoin_json_with_index, sjoin_with_index, JoinConfig, JoinHow, MatchCardinality, MergeOptions,
};
pub use properties::{find_duplicate_keys, merge_properties};

pub mod algorithm;
pub mod error;
pub mod feature;
pub mod io;
pub mod join;
pub mod properties;
#[cfg(test)]
pub(crate) mod test;
