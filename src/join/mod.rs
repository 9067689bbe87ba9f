//! Spatial and attribute joins between feature collections.

pub mod config;
pub mod merge;
pub mod sjoin;

pub use config::{JoinConfig, JoinHow, MatchCardinality};
pub use merge::{merge, merge_collections, merge_geojson, MergeOptions};
pub use sjoin::{
    sjoin, sjoin_geojson, sjoin_json, sjoin_json_with_index, sjoin_with_index, INDEX_LEFT,
    INDEX_RIGHT,
};
