use geojson::GeoJson;
use serde_json::Value;

use crate::algorithm::geo::RelationTest;
use crate::algorithm::geo_index::{PackedRTree, SpatialIndex};
use crate::algorithm::native::{bounding_rect_feature, BoundingRect};
use crate::error::{Result, SjoinError};
use crate::feature::{Feature, FeatureCollection, Properties};
use crate::join::config::{options_object, JoinConfig, JoinHow, MatchCardinality};
use crate::properties::merge_properties;

/// Property written with the position of the matched indexed row.
pub const INDEX_RIGHT: &str = "index_right";

/// Property written with the position of the probing row.
pub const INDEX_LEFT: &str = "index_left";

/// Spatially join two feature collections.
///
/// For every feature of `left` (of `right` when `config.how` is [`JoinHow::Right`]), find the
/// features of the other collection that satisfy `config.relation`, and emit one feature per
/// match carrying the probing geometry and the merged properties of both rows.
///
/// Features without a usable geometry never match: on the indexed side they are left out of
/// the index, on the probing side they are dropped from the output.
///
/// ```
/// use geo::{point, polygon};
/// use geo_sjoin::{sjoin, Feature, FeatureCollection, JoinConfig, Properties};
///
/// let left = FeatureCollection::new(vec![
///     Feature::new(point!(x: 0., y: 0.), Properties::new()),
///     Feature::new(point!(x: 10., y: 10.), Properties::new()),
/// ]);
/// let right = FeatureCollection::new(vec![Feature::new(
///     polygon![(x: -1., y: -1.), (x: 1., y: -1.), (x: 1., y: 1.), (x: -1., y: 1.)],
///     Properties::new(),
/// )]);
///
/// let joined = sjoin(&left, &right, &JoinConfig::default()).unwrap();
/// assert_eq!(joined.len(), 1);
/// assert_eq!(joined.features[0].properties["index_right"], 0);
/// ```
pub fn sjoin(
    left: &FeatureCollection,
    right: &FeatureCollection,
    config: &JoinConfig,
) -> Result<FeatureCollection> {
    sjoin_with_index::<PackedRTree>(left, right, config)
}

/// [`sjoin`] with a caller-chosen spatial index implementation.
pub fn sjoin_with_index<I: SpatialIndex>(
    left: &FeatureCollection,
    right: &FeatureCollection,
    config: &JoinConfig,
) -> Result<FeatureCollection> {
    let (probe, indexed) = match config.how {
        JoinHow::Right => (right, left),
        _ => (left, right),
    };

    let index: I = build_index(indexed);

    let joiner = Joiner {
        index: &index,
        indexed,
        config,
    };

    let features = joiner.join_all(probe);
    log::debug!(
        "sjoin ({}, {}, {}) produced {} features from {} probe rows",
        config.how,
        config.relation,
        config.matches,
        features.len(),
        probe.len()
    );

    Ok(FeatureCollection::new(features))
}

/// Spatially join two GeoJSON documents using a dynamic options object.
///
/// Everything is validated before the index is built: first that options are an object (or
/// `null`, treated as empty), then that both inputs are FeatureCollections, then the option
/// values documented on [`JoinConfig::try_from_options`].
pub fn sjoin_geojson(
    left: &GeoJson,
    right: &GeoJson,
    options: &Value,
) -> Result<FeatureCollection> {
    let options = options_object(options)?;
    let left = feature_collection_arg(left, "geojson1")?;
    let right = feature_collection_arg(right, "geojson2")?;
    let config = JoinConfig::try_from_object(options)?;
    sjoin(&left, &right, &config)
}

/// Like [`sjoin_geojson`], for untyped JSON inputs that may be missing (`null`).
pub fn sjoin_json(left: &Value, right: &Value, options: &Value) -> Result<FeatureCollection> {
    sjoin_json_with_index::<PackedRTree>(left, right, options)
}

/// [`sjoin_json`] with a caller-chosen spatial index implementation.
pub fn sjoin_json_with_index<I: SpatialIndex>(
    left: &Value,
    right: &Value,
    options: &Value,
) -> Result<FeatureCollection> {
    let options = options_object(options)?;
    if left.is_null() {
        return Err(SjoinError::Validation("<geojson1> is required".to_string()));
    }
    if right.is_null() {
        return Err(SjoinError::Validation("<geojson2> is required".to_string()));
    }
    let left = json_collection_arg(left, "geojson1")?;
    let right = json_collection_arg(right, "geojson2")?;
    let config = JoinConfig::try_from_object(options)?;
    sjoin_with_index::<I>(&left, &right, &config)
}

pub(crate) fn feature_collection_arg(geojson: &GeoJson, name: &str) -> Result<FeatureCollection> {
    match geojson {
        GeoJson::FeatureCollection(fc) => FeatureCollection::try_from(fc.clone()),
        _ => Err(SjoinError::Validation(format!(
            "<{name}> must be a GeoJSON FeatureCollection"
        ))),
    }
}

pub(crate) fn json_collection_arg(value: &Value, name: &str) -> Result<FeatureCollection> {
    if value.is_null() {
        return Err(SjoinError::Validation(format!("<{name}> is required")));
    }
    let geojson = GeoJson::from_json_value(value.clone()).map_err(|_| {
        SjoinError::Validation(format!("<{name}> must be a GeoJSON FeatureCollection"))
    })?;
    feature_collection_arg(&geojson, name)
}

fn build_index<I: SpatialIndex>(collection: &FeatureCollection) -> I {
    let mut boxes = Vec::with_capacity(collection.len());
    for (position, feature) in collection.iter().enumerate() {
        match bounding_rect_feature(feature) {
            Ok(rect) => boxes.push((position, rect)),
            Err(err) => log::debug!("excluding row {position} from the spatial index: {err}"),
        }
    }

    let skipped = collection.len() - boxes.len();
    let index = I::build(boxes);
    log::debug!(
        "built spatial index with {} entries ({} skipped)",
        index.len(),
        skipped
    );
    index
}

/// Per-call join state. Everything here is read-only, so rows can be joined independently.
struct Joiner<'a, I: SpatialIndex> {
    index: &'a I,
    indexed: &'a FeatureCollection,
    config: &'a JoinConfig,
}

impl<'a, I: SpatialIndex> Joiner<'a, I> {
    #[cfg(not(feature = "rayon"))]
    fn join_all(&self, probe: &FeatureCollection) -> Vec<Feature> {
        probe
            .iter()
            .enumerate()
            .flat_map(|(position, feature)| self.join_row(position, feature))
            .collect()
    }

    #[cfg(feature = "rayon")]
    fn join_all(&self, probe: &FeatureCollection) -> Vec<Feature> {
        use rayon::prelude::*;

        // Indexed collect keeps the probe order.
        let rows: Vec<Vec<Feature>> = probe
            .features
            .par_iter()
            .enumerate()
            .map(|(position, feature)| self.join_row(position, feature))
            .collect();
        rows.into_iter().flatten().collect()
    }

    /// All output rows produced by one probing feature.
    fn join_row(&self, position: usize, feature: &Feature) -> Vec<Feature> {
        let (Some(geometry), Ok(rect)) = (&feature.geometry, bounding_rect_feature(feature)) else {
            log::debug!("skipping probe row {position}: no usable geometry");
            return vec![];
        };

        let matched = self.matching_positions(geometry, &rect);

        if matched.is_empty() {
            return if self.config.how.keeps_unmatched() {
                vec![feature.clone()]
            } else {
                vec![]
            };
        }

        matched
            .into_iter()
            .map(|matched_position| Feature {
                geometry: Some(geometry.clone()),
                properties: self.merged_properties(position, feature, matched_position),
            })
            .collect()
    }

    /// Positions of indexed rows satisfying the relation, in ascending order.
    fn matching_positions(&self, geometry: &geo::Geometry, rect: &BoundingRect) -> Vec<usize> {
        let mut candidates = self.index.query(rect);
        candidates.sort_unstable();
        log::trace!("{} bbox candidates", candidates.len());

        let is_match = |candidate: &usize| match &self.indexed.features[*candidate].geometry {
            Some(candidate_geometry) => self
                .config
                .relation
                .test_relation(candidate_geometry, geometry),
            None => false,
        };

        match self.config.matches {
            MatchCardinality::First => candidates.into_iter().find(is_match).into_iter().collect(),
            MatchCardinality::All => candidates.into_iter().filter(is_match).collect(),
        }
    }

    fn merged_properties(&self, position: usize, feature: &Feature, matched: usize) -> Properties {
        let (matched_key, probe_key) = match self.config.how {
            JoinHow::Right => (INDEX_LEFT, INDEX_RIGHT),
            _ => (INDEX_RIGHT, INDEX_LEFT),
        };

        let matched_properties = &self.indexed.features[matched].properties;
        let mut right = Properties::with_capacity(matched_properties.len() + 2);
        right.insert(matched_key.to_string(), Value::from(matched));
        if self.config.include_opposite_index {
            right.insert(probe_key.to_string(), Value::from(position));
        }
        // A row property with the same name as an index field replaces its value in place.
        for (key, value) in matched_properties {
            right.insert(key.clone(), value.clone());
        }

        merge_properties(
            &feature.properties,
            &right,
            &self.config.lsuffix,
            &self.config.rsuffix,
        )
    }
}
