//! Attribute joins: merge plain property rows into features by an equality key.

use geojson::GeoJson;
use serde_json::{Map, Value};

use crate::error::{Result, SjoinError};
use crate::feature::{Feature, FeatureCollection, Properties};
use crate::join::config::bool_option;
use crate::join::sjoin::{feature_collection_arg, json_collection_arg};

/// Options for [`merge`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOptions {
    /// The property whose values must be equal for a row to be merged into a feature.
    pub on: String,
}

impl MergeOptions {
    pub fn new(on: impl Into<String>) -> Self {
        Self { on: on.into() }
    }

    /// Validate a dynamic options object of the form `{"on": "<key>"}`.
    ///
    /// A `mutate` key is accepted for compatibility but must be a boolean. It has no effect,
    /// since inputs are never modified.
    pub fn try_from_options(options: &Value) -> Result<Self> {
        Self::try_from_object(merge_options_object(options)?)
    }

    fn try_from_object(options: &Map<String, Value>) -> Result<Self> {
        let on = match options.get("on") {
            None | Some(Value::Null) => {
                return Err(SjoinError::Config(
                    "options <on> property is required".to_string(),
                ))
            }
            Some(Value::String(on)) => on.as_str(),
            Some(_) => {
                return Err(SjoinError::Config(
                    "<onProperty> must be a string (object key)".to_string(),
                ))
            }
        };
        bool_option(options, "mutate")?;
        Ok(Self::new(on))
    }

    fn validate(&self) -> Result<()> {
        if self.on.is_empty() {
            return Err(SjoinError::Config(
                "options <on> property is required".to_string(),
            ));
        }
        Ok(())
    }
}

/// Merge property rows into the features of `collection`.
///
/// Every row whose `on` value equals the feature's `on` value is written over the feature's
/// properties, in row order, so later rows win on shared keys. A key missing on both the
/// feature and the row counts as equal. Features without any matching row are returned
/// unchanged. The input collection is not modified.
pub fn merge(
    collection: &FeatureCollection,
    rows: &[Properties],
    options: &MergeOptions,
) -> Result<FeatureCollection> {
    options.validate()?;
    let on = options.on.as_str();

    let merged = collection
        .iter()
        .map(|feature| {
            let key = feature.properties.get(on);
            let mut properties = feature.properties.clone();
            rows.iter()
                .filter(|row| row.get(on) == key)
                .for_each(|row| {
                    for (k, v) in row {
                        properties.insert(k.clone(), v.clone());
                    }
                });

            Feature {
                geometry: feature.geometry.clone(),
                properties,
            }
        })
        .collect();

    Ok(merged)
}

/// [`merge`] using the properties of another collection's features as rows.
pub fn merge_collections(
    collection: &FeatureCollection,
    other: &FeatureCollection,
    options: &MergeOptions,
) -> Result<FeatureCollection> {
    let rows: Vec<Properties> = other.iter().map(|f| f.properties.clone()).collect();
    merge(collection, &rows, options)
}

/// [`merge`] on dynamic inputs.
///
/// `rows` may be either a GeoJSON FeatureCollection or an array of JSON objects.
pub fn merge_geojson(
    collection: &GeoJson,
    rows: &Value,
    options: &Value,
) -> Result<FeatureCollection> {
    let options = merge_options_object(options)?;
    let collection = feature_collection_arg(collection, "geojson1")?;
    let rows = rows_arg(rows)?;
    let options = MergeOptions::try_from_object(options)?;
    merge(&collection, &rows, &options)
}

fn merge_options_object(options: &Value) -> Result<&Map<String, Value>> {
    match options {
        Value::Object(options) => Ok(options),
        _ => Err(SjoinError::Config("options are invalid".to_string())),
    }
}

fn rows_arg(value: &Value) -> Result<Vec<Properties>> {
    match value {
        Value::Null => Err(SjoinError::Validation(
            "<geojsonOrDataFrame> is required".to_string(),
        )),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Object(map) => Ok(map.clone().into_iter().collect()),
                _ => Err(SjoinError::Validation(
                    "<geojsonOrDataFrame> rows must be objects".to_string(),
                )),
            })
            .collect(),
        _ => Ok(json_collection_arg(value, "geojsonOrDataFrame")?
            .into_iter()
            .map(|feature| feature.properties)
            .collect()),
    }
}
