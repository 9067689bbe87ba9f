use geojson::GeoJson;
use std::io::Read;

use crate::error::{Result, SjoinError};
use crate::feature::FeatureCollection;

/// Read a GeoJSON FeatureCollection.
///
/// Any other kind of GeoJSON document is rejected with [`SjoinError::Validation`].
pub fn read_geojson<R: Read>(reader: R) -> Result<FeatureCollection> {
    let value: serde_json::Value = serde_json::from_reader(reader)?;
    match GeoJson::from_json_value(value)? {
        GeoJson::FeatureCollection(collection) => FeatureCollection::try_from(collection),
        _ => Err(SjoinError::Validation(
            "GeoJSON input must be a FeatureCollection".to_string(),
        )),
    }
}
