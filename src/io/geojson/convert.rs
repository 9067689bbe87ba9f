//! Conversions between [`geojson`] types and this crate's features.

use crate::error::{Result, SjoinError};
use crate::feature::{Feature, FeatureCollection, Properties};

impl TryFrom<geojson::Feature> for Feature {
    type Error = SjoinError;

    fn try_from(feature: geojson::Feature) -> Result<Self> {
        let geometry = feature
            .geometry
            .map(geo::Geometry::<f64>::try_from)
            .transpose()?;
        let properties: Properties = feature
            .properties
            .map(|properties| properties.into_iter().collect())
            .unwrap_or_default();
        Ok(Feature {
            geometry,
            properties,
        })
    }
}

impl TryFrom<geojson::FeatureCollection> for FeatureCollection {
    type Error = SjoinError;

    fn try_from(collection: geojson::FeatureCollection) -> Result<Self> {
        collection
            .features
            .into_iter()
            .map(Feature::try_from)
            .collect::<Result<Vec<_>>>()
            .map(FeatureCollection::new)
    }
}

impl From<&Feature> for geojson::Feature {
    fn from(feature: &Feature) -> Self {
        let geometry = feature
            .geometry
            .as_ref()
            .map(|geom| geojson::Geometry::new(geojson::Value::from(geom)));
        let properties = feature
            .properties
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        geojson::Feature {
            bbox: None,
            geometry,
            id: None,
            properties: Some(properties),
            foreign_members: None,
        }
    }
}

impl From<&FeatureCollection> for geojson::FeatureCollection {
    fn from(collection: &FeatureCollection) -> Self {
        geojson::FeatureCollection {
            bbox: None,
            features: collection.iter().map(geojson::Feature::from).collect(),
            foreign_members: None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use geo::point;
    use serde_json::json;

    #[test]
    fn null_geometry_and_missing_properties() {
        let feature: geojson::Feature = r#"{"type": "Feature", "geometry": null, "properties": null}"#
            .parse::<geojson::GeoJson>()
            .unwrap()
            .try_into()
            .unwrap();

        let feature = Feature::try_from(feature).unwrap();
        assert!(feature.geometry.is_none());
        assert!(feature.properties.is_empty());
    }

    #[test]
    fn preserves_property_order() {
        let geojson: geojson::GeoJson = r#"{
            "type": "Feature",
            "geometry": {"type": "Point", "coordinates": [1, 2]},
            "properties": {"z": 1, "a": 2, "m": 3}
        }"#
        .parse()
        .unwrap();
        let feature: geojson::Feature = geojson.try_into().unwrap();
        let feature = Feature::try_from(feature).unwrap();

        assert_eq!(feature.geometry, Some(point!(x: 1., y: 2.).into()));
        assert_eq!(feature.properties.keys().collect::<Vec<_>>(), vec!["z", "a", "m"]);

        let back = geojson::Feature::from(&feature);
        assert_eq!(back.property("a"), Some(&json!(2)));
        assert_eq!(
            back.properties.unwrap().keys().collect::<Vec<_>>(),
            vec!["z", "a", "m"]
        );
    }
}
