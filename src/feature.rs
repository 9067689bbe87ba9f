//! In-memory features and feature collections.
//!
//! Properties are stored in an [`IndexMap`] so that key order is preserved from input to output.
//! Equality of two property maps does not depend on key order, matching JSON object equality.

use geo::Geometry;
use indexmap::IndexMap;
use serde_json::Value;

/// An insertion-ordered mapping of property names to JSON values.
pub type Properties = IndexMap<String, Value>;

/// A single geometry with its attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    /// `None` for features with a null geometry.
    pub geometry: Option<Geometry>,
    pub properties: Properties,
}

impl Feature {
    pub fn new(geometry: impl Into<Geometry>, properties: Properties) -> Self {
        Self {
            geometry: Some(geometry.into()),
            properties,
        }
    }

    /// A feature with no geometry.
    pub fn null(properties: Properties) -> Self {
        Self {
            geometry: None,
            properties,
        }
    }

    pub fn has_geometry(&self) -> bool {
        self.geometry.is_some()
    }
}

/// An ordered sequence of features.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self { features }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Feature> {
        self.features.iter()
    }
}

impl From<Vec<Feature>> for FeatureCollection {
    fn from(features: Vec<Feature>) -> Self {
        Self::new(features)
    }
}

impl FromIterator<Feature> for FeatureCollection {
    fn from_iter<I: IntoIterator<Item = Feature>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for FeatureCollection {
    type Item = Feature;
    type IntoIter = std::vec::IntoIter<Feature>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.into_iter()
    }
}

impl<'a> IntoIterator for &'a FeatureCollection {
    type Item = &'a Feature;
    type IntoIter = std::slice::Iter<'a, Feature>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.iter()
    }
}
