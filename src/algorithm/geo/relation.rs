use std::fmt::Display;
use std::str::FromStr;

use geo::dimensions::{Dimensions, HasDimensions};
use geo::relate::IntersectionMatrix;
use geo::{Geometry, Intersects, Relate};
use serde::{Deserialize, Serialize};

use crate::error::SjoinError;

/// Evaluates a binary spatial predicate.
///
/// Arguments are ordered: `candidate` is the indexed (right) geometry and `query` is the
/// geometry being probed (left). Non-symmetric relations such as contains and within are read
/// as "candidate contains query" and "candidate within query".
pub trait RelationTest {
    fn test_relation(&self, candidate: &Geometry, query: &Geometry) -> bool;
}

/// The exact geometric relations supported by the join, with [DE-9IM] semantics.
///
/// [DE-9IM]: https://en.wikipedia.org/wiki/DE-9IM
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpatialRelation {
    /// The geometries share at least one point.
    #[default]
    Intersects,
    /// No point of `query` lies in the exterior of `candidate`, and the interiors meet.
    Contains,
    /// `candidate` lies within `query`.
    Within,
    /// The geometries have some but not all interior points in common, and the dimension of
    /// the intersection is less than the maximum dimension of the inputs.
    Crosses,
    /// The geometries have the same dimension and their intersection has that dimension too,
    /// but neither contains the other.
    Overlaps,
}

impl SpatialRelation {
    pub const ALL: [SpatialRelation; 5] = [
        SpatialRelation::Intersects,
        SpatialRelation::Contains,
        SpatialRelation::Within,
        SpatialRelation::Crosses,
        SpatialRelation::Overlaps,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SpatialRelation::Intersects => "intersects",
            SpatialRelation::Contains => "contains",
            SpatialRelation::Within => "within",
            SpatialRelation::Crosses => "crosses",
            SpatialRelation::Overlaps => "overlaps",
        }
    }
}

impl Display for SpatialRelation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SpatialRelation {
    type Err = SjoinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SpatialRelation::ALL
            .into_iter()
            .find(|relation| relation.as_str() == s)
            .ok_or_else(|| {
                SjoinError::Config(format!(
                    "{s} is not supported as an <op> operation. Must be any of \"intersects\", \"contains\", \"within\", \"crosses\", \"overlaps\""
                ))
            })
    }
}

impl RelationTest for SpatialRelation {
    fn test_relation(&self, candidate: &Geometry, query: &Geometry) -> bool {
        if candidate.is_empty() || query.is_empty() {
            return false;
        }

        match self {
            SpatialRelation::Intersects => candidate.intersects(query),
            SpatialRelation::Contains => candidate.relate(query).is_contains(),
            SpatialRelation::Within => candidate.relate(query).is_within(),
            SpatialRelation::Crosses => crosses(
                &candidate.relate(query),
                candidate.dimensions(),
                query.dimensions(),
            ),
            SpatialRelation::Overlaps => overlaps(
                &candidate.relate(query),
                candidate.dimensions(),
                query.dimensions(),
            ),
        }
    }
}

fn matches(matrix: &IntersectionMatrix, pattern: &str) -> bool {
    // Patterns are static and well-formed, so a parse failure cannot occur.
    matrix.matches(pattern).unwrap_or(false)
}

fn rank(dimensions: Dimensions) -> i8 {
    match dimensions {
        Dimensions::Empty => -1,
        Dimensions::ZeroDimensional => 0,
        Dimensions::OneDimensional => 1,
        Dimensions::TwoDimensional => 2,
    }
}

fn crosses(matrix: &IntersectionMatrix, a: Dimensions, b: Dimensions) -> bool {
    let (a, b) = (rank(a), rank(b));
    if a < b {
        matches(matrix, "T*T******")
    } else if a > b {
        matches(matrix, "T*****T**")
    } else if a == 1 {
        matches(matrix, "0********")
    } else {
        false
    }
}

fn overlaps(matrix: &IntersectionMatrix, a: Dimensions, b: Dimensions) -> bool {
    if a != b {
        return false;
    }
    match a {
        Dimensions::ZeroDimensional | Dimensions::TwoDimensional => matches(matrix, "T*T***T**"),
        Dimensions::OneDimensional => matches(matrix, "1*T***T**"),
        Dimensions::Empty => false,
    }
}
