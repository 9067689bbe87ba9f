use geo::{polygon, Polygon};
use serde_json::json;

use crate::feature::{Feature, FeatureCollection};
use crate::test::properties;

pub(crate) fn square(minx: f64, miny: f64, maxx: f64, maxy: f64) -> Polygon {
    polygon![
        (x: minx, y: miny),
        (x: maxx, y: miny),
        (x: maxx, y: maxy),
        (x: minx, y: maxy),
    ]
}

/// The square `[-1, -1, 1, 1]`.
pub(crate) fn unit_square() -> Polygon {
    square(-1., -1., 1., 1.)
}

pub(crate) fn unit_square_collection() -> FeatureCollection {
    FeatureCollection::new(vec![Feature::new(
        unit_square(),
        properties::from_pairs(&[("region", json!("unit"))]),
    )])
}

/// The triangle `(0, 0), (2, 0), (0, 2)`.
pub(crate) fn triangle_collection() -> FeatureCollection {
    let triangle = polygon![(x: 0., y: 0.), (x: 2., y: 0.), (x: 0., y: 2.)];
    FeatureCollection::new(vec![Feature::new(
        triangle,
        properties::from_pairs(&[("shape", json!("triangle"))]),
    )])
}

/// `[0, 0, 2, 2]`, `[-1, -1, 2, 2]` and `[1, 1, 3, 3]`. The point `(1.5, 1.5)` lies in all
/// three, `(0.5, 0.5)` in the first two only.
pub(crate) fn overlapping_squares() -> FeatureCollection {
    FeatureCollection::new(vec![
        Feature::new(square(0., 0., 2., 2.), properties::named("sq0")),
        Feature::new(square(-1., -1., 2., 2.), properties::named("sq1")),
        Feature::new(square(1., 1., 3., 3.), properties::named("sq2")),
    ])
}
