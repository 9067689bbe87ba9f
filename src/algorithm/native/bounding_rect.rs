use geo::{BoundingRect as _BoundingRect, Geometry, Rect};

use crate::error::{Result, SjoinError};
use crate::feature::Feature;

/// An axis-aligned bounding box in the coordinate space of its source geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingRect {
    pub minx: f64,
    pub miny: f64,
    pub maxx: f64,
    pub maxy: f64,
}

impl BoundingRect {
    pub fn from_bounds(minx: f64, miny: f64, maxx: f64, maxy: f64) -> Self {
        BoundingRect {
            minx,
            miny,
            maxx,
            maxy,
        }
    }

    /// Closed-interval overlap: rects that only share an edge or a corner still intersect.
    pub fn intersects(&self, other: &BoundingRect) -> bool {
        self.minx <= other.maxx
            && other.minx <= self.maxx
            && self.miny <= other.maxy
            && other.miny <= self.maxy
    }

    fn is_finite(&self) -> bool {
        self.minx.is_finite()
            && self.miny.is_finite()
            && self.maxx.is_finite()
            && self.maxy.is_finite()
    }
}

impl From<Rect> for BoundingRect {
    fn from(value: Rect) -> Self {
        let min = value.min();
        let max = value.max();
        BoundingRect::from_bounds(min.x, min.y, max.x, max.y)
    }
}

/// Bounding box of a single geometry.
///
/// Fails on geometries without any coordinates (e.g. an empty polygon or an empty
/// collection) and on geometries with non-finite coordinates.
pub fn bounding_rect_geometry(geom: &Geometry) -> Result<BoundingRect> {
    let rect: BoundingRect = geom
        .bounding_rect()
        .ok_or_else(|| SjoinError::Geometry("geometry has no coordinates".to_string()))?
        .into();

    if !rect.is_finite() {
        return Err(SjoinError::Geometry(
            "geometry has non-finite coordinates".to_string(),
        ));
    }

    Ok(rect)
}

/// Bounding box of a feature's geometry.
pub fn bounding_rect_feature(feature: &Feature) -> Result<BoundingRect> {
    match &feature.geometry {
        Some(geom) => bounding_rect_geometry(geom),
        None => Err(SjoinError::Geometry("feature has no geometry".to_string())),
    }
}
