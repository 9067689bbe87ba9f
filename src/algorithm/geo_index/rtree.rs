use geo_index::rtree::sort::HilbertSort;
use geo_index::rtree::{OwnedRTree, RTreeBuilder, RTreeIndex};

use crate::algorithm::native::BoundingRect;

/// Default number of children per node, as used by flatbush.
pub const DEFAULT_NODE_SIZE: usize = 16;

/// A static, bulk-loaded index over bounding boxes.
///
/// Entries are addressed by their position in the source collection. The index is built once
/// and is read-only afterwards, so implementations must be shareable across threads.
pub trait SpatialIndex: Sized + Send + Sync {
    /// Bulk-load `(position, bbox)` entries.
    fn build(boxes: Vec<(usize, BoundingRect)>) -> Self;

    /// Positions of all entries whose bbox overlaps `rect`, in no particular order.
    fn query(&self, rect: &BoundingRect) -> Vec<usize>;

    /// Number of indexed entries.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A Hilbert-packed R-tree backed by [`geo_index`].
///
/// The tree only stores entries that have a bounding box, so we keep a mapping from the slot
/// assigned by the tree back to the row the entry came from.
pub struct PackedRTree {
    inner: Packed,
    positions: Vec<usize>,
}

/// geo-index can only pack two or more items.
enum Packed {
    Empty,
    Single(BoundingRect),
    Tree(OwnedRTree<f64>),
}

impl PackedRTree {
    pub fn new_with_node_size(boxes: Vec<(usize, BoundingRect)>, node_size: usize) -> Self {
        match boxes.as_slice() {
            [] => {
                return Self {
                    inner: Packed::Empty,
                    positions: vec![],
                }
            }
            [(position, rect)] => {
                return Self {
                    inner: Packed::Single(*rect),
                    positions: vec![*position],
                }
            }
            _ => {}
        }

        let mut builder = RTreeBuilder::new_with_node_size(boxes.len(), node_size);
        let mut positions = Vec::with_capacity(boxes.len());
        for (position, rect) in boxes {
            // Slots are assigned in insertion order.
            builder.add(rect.minx, rect.miny, rect.maxx, rect.maxy);
            positions.push(position);
        }

        Self {
            inner: Packed::Tree(builder.finish::<HilbertSort>()),
            positions,
        }
    }

    /// The extent of all indexed entries, or `None` for an empty index.
    pub fn total_bounds(&self) -> Option<BoundingRect> {
        match &self.inner {
            Packed::Empty => None,
            Packed::Single(rect) => Some(*rect),
            Packed::Tree(tree) => {
                let root = tree.root();
                Some(BoundingRect::from_bounds(
                    root.min_x(),
                    root.min_y(),
                    root.max_x(),
                    root.max_y(),
                ))
            }
        }
    }
}

impl SpatialIndex for PackedRTree {
    fn build(boxes: Vec<(usize, BoundingRect)>) -> Self {
        Self::new_with_node_size(boxes, DEFAULT_NODE_SIZE)
    }

    fn query(&self, rect: &BoundingRect) -> Vec<usize> {
        match &self.inner {
            Packed::Empty => vec![],
            Packed::Single(entry) if entry.intersects(rect) => self.positions.clone(),
            Packed::Single(_) => vec![],
            Packed::Tree(tree) => tree
                .search(rect.minx, rect.miny, rect.maxx, rect.maxy)
                .into_iter()
                .map(|slot| self.positions[slot])
                .collect(),
        }
    }

    fn len(&self) -> usize {
        self.positions.len()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn sorted(mut v: Vec<usize>) -> Vec<usize> {
        v.sort_unstable();
        v
    }

    fn grid(n: usize) -> Vec<(usize, BoundingRect)> {
        (0..n)
            .map(|i| {
                let x = (i % 10) as f64;
                let y = (i / 10) as f64;
                (i, BoundingRect::from_bounds(x, y, x + 0.5, y + 0.5))
            })
            .collect()
    }

    #[test]
    fn empty_index() {
        let index = PackedRTree::build(vec![]);
        assert!(index.is_empty());
        assert!(index.total_bounds().is_none());
        assert!(index
            .query(&BoundingRect::from_bounds(-1e9, -1e9, 1e9, 1e9))
            .is_empty());
    }

    #[test]
    fn single_item() {
        let rect = BoundingRect::from_bounds(-1., -1., 1., 1.);
        let index = PackedRTree::build(vec![(7, rect)]);
        assert_eq!(index.len(), 1);
        assert_eq!(index.total_bounds(), Some(rect));
        assert_eq!(index.query(&BoundingRect::from_bounds(0., 0., 0., 0.)), vec![7]);
        // Touching edges count as overlap.
        assert_eq!(index.query(&BoundingRect::from_bounds(1., 1., 2., 2.)), vec![7]);
        assert!(index
            .query(&BoundingRect::from_bounds(10., 10., 10., 10.))
            .is_empty());
    }

    #[test]
    fn every_small_size_builds() {
        for n in 0..40 {
            let boxes = grid(n);
            let index = PackedRTree::build(boxes.clone());
            assert_eq!(index.len(), n);

            let everything = BoundingRect::from_bounds(-1., -1., 20., 20.);
            assert_eq!(sorted(index.query(&everything)), (0..n).collect::<Vec<_>>());
        }
    }

    #[test]
    fn query_matches_brute_force() {
        let boxes = grid(100);
        let index = PackedRTree::build(boxes.clone());
        assert_eq!(index.len(), 100);

        let query = BoundingRect::from_bounds(2.2, 3.2, 5.1, 4.7);
        let expected: Vec<usize> = boxes
            .iter()
            .filter(|(_, rect)| rect.intersects(&query))
            .map(|(position, _)| *position)
            .collect();

        assert!(!expected.is_empty());
        assert_eq!(sorted(index.query(&query)), expected);
    }

    #[test]
    fn returns_source_positions() {
        // Rows 0 and 2 were skipped by the caller.
        let boxes = vec![
            (1, BoundingRect::from_bounds(0., 0., 1., 1.)),
            (3, BoundingRect::from_bounds(5., 5., 6., 6.)),
            (4, BoundingRect::from_bounds(0.5, 0.5, 2., 2.)),
        ];
        let index = PackedRTree::build(boxes);
        assert_eq!(
            sorted(index.query(&BoundingRect::from_bounds(0.75, 0.75, 0.8, 0.8))),
            vec![1, 4]
        );
        assert_eq!(
            index.total_bounds(),
            Some(BoundingRect::from_bounds(0., 0., 6., 6.))
        );
    }
}
