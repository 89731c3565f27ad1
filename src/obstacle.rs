//! Blocked-point and blocked-segment queries over a layout.
//!
//! Component rectangles are bucketed into a coarse grid so a query only
//! tests the components near it. The buckets are a pure narrowing device:
//! results are identical to a linear scan over every component.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::geometry::{Point, Rect};
use crate::layout::{ComponentId, Layout};

/// Edge length of one spatial bucket, in grid units.
const BUCKET_SIZE: i32 = 16;

/// Spatially bucketed obstacle queries for one search.
pub struct ObstacleIndex {
    buckets: FxHashMap<u64, Vec<(ComponentId, Rect)>>,
    /// Cells routable despite perimeter contact: the two terminal
    /// positions of the active search.
    exempt: FxHashSet<u64>,
}

impl ObstacleIndex {
    pub fn new(layout: &Layout) -> Self {
        let mut buckets: FxHashMap<u64, Vec<(ComponentId, Rect)>> = FxHashMap::default();
        for component in layout.components() {
            let rect = *component.rect();
            for bx in bucket_span(rect.x, rect.x_max()) {
                for by in bucket_span(rect.y, rect.y_max()) {
                    buckets
                        .entry(bucket_key(bx, by))
                        .or_default()
                        .push((component.id(), rect));
                }
            }
        }
        Self {
            buckets,
            exempt: FxHashSet::default(),
        }
    }

    /// Marks a cell routable even though it touches a perimeter.
    pub fn exempt_cell(&mut self, p: Point) {
        self.exempt.insert(p.key());
    }

    /// True when `p` lies inside or on the perimeter of any component and
    /// is not an exempt terminal cell.
    #[inline]
    pub fn is_point_blocked(&self, p: Point) -> bool {
        if self.exempt.contains(&p.key()) {
            return false;
        }
        let key = bucket_key(p.x.div_euclid(BUCKET_SIZE), p.y.div_euclid(BUCKET_SIZE));
        match self.buckets.get(&key) {
            Some(entries) => entries
                .iter()
                .any(|(_, rect)| rect.contains_inclusive(p)),
            None => false,
        }
    }

    /// True when any component blocks the axis-aligned segment `a`..`b`.
    ///
    /// This is the raw geometric query; terminal-cell exemptions do not
    /// apply here.
    pub fn is_segment_blocked(&self, a: Point, b: Point) -> bool {
        debug_assert!(a != b, "degenerate segment {a}..{b}");
        let mut seen: FxHashSet<ComponentId> = FxHashSet::default();
        for bx in bucket_span(a.x.min(b.x), a.x.max(b.x)) {
            for by in bucket_span(a.y.min(b.y), a.y.max(b.y)) {
                if let Some(entries) = self.buckets.get(&bucket_key(bx, by)) {
                    for &(id, rect) in entries {
                        if seen.insert(id) && rect.blocks_segment(a, b) {
                            return true;
                        }
                    }
                }
            }
        }
        false
    }
}

#[inline]
fn bucket_key(bx: i32, by: i32) -> u64 {
    Point::new(bx, by).key()
}

#[inline]
fn bucket_span(lo: i32, hi: i32) -> std::ops::RangeInclusive<i32> {
    lo.div_euclid(BUCKET_SIZE)..=hi.div_euclid(BUCKET_SIZE)
}
