//! Points, rectangles, and the predicates everything above them is built on.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A position on the integer routing grid.
///
/// Equality, ordering, and hashing are structural (by coordinate pair), so a
/// `Point` doubles as search-node identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The point shifted by `(dx, dy)`.
    #[inline]
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Pack (x, y) into a single u64 for fast hashing.
    #[inline]
    pub(crate) fn key(self) -> u64 {
        let x = (self.x as u32) as u64;
        let y = (self.y as u32) as u64;
        (x << 32) | y
    }

    #[inline]
    pub(crate) fn from_key(key: u64) -> Self {
        Self::new((key >> 32) as u32 as i32, key as u32 as i32)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Manhattan distance between two grid points.
#[inline]
pub fn manhattan(a: Point, b: Point) -> u32 {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}

/// Horizontal or vertical, the only two directions a route segment can run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// One of the four edges of a rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Edge {
    Left,
    Right,
    Bottom,
    Top,
}

impl Edge {
    /// The axis a route must follow when leaving a terminal that sits on
    /// this edge: sideways off a vertical edge, up or down off a
    /// horizontal one.
    #[inline]
    pub fn exit_axis(self) -> Axis {
        match self {
            Edge::Left | Edge::Right => Axis::Horizontal,
            Edge::Bottom | Edge::Top => Axis::Vertical,
        }
    }
}

/// An axis-aligned rectangle: lower-left corner plus positive extent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn x_max(&self) -> i32 {
        self.x + self.width
    }

    #[inline]
    pub fn y_max(&self) -> i32 {
        self.y + self.height
    }

    /// True iff `p` lies strictly inside; boundary points are never inside.
    #[inline]
    pub fn contains_interior(&self, p: Point) -> bool {
        self.x < p.x && p.x < self.x_max() && self.y < p.y && p.y < self.y_max()
    }

    /// True iff `p` lies inside or on the boundary.
    #[inline]
    pub fn contains_inclusive(&self, p: Point) -> bool {
        self.x <= p.x && p.x <= self.x_max() && self.y <= p.y && p.y <= self.y_max()
    }

    /// True iff `p` lies exactly on one of the four edges, corners included.
    #[inline]
    pub fn on_perimeter(&self, p: Point) -> bool {
        ((p.x == self.x || p.x == self.x_max()) && self.y <= p.y && p.y <= self.y_max())
            || ((p.y == self.y || p.y == self.y_max()) && self.x <= p.x && p.x <= self.x_max())
    }

    /// The single edge a perimeter point sits on.
    ///
    /// Corners resolve to `None`: a corner touches two edges, so it has no
    /// unambiguous exit direction. Non-perimeter points are `None` too.
    pub fn edge_of(&self, p: Point) -> Option<Edge> {
        if !self.on_perimeter(p) {
            return None;
        }
        let on_left = p.x == self.x;
        let on_right = p.x == self.x_max();
        let on_bottom = p.y == self.y;
        let on_top = p.y == self.y_max();
        match (on_left, on_right, on_bottom, on_top) {
            (true, false, false, false) => Some(Edge::Left),
            (false, true, false, false) => Some(Edge::Right),
            (false, false, true, false) => Some(Edge::Bottom),
            (false, false, false, true) => Some(Edge::Top),
            _ => None,
        }
    }

    /// True when the axis-aligned segment `a`..`b` may not be routed
    /// through this rectangle: an endpoint strictly inside, a strict
    /// crossing of a perpendicular edge, or an endpoint touching the
    /// perimeter. Edge-touching counts as blocked so that obstacle
    /// avoidance and terminal-exit logic agree on what "touching" means.
    ///
    /// Zero-length segments are the caller's bug and must be rejected
    /// before reaching this predicate.
    pub fn blocks_segment(&self, a: Point, b: Point) -> bool {
        debug_assert!(a != b, "degenerate segment {a}..{b}");
        debug_assert!(
            a.x == b.x || a.y == b.y,
            "segment {a}..{b} is not axis-aligned"
        );

        if self.contains_interior(a) || self.contains_interior(b) {
            return true;
        }

        if a.y == b.y {
            // Horizontal run crossing the left or right edge strictly
            // between the rectangle's vertical bounds.
            if self.y < a.y && a.y < self.y_max() {
                let (lo, hi) = if a.x < b.x { (a.x, b.x) } else { (b.x, a.x) };
                if (lo < self.x && self.x < hi) || (lo < self.x_max() && self.x_max() < hi) {
                    return true;
                }
            }
        } else {
            // Vertical run crossing the bottom or top edge.
            if self.x < a.x && a.x < self.x_max() {
                let (lo, hi) = if a.y < b.y { (a.y, b.y) } else { (b.y, a.y) };
                if (lo < self.y && self.y < hi) || (lo < self.y_max() && self.y_max() < hi) {
                    return true;
                }
            }
        }

        self.on_perimeter(a) || self.on_perimeter(b)
    }
}
