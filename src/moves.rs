//! Candidate-step enumeration under terminal-exit constraints.

use crate::geometry::{Axis, Point, Rect};
use crate::obstacle::ObstacleIndex;

/// The four axis-aligned unit directions, in fixed expansion order so that
/// candidate enumeration is deterministic.
pub const DIRECTIONS: [(i32, i32); 4] = [
    (1, 0),  // East
    (-1, 0), // West
    (0, 1),  // North
    (0, -1), // South
];

/// Step magnitudes tried per direction. Long hops cross open space in few
/// expansions; step 1 threads gaps the hops cannot.
pub const STEP_SIZES: [u32; 5] = [1, 2, 3, 5, 8];

/// A proposed next point and the length of the step reaching it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Candidate {
    pub point: Point,
    pub step: u32,
}

/// One route endpoint: where it is and the axis a route must follow
/// through it (perpendicular to the edge its terminal sits on).
#[derive(Clone, Copy, Debug)]
pub struct ExitPort {
    pub position: Point,
    pub axis: Axis,
}

/// Enumerates legal moves for the search engine.
pub struct MoveGenerator<'a> {
    obstacles: &'a ObstacleIndex,
    bounds: Rect,
    start: ExitPort,
    end: ExitPort,
}

impl<'a> MoveGenerator<'a> {
    pub fn new(obstacles: &'a ObstacleIndex, bounds: Rect, start: ExitPort, end: ExitPort) -> Self {
        Self {
            obstacles,
            bounds,
            start,
            end,
        }
    }

    /// Appends every legal candidate from `from` onto `out`.
    ///
    /// A multi-cell step is valid only if every intermediate unit cell is
    /// inside the working bounds and unblocked; the first bad cell ends
    /// the whole direction, so a hop can never jump over an obstacle.
    pub fn candidates(&self, from: Point, out: &mut Vec<Candidate>) {
        let max_step = STEP_SIZES[STEP_SIZES.len() - 1];
        for (dx, dy) in DIRECTIONS {
            let axis = if dy == 0 {
                Axis::Horizontal
            } else {
                Axis::Vertical
            };
            // The first move off the start pin must leave perpendicular to
            // the edge the pin sits on.
            if from == self.start.position && axis != self.start.axis {
                continue;
            }

            // Longest run of clear unit cells in this direction.
            let mut clear = 0u32;
            while clear < max_step {
                let next = from.offset(dx * (clear as i32 + 1), dy * (clear as i32 + 1));
                if !self.bounds.contains_inclusive(next) || self.obstacles.is_point_blocked(next) {
                    break;
                }
                clear += 1;
            }

            for step in STEP_SIZES {
                if step > clear {
                    break;
                }
                let point = from.offset(dx * step as i32, dy * step as i32);
                // Entering the end pin is only legal perpendicular to its
                // edge; hops across it remain allowed.
                if point == self.end.position && axis != self.end.axis {
                    continue;
                }
                out.push(Candidate { point, step });
            }
        }
    }
}
