//! Best-first route search between two terminals.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::{Duration, Instant};

use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::{Result, RouteError};
use crate::geometry::{manhattan, Axis, Point, Rect};
use crate::layout::{Layout, TerminalId};
use crate::moves::{Candidate, ExitPort, MoveGenerator};
use crate::obstacle::ObstacleIndex;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default cap on frontier pops before the search gives up.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100_000;

/// Default number of expansions between observer snapshots.
pub const DEFAULT_OBSERVE_INTERVAL: u32 = 50;

/// Search configuration.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SearchLimits {
    /// Frontier pops allowed before the search returns
    /// [`RouteError::Exceeded`].
    pub max_iterations: u32,

    /// Optional wall-clock budget, checked cooperatively at the top of
    /// every pop.
    pub deadline: Option<Duration>,

    /// Goal-test radius in Manhattan distance. Zero demands an exact hit.
    /// A positive radius accepts nearby pops and splices the exact end
    /// position onto the route; it also lets the Manhattan heuristic
    /// overestimate the remaining cost by up to the radius, so the search
    /// then behaves as greedy-ish best-first rather than provably-optimal
    /// A*. That tradeoff is intentional.
    pub goal_tolerance: u32,

    /// The legal coordinate range; candidate points outside it (perimeter
    /// included) are rejected.
    pub working_bounds: Rect,

    /// Expansions between observer callbacks; 0 disables snapshots.
    pub observe_every: u32,
}

impl SearchLimits {
    /// Limits over the given working rectangle, defaults everywhere else.
    pub fn within(working_bounds: Rect) -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            deadline: None,
            goal_tolerance: 0,
            working_bounds,
            observe_every: DEFAULT_OBSERVE_INTERVAL,
        }
    }

    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_goal_tolerance(mut self, goal_tolerance: u32) -> Self {
        self.goal_tolerance = goal_tolerance;
        self
    }

    pub fn with_observe_every(mut self, observe_every: u32) -> Self {
        self.observe_every = observe_every;
        self
    }
}

/// Counters describing one search, success or failure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SearchStats {
    /// Frontier pops performed.
    pub iterations: u32,
    /// Nodes expanded (popped and not duplicate-skipped).
    pub expanded: u32,
    /// Nodes pushed onto the frontier.
    pub pushed: u32,
    /// Pops discarded because the point was already expanded.
    pub duplicate_skips: u32,
    /// Pushes that improved an already-discovered point.
    pub requeues: u32,
    /// Frontier size when the search ended.
    pub frontier_len: usize,
    /// Expanded-set size when the search ended.
    pub visited_len: usize,
}

/// A found route: an orthogonal polyline from the start terminal to the
/// end terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Route {
    /// Start, turns, and end; consecutive points differ in exactly one
    /// axis. Never empty.
    pub points: Vec<Point>,
    /// Accumulated step length.
    pub cost: u32,
    /// Search counters for this invocation.
    pub stats: SearchStats,
}

/// Read-only view of the search handed to observers.
#[derive(Debug, Clone, Copy)]
pub struct SearchSnapshot {
    /// Frontier pops so far.
    pub iteration: u32,
    /// The node being expanded.
    pub current: Point,
    /// Discovered-but-unexpanded entries.
    pub frontier_len: usize,
    /// Expanded points.
    pub visited_len: usize,
}

/// Checkpoint hook for progress displays.
///
/// The engine calls [`SearchObserver::on_progress`] every
/// [`SearchLimits::observe_every`] expansions and behaves identically
/// whether or not an observer is attached.
pub trait SearchObserver {
    fn on_progress(&mut self, snapshot: SearchSnapshot);
}

/// Frontier entry, reverse-ordered for the min-heap, with an insertion
/// counter so equal-f pops stay deterministic.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct OpenEntry {
    f_score: u32,
    g_score: u32,
    point: Point,
    counter: u32,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap (lowest f_score first).
        other
            .f_score
            .cmp(&self.f_score)
            .then_with(|| other.counter.cmp(&self.counter))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Finds an obstacle-avoiding orthogonal route between two terminals.
///
/// Validates both endpoints first (fail fast), then runs best-first A*
/// over the implicit integer grid restricted to `limits.working_bounds`.
/// Cost is accumulated step length; the heuristic is Manhattan distance
/// to the goal.
pub fn find_path(
    layout: &Layout,
    start: TerminalId,
    end: TerminalId,
    limits: &SearchLimits,
) -> Result<Route> {
    run_search(layout, start, end, limits, None)
}

/// [`find_path`] with a progress observer attached.
pub fn find_path_observed(
    layout: &Layout,
    start: TerminalId,
    end: TerminalId,
    limits: &SearchLimits,
    observer: &mut dyn SearchObserver,
) -> Result<Route> {
    run_search(layout, start, end, limits, Some(observer))
}

fn run_search(
    layout: &Layout,
    start: TerminalId,
    end: TerminalId,
    limits: &SearchLimits,
    mut observer: Option<&mut dyn SearchObserver>,
) -> Result<Route> {
    // Unusable endpoints are reported before any search work starts.
    let start_pos = layout.terminal_position(start)?;
    let start_axis = layout.terminal_exit_axis(start)?;
    let end_pos = layout.terminal_position(end)?;
    let end_axis = layout.terminal_exit_axis(end)?;

    log::debug!(
        "routing {start_pos} -> {end_pos}, manhattan {}, {} components",
        manhattan(start_pos, end_pos),
        layout.component_count(),
    );

    let mut obstacles = ObstacleIndex::new(layout);
    // The pins themselves sit on perimeters; routing may touch exactly
    // those two cells.
    obstacles.exempt_cell(start_pos);
    obstacles.exempt_cell(end_pos);
    let moves = MoveGenerator::new(
        &obstacles,
        limits.working_bounds,
        ExitPort {
            position: start_pos,
            axis: start_axis,
        },
        ExitPort {
            position: end_pos,
            axis: end_axis,
        },
    );

    let started = Instant::now();
    let mut stats = SearchStats::default();
    let mut open_set: BinaryHeap<OpenEntry> = BinaryHeap::new();
    let mut g_costs: FxHashMap<u64, u32> = FxHashMap::default();
    let mut parents: FxHashMap<u64, u64> = FxHashMap::default();
    let mut closed: FxHashSet<u64> = FxHashSet::default();
    let mut counter: u32 = 0;
    let mut buf: Vec<Candidate> = Vec::new();

    open_set.push(OpenEntry {
        f_score: manhattan(start_pos, end_pos),
        g_score: 0,
        point: start_pos,
        counter,
    });
    counter += 1;
    stats.pushed += 1;
    g_costs.insert(start_pos.key(), 0);

    loop {
        // Budgets come first: a spent budget is Exceeded even if the next
        // pop would have been the goal.
        if stats.iterations >= limits.max_iterations {
            finish_stats(&mut stats, &open_set, &closed);
            log::debug!("iteration budget spent: {stats:?}");
            return Err(RouteError::Exceeded {
                iterations: stats.iterations,
            });
        }
        if let Some(deadline) = limits.deadline {
            if started.elapsed() >= deadline {
                finish_stats(&mut stats, &open_set, &closed);
                log::debug!("deadline passed: {stats:?}");
                return Err(RouteError::Exceeded {
                    iterations: stats.iterations,
                });
            }
        }
        let Some(entry) = open_set.pop() else {
            finish_stats(&mut stats, &open_set, &closed);
            log::debug!("frontier exhausted: {stats:?}");
            return Err(RouteError::Unreachable);
        };
        stats.iterations += 1;

        let current = entry.point;
        let current_key = current.key();
        if closed.contains(&current_key) {
            stats.duplicate_skips += 1;
            continue;
        }
        closed.insert(current_key);
        stats.expanded += 1;

        if let Some(observer) = observer.as_deref_mut() {
            if limits.observe_every > 0 && stats.expanded % limits.observe_every == 0 {
                observer.on_progress(SearchSnapshot {
                    iteration: stats.iterations,
                    current,
                    frontier_len: open_set.len(),
                    visited_len: closed.len(),
                });
            }
        }

        let remaining = manhattan(current, end_pos);
        if remaining <= limits.goal_tolerance {
            finish_stats(&mut stats, &open_set, &closed);
            let points = reconstruct(&parents, current, start_pos, end_pos, end_axis);
            let cost = entry.g_score + remaining;
            log::debug!(
                "route found: {} points, cost {cost}, {stats:?}",
                points.len(),
            );
            return Ok(Route {
                points,
                cost,
                stats,
            });
        }

        buf.clear();
        moves.candidates(current, &mut buf);
        for candidate in &buf {
            let key = candidate.point.key();
            if closed.contains(&key) {
                continue;
            }
            let new_g = entry.g_score + candidate.step;
            let existing_g = g_costs.get(&key).copied().unwrap_or(u32::MAX);
            // Re-enqueue an open point only on strict improvement.
            if new_g < existing_g {
                if existing_g != u32::MAX {
                    stats.requeues += 1;
                }
                g_costs.insert(key, new_g);
                parents.insert(key, current_key);
                open_set.push(OpenEntry {
                    f_score: new_g + manhattan(candidate.point, end_pos),
                    g_score: new_g,
                    point: candidate.point,
                    counter,
                });
                counter += 1;
                stats.pushed += 1;
            }
        }
    }
}

fn finish_stats(stats: &mut SearchStats, open_set: &BinaryHeap<OpenEntry>, closed: &FxHashSet<u64>) {
    stats.frontier_len = open_set.len();
    stats.visited_len = closed.len();
}

/// Walks parent links goal -> start, reverses, collapses collinear runs,
/// and splices the exact end position when the goal test accepted a
/// nearby point.
fn reconstruct(
    parents: &FxHashMap<u64, u64>,
    goal: Point,
    start_pos: Point,
    end_pos: Point,
    end_axis: Axis,
) -> Vec<Point> {
    let mut points = Vec::new();
    let mut key = goal.key();
    loop {
        points.push(Point::from_key(key));
        match parents.get(&key) {
            Some(&parent_key) => key = parent_key,
            None => break,
        }
    }
    points.reverse();
    debug_assert_eq!(points.first().copied(), Some(start_pos));

    if points.last() != Some(&end_pos) {
        // Tolerance accepted a nearby pop; bend into the pin so the final
        // segment runs along its exit axis.
        let last = points[points.len() - 1];
        let corner = match end_axis {
            Axis::Horizontal => Point::new(last.x, end_pos.y),
            Axis::Vertical => Point::new(end_pos.x, last.y),
        };
        if corner != last && corner != end_pos {
            points.push(corner);
        }
        points.push(end_pos);
    }

    collapse_collinear(points)
}

/// Drops interior points of straight runs so only the start, turns, and
/// end remain.
fn collapse_collinear(points: Vec<Point>) -> Vec<Point> {
    let mut out: Vec<Point> = Vec::with_capacity(points.len());
    for p in points {
        if out.len() >= 2 {
            let a = out[out.len() - 2];
            let b = out[out.len() - 1];
            if (a.x == b.x && b.x == p.x) || (a.y == b.y && b.y == p.y) {
                let last = out.len() - 1;
                out[last] = p;
                continue;
            }
        }
        out.push(p);
    }
    out
}
