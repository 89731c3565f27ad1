//! Obstacle-aware orthogonal routing between component pins.
//!
//! Given an immutable [`Layout`] of non-overlapping rectangular components
//! with terminals on their perimeters, [`find_path`] searches for a
//! Manhattan polyline connecting two terminals that never crosses the
//! interior or boundary of any component except at the terminals
//! themselves.
//!
//! The search is best-first A* over the implicit integer grid. Candidate
//! moves hop 1 to 8 cells per step with every intermediate cell validated,
//! the first and last moves leave and enter the pins perpendicular to the
//! edges they sit on, and every failure is a typed [`RouteError`] — an
//! unroutable pin pair is ordinary domain behavior, not a panic and not an
//! empty path.
//!
//! ```
//! use pcb_router::{find_path, Layout, Point, Rect, SearchLimits};
//!
//! let mut builder = Layout::builder();
//! let left = builder.add_component(0, 0, 4, 4)?;
//! let right = builder.add_component(10, 0, 4, 4)?;
//! let a = builder.add_terminal(left, 4, 2)?;
//! let b = builder.add_terminal(right, 0, 2)?;
//! let layout = builder.build();
//!
//! let limits = SearchLimits::within(Rect::new(-5, -5, 30, 30));
//! let route = find_path(&layout, a, b, &limits)?;
//! assert_eq!(route.points, vec![Point::new(4, 2), Point::new(10, 2)]);
//! assert_eq!(route.cost, 6);
//! # Ok::<(), pcb_router::RouteError>(())
//! ```

mod error;
mod geometry;
mod layout;
mod moves;
mod obstacle;
mod router;

pub use error::{Result, RouteError, TerminalIssue};
pub use geometry::{manhattan, Axis, Edge, Point, Rect};
pub use layout::{
    Component, ComponentId, Layout, LayoutBuilder, Terminal, TerminalId, DEFAULT_MIN_SPACING,
};
pub use moves::{Candidate, ExitPort, MoveGenerator, DIRECTIONS, STEP_SIZES};
pub use obstacle::ObstacleIndex;
pub use router::{
    find_path, find_path_observed, Route, SearchLimits, SearchObserver, SearchSnapshot,
    SearchStats, DEFAULT_MAX_ITERATIONS, DEFAULT_OBSERVE_INTERVAL,
};
