//! Error taxonomy for layout construction and routing.
//!
//! `Unreachable` and `Exceeded` are ordinary domain outcomes carried as
//! `Err` values; absence of a route is expected behavior, never a panic and
//! never a silently empty path.

use std::fmt;

use thiserror::Error;

use crate::layout::{ComponentId, TerminalId};

/// Unified result type for this crate.
pub type Result<T> = std::result::Result<T, RouteError>;

/// Why a terminal cannot serve as a route endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalIssue {
    /// The terminal id does not exist in the layout.
    UnknownTerminal,
    /// The terminal references a component id that does not exist.
    UnknownComponent,
    /// The computed absolute position is not on the owner's perimeter.
    OffPerimeter,
    /// The position is a corner, which has no single exit direction.
    OnCorner,
}

impl fmt::Display for TerminalIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            TerminalIssue::UnknownTerminal => "not present in the layout",
            TerminalIssue::UnknownComponent => "owning component not present in the layout",
            TerminalIssue::OffPerimeter => "position is off the owner's perimeter",
            TerminalIssue::OnCorner => "position is a corner with an ambiguous exit direction",
        };
        f.write_str(msg)
    }
}

/// Everything that can go wrong while building a layout or searching it.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RouteError {
    /// A terminal does not resolve within the layout, or its absolute
    /// position violates the perimeter invariant. Reported before any
    /// search work starts.
    #[error("terminal {terminal:?}: {reason}")]
    InvalidTerminal {
        terminal: TerminalId,
        reason: TerminalIssue,
    },

    /// Two components overlap or sit closer than the minimum spacing, or a
    /// component has a non-positive extent (`first == second`). Enforced by
    /// [`LayoutBuilder`](crate::LayoutBuilder); the search assumes it holds.
    #[error("components {first:?} and {second:?} overlap or violate minimum spacing")]
    DegenerateLayout {
        first: ComponentId,
        second: ComponentId,
    },

    /// The frontier drained without reaching the goal: no route exists
    /// inside the working bounds.
    #[error("no route exists within the working bounds")]
    Unreachable,

    /// The iteration or wall-clock budget ran out first. Distinct from
    /// [`RouteError::Unreachable`]: more search might have found a route.
    #[error("search budget exhausted after {iterations} iterations")]
    Exceeded { iterations: u32 },
}
