//! Components, terminals, and the immutable layout arena.
//!
//! Components live in an arena indexed by [`ComponentId`]; a terminal holds
//! its owner's id as a non-owning reference and is resolved through the
//! arena on lookup. Component equality and hashing are defined solely on
//! the id, never on position or size.

use crate::error::{Result, RouteError, TerminalIssue};
use crate::geometry::{Axis, Edge, Point, Rect};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default minimum clear distance between component rectangles.
pub const DEFAULT_MIN_SPACING: i32 = 2;

/// Opaque component handle, stable from construction onward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ComponentId(pub(crate) u32);

/// Opaque terminal handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TerminalId(pub(crate) u32);

/// An axis-aligned rectangular obstacle with terminals on its perimeter.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Component {
    id: ComponentId,
    rect: Rect,
}

impl Component {
    pub fn id(&self) -> ComponentId {
        self.id
    }

    pub fn rect(&self) -> &Rect {
        &self.rect
    }
}

// Identity is the id alone; two components are never compared by geometry.
impl PartialEq for Component {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Component {}

impl std::hash::Hash for Component {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// A pin: an offset from its owner's lower-left corner plus the owner's id.
///
/// Absolute position = owner origin + offset, and always lies on exactly
/// one perimeter edge of the owner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Terminal {
    component: ComponentId,
    dx: i32,
    dy: i32,
}

impl Terminal {
    pub fn component(&self) -> ComponentId {
        self.component
    }

    /// The offset relative to the owner's lower-left corner.
    pub fn offset(&self) -> (i32, i32) {
        (self.dx, self.dy)
    }
}

/// The full component/terminal set, read-only for the duration of a search.
///
/// Safe to share across threads; concurrent searches over one `&Layout`
/// never contend because all search state is owned per invocation.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Layout {
    components: Vec<Component>,
    terminals: Vec<Terminal>,
}

impl Layout {
    pub fn builder() -> LayoutBuilder {
        LayoutBuilder::new()
    }

    pub fn component(&self, id: ComponentId) -> Option<&Component> {
        self.components.get(id.0 as usize)
    }

    pub fn terminal(&self, id: TerminalId) -> Option<&Terminal> {
        self.terminals.get(id.0 as usize)
    }

    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.components.iter()
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    pub fn terminal_count(&self) -> usize {
        self.terminals.len()
    }

    /// Absolute position of a terminal, re-validated against the perimeter
    /// invariant so a search can fail fast on a bad endpoint.
    pub fn terminal_position(&self, id: TerminalId) -> Result<Point> {
        self.resolve_terminal(id).map(|(position, _)| position)
    }

    /// The axis a route must follow when leaving or entering the terminal:
    /// perpendicular to the edge the terminal sits on.
    pub fn terminal_exit_axis(&self, id: TerminalId) -> Result<Axis> {
        self.resolve_terminal(id)
            .map(|(_, edge)| edge.exit_axis())
    }

    fn resolve_terminal(&self, id: TerminalId) -> Result<(Point, Edge)> {
        let terminal = self.terminal(id).ok_or(RouteError::InvalidTerminal {
            terminal: id,
            reason: TerminalIssue::UnknownTerminal,
        })?;
        let owner = self
            .component(terminal.component)
            .ok_or(RouteError::InvalidTerminal {
                terminal: id,
                reason: TerminalIssue::UnknownComponent,
            })?;
        let position = Point::new(owner.rect.x + terminal.dx, owner.rect.y + terminal.dy);
        match owner.rect.edge_of(position) {
            Some(edge) => Ok((position, edge)),
            None => Err(RouteError::InvalidTerminal {
                terminal: id,
                reason: if owner.rect.on_perimeter(position) {
                    TerminalIssue::OnCorner
                } else {
                    TerminalIssue::OffPerimeter
                },
            }),
        }
    }
}

/// Builds a [`Layout`], enforcing the spacing and terminal invariants as
/// entries are added. `build` itself cannot fail.
#[derive(Debug, Clone)]
pub struct LayoutBuilder {
    components: Vec<Component>,
    terminals: Vec<Terminal>,
    min_spacing: i32,
}

impl Default for LayoutBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutBuilder {
    pub fn new() -> Self {
        Self {
            components: Vec::new(),
            terminals: Vec::new(),
            min_spacing: DEFAULT_MIN_SPACING,
        }
    }

    /// Minimum clear distance required between component rectangles.
    pub fn with_min_spacing(mut self, spacing: i32) -> Self {
        self.min_spacing = spacing;
        self
    }

    /// Adds a component with lower-left corner `(x, y)`.
    ///
    /// Rejects non-positive extents and any placement that overlaps or
    /// crowds an existing component.
    pub fn add_component(&mut self, x: i32, y: i32, width: i32, height: i32) -> Result<ComponentId> {
        let id = ComponentId(self.components.len() as u32);
        if width <= 0 || height <= 0 {
            return Err(RouteError::DegenerateLayout {
                first: id,
                second: id,
            });
        }
        let rect = Rect::new(x, y, width, height);
        for existing in &self.components {
            if !separated(existing.rect(), &rect, self.min_spacing) {
                return Err(RouteError::DegenerateLayout {
                    first: existing.id,
                    second: id,
                });
            }
        }
        self.components.push(Component { id, rect });
        Ok(id)
    }

    /// Adds a terminal at `(dx, dy)` relative to the owner's lower-left
    /// corner. The absolute position must land on a single perimeter edge;
    /// corners are rejected because their exit direction is ambiguous.
    pub fn add_terminal(&mut self, component: ComponentId, dx: i32, dy: i32) -> Result<TerminalId> {
        let id = TerminalId(self.terminals.len() as u32);
        let owner = self
            .components
            .get(component.0 as usize)
            .ok_or(RouteError::InvalidTerminal {
                terminal: id,
                reason: TerminalIssue::UnknownComponent,
            })?;
        let position = Point::new(owner.rect.x + dx, owner.rect.y + dy);
        match owner.rect.edge_of(position) {
            Some(_) => {
                self.terminals.push(Terminal { component, dx, dy });
                Ok(id)
            }
            None => Err(RouteError::InvalidTerminal {
                terminal: id,
                reason: if owner.rect.on_perimeter(position) {
                    TerminalIssue::OnCorner
                } else {
                    TerminalIssue::OffPerimeter
                },
            }),
        }
    }

    pub fn build(self) -> Layout {
        Layout {
            components: self.components,
            terminals: self.terminals,
        }
    }
}

/// True when `a` and `b` keep at least `gap` clear cells between them along
/// some axis.
fn separated(a: &Rect, b: &Rect, gap: i32) -> bool {
    a.x_max() + gap <= b.x
        || b.x_max() + gap <= a.x
        || a.y_max() + gap <= b.y
        || b.y_max() + gap <= a.y
}
