//! Input model: tool modes, keys, and the gesture state machine.
//!
//! `ToolMode` captures what a pointer-down on the overlay means. `InputState`
//! is the gesture currently being tracked, carrying everything needed to draw
//! the live preview and to commit the final annotation on release.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::annotations::ShapeKind;
use crate::consts::{CURSOR_DEFAULT, CURSOR_TOOL};
use crate::transform::{Point, Rect};

/// Which annotation tool is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolMode {
    /// No tool; pointer events pass through to the page.
    #[default]
    None,
    /// Drag out a blur region.
    Blur,
    /// Drag out an erase (white-out) region.
    Erase,
    /// Click to place a text label.
    Text,
}

impl ToolMode {
    /// Parse a tool name as used by the host toolbar (`"blur"`, `"erase"`,
    /// `"text"`, `"none"`).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "none" | "" => Some(Self::None),
            "blur" => Some(Self::Blur),
            "erase" => Some(Self::Erase),
            "text" => Some(Self::Text),
            _ => None,
        }
    }

    /// Whether pointer events should be captured by the overlay.
    #[must_use]
    pub fn is_active(self) -> bool {
        self != Self::None
    }

    /// The region kind a drag with this tool produces, if any.
    #[must_use]
    pub fn shape_kind(self) -> Option<ShapeKind> {
        match self {
            Self::Blur => Some(ShapeKind::Blur),
            Self::Erase => Some(ShapeKind::Erase),
            Self::None | Self::Text => None,
        }
    }

    /// Toolbar toggle: picking the active tool again clears it, picking any
    /// other tool switches straight to it.
    #[must_use]
    pub fn toggled(self, picked: Self) -> Self {
        if self == picked { Self::None } else { picked }
    }

    /// CSS cursor for the overlay element.
    #[must_use]
    pub fn cursor(self) -> &'static str {
        if self.is_active() { CURSOR_TOOL } else { CURSOR_DEFAULT }
    }
}

/// A keyboard key pressed inside the text-entry affordance.
///
/// The inner string holds the key name as reported by the browser (e.g. `"Enter"`, `"Escape"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn is_commit(&self) -> bool {
        self.0 == "Enter"
    }

    #[must_use]
    pub fn is_cancel(&self) -> bool {
        self.0 == "Escape"
    }
}

/// Internal state for the gesture state machine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// A region is being dragged out.
    Dragging {
        /// Region kind, fixed at pointer-down.
        kind: ShapeKind,
        /// Bitmap-space point where the drag started.
        anchor: Point,
        /// Bitmap-space point of the latest pointer event.
        current: Point,
    },
    /// A text-entry affordance is open, waiting for Enter or dismissal.
    TextPending {
        /// Bitmap-space point where the label will be anchored.
        at: Point,
    },
}

impl InputState {
    /// Live preview rectangle while dragging.
    #[must_use]
    pub fn preview(&self) -> Option<(ShapeKind, Rect)> {
        match *self {
            Self::Dragging { kind, anchor, current } => Some((kind, Rect::from_corners(anchor, current))),
            Self::Idle | Self::TextPending { .. } => None,
        }
    }

    /// Anchor of the open text-entry affordance.
    #[must_use]
    pub fn pending_text(&self) -> Option<Point> {
        match *self {
            Self::TextPending { at } => Some(at),
            Self::Idle | Self::Dragging { .. } => None,
        }
    }
}
