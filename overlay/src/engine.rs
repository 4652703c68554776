use log::debug;
use serde::Serialize;

use crate::annotations::{AnnotationStore, ShapeAnnotation, ShapeKind, TextAnnotation};
use crate::input::{InputState, Key, ToolMode};
use crate::transform::{DisplayRect, PageSurface, Point, Rect, bitmap_to_display, client_to_bitmap};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// The overlay must be cleared and redrawn.
    RenderNeeded,
    ShapeCommitted(ShapeAnnotation),
    TextCommitted(TextAnnotation),
    /// Show the inline text input at a display-space offset from the
    /// overlay's top-left corner, scaled by `scale`.
    TextEntryRequested { left: f64, top: f64, scale: f64 },
    /// Hide the inline text input.
    TextEntryDismissed,
    SetCursor { cursor: String },
    /// Whether the overlay element should receive pointer events
    /// (`pointer-events: auto`) or let them through to the page.
    SetInputCapture { capture: bool },
}

/// Where the open text-entry affordance sits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextEntry {
    /// Anchor of the label once committed.
    pub bitmap: Point,
    /// Offset from the overlay's top-left corner on screen.
    pub display: Point,
}

/// Overlay state: committed annotations, the page surface and tool pushed in
/// by the shell, and the gesture in progress.
///
/// Holds no browser handles so it can be tested natively; the canvas binding
/// lives in [`crate::surface`].
#[derive(Debug, Clone, Default)]
pub struct EngineCore {
    pub store: AnnotationStore,
    pub surface: PageSurface,
    pub tool: ToolMode,
    pub input: InputState,
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Shell inputs ---

    /// Adopt new page dimensions and display scale.
    ///
    /// A zero surface or a change of native dimensions drops every
    /// annotation and any gesture in progress. A pure rescale keeps them,
    /// since they live in bitmap space.
    pub fn set_surface(&mut self, surface: PageSurface) -> Vec<Action> {
        let previous = self.surface;
        self.surface = surface;

        let mut actions = Vec::new();
        if surface.is_empty() || !previous.same_bitmap(&surface) {
            if !self.store.is_empty() {
                debug!("overlay: discarding {} annotations on surface reset", self.store.len());
            }
            self.store.clear();
            actions.extend(self.reset_gesture());
        } else if let Some(entry) = self.text_entry() {
            // Rescaled with the text input open: move it to the new placement.
            actions.push(Action::TextEntryRequested { left: entry.display.x, top: entry.display.y, scale: surface.scale });
        }
        actions.push(Action::SetInputCapture { capture: self.captures_input() });
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Switch the active tool, discarding any gesture in progress.
    pub fn set_tool(&mut self, tool: ToolMode) -> Vec<Action> {
        if tool == self.tool {
            return Vec::new();
        }
        debug!("overlay: tool {:?} -> {:?}", self.tool, tool);
        self.tool = tool;

        let mut actions = self.reset_gesture();
        actions.push(Action::SetCursor { cursor: tool.cursor().to_owned() });
        actions.push(Action::SetInputCapture { capture: self.captures_input() });
        actions.push(Action::RenderNeeded);
        actions
    }

    // --- Pointer input ---

    /// Pointer pressed at `client` over an overlay measured at `bounds`.
    pub fn on_pointer_down(&mut self, client: Point, bounds: DisplayRect) -> Vec<Action> {
        if !self.captures_input() {
            return Vec::new();
        }
        let Some(at) = self.to_bitmap(client, bounds) else {
            return Vec::new();
        };

        if let Some(kind) = self.tool.shape_kind() {
            self.input = InputState::Dragging { kind, anchor: at, current: at };
            return Vec::new();
        }
        if self.tool == ToolMode::Text {
            self.input = InputState::TextPending { at };
            let display = bitmap_to_display(at, self.surface.scale);
            return vec![Action::TextEntryRequested { left: display.x, top: display.y, scale: self.surface.scale }];
        }
        Vec::new()
    }

    /// Pointer moved; only meaningful mid-drag.
    pub fn on_pointer_move(&mut self, client: Point, bounds: DisplayRect) -> Vec<Action> {
        let InputState::Dragging { kind, anchor, .. } = self.input else {
            return Vec::new();
        };
        let Some(current) = self.to_bitmap(client, bounds) else {
            return Vec::new();
        };
        self.input = InputState::Dragging { kind, anchor, current };
        vec![Action::RenderNeeded]
    }

    /// Pointer released over the overlay: commits the drag.
    pub fn on_pointer_up(&mut self, client: Point, bounds: DisplayRect) -> Vec<Action> {
        self.finish_drag(client, bounds)
    }

    /// Pointer left the overlay: commits the drag at the exit point.
    pub fn on_pointer_leave(&mut self, client: Point, bounds: DisplayRect) -> Vec<Action> {
        self.finish_drag(client, bounds)
    }

    // --- Text entry ---

    /// Key pressed in the text input, whose current value is `value`.
    pub fn on_text_key(&mut self, key: &Key, value: &str) -> Vec<Action> {
        if key.is_commit() {
            self.commit_text(value)
        } else if key.is_cancel() {
            self.dismiss_text()
        } else {
            Vec::new()
        }
    }

    /// Commit the pending label. Whitespace-only input is dropped; the
    /// affordance closes either way.
    pub fn commit_text(&mut self, value: &str) -> Vec<Action> {
        let InputState::TextPending { at } = self.input else {
            return Vec::new();
        };
        self.input = InputState::Idle;

        let mut actions = vec![Action::TextEntryDismissed];
        if let Some(text) = TextAnnotation::from_input(value, at) {
            debug!("overlay: text committed at ({:.1}, {:.1})", text.x, text.y);
            self.store.push_text(text.clone());
            actions.push(Action::TextCommitted(text));
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    /// Close the pending text input without committing (blur, Escape).
    pub fn dismiss_text(&mut self) -> Vec<Action> {
        if self.input.pending_text().is_none() {
            return Vec::new();
        }
        self.input = InputState::Idle;
        vec![Action::TextEntryDismissed]
    }

    // --- Queries ---

    /// Whether a page is present to annotate.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.surface.is_empty()
    }

    /// Whether pointer events on the overlay are intercepted.
    #[must_use]
    pub fn captures_input(&self) -> bool {
        self.is_active() && self.tool.is_active()
    }

    #[must_use]
    pub fn shapes(&self) -> &[ShapeAnnotation] {
        self.store.shapes()
    }

    #[must_use]
    pub fn texts(&self) -> &[TextAnnotation] {
        self.store.texts()
    }

    /// Live drag rectangle, if dragging.
    #[must_use]
    pub fn preview(&self) -> Option<(ShapeKind, Rect)> {
        self.input.preview()
    }

    /// Placement of the open text-entry affordance, if any.
    #[must_use]
    pub fn text_entry(&self) -> Option<TextEntry> {
        self.input.pending_text().map(|bitmap| TextEntry {
            bitmap,
            display: bitmap_to_display(bitmap, self.surface.scale),
        })
    }

    // --- Internals ---

    fn to_bitmap(&self, client: Point, bounds: DisplayRect) -> Option<Point> {
        client_to_bitmap(client, bounds, self.surface.bitmap_size())
    }

    fn finish_drag(&mut self, client: Point, bounds: DisplayRect) -> Vec<Action> {
        let InputState::Dragging { kind, anchor, current } = self.input else {
            return Vec::new();
        };
        self.input = InputState::Idle;

        let release = self.to_bitmap(client, bounds).unwrap_or(current);
        let shape = ShapeAnnotation::new(kind, Rect::from_corners(anchor, release));
        debug!(
            "overlay: {:?} committed at ({:.1}, {:.1}) {:.1}x{:.1}",
            shape.kind, shape.x, shape.y, shape.width, shape.height
        );
        self.store.push_shape(shape);
        vec![Action::ShapeCommitted(shape), Action::RenderNeeded]
    }

    fn reset_gesture(&mut self) -> Vec<Action> {
        match std::mem::take(&mut self.input) {
            InputState::TextPending { .. } => vec![Action::TextEntryDismissed],
            InputState::Dragging { .. } => {
                debug!("overlay: drag discarded");
                Vec::new()
            }
            InputState::Idle => Vec::new(),
        }
    }
}
