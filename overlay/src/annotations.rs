//! Annotation model: committed shapes, text labels, and the per-page store.
//!
//! Everything here lives in bitmap space. The store is append-only for the
//! lifetime of a page; the only way to drop annotations is [`AnnotationStore::clear`],
//! which the engine calls when the page surface resets. The renderer reads
//! the two lists in insertion order, which is also their z-order.

#[cfg(test)]
#[path = "annotations_test.rs"]
mod annotations_test;

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_TEXT_COLOR;
use crate::transform::{Point, Rect};

/// Kind of a rectangular region annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    /// Softened, near-opaque cover over the region.
    Blur,
    /// Solid white-out over the region.
    Erase,
}

/// A committed rectangular region, normalized so `(x, y)` is the top-left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeAnnotation {
    pub kind: ShapeKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ShapeAnnotation {
    #[must_use]
    pub fn new(kind: ShapeKind, rect: Rect) -> Self {
        Self { kind, x: rect.x, y: rect.y, width: rect.width, height: rect.height }
    }

    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect { x: self.x, y: self.y, width: self.width, height: self.height }
    }
}

/// A committed text label anchored at a bitmap-space point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextAnnotation {
    pub content: String,
    pub x: f64,
    pub y: f64,
    pub color: String,
}

impl TextAnnotation {
    /// Build a label from raw input. Returns `None` when the trimmed input is
    /// empty.
    #[must_use]
    pub fn from_input(input: &str, at: Point) -> Option<Self> {
        let content = input.trim();
        if content.is_empty() {
            return None;
        }
        Some(Self {
            content: content.to_owned(),
            x: at.x,
            y: at.y,
            color: DEFAULT_TEXT_COLOR.to_owned(),
        })
    }

    #[must_use]
    pub fn anchor(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Committed annotations for the displayed page.
#[derive(Debug, Clone, Default)]
pub struct AnnotationStore {
    shapes: Vec<ShapeAnnotation>,
    texts: Vec<TextAnnotation>,
}

impl AnnotationStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a shape on top of the existing ones.
    pub fn push_shape(&mut self, shape: ShapeAnnotation) {
        self.shapes.push(shape);
    }

    /// Append a text label on top of the existing ones.
    pub fn push_text(&mut self, text: TextAnnotation) {
        self.texts.push(text);
    }

    /// Shapes in insertion (draw) order.
    #[must_use]
    pub fn shapes(&self) -> &[ShapeAnnotation] {
        &self.shapes
    }

    /// Text labels in insertion (draw) order.
    #[must_use]
    pub fn texts(&self) -> &[TextAnnotation] {
        &self.texts
    }

    /// Drop everything.
    pub fn clear(&mut self) {
        self.shapes.clear();
        self.texts.clear();
    }

    /// Total number of annotations of either kind.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len() + self.texts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty() && self.texts.is_empty()
    }
}
