//! Rendering: draws the full overlay scene.
//!
//! Every redraw is a full clear followed by committed shapes (insertion
//! order), committed text (insertion order), and finally the live drag
//! preview. Drawing goes through the [`Painter`] trait; the implementation
//! for [`web_sys::CanvasRenderingContext2d`] below is the only place that
//! touches the browser 2D context. Nothing here mutates engine state.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::surface::OverlayCanvas::render`]) hands the
//! result to the host.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::annotations::{ShapeKind, TextAnnotation};
use crate::consts::{
    BLUR_DASH, BLUR_FILL, BLUR_RADIUS_PX, ERASE_FILL, OUTLINE_COLOR, OUTLINE_WIDTH_PX, PREVIEW_OUTLINE_COLOR,
    TEXT_FONT, TEXT_SHADOW_BLUR_PX, TEXT_SHADOW_COLOR,
};
use crate::engine::EngineCore;
use crate::transform::{Point, Rect, Size};

/// Outline style for a region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke<'a> {
    pub color: &'a str,
    pub width: f64,
    /// Dash pattern; empty for a solid line.
    pub dash: &'a [f64],
}

/// Style for a text label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle<'a> {
    pub font: &'a str,
    pub color: &'a str,
    pub shadow_color: &'a str,
    pub shadow_blur: f64,
}

/// Drawing primitives the overlay needs from a bitmap-space surface.
///
/// Implementations must leave no lasting state behind between calls (filter,
/// dash, shadow); each call is self-contained.
pub trait Painter {
    type Error;

    /// Erase the whole surface.
    fn clear_surface(&mut self, size: Size) -> Result<(), Self::Error>;

    /// Fill `rect` with a solid color.
    fn fill_region(&mut self, rect: Rect, color: &str) -> Result<(), Self::Error>;

    /// Fill `rect` with `color` under a blur filter, without softening
    /// anything outside `rect`.
    fn fill_region_blurred(&mut self, rect: Rect, color: &str, radius_px: f64) -> Result<(), Self::Error>;

    /// Outline `rect`.
    fn stroke_region(&mut self, rect: Rect, stroke: &Stroke<'_>) -> Result<(), Self::Error>;

    /// Draw `text` with its baseline origin at `at`.
    fn draw_label(&mut self, text: &str, at: Point, style: &TextStyle<'_>) -> Result<(), Self::Error>;
}

/// Draw the full scene for the current engine state.
///
/// # Errors
///
/// Returns the painter's error as soon as any primitive fails.
pub fn draw<P: Painter>(painter: &mut P, core: &EngineCore) -> Result<(), P::Error> {
    let size = core.surface.bitmap_size();
    painter.clear_surface(size)?;
    if size.is_empty() {
        return Ok(());
    }

    // Layer 1: committed regions, bottom first.
    for shape in core.shapes() {
        draw_region(painter, shape.kind, shape.rect(), OUTLINE_COLOR)?;
    }

    // Layer 2: committed text.
    for text in core.texts() {
        draw_text(painter, text)?;
    }

    // Layer 3: live preview.
    if let Some((kind, rect)) = core.preview() {
        draw_region(painter, kind, rect, PREVIEW_OUTLINE_COLOR)?;
    }

    Ok(())
}

fn draw_region<P: Painter>(painter: &mut P, kind: ShapeKind, rect: Rect, outline: &str) -> Result<(), P::Error> {
    match kind {
        ShapeKind::Blur => {
            painter.fill_region_blurred(rect, BLUR_FILL, BLUR_RADIUS_PX)?;
            painter.stroke_region(rect, &Stroke { color: outline, width: OUTLINE_WIDTH_PX, dash: &BLUR_DASH })
        }
        ShapeKind::Erase => {
            painter.fill_region(rect, ERASE_FILL)?;
            painter.stroke_region(rect, &Stroke { color: outline, width: OUTLINE_WIDTH_PX, dash: &[] })
        }
    }
}

fn draw_text<P: Painter>(painter: &mut P, text: &TextAnnotation) -> Result<(), P::Error> {
    let style = TextStyle {
        font: TEXT_FONT,
        color: &text.color,
        shadow_color: TEXT_SHADOW_COLOR,
        shadow_blur: TEXT_SHADOW_BLUR_PX,
    };
    painter.draw_label(&text.content, text.anchor(), &style)
}

// =============================================================
// Canvas 2D
// =============================================================

impl Painter for CanvasRenderingContext2d {
    type Error = JsValue;

    fn clear_surface(&mut self, size: Size) -> Result<(), JsValue> {
        self.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)?;
        self.clear_rect(0.0, 0.0, size.width, size.height);
        Ok(())
    }

    fn fill_region(&mut self, rect: Rect, color: &str) -> Result<(), JsValue> {
        self.set_fill_style_str(color);
        self.fill_rect(rect.x, rect.y, rect.width, rect.height);
        Ok(())
    }

    fn fill_region_blurred(&mut self, rect: Rect, color: &str, radius_px: f64) -> Result<(), JsValue> {
        self.save();

        // Clip first so the filter cannot bleed onto earlier content.
        self.begin_path();
        self.rect(rect.x, rect.y, rect.width, rect.height);
        self.clip();

        self.set_filter(&format!("blur({radius_px}px)"));
        self.set_fill_style_str(color);
        self.fill_rect(rect.x, rect.y, rect.width, rect.height);

        self.restore();
        Ok(())
    }

    fn stroke_region(&mut self, rect: Rect, stroke: &Stroke<'_>) -> Result<(), JsValue> {
        self.save();
        self.set_stroke_style_str(stroke.color);
        self.set_line_width(stroke.width);
        let dash_array = js_sys::Array::new();
        for segment in stroke.dash {
            dash_array.push(&(*segment).into());
        }
        self.set_line_dash(&dash_array)?;
        self.stroke_rect(rect.x, rect.y, rect.width, rect.height);
        self.restore();
        Ok(())
    }

    fn draw_label(&mut self, text: &str, at: Point, style: &TextStyle<'_>) -> Result<(), JsValue> {
        self.save();
        self.set_font(style.font);
        self.set_fill_style_str(style.color);
        self.set_shadow_color(style.shadow_color);
        self.set_shadow_blur(style.shadow_blur);
        self.fill_text(text, at.x, at.y)?;
        self.restore();
        Ok(())
    }
}
