//! Binding between the engine and the browser `<canvas>` overlay element.
//!
//! The element's backing store is sized to bitmap space so annotations are
//! drawn at native page resolution, while its CSS size is set to display
//! space so it lines up with the rendered page beneath it.

use log::trace;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::engine::EngineCore;
use crate::render;
use crate::transform::{DisplayRect, PageSurface};

/// The overlay canvas element and its 2D context.
pub struct OverlayCanvas {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    applied: PageSurface,
}

impl OverlayCanvas {
    /// Bind to a canvas element.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the element cannot provide a 2D context.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("overlay canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        let overlay = Self { canvas, ctx, applied: PageSurface::ZERO };
        overlay.apply_size(PageSurface::ZERO)?;
        Ok(overlay)
    }

    /// Resize the element to match `surface` if it changed since the last call.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the element's style cannot be updated.
    pub fn sync(&mut self, surface: PageSurface) -> Result<(), JsValue> {
        if surface == self.applied {
            return Ok(());
        }
        self.apply_size(surface)?;
        self.applied = surface;
        Ok(())
    }

    /// Current on-screen bounding rectangle of the element.
    #[must_use]
    pub fn bounds(&self) -> DisplayRect {
        let rect = self.canvas.get_bounding_client_rect();
        DisplayRect::new(rect.left(), rect.top(), rect.width(), rect.height())
    }

    /// Resize if needed, then redraw the full scene.
    ///
    /// # Errors
    ///
    /// Returns `Err` if resizing or any `Canvas2D` call fails.
    pub fn render(&mut self, core: &EngineCore) -> Result<(), JsValue> {
        self.sync(core.surface)?;
        render::draw(&mut self.ctx, core)
    }

    /// Apply CSS cursor and pointer-event capture.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the element's style cannot be updated.
    pub fn set_interaction(&self, cursor: &str, capture: bool) -> Result<(), JsValue> {
        let style = self.canvas.style();
        style.set_property("cursor", cursor)?;
        style.set_property("pointer-events", if capture { "auto" } else { "none" })?;
        style.set_property("touch-action", "none")?;
        Ok(())
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn apply_size(&self, surface: PageSurface) -> Result<(), JsValue> {
        let display = surface.display_size();
        trace!(
            "overlay canvas: bitmap {}x{}, display {:.1}x{:.1}",
            surface.width_px, surface.height_px, display.width, display.height
        );
        self.canvas.set_width(surface.width_px.round() as u32);
        self.canvas.set_height(surface.height_px.round() as u32);
        let style = self.canvas.style();
        style.set_property("width", &format!("{}px", display.width))?;
        style.set_property("height", &format!("{}px", display.height))?;
        Ok(())
    }
}
