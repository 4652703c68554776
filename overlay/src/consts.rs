//! Shared drawing constants for the overlay crate.

// ── Blur regions ────────────────────────────────────────────────

/// Near-opaque light fill laid under the blur filter.
pub const BLUR_FILL: &str = "rgba(255, 255, 255, 0.95)";

/// Blur filter radius in bitmap pixels.
pub const BLUR_RADIUS_PX: f64 = 8.0;

/// Dash pattern (on, off) for blur region outlines.
pub const BLUR_DASH: [f64; 2] = [6.0, 4.0];

// ── Erase regions ───────────────────────────────────────────────

/// Solid white-out fill.
pub const ERASE_FILL: &str = "#fff";

// ── Outlines ────────────────────────────────────────────────────

/// Outline color for committed regions (gray-600 at 50%).
pub const OUTLINE_COLOR: &str = "rgba(75, 85, 99, 0.5)";

/// Outline color for the live drag preview, a touch more opaque.
pub const PREVIEW_OUTLINE_COLOR: &str = "rgba(75, 85, 99, 0.6)";

/// Outline width in bitmap pixels.
pub const OUTLINE_WIDTH_PX: f64 = 2.0;

// ── Text labels ─────────────────────────────────────────────────

/// Font for text annotations.
pub const TEXT_FONT: &str = "16px Inter, sans-serif";

/// Color given to newly committed text annotations.
pub const DEFAULT_TEXT_COLOR: &str = "#000";

/// Drop shadow color behind text for legibility on busy pages.
pub const TEXT_SHADOW_COLOR: &str = "rgba(0, 0, 0, 0.1)";

/// Drop shadow blur radius in bitmap pixels.
pub const TEXT_SHADOW_BLUR_PX: f64 = 2.0;

// ── Cursors ─────────────────────────────────────────────────────

/// CSS cursor while a tool is active.
pub const CURSOR_TOOL: &str = "crosshair";

/// CSS cursor while no tool is active.
pub const CURSOR_DEFAULT: &str = "default";
