//! Annotation overlay engine for the PDF viewer.
//!
//! This crate is compiled to WebAssembly and runs in the browser on top of a
//! rendered PDF page. It owns the markup layer: translating raw pointer input
//! from display space into the page's bitmap space, tracking the drag and
//! text-entry gestures, accumulating committed annotations, and redrawing the
//! whole overlay on demand. The viewer shell pushes page dimensions, display
//! scale and the active tool in; the engine hands [`engine::Action`]s back.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Testable [`engine::EngineCore`] state container and its actions |
//! | [`annotations`] | Committed shape/text annotations and their store |
//! | [`transform`] | Page surface, geometry, display ↔ bitmap conversions |
//! | [`input`] | Tool modes, keys, and the gesture state machine |
//! | [`render`] | Full-redraw scene painting through the [`render::Painter`] seam |
//! | [`surface`] | Binding to the browser `<canvas>` element |
//! | [`consts`] | Shared drawing constants (colors, blur radius, font) |

pub mod annotations;
pub mod consts;
pub mod engine;
pub mod input;
pub mod render;
pub mod surface;
pub mod transform;
