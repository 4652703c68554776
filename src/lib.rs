//! # pdfmark
//!
//! Viewer shell for the in-browser PDF markup tool. The shell owns the loaded
//! document, the current page, the selected tool, the visible error message
//! and the notification queue. Page rasterization is delegated to an external
//! PDF engine behind [`document::PdfRenderer`]; the markup layer itself is the
//! `overlay` crate, whose [`overlay::engine::EngineCore`] the shell feeds with
//! page dimensions, display scale and tool changes.
//!
//! With the `hydrate` feature the crate also builds the WASM entry point
//! ([`web::ViewerApp`]) that wires the JavaScript host's PDF renderer
//! callbacks, DOM events and overlay `<canvas>` to the shell.

pub mod config;
pub mod document;
pub mod error;
pub mod notify;
pub mod shell;
#[cfg(feature = "hydrate")]
pub mod web;
