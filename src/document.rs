//! Document types and the boundary to the external PDF engine.
//!
//! The shell never parses PDF itself. A [`PdfRenderer`] turns bytes into a
//! page count and paints pages into whatever surface it owns, reporting back
//! only the native pixel size of the page it painted.

#[cfg(test)]
#[path = "document_test.rs"]
mod document_test;

use serde::Serialize;

use crate::error::{LoadError, RenderError};

/// MIME type of a PDF file.
pub const PDF_MIME: &str = "application/pdf";

/// A file picked or dropped by the user, already read into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInput {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl FileInput {
    #[must_use]
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self { name: name.into(), mime: mime.into(), bytes }
    }
}

/// What the engine reports after opening a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentInfo {
    pub num_pages: u32,
}

/// Native size of a rendered page at scale 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width_px: f64,
    pub height_px: f64,
}

/// The currently open document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentHandle {
    /// Load sequence number this document came from.
    pub id: u32,
    pub name: String,
    pub num_pages: u32,
}

impl DocumentHandle {
    /// Whether `page` is a valid 1-based page number.
    #[must_use]
    pub fn contains(&self, page: u32) -> bool {
        (1..=self.num_pages).contains(&page)
    }
}

/// Proof that a load was started; hand it back to
/// [`Viewer::finish_load`](crate::shell::Viewer::finish_load).
///
/// Only the most recently issued ticket is honored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    pub(crate) id: u32,
    pub(crate) name: String,
}

impl LoadTicket {
    pub(crate) fn new(id: u32, name: impl Into<String>) -> Self {
        Self { id, name: name.into() }
    }

    #[must_use]
    pub fn id(&self) -> u32 {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// External PDF engine.
pub trait PdfRenderer {
    /// Open a document from raw bytes.
    ///
    /// # Errors
    ///
    /// [`LoadError::Corrupt`] if the bytes are not a readable PDF.
    fn load_document(&mut self, bytes: &[u8]) -> Result<DocumentInfo, LoadError>;

    /// Paint a 1-based page of `doc` at `scale` and report its native size.
    ///
    /// # Errors
    ///
    /// [`RenderError`] if the page does not exist or cannot be painted.
    fn render_page(&mut self, doc: &DocumentHandle, page: u32, scale: f64) -> Result<PageSize, RenderError>;
}
