//! Error taxonomy for the viewer shell.
//!
//! Both load and render errors are terminal for the operation that raised
//! them, never for the viewer: the shell turns them into a visible message
//! plus a notification and waits for the user to pick another file.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Failure to accept or open a document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    /// The picked file is not a PDF.
    #[error("unsupported file type {mime:?}; expected a PDF")]
    NotPdf { mime: String },
    /// The file could not be read into memory.
    #[error("could not read file: {0}")]
    Unreadable(String),
    /// The PDF engine could not parse the bytes.
    #[error("could not parse PDF: {0}")]
    Corrupt(String),
    /// A newer load started before this one resolved.
    #[error("load superseded by a newer file")]
    Superseded,
}

impl LoadError {
    /// Message for the viewer's error panel.
    #[must_use]
    pub fn display_message(&self) -> &'static str {
        match self {
            Self::NotPdf { .. } => "Please upload a valid PDF file",
            Self::Unreadable(_) => "Error reading PDF file",
            Self::Corrupt(_) => "Failed to load PDF. Please try a different file.",
            Self::Superseded => "A newer file replaced this one.",
        }
    }

    /// Text for the transient notification.
    #[must_use]
    pub fn notification(&self) -> &'static str {
        match self {
            Self::NotPdf { .. } => "Please upload a valid PDF file",
            Self::Unreadable(_) => "Error reading PDF file",
            Self::Corrupt(_) => "Failed to load PDF file",
            Self::Superseded => "Load cancelled",
        }
    }
}

/// Failure to render a page.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("no document loaded")]
    NoDocument,
    #[error("page {page} is outside 1..={num_pages}")]
    PageOutOfRange { page: u32, num_pages: u32 },
    /// The PDF engine gave up on the page (e.g. unsupported content).
    #[error("failed to render page {page}: {reason}")]
    Failed { page: u32, reason: String },
}

impl RenderError {
    /// Message for the viewer's error panel.
    #[must_use]
    pub fn display_message(&self) -> String {
        match self {
            Self::NoDocument => "No document loaded.".to_owned(),
            Self::PageOutOfRange { page, .. } | Self::Failed { page, .. } => {
                format!("Failed to render page {page}.")
            }
        }
    }
}

/// Invalid host-supplied configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid viewer config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("viewer config accepts no file types")]
    NoAcceptedTypes,
}
