//! Viewer shell: document lifecycle, page navigation, tool selection and the
//! bridge from shell state into the overlay engine.
//!
//! All state lives in [`Viewer`]. Methods that touch the overlay return the
//! engine's [`Action`]s for the host to apply; load-path methods, which
//! already return a `Result`, queue theirs for [`Viewer::take_actions`].
//!
//! Document loading is asynchronous on the host. [`Viewer::begin_load`]
//! hands out a [`LoadTicket`] and [`Viewer::finish_load`] only honors the
//! newest one, so a slow first file can never overwrite a second.

#[cfg(test)]
#[path = "shell_test.rs"]
mod shell_test;

use log::{debug, info, warn};
use overlay::engine::{Action, EngineCore};
use overlay::input::{Key, ToolMode};
use overlay::transform::{DisplayRect, PageSurface, Point};
use serde::Serialize;

use crate::config::ViewerConfig;
use crate::document::{DocumentHandle, DocumentInfo, FileInput, LoadTicket, PageSize, PdfRenderer};
use crate::error::{LoadError, RenderError};
use crate::notify::{Notification, NotifyLevel, Notifier};

const WELCOME_MESSAGE: &str = "Welcome to pdfmark. Upload a PDF to start annotating.";
const LOADED_MESSAGE: &str = "PDF loaded successfully!";

/// Serializable snapshot of everything the host UI renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShellView {
    pub document: Option<DocumentHandle>,
    pub current_page: u32,
    pub num_pages: u32,
    pub page_label: Option<String>,
    pub error: Option<String>,
    pub tool: ToolMode,
    pub loading: bool,
    pub surface: PageSurface,
    pub overlay_visible: bool,
    pub navigation_visible: bool,
    pub can_go_prev: bool,
    pub can_go_next: bool,
}

/// The viewer shell.
#[derive(Debug)]
pub struct Viewer {
    config: ViewerConfig,
    notifier: Notifier,
    document: Option<DocumentHandle>,
    current_page: u32,
    error: Option<String>,
    tool: ToolMode,
    surface: PageSurface,
    overlay: EngineCore,
    load_seq: u32,
    pending: Option<u32>,
    outbox: Vec<Action>,
}

impl Viewer {
    #[must_use]
    pub fn new(config: ViewerConfig) -> Self {
        let mut notifier = Notifier::new(config.notification_ms);
        if config.show_welcome {
            notifier.push(NotifyLevel::Info, WELCOME_MESSAGE, config.welcome_ms);
        }
        Self {
            config,
            notifier,
            document: None,
            current_page: 1,
            error: None,
            tool: ToolMode::None,
            surface: PageSurface::ZERO,
            overlay: EngineCore::new(),
            load_seq: 0,
            pending: None,
            outbox: Vec::new(),
        }
    }

    // --- Document loading ---

    /// Validate a picked file and start loading it.
    ///
    /// A rejected file leaves every piece of state untouched apart from the
    /// error notification.
    ///
    /// # Errors
    ///
    /// [`LoadError::NotPdf`] if the MIME type is not accepted.
    pub fn begin_load(&mut self, name: &str, mime: &str) -> Result<LoadTicket, LoadError> {
        if !self.config.accepts(mime) {
            let err = LoadError::NotPdf { mime: mime.to_owned() };
            warn!("shell: rejected {name:?}: {err}");
            self.notifier.error(err.notification());
            return Err(err);
        }
        self.load_seq = self.load_seq.wrapping_add(1);
        if let Some(previous) = self.pending.replace(self.load_seq) {
            debug!("shell: load #{previous} superseded by #{}", self.load_seq);
        }
        debug!("shell: load #{} started for {name:?}", self.load_seq);
        Ok(LoadTicket::new(self.load_seq, name))
    }

    /// Resolve a load started by [`begin_load`](Self::begin_load).
    ///
    /// On success the page index goes back to 1, the error and tool are
    /// cleared and the page surface is reset to zero, which discards every
    /// annotation.
    ///
    /// # Errors
    ///
    /// [`LoadError::Superseded`] if a newer load was started since `ticket`
    /// was issued (state untouched), or the engine's own error.
    pub fn finish_load(
        &mut self,
        ticket: &LoadTicket,
        result: Result<DocumentInfo, LoadError>,
    ) -> Result<DocumentHandle, LoadError> {
        if self.pending != Some(ticket.id) {
            warn!("shell: ignoring stale load #{} ({:?})", ticket.id, ticket.name);
            return Err(LoadError::Superseded);
        }
        self.pending = None;

        let info = match result {
            Ok(info) if info.num_pages == 0 => Err(LoadError::Corrupt("document has no pages".to_owned())),
            other => other,
        };
        match info {
            Ok(info) => {
                let handle = DocumentHandle { id: ticket.id, name: ticket.name.clone(), num_pages: info.num_pages };
                info!("shell: loaded {:?} ({} pages)", handle.name, handle.num_pages);
                self.document = Some(handle.clone());
                self.current_page = 1;
                self.error = None;
                self.tool = ToolMode::None;
                let tool_actions = self.overlay.set_tool(ToolMode::None);
                self.outbox.extend(tool_actions);
                self.reset_surface();
                self.notifier.success(LOADED_MESSAGE);
                Ok(handle)
            }
            Err(err) => {
                warn!("shell: load #{} failed: {err}", ticket.id);
                // The previous document is gone from view; late callbacks
                // for it must not revive it.
                self.document = None;
                self.current_page = 1;
                self.fail(err.display_message().to_owned(), err.notification());
                Err(err)
            }
        }
    }

    /// Load a file synchronously through `renderer`.
    ///
    /// # Errors
    ///
    /// Whatever [`begin_load`](Self::begin_load) or the renderer report.
    pub fn load_document<R: PdfRenderer>(
        &mut self,
        renderer: &mut R,
        file: &FileInput,
    ) -> Result<DocumentHandle, LoadError> {
        let ticket = self.begin_load(&file.name, &file.mime)?;
        let result = renderer.load_document(&file.bytes);
        self.finish_load(&ticket, result)
    }

    // --- Page rendering ---

    /// Render the current page at scale 1 through `renderer` and push its
    /// native size into the overlay.
    ///
    /// # Errors
    ///
    /// [`RenderError::NoDocument`] without a document and
    /// [`RenderError::PageOutOfRange`] for a page the document lacks (state
    /// untouched in both cases), otherwise the renderer's error, which is
    /// also shown to the user.
    pub fn render_page<R: PdfRenderer>(&mut self, renderer: &mut R) -> Result<PageSurface, RenderError> {
        let Some(doc) = self.document.clone() else {
            return Err(RenderError::NoDocument);
        };
        let page = self.current_page;
        if !doc.contains(page) {
            return Err(RenderError::PageOutOfRange { page, num_pages: doc.num_pages });
        }
        match renderer.render_page(&doc, page, 1.0) {
            Ok(size) => {
                let actions = self.page_rendered(doc.id, page, size);
                self.outbox.extend(actions);
                Ok(self.surface)
            }
            Err(err) => {
                let actions = self.page_failed(doc.id, page, &err);
                self.outbox.extend(actions);
                Err(err)
            }
        }
    }

    /// The host finished painting `page` of document `doc_id` at scale 1.
    ///
    /// Ignored unless it names the open document and its current page.
    pub fn page_rendered(&mut self, doc_id: u32, page: u32, size: PageSize) -> Vec<Action> {
        if !self.is_current(doc_id, page) {
            warn!("shell: ignoring render of doc #{doc_id} page {page}");
            return Vec::new();
        }
        debug!("shell: page {page} rendered at {}x{}", size.width_px, size.height_px);
        self.error = None;
        self.set_surface(PageSurface::new(size.width_px, size.height_px, 1.0))
    }

    /// The host failed to paint `page` of document `doc_id`.
    ///
    /// Ignored unless it names the open document and its current page.
    pub fn page_failed(&mut self, doc_id: u32, page: u32, err: &RenderError) -> Vec<Action> {
        if !self.is_current(doc_id, page) {
            warn!("shell: ignoring failure of doc #{doc_id} page {page}");
            return Vec::new();
        }
        warn!("shell: {err}");
        let message = err.display_message();
        self.notifier.error(message.clone());
        self.error = Some(message);
        self.set_surface(PageSurface::ZERO)
    }

    /// The host measured the rendered page at `width` display pixels.
    pub fn set_display_width(&mut self, width: f64) -> Vec<Action> {
        if self.surface.is_empty() || !(width.is_finite() && width > 0.0) {
            return Vec::new();
        }
        let scale = width / self.surface.width_px;
        self.set_surface(self.surface.with_scale(scale))
    }

    // --- Tools ---

    /// Pick a tool from the toolbar. Picking the active tool turns it off.
    pub fn set_tool_mode(&mut self, picked: ToolMode) -> Vec<Action> {
        self.tool = self.tool.toggled(picked);
        self.overlay.set_tool(self.tool)
    }

    // --- Navigation ---

    /// Jump to page `n`, clamped to the document.
    ///
    /// Returns `None` when nothing changes: no document, a single page, an
    /// active error, or already on the target page. Otherwise the page
    /// surface resets to zero until the host reports the new render.
    pub fn go_to_page(&mut self, n: u32) -> Option<Vec<Action>> {
        if !self.navigation_visible() {
            return None;
        }
        let target = n.clamp(1, self.num_pages());
        if target == self.current_page {
            return None;
        }
        debug!("shell: page {} -> {target}", self.current_page);
        self.current_page = target;
        Some(self.set_surface(PageSurface::ZERO))
    }

    pub fn next_page(&mut self) -> Option<Vec<Action>> {
        if !self.can_go_next() {
            return None;
        }
        self.go_to_page(self.current_page + 1)
    }

    pub fn prev_page(&mut self) -> Option<Vec<Action>> {
        if !self.can_go_prev() {
            return None;
        }
        self.go_to_page(self.current_page - 1)
    }

    // --- Overlay input ---

    pub fn on_pointer_down(&mut self, client: Point, bounds: DisplayRect) -> Vec<Action> {
        if !self.overlay_visible() {
            return Vec::new();
        }
        self.overlay.on_pointer_down(client, bounds)
    }

    pub fn on_pointer_move(&mut self, client: Point, bounds: DisplayRect) -> Vec<Action> {
        if !self.overlay_visible() {
            return Vec::new();
        }
        self.overlay.on_pointer_move(client, bounds)
    }

    pub fn on_pointer_up(&mut self, client: Point, bounds: DisplayRect) -> Vec<Action> {
        if !self.overlay_visible() {
            return Vec::new();
        }
        self.overlay.on_pointer_up(client, bounds)
    }

    pub fn on_pointer_leave(&mut self, client: Point, bounds: DisplayRect) -> Vec<Action> {
        if !self.overlay_visible() {
            return Vec::new();
        }
        self.overlay.on_pointer_leave(client, bounds)
    }

    /// Key pressed in the text-entry input.
    pub fn on_text_key(&mut self, key: &Key, value: &str) -> Vec<Action> {
        self.overlay.on_text_key(key, value)
    }

    /// The text-entry input lost focus.
    pub fn dismiss_text(&mut self) -> Vec<Action> {
        self.overlay.dismiss_text()
    }

    // --- Queries ---

    #[must_use]
    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    #[must_use]
    pub fn document(&self) -> Option<&DocumentHandle> {
        self.document.as_ref()
    }

    #[must_use]
    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    #[must_use]
    pub fn num_pages(&self) -> u32 {
        self.document.as_ref().map_or(0, |d| d.num_pages)
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn tool(&self) -> ToolMode {
        self.tool
    }

    #[must_use]
    pub fn surface(&self) -> PageSurface {
        self.surface
    }

    #[must_use]
    pub fn overlay(&self) -> &EngineCore {
        &self.overlay
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// The overlay is shown only over a rendered page with no error.
    #[must_use]
    pub fn overlay_visible(&self) -> bool {
        self.surface.width_px > 0.0 && self.error.is_none()
    }

    /// Page controls appear for multi-page documents without an error.
    #[must_use]
    pub fn navigation_visible(&self) -> bool {
        self.num_pages() > 1 && self.error.is_none()
    }

    #[must_use]
    pub fn can_go_prev(&self) -> bool {
        self.navigation_visible() && self.current_page > 1
    }

    #[must_use]
    pub fn can_go_next(&self) -> bool {
        self.navigation_visible() && self.current_page < self.num_pages()
    }

    /// "Page N of M", once a document is open.
    #[must_use]
    pub fn page_label(&self) -> Option<String> {
        self.document.as_ref().map(|d| format!("Page {} of {}", self.current_page, d.num_pages))
    }

    #[must_use]
    pub fn view(&self) -> ShellView {
        ShellView {
            document: self.document.clone(),
            current_page: self.current_page,
            num_pages: self.num_pages(),
            page_label: self.page_label(),
            error: self.error.clone(),
            tool: self.tool,
            loading: self.is_loading(),
            surface: self.surface,
            overlay_visible: self.overlay_visible(),
            navigation_visible: self.navigation_visible(),
            can_go_prev: self.can_go_prev(),
            can_go_next: self.can_go_next(),
        }
    }

    /// Whether notifications are waiting to be drained.
    #[must_use]
    pub fn has_notifications(&self) -> bool {
        !self.notifier.is_empty()
    }

    /// Notifications queued since the last call, oldest first.
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.notifier.drain()
    }

    /// Overlay actions queued by the load and synchronous render paths.
    pub fn take_actions(&mut self) -> Vec<Action> {
        std::mem::take(&mut self.outbox)
    }

    // --- Internals ---

    fn set_surface(&mut self, surface: PageSurface) -> Vec<Action> {
        self.surface = surface;
        self.overlay.set_surface(surface)
    }

    fn is_current(&self, doc_id: u32, page: u32) -> bool {
        self.document.as_ref().is_some_and(|doc| doc.id == doc_id) && page == self.current_page
    }

    fn reset_surface(&mut self) {
        let actions = self.set_surface(PageSurface::ZERO);
        self.outbox.extend(actions);
    }

    fn fail(&mut self, message: String, notification: &str) {
        self.notifier.error(notification);
        self.error = Some(message);
        self.reset_surface();
    }
}
