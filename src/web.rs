//! Browser entry point.
//!
//! `ViewerApp` is what the JavaScript host holds. The host owns the PDF
//! engine and the page canvas: it reads files, renders pages, and reports
//! each outcome back here. This side owns the shell state and the overlay
//! canvas. Every event method applies overlay actions to the canvas and
//! returns them as JSON so the host can place or hide the text input.

use log::{debug, info};
use overlay::engine::Action;
use overlay::input::{Key, ToolMode};
use overlay::surface::OverlayCanvas;
use overlay::transform::Point;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

use crate::config::ViewerConfig;
use crate::document::{DocumentInfo, LoadTicket, PageSize};
use crate::error::{LoadError, RenderError};
use crate::shell::Viewer;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

#[wasm_bindgen]
pub struct ViewerApp {
    viewer: Viewer,
    canvas: OverlayCanvas,
    issued: Option<LoadTicket>,
}

#[wasm_bindgen]
impl ViewerApp {
    /// Bind to the overlay canvas. `config_json` is an optional
    /// `ViewerConfig` object.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, config_json: Option<String>) -> Result<ViewerApp, JsValue> {
        let config = match config_json.as_deref() {
            Some(json) => ViewerConfig::from_json(json).map_err(js_error)?,
            None => ViewerConfig::default(),
        };
        if let Err(err) = console_log::init_with_level(config.log_level) {
            debug!("console logger already installed: {err}");
        }
        info!("pdfmark viewer starting");
        let canvas = OverlayCanvas::new(canvas)?;
        let app = Self { viewer: Viewer::new(config), canvas, issued: None };
        app.sync_interaction()?;
        Ok(app)
    }

    // --- Loading ---

    /// A file was picked. Returns the ticket to pass back once the host has
    /// read and opened it, or `None` if the file was rejected.
    pub fn begin_load(&mut self, name: &str, mime: &str) -> Option<u32> {
        match self.viewer.begin_load(name, mime) {
            Ok(ticket) => {
                let id = ticket.id();
                self.issued = Some(ticket);
                Some(id)
            }
            Err(err) => {
                debug!("file {name:?} rejected: {err}");
                None
            }
        }
    }

    /// The engine opened the document for `ticket`.
    pub fn document_loaded(&mut self, ticket: u32, num_pages: u32) -> Result<String, JsValue> {
        let ticket = self.ticket(ticket);
        self.finish(&ticket, Ok(DocumentInfo { num_pages }))
    }

    /// The engine could not open the document for `ticket`.
    pub fn document_failed(&mut self, ticket: u32, reason: &str) -> Result<String, JsValue> {
        let ticket = self.ticket(ticket);
        self.finish(&ticket, Err(LoadError::Corrupt(reason.to_owned())))
    }

    /// The file for `ticket` could not be read into memory.
    pub fn file_read_failed(&mut self, ticket: u32, reason: &str) -> Result<String, JsValue> {
        let ticket = self.ticket(ticket);
        self.finish(&ticket, Err(LoadError::Unreadable(reason.to_owned())))
    }

    // --- Rendering ---

    /// The host painted `page` of document `doc_id` at scale 1 with the
    /// given native size. `doc_id` is the ticket the document loaded under.
    pub fn page_rendered(&mut self, doc_id: u32, page: u32, width_px: f64, height_px: f64) -> Result<String, JsValue> {
        let actions = self.viewer.page_rendered(doc_id, page, PageSize { width_px, height_px });
        self.apply(actions)
    }

    pub fn page_failed(&mut self, doc_id: u32, page: u32, reason: &str) -> Result<String, JsValue> {
        let err = RenderError::Failed { page, reason: reason.to_owned() };
        let actions = self.viewer.page_failed(doc_id, page, &err);
        self.apply(actions)
    }

    /// The rendered page now occupies `width` CSS pixels.
    pub fn set_display_width(&mut self, width: f64) -> Result<String, JsValue> {
        let actions = self.viewer.set_display_width(width);
        self.apply(actions)
    }

    // --- Toolbar ---

    pub fn toggle_tool(&mut self, name: &str) -> Result<String, JsValue> {
        let tool = ToolMode::from_name(name).ok_or_else(|| JsValue::from_str(&format!("unknown tool {name:?}")))?;
        let actions = self.viewer.set_tool_mode(tool);
        self.apply(actions)
    }

    /// Returns `null` when the page did not change, otherwise the actions;
    /// the host should then render the new current page.
    pub fn go_to_page(&mut self, page: u32) -> Result<String, JsValue> {
        let actions = self.viewer.go_to_page(page);
        self.apply_navigation(actions)
    }

    pub fn next_page(&mut self) -> Result<String, JsValue> {
        let actions = self.viewer.next_page();
        self.apply_navigation(actions)
    }

    pub fn prev_page(&mut self) -> Result<String, JsValue> {
        let actions = self.viewer.prev_page();
        self.apply_navigation(actions)
    }

    // --- Overlay events ---

    pub fn pointer_down(&mut self, client_x: f64, client_y: f64) -> Result<String, JsValue> {
        let actions = self.viewer.on_pointer_down(Point::new(client_x, client_y), self.canvas.bounds());
        self.apply(actions)
    }

    pub fn pointer_move(&mut self, client_x: f64, client_y: f64) -> Result<String, JsValue> {
        let actions = self.viewer.on_pointer_move(Point::new(client_x, client_y), self.canvas.bounds());
        self.apply(actions)
    }

    pub fn pointer_up(&mut self, client_x: f64, client_y: f64) -> Result<String, JsValue> {
        let actions = self.viewer.on_pointer_up(Point::new(client_x, client_y), self.canvas.bounds());
        self.apply(actions)
    }

    pub fn pointer_leave(&mut self, client_x: f64, client_y: f64) -> Result<String, JsValue> {
        let actions = self.viewer.on_pointer_leave(Point::new(client_x, client_y), self.canvas.bounds());
        self.apply(actions)
    }

    /// Key pressed in the text input; `value` is the input's current text.
    pub fn text_key(&mut self, key: String, value: &str) -> Result<String, JsValue> {
        let actions = self.viewer.on_text_key(&Key(key), value);
        self.apply(actions)
    }

    /// The text input lost focus.
    pub fn text_blur(&mut self) -> Result<String, JsValue> {
        let actions = self.viewer.dismiss_text();
        self.apply(actions)
    }

    // --- Queries ---

    pub fn current_page(&self) -> u32 {
        self.viewer.current_page()
    }

    pub fn view_json(&self) -> Result<String, JsValue> {
        to_json(&self.viewer.view())
    }

    /// Cheap check so the host only parses JSON when something is queued.
    pub fn has_notifications(&self) -> bool {
        self.viewer.has_notifications()
    }

    pub fn drain_notifications_json(&mut self) -> Result<String, JsValue> {
        to_json(&self.viewer.drain_notifications())
    }
}

impl ViewerApp {
    fn ticket(&self, id: u32) -> LoadTicket {
        match &self.issued {
            Some(ticket) if ticket.id() == id => ticket.clone(),
            _ => LoadTicket::new(id, ""),
        }
    }

    fn finish(&mut self, ticket: &LoadTicket, result: Result<DocumentInfo, LoadError>) -> Result<String, JsValue> {
        if let Err(err) = self.viewer.finish_load(ticket, result) {
            debug!("load #{} not applied: {err}", ticket.id());
        }
        let actions = self.viewer.take_actions();
        self.apply(actions)
    }

    fn apply_navigation(&mut self, actions: Option<Vec<Action>>) -> Result<String, JsValue> {
        match actions {
            Some(actions) => self.apply(actions),
            None => Ok("null".to_owned()),
        }
    }

    /// Reflect overlay actions on the canvas, then hand them to the host.
    fn apply(&mut self, actions: Vec<Action>) -> Result<String, JsValue> {
        let mut redraw = false;
        for action in &actions {
            match action {
                Action::RenderNeeded => redraw = true,
                Action::SetCursor { .. } | Action::SetInputCapture { .. } => self.sync_interaction()?,
                Action::ShapeCommitted(_)
                | Action::TextCommitted(_)
                | Action::TextEntryRequested { .. }
                | Action::TextEntryDismissed => {}
            }
        }
        if redraw {
            self.canvas.render(self.viewer.overlay())?;
        }
        to_json(&actions)
    }

    fn sync_interaction(&self) -> Result<(), JsValue> {
        let overlay = self.viewer.overlay();
        let capture = self.viewer.overlay_visible() && overlay.captures_input();
        self.canvas.set_interaction(overlay.tool.cursor(), capture)
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(js_error)
}

fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}
