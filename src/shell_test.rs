use overlay::annotations::ShapeKind;

use super::*;
use crate::document::PDF_MIME;

/// In-memory engine: every load yields `num_pages`, every page the same size
/// unless told to fail.
struct FakeRenderer {
    num_pages: u32,
    size: PageSize,
    fail_load: bool,
    fail_page: Option<u32>,
    rendered: Vec<(u32, f64)>,
}

impl FakeRenderer {
    fn new(num_pages: u32) -> Self {
        Self {
            num_pages,
            size: PageSize { width_px: 800.0, height_px: 600.0 },
            fail_load: false,
            fail_page: None,
            rendered: Vec::new(),
        }
    }
}

impl PdfRenderer for FakeRenderer {
    fn load_document(&mut self, _bytes: &[u8]) -> Result<DocumentInfo, LoadError> {
        if self.fail_load {
            return Err(LoadError::Corrupt("bad header".into()));
        }
        Ok(DocumentInfo { num_pages: self.num_pages })
    }

    fn render_page(&mut self, doc: &DocumentHandle, page: u32, scale: f64) -> Result<PageSize, RenderError> {
        self.rendered.push((page, scale));
        if !doc.contains(page) {
            return Err(RenderError::PageOutOfRange { page, num_pages: doc.num_pages });
        }
        if self.fail_page == Some(page) {
            return Err(RenderError::Failed { page, reason: "broken stream".into() });
        }
        Ok(self.size)
    }
}

fn quiet() -> ViewerConfig {
    ViewerConfig { show_welcome: false, ..ViewerConfig::default() }
}

fn pdf(name: &str) -> FileInput {
    FileInput::new(name, PDF_MIME, b"%PDF-1.7".to_vec())
}

fn bounds() -> DisplayRect {
    DisplayRect::new(0.0, 0.0, 800.0, 600.0)
}

/// Viewer with `pages` pages loaded and page 1 rendered at 800x600.
fn loaded(pages: u32) -> (Viewer, FakeRenderer) {
    let mut viewer = Viewer::new(quiet());
    let mut renderer = FakeRenderer::new(pages);
    viewer.load_document(&mut renderer, &pdf("doc.pdf")).unwrap();
    viewer.render_page(&mut renderer).unwrap();
    viewer.drain_notifications();
    viewer.take_actions();
    (viewer, renderer)
}

fn drag(viewer: &mut Viewer, from: (f64, f64), to: (f64, f64)) -> Vec<Action> {
    viewer.on_pointer_down(Point::new(from.0, from.1), bounds());
    viewer.on_pointer_move(Point::new(to.0, to.1), bounds());
    viewer.on_pointer_up(Point::new(to.0, to.1), bounds())
}

// =============================================================
// Startup
// =============================================================

#[test]
fn new_viewer_queues_welcome() {
    let mut viewer = Viewer::new(ViewerConfig::default());
    let notes = viewer.drain_notifications();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].level, NotifyLevel::Info);
    assert_eq!(notes[0].duration_ms, 4000);
}

#[test]
fn welcome_can_be_disabled() {
    let mut viewer = Viewer::new(quiet());
    assert!(!viewer.has_notifications());
    assert!(viewer.drain_notifications().is_empty());
}

#[test]
fn has_notifications_tracks_queue() {
    let mut viewer = Viewer::new(ViewerConfig::default());
    assert!(viewer.has_notifications());
    viewer.drain_notifications();
    assert!(!viewer.has_notifications());
}

#[test]
fn new_viewer_is_empty() {
    let viewer = Viewer::new(quiet());
    assert!(viewer.document().is_none());
    assert_eq!(viewer.current_page(), 1);
    assert_eq!(viewer.num_pages(), 0);
    assert_eq!(viewer.tool(), ToolMode::None);
    assert!(!viewer.overlay_visible());
    assert!(!viewer.navigation_visible());
    assert!(viewer.page_label().is_none());
}

// =============================================================
// Loading
// =============================================================

#[test]
fn load_document_resets_state_and_notifies() {
    let mut viewer = Viewer::new(quiet());
    let mut renderer = FakeRenderer::new(5);
    let handle = viewer.load_document(&mut renderer, &pdf("report.pdf")).unwrap();

    assert_eq!(handle.name, "report.pdf");
    assert_eq!(handle.num_pages, 5);
    assert_eq!(viewer.current_page(), 1);
    assert!(viewer.error().is_none());
    assert_eq!(viewer.surface(), PageSurface::ZERO);
    assert!(!viewer.is_loading());

    let notes = viewer.drain_notifications();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].level, NotifyLevel::Success);
    assert_eq!(notes[0].message, "PDF loaded successfully!");
}

#[test]
fn non_pdf_is_rejected_without_state_change() {
    let (mut viewer, _) = loaded(3);
    viewer.set_tool_mode(ToolMode::Blur);
    drag(&mut viewer, (10.0, 10.0), (50.0, 50.0));
    let before = viewer.view();

    let err = viewer.begin_load("photo.png", "image/png").unwrap_err();
    assert!(matches!(err, LoadError::NotPdf { .. }));
    assert_eq!(viewer.view(), before);
    assert_eq!(viewer.overlay().shapes().len(), 1);

    let notes = viewer.drain_notifications();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].level, NotifyLevel::Error);
    assert_eq!(notes[0].message, "Please upload a valid PDF file");
}

#[test]
fn new_document_clears_annotations_and_tool() {
    let (mut viewer, mut renderer) = loaded(2);
    viewer.set_tool_mode(ToolMode::Erase);
    drag(&mut viewer, (100.0, 100.0), (300.0, 250.0));
    assert_eq!(viewer.overlay().shapes().len(), 1);

    viewer.load_document(&mut renderer, &pdf("other.pdf")).unwrap();
    assert!(viewer.overlay().shapes().is_empty());
    assert!(viewer.overlay().texts().is_empty());
    assert_eq!(viewer.tool(), ToolMode::None);
    assert_eq!(viewer.overlay().tool, ToolMode::None);

    let actions = viewer.take_actions();
    assert!(actions.contains(&Action::RenderNeeded));
    assert!(actions.contains(&Action::SetCursor { cursor: "default".into() }));
}

#[test]
fn stale_ticket_is_ignored() {
    let mut viewer = Viewer::new(quiet());
    let first = viewer.begin_load("slow.pdf", PDF_MIME).unwrap();
    let second = viewer.begin_load("fast.pdf", PDF_MIME).unwrap();

    let handle = viewer.finish_load(&second, Ok(DocumentInfo { num_pages: 2 })).unwrap();
    assert_eq!(handle.name, "fast.pdf");

    let err = viewer.finish_load(&first, Ok(DocumentInfo { num_pages: 9 })).unwrap_err();
    assert_eq!(err, LoadError::Superseded);
    assert_eq!(viewer.document().map(|d| d.name.as_str()), Some("fast.pdf"));
    assert_eq!(viewer.num_pages(), 2);
}

#[test]
fn stale_completion_after_newer_start_does_not_load() {
    let mut viewer = Viewer::new(quiet());
    let first = viewer.begin_load("a.pdf", PDF_MIME).unwrap();
    viewer.begin_load("b.pdf", PDF_MIME).unwrap();

    assert_eq!(viewer.finish_load(&first, Ok(DocumentInfo { num_pages: 1 })), Err(LoadError::Superseded));
    assert!(viewer.document().is_none());
    assert!(viewer.is_loading());
}

#[test]
fn ticket_cannot_be_used_twice() {
    let mut viewer = Viewer::new(quiet());
    let ticket = viewer.begin_load("a.pdf", PDF_MIME).unwrap();
    viewer.finish_load(&ticket, Ok(DocumentInfo { num_pages: 1 })).unwrap();
    assert_eq!(viewer.finish_load(&ticket, Ok(DocumentInfo { num_pages: 1 })), Err(LoadError::Superseded));
}

#[test]
fn corrupt_document_sets_error() {
    let mut viewer = Viewer::new(quiet());
    let mut renderer = FakeRenderer::new(1);
    renderer.fail_load = true;

    let err = viewer.load_document(&mut renderer, &pdf("broken.pdf")).unwrap_err();
    assert!(matches!(err, LoadError::Corrupt(_)));
    assert_eq!(viewer.error(), Some("Failed to load PDF. Please try a different file."));
    assert!(!viewer.overlay_visible());

    let notes = viewer.drain_notifications();
    assert_eq!(notes[0].message, "Failed to load PDF file");
    assert_eq!(notes[0].level, NotifyLevel::Error);
}

#[test]
fn failed_load_closes_previous_document() {
    let (mut viewer, mut renderer) = loaded(3);
    renderer.fail_load = true;
    viewer.load_document(&mut renderer, &pdf("broken.pdf")).unwrap_err();

    assert!(viewer.document().is_none());
    assert!(viewer.page_label().is_none());
    assert_eq!(viewer.render_page(&mut renderer), Err(RenderError::NoDocument));
}

#[test]
fn unreadable_file_sets_error() {
    let mut viewer = Viewer::new(quiet());
    let ticket = viewer.begin_load("a.pdf", PDF_MIME).unwrap();
    viewer.finish_load(&ticket, Err(LoadError::Unreadable("aborted".into()))).unwrap_err();
    assert_eq!(viewer.error(), Some("Error reading PDF file"));
}

#[test]
fn zero_page_document_is_corrupt() {
    let mut viewer = Viewer::new(quiet());
    let mut renderer = FakeRenderer::new(0);
    let err = viewer.load_document(&mut renderer, &pdf("empty.pdf")).unwrap_err();
    assert!(matches!(err, LoadError::Corrupt(_)));
    assert!(viewer.document().is_none());
}

// =============================================================
// Rendering
// =============================================================

#[test]
fn render_page_captures_native_size_at_scale_one() {
    let (viewer, renderer) = loaded(2);
    assert_eq!(renderer.rendered, vec![(1, 1.0)]);
    assert_eq!(viewer.surface(), PageSurface::new(800.0, 600.0, 1.0));
    assert!(viewer.overlay_visible());
    assert!(viewer.overlay().is_active());
}

#[test]
fn render_without_document_is_an_error() {
    let mut viewer = Viewer::new(quiet());
    let mut renderer = FakeRenderer::new(1);
    assert_eq!(viewer.render_page(&mut renderer), Err(RenderError::NoDocument));
    assert!(viewer.error().is_none());
    assert!(renderer.rendered.is_empty());
}

#[test]
fn render_failure_hides_overlay() {
    let mut viewer = Viewer::new(quiet());
    let mut renderer = FakeRenderer::new(2);
    renderer.fail_page = Some(1);
    viewer.load_document(&mut renderer, &pdf("doc.pdf")).unwrap();
    viewer.drain_notifications();

    let err = viewer.render_page(&mut renderer).unwrap_err();
    assert!(matches!(err, RenderError::Failed { page: 1, .. }));
    assert_eq!(viewer.error(), Some("Failed to render page 1."));
    assert!(!viewer.overlay_visible());
    assert!(!viewer.navigation_visible());
    assert_eq!(viewer.drain_notifications()[0].level, NotifyLevel::Error);
}

#[test]
fn pointer_input_ignored_while_overlay_hidden() {
    let mut viewer = Viewer::new(quiet());
    viewer.set_tool_mode(ToolMode::Blur);
    assert!(viewer.on_pointer_down(Point::new(10.0, 10.0), bounds()).is_empty());
    assert!(viewer.on_pointer_up(Point::new(20.0, 20.0), bounds()).is_empty());
    assert!(viewer.overlay().shapes().is_empty());
}

#[test]
fn render_callback_for_other_page_is_ignored() {
    let (mut viewer, _) = loaded(3);
    viewer.go_to_page(2).unwrap();
    let actions = viewer.page_rendered(1, 1, PageSize { width_px: 100.0, height_px: 100.0 });
    assert!(actions.is_empty());
    assert_eq!(viewer.surface(), PageSurface::ZERO);

    let actions = viewer.page_failed(1, 3, &RenderError::Failed { page: 3, reason: "x".into() });
    assert!(actions.is_empty());
    assert!(viewer.error().is_none());

    viewer.page_rendered(1, 2, PageSize { width_px: 612.0, height_px: 792.0 });
    assert_eq!(viewer.surface(), PageSurface::new(612.0, 792.0, 1.0));
}

#[test]
fn render_result_from_replaced_document_is_ignored() {
    let (mut viewer, _) = loaded(3);
    let old_id = viewer.document().map(|d| d.id).unwrap();
    let ticket = viewer.begin_load("b.pdf", PDF_MIME).unwrap();
    let new_id = viewer.finish_load(&ticket, Ok(DocumentInfo { num_pages: 5 })).unwrap().id;
    assert_ne!(old_id, new_id);

    let late = RenderError::Failed { page: 1, reason: "torn down".into() };
    assert!(viewer.page_failed(old_id, 1, &late).is_empty());
    assert!(viewer.error().is_none());
    assert!(viewer.navigation_visible());

    assert!(viewer.page_rendered(old_id, 1, PageSize { width_px: 100.0, height_px: 100.0 }).is_empty());
    assert_eq!(viewer.surface(), PageSurface::ZERO);

    viewer.page_rendered(new_id, 1, PageSize { width_px: 612.0, height_px: 792.0 });
    assert_eq!(viewer.surface(), PageSurface::new(612.0, 792.0, 1.0));
    assert!(viewer.overlay_visible());
}

#[test]
fn late_render_cannot_clear_load_error() {
    let (mut viewer, _) = loaded(3);
    let old_id = viewer.document().map(|d| d.id).unwrap();
    let ticket = viewer.begin_load("b.pdf", PDF_MIME).unwrap();
    viewer.finish_load(&ticket, Err(LoadError::Corrupt("bad xref".into()))).unwrap_err();

    let actions = viewer.page_rendered(old_id, 1, PageSize { width_px: 800.0, height_px: 600.0 });
    assert!(actions.is_empty());
    assert_eq!(viewer.error(), Some("Failed to load PDF. Please try a different file."));
    assert!(!viewer.overlay_visible());
}

#[test]
fn render_failure_for_current_document_is_shown() {
    let (mut viewer, _) = loaded(2);
    let id = viewer.document().map(|d| d.id).unwrap();
    let actions = viewer.page_failed(id, 1, &RenderError::Failed { page: 1, reason: "x".into() });
    assert!(actions.contains(&Action::RenderNeeded));
    assert_eq!(viewer.error(), Some("Failed to render page 1."));
}

#[test]
fn display_width_sets_scale() {
    let (mut viewer, _) = loaded(1);
    let actions = viewer.set_display_width(400.0);
    assert!(actions.contains(&Action::RenderNeeded));
    assert_eq!(viewer.surface().scale, 0.5);
    assert_eq!(viewer.overlay().surface.scale, 0.5);
}

#[test]
fn display_width_ignored_without_page_or_bad_width() {
    let mut viewer = Viewer::new(quiet());
    assert!(viewer.set_display_width(400.0).is_empty());

    let (mut viewer, _) = loaded(1);
    assert!(viewer.set_display_width(0.0).is_empty());
    assert!(viewer.set_display_width(f64::NAN).is_empty());
    assert_eq!(viewer.surface().scale, 1.0);
}

#[test]
fn rescale_keeps_annotations() {
    let (mut viewer, _) = loaded(1);
    viewer.set_tool_mode(ToolMode::Erase);
    drag(&mut viewer, (100.0, 100.0), (300.0, 250.0));
    viewer.set_display_width(1600.0);
    assert_eq!(viewer.overlay().shapes().len(), 1);
}

// =============================================================
// Tools
// =============================================================

#[test]
fn toggling_tool_to_itself_clears_it() {
    let mut viewer = Viewer::new(quiet());
    viewer.set_tool_mode(ToolMode::Blur);
    assert_eq!(viewer.tool(), ToolMode::Blur);
    viewer.set_tool_mode(ToolMode::Blur);
    assert_eq!(viewer.tool(), ToolMode::None);
}

#[test]
fn toggling_to_another_tool_switches() {
    let mut viewer = Viewer::new(quiet());
    viewer.set_tool_mode(ToolMode::Blur);
    viewer.set_tool_mode(ToolMode::Text);
    assert_eq!(viewer.tool(), ToolMode::Text);
    assert_eq!(viewer.overlay().tool, ToolMode::Text);
}

#[test]
fn switching_tool_discards_drag() {
    let (mut viewer, _) = loaded(1);
    viewer.set_tool_mode(ToolMode::Blur);
    viewer.on_pointer_down(Point::new(10.0, 10.0), bounds());
    viewer.set_tool_mode(ToolMode::Erase);
    assert!(viewer.overlay().preview().is_none());
    assert!(viewer.on_pointer_up(Point::new(50.0, 50.0), bounds()).is_empty());
    assert!(viewer.overlay().shapes().is_empty());
}

#[test]
fn erase_drag_commits_normalized_rect() {
    let (mut viewer, _) = loaded(1);
    viewer.set_tool_mode(ToolMode::Erase);
    let actions = drag(&mut viewer, (300.0, 250.0), (100.0, 100.0));
    assert!(actions.contains(&Action::RenderNeeded));

    let shape = viewer.overlay().shapes()[0];
    assert_eq!(shape.kind, ShapeKind::Erase);
    assert_eq!((shape.x, shape.y, shape.width, shape.height), (100.0, 100.0, 200.0, 150.0));
}

#[test]
fn blur_click_commits_zero_size_rect() {
    let (mut viewer, _) = loaded(1);
    viewer.set_tool_mode(ToolMode::Blur);
    viewer.on_pointer_down(Point::new(50.0, 50.0), bounds());
    viewer.on_pointer_up(Point::new(50.0, 50.0), bounds());

    let shape = viewer.overlay().shapes()[0];
    assert_eq!(shape.kind, ShapeKind::Blur);
    assert_eq!((shape.x, shape.y, shape.width, shape.height), (50.0, 50.0, 0.0, 0.0));
}

#[test]
fn text_entry_commits_on_enter() {
    let (mut viewer, _) = loaded(1);
    viewer.set_tool_mode(ToolMode::Text);
    let actions = viewer.on_pointer_down(Point::new(40.0, 60.0), bounds());
    assert_eq!(actions, vec![Action::TextEntryRequested { left: 40.0, top: 60.0, scale: 1.0 }]);

    viewer.on_text_key(&Key("Enter".into()), "  hello ");
    let texts = viewer.overlay().texts();
    assert_eq!(texts.len(), 1);
    assert_eq!(texts[0].content, "hello");
}

#[test]
fn text_entry_blur_dismisses() {
    let (mut viewer, _) = loaded(1);
    viewer.set_tool_mode(ToolMode::Text);
    viewer.on_pointer_down(Point::new(40.0, 60.0), bounds());
    assert_eq!(viewer.dismiss_text(), vec![Action::TextEntryDismissed]);
    assert!(viewer.overlay().texts().is_empty());
}

// =============================================================
// Navigation
// =============================================================

#[test]
fn next_and_prev_are_noops_at_ends() {
    let (mut viewer, _) = loaded(3);
    assert!(viewer.prev_page().is_none());
    assert_eq!(viewer.current_page(), 1);

    viewer.go_to_page(3).unwrap();
    assert!(viewer.next_page().is_none());
    assert_eq!(viewer.current_page(), 3);

    viewer.prev_page().unwrap();
    assert_eq!(viewer.current_page(), 2);
}

#[test]
fn go_to_page_clamps() {
    let (mut viewer, _) = loaded(4);
    viewer.go_to_page(99).unwrap();
    assert_eq!(viewer.current_page(), 4);
    viewer.go_to_page(0).unwrap();
    assert_eq!(viewer.current_page(), 1);
}

#[test]
fn go_to_current_page_is_noop() {
    let (mut viewer, _) = loaded(4);
    assert!(viewer.go_to_page(1).is_none());
}

#[test]
fn single_page_document_has_no_navigation() {
    let (mut viewer, _) = loaded(1);
    assert!(!viewer.navigation_visible());
    assert!(viewer.go_to_page(2).is_none());
    assert!(viewer.next_page().is_none());
}

#[test]
fn navigation_disabled_while_error() {
    let mut viewer = Viewer::new(quiet());
    let mut renderer = FakeRenderer::new(3);
    renderer.fail_page = Some(1);
    viewer.load_document(&mut renderer, &pdf("doc.pdf")).unwrap();
    viewer.render_page(&mut renderer).unwrap_err();

    assert!(viewer.go_to_page(2).is_none());
    assert_eq!(viewer.current_page(), 1);
}

#[test]
fn page_change_clears_annotations() {
    let (mut viewer, mut renderer) = loaded(2);
    viewer.set_tool_mode(ToolMode::Erase);
    drag(&mut viewer, (100.0, 100.0), (300.0, 250.0));

    let actions = viewer.next_page().unwrap();
    assert!(actions.contains(&Action::RenderNeeded));
    assert!(viewer.overlay().shapes().is_empty());
    assert!(!viewer.overlay_visible());

    viewer.render_page(&mut renderer).unwrap();
    assert_eq!(renderer.rendered.last(), Some(&(2, 1.0)));
    assert!(viewer.overlay_visible());
    // Tool survives page changes.
    assert_eq!(viewer.tool(), ToolMode::Erase);
}

// =============================================================
// View
// =============================================================

#[test]
fn view_reflects_state() {
    let (mut viewer, _) = loaded(3);
    viewer.next_page().unwrap();
    let view = viewer.view();
    assert_eq!(view.page_label.as_deref(), Some("Page 2 of 3"));
    assert!(view.navigation_visible);
    assert!(view.can_go_prev);
    assert!(view.can_go_next);
    assert!(!view.loading);
    assert!(!view.overlay_visible);
}

#[test]
fn view_serializes_tool_lowercase() {
    let mut viewer = Viewer::new(quiet());
    viewer.set_tool_mode(ToolMode::Erase);
    let json = serde_json::to_value(viewer.view()).unwrap();
    assert_eq!(json["tool"], "erase");
    assert_eq!(json["document"], serde_json::Value::Null);
}
