//! Panel docking engine: tabbed dock areas, a floating window layer, a frame
//! container with viewport border detection, and an undoable, persisted
//! layout document underneath.
//!
//! The engine owns layout state and chrome; panel content is supplied by the
//! host through [`PanelBehavior`] and isolated per panel by an error boundary.
//! All document mutations funnel through [`LayoutManager`], which snapshots
//! history and debounces persistence.

pub(crate) mod area;
pub(crate) mod content;
pub(crate) mod document;
pub(crate) mod events;
pub(crate) mod floating;
pub(crate) mod frame;
pub(crate) mod header;
pub(crate) mod integrity;
pub(crate) mod manager;
pub(crate) mod panel;
pub(crate) mod persistence;
pub(crate) mod presets;
pub(crate) mod selector;
pub(crate) mod session;
pub(crate) mod tabs;
pub(crate) mod theme;
pub(crate) mod types;
pub(crate) mod viewport;


pub use area::PanelArea;
pub use content::{CloseDecision, CloseVote, ContentError, PanelBehavior};
pub use document::{LayoutDocument, PanelOwner};
pub use events::DockEvent;
pub use frame::{Borders, FrameConfig, ResizeEdge};
pub use integrity::document_issues;
pub use manager::{LayoutManager, LayoutStore, MemoryStore};
pub use panel::{Lifecycle, PanelConfig, PanelInstance, PanelKind, PanelRect};
pub use persistence::{LAYOUT_SNAPSHOT_VERSION, LayoutError};
pub use presets::PresetKind;
pub use selector::{AddIntent, PanelCatalog, PanelDescriptor};
pub use theme::{SubscriptionId, Theme, ThemeState};
pub use types::{AreaId, DragPayload, DropIntent, PanelId};
pub use viewport::{Breakpoint, ViewportMonitor};

use egui::{Rect, Sense, UiBuilder, vec2};

use content::ContentBoundary;
use floating::{FloatingLayerParams, floating_layer_ui};
use header::{HeaderAction, TitleEdit};
use session::DragSession;
use tabs::{TAB_HEIGHT, TabItem, TabStripOutput};
use types::{PanelGesture, PanelResizeState, PendingActivation, PendingMove};

/// Static knobs of one dock. Fixed at construction.
#[derive(Clone, Debug)]
pub struct PanelDockOptions {
    pub frame: FrameConfig,
    /// Height of panel headers and tab strips, in points.
    pub header_height: f32,
    /// Show the "+ Add panel" selector in the toolbar and per area.
    pub show_selector: bool,
    /// Show the preset picker and undo/reset controls.
    pub show_toolbar: bool,
    pub viewport_debounce_secs: f64,
    /// Maximum undo depth.
    pub history_limit: usize,
}

impl Default for PanelDockOptions {
    fn default() -> Self {
        Self {
            frame: FrameConfig::default(),
            header_height: 24.0,
            show_selector: true,
            show_toolbar: true,
            viewport_debounce_secs: 0.08,
            history_limit: 64,
        }
    }
}

/// Per-area data snapshotted before the UI pass, so rendering never aliases
/// the document it is about to mutate.
struct AreaView {
    id: AreaId,
    items: Vec<TabItem>,
    active: Option<(PanelId, PanelKind)>,
}

/// The docking engine. Call [`PanelDock::ui`] once per frame; read back
/// notifications with [`PanelDock::drain_events`].
pub struct PanelDock {
    options: PanelDockOptions,
    manager: LayoutManager,
    catalog: PanelCatalog,
    theme: ThemeState,
    viewport: ViewportMonitor,
    frame_state: frame::FrameState,
    session: DragSession,
    /// Host-pinned frame rect; `None` fills the central panel.
    custom_frame: Option<Rect>,
    frame_gesture: Option<PanelResizeState>,
    gestures: ahash::HashMap<PanelId, PanelGesture>,
    boundaries: ahash::HashMap<PanelId, ContentBoundary>,
    title_edit: Option<TitleEdit>,
    /// Screen rects of the dock areas, as laid out last frame.
    area_rects: Vec<(AreaId, Rect)>,
    pending_moves: Vec<PendingMove>,
    pending_activations: Vec<PendingActivation>,
    pending_closes: Vec<PanelId>,
    events: Vec<DockEvent>,
    frame_index: u64,
    clock: f64,
}

impl Default for PanelDock {
    fn default() -> Self {
        Self::new()
    }
}

impl PanelDock {
    pub fn new() -> Self {
        Self::with_options(PanelDockOptions::default())
    }

    pub fn with_options(options: PanelDockOptions) -> Self {
        let manager = LayoutManager::new(0.0).with_history_limit(options.history_limit);
        let viewport = ViewportMonitor::new(options.viewport_debounce_secs);
        Self {
            options,
            manager,
            catalog: PanelCatalog::with_builtins(),
            theme: ThemeState::default(),
            viewport,
            frame_state: frame::FrameState::default(),
            session: DragSession::default(),
            custom_frame: None,
            frame_gesture: None,
            gestures: ahash::HashMap::default(),
            boundaries: ahash::HashMap::default(),
            title_edit: None,
            area_rects: Vec::new(),
            pending_moves: Vec::new(),
            pending_activations: Vec::new(),
            pending_closes: Vec::new(),
            events: Vec::new(),
            frame_index: 0,
            clock: 0.0,
        }
    }

    /// Attach a persistence store; the layout is written there, debounced,
    /// after every mutation.
    #[must_use]
    pub fn with_store(mut self, store: Box<dyn LayoutStore>, key: impl Into<String>) -> Self {
        self.manager = self.manager.with_store(store, key);
        self
    }

    pub fn manager(&self) -> &LayoutManager {
        &self.manager
    }

    pub fn document(&self) -> &LayoutDocument {
        self.manager.current()
    }

    pub fn catalog(&self) -> &PanelCatalog {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut PanelCatalog {
        &mut self.catalog
    }

    pub fn theme_mut(&mut self) -> &mut ThemeState {
        &mut self.theme
    }

    pub fn breakpoint(&self) -> Option<Breakpoint> {
        self.viewport.breakpoint()
    }

    pub fn borders(&self) -> Borders {
        self.frame_state.borders()
    }

    /// Pin the frame to an explicit rect; border-aware resize handles appear
    /// on its non-touching edges.
    pub fn set_frame_rect(&mut self, rect: Rect) {
        self.custom_frame = Some(rect);
    }

    /// Back to filling the whole central panel.
    pub fn clear_frame_rect(&mut self) {
        self.custom_frame = None;
        self.frame_gesture = None;
    }

    /// Panels whose close was deferred by the host's
    /// [`PanelBehavior::close_requested`], awaiting [`Self::resolve_close`].
    pub fn pending_closes(&self) -> &[PanelId] {
        &self.pending_closes
    }

    /// Resolve a deferred close. Unknown ids are ignored.
    pub fn resolve_close(&mut self, panel: PanelId, decision: CloseDecision) {
        let Some(at) = self.pending_closes.iter().position(|&p| p == panel) else {
            return;
        };
        self.pending_closes.remove(at);
        if decision == CloseDecision::Confirm {
            self.finish_close(panel);
        }
    }

    /// Per-panel UI state must not survive a wholesale document replacement:
    /// ids may be reused by the incoming document, and a boundary or gesture
    /// from a dead panel would otherwise attach to an unrelated new one.
    fn reset_ui_state(&mut self) {
        self.boundaries.clear();
        self.gestures.clear();
        self.title_edit = None;
        self.pending_moves.clear();
        self.pending_activations.clear();
        self.pending_closes.clear();
    }

    pub fn undo(&mut self) -> bool {
        let undone = self.manager.undo();
        if undone {
            self.reset_ui_state();
        }
        undone
    }

    pub fn save_layout(&mut self) {
        self.manager.save_layout(self.clock);
    }

    pub fn apply_preset(&mut self, kind: PresetKind) {
        self.manager.apply_preset(kind, self.clock);
        self.reset_ui_state();
    }

    pub fn reset_to_default(&mut self) {
        self.apply_preset(PresetKind::Default);
    }

    /// # Errors
    /// See [`LayoutError`].
    pub fn export(&self) -> Result<String, LayoutError> {
        self.manager.export()
    }

    /// # Errors
    /// See [`LayoutError`]. On error the current layout is untouched.
    pub fn import(&mut self, text: &str) -> Result<(), LayoutError> {
        self.manager.import(text, self.clock)?;
        self.reset_ui_state();
        Ok(())
    }

    /// Notifications accumulated since the last drain, in emission order.
    pub fn drain_events(&mut self) -> Vec<DockEvent> {
        std::mem::take(&mut self.events)
    }

    /// Run the dock for one frame inside the central panel.
    pub fn ui(&mut self, ctx: &egui::Context, behavior: &mut dyn PanelBehavior) {
        self.frame_index = self.frame_index.saturating_add(1);
        self.clock = ctx.input(|i| i.time);
        self.session.begin_frame();

        if let Some(theme) = self.theme.get() {
            ctx.set_visuals(match theme {
                Theme::Dark => egui::Visuals::dark(),
                Theme::Light => egui::Visuals::light(),
            });
        }

        let screen = ctx.screen_rect();
        if self.options.frame.responsive {
            if let Some(size) = self.viewport.observe(screen.size(), self.clock) {
                self.events.push(DockEvent::Resized(size));
            }
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.frame_contents(ui, behavior);
        });

        let frame_rect = self.effective_frame_rect(ctx);
        let mut params = FloatingLayerParams {
            frame_rect,
            header_height: self.options.header_height,
            catalog: &self.catalog,
            gestures: &mut self.gestures,
            boundaries: &mut self.boundaries,
            title_edit: &mut self.title_edit,
        };
        let floated = floating_layer_ui(ctx, self.manager.current(), behavior, &mut params);

        if let Some(panel) = floated.raise {
            self.manager.bring_floating_to_front(panel);
        }
        for (panel, rect) in floated.committed_rects {
            if self.manager.set_panel_rect(panel, rect, self.clock) {
                self.events
                    .push(DockEvent::PanelPositionChanged { panel, rect });
            }
        }
        for (panel, action) in floated.header_actions {
            self.apply_header_action(behavior, panel, action);
        }

        self.apply_pending();
        self.session.end_frame(self.frame_index);
        self.manager.maintain(self.clock);
    }

    fn effective_frame_rect(&self, ctx: &egui::Context) -> Rect {
        let base = self.custom_frame.unwrap_or_else(|| ctx.screen_rect());
        match (self.frame_gesture, ctx.input(|i| i.pointer.latest_pos())) {
            (Some(gesture), Some(pointer)) => panel::apply_resize(
                gesture.edge,
                gesture.rect_start.rect(),
                pointer - gesture.pointer_start,
                self.options.frame.min_panel_size,
                ctx.screen_rect().size(),
            ),
            _ => base,
        }
    }

    fn frame_contents(&mut self, ui: &mut egui::Ui, behavior: &mut dyn PanelBehavior) {
        let viewport_rect = ui.ctx().screen_rect();
        let frame_rect = match self.custom_frame {
            Some(_) => self.effective_frame_rect(ui.ctx()),
            None => ui.max_rect(),
        };

        if let Some(changed) = self
            .frame_state
            .update(frame_rect, viewport_rect, &self.options.frame)
        {
            self.events.push(DockEvent::BorderChanged(changed));
        }

        if self.custom_frame.is_some() {
            ui.painter().rect_stroke(
                frame_rect,
                egui::CornerRadius::same(2),
                ui.visuals().window_stroke,
                egui::StrokeKind::Inside,
            );
            self.frame_handles_ui(ui, frame_rect);
        }

        let mut inner = ui.new_child(UiBuilder::new().max_rect(frame_rect.shrink(4.0)));
        let mut add_intents = Vec::new();

        if self.options.show_toolbar {
            self.toolbar_ui(&mut inner, &mut add_intents);
        }

        let views = self.area_views();
        let content_rect = inner.available_rect_before_wrap();
        let rects = split_area_rects(content_rect, views.len(), self.viewport.breakpoint());

        let mut strip_results: Vec<(AreaId, Rect, TabStripOutput)> = Vec::new();
        for (view, rect) in views.iter().zip(rects) {
            let mut column = inner.new_child(UiBuilder::new().max_rect(rect));
            let output = self.area_ui(&mut column, view, behavior, &mut add_intents);
            strip_results.push((view.id, rect, output));
        }
        self.area_rects = strip_results
            .iter()
            .map(|(area, rect, _)| (*area, *rect))
            .collect();

        self.handle_strip_results(behavior, strip_results);
        self.handle_drag_channel(ui.ctx());

        for intent in add_intents {
            self.apply_add_intent(intent);
        }
    }

    fn area_views(&self) -> Vec<AreaView> {
        let doc = self.manager.current();
        doc.areas
            .iter()
            .map(|(&id, area)| {
                let items = area
                    .panels
                    .iter()
                    .filter_map(|panel| {
                        doc.panels.get(panel).map(|p| TabItem {
                            id: *panel,
                            title: p.config.title.clone(),
                            closable: p.config.closable,
                        })
                    })
                    .collect();
                let active = area.active.and_then(|panel| {
                    doc.panels
                        .get(&panel)
                        .map(|p| (panel, p.config.kind.clone()))
                });
                AreaView { id, items, active }
            })
            .collect()
    }

    fn area_ui(
        &mut self,
        ui: &mut egui::Ui,
        view: &AreaView,
        behavior: &mut dyn PanelBehavior,
        add_intents: &mut Vec<AddIntent>,
    ) -> TabStripOutput {
        let area_rect = ui.max_rect();
        let output = tabs::tab_strip_ui(
            ui,
            view.id,
            &view.items,
            view.active.as_ref().map(|(panel, _)| *panel),
            &mut self.session,
            self.frame_index,
        );

        if self.options.show_selector && view.items.is_empty() {
            if let Some(intent) = selector::selector_ui(ui, &self.catalog, Some(view.id)) {
                add_intents.push(intent);
            }
        }

        if let Some((panel, kind)) = &view.active {
            let content_rect = Rect::from_min_max(
                egui::pos2(area_rect.left(), area_rect.top() + TAB_HEIGHT + 4.0),
                area_rect.max,
            );
            let mut content = ui.new_child(UiBuilder::new().max_rect(content_rect));
            self.boundaries
                .entry(*panel)
                .or_default()
                .ui(&mut content, *panel, kind, behavior);
        }

        output
    }

    fn toolbar_ui(&mut self, ui: &mut egui::Ui, add_intents: &mut Vec<AddIntent>) {
        let preset = self.manager.current().preset;
        let undo_available = self.manager.history_len() > 0;
        let mut picked_preset = None;
        let mut undo = false;
        let mut reset = false;

        ui.horizontal(|ui| {
            if self.options.show_selector {
                if let Some(intent) = selector::selector_ui(ui, &self.catalog, None) {
                    add_intents.push(intent);
                }
            }

            egui::ComboBox::from_id_salt("dock_preset")
                .selected_text(preset.name())
                .show_ui(ui, |ui| {
                    for kind in [PresetKind::Default, PresetKind::Coding, PresetKind::Debugging] {
                        if ui.selectable_label(preset == kind, kind.name()).clicked() {
                            picked_preset = Some(kind);
                        }
                    }
                });

            undo = ui
                .add_enabled(undo_available, egui::Button::new("⟲ Undo"))
                .clicked();
            reset = ui.button("Reset").clicked();
        });
        ui.separator();

        if let Some(kind) = picked_preset {
            self.apply_preset(kind);
        }
        if undo {
            self.undo();
        }
        if reset {
            self.reset_to_default();
        }
    }

    fn frame_handles_ui(&mut self, ui: &mut egui::Ui, frame_rect: Rect) {
        for edge in frame::visible_handles(self.frame_state.borders()) {
            let handle = edge.handle_rect(frame_rect, self.options.frame.resize_handle_size);
            let response = ui.interact(
                handle,
                egui::Id::new(("dock_frame_handle", edge)),
                Sense::drag(),
            );
            if response.hovered() || response.dragged() {
                ui.ctx().set_cursor_icon(edge.cursor());
            }
            if response.drag_started() && self.frame_gesture.is_none() {
                if let (Some(pointer), Some(custom)) =
                    (ui.ctx().input(|i| i.pointer.latest_pos()), self.custom_frame)
                {
                    self.frame_gesture = Some(PanelResizeState {
                        edge,
                        pointer_start: pointer,
                        rect_start: PanelRect::from_rect(custom),
                    });
                }
            }
        }

        if self.frame_gesture.is_some() {
            ui.ctx().request_repaint();
            if ui.ctx().input(|i| i.pointer.any_released()) {
                self.custom_frame = Some(self.effective_frame_rect(ui.ctx()));
                self.frame_gesture = None;
            }
        }
    }

    fn handle_strip_results(
        &mut self,
        behavior: &mut dyn PanelBehavior,
        results: Vec<(AreaId, Rect, TabStripOutput)>,
    ) {
        for (area, _, output) in &results {
            if let Some(panel) = output.activated {
                if self.manager.activate(*area, panel, self.clock) {
                    self.events.push(DockEvent::PanelActivated(panel));
                }
            }
            if let Some(panel) = output.close_clicked {
                self.request_close(behavior, panel);
            }
            match output.drop {
                Some(DropIntent::Reorder { area, from, to }) => {
                    if self.manager.reorder(area, from, to, self.clock) {
                        self.events.push(DockEvent::TabReordered { area, from, to });
                    }
                }
                Some(DropIntent::Move {
                    panel,
                    from,
                    to,
                    insert_at,
                }) => {
                    self.pending_moves.push(PendingMove {
                        panel,
                        from,
                        to,
                        insert_at,
                    });
                    // Selection follows the moved tab, one frame later, so the
                    // drop never mutates the strip it was computed against.
                    self.pending_activations.push(PendingActivation {
                        area: to,
                        panel,
                        apply_at_frame: self.frame_index.saturating_add(1),
                    });
                }
                None => {}
            }
        }
    }

    /// A `Reorder` payload whose pointer has left its source area becomes a
    /// `Transfer`; a release with a live payload over no strip (the strips
    /// clear the payload when they consume a drop) undocks the panel into the
    /// floating layer at the pointer.
    fn handle_drag_channel(&mut self, ctx: &egui::Context) {
        let Some(payload) = egui::DragAndDrop::payload::<DragPayload>(ctx) else {
            return;
        };
        let pointer = ctx.input(|i| i.pointer.latest_pos());

        if let DragPayload::Reorder { panel } = *payload {
            if let (Some(pointer), Some(source_area)) =
                (pointer, self.manager.current().area_of(panel))
            {
                let left_source = self
                    .area_rects
                    .iter()
                    .find(|(area, _)| *area == source_area)
                    .is_some_and(|(_, rect)| !rect.contains(pointer));
                if left_source {
                    egui::DragAndDrop::set_payload(
                        ctx,
                        DragPayload::Transfer { panel, source_area },
                    );
                }
            }
        }

        if ctx.input(|i| i.pointer.any_released()) {
            if self.session.take_release_action(self.frame_index, "undock") {
                self.undock_at_pointer(payload.panel(), pointer);
            }
            egui::DragAndDrop::clear_payload(ctx);
        } else {
            ctx.request_repaint();
        }
    }

    fn undock_at_pointer(&mut self, panel: PanelId, pointer: Option<egui::Pos2>) {
        let Some(pointer) = pointer else {
            return;
        };
        let Some(size) = self
            .manager
            .current()
            .panel(panel)
            .map(|instance| instance.rect.size())
        else {
            return;
        };
        let pos = pointer - vec2(size.x / 2.0, self.options.header_height / 2.0);
        let rect = PanelRect::new(pos.x, pos.y, size.x, size.y);
        if self.manager.float_panel(panel, rect, self.clock) {
            self.events
                .push(DockEvent::PanelPositionChanged { panel, rect });
        }
    }

    fn apply_add_intent(&mut self, intent: AddIntent) {
        let config = PanelConfig::new(intent.kind);
        match intent.area {
            Some(area) => {
                if self.manager.add_panel(area, config, self.clock).is_none() {
                    log::warn!("add intent targeted unknown area {area:?}");
                }
            }
            None => {
                self.manager
                    .add_floating(config, PanelRect::default(), self.clock);
            }
        }
    }

    fn apply_header_action(
        &mut self,
        behavior: &mut dyn PanelBehavior,
        panel: PanelId,
        action: HeaderAction,
    ) {
        match action {
            HeaderAction::Minimize => {
                if self
                    .manager
                    .with_panel_mut(panel, self.clock, PanelInstance::toggle_minimized)
                {
                    self.emit_lifecycle(panel);
                }
            }
            HeaderAction::Maximize => {
                if self
                    .manager
                    .with_panel_mut(panel, self.clock, PanelInstance::toggle_maximized)
                {
                    self.emit_lifecycle(panel);
                }
            }
            HeaderAction::Close => self.request_close(behavior, panel),
            HeaderAction::Rename(title) => {
                let changed = self.manager.with_panel_mut(panel, self.clock, |instance| {
                    if instance.config.title == title {
                        false
                    } else {
                        instance.config.title = title.clone();
                        true
                    }
                });
                if changed {
                    self.events.push(DockEvent::ConfigChanged { panel });
                }
            }
            HeaderAction::SwitchKind(kind) => {
                let changed = self.manager.with_panel_mut(panel, self.clock, |instance| {
                    if instance.config.kind == kind {
                        false
                    } else {
                        instance.config.kind = kind.clone();
                        true
                    }
                });
                if changed {
                    self.boundaries.remove(&panel);
                    self.events.push(DockEvent::ConfigChanged { panel });
                }
            }
        }
    }

    fn emit_lifecycle(&mut self, panel: PanelId) {
        if let Some(lifecycle) = self
            .manager
            .current()
            .panel(panel)
            .map(|instance| instance.lifecycle)
        {
            self.events
                .push(DockEvent::LifecycleChanged { panel, lifecycle });
        }
    }

    fn request_close(&mut self, behavior: &mut dyn PanelBehavior, panel: PanelId) {
        if self.pending_closes.contains(&panel) {
            return;
        }
        match behavior.close_requested(panel) {
            CloseVote::Close => self.finish_close(panel),
            CloseVote::Defer => self.pending_closes.push(panel),
        }
    }

    fn finish_close(&mut self, panel: PanelId) {
        // The lifecycle transition gates the destruction: an unclosable panel
        // stays in the document no matter how the close was requested.
        if !self
            .manager
            .with_panel_mut(panel, self.clock, PanelInstance::close)
        {
            return;
        }
        if self.manager.remove_panel(panel, self.clock).is_some() {
            self.boundaries.remove(&panel);
            self.gestures.remove(&panel);
            self.events.push(DockEvent::PanelClosed(panel));
        }
    }

    fn apply_pending(&mut self) {
        let moves = std::mem::take(&mut self.pending_moves);
        for pending in moves {
            if self
                .manager
                .move_panel(pending.panel, pending.from, pending.to, pending.insert_at, self.clock)
            {
                self.events.push(DockEvent::PanelMoved {
                    panel: pending.panel,
                    from: pending.from,
                    to: pending.to,
                });
            }
        }

        let due = self.frame_index;
        let activations = std::mem::take(&mut self.pending_activations);
        for pending in activations {
            if pending.apply_at_frame > due {
                self.pending_activations.push(pending);
            } else if self.manager.activate(pending.area, pending.panel, self.clock) {
                self.events.push(DockEvent::PanelActivated(pending.panel));
            }
        }
    }
}

/// Equal split of the content rect: side-by-side columns normally, a vertical
/// stack at the `Compact` breakpoint.
fn split_area_rects(content: Rect, count: usize, breakpoint: Option<Breakpoint>) -> Vec<Rect> {
    if count == 0 {
        return Vec::new();
    }
    let gap = 4.0;
    let n = count as f32;
    if breakpoint == Some(Breakpoint::Compact) {
        let height = ((content.height() - gap * (n - 1.0)) / n).max(0.0);
        (0..count)
            .map(|i| {
                let top = content.top() + i as f32 * (height + gap);
                Rect::from_min_size(egui::pos2(content.left(), top), vec2(content.width(), height))
            })
            .collect()
    } else {
        let width = ((content.width() - gap * (n - 1.0)) / n).max(0.0);
        (0..count)
            .map(|i| {
                let left = content.left() + i as f32 * (width + gap);
                Rect::from_min_size(egui::pos2(left, content.top()), vec2(width, content.height()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn area_rects_split_horizontally_by_default() {
        let content = Rect::from_min_size(pos2(0.0, 0.0), vec2(1208.0, 600.0));
        let rects = split_area_rects(content, 3, Some(Breakpoint::Wide));
        assert_eq!(rects.len(), 3);
        assert_eq!(rects[0].width(), 400.0);
        assert_eq!(rects[2].right(), 1208.0);
        assert!(rects[0].right() < rects[1].left());
    }

    #[test]
    fn compact_breakpoint_stacks_areas_vertically() {
        let content = Rect::from_min_size(pos2(0.0, 0.0), vec2(600.0, 604.0));
        let rects = split_area_rects(content, 2, Some(Breakpoint::Compact));
        assert_eq!(rects.len(), 2);
        assert_eq!(rects[0].width(), 600.0);
        assert_eq!(rects[0].height(), 300.0);
        assert!(rects[0].bottom() < rects[1].top());
    }

    #[test]
    fn no_areas_yields_no_rects() {
        let content = Rect::from_min_size(pos2(0.0, 0.0), vec2(600.0, 600.0));
        assert!(split_area_rects(content, 0, None).is_empty());
    }

    struct AcceptAll;

    impl PanelBehavior for AcceptAll {
        fn panel_ui(
            &mut self,
            _ui: &mut egui::Ui,
            _panel: PanelId,
            _kind: &PanelKind,
        ) -> Result<(), ContentError> {
            Ok(())
        }
    }

    fn dock_with_panel(closable: bool) -> (PanelDock, AreaId, PanelId) {
        let mut dock = PanelDock::new();
        let area = *dock
            .manager
            .current()
            .areas
            .keys()
            .next()
            .expect("default preset has areas");
        let mut config = PanelConfig::new(PanelKind::Terminal);
        config.closable = closable;
        let panel = dock
            .manager
            .add_panel(area, config, 0.0)
            .expect("area exists");
        (dock, area, panel)
    }

    #[test]
    fn close_request_removes_a_closable_panel() {
        let (mut dock, _, panel) = dock_with_panel(true);
        dock.request_close(&mut AcceptAll, panel);
        assert!(dock.document().panel(panel).is_none());
        assert!(dock.events.contains(&DockEvent::PanelClosed(panel)));
    }

    #[test]
    fn unclosable_panel_survives_a_close_request() {
        let (mut dock, _, panel) = dock_with_panel(false);
        dock.request_close(&mut AcceptAll, panel);
        assert!(dock.document().panel(panel).is_some());
        assert!(!dock.events.contains(&DockEvent::PanelClosed(panel)));
    }

    fn stale_ui_state(dock: &mut PanelDock, area: AreaId, panel: PanelId) {
        dock.boundaries
            .entry(panel)
            .or_default()
            .trip(ContentError::new("boom"));
        dock.gestures.insert(
            panel,
            PanelGesture::Resize(PanelResizeState {
                edge: ResizeEdge::East,
                pointer_start: pos2(10.0, 10.0),
                rect_start: PanelRect::default(),
            }),
        );
        dock.title_edit = Some(TitleEdit {
            panel,
            buffer: "renamed".to_owned(),
        });
        dock.pending_moves.push(PendingMove {
            panel,
            from: area,
            to: area,
            insert_at: None,
        });
        dock.pending_activations.push(PendingActivation {
            area,
            panel,
            apply_at_frame: u64::MAX,
        });
        dock.pending_closes.push(panel);
    }

    fn assert_ui_state_empty(dock: &PanelDock) {
        assert!(dock.boundaries.is_empty());
        assert!(dock.gestures.is_empty());
        assert!(dock.title_edit.is_none());
        assert!(dock.pending_moves.is_empty());
        assert!(dock.pending_activations.is_empty());
        assert!(dock.pending_closes.is_empty());
    }

    #[test]
    fn preset_switch_drops_stale_panel_ui_state() {
        let (mut dock, area, panel) = dock_with_panel(true);
        stale_ui_state(&mut dock, area, panel);
        dock.apply_preset(PresetKind::Coding);
        assert_ui_state_empty(&dock);
    }

    #[test]
    fn undo_drops_stale_panel_ui_state() {
        let (mut dock, area, panel) = dock_with_panel(true);
        stale_ui_state(&mut dock, area, panel);
        assert!(dock.undo());
        assert_ui_state_empty(&dock);
    }
}
