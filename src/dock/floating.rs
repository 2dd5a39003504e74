use egui::{CornerRadius, Order, Rect, Sense, StrokeKind, UiBuilder, vec2};

use super::content::{ContentBoundary, PanelBehavior};
use super::document::LayoutDocument;
use super::frame::ResizeEdge;
use super::header::{HeaderAction, TitleEdit, header_ui};
use super::panel::{Lifecycle, PanelInstance, PanelRect, apply_resize, clamp_drag};
use super::selector::PanelCatalog;
use super::types::{PanelDragState, PanelGesture, PanelId, PanelResizeState};

/// What the floating layer wants the engine to do after the UI pass. Collected
/// while rendering and applied by the caller, so the document is never mutated
/// under the iteration that draws it.
#[derive(Debug, Default)]
pub(crate) struct FloatingOutput {
    pub(crate) header_actions: Vec<(PanelId, HeaderAction)>,
    pub(crate) raise: Option<PanelId>,
    /// Final geometry of a drag/resize gesture that ended this frame.
    pub(crate) committed_rects: Vec<(PanelId, PanelRect)>,
}

pub(crate) struct FloatingLayerParams<'a> {
    pub(crate) frame_rect: Rect,
    pub(crate) header_height: f32,
    pub(crate) catalog: &'a PanelCatalog,
    pub(crate) gestures: &'a mut ahash::HashMap<PanelId, PanelGesture>,
    pub(crate) boundaries: &'a mut ahash::HashMap<PanelId, ContentBoundary>,
    pub(crate) title_edit: &'a mut Option<TitleEdit>,
}

/// The rect a floating panel occupies this frame: the stored rect, overridden
/// by lifecycle (minimized collapses to the header, maximized fills the frame)
/// or by the live gesture preview.
fn display_rect(
    panel: &PanelInstance,
    gesture: Option<&PanelGesture>,
    frame_rect: Rect,
    header_height: f32,
    pointer: Option<egui::Pos2>,
) -> Rect {
    match panel.lifecycle {
        Lifecycle::Maximized => return frame_rect,
        Lifecycle::Minimized => {
            return Rect::from_min_size(
                panel.rect.pos(),
                vec2(panel.rect.width, header_height),
            );
        }
        Lifecycle::Normal | Lifecycle::Closed => {}
    }

    let stored = panel.rect.rect();
    let (Some(gesture), Some(pointer)) = (gesture, pointer) else {
        return stored;
    };
    match *gesture {
        PanelGesture::Drag(PanelDragState {
            pointer_start,
            rect_start,
        }) => {
            let target = rect_start.pos() + (pointer - pointer_start);
            let clamped = clamp_drag(target, rect_start.size(), frame_rect, header_height);
            Rect::from_min_size(clamped, rect_start.size())
        }
        PanelGesture::Resize(PanelResizeState {
            edge,
            pointer_start,
            rect_start,
        }) => apply_resize(
            edge,
            rect_start.rect(),
            pointer - pointer_start,
            panel.config.min_size,
            panel.config.max_size,
        ),
    }
}

/// Draw every floating panel, back to front, capturing header drags and edge
/// resizes as gestures. Geometry only commits when the gesture ends; until
/// then the stored rect is untouched and the preview rect is per-frame.
pub(crate) fn floating_layer_ui(
    ctx: &egui::Context,
    document: &LayoutDocument,
    behavior: &mut dyn PanelBehavior,
    params: &mut FloatingLayerParams<'_>,
) -> FloatingOutput {
    let mut output = FloatingOutput::default();
    let pointer = ctx.input(|i| i.pointer.latest_pos());
    let primary_pressed = ctx.input(|i| i.pointer.primary_pressed());
    let released = ctx.input(|i| i.pointer.any_released());

    // A gesture cannot outlive its button press; drop leftovers from frames
    // where the release was missed (e.g. the pointer left the window).
    if !released && !ctx.input(|i| i.pointer.any_down()) {
        params.gestures.clear();
    }

    for &panel_id in &document.floating {
        let Some(panel) = document.panels.get(&panel_id) else {
            continue;
        };
        if panel.lifecycle == Lifecycle::Closed {
            continue;
        }

        let gesture = params.gestures.get(&panel_id).copied();
        let rect = display_rect(
            panel,
            gesture.as_ref(),
            params.frame_rect,
            params.header_height,
            pointer,
        );

        if gesture.is_some() {
            ctx.request_repaint();
        }
        if primary_pressed && pointer.is_some_and(|p| rect.contains(p)) {
            output.raise = Some(panel_id);
        }

        let area_id = egui::Id::new(("floating_panel", panel_id));
        egui::Area::new(area_id)
            .order(Order::Foreground)
            .fixed_pos(rect.min)
            .constrain(false)
            .show(ctx, |ui| {
                ui.set_min_size(rect.size());
                ui.set_max_size(rect.size());
                let panel_rect = Rect::from_min_size(ui.max_rect().min, rect.size());

                let visuals = ui.visuals();
                ui.painter().rect(
                    panel_rect,
                    CornerRadius::same(4),
                    visuals.window_fill,
                    visuals.window_stroke,
                    StrokeKind::Inside,
                );

                let header_rect = Rect::from_min_size(
                    panel_rect.min,
                    vec2(panel_rect.width(), params.header_height),
                );
                let header = header_ui(ui, header_rect, panel, params.catalog, params.title_edit);
                for action in header.actions {
                    output.header_actions.push((panel_id, action));
                }

                if header.drag.drag_started() && panel.can_drag() && gesture.is_none() {
                    if let Some(pointer) = pointer {
                        params.gestures.insert(
                            panel_id,
                            PanelGesture::Drag(PanelDragState {
                                pointer_start: pointer,
                                rect_start: panel.rect,
                            }),
                        );
                    }
                }

                if panel.lifecycle != Lifecycle::Minimized {
                    let content_rect = Rect::from_min_max(
                        egui::pos2(panel_rect.left(), header_rect.bottom()),
                        panel_rect.max,
                    )
                    .shrink(4.0);
                    let mut content = ui.new_child(UiBuilder::new().max_rect(content_rect));
                    params
                        .boundaries
                        .entry(panel_id)
                        .or_default()
                        .ui(&mut content, panel_id, &panel.config.kind, behavior);
                }

                if panel.can_resize() {
                    for edge in ResizeEdge::ALL {
                        let handle = edge.handle_rect(panel_rect, 6.0);
                        let response =
                            ui.interact(handle, area_id.with(("resize", edge)), Sense::drag());
                        if response.hovered() || response.dragged() {
                            ui.ctx().set_cursor_icon(edge.cursor());
                        }
                        if response.drag_started() && params.gestures.get(&panel_id).is_none() {
                            if let Some(pointer) = pointer {
                                params.gestures.insert(
                                    panel_id,
                                    PanelGesture::Resize(PanelResizeState {
                                        edge,
                                        pointer_start: pointer,
                                        rect_start: panel.rect,
                                    }),
                                );
                            }
                        }
                    }
                }
            });

        // Gestures end on pointer release, wherever it happens.
        if gesture.is_some() && released {
            params.gestures.remove(&panel_id);
            if panel.lifecycle == Lifecycle::Normal {
                let final_rect = PanelRect::from_rect(rect);
                if final_rect != panel.rect {
                    output.committed_rects.push((panel_id, final_rect));
                }
            }
        }
    }

    output
}
