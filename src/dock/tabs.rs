use egui::{FontId, Rect, Sense, pos2, vec2};

use super::session::DragSession;
use super::types::{AreaId, DragPayload, DropIntent, PanelId};

pub(crate) const TAB_HEIGHT: f32 = 24.0;

/// Resolve a release over area `target` holding `target_panels`, with the
/// pointer over insertion slot `slot` (`0..=len`).
///
/// Membership decides: a payload naming one of our own tabs is a reorder
/// regardless of payload kind; a transfer from elsewhere whose panel is not
/// already here is a cross-area move. Anything else, including a duplicate or
/// late drop naming a panel already present, is a no-op (stale drag state must
/// not double-insert).
pub(crate) fn decide_drop(
    payload: &DragPayload,
    target: AreaId,
    target_panels: &[PanelId],
    slot: usize,
) -> Option<DropIntent> {
    let panel = payload.panel();

    if let Some(from) = target_panels.iter().position(|&p| p == panel) {
        // Insertion slot to final index: removing `from` shifts later slots.
        let to = if slot > from { slot - 1 } else { slot };
        let to = to.min(target_panels.len().saturating_sub(1));
        if from == to {
            return None;
        }
        return Some(DropIntent::Reorder {
            area: target,
            from,
            to,
        });
    }

    match *payload {
        DragPayload::Transfer { source_area, .. } if source_area != target => {
            Some(DropIntent::Move {
                panel,
                from: source_area,
                to: target,
                insert_at: Some(slot.min(target_panels.len())),
            })
        }
        DragPayload::Transfer { .. } | DragPayload::Reorder { .. } => {
            log::warn!("ignoring stale drag payload {payload:?} over area {target:?}");
            None
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct TabItem {
    pub(crate) id: PanelId,
    pub(crate) title: String,
    pub(crate) closable: bool,
}

#[derive(Debug, Default)]
pub(crate) struct TabStripOutput {
    pub(crate) activated: Option<PanelId>,
    pub(crate) close_clicked: Option<PanelId>,
    pub(crate) drop: Option<DropIntent>,
}

/// Render one area's tab strip: selection clicks, close buttons, drag sources
/// and the drop target for reorder/transfer payloads.
pub(crate) fn tab_strip_ui(
    ui: &mut egui::Ui,
    area: AreaId,
    items: &[TabItem],
    active: Option<PanelId>,
    session: &mut DragSession,
    frame_index: u64,
) -> TabStripOutput {
    let mut output = TabStripOutput::default();
    let font = FontId::proportional(13.0);
    let mut tab_rects: Vec<Rect> = Vec::with_capacity(items.len());
    let mut strip_rect: Option<Rect> = None;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 2.0;

        for item in items {
            let text_color = ui.visuals().text_color();
            let galley = ui.fonts(|fonts| {
                fonts.layout_no_wrap(item.title.clone(), font.clone(), text_color)
            });
            let close_width = if item.closable { 16.0 } else { 0.0 };
            let width = galley.size().x + 16.0 + close_width;

            let (rect, response) =
                ui.allocate_exact_size(vec2(width, TAB_HEIGHT), Sense::click_and_drag());
            tab_rects.push(rect);
            strip_rect = Some(strip_rect.map_or(rect, |r| r.union(rect)));

            let visuals = ui.visuals();
            if active == Some(item.id) {
                ui.painter().rect_filled(rect, 2.0, visuals.selection.bg_fill);
            } else if response.hovered() {
                ui.painter()
                    .rect_filled(rect, 2.0, visuals.widgets.hovered.bg_fill);
            }
            ui.painter().galley(
                pos2(rect.left() + 8.0, rect.center().y - galley.size().y / 2.0),
                galley,
                text_color,
            );

            let mut close_hit = false;
            if item.closable {
                let close_rect = Rect::from_center_size(
                    pos2(rect.right() - 10.0, rect.center().y),
                    vec2(14.0, 14.0),
                );
                let close_response =
                    ui.interact(close_rect, response.id.with("close"), Sense::click());
                let close_color = if close_response.hovered() {
                    ui.visuals().error_fg_color
                } else {
                    text_color
                };
                ui.painter().text(
                    close_rect.center(),
                    egui::Align2::CENTER_CENTER,
                    "✕",
                    FontId::proportional(11.0),
                    close_color,
                );
                if close_response.clicked() {
                    output.close_clicked = Some(item.id);
                    close_hit = true;
                }
            }

            if response.clicked() && !close_hit {
                output.activated = Some(item.id);
            }

            if response.drag_started() {
                egui::DragAndDrop::set_payload(ui.ctx(), DragPayload::Reorder { panel: item.id });
            }
        }

        // Trailing slack so an empty (or short) strip is still a drop target.
        let slack = ui.available_width().max(40.0);
        let (tail_rect, _) = ui.allocate_exact_size(vec2(slack, TAB_HEIGHT), Sense::hover());
        strip_rect = Some(strip_rect.map_or(tail_rect, |r| r.union(tail_rect)));
    });

    let Some(strip_rect) = strip_rect else {
        return output;
    };

    let Some(payload) = egui::DragAndDrop::payload::<DragPayload>(ui.ctx()) else {
        return output;
    };
    session.observe_active(frame_index, "tab");

    let Some(pointer) = ui.ctx().input(|i| i.pointer.latest_pos()) else {
        return output;
    };
    if !strip_rect.contains(pointer) {
        return output;
    }

    // Insertion slot: number of tabs whose center is left of the pointer.
    let slot = tab_rects
        .iter()
        .filter(|rect| rect.center().x < pointer.x)
        .count();

    let released = ui.ctx().input(|i| i.pointer.any_released());
    if !released {
        let caret_x = if slot == 0 {
            strip_rect.left()
        } else {
            tab_rects[slot - 1].right() + 1.0
        };
        ui.painter().vline(
            caret_x,
            strip_rect.y_range(),
            ui.visuals().selection.stroke,
        );
        ui.ctx().request_repaint();
        return output;
    }

    if session.take_release_action(frame_index, "tab_drop") {
        let ids: Vec<PanelId> = items.iter().map(|item| item.id).collect();
        output.drop = decide_drop(&payload, area, &ids, slot);
    }
    egui::DragAndDrop::clear_payload(ui.ctx());

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panels(ids: &[u64]) -> Vec<PanelId> {
        ids.iter().map(|&id| PanelId(id)).collect()
    }

    #[test]
    fn own_tab_reorders_by_membership() {
        let target = AreaId(1);
        let tabs = panels(&[1, 2, 3, 4]);

        let payload = DragPayload::Reorder { panel: PanelId(1) };
        assert_eq!(
            decide_drop(&payload, target, &tabs, 3),
            Some(DropIntent::Reorder {
                area: target,
                from: 0,
                to: 2,
            })
        );

        // Even a transfer payload reorders when the panel is already ours.
        let payload = DragPayload::Transfer {
            panel: PanelId(4),
            source_area: AreaId(2),
        };
        assert_eq!(
            decide_drop(&payload, target, &tabs, 0),
            Some(DropIntent::Reorder {
                area: target,
                from: 3,
                to: 0,
            })
        );
    }

    #[test]
    fn dropping_a_tab_onto_its_own_slot_is_a_no_op() {
        let target = AreaId(1);
        let tabs = panels(&[1, 2, 3]);
        let payload = DragPayload::Reorder { panel: PanelId(2) };
        assert_eq!(decide_drop(&payload, target, &tabs, 1), None);
        assert_eq!(decide_drop(&payload, target, &tabs, 2), None);
    }

    #[test]
    fn transfer_from_another_area_moves() {
        let target = AreaId(1);
        let tabs = panels(&[1, 2]);
        let payload = DragPayload::Transfer {
            panel: PanelId(9),
            source_area: AreaId(2),
        };
        assert_eq!(
            decide_drop(&payload, target, &tabs, 2),
            Some(DropIntent::Move {
                panel: PanelId(9),
                from: AreaId(2),
                to: target,
                insert_at: Some(2),
            })
        );
    }

    #[test]
    fn stale_payloads_are_silently_ignored() {
        let target = AreaId(1);
        let tabs = panels(&[1, 2]);

        // Transfer claiming to come from us, but the panel is gone already.
        let payload = DragPayload::Transfer {
            panel: PanelId(9),
            source_area: target,
        };
        assert_eq!(decide_drop(&payload, target, &tabs, 0), None);

        // Reorder for a tab that is not ours.
        let payload = DragPayload::Reorder { panel: PanelId(9) };
        assert_eq!(decide_drop(&payload, target, &tabs, 0), None);
    }
}
