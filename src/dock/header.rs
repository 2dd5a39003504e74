use egui::{Align, CornerRadius, Key, Layout, Rect, RichText, Sense, UiBuilder, vec2};

use super::panel::{Lifecycle, PanelInstance, PanelKind};
use super::selector::PanelCatalog;
use super::types::PanelId;

/// What the user asked the header to do. The caller applies these through the
/// layout manager; the header never mutates the panel itself.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum HeaderAction {
    Minimize,
    Maximize,
    Close,
    Rename(String),
    SwitchKind(PanelKind),
}

/// In-progress title edit. Lives on the dock, not the panel, so the buffer
/// survives frames and an abandoned edit leaves the title untouched.
#[derive(Clone, Debug)]
pub(crate) struct TitleEdit {
    pub(crate) panel: PanelId,
    pub(crate) buffer: String,
}

pub(crate) struct HeaderOutput {
    pub(crate) actions: Vec<HeaderAction>,
    /// Interaction over the whole bar, for the floating drag gesture.
    pub(crate) drag: egui::Response,
}

/// One panel header bar: icon + title (double-click to rename), kind switcher,
/// then minimize/maximize/close on the right, each gated by the panel's flags.
pub(crate) fn header_ui(
    ui: &mut egui::Ui,
    rect: Rect,
    panel: &PanelInstance,
    catalog: &PanelCatalog,
    edit: &mut Option<TitleEdit>,
) -> HeaderOutput {
    let mut actions = Vec::new();

    // Background interaction first; the widgets below are painted later and
    // win hover/click resolution over it.
    let drag = ui.interact(
        rect,
        egui::Id::new(("panel_header", panel.id)),
        Sense::click_and_drag(),
    );

    let corner = CornerRadius {
        nw: 4,
        ne: 4,
        sw: 0,
        se: 0,
    };
    let fill = if drag.hovered() {
        ui.visuals().widgets.hovered.bg_fill
    } else {
        ui.visuals().widgets.noninteractive.bg_fill
    };
    ui.painter().rect_filled(rect, corner, fill);

    let inner = rect.shrink2(vec2(6.0, 2.0));
    let mut bar = ui.new_child(
        UiBuilder::new()
            .max_rect(inner)
            .layout(Layout::left_to_right(Align::Center)),
    );

    if let Some(icon) = &panel.config.icon {
        bar.label(icon);
    }

    let editing_this = edit.as_ref().is_some_and(|e| e.panel == panel.id);
    if editing_this {
        let escape = bar.input(|i| i.key_pressed(Key::Escape));
        // None: keep editing. Some(None): cancel. Some(Some(_)): commit.
        let mut outcome: Option<Option<String>> = None;
        if let Some(state) = edit.as_mut() {
            let response = bar.add(
                egui::TextEdit::singleline(&mut state.buffer)
                    .desired_width(140.0)
                    .id_salt(("title_edit", panel.id)),
            );
            let commit = bar.input(|i| i.key_pressed(Key::Enter)) || response.lost_focus();
            if escape {
                outcome = Some(None);
            } else if commit {
                outcome = Some(Some(state.buffer.trim().to_owned()));
            } else {
                response.request_focus();
            }
        }
        if let Some(committed) = outcome {
            if let Some(new_title) = committed {
                if !new_title.is_empty() && new_title != panel.config.title {
                    actions.push(HeaderAction::Rename(new_title));
                }
            }
            *edit = None;
        }
    } else {
        let title = bar.add(
            egui::Label::new(RichText::new(&panel.config.title).strong())
                .selectable(false)
                .sense(Sense::click()),
        );
        if title.double_clicked() {
            *edit = Some(TitleEdit {
                panel: panel.id,
                buffer: panel.config.title.clone(),
            });
        }

        let selected = catalog
            .get(&panel.config.kind)
            .map_or_else(|| panel.config.kind.label().to_owned(), |d| d.name.clone());
        egui::ComboBox::from_id_salt(("panel_kind", panel.id))
            .selected_text(selected)
            .width(110.0)
            .show_ui(&mut bar, |ui| {
                for descriptor in catalog.descriptors() {
                    let is_current = descriptor.kind == panel.config.kind;
                    if ui.selectable_label(is_current, &descriptor.name).clicked() && !is_current {
                        actions.push(HeaderAction::SwitchKind(descriptor.kind.clone()));
                    }
                }
            });
    }

    bar.with_layout(Layout::right_to_left(Align::Center), |bar| {
        if panel.config.closable && bar.small_button("✕").clicked() {
            actions.push(HeaderAction::Close);
        }
        if panel.config.maximizable
            && matches!(panel.lifecycle, Lifecycle::Normal | Lifecycle::Maximized)
        {
            let glyph = if panel.lifecycle == Lifecycle::Maximized {
                "🗗"
            } else {
                "🗖"
            };
            if bar.small_button(glyph).clicked() {
                actions.push(HeaderAction::Maximize);
            }
        }
        if panel.config.minimizable
            && matches!(panel.lifecycle, Lifecycle::Normal | Lifecycle::Minimized)
            && bar.small_button("🗕").clicked()
        {
            actions.push(HeaderAction::Minimize);
        }
    });

    HeaderOutput { actions, drag }
}
