use super::panel::PanelKind;
use super::types::PanelId;

/// A content render failure, reported by the host's [`PanelBehavior`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentError {
    pub message: String,
}

impl ContentError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ContentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ContentError {}

/// The host's answer to a close request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CloseVote {
    /// Destroy the panel now.
    Close,
    /// Park the request (e.g. unsaved changes); the host resolves it later via
    /// [`super::PanelDock::resolve_close`].
    Defer,
}

/// Host resolution of a deferred close.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CloseDecision {
    /// Saved or discarded; destroy the panel.
    Confirm,
    /// Keep the panel.
    Cancel,
}

/// The content mounting contract. A hosted panel type supplies content through
/// this trait; the engine mounts it and never inspects its internals.
pub trait PanelBehavior {
    /// Render the content of `panel`. Returning `Err` trips this panel's
    /// boundary; siblings and the rest of the layout are unaffected.
    ///
    /// # Errors
    /// Any content render failure the boundary should isolate.
    fn panel_ui(
        &mut self,
        ui: &mut egui::Ui,
        panel: PanelId,
        kind: &PanelKind,
    ) -> Result<(), ContentError>;

    /// Called before a panel is destroyed. Default: close immediately.
    fn close_requested(&mut self, _panel: PanelId) -> CloseVote {
        CloseVote::Close
    }
}

/// Per-panel error latch. Once tripped, the panel renders a fallback until the
/// user hits "Retry", which resets only this boundary.
#[derive(Clone, Debug, Default)]
pub(crate) struct ContentBoundary {
    error: Option<ContentError>,
}

impl ContentBoundary {
    #[cfg(test)]
    pub(crate) fn is_tripped(&self) -> bool {
        self.error.is_some()
    }

    pub(crate) fn retry(&mut self) {
        self.error = None;
    }

    #[cfg(test)]
    pub(crate) fn trip(&mut self, error: ContentError) {
        self.error = Some(error);
    }

    pub(crate) fn ui(
        &mut self,
        ui: &mut egui::Ui,
        panel: PanelId,
        kind: &PanelKind,
        behavior: &mut dyn PanelBehavior,
    ) {
        if let Some(error) = self.error.clone() {
            ui.vertical(|ui| {
                ui.colored_label(ui.visuals().error_fg_color, "Panel content failed");
                ui.label(error.message);
                if ui.button("Retry").clicked() {
                    self.retry();
                }
            });
            return;
        }

        if let Err(error) = behavior.panel_ui(ui, panel, kind) {
            log::warn!("panel {panel:?} content failed: {error}");
            self.error = Some(error);
        }
    }
}

#[cfg(test)]
mod tests {
    use egui::{CentralPanel, Context, Pos2, Rect, Vec2};

    use super::*;

    struct Flaky {
        failing: Vec<PanelId>,
        rendered: Vec<PanelId>,
    }

    impl Flaky {
        fn new(failing: Vec<PanelId>) -> Self {
            Self {
                failing,
                rendered: Vec::new(),
            }
        }
    }

    impl PanelBehavior for Flaky {
        fn panel_ui(
            &mut self,
            ui: &mut egui::Ui,
            panel: PanelId,
            _kind: &PanelKind,
        ) -> Result<(), ContentError> {
            if self.failing.contains(&panel) {
                return Err(ContentError::new("render exploded"));
            }
            self.rendered.push(panel);
            ui.label("fine");
            Ok(())
        }
    }

    fn run_frame(ctx: &Context, body: impl FnOnce(&mut egui::Ui)) {
        let raw = egui::RawInput {
            screen_rect: Some(Rect::from_min_size(Pos2::ZERO, Vec2::new(800.0, 600.0))),
            ..Default::default()
        };
        ctx.begin_pass(raw);
        CentralPanel::default().show(ctx, |ui| body(ui));
        let _ = ctx.end_pass();
    }

    #[test]
    fn failing_content_trips_only_its_own_boundary() {
        let ctx = Context::default();
        let mut behavior = Flaky::new(vec![PanelId(1)]);
        let mut broken = ContentBoundary::default();
        let mut healthy = ContentBoundary::default();

        run_frame(&ctx, |ui| {
            broken.ui(ui, PanelId(1), &PanelKind::Terminal, &mut behavior);
            healthy.ui(ui, PanelId(2), &PanelKind::Editor, &mut behavior);
        });

        assert!(broken.is_tripped());
        assert!(!healthy.is_tripped());
        assert_eq!(behavior.rendered, vec![PanelId(2)]);
    }

    #[test]
    fn tripped_boundary_stays_latched_until_retry() {
        let ctx = Context::default();
        let mut behavior = Flaky::new(vec![PanelId(1)]);
        let mut boundary = ContentBoundary::default();

        run_frame(&ctx, |ui| {
            boundary.ui(ui, PanelId(1), &PanelKind::Terminal, &mut behavior);
        });
        assert!(boundary.is_tripped());

        // Content would succeed now, but the latch keeps it unmounted.
        behavior.failing.clear();
        run_frame(&ctx, |ui| {
            boundary.ui(ui, PanelId(1), &PanelKind::Terminal, &mut behavior);
        });
        assert!(boundary.is_tripped());
        assert!(behavior.rendered.is_empty());

        boundary.retry();
        run_frame(&ctx, |ui| {
            boundary.ui(ui, PanelId(1), &PanelKind::Terminal, &mut behavior);
        });
        assert!(!boundary.is_tripped());
        assert_eq!(behavior.rendered, vec![PanelId(1)]);
    }

    #[test]
    fn trip_and_retry_drive_the_latch() {
        let mut boundary = ContentBoundary::default();
        assert!(!boundary.is_tripped());
        boundary.trip(ContentError::new("boom"));
        assert!(boundary.is_tripped());
        boundary.retry();
        assert!(!boundary.is_tripped());
    }
}
