use egui::Vec2;

use super::frame::Borders;
use super::panel::{Lifecycle, PanelRect};
use super::types::{AreaId, PanelId};

/// Upward notifications, drained by the host via [`super::PanelDock::drain_events`].
///
/// Geometry events fire on gesture commit (pointer release), not per pointer move.
#[derive(Clone, Debug, PartialEq)]
pub enum DockEvent {
    /// Debounced viewport size settled on a new value.
    Resized(Vec2),
    /// At least one frame border flag flipped.
    BorderChanged(Borders),
    PanelActivated(PanelId),
    PanelClosed(PanelId),
    PanelMoved {
        panel: PanelId,
        from: AreaId,
        to: AreaId,
    },
    TabReordered {
        area: AreaId,
        from: usize,
        to: usize,
    },
    LifecycleChanged {
        panel: PanelId,
        lifecycle: Lifecycle,
    },
    PanelPositionChanged {
        panel: PanelId,
        rect: PanelRect,
    },
    /// Title or kind edited through the header chrome.
    ConfigChanged {
        panel: PanelId,
    },
}
