use egui::Pos2;
use serde::{Deserialize, Serialize};

use super::panel::PanelRect;
use super::frame::ResizeEdge;

/// Stable identity of one panel instance, unique across the whole layout document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PanelId(pub u64);

/// Identity of one dock area (a tabbed region of the frame).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AreaId(pub u64);

/// Typed drag payload carried on the `egui::DragAndDrop` channel.
///
/// `Reorder` is set when a tab drag starts and implies a same-area move. The engine
/// upgrades it to `Transfer` once the pointer leaves the source area, so a drop
/// target always knows where the panel came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragPayload {
    Reorder { panel: PanelId },
    Transfer { panel: PanelId, source_area: AreaId },
}

impl DragPayload {
    pub fn panel(&self) -> PanelId {
        match *self {
            Self::Reorder { panel } | Self::Transfer { panel, .. } => panel,
        }
    }
}

/// What a drop resolved to. Computed by [`super::tabs::decide_drop`], applied by the
/// layout manager, never inside the drop handler itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropIntent {
    Reorder {
        area: AreaId,
        from: usize,
        to: usize,
    },
    Move {
        panel: PanelId,
        from: AreaId,
        to: AreaId,
        insert_at: Option<usize>,
    },
}

/// A cross-area move queued on drop and applied after the strip UIs have run.
#[derive(Clone, Copy, Debug)]
pub(crate) struct PendingMove {
    pub(crate) panel: PanelId,
    pub(crate) from: AreaId,
    pub(crate) to: AreaId,
    pub(crate) insert_at: Option<usize>,
}

/// Activation deferred until after a transfer has settled (one frame later),
/// so the drop handler never mutates the selection it is rendering from.
#[derive(Clone, Copy, Debug)]
pub(crate) struct PendingActivation {
    pub(crate) area: AreaId,
    pub(crate) panel: PanelId,
    pub(crate) apply_at_frame: u64,
}

/// Header drag in progress on a floating panel.
#[derive(Clone, Copy, Debug)]
pub(crate) struct PanelDragState {
    pub(crate) pointer_start: Pos2,
    pub(crate) rect_start: PanelRect,
}

/// Edge/corner resize in progress on a floating panel.
#[derive(Clone, Copy, Debug)]
pub(crate) struct PanelResizeState {
    pub(crate) edge: ResizeEdge,
    pub(crate) pointer_start: Pos2,
    pub(crate) rect_start: PanelRect,
}

/// At most one gesture per panel at a time.
#[derive(Clone, Copy, Debug)]
pub(crate) enum PanelGesture {
    Drag(PanelDragState),
    Resize(PanelResizeState),
}
