use egui::{CursorIcon, Rect, Vec2, vec2};
use serde::{Deserialize, Serialize};

/// Per-frame configuration. Immutable for the lifetime of one frame container.
#[derive(Clone, Debug)]
pub struct FrameConfig {
    /// Track viewport size and recompute the breakpoint on debounced resize.
    pub responsive: bool,
    /// Compute border-touching flags and suppress handles on touching edges.
    pub border_detection: bool,
    /// Lower bound for panel sizes inside this frame.
    pub min_panel_size: Vec2,
    /// Hit-area thickness (in points) of the frame resize handles.
    pub resize_handle_size: f32,
    /// A frame edge within this distance of the viewport edge counts as touching.
    pub snap_threshold: f32,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            responsive: true,
            border_detection: true,
            min_panel_size: vec2(200.0, 100.0),
            resize_handle_size: 6.0,
            snap_threshold: 10.0,
        }
    }
}

/// Which frame edges currently touch the viewport.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Borders {
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
    pub left: bool,
}

impl Borders {
    pub fn any(&self) -> bool {
        self.top || self.right || self.bottom || self.left
    }
}

/// An edge is touching iff its distance to the matching viewport edge is
/// within `threshold`.
pub(crate) fn detect_borders(frame: Rect, viewport: Rect, threshold: f32) -> Borders {
    Borders {
        top: (frame.top() - viewport.top()).abs() <= threshold,
        right: (viewport.right() - frame.right()).abs() <= threshold,
        bottom: (viewport.bottom() - frame.bottom()).abs() <= threshold,
        left: (frame.left() - viewport.left()).abs() <= threshold,
    }
}

/// The eight resize directions of a frame or floating panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResizeEdge {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl ResizeEdge {
    pub const ALL: [Self; 8] = [
        Self::North,
        Self::South,
        Self::East,
        Self::West,
        Self::NorthEast,
        Self::NorthWest,
        Self::SouthEast,
        Self::SouthWest,
    ];

    pub(crate) fn moves_north(self) -> bool {
        matches!(self, Self::North | Self::NorthEast | Self::NorthWest)
    }

    pub(crate) fn moves_south(self) -> bool {
        matches!(self, Self::South | Self::SouthEast | Self::SouthWest)
    }

    pub(crate) fn moves_east(self) -> bool {
        matches!(self, Self::East | Self::NorthEast | Self::SouthEast)
    }

    pub(crate) fn moves_west(self) -> bool {
        matches!(self, Self::West | Self::NorthWest | Self::SouthWest)
    }

    /// A handle is suppressed when any edge it would move is border-touching.
    fn suppressed_by(self, borders: Borders) -> bool {
        (self.moves_north() && borders.top)
            || (self.moves_south() && borders.bottom)
            || (self.moves_east() && borders.right)
            || (self.moves_west() && borders.left)
    }

    pub(crate) fn cursor(self) -> CursorIcon {
        match self {
            Self::North | Self::South => CursorIcon::ResizeVertical,
            Self::East | Self::West => CursorIcon::ResizeHorizontal,
            Self::NorthEast | Self::SouthWest => CursorIcon::ResizeNeSw,
            Self::NorthWest | Self::SouthEast => CursorIcon::ResizeNwSe,
        }
    }

    /// The hit rect of this handle on the boundary of `rect`.
    pub(crate) fn handle_rect(self, rect: Rect, thickness: f32) -> Rect {
        let t = thickness;
        match self {
            Self::North => Rect::from_min_max(
                egui::pos2(rect.left() + t, rect.top()),
                egui::pos2(rect.right() - t, rect.top() + t),
            ),
            Self::South => Rect::from_min_max(
                egui::pos2(rect.left() + t, rect.bottom() - t),
                egui::pos2(rect.right() - t, rect.bottom()),
            ),
            Self::East => Rect::from_min_max(
                egui::pos2(rect.right() - t, rect.top() + t),
                egui::pos2(rect.right(), rect.bottom() - t),
            ),
            Self::West => Rect::from_min_max(
                egui::pos2(rect.left(), rect.top() + t),
                egui::pos2(rect.left() + t, rect.bottom() - t),
            ),
            Self::NorthEast => Rect::from_min_max(
                egui::pos2(rect.right() - t, rect.top()),
                egui::pos2(rect.right(), rect.top() + t),
            ),
            Self::NorthWest => {
                Rect::from_min_size(rect.left_top(), vec2(t, t))
            }
            Self::SouthEast => Rect::from_min_max(
                egui::pos2(rect.right() - t, rect.bottom() - t),
                rect.right_bottom(),
            ),
            Self::SouthWest => Rect::from_min_max(
                egui::pos2(rect.left(), rect.bottom() - t),
                egui::pos2(rect.left() + t, rect.bottom()),
            ),
        }
    }
}

/// Handles that make sense given the current border flags.
pub(crate) fn visible_handles(borders: Borders) -> Vec<ResizeEdge> {
    ResizeEdge::ALL
        .into_iter()
        .filter(|edge| !edge.suppressed_by(borders))
        .collect()
}

/// Tracked border state of one frame container. Emits a changed flag only when
/// some border actually flips.
#[derive(Debug, Default)]
pub(crate) struct FrameState {
    borders: Borders,
}

impl FrameState {
    pub(crate) fn borders(&self) -> Borders {
        self.borders
    }

    /// Recompute against the viewport; `Some` iff any flag flipped.
    pub(crate) fn update(
        &mut self,
        frame: Rect,
        viewport: Rect,
        config: &FrameConfig,
    ) -> Option<Borders> {
        if !config.border_detection {
            return None;
        }
        let borders = detect_borders(frame, viewport, config.snap_threshold);
        if borders == self.borders {
            None
        } else {
            self.borders = borders;
            Some(borders)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    fn viewport() -> Rect {
        Rect::from_min_size(pos2(0.0, 0.0), vec2(1280.0, 720.0))
    }

    #[test]
    fn left_edge_within_threshold_is_touching() {
        let frame = Rect::from_min_size(pos2(4.0, 100.0), vec2(400.0, 300.0));
        let borders = detect_borders(frame, viewport(), 10.0);
        assert!(borders.left);
        assert!(!borders.top && !borders.right && !borders.bottom);

        let frame = Rect::from_min_size(pos2(20.0, 100.0), vec2(400.0, 300.0));
        assert!(!detect_borders(frame, viewport(), 10.0).left);
    }

    #[test]
    fn touching_edges_suppress_their_handles() {
        let borders = Borders {
            left: true,
            ..Default::default()
        };
        let handles = visible_handles(borders);
        assert!(!handles.contains(&ResizeEdge::West));
        assert!(!handles.contains(&ResizeEdge::NorthWest));
        assert!(!handles.contains(&ResizeEdge::SouthWest));
        assert!(handles.contains(&ResizeEdge::East));
        assert_eq!(handles.len(), 5);
    }

    #[test]
    fn fully_snapped_frame_has_no_handles() {
        let borders = detect_borders(viewport(), viewport(), 10.0);
        assert!(borders.top && borders.right && borders.bottom && borders.left);
        assert!(visible_handles(borders).is_empty());
    }

    #[test]
    fn frame_state_reports_flips_only() {
        let config = FrameConfig::default();
        let mut state = FrameState::default();

        let inner = Rect::from_min_size(pos2(100.0, 100.0), vec2(400.0, 300.0));
        assert_eq!(state.update(inner, viewport(), &config), None); // all false already

        let snapped = Rect::from_min_size(pos2(2.0, 100.0), vec2(400.0, 300.0));
        let changed = state.update(snapped, viewport(), &config);
        assert!(changed.is_some_and(|b| b.left));

        // Same rect again: no flip, no event.
        assert_eq!(state.update(snapped, viewport(), &config), None);
    }
}
