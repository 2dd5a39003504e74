use egui::{Pos2, Rect, Vec2, pos2, vec2};
use serde::{Deserialize, Serialize};

use super::frame::ResizeEdge;
use super::types::PanelId;

pub(crate) const DEFAULT_MIN_SIZE: Vec2 = vec2(200.0, 100.0);
pub(crate) const DEFAULT_MAX_SIZE: Vec2 = vec2(1200.0, 800.0);

/// Horizontal width of a floating panel that must stay visible inside the frame.
pub(crate) const MIN_VISIBLE_WIDTH: f32 = 100.0;

/// The stable type tag of a panel. A tag, not a class: rendering goes through
/// the host's [`super::content::PanelBehavior`] and the catalog registry.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PanelKind {
    Terminal,
    Editor,
    Explorer,
    Output,
    Properties,
    Timeline,
    Inspector,
    Custom(String),
}

impl PanelKind {
    pub fn label(&self) -> &str {
        match self {
            Self::Terminal => "Terminal",
            Self::Editor => "Editor",
            Self::Explorer => "Explorer",
            Self::Output => "Output",
            Self::Properties => "Properties",
            Self::Timeline => "Timeline",
            Self::Inspector => "Inspector",
            Self::Custom(name) => name,
        }
    }

    pub(crate) const BUILT_IN: [Self; 7] = [
        Self::Terminal,
        Self::Editor,
        Self::Explorer,
        Self::Output,
        Self::Properties,
        Self::Timeline,
        Self::Inspector,
    ];
}

/// Floating geometry. Meaningful only while the panel is floating; a docked
/// panel keeps its last rect so undocking restores it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PanelRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl PanelRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_rect(rect: Rect) -> Self {
        Self::new(rect.min.x, rect.min.y, rect.width(), rect.height())
    }

    pub fn rect(&self) -> Rect {
        Rect::from_min_size(pos2(self.x, self.y), vec2(self.width, self.height))
    }

    pub fn pos(&self) -> Pos2 {
        pos2(self.x, self.y)
    }

    pub fn size(&self) -> Vec2 {
        vec2(self.width, self.height)
    }
}

impl Default for PanelRect {
    fn default() -> Self {
        Self::new(64.0, 64.0, 400.0, 300.0)
    }
}

/// Static configuration of one panel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PanelConfig {
    pub kind: PanelKind,
    pub title: String,
    pub icon: Option<String>,
    pub closable: bool,
    pub resizable: bool,
    pub draggable: bool,
    pub minimizable: bool,
    pub maximizable: bool,
    pub min_size: Vec2,
    pub max_size: Vec2,
}

impl PanelConfig {
    pub fn new(kind: PanelKind) -> Self {
        let title = kind.label().to_owned();
        Self {
            kind,
            title,
            icon: None,
            closable: true,
            resizable: true,
            draggable: true,
            minimizable: true,
            maximizable: true,
            min_size: DEFAULT_MIN_SIZE,
            max_size: DEFAULT_MAX_SIZE,
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

/// Panel lifecycle. `Closed` is terminal: reopening requires a new instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lifecycle {
    Normal,
    Minimized,
    Maximized,
    Closed,
}

/// One live panel. Owned by exactly one of the floating layer or one area.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PanelInstance {
    pub id: PanelId,
    pub config: PanelConfig,
    pub rect: PanelRect,
    pub lifecycle: Lifecycle,
}

impl PanelInstance {
    pub fn new(id: PanelId, config: PanelConfig) -> Self {
        Self {
            id,
            config,
            rect: PanelRect::default(),
            lifecycle: Lifecycle::Normal,
        }
    }

    /// Free drag is permitted only in `Normal`, and only if configured.
    pub fn can_drag(&self) -> bool {
        self.config.draggable && self.lifecycle == Lifecycle::Normal
    }

    pub fn can_resize(&self) -> bool {
        self.config.resizable && self.lifecycle == Lifecycle::Normal
    }

    /// `Normal ⇄ Minimized`. Returns whether the state changed.
    pub fn toggle_minimized(&mut self) -> bool {
        if !self.config.minimizable {
            return false;
        }
        match self.lifecycle {
            Lifecycle::Normal => {
                self.lifecycle = Lifecycle::Minimized;
                true
            }
            Lifecycle::Minimized => {
                self.lifecycle = Lifecycle::Normal;
                true
            }
            Lifecycle::Maximized | Lifecycle::Closed => false,
        }
    }

    /// `Normal ⇄ Maximized`. Maximized ignores the stored rect and fills the frame.
    pub fn toggle_maximized(&mut self) -> bool {
        if !self.config.maximizable {
            return false;
        }
        match self.lifecycle {
            Lifecycle::Normal => {
                self.lifecycle = Lifecycle::Maximized;
                true
            }
            Lifecycle::Maximized => {
                self.lifecycle = Lifecycle::Normal;
                true
            }
            Lifecycle::Minimized | Lifecycle::Closed => false,
        }
    }

    /// Any state → `Closed`, if closable.
    pub fn close(&mut self) -> bool {
        if !self.config.closable || self.lifecycle == Lifecycle::Closed {
            return false;
        }
        self.lifecycle = Lifecycle::Closed;
        true
    }
}

/// Recompute a rect for one of the eight resize directions. Each direction
/// adjusts width/height independently, clamped to `min`/`max`; the opposite
/// edge stays fixed even when the clamp bites.
pub(crate) fn apply_resize(
    edge: ResizeEdge,
    start: Rect,
    delta: Vec2,
    min: Vec2,
    max: Vec2,
) -> Rect {
    let mut x = start.min.x;
    let mut y = start.min.y;
    let mut w = start.width();
    let mut h = start.height();

    if edge.moves_east() {
        w = (start.width() + delta.x).clamp(min.x, max.x);
    } else if edge.moves_west() {
        w = (start.width() - delta.x).clamp(min.x, max.x);
        x = start.max.x - w;
    }

    if edge.moves_south() {
        h = (start.height() + delta.y).clamp(min.y, max.y);
    } else if edge.moves_north() {
        h = (start.height() - delta.y).clamp(min.y, max.y);
        y = start.max.y - h;
    }

    Rect::from_min_size(pos2(x, y), vec2(w, h))
}

/// Clamp a dragged panel position so at least [`MIN_VISIBLE_WIDTH`] points of
/// its width and the full header stay inside the frame.
pub(crate) fn clamp_drag(pos: Pos2, size: Vec2, frame: Rect, header_height: f32) -> Pos2 {
    let min_x = frame.min.x - size.x + MIN_VISIBLE_WIDTH;
    let max_x = (frame.max.x - MIN_VISIBLE_WIDTH).max(min_x);
    let min_y = frame.min.y;
    let max_y = (frame.max.y - header_height).max(min_y);
    pos2(pos.x.clamp(min_x, max_x), pos.y.clamp(min_y, max_y))
}
