//! Panel docking and window layout engine for [egui](https://github.com/emilk/egui):
//! floating panels with a minimize/maximize/close lifecycle, tabbed dock areas
//! with drag-and-drop reorder and cross-area transfer, viewport border
//! detection, and undoable, persisted layout presets.
//!
//! Entry point: [`PanelDock`]. Supply panel content through [`PanelBehavior`]
//! and call [`PanelDock::ui`] once per frame.

#![forbid(unsafe_code)]

pub mod dock;
pub mod layout_builder;

pub use dock::{
    AddIntent, AreaId, Borders, Breakpoint, CloseDecision, CloseVote, ContentError, DockEvent,
    DragPayload, DropIntent, FrameConfig, LAYOUT_SNAPSHOT_VERSION, LayoutDocument, LayoutError,
    LayoutManager, LayoutStore, Lifecycle, MemoryStore, PanelArea, PanelBehavior, PanelCatalog,
    PanelConfig, PanelDescriptor, PanelDock, PanelDockOptions, PanelId, PanelInstance, PanelKind,
    PanelOwner, PanelRect, PresetKind, ResizeEdge, SubscriptionId, Theme, ThemeState,
    ViewportMonitor, document_issues,
};
pub use layout_builder::LayoutBuilder;
