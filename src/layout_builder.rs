use crate::dock::area::PanelArea;
use crate::dock::document::LayoutDocument;
use crate::dock::panel::{PanelConfig, PanelInstance, PanelRect};
use crate::dock::presets::PresetKind;
use crate::dock::types::{AreaId, PanelId};

/// A small convenience builder for constructing a [`LayoutDocument`] from code.
///
/// This is intentionally lightweight: create areas, dock panels into them (tabbed
/// in insertion order), optionally add floating panels, then `finish()`. It is
/// how the built-in presets are expressed, and it allocates deterministic serial
/// ids so the same script always yields the same document.
pub struct LayoutBuilder {
    name: String,
    preset: PresetKind,
    next_area: u64,
    next_panel: u64,
    areas: Vec<(AreaId, PanelArea)>,
    floating: Vec<PanelId>,
    panels: Vec<PanelInstance>,
}

impl LayoutBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            preset: PresetKind::Custom,
            next_area: 1,
            next_panel: 1,
            areas: Vec::new(),
            floating: Vec::new(),
            panels: Vec::new(),
        }
    }

    #[must_use]
    pub fn preset(mut self, preset: PresetKind) -> Self {
        self.preset = preset;
        self
    }

    /// Create an empty dock area.
    #[must_use]
    pub fn area(&mut self) -> AreaId {
        let id = AreaId(self.next_area);
        self.next_area = self.next_area.saturating_add(1);
        self.areas.push((id, PanelArea::default()));
        id
    }

    /// Dock a panel into a leaf area, appended to its tab order.
    ///
    /// # Panics
    /// Panics if `area` was not created by this builder.
    pub fn dock(&mut self, area: AreaId, config: PanelConfig) -> PanelId {
        let id = self.alloc_panel(config);
        let Some((_, target)) = self.areas.iter_mut().find(|(a, _)| *a == area) else {
            panic!("dock: area {area:?} does not exist");
        };
        target.insert(id, None);
        id
    }

    pub fn dock_many(
        &mut self,
        area: AreaId,
        configs: impl IntoIterator<Item = PanelConfig>,
    ) -> Vec<PanelId> {
        configs
            .into_iter()
            .map(|config| self.dock(area, config))
            .collect()
    }

    /// Add a floating panel at `rect`, frontmost.
    pub fn float(&mut self, config: PanelConfig, rect: PanelRect) -> PanelId {
        let id = self.alloc_panel(config);
        if let Some(instance) = self.panels.iter_mut().find(|p| p.id == id) {
            instance.rect = rect;
        }
        self.floating.push(id);
        id
    }

    /// Override the active tab of an area (default: its first panel).
    pub fn activate(&mut self, area: AreaId, panel: PanelId) {
        if let Some((_, target)) = self.areas.iter_mut().find(|(a, _)| *a == area) {
            target.activate(panel);
        }
    }

    fn alloc_panel(&mut self, config: PanelConfig) -> PanelId {
        let id = PanelId(self.next_panel);
        self.next_panel = self.next_panel.saturating_add(1);
        self.panels.push(PanelInstance::new(id, config));
        id
    }

    /// Finish building, producing the document.
    pub fn finish(self, document_id: u64, now: f64) -> LayoutDocument {
        let mut doc = LayoutDocument::empty(document_id, self.name, now);
        doc.preset = self.preset;
        doc.areas = self.areas.into_iter().collect();
        doc.floating = self.floating;
        doc.panels = self.panels.into_iter().map(|p| (p.id, p)).collect();
        doc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dock::panel::PanelKind;

    #[test]
    fn scripted_layout_is_deterministic() {
        let build = || {
            let mut b = LayoutBuilder::new("workspace");
            let main = b.area();
            let side = b.area();
            b.dock(main, PanelConfig::new(PanelKind::Editor));
            b.dock(main, PanelConfig::new(PanelKind::Terminal));
            b.dock(side, PanelConfig::new(PanelKind::Explorer));
            b.finish(1, 0.0)
        };
        assert_eq!(build(), build());
    }

    #[test]
    fn first_docked_panel_is_active() {
        let mut b = LayoutBuilder::new("workspace");
        let main = b.area();
        let editor = b.dock(main, PanelConfig::new(PanelKind::Editor));
        b.dock(main, PanelConfig::new(PanelKind::Output));
        let doc = b.finish(1, 0.0);
        assert_eq!(doc.areas[&main].active, Some(editor));
    }

    #[test]
    fn title_override_reaches_the_instance() {
        let mut b = LayoutBuilder::new("workspace");
        let main = b.area();
        let panel = b.dock(main, PanelConfig::new(PanelKind::Editor).with_title("main.rs"));
        let doc = b.finish(1, 0.0);
        assert_eq!(doc.panels[&panel].config.title, "main.rs");
    }

    #[test]
    #[should_panic(expected = "does not exist")]
    fn docking_into_a_foreign_area_panics() {
        let mut b = LayoutBuilder::new("workspace");
        let _ = b.area();
        b.dock(AreaId(99), PanelConfig::new(PanelKind::Editor));
    }
}
