use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::area::PanelArea;
use super::panel::{PanelInstance, PanelRect};
use super::presets::PresetKind;
use super::types::{AreaId, PanelId};

/// Where a panel currently lives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelOwner {
    Floating,
    Area(AreaId),
}

/// The whole layout: dock areas, the floating layer and every live panel.
///
/// Invariants:
/// - every owned id (area lists + floating) resolves in `panels`;
/// - each panel id is owned exactly once across the document;
/// - each area's active id, if set, is a member of that area.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayoutDocument {
    pub id: u64,
    pub name: String,
    pub preset: PresetKind,
    pub areas: BTreeMap<AreaId, PanelArea>,
    /// Floating panels, back-to-front.
    pub floating: Vec<PanelId>,
    pub panels: BTreeMap<PanelId, PanelInstance>,
    pub created_at: f64,
    pub modified_at: f64,
}

impl LayoutDocument {
    pub fn empty(id: u64, name: impl Into<String>, now: f64) -> Self {
        Self {
            id,
            name: name.into(),
            preset: PresetKind::Custom,
            areas: BTreeMap::new(),
            floating: Vec::new(),
            panels: BTreeMap::new(),
            created_at: now,
            modified_at: now,
        }
    }

    pub fn panel(&self, id: PanelId) -> Option<&PanelInstance> {
        self.panels.get(&id)
    }

    pub fn panel_mut(&mut self, id: PanelId) -> Option<&mut PanelInstance> {
        self.panels.get_mut(&id)
    }

    pub fn owner(&self, id: PanelId) -> Option<PanelOwner> {
        if self.floating.contains(&id) {
            return Some(PanelOwner::Floating);
        }
        self.areas
            .iter()
            .find(|(_, area)| area.contains(id))
            .map(|(&area_id, _)| PanelOwner::Area(area_id))
    }

    pub fn area_of(&self, id: PanelId) -> Option<AreaId> {
        match self.owner(id) {
            Some(PanelOwner::Area(area)) => Some(area),
            _ => None,
        }
    }

    /// Dock a new panel into `area`. Fails if the id already exists anywhere
    /// or the area is unknown.
    pub fn add_panel_to_area(&mut self, instance: PanelInstance, area: AreaId) -> bool {
        if self.panels.contains_key(&instance.id) {
            return false;
        }
        let Some(target) = self.areas.get_mut(&area) else {
            return false;
        };
        let id = instance.id;
        target.insert(id, None);
        self.panels.insert(id, instance);
        true
    }

    /// Add a new panel to the floating layer, frontmost.
    pub fn add_floating_panel(&mut self, instance: PanelInstance) -> bool {
        if self.panels.contains_key(&instance.id) {
            return false;
        }
        self.floating.push(instance.id);
        self.panels.insert(instance.id, instance);
        true
    }

    /// Remove a panel from wherever it lives. Areas heal their selection.
    pub fn remove_panel(&mut self, id: PanelId) -> Option<PanelInstance> {
        let instance = self.panels.remove(&id)?;
        self.floating.retain(|&p| p != id);
        for area in self.areas.values_mut() {
            area.remove(id);
        }
        Some(instance)
    }

    /// Transfer `panel` from area `from` to area `to`, appending (or inserting
    /// at `insert_at`) exactly once. A stale or duplicate request, including a
    /// panel already present in the target, is a no-op returning `false`.
    pub fn move_panel(
        &mut self,
        panel: PanelId,
        from: AreaId,
        to: AreaId,
        insert_at: Option<usize>,
    ) -> bool {
        if from == to {
            return false;
        }
        if !self
            .areas
            .get(&from)
            .is_some_and(|area| area.contains(panel))
        {
            return false;
        }
        if !self.areas.contains_key(&to)
            || self.areas.get(&to).is_some_and(|area| area.contains(panel))
        {
            return false;
        }

        if let Some(source) = self.areas.get_mut(&from) {
            source.remove(panel);
        }
        if let Some(target) = self.areas.get_mut(&to) {
            target.insert(panel, insert_at);
        }
        true
    }

    pub fn reorder(&mut self, area: AreaId, from: usize, to: usize) -> bool {
        self.areas
            .get_mut(&area)
            .is_some_and(|area| area.reorder(from, to))
    }

    pub fn activate(&mut self, area: AreaId, panel: PanelId) -> bool {
        self.areas
            .get_mut(&area)
            .is_some_and(|area| area.activate(panel))
    }

    /// Undock a panel from its area into the floating layer at `rect`.
    pub fn float_panel(&mut self, panel: PanelId, rect: PanelRect) -> bool {
        let Some(area_id) = self.area_of(panel) else {
            return false;
        };
        if let Some(area) = self.areas.get_mut(&area_id) {
            area.remove(panel);
        }
        if let Some(instance) = self.panels.get_mut(&panel) {
            instance.rect = rect;
        }
        self.floating.push(panel);
        true
    }

    /// Dock a floating panel into `area`.
    pub fn dock_panel(&mut self, panel: PanelId, area: AreaId, insert_at: Option<usize>) -> bool {
        if !self.floating.contains(&panel) || !self.areas.contains_key(&area) {
            return false;
        }
        self.floating.retain(|&p| p != panel);
        if let Some(target) = self.areas.get_mut(&area) {
            target.insert(panel, insert_at);
        }
        true
    }

    pub fn bring_floating_to_front(&mut self, panel: PanelId) {
        if self.floating.contains(&panel) {
            self.floating.retain(|&p| p != panel);
            self.floating.push(panel);
        }
    }
}
