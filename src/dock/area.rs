use serde::{Deserialize, Serialize};

use super::types::PanelId;

/// A dock region: an ordered set of panels and one active selection.
///
/// The active id is the single source of truth for tab selection; tab strips
/// are read-only subscribers. If the active panel disappears the area heals
/// itself, it never errors.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelArea {
    pub panels: Vec<PanelId>,
    pub active: Option<PanelId>,
}

impl PanelArea {
    pub fn contains(&self, id: PanelId) -> bool {
        self.panels.contains(&id)
    }

    pub fn index_of(&self, id: PanelId) -> Option<usize> {
        self.panels.iter().position(|&p| p == id)
    }

    /// Insert at `at` (or append). A duplicate insert is a no-op returning `false`.
    ///
    /// If the area had no selection, the newcomer is auto-activated silently:
    /// one deterministic policy, no activation event storm on drag inserts.
    pub(crate) fn insert(&mut self, id: PanelId, at: Option<usize>) -> bool {
        if self.contains(id) {
            return false;
        }
        let at = at.unwrap_or(self.panels.len()).min(self.panels.len());
        self.panels.insert(at, id);
        if self.active.is_none() {
            self.active = Some(id);
        }
        true
    }

    /// Remove and heal the selection. Returns `false` if the id was not here.
    pub(crate) fn remove(&mut self, id: PanelId) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        self.panels.remove(index);
        self.heal();
        true
    }

    /// Restore the `active ∈ panels` invariant: a stale selection falls back to
    /// the first remaining panel, or `None` when empty.
    pub fn heal(&mut self) {
        match self.active {
            Some(active) if self.contains(active) => {}
            _ => self.active = self.panels.first().copied(),
        }
    }

    /// Move the panel at `from` to `to`, preserving the relative order of the
    /// rest. Out-of-range indices and `from == to` are no-ops.
    pub(crate) fn reorder(&mut self, from: usize, to: usize) -> bool {
        if from >= self.panels.len() || to >= self.panels.len() || from == to {
            return false;
        }
        let id = self.panels.remove(from);
        self.panels.insert(to, id);
        true
    }

    pub(crate) fn activate(&mut self, id: PanelId) -> bool {
        if !self.contains(id) || self.active == Some(id) {
            return false;
        }
        self.active = Some(id);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area(ids: &[u64]) -> PanelArea {
        let mut area = PanelArea::default();
        for &id in ids {
            area.insert(PanelId(id), None);
        }
        area
    }

    #[test]
    fn first_insert_auto_activates_silently() {
        let mut area = PanelArea::default();
        assert!(area.insert(PanelId(1), None));
        assert_eq!(area.active, Some(PanelId(1)));

        // A second insert does not steal the selection.
        assert!(area.insert(PanelId(2), None));
        assert_eq!(area.active, Some(PanelId(1)));
    }

    #[test]
    fn duplicate_insert_is_a_no_op() {
        let mut area = area(&[1, 2]);
        assert!(!area.insert(PanelId(2), Some(0)));
        assert_eq!(area.panels, vec![PanelId(1), PanelId(2)]);
    }

    #[test]
    fn removing_the_active_panel_selects_the_first_remaining() {
        let mut area = area(&[1, 2, 3]);
        assert_eq!(area.active, Some(PanelId(1)));
        assert!(area.remove(PanelId(1)));
        assert_eq!(area.panels, vec![PanelId(2), PanelId(3)]);
        assert_eq!(area.active, Some(PanelId(2)));
    }

    #[test]
    fn removing_the_last_panel_clears_the_selection() {
        let mut area = area(&[7]);
        assert!(area.remove(PanelId(7)));
        assert_eq!(area.active, None);
    }

    #[test]
    fn reorder_moves_one_item_and_preserves_the_rest() {
        let mut area = area(&[1, 2, 3, 4]);
        assert!(area.reorder(0, 2));
        assert_eq!(
            area.panels,
            vec![PanelId(2), PanelId(3), PanelId(1), PanelId(4)]
        );

        assert!(!area.reorder(9, 0));
        assert!(!area.reorder(1, 1));
    }

    #[test]
    fn activate_requires_membership() {
        let mut area = area(&[1, 2]);
        assert!(!area.activate(PanelId(9)));
        assert!(area.activate(PanelId(2)));
        assert_eq!(area.active, Some(PanelId(2)));
        assert!(!area.activate(PanelId(2)));
    }
}
