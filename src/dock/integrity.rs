use itertools::Itertools as _;

use super::document::LayoutDocument;
use super::panel::Lifecycle;
use super::types::PanelId;

/// Structural invariant check over a whole document. Returns human-readable
/// issues; empty means the document is sound. Used by import validation and
/// the model tests.
pub fn document_issues(doc: &LayoutDocument) -> Vec<String> {
    let mut issues: Vec<String> = Vec::new();

    let mut owned: Vec<PanelId> = doc.floating.clone();
    for (area_id, area) in &doc.areas {
        owned.extend(area.panels.iter().copied());

        if let Some(active) = area.active {
            if !area.contains(active) {
                issues.push(format!(
                    "area {area_id:?} active {active:?} not in panels {:?}",
                    area.panels
                ));
            }
        }

        for dup in area.panels.iter().duplicates() {
            issues.push(format!("area {area_id:?} lists {dup:?} more than once"));
        }
    }

    for dup in owned.iter().duplicates() {
        issues.push(format!("panel {dup:?} owned more than once"));
    }

    for id in &owned {
        match doc.panels.get(id) {
            None => issues.push(format!("owned panel {id:?} has no instance")),
            Some(instance) if instance.lifecycle == Lifecycle::Closed => {
                issues.push(format!("closed panel {id:?} still owned"));
            }
            Some(_) => {}
        }
    }

    for id in doc.panels.keys() {
        if !owned.contains(id) {
            issues.push(format!("panel {id:?} has an instance but no owner"));
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dock::area::PanelArea;
    use crate::dock::panel::{PanelConfig, PanelInstance, PanelKind};
    use crate::dock::types::AreaId;

    #[test]
    fn sound_document_has_no_issues() {
        let mut doc = LayoutDocument::empty(1, "ok", 0.0);
        doc.areas.insert(AreaId(1), PanelArea::default());
        doc.add_panel_to_area(
            PanelInstance::new(PanelId(1), PanelConfig::new(PanelKind::Editor)),
            AreaId(1),
        );
        assert!(document_issues(&doc).is_empty());
    }

    #[test]
    fn double_ownership_is_reported() {
        let mut doc = LayoutDocument::empty(1, "bad", 0.0);
        doc.areas.insert(AreaId(1), PanelArea::default());
        doc.areas.insert(AreaId(2), PanelArea::default());
        doc.add_panel_to_area(
            PanelInstance::new(PanelId(1), PanelConfig::new(PanelKind::Editor)),
            AreaId(1),
        );
        // Corrupt by hand: the same id in a second area.
        if let Some(area) = doc.areas.get_mut(&AreaId(2)) {
            area.panels.push(PanelId(1));
        }
        assert!(!document_issues(&doc).is_empty());
    }

    #[test]
    fn stale_active_id_is_reported() {
        let mut doc = LayoutDocument::empty(1, "bad", 0.0);
        let mut area = PanelArea::default();
        area.active = Some(PanelId(9));
        doc.areas.insert(AreaId(1), area);
        assert!(!document_issues(&doc).is_empty());
    }
}
