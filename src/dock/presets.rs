use serde::{Deserialize, Serialize};

use super::document::LayoutDocument;
use super::panel::{PanelConfig, PanelKind, PanelRect};
use crate::layout_builder::LayoutBuilder;

/// Built-in layout templates. `Custom` marks documents that diverged from any
/// template (imports, user edits started from scratch).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PresetKind {
    Default,
    Coding,
    Debugging,
    Custom,
}

impl PresetKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::Coding => "Coding",
            Self::Debugging => "Debugging",
            Self::Custom => "Custom",
        }
    }
}

/// Instantiate a built-in template. Serial allocation inside the builder is
/// deterministic, so the same preset always yields the same document (modulo
/// timestamps), which is what makes `apply_preset` idempotent.
pub(crate) fn built_in(kind: PresetKind, document_id: u64, now: f64) -> LayoutDocument {
    match kind {
        PresetKind::Default => {
            let mut b = LayoutBuilder::new("Default").preset(kind);
            let main = b.area();
            let bottom = b.area();
            b.dock(main, PanelConfig::new(PanelKind::Editor));
            b.dock(bottom, PanelConfig::new(PanelKind::Terminal));
            b.finish(document_id, now)
        }
        PresetKind::Coding => {
            let mut b = LayoutBuilder::new("Coding").preset(kind);
            let explorer = b.area();
            let main = b.area();
            let bottom = b.area();
            b.dock(explorer, PanelConfig::new(PanelKind::Explorer));
            b.dock(main, PanelConfig::new(PanelKind::Editor));
            b.dock_many(
                bottom,
                [
                    PanelConfig::new(PanelKind::Terminal),
                    PanelConfig::new(PanelKind::Output),
                ],
            );
            b.finish(document_id, now)
        }
        PresetKind::Debugging => {
            let mut b = LayoutBuilder::new("Debugging").preset(kind);
            let main = b.area();
            let side = b.area();
            let bottom = b.area();
            b.dock(main, PanelConfig::new(PanelKind::Editor));
            b.dock_many(
                side,
                [
                    PanelConfig::new(PanelKind::Inspector),
                    PanelConfig::new(PanelKind::Properties),
                ],
            );
            b.dock(bottom, PanelConfig::new(PanelKind::Output));
            b.float(
                PanelConfig::new(PanelKind::Timeline).with_title("Session Timeline"),
                PanelRect::new(120.0, 120.0, 480.0, 240.0),
            );
            b.finish(document_id, now)
        }
        PresetKind::Custom => LayoutDocument::empty(document_id, "Custom", now),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dock::integrity::document_issues;

    #[test]
    fn all_presets_are_sound() {
        for kind in [
            PresetKind::Default,
            PresetKind::Coding,
            PresetKind::Debugging,
            PresetKind::Custom,
        ] {
            let doc = built_in(kind, 1, 0.0);
            assert!(
                document_issues(&doc).is_empty(),
                "preset {kind:?} failed integrity"
            );
        }
    }

    #[test]
    fn applying_the_same_preset_twice_yields_the_same_document() {
        let once = built_in(PresetKind::Coding, 1, 5.0);
        let mut twice = built_in(PresetKind::Coding, 1, 9.0);
        twice.created_at = once.created_at;
        twice.modified_at = once.modified_at;
        assert_eq!(once, twice);
    }
}
