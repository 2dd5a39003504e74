use super::panel::PanelKind;
use super::types::AreaId;

/// Catalog entry describing an addable panel type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PanelDescriptor {
    pub kind: PanelKind,
    pub name: String,
    pub icon: String,
    pub description: String,
}

impl PanelDescriptor {
    pub fn new(kind: PanelKind, icon: impl Into<String>, description: impl Into<String>) -> Self {
        let name = kind.label().to_owned();
        Self {
            kind,
            name,
            icon: icon.into(),
            description: description.into(),
        }
    }
}

/// Registry mapping a panel type tag to its descriptor, open for extension
/// (register a `Custom` kind to plug in a host-defined panel type).
#[derive(Clone, Debug, Default)]
pub struct PanelCatalog {
    entries: Vec<PanelDescriptor>,
    index: ahash::HashMap<PanelKind, usize>,
}

impl PanelCatalog {
    /// The seven built-in kinds, pre-registered.
    pub fn with_builtins() -> Self {
        let mut catalog = Self::default();
        for (kind, icon, description) in [
            (PanelKind::Terminal, "🖳", "Command shell"),
            (PanelKind::Editor, "🖹", "Text editor"),
            (PanelKind::Explorer, "🗀", "Project files"),
            (PanelKind::Output, "🗒", "Build and run output"),
            (PanelKind::Properties, "🛠", "Selection properties"),
            (PanelKind::Timeline, "🕑", "History timeline"),
            (PanelKind::Inspector, "🔍", "Live value inspector"),
        ] {
            catalog.register(PanelDescriptor::new(kind, icon, description));
        }
        catalog
    }

    /// Register or replace the descriptor for a kind.
    pub fn register(&mut self, descriptor: PanelDescriptor) {
        match self.index.get(&descriptor.kind) {
            Some(&at) => self.entries[at] = descriptor,
            None => {
                self.index.insert(descriptor.kind.clone(), self.entries.len());
                self.entries.push(descriptor);
            }
        }
    }

    pub fn get(&self, kind: &PanelKind) -> Option<&PanelDescriptor> {
        self.index.get(kind).map(|&at| &self.entries[at])
    }

    /// Descriptors in registration order.
    pub fn descriptors(&self) -> &[PanelDescriptor] {
        &self.entries
    }
}

/// Emitted when the user picks a type from the selector. The selector never
/// constructs panels; the dock consumes the intent and builds the instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddIntent {
    pub kind: PanelKind,
    /// `None` adds a floating panel.
    pub area: Option<AreaId>,
}

/// The "add panel" affordance: a menu over the catalog. Returns the picked
/// intent, if any, for the dock to act on.
pub(crate) fn selector_ui(
    ui: &mut egui::Ui,
    catalog: &PanelCatalog,
    target_area: Option<AreaId>,
) -> Option<AddIntent> {
    let mut picked = None;
    ui.menu_button("+ Add panel", |ui| {
        for descriptor in catalog.descriptors() {
            let label = format!("{} {}", descriptor.icon, descriptor.name);
            let response = ui.button(label).on_hover_text(&descriptor.description);
            if response.clicked() {
                picked = Some(AddIntent {
                    kind: descriptor.kind.clone(),
                    area: target_area,
                });
                ui.close();
            }
        }
    });
    picked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_cover_every_fixed_kind() {
        let catalog = PanelCatalog::with_builtins();
        for kind in PanelKind::BUILT_IN {
            assert!(catalog.get(&kind).is_some(), "{kind:?} missing");
        }
        assert_eq!(catalog.descriptors().len(), 7);
    }

    #[test]
    fn register_replaces_in_place_and_extends() {
        let mut catalog = PanelCatalog::with_builtins();

        let custom = PanelKind::Custom("Profiler".to_owned());
        catalog.register(PanelDescriptor::new(custom.clone(), "📈", "Flame graphs"));
        assert_eq!(catalog.descriptors().len(), 8);

        let replacement = PanelDescriptor::new(PanelKind::Terminal, "▶", "Shell v2");
        catalog.register(replacement.clone());
        assert_eq!(catalog.descriptors().len(), 8);
        assert_eq!(catalog.get(&PanelKind::Terminal), Some(&replacement));
        // Registration order is stable under replacement.
        assert_eq!(catalog.descriptors()[0].kind, PanelKind::Terminal);
    }
}
