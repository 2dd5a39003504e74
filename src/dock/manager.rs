use super::document::LayoutDocument;
use super::panel::{PanelConfig, PanelInstance, PanelRect};
use super::persistence::{LayoutError, export_layout, import_layout};
use super::presets::{PresetKind, built_in};
use super::types::{AreaId, PanelId};

/// Injected persistence collaborator. Writes are fire-and-forget and
/// last-write-wins; the engine never reads concurrently nor merges.
pub trait LayoutStore {
    /// # Errors
    /// I/O failure of the backing storage. The manager logs and drops it.
    fn save(&mut self, key: &str, contents: &str) -> std::io::Result<()>;

    /// # Errors
    /// I/O failure of the backing storage.
    fn load(&mut self, key: &str) -> std::io::Result<Option<String>>;
}

/// In-memory [`LayoutStore`], mostly useful for tests and demos.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: ahash::HashMap<String, String>,
}

impl MemoryStore {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl LayoutStore for MemoryStore {
    fn save(&mut self, key: &str, contents: &str) -> std::io::Result<()> {
        self.entries.insert(key.to_owned(), contents.to_owned());
        Ok(())
    }

    fn load(&mut self, key: &str) -> std::io::Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }
}

/// Owns the current layout document, the undo history and debounced
/// persistence. Every destructive mutation snapshots the prior document first.
pub struct LayoutManager {
    current: LayoutDocument,
    history: Vec<LayoutDocument>,
    history_limit: usize,
    store: Option<Box<dyn LayoutStore>>,
    store_key: String,
    save_debounce_secs: f64,
    dirty: bool,
    last_mutation: f64,
    next_panel_serial: u64,
    next_document_serial: u64,
}

impl LayoutManager {
    pub fn new(now: f64) -> Self {
        let current = built_in(PresetKind::Default, 1, now);
        let next_panel_serial = current
            .panels
            .keys()
            .map(|id| id.0)
            .max()
            .unwrap_or(0)
            .saturating_add(1);
        Self {
            current,
            history: Vec::new(),
            history_limit: 64,
            store: None,
            store_key: "layout".to_owned(),
            save_debounce_secs: 0.25,
            dirty: false,
            last_mutation: now,
            next_panel_serial,
            next_document_serial: 2,
        }
    }

    /// Attach a persistence store. If the store already holds a valid layout
    /// under `key` it is adopted as the current document; a missing, unreadable
    /// or invalid entry is logged and the current document kept.
    #[must_use]
    pub fn with_store(mut self, store: Box<dyn LayoutStore>, key: impl Into<String>) -> Self {
        self.store = Some(store);
        self.store_key = key.into();

        let loaded = match self.store.as_mut().map(|store| store.load(&self.store_key)) {
            Some(Ok(text)) => text,
            Some(Err(err)) => {
                log::warn!("layout store read failed: {err}");
                None
            }
            None => None,
        };
        if let Some(text) = loaded {
            match import_layout(&text) {
                Ok(document) => {
                    self.current = document;
                    self.adopt_serials();
                }
                Err(err) => log::warn!("ignoring stored layout: {err}"),
            }
        }
        self
    }

    #[must_use]
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit.max(1);
        self
    }

    pub fn current(&self) -> &LayoutDocument {
        &self.current
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub(crate) fn allocate_panel_id(&mut self) -> PanelId {
        let id = PanelId(self.next_panel_serial);
        self.next_panel_serial = self.next_panel_serial.saturating_add(1);
        id
    }

    /// The serial allocator only ever moves forward, so an undo back to a
    /// document with higher live ids can never cause a fresh allocation to
    /// collide.
    fn adopt_serials(&mut self) {
        let floor = self
            .current
            .panels
            .keys()
            .map(|id| id.0)
            .max()
            .unwrap_or(0)
            .saturating_add(1);
        self.next_panel_serial = self.next_panel_serial.max(floor);
    }

    fn push_history(&mut self, previous: LayoutDocument) {
        if self.history.len() == self.history_limit {
            self.history.remove(0);
        }
        self.history.push(previous);
    }

    fn snapshot(&mut self) {
        let previous = self.current.clone();
        self.push_history(previous);
    }

    fn mark_mutated(&mut self, now: f64) {
        self.current.modified_at = now;
        self.dirty = true;
        self.last_mutation = now;
    }

    /// Replace the current document with a built-in template, keeping the old
    /// one on the undo history.
    pub fn apply_preset(&mut self, kind: PresetKind, now: f64) {
        self.snapshot();
        let document_id = self.next_document_serial;
        self.next_document_serial = self.next_document_serial.saturating_add(1);
        self.current = built_in(kind, document_id, now);
        self.adopt_serials();
        self.mark_mutated(now);
    }

    pub fn reset_to_default(&mut self, now: f64) {
        self.apply_preset(PresetKind::Default, now);
    }

    /// Pop the history and restore. On an empty history this is a no-op (the
    /// current document stays as is), never an error.
    pub fn undo(&mut self) -> bool {
        match self.history.pop() {
            Some(previous) => {
                self.current = previous;
                self.dirty = true;
                true
            }
            None => false,
        }
    }

    /// Stamp `modified_at` and request a (debounced) persistence write.
    pub fn save_layout(&mut self, now: f64) {
        self.mark_mutated(now);
    }

    /// # Errors
    /// See [`export_layout`].
    pub fn export(&self) -> Result<String, LayoutError> {
        export_layout(&self.current)
    }

    /// Parse, validate and adopt an exported layout. On any error the current
    /// document is untouched.
    ///
    /// # Errors
    /// See [`import_layout`].
    pub fn import(&mut self, text: &str, now: f64) -> Result<(), LayoutError> {
        let document = import_layout(text)?;
        self.snapshot();
        self.current = document;
        self.adopt_serials();
        self.mark_mutated(now);
        Ok(())
    }

    /// Flush a dirty document to the injected store once the debounce window
    /// has passed. Coalesces bursts into one write; store errors are logged
    /// and dropped.
    pub fn maintain(&mut self, now: f64) {
        if !self.dirty || now - self.last_mutation < self.save_debounce_secs {
            return;
        }
        self.dirty = false;

        let Some(store) = self.store.as_mut() else {
            return;
        };
        match export_layout(&self.current) {
            Ok(text) => {
                if let Err(err) = store.save(&self.store_key, &text) {
                    log::warn!("layout store write failed: {err}");
                }
            }
            Err(err) => log::warn!("layout export for persistence failed: {err}"),
        }
    }

    // ---------------------------------------------------------------------
    // Destructive document operations (each snapshots history first).

    pub fn add_panel(&mut self, area: AreaId, config: PanelConfig, now: f64) -> Option<PanelId> {
        if !self.current.areas.contains_key(&area) {
            return None;
        }
        self.snapshot();
        let id = self.allocate_panel_id();
        let added = self
            .current
            .add_panel_to_area(PanelInstance::new(id, config), area);
        debug_assert!(added, "freshly allocated id must be unique");
        self.mark_mutated(now);
        Some(id)
    }

    pub fn add_floating(&mut self, config: PanelConfig, rect: PanelRect, now: f64) -> PanelId {
        self.snapshot();
        let id = self.allocate_panel_id();
        let mut instance = PanelInstance::new(id, config);
        instance.rect = rect;
        let added = self.current.add_floating_panel(instance);
        debug_assert!(added, "freshly allocated id must be unique");
        self.mark_mutated(now);
        id
    }

    pub fn remove_panel(&mut self, id: PanelId, now: f64) -> Option<PanelInstance> {
        if !self.current.panels.contains_key(&id) {
            return None;
        }
        self.snapshot();
        let removed = self.current.remove_panel(id);
        self.mark_mutated(now);
        removed
    }

    /// Run a fallible document mutation: the history entry is pushed only
    /// once the operation has actually succeeded, so a rejected op can never
    /// evict an older undo entry.
    fn try_mutate(&mut self, now: f64, op: impl FnOnce(&mut LayoutDocument) -> bool) -> bool {
        let previous = self.current.clone();
        if op(&mut self.current) {
            self.push_history(previous);
            self.mark_mutated(now);
            true
        } else {
            false
        }
    }

    pub fn move_panel(
        &mut self,
        panel: PanelId,
        from: AreaId,
        to: AreaId,
        insert_at: Option<usize>,
        now: f64,
    ) -> bool {
        self.try_mutate(now, |doc| doc.move_panel(panel, from, to, insert_at))
    }

    pub fn reorder(&mut self, area: AreaId, from: usize, to: usize, now: f64) -> bool {
        self.try_mutate(now, |doc| doc.reorder(area, from, to))
    }

    pub fn float_panel(&mut self, panel: PanelId, rect: PanelRect, now: f64) -> bool {
        self.try_mutate(now, |doc| doc.float_panel(panel, rect))
    }

    pub fn dock_panel(
        &mut self,
        panel: PanelId,
        area: AreaId,
        insert_at: Option<usize>,
        now: f64,
    ) -> bool {
        self.try_mutate(now, |doc| doc.dock_panel(panel, area, insert_at))
    }

    /// Commit a drag/resize gesture's final geometry.
    pub fn set_panel_rect(&mut self, panel: PanelId, rect: PanelRect, now: f64) -> bool {
        if !self.current.panels.contains_key(&panel) {
            return false;
        }
        self.snapshot();
        if let Some(instance) = self.current.panel_mut(panel) {
            instance.rect = rect;
        }
        self.mark_mutated(now);
        true
    }

    // ---------------------------------------------------------------------
    // Non-destructive mutations (no history entry, still persisted).

    pub fn activate(&mut self, area: AreaId, panel: PanelId, now: f64) -> bool {
        if self.current.activate(area, panel) {
            self.mark_mutated(now);
            true
        } else {
            false
        }
    }

    pub(crate) fn with_panel_mut(
        &mut self,
        panel: PanelId,
        now: f64,
        mutate: impl FnOnce(&mut PanelInstance) -> bool,
    ) -> bool {
        let Some(instance) = self.current.panel_mut(panel) else {
            return false;
        };
        if mutate(instance) {
            self.mark_mutated(now);
            true
        } else {
            false
        }
    }

    pub(crate) fn bring_floating_to_front(&mut self, panel: PanelId) {
        self.current.bring_floating_to_front(panel);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dock::panel::PanelKind;

    fn first_area(manager: &LayoutManager) -> AreaId {
        *manager
            .current()
            .areas
            .keys()
            .next()
            .expect("preset has areas")
    }

    #[test]
    fn undo_on_empty_history_is_a_no_op() {
        let mut manager = LayoutManager::new(0.0);
        let before = manager.current().clone();
        assert!(!manager.undo());
        assert_eq!(*manager.current(), before);
    }

    #[test]
    fn destructive_ops_snapshot_and_undo_restores() {
        let mut manager = LayoutManager::new(0.0);
        let area = first_area(&manager);
        let before = manager.current().clone();

        let id = manager
            .add_panel(area, PanelConfig::new(PanelKind::Output), 1.0)
            .expect("area exists");
        assert!(manager.current().panels.contains_key(&id));

        assert!(manager.undo());
        assert_eq!(*manager.current(), before);
    }

    #[test]
    fn failed_move_leaves_no_history_entry() {
        let mut manager = LayoutManager::new(0.0);
        let area = first_area(&manager);
        let depth = manager.history_len();
        assert!(!manager.move_panel(PanelId(999), area, area, None, 1.0));
        assert_eq!(manager.history_len(), depth);
    }

    #[test]
    fn apply_preset_is_idempotent_modulo_timestamps() {
        let mut manager = LayoutManager::new(0.0);
        manager.apply_preset(PresetKind::Coding, 1.0);
        let first = manager.current().clone();
        manager.apply_preset(PresetKind::Coding, 2.0);
        let second = manager.current().clone();

        let mut normalized = second.clone();
        normalized.id = first.id;
        normalized.created_at = first.created_at;
        normalized.modified_at = first.modified_at;
        assert_eq!(normalized, first);
    }

    #[test]
    fn maintain_debounces_and_coalesces_writes() {
        let mut manager =
            LayoutManager::new(0.0).with_store(Box::new(MemoryStore::default()), "slot");
        let area = first_area(&manager);

        manager.add_panel(area, PanelConfig::new(PanelKind::Output), 1.0);
        manager.add_panel(area, PanelConfig::new(PanelKind::Inspector), 1.1);

        // Within the debounce window: nothing written yet.
        manager.maintain(1.2);
        assert!(manager.dirty);

        manager.maintain(1.4);
        assert!(!manager.dirty);

        // Settled: a second maintain does not rewrite.
        manager.maintain(2.0);
        assert!(!manager.dirty);
    }

    #[test]
    fn import_failure_leaves_state_untouched() {
        let mut manager = LayoutManager::new(0.0);
        let before = manager.current().clone();
        let depth = manager.history_len();

        assert!(manager.import("not ron at all", 1.0).is_err());
        assert_eq!(*manager.current(), before);
        assert_eq!(manager.history_len(), depth);
    }

    #[test]
    fn serial_never_regresses_across_preset_and_undo() {
        let mut manager = LayoutManager::new(0.0);
        let area = first_area(&manager);
        for step in 0..8 {
            manager.add_panel(area, PanelConfig::new(PanelKind::Output), f64::from(step));
        }

        // The preset document holds lower ids, but the allocator must not
        // follow it down: undo brings the higher ids back to life.
        manager.apply_preset(PresetKind::Default, 10.0);
        assert!(manager.undo());

        let id = manager
            .add_panel(area, PanelConfig::new(PanelKind::Output), 11.0)
            .expect("area exists");
        assert_eq!(id, PanelId(11));
        assert_eq!(
            manager
                .current()
                .panels
                .keys()
                .filter(|&&p| p == id)
                .count(),
            1
        );
    }

    #[test]
    fn with_store_restores_the_saved_layout() {
        let mut manager = LayoutManager::new(0.0);
        let area = first_area(&manager);
        manager.add_panel(area, PanelConfig::new(PanelKind::Output), 1.0);
        let exported = manager.export().expect("export");

        let mut store = MemoryStore::default();
        store.save("slot", &exported).expect("save");

        let mut restored = LayoutManager::new(0.0).with_store(Box::new(store), "slot");
        assert_eq!(restored.current(), manager.current());

        // The adopted document's ids inform the allocator.
        let id = restored
            .add_panel(area, PanelConfig::new(PanelKind::Inspector), 2.0)
            .expect("area exists");
        assert!(!manager.current().panels.contains_key(&id));
    }

    #[test]
    fn with_store_keeps_the_default_layout_when_the_slot_is_corrupt() {
        let mut store = MemoryStore::default();
        store.save("slot", "not ron at all").expect("save");

        let manager = LayoutManager::new(0.0).with_store(Box::new(store), "slot");
        assert_eq!(manager.current().preset, PresetKind::Default);
    }

    #[test]
    fn failed_op_at_history_capacity_keeps_the_oldest_entry() {
        let mut manager = LayoutManager::new(0.0).with_history_limit(2);
        let area = first_area(&manager);
        let original = manager.current().clone();

        manager.add_panel(area, PanelConfig::new(PanelKind::Output), 1.0);
        manager.add_panel(area, PanelConfig::new(PanelKind::Inspector), 2.0);
        assert_eq!(manager.history_len(), 2);

        assert!(!manager.move_panel(PanelId(999), area, area, None, 3.0));
        assert_eq!(manager.history_len(), 2);

        assert!(manager.undo());
        assert!(manager.undo());
        assert_eq!(*manager.current(), original);
    }

    #[test]
    fn allocated_ids_never_collide_after_import() {
        let mut manager = LayoutManager::new(0.0);
        let exported = manager.export().expect("export");
        manager.import(&exported, 1.0).expect("import");

        let area = first_area(&manager);
        let id = manager
            .add_panel(area, PanelConfig::new(PanelKind::Output), 2.0)
            .expect("area exists");
        assert_eq!(
            manager
                .current()
                .panels
                .keys()
                .filter(|&&p| p == id)
                .count(),
            1
        );
    }
}
