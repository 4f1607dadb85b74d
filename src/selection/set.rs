use rustc_hash::FxHashMap;

use crate::part::{PartId, PartRecord};
use crate::scene::Scene;

/// What a toggle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The part was added and highlighted.
    Selected,
    /// The part was removed and its highlight cleared.
    Deselected,
}

/// Selected parts, keyed by id, each with a snapshot of its record.
///
/// Every mutation goes through the scene so the part's highlight flag is
/// flipped in the same call: a part is highlighted iff its id is a key here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionSet {
    entries: FxHashMap<PartId, PartRecord>,
}

impl SelectionSet {
    /// Empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of selected parts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `id` is selected.
    #[must_use]
    pub fn contains(&self, id: PartId) -> bool {
        self.entries.contains_key(&id)
    }

    /// The record snapshot taken when `id` was selected.
    #[must_use]
    pub fn get(&self, id: PartId) -> Option<&PartRecord> {
        self.entries.get(&id)
    }

    /// Selected records in unspecified order.
    pub fn records(&self) -> impl Iterator<Item = &PartRecord> {
        self.entries.values()
    }

    /// Selected ids, sorted ascending.
    #[must_use]
    pub fn ids(&self) -> Vec<PartId> {
        let mut ids: Vec<PartId> = self.entries.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Flip `id`'s membership and its highlight flag. `None` if the scene
    /// has no such part.
    pub(crate) fn toggle(
        &mut self,
        scene: &mut Scene,
        id: PartId,
    ) -> Option<ToggleOutcome> {
        if self.entries.remove(&id).is_some() {
            let _ = scene.set_highlight(id, false);
            log::debug!("deselected part {id}");
            return Some(ToggleOutcome::Deselected);
        }
        let record = scene.part(id)?.record().clone();
        let _ = self.entries.insert(id, record);
        let _ = scene.set_highlight(id, true);
        log::debug!("selected part {id}");
        Some(ToggleOutcome::Selected)
    }

    /// Drop `id` without touching the scene (the part is being removed).
    pub(crate) fn forget(&mut self, id: PartId) -> bool {
        self.entries.remove(&id).is_some()
    }

    /// Deselect everything. Returns how many parts were deselected.
    pub(crate) fn clear(&mut self, scene: &mut Scene) -> usize {
        let count = self.entries.len();
        for id in self.entries.drain().map(|(id, _)| id) {
            let _ = scene.set_highlight(id, false);
        }
        count
    }
}
