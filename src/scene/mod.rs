//! Scene registry: the registration-ordered list of pickable parts (and
//! non-part helper objects) that ray and area queries run against.
//!
//! Registration order is part of the contract: it is the iteration order
//! handed to the renderer, the order area picks toggle in, and the
//! tie-break between equally distant ray hits.

mod object;
mod pick_target;

use rustc_hash::FxHashMap;

pub use object::{Helper, HelperId, SceneObject};
pub use pick_target::{Intersection, PickTarget};

use crate::part::{PartId, PartRecord, PickablePart};
use crate::util::{Aabb, Ray};

/// Read-only view of the registry handed to the render collaborator.
#[derive(Debug, Clone, Copy)]
pub struct SceneRoot<'a> {
    /// Every object in registration order.
    pub objects: &'a [SceneObject],
    /// Registry generation at the time of the call.
    pub generation: u64,
}

impl<'a> SceneRoot<'a> {
    /// Parts only, in registration order.
    pub fn parts(&self) -> impl Iterator<Item = &'a PickablePart> + 'a {
        self.objects.iter().filter_map(SceneObject::as_part)
    }
}

/// The scene registry. Owns every [`PickablePart`] for its lifetime.
#[derive(Debug, Default)]
pub struct Scene {
    /// Objects in registration order.
    objects: Vec<SceneObject>,
    /// Part id → index into `objects`.
    part_index: FxHashMap<PartId, usize>,
    next_helper_id: u32,
    /// Monotonically increasing generation; bumped on any mutation.
    generation: u64,
    /// Generation that was last consumed by the renderer.
    rendered_generation: u64,
}

impl Scene {
    /// Create an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // -- Mutation helpers --

    fn invalidate(&mut self) {
        self.generation += 1;
    }

    fn rebuild_index(&mut self) {
        self.part_index = self
            .objects
            .iter()
            .enumerate()
            .filter_map(|(i, obj)| obj.as_part().map(|p| (p.id(), i)))
            .collect();
    }

    /// Current generation counter.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether scene data changed since last `mark_rendered()`.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.generation != self.rendered_generation
    }

    /// Mark current generation as rendered (call after updating renderers).
    pub fn mark_rendered(&mut self) {
        self.rendered_generation = self.generation;
    }

    /// Force the renderer to re-upload on its next frame, e.g. after a
    /// colour option changed.
    pub fn force_dirty(&mut self) {
        self.invalidate();
    }

    // -- Registration --

    /// Build and register one [`PickablePart`] per record, in input order.
    ///
    /// Records whose id is already registered, or that fail validation, are
    /// skipped, so feeding the same batch twice is a no-op. Returns the ids
    /// that were actually added.
    pub fn add_parts(
        &mut self,
        records: impl IntoIterator<Item = PartRecord>,
    ) -> Vec<PartId> {
        let mut added = Vec::new();
        for record in records {
            if let Err(e) = record.validate() {
                log::warn!("skipping part: {e}");
                continue;
            }
            if self.part_index.contains_key(&record.id) {
                log::warn!("skipping part {}: id already registered", record.id);
                continue;
            }
            let id = record.id;
            let _ = self.part_index.insert(id, self.objects.len());
            self.objects.push(SceneObject::Part(PickablePart::new(record)));
            added.push(id);
        }
        if !added.is_empty() {
            log::debug!("registered {} parts", added.len());
            self.invalidate();
        }
        added
    }

    /// Register a non-part object.
    pub fn add_helper(
        &mut self,
        name: impl Into<String>,
        bounds: Aabb,
        pickable: bool,
    ) -> HelperId {
        let id = HelperId(self.next_helper_id);
        self.next_helper_id += 1;
        self.objects.push(SceneObject::Helper(Helper {
            id,
            name: name.into(),
            bounds,
            pickable,
        }));
        self.invalidate();
        id
    }

    /// Unregister a helper.
    pub fn remove_helper(&mut self, id: HelperId) -> Option<Helper> {
        let idx = self.objects.iter().position(|obj| {
            matches!(obj, SceneObject::Helper(helper) if helper.id == id)
        })?;
        let SceneObject::Helper(helper) = self.objects.remove(idx) else {
            return None;
        };
        self.rebuild_index();
        self.invalidate();
        Some(helper)
    }

    /// Remove a part. Callers must drop the id from any selection in the
    /// same operation; [`AssemblyView::remove_part`] does.
    ///
    /// [`AssemblyView::remove_part`]: crate::engine::AssemblyView::remove_part
    pub(crate) fn remove_part(&mut self, id: PartId) -> Option<PickablePart> {
        let idx = *self.part_index.get(&id)?;
        let SceneObject::Part(part) = self.objects.remove(idx) else {
            return None;
        };
        self.rebuild_index();
        self.invalidate();
        Some(part)
    }

    /// Set a part's highlight flag. Returns `false` if the id is unknown.
    pub(crate) fn set_highlight(&mut self, id: PartId, on: bool) -> bool {
        let Some(part) = self.part_mut(id) else {
            return false;
        };
        if part.is_highlighted() == on {
            return true;
        }
        part.set_highlighted(on);
        self.invalidate();
        true
    }

    // -- Queries --

    /// Every object in registration order.
    #[must_use]
    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    /// Parts in registration order.
    pub fn parts(&self) -> impl Iterator<Item = &PickablePart> {
        self.objects.iter().filter_map(SceneObject::as_part)
    }

    /// Number of registered parts.
    #[must_use]
    pub fn part_count(&self) -> usize {
        self.part_index.len()
    }

    /// Whether a part with `id` is registered.
    #[must_use]
    pub fn contains_part(&self, id: PartId) -> bool {
        self.part_index.contains_key(&id)
    }

    /// Look up a part by id.
    #[must_use]
    pub fn part(&self, id: PartId) -> Option<&PickablePart> {
        let idx = *self.part_index.get(&id)?;
        self.objects.get(idx).and_then(SceneObject::as_part)
    }

    fn part_mut(&mut self, id: PartId) -> Option<&mut PickablePart> {
        let idx = *self.part_index.get(&id)?;
        self.objects.get_mut(idx).and_then(SceneObject::as_part_mut)
    }

    /// Read-only view for the render collaborator.
    #[must_use]
    pub fn scene_root(&self) -> SceneRoot<'_> {
        SceneRoot {
            objects: &self.objects,
            generation: self.generation,
        }
    }

    /// Union of all part bounds, or `None` for an empty assembly.
    #[must_use]
    pub fn part_bounds(&self) -> Option<Aabb> {
        self.parts()
            .map(|p| *p.bounds())
            .reduce(|acc, b| acc.union(&b))
    }

    /// Intersect `ray` with every pickable object.
    ///
    /// Hits are sorted nearest-first; equal distances keep registration
    /// order (the sort is stable).
    #[must_use]
    pub fn intersect_ray(&self, ray: &Ray) -> Vec<Intersection> {
        let mut hits: Vec<Intersection> = self
            .objects
            .iter()
            .filter(|obj| obj.is_pickable())
            .filter_map(|obj| {
                let distance = ray.intersect_aabb(obj.bounds())?;
                let target = match obj {
                    SceneObject::Part(part) => PickTarget::Part(part.id()),
                    SceneObject::Helper(helper) => PickTarget::Helper(helper.id),
                };
                Some(Intersection { distance, target })
            })
            .collect();
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }

    /// The nearest hit along `ray`, if any.
    #[must_use]
    pub fn nearest_hit(&self, ray: &Ray) -> Option<Intersection> {
        self.intersect_ray(ray).into_iter().next()
    }
}
