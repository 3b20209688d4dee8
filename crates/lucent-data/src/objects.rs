// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The object store: staged instances, deletions, dynamic transforms and the
//! object relation table (instance id to renderer object).

use lucent_core::math::Transform;
use lucent_core::renderer::ObjectHandle;
use lucent_core::scene::{InstanceId, MeshKey, ObjectInstance};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// What the renderer currently holds for an instance.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedObject {
    /// Renderer object.
    pub handle: ObjectHandle,
    /// The instance state last uploaded; `None` once it was hidden because
    /// its mesh went away, so that it is re-sent in full next time.
    pub state: Option<ObjectInstance>,
}

/// Staging and relation store for object instances.
#[derive(Debug, Default)]
pub struct ObjectStore {
    staged: BTreeMap<InstanceId, ObjectInstance>,
    deferred: BTreeMap<InstanceId, ObjectInstance>,
    deletions: BTreeSet<InstanceId>,
    dynamic: BTreeMap<InstanceId, Transform>,
    uploaded: HashMap<InstanceId, UploadedObject>,
}

impl ObjectStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stages an instance add-or-change. Withdraws a deletion of the same
    /// instance staged in this cycle.
    pub fn add_or_update(&mut self, instance: ObjectInstance) {
        self.deletions.remove(&instance.id);
        self.deferred.remove(&instance.id);
        self.staged.insert(instance.id, instance);
    }

    /// Stages a deletion, unless the instance is also added or changed in
    /// this cycle.
    pub fn delete(&mut self, id: InstanceId) {
        if self.staged.contains_key(&id) {
            log::debug!("Instance {id} deleted and re-added in one cycle; keeping it");
            return;
        }
        self.deferred.remove(&id);
        self.deletions.insert(id);
    }

    /// Stages a transform-only update.
    pub fn set_dynamic_transform(&mut self, id: InstanceId, transform: Transform) {
        self.dynamic.insert(id, transform);
    }

    /// Moves deferred instances back into the staged set, unless a newer
    /// version was staged meanwhile.
    pub fn promote_deferred(&mut self) {
        for (id, instance) in std::mem::take(&mut self.deferred) {
            self.staged.entry(id).or_insert(instance);
        }
    }

    /// Ids of staged instances, in id order.
    pub fn staged_ids(&self) -> Vec<InstanceId> {
        self.staged.keys().copied().collect()
    }

    /// The staged instance `id`.
    pub fn staged(&self, id: InstanceId) -> Option<&ObjectInstance> {
        self.staged.get(&id)
    }

    /// Removes a staged instance once it has been dealt with.
    pub fn take_staged(&mut self, id: InstanceId) -> Option<ObjectInstance> {
        self.staged.remove(&id)
    }

    /// Parks an instance whose mesh has not arrived; it survives reset and is
    /// retried on the next flush.
    pub fn defer(&mut self, instance: ObjectInstance) {
        self.deferred.insert(instance.id, instance);
    }

    /// The deferred instance `id`.
    pub fn deferred(&self, id: InstanceId) -> Option<&ObjectInstance> {
        self.deferred.get(&id)
    }

    /// Ids of deferred instances.
    pub fn deferred_ids(&self) -> Vec<InstanceId> {
        self.deferred.keys().copied().collect()
    }

    /// The renderer object of `id`.
    pub fn find_object_relation(&self, id: InstanceId) -> Option<ObjectHandle> {
        self.uploaded.get(&id).map(|u| u.handle)
    }

    /// The full upload state of `id`.
    pub fn uploaded(&self, id: InstanceId) -> Option<&UploadedObject> {
        self.uploaded.get(&id)
    }

    /// True when `instance` matches what the renderer already shows.
    pub fn is_uploaded_unchanged(&self, instance: &ObjectInstance) -> bool {
        self.uploaded
            .get(&instance.id)
            .and_then(|u| u.state.as_ref())
            .is_some_and(|s| s == instance)
    }

    /// Records the renderer object and the state just uploaded.
    pub fn record_object(&mut self, instance: ObjectInstance, handle: ObjectHandle) {
        self.uploaded.insert(
            instance.id,
            UploadedObject {
                handle,
                state: Some(instance),
            },
        );
    }

    /// Updates the transform of the uploaded state after a dynamic update.
    pub fn record_transform(&mut self, id: InstanceId, transform: Transform) {
        if let Some(state) = self.uploaded.get_mut(&id).and_then(|u| u.state.as_mut()) {
            state.transform = transform;
        }
    }

    /// Forgets the uploaded state of `id` so it is re-sent in full.
    pub fn invalidate(&mut self, id: InstanceId) {
        if let Some(u) = self.uploaded.get_mut(&id) {
            u.state = None;
        }
    }

    /// Uploaded instances whose last uploaded state draws `mesh`.
    pub fn instances_using_mesh(&self, mesh: MeshKey) -> Vec<InstanceId> {
        let mut out: Vec<InstanceId> = self
            .uploaded
            .iter()
            .filter(|(_, u)| u.state.as_ref().is_some_and(|s| s.mesh == mesh))
            .map(|(id, _)| *id)
            .collect();
        out.sort();
        out
    }

    /// Instances to delete.
    pub fn pending_deletions(&self) -> Vec<InstanceId> {
        self.deletions.iter().copied().collect()
    }

    /// Removes `id` from the deletion queue.
    pub fn complete_deletion(&mut self, id: InstanceId) {
        self.deletions.remove(&id);
    }

    /// Staged transform-only updates.
    pub fn dynamic_transforms(&self) -> Vec<(InstanceId, Transform)> {
        self.dynamic.iter().map(|(id, t)| (*id, *t)).collect()
    }

    /// Removes a transform-only update once sent.
    pub fn complete_dynamic(&mut self, id: InstanceId) {
        self.dynamic.remove(&id);
    }

    /// True when anything besides deferred instances is queued.
    pub fn has_changes(&self) -> bool {
        !self.staged.is_empty() || !self.deletions.is_empty() || !self.dynamic.is_empty()
    }

    /// Clears staging queues. Deferred instances and relations are kept.
    pub fn reset(&mut self) {
        self.staged.clear();
        self.deletions.clear();
        self.dynamic.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lucent_core::scene::{DocumentObjectId, InstanceFlags, ShaderHash};

    fn instance(id: u32) -> ObjectInstance {
        ObjectInstance {
            id: InstanceId(id),
            mesh: MeshKey::new(DocumentObjectId::from_u128(1), 0),
            transform: Transform::IDENTITY,
            material: ShaderHash(0xABC),
            flags: InstanceFlags::default(),
        }
    }

    #[test]
    fn add_wins_over_delete_in_the_same_cycle() {
        let mut store = ObjectStore::new();
        store.add_or_update(instance(1));
        store.delete(InstanceId(1));
        assert!(store.pending_deletions().is_empty());

        let mut store = ObjectStore::new();
        store.delete(InstanceId(1));
        store.add_or_update(instance(1));
        assert!(store.pending_deletions().is_empty());
        assert_eq!(store.staged_ids(), vec![InstanceId(1)]);
    }

    #[test]
    fn deferred_instances_survive_reset() {
        let mut store = ObjectStore::new();
        store.add_or_update(instance(1));
        let parked = store.take_staged(InstanceId(1)).unwrap();
        store.defer(parked);
        store.reset();
        assert!(!store.has_changes());
        store.promote_deferred();
        assert_eq!(store.staged_ids(), vec![InstanceId(1)]);
        assert!(store.deferred_ids().is_empty());
    }

    #[test]
    fn promote_keeps_newer_staged_version() {
        let mut store = ObjectStore::new();
        store.defer(instance(1));
        let mut newer = instance(1);
        newer.material = ShaderHash(0xDEF);
        store.staged.insert(newer.id, newer.clone());
        store.promote_deferred();
        assert_eq!(store.staged(InstanceId(1)), Some(&newer));
    }

    #[test]
    fn unchanged_detection_and_invalidation() {
        let mut store = ObjectStore::new();
        let inst = instance(1);
        store.record_object(inst.clone(), ObjectHandle(4));
        assert!(store.is_uploaded_unchanged(&inst));
        assert_eq!(store.instances_using_mesh(inst.mesh), vec![InstanceId(1)]);
        store.invalidate(InstanceId(1));
        assert!(!store.is_uploaded_unchanged(&inst));
        assert_eq!(store.find_object_relation(InstanceId(1)), Some(ObjectHandle(4)));
    }
}
