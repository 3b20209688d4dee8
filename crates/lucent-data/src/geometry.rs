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

//! The geometry store: staged meshes, pending deletions and the mesh
//! relation table (`MeshKey` to renderer mesh).

use lucent_core::renderer::MeshHandle;
use lucent_core::scene::{DocumentObjectId, MeshBuffers, MeshKey, ShaderHash};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// A staged mesh. Always complete: a geometry change replaces the whole
/// record.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshRecord {
    /// Identity.
    pub key: MeshKey,
    /// Renderer-ready buffers.
    pub buffers: MeshBuffers,
    /// Material hash associated with the mesh when it was staged.
    pub material_hash: ShaderHash,
    /// Content fingerprint of `buffers`.
    pub fingerprint: u64,
}

impl MeshRecord {
    /// Wraps buffers into a record, fingerprinting them.
    pub fn new(key: MeshKey, buffers: MeshBuffers, material_hash: ShaderHash) -> Self {
        let fingerprint = buffers.fingerprint();
        Self {
            key,
            buffers,
            material_hash,
            fingerprint,
        }
    }
}

/// What the renderer currently holds for a mesh key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadedMesh {
    /// Renderer mesh.
    pub handle: MeshHandle,
    /// Fingerprint of the uploaded content; `None` once the mesh was cleared.
    pub fingerprint: Option<u64>,
}

/// Staging and relation store for meshes.
#[derive(Debug, Default)]
pub struct GeometryStore {
    staged: BTreeMap<MeshKey, MeshRecord>,
    deletions: BTreeSet<DocumentObjectId>,
    uploaded: HashMap<MeshKey, UploadedMesh>,
}

impl GeometryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stages a mesh, overwriting any mesh already staged for the key.
    ///
    /// A deletion of the same document object staged in this cycle is
    /// withdrawn: the object is being rebuilt, not removed.
    pub fn add_mesh(&mut self, record: MeshRecord) {
        if self.deletions.remove(&record.key.object) {
            log::debug!(
                "Object {} re-added in the same cycle; keeping its meshes",
                record.key.object
            );
        }
        self.staged.insert(record.key, record);
    }

    /// Marks every sub-mesh of `object` for deletion, unless geometry for
    /// the object is staged in this cycle.
    pub fn delete_mesh(&mut self, object: DocumentObjectId) {
        if self.staged.keys().any(|k| k.object == object) {
            log::debug!("Suppressing deletion of {object}: rebuilt in the same cycle");
            return;
        }
        self.deletions.insert(object);
    }

    /// The renderer mesh uploaded for `key`.
    pub fn find_mesh_relation(&self, key: MeshKey) -> Option<MeshHandle> {
        self.uploaded.get(&key).map(|u| u.handle)
    }

    /// The full upload state of `key`.
    pub fn uploaded(&self, key: MeshKey) -> Option<&UploadedMesh> {
        self.uploaded.get(&key)
    }

    /// Records that `key` now lives in `handle` with the given content.
    pub fn record_mesh_relation(&mut self, key: MeshKey, handle: MeshHandle, fingerprint: u64) {
        self.uploaded.insert(
            key,
            UploadedMesh {
                handle,
                fingerprint: Some(fingerprint),
            },
        );
    }

    /// Records that the renderer mesh of `key` was emptied.
    pub fn mark_cleared(&mut self, key: MeshKey) {
        if let Some(u) = self.uploaded.get_mut(&key) {
            u.fingerprint = None;
        }
    }

    /// True when `record` matches what the renderer already holds.
    pub fn is_uploaded_unchanged(&self, record: &MeshRecord) -> bool {
        self.uploaded
            .get(&record.key)
            .is_some_and(|u| u.fingerprint == Some(record.fingerprint))
    }

    /// True when the renderer holds non-empty geometry for `key`.
    pub fn has_live_mesh(&self, key: MeshKey) -> bool {
        self.uploaded
            .get(&key)
            .is_some_and(|u| u.fingerprint.is_some())
    }

    /// Keys of staged meshes, in key order.
    pub fn staged_keys(&self) -> Vec<MeshKey> {
        self.staged.keys().copied().collect()
    }

    /// The staged record for `key`.
    pub fn staged(&self, key: MeshKey) -> Option<&MeshRecord> {
        self.staged.get(&key)
    }

    /// Removes a staged record once it has been dealt with.
    pub fn take_staged(&mut self, key: MeshKey) -> Option<MeshRecord> {
        self.staged.remove(&key)
    }

    /// Number of staged meshes.
    pub fn staged_len(&self) -> usize {
        self.staged.len()
    }

    /// Document objects whose meshes are to be deleted.
    pub fn pending_deletions(&self) -> Vec<DocumentObjectId> {
        self.deletions.iter().copied().collect()
    }

    /// Removes `object` from the deletion queue.
    pub fn complete_deletion(&mut self, object: DocumentObjectId) {
        self.deletions.remove(&object);
    }

    /// Uploaded meshes belonging to `object`, in key order.
    pub fn uploaded_for_object(&self, object: DocumentObjectId) -> Vec<(MeshKey, MeshHandle)> {
        let mut out: Vec<(MeshKey, MeshHandle)> = self
            .uploaded
            .iter()
            .filter(|(k, _)| k.object == object)
            .map(|(k, u)| (*k, u.handle))
            .collect();
        out.sort_by_key(|(k, _)| *k);
        out
    }

    /// True when meshes are staged or deletions are pending.
    pub fn has_changes(&self) -> bool {
        !self.staged.is_empty() || !self.deletions.is_empty()
    }

    /// Clears the staging queues. Relations are kept.
    pub fn reset(&mut self) {
        self.staged.clear();
        self.deletions.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(object: u128, index: u32) -> MeshKey {
        MeshKey::new(DocumentObjectId::from_u128(object), index)
    }

    fn record(k: MeshKey, x: f32) -> MeshRecord {
        MeshRecord::new(
            k,
            MeshBuffers {
                vertices: vec![x, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
                triangles: vec![0, 1, 2],
                uvs: None,
                normals: None,
            },
            ShaderHash::NONE,
        )
    }

    #[test]
    fn later_add_overwrites_earlier() {
        let mut store = GeometryStore::new();
        store.add_mesh(record(key(1, 0), 0.0));
        store.add_mesh(record(key(1, 0), 5.0));
        assert_eq!(store.staged_len(), 1);
        assert_eq!(store.staged(key(1, 0)).unwrap().buffers.vertices[0], 5.0);
    }

    #[test]
    fn delete_is_suppressed_by_same_cycle_add_in_either_order() {
        let mut store = GeometryStore::new();
        store.add_mesh(record(key(1, 0), 0.0));
        store.delete_mesh(DocumentObjectId::from_u128(1));
        assert!(store.pending_deletions().is_empty());

        let mut store = GeometryStore::new();
        store.delete_mesh(DocumentObjectId::from_u128(1));
        store.add_mesh(record(key(1, 0), 0.0));
        assert!(store.pending_deletions().is_empty());
    }

    #[test]
    fn delete_without_add_is_queued() {
        let mut store = GeometryStore::new();
        store.delete_mesh(DocumentObjectId::from_u128(2));
        assert_eq!(store.pending_deletions(), vec![DocumentObjectId::from_u128(2)]);
        assert!(store.has_changes());
    }

    #[test]
    fn unchanged_detection_uses_fingerprint() {
        let mut store = GeometryStore::new();
        let r = record(key(1, 0), 0.0);
        assert!(!store.is_uploaded_unchanged(&r));
        store.record_mesh_relation(r.key, MeshHandle(3), r.fingerprint);
        assert!(store.is_uploaded_unchanged(&r));
        assert!(!store.is_uploaded_unchanged(&record(key(1, 0), 1.0)));
        store.mark_cleared(r.key);
        assert!(!store.is_uploaded_unchanged(&r));
        assert_eq!(store.find_mesh_relation(r.key), Some(MeshHandle(3)));
        assert!(!store.has_live_mesh(r.key));
    }

    #[test]
    fn uploaded_for_object_lists_sub_meshes_in_order() {
        let mut store = GeometryStore::new();
        store.record_mesh_relation(key(1, 1), MeshHandle(2), 0);
        store.record_mesh_relation(key(1, 0), MeshHandle(1), 0);
        store.record_mesh_relation(key(2, 0), MeshHandle(3), 0);
        assert_eq!(
            store.uploaded_for_object(DocumentObjectId::from_u128(1)),
            vec![(key(1, 0), MeshHandle(1)), (key(1, 1), MeshHandle(2))]
        );
    }

    #[test]
    fn reset_keeps_relations() {
        let mut store = GeometryStore::new();
        store.add_mesh(record(key(1, 0), 0.0));
        store.record_mesh_relation(key(1, 0), MeshHandle(1), 0);
        store.reset();
        assert!(!store.has_changes());
        assert_eq!(store.find_mesh_relation(key(1, 0)), Some(MeshHandle(1)));
    }
}
