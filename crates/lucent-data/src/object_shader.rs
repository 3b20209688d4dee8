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

//! Which shader each instance is wearing on the renderer side.
//!
//! This store tracks renderer truth, not document intent: it is updated only
//! when a reassignment has actually been uploaded.

use lucent_core::scene::{InstanceId, MeshKey, ShaderHash};
use std::collections::{BTreeSet, HashMap};

/// Bidirectional instance / shader-hash mapping, plus the hash last used
/// with each mesh.
#[derive(Debug, Default)]
pub struct ObjectShaderStore {
    by_instance: HashMap<InstanceId, ShaderHash>,
    by_shader: HashMap<ShaderHash, BTreeSet<InstanceId>>,
    by_mesh: HashMap<MeshKey, ShaderHash>,
}

impl ObjectShaderStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// The hash bound to `instance`, or [`ShaderHash::NONE`].
    pub fn find_or_default(&self, instance: InstanceId) -> ShaderHash {
        self.by_instance
            .get(&instance)
            .copied()
            .unwrap_or(ShaderHash::NONE)
    }

    /// The hash last bound to any instance of `mesh`, or [`ShaderHash::NONE`].
    pub fn hash_for_mesh(&self, mesh: MeshKey) -> ShaderHash {
        self.by_mesh.get(&mesh).copied().unwrap_or(ShaderHash::NONE)
    }

    /// Binds `instance` (drawing `mesh`) to `hash`, replacing any earlier
    /// binding.
    pub fn record_relation(&mut self, hash: ShaderHash, mesh: MeshKey, instance: InstanceId) {
        if let Some(old) = self.by_instance.insert(instance, hash) {
            if old != hash {
                self.detach(old, instance);
            }
        }
        self.by_shader.entry(hash).or_default().insert(instance);
        self.by_mesh.insert(mesh, hash);
    }

    /// Forgets `instance`.
    pub fn remove_instance(&mut self, instance: InstanceId) {
        if let Some(old) = self.by_instance.remove(&instance) {
            self.detach(old, instance);
        }
    }

    /// Instances currently wearing `hash`, ordered by id.
    pub fn instances_for(&self, hash: ShaderHash) -> Vec<InstanceId> {
        self.by_shader
            .get(&hash)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Number of bound instances.
    pub fn len(&self) -> usize {
        self.by_instance.len()
    }

    /// True when no instance is bound.
    pub fn is_empty(&self) -> bool {
        self.by_instance.is_empty()
    }

    fn detach(&mut self, hash: ShaderHash, instance: InstanceId) {
        if let Some(set) = self.by_shader.get_mut(&hash) {
            set.remove(&instance);
            if set.is_empty() {
                self.by_shader.remove(&hash);
            }
        }
    }
}
