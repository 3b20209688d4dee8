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

//! The content-addressed shader registry.
//!
//! Shaders are keyed by the content hash of the material they come from, so
//! any number of instances wearing identical materials share one compiled
//! shader. Adding a hash that is already known is a no-op.

use lucent_core::renderer::{SceneShaderId, ShaderHandle};
use lucent_core::scene::material::{MaterialBinding, MaterialDescription};
use lucent_core::scene::{InstanceId, ShaderHash};
use std::collections::{BTreeMap, HashMap};

/// One registered material shader.
#[derive(Debug, Clone, PartialEq)]
pub struct ShaderRecord {
    /// Content hash, the record's identity.
    pub hash: ShaderHash,
    /// The material the shader is compiled from.
    pub material: MaterialDescription,
    /// Renderer shader, once compiled.
    pub handle: Option<ShaderHandle>,
    /// Id assigned by the renderer scene, once added to it.
    pub scene_id: Option<SceneShaderId>,
}

impl ShaderRecord {
    /// True once the renderer holds a compiled shader for this record.
    pub fn is_compiled(&self) -> bool {
        self.handle.is_some()
    }
}

/// A staged material reassignment: `instance` goes from `old` to `new`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RelationEdge {
    /// The instance.
    pub instance: InstanceId,
    /// Hash currently bound on the renderer side, [`ShaderHash::NONE`] if none.
    pub old: ShaderHash,
    /// Hash the document now wants.
    pub new: ShaderHash,
}

/// Registry of compiled shaders plus the two queues drained by upload:
/// newly added shaders and reassignment edges.
#[derive(Debug, Default)]
pub struct ShaderRegistry {
    records: HashMap<ShaderHash, ShaderRecord>,
    pending: Vec<ShaderHash>,
    edges: BTreeMap<InstanceId, RelationEdge>,
}

impl ShaderRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// True when a record exists for `hash`, compiled or not.
    pub fn has_shader(&self, hash: ShaderHash) -> bool {
        self.records.contains_key(&hash)
    }

    /// The compiled renderer shader for `hash`.
    pub fn shader_from_hash(&self, hash: ShaderHash) -> Option<ShaderHandle> {
        self.records.get(&hash).and_then(|r| r.handle)
    }

    /// The record for `hash`.
    pub fn record(&self, hash: ShaderHash) -> Option<&ShaderRecord> {
        self.records.get(&hash)
    }

    /// Registers a material. Returns `false`, and changes nothing, when the
    /// hash is already registered.
    pub fn add_shader(&mut self, binding: &MaterialBinding) -> bool {
        if self.records.contains_key(&binding.hash) {
            return false;
        }
        log::trace!("Registering shader {}", binding.hash);
        self.records.insert(
            binding.hash,
            ShaderRecord {
                hash: binding.hash,
                material: binding.material.clone(),
                handle: None,
                scene_id: None,
            },
        );
        self.pending.push(binding.hash);
        true
    }

    /// Hashes added since the last reset that still need compiling, in the
    /// order they were added.
    pub fn pending(&self) -> &[ShaderHash] {
        &self.pending
    }

    /// Records the compiled handle of `hash` and drops it from the pending
    /// queue.
    pub fn record_handle(&mut self, hash: ShaderHash, handle: ShaderHandle) {
        if let Some(record) = self.records.get_mut(&hash) {
            record.handle = Some(handle);
        }
        self.pending.retain(|h| *h != hash);
    }

    /// Records the id the renderer scene assigned to the shader of `hash`.
    pub fn record_scene_id(&mut self, hash: ShaderHash, scene_id: SceneShaderId) {
        if let Some(record) = self.records.get_mut(&hash) {
            record.scene_id = Some(scene_id);
        }
    }

    /// Stages a reassignment. Several reassignments of one instance within a
    /// cycle collapse into one edge from the original hash to the latest; an
    /// edge that ends where it started is dropped.
    pub fn add_reassignment(&mut self, edge: RelationEdge) {
        match self.edges.get_mut(&edge.instance) {
            Some(existing) => {
                existing.new = edge.new;
                if existing.old == existing.new {
                    self.edges.remove(&edge.instance);
                }
            }
            None if edge.old != edge.new => {
                self.edges.insert(edge.instance, edge);
            }
            None => {}
        }
    }

    /// Staged reassignments, ordered by instance id.
    pub fn reassignments(&self) -> impl Iterator<Item = &RelationEdge> + '_ {
        self.edges.values()
    }

    /// The staged reassignment of `instance`.
    pub fn reassignment(&self, instance: InstanceId) -> Option<&RelationEdge> {
        self.edges.get(&instance)
    }

    /// Removes and returns the staged reassignment of `instance`.
    pub fn complete_reassignment(&mut self, instance: InstanceId) -> Option<RelationEdge> {
        self.edges.remove(&instance)
    }

    /// Every compiled record, ordered by hash.
    pub fn compiled(&self) -> Vec<&ShaderRecord> {
        let mut out: Vec<&ShaderRecord> =
            self.records.values().filter(|r| r.is_compiled()).collect();
        out.sort_by_key(|r| r.hash);
        out
    }

    /// Number of registered shaders.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// True when either queue holds work.
    pub fn has_changes(&self) -> bool {
        !self.pending.is_empty() || !self.edges.is_empty()
    }

    /// Clears both queues. Records are kept.
    pub fn reset(&mut self) {
        self.pending.clear();
        self.edges.clear();
    }
}
