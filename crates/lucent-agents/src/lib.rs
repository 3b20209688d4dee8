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

//! Agents of the Lucent synchronizer.
//!
//! An agent owns the staging stores of `lucent-data`, drives the pure
//! compilers of `lucent-lanes`, and is the only place that talks to the
//! renderer through [`lucent_core::renderer::RenderScene`].

#![warn(missing_docs)]

pub mod sync_agent;

pub use sync_agent::{FlushReport, State, SyncAgent, UploadOutcome};
