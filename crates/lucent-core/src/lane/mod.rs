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

//! # Lane Abstraction
//!
//! A **lane** is a pure compilation strategy the sync agent drives during an
//! upload stage: turning materials into shader descriptions, backgrounds
//! into node graphs, document lights into renderer lights, and document
//! geometry into renderer-ready buffers. Lanes hold configuration only and
//! never touch the renderer.

use std::fmt;

/// The domain a lane works on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LaneKind {
    /// Material compilation.
    Material,
    /// Background / environment graph compilation.
    Background,
    /// Light conversion.
    Light,
    /// Geometry preparation.
    Geometry,
}

impl fmt::Display for LaneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LaneKind::Material => write!(f, "material"),
            LaneKind::Background => write!(f, "background"),
            LaneKind::Light => write!(f, "light"),
            LaneKind::Geometry => write!(f, "geometry"),
        }
    }
}

/// Common identity shared by every lane.
pub trait Lane: Send + Sync {
    /// Human readable name of the strategy, used in logs.
    fn strategy_name(&self) -> &'static str;

    /// The domain this lane belongs to.
    fn lane_kind(&self) -> LaneKind;
}
