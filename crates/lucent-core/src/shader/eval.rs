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

//! CPU reference evaluation of a shader graph for a single sample.
//!
//! Renderers compile graphs into their own kernels; this evaluator exists to
//! check what a network computes for a given set of ray classification
//! signals without a renderer attached. Texture lookups are replaced by
//! colours supplied per node name.

use super::graph::{socket, BlendMode, ColorStop, MathOp, NodeKind, ShaderGraph, SocketValue};
use crate::math::LinearRgba;
use std::collections::HashMap;

/// Per-sample ray classification. Signals are not mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RaySignals {
    /// Camera ray.
    pub camera: bool,
    /// Glossy bounce.
    pub glossy: bool,
    /// Reflection bounce.
    pub reflection: bool,
    /// Transmission bounce.
    pub transmission: bool,
    /// Singular (perfectly sharp) bounce.
    pub singular: bool,
    /// Diffuse bounce.
    pub diffuse: bool,
    /// Shadow ray.
    pub shadow: bool,
}

impl RaySignals {
    /// A pure camera ray.
    pub fn camera() -> Self {
        Self {
            camera: true,
            ..Self::default()
        }
    }

    /// A pure glossy ray that is not a reflection.
    pub fn glossy() -> Self {
        Self {
            glossy: true,
            ..Self::default()
        }
    }

    /// A glossy reflection ray.
    pub fn glossy_reflection() -> Self {
        Self {
            glossy: true,
            reflection: true,
            ..Self::default()
        }
    }

    /// A pure transmission ray.
    pub fn transmission() -> Self {
        Self {
            transmission: true,
            ..Self::default()
        }
    }

    /// A diffuse bounce.
    pub fn diffuse() -> Self {
        Self {
            diffuse: true,
            ..Self::default()
        }
    }

    fn signal(&self, output: &str) -> bool {
        match output {
            socket::IS_CAMERA_RAY => self.camera,
            socket::IS_GLOSSY_RAY => self.glossy,
            socket::IS_REFLECTION_RAY => self.reflection,
            socket::IS_TRANSMISSION_RAY => self.transmission,
            socket::IS_SINGULAR_RAY => self.singular,
            socket::IS_DIFFUSE_RAY => self.diffuse,
            socket::IS_SHADOW_RAY => self.shadow,
            _ => false,
        }
    }
}

/// Inputs for one evaluation.
#[derive(Debug, Clone, Default)]
pub struct SampleInputs {
    /// Ray classification of the sample.
    pub rays: RaySignals,
    /// Colour returned by each environment texture node, by node name.
    /// Missing entries sample black.
    pub textures: HashMap<String, LinearRgba>,
    /// Factor returned by gradient texture nodes.
    pub gradient: f32,
}

#[derive(Debug, Clone, Copy)]
enum Value {
    Float(f32),
    Color(LinearRgba),
}

impl Value {
    fn as_float(self) -> f32 {
        match self {
            Value::Float(v) => v,
            Value::Color(c) => c.average(),
        }
    }

    fn as_color(self) -> LinearRgba {
        match self {
            Value::Float(v) => LinearRgba::gray(v),
            Value::Color(c) => c,
        }
    }
}

impl From<SocketValue> for Value {
    fn from(v: SocketValue) -> Self {
        match v {
            SocketValue::Float(f) => Value::Float(f),
            SocketValue::Color(c) => Value::Color(c),
            SocketValue::Vector(v) => Value::Color(LinearRgba::rgb(v.x, v.y, v.z)),
        }
    }
}

fn default_input(kind: &NodeKind, input: &str) -> Value {
    match (kind, input) {
        (NodeKind::Mix { .. }, socket::FAC) | (NodeKind::ColorRamp { .. }, socket::FAC) => {
            Value::Float(0.5)
        }
        (NodeKind::Background | NodeKind::Emission, socket::STRENGTH) => Value::Float(1.0),
        (_, socket::COLOR | socket::COLOR1 | socket::COLOR2) => {
            Value::Color(LinearRgba::BLACK)
        }
        _ => Value::Float(0.0),
    }
}

fn ramp(stops: &[ColorStop], t: f32) -> LinearRgba {
    let (Some(first), Some(last)) = (stops.first(), stops.last()) else {
        return LinearRgba::BLACK;
    };
    if t <= first.position {
        return first.color;
    }
    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t <= b.position {
            let span = b.position - a.position;
            let local = if span > 0.0 { (t - a.position) / span } else { 1.0 };
            return LinearRgba::lerp(a.color, b.color, local);
        }
    }
    last.color
}

fn math(op: MathOp, a: f32, b: f32) -> f32 {
    match op {
        MathOp::Add => a + b,
        MathOp::Subtract => a - b,
        MathOp::Multiply => a * b,
        MathOp::Maximum => a.max(b),
        MathOp::Minimum => a.min(b),
    }
}

/// Evaluates the colour reaching the output node's surface input.
///
/// Closures evaluate to `color * strength`. Mix factors are clamped to
/// `0..=1` like the renderer does; math nodes clamp only when asked to.
pub fn evaluate_surface(graph: &ShaderGraph, inputs: &SampleInputs) -> LinearRgba {
    let mut values: HashMap<(&str, &str), Value> = HashMap::new();
    let mut surface = LinearRgba::BLACK;

    for node in graph.ordered_nodes() {
        let name = node.name.as_str();
        let input = |socket: &'static str| -> Value {
            if let Some(edge) = graph.link_into(name, socket) {
                if let Some(v) = values.get(&(edge.from.as_str(), edge.output)) {
                    return *v;
                }
            }
            node.value(socket)
                .map(Value::from)
                .unwrap_or_else(|| default_input(&node.kind, socket))
        };

        let mut produced: Vec<(&'static str, Value)> = Vec::new();
        match &node.kind {
            NodeKind::TextureCoordinate => {
                for &out in node.kind.outputs() {
                    produced.push((out, Value::Color(LinearRgba::BLACK)));
                }
            }
            NodeKind::EnvironmentTexture { image, .. } => {
                let color = match image {
                    Some(_) => inputs
                        .textures
                        .get(name)
                        .copied()
                        .unwrap_or(LinearRgba::BLACK),
                    None => LinearRgba::BLACK,
                };
                produced.push((socket::COLOR, Value::Color(color)));
                produced.push((socket::ALPHA, Value::Float(color.a)));
            }
            NodeKind::Mix { blend, clamp } => {
                let t = input(socket::FAC).as_float().clamp(0.0, 1.0);
                let c1 = input(socket::COLOR1).as_color();
                let c2 = input(socket::COLOR2).as_color();
                let mut out = match blend {
                    BlendMode::Blend => LinearRgba::lerp(c1, c2, t),
                    BlendMode::Add => c1 + c2 * t,
                    BlendMode::Multiply => c1 * LinearRgba::lerp(LinearRgba::WHITE, c2, t),
                };
                if *clamp {
                    out = out.saturate();
                }
                produced.push((socket::COLOR, Value::Color(out)));
            }
            NodeKind::Math { op, clamp } => {
                let mut v = math(
                    *op,
                    input(socket::VALUE1).as_float(),
                    input(socket::VALUE2).as_float(),
                );
                if *clamp {
                    v = v.clamp(0.0, 1.0);
                }
                produced.push((socket::VALUE, Value::Float(v)));
            }
            NodeKind::GradientTexture { .. } => {
                produced.push((socket::FAC, Value::Float(inputs.gradient)));
                produced.push((socket::COLOR, Value::Color(LinearRgba::gray(inputs.gradient))));
            }
            NodeKind::ColorRamp { stops } => {
                let c = ramp(stops, input(socket::FAC).as_float());
                produced.push((socket::COLOR, Value::Color(c)));
                produced.push((socket::ALPHA, Value::Float(c.a)));
            }
            NodeKind::LightPath => {
                for &out in node.kind.outputs() {
                    let on = inputs.rays.signal(out);
                    produced.push((out, Value::Float(if on { 1.0 } else { 0.0 })));
                }
            }
            NodeKind::Background | NodeKind::Emission => {
                let c = input(socket::COLOR).as_color();
                let s = input(socket::STRENGTH).as_float();
                let closure = LinearRgba::new(c.r * s, c.g * s, c.b * s, c.a);
                let out = if node.kind == NodeKind::Background {
                    socket::BACKGROUND
                } else {
                    socket::EMISSION
                };
                produced.push((out, Value::Color(closure)));
            }
            NodeKind::Output => {
                surface = input(socket::SURFACE).as_color();
            }
        }

        for (out, v) in produced {
            values.insert((name, out), v);
        }
    }

    surface
}
