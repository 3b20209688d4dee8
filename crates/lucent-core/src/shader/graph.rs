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

//! Declarative shader graphs.
//!
//! A graph is described as a list of nodes (type plus constant input values)
//! and a list of edges from an output socket to an input socket. Building the
//! graph validates it: node names are unique, every socket exists on its
//! node type, no input is fed twice, the graph is acyclic, and exactly one
//! output node has its surface connected. Only a validated [`ShaderGraph`]
//! is ever handed to the renderer.

use super::error::{GraphError, SocketDirection};
use super::topology::topological_order;
use crate::math::{LinearRgba, Vec3};
use crate::scene::background::{EnvironmentProjection, EnvironmentTransform};
use std::collections::{HashMap, HashSet};

/// Socket names.
pub mod socket {
    #![allow(missing_docs)]
    pub const ALPHA: &str = "Alpha";
    pub const BACKGROUND: &str = "Background";
    pub const COLOR: &str = "Color";
    pub const COLOR1: &str = "Color1";
    pub const COLOR2: &str = "Color2";
    pub const EMISSION: &str = "Emission";
    pub const FAC: &str = "Fac";
    pub const GENERATED: &str = "Generated";
    pub const IS_CAMERA_RAY: &str = "IsCameraRay";
    pub const IS_DIFFUSE_RAY: &str = "IsDiffuseRay";
    pub const IS_GLOSSY_RAY: &str = "IsGlossyRay";
    pub const IS_REFLECTION_RAY: &str = "IsReflectionRay";
    pub const IS_SHADOW_RAY: &str = "IsShadowRay";
    pub const IS_SINGULAR_RAY: &str = "IsSingularRay";
    pub const IS_TRANSMISSION_RAY: &str = "IsTransmissionRay";
    pub const NORMAL: &str = "Normal";
    pub const STRENGTH: &str = "Strength";
    pub const SURFACE: &str = "Surface";
    pub const UV: &str = "UV";
    pub const VALUE: &str = "Value";
    pub const VALUE1: &str = "Value1";
    pub const VALUE2: &str = "Value2";
    pub const VECTOR: &str = "Vector";
    pub const WINDOW: &str = "Window";
}

use self::socket::*;

/// Arithmetic performed by a math node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MathOp {
    /// `a + b`
    Add,
    /// `a - b`
    Subtract,
    /// `a * b`
    Multiply,
    /// `max(a, b)`
    Maximum,
    /// `min(a, b)`
    Minimum,
}

/// Colour blend performed by a mix node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlendMode {
    /// Linear interpolation from `Color1` to `Color2` by `Fac`.
    Blend,
    /// `Color1 + Fac * Color2`
    Add,
    /// `Color1 * lerp(1, Color2, Fac)`
    Multiply,
}

/// One stop of a colour ramp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    /// Position in `0..=1`.
    pub position: f32,
    /// Colour at that position.
    pub color: LinearRgba,
}

/// Node types and their per-type parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Texture coordinate generator.
    TextureCoordinate,
    /// Environment image lookup.
    EnvironmentTexture {
        /// Image identity; `None` samples black.
        image: Option<String>,
        /// Projection used for the lookup.
        projection: EnvironmentProjection,
        /// Image placement on the projection.
        transform: EnvironmentTransform,
    },
    /// Colour mix.
    Mix {
        /// Blend operation.
        blend: BlendMode,
        /// Clamp the result to `0..=1`.
        clamp: bool,
    },
    /// Scalar arithmetic.
    Math {
        /// Operation.
        op: MathOp,
        /// Clamp the result to `0..=1`.
        clamp: bool,
    },
    /// Linear gradient.
    GradientTexture {
        /// Rotation of the lookup vector, radians per axis.
        rotation: Vec3,
    },
    /// Maps a factor onto a colour gradient.
    ColorRamp {
        /// Stops, sorted by position.
        stops: Vec<ColorStop>,
    },
    /// Ray classification signals.
    LightPath,
    /// Background closure.
    Background,
    /// Emission closure.
    Emission,
    /// Graph output.
    Output,
}

impl NodeKind {
    /// Input socket names of this node type.
    pub fn inputs(&self) -> &'static [&'static str] {
        match self {
            NodeKind::TextureCoordinate | NodeKind::LightPath => &[],
            NodeKind::EnvironmentTexture { .. } | NodeKind::GradientTexture { .. } => &[VECTOR],
            NodeKind::Mix { .. } => &[FAC, COLOR1, COLOR2],
            NodeKind::Math { .. } => &[VALUE1, VALUE2],
            NodeKind::ColorRamp { .. } => &[FAC],
            NodeKind::Background | NodeKind::Emission => &[COLOR, STRENGTH],
            NodeKind::Output => &[SURFACE],
        }
    }

    /// Output socket names of this node type.
    pub fn outputs(&self) -> &'static [&'static str] {
        match self {
            NodeKind::TextureCoordinate => &[GENERATED, NORMAL, UV, WINDOW],
            NodeKind::EnvironmentTexture { .. } | NodeKind::ColorRamp { .. } => &[COLOR, ALPHA],
            NodeKind::Mix { .. } => &[COLOR],
            NodeKind::Math { .. } => &[VALUE],
            NodeKind::GradientTexture { .. } => &[COLOR, FAC],
            NodeKind::LightPath => &[
                IS_CAMERA_RAY,
                IS_SHADOW_RAY,
                IS_DIFFUSE_RAY,
                IS_GLOSSY_RAY,
                IS_SINGULAR_RAY,
                IS_REFLECTION_RAY,
                IS_TRANSMISSION_RAY,
            ],
            NodeKind::Background => &[BACKGROUND],
            NodeKind::Emission => &[EMISSION],
            NodeKind::Output => &[],
        }
    }

    /// A short type name, for logs and renderer lowering.
    pub fn type_name(&self) -> &'static str {
        match self {
            NodeKind::TextureCoordinate => "texture_coordinate",
            NodeKind::EnvironmentTexture { .. } => "environment_texture",
            NodeKind::Mix { .. } => "mix",
            NodeKind::Math { .. } => "math",
            NodeKind::GradientTexture { .. } => "gradient_texture",
            NodeKind::ColorRamp { .. } => "color_ramp",
            NodeKind::LightPath => "light_path",
            NodeKind::Background => "background",
            NodeKind::Emission => "emission",
            NodeKind::Output => "output",
        }
    }
}

/// A constant value on an unconnected input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SocketValue {
    /// A scalar.
    Float(f32),
    /// A colour.
    Color(LinearRgba),
    /// A vector.
    Vector(Vec3),
}

impl From<f32> for SocketValue {
    fn from(v: f32) -> Self {
        SocketValue::Float(v)
    }
}

impl From<LinearRgba> for SocketValue {
    fn from(v: LinearRgba) -> Self {
        SocketValue::Color(v)
    }
}

impl From<Vec3> for SocketValue {
    fn from(v: Vec3) -> Self {
        SocketValue::Vector(v)
    }
}

/// A node: a unique name, a type, and constant input values.
#[derive(Debug, Clone, PartialEq)]
pub struct ShaderNode {
    /// Unique name within the graph.
    pub name: String,
    /// Node type.
    pub kind: NodeKind,
    /// Constant input values, by socket.
    pub values: Vec<(&'static str, SocketValue)>,
}

impl ShaderNode {
    /// Creates a node with no constant values.
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            values: Vec::new(),
        }
    }

    /// Sets a constant input value, replacing an earlier one.
    pub fn with(mut self, socket: &'static str, value: impl Into<SocketValue>) -> Self {
        let value = value.into();
        match self.values.iter_mut().find(|(s, _)| *s == socket) {
            Some(slot) => slot.1 = value,
            None => self.values.push((socket, value)),
        }
        self
    }

    /// The constant value set on `socket`, if any.
    pub fn value(&self, socket: &str) -> Option<SocketValue> {
        self.values
            .iter()
            .find(|(s, _)| *s == socket)
            .map(|(_, v)| *v)
    }
}

/// A directed link from an output socket to an input socket.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShaderEdge {
    /// Source node name.
    pub from: String,
    /// Source output socket.
    pub output: &'static str,
    /// Destination node name.
    pub to: String,
    /// Destination input socket.
    pub input: &'static str,
}

/// Collects nodes and edges, then validates them into a [`ShaderGraph`].
#[derive(Debug, Clone, Default)]
pub struct ShaderGraphBuilder {
    name: String,
    nodes: Vec<ShaderNode>,
    edges: Vec<ShaderEdge>,
}

impl ShaderGraphBuilder {
    /// Starts an empty graph.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Adds a node.
    pub fn add(&mut self, node: ShaderNode) -> &mut Self {
        self.nodes.push(node);
        self
    }

    /// Links `from.output` into `to.input`.
    pub fn connect(
        &mut self,
        from: &str,
        output: &'static str,
        to: &str,
        input: &'static str,
    ) -> &mut Self {
        self.edges.push(ShaderEdge {
            from: from.to_string(),
            output,
            to: to.to_string(),
            input,
        });
        self
    }

    /// Validates the collected nodes and edges.
    ///
    /// # Errors
    ///
    /// Returns the first [`GraphError`] found.
    pub fn build(self) -> Result<ShaderGraph, GraphError> {
        let ShaderGraphBuilder { name, nodes, edges } = self;

        let mut index = HashMap::with_capacity(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            if index.insert(node.name.clone(), i).is_some() {
                return Err(GraphError::DuplicateNode(node.name.clone()));
            }
            if let Some((socket, _)) = node
                .values
                .iter()
                .find(|(s, _)| !node.kind.inputs().contains(s))
            {
                return Err(GraphError::UnknownSocket {
                    node: node.name.clone(),
                    socket: socket.to_string(),
                    direction: SocketDirection::Input,
                });
            }
        }

        let mut outputs = nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.kind == NodeKind::Output)
            .map(|(i, _)| i);
        let output = outputs.next().ok_or(GraphError::MissingOutput)?;
        if outputs.next().is_some() {
            return Err(GraphError::MultipleOutputs);
        }

        let mut fed: HashSet<(usize, &'static str)> = HashSet::new();
        let mut links = Vec::with_capacity(edges.len());
        for edge in &edges {
            let from = *index
                .get(&edge.from)
                .ok_or_else(|| GraphError::UnknownNode(edge.from.clone()))?;
            let to = *index
                .get(&edge.to)
                .ok_or_else(|| GraphError::UnknownNode(edge.to.clone()))?;
            if !nodes[from].kind.outputs().contains(&edge.output) {
                return Err(GraphError::UnknownSocket {
                    node: edge.from.clone(),
                    socket: edge.output.to_string(),
                    direction: SocketDirection::Output,
                });
            }
            if !nodes[to].kind.inputs().contains(&edge.input) {
                return Err(GraphError::UnknownSocket {
                    node: edge.to.clone(),
                    socket: edge.input.to_string(),
                    direction: SocketDirection::Input,
                });
            }
            if !fed.insert((to, edge.input)) {
                return Err(GraphError::InputAlreadyConnected {
                    node: edge.to.clone(),
                    socket: edge.input.to_string(),
                });
            }
            links.push((from, to));
        }

        if !fed.contains(&(output, SURFACE)) {
            return Err(GraphError::OutputNotConnected);
        }

        let order = topological_order(nodes.len(), &links).map_err(|_| GraphError::Cycle)?;

        log::trace!(
            "Validated shader graph '{}' ({} nodes, {} edges)",
            name,
            nodes.len(),
            edges.len()
        );

        Ok(ShaderGraph {
            name,
            nodes,
            edges,
            order,
            index,
        })
    }
}

/// A validated shader graph, ready to be lowered by the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct ShaderGraph {
    name: String,
    nodes: Vec<ShaderNode>,
    edges: Vec<ShaderEdge>,
    order: Vec<usize>,
    index: HashMap<String, usize>,
}

impl ShaderGraph {
    /// Graph name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All nodes in insertion order.
    pub fn nodes(&self) -> &[ShaderNode] {
        &self.nodes
    }

    /// All edges.
    pub fn edges(&self) -> &[ShaderEdge] {
        &self.edges
    }

    /// Looks a node up by name.
    pub fn node(&self, name: &str) -> Option<&ShaderNode> {
        self.index.get(name).map(|&i| &self.nodes[i])
    }

    /// The edge feeding `node.input`, if connected.
    pub fn link_into(&self, node: &str, input: &str) -> Option<&ShaderEdge> {
        self.edges
            .iter()
            .find(|e| e.to == node && e.input == input)
    }

    /// True when `from.output` feeds `to.input`.
    pub fn is_connected(&self, from: &str, output: &str, to: &str, input: &str) -> bool {
        self.link_into(to, input)
            .is_some_and(|e| e.from == from && e.output == output)
    }

    /// Nodes in dependency order: every node comes after the nodes feeding it.
    pub fn ordered_nodes(&self) -> impl Iterator<Item = &ShaderNode> + '_ {
        self.order.iter().map(move |&i| &self.nodes[i])
    }
}
