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

//! Errors raised while building or evaluating a shader graph.

use std::fmt;

/// Which side of a node a socket lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocketDirection {
    /// An input socket.
    Input,
    /// An output socket.
    Output,
}

impl fmt::Display for SocketDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SocketDirection::Input => write!(f, "input"),
            SocketDirection::Output => write!(f, "output"),
        }
    }
}

/// A shader graph failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// Two nodes share a name.
    DuplicateNode(String),
    /// An edge names a node that does not exist.
    UnknownNode(String),
    /// A socket does not exist on the node's type.
    UnknownSocket {
        /// The node.
        node: String,
        /// The socket name.
        socket: String,
        /// Input or output.
        direction: SocketDirection,
    },
    /// An input socket has more than one incoming edge.
    InputAlreadyConnected {
        /// The node.
        node: String,
        /// The input socket.
        socket: String,
    },
    /// The graph contains a cycle.
    Cycle,
    /// There is no output node.
    MissingOutput,
    /// There is more than one output node.
    MultipleOutputs,
    /// The output node's surface input is not connected.
    OutputNotConnected,
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphError::DuplicateNode(name) => write!(f, "Duplicate shader node '{name}'"),
            GraphError::UnknownNode(name) => write!(f, "Edge references unknown node '{name}'"),
            GraphError::UnknownSocket {
                node,
                socket,
                direction,
            } => write!(f, "Node '{node}' has no {direction} socket '{socket}'"),
            GraphError::InputAlreadyConnected { node, socket } => {
                write!(f, "Input '{socket}' of node '{node}' is connected twice")
            }
            GraphError::Cycle => write!(f, "Shader graph contains a cycle"),
            GraphError::MissingOutput => write!(f, "Shader graph has no output node"),
            GraphError::MultipleOutputs => write!(f, "Shader graph has more than one output node"),
            GraphError::OutputNotConnected => {
                write!(f, "Shader graph output surface is not connected")
            }
        }
    }
}

impl std::error::Error for GraphError {}
