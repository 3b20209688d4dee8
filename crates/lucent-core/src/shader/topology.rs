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

//! Kahn's algorithm over dense node indices.

use std::collections::VecDeque;

/// An error indicating that a cycle was detected in the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleError;

/// Orders `node_count` nodes so that every link `(from, to)` has `from`
/// before `to`.
///
/// Roots are visited in index order, so the result is deterministic for a
/// given input.
///
/// # Arguments
///
/// * `node_count`: number of nodes, indexed `0..node_count`.
/// * `links`: directed `(from, to)` pairs. Out of range indices are ignored.
///
/// # Returns
///
/// * `Ok(Vec<usize>)`: the node indices in dependency order.
/// * `Err(CycleError)`: if the links form a cycle.
pub fn topological_order(
    node_count: usize,
    links: &[(usize, usize)],
) -> Result<Vec<usize>, CycleError> {
    let mut in_degree = vec![0usize; node_count];
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); node_count];

    for &(from, to) in links {
        if from >= node_count || to >= node_count {
            continue;
        }
        children[from].push(to);
        in_degree[to] += 1;
    }

    let mut ready: VecDeque<usize> = (0..node_count).filter(|&i| in_degree[i] == 0).collect();
    let mut order = Vec::with_capacity(node_count);

    while let Some(node) = ready.pop_front() {
        order.push(node);
        for &child in &children[node] {
            in_degree[child] -= 1;
            if in_degree[child] == 0 {
                ready.push_back(child);
            }
        }
    }

    if order.len() == node_count {
        Ok(order)
    } else {
        Err(CycleError)
    }
}
