use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use tracing::debug;

use super::build::RelationGraph;

/// A circular dependency between entities.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Cycle {
    /// Entities on the cycle, starting at the first one reached by the
    /// search. The last entity relates back to the first.
    pub path: Vec<String>,
}

impl Cycle {
    pub fn len(&self) -> usize {
        self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Edges along the cycle as `(from, to)` pairs, closing edge last.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        let n = self.path.len();
        (0..n).map(move |i| (self.path[i].as_str(), self.path[(i + 1) % n].as_str()))
    }

    /// The edge from the last entity back to the start.
    pub fn closing_edge(&self) -> Option<(&str, &str)> {
        Some((self.path.last()?.as_str(), self.path.first()?.as_str()))
    }
}

/// Entity pairs whose relation is projected as a primary-key stub.
///
/// A broken `(from, to)` pair applies to every field on `from` that relates
/// to `to`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BrokenEdgeSet {
    edges: BTreeMap<String, BTreeSet<String>>,
}

impl BrokenEdgeSet {
    pub fn insert(&mut self, from: &str, to: &str) -> bool {
        self.edges
            .entry(from.to_string())
            .or_default()
            .insert(to.to_string())
    }

    pub fn is_broken(&self, from: &str, to: &str) -> bool {
        self.edges.get(from).is_some_and(|targets| targets.contains(to))
    }

    /// Broken pairs in lexical order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.edges
            .iter()
            .flat_map(|(from, tos)| tos.iter().map(move |to| (from.as_str(), to.as_str())))
    }

    pub fn len(&self) -> usize {
        self.edges.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Find cycles with a depth-first search started from each of `roots` that
/// is still unvisited, then from any remaining entity in name order.
///
/// `roots` is normally the [`dependency_order`](super::dependency_order) of
/// the graph. Each time a neighbour already on the search stack is reached,
/// the stack from that neighbour's position onwards is recorded as a cycle.
/// A self-relation is a cycle of length one.
pub fn find_cycles(graph: &RelationGraph, roots: &[String]) -> Vec<Cycle> {
    let mut cycles = Vec::new();
    let mut seen = HashSet::new();
    let mut visited: HashSet<&str> = HashSet::new();
    let mut on_stack: Vec<&str> = Vec::new();
    let mut on_stack_set: HashSet<&str> = HashSet::new();
    // (entity, index of its next dependency to follow)
    let mut frames: Vec<(&str, usize)> = Vec::new();

    let starts = roots
        .iter()
        .chain(graph.names())
        .map(String::as_str)
        .filter(|name| graph.contains(name));
    for root in starts {
        if !visited.insert(root) {
            continue;
        }
        on_stack.push(root);
        on_stack_set.insert(root);
        frames.push((root, 0));

        while let Some(frame) = frames.last_mut() {
            let (current, next) = *frame;
            let Some(dep) = graph.dependencies(current).get(next) else {
                frames.pop();
                on_stack.pop();
                on_stack_set.remove(current);
                continue;
            };
            frame.1 += 1;

            let dep = dep.as_str();
            if on_stack_set.contains(dep) {
                let start = on_stack.iter().position(|n| *n == dep).unwrap_or(0);
                let cycle = Cycle {
                    path: on_stack[start..].iter().map(|n| (*n).to_string()).collect(),
                };
                if seen.insert(cycle.clone()) {
                    cycles.push(cycle);
                }
            } else if visited.insert(dep) {
                on_stack.push(dep);
                on_stack_set.insert(dep);
                frames.push((dep, 0));
            }
        }
    }

    debug!(count = cycles.len(), "cycle search finished");
    cycles
}

/// Choose the edges to break so that no cycle survives.
///
/// Longer cycles are handled first, ties keep search order. A cycle that
/// already carries a broken edge is skipped; otherwise its closing edge is
/// broken.
pub fn break_cycles(cycles: &[Cycle]) -> BrokenEdgeSet {
    let mut ordered: Vec<&Cycle> = cycles.iter().collect();
    ordered.sort_by(|a, b| b.len().cmp(&a.len()));

    let mut broken = BrokenEdgeSet::default();
    for cycle in ordered {
        if cycle.edges().any(|(from, to)| broken.is_broken(from, to)) {
            continue;
        }
        if let Some((from, to)) = cycle.closing_edge() {
            debug!(from, to, "breaking relation");
            broken.insert(from, to);
        }
    }
    broken
}

/// Whether the relation graph without `broken` pairs has no cycle.
pub fn residual_is_acyclic(graph: &RelationGraph, broken: &BrokenEdgeSet) -> bool {
    let mut in_degree: BTreeMap<&str, usize> =
        graph.names().iter().map(|n| (n.as_str(), 0)).collect();
    let mut dependents: BTreeMap<&str, Vec<&str>> = BTreeMap::new();

    for name in graph.names() {
        for dep in graph.dependencies(name) {
            if broken.is_broken(name, dep) {
                continue;
            }
            if let Some(degree) = in_degree.get_mut(name.as_str()) {
                *degree += 1;
            }
            dependents.entry(dep.as_str()).or_default().push(name.as_str());
        }
    }

    let mut ready: Vec<&str> = in_degree
        .iter()
        .filter(|(_, d)| **d == 0)
        .map(|(n, _)| *n)
        .collect();
    let mut processed = 0;
    while let Some(node) = ready.pop() {
        processed += 1;
        for dependent in dependents.get(node).into_iter().flatten() {
            if let Some(degree) = in_degree.get_mut(*dependent) {
                *degree -= 1;
                if *degree == 0 {
                    ready.push(*dependent);
                }
            }
        }
    }
    processed == graph.names().len()
}
