use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

use super::build::RelationGraph;

/// Emission order for the declarations: dependencies before dependents.
///
/// Kahn's algorithm over the full relation graph, broken edges included. The
/// in-degree of an entity is the number of distinct other entities it depends
/// on; among entities ready at the same time the lexically smallest goes
/// first. Entities left over because of cycles are appended sorted by
/// remaining in-degree, then by number of outgoing relation edges, then by
/// name.
pub fn dependency_order(graph: &RelationGraph) -> Vec<String> {
    let mut in_degree: BTreeMap<&str, usize> = BTreeMap::new();
    let mut dependents: BTreeMap<&str, Vec<&str>> = BTreeMap::new();

    for name in graph.names() {
        let deps: Vec<&str> = graph
            .dependencies(name)
            .iter()
            .map(String::as_str)
            .filter(|dep| *dep != name.as_str())
            .collect();
        in_degree.insert(name.as_str(), deps.len());
        for dep in deps {
            dependents.entry(dep).or_default().push(name.as_str());
        }
    }

    let mut ready: BTreeSet<&str> = in_degree
        .iter()
        .filter(|(_, degree)| **degree == 0)
        .map(|(name, _)| *name)
        .collect();
    let mut order: Vec<String> = Vec::with_capacity(graph.names().len());

    while let Some(node) = ready.pop_first() {
        order.push(node.to_string());
        in_degree.remove(node);
        for dependent in dependents.get(node).into_iter().flatten() {
            if let Some(degree) = in_degree.get_mut(*dependent) {
                *degree -= 1;
                if *degree == 0 {
                    ready.insert(*dependent);
                }
            }
        }
    }

    if !in_degree.is_empty() {
        let mut residual: Vec<(&str, usize, usize)> = in_degree
            .iter()
            .map(|(name, degree)| (*name, *degree, graph.outgoing(name).count()))
            .collect();
        residual.sort_by(|a, b| (a.1, a.2, a.0).cmp(&(b.1, b.2, b.0)));
        debug!(
            count = residual.len(),
            "ordering entities left on cycles"
        );
        order.extend(residual.into_iter().map(|(name, _, _)| name.to_string()));
    }

    order
}
