use serde::Serialize;
use std::collections::BTreeMap;

use crate::model::{EntityModel, Multiplicity};

/// "`from`'s declaration needs `to`'s type", derived from one relation field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelationEdge {
    pub from: String,
    pub to: String,
    pub field: String,
    pub multiplicity: Multiplicity,
}

/// Directed relation graph over the known entity names.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RelationGraph {
    /// Known entity names, lexically sorted.
    names: Vec<String>,
    /// One edge per relation field with a known target, grouped by `from` in
    /// name order and in field order within an entity.
    edges: Vec<RelationEdge>,
    #[serde(skip)]
    adjacency: BTreeMap<String, Vec<String>>,
}

impl RelationGraph {
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn edges(&self) -> &[RelationEdge] {
        &self.edges
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names
            .binary_search_by(|n| n.as_str().cmp(name))
            .is_ok()
    }

    /// Distinct entities `name` depends on, in the order their first relation
    /// field appears. Includes `name` itself for self-relations.
    pub fn dependencies(&self, name: &str) -> &[String] {
        self.adjacency.get(name).map_or(&[], Vec::as_slice)
    }

    /// Relation edges leaving `name`, one per field.
    pub fn outgoing<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a RelationEdge> + 'a {
        self.edges.iter().filter(move |e| e.from == name)
    }
}

/// Derive the relation graph of `model`.
///
/// Every relation field whose target is a known entity yields one edge.
/// Fields naming an unknown target yield none; the projector later treats them
/// as opaque passthroughs.
pub fn build_graph(model: &EntityModel) -> RelationGraph {
    let keys = model.keys();
    let names: Vec<String> = model.names().into_iter().map(str::to_string).collect();

    let mut edges = Vec::new();
    let mut adjacency: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for name in &names {
        let Some(entity) = model.get(name) else {
            continue;
        };
        let deps = adjacency.entry(name.clone()).or_default();
        for (field, target, multiplicity) in entity.relations() {
            if !keys.is_known(target) {
                continue;
            }
            edges.push(RelationEdge {
                from: name.clone(),
                to: target.to_string(),
                field: field.name.clone(),
                multiplicity,
            });
            if !deps.iter().any(|d| d == target) {
                deps.push(target.to_string());
            }
        }
    }

    RelationGraph {
        names,
        edges,
        adjacency,
    }
}
