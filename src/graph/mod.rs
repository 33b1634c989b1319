//! # Graph Module
//!
//! Relation graph analysis over an [`EntityModel`](crate::model::EntityModel):
//!
//! - [`build_graph`] derives one [`RelationEdge`] per relation field with a
//!   known target
//! - [`find_cycles`] and [`break_cycles`] select the [`BrokenEdgeSet`] whose
//!   removal leaves the graph acyclic
//! - [`dependency_order`] yields the declaration emission order
//!
//! The order is computed first and the cycle search is rooted in it. Both
//! break ties by entity name, so the result depends only on the entities and
//! never on the order their units arrived in.

mod build;
mod cycles;
mod order;

pub use build::{build_graph, RelationEdge, RelationGraph};
pub use cycles::{break_cycles, find_cycles, residual_is_acyclic, BrokenEdgeSet, Cycle};
pub use order::dependency_order;

use serde::Serialize;

use crate::model::EntityModel;

/// Everything the graph stages derive from one model.
#[derive(Debug, Clone, Serialize)]
pub struct GraphAnalysis {
    pub graph: RelationGraph,
    pub cycles: Vec<Cycle>,
    pub broken: BrokenEdgeSet,
    pub order: Vec<String>,
}

/// Run graph building, cycle breaking and ordering over `model`.
pub fn analyze(model: &EntityModel) -> GraphAnalysis {
    let graph = build_graph(model);
    let order = dependency_order(&graph);
    let cycles = find_cycles(&graph, &order);
    let broken = break_cycles(&cycles);
    GraphAnalysis {
        graph,
        cycles,
        broken,
        order,
    }
}
