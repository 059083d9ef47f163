/*! Value-flow graph model and demand-driven backward reachability.
 *
 * A value-flow graph records how values propagate through a program's
 * operations and across function-call boundaries. This crate provides the
 * read-only graph model, a builder for materializing graphs handed over by
 * an external analysis pipeline, and the reachability engine that resolves
 * each call-site exit value to the caller inputs that can flow into it.
 */

pub mod analysis;
pub mod builder;
pub mod edge;
pub mod graph;
pub mod node;
pub mod persist;

pub use analysis::{EngineStatistics, ReachabilityEngine};
pub use builder::GraphBuilder;
pub use edge::{CallSiteId, Edge, EdgeKind};
pub use graph::ValueFlowGraph;
pub use node::{FunctionId, Node, NodeId, NodeKind};
pub use persist::{GraphData, SolveReport};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VfgError {
    #[error("node {0} is not an actual-out/actual-ret node")]
    NotACallExit(NodeId),
    #[error("return edges into {node} disagree on call site: {first} vs {second}")]
    InconsistentCallSites {
        node: NodeId,
        first: CallSiteId,
        second: CallSiteId,
    },
    #[error("edge {src} -> {dst} has kind {kind}, expected a {expected} edge")]
    UnexpectedEdgeKind {
        src: NodeId,
        dst: NodeId,
        kind: EdgeKind,
        expected: &'static str,
    },
    #[error("query for {0} re-entered itself through a recursive call structure")]
    RecursiveQuery(NodeId),
    #[error("unknown node: {0}")]
    UnknownNode(NodeId),
    #[error("unknown function: {0}")]
    UnknownFunction(FunctionId),
    #[error("duplicate node id: {0}")]
    DuplicateNode(NodeId),
    #[error("duplicate function id: {0}")]
    DuplicateFunction(FunctionId),
}

pub type Result<T> = std::result::Result<T, VfgError>;

#[cfg(test)]
mod tests;
