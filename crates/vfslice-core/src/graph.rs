use crate::edge::Edge;
use crate::node::{FunctionId, Node, NodeId};
use indexmap::IndexMap;
use std::collections::HashMap;

/// A finished value-flow graph, read-only once built.
///
/// Produced by [`crate::GraphBuilder`] (directly, or through the JSON and
/// `.vfg` loaders); the analysis side only ever queries it.
#[derive(Debug, Clone)]
pub struct ValueFlowGraph {
    name: String,
    functions: IndexMap<FunctionId, String>,
    nodes: IndexMap<NodeId, Node>,
    edges: Vec<Edge>,
    in_edges: HashMap<NodeId, Vec<usize>>,
    out_edges: HashMap<NodeId, Vec<usize>>,
}

impl ValueFlowGraph {
    pub(crate) fn new(
        name: String,
        functions: IndexMap<FunctionId, String>,
        nodes: IndexMap<NodeId, Node>,
        edges: Vec<Edge>,
    ) -> Self {
        let mut in_edges: HashMap<NodeId, Vec<usize>> = HashMap::new();
        let mut out_edges: HashMap<NodeId, Vec<usize>> = HashMap::new();

        for (idx, edge) in edges.iter().enumerate() {
            out_edges.entry(edge.src).or_default().push(idx);
            in_edges.entry(edge.dst).or_default().push(idx);
        }

        Self {
            name,
            functions,
            nodes,
            edges,
            in_edges,
            out_edges,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Every node observed at a call site after the call returns.
    pub fn exit_nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values().filter(|n| n.kind.is_call_exit())
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn in_edges(&self, id: NodeId) -> impl Iterator<Item = &Edge> + '_ {
        self.in_edges
            .get(&id)
            .into_iter()
            .flatten()
            .map(move |&idx| &self.edges[idx])
    }

    pub fn out_edges(&self, id: NodeId) -> impl Iterator<Item = &Edge> + '_ {
        self.out_edges
            .get(&id)
            .into_iter()
            .flatten()
            .map(move |&idx| &self.edges[idx])
    }

    pub fn function_name(&self, id: FunctionId) -> Option<&str> {
        self.functions.get(&id).map(String::as_str)
    }

    pub fn functions(&self) -> impl Iterator<Item = (FunctionId, &str)> {
        self.functions.iter().map(|(id, name)| (*id, name.as_str()))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn function_count(&self) -> usize {
        self.functions.len()
    }
}

#[cfg(test)]
mod tests {
    use crate::builder::GraphBuilder;
    use crate::edge::EdgeKind;
    use crate::node::NodeKind;

    #[test]
    fn test_adjacency_lookup() {
        let mut builder = GraphBuilder::new("adjacency");
        let main = builder.function("main");
        let a = builder.node(NodeKind::Normal, main).unwrap();
        let b = builder.node(NodeKind::Normal, main).unwrap();
        let c = builder.node(NodeKind::Normal, main).unwrap();
        builder.edge(a, b, EdgeKind::Direct).unwrap();
        builder.edge(c, b, EdgeKind::Direct).unwrap();

        let graph = builder.build();

        let preds: Vec<_> = graph.in_edges(b).map(|e| e.src).collect();
        assert_eq!(preds, vec![a, c]);
        assert_eq!(graph.out_edges(a).count(), 1);
        assert_eq!(graph.in_edges(a).count(), 0);
    }

    #[test]
    fn test_exit_node_iteration() {
        let mut builder = GraphBuilder::new("exits");
        let main = builder.function("main");
        builder.node(NodeKind::Normal, main).unwrap();
        let ret = builder.node(NodeKind::ActualRet, main).unwrap();
        let out = builder.node(NodeKind::ActualOut, main).unwrap();

        let graph = builder.build();
        let exits: Vec<_> = graph.exit_nodes().map(|n| n.id).collect();
        assert_eq!(exits, vec![ret, out]);
    }
}
