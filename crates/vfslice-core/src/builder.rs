use crate::edge::{Edge, EdgeKind};
use crate::graph::ValueFlowGraph;
use crate::node::{FunctionId, Node, NodeId, NodeKind};
use crate::{Result, VfgError};
use indexmap::IndexMap;

/// Incrementally assembles a [`ValueFlowGraph`].
///
/// Ids are allocated by the builder; insertion checks that owning functions
/// and edge endpoints exist, so every edge in the finished graph resolves.
/// Role/kind consistency (return edges into exit nodes, call edges into
/// formal inputs) is deliberately not enforced here — the engine detects
/// those violations during traversal, where a malformed producer graph
/// must surface as an error instead of a wrong answer.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    name: String,
    functions: IndexMap<FunctionId, String>,
    nodes: IndexMap<NodeId, Node>,
    edges: Vec<Edge>,
    next_function: u32,
    next_node: u32,
}

impl GraphBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn function(&mut self, name: impl Into<String>) -> FunctionId {
        let id = FunctionId(self.next_function);
        self.next_function += 1;
        self.functions.insert(id, name.into());
        id
    }

    pub fn node(&mut self, kind: NodeKind, function: FunctionId) -> Result<NodeId> {
        if !self.functions.contains_key(&function) {
            return Err(VfgError::UnknownFunction(function));
        }
        let id = NodeId(self.next_node);
        self.next_node += 1;
        self.nodes.insert(id, Node::new(id, kind, function));
        Ok(id)
    }

    pub fn named_node(
        &mut self,
        kind: NodeKind,
        function: FunctionId,
        name: impl Into<String>,
    ) -> Result<NodeId> {
        let id = self.node(kind, function)?;
        self.nodes[&id].name = Some(name.into());
        Ok(id)
    }

    pub fn edge(&mut self, src: NodeId, dst: NodeId, kind: EdgeKind) -> Result<()> {
        if !self.nodes.contains_key(&src) {
            return Err(VfgError::UnknownNode(src));
        }
        if !self.nodes.contains_key(&dst) {
            return Err(VfgError::UnknownNode(dst));
        }
        self.edges.push(Edge::new(src, dst, kind));
        Ok(())
    }

    pub fn build(self) -> ValueFlowGraph {
        ValueFlowGraph::new(self.name, self.functions, self.nodes, self.edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_requires_known_function() {
        let mut builder = GraphBuilder::new("bad");
        let err = builder.node(NodeKind::Normal, FunctionId(42)).unwrap_err();
        assert!(matches!(err, VfgError::UnknownFunction(FunctionId(42))));
    }

    #[test]
    fn test_edge_requires_known_endpoints() {
        let mut builder = GraphBuilder::new("bad");
        let main = builder.function("main");
        let a = builder.node(NodeKind::Normal, main).unwrap();
        let err = builder.edge(a, NodeId(99), EdgeKind::Direct).unwrap_err();
        assert!(matches!(err, VfgError::UnknownNode(NodeId(99))));
    }

    #[test]
    fn test_named_node_keeps_label() {
        let mut builder = GraphBuilder::new("labels");
        let main = builder.function("main");
        let a = builder
            .named_node(NodeKind::ActualIn, main, "arg x")
            .unwrap();
        let graph = builder.build();
        assert_eq!(graph.node(a).unwrap().name.as_deref(), Some("arg x"));
    }
}
