use crate::emitter::{write_line, EmitContext, EmitResult, Emittable};
use std::io::Write;
use vfslice_core::{Edge, Node, ValueFlowGraph};

/// Renders a graph in the `.vfg` textual format, the same format the
/// parser reads. Functions, nodes, and edges keep their graph order, so
/// output is stable for a given graph.
pub struct GraphEmitter<'a> {
    graph: &'a ValueFlowGraph,
}

impl<'a> GraphEmitter<'a> {
    pub fn new(graph: &'a ValueFlowGraph) -> Self {
        Self { graph }
    }

    fn node_line(&self, node: &Node) -> String {
        let function = self
            .graph
            .function_name(node.function)
            .unwrap_or("unknown");
        match &node.name {
            Some(label) => format!(
                "node %{} {} @{} \"{}\"",
                node.id.0,
                node.kind.keyword(),
                function,
                label
            ),
            None => format!("node %{} {} @{}", node.id.0, node.kind.keyword(), function),
        }
    }

    fn edge_line(&self, edge: &Edge) -> String {
        match edge.kind.call_site() {
            Some(site) => format!(
                "edge %{} -> %{} {} cs({})",
                edge.src.0,
                edge.dst.0,
                edge.kind.keyword(),
                site.0
            ),
            None => format!("edge %{} -> %{} {}", edge.src.0, edge.dst.0, edge.kind.keyword()),
        }
    }
}

impl Emittable for GraphEmitter<'_> {
    fn emit<W: Write>(&self, writer: &mut W, context: &mut EmitContext) -> EmitResult {
        write_line(writer, context, &format!("graph \"{}\"", self.graph.name()))?;
        writeln!(writer)?;

        for (_, name) in self.graph.functions() {
            write_line(writer, context, &format!("fun @{}", name))?;
        }
        writeln!(writer)?;

        for node in self.graph.nodes() {
            write_line(writer, context, &self.node_line(node))?;
        }
        writeln!(writer)?;

        for edge in self.graph.edges() {
            write_line(writer, context, &self.edge_line(edge))?;
        }
        Ok(())
    }
}
