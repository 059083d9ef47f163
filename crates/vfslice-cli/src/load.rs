use anyhow::{bail, Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use vfslice_core::{persist, CallSiteId, FunctionId, GraphBuilder, NodeId, ValueFlowGraph};
use vfslice_parser::{parse_document, EdgeDecl, GraphDoc};

/// Materializes a graph from either interchange format, keyed on file
/// extension. Both paths funnel through the builder, so structural
/// validation does not depend on where the graph came from.
pub fn load_graph(path: &Path) -> Result<ValueFlowGraph> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("vfg") => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let doc = parse_document(&text)
                .with_context(|| format!("failed to parse {}", path.display()))?;
            graph_from_doc(doc, default_name(path))
        }
        Some("json") => persist::load_graph(path)
            .with_context(|| format!("failed to load {}", path.display())),
        _ => bail!(
            "unsupported input extension (expected .vfg or .json): {}",
            path.display()
        ),
    }
}

fn default_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("graph")
        .to_string()
}

pub fn graph_from_doc(doc: GraphDoc, fallback_name: String) -> Result<ValueFlowGraph> {
    let mut builder = GraphBuilder::new(doc.name.unwrap_or(fallback_name));

    let mut functions: HashMap<String, FunctionId> = HashMap::new();
    for name in doc.functions {
        if functions.contains_key(&name) {
            bail!("duplicate function: @{}", name);
        }
        let id = builder.function(name.clone());
        functions.insert(name, id);
    }

    let mut nodes: HashMap<u32, NodeId> = HashMap::new();
    for node in doc.nodes {
        if nodes.contains_key(&node.id) {
            bail!("duplicate node: %{}", node.id);
        }
        let function = *functions
            .get(&node.function)
            .with_context(|| format!("node %{}: unknown function @{}", node.id, node.function))?;
        let kind = node_kind(node.kind);
        let id = match node.label {
            Some(label) => builder.named_node(kind, function, label)?,
            None => builder.node(kind, function)?,
        };
        nodes.insert(node.id, id);
    }

    for edge in &doc.edges {
        let src = *nodes
            .get(&edge.src)
            .with_context(|| format!("edge source %{} is not declared", edge.src))?;
        let dst = *nodes
            .get(&edge.dst)
            .with_context(|| format!("edge destination %{} is not declared", edge.dst))?;
        builder.edge(src, dst, edge_kind(edge)?)?;
    }

    Ok(builder.build())
}

fn node_kind(kind: vfslice_parser::NodeKind) -> vfslice_core::NodeKind {
    use vfslice_parser::NodeKind as Decl;
    match kind {
        Decl::Normal => vfslice_core::NodeKind::Normal,
        Decl::FormalIn => vfslice_core::NodeKind::FormalIn,
        Decl::FormalParam => vfslice_core::NodeKind::FormalParam,
        Decl::ActualIn => vfslice_core::NodeKind::ActualIn,
        Decl::ActualParam => vfslice_core::NodeKind::ActualParam,
        Decl::ActualOut => vfslice_core::NodeKind::ActualOut,
        Decl::ActualRet => vfslice_core::NodeKind::ActualRet,
    }
}

fn edge_kind(edge: &EdgeDecl) -> Result<vfslice_core::EdgeKind> {
    use vfslice_parser::EdgeKind as Decl;

    if let Decl::Direct = edge.kind {
        return Ok(vfslice_core::EdgeKind::Direct);
    }
    if let Decl::Indirect = edge.kind {
        return Ok(vfslice_core::EdgeKind::Indirect);
    }

    let site = edge
        .call_site
        .map(CallSiteId)
        .with_context(|| format!("edge %{} -> %{} is missing its call site", edge.src, edge.dst))?;
    Ok(match edge.kind {
        Decl::CallDirect => vfslice_core::EdgeKind::CallDirect(site),
        Decl::CallIndirect => vfslice_core::EdgeKind::CallIndirect(site),
        Decl::RetDirect => vfslice_core::EdgeKind::RetDirect(site),
        Decl::RetIndirect => vfslice_core::EdgeKind::RetIndirect(site),
        Decl::Direct | Decl::Indirect => unreachable!("handled above"),
    })
}
