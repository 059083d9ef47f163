use crate::analysis::ReachabilityEngine;
use crate::builder::GraphBuilder;
use crate::edge::EdgeKind;
use crate::graph::ValueFlowGraph;
use crate::node::{FunctionId, NodeId, NodeKind};
use crate::VfgError;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

/// Serialized form of a value-flow graph, as handed over by the producing
/// pipeline. Loading rebuilds the graph through [`GraphBuilder`] so the
/// same structural checks apply to file input and programmatic input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphData {
    pub name: String,
    pub functions: Vec<FunctionData>,
    pub nodes: Vec<NodeData>,
    pub edges: Vec<EdgeData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionData {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeData {
    pub id: u32,
    pub kind: NodeKind,
    pub function: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeData {
    pub src: u32,
    pub dst: u32,
    pub kind: EdgeKind,
}

impl GraphData {
    pub fn from_graph(graph: &ValueFlowGraph) -> Self {
        Self {
            name: graph.name().to_string(),
            functions: graph
                .functions()
                .map(|(id, name)| FunctionData {
                    id: id.0,
                    name: name.to_string(),
                })
                .collect(),
            nodes: graph
                .nodes()
                .map(|node| NodeData {
                    id: node.id.0,
                    kind: node.kind,
                    function: node.function.0,
                    name: node.name.clone(),
                })
                .collect(),
            edges: graph
                .edges()
                .iter()
                .map(|edge| EdgeData {
                    src: edge.src.0,
                    dst: edge.dst.0,
                    kind: edge.kind,
                })
                .collect(),
        }
    }

    /// File ids are remapped onto builder-assigned ids; duplicates and
    /// dangling references are rejected.
    pub fn into_graph(self) -> crate::Result<ValueFlowGraph> {
        let mut builder = GraphBuilder::new(self.name);

        let mut functions: HashMap<u32, FunctionId> = HashMap::new();
        for function in self.functions {
            if functions.contains_key(&function.id) {
                return Err(VfgError::DuplicateFunction(FunctionId(function.id)));
            }
            functions.insert(function.id, builder.function(function.name));
        }

        let mut nodes: HashMap<u32, NodeId> = HashMap::new();
        for node in self.nodes {
            if nodes.contains_key(&node.id) {
                return Err(VfgError::DuplicateNode(NodeId(node.id)));
            }
            let function = *functions
                .get(&node.function)
                .ok_or(VfgError::UnknownFunction(FunctionId(node.function)))?;
            let id = match node.name {
                Some(name) => builder.named_node(node.kind, function, name)?,
                None => builder.node(node.kind, function)?,
            };
            nodes.insert(node.id, id);
        }

        for edge in self.edges {
            let src = *nodes.get(&edge.src).ok_or(VfgError::UnknownNode(NodeId(edge.src)))?;
            let dst = *nodes.get(&edge.dst).ok_or(VfgError::UnknownNode(NodeId(edge.dst)))?;
            builder.edge(src, dst, edge.kind)?;
        }

        Ok(builder.build())
    }
}

pub fn save_graph(graph: &ValueFlowGraph, path: impl AsRef<Path>) -> io::Result<()> {
    let data = GraphData::from_graph(graph);
    let json = serde_json::to_string_pretty(&data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    fs::write(path, json)?;
    Ok(())
}

pub fn load_graph(path: impl AsRef<Path>) -> io::Result<ValueFlowGraph> {
    let json = fs::read_to_string(path)?;
    let data: GraphData =
        serde_json::from_str(&json).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    data.into_graph()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Hex SHA-256 of the graph's canonical JSON form, so a report can name
/// the exact graph it was computed from.
pub fn graph_digest(graph: &ValueFlowGraph) -> String {
    let data = GraphData::from_graph(graph);
    let json = serde_json::to_vec(&data).expect("graph data serializes");
    let mut hasher = Sha256::new();
    hasher.update(&json);
    let hash = hasher.finalize();

    hash.iter().map(|byte| format!("{:02x}", byte)).collect()
}

/// Persisted outcome of solving a graph: every queried exit node and its
/// resolved call-site inputs, plus enough metadata to tie the report back
/// to its input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveReport {
    pub metadata: ReportMetadata,
    pub entries: Vec<ReportEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub created_at: String,
    pub graph: String,
    pub graph_sha256: String,
    pub queries: u64,
    pub traversal_steps: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportEntry {
    pub exit: u32,
    pub function: String,
    pub ins: Vec<u32>,
}

impl SolveReport {
    pub fn from_engine(graph: &ValueFlowGraph, engine: &ReachabilityEngine<'_>) -> Self {
        let mut entries: Vec<ReportEntry> = engine
            .results()
            .map(|(exit, ins)| ReportEntry {
                exit: exit.0,
                function: graph
                    .node(exit)
                    .and_then(|node| graph.function_name(node.function))
                    .unwrap_or_default()
                    .to_string(),
                ins: ins.iter().map(|id| id.0).collect(),
            })
            .collect();
        entries.sort_by_key(|entry| entry.exit);

        let stats = engine.stats();
        Self {
            metadata: ReportMetadata {
                created_at: chrono::Utc::now().to_rfc3339(),
                graph: graph.name().to_string(),
                graph_sha256: graph_digest(graph),
                queries: stats.queries,
                traversal_steps: stats.steps,
            },
            entries,
        }
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let json = fs::read_to_string(path)?;
        let report: SolveReport = serde_json::from_str(&json)?;
        Ok(report)
    }
}
