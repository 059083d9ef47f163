use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "n{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FunctionId(pub u32);

impl std::fmt::Display for FunctionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "fn{}", self.0)
    }
}

/// Role a node plays in the value-flow graph.
///
/// The `Actual*` roles live at a call site in the caller; the `Formal*`
/// roles are the matching view inside the callee. `ActualOut`/`ActualRet`
/// are the values observed at a call site after the call returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Normal,
    FormalIn,
    FormalParam,
    ActualIn,
    ActualParam,
    ActualOut,
    ActualRet,
}

impl NodeKind {
    /// Value observed at a call site after the call completes.
    pub fn is_call_exit(&self) -> bool {
        matches!(self, NodeKind::ActualOut | NodeKind::ActualRet)
    }

    /// Input value as seen inside the called function.
    pub fn is_formal_input(&self) -> bool {
        matches!(self, NodeKind::FormalIn | NodeKind::FormalParam)
    }

    /// Input value as supplied by the caller at the call site.
    pub fn is_call_input(&self) -> bool {
        matches!(self, NodeKind::ActualIn | NodeKind::ActualParam)
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            NodeKind::Normal => "normal",
            NodeKind::FormalIn => "formal_in",
            NodeKind::FormalParam => "formal_param",
            NodeKind::ActualIn => "actual_in",
            NodeKind::ActualParam => "actual_param",
            NodeKind::ActualOut => "actual_out",
            NodeKind::ActualRet => "actual_ret",
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
    pub function: FunctionId,
    pub name: Option<String>,
}

impl Node {
    pub fn new(id: NodeId, kind: NodeKind, function: FunctionId) -> Self {
        Self {
            id,
            kind,
            function,
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}
