use crate::node::NodeId;
use serde::{Deserialize, Serialize};

/// Opaque handle naming one specific call instance in the program.
///
/// A call edge and the return edge of the same call instance carry the
/// same identifier; matching on it is what keeps unrelated calls to one
/// function from being correlated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CallSiteId(pub u32);

impl std::fmt::Display for CallSiteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "cs{}", self.0)
    }
}

/// Kind of a value-flow edge.
///
/// `Direct`/`Indirect` stay inside one function. The call kinds run from an
/// actual input at the call site to the matching formal input inside the
/// callee; the return kinds run from a callee-side value to the call-site
/// exit node. Direct and indirect variants only record whether the callee
/// was exactly known or resolved through pointer analysis; once the call
/// site is extracted they are treated identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    Direct,
    Indirect,
    CallDirect(CallSiteId),
    CallIndirect(CallSiteId),
    RetDirect(CallSiteId),
    RetIndirect(CallSiteId),
}

impl EdgeKind {
    pub fn call_site(&self) -> Option<CallSiteId> {
        match self {
            EdgeKind::CallDirect(site)
            | EdgeKind::CallIndirect(site)
            | EdgeKind::RetDirect(site)
            | EdgeKind::RetIndirect(site) => Some(*site),
            EdgeKind::Direct | EdgeKind::Indirect => None,
        }
    }

    pub fn is_call(&self) -> bool {
        matches!(self, EdgeKind::CallDirect(_) | EdgeKind::CallIndirect(_))
    }

    pub fn is_return(&self) -> bool {
        matches!(self, EdgeKind::RetDirect(_) | EdgeKind::RetIndirect(_))
    }

    pub fn is_interprocedural(&self) -> bool {
        self.call_site().is_some()
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            EdgeKind::Direct => "direct",
            EdgeKind::Indirect => "indirect",
            EdgeKind::CallDirect(_) => "call_direct",
            EdgeKind::CallIndirect(_) => "call_indirect",
            EdgeKind::RetDirect(_) => "ret_direct",
            EdgeKind::RetIndirect(_) => "ret_indirect",
        }
    }
}

impl std::fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword())?;
        if let Some(site) = self.call_site() {
            write!(f, " {}", site)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    pub src: NodeId,
    pub dst: NodeId,
    pub kind: EdgeKind,
}

impl Edge {
    pub fn new(src: NodeId, dst: NodeId, kind: EdgeKind) -> Self {
        Self { src, dst, kind }
    }
}

impl std::fmt::Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {} [{}]", self.src, self.dst, self.kind)
    }
}
