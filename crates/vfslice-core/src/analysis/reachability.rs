use crate::edge::{CallSiteId, EdgeKind};
use crate::graph::ValueFlowGraph;
use crate::node::NodeId;
use crate::{Result, VfgError};
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};
use tracing::{debug, trace};

/// Counters exposed for reporting and for observing engine behavior in
/// tests: a memoized re-query must leave `steps` untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct EngineStatistics {
    /// Queries that actually walked the graph.
    pub queries: u64,
    /// Queries answered straight from the memo table.
    pub memo_hits: u64,
    /// Nodes dequeued from the work queue across all walks.
    pub steps: u64,
}

/// Demand-driven, context-sensitive backward reachability over a
/// value-flow graph.
///
/// For an exit node (the value observed at a call site after the call
/// returns), [`compute_out_to_ins`](Self::compute_out_to_ins) yields the
/// caller-side input nodes whose values can flow into it. Each crossing of
/// a call/return boundary is matched to the one call instance named by the
/// seed return edges, so two unrelated calls to the same function never
/// pollute each other's answers.
///
/// Results are memoized for the lifetime of the engine and never
/// recomputed. One engine owns one memo table; the borrowed graph is never
/// mutated, so independent engines may query the same graph concurrently,
/// but a single engine must not be shared across threads without external
/// synchronization.
pub struct ReachabilityEngine<'g> {
    graph: &'g ValueFlowGraph,
    memo: HashMap<NodeId, BTreeSet<NodeId>>,
    in_progress: HashSet<NodeId>,
    stats: EngineStatistics,
}

impl<'g> ReachabilityEngine<'g> {
    pub fn new(graph: &'g ValueFlowGraph) -> Self {
        Self {
            graph,
            memo: HashMap::new(),
            in_progress: HashSet::new(),
            stats: EngineStatistics::default(),
        }
    }

    /// Resolves `src` (an `ActualOut`/`ActualRet` node) to the set of
    /// `ActualIn`/`ActualParam` nodes at its call site that can reach it.
    ///
    /// Fails fast on a non-exit query node, on return edges that disagree
    /// about their call site, on an edge whose kind does not fit its
    /// position, and on re-entrant queries through a recursive call
    /// structure. Any such failure reflects a defect in the producing
    /// pipeline, not a condition to recover from.
    pub fn compute_out_to_ins(&mut self, src: NodeId) -> Result<&BTreeSet<NodeId>> {
        self.ensure_computed(src)?;
        Ok(&self.memo[&src])
    }

    /// Queries every exit node in the graph, populating the memo table.
    pub fn solve_all(&mut self) -> Result<()> {
        let exits: Vec<NodeId> = self.graph.exit_nodes().map(|n| n.id).collect();
        debug!(exits = exits.len(), graph = self.graph.name(), "solving all exit nodes");
        for exit in exits {
            self.ensure_computed(exit)?;
        }
        Ok(())
    }

    /// Memoized result for `node`, if it has been queried.
    pub fn out_to_ins(&self, node: NodeId) -> Option<&BTreeSet<NodeId>> {
        self.memo.get(&node)
    }

    /// All resolved (exit, inputs) pairs, in no particular order.
    pub fn results(&self) -> impl Iterator<Item = (NodeId, &BTreeSet<NodeId>)> {
        self.memo.iter().map(|(id, ins)| (*id, ins))
    }

    pub fn stats(&self) -> EngineStatistics {
        self.stats
    }

    fn ensure_computed(&mut self, src: NodeId) -> Result<()> {
        let node = self.graph.node(src).ok_or(VfgError::UnknownNode(src))?;
        if !node.kind.is_call_exit() {
            return Err(VfgError::NotACallExit(src));
        }
        if self.memo.contains_key(&src) {
            self.stats.memo_hits += 1;
            trace!(%src, "memo hit");
            return Ok(());
        }
        // Memoization alone cannot break query cycles: a recursive call
        // structure re-enters a query before its entry lands in the memo.
        if !self.in_progress.insert(src) {
            return Err(VfgError::RecursiveQuery(src));
        }
        self.stats.queries += 1;

        let walked = self.backward_walk(src);
        self.in_progress.remove(&src);
        let ins = walked?;

        debug!(%src, ins = ins.len(), "resolved exit node");
        self.memo.insert(src, ins);
        Ok(())
    }

    fn backward_walk(&mut self, src: NodeId) -> Result<BTreeSet<NodeId>> {
        let graph = self.graph;
        let mut worklist: VecDeque<NodeId> = VecDeque::new();
        let mut visited: HashSet<NodeId> = HashSet::new();
        let mut ins: BTreeSet<NodeId> = BTreeSet::new();

        // Every in-edge of an exit node is a return edge of the one call
        // instance the node belongs to, so they must agree on the site.
        let mut call_site: Option<CallSiteId> = None;
        for edge in graph.in_edges(src) {
            let site = match edge.kind {
                EdgeKind::RetDirect(site) | EdgeKind::RetIndirect(site) => site,
                kind => {
                    return Err(VfgError::UnexpectedEdgeKind {
                        src: edge.src,
                        dst: edge.dst,
                        kind,
                        expected: "return",
                    })
                }
            };
            match call_site {
                None => call_site = Some(site),
                Some(first) if first != site => {
                    return Err(VfgError::InconsistentCallSites {
                        node: src,
                        first,
                        second: site,
                    })
                }
                Some(_) => {}
            }
            if visited.insert(edge.src) {
                worklist.push_back(edge.src);
            }
        }

        // An exit nothing returns into resolves to the empty set.
        let Some(call_site) = call_site else {
            return Ok(ins);
        };

        while let Some(cur) = worklist.pop_front() {
            self.stats.steps += 1;
            let node = graph.node(cur).ok_or(VfgError::UnknownNode(cur))?;

            if node.kind.is_formal_input() {
                // Boundary inside the callee: collect the call-site inputs
                // that belong to our call instance and stop here.
                for edge in graph.in_edges(cur) {
                    let site = match edge.kind {
                        EdgeKind::CallDirect(site) | EdgeKind::CallIndirect(site) => site,
                        kind => {
                            return Err(VfgError::UnexpectedEdgeKind {
                                src: edge.src,
                                dst: edge.dst,
                                kind,
                                expected: "call",
                            })
                        }
                    };
                    if site == call_site {
                        ins.insert(edge.src);
                    }
                }
                continue;
            }

            if node.kind.is_call_exit() {
                // Nested call exit: its own origins extend the frontier.
                // They are not answers for `src` unless the continued walk
                // reaches a formal input matching our call site.
                self.ensure_computed(cur)?;
                let nested: Vec<NodeId> = self.memo[&cur].iter().copied().collect();
                for origin in nested {
                    if visited.insert(origin) {
                        worklist.push_back(origin);
                    }
                }
                continue;
            }

            // Ordinary node: stay inside the owning function. A well-formed
            // graph has no other cross-function edges; pruning on function
            // identity keeps a malformed one from leaking across contexts.
            for edge in graph.in_edges(cur) {
                let pred = graph.node(edge.src).ok_or(VfgError::UnknownNode(edge.src))?;
                if pred.function == node.function && visited.insert(edge.src) {
                    worklist.push_back(edge.src);
                }
            }
        }

        Ok(ins)
    }
}
