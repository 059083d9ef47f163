use pretty_assertions::assert_eq;
use vfslice_core::persist::SolveReport;
use vfslice_core::{CallSiteId, EdgeKind, GraphBuilder, NodeKind, ReachabilityEngine, ValueFlowGraph};
use vfslice_emit::{EmitContext, Emittable, GraphEmitter, ReportEmitter};

fn sample_graph() -> ValueFlowGraph {
    let mut builder = GraphBuilder::new("demo");
    let main = builder.function("main");
    let callee = builder.function("callee");

    let a = builder
        .named_node(NodeKind::ActualIn, main, "arg a")
        .unwrap();
    let p = builder.node(NodeKind::FormalParam, callee).unwrap();
    let r = builder.node(NodeKind::ActualRet, main).unwrap();

    builder
        .edge(a, p, EdgeKind::CallDirect(CallSiteId(7)))
        .unwrap();
    builder
        .edge(p, r, EdgeKind::RetDirect(CallSiteId(7)))
        .unwrap();

    builder.build()
}

#[test]
fn test_graph_emit_snapshot() {
    let graph = sample_graph();
    let text = GraphEmitter::new(&graph)
        .to_formatted_string(&mut EmitContext::new())
        .unwrap();

    insta::assert_snapshot!(text, @r###"
    graph "demo"

    fun @main
    fun @callee

    node %0 actual_in @main "arg a"
    node %1 formal_param @callee
    node %2 actual_ret @main

    edge %0 -> %1 call_direct cs(7)
    edge %1 -> %2 ret_direct cs(7)
    "###);
}

#[test]
fn test_emitted_graph_parses_back() {
    let graph = sample_graph();
    let text = GraphEmitter::new(&graph)
        .to_formatted_string(&mut EmitContext::new())
        .unwrap();

    let doc = vfslice_parser::parse_document(&text).unwrap();
    assert_eq!(doc.name.as_deref(), Some("demo"));
    assert_eq!(doc.functions, vec!["main", "callee"]);
    assert_eq!(doc.nodes.len(), graph.node_count());
    assert_eq!(doc.edges.len(), graph.edge_count());
    assert_eq!(doc.nodes[0].label.as_deref(), Some("arg a"));
    assert_eq!(doc.edges[0].call_site, Some(7));
}

#[test]
fn test_report_emit_lists_origins() {
    let graph = sample_graph();
    let mut engine = ReachabilityEngine::new(&graph);
    engine.solve_all().unwrap();
    let report = SolveReport::from_engine(&graph, &engine);

    let text = ReportEmitter::new(&graph, &report)
        .to_formatted_string(&mut EmitContext::new())
        .unwrap();

    assert!(text.contains("=== value-flow slice report ==="));
    assert!(text.contains("graph: demo"));
    assert!(text.contains("exit %2 actual_ret @main"));
    assert!(text.contains("<- %0 actual_in @main \"arg a\""));
    assert!(text.contains("1 exits resolved"));
}

#[test]
fn test_report_json_round_trips() {
    let graph = sample_graph();
    let mut engine = ReachabilityEngine::new(&graph);
    engine.solve_all().unwrap();
    let report = SolveReport::from_engine(&graph, &engine);

    let json = ReportEmitter::new(&graph, &report).emit_json().unwrap();
    let parsed: SolveReport = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.entries.len(), 1);
    assert_eq!(parsed.entries[0].exit, 2);
    assert_eq!(parsed.entries[0].ins, vec![0]);
}
