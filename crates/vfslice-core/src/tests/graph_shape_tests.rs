use crate::edge::{CallSiteId, EdgeKind};
use crate::node::{FunctionId, NodeId, NodeKind};
use crate::builder::GraphBuilder;
use pretty_assertions::assert_eq;

#[test]
fn test_role_predicates() {
    assert!(NodeKind::ActualOut.is_call_exit());
    assert!(NodeKind::ActualRet.is_call_exit());
    assert!(NodeKind::FormalIn.is_formal_input());
    assert!(NodeKind::FormalParam.is_formal_input());
    assert!(NodeKind::ActualIn.is_call_input());
    assert!(NodeKind::ActualParam.is_call_input());

    assert!(!NodeKind::Normal.is_call_exit());
    assert!(!NodeKind::Normal.is_formal_input());
    assert!(!NodeKind::ActualIn.is_call_exit());
    assert!(!NodeKind::FormalIn.is_call_input());
}

#[test]
fn test_edge_kind_call_site_extraction() {
    let site = CallSiteId(11);

    assert_eq!(EdgeKind::CallDirect(site).call_site(), Some(site));
    assert_eq!(EdgeKind::CallIndirect(site).call_site(), Some(site));
    assert_eq!(EdgeKind::RetDirect(site).call_site(), Some(site));
    assert_eq!(EdgeKind::RetIndirect(site).call_site(), Some(site));
    assert_eq!(EdgeKind::Direct.call_site(), None);
    assert_eq!(EdgeKind::Indirect.call_site(), None);

    assert!(EdgeKind::CallIndirect(site).is_call());
    assert!(EdgeKind::RetIndirect(site).is_return());
    assert!(!EdgeKind::Direct.is_interprocedural());
    assert!(EdgeKind::RetDirect(site).is_interprocedural());
}

#[test]
fn test_display_formats() {
    assert_eq!(NodeId(3).to_string(), "n3");
    assert_eq!(FunctionId(1).to_string(), "fn1");
    assert_eq!(CallSiteId(7).to_string(), "cs7");
    assert_eq!(NodeKind::ActualRet.to_string(), "actual_ret");
    assert_eq!(EdgeKind::Direct.to_string(), "direct");
    assert_eq!(
        EdgeKind::CallDirect(CallSiteId(7)).to_string(),
        "call_direct cs7"
    );
}

#[test]
fn test_function_accessors() {
    let mut builder = GraphBuilder::new("shape");
    let main = builder.function("main");
    let helper = builder.function("helper");
    builder.node(NodeKind::Normal, main).unwrap();
    builder.node(NodeKind::Normal, helper).unwrap();

    let graph = builder.build();

    assert_eq!(graph.name(), "shape");
    assert_eq!(graph.function_count(), 2);
    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.edge_count(), 0);
    assert_eq!(graph.function_name(main), Some("main"));
    assert_eq!(graph.function_name(FunctionId(99)), None);

    let names: Vec<_> = graph.functions().map(|(_, name)| name).collect();
    assert_eq!(names, vec!["main", "helper"]);
}

#[test]
fn test_kind_serde_round_trip() {
    let kinds = [
        NodeKind::Normal,
        NodeKind::FormalIn,
        NodeKind::ActualParam,
        NodeKind::ActualRet,
    ];
    for kind in kinds {
        let json = serde_json::to_string(&kind).unwrap();
        assert_eq!(json, format!("\"{}\"", kind.keyword()));
        let back: NodeKind = serde_json::from_str(&json).unwrap();
        assert_eq!(back, kind);
    }

    let kind = EdgeKind::RetIndirect(CallSiteId(5));
    let json = serde_json::to_string(&kind).unwrap();
    let back: EdgeKind = serde_json::from_str(&json).unwrap();
    assert_eq!(back, kind);
}
