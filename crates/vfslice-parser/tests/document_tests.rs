use pretty_assertions::assert_eq;
use vfslice_parser::{parse_document, EdgeKind, NodeKind, ParseError};

#[test]
fn test_document_collects_declarations() {
    let input = r#"
graph "two functions"
fun @main
fun @callee

node %0 actual_in @main "arg a"
node %1 formal_param @callee
node %2 actual_ret @main

edge %0 -> %1 call_direct cs(7)
edge %1 -> %2 ret_direct cs(7)
"#;

    let doc = parse_document(input).unwrap();

    assert_eq!(doc.name.as_deref(), Some("two functions"));
    assert_eq!(doc.functions, vec!["main", "callee"]);
    assert_eq!(doc.nodes.len(), 3);
    assert_eq!(doc.edges.len(), 2);

    assert_eq!(doc.nodes[0].id, 0);
    assert_eq!(doc.nodes[0].kind, NodeKind::ActualIn);
    assert_eq!(doc.nodes[0].function, "main");
    assert_eq!(doc.nodes[0].label.as_deref(), Some("arg a"));
    assert_eq!(doc.nodes[1].label, None);

    assert_eq!(doc.edges[0].kind, EdgeKind::CallDirect);
    assert_eq!(doc.edges[0].call_site, Some(7));
    assert_eq!(doc.edges[1].src, 1);
    assert_eq!(doc.edges[1].dst, 2);
}

#[test]
fn test_intraprocedural_edges_carry_no_site() {
    let input = r#"
fun @main
node %0 normal @main
node %1 normal @main
edge %0 -> %1 direct
edge %1 -> %0 indirect
"#;

    let doc = parse_document(input).unwrap();
    assert_eq!(doc.edges[0].kind, EdgeKind::Direct);
    assert_eq!(doc.edges[0].call_site, None);
    assert_eq!(doc.edges[1].kind, EdgeKind::Indirect);
}

#[test]
fn test_call_edge_without_site_rejected() {
    let input = r#"
fun @main
node %0 normal @main
node %1 normal @main
edge %0 -> %1 call_direct
"#;

    let err = parse_document(input).unwrap_err();
    assert!(matches!(
        err,
        ParseError::MissingCallSite { src: 0, dst: 1, .. }
    ));
}

#[test]
fn test_direct_edge_with_site_rejected() {
    let input = r#"
fun @main
node %0 normal @main
node %1 normal @main
edge %0 -> %1 direct cs(3)
"#;

    let err = parse_document(input).unwrap_err();
    assert!(matches!(
        err,
        ParseError::UnexpectedCallSite { src: 0, dst: 1, .. }
    ));
}

#[test]
fn test_oversized_number_rejected() {
    let input = "fun @main\nnode %99999999999 normal @main\n";

    let err = parse_document(input).unwrap_err();
    assert!(matches!(err, ParseError::NumberOutOfRange(_)));
}

#[test]
fn test_syntax_error_reported() {
    let err = parse_document("node without sigils\n").unwrap_err();
    assert!(matches!(err, ParseError::Syntax(_)));
}

#[test]
fn test_document_serializes_for_interchange() {
    let input = r#"
fun @main
node %0 actual_ret @main
"#;
    let doc = parse_document(input).unwrap();

    let json = serde_json::to_string(&doc).unwrap();
    assert!(json.contains("\"actual_ret\""));

    let back: vfslice_parser::GraphDoc = serde_json::from_str(&json).unwrap();
    assert_eq!(back, doc);
}

#[test]
fn test_find_graph_files_filters_and_sorts() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    std::fs::write(root.join("b.vfg"), "fun @main\n").unwrap();
    std::fs::write(root.join("a.vfg"), "fun @main\n").unwrap();
    std::fs::write(root.join("notes.txt"), "not a graph").unwrap();

    let files = vfslice_parser::find_graph_files(root);
    let names: Vec<_> = files
        .iter()
        .filter_map(|path| path.file_name())
        .collect();
    assert_eq!(names, vec!["a.vfg", "b.vfg"]);
}
