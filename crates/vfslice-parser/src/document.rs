use crate::{parse, Rule};
use pest::iterators::Pair;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("syntax error:\n{0}")]
    Syntax(#[from] Box<pest::error::Error<Rule>>),
    #[error("edge %{src} -> %{dst}: {kind} edge requires a call site")]
    MissingCallSite { src: u32, dst: u32, kind: String },
    #[error("edge %{src} -> %{dst}: {kind} edge does not take a call site")]
    UnexpectedCallSite { src: u32, dst: u32, kind: String },
    #[error("number out of range: {0}")]
    NumberOutOfRange(String),
}

/// Node roles as written in `.vfg` files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
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
    fn from_keyword(keyword: &str) -> Option<Self> {
        Some(match keyword {
            "normal" => NodeKind::Normal,
            "formal_in" => NodeKind::FormalIn,
            "formal_param" => NodeKind::FormalParam,
            "actual_in" => NodeKind::ActualIn,
            "actual_param" => NodeKind::ActualParam,
            "actual_out" => NodeKind::ActualOut,
            "actual_ret" => NodeKind::ActualRet,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    Direct,
    Indirect,
    CallDirect,
    CallIndirect,
    RetDirect,
    RetIndirect,
}

impl EdgeKind {
    fn from_keyword(keyword: &str) -> Option<Self> {
        Some(match keyword {
            "direct" => EdgeKind::Direct,
            "indirect" => EdgeKind::Indirect,
            "call_direct" => EdgeKind::CallDirect,
            "call_indirect" => EdgeKind::CallIndirect,
            "ret_direct" => EdgeKind::RetDirect,
            "ret_indirect" => EdgeKind::RetIndirect,
            _ => return None,
        })
    }

    pub fn takes_call_site(&self) -> bool {
        !matches!(self, EdgeKind::Direct | EdgeKind::Indirect)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeDecl {
    pub id: u32,
    pub kind: NodeKind,
    pub function: String,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeDecl {
    pub src: u32,
    pub dst: u32,
    pub kind: EdgeKind,
    pub call_site: Option<u32>,
}

/// Parsed form of one `.vfg` file. Purely syntactic: reference resolution
/// and duplicate checks belong to whoever turns the document into a graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphDoc {
    pub name: Option<String>,
    pub functions: Vec<String>,
    pub nodes: Vec<NodeDecl>,
    pub edges: Vec<EdgeDecl>,
}

pub fn parse_document(input: &str) -> Result<GraphDoc, ParseError> {
    let mut pairs = parse(input)?;
    let document = pairs.next().expect("grammar yields one document");

    let mut doc = GraphDoc::default();
    for statement in document.into_inner() {
        match statement.as_rule() {
            Rule::graph_decl => {
                let string = statement.into_inner().next().expect("graph name");
                doc.name = Some(unquote(string.as_str()));
            }
            Rule::fun_decl => {
                let name = statement.into_inner().next().expect("function name");
                doc.functions.push(strip_sigil(name.as_str()));
            }
            Rule::node_decl => doc.nodes.push(node_decl(statement)?),
            Rule::edge_decl => doc.edges.push(edge_decl(statement)?),
            _ => {}
        }
    }
    Ok(doc)
}

fn node_decl(pair: Pair<'_, Rule>) -> Result<NodeDecl, ParseError> {
    let mut inner = pair.into_inner();
    let id = node_ref(inner.next().expect("node id"))?;
    let kind_pair = inner.next().expect("node kind");
    let kind = NodeKind::from_keyword(kind_pair.as_str()).expect("grammar-checked keyword");
    let function = strip_sigil(inner.next().expect("owning function").as_str());
    let label = inner.next().map(|string| unquote(string.as_str()));

    Ok(NodeDecl {
        id,
        kind,
        function,
        label,
    })
}

fn edge_decl(pair: Pair<'_, Rule>) -> Result<EdgeDecl, ParseError> {
    let mut inner = pair.into_inner();
    let src = node_ref(inner.next().expect("edge source"))?;
    let dst = node_ref(inner.next().expect("edge destination"))?;
    let kind_pair = inner.next().expect("edge kind");
    let kind = EdgeKind::from_keyword(kind_pair.as_str()).expect("grammar-checked keyword");
    let call_site = match inner.next() {
        Some(site) => {
            let number = site.into_inner().next().expect("call site number");
            Some(parse_number(number.as_str())?)
        }
        None => None,
    };

    match (kind.takes_call_site(), call_site.is_some()) {
        (true, false) => Err(ParseError::MissingCallSite {
            src,
            dst,
            kind: kind_pair.as_str().to_string(),
        }),
        (false, true) => Err(ParseError::UnexpectedCallSite {
            src,
            dst,
            kind: kind_pair.as_str().to_string(),
        }),
        _ => Ok(EdgeDecl {
            src,
            dst,
            kind,
            call_site,
        }),
    }
}

fn node_ref(pair: Pair<'_, Rule>) -> Result<u32, ParseError> {
    parse_number(pair.as_str().trim_start_matches('%'))
}

fn parse_number(digits: &str) -> Result<u32, ParseError> {
    digits
        .parse()
        .map_err(|_| ParseError::NumberOutOfRange(digits.to_string()))
}

fn strip_sigil(name: &str) -> String {
    name.trim_start_matches('@').to_string()
}

fn unquote(text: &str) -> String {
    text.trim_matches('"').to_string()
}
