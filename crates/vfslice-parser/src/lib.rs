/*! Parse textual value-flow graph files into structured data.
 *
 * The `.vfg` format is the hand-off point between a graph-producing
 * pipeline and this toolkit: a line-oriented listing of functions, nodes,
 * and edges. This parser reads it back into memory so a graph can be
 * validated, solved, or re-emitted.
 */

use pest::Parser;
use pest_derive::Parser;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub mod document;

pub use document::{parse_document, EdgeDecl, EdgeKind, GraphDoc, NodeDecl, NodeKind, ParseError};

#[derive(Parser)]
#[grammar = "grammar.pest"]
pub struct VfgParser;

pub type ParseResult<T> = Result<T, Box<pest::error::Error<Rule>>>;

pub fn parse(input: &str) -> ParseResult<pest::iterators::Pairs<'_, Rule>> {
    VfgParser::parse(Rule::document, input).map_err(Box::new)
}

pub fn check(input: &str) -> bool {
    parse(input).is_ok()
}

/// All `.vfg` files under `dir`, sorted for stable processing order.
pub fn find_graph_files<P: AsRef<Path>>(dir: P) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "vfg"))
        .collect();
    files.sort();
    files
}
