use crate::emitter::{write_line, write_section, EmitContext, EmitResult, Emittable};
use anyhow::Result;
use colored::Colorize;
use std::io::Write;
use vfslice_core::{NodeId, SolveReport, ValueFlowGraph};

/// Renders a solved reachability report for humans: one block per exit
/// node, listing every call-site input its value can originate from.
pub struct ReportEmitter<'a> {
    graph: &'a ValueFlowGraph,
    report: &'a SolveReport,
}

impl<'a> ReportEmitter<'a> {
    pub fn new(graph: &'a ValueFlowGraph, report: &'a SolveReport) -> Self {
        Self { graph, report }
    }

    /// The report's machine-readable form.
    pub fn emit_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self.report)?)
    }

    fn describe(&self, id: u32) -> String {
        match self.graph.node(NodeId(id)) {
            Some(node) => {
                let function = self
                    .graph
                    .function_name(node.function)
                    .unwrap_or("unknown");
                match &node.name {
                    Some(label) => format!("%{} {} @{} \"{}\"", id, node.kind.keyword(), function, label),
                    None => format!("%{} {} @{}", id, node.kind.keyword(), function),
                }
            }
            None => format!("%{}", id),
        }
    }
}

impl Emittable for ReportEmitter<'_> {
    fn emit<W: Write>(&self, writer: &mut W, context: &mut EmitContext) -> EmitResult {
        write_section(writer, context, "value-flow slice report")?;
        write_line(
            writer,
            context,
            &format!("graph: {}", self.report.metadata.graph),
        )?;
        write_line(
            writer,
            context,
            &format!("sha256: {}", self.report.metadata.graph_sha256),
        )?;
        writeln!(writer)?;

        for entry in &self.report.entries {
            let header = format!("exit {}", self.describe(entry.exit));
            if context.use_colors {
                write_line(writer, context, &header.bright_yellow().to_string())?;
            } else {
                write_line(writer, context, &header)?;
            }

            context.indent();
            if entry.ins.is_empty() {
                write_line(writer, context, "(no origins)")?;
            } else {
                for origin in &entry.ins {
                    write_line(writer, context, &format!("<- {}", self.describe(*origin)))?;
                }
            }
            context.dedent();
        }
        writeln!(writer)?;

        write_section(writer, context, "statistics")?;
        write_line(
            writer,
            context,
            &format!(
                "{} exits resolved, {} walked queries, {} traversal steps",
                self.report.entries.len(),
                self.report.metadata.queries,
                self.report.metadata.traversal_steps
            ),
        )?;
        Ok(())
    }
}
