use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod load;

#[derive(Parser)]
#[command(name = "vfslice")]
#[command(about = "vfslice - backward reachability over value-flow graphs")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve every call-site exit node to its originating inputs
    Solve {
        /// Graph file (.vfg text or .json)
        input: PathBuf,

        /// Write the report as JSON to this path instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the report as JSON on stdout
        #[arg(long, conflicts_with = "output")]
        json: bool,

        #[arg(short, long)]
        verbose: bool,
    },

    /// Check that a .vfg file parses
    Validate {
        input: PathBuf,

        #[arg(short, long)]
        verbose: bool,
    },

    /// Show graph structure and per-kind counts
    Info {
        input: PathBuf,

        #[arg(short, long)]
        verbose: bool,
    },

    /// Dump a graph in the .vfg textual format
    Emit {
        /// Graph file (.vfg text or .json)
        input: PathBuf,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            input,
            output,
            json,
            verbose,
        } => cmd_solve(input, output, json, verbose),
        Commands::Validate { input, verbose } => cmd_validate(input, verbose),
        Commands::Info { input, verbose } => cmd_info(input, verbose),
        Commands::Emit { input, output } => cmd_emit(input, output),
    }
}

fn cmd_solve(input: PathBuf, output: Option<PathBuf>, json: bool, verbose: bool) -> Result<()> {
    use colored::*;
    use std::time::Instant;
    use vfslice_core::persist::SolveReport;
    use vfslice_core::ReachabilityEngine;
    use vfslice_emit::{EmitContext, Emittable, ReportEmitter};

    if verbose {
        println!("{}", " vfslice solve".bright_blue().bold());
        println!("{}", "=".repeat(50).bright_blue());
        println!(" Input: {}", input.display());
        if let Some(ref out) = output {
            println!(" Output: {}", out.display());
        }
        println!();
    }

    let start = Instant::now();

    if verbose {
        println!(" Loading graph...");
    }
    let graph = load::load_graph(&input)?;

    if verbose {
        println!(
            " Solving {} exit node(s)...",
            graph.exit_nodes().count()
        );
    }
    let mut engine = ReachabilityEngine::new(&graph);
    engine.solve_all()?;
    let report = SolveReport::from_engine(&graph, &engine);

    if let Some(output_path) = output {
        report.save_to_file(&output_path)?;
        if verbose {
            let elapsed = start.elapsed();
            println!("\n {} Solve complete", "SUCCESS:".bright_green().bold());
            println!("   Time: {:.3}s", elapsed.as_secs_f64());
            println!("   Report: {}", output_path.display());
        }
    } else {
        let emitter = ReportEmitter::new(&graph, &report);
        if json {
            println!("{}", emitter.emit_json()?);
        } else {
            let mut context = EmitContext::colored();
            print!("{}", emitter.to_formatted_string(&mut context)?);
        }
    }

    Ok(())
}

fn cmd_validate(input: PathBuf, verbose: bool) -> Result<()> {
    use colored::*;
    use std::fs;

    if verbose {
        println!("{}", " Validating graph file".bright_cyan().bold());
        println!("{}", "=".repeat(50).bright_cyan());
        println!(" Input: {}", input.display());
        println!();
    }

    let content = fs::read_to_string(&input)?;

    match vfslice_parser::parse_document(&content) {
        Ok(doc) => {
            println!("{}", " VALID".bright_green().bold());
            if verbose {
                println!(
                    "   {} function(s), {} node(s), {} edge(s)",
                    doc.functions.len(),
                    doc.nodes.len(),
                    doc.edges.len()
                );
            }
            Ok(())
        }
        Err(e) => {
            println!("{}", " INVALID".bright_red().bold());
            println!("\n{}", "Parse Error:".bright_red());
            println!("{}", e);
            Err(anyhow::anyhow!("Validation failed"))
        }
    }
}

fn cmd_emit(input: PathBuf, output: Option<PathBuf>) -> Result<()> {
    use std::fs;
    use vfslice_emit::{EmitContext, Emittable, GraphEmitter};

    let graph = load::load_graph(&input)?;
    let text = GraphEmitter::new(&graph).to_formatted_string(&mut EmitContext::new())?;

    match output {
        Some(output_path) => fs::write(output_path, text)?,
        None => print!("{}", text),
    }

    Ok(())
}

fn cmd_info(input: PathBuf, verbose: bool) -> Result<()> {
    use colored::*;
    use std::collections::BTreeMap;

    let graph = load::load_graph(&input)?;

    println!(
        "{}",
        format!(" Graph: {}", graph.name()).bright_green().bold()
    );
    println!("Functions: {}", graph.function_count());
    println!("Nodes: {}", graph.node_count());
    println!("Edges: {}", graph.edge_count());
    println!("Exit nodes: {}", graph.exit_nodes().count());

    if verbose {
        let mut node_kinds: BTreeMap<&str, usize> = BTreeMap::new();
        for node in graph.nodes() {
            *node_kinds.entry(node.kind.keyword()).or_default() += 1;
        }
        let mut edge_kinds: BTreeMap<&str, usize> = BTreeMap::new();
        for edge in graph.edges() {
            *edge_kinds.entry(edge.kind.keyword()).or_default() += 1;
        }

        println!("\n  Node kinds:");
        for (kind, count) in &node_kinds {
            println!("    {}: {}", kind, count);
        }
        println!("\n  Edge kinds:");
        for (kind, count) in &edge_kinds {
            println!("    {}: {}", kind, count);
        }

        for (id, name) in graph.functions() {
            let nodes = graph.nodes().filter(|n| n.function == id).count();
            println!(
                "\n  {}",
                format!(" Function: @{}", name).bright_yellow()
            );
            println!("     Nodes: {}", nodes);
        }
    }

    Ok(())
}
